//! Shared types used by configuration, page generation, and CLI output.

use serde::{Deserialize, Serialize};

/// A navbar entry pointing at an in-page section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavLink {
    /// Display label
    pub label: String,
    /// Section element id, without `#`
    pub anchor: String,
}

impl NavLink {
    pub fn href(&self) -> String {
        format!("#{}", self.anchor)
    }
}

/// Decorative glyphs used on cards and counters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    Users,
    Award,
    Calendar,
    Clock,
    Shield,
    Star,
    Heart,
    Gift,
}

impl Icon {
    /// Text glyph rendered in place of an icon font.
    pub fn glyph(&self) -> &'static str {
        match self {
            Icon::Users => "\u{1F465}",
            Icon::Award => "\u{1F3C5}",
            Icon::Calendar => "\u{1F4C5}",
            Icon::Clock => "\u{23F1}",
            Icon::Shield => "\u{1F6E1}",
            Icon::Star => "\u{2605}",
            Icon::Heart => "\u{2665}",
            Icon::Gift => "\u{1F381}",
        }
    }
}

/// Page sections in render order. Every section except the hero is a
/// reveal region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Hero,
    Stats,
    Services,
    About,
    WhyUs,
    Gallery,
    Promo,
    Testimonials,
    Contact,
    Cta,
}

impl Section {
    pub const ALL: [Section; 10] = [
        Section::Hero,
        Section::Stats,
        Section::Services,
        Section::About,
        Section::WhyUs,
        Section::Gallery,
        Section::Promo,
        Section::Testimonials,
        Section::Contact,
        Section::Cta,
    ];

    /// Element id, also the navbar anchor.
    pub fn id(&self) -> &'static str {
        match self {
            Section::Hero => "home",
            Section::Stats => "stats",
            Section::Services => "services",
            Section::About => "about",
            Section::WhyUs => "why-us",
            Section::Gallery => "gallery",
            Section::Promo => "promo",
            Section::Testimonials => "testimonials",
            Section::Contact => "contact",
            Section::Cta => "cta",
        }
    }

    pub fn reveals(&self) -> bool {
        !matches!(self, Section::Hero)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nav_link_href() {
        let link = NavLink {
            label: "Layanan".into(),
            anchor: "services".into(),
        };
        assert_eq!(link.href(), "#services");
    }

    #[test]
    fn section_ids_are_unique() {
        let mut ids: Vec<_> = Section::ALL.iter().map(|s| s.id()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), Section::ALL.len());
    }

    #[test]
    fn only_hero_skips_reveal() {
        let skipped: Vec<_> = Section::ALL.iter().filter(|s| !s.reveals()).collect();
        assert_eq!(skipped, vec![&Section::Hero]);
    }

    #[test]
    fn icon_parses_lowercase() {
        let icon: Icon = serde_json::from_str("\"calendar\"").unwrap();
        assert_eq!(icon, Icon::Calendar);
    }
}
