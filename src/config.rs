//! Site configuration module.
//!
//! Handles loading, validating, and merging `config.toml`. Every value on the
//! page (copy, prices, contact details, counter targets, motion timing) comes
//! from here; nothing is hard-coded in the generator or the motion script.
//!
//! ## Layering
//!
//! ```text
//! static/stock-config.toml   ← stock defaults (compiled in)
//! <source>/config.toml       ← site overrides (optional, sparse)
//! ```
//!
//! The user file is merged on top of the stock TOML value with
//! [`merge_toml`]: tables merge key by key, everything else (including
//! arrays such as `[[services.items]]`) replaces the stock value whole.
//!
//! ## Partial Configuration
//!
//! ```toml
//! # Only change the WhatsApp number and slow the hero down
//! [contact]
//! whatsapp_number = "6281234567890"
//!
//! [hero]
//! interval_ms = 8000
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::motion::{CounterSuffix, CounterTiming, ObserveOptions, RootMargin, Thresholds};
use crate::types::{Icon, NavLink};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

const STOCK_CONFIG: &str = include_str!("../static/stock-config.toml");

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SiteConfig {
    pub site: PageConfig,
    pub brand: BrandConfig,
    pub nav: Vec<NavLink>,
    pub contact: ContactConfig,
    pub hero: HeroConfig,
    pub stats: StatsConfig,
    pub services: ServicesConfig,
    pub about: AboutConfig,
    pub why_us: WhyUsConfig,
    pub gallery: GalleryConfig,
    pub promo: PromoConfig,
    pub testimonials: TestimonialsConfig,
    pub cta: CtaConfig,
    pub footer: FooterConfig,
    pub motion: MotionConfig,
    pub colors: ColorScheme,
}

impl Default for SiteConfig {
    fn default() -> Self {
        toml::from_str(STOCK_CONFIG).expect("stock config must parse")
    }
}

impl SiteConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let number = &self.contact.whatsapp_number;
        if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::Validation(format!(
                "contact.whatsapp_number must be digits only, got {number:?}"
            )));
        }
        if self.hero.slides.is_empty() {
            return Err(ConfigError::Validation(
                "hero.slides must not be empty".into(),
            ));
        }
        if self.hero.interval_ms == 0 {
            return Err(ConfigError::Validation(
                "hero.interval_ms must be greater than 0".into(),
            ));
        }
        for counter in &self.stats.counters {
            if counter.duration_ms == 0 {
                return Err(ConfigError::Validation(format!(
                    "stats.counters.{}: duration_ms must be greater than 0",
                    counter.id
                )));
            }
            if counter.id.is_empty() {
                return Err(ConfigError::Validation(
                    "stats.counters: id must not be empty".into(),
                ));
            }
        }
        let mut ids: Vec<&str> = self.stats.counters.iter().map(|c| c.id.as_str()).collect();
        ids.sort_unstable();
        if ids.windows(2).any(|w| w[0] == w[1]) {
            return Err(ConfigError::Validation(
                "stats.counters ids must be unique".into(),
            ));
        }
        for item in &self.testimonials.items {
            if !(1..=5).contains(&item.rating) {
                return Err(ConfigError::Validation(format!(
                    "testimonials.items.{}: rating must be 1-5",
                    item.name
                )));
            }
        }
        self.motion.observe_options()?;
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PageConfig {
    /// `<title>` of the page.
    pub title: String,
    /// `<meta name="description">`.
    pub description: String,
    /// `<html lang>`.
    pub lang: String,
    /// Directory under the source root copied to the output root.
    pub assets_dir: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BrandConfig {
    pub name: String,
    pub logo: String,
}

/// Contact details and the outbound WhatsApp link template.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactConfig {
    pub heading: String,
    pub subheading: String,
    pub whatsapp_base: String,
    pub whatsapp_number: String,
    pub address: Vec<String>,
    pub phones: Vec<String>,
    pub emails: Vec<String>,
    pub hours: Vec<String>,
    pub form_heading: String,
    pub form_submit_label: String,
    /// Local acknowledgement shown on form submit.
    pub form_acknowledgement: String,
    pub messages: ContactMessages,
}

/// Prefilled WhatsApp messages, one per call to action.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ContactMessages {
    pub booking: String,
    pub booking_now: String,
    pub consult: String,
    pub promo: String,
    pub service_prefix: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HeroConfig {
    pub title: String,
    pub tagline: String,
    pub primary_label: String,
    pub secondary_label: String,
    pub benefits: Vec<String>,
    /// Background images in rotation order.
    pub slides: Vec<String>,
    /// Milliseconds between automatic slide changes.
    pub interval_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatsConfig {
    pub counters: Vec<CounterConfig>,
}

/// One animated counter in the stats band.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CounterConfig {
    /// Element id suffix; must be unique.
    pub id: String,
    pub label: String,
    pub icon: Icon,
    pub target: u64,
    pub duration_ms: u64,
    pub delay_ms: u64,
    #[serde(default)]
    pub suffix: CounterSuffix,
}

impl CounterConfig {
    pub fn timing(&self) -> CounterTiming {
        CounterTiming {
            target: self.target,
            duration_ms: self.duration_ms,
            delay_ms: self.delay_ms,
        }
    }

    /// Element id of the counter's observed region.
    pub fn region_id(&self) -> String {
        format!("counter-{}", self.id)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServicesConfig {
    pub heading: String,
    pub subheading: String,
    pub button_label: String,
    pub items: Vec<ServiceItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServiceItem {
    pub name: String,
    pub description: String,
    pub price: String,
    pub image: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AboutConfig {
    pub heading: String,
    /// Markdown.
    pub body: String,
    pub image: String,
    pub highlights: Vec<Highlight>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Highlight {
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WhyUsConfig {
    pub heading: String,
    pub subheading: String,
    pub items: Vec<Feature>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Feature {
    pub icon: Icon,
    pub title: String,
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GalleryConfig {
    pub heading: String,
    pub subheading: String,
    pub detail_label: String,
    pub images: Vec<String>,
    /// Tiles rendered when `images` is empty.
    pub placeholder_tiles: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromoConfig {
    pub heading: String,
    pub body: String,
    pub claim_label: String,
    pub packages: Vec<PromoPackage>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PromoPackage {
    pub name: String,
    pub includes: String,
    pub old_price: String,
    pub price: String,
    /// Highlights the package when present.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub badge: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestimonialsConfig {
    pub heading: String,
    pub subheading: String,
    pub items: Vec<Testimonial>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Testimonial {
    pub name: String,
    pub role: String,
    pub rating: u8,
    pub quote: String,
}

impl Testimonial {
    /// Avatar initials: first letter of up to two words, uppercased.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CtaConfig {
    pub heading: String,
    pub body: String,
    pub contact_label: String,
    pub gallery_label: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterConfig {
    pub blurb: String,
    pub service_links: Vec<String>,
    pub copyright: String,
    pub social: Vec<SocialLink>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SocialLink {
    pub label: String,
    pub url: String,
}

/// Observation parameters shared by every reveal region and counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MotionConfig {
    pub thresholds: Vec<f64>,
    /// CSS margin shorthand, px or %.
    pub root_margin: String,
    /// Scroll offset (px) past which the navbar turns solid.
    pub navbar_scroll_offset: u32,
}

impl MotionConfig {
    /// Parse into typed observation options.
    pub fn observe_options(&self) -> Result<ObserveOptions, ConfigError> {
        let invalid = |e: crate::motion::visibility::OptionsError| {
            ConfigError::Validation(format!("motion: {e}"))
        };
        Ok(ObserveOptions {
            thresholds: Thresholds::new(self.thresholds.clone()).map_err(invalid)?,
            root_margin: self.root_margin.parse::<RootMargin>().map_err(invalid)?,
        })
    }
}

/// Page palette, emitted as CSS custom properties.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    /// Tinted section background.
    pub surface: String,
    pub text: String,
    pub text_muted: String,
    pub accent: String,
    pub accent_hover: String,
    pub accent_soft: String,
    /// Promo prices and badges.
    pub highlight: String,
    pub footer: String,
    pub whatsapp: String,
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> toml::Value {
    toml::from_str(STOCK_CONFIG).expect("stock config must parse")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load a `config.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if no `config.toml` exists in the directory.
pub fn load_raw_config(path: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = path.join("config.toml");
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `config.toml` in the given directory, on top of the
/// stock defaults.
pub fn load_config(root: &Path) -> Result<SiteConfig, ConfigError> {
    let overlay = load_raw_config(root)?;
    let config = resolve_config(stock_defaults_value(), overlay)?;
    tracing::debug!(root = %root.display(), "config loaded");
    Ok(config)
}

/// Returns the fully commented stock `config.toml`.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    STOCK_CONFIG
}

/// Generate CSS custom properties from the palette.
pub fn generate_color_css(colors: &ColorScheme) -> String {
    format!(
        r#":root {{
    --color-bg: {background};
    --color-surface: {surface};
    --color-text: {text};
    --color-text-muted: {text_muted};
    --color-accent: {accent};
    --color-accent-hover: {accent_hover};
    --color-accent-soft: {accent_soft};
    --color-highlight: {highlight};
    --color-footer: {footer};
    --color-whatsapp: {whatsapp};
}}"#,
        background = colors.background,
        surface = colors.surface,
        text = colors.text,
        text_muted = colors.text_muted,
        accent = colors.accent,
        accent_hover = colors.accent_hover,
        accent_soft = colors.accent_soft,
        highlight = colors.highlight,
        footer = colors.footer,
        whatsapp = colors.whatsapp,
    )
}
