//! HTML page generation.
//!
//! Renders the single landing page from a resolved [`SiteConfig`] and copies
//! the site's asset directory next to it.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html        # The whole page, CSS and script inlined
//! └── assets/           # Copied verbatim from <source>/assets
//!     ├── logo.png
//!     ├── hero-1.png
//!     └── ...
//! ```
//!
//! ## Motion Hooks
//!
//! The markup is complete without JavaScript: every section is visible and
//! every counter shows its final value. `static/motion.js` progressively
//! enhances it:
//!
//! - `[data-reveal]` sections are hidden, then revealed once their detector
//!   latches.
//! - `[data-counter]` elements count up from zero with the timing in their
//!   `data-target`, `data-duration` and `data-delay` attributes.
//! - `.hero-slide` backgrounds rotate on the configured interval.
//!
//! Observation options and the rotator interval are handed to the script as
//! a JSON blob in `<script id="motion-config">`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::config::{self, ConfigError, CounterConfig, SiteConfig};
use crate::contact::{ContactError, WhatsAppLink, service_message};
use crate::motion::VISIBLE_RATIO;
use crate::types::Section;
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),
    #[error("Contact link error: {0}")]
    Contact(#[from] ContactError),
    #[error("Asset copy error: {0}")]
    Walk(#[from] walkdir::Error),
}

/// What a build produced, for CLI output.
#[derive(Debug, Clone)]
pub struct BuildReport {
    pub index_path: PathBuf,
    pub index_bytes: usize,
    pub reveal_regions: usize,
    pub counters: Vec<String>,
    pub slides: usize,
    pub assets_copied: usize,
}

/// Options handed to the browser script.
///
/// Field names are camelCase to read naturally on the script side.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScriptConfig<'a> {
    pub thresholds: &'a [f64],
    pub root_margin: String,
    pub visible_ratio: f64,
    pub navbar_offset: u32,
    pub rotator_interval_ms: u64,
    pub form_acknowledgement: &'a str,
}

impl<'a> ScriptConfig<'a> {
    pub fn from_config(config: &'a SiteConfig) -> Result<Self, ConfigError> {
        let options = config.motion.observe_options()?;
        Ok(Self {
            thresholds: &config.motion.thresholds,
            root_margin: options.root_margin.to_string(),
            visible_ratio: VISIBLE_RATIO,
            navbar_offset: config.motion.navbar_scroll_offset,
            rotator_interval_ms: config.hero.interval_ms,
            form_acknowledgement: &config.contact.form_acknowledgement,
        })
    }
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const JS: &str = include_str!("../static/motion.js");

/// Render `index.html` into `output_dir` and copy `<source_dir>/<assets_dir>`
/// alongside it.
pub fn generate(
    config: &SiteConfig,
    source_dir: &Path,
    output_dir: &Path,
) -> Result<BuildReport, GenerateError> {
    fs::create_dir_all(output_dir)?;

    let assets_src = source_dir.join(&config.site.assets_dir);
    let assets_copied = if assets_src.is_dir() {
        copy_assets(&assets_src, &output_dir.join(&config.site.assets_dir))?
    } else {
        tracing::warn!(path = %assets_src.display(), "assets directory not found, skipping copy");
        0
    };

    let page = render_page(config)?.into_string();
    let index_path = output_dir.join("index.html");
    fs::write(&index_path, &page)?;
    tracing::debug!(path = %index_path.display(), bytes = page.len(), "wrote page");

    Ok(BuildReport {
        index_path,
        index_bytes: page.len(),
        reveal_regions: Section::ALL.iter().filter(|s| s.reveals()).count(),
        counters: config
            .stats
            .counters
            .iter()
            .map(|c| c.suffix.render(c.target))
            .collect(),
        slides: config.hero.slides.len(),
        assets_copied,
    })
}

/// Copy every file under `src` into `dst`, keeping relative paths. Returns
/// the number of files copied.
fn copy_assets(src: &Path, dst: &Path) -> Result<usize, GenerateError> {
    let mut copied = 0;
    for entry in WalkDir::new(src).sort_by_file_name() {
        let entry = entry?;
        let Ok(rel) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            fs::copy(entry.path(), &target)?;
            copied += 1;
        }
    }
    Ok(copied)
}

/// JSON for the inline `<script type="application/json">` block.
///
/// `</` is escaped so a configured string can never close the script
/// element early.
pub fn script_config_json(config: &SiteConfig) -> Result<String, GenerateError> {
    let json = serde_json::to_string(&ScriptConfig::from_config(config)?)?;
    Ok(json.replace("</", "<\\/"))
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Page
// ============================================================================

/// Render the complete page.
pub fn render_page(config: &SiteConfig) -> Result<Markup, GenerateError> {
    let links = Links::new(config)?;
    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    let motion_json = script_config_json(config)?;

    let content = html! {
        (render_navbar(config, &links))
        main {
            (render_hero(config, &links))
            (render_stats(&config.stats.counters))
            (render_services(config, &links))
            (render_about(config))
            (render_why_us(config))
            (render_gallery(config))
            (render_promo(config, &links))
            (render_testimonials(config))
            (render_contact(config))
            (render_cta(config, &links))
        }
        (render_footer(config, &links))
        a.whatsapp-float href=(links.consult) target="_blank" rel="noopener" aria-label="WhatsApp" {
            span aria-hidden="true" { "\u{1F4AC}" }
        }
    };

    Ok(base_document(config, &css, &motion_json, content))
}

/// Prebuilt WhatsApp URLs shared by several sections.
struct Links {
    chat: WhatsAppLink,
    bare: String,
    booking: String,
    booking_now: String,
    consult: String,
    promo: String,
}

impl Links {
    fn new(config: &SiteConfig) -> Result<Self, ContactError> {
        let chat = WhatsAppLink::from_config(&config.contact)?;
        let messages = &config.contact.messages;
        Ok(Self {
            bare: chat.bare(),
            booking: chat.with_message(&messages.booking),
            booking_now: chat.with_message(&messages.booking_now),
            consult: chat.with_message(&messages.consult),
            promo: chat.with_message(&messages.promo),
            chat,
        })
    }

    fn service(&self, prefix: &str, name: &str) -> String {
        self.chat.with_message(&service_message(prefix, name))
    }
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(config: &SiteConfig, css: &str, motion_json: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang=(config.site.lang) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(config.site.description);
                title { (config.site.title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script id="motion-config" type="application/json" { (PreEscaped(motion_json)) }
                script { (PreEscaped(JS)) }
            }
        }
    }
}

/// Wraps section content; every section but the hero is a reveal region.
fn section(which: Section, class: &str, content: Markup) -> Markup {
    html! {
        section id=(which.id()) class=(class) data-reveal[which.reveals()] {
            div.container { (content) }
        }
    }
}

fn section_heading(heading: &str, subheading: &str) -> Markup {
    html! {
        div.section-heading {
            h2 { (heading) }
            @if !subheading.is_empty() {
                p { (subheading) }
            }
        }
    }
}

fn external_button(class: &str, href: &str, label: &str) -> Markup {
    html! {
        a class=(class) href=(href) target="_blank" rel="noopener" { (label) }
    }
}

fn render_navbar(config: &SiteConfig, links: &Links) -> Markup {
    html! {
        header.navbar id="navbar" {
            div.container.navbar-inner {
                a.brand href="#home" {
                    img.brand-logo src=(config.brand.logo) alt=(config.brand.name);
                    span.brand-name { (config.brand.name) }
                }
                button.menu-toggle id="menu-toggle" type="button" aria-label="Menu"
                    aria-controls="nav-menu" aria-expanded="false" {
                    span.menu-line {}
                    span.menu-line {}
                    span.menu-line {}
                }
                nav.nav-menu id="nav-menu" {
                    ul {
                        @for link in &config.nav {
                            li { a href=(link.href()) { (link.label) } }
                        }
                    }
                    (external_button("btn btn-primary nav-cta", &links.bare, "Book Now"))
                }
            }
        }
    }
}

/// A CSS `url("...")` token for a config-supplied path. The path is written
/// as a quoted CSS string, so quotes, parentheses and spaces stay inside it.
fn css_url(path: &str) -> String {
    let mut out = String::with_capacity(path.len() + 7);
    out.push_str("url(\"");
    for c in path.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            // Newlines cannot appear raw in a CSS string.
            '\n' => out.push_str("\\a "),
            c if c.is_control() => {}
            c => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

fn render_hero(config: &SiteConfig, links: &Links) -> Markup {
    let hero = &config.hero;
    html! {
        section.hero id=(Section::Hero.id()) {
            div.hero-slides aria-hidden="true" {
                @for (i, slide) in hero.slides.iter().enumerate() {
                    div.hero-slide.active[i == 0] data-slide=(i)
                        style={ "background-image: " (css_url(slide)) } {}
                }
                div.hero-overlay {}
            }
            div.container.hero-content {
                h1 { (hero.title) }
                p.hero-tagline { (hero.tagline) }
                div.hero-actions {
                    (external_button("btn btn-primary btn-lg", &links.booking, &hero.primary_label))
                    a.btn.btn-outline.btn-lg href={ "#" (Section::Services.id()) } { (hero.secondary_label) }
                }
                ul.hero-benefits {
                    @for benefit in &hero.benefits {
                        li { span.check aria-hidden="true" { "\u{2713}" } (benefit) }
                    }
                }
            }
            @if hero.slides.len() > 1 {
                div.hero-indicators {
                    @for i in 0..hero.slides.len() {
                        button.indicator.active[i == 0] type="button" data-slide-to=(i)
                            aria-label={ "Slide " (i + 1) } {}
                    }
                }
            }
        }
    }
}

/// Stats band. Each counter is its own observed region.
fn render_stats(counters: &[CounterConfig]) -> Markup {
    let content = html! {
        div.stats-grid {
            @for counter in counters {
                (render_counter(counter))
            }
        }
    };
    section(Section::Stats, "stats", content)
}

/// Counter markup shows the final value; the script resets it to zero before
/// counting.
pub fn render_counter(counter: &CounterConfig) -> Markup {
    html! {
        div.stat id=(counter.region_id()) data-counter
            data-target=(counter.target)
            data-duration=(counter.duration_ms)
            data-delay=(counter.delay_ms)
            data-suffix=(counter.suffix.as_str()) {
            span.stat-icon aria-hidden="true" { (counter.icon.glyph()) }
            span.stat-value { (counter.suffix.render(counter.target)) }
            span.stat-label { (counter.label) }
        }
    }
}

fn render_services(config: &SiteConfig, links: &Links) -> Markup {
    let services = &config.services;
    let prefix = &config.contact.messages.service_prefix;
    let content = html! {
        (section_heading(&services.heading, &services.subheading))
        div.card-grid {
            @for item in &services.items {
                article.card.service-card {
                    img.card-image src=(item.image) alt=(item.name) loading="lazy";
                    div.card-body {
                        h3 { (item.name) }
                        p { (item.description) }
                        div.card-footer {
                            span.price { (item.price) }
                            (external_button("btn btn-primary", &links.service(prefix, &item.name), &services.button_label))
                        }
                    }
                }
            }
        }
    };
    section(Section::Services, "services", content)
}

fn render_about(config: &SiteConfig) -> Markup {
    let about = &config.about;
    let content = html! {
        div.about-grid {
            div.about-text {
                h2 { (about.heading) }
                div.about-body { (PreEscaped(markdown_to_html(&about.body))) }
                ul.highlights {
                    @for h in &about.highlights {
                        li {
                            h4 { (h.title) }
                            p { (h.text) }
                        }
                    }
                }
            }
            img.about-image src=(about.image) alt=(about.heading) loading="lazy";
        }
    };
    section(Section::About, "about surface", content)
}

fn render_why_us(config: &SiteConfig) -> Markup {
    let why = &config.why_us;
    let content = html! {
        (section_heading(&why.heading, &why.subheading))
        div.feature-grid {
            @for item in &why.items {
                div.feature {
                    span.feature-icon aria-hidden="true" { (item.icon.glyph()) }
                    h3 { (item.title) }
                    p { (item.text) }
                }
            }
        }
    };
    section(Section::WhyUs, "why-us", content)
}

fn render_gallery(config: &SiteConfig) -> Markup {
    let gallery = &config.gallery;
    let content = html! {
        (section_heading(&gallery.heading, &gallery.subheading))
        div.gallery-grid {
            @if gallery.images.is_empty() {
                @for i in 0..gallery.placeholder_tiles {
                    div.gallery-tile.placeholder data-tile=(i) {
                        span.gallery-label { (gallery.detail_label) }
                    }
                }
            } @else {
                @for image in &gallery.images {
                    figure.gallery-tile {
                        img src=(image) alt=(gallery.heading) loading="lazy";
                        figcaption.gallery-label { (gallery.detail_label) }
                    }
                }
            }
        }
    };
    section(Section::Gallery, "gallery surface", content)
}

fn render_promo(config: &SiteConfig, links: &Links) -> Markup {
    let promo = &config.promo;
    let content = html! {
        div.promo-intro {
            h2 { (promo.heading) }
            p { (promo.body) }
        }
        div.promo-grid {
            @for package in &promo.packages {
                div.promo-card.featured[package.badge.is_some()] {
                    @if let Some(badge) = &package.badge {
                        span.badge { (badge) }
                    }
                    h3 { (package.name) }
                    p.includes { (package.includes) }
                    p.old-price { s { (package.old_price) } }
                    p.new-price { (package.price) }
                }
            }
        }
        (external_button("btn btn-highlight btn-lg", &links.promo, &promo.claim_label))
    };
    section(Section::Promo, "promo", content)
}

fn render_stars(rating: u8) -> Markup {
    html! {
        div.stars aria-label={ (rating) "/5" } {
            @for i in 1..=5u8 {
                span.star.filled[i <= rating] { "\u{2605}" }
            }
        }
    }
}

fn render_testimonials(config: &SiteConfig) -> Markup {
    let testimonials = &config.testimonials;
    let content = html! {
        (section_heading(&testimonials.heading, &testimonials.subheading))
        div.card-grid {
            @for item in &testimonials.items {
                blockquote.card.testimonial {
                    (render_stars(item.rating))
                    p { "\u{201C}" (item.quote) "\u{201D}" }
                    footer {
                        span.avatar aria-hidden="true" { (item.initials()) }
                        div {
                            cite { (item.name) }
                            span.role { (item.role) }
                        }
                    }
                }
            }
        }
    };
    section(Section::Testimonials, "testimonials", content)
}

fn contact_block(title: &str, lines: &[String]) -> Markup {
    html! {
        div.contact-block {
            h3 { (title) }
            @for line in lines {
                p { (line) }
            }
        }
    }
}

fn render_contact(config: &SiteConfig) -> Markup {
    let contact = &config.contact;
    let content = html! {
        (section_heading(&contact.heading, &contact.subheading))
        div.contact-grid {
            div.contact-info {
                (contact_block("Alamat", &contact.address))
                (contact_block("Telepon", &contact.phones))
                (contact_block("Email", &contact.emails))
                (contact_block("Jam Operasional", &contact.hours))
            }
            form.contact-form id="contact-form" {
                h3 { (contact.form_heading) }
                label { "Nama Lengkap" input type="text" name="name" placeholder="Masukkan nama lengkap"; }
                label { "Email" input type="email" name="email" placeholder="Masukkan email"; }
                label { "No. Telepon" input type="tel" name="phone" placeholder="Masukkan nomor telepon"; }
                label { "Pesan" textarea name="message" rows="4" placeholder="Tulis pesan Anda disini..." {} }
                button.btn.btn-primary type="submit" { (contact.form_submit_label) }
                p.form-status role="status" aria-live="polite" {}
            }
        }
    };
    section(Section::Contact, "contact surface", content)
}

fn render_cta(config: &SiteConfig, links: &Links) -> Markup {
    let cta = &config.cta;
    let content = html! {
        h2 { (cta.heading) }
        p { (cta.body) }
        div.cta-actions {
            (external_button("btn btn-light btn-lg", &links.booking_now, &cta.contact_label))
            a.btn.btn-outline.btn-lg href={ "#" (Section::Gallery.id()) } { (cta.gallery_label) }
        }
    };
    section(Section::Cta, "cta", content)
}

fn render_footer(config: &SiteConfig, links: &Links) -> Markup {
    let footer = &config.footer;
    let contact = &config.contact;
    html! {
        footer.site-footer {
            div.container.footer-grid {
                div {
                    h3 { (config.brand.name) }
                    p { (footer.blurb) }
                    div.social {
                        @for social in &footer.social {
                            (external_button("social-link", &social.url, &social.label))
                        }
                        (external_button("social-link whatsapp", &links.bare, "WhatsApp"))
                    }
                }
                div {
                    h3 { "Layanan" }
                    ul {
                        @for name in &footer.service_links {
                            li { a href={ "#" (Section::Services.id()) } { (name) } }
                        }
                    }
                }
                div {
                    h3 { "Navigasi" }
                    ul {
                        @for link in &config.nav {
                            li { a href=(link.href()) { (link.label) } }
                        }
                    }
                }
                div {
                    h3 { "Kontak Info" }
                    ul.footer-contact {
                        @if let Some(line) = contact.address.first() { li { (line) } }
                        @if let Some(phone) = contact.phones.first() { li { (phone) } }
                        @if let Some(email) = contact.emails.first() { li { (email) } }
                        @if let Some(hours) = contact.hours.first() { li { (hours) } }
                    }
                }
            }
            p.copyright { "\u{A9} " (footer.copyright) }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
