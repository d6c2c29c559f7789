//! # Salon Page
//!
//! A static landing page generator for a beauty salon. One `config.toml`
//! describes the whole page: brand, services and prices, promotions,
//! testimonials, contact details and motion timing. The output is a single
//! `index.html` with inline CSS and a small vanilla script.
//!
//! # Architecture
//!
//! ```text
//! config.toml  →  SiteConfig  →  index.html + assets/      (build)
//!                     │
//!                     └──────→  motion state machines      (simulate)
//! ```
//!
//! The page's behavior is defined by the state machines in [`motion`]:
//!
//! - a **sticky visibility detector** that latches a region visible the first
//!   time it intersects the viewport at a ratio of 0.2 or more, and fails open
//!   when the platform cannot observe;
//! - an **eased counter** that counts from zero to a target with an
//!   ease-in-out-quad curve after an optional delay, once;
//! - a **background rotator** that cycles hero slides on a fixed interval.
//!
//! Platform APIs (viewport intersection, per-frame callbacks) sit behind
//! traits, so the same code runs against a simulated viewport in tests and in
//! `salon-page simulate`. The inlined browser script mirrors the same rules.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`motion`] | Visibility latch, eased counter, rotator and their platform seams |
//! | [`config`] | Layered `config.toml` loading, validation and CSS generation |
//! | [`generate`] | Renders the page with Maud and copies assets |
//! | [`contact`] | WhatsApp chat links with prefilled messages |
//! | [`simulate`] | Headless scroll-and-frame run of the page's motion |
//! | [`types`] | Shared types: navbar links, icons, page sections |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Works Without JavaScript
//!
//! The generated markup is the final state: every section is visible and
//! every counter shows its target. The script hides reveal regions only
//! after it has started, and resets counters to zero only before animating
//! them. A browser without `IntersectionObserver` gets the same fail-open
//! treatment as the core's [`motion::NoIntersection`] platform.
//!
//! ## Maud Over Template Engines
//!
//! HTML is generated with [Maud](https://maud.lambda.xyz/), a compile-time
//! HTML macro system. Interpolation is escaped by default, which matters
//! here because every string on the page is user configuration.

pub mod config;
pub mod contact;
pub mod generate;
pub mod motion;
pub mod output;
pub mod simulate;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
