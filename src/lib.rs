//! # Print Perfect
//!
//! Storefront builder and pricing engine for a print shop selling custom
//! books, business cards, postcards and stationery.
//!
//! The crate has a pure core and two thin edges:
//!
//! ```text
//! pricing / calculator / faq / catalog      pure: no I/O, no state
//!            ↑                    ↑
//!          cms (HTTP, files)    config (config.toml)
//!            ↓                    ↓
//!          generate  →  dist/   (static HTML, Maud)
//! ```
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`pricing`] | Pricing engine: formula pricing for books, table pricing for business cards |
//! | [`calculator`] | The seven-step book calculator as an immutable session value |
//! | [`html`] | Small HTML tree builder for CMS markup and entity decoding |
//! | [`faq`] | Turns CMS post bodies into question/answer pairs |
//! | [`cms`] | Content sources: the WordPress REST API and JSON files |
//! | [`catalog`] | The fixed product list and home page showcase |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`generate`] | Renders the storefront pages using Maud |
//! | [`types`] | Site pages and header navigation |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Two Pricing Strategies, Not One Formula
//!
//! Books are priced by a formula over the chosen options. Business cards are
//! sold at hand-set list prices that no formula reproduces (600 and 800 cards
//! share a per-card price but not a per-card total). Forcing both through one
//! formula would either break the card table or grow special cases, so each
//! product line has its own [`pricing::PricingStrategy`].
//!
//! ## Money in Cents
//!
//! The book formula is computed in floating point and rounded once, to the
//! cent, at the end. Everything after that ([`pricing::Money`]) is integer
//! cents, so quotes compare exactly and print without drift.
//!
//! ## Explicit Page-Count Policy
//!
//! Switching binding can leave the page count outside the new range. What
//! happens then is a named, configurable [`pricing::PageCountPolicy`] rather
//! than a side effect of the form.
//!
//! ## Fetch Before Render
//!
//! FAQ content is fetched once, up front, with no retry. A failed fetch
//! aborts the build before any page is written, so the previous deploy stays
//! intact.

pub mod calculator;
pub mod catalog;
pub mod cms;
pub mod config;
pub mod faq;
pub mod generate;
pub mod html;
pub mod output;
pub mod pricing;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
