//! HTML site generation.
//!
//! Renders the storefront as static pages. FAQ content must already be
//! resolved (fetched from the CMS, read from a file, or the built-in
//! fallback) before rendering starts, so a failed fetch never leaves a
//! half-written site behind.
//!
//! ## Generated Pages
//!
//! - **Home** (`/index.html`): product showcase, four products per category
//! - **Books** (`/books/index.html`): marketing copy rendered from markdown
//! - **Calculator** (`/books/calculator/index.html`): the seven calculator
//!   steps, every option with its pricing factor, and a sample quote
//! - **Business cards** (`/business-cards/index.html`): specifications,
//!   options and the quantity price table
//! - **FAQ** (`/faq/index.html`): questions grouped by CMS post
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html
//! ├── books/
//! │   ├── index.html
//! │   └── calculator/
//! │       └── index.html
//! ├── business-cards/
//! │   └── index.html
//! └── faq/
//!     └── index.html
//! ```
//!
//! ## CSS
//!
//! `static/style.css` is embedded at compile time and inlined into every
//! page after the color and layout variables generated from `config.toml`.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping.

use crate::calculator::{CalculatorSession, Step};
use crate::catalog::{self, Category, Product};
use crate::cms::{CmsError, ContentSource};
use crate::config::{self, SiteConfig};
use crate::faq::{self, FaqSection};
use crate::pricing::book::{DISCOUNT_THRESHOLD, QUANTITY_MAX, QUANTITY_MIN};
use crate::pricing::cards::{self, BusinessCardOrder, TablePricing};
use crate::pricing::{
    BindingType, CardCorners, CardFinish, CardSides, CoverFinish, CoverMaterial, InsideMaterial,
    OrderSpecification, PageCountPolicy, PaperWeight, PricingError, PricingStrategy, TrimSize,
};
use crate::types::{NavItem, SitePage, site_navigation};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use pulldown_cmark::{Parser, html as md_html};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("FAQ fetch failed: {0}")]
    Cms(#[from] CmsError),
    #[error("Pricing error: {0}")]
    Pricing(#[from] PricingError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const BOOKS_COPY: &str = include_str!("../static/books.md");

/// Where the FAQ page content came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FaqOrigin {
    /// Fetched from a content source, described for output.
    Source(String),
    /// Built without a content source; sample questions are shown.
    Fallback,
}

/// Everything the renderer needs, fully resolved.
#[derive(Debug, Clone)]
pub struct Site {
    pub config: SiteConfig,
    pub faq: Vec<FaqSection>,
    pub faq_origin: FaqOrigin,
}

impl Site {
    /// Resolve FAQ content from `source`, or use the fallback when `None`.
    ///
    /// A fetch failure is returned unchanged; nothing is rendered.
    pub fn resolve(
        config: SiteConfig,
        source: Option<&dyn ContentSource>,
    ) -> Result<Self, GenerateError> {
        let (faq, faq_origin) = match source {
            Some(source) => {
                let posts = source.fetch_posts()?;
                (faq::sections_from_posts(&posts), FaqOrigin::Source(source.describe()))
            }
            None => (faq::fallback_sections(), FaqOrigin::Fallback),
        };
        Ok(Self {
            config,
            faq,
            faq_origin,
        })
    }

    pub fn faq_entry_count(&self) -> usize {
        self.faq.iter().map(|s| s.entries.len()).sum()
    }
}

/// One written page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPage {
    pub page: SitePage,
    /// Path relative to the output directory.
    pub path: String,
}

/// Render every page into `output_dir`.
pub fn generate(site: &Site, output_dir: &Path) -> Result<Vec<GeneratedPage>, GenerateError> {
    let css = build_css(&site.config);

    // Render everything before touching the filesystem.
    let mut rendered = Vec::with_capacity(SitePage::ALL.len());
    for page in SitePage::ALL {
        let markup = match page {
            SitePage::Home => render_home(&site.config, &css),
            SitePage::Books => render_books(&site.config, &css),
            SitePage::Calculator => render_calculator(&site.config, &css)?,
            SitePage::BusinessCards => render_business_cards(&site.config, &css)?,
            SitePage::Faq => render_faq(site, &css),
        };
        rendered.push((page, markup));
    }

    let mut written = Vec::with_capacity(rendered.len());
    for (page, markup) in rendered {
        let path = output_dir.join(page.output_path());
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, markup.into_string())?;
        written.push(GeneratedPage {
            page,
            path: page.output_path().to_string(),
        });
    }
    Ok(written)
}

fn build_css(config: &SiteConfig) -> String {
    let color_css = config::generate_color_css(&config.colors);
    let theme_css = config::generate_theme_css(&config.theme);
    format!("{}\n\n{}\n\n{}", color_css, theme_css, CSS_STATIC)
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(title: &str, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
            }
        }
    }
}

fn page_title(config: &SiteConfig, page: SitePage) -> String {
    match page {
        SitePage::Home => config.site_name.clone(),
        _ => format!("{} | {}", page.title(), config.site_name),
    }
}

/// Renders the site header with the shop name and navigation
fn site_header(config: &SiteConfig, current: SitePage) -> Markup {
    html! {
        header.site-header {
            a.site-title href="/" { (config.site_name) }
            nav.site-nav {
                (render_nav(&site_navigation(), current.url()))
            }
        }
    }
}

/// Renders the header links, marking the section `current_path` belongs to.
pub fn render_nav(items: &[NavItem], current_path: &str) -> Markup {
    html! {
        ul {
            @for item in items {
                @let is_current = if item.path == "/" {
                    current_path == "/"
                } else {
                    current_path.starts_with(&item.path)
                };
                li class=[is_current.then_some("current")] {
                    a href=(item.path) { (item.title) }
                }
            }
        }
    }
}

fn site_footer(config: &SiteConfig) -> Markup {
    html! {
        footer.site-footer {
            (config.site_name) " · " (config.tagline)
        }
    }
}

fn page_shell(config: &SiteConfig, page: SitePage, css: &str, main: Markup) -> Markup {
    let content = html! {
        (site_header(config, page))
        (main)
        (site_footer(config))
    };
    base_document(&page_title(config, page), css, content)
}

fn product_card(product: &Product) -> Markup {
    html! {
        a.product-card href=(product.link) {
            img src=(product.image) alt=(product.name) loading="lazy";
            span.product-name { (product.name) }
            span.product-price { (product.price) }
        }
    }
}

fn option_tile(label: &str, hint: &str, selected: bool) -> Markup {
    html! {
        div.option.selected[selected] {
            strong { (label) }
            span.option-hint { (hint) }
        }
    }
}

fn markdown_to_html(markdown: &str) -> String {
    let parser = Parser::new(markdown);
    let mut out = String::new();
    md_html::push_html(&mut out, parser);
    out
}

// ============================================================================
// Page Renderers
// ============================================================================

/// Renders the home page with one showcase per category
fn render_home(config: &SiteConfig, css: &str) -> Markup {
    let main = html! {
        main.home-page {
            section.hero {
                h1 { (config.site_name) }
                p.muted { (config.tagline) }
            }
            nav.category-tabs {
                @for category in Category::all() {
                    a href={ "#" (category.slug()) } { (category.label()) }
                }
            }
            @for &category in Category::all() {
                section.showcase id=(category.slug()) {
                    h2 { (category.label()) }
                    div.product-grid {
                        @for product in catalog::showcase(category) {
                            (product_card(&product))
                        }
                    }
                }
            }
            div.cta {
                h2 { "Printing a book?" }
                p { "Price your custom book in seven quick steps." }
                a.button href=(SitePage::Calculator.url()) { "Get an Instant Quote" }
            }
        }
    };
    page_shell(config, SitePage::Home, css, main)
}

/// Renders the books landing page from the embedded markdown copy
fn render_books(config: &SiteConfig, css: &str) -> Markup {
    let main = html! {
        main.books-page {
            h1 { "Custom Book Printing Services" }
            div.cta {
                h2 { "Custom Book Calculator" }
                p { "See what your custom book pricing would be." }
                a.button href=(SitePage::Calculator.url()) { "Get an Instant Quote" }
            }
            article.books-copy {
                (PreEscaped(markdown_to_html(BOOKS_COPY)))
            }
        }
    };
    page_shell(config, SitePage::Books, css, main)
}

/// Renders the book calculator reference page
fn render_calculator(config: &SiteConfig, css: &str) -> Result<Markup, GenerateError> {
    let session = CalculatorSession::new(config.calculator.page_count_policy);
    let spec = *session.spec();
    let quote = session.quote()?;

    let main = html! {
        main.calculator-page {
            h1 { "Custom Book Calculator" }
            ol.steps {
                @for step in Step::ALL {
                    li data-step=(step.number()) {
                        span.step-number { (step.number()) }
                        strong { (step.name()) }
                        p.muted { (step.description()) }
                    }
                }
            }

            h2 { "1. " (Step::Binding.name()) }
            div.options {
                @for binding in BindingType::ALL {
                    (option_tile(binding.label(), binding.description(), binding == spec.binding_type))
                }
            }
            p.muted {
                "Changing the binding "
                @match config.calculator.page_count_policy {
                    PageCountPolicy::ClampIntoRange => {
                        "keeps your page count when it fits, otherwise moves it to the nearest limit."
                    }
                    PageCountPolicy::SnapToMinimum => {
                        "resets the page count to the new binding's minimum."
                    }
                }
            }

            h2 { "2. " (Step::Pages.name()) }
            table {
                thead { tr { th { "Binding" } th.amount { "Minimum" } th.amount { "Maximum" } } }
                tbody {
                    @for binding in BindingType::ALL {
                        @let range = binding.page_range();
                        tr {
                            td { (binding.label()) }
                            td.amount { (range.start()) }
                            td.amount { (range.end()) }
                        }
                    }
                }
            }

            h2 { "3. " (Step::Size.name()) }
            table {
                thead { tr { th { "Trim size" } th.amount { "Price factor" } } }
                tbody {
                    @for size in TrimSize::ALL {
                        tr.selected[size == spec.size] {
                            td { (size.label()) }
                            td.amount { "×" (format!("{:.1}", size.multiplier())) }
                        }
                    }
                }
            }

            h2 { "4. " (Step::Cover.name()) }
            div.options {
                @for material in CoverMaterial::ALL {
                    (option_tile(material.label(), "Cover material", material == spec.cover_material))
                }
                @for finish in CoverFinish::ALL {
                    (option_tile(finish.label(), "Cover finish", finish == spec.cover_finish))
                }
            }

            h2 { "5. " (Step::Interior.name()) }
            div.options {
                @for material in InsideMaterial::ALL {
                    (option_tile(material.label(), "Inside pages", material == spec.inside_material))
                }
            }
            table {
                thead { tr { th { "Paper weight" } th { "Code" } th.amount { "Interior factor" } } }
                tbody {
                    @for weight in PaperWeight::ALL {
                        tr {
                            td { (weight.label()) }
                            td { code { (weight.as_str()) } }
                            td.amount { "×" (format!("{:.1}", weight.interior_multiplier())) }
                        }
                    }
                }
            }

            h2 { "6. " (Step::Quantity.name()) }
            p {
                "Order between " (QUANTITY_MIN) " and " (QUANTITY_MAX) " copies. "
                "Orders over " (DISCOUNT_THRESHOLD) " copies receive a 5% discount."
            }

            h2 { "7. " (Step::Quote.name()) }
            div.quote {
                (order_summary(&spec))
                p { "Price per book: " strong { (quote.per_unit.to_string()) } }
                p.total { (quote.total.to_string()) }
                @if quote.discounted {
                    p.muted { "Includes the 5% volume discount." }
                }
            }
        }
    };
    Ok(page_shell(config, SitePage::Calculator, css, main))
}

fn order_summary(spec: &OrderSpecification) -> Markup {
    html! {
        table.summary {
            tbody {
                tr { th { "Binding" } td { (spec.binding_type.label()) } }
                tr { th { "Pages" } td { (spec.page_count) } }
                tr { th { "Size" } td { (spec.size.label()) } }
                tr { th { "Cover" } td { (spec.cover_material.label()) ", " (spec.cover_paper_weight.label()) ", " (spec.cover_finish.label()) } }
                tr { th { "Interior" } td { (spec.inside_material.label()) ", " (spec.inside_paper_weight.label()) } }
                tr { th { "Quantity" } td { (spec.quantity) } }
            }
        }
    }
}

/// Renders the business card product page
fn render_business_cards(config: &SiteConfig, css: &str) -> Result<Markup, GenerateError> {
    let order = BusinessCardOrder::default();
    let quote = TablePricing.quote(&order)?;

    let main = html! {
        main.cards-page {
            h1 { "Custom Business Cards" }
            (card_gallery(&catalog::card_gallery()))
            h2 { "Specifications" }
            ul {
                @for line in cards::SPECIFICATIONS {
                    li { (line) }
                }
            }

            h2 { "Printing Sides" }
            div.options {
                @for sides in CardSides::ALL {
                    (option_tile(sides.label(), sides.description(), sides == order.sides))
                }
            }
            h2 { "Card Finish" }
            div.options {
                @for finish in CardFinish::ALL {
                    (option_tile(finish.label(), finish.description(), finish == order.finish))
                }
            }
            h2 { "Corner Style" }
            div.options {
                @for corners in CardCorners::ALL {
                    (option_tile(corners.label(), corners.description(), corners == order.corners))
                }
            }

            h2 { "Quantity" }
            table.price-table {
                thead { tr { th { "Cards" } th.amount { "Per card" } th.amount { "Total" } } }
                tbody {
                    @for tier in TablePricing::tiers() {
                        tr.selected[tier.quantity == order.quantity] {
                            td { (tier.quantity) }
                            td.amount { (tier.per_card.to_string()) "/card" }
                            td.amount { (tier.total.to_string()) }
                        }
                    }
                }
            }

            div.quote {
                h3 { "Order Summary" }
                p { (order.sides.label()) ", " (order.finish.label()) ", " (order.corners.label()) }
                p { (order.quantity) " cards" }
                p.total { (quote.total.to_string()) }
            }
        }
    };
    Ok(page_shell(config, SitePage::BusinessCards, css, main))
}

/// Main photo plus a thumbnail strip; each thumbnail links to its full image.
fn card_gallery(images: &[String]) -> Markup {
    html! {
        div.gallery {
            @if let Some(main) = images.first() {
                figure.gallery-main {
                    img src=(main) alt="Business cards";
                }
            }
            div.thumbnail-strip {
                @for (idx, image) in images.iter().enumerate() {
                    a.thumb-link.selected[idx == 0] href=(image) {
                        img src=(image) alt={ "Business cards view " (idx + 1) } loading="lazy";
                    }
                }
            }
        }
    }
}

/// Renders the FAQ page
fn render_faq(site: &Site, css: &str) -> Markup {
    let main = html! {
        main.faq-page {
            h1 { "Help & FAQs" }
            @if site.faq.is_empty() {
                p.muted { "No questions have been published yet." }
            }
            @for section in &site.faq {
                section.faq-section {
                    h2 { (section.title) }
                    @for entry in &section.entries {
                        details.faq-entry {
                            summary { (entry.question) }
                            p.faq-answer { (entry.answer) }
                        }
                    }
                }
            }
        }
    };
    page_shell(&site.config, SitePage::Faq, css, main)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cms::JsonFileSource;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn fallback_site() -> Site {
        Site::resolve(SiteConfig::default(), None).unwrap()
    }

    // =========================================================================
    // Components
    // =========================================================================

    #[test]
    fn nav_renders_items() {
        let html = render_nav(&site_navigation(), "/").into_string();
        assert!(html.contains("Business Cards"));
        assert!(html.contains(r#"href="/business-cards/""#));
    }

    #[test]
    fn nav_marks_current_section() {
        // The calculator lives under Books
        let html = render_nav(&site_navigation(), "/books/calculator/").into_string();
        assert!(html.contains(r#"<li class="current"><a href="/books/">Books</a></li>"#));
        assert!(!html.contains(r#"<li class="current"><a href="/">"#));
    }

    #[test]
    fn home_only_current_on_root() {
        let html = render_nav(&site_navigation(), "/").into_string();
        assert!(html.contains(r#"<li class="current"><a href="/">Home</a></li>"#));
        assert_eq!(html.matches("current").count(), 1);
    }

    #[test]
    fn page_titles_include_site_name() {
        let config = SiteConfig::default();
        assert_eq!(page_title(&config, SitePage::Home), "Print Perfect");
        assert_eq!(
            page_title(&config, SitePage::Faq),
            "Help & FAQs | Print Perfect"
        );
    }

    #[test]
    fn css_includes_config_variables() {
        let mut config = SiteConfig::default();
        config.colors.light.accent = "#ff6600".into();
        let css = build_css(&config);
        assert!(css.contains("--color-accent: #ff6600"));
        assert!(css.contains("--max-width: 72rem"));
        assert!(css.contains(".product-grid"));
    }

    // =========================================================================
    // Pages
    // =========================================================================

    #[test]
    fn home_shows_four_products_per_category() {
        let html = render_home(&SiteConfig::default(), "").into_string();
        assert_eq!(html.matches(r#"class="product-card""#).count(), 12);
        assert!(html.contains(r##"href="#postcards""##));
        assert!(html.contains(r#"id="stationery""#));
        assert!(html.contains("Round Business Cards"));
    }

    #[test]
    fn books_page_renders_markdown() {
        let html = render_books(&SiteConfig::default(), "").into_string();
        assert!(html.contains("<h2>How It Works</h2>"));
        assert!(html.contains("<strong>Proofing:</strong>"));
        assert!(html.contains(r#"href="/books/calculator/""#));
    }

    #[test]
    fn calculator_page_lists_steps_and_default_quote() {
        let html = render_calculator(&SiteConfig::default(), "")
            .unwrap()
            .into_string();
        for step in Step::ALL {
            assert!(html.contains(step.name()), "missing step {}", step.name());
        }
        assert!(html.contains("14pt C1S"));
        assert!(html.contains("6.625 in x 10.25 in"));
        // Default order: saddle, 4 pages, digest, 5 copies, coated matte, 70lb
        assert!(html.contains("$4.32"));
        assert!(html.contains("$21.60"));
    }

    #[test]
    fn calculator_page_describes_configured_policy() {
        let mut config = SiteConfig::default();
        config.calculator.page_count_policy = PageCountPolicy::SnapToMinimum;
        let html = render_calculator(&config, "").unwrap().into_string();
        assert!(html.contains("resets the page count"));
    }

    #[test]
    fn business_cards_page_lists_price_table() {
        let html = render_business_cards(&SiteConfig::default(), "")
            .unwrap()
            .into_string();
        assert!(html.contains("Premium 16pt (400gsm) cardstock"));
        assert!(html.contains("$0.27/card"));
        assert!(html.contains("$163.00"));
        assert!(html.contains("Front &amp; Back"));
        // Default order summary: 50 cards, $22.00
        assert!(html.contains("50 cards"));
        assert!(html.contains("$22.00"));
    }

    #[test]
    fn business_cards_page_shows_gallery() {
        let html = render_business_cards(&SiteConfig::default(), "")
            .unwrap()
            .into_string();
        assert!(html.contains(r#"<figure class="gallery-main"><img src="https://"#));
        assert_eq!(html.matches("thumb-link").count(), 4);
        assert_eq!(html.matches(r#"class="thumb-link selected""#).count(), 1);
        assert!(html.contains("business2.jpg"));
    }

    #[test]
    fn faq_page_fallback() {
        let html = render_faq(&fallback_site(), "").into_string();
        assert!(html.contains("How to place an order?"));
        assert!(html.contains("Shipping Information"));
    }

    #[test]
    fn faq_page_escapes_cms_text() {
        let mut site = fallback_site();
        site.faq = faq::sections_from_posts(&[post(
            1,
            "Files",
            "<p><strong>Can I send &lt;script&gt;?</strong> No.</p>",
        )]);
        let html = render_faq(&site, "").into_string();
        assert!(html.contains("Can I send &lt;script&gt;?"));
        assert!(!html.contains("<script>"));
    }

    #[test]
    fn faq_page_empty_source() {
        let mut site = fallback_site();
        site.faq.clear();
        let html = render_faq(&site, "").into_string();
        assert!(html.contains("No questions have been published yet."));
    }

    // =========================================================================
    // Site resolution and generate()
    // =========================================================================

    #[test]
    fn resolve_from_source_groups_by_post() {
        let source = JsonFileSource::new(fixture_path("faq-posts.json"));
        let site = Site::resolve(SiteConfig::default(), Some(&source as &dyn ContentSource)).unwrap();
        assert!(matches!(site.faq_origin, FaqOrigin::Source(_)));
        // The announcement post has no questions
        assert_eq!(site.faq.len(), 2);
        let shipping = find_section(&site.faq, "Shipping & Delivery");
        assert_eq!(shipping.entries.len(), 2);
        assert_eq!(site.faq_entry_count(), 5);
    }

    #[test]
    fn resolve_propagates_fetch_failure() {
        let tmp = TempDir::new().unwrap();
        let source = JsonFileSource::new(tmp.path().join("missing.json"));
        let result = Site::resolve(SiteConfig::default(), Some(&source as &dyn ContentSource));
        assert!(matches!(result, Err(GenerateError::Cms(CmsError::Io(_)))));
    }

    #[test]
    fn generate_writes_every_page() {
        let tmp = TempDir::new().unwrap();
        let out = tmp.path().join("dist");
        let pages = generate(&fallback_site(), &out).unwrap();

        assert_eq!(pages.len(), SitePage::ALL.len());
        for page in SitePage::ALL {
            let html = read_page(&out, page.output_path());
            assert!(html.starts_with("<!DOCTYPE html>"));
            assert!(html.contains(r#"<a class="site-title" href="/">Print Perfect</a>"#));
        }
    }

    #[test]
    fn generate_inlines_css() {
        let tmp = TempDir::new().unwrap();
        generate(&fallback_site(), tmp.path()).unwrap();
        let html = read_page(tmp.path(), "index.html");
        assert!(html.contains("--color-bg: #f8fafc"));
        assert!(html.contains("@media (prefers-color-scheme: dark)"));
    }
}
