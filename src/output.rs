//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output leads with what something *is* (a question, a product, a price),
//! with supporting detail on indented context lines. Lists use 3-digit
//! positional indexes so output reads as an inventory.
//!
//! # Output Format
//!
//! ## Quote
//!
//! ```text
//! Custom Books (formula pricing)
//!     Binding: Saddle Stitching
//!     Pages: 4
//!     Size: 5.5 in x 8.5 in
//!     Cover: Uncoated, 12pt C2S, Matte
//!     Interior: Black and White, 70lb Text Gloss
//!     Quantity: 5
//! Per book: $3.82
//! Total: $19.10
//! ```
//!
//! ## FAQ
//!
//! ```text
//! 001 Shipping & Delivery (2 questions)
//!     001 How long does printing take?
//!         Most orders ship within 3 business days.
//! ```
//!
//! ## Generate
//!
//! ```text
//! Home → index.html
//! Custom Book Printing → books/index.html
//! ...
//! FAQ: 5 questions from fixtures/faq-posts.json
//! Generated 5 pages
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::catalog::{Category, Product};
use crate::faq::FaqSection;
use crate::generate::{FaqOrigin, GeneratedPage, Site};
use crate::pricing::{
    BusinessCardOrder, OrderSpecification, PriceQuote, ProductLine, TablePricing, ValidationErrors,
};

// ============================================================================
// Shared display helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// `1 question`, `3 questions`.
fn plural(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

fn print_lines(lines: Vec<String>) {
    for line in lines {
        println!("{}", line);
    }
}

// ============================================================================
// Quotes
// ============================================================================

/// Format a book quote with the order it prices.
pub fn format_book_quote(spec: &OrderSpecification, quote: &PriceQuote) -> Vec<String> {
    let line = ProductLine::Books;
    let mut lines = vec![
        format!("{} ({} pricing)", line.display_name(), line.strategy_name()),
        format!("{}Binding: {}", indent(1), spec.binding_type.label()),
        format!("{}Pages: {}", indent(1), spec.page_count),
        format!("{}Size: {}", indent(1), spec.size.label()),
        format!(
            "{}Cover: {}, {}, {}",
            indent(1),
            spec.cover_material.label(),
            spec.cover_paper_weight.label(),
            spec.cover_finish.label()
        ),
        format!(
            "{}Interior: {}, {}",
            indent(1),
            spec.inside_material.label(),
            spec.inside_paper_weight.label()
        ),
        format!("{}Quantity: {}", indent(1), spec.quantity),
        format!("Per book: {}", quote.per_unit),
        format!("Total: {}", quote.total),
    ];
    if quote.discounted {
        lines.push(format!("{}5% volume discount applied", indent(1)));
    }
    lines
}

pub fn print_book_quote(spec: &OrderSpecification, quote: &PriceQuote) {
    print_lines(format_book_quote(spec, quote));
}

/// Format a business card quote with the order it prices.
pub fn format_card_quote(order: &BusinessCardOrder, quote: &PriceQuote) -> Vec<String> {
    let line = ProductLine::BusinessCards;
    vec![
        format!("{} ({} pricing)", line.display_name(), line.strategy_name()),
        format!("{}Sides: {}", indent(1), order.sides.label()),
        format!("{}Finish: {}", indent(1), order.finish.label()),
        format!("{}Corners: {}", indent(1), order.corners.label()),
        format!("{}Quantity: {}", indent(1), order.quantity),
        format!("Per card: {}", quote.per_unit),
        format!("Total: {}", quote.total),
    ]
}

pub fn print_card_quote(order: &BusinessCardOrder, quote: &PriceQuote) {
    print_lines(format_card_quote(order, quote));
}

/// Format rejected fields, one per line.
pub fn format_validation_errors(errors: &ValidationErrors) -> Vec<String> {
    let mut lines = vec!["Invalid order:".to_string()];
    lines.extend(errors.iter().map(|e| format!("{}{}", indent(1), e)));
    lines
}

/// Validation errors go to stderr with the rest of the error output.
pub fn print_validation_errors(errors: &ValidationErrors) {
    for line in format_validation_errors(errors) {
        eprintln!("{}", line);
    }
}

/// Format the business card price table.
pub fn format_card_tiers() -> Vec<String> {
    let mut lines = vec!["Offered quantities".to_string()];
    lines.extend(TablePricing::tiers().iter().map(|tier| {
        format!(
            "{}{:>5} cards  {}/card  {} total",
            indent(1),
            tier.quantity,
            tier.per_card,
            tier.total
        )
    }));
    lines
}

pub fn print_card_tiers() {
    print_lines(format_card_tiers());
}

// ============================================================================
// FAQ
// ============================================================================

/// Format parsed FAQ sections: post title, then each question with its
/// answer lines indented below.
pub fn format_faq(sections: &[FaqSection]) -> Vec<String> {
    if sections.is_empty() {
        return vec!["No FAQ entries found".to_string()];
    }
    let mut lines = Vec::new();
    for (i, section) in sections.iter().enumerate() {
        lines.push(format!(
            "{} {} ({})",
            format_index(i + 1),
            section.title,
            plural(section.entries.len(), "question")
        ));
        for (j, entry) in section.entries.iter().enumerate() {
            lines.push(format!("{}{} {}", indent(1), format_index(j + 1), entry.question));
            for answer_line in entry.answer.lines().filter(|l| !l.trim().is_empty()) {
                lines.push(format!("{}{}", indent(2), answer_line));
            }
        }
    }
    lines
}

pub fn print_faq(sections: &[FaqSection]) {
    print_lines(format_faq(sections));
}

// ============================================================================
// Catalog
// ============================================================================

/// Format products grouped by category, in catalog order.
pub fn format_catalog(products: &[Product]) -> Vec<String> {
    let mut lines = Vec::new();
    for &category in Category::all() {
        let in_category: Vec<&Product> =
            products.iter().filter(|p| p.category == category).collect();
        if in_category.is_empty() {
            continue;
        }
        lines.push(category.label().to_string());
        for (i, product) in in_category.iter().enumerate() {
            lines.push(format!(
                "{}{} {} ({})",
                indent(1),
                format_index(i + 1),
                product.name,
                product.price
            ));
            lines.push(format!("{}Link: {}", indent(2), product.link));
        }
    }
    if lines.is_empty() {
        lines.push("No products".to_string());
    }
    lines
}

pub fn print_catalog(products: &[Product]) {
    print_lines(format_catalog(products));
}

// ============================================================================
// Generate
// ============================================================================

/// Format build output: each page with its file, then the FAQ source.
pub fn format_generate_output(site: &Site, pages: &[GeneratedPage]) -> Vec<String> {
    let mut lines: Vec<String> = pages
        .iter()
        .map(|p| format!("{} → {}", p.page.title(), p.path))
        .collect();

    let questions = plural(site.faq_entry_count(), "question");
    lines.push(match &site.faq_origin {
        FaqOrigin::Source(origin) => format!("FAQ: {} from {}", questions, origin),
        FaqOrigin::Fallback => format!("FAQ: {} (built-in, no source)", questions),
    });
    lines.push(format!("Generated {}", plural(pages.len(), "page")));
    lines
}

pub fn print_generate_output(site: &Site, pages: &[GeneratedPage]) {
    print_lines(format_generate_output(site, pages));
}

// ============================================================================
// Tests
// ============================================================================
