//! Shared site types used by the generator and the CLI.

use serde::Serialize;

/// A page of the generated storefront.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SitePage {
    Home,
    Books,
    Calculator,
    BusinessCards,
    Faq,
}

impl SitePage {
    pub const ALL: [SitePage; 5] = [
        SitePage::Home,
        SitePage::Books,
        SitePage::Calculator,
        SitePage::BusinessCards,
        SitePage::Faq,
    ];

    pub fn title(self) -> &'static str {
        match self {
            SitePage::Home => "Home",
            SitePage::Books => "Custom Book Printing",
            SitePage::Calculator => "Custom Book Calculator",
            SitePage::BusinessCards => "Custom Business Cards",
            SitePage::Faq => "Help & FAQs",
        }
    }

    /// Site-absolute URL.
    pub fn url(self) -> &'static str {
        match self {
            SitePage::Home => "/",
            SitePage::Books => "/books/",
            SitePage::Calculator => "/books/calculator/",
            SitePage::BusinessCards => "/business-cards/",
            SitePage::Faq => "/faq/",
        }
    }

    /// File path relative to the output directory.
    pub fn output_path(self) -> &'static str {
        match self {
            SitePage::Home => "index.html",
            SitePage::Books => "books/index.html",
            SitePage::Calculator => "books/calculator/index.html",
            SitePage::BusinessCards => "business-cards/index.html",
            SitePage::Faq => "faq/index.html",
        }
    }
}

/// Header navigation entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NavItem {
    pub title: String,
    pub path: String,
}

/// The header links, in display order.
pub fn site_navigation() -> Vec<NavItem> {
    [
        ("Home", SitePage::Home),
        ("Books", SitePage::Books),
        ("Business Cards", SitePage::BusinessCards),
        ("FAQ", SitePage::Faq),
    ]
    .into_iter()
    .map(|(title, page)| NavItem {
        title: title.to_string(),
        path: page.url().to_string(),
    })
    .collect()
}
