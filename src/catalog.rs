//! The fixed product catalog shown on the home page.
//!
//! Products are not sourced from the CMS; the list is compiled in and edited
//! with the code. Order matters: within a category, the first four products
//! are the ones showcased.

use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How many products the home page shows per category.
pub const SHOWCASE_SIZE: usize = 4;

const UPLOADS: &str = "https://wordpress-1420028-5294304.cloudwaysapps.com/wp-content/uploads/2025/02";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Category {
    #[serde(rename = "Business Cards")]
    BusinessCards,
    Postcards,
    Stationery,
}

impl Category {
    /// All categories in display order.
    pub fn all() -> &'static [Category] {
        &[Category::BusinessCards, Category::Postcards, Category::Stationery]
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::BusinessCards => "Business Cards",
            Category::Postcards => "Postcards",
            Category::Stationery => "Stationery",
        }
    }

    /// URL/anchor-safe identifier.
    pub fn slug(self) -> &'static str {
        match self {
            Category::BusinessCards => "business-cards",
            Category::Postcards => "postcards",
            Category::Stationery => "stationery",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown category '{0}' (expected business-cards, postcards or stationery)")]
pub struct UnknownCategory(pub String);

impl FromStr for Category {
    type Err = UnknownCategory;

    /// Accepts the slug or the label, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Category::all()
            .iter()
            .copied()
            .find(|c| c.slug() == wanted || c.label().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: u32,
    pub name: &'static str,
    /// Display string, e.g. "From $19".
    pub price: &'static str,
    pub image: String,
    /// Site path of the product page.
    pub link: &'static str,
    pub category: Category,
}

fn product(
    id: u32,
    name: &'static str,
    price: &'static str,
    image: &str,
    category: Category,
) -> Product {
    let link = match category {
        Category::BusinessCards => "/business-cards/",
        Category::Postcards => "/postcards/",
        Category::Stationery => "/stationery/",
    };
    Product {
        id,
        name,
        price,
        image: format!("{UPLOADS}/{image}"),
        link,
        category,
    }
}

/// Every product, in catalog order.
pub fn products() -> Vec<Product> {
    use Category::*;
    vec![
        product(1, "Round Business Cards", "From $19", "business3.jpg", BusinessCards),
        product(2, "Business Cards", "From $49", "business4.jpg", BusinessCards),
        product(3, "Classic Business Cards", "From $19", "business.jpg", BusinessCards),
        product(4, "Business Cards", "From $49", "business5.jpg", BusinessCards),
        product(5, "Standard Postcards", "From $29", "post7-scaled.jpg", Postcards),
        product(6, "Premium Postcards", "From $39", "post6.jpg", Postcards),
        product(7, "Premium Postcards", "From $39", "post5-scaled.jpg", Postcards),
        product(8, "Standard Postcards", "From $29", "post4.jpg", Postcards),
        product(9, "Letter Sets", "From $25", "station.jpg", Stationery),
        product(10, "Notepads", "From $15", "station4.jpg", Stationery),
        product(11, "Letter Sets", "From $25", "station6.jpg", Stationery),
        product(12, "Notepads", "From $15", "station3.jpg", Stationery),
    ]
}

pub fn by_category(category: Category) -> Vec<Product> {
    products()
        .into_iter()
        .filter(|p| p.category == category)
        .collect()
}

/// The products featured for `category` on the home page.
pub fn showcase(category: Category) -> Vec<Product> {
    by_category(category)
        .into_iter()
        .take(SHOWCASE_SIZE)
        .collect()
}

/// Photos on the business card page; the first is the main view.
pub fn card_gallery() -> Vec<String> {
    ["business4.jpg", "business2.jpg", "business3.jpg", "business5.jpg"]
        .iter()
        .map(|file| format!("{UPLOADS}/{file}"))
        .collect()
}

pub fn find(id: u32) -> Option<Product> {
    products().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twelve_products_four_per_category() {
        assert_eq!(products().len(), 12);
        for &category in Category::all() {
            assert_eq!(by_category(category).len(), 4, "{category}");
        }
    }

    #[test]
    fn ids_are_unique_and_sequential() {
        let ids: Vec<u32> = products().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=12).collect::<Vec<_>>());
    }

    #[test]
    fn showcase_keeps_catalog_order() {
        let names: Vec<&str> = showcase(Category::Stationery)
            .iter()
            .map(|p| p.name)
            .collect();
        assert_eq!(names, vec!["Letter Sets", "Notepads", "Letter Sets", "Notepads"]);
    }

    #[test]
    fn find_by_id() {
        let p = find(6).unwrap();
        assert_eq!(p.name, "Premium Postcards");
        assert_eq!(p.price, "From $39");
        assert_eq!(p.link, "/postcards/");
        assert!(p.image.ends_with("/2025/02/post6.jpg"));
        assert!(find(13).is_none());
    }

    #[test]
    fn card_gallery_has_four_uploads() {
        let gallery = card_gallery();
        assert_eq!(gallery.len(), 4);
        assert!(gallery[0].ends_with("/2025/02/business4.jpg"));
        assert!(gallery.iter().all(|url| url.starts_with("https://")));
    }

    #[test]
    fn links_follow_category() {
        for p in by_category(Category::BusinessCards) {
            assert_eq!(p.link, "/business-cards/");
        }
    }

    #[test]
    fn category_parsing() {
        assert_eq!("postcards".parse::<Category>().unwrap(), Category::Postcards);
        assert_eq!("Business Cards".parse::<Category>().unwrap(), Category::BusinessCards);
        assert_eq!("business-cards".parse::<Category>().unwrap(), Category::BusinessCards);
        assert!("mugs".parse::<Category>().is_err());
    }
}
