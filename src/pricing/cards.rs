//! Business card orders, priced from a published table.
//!
//! Cards come in a handful of fixed quantities, each with a hand-set price.
//! The per-card and total figures are the shop's list prices as printed on
//! the product page and are not related by any formula (600 cards at 27¢
//! each is listed at $163.00, not $162.00), so nothing is derived here.

use super::{Money, PriceQuote, PricingError, PricingStrategy, ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One row of the card price table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceTier {
    pub quantity: u32,
    pub per_card: Money,
    pub total: Money,
}

const fn tier(quantity: u32, per_card_cents: i64, total_cents: i64) -> PriceTier {
    PriceTier {
        quantity,
        per_card: Money::from_cents(per_card_cents),
        total: Money::from_cents(total_cents),
    }
}

pub const PRICE_TABLE: [PriceTier; 7] = [
    tier(50, 44, 2200),
    tier(100, 43, 4300),
    tier(200, 37, 7400),
    tier(400, 32, 12900),
    tier(600, 27, 16300),
    tier(800, 27, 21700),
    tier(1000, 25, 25000),
];

/// Fixed product specifications, the same for every card order.
pub const SPECIFICATIONS: [&str; 4] = [
    "Premium 16pt (400gsm) cardstock",
    "Standard size: 3.5\" x 2\"",
    "Full color printing",
    "Professional finish options",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardFinish {
    #[default]
    Gloss,
    Matte,
}

impl CardFinish {
    pub const ALL: [CardFinish; 2] = [CardFinish::Gloss, CardFinish::Matte];

    /// Short hint shown under the option.
    pub fn description(self) -> &'static str {
        match self {
            CardFinish::Gloss => "Shiny finish",
            CardFinish::Matte => "Smooth finish",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardFinish::Gloss => "Gloss",
            CardFinish::Matte => "Matte",
        }
    }
}

impl FromStr for CardFinish {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gloss" => Ok(CardFinish::Gloss),
            "matte" => Ok(CardFinish::Matte),
            _ => Err(unknown("finish", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardCorners {
    #[default]
    Square,
    Rounded,
}

impl CardCorners {
    pub const ALL: [CardCorners; 2] = [CardCorners::Square, CardCorners::Rounded];

    /// Short hint shown under the option.
    pub fn description(self) -> &'static str {
        match self {
            CardCorners::Square => "Classic look",
            CardCorners::Rounded => "Modern style",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardCorners::Square => "Square Corners",
            CardCorners::Rounded => "Rounded Corners",
        }
    }
}

impl FromStr for CardCorners {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "square" => Ok(CardCorners::Square),
            "rounded" => Ok(CardCorners::Rounded),
            _ => Err(unknown("corners", s)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CardSides {
    #[default]
    Single,
    Double,
}

impl CardSides {
    pub const ALL: [CardSides; 2] = [CardSides::Single, CardSides::Double];

    /// Short hint shown under the option.
    pub fn description(self) -> &'static str {
        match self {
            CardSides::Single => "Front only",
            CardSides::Double => "Front & Back",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CardSides::Single => "Single Sided",
            CardSides::Double => "Double Sided",
        }
    }
}

impl FromStr for CardSides {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "single" => Ok(CardSides::Single),
            "double" => Ok(CardSides::Double),
            _ => Err(unknown("sides", s)),
        }
    }
}

fn unknown(field: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownValue {
        field,
        value: value.to_string(),
    }
}

/// A business card order. Finish, corners and sides are production options
/// only; the price depends on quantity alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessCardOrder {
    pub finish: CardFinish,
    pub corners: CardCorners,
    pub sides: CardSides,
    pub quantity: u32,
}

impl Default for BusinessCardOrder {
    fn default() -> Self {
        Self {
            finish: CardFinish::default(),
            corners: CardCorners::default(),
            sides: CardSides::default(),
            quantity: PRICE_TABLE[0].quantity,
        }
    }
}

/// Prices business cards by table lookup.
#[derive(Debug, Clone, Copy, Default)]
pub struct TablePricing;

impl TablePricing {
    /// The row for `quantity`, if that quantity is offered.
    pub fn tier(quantity: u32) -> Option<&'static PriceTier> {
        PRICE_TABLE.iter().find(|t| t.quantity == quantity)
    }

    pub fn tiers() -> &'static [PriceTier] {
        &PRICE_TABLE
    }
}

impl PricingStrategy for TablePricing {
    type Order = BusinessCardOrder;

    fn name(&self) -> &'static str {
        "table"
    }

    fn validate(&self, order: &BusinessCardOrder) -> Result<(), ValidationErrors> {
        match Self::tier(order.quantity) {
            Some(_) => Ok(()),
            None => Err(ValidationError::QuantityNotOffered(order.quantity).into()),
        }
    }

    fn quote(&self, order: &BusinessCardOrder) -> Result<PriceQuote, PricingError> {
        let tier = Self::tier(order.quantity)
            .ok_or_else(|| ValidationErrors::from(ValidationError::QuantityNotOffered(order.quantity)))?;
        Ok(PriceQuote {
            per_unit: tier.per_card,
            total: tier.total,
            discounted: false,
        })
    }
}
