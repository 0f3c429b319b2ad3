//! Pricing engine.
//!
//! Two product lines are priced in fundamentally different ways:
//!
//! - **Books** are priced by formula ([`FormulaPricing`]): a base price from
//!   binding and cover choices plus a per-page cost scaled by paper weight and
//!   trim size, with a volume discount above 100 copies.
//! - **Business cards** are priced by lookup ([`TablePricing`]): the shop
//!   publishes a fixed price for each offered quantity and nothing is derived.
//!
//! Both implement [`PricingStrategy`]. They share the error and quote types
//! but not the math; [`ProductLine`] names which one a product uses and
//! [`Order`] dispatches a concrete order to it.
//!
//! Every strategy is a pure function of its input: validation first, then a
//! deterministic quote. Nothing here performs I/O or holds state.

pub mod book;
pub mod cards;
mod money;

pub use book::{
    BindingType, CoverFinish, CoverMaterial, FormulaPricing, InsideMaterial, OrderSpecification,
    PageCountPolicy, PaperWeight, RawBookOrder, TrimSize,
};
pub use cards::{BusinessCardOrder, CardCorners, CardFinish, CardSides, PriceTier, TablePricing};
pub use money::Money;

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// A single rejected field.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("page_count: {value} pages is outside {min}-{max} for {binding} binding")]
    PageCount {
        value: u32,
        min: u32,
        max: u32,
        binding: BindingType,
    },
    #[error("quantity: {value} is outside {min}-{max}")]
    QuantityRange { value: u32, min: u32, max: u32 },
    #[error("quantity: {0} is not an offered quantity")]
    QuantityNotOffered(u32),
    #[error("{field}: unknown value '{value}'")]
    UnknownValue { field: &'static str, value: String },
}

impl ValidationError {
    /// Name of the offending field, as used in forms and on the CLI.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::PageCount { .. } => "page_count",
            ValidationError::QuantityRange { .. } | ValidationError::QuantityNotOffered(_) => {
                "quantity"
            }
            ValidationError::UnknownValue { field, .. } => field,
        }
    }
}

/// Every field that failed validation for one order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, error: ValidationError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.0.iter()
    }

    /// Whether any error names `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field() == field)
    }

    /// `Ok(())` when empty, otherwise `Err(self)`.
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl From<ValidationError> for ValidationErrors {
    fn from(error: ValidationError) -> Self {
        Self(vec![error])
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "{}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[derive(Error, Debug)]
pub enum PricingError {
    #[error("invalid order: {0}")]
    Invalid(#[from] ValidationErrors),
}

/// Price for one order, both amounts rounded to the cent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PriceQuote {
    pub per_unit: Money,
    pub total: Money,
    /// True when a volume discount was applied to the total.
    pub discounted: bool,
}

/// A way of turning a validated order into a price.
pub trait PricingStrategy {
    type Order;

    /// Short identifier used in CLI output.
    fn name(&self) -> &'static str;

    /// Check every field, collecting all failures.
    fn validate(&self, order: &Self::Order) -> Result<(), ValidationErrors>;

    /// Validate, then price. Never partially prices an invalid order.
    fn quote(&self, order: &Self::Order) -> Result<PriceQuote, PricingError>;
}

/// Product lines sold with an online quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductLine {
    Books,
    BusinessCards,
}

impl ProductLine {
    pub fn display_name(self) -> &'static str {
        match self {
            ProductLine::Books => "Custom Books",
            ProductLine::BusinessCards => "Business Cards",
        }
    }

    /// Name of the strategy this line is priced with.
    pub fn strategy_name(self) -> &'static str {
        match self {
            ProductLine::Books => FormulaPricing.name(),
            ProductLine::BusinessCards => TablePricing.name(),
        }
    }
}

/// An order for any product line.
#[derive(Debug, Clone, PartialEq)]
pub enum Order {
    Book(OrderSpecification),
    BusinessCards(BusinessCardOrder),
}

impl Order {
    pub fn product_line(&self) -> ProductLine {
        match self {
            Order::Book(_) => ProductLine::Books,
            Order::BusinessCards(_) => ProductLine::BusinessCards,
        }
    }

    /// Quote through the strategy that prices this order's product line.
    pub fn quote(&self) -> Result<PriceQuote, PricingError> {
        match self {
            Order::Book(spec) => FormulaPricing.quote(spec),
            Order::BusinessCards(order) => TablePricing.quote(order),
        }
    }
}
