//! Custom book orders and their formula pricing.
//!
//! ## Price formula
//!
//! ```text
//! base      = 3.00 (saddle) | 5.00 (perfect)
//!           + 0.50 if the cover is coated
//!           + 0.50 (matte) | 0.75 (gloss)
//! per_page  = 0.15 (full color) | 0.08 (black & white)
//! inside    = pages × per_page × paper_weight_multiplier × size_multiplier
//! per_book  = base + inside
//! total     = per_book × quantity          (× 0.95 above 100 copies)
//! ```
//!
//! When the discount applies, the per-book price is recomputed from the
//! discounted total so the unit price shown to the customer reflects it.
//! Both amounts are rounded to the cent last.
//!
//! ## Page-count ranges
//!
//! Saddle stitching folds and staples sheets, so it only holds 4-48 pages.
//! Perfect binding glues a spine and needs at least 32 pages, up to 800.
//! The ranges overlap, which is why switching binding type needs an explicit
//! [`PageCountPolicy`] rather than a silent fix-up.

use super::{Money, PriceQuote, PricingError, PricingStrategy, ValidationError, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;
use std::str::FromStr;

pub const QUANTITY_MIN: u32 = 5;
pub const QUANTITY_MAX: u32 = 500;
/// Orders strictly above this many copies get the volume discount.
pub const DISCOUNT_THRESHOLD: u32 = 100;
const DISCOUNT_FACTOR: f64 = 0.95;

// ============================================================================
// Option enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BindingType {
    Saddle,
    Perfect,
}

impl BindingType {
    pub const ALL: [BindingType; 2] = [BindingType::Saddle, BindingType::Perfect];

    pub fn as_str(self) -> &'static str {
        match self {
            BindingType::Saddle => "saddle",
            BindingType::Perfect => "perfect",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BindingType::Saddle => "Saddle Stitching",
            BindingType::Perfect => "Perfect Binding",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            BindingType::Saddle => {
                "Suitable for 4-48 pages. Best for magazines, catalogs, and thin books."
            }
            BindingType::Perfect => {
                "Suitable for 32-800 pages. Professional finish for books and manuals."
            }
        }
    }

    /// Inclusive page-count range this binding can hold.
    pub fn page_range(self) -> RangeInclusive<u32> {
        match self {
            BindingType::Saddle => 4..=48,
            BindingType::Perfect => 32..=800,
        }
    }

    fn base_price(self) -> f64 {
        match self {
            BindingType::Saddle => 3.0,
            BindingType::Perfect => 5.0,
        }
    }
}

impl fmt::Display for BindingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BindingType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BindingType::ALL
            .into_iter()
            .find(|b| b.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("binding_type", s))
    }
}

/// The six trim sizes offered for books.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TrimSize {
    #[serde(rename = "5.5 in x 8.5 in")]
    Digest,
    #[serde(rename = "6 in x 9 in")]
    Trade,
    #[serde(rename = "6.625 in x 10.25 in")]
    ModernComic,
    #[serde(rename = "8.5 in x 5.5 in")]
    DigestLandscape,
    #[serde(rename = "8.5 in x 11 in")]
    Letter,
    #[serde(rename = "9 in x 6 in")]
    TradeLandscape,
}

impl TrimSize {
    pub const ALL: [TrimSize; 6] = [
        TrimSize::Digest,
        TrimSize::Trade,
        TrimSize::ModernComic,
        TrimSize::DigestLandscape,
        TrimSize::Letter,
        TrimSize::TradeLandscape,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TrimSize::Digest => "5.5 in x 8.5 in",
            TrimSize::Trade => "6 in x 9 in",
            TrimSize::ModernComic => "6.625 in x 10.25 in",
            TrimSize::DigestLandscape => "8.5 in x 5.5 in",
            TrimSize::Letter => "8.5 in x 11 in",
            TrimSize::TradeLandscape => "9 in x 6 in",
        }
    }

    /// Menu label, with the format name for the non-obvious sizes.
    pub fn label(self) -> String {
        match self {
            TrimSize::ModernComic => format!("{} (Modern Comic)", self.as_str()),
            TrimSize::DigestLandscape | TrimSize::TradeLandscape => {
                format!("{} (Landscape)", self.as_str())
            }
            _ => self.as_str().to_string(),
        }
    }

    pub fn multiplier(self) -> f64 {
        match self {
            TrimSize::Digest => 1.0,
            TrimSize::Trade => 1.1,
            TrimSize::ModernComic => 1.2,
            TrimSize::DigestLandscape => 1.0,
            TrimSize::Letter => 1.3,
            TrimSize::TradeLandscape => 1.1,
        }
    }

    /// `"5.5 in x 8.5 in"` → `"5.5x8.5"`.
    fn compact(self) -> String {
        compact_size(self.as_str())
    }
}

fn compact_size(s: &str) -> String {
    s.to_ascii_lowercase()
        .replace("in", "")
        .chars()
        .filter(|c| !c.is_whitespace() && *c != '"')
        .collect()
}

impl fmt::Display for TrimSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TrimSize {
    type Err = ValidationError;

    /// Accepts the canonical label or the compact `WxH` spelling.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = compact_size(s);
        TrimSize::ALL
            .into_iter()
            .find(|size| size.compact() == wanted)
            .ok_or_else(|| unknown("size", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverMaterial {
    Coated,
    Uncoated,
}

impl CoverMaterial {
    pub const ALL: [CoverMaterial; 2] = [CoverMaterial::Coated, CoverMaterial::Uncoated];

    pub fn as_str(self) -> &'static str {
        match self {
            CoverMaterial::Coated => "coated",
            CoverMaterial::Uncoated => "uncoated",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoverMaterial::Coated => "Coated Papers",
            CoverMaterial::Uncoated => "Uncoated Papers",
        }
    }
}

impl FromStr for CoverMaterial {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverMaterial::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("cover_material", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoverFinish {
    Matte,
    Gloss,
}

impl CoverFinish {
    pub const ALL: [CoverFinish; 2] = [CoverFinish::Matte, CoverFinish::Gloss];

    pub fn as_str(self) -> &'static str {
        match self {
            CoverFinish::Matte => "matte",
            CoverFinish::Gloss => "gloss",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CoverFinish::Matte => "Matte",
            CoverFinish::Gloss => "Gloss",
        }
    }
}

impl FromStr for CoverFinish {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CoverFinish::ALL
            .into_iter()
            .find(|f| f.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("cover_finish", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InsideMaterial {
    FullColor,
    BlackWhite,
}

impl InsideMaterial {
    pub const ALL: [InsideMaterial; 2] = [InsideMaterial::FullColor, InsideMaterial::BlackWhite];

    pub fn as_str(self) -> &'static str {
        match self {
            InsideMaterial::FullColor => "full-color",
            InsideMaterial::BlackWhite => "black-white",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            InsideMaterial::FullColor => "Full Color",
            InsideMaterial::BlackWhite => "Black and White",
        }
    }

    fn per_page_cost(self) -> f64 {
        match self {
            InsideMaterial::FullColor => 0.15,
            InsideMaterial::BlackWhite => 0.08,
        }
    }
}

impl FromStr for InsideMaterial {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsideMaterial::ALL
            .into_iter()
            .find(|m| m.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown("inside_material", s))
    }
}

/// Paper stock codes, shared by the cover and the interior.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PaperWeight {
    #[serde(rename = "70lb-gloss")]
    Text70Gloss,
    #[serde(rename = "70lb-matte")]
    Text70Matte,
    #[serde(rename = "80lb-gloss")]
    Text80Gloss,
    #[serde(rename = "80lb-matte")]
    Text80Matte,
    #[serde(rename = "100lb-gloss")]
    Text100Gloss,
    #[serde(rename = "100lb-matte")]
    Text100Matte,
    #[serde(rename = "80lb-cover-gloss")]
    Cover80Gloss,
    #[serde(rename = "80lb-cover-matte")]
    Cover80Matte,
    #[serde(rename = "100lb-cover-gloss")]
    Cover100Gloss,
    #[serde(rename = "100lb-cover-matte")]
    Cover100Matte,
    #[serde(rename = "10pt-c2s")]
    Point10C2s,
    #[serde(rename = "12pt-c2s")]
    Point12C2s,
    #[serde(rename = "14pt-c1s")]
    Point14C1s,
    #[serde(rename = "14pt-c2s")]
    Point14C2s,
}

impl PaperWeight {
    pub const ALL: [PaperWeight; 14] = [
        PaperWeight::Text70Gloss,
        PaperWeight::Text70Matte,
        PaperWeight::Text80Gloss,
        PaperWeight::Text80Matte,
        PaperWeight::Text100Gloss,
        PaperWeight::Text100Matte,
        PaperWeight::Cover80Gloss,
        PaperWeight::Cover80Matte,
        PaperWeight::Cover100Gloss,
        PaperWeight::Cover100Matte,
        PaperWeight::Point10C2s,
        PaperWeight::Point12C2s,
        PaperWeight::Point14C1s,
        PaperWeight::Point14C2s,
    ];

    /// Stock code, e.g. `"80lb-cover-matte"`.
    pub fn as_str(self) -> &'static str {
        match self {
            PaperWeight::Text70Gloss => "70lb-gloss",
            PaperWeight::Text70Matte => "70lb-matte",
            PaperWeight::Text80Gloss => "80lb-gloss",
            PaperWeight::Text80Matte => "80lb-matte",
            PaperWeight::Text100Gloss => "100lb-gloss",
            PaperWeight::Text100Matte => "100lb-matte",
            PaperWeight::Cover80Gloss => "80lb-cover-gloss",
            PaperWeight::Cover80Matte => "80lb-cover-matte",
            PaperWeight::Cover100Gloss => "100lb-cover-gloss",
            PaperWeight::Cover100Matte => "100lb-cover-matte",
            PaperWeight::Point10C2s => "10pt-c2s",
            PaperWeight::Point12C2s => "12pt-c2s",
            PaperWeight::Point14C1s => "14pt-c1s",
            PaperWeight::Point14C2s => "14pt-c2s",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaperWeight::Text70Gloss => "70lb Text Gloss",
            PaperWeight::Text70Matte => "70lb Text Matte",
            PaperWeight::Text80Gloss => "80lb Text Gloss",
            PaperWeight::Text80Matte => "80lb Text Matte",
            PaperWeight::Text100Gloss => "100lb Text Gloss",
            PaperWeight::Text100Matte => "100lb Text Matte",
            PaperWeight::Cover80Gloss => "80lb Cover Gloss",
            PaperWeight::Cover80Matte => "80lb Cover Matte",
            PaperWeight::Cover100Gloss => "100lb Cover Gloss",
            PaperWeight::Cover100Matte => "100lb Cover Matte",
            PaperWeight::Point10C2s => "10pt C2S",
            PaperWeight::Point12C2s => "12pt C2S",
            PaperWeight::Point14C1s => "14pt C1S",
            PaperWeight::Point14C2s => "14pt C2S",
        }
    }

    /// Interior cost multiplier, keyed off the stock code.
    ///
    /// Each test overwrites the previous result; later matches win.
    pub fn interior_multiplier(self) -> f64 {
        let code = self.as_str();
        let mut multiplier = 1.0;
        if code.contains("80lb") {
            multiplier = 1.2;
        }
        if code.contains("100lb") {
            multiplier = 1.4;
        }
        if code.contains("pt") {
            multiplier = 1.6;
        }
        multiplier
    }

    fn parse_field(s: &str, field: &'static str) -> Result<Self, ValidationError> {
        PaperWeight::ALL
            .into_iter()
            .find(|w| w.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| unknown(field, s))
    }
}

impl fmt::Display for PaperWeight {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaperWeight {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PaperWeight::parse_field(s, "paper_weight")
    }
}

fn unknown(field: &'static str, value: &str) -> ValidationError {
    ValidationError::UnknownValue {
        field,
        value: value.to_string(),
    }
}

// ============================================================================
// Page-count normalization
// ============================================================================

/// What happens to the page count when the binding type changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PageCountPolicy {
    /// Keep the current count when the new binding allows it, otherwise move
    /// it to the nearest bound of the new range.
    #[default]
    #[serde(rename = "clamp")]
    ClampIntoRange,
    /// Always reset the count to the new binding's minimum.
    #[serde(rename = "snap-to-minimum")]
    SnapToMinimum,
}

impl PageCountPolicy {
    pub fn as_str(self) -> &'static str {
        match self {
            PageCountPolicy::ClampIntoRange => "clamp",
            PageCountPolicy::SnapToMinimum => "snap-to-minimum",
        }
    }

    /// Page count to use after switching to `binding`.
    pub fn apply(self, page_count: u32, binding: BindingType) -> u32 {
        let range = binding.page_range();
        match self {
            PageCountPolicy::ClampIntoRange => page_count.clamp(*range.start(), *range.end()),
            PageCountPolicy::SnapToMinimum => *range.start(),
        }
    }
}

// ============================================================================
// Order specification
// ============================================================================

/// A complete custom book order.
///
/// Plain value: edits go through the `with_*` methods, which return a new
/// specification and never mutate in place.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderSpecification {
    pub binding_type: BindingType,
    pub page_count: u32,
    pub size: TrimSize,
    pub quantity: u32,
    pub cover_material: CoverMaterial,
    pub cover_paper_weight: PaperWeight,
    pub cover_finish: CoverFinish,
    pub inside_material: InsideMaterial,
    pub inside_paper_weight: PaperWeight,
}

impl Default for OrderSpecification {
    fn default() -> Self {
        Self {
            binding_type: BindingType::Saddle,
            page_count: 4,
            size: TrimSize::Digest,
            quantity: QUANTITY_MIN,
            cover_material: CoverMaterial::Coated,
            cover_paper_weight: PaperWeight::Text70Gloss,
            cover_finish: CoverFinish::Matte,
            inside_material: InsideMaterial::BlackWhite,
            inside_paper_weight: PaperWeight::Text70Gloss,
        }
    }
}

impl OrderSpecification {
    /// Switch binding type, re-normalizing the page count with `policy`.
    pub fn with_binding(self, binding_type: BindingType, policy: PageCountPolicy) -> Self {
        Self {
            binding_type,
            page_count: policy.apply(self.page_count, binding_type),
            ..self
        }
    }

    /// Set the page count, clamped into the current binding's range.
    pub fn with_page_count(self, page_count: u32) -> Self {
        let range = self.binding_type.page_range();
        Self {
            page_count: page_count.clamp(*range.start(), *range.end()),
            ..self
        }
    }

    /// Set the quantity, clamped into the orderable range.
    pub fn with_quantity(self, quantity: u32) -> Self {
        Self {
            quantity: quantity.clamp(QUANTITY_MIN, QUANTITY_MAX),
            ..self
        }
    }

    pub fn with_size(self, size: TrimSize) -> Self {
        Self { size, ..self }
    }

    pub fn with_cover(
        self,
        cover_material: CoverMaterial,
        cover_paper_weight: PaperWeight,
        cover_finish: CoverFinish,
    ) -> Self {
        Self {
            cover_material,
            cover_paper_weight,
            cover_finish,
            ..self
        }
    }

    pub fn with_interior(self, inside_material: InsideMaterial, inside_paper_weight: PaperWeight) -> Self {
        Self {
            inside_material,
            inside_paper_weight,
            ..self
        }
    }

    /// Check the numeric fields; the enum fields are valid by construction.
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let range = self.binding_type.page_range();
        if !range.contains(&self.page_count) {
            errors.push(ValidationError::PageCount {
                value: self.page_count,
                min: *range.start(),
                max: *range.end(),
                binding: self.binding_type,
            });
        }
        if !(QUANTITY_MIN..=QUANTITY_MAX).contains(&self.quantity) {
            errors.push(ValidationError::QuantityRange {
                value: self.quantity,
                min: QUANTITY_MIN,
                max: QUANTITY_MAX,
            });
        }
        errors.into_result()
    }
}

/// A book order as submitted from a form or the command line: every choice
/// still a string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBookOrder {
    pub binding_type: String,
    pub page_count: u32,
    pub size: String,
    pub quantity: u32,
    pub cover_material: String,
    pub cover_paper_weight: String,
    pub cover_finish: String,
    pub inside_material: String,
    pub inside_paper_weight: String,
}

impl Default for RawBookOrder {
    fn default() -> Self {
        RawBookOrder::from(&OrderSpecification::default())
    }
}

impl From<&OrderSpecification> for RawBookOrder {
    fn from(spec: &OrderSpecification) -> Self {
        Self {
            binding_type: spec.binding_type.as_str().to_string(),
            page_count: spec.page_count,
            size: spec.size.as_str().to_string(),
            quantity: spec.quantity,
            cover_material: spec.cover_material.as_str().to_string(),
            cover_paper_weight: spec.cover_paper_weight.as_str().to_string(),
            cover_finish: spec.cover_finish.as_str().to_string(),
            inside_material: spec.inside_material.as_str().to_string(),
            inside_paper_weight: spec.inside_paper_weight.as_str().to_string(),
        }
    }
}

impl RawBookOrder {
    /// Parse every field and validate ranges, reporting all failures at once.
    pub fn parse(&self) -> Result<OrderSpecification, ValidationErrors> {
        let mut errors = ValidationErrors::new();
        let e = &mut errors;

        let binding_type = take(self.binding_type.parse::<BindingType>(), e);
        let size = take(self.size.parse::<TrimSize>(), e);
        let cover_material = take(self.cover_material.parse::<CoverMaterial>(), e);
        let cover_paper_weight = take(
            PaperWeight::parse_field(&self.cover_paper_weight, "cover_paper_weight"),
            e,
        );
        let cover_finish = take(self.cover_finish.parse::<CoverFinish>(), e);
        let inside_material = take(self.inside_material.parse::<InsideMaterial>(), e);
        let inside_paper_weight = take(
            PaperWeight::parse_field(&self.inside_paper_weight, "inside_paper_weight"),
            e,
        );

        let (
            Some(binding_type),
            Some(size),
            Some(cover_material),
            Some(cover_paper_weight),
            Some(cover_finish),
            Some(inside_material),
            Some(inside_paper_weight),
        ) = (
            binding_type,
            size,
            cover_material,
            cover_paper_weight,
            cover_finish,
            inside_material,
            inside_paper_weight,
        )
        else {
            return Err(errors);
        };

        let spec = OrderSpecification {
            binding_type,
            page_count: self.page_count,
            size,
            quantity: self.quantity,
            cover_material,
            cover_paper_weight,
            cover_finish,
            inside_material,
            inside_paper_weight,
        };
        spec.validate()?;
        Ok(spec)
    }
}

/// Keep the parsed value, or record why it failed.
fn take<T>(result: Result<T, ValidationError>, errors: &mut ValidationErrors) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            errors.push(e);
            None
        }
    }
}

// ============================================================================
// Formula pricing
// ============================================================================

/// Prices books with the published formula.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormulaPricing;

impl FormulaPricing {
    /// Apply the formula without validating. Callers go through
    /// [`PricingStrategy::quote`].
    fn price(spec: &OrderSpecification) -> PriceQuote {
        let mut base_price = spec.binding_type.base_price();
        base_price += match spec.cover_material {
            CoverMaterial::Coated => 0.5,
            CoverMaterial::Uncoated => 0.0,
        };
        base_price += match spec.cover_finish {
            CoverFinish::Matte => 0.5,
            CoverFinish::Gloss => 0.75,
        };

        let inside_pages_cost = spec.page_count as f64
            * spec.inside_material.per_page_cost()
            * spec.inside_paper_weight.interior_multiplier()
            * spec.size.multiplier();

        let quantity = spec.quantity as f64;
        let mut per_book = base_price + inside_pages_cost;
        let mut total = per_book * quantity;

        let discounted = spec.quantity > DISCOUNT_THRESHOLD;
        if discounted {
            total *= DISCOUNT_FACTOR;
            per_book = total / quantity;
        }

        PriceQuote {
            per_unit: Money::from_dollars(per_book),
            total: Money::from_dollars(total),
            discounted,
        }
    }
}

impl PricingStrategy for FormulaPricing {
    type Order = OrderSpecification;

    fn name(&self) -> &'static str {
        "formula"
    }

    fn validate(&self, order: &OrderSpecification) -> Result<(), ValidationErrors> {
        order.validate()
    }

    fn quote(&self, order: &OrderSpecification) -> Result<PriceQuote, PricingError> {
        self.validate(order)?;
        Ok(Self::price(order))
    }
}
