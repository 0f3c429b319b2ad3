//! The multi-step book calculator.
//!
//! Customers build a book order one step at a time:
//!
//! ```text
//! 1 Binding → 2 Pages → 3 Size → 4 Cover → 5 Interior → 6 Quantity → 7 Quote
//! ```
//!
//! A step is left by submitting it, which validates the order built so far.
//! Steps already reached can be revisited freely; steps beyond the furthest
//! one reached cannot be skipped to.
//!
//! [`CalculatorSession`] is a value: every edit or navigation returns a new
//! session and leaves the old one untouched, so a form layer can keep
//! history, diff states, or discard an edit without cloning by hand.

use crate::pricing::{
    BindingType, CoverFinish, CoverMaterial, FormulaPricing, InsideMaterial, OrderSpecification,
    PageCountPolicy, PaperWeight, PriceQuote, PricingError, PricingStrategy, TrimSize,
    ValidationErrors,
};
use thiserror::Error;

/// One step of the calculator, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Step {
    Binding = 1,
    Pages = 2,
    Size = 3,
    Cover = 4,
    Interior = 5,
    Quantity = 6,
    Quote = 7,
}

impl Step {
    pub const ALL: [Step; 7] = [
        Step::Binding,
        Step::Pages,
        Step::Size,
        Step::Cover,
        Step::Interior,
        Step::Quantity,
        Step::Quote,
    ];

    /// 1-based position.
    pub fn number(self) -> u8 {
        self as u8
    }

    pub fn from_number(n: u8) -> Option<Step> {
        Step::ALL.into_iter().find(|s| s.number() == n)
    }

    pub fn name(self) -> &'static str {
        match self {
            Step::Binding => "Binding",
            Step::Pages => "Pages",
            Step::Size => "Size",
            Step::Cover => "Cover",
            Step::Interior => "Interior",
            Step::Quantity => "Quantity",
            Step::Quote => "Quote",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Step::Binding => {
                "Choose your book's binding method. This affects the minimum and maximum page count."
            }
            Step::Pages => "Set the number of pages for your book.",
            Step::Size => "Select the physical dimensions of your book. This affects the final cost.",
            Step::Cover => "Choose your cover options including material, weight, and finish.",
            Step::Interior => "Select options for the inside pages including color and paper weight.",
            Step::Quantity => {
                "Choose how many books to print (minimum 5). Orders over 100 receive a 5% discount."
            }
            Step::Quote => "Review your final quote and book specifications.",
        }
    }

    fn next(self) -> Step {
        Step::from_number(self.number() + 1).unwrap_or(Step::Quote)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    #[error("step {requested} has not been reached yet (furthest is {furthest})")]
    NotReached { requested: u8, furthest: u8 },
}

/// State of one customer's pass through the calculator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculatorSession {
    spec: OrderSpecification,
    current: Step,
    furthest: Step,
    policy: PageCountPolicy,
}

impl Default for CalculatorSession {
    fn default() -> Self {
        Self::new(PageCountPolicy::default())
    }
}

impl CalculatorSession {
    /// Start at the first step with the default order.
    pub fn new(policy: PageCountPolicy) -> Self {
        Self {
            spec: OrderSpecification::default(),
            current: Step::Binding,
            furthest: Step::Binding,
            policy,
        }
    }

    pub fn spec(&self) -> &OrderSpecification {
        &self.spec
    }

    pub fn current_step(&self) -> Step {
        self.current
    }

    /// Furthest step reached so far.
    pub fn max_visited_step(&self) -> Step {
        self.furthest
    }

    pub fn policy(&self) -> PageCountPolicy {
        self.policy
    }

    /// Page range the pages step currently allows.
    pub fn page_limits(&self) -> (u32, u32) {
        let range = self.spec.binding_type.page_range();
        (*range.start(), *range.end())
    }

    /// Validate the order and move to the next step.
    ///
    /// On the final step a successful submit leaves the session where it is.
    pub fn submit(self) -> Result<Self, ValidationErrors> {
        FormulaPricing.validate(&self.spec)?;
        let next = self.current.next();
        Ok(Self {
            current: next,
            furthest: self.furthest.max(next),
            ..self
        })
    }

    /// Jump back (or forward) to a step that has already been reached.
    pub fn go_to(self, step: Step) -> Result<Self, NavigationError> {
        if step > self.furthest {
            return Err(NavigationError::NotReached {
                requested: step.number(),
                furthest: self.furthest.number(),
            });
        }
        Ok(Self {
            current: step,
            ..self
        })
    }

    /// Price the order as it stands.
    pub fn quote(&self) -> Result<PriceQuote, PricingError> {
        FormulaPricing.quote(&self.spec)
    }

    pub fn set_binding(self, binding: BindingType) -> Self {
        self.with_spec(self.spec.with_binding(binding, self.policy))
    }

    pub fn set_page_count(self, pages: u32) -> Self {
        self.with_spec(self.spec.with_page_count(pages))
    }

    pub fn set_size(self, size: TrimSize) -> Self {
        self.with_spec(self.spec.with_size(size))
    }

    pub fn set_cover(self, material: CoverMaterial, weight: PaperWeight, finish: CoverFinish) -> Self {
        self.with_spec(self.spec.with_cover(material, weight, finish))
    }

    pub fn set_interior(self, material: InsideMaterial, weight: PaperWeight) -> Self {
        self.with_spec(self.spec.with_interior(material, weight))
    }

    pub fn set_quantity(self, quantity: u32) -> Self {
        self.with_spec(self.spec.with_quantity(quantity))
    }

    fn with_spec(self, spec: OrderSpecification) -> Self {
        Self { spec, ..self }
    }
}
