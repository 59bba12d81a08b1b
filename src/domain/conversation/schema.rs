//! Field schema for the intake form.
//!
//! The four slots are collected strictly in the order of [`Slot::ORDER`].
//! Each slot owns its validation rule, its normalization, the error message
//! shown when input is rejected and the prompt shown once it is filled.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// Opening assistant turn seeded into every new conversation.
pub const GREETING: &str = "Hello, welcome to the LocalAItycs assistant! Let's find the best \
location for your business. To do that, we need a few details.";

/// Prompt for the first slot, seeded right after the greeting.
pub const FIRST_PROMPT: &str = "To start, what is your budget?";

/// Reply to any input received after the record is complete.
pub const CLOSING_MESSAGE: &str = "Your information has been registered. We will soon present \
the best options for your business.";

/// Digits with an optional fractional part. ASCII only; no sign, currency
/// symbol or thousands separator.
static BUDGET_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("budget pattern is valid"));

/// One of the four ordered fields the intake collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Slot {
    Budget,
    City,
    InvestmentType,
    TargetAudience,
}

/// A validated, normalized slot value.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotValue {
    Budget(f64),
    Text(String),
}

impl Slot {
    /// Collection order. The pending slot is always the first unset one.
    pub const ORDER: [Slot; 4] = [
        Slot::Budget,
        Slot::City,
        Slot::InvestmentType,
        Slot::TargetAudience,
    ];

    /// Wire name of the field, as submitted.
    pub fn field_name(&self) -> &'static str {
        match self {
            Self::Budget => "budget",
            Self::City => "city",
            Self::InvestmentType => "investmentType",
            Self::TargetAudience => "targetAudience",
        }
    }

    /// Position of the slot in [`Slot::ORDER`].
    pub fn index(&self) -> usize {
        match self {
            Self::Budget => 0,
            Self::City => 1,
            Self::InvestmentType => 2,
            Self::TargetAudience => 3,
        }
    }

    /// The slot collected after this one, if any.
    pub fn next(&self) -> Option<Slot> {
        Self::ORDER.get(self.index() + 1).copied()
    }

    /// Prompt shown after this slot is successfully filled.
    pub fn success_prompt(&self) -> &'static str {
        match self {
            Self::Budget => "Which city will the business be located in?",
            Self::City => {
                "What type of investment? (e.g. ice-cream shop, language school, snack bar)"
            }
            Self::InvestmentType => {
                "Who is the target audience? (e.g. college students, families, professionals)"
            }
            Self::TargetAudience => "We are processing your information...",
        }
    }

    /// Re-prompt shown when input for this slot is rejected.
    pub fn error_message(&self) -> &'static str {
        match self {
            Self::Budget => "Please enter a valid numeric value for the budget.",
            Self::City => "Please enter the city where the business will be located.",
            Self::InvestmentType => "Please enter the type of investment.",
            Self::TargetAudience => "Please enter the target audience for the business.",
        }
    }

    /// Validates and normalizes raw user text for this slot.
    ///
    /// The same check decides acceptance and produces the value, so a
    /// budget is never accepted by one rule and parsed by a looser one.
    ///
    /// # Errors
    ///
    /// - `EmptyField` for blank input
    /// - `InvalidFormat` for a budget that is not a plain decimal number
    /// - `NotPositive` for a zero budget
    pub fn parse(&self, raw: &str) -> Result<SlotValue, ValidationError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::empty_field(self.field_name()));
        }

        match self {
            Self::Budget => parse_budget(trimmed).map(SlotValue::Budget),
            Self::City | Self::InvestmentType | Self::TargetAudience => {
                Ok(SlotValue::Text(trimmed.to_string()))
            }
        }
    }
}

fn parse_budget(trimmed: &str) -> Result<f64, ValidationError> {
    let field = Slot::Budget.field_name();

    if !BUDGET_PATTERN.is_match(trimmed) {
        return Err(ValidationError::invalid_format(
            field,
            "expected a positive decimal number",
        ));
    }

    let value: f64 = trimmed
        .parse()
        .map_err(|_| ValidationError::invalid_format(field, "number could not be parsed"))?;

    if !value.is_finite() {
        return Err(ValidationError::invalid_format(field, "number is too large"));
    }
    if value <= 0.0 {
        return Err(ValidationError::not_positive(field, value));
    }

    Ok(value)
}
