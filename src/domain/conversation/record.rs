//! The accumulating intake record.
//!
//! # Invariants
//!
//! - No gaps: a slot is only ever written while it is the pending slot, so a
//!   later field is never set while an earlier one is unset.
//! - Write-once: a set field never changes again.
//! - Completeness is monotonic.

use serde::{Deserialize, Serialize};

use super::schema::{Slot, SlotValue};
use crate::domain::foundation::{DomainError, ErrorCode};

/// Partially filled intake data.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeRecord {
    budget: Option<f64>,
    city: Option<String>,
    investment_type: Option<String>,
    target_audience: Option<String>,
}

/// A record with every slot filled. The only thing ever submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletedRecord {
    pub budget: f64,
    pub city: String,
    pub investment_type: String,
    pub target_audience: String,
}

impl IntakeRecord {
    /// Creates an empty record.
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    pub fn budget(&self) -> Option<f64> {
        self.budget
    }

    pub fn city(&self) -> Option<&str> {
        self.city.as_deref()
    }

    pub fn investment_type(&self) -> Option<&str> {
        self.investment_type.as_deref()
    }

    pub fn target_audience(&self) -> Option<&str> {
        self.target_audience.as_deref()
    }

    /// Returns true if the given slot holds a value.
    pub fn is_set(&self, slot: Slot) -> bool {
        match slot {
            Slot::Budget => self.budget.is_some(),
            Slot::City => self.city.is_some(),
            Slot::InvestmentType => self.investment_type.is_some(),
            Slot::TargetAudience => self.target_audience.is_some(),
        }
    }

    /// The first unset slot in collection order, or `None` once complete.
    pub fn pending_slot(&self) -> Option<Slot> {
        Slot::ORDER.into_iter().find(|slot| !self.is_set(*slot))
    }

    /// Returns true once all four slots are set.
    pub fn is_complete(&self) -> bool {
        self.pending_slot().is_none()
    }

    /// Number of slots filled so far.
    pub fn filled_count(&self) -> usize {
        Slot::ORDER.iter().filter(|slot| self.is_set(**slot)).count()
    }

    /// Snapshot of the record as a [`CompletedRecord`], if complete.
    pub fn completed(&self) -> Option<CompletedRecord> {
        Some(CompletedRecord {
            budget: self.budget?,
            city: self.city.clone()?,
            investment_type: self.investment_type.clone()?,
            target_audience: self.target_audience.clone()?,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutation
    // ─────────────────────────────────────────────────────────────────────────

    /// Writes a validated value into the pending slot.
    ///
    /// # Errors
    ///
    /// - `InvalidStateTransition` if `slot` is not the pending slot
    ///   (already set, or an earlier slot is still unset)
    /// - `InternalError` if the value kind does not match the slot
    pub(crate) fn fill(&mut self, slot: Slot, value: SlotValue) -> Result<(), DomainError> {
        if self.pending_slot() != Some(slot) {
            return Err(DomainError::new(
                ErrorCode::InvalidStateTransition,
                format!(
                    "Cannot fill {} while pending slot is {:?}",
                    slot.field_name(),
                    self.pending_slot()
                ),
            )
            .with_detail("field", slot.field_name()));
        }

        match (slot, value) {
            (Slot::Budget, SlotValue::Budget(amount)) => self.budget = Some(amount),
            (Slot::City, SlotValue::Text(text)) => self.city = Some(text),
            (Slot::InvestmentType, SlotValue::Text(text)) => self.investment_type = Some(text),
            (Slot::TargetAudience, SlotValue::Text(text)) => self.target_audience = Some(text),
            (slot, value) => {
                return Err(DomainError::new(
                    ErrorCode::InternalError,
                    format!("Value {:?} does not fit slot {}", value, slot.field_name()),
                ))
            }
        }

        Ok(())
    }
}
