//! Intake state machine.
//!
//! Each state names the slot the next input is validated against. The state
//! is always derived from the record, so it cannot drift from the data.

use serde::{Deserialize, Serialize};

use super::record::IntakeRecord;
use super::schema::Slot;
use crate::domain::foundation::StateMachine;

/// Where the intake conversation currently stands.
///
/// Valid input moves one step forward:
/// `AwaitingBudget` → `AwaitingCity` → `AwaitingInvestmentType` →
/// `AwaitingTargetAudience` → `Complete`. Invalid input is a self-loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IntakeState {
    #[default]
    AwaitingBudget,
    AwaitingCity,
    AwaitingInvestmentType,
    AwaitingTargetAudience,
    /// Terminal and absorbing.
    Complete,
}

impl IntakeState {
    /// State that waits for the given slot.
    pub fn awaiting(slot: Slot) -> Self {
        match slot {
            Slot::Budget => Self::AwaitingBudget,
            Slot::City => Self::AwaitingCity,
            Slot::InvestmentType => Self::AwaitingInvestmentType,
            Slot::TargetAudience => Self::AwaitingTargetAudience,
        }
    }

    /// State implied by a record's filled slots.
    pub fn of(record: &IntakeRecord) -> Self {
        record
            .pending_slot()
            .map(Self::awaiting)
            .unwrap_or(Self::Complete)
    }

    /// Slot validated against in this state; `None` once complete.
    pub fn pending_slot(&self) -> Option<Slot> {
        match self {
            Self::AwaitingBudget => Some(Slot::Budget),
            Self::AwaitingCity => Some(Slot::City),
            Self::AwaitingInvestmentType => Some(Slot::InvestmentType),
            Self::AwaitingTargetAudience => Some(Slot::TargetAudience),
            Self::Complete => None,
        }
    }

    /// State reached when the pending slot is filled.
    pub fn on_valid_input(&self) -> Self {
        match self.pending_slot().and_then(|slot| slot.next()) {
            Some(next) => Self::awaiting(next),
            None => Self::Complete,
        }
    }

    /// Returns true while there is still a slot to fill.
    pub fn accepts_answers(&self) -> bool {
        !matches!(self, Self::Complete)
    }
}

impl StateMachine for IntakeState {
    fn can_transition_to(&self, target: &Self) -> bool {
        use IntakeState::*;
        matches!(
            (self, target),
            (AwaitingBudget, AwaitingCity)
                | (AwaitingCity, AwaitingInvestmentType)
                | (AwaitingInvestmentType, AwaitingTargetAudience)
                | (AwaitingTargetAudience, Complete)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use IntakeState::*;
        match self {
            AwaitingBudget => vec![AwaitingCity],
            AwaitingCity => vec![AwaitingInvestmentType],
            AwaitingInvestmentType => vec![AwaitingTargetAudience],
            AwaitingTargetAudience => vec![Complete],
            Complete => vec![],
        }
    }
}
