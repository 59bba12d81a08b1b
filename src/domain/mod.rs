//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared domain primitives (IDs, timestamps, state machine trait, errors)
//! - `conversation` - Intake schema, state machine, transcript and session aggregate

pub mod conversation;
pub mod foundation;
