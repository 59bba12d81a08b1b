//! LocalAItycs - Business Location Intake Assistant
//!
//! A scripted conversation collects four facts about a prospective
//! business (budget, city, investment type, target audience) one turn at a
//! time. Once all four are held, the completed record is handed to a
//! remote collaborator and the conversation closes.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
pub mod telemetry;
