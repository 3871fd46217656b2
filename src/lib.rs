//! Apartment Accountant Bot
//!
//! A guided-intake bot for apartment-rental partnership investments:
//! - Walks one participant per session through a fixed question sequence
//! - Validates every answer, re-prompting without losing prior input
//! - Supports a per-room sub-loop (beds + double beds) and a hall
//! - Deterministically computes a five-partner profit distribution
//! - Renders bilingual (English / Egyptian Arabic) prompts and reports
//!
//! FLOW:
//! LANGUAGE → LOCATION → [ROOMS + HALL] → PRICE/RENT → MANAGER → REPORT

pub mod api;
pub mod error;
pub mod finance;
pub mod intake;
pub mod models;
pub mod presenter;
pub mod router;
pub mod session;
pub mod validators;

pub use error::Result;

// Re-export common types
pub use intake::{CapacityMode, IntakeStage, IntakeStateMachine, StepOutcome};
pub use models::*;
pub use validators::ValidationError;
