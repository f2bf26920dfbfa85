//! Grading components
//!
//! Visual precedence runs first and settles every case it can; the velocity
//! decision engine only sees plaque-visible cases.

pub mod decision_engine;
pub mod visual_precedence;


pub use decision_engine::VelocityDecisionEngine;
pub use visual_precedence::{VisualDecision, VisualPrecedenceEngine};
