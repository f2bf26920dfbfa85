pub mod category;
pub mod components;
pub mod config;
pub mod criteria;
pub mod grader;
pub mod inputs;
pub mod presenter;
pub mod result;
pub mod validation;

pub use category::StenosisCategory;
pub use config::{Config, CriteriaConfig, OutputFormat};
pub use grader::{classify, StenosisGrader};
pub use inputs::{Inputs, VisualFinding};
pub use result::StenosisResult;
pub use validation::{validate_inputs, InputIssue};
