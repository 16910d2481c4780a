//! Rule catalog, reasoning engine and confluence summary.

pub mod aggregation;
pub mod catalog;
pub mod engine;
pub mod error;
pub mod rules;
pub mod template;

pub use aggregation::*;
pub use catalog::{rule_ids, RuleCatalog};
pub use engine::{evaluate, ReasoningEngine};
pub use error::*;
pub use rules::Rule;
pub use template::MessageTemplate;
