//! Core application primitives (analysis pipeline, reporting)

pub mod analyzer;
pub mod report;

pub use analyzer::*;
pub use report::render_text;
