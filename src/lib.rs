//! Confluence: technical-indicator reasoning.
//!
//! Candles are turned into [`models::IndicatorSnapshot`]s, a
//! [`signals::RuleCatalog`] of fixed-threshold rules is evaluated against the
//! latest snapshot (and the one before it, for crossovers) and the triggered
//! rules come back as ordered, human-readable explanations.

pub mod common;
pub mod config;
pub mod core;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod services;
pub mod signals;
