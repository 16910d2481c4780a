//! Shared data models spanning the engine layers.

pub mod indicators;
pub mod signal;

pub use indicators::{Candle, IndicatorSnapshot, SnapshotField};
pub use signal::{Bias, Reason, Strength};
