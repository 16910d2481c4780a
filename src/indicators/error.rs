use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum IndicatorError {
    #[error("not enough candles: need at least {required}, got {actual}")]
    NotEnoughCandles { required: usize, actual: usize },

    #[error("invalid period for {indicator}: {period}")]
    InvalidPeriod { indicator: &'static str, period: usize },
}
