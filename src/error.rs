use thiserror::Error;

pub type ChartResult<T> = Result<T, ChartError>;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("invalid viewport size: width={width}, height={height}")]
    InvalidViewport { width: u32, height: u32 },

    #[error("invalid data: {0}")]
    InvalidData(String),

    /// A candle violates `low <= min(open, close) <= max(open, close) <= high`.
    #[error("data integrity violation at time={time}: {reason}")]
    DataIntegrity { time: f64, reason: String },

    /// Two parallel arrays that must align have different lengths.
    #[error("shape mismatch in {context}: expected length {expected}, got {actual}")]
    ShapeMismatch {
        context: String,
        expected: usize,
        actual: usize,
    },

    #[error("`{array}[{position}]` = {index} is out of range for length {len}")]
    IndexOutOfRange {
        array: &'static str,
        position: usize,
        index: usize,
        len: usize,
    },
}
