use serde::{Deserialize, Serialize};

use crate::error::{ChartError, ChartResult};

/// Extrema indices produced by an external fitting step.
///
/// Both index sets address the fitted arrays, never the raw samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtremaResult {
    pub local_maxima: Vec<usize>,
    pub local_minima: Vec<usize>,
}

impl ExtremaResult {
    #[must_use]
    pub fn new(local_maxima: Vec<usize>, local_minima: Vec<usize>) -> Self {
        Self {
            local_maxima,
            local_minima,
        }
    }
}

/// Borrowed arrays for one overlay render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OverlayInput<'a> {
    pub x_raw: &'a [f64],
    pub y_raw: &'a [f64],
    pub x_fit: &'a [f64],
    pub y_fit: &'a [f64],
    pub min_idx: &'a [usize],
    pub max_idx: &'a [usize],
}

impl<'a> OverlayInput<'a> {
    #[must_use]
    pub fn new(
        x_raw: &'a [f64],
        y_raw: &'a [f64],
        x_fit: &'a [f64],
        y_fit: &'a [f64],
        min_idx: &'a [usize],
        max_idx: &'a [usize],
    ) -> Self {
        Self {
            x_raw,
            y_raw,
            x_fit,
            y_fit,
            min_idx,
            max_idx,
        }
    }

    #[must_use]
    pub fn with_extrema(
        x_raw: &'a [f64],
        y_raw: &'a [f64],
        x_fit: &'a [f64],
        y_fit: &'a [f64],
        extrema: &'a ExtremaResult,
    ) -> Self {
        Self::new(
            x_raw,
            y_raw,
            x_fit,
            y_fit,
            &extrema.local_minima,
            &extrema.local_maxima,
        )
    }

    /// Fails fast on mismatched arrays or out-of-range indices.
    pub fn validate(&self) -> ChartResult<()> {
        ensure_same_len("raw samples (x_raw vs y_raw)", self.x_raw, self.y_raw)?;
        ensure_same_len("fitted curve (x_fit vs y_fit)", self.x_fit, self.y_fit)?;

        let len = self.y_fit.len();
        ensure_indices_in_range("max_idx", self.max_idx, len)?;
        ensure_indices_in_range("min_idx", self.min_idx, len)
    }
}

fn ensure_same_len(context: &str, xs: &[f64], ys: &[f64]) -> ChartResult<()> {
    if xs.len() != ys.len() {
        return Err(ChartError::ShapeMismatch {
            context: context.to_owned(),
            expected: xs.len(),
            actual: ys.len(),
        });
    }
    Ok(())
}

fn ensure_indices_in_range(array: &'static str, indices: &[usize], len: usize) -> ChartResult<()> {
    match indices.iter().position(|&index| index >= len) {
        Some(position) => Err(ChartError::IndexOutOfRange {
            array,
            position,
            index: indices[position],
            len,
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_out_of_range_index_is_reported_with_its_position() {
        let fit = [0.0; 6];
        let input = OverlayInput::new(&[], &[], &fit, &fit, &[1, 9, 12], &[2]);
        match input.validate().expect_err("out of range") {
            ChartError::IndexOutOfRange {
                array,
                position,
                index,
                len,
            } => {
                assert_eq!(array, "min_idx");
                assert_eq!(position, 1);
                assert_eq!(index, 9);
                assert_eq!(len, 6);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn raw_length_mismatch_is_a_shape_error() {
        let input = OverlayInput::new(&[1.0, 2.0], &[1.0], &[], &[], &[], &[]);
        assert!(matches!(
            input.validate(),
            Err(ChartError::ShapeMismatch {
                expected: 2,
                actual: 1,
                ..
            })
        ));
    }
}
