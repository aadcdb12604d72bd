use crate::utils::stats::nan_mean;
use crate::Errors;
use anyhow::Result;

/// OTB success plot and its area under curve
pub mod success_plot;

/// OTB precision plot over center distances
pub mod precision_plot;

/// VOT accuracy, robustness and their joint AR summary
pub mod ar_plot;

pub use ar_plot::{estimate_accuracy, estimate_ar_plot, estimate_robustness};
pub use precision_plot::estimate_precision_plot;
pub use success_plot::estimate_success_plot;

/// Default sensitivity of the reliability penalty
pub const DEFAULT_SENSITIVITY: f64 = 100.0;

/// Default highest center distance threshold of the precision plot
pub const DEFAULT_PRECISION_MAX_THRESHOLD: usize = 50;

/// Center distance at which the precision score is reported
pub const DEFAULT_PRECISION_SCORE_THRESHOLD: usize = 20;

/// Checks that the sequences exist and share the same frame range
///
pub fn validate_sequences<T>(sequences: &[T]) -> Result<usize>
where
    T: AsRef<[f64]>,
{
    let expected = sequences
        .first()
        .ok_or(Errors::EmptySequenceList)?
        .as_ref()
        .len();

    for (index, s) in sequences.iter().enumerate() {
        let found = s.as_ref().len();
        if found != expected {
            return Err(Errors::MismatchedSequenceLength {
                index,
                expected,
                found,
            }
            .into());
        }
    }
    Ok(expected)
}

/// Averages parallel-indexed sequences frame by frame
///
/// NaN values (frames without a geometric estimate) are excluded from the average, frames where
/// every sequence is NaN are dropped from the result.
///
/// # Parameters
/// * `sequences` - one sequence per repetition or video, all of the same length
///
pub fn compute_per_frame_values<T>(sequences: &[T]) -> Result<Vec<f64>>
where
    T: AsRef<[f64]>,
{
    let len = validate_sequences(sequences)?;
    Ok((0..len)
        .filter_map(|frame| nan_mean(sequences.iter().map(|s| &s.as_ref()[frame])))
        .collect())
}
