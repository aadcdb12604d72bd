use crate::estimator::compute_per_frame_values;
use crate::Errors;
use anyhow::Result;

/// Precision plot: the fraction of frames whose center distance is below an integer threshold
///
#[derive(Debug, Clone, PartialEq)]
pub struct PrecisionPlotResult {
    /// `0..=max_threshold`
    pub thresholds: Vec<usize>,
    pub precisions: Vec<f64>,
    /// precision at `score_threshold`
    pub precision_score: f64,
    pub max_threshold: usize,
    pub score_threshold: usize,
    /// frame-averaged center distances the plot is built from
    pub per_frame_distances: Vec<f64>,
}

impl PrecisionPlotResult {
    /// Builds the plot from already aggregated per-frame center distances
    ///
    /// # Parameters
    /// * `per_frame_distances` - center distances, one per frame
    /// * `max_threshold` - the highest distance threshold of the plot
    /// * `score_threshold` - the threshold reported as `precision_score`, must not exceed `max_threshold`
    ///
    pub fn from_per_frame(
        per_frame_distances: Vec<f64>,
        max_threshold: usize,
        score_threshold: usize,
    ) -> Result<Self> {
        if score_threshold > max_threshold {
            return Err(Errors::ScoreThresholdOutOfRange {
                score_threshold,
                max_threshold,
            }
            .into());
        }

        let total = per_frame_distances.len();
        let thresholds = (0..=max_threshold).collect::<Vec<_>>();
        let precisions = thresholds
            .iter()
            .map(|t| {
                let t = *t as f64;
                let below = per_frame_distances.iter().filter(|d| **d < t).count();
                if total == 0 {
                    0.0
                } else {
                    below as f64 / total as f64
                }
            })
            .collect::<Vec<_>>();
        let precision_score = precisions[score_threshold];

        Ok(Self {
            thresholds,
            precisions,
            precision_score,
            max_threshold,
            score_threshold,
            per_frame_distances,
        })
    }
}

/// Estimates the precision plot over center distance sequences
///
/// # Parameters
/// * `center_distances_list` - parallel-indexed distance sequences (one per repetition), NaN where no estimate exists
/// * `max_threshold` - the highest distance threshold, [`DEFAULT_PRECISION_MAX_THRESHOLD`](crate::estimator::DEFAULT_PRECISION_MAX_THRESHOLD) by convention
/// * `score_threshold` - the reported threshold, [`DEFAULT_PRECISION_SCORE_THRESHOLD`](crate::estimator::DEFAULT_PRECISION_SCORE_THRESHOLD) by convention
///
pub fn estimate_precision_plot<T>(
    center_distances_list: &[T],
    max_threshold: usize,
    score_threshold: usize,
) -> Result<PrecisionPlotResult>
where
    T: AsRef<[f64]>,
{
    PrecisionPlotResult::from_per_frame(
        compute_per_frame_values(center_distances_list)?,
        max_threshold,
        score_threshold,
    )
}
