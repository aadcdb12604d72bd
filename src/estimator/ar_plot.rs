use crate::estimator::compute_per_frame_values;
use crate::region::{Region, SpecialCode};
use crate::utils::stats::mean;
use crate::Errors;
use anyhow::Result;

/// Accuracy: the mean of the frame-averaged overlap ratios
///
#[derive(Debug, Clone, PartialEq)]
pub struct AccuracyResult {
    pub accuracy: f64,
    pub per_frame_ratios: Vec<f64>,
}

impl AccuracyResult {
    /// Builds the accuracy from already aggregated per-frame ratios, 0 when there are none
    ///
    pub fn from_per_frame(per_frame_ratios: Vec<f64>) -> Self {
        Self {
            accuracy: mean(&per_frame_ratios).unwrap_or(0.0),
            per_frame_ratios,
        }
    }
}

/// Robustness: how often the tracker fails, turned into a reliability score
///
#[derive(Debug, Clone, PartialEq)]
pub struct RobustnessResult {
    /// `exp(-sensitivity * avg_failure_rate)`
    pub reliability: f64,
    pub avg_failure_rate: f64,
    pub sensitivity: f64,
    /// failures per frame, one entry per sequence
    pub failure_rates: Vec<f64>,
}

impl RobustnessResult {
    /// Builds the robustness from per-sequence failure rates
    ///
    pub fn from_failure_rates(failure_rates: Vec<f64>, sensitivity: f64) -> Result<Self> {
        if !sensitivity.is_finite() || sensitivity < 0.0 {
            return Err(Errors::InvalidConfiguration(format!(
                "sensitivity must be a non-negative number, got {}",
                sensitivity
            ))
            .into());
        }
        let avg_failure_rate = mean(&failure_rates).ok_or(Errors::EmptySequenceList)?;
        Ok(Self {
            reliability: (-sensitivity * avg_failure_rate).exp(),
            avg_failure_rate,
            sensitivity,
            failure_rates,
        })
    }
}

/// Accuracy and robustness of one tracker, the data of a single point on the AR plot
///
#[derive(Debug, Clone, PartialEq)]
pub struct ArPlotResult {
    pub accuracy: AccuracyResult,
    pub robustness: RobustnessResult,
}

impl ArPlotResult {
    pub fn accuracy(&self) -> f64 {
        self.accuracy.accuracy
    }

    pub fn reliability(&self) -> f64 {
        self.robustness.reliability
    }
}

/// Number of failure markers divided by the trajectory length
///
pub fn failure_rate(trajectory: &[Region]) -> f64 {
    if trajectory.is_empty() {
        return 0.0;
    }
    let failures = trajectory
        .iter()
        .filter(|r| r.is_code(SpecialCode::Failure))
        .count();
    failures as f64 / trajectory.len() as f64
}

/// Estimates the accuracy over overlap ratio sequences
///
pub fn estimate_accuracy<T>(overlap_ratios_list: &[T]) -> Result<AccuracyResult>
where
    T: AsRef<[f64]>,
{
    Ok(AccuracyResult::from_per_frame(compute_per_frame_values(
        overlap_ratios_list,
    )?))
}

/// Estimates the robustness over trajectories
///
/// # Parameters
/// * `trajectory_list` - one trajectory per repetition or video
/// * `sensitivity` - steepness of the reliability penalty, [`DEFAULT_SENSITIVITY`](crate::estimator::DEFAULT_SENSITIVITY) by convention
///
pub fn estimate_robustness<T>(trajectory_list: &[T], sensitivity: f64) -> Result<RobustnessResult>
where
    T: AsRef<[Region]>,
{
    RobustnessResult::from_failure_rates(
        trajectory_list
            .iter()
            .map(|t| failure_rate(t.as_ref()))
            .collect(),
        sensitivity,
    )
}

/// Estimates both accuracy and robustness of a tracker
///
pub fn estimate_ar_plot<O, T>(
    overlap_ratios_list: &[O],
    trajectory_list: &[T],
    sensitivity: f64,
) -> Result<ArPlotResult>
where
    O: AsRef<[f64]>,
    T: AsRef<[Region]>,
{
    Ok(ArPlotResult {
        accuracy: estimate_accuracy(overlap_ratios_list)?,
        robustness: estimate_robustness(trajectory_list, sensitivity)?,
    })
}
