use crate::eao::DEFAULT_EAO_THRESHOLD;
use crate::estimator::{
    DEFAULT_PRECISION_MAX_THRESHOLD, DEFAULT_PRECISION_SCORE_THRESHOLD, DEFAULT_SENSITIVITY,
};
use crate::evaluator::metric::Metric;
use crate::Errors;
use anyhow::Result;

/// Overlap at or below which a frame counts as a tracking failure
pub const DEFAULT_FAILURE_THRESHOLD: f64 = 0.0;

/// Frames skipped after a failure before the tracker is re-initialized
pub const DEFAULT_REINITIALIZE_STEP: usize = 5;

/// Repetitions of every tracker/video pair in stochastic mode
pub const DEFAULT_STOCHASTIC_REPETITIONS: usize = 15;

/// Reset-on-failure protocol parameters
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResetOptions {
    /// when `false` the tracker runs over the whole video without failure detection
    pub reset: bool,
    pub failure_threshold: f64,
    /// frames skipped after a failure; 0 skips the rest of the video
    pub reinitialize_step: usize,
}

impl Default for ResetOptions {
    fn default() -> Self {
        Self {
            reset: true,
            failure_threshold: DEFAULT_FAILURE_THRESHOLD,
            reinitialize_step: DEFAULT_REINITIALIZE_STEP,
        }
    }
}

impl ResetOptions {
    pub fn new(reset: bool, failure_threshold: f64, reinitialize_step: usize) -> Self {
        Self {
            reset,
            failure_threshold,
            reinitialize_step,
        }
    }

    /// Runs without failure detection
    ///
    pub fn no_reset() -> Self {
        Self {
            reset: false,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.reset && !(self.failure_threshold >= 0.0 && self.failure_threshold.is_finite()) {
            return Err(Errors::InvalidConfiguration(format!(
                "failure threshold must be a non-negative number, got {}",
                self.failure_threshold
            ))
            .into());
        }
        Ok(())
    }
}

/// Parameters of one evaluation call
///
#[derive(Debug, Clone, PartialEq)]
pub struct EvaluationOptions {
    pub metrics: Vec<Metric>,
    /// repeats every tracker/video pair `repetitions` times
    pub stochastic: bool,
    pub repetitions: usize,
    pub reset: ResetOptions,
    pub sensitivity: f64,
    pub precision_max_threshold: usize,
    pub precision_score_threshold: usize,
    pub eao_threshold: f64,
}

impl Default for EvaluationOptions {
    fn default() -> Self {
        Self {
            metrics: vec![Metric::SuccessPlot],
            stochastic: false,
            repetitions: DEFAULT_STOCHASTIC_REPETITIONS,
            reset: ResetOptions::default(),
            sensitivity: DEFAULT_SENSITIVITY,
            precision_max_threshold: DEFAULT_PRECISION_MAX_THRESHOLD,
            precision_score_threshold: DEFAULT_PRECISION_SCORE_THRESHOLD,
            eao_threshold: DEFAULT_EAO_THRESHOLD,
        }
    }
}

impl EvaluationOptions {
    /// Number of runs per tracker/video pair
    ///
    pub fn runs(&self) -> usize {
        if self.stochastic {
            self.repetitions
        } else {
            1
        }
    }

    /// Rejects malformed configurations before any tracker runs
    ///
    pub fn validate(&self) -> Result<()> {
        self.reset.validate()?;
        if self.stochastic && self.repetitions == 0 {
            return Err(Errors::InvalidConfiguration(
                "stochastic evaluation requires at least one repetition".to_string(),
            )
            .into());
        }
        if !(self.sensitivity >= 0.0 && self.sensitivity.is_finite()) {
            return Err(Errors::InvalidConfiguration(format!(
                "sensitivity must be a non-negative number, got {}",
                self.sensitivity
            ))
            .into());
        }
        if self.precision_score_threshold > self.precision_max_threshold {
            return Err(Errors::ScoreThresholdOutOfRange {
                score_threshold: self.precision_score_threshold,
                max_threshold: self.precision_max_threshold,
            }
            .into());
        }
        if !(self.eao_threshold > 0.0 && self.eao_threshold <= 1.0) {
            return Err(Errors::InvalidConfiguration(format!(
                "EAO threshold must be within (0, 1], got {}",
                self.eao_threshold
            ))
            .into());
        }
        Ok(())
    }
}

/// Builder for EvaluationOptions
///
#[derive(Debug, Clone, Default)]
pub struct EvaluationOptionsBuilder {
    opts: EvaluationOptions,
}

impl EvaluationOptionsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metrics to estimate, replacing the default ones
    ///
    pub fn metrics(mut self, metrics: &[Metric]) -> Self {
        self.opts.metrics = metrics.to_vec();
        self
    }

    /// Sets the metrics by their names
    ///
    pub fn metric_names(mut self, names: &[&str]) -> Result<Self> {
        self.opts.metrics = names
            .iter()
            .map(|n| n.parse::<Metric>())
            .collect::<Result<Vec<_>>>()?;
        Ok(self)
    }

    /// Enables stochastic mode with `repetitions` runs per tracker/video pair
    ///
    pub fn stochastic(mut self, repetitions: usize) -> Self {
        self.opts.stochastic = true;
        self.opts.repetitions = repetitions;
        self
    }

    pub fn reset(mut self, reset: ResetOptions) -> Self {
        self.opts.reset = reset;
        self
    }

    pub fn sensitivity(mut self, sensitivity: f64) -> Self {
        self.opts.sensitivity = sensitivity;
        self
    }

    pub fn precision_thresholds(mut self, max_threshold: usize, score_threshold: usize) -> Self {
        self.opts.precision_max_threshold = max_threshold;
        self.opts.precision_score_threshold = score_threshold;
        self
    }

    pub fn eao_threshold(mut self, threshold: f64) -> Self {
        self.opts.eao_threshold = threshold;
        self
    }

    /// Builds and validates the options
    ///
    pub fn build(self) -> Result<EvaluationOptions> {
        self.opts.validate()?;
        Ok(self.opts)
    }
}
