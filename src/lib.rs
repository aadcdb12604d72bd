use thiserror::Error;

/// Frequently used types and functions
pub mod prelude;

/// Bounding boxes and numeric helpers
pub mod utils;

/// Regions reported by trackers: real boxes and trajectory markers
pub mod region;

/// Frames, videos and datasets consumed by the evaluator
pub mod video;

/// The interface that evaluated trackers implement
pub mod tracker;

/// Optional per-frame visualization side channel
pub mod visualizer;

/// Metric estimators: success plot, precision plot, accuracy, robustness
pub mod estimator;

/// Expected average overlap and its evaluation interval
pub mod eao;

/// Run-loop and evaluation driver
pub mod evaluator;

/// Synthetic videos and reference trackers for tests, benchmarks and demos
pub mod examples;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Errors {
    #[error("Metric \"{0}\" is not supported.")]
    UnsupportedMetric(String),
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("At least one sequence is required.")]
    EmptySequenceList,
    #[error("Sequence {index} has length {found}, but {expected} is expected.")]
    MismatchedSequenceLength {
        index: usize,
        expected: usize,
        found: usize,
    },
    #[error("Score threshold {score_threshold} exceeds the maximal threshold {max_threshold}.")]
    ScoreThresholdOutOfRange {
        score_threshold: usize,
        max_threshold: usize,
    },
    #[error("Video \"{0}\" has no frames.")]
    EmptyVideo(String),
    #[error("Video \"{video}\" is not in dataset \"{dataset}\".")]
    MissingVideo { video: String, dataset: String },
    #[error("At least one sequence length is required to estimate the EAO interval.")]
    EmptyLengthSample,
}

pub(crate) const EPS: f64 = 0.00001;

pub trait EstimateClose {
    fn almost_same(&self, other: &Self, eps: f64) -> bool;
}
