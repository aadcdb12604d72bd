/// One dimensional Gaussian mixture and its kernel density fit
pub mod gmm;

/// Evaluation interval selection over sequence lengths
pub mod interval;

/// Fragment split, EAO curve and the expected average overlap measure
pub mod measure;

pub use interval::{estimate_eao_interval, EaoInterval, DEFAULT_EAO_THRESHOLD};
pub use measure::{estimate_eao, estimate_eao_with_lengths, EaoResult, Fragment, FragmentStatus};
