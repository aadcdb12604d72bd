use crate::evaluator;

pub use crate::region::{Region, SpecialCode};
pub use crate::tracker::Tracker;
pub use crate::utils::bbox::BoundingBox;
pub use crate::video::{Dataset, Frame, InMemoryVideo, Video};
pub use crate::visualizer::{NoopVisualizer, Visualizer};

pub use evaluator::metric::{Metric, MetricValue};
pub use evaluator::options::{EvaluationOptions, EvaluationOptionsBuilder, ResetOptions};
pub use evaluator::score::{Score, TargetKind};
pub use evaluator::{evaluate, evaluate_with_visualizer};
