use crate::region::Region;
use crate::utils::bbox::BoundingBox;

/// Receives every evaluated frame, e.g. to draw the boxes and display them
///
/// The evaluator never reads anything back, so an implementation cannot affect the metrics.
///
pub trait Visualizer<I> {
    fn show(
        &mut self,
        video_name: &str,
        frame_index: usize,
        image: &I,
        ground_truth: &BoundingBox,
        region: &Region,
    );
}

#[derive(Default, Clone, Debug)]
pub struct NoopVisualizer;

impl<I> Visualizer<I> for NoopVisualizer {
    fn show(
        &mut self,
        _video_name: &str,
        _frame_index: usize,
        _image: &I,
        _ground_truth: &BoundingBox,
        _region: &Region,
    ) {
    }
}
