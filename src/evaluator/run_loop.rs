use crate::evaluator::options::ResetOptions;
use crate::region::Region;
use crate::tracker::Tracker;
use crate::video::Frame;
use crate::visualizer::Visualizer;
use crate::Errors;
use anyhow::Result;
use log::debug;

/// Everything one pass of a tracker over a video produces
///
/// The three sequences are parallel: one entry per frame.
///
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunRecord {
    /// starts with the initialization marker
    pub trajectory: Vec<Region>,
    /// NaN on every marker frame
    pub overlap_ratios: Vec<f64>,
    /// distances between estimated and ground truth centers, NaN on every marker frame
    pub center_distances: Vec<f64>,
}

impl RunRecord {
    fn with_capacity(capacity: usize) -> Self {
        Self {
            trajectory: Vec::with_capacity(capacity),
            overlap_ratios: Vec::with_capacity(capacity),
            center_distances: Vec::with_capacity(capacity),
        }
    }

    fn push(&mut self, region: Region, overlap_ratio: f64, center_distance: f64) {
        self.trajectory.push(region);
        self.overlap_ratios.push(overlap_ratio);
        self.center_distances.push(center_distance);
    }

    fn push_marker(&mut self, marker: Region) {
        self.push(marker, f64::NAN, f64::NAN);
    }

    pub fn len(&self) -> usize {
        self.trajectory.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trajectory.is_empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunState {
    /// the next frame initializes the tracker
    Uninitialized,
    Tracking,
    /// frames left before the tracker is initialized again
    Cooldown(usize),
    /// a failure skipped the rest of the video
    Exhausted,
}

/// Drives a tracker over the frames of a video, applying the reset-on-failure protocol
///
/// The first frame always initializes the tracker. With `reset` enabled, an estimate whose
/// overlap with the ground truth is not above `failure_threshold` is recorded as a failure;
/// the next `reinitialize_step` frames are skipped (the rest of the video when the step is 0)
/// and the tracker is initialized again with the ground truth of the frame that follows.
///
/// # Parameters
/// * `tracker` - the evaluated tracker, its errors are returned unchanged
/// * `video_name` - name used for logging and passed to the visualizer
/// * `frames` - annotated frames of the video
/// * `opts` - reset protocol parameters, validated before the first frame
/// * `visualizer` - receives every frame together with the tracker output
///
pub fn run_tracker<I, T, V>(
    tracker: &mut T,
    video_name: &str,
    frames: &[Frame<I>],
    opts: &ResetOptions,
    visualizer: &mut V,
) -> Result<RunRecord>
where
    T: Tracker<I> + ?Sized,
    V: Visualizer<I> + ?Sized,
{
    opts.validate()?;
    if frames.is_empty() {
        return Err(Errors::EmptyVideo(video_name.to_string()).into());
    }

    let mut record = RunRecord::with_capacity(frames.len());
    let mut state = RunState::Uninitialized;

    for (index, frame) in frames.iter().enumerate() {
        let ground_truth = frame.ground_truth();
        state = match state {
            RunState::Uninitialized => {
                if index > 0 {
                    debug!(
                        "Tracker {} is re-initialized on frame {} of {}",
                        tracker.name(),
                        index,
                        video_name
                    );
                }
                tracker.init_frame(frame.image(), ground_truth)?;
                record.push_marker(Region::init());
                visualizer.show(
                    video_name,
                    index,
                    frame.image(),
                    ground_truth,
                    &Region::init(),
                );
                RunState::Tracking
            }
            RunState::Tracking => {
                let region = tracker.estimate(frame.image())?;
                let overlap = region.overlap_ratio(&Region::from(*ground_truth));
                visualizer.show(video_name, index, frame.image(), ground_truth, &region);

                if opts.reset && overlap <= opts.failure_threshold {
                    debug!(
                        "Tracker {} failed on frame {} of {} with overlap {}",
                        tracker.name(),
                        index,
                        video_name,
                        overlap
                    );
                    record.push_marker(Region::failure());
                    if opts.reinitialize_step > 0 {
                        RunState::Cooldown(opts.reinitialize_step)
                    } else {
                        RunState::Exhausted
                    }
                } else {
                    // markers only come from the protocol, a missing estimate is undefined
                    match region.center_distance(ground_truth) {
                        Some(distance) => record.push(region, overlap, distance),
                        None => record.push_marker(Region::undefined()),
                    }
                    RunState::Tracking
                }
            }
            RunState::Cooldown(left) => {
                record.push_marker(Region::undefined());
                visualizer.show(
                    video_name,
                    index,
                    frame.image(),
                    ground_truth,
                    &Region::undefined(),
                );
                if left > 1 {
                    RunState::Cooldown(left - 1)
                } else {
                    RunState::Uninitialized
                }
            }
            RunState::Exhausted => {
                record.push_marker(Region::undefined());
                visualizer.show(
                    video_name,
                    index,
                    frame.image(),
                    ground_truth,
                    &Region::undefined(),
                );
                RunState::Exhausted
            }
        };
    }

    Ok(record)
}

#[cfg(test)]
mod tests {
    use crate::eao::measure::split_fragments;
    use crate::estimator::ar_plot::failure_rate;
    use crate::evaluator::options::ResetOptions;
    use crate::evaluator::run_loop::run_tracker;
    use crate::region::{Region, SpecialCode};
    use crate::tracker::Tracker;
    use crate::utils::bbox::BoundingBox;
    use crate::video::Frame;
    use crate::visualizer::{NoopVisualizer, Visualizer};
    use crate::Errors;
    use crate::EPS;
    use anyhow::{bail, Result};

    fn ground_truth() -> BoundingBox {
        BoundingBox::from_xywh(0.0, 0.0, 10.0, 10.0)
    }

    fn frames(len: usize) -> Vec<Frame<usize>> {
        (0..len).map(|i| Frame::new(i, ground_truth())).collect()
    }

    /// Returns the ground truth shifted by a per-frame offset; the image is the frame index
    struct ScriptedTracker {
        offsets: Vec<f64>,
        lost: Vec<usize>,
        gives_up: Vec<usize>,
        inits: Vec<usize>,
        fail_on: Option<usize>,
    }

    impl ScriptedTracker {
        fn new(len: usize) -> Self {
            Self {
                offsets: vec![0.0; len],
                lost: vec![],
                gives_up: vec![],
                inits: vec![],
                fail_on: None,
            }
        }
    }

    impl Tracker<usize> for ScriptedTracker {
        fn init_frame(&mut self, image: &usize, _ground_truth: &BoundingBox) -> Result<()> {
            self.inits.push(*image);
            Ok(())
        }

        fn estimate(&mut self, image: &usize) -> Result<Region> {
            if self.fail_on == Some(*image) {
                bail!("camera disconnected");
            }
            if self.lost.contains(image) {
                return Ok(Region::undefined());
            }
            if self.gives_up.contains(image) {
                return Ok(Region::failure());
            }
            Ok(ground_truth().shift(self.offsets[*image], 0.0).into())
        }
    }

    #[derive(Default)]
    struct RecordingVisualizer {
        shown: Vec<(usize, Region)>,
    }

    impl Visualizer<usize> for RecordingVisualizer {
        fn show(
            &mut self,
            _video_name: &str,
            frame_index: usize,
            _image: &usize,
            _ground_truth: &BoundingBox,
            region: &Region,
        ) {
            self.shown.push((frame_index, *region));
        }
    }

    #[test]
    fn perfect_tracker() {
        let mut tracker = ScriptedTracker::new(5);
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(5),
            &ResetOptions::default(),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert_eq!(res.len(), 5);
        assert_eq!(res.trajectory[0], Region::init());
        assert!(res.overlap_ratios[0].is_nan());
        assert!(res.center_distances[0].is_nan());
        assert!(res.overlap_ratios[1..]
            .iter()
            .all(|o| (o - 1.0).abs() < EPS));
        assert!(res.center_distances[1..].iter().all(|d| d.abs() < EPS));
        assert_eq!(tracker.inits, vec![0]);
    }

    #[test]
    fn cooldown_and_reinitialization() {
        let mut tracker = ScriptedTracker::new(10);
        tracker.offsets[3] = 100.0;
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(10),
            &ResetOptions::new(true, 0.0, 2),
            &mut NoopVisualizer,
        )
        .unwrap();

        let codes = res
            .trajectory
            .iter()
            .map(|r| match r {
                Region::Special(c) => Some(*c),
                Region::BoundingBox(_) => None,
            })
            .collect::<Vec<_>>();
        assert_eq!(
            codes,
            vec![
                Some(SpecialCode::Init),
                None,
                None,
                Some(SpecialCode::Failure),
                Some(SpecialCode::Undefined),
                Some(SpecialCode::Undefined),
                Some(SpecialCode::Init),
                None,
                None,
                None
            ]
        );
        assert_eq!(tracker.inits, vec![0, 6]);
        for i in [0, 3, 4, 5, 6] {
            assert!(res.overlap_ratios[i].is_nan());
            assert!(res.center_distances[i].is_nan());
        }
    }

    #[test]
    fn zero_step_skips_rest_of_video() {
        let mut tracker = ScriptedTracker::new(10);
        tracker.offsets[3] = 100.0;
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(10),
            &ResetOptions::new(true, 0.0, 0),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert_eq!(res.len(), 10);
        assert_eq!(res.trajectory[3], Region::failure());
        assert!(res.trajectory[4..].iter().all(|r| *r == Region::undefined()));
        assert!(res.overlap_ratios[3..].iter().all(|o| o.is_nan()));
        assert_eq!(tracker.inits, vec![0]);
    }

    #[test]
    fn failure_threshold() {
        // a 5 pixel shift of a 10x10 box overlaps by 1/3
        let mut tracker = ScriptedTracker::new(4);
        tracker.offsets[2] = 5.0;
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(4),
            &ResetOptions::new(true, 0.4, 1),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert_eq!(res.trajectory[2], Region::failure());
        assert_eq!(res.trajectory[3], Region::undefined());

        let mut tracker = ScriptedTracker::new(4);
        tracker.offsets[2] = 5.0;
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(4),
            &ResetOptions::new(true, 0.3, 1),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert!((res.overlap_ratios[2] - 1.0 / 3.0).abs() < EPS);
        assert!((res.center_distances[2] - 5.0).abs() < EPS);
    }

    #[test]
    fn no_reset_keeps_lost_frames() {
        let mut tracker = ScriptedTracker::new(5);
        tracker.offsets[2] = 100.0;
        tracker.lost = vec![3];
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(5),
            &ResetOptions::no_reset(),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert!(res.trajectory[2].as_bbox().is_some());
        assert_eq!(res.overlap_ratios[2], 0.0);
        assert!((res.center_distances[2] - 100.0).abs() < EPS);
        assert_eq!(res.trajectory[3], Region::undefined());
        assert!(res.overlap_ratios[3].is_nan());
        assert!(!res.trajectory.contains(&Region::failure()));
        assert_eq!(tracker.inits, vec![0]);
    }

    #[test]
    fn reported_markers_are_undefined_without_reset() {
        let mut tracker = ScriptedTracker::new(6);
        tracker.gives_up = vec![2];
        tracker.lost = vec![3];
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(6),
            &ResetOptions::no_reset(),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert_eq!(res.trajectory[2], Region::undefined());
        assert_eq!(res.trajectory[3], Region::undefined());
        assert!(res.overlap_ratios[2].is_nan());
        assert!(res.center_distances[2].is_nan());
        assert_eq!(failure_rate(&res.trajectory), 0.0);
        let fragments = split_fragments(&res.trajectory, &res.overlap_ratios).unwrap();
        assert_eq!(fragments.len(), 1);
        assert_eq!(fragments[0].len(), 6);
    }

    #[test]
    fn special_estimate_is_a_failure_with_reset() {
        let mut tracker = ScriptedTracker::new(5);
        tracker.lost = vec![1];
        let res = run_tracker(
            &mut tracker,
            "v",
            &frames(5),
            &ResetOptions::new(true, 0.0, 1),
            &mut NoopVisualizer,
        )
        .unwrap();
        assert_eq!(res.trajectory[1], Region::failure());
        assert_eq!(res.trajectory[2], Region::undefined());
        assert_eq!(res.trajectory[3], Region::init());
        assert_eq!(tracker.inits, vec![0, 3]);
    }

    #[test]
    fn visualizer_sees_every_frame() {
        let mut tracker = ScriptedTracker::new(6);
        tracker.offsets[2] = 100.0;
        let mut visualizer = RecordingVisualizer::default();
        run_tracker(
            &mut tracker,
            "v",
            &frames(6),
            &ResetOptions::new(true, 0.0, 1),
            &mut visualizer,
        )
        .unwrap();
        assert_eq!(
            visualizer.shown.iter().map(|(i, _)| *i).collect::<Vec<_>>(),
            vec![0, 1, 2, 3, 4, 5]
        );
        assert_eq!(visualizer.shown[0].1, Region::init());
        // the failed estimate itself is shown, not the marker
        assert!(visualizer.shown[2].1.as_bbox().is_some());
        assert_eq!(visualizer.shown[3].1, Region::undefined());
        assert_eq!(visualizer.shown[4].1, Region::init());
    }

    #[test]
    fn errors() {
        let mut tracker = ScriptedTracker::new(5);
        tracker.fail_on = Some(2);
        let err = run_tracker(
            &mut tracker,
            "v",
            &frames(5),
            &ResetOptions::default(),
            &mut NoopVisualizer,
        )
        .unwrap_err();
        assert_eq!(err.to_string(), "camera disconnected");

        let mut tracker = ScriptedTracker::new(0);
        let err = run_tracker(
            &mut tracker,
            "empty",
            &frames(0),
            &ResetOptions::default(),
            &mut NoopVisualizer,
        )
        .unwrap_err();
        assert_eq!(
            err.downcast_ref::<Errors>(),
            Some(&Errors::EmptyVideo("empty".to_string()))
        );

        let mut tracker = ScriptedTracker::new(5);
        assert!(run_tracker(
            &mut tracker,
            "v",
            &frames(5),
            &ResetOptions::new(true, -1.0, 5),
            &mut NoopVisualizer,
        )
        .is_err());
        assert!(tracker.inits.is_empty());
    }
}
