use crate::eao::estimate_eao_with_lengths;
use crate::estimator::ar_plot::{failure_rate, AccuracyResult, ArPlotResult, RobustnessResult};
use crate::estimator::{compute_per_frame_values, validate_sequences};
use crate::estimator::precision_plot::PrecisionPlotResult;
use crate::estimator::success_plot::SuccessPlotResult;
use crate::evaluator::metric::{Metric, MetricValue};
use crate::evaluator::options::EvaluationOptions;
use crate::evaluator::run_loop::{run_tracker, RunRecord};
use crate::evaluator::score::{Score, ScoreBuilder, TargetKind};
use crate::region::Region;
use crate::tracker::Tracker;
use crate::video::{Dataset, Video};
use crate::visualizer::{NoopVisualizer, Visualizer};
use crate::Errors;
use anyhow::Result;
use log::{info, warn};
use std::collections::HashSet;

/// Metric names and per-tracker metric results
pub mod metric;
/// Evaluation parameters and their builder
pub mod options;
/// Reset-on-failure driver of a single tracker over a single video
pub mod run_loop;
/// Frozen result tables
pub mod score;

/// Results of one tracker pooled over one or more videos
///
#[derive(Debug, Default)]
struct TrackerRecords {
    per_frame_overlaps: Vec<f64>,
    per_frame_distances: Vec<f64>,
    failure_rates: Vec<f64>,
    trajectories: Vec<Vec<Region>>,
    overlap_ratios: Vec<Vec<f64>>,
    /// one entry per video, repetitions excluded
    video_lengths: Vec<usize>,
}

impl TrackerRecords {
    /// Adds the runs (one per repetition) of a single video
    ///
    fn add_video(&mut self, runs: Vec<RunRecord>) -> Result<()> {
        let overlaps = runs
            .iter()
            .map(|r| r.overlap_ratios.as_slice())
            .collect::<Vec<_>>();
        let video_length = validate_sequences(&overlaps)?;
        let distances = runs
            .iter()
            .map(|r| r.center_distances.as_slice())
            .collect::<Vec<_>>();
        self.per_frame_overlaps
            .extend(compute_per_frame_values(&overlaps)?);
        self.per_frame_distances
            .extend(compute_per_frame_values(&distances)?);
        self.video_lengths.push(video_length);

        for run in runs {
            self.failure_rates.push(failure_rate(&run.trajectory));
            self.trajectories.push(run.trajectory);
            self.overlap_ratios.push(run.overlap_ratios);
        }
        Ok(())
    }

    fn measure(&self, metric: Metric, opts: &EvaluationOptions) -> Result<MetricValue> {
        Ok(match metric {
            Metric::SuccessPlot => MetricValue::SuccessPlot(SuccessPlotResult::from_per_frame(
                self.per_frame_overlaps.clone(),
            )),
            Metric::PrecisionPlot => MetricValue::PrecisionPlot(PrecisionPlotResult::from_per_frame(
                self.per_frame_distances.clone(),
                opts.precision_max_threshold,
                opts.precision_score_threshold,
            )?),
            Metric::ArPlot => MetricValue::ArPlot(ArPlotResult {
                accuracy: AccuracyResult::from_per_frame(self.per_frame_overlaps.clone()),
                robustness: RobustnessResult::from_failure_rates(
                    self.failure_rates.clone(),
                    opts.sensitivity,
                )?,
            }),
            Metric::Eao => MetricValue::Eao(estimate_eao_with_lengths(
                &self.trajectories,
                &self.overlap_ratios,
                &self.video_lengths,
                opts.eao_threshold,
            )?),
        })
    }

    fn insert_into(
        &self,
        builder: &mut ScoreBuilder,
        tracker_name: &str,
        opts: &EvaluationOptions,
    ) -> Result<()> {
        for metric in &opts.metrics {
            builder.insert(tracker_name, self.measure(*metric, opts)?);
        }
        Ok(())
    }
}

fn tracker_names<I>(trackers: &[Box<dyn Tracker<I>>]) -> Vec<String> {
    let names = trackers.iter().map(|t| t.name()).collect::<Vec<_>>();
    let mut seen = HashSet::new();
    for name in &names {
        if !seen.insert(name.as_str()) {
            warn!(
                "Several trackers are named {}, only the last one's results are kept",
                name
            );
        }
    }
    names
}

/// Runs every tracker over one video and returns the runs of each tracker
///
fn run_video<I>(
    trackers: &mut [Box<dyn Tracker<I>>],
    names: &[String],
    video: &dyn Video<I>,
    opts: &EvaluationOptions,
    visualizer: &mut dyn Visualizer<I>,
) -> Result<Vec<Vec<RunRecord>>> {
    let mut runs = Vec::with_capacity(trackers.len());
    for (tracker, name) in trackers.iter_mut().zip(names) {
        info!(
            "Evaluating tracker {} on video {}/{}",
            name,
            video.dataset_name(),
            video.name()
        );
        let frames = video.load_frames()?;
        let tracker_runs = (0..opts.runs())
            .map(|_| {
                run_tracker(
                    &mut **tracker,
                    video.name(),
                    &frames,
                    &opts.reset,
                    &mut *visualizer,
                )
            })
            .collect::<Result<Vec<_>>>()?;
        runs.push(tracker_runs);
    }
    Ok(runs)
}

/// Evaluates the trackers on a dataset, or on a single video of it
///
/// With `video_name` the result holds exactly one score for that video. Otherwise the first
/// score aggregates the whole dataset and one score per video follows in dataset order.
///
/// # Parameters
/// * `trackers` - evaluated trackers, every video is run through all of them
/// * `dataset` - annotated videos
/// * `video_name` - restricts the evaluation to one video
/// * `opts` - metrics and protocol parameters, validated before any tracker runs
///
pub fn evaluate<I>(
    trackers: &mut [Box<dyn Tracker<I>>],
    dataset: &Dataset<I>,
    video_name: Option<&str>,
    opts: &EvaluationOptions,
) -> Result<Vec<Score>> {
    evaluate_with_visualizer(trackers, dataset, video_name, opts, &mut NoopVisualizer)
}

/// [`evaluate`](evaluate) that shows every frame to the visualizer
///
pub fn evaluate_with_visualizer<I>(
    trackers: &mut [Box<dyn Tracker<I>>],
    dataset: &Dataset<I>,
    video_name: Option<&str>,
    opts: &EvaluationOptions,
    visualizer: &mut dyn Visualizer<I>,
) -> Result<Vec<Score>> {
    opts.validate()?;
    match video_name {
        Some(video_name) => {
            let video = dataset.get_video(video_name)?;
            Ok(vec![evaluate_video(trackers, video, opts, visualizer)?])
        }
        None => evaluate_dataset(trackers, dataset, opts, visualizer),
    }
}

/// Evaluates the trackers on one video
///
pub fn evaluate_video<I>(
    trackers: &mut [Box<dyn Tracker<I>>],
    video: &dyn Video<I>,
    opts: &EvaluationOptions,
    visualizer: &mut dyn Visualizer<I>,
) -> Result<Score> {
    opts.validate()?;
    let names = tracker_names(trackers);
    let runs = run_video(trackers, &names, video, opts, visualizer)?;

    let mut builder = ScoreBuilder::new(video.name(), TargetKind::Video);
    for (name, tracker_runs) in names.iter().zip(runs) {
        let mut records = TrackerRecords::default();
        records.add_video(tracker_runs)?;
        records.insert_into(&mut builder, name, opts)?;
    }
    Ok(builder.build())
}

/// Evaluates the trackers on every video of the dataset
///
/// The first score aggregates the dataset: per-frame values of all videos are pooled, the
/// failure rates of all runs are averaged and the EAO curve is estimated over all runs, its
/// interval over the video lengths.
///
pub fn evaluate_dataset<I>(
    trackers: &mut [Box<dyn Tracker<I>>],
    dataset: &Dataset<I>,
    opts: &EvaluationOptions,
    visualizer: &mut dyn Visualizer<I>,
) -> Result<Vec<Score>> {
    opts.validate()?;
    if dataset.videos().is_empty() {
        return Err(Errors::EmptySequenceList.into());
    }
    let names = tracker_names(trackers);
    let mut pooled = names
        .iter()
        .map(|_| TrackerRecords::default())
        .collect::<Vec<_>>();
    let mut video_scores = Vec::with_capacity(dataset.videos().len());

    for video in dataset.videos() {
        let runs = run_video(trackers, &names, video.as_ref(), opts, visualizer)?;
        let mut builder = ScoreBuilder::new(video.name(), TargetKind::Video);
        for ((name, tracker_runs), pooled) in names.iter().zip(runs).zip(pooled.iter_mut()) {
            let mut records = TrackerRecords::default();
            records.add_video(tracker_runs.clone())?;
            records.insert_into(&mut builder, name, opts)?;
            pooled.add_video(tracker_runs)?;
        }
        video_scores.push(builder.build());
    }

    info!(
        "Aggregating {} videos of dataset {}",
        video_scores.len(),
        dataset.name()
    );
    let mut builder = ScoreBuilder::new(dataset.name(), TargetKind::Dataset);
    for (name, records) in names.iter().zip(pooled.iter()) {
        records.insert_into(&mut builder, name, opts)?;
    }

    let mut scores = Vec::with_capacity(video_scores.len() + 1);
    scores.push(builder.build());
    scores.extend(video_scores);
    Ok(scores)
}
