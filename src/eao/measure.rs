use crate::eao::interval::{estimate_eao_interval, EaoInterval};
use crate::region::{Region, SpecialCode};
use crate::utils::stats::mean;
use crate::Errors;
use anyhow::Result;
use itertools::Itertools;
use log::warn;
use rayon::prelude::*;

/// How a fragment terminated
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FragmentStatus {
    /// reached the end of the video
    Success,
    /// terminated by a failure marker
    Failure,
}

/// Run of a trajectory between an initialization and the next failure (or the end of the video)
///
#[derive(Debug, Clone, PartialEq)]
pub struct Fragment {
    /// overlaps of the frames after the initialization frame, missing estimates count as 0
    pub overlaps: Vec<f64>,
    pub status: FragmentStatus,
}

impl Fragment {
    /// Number of frames spanned by the fragment, the initialization frame included
    ///
    pub fn len(&self) -> usize {
        self.overlaps.len() + 1
    }

    /// Average overlap over the first `window` frames after initialization, or `None` when the
    /// fragment reached the end of the video before covering the window
    ///
    /// A failed fragment shorter than the window still contributes: its missing tail counts as 0.
    ///
    pub fn window_overlap(&self, window: usize) -> Option<f64> {
        PrefixSums::from(self).window_overlap(window)
    }
}

/// Running sums of a fragment's overlaps, `sums[k]` is the sum of the first `k` overlaps
///
struct PrefixSums {
    sums: Vec<f64>,
    status: FragmentStatus,
}

impl From<&Fragment> for PrefixSums {
    fn from(fragment: &Fragment) -> Self {
        let mut sums = Vec::with_capacity(fragment.overlaps.len() + 1);
        sums.push(0.0);
        let mut total = 0.0;
        for o in &fragment.overlaps {
            total += o;
            sums.push(total);
        }
        Self {
            sums,
            status: fragment.status,
        }
    }
}

impl PrefixSums {
    fn window_overlap(&self, window: usize) -> Option<f64> {
        let available = self.sums.len() - 1;
        if self.status == FragmentStatus::Success && available < window {
            return None;
        }
        Some(self.sums[window.min(available)] / window as f64)
    }
}

/// Splits a trajectory and its overlaps into fragments
///
/// A fragment starts at every initialization marker and ends at the next failure marker or
/// at the end of the trajectory.
///
pub fn split_fragments(trajectory: &[Region], overlaps: &[f64]) -> Result<Vec<Fragment>> {
    if trajectory.len() != overlaps.len() {
        return Err(Errors::MismatchedSequenceLength {
            index: 0,
            expected: trajectory.len(),
            found: overlaps.len(),
        }
        .into());
    }

    let mut fragments = Vec::new();
    let mut current: Option<Vec<f64>> = None;

    for (region, overlap) in trajectory.iter().zip(overlaps) {
        let overlap = if overlap.is_nan() { 0.0 } else { *overlap };
        match region {
            Region::Special(SpecialCode::Init) => {
                if let Some(overlaps) = current.take() {
                    fragments.push(Fragment {
                        overlaps,
                        status: FragmentStatus::Success,
                    });
                }
                current = Some(Vec::new());
            }
            Region::Special(SpecialCode::Failure) => {
                if let Some(overlaps) = current.take() {
                    fragments.push(Fragment {
                        overlaps,
                        status: FragmentStatus::Failure,
                    });
                }
            }
            _ => {
                if let Some(overlaps) = current.as_mut() {
                    overlaps.push(overlap);
                }
            }
        }
    }

    if let Some(overlaps) = current {
        fragments.push(Fragment {
            overlaps,
            status: FragmentStatus::Success,
        });
    }

    Ok(fragments)
}

/// Expected average overlap for every sequence length `1..=max_length`
///
/// Index 0 holds the value for length 1, which is 1 by convention. Lengths no fragment
/// contributes to are 0.
///
pub fn compute_eao_curve(fragments: &[Fragment], max_length: usize) -> Vec<f64> {
    let prefix_sums = fragments.iter().map(PrefixSums::from).collect::<Vec<_>>();

    (1..=max_length)
        .into_par_iter()
        .map(|length| {
            if length == 1 {
                return 1.0;
            }
            let window = length - 1;
            let overlaps = prefix_sums
                .iter()
                .filter_map(|p| p.window_overlap(window))
                .collect::<Vec<_>>();
            mean(&overlaps).unwrap_or(0.0)
        })
        .collect()
}

/// Expected average overlap of a tracker
///
#[derive(Debug, Clone, PartialEq)]
pub struct EaoResult {
    /// EAO for every sequence length, index 0 is length 1
    pub curve: Vec<f64>,
    pub interval: EaoInterval,
    /// mean of the curve over the interval, `None` when all sequences have the same length
    pub eao_measure: Option<f64>,
    /// lengths the interval was estimated from, one per video
    pub sequence_lengths: Vec<usize>,
}

/// Estimates the expected average overlap, one trajectory per video
///
/// # Parameters
/// * `trajectory_list` - trajectories of every evaluated sequence
/// * `overlap_ratios_list` - the parallel overlap sequences
/// * `threshold` - probability mass of the sequence length interval
///
pub fn estimate_eao<T, O>(
    trajectory_list: &[T],
    overlap_ratios_list: &[O],
    threshold: f64,
) -> Result<EaoResult>
where
    T: AsRef<[Region]>,
    O: AsRef<[f64]>,
{
    let sequence_lengths = trajectory_list
        .iter()
        .map(|t| t.as_ref().len())
        .collect::<Vec<_>>();
    estimate_eao_with_lengths(
        trajectory_list,
        overlap_ratios_list,
        &sequence_lengths,
        threshold,
    )
}

/// Estimates the expected average overlap when several trajectories share a video
///
/// Fragments are taken from every trajectory while the interval is estimated over
/// `sequence_lengths`, one length per video, so repeated runs do not sharpen the length density.
///
/// # Parameters
/// * `trajectory_list` - trajectories of every run of every video
/// * `overlap_ratios_list` - the parallel overlap sequences
/// * `sequence_lengths` - length of every evaluated video
/// * `threshold` - probability mass of the sequence length interval
///
pub fn estimate_eao_with_lengths<T, O>(
    trajectory_list: &[T],
    overlap_ratios_list: &[O],
    sequence_lengths: &[usize],
    threshold: f64,
) -> Result<EaoResult>
where
    T: AsRef<[Region]>,
    O: AsRef<[f64]>,
{
    if trajectory_list.is_empty() {
        return Err(Errors::EmptySequenceList.into());
    }
    if trajectory_list.len() != overlap_ratios_list.len() {
        return Err(Errors::MismatchedSequenceLength {
            index: 0,
            expected: trajectory_list.len(),
            found: overlap_ratios_list.len(),
        }
        .into());
    }

    let mut fragments = Vec::new();
    for (index, (trajectory, overlaps)) in trajectory_list
        .iter()
        .zip(overlap_ratios_list.iter())
        .enumerate()
    {
        let trajectory = trajectory.as_ref();
        let overlaps = overlaps.as_ref();
        if trajectory.len() != overlaps.len() {
            return Err(Errors::MismatchedSequenceLength {
                index,
                expected: trajectory.len(),
                found: overlaps.len(),
            }
            .into());
        }
        fragments.extend(split_fragments(trajectory, overlaps)?);
    }

    let interval = estimate_eao_interval(sequence_lengths, threshold)?;
    let longest = fragments.iter().map(Fragment::len).max().unwrap_or(0);
    let curve = compute_eao_curve(&fragments, longest.max(interval.high));

    let eao_measure = if sequence_lengths.iter().unique().count() > 1 {
        mean(&curve[interval.low - 1..interval.high])
    } else {
        warn!("All sequences have the same length, the EAO measure is unavailable");
        None
    };

    Ok(EaoResult {
        curve,
        interval,
        eao_measure,
        sequence_lengths: sequence_lengths.to_vec(),
    })
}
