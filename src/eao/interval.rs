use crate::eao::gmm::GaussianMixture;
use crate::Errors;
use anyhow::Result;
use itertools::Itertools;
use log::{debug, warn};
use nalgebra::DVector;

/// Default probability mass covered by the evaluation interval
pub const DEFAULT_EAO_THRESHOLD: f64 = 0.5;

/// Sequence length interval over which the EAO curve is averaged
///
/// All three values are sequence lengths in frames (1-based).
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EaoInterval {
    /// the most probable sequence length
    pub peak: usize,
    pub low: usize,
    pub high: usize,
}

/// Estimates the sequence length interval that holds `threshold` of the length density mass
///
/// The sequence length density is a kernel density estimate over the lengths, tabulated for
/// every length in `1..=max(lengths)`.
///
/// # Parameters
/// * `sequence_lengths` - length of every evaluated sequence
/// * `threshold` - probability mass in `(0, 1]`, [`DEFAULT_EAO_THRESHOLD`](DEFAULT_EAO_THRESHOLD) by convention
///
pub fn estimate_eao_interval(sequence_lengths: &[usize], threshold: f64) -> Result<EaoInterval> {
    if !(threshold > 0.0 && threshold <= 1.0) {
        return Err(Errors::InvalidConfiguration(format!(
            "EAO threshold must be within (0, 1], got {}",
            threshold
        ))
        .into());
    }

    let lengths = sequence_lengths
        .iter()
        .copied()
        .filter(|l| *l > 0)
        .collect::<Vec<_>>();
    let max_length = lengths
        .iter()
        .copied()
        .max()
        .ok_or(Errors::EmptyLengthSample)?;

    if lengths.iter().unique().count() == 1 {
        debug!(
            "All sequences have length {}, the interval collapses to it",
            max_length
        );
        return Ok(EaoInterval {
            peak: max_length,
            low: max_length,
            high: max_length,
        });
    }

    let samples = lengths.iter().map(|l| *l as f64).collect::<Vec<_>>();
    let support = (1..=max_length).map(|l| l as f64).collect::<Vec<_>>();

    let mut p = GaussianMixture::fit_kde(&samples)
        .map(|model| model.evaluate(&support))
        .unwrap_or_else(|| DVector::zeros(max_length));
    let mass = p.sum();
    if !(mass > 0.0 && mass.is_finite()) {
        warn!("Sequence length density is degenerate, falling back to length frequencies");
        p.fill(0.0);
        for l in &lengths {
            p[l - 1] += 1.0;
        }
        p /= lengths.len() as f64;
    } else {
        p /= mass;
    }

    let p = p.as_slice();
    let peak = first_argmax(p);
    let (low, high) = find_range(p, peak, threshold);

    debug!(
        "EAO interval: peak={}, low={}, high={}",
        peak + 1,
        low + 1,
        high + 1
    );

    Ok(EaoInterval {
        peak: peak + 1,
        low: low + 1,
        high: high + 1,
    })
}

/// Index of the first maximal element
///
fn first_argmax(p: &[f64]) -> usize {
    p.iter()
        .enumerate()
        .fold((0, f64::NEG_INFINITY), |(best, best_value), (i, v)| {
            if *v > best_value {
                (i, *v)
            } else {
                (best, best_value)
            }
        })
        .0
}

/// Grows the window `[low, high]` around `start` until it holds `density` of the mass
///
/// Each step extends the side whose next value is higher (ties extend the upper side); once a
/// side reaches the end of the support only the other side grows.
///
fn find_range(p: &[f64], start: usize, density: f64) -> (usize, usize) {
    let (mut low, mut high) = (start, start);
    let mut mass = p[start];

    while mass < density {
        let can_lower = low > 0;
        let can_raise = high + 1 < p.len();
        match (can_lower, can_raise) {
            (false, false) => break,
            (true, true) => {
                if p[low - 1] > p[high + 1] {
                    low -= 1;
                    mass += p[low];
                } else {
                    high += 1;
                    mass += p[high];
                }
            }
            (true, false) => {
                low -= 1;
                mass += p[low];
            }
            (false, true) => {
                high += 1;
                mass += p[high];
            }
        }
    }
    (low, high)
}
