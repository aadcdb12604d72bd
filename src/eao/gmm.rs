// The bandwidth selection follows the Maggot kernel density estimator by Matej Kristan (2009)
// and Wand & Jones, "Kernel Smoothing", p. 101, restricted to one dimension.
//
use crate::Errors;
use anyhow::Result;
use nalgebra::DVector;
use rayon::prelude::*;
use std::f64::consts::PI;

/// log(2 * pi)
const LOG_2PI: f64 = 1.837_877_066_409_345_3;

/// One dimensional Gaussian mixture
///
#[derive(Debug, Clone, PartialEq)]
pub struct GaussianMixture {
    means: Vec<f64>,
    covariances: Vec<f64>,
    weights: Vec<f64>,
}

impl GaussianMixture {
    /// Constructor
    ///
    /// # Parameters
    /// * `means` - component centers
    /// * `covariances` - component variances, strictly positive for the mixture to be evaluated
    /// * `weights` - component weights
    ///
    pub fn new(means: Vec<f64>, covariances: Vec<f64>, weights: Vec<f64>) -> Result<Self> {
        for (index, found) in [covariances.len(), weights.len()].into_iter().enumerate() {
            if found != means.len() {
                return Err(Errors::MismatchedSequenceLength {
                    index: index + 1,
                    expected: means.len(),
                    found,
                }
                .into());
            }
        }
        Ok(Self {
            means,
            covariances,
            weights,
        })
    }

    /// Fits an adaptive kernel density over the samples
    ///
    /// Every sample becomes an equally weighted component. The mixture is spherized, the AMISE
    /// optimal bandwidth is solved in the spherized space and mapped back, and the bandwidth is
    /// applied to every component.
    ///
    /// Returns `None` when the samples have no spread (a single distinct value), because the
    /// bandwidth degenerates to zero.
    ///
    pub fn fit_kde(samples: &[f64]) -> Option<Self> {
        let n = samples.len();
        if n == 0 || samples.iter().all(|s| *s == samples[0]) {
            return None;
        }
        let weights = vec![1.0 / n as f64; n];
        let covariances = vec![0.0; n];

        let (mean, covariance) = spherize(samples, &covariances, &weights);
        if covariance.is_nan() || covariance <= 0.0 {
            return None;
        }

        let transform = 1.0 / covariance.sqrt();
        let spherized_means = samples
            .iter()
            .map(|m| transform * (m - mean))
            .collect::<Vec<_>>();
        let spherized_covariances = covariances
            .iter()
            .map(|c| transform * c * transform)
            .collect::<Vec<_>>();
        let spherized_covariance = transform * covariance * transform;

        let h = optimal_bandwidth(
            &spherized_means,
            &spherized_covariances,
            &weights,
            spherized_covariance,
            n as f64,
        );

        let inverse_transform = 1.0 / transform;
        let bandwidth = inverse_transform * h * inverse_transform;
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return None;
        }

        Some(Self {
            means: samples.to_vec(),
            covariances: vec![bandwidth; n],
            weights,
        })
    }

    pub fn means(&self) -> &[f64] {
        &self.means
    }

    pub fn covariances(&self) -> &[f64] {
        &self.covariances
    }

    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Evaluates the mixture density at the points
    ///
    pub fn evaluate(&self, points: &[f64]) -> DVector<f64> {
        let x = DVector::from_column_slice(points);
        let mut p = DVector::<f64>::zeros(points.len());

        for ((mean, covariance), weight) in self
            .means
            .iter()
            .zip(self.covariances.iter())
            .zip(self.weights.iter())
        {
            let inverse_sd = 1.0 / covariance.sqrt();
            let log_constant = inverse_sd.ln() - 0.5 * LOG_2PI;
            let dx = x.add_scalar(-mean) * inverse_sd;
            p += dx.map(|d| (log_constant - 0.5 * d * d).exp()) * *weight;
        }
        p
    }
}

/// Weighted mean and variance of the whole mixture
///
pub fn spherize(means: &[f64], covariances: &[f64], weights: &[f64]) -> (f64, f64) {
    if weights.len() == 1 {
        return (means[0], covariances.first().copied().unwrap_or(0.0));
    }

    let sum_weights: f64 = weights.iter().sum();
    let normalized = weights.iter().map(|w| w / sum_weights).collect::<Vec<_>>();

    let mean = means
        .iter()
        .zip(normalized.iter())
        .map(|(m, w)| m * w)
        .sum::<f64>();

    let second_moment = means
        .iter()
        .zip(covariances.iter())
        .zip(normalized.iter())
        .map(|((m, c), w)| w * (c + m * m))
        .sum::<f64>();

    (mean, second_moment - mean * mean)
}

/// AMISE optimal bandwidth for a (spherized) mixture
///
/// # Parameters
/// * `means`, `covariances`, `weights` - the mixture
/// * `sample_covariance` - covariance of the whole sample
/// * `n_eff` - effective number of samples
///
pub fn optimal_bandwidth(
    means: &[f64],
    covariances: &[f64],
    weights: &[f64],
    sample_covariance: f64,
    n_eff: f64,
) -> f64 {
    let d = 1.0;
    let g = sample_covariance * (4.0 / ((d + 2.0) * n_eff)).powf(2.0 / (d + 4.0));

    let f = sample_covariance;
    let rf2 = integral_squared_hessian(means, weights, covariances, f, g);

    let h_amise = (n_eff.powi(-1) * f.powf(-0.5) / ((4.0 * PI).sqrt().powf(d) * rf2 * d))
        .powf(1.0 / (d + 4.0));
    (f * h_amise).powi(2)
}

/// Integral of the squared Hessian of a Gaussian mixture, assuming the bandwidth `H = h * F`
///
/// The pilot bandwidth `g` is added to the first component of each pair when `f` is the
/// identity, otherwise to the second one.
///
pub fn integral_squared_hessian(
    means: &[f64],
    weights: &[f64],
    covariances: &[f64],
    f: f64,
    g: f64,
) -> f64 {
    let n = means.len();
    if n == 0 {
        return f64::NAN;
    }

    let const_norm = (1.0 / (2.0 * PI)).sqrt();
    let f_is_identity = (f - 1.0).abs() < 0.001;

    (0..n)
        .into_par_iter()
        .map(|l1| {
            (l1..n)
                .map(|l2| {
                    let dm = means[l1] - means[l2];
                    let eta = if l1 == l2 { 1.0 } else { 2.0 };
                    let term = if f_is_identity {
                        let a = 1.0 / (covariances[l1] + g + covariances[l2]);
                        let m = dm * a * dm;
                        let f_t = const_norm * a.sqrt() * (-0.5 * m).exp();
                        let c = 2.0 * a * a * (1.0 - 2.0 * m) + (1.0 - m).powi(2) * a * a;
                        f_t * c
                    } else {
                        let a = 1.0 / (covariances[l1] + covariances[l2] + g);
                        let ds = dm * a;
                        let b = ds * ds;
                        let big_b = a - 2.0 * b;
                        let big_c = a - b;
                        let f_t = const_norm * a.sqrt() * (-0.5 * ds * dm).exp();
                        let c = 2.0 * f * a * f * big_b + (f * big_c).powi(2);
                        f_t * c
                    };
                    term * weights[l1] * weights[l2] * eta
                })
                .sum::<f64>()
        })
        .sum()
}
