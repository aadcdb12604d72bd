use crate::estimator::compute_per_frame_values;
use anyhow::Result;
use itertools::Itertools;

/// Success plot: the fraction of frames whose overlap exceeds a threshold, for thresholds in `[0, 1]`
///
#[derive(Debug, Clone, PartialEq)]
pub struct SuccessPlotResult {
    /// `0.0`, every distinct per-frame ratio in `(0, 1)`, and `1.0`
    pub thresholds: Vec<f64>,
    /// success rate at the parallel threshold
    pub success_rates: Vec<f64>,
    /// trapezoidal area under the success curve
    pub auc: f64,
    /// frame-averaged overlap ratios the plot is built from
    pub per_frame_ratios: Vec<f64>,
}

impl SuccessPlotResult {
    /// Builds the plot from already aggregated per-frame ratios
    ///
    pub fn from_per_frame(per_frame_ratios: Vec<f64>) -> Self {
        let total = per_frame_ratios.len();
        let rate = |greater: usize| {
            if total == 0 {
                0.0
            } else {
                greater as f64 / total as f64
            }
        };
        let greater_than = |t: f64| per_frame_ratios.iter().filter(|r| **r > t).count();

        let mut thresholds = vec![0.0];
        let mut success_rates = vec![rate(greater_than(0.0))];

        let mut consumed = 0;
        for (count, ratio) in per_frame_ratios
            .iter()
            .copied()
            .sorted_by(|a, b| a.total_cmp(b))
            .dedup_with_count()
        {
            consumed += count;
            if ratio > 0.0 && ratio < 1.0 {
                thresholds.push(ratio);
                success_rates.push(rate(total - consumed));
            }
        }

        // explicit terminal point, keeps the curve closed when only one threshold was recorded
        thresholds.push(1.0);
        success_rates.push(rate(greater_than(1.0)));

        let auc: f64 = thresholds
            .iter()
            .zip(success_rates.iter())
            .tuple_windows()
            .map(|((t0, r0), (t1, r1))| (t1 - t0) * (r0 + r1) / 2.0)
            .sum();

        Self {
            thresholds,
            success_rates,
            auc,
            per_frame_ratios,
        }
    }
}

/// Estimates the success plot over overlap ratio sequences
///
/// # Parameters
/// * `overlap_ratios_list` - parallel-indexed overlap sequences (one per repetition), NaN where no estimate exists
///
pub fn estimate_success_plot<T>(overlap_ratios_list: &[T]) -> Result<SuccessPlotResult>
where
    T: AsRef<[f64]>,
{
    Ok(SuccessPlotResult::from_per_frame(
        compute_per_frame_values(overlap_ratios_list)?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::estimator::success_plot::{estimate_success_plot, SuccessPlotResult};
    use crate::EPS;
    use itertools::Itertools;
    use rand::Rng;

    fn assert_all_close(l: &[f64], r: &[f64]) {
        assert_eq!(l.len(), r.len(), "{:?} != {:?}", l, r);
        for (a, b) in l.iter().zip(r) {
            assert!((a - b).abs() < EPS, "{:?} != {:?}", l, r);
        }
    }

    #[test]
    fn step_down_fixture() {
        let res = SuccessPlotResult::from_per_frame(vec![0.2, 0.5, 0.5, 0.9]);
        assert_all_close(&res.thresholds, &[0.0, 0.2, 0.5, 0.9, 1.0]);
        assert_all_close(&res.success_rates, &[1.0, 0.75, 0.25, 0.0, 0.0]);
        assert!((res.auc - 0.375).abs() < EPS);
    }

    #[test]
    fn single_distinct_ratio() {
        let res = SuccessPlotResult::from_per_frame(vec![0.5, 0.5, 0.5]);
        assert_all_close(&res.thresholds, &[0.0, 0.5, 1.0]);
        assert_all_close(&res.success_rates, &[1.0, 0.0, 0.0]);
        assert!((res.auc - 0.25).abs() < EPS);

        let res = SuccessPlotResult::from_per_frame(vec![0.0, 0.0]);
        assert_all_close(&res.thresholds, &[0.0, 1.0]);
        assert_all_close(&res.success_rates, &[0.0, 0.0]);
        assert_eq!(res.auc, 0.0);

        let res = SuccessPlotResult::from_per_frame(vec![1.0, 1.0]);
        assert_all_close(&res.thresholds, &[0.0, 1.0]);
        assert_all_close(&res.success_rates, &[1.0, 0.0]);
    }

    #[test]
    fn empty_input() {
        let res = SuccessPlotResult::from_per_frame(vec![]);
        assert_all_close(&res.thresholds, &[0.0, 1.0]);
        assert_all_close(&res.success_rates, &[0.0, 0.0]);
        assert_eq!(res.auc, 0.0);
    }

    #[test]
    fn aggregates_repetitions() {
        let nan = f64::NAN;
        let res =
            estimate_success_plot(&[vec![nan, 0.2, 0.4, nan], vec![nan, 0.4, 0.6, nan]]).unwrap();
        assert_all_close(&res.per_frame_ratios, &[0.3, 0.5]);
        assert_all_close(&res.thresholds, &[0.0, 0.3, 0.5, 1.0]);
        assert_all_close(&res.success_rates, &[1.0, 0.5, 0.0, 0.0]);
    }

    #[test]
    fn monotone_and_bounded() {
        let mut rng = rand::thread_rng();
        for _ in 0..20 {
            let ratios = (0..200).map(|_| rng.gen_range(0.0..1.0)).collect::<Vec<f64>>();
            let res = SuccessPlotResult::from_per_frame(ratios);
            assert_eq!(res.thresholds.len(), res.success_rates.len());
            assert_eq!(res.thresholds[0], 0.0);
            assert_eq!(*res.thresholds.last().unwrap(), 1.0);
            assert!((res.success_rates[0] - 1.0).abs() < 0.01);
            assert_eq!(*res.success_rates.last().unwrap(), 0.0);
            for ((t0, r0), (t1, r1)) in res
                .thresholds
                .iter()
                .zip(res.success_rates.iter())
                .tuple_windows()
            {
                assert!(t1 > t0);
                assert!(r1 <= r0);
            }
            assert!((0.0..=1.0).contains(&res.auc));
        }
    }
}
