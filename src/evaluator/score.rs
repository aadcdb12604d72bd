use crate::eao::EaoResult;
use crate::estimator::ar_plot::ArPlotResult;
use crate::estimator::precision_plot::PrecisionPlotResult;
use crate::estimator::success_plot::SuccessPlotResult;
use crate::evaluator::metric::{Metric, MetricValue};
use std::collections::BTreeMap;

/// What a score was computed over
///
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    Video,
    /// aggregate over every video of a dataset
    Dataset,
}

/// Frozen table of metric results: metric -> tracker name -> result
///
#[derive(Debug, Clone, PartialEq)]
pub struct Score {
    target_name: String,
    kind: TargetKind,
    results: BTreeMap<Metric, BTreeMap<String, MetricValue>>,
}

impl Score {
    pub fn target_name(&self) -> &str {
        &self.target_name
    }

    pub fn kind(&self) -> TargetKind {
        self.kind
    }

    pub fn get(&self, tracker_name: &str, metric: Metric) -> Option<&MetricValue> {
        self.results.get(&metric)?.get(tracker_name)
    }

    /// Results of every tracker for the metric
    ///
    pub fn metric_results(&self, metric: Metric) -> Option<&BTreeMap<String, MetricValue>> {
        self.results.get(&metric)
    }

    pub fn metrics(&self) -> Vec<Metric> {
        self.results.keys().copied().collect()
    }

    /// Names of the trackers with at least one result, sorted
    ///
    pub fn trackers(&self) -> Vec<&str> {
        let mut names = self
            .results
            .values()
            .flat_map(|r| r.keys().map(String::as_str))
            .collect::<Vec<_>>();
        names.sort_unstable();
        names.dedup();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn success_plot(&self, tracker_name: &str) -> Option<&SuccessPlotResult> {
        self.get(tracker_name, Metric::SuccessPlot)?
            .as_success_plot()
    }

    pub fn precision_plot(&self, tracker_name: &str) -> Option<&PrecisionPlotResult> {
        self.get(tracker_name, Metric::PrecisionPlot)?
            .as_precision_plot()
    }

    pub fn ar_plot(&self, tracker_name: &str) -> Option<&ArPlotResult> {
        self.get(tracker_name, Metric::ArPlot)?.as_ar_plot()
    }

    pub fn eao(&self, tracker_name: &str) -> Option<&EaoResult> {
        self.get(tracker_name, Metric::Eao)?.as_eao()
    }
}

/// Collects the results of one evaluation target and freezes them into a [`Score`](Score)
///
#[derive(Debug, Clone)]
pub struct ScoreBuilder {
    target_name: String,
    kind: TargetKind,
    results: BTreeMap<Metric, BTreeMap<String, MetricValue>>,
}

impl ScoreBuilder {
    pub fn new(target_name: &str, kind: TargetKind) -> Self {
        Self {
            target_name: target_name.to_string(),
            kind,
            results: BTreeMap::default(),
        }
    }

    /// Stores the result under its metric, returning the result it replaced
    ///
    pub fn insert(&mut self, tracker_name: &str, value: MetricValue) -> Option<MetricValue> {
        self.results
            .entry(value.metric())
            .or_default()
            .insert(tracker_name.to_string(), value)
    }

    pub fn build(self) -> Score {
        Score {
            target_name: self.target_name,
            kind: self.kind,
            results: self.results,
        }
    }
}
