use crate::eao::EaoResult;
use crate::estimator::ar_plot::ArPlotResult;
use crate::estimator::precision_plot::PrecisionPlotResult;
use crate::estimator::success_plot::SuccessPlotResult;
use crate::Errors;
use std::fmt;
use std::str::FromStr;

/// Supported benchmark metrics
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Metric {
    SuccessPlot,
    PrecisionPlot,
    ArPlot,
    Eao,
}

impl Metric {
    pub fn name(&self) -> &'static str {
        match self {
            Metric::SuccessPlot => "success_plot",
            Metric::PrecisionPlot => "precision_plot",
            Metric::ArPlot => "ar_plot",
            Metric::Eao => "eao",
        }
    }

    pub fn all() -> [Metric; 4] {
        [
            Metric::SuccessPlot,
            Metric::PrecisionPlot,
            Metric::ArPlot,
            Metric::Eao,
        ]
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Metric {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Metric::all()
            .into_iter()
            .find(|m| m.name() == s)
            .ok_or_else(|| Errors::UnsupportedMetric(s.to_string()).into())
    }
}

/// Result of one metric for one tracker
///
#[derive(Debug, Clone, PartialEq)]
pub enum MetricValue {
    SuccessPlot(SuccessPlotResult),
    PrecisionPlot(PrecisionPlotResult),
    ArPlot(ArPlotResult),
    Eao(EaoResult),
}

impl MetricValue {
    pub fn metric(&self) -> Metric {
        match self {
            MetricValue::SuccessPlot(_) => Metric::SuccessPlot,
            MetricValue::PrecisionPlot(_) => Metric::PrecisionPlot,
            MetricValue::ArPlot(_) => Metric::ArPlot,
            MetricValue::Eao(_) => Metric::Eao,
        }
    }

    pub fn as_success_plot(&self) -> Option<&SuccessPlotResult> {
        match self {
            MetricValue::SuccessPlot(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_precision_plot(&self) -> Option<&PrecisionPlotResult> {
        match self {
            MetricValue::PrecisionPlot(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_ar_plot(&self) -> Option<&ArPlotResult> {
        match self {
            MetricValue::ArPlot(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_eao(&self) -> Option<&EaoResult> {
        match self {
            MetricValue::Eao(v) => Some(v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::estimator::success_plot::SuccessPlotResult;
    use crate::evaluator::metric::{Metric, MetricValue};
    use crate::Errors;

    #[test]
    fn names() {
        for m in Metric::all() {
            assert_eq!(m.name().parse::<Metric>().unwrap(), m);
            assert_eq!(m.to_string(), m.name());
        }
        let err = "mota".parse::<Metric>().unwrap_err();
        assert_eq!(
            err.downcast_ref::<Errors>(),
            Some(&Errors::UnsupportedMetric("mota".to_string()))
        );
    }

    #[test]
    fn value_kind() {
        let v = MetricValue::SuccessPlot(SuccessPlotResult::from_per_frame(vec![0.5]));
        assert_eq!(v.metric(), Metric::SuccessPlot);
        assert!(v.as_success_plot().is_some());
        assert!(v.as_ar_plot().is_none());
        assert!(v.as_precision_plot().is_none());
        assert!(v.as_eao().is_none());
    }
}
