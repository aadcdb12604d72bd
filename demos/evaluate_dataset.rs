use anyhow::Result;
use log::info;
use trkrutils::examples::{synthetic_dataset, DriftingTracker, GroundTruthTracker, NoisyTracker};
use trkrutils::prelude::*;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset = synthetic_dataset("synthetic", &[60, 80, 100, 120, 150], 42);
    let mut trackers: Vec<Box<dyn Tracker<BoundingBox>>> = vec![
        Box::new(GroundTruthTracker),
        Box::new(NoisyTracker::new(6.0, 7)),
        Box::new(DriftingTracker::new(1.5)),
    ];

    let opts = EvaluationOptionsBuilder::new()
        .metric_names(&["success_plot", "precision_plot", "ar_plot", "eao"])?
        .stochastic(3)
        .reset(ResetOptions::new(true, 0.0, 5))
        .build()?;

    let scores = evaluate(&mut trackers, &dataset, None, &opts)?;

    for score in &scores {
        info!("{:?} {}", score.kind(), score.target_name());
        for tracker in score.trackers() {
            let auc = score.success_plot(tracker).map(|r| r.auc);
            let precision = score.precision_plot(tracker).map(|r| r.precision_score);
            let ar = score
                .ar_plot(tracker)
                .map(|r| (r.accuracy(), r.reliability()));
            let eao = score.eao(tracker).and_then(|r| r.eao_measure);
            info!(
                "  {:<24} auc={:?} precision={:?} ar={:?} eao={:?}",
                tracker, auc, precision, ar, eao
            );
        }
    }
    Ok(())
}
