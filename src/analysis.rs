use anyhow::{Context, Result};

use crate::data::model::{Experiment, GroupSummary};
use crate::stats::{self, AnovaResult, LinearFit};

// ---------------------------------------------------------------------------
// ExperimentAnalysis – everything derived from one experiment
// ---------------------------------------------------------------------------

/// Full analysis of a single experiment: per-group summaries, the one-way
/// ANOVA over the raw replicates, and the linear trend over
/// (concentration, group mean) pairs.
#[derive(Debug, Clone)]
pub struct ExperimentAnalysis {
    pub time_label: String,
    pub file_stem: String,
    /// One summary per group, ascending concentration.
    pub summaries: Vec<GroupSummary>,
    pub anova: AnovaResult,
    pub fit: LinearFit,
}

/// Run the complete analysis for one experiment.
pub fn analyze(experiment: &Experiment) -> Result<ExperimentAnalysis> {
    let mut summaries = Vec::with_capacity(experiment.len());
    for (&concentration, replicates) in &experiment.groups {
        let mean_volume = stats::mean(replicates)
            .with_context(|| format!("mean of group {concentration}"))?;
        let std_dev = stats::sample_std(replicates)
            .with_context(|| format!("std of group {concentration}"))?;
        summaries.push(GroupSummary {
            concentration,
            replicates: replicates.len(),
            mean_volume,
            std_dev,
        });
    }

    let groups: Vec<Vec<f64>> = experiment.groups.values().cloned().collect();
    let anova = stats::one_way_anova(&groups)
        .with_context(|| format!("one-way ANOVA for {experiment}"))?;

    let xs: Vec<f64> = summaries.iter().map(|s| s.concentration as f64).collect();
    let ys: Vec<f64> = summaries.iter().map(|s| s.mean_volume).collect();
    let fit = stats::linear_fit(&xs, &ys)
        .with_context(|| format!("trendline fit for {experiment}"))?;

    Ok(ExperimentAnalysis {
        time_label: experiment.time_label.clone(),
        file_stem: experiment.file_stem.clone(),
        summaries,
        anova,
        fit,
    })
}
