use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::analysis::ExperimentAnalysis;

// ---------------------------------------------------------------------------
// Text report
// ---------------------------------------------------------------------------

const SIGNIFICANT: &str = "Significant difference between groups (Reject H0)";
const NOT_SIGNIFICANT: &str = "No significant difference (Fail to reject H0)";

/// Render the fixed-format ANOVA report.
///
/// The format is stable across runs: title line, F-statistic with four
/// decimals, p-value in scientific notation with four mantissa decimals,
/// and the significance classification.
pub fn render_report(analysis: &ExperimentAnalysis) -> String {
    let meaning = if analysis.anova.is_significant() {
        SIGNIFICANT
    } else {
        NOT_SIGNIFICANT
    };
    format!(
        "--- ANOVA Results for {} ---\n\
         F-statistic: {:.4}\n\
         P-value: {:.4e}\n\
         Meaning: {}\n",
        analysis.time_label, analysis.anova.f_statistic, analysis.anova.p_value, meaning
    )
}

/// Write `anova_results_<stem>.txt` into `out_dir`, overwriting silently.
pub fn write_report(analysis: &ExperimentAnalysis, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("anova_results_{}.txt", analysis.file_stem));
    fs::write(&path, render_report(analysis))
        .with_context(|| format!("writing report to {}", path.display()))?;
    Ok(path)
}

// ---------------------------------------------------------------------------
// Group summary export
// ---------------------------------------------------------------------------

/// Write `group_summary_<stem>.csv` into `out_dir`: one row per treatment
/// group (ascending concentration) with replicate count, mean and sample
/// standard deviation.
pub fn write_group_summary(analysis: &ExperimentAnalysis, out_dir: &Path) -> Result<PathBuf> {
    let path = out_dir.join(format!("group_summary_{}.csv", analysis.file_stem));
    let mut writer = csv::Writer::from_path(&path)
        .with_context(|| format!("opening {}", path.display()))?;
    for summary in &analysis.summaries {
        writer
            .serialize(summary)
            .with_context(|| format!("serializing group {}", summary.concentration))?;
    }
    writer
        .flush()
        .with_context(|| format!("flushing {}", path.display()))?;
    Ok(path)
}
