mod analysis;
mod chart;
mod data;
mod report;
mod stats;

use std::path::Path;

use anyhow::Result;

fn main() -> Result<()> {
    env_logger::init();

    let out_dir = Path::new(".");
    for experiment in [data::experiments::five_minute(), data::experiments::ten_minute()] {
        log::info!("analyzing {experiment}");
        let analysis = analysis::analyze(&experiment)?;

        let report_path = report::write_report(&analysis, out_dir)?;
        log::info!("wrote {}", report_path.display());

        let summary_path = report::write_group_summary(&analysis, out_dir)?;
        log::info!("wrote {}", summary_path.display());

        let chart_path = chart::render_chart(&analysis, out_dir)?;
        log::info!("wrote {}", chart_path.display());
    }

    Ok(())
}
