use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

// ---------------------------------------------------------------------------
// Experiment – one fermentation run (a fixed set of treatment groups)
// ---------------------------------------------------------------------------

/// A fermentation experiment: CO2 volume (cm³) measured for several
/// replicates at each NaCl concentration level.
///
/// The group map is ordered by concentration so analysis and plotting see
/// the levels in ascending order. Data is fixed at construction and never
/// mutated.
#[derive(Debug, Clone)]
pub struct Experiment {
    /// Human-readable measurement time, e.g. `"5 Minutes"`.
    pub time_label: String,
    /// Stem used to name output artefacts, e.g. `"yeast_fermentation_5min"`.
    pub file_stem: String,
    /// NaCl concentration (%, w/v) → replicate CO2 volumes (cm³).
    pub groups: BTreeMap<u32, Vec<f64>>,
}

impl Experiment {
    /// Build an experiment from (concentration, replicates) pairs.
    pub fn new<L, S>(
        time_label: L,
        file_stem: S,
        groups: impl IntoIterator<Item = (u32, Vec<f64>)>,
    ) -> Self
    where
        L: Into<String>,
        S: Into<String>,
    {
        Experiment {
            time_label: time_label.into(),
            file_stem: file_stem.into(),
            groups: groups.into_iter().collect(),
        }
    }

    /// Concentration levels in ascending order.
    pub fn levels(&self) -> Vec<u32> {
        self.groups.keys().copied().collect()
    }

    /// Number of treatment groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether the experiment has no groups.
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

impl fmt::Display for Experiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} groups)", self.time_label, self.groups.len())
    }
}

// ---------------------------------------------------------------------------
// GroupSummary – derived per-group descriptive statistics
// ---------------------------------------------------------------------------

/// Descriptive statistics for a single treatment group.
///
/// Serialized as one row of the `group_summary_*.csv` export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    /// NaCl concentration (%, w/v).
    pub concentration: u32,
    /// Number of replicate measurements.
    pub replicates: usize,
    /// Arithmetic mean CO2 volume (cm³).
    pub mean_volume: f64,
    /// Sample standard deviation (divisor N − 1).
    pub std_dev: f64,
}
