/// Data layer: domain model and the built-in measurements.
///
/// Architecture:
/// ```text
///   ┌─────────────┐
///   │ experiments  │  built-in 5-min / 10-min datasets
///   └─────────────┘
///          │
///          ▼
///   ┌─────────────┐
///   │  Experiment  │  concentration → replicate CO2 volumes
///   └─────────────┘
///          │
///          ▼
///   ┌─────────────┐
///   │ GroupSummary │  derived mean / std per group
///   └─────────────┘
/// ```

pub mod experiments;
pub mod model;
