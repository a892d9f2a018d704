use super::model::Experiment;

// ---------------------------------------------------------------------------
// Built-in datasets
// ---------------------------------------------------------------------------
//
// Volume of CO2 (cm³) produced by baker's yeast at five NaCl concentrations
// (%, w/v), five replicates per level, read off after 5 and 10 minutes.

/// CO2 volumes after 5 minutes of fermentation.
pub fn five_minute() -> Experiment {
    Experiment::new(
        "5 Minutes",
        "yeast_fermentation_5min",
        [
            (0, vec![4.0, 3.9, 4.3, 4.1, 4.2]),
            (1, vec![3.2, 3.0, 3.8, 2.9, 3.1]),
            (2, vec![2.4, 2.7, 2.4, 2.1, 2.2]),
            (3, vec![1.6, 1.6, 1.4, 1.8, 1.4]),
            (4, vec![1.0, 0.8, 1.2, 0.8, 1.0]),
        ],
    )
}

/// CO2 volumes after 10 minutes of fermentation.
pub fn ten_minute() -> Experiment {
    Experiment::new(
        "10 Minutes",
        "yeast_fermentation_10min",
        [
            (0, vec![32.0, 30.5, 34.2, 32.7, 33.4]),
            (1, vec![24.0, 23.8, 25.2, 23.4, 24.1]),
            (2, vec![17.0, 17.6, 16.8, 16.3, 16.4]),
            (3, vec![10.5, 11.0, 9.8, 11.1, 10.2]),
            (4, vec![6.5, 6.4, 6.5, 6.1, 6.7]),
        ],
    )
}
