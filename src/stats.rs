use thiserror::Error;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Degenerate-input conditions the statistics routines refuse to work on.
#[derive(Debug, Error, PartialEq)]
pub enum StatsError {
    #[error("cannot compute statistics over an empty group")]
    EmptyGroup,

    #[error("need at least {needed} replicates, got {got}")]
    NotEnoughReplicates { needed: usize, got: usize },

    #[error("one-way ANOVA needs at least two groups")]
    NotEnoughGroups,

    #[error("encountered a non-finite measurement")]
    NonFiniteValue,

    #[error("x and y must have equal length, got {x_len} and {y_len}")]
    LengthMismatch { x_len: usize, y_len: usize },

    #[error("linear fit needs at least two distinct x values")]
    DegenerateFit,
}

/// Fixed significance threshold for the ANOVA classification.
pub const SIGNIFICANCE_LEVEL: f64 = 0.05;

/// Sums of squares below this are treated as zero variance.
const VARIANCE_EPS: f64 = 1e-12;

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Arithmetic mean.
pub fn mean(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyGroup);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

/// Sample standard deviation (divisor N − 1).
///
/// Undefined for fewer than two replicates.
pub fn sample_std(values: &[f64]) -> Result<f64, StatsError> {
    if values.len() < 2 {
        return Err(StatsError::NotEnoughReplicates {
            needed: 2,
            got: values.len(),
        });
    }
    let m = mean(values)?;
    let ss: f64 = values.iter().map(|v| (v - m).powi(2)).sum();
    Ok((ss / (values.len() - 1) as f64).sqrt())
}

// ---------------------------------------------------------------------------
// One-way ANOVA
// ---------------------------------------------------------------------------

/// Outcome of a one-way ANOVA F-test.
#[derive(Debug, Clone, PartialEq)]
pub struct AnovaResult {
    pub f_statistic: f64,
    /// Probability of an F at least this large under equal group means.
    pub p_value: f64,
}

impl AnovaResult {
    /// Whether the group means differ at the fixed 0.05 level.
    pub fn is_significant(&self) -> bool {
        self.p_value < SIGNIFICANCE_LEVEL
    }
}

/// One-way ANOVA F-test across `groups`.
///
/// Requires at least two groups, each with at least one finite value.
/// When every measurement is identical there is no variance to partition;
/// that case reports `F = 0, p = 1` instead of dividing by zero. Zero
/// within-group variance with distinct group means reports `F = ∞, p = 0`.
pub fn one_way_anova(groups: &[Vec<f64>]) -> Result<AnovaResult, StatsError> {
    if groups.len() < 2 {
        return Err(StatsError::NotEnoughGroups);
    }
    for g in groups {
        if g.is_empty() {
            return Err(StatsError::EmptyGroup);
        }
        if g.iter().any(|v| !v.is_finite()) {
            return Err(StatsError::NonFiniteValue);
        }
    }

    let n_total: usize = groups.iter().map(Vec::len).sum();
    let grand_mean = groups.iter().flatten().sum::<f64>() / n_total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for g in groups {
        let m = mean(g)?;
        ss_between += g.len() as f64 * (m - grand_mean).powi(2);
        ss_within += g.iter().map(|v| (v - m).powi(2)).sum::<f64>();
    }

    if ss_within <= VARIANCE_EPS {
        return Ok(if ss_between <= VARIANCE_EPS {
            AnovaResult {
                f_statistic: 0.0,
                p_value: 1.0,
            }
        } else {
            AnovaResult {
                f_statistic: f64::INFINITY,
                p_value: 0.0,
            }
        });
    }

    let df_between = (groups.len() - 1) as f64;
    let df_within = (n_total - groups.len()) as f64;
    let f = (ss_between / df_between) / (ss_within / df_within);

    Ok(AnovaResult {
        f_statistic: f,
        p_value: f_survival(f, df_between, df_within),
    })
}

// ---------------------------------------------------------------------------
// Linear fit
// ---------------------------------------------------------------------------

/// Least-squares degree-1 polynomial with its coefficient of determination.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
    /// Squared Pearson correlation of x and y.
    pub r_squared: f64,
}

impl LinearFit {
    /// Evaluate the fitted line at `x`.
    pub fn value_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Fit `y = slope·x + intercept` by least squares.
pub fn linear_fit(xs: &[f64], ys: &[f64]) -> Result<LinearFit, StatsError> {
    if xs.len() != ys.len() {
        return Err(StatsError::LengthMismatch {
            x_len: xs.len(),
            y_len: ys.len(),
        });
    }
    if xs.len() < 2 {
        return Err(StatsError::NotEnoughReplicates {
            needed: 2,
            got: xs.len(),
        });
    }

    let mx = mean(xs)?;
    let my = mean(ys)?;

    let mut sxx = 0.0;
    let mut syy = 0.0;
    let mut sxy = 0.0;
    for (x, y) in xs.iter().zip(ys) {
        sxx += (x - mx).powi(2);
        syy += (y - my).powi(2);
        sxy += (x - mx) * (y - my);
    }
    if sxx <= VARIANCE_EPS {
        return Err(StatsError::DegenerateFit);
    }

    let slope = sxy / sxx;
    // A flat response is a perfectly predicted constant; report R² = 1
    // rather than 0/0.
    let r_squared = if syy <= VARIANCE_EPS {
        1.0
    } else {
        (sxy * sxy) / (sxx * syy)
    };

    Ok(LinearFit {
        slope,
        intercept: my - slope * mx,
        r_squared,
    })
}

// ---------------------------------------------------------------------------
// F-distribution survival function
// ---------------------------------------------------------------------------
//
// P(F ≥ f) for F(d1, d2), via the regularized incomplete beta function:
//     sf(f) = I_{d2 / (d2 + d1·f)}(d2/2, d1/2)
// Continued-fraction evaluation after Lentz; log-gamma after Lanczos.

/// Upper tail probability of the F(d1, d2) distribution at `f`.
fn f_survival(f: f64, d1: f64, d2: f64) -> f64 {
    if f <= 0.0 {
        return 1.0;
    }
    let x = d2 / (d2 + d1 * f);
    incomplete_beta(d2 / 2.0, d1 / 2.0, x)
}

/// Regularized incomplete beta function `I_x(a, b)` for `a, b > 0`.
fn incomplete_beta(a: f64, b: f64, x: f64) -> f64 {
    if x <= 0.0 {
        return 0.0;
    }
    if x >= 1.0 {
        return 1.0;
    }
    let ln_front =
        ln_gamma(a + b) - ln_gamma(a) - ln_gamma(b) + a * x.ln() + b * (1.0 - x).ln();
    let front = ln_front.exp();

    // Use the continued fraction directly where it converges fastest and
    // the symmetry relation elsewhere.
    if x < (a + 1.0) / (a + b + 2.0) {
        front * beta_cf(a, b, x) / a
    } else {
        1.0 - front * beta_cf(b, a, 1.0 - x) / b
    }
}

/// Continued fraction for the incomplete beta (modified Lentz method).
fn beta_cf(a: f64, b: f64, x: f64) -> f64 {
    const MAX_ITER: usize = 200;
    const EPS: f64 = 3e-14;
    const FPMIN: f64 = 1e-300;

    let qab = a + b;
    let qap = a + 1.0;
    let qam = a - 1.0;

    let mut c = 1.0;
    let mut d = 1.0 - qab * x / qap;
    if d.abs() < FPMIN {
        d = FPMIN;
    }
    d = 1.0 / d;
    let mut h = d;

    for m in 1..=MAX_ITER {
        let m = m as f64;
        let m2 = 2.0 * m;

        let aa = m * (b - m) * x / ((qam + m2) * (a + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        h *= d * c;

        let aa = -(a + m) * (qab + m) * x / ((a + m2) * (qap + m2));
        d = 1.0 + aa * d;
        if d.abs() < FPMIN {
            d = FPMIN;
        }
        c = 1.0 + aa / c;
        if c.abs() < FPMIN {
            c = FPMIN;
        }
        d = 1.0 / d;
        let delta = d * c;
        h *= delta;

        if (delta - 1.0).abs() < EPS {
            break;
        }
    }
    h
}

/// Natural log of the gamma function (Lanczos approximation, g = 7).
fn ln_gamma(z: f64) -> f64 {
    const COEFFS: [f64; 9] = [
        0.999_999_999_999_809_93,
        676.520_368_121_885_1,
        -1_259.139_216_722_402_8,
        771.323_428_777_653_13,
        -176.615_029_162_140_59,
        12.507_343_278_686_905,
        -0.138_571_095_265_720_12,
        9.984_369_578_019_572e-6,
        1.505_632_735_149_311_6e-7,
    ];

    if z < 0.5 {
        // Reflection formula keeps the series in its accurate range.
        return (std::f64::consts::PI / (std::f64::consts::PI * z).sin()).ln()
            - ln_gamma(1.0 - z);
    }

    let z = z - 1.0;
    let mut x = COEFFS[0];
    for (i, c) in COEFFS.iter().enumerate().skip(1) {
        x += c / (z + i as f64);
    }
    let t = z + 7.5;
    0.5 * (2.0 * std::f64::consts::PI).ln() + (z + 0.5) * t.ln() - t + x.ln()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() < tol
    }

    #[test]
    fn mean_basic() {
        assert_eq!(mean(&[2.0, 4.0, 6.0]).unwrap(), 4.0);
    }

    #[test]
    fn mean_rejects_empty() {
        assert_eq!(mean(&[]), Err(StatsError::EmptyGroup));
    }

    #[test]
    fn sample_std_uses_n_minus_one() {
        // mean 5, squared deviations sum 20, divisor 3
        let s = sample_std(&[2.0, 4.0, 6.0, 8.0]).unwrap();
        assert!(close(s, 2.581_988_897_471_611, 1e-12));
    }

    #[test]
    fn sample_std_rejects_single_value() {
        assert_eq!(
            sample_std(&[1.0]),
            Err(StatsError::NotEnoughReplicates { needed: 2, got: 1 })
        );
    }

    #[test]
    fn ln_gamma_reference_values() {
        assert!(close(ln_gamma(1.0), 0.0, 1e-12));
        assert!(close(ln_gamma(0.5), 0.572_364_942_924_700_4, 1e-12));
        assert!(close(ln_gamma(5.0), 24.0_f64.ln(), 1e-12));
        assert!(close(ln_gamma(12.5), 18.734_347_511_936_45, 1e-10));
    }

    #[test]
    fn incomplete_beta_reference_values() {
        // I_0.4(2, 3) = 0.5248 exactly; I_0.8(5, 2) = 0.65536 exactly
        assert!(close(incomplete_beta(2.0, 3.0, 0.4), 0.5248, 1e-10));
        assert!(close(incomplete_beta(5.0, 2.0, 0.8), 0.65536, 1e-10));
        // I_0.3(1/2, 1/2) = (2/π)·asin(√0.3)
        assert!(close(incomplete_beta(0.5, 0.5, 0.3), 0.369_010_119_565_545, 1e-10));
        assert_eq!(incomplete_beta(2.0, 3.0, 0.0), 0.0);
        assert_eq!(incomplete_beta(2.0, 3.0, 1.0), 1.0);
    }

    #[test]
    fn f_survival_matches_critical_points() {
        // Standard 5% critical values of the F distribution.
        assert!(close(f_survival(4.96, 1.0, 10.0), 0.05, 1e-3));
        assert!(close(f_survival(2.87, 4.0, 20.0), 0.05, 1e-3));
        assert_eq!(f_survival(0.0, 3.0, 12.0), 1.0);
    }

    #[test]
    fn anova_known_small_case() {
        // Three shifted triples: F = 3 and p = 0.125 exactly.
        let groups = vec![
            vec![1.0, 2.0, 3.0],
            vec![2.0, 3.0, 4.0],
            vec![3.0, 4.0, 5.0],
        ];
        let result = one_way_anova(&groups).unwrap();
        assert!(close(result.f_statistic, 3.0, 1e-12));
        assert!(close(result.p_value, 0.125, 1e-10));
        assert!(!result.is_significant());
    }

    #[test]
    fn anova_identical_values_reports_zero_f_unit_p() {
        let groups = vec![vec![7.0; 4], vec![7.0; 4], vec![7.0; 4]];
        let result = one_way_anova(&groups).unwrap();
        assert_eq!(result.f_statistic, 0.0);
        assert_eq!(result.p_value, 1.0);
        assert!(!result.is_significant());
    }

    #[test]
    fn anova_zero_within_variance_distinct_means() {
        let groups = vec![vec![1.0, 1.0], vec![2.0, 2.0]];
        let result = one_way_anova(&groups).unwrap();
        assert!(result.f_statistic.is_infinite());
        assert_eq!(result.p_value, 0.0);
        assert!(result.is_significant());
    }

    #[test]
    fn anova_separated_groups_are_significant() {
        let groups = vec![
            vec![10.0, 12.0, 11.0, 13.0, 10.0],
            vec![25.0, 27.0, 26.0, 28.0, 25.0],
        ];
        let result = one_way_anova(&groups).unwrap();
        assert!(result.is_significant(), "p = {}", result.p_value);
    }

    #[test]
    fn anova_similar_groups_are_not_significant() {
        let groups = vec![
            vec![10.0, 12.0, 11.0, 13.0, 10.0],
            vec![11.0, 13.0, 10.0, 12.0, 11.0],
        ];
        let result = one_way_anova(&groups).unwrap();
        assert!(!result.is_significant(), "p = {}", result.p_value);
    }

    #[test]
    fn anova_rejects_single_group() {
        assert_eq!(
            one_way_anova(&[vec![1.0, 2.0]]),
            Err(StatsError::NotEnoughGroups)
        );
    }

    #[test]
    fn anova_rejects_empty_group() {
        assert_eq!(
            one_way_anova(&[vec![1.0], vec![]]),
            Err(StatsError::EmptyGroup)
        );
    }

    #[test]
    fn anova_rejects_non_finite_values() {
        assert_eq!(
            one_way_anova(&[vec![1.0, f64::NAN], vec![2.0]]),
            Err(StatsError::NonFiniteValue)
        );
    }

    #[test]
    fn linear_fit_exact_line() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 2.0 * x + 1.0).collect();
        let fit = linear_fit(&xs, &ys).unwrap();
        assert!(close(fit.slope, 2.0, 1e-12));
        assert!(close(fit.intercept, 1.0, 1e-12));
        assert!(close(fit.r_squared, 1.0, 1e-12));
        assert!(close(fit.value_at(10.0), 21.0, 1e-12));
    }

    #[test]
    fn linear_fit_strong_decreasing_trend() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [32.76, 24.1, 16.82, 10.52, 6.44];
        let fit = linear_fit(&xs, &ys).unwrap();
        assert!(fit.slope < 0.0);
        assert!(fit.r_squared >= 0.9);
        assert!(close(fit.slope, -6.622, 1e-9));
        assert!(close(fit.r_squared, 0.983_287_278_595_525, 1e-9));
    }

    #[test]
    fn linear_fit_rejects_length_mismatch() {
        assert_eq!(
            linear_fit(&[1.0, 2.0], &[1.0]),
            Err(StatsError::LengthMismatch { x_len: 2, y_len: 1 })
        );
    }

    #[test]
    fn linear_fit_rejects_constant_x() {
        assert_eq!(
            linear_fit(&[2.0, 2.0, 2.0], &[1.0, 2.0, 3.0]),
            Err(StatsError::DegenerateFit)
        );
    }
}
