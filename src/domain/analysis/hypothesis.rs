//! Significance test routines: one-way F-test and pooled two-sample t-test.

use statrs::distribution::{ContinuousCDF, FisherSnedecor, StudentsT};

/// Outcome of a completed significance test.
///
/// Routines return `None` instead when the statistic is undefined for the
/// input (degenerate variance or insufficient data); callers substitute
/// neutral sentinel values so a sweep never aborts on one variable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TestOutcome {
    pub statistic: f64,
    pub p_value: f64,
}

/// One-way ANOVA F-test across two or more groups.
///
/// Decomposes total variation into between-group and within-group sums of
/// squares and refers `MS_between / MS_within` to the F distribution with
/// `(k - 1, N - k)` degrees of freedom.
///
/// # Edge Cases
/// - Fewer than 2 groups, any empty group, or `N <= k`: `None`
/// - Zero within-group variance (constant values): `None`
pub fn one_way_f_test(groups: &[Vec<f64>]) -> Option<TestOutcome> {
    let k = groups.len();
    if k < 2 || groups.iter().any(|g| g.is_empty()) {
        return None;
    }
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total <= k {
        return None;
    }

    let grand_mean = groups.iter().flatten().sum::<f64>() / n_total as f64;

    let mut ss_between = 0.0;
    let mut ss_within = 0.0;
    for group in groups {
        let group_mean = mean(group);
        ss_between += group.len() as f64 * (group_mean - grand_mean).powi(2);
        ss_within += group.iter().map(|v| (v - group_mean).powi(2)).sum::<f64>();
    }

    let df_between = (k - 1) as f64;
    let df_within = (n_total - k) as f64;
    let ms_between = ss_between / df_between;
    let ms_within = ss_within / df_within;
    if !ms_between.is_finite() || !ms_within.is_finite() || ms_within <= 0.0 {
        return None;
    }

    let f_stat = ms_between / ms_within;
    if !f_stat.is_finite() || f_stat < 0.0 {
        return None;
    }

    let f_dist = FisherSnedecor::new(df_between, df_within).ok()?;
    let p_value = 1.0 - f_dist.cdf(f_stat);
    if !p_value.is_finite() {
        return None;
    }

    Some(TestOutcome {
        statistic: f_stat,
        p_value,
    })
}

/// Two-sample t-test for difference of means, assuming equal population
/// variance (pooled estimator).
///
/// # Edge Cases
/// - Either sample smaller than 2: `None`
/// - Zero pooled standard error (both samples constant): `None`
pub fn pooled_t_test(sample_a: &[f64], sample_b: &[f64]) -> Option<TestOutcome> {
    let n1 = sample_a.len();
    let n2 = sample_b.len();
    if n1 < 2 || n2 < 2 {
        return None;
    }

    let m1 = mean(sample_a);
    let m2 = mean(sample_b);
    let v1 = sample_variance(sample_a, m1);
    let v2 = sample_variance(sample_b, m2);

    let df = (n1 + n2 - 2) as f64;
    let pooled_var = ((n1 - 1) as f64 * v1 + (n2 - 1) as f64 * v2) / df;
    let std_err = (pooled_var * (1.0 / n1 as f64 + 1.0 / n2 as f64)).sqrt();
    if !std_err.is_finite() || std_err <= 0.0 {
        return None;
    }

    let t_stat = (m1 - m2) / std_err;
    if !t_stat.is_finite() {
        return None;
    }

    let t_dist = StudentsT::new(0.0, 1.0, df).ok()?;
    let p_value = 2.0 * (1.0 - t_dist.cdf(t_stat.abs()));
    if !p_value.is_finite() {
        return None;
    }

    Some(TestOutcome {
        statistic: t_stat,
        p_value,
    })
}

/// Eta-squared effect size as a percentage of total variation.
///
/// `SS_between / SS_total * 100` over the same valid values the F-test saw.
/// Zero when `SS_total` is zero (constant data) or the input is empty.
pub fn eta_squared_percent(groups: &[Vec<f64>]) -> f64 {
    let n_total: usize = groups.iter().map(|g| g.len()).sum();
    if n_total == 0 {
        return 0.0;
    }
    let grand_mean = groups.iter().flatten().sum::<f64>() / n_total as f64;

    let ss_between: f64 = groups
        .iter()
        .filter(|g| !g.is_empty())
        .map(|g| g.len() as f64 * (mean(g) - grand_mean).powi(2))
        .sum();
    let ss_total: f64 = groups
        .iter()
        .flatten()
        .map(|v| (v - grand_mean).powi(2))
        .sum();

    if ss_total > 0.0 {
        ss_between / ss_total * 100.0
    } else {
        0.0
    }
}

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn sample_variance(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (values.len() - 1) as f64
}
