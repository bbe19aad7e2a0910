//! Multiple-testing corrections: Bonferroni and Benjamini-Hochberg.

use serde::{Deserialize, Serialize};

/// Bonferroni correction over one family of p-values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BonferroniCorrection {
    /// Per-test significance cutoff, `alpha / n`.
    pub threshold: f64,
    /// Significance flag per input position.
    pub significant: Vec<bool>,
    /// Adjusted p-values, `p * n`, deliberately not clamped to 1.
    pub adjusted: Vec<f64>,
}

/// Benjamini-Hochberg step-up correction over one family of p-values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenjaminiHochbergCorrection {
    /// Significance flag per input position.
    pub significant: Vec<bool>,
    /// q-value per input position (monotone along the p-value ranking).
    pub q_values: Vec<f64>,
}

/// Correction engine for one significance level.
///
/// Every call is an independent correction family: the global per-variable
/// pool and each variable's pairwise pool get separate invocations and never
/// share state.
#[derive(Debug, Clone, Copy)]
pub struct CorrectionEngine {
    alpha: f64,
}

impl CorrectionEngine {
    pub fn new(alpha: f64) -> Self {
        Self { alpha }
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Bonferroni correction: flag `p <= alpha / n`, adjust as `p * n`.
    ///
    /// # Edge Cases
    /// - Empty input: threshold is infinite, flag and adjustment lists empty
    /// - Adjusted values above 1 are preserved as-is
    pub fn bonferroni(&self, p_values: &[f64]) -> BonferroniCorrection {
        let n = p_values.len() as f64;
        let threshold = self.alpha / n;
        BonferroniCorrection {
            threshold,
            significant: p_values.iter().map(|&p| p <= threshold).collect(),
            adjusted: p_values.iter().map(|&p| p * n).collect(),
        }
    }

    /// Benjamini-Hochberg step-up procedure.
    ///
    /// Ascending by p-value, the largest rank `k` (1-based) with
    /// `p_(k) <= (k / n) * alpha` is found; every test ranked at or below `k`
    /// is flagged significant. q-values are `p_(i) * n / i` swept with a
    /// running minimum from the largest rank down, then mapped back to input
    /// order. The running minimum keeps q monotone along the ranking and
    /// bounded by the largest p-value, so no clamp is needed.
    ///
    /// # Edge Cases
    /// - Empty input: empty outputs
    /// - Single p-value: flagged iff `p <= alpha`, q equals p
    /// - Ties rank in input order (stable sort); equal p-values always
    ///   receive identical decisions
    pub fn benjamini_hochberg(&self, p_values: &[f64]) -> BenjaminiHochbergCorrection {
        let n = p_values.len();
        if n == 0 {
            return BenjaminiHochbergCorrection {
                significant: Vec::new(),
                q_values: Vec::new(),
            };
        }

        let mut order: Vec<usize> = (0..n).collect();
        order.sort_by(|&a, &b| {
            p_values[a]
                .partial_cmp(&p_values[b])
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        // Largest rank whose p-value sits under the step-up line.
        let mut cutoff_rank = 0;
        for (rank0, &idx) in order.iter().enumerate() {
            let criterion = (rank0 + 1) as f64 / n as f64 * self.alpha;
            if p_values[idx] <= criterion {
                cutoff_rank = rank0 + 1;
            }
        }

        let mut significant = vec![false; n];
        for &idx in &order[..cutoff_rank] {
            significant[idx] = true;
        }

        let mut q_values = vec![0.0; n];
        let mut running_min = f64::INFINITY;
        for rank0 in (0..n).rev() {
            let idx = order[rank0];
            let raw = p_values[idx] * n as f64 / (rank0 + 1) as f64;
            running_min = running_min.min(raw);
            q_values[idx] = running_min;
        }

        BenjaminiHochbergCorrection {
            significant,
            q_values,
        }
    }
}
