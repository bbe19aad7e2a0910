//! Builds the human-readable context text stored alongside analysis runs.
//!
//! The summary describes what the user currently sees on screen so the
//! assistant can reference concrete variables and values. Results arrive as
//! loose JSON because clients echo back the analysis response they hold.

use serde_json::Value;

/// Variables listed in the significant section, at most.
const SIGNIFICANT_LIMIT: usize = 10;

/// Variables listed in the lowest-p section.
const TOP_BY_P_LIMIT: usize = 5;

/// Renders an analysis result bundle into assistant-ready context text.
///
/// Unknown analysis types fall back to the raw JSON rendering.
pub fn summarize_results(analysis_type: &str, results: &Value) -> String {
    if analysis_type == "anova" {
        summarize_anova(results)
    } else {
        results.to_string()
    }
}

fn summarize_anova(results: &Value) -> String {
    let summary = results.get("summary").cloned().unwrap_or(Value::Null);
    let empty = Vec::new();
    let all_results = results
        .get("results")
        .and_then(Value::as_array)
        .unwrap_or(&empty);

    let significant: Vec<&Value> = all_results
        .iter()
        .filter(|r| flag(r, "benjamini"))
        .collect();
    let mut top_by_pvalue: Vec<&Value> = all_results.iter().collect();
    top_by_pvalue.sort_by(|a, b| {
        p_value(a)
            .partial_cmp(&p_value(b))
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    top_by_pvalue.truncate(TOP_BY_P_LIMIT);

    let total_vars = count_field(&summary, "totalVariables", "total_variables");
    let num_groups = count_field(&summary, "numGroups", "num_groups");
    let benjamini_sig = count_field(&summary, "benjaminiSignificant", "benjamini_significant");
    let bonferroni_sig = count_field(&summary, "bonferroniSignificant", "bonferroni_significant");

    let mut lines: Vec<String> = Vec::new();
    lines.push("=== ANOVA ANALYSIS RESULTS ===".to_string());
    lines.push(format!("Total variables analyzed: {}", total_vars));
    lines.push(format!("Number of groups compared: {}", num_groups));
    lines.push(format!(
        "Significant after Benjamini-Hochberg (FDR<0.05): {}",
        benjamini_sig
    ));
    lines.push(format!(
        "Significant after Bonferroni correction: {}",
        bonferroni_sig
    ));
    lines.push(String::new());

    if significant.is_empty() {
        lines.push("=== NO SIGNIFICANT VARIABLES FOUND ===".to_string());
        lines.push(
            "After multiple testing correction, no variables passed significance threshold."
                .to_string(),
        );
        lines.push(String::new());
    } else {
        lines.push("=== SIGNIFICANT VARIABLES (user sees these highlighted) ===".to_string());
        for r in significant.iter().take(SIGNIFICANT_LIMIT) {
            lines.push(format!(
                "• {}: p={:.4}, FDR={:.4}",
                variable(r),
                p_value(r),
                fdr(r)
            ));
        }
        lines.push(String::new());
    }

    lines.push(
        "=== TOP 5 VARIABLES BY P-VALUE (lowest p, user sees boxplots for these) ===".to_string(),
    );
    for r in top_by_pvalue {
        let status = if flag(r, "benjamini") {
            "✓ SIGNIFICANT"
        } else {
            "✗ not significant"
        };
        lines.push(format!(
            "• {}: p={:.4}, FDR={:.4} [{}]",
            variable(r),
            p_value(r),
            fdr(r),
            status
        ));
    }

    lines.join("\n")
}

// Clients send either camelCase (echoed frontend state) or snake_case
// (direct backend response); a present-but-zero camel value defers to snake.
fn count_field(summary: &Value, camel: &str, snake: &str) -> u64 {
    match summary.get(camel).and_then(Value::as_u64) {
        Some(n) if n > 0 => n,
        _ => summary.get(snake).and_then(Value::as_u64).unwrap_or(0),
    }
}

fn variable(r: &Value) -> &str {
    r.get("variable").and_then(Value::as_str).unwrap_or("")
}

fn p_value(r: &Value) -> f64 {
    r.get("pValue").and_then(Value::as_f64).unwrap_or(1.0)
}

fn fdr(r: &Value) -> f64 {
    r.get("fdr").and_then(Value::as_f64).unwrap_or(1.0)
}

fn flag(r: &Value, key: &str) -> bool {
    r.get(key).and_then(Value::as_bool).unwrap_or(false)
}
