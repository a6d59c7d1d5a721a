//! Rendering of evaluations for the terminal and as JSON.

mod format;
mod manual;

pub use format::{format_currency, format_percent, format_ratio_as_percent};
pub use manual::render_manual;

use std::fmt::Write;

use anyhow::{Context, Result};
use serde::Serialize;

use crate::models::{RawInputs, Recommendation, RiskAmountSource};
use crate::sizing::Evaluation;

const DISCLAIMER: &str =
    "This recommendation guarantees neither profit nor safety. Results change with inputs and market conditions.";

/// Text report: validation messages, headline figures, details, disclaimer.
pub fn render_text(eval: &Evaluation) -> String {
    let mut out = String::new();

    for e in &eval.report.errors {
        let _ = writeln!(out, "error:   {e}");
    }
    for w in &eval.report.warnings {
        let _ = writeln!(out, "warning: {w}");
    }
    if !eval.report.errors.is_empty() || !eval.report.warnings.is_empty() {
        out.push('\n');
    }

    let rec = eval.recommendation.as_ref();
    let _ = writeln!(out, "=== Recommendation ({}) ===", eval.inputs.mode.label());
    let _ = writeln!(
        out,
        "Position size:        {}",
        rec.map(|r| format_currency(r.position_notional))
            .unwrap_or_else(|| "?".to_string())
    );
    let _ = writeln!(
        out,
        "Stop distance:        {}",
        rec.map(|r| format!("{}%", format_percent(r.stop_distance_percent, 2)))
            .unwrap_or_else(|| "?".to_string())
    );
    let heading = match rec.map(|r| r.risk_amount_source) {
        Some(RiskAmountSource::Drawdown) => "Expected loss at max drawdown: ",
        _ => "Max loss per trade:   ",
    };
    let _ = writeln!(
        out,
        "{heading}{}",
        rec.map(|r| format_currency(r.risk_amount))
            .unwrap_or_else(|| "?".to_string())
    );

    out.push('\n');
    match rec {
        Some(r) => write_details(&mut out, r),
        None => out.push_str("Calculation halted: fix the input errors above.\n"),
    }

    out.push('\n');
    out.push_str(DISCLAIMER);
    out.push('\n');
    out
}

fn write_details(out: &mut String, r: &Recommendation) {
    let _ = writeln!(out, "--- Details ---");
    let _ = writeln!(out, "Risk per trade:       {}%", format_ratio_as_percent(r.risk_fraction, 2));
    let _ = writeln!(out, "Payoff ratio:         {}", format_percent(r.payoff_ratio, 2));
    let _ = writeln!(out, "Expected value:       {}%", format_percent(r.expected_value_percent, 2));
    let _ = writeln!(out, "Loss streak (m):      {}", r.loss_streak_estimate);
    let _ = writeln!(out, "Kelly fraction:       {}%", format_ratio_as_percent(r.kelly_fraction, 2));
    let _ = writeln!(out, "Ruin floor:           {}%", format_ratio_as_percent(r.ruin_floor_fraction, 2));
    let _ = writeln!(out, "Binding cap:          {}", r.active_cap.label());
}

/// Inputs in the same layout the CLI accepts them.
pub fn render_inputs(inputs: &RawInputs) -> String {
    let mut out = String::new();
    let drawdown = inputs
        .max_drawdown_percent
        .map(|dd| format!("{}%", format_percent(dd, 2)))
        .unwrap_or_else(|| "unset".to_string());

    let _ = writeln!(out, "Mode:                 {} ({})", inputs.mode, inputs.mode.label());
    let _ = writeln!(out, "Starting capital:     {}", format_currency(inputs.starting_capital));
    let _ = writeln!(out, "Stop-loss threshold:  {}%", inputs.stop_loss_threshold_percent);
    let _ = writeln!(out, "Win probability:      {}%", inputs.win_probability_percent);
    let _ = writeln!(out, "Average win:          {}%", inputs.avg_win_percent);
    let _ = writeln!(out, "Average loss:         {}%", inputs.avg_loss_percent);
    let _ = writeln!(out, "Max drawdown:         {drawdown}");
    let _ = writeln!(out, "Horizon (trades):     {}", inputs.horizon_trade_count);
    let _ = writeln!(out, "Breach probability:   {}%", inputs.breach_probability_percent);
    let _ = writeln!(out, "Kelly cap:            {}", inputs.kelly_fraction_cap);
    let _ = writeln!(out, "Stop-loss margin:     {}", inputs.stop_loss_margin);
    let _ = writeln!(out, "Max risk per trade:   {}%", inputs.max_risk_per_trade_percent);
    out
}

#[derive(Serialize)]
struct JsonReport<'a> {
    inputs: &'a RawInputs,
    errors: Vec<String>,
    warnings: Vec<String>,
    recommendation: Option<&'a Recommendation>,
}

/// Pretty JSON with validation messages spelled out.
pub fn render_json(eval: &Evaluation) -> Result<String> {
    let report = JsonReport {
        inputs: &eval.inputs,
        errors: eval.report.errors.iter().map(ToString::to_string).collect(),
        warnings: eval.report.warnings.iter().map(ToString::to_string).collect(),
        recommendation: eval.recommendation.as_ref(),
    };
    serde_json::to_string_pretty(&report).context("Failed to encode report")
}
