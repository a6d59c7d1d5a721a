//! Field reference printed by `risksizer manual`.

const INPUTS: &[(&str, &str, &str)] = &[
    ("Starting capital", "--capital", "Account balance the risk amount and position size are derived from."),
    ("Stop-loss threshold (%)", "--stop-line", "Trading halts once equity falls below this share of starting capital. Higher is safer but halts sooner."),
    ("Win probability (%)", "--win-rate", "Share of trades that win, e.g. the Win Rate of a backtest."),
    ("Average win (%)", "--avg-win", "Average gain of a winning trade, per trade."),
    ("Average loss (%)", "--avg-loss", "Average loss of a losing trade, entered without a minus sign."),
    ("Max drawdown (%)", "--max-drawdown", "Optional. Largest peak-to-trough decline seen in testing; caps the risk amount when smaller."),
    ("Horizon (trades)", "--horizon", "Number of upcoming trades the loss-streak estimate covers. More trades assume longer streaks."),
    ("Breach probability (%)", "--breach", "Tolerated chance of crossing the stop-loss threshold within the horizon. A guide, not a guarantee."),
    ("Kelly cap", "--kelly-cap", "Multiplier (0 to 1) that scales the growth-optimal Kelly fraction down."),
    ("Stop-loss margin", "--stop-margin", "Multiplier (>= 1) that widens the average loss into the stop distance."),
    ("Max risk per trade (%)", "--max-risk", "Hard ceiling on the share of capital lost on any one trade."),
];

const OUTPUTS: &[(&str, &str)] = &[
    ("Position size", "Notional to enter so that hitting the stop loses the risk amount."),
    ("Stop distance", "Average loss times the stop-loss margin, in percent of entry."),
    ("Max loss per trade", "Risk fraction times capital, or max drawdown times capital when that is smaller."),
    ("Loss streak (m)", "Consecutive losses assumed possible within the horizon at the breach target."),
    ("Ruin floor", "Largest risk per trade that survives m straight losses above the stop-loss threshold."),
    ("Binding cap", "Which of Kelly cap, ruin floor or user max set the risk per trade."),
];

/// Plain-text description of every input and output.
pub fn render_manual() -> String {
    let mut out = String::from("=== Inputs ===\n\n");
    for (name, flag, body) in INPUTS {
        out.push_str(&format!("{name} [{flag}]\n    {body}\n"));
    }
    out.push_str("\n=== Results ===\n\n");
    for (name, body) in OUTPUTS {
        out.push_str(&format!("{name}\n    {body}\n"));
    }
    out
}
