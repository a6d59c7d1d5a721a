//! Default input profiles per mode.

use crate::models::{Mode, RawInputs};

/// Starting inputs for a mode. The FX profile assumes more trades per
/// horizon and sizes more cautiously.
pub fn defaults_for(mode: Mode) -> RawInputs {
    let base = RawInputs {
        mode,
        starting_capital: 1_000_000.0,
        stop_loss_threshold_percent: 50.0,
        win_probability_percent: 55.0,
        avg_win_percent: 1.8,
        avg_loss_percent: 1.2,
        max_drawdown_percent: None,
        horizon_trade_count: 60,
        breach_probability_percent: 1.0,
        kelly_fraction_cap: 0.25,
        stop_loss_margin: 1.1,
        max_risk_per_trade_percent: 1.0,
    };

    match mode {
        Mode::Stock => base,
        Mode::Fx => RawInputs {
            horizon_trade_count: 200,
            breach_probability_percent: 0.5,
            kelly_fraction_cap: 0.1,
            stop_loss_margin: 1.2,
            max_risk_per_trade_percent: 0.3,
            ..base
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_modes_share_account_statistics() {
        let stock = defaults_for(Mode::Stock);
        let fx = defaults_for(Mode::Fx);

        assert_eq!(stock.mode, Mode::Stock);
        assert_eq!(fx.mode, Mode::Fx);
        assert_eq!(stock.starting_capital, fx.starting_capital);
        assert_eq!(stock.win_probability_percent, fx.win_probability_percent);
        assert!(fx.horizon_trade_count > stock.horizon_trade_count);
        assert!(fx.max_risk_per_trade_percent < stock.max_risk_per_trade_percent);
    }
}
