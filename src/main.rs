//! Risk sizing calculator
//!
//! Recommends a position size and stop distance for one trade from win
//! statistics, a capped Kelly fraction and a loss-streak ruin floor.

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

use risk_sizer::profile::{defaults_for, ProfileStore};
use risk_sizer::report::{render_inputs, render_json, render_manual, render_text};
use risk_sizer::{evaluate, Mode, RawInputs};

/// Position size and stop-loss calculator CLI.
#[derive(Parser)]
#[command(name = "risksizer")]
#[command(about = "Recommend position size and stop distance for a trade", long_about = None)]
struct Cli {
    /// Database file path for saved profiles
    #[arg(
        short,
        long,
        env = "RISKSIZER_DATABASE",
        default_value = "sqlite:./risksizer.db?mode=rwc"
    )]
    database: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RISKSIZER_LOG", default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute a recommendation from the saved profile plus overrides
    Calc {
        /// Profile to start from
        #[arg(short, long, value_enum, default_value = "stock")]
        mode: Mode,

        #[command(flatten)]
        overrides: InputOverrides,

        /// Ignore the saved profile and start from the mode defaults
        #[arg(long)]
        fresh: bool,

        /// Save the resulting inputs as the profile for this mode
        #[arg(long)]
        save: bool,

        /// Print the evaluation as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the saved profile for a mode
    Show {
        #[arg(short, long, value_enum, default_value = "stock")]
        mode: Mode,
    },

    /// Show the default profile for a mode
    Defaults {
        #[arg(short, long, value_enum, default_value = "stock")]
        mode: Mode,
    },

    /// Delete the saved profile for a mode
    Reset {
        #[arg(short, long, value_enum, default_value = "stock")]
        mode: Mode,
    },

    /// Describe every input and result
    Manual,
}

/// Per-field overrides applied on top of the starting profile.
#[derive(Args, Debug, Default)]
struct InputOverrides {
    /// Starting capital
    #[arg(long)]
    capital: Option<f64>,

    /// Stop-loss threshold in percent of starting capital
    #[arg(long)]
    stop_line: Option<f64>,

    /// Win probability in percent
    #[arg(long)]
    win_rate: Option<f64>,

    /// Average win in percent
    #[arg(long)]
    avg_win: Option<f64>,

    /// Average loss in percent (positive)
    #[arg(long)]
    avg_loss: Option<f64>,

    /// Max drawdown in percent; 0 clears it
    #[arg(long)]
    max_drawdown: Option<f64>,

    /// Horizon in trades
    #[arg(long)]
    horizon: Option<u32>,

    /// Breach probability target in percent
    #[arg(long)]
    breach: Option<f64>,

    /// Kelly cap multiplier (0 to 1)
    #[arg(long)]
    kelly_cap: Option<f64>,

    /// Stop-loss margin (>= 1)
    #[arg(long)]
    stop_margin: Option<f64>,

    /// Max risk per trade in percent
    #[arg(long)]
    max_risk: Option<f64>,
}

impl InputOverrides {
    fn apply(self, inputs: &mut RawInputs) {
        fn set<T>(slot: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *slot = v;
            }
        }

        set(&mut inputs.starting_capital, self.capital);
        set(&mut inputs.stop_loss_threshold_percent, self.stop_line);
        set(&mut inputs.win_probability_percent, self.win_rate);
        set(&mut inputs.avg_win_percent, self.avg_win);
        set(&mut inputs.avg_loss_percent, self.avg_loss);
        set(&mut inputs.horizon_trade_count, self.horizon);
        set(&mut inputs.breach_probability_percent, self.breach);
        set(&mut inputs.kelly_fraction_cap, self.kelly_cap);
        set(&mut inputs.stop_loss_margin, self.stop_margin);
        set(&mut inputs.max_risk_per_trade_percent, self.max_risk);

        if let Some(dd) = self.max_drawdown {
            inputs.max_drawdown_percent = (dd > 0.0).then_some(dd);
        }
    }
}

/// `calc` touches the database only to load a profile or to save one.
fn needs_store(fresh: bool, save: bool) -> bool {
    !fresh || save
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    // Setup logging
    let log_level = match cli.log_level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Calc {
            mode,
            overrides,
            fresh,
            save,
            json,
        } => {
            let store = if needs_store(fresh, save) {
                Some(ProfileStore::new(&cli.database).await?)
            } else {
                None
            };

            let saved = match (&store, fresh) {
                (Some(store), false) => store.load(mode).await?,
                _ => None,
            };
            let mut inputs = match saved {
                Some(saved) => {
                    info!(mode = %mode, saved_at = %saved.saved_at, "Using saved profile");
                    saved.inputs
                }
                None => defaults_for(mode),
            };
            overrides.apply(&mut inputs);

            let eval = evaluate(inputs);

            if json {
                println!("{}", render_json(&eval)?);
            } else {
                println!("{}", render_text(&eval));
            }

            if let (Some(store), true) = (&store, save) {
                store.save(&eval.inputs).await?;
                info!(mode = %mode, "Profile saved");
            }

            if eval.is_blocked() {
                bail!("{} input error(s), no recommendation", eval.report.errors.len());
            }
        }

        Commands::Show { mode } => {
            let store = ProfileStore::new(&cli.database).await?;

            match store.load(mode).await? {
                Some(saved) => {
                    println!("\n=== Saved profile ({}) ===", mode);
                    println!("Saved at:             {}", saved.saved_at.format("%Y-%m-%d %H:%M:%S UTC"));
                    print!("{}", render_inputs(&saved.inputs));
                }
                None => {
                    println!("\nNo saved profile for '{}'. Defaults:\n", mode);
                    print!("{}", render_inputs(&defaults_for(mode)));
                }
            }
        }

        Commands::Defaults { mode } => {
            println!("\n=== Default profile ({}) ===", mode);
            print!("{}", render_inputs(&defaults_for(mode)));
        }

        Commands::Reset { mode } => {
            let store = ProfileStore::new(&cli.database).await?;

            if store.clear(mode).await? {
                println!("Cleared saved profile for '{}'.", mode);
            } else {
                println!("No saved profile for '{}'.", mode);
            }
        }

        Commands::Manual => {
            print!("{}", render_manual());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overrides_apply_only_given_fields() {
        let mut inputs = defaults_for(Mode::Stock);
        let overrides = InputOverrides {
            capital: Some(500_000.0),
            horizon: Some(120),
            max_drawdown: Some(7.5),
            ..Default::default()
        };
        overrides.apply(&mut inputs);

        assert_eq!(inputs.starting_capital, 500_000.0);
        assert_eq!(inputs.horizon_trade_count, 120);
        assert_eq!(inputs.max_drawdown_percent, Some(7.5));
        assert_eq!(inputs.win_probability_percent, 55.0);
    }

    #[test]
    fn test_zero_drawdown_clears_it() {
        let mut inputs = RawInputs {
            max_drawdown_percent: Some(10.0),
            ..defaults_for(Mode::Fx)
        };
        InputOverrides {
            max_drawdown: Some(0.0),
            ..Default::default()
        }
        .apply(&mut inputs);

        assert_eq!(inputs.max_drawdown_percent, None);
    }

    #[test]
    fn test_fresh_calc_without_save_skips_database() {
        assert!(!needs_store(true, false));
        assert!(needs_store(true, true));
        assert!(needs_store(false, false));
        assert!(needs_store(false, true));
    }

    #[test]
    fn test_cli_parses_calc() {
        let cli = Cli::try_parse_from([
            "risksizer", "calc", "--mode", "fx", "--win-rate", "60", "--stop-margin", "1.5", "--json",
        ])
        .unwrap();

        match cli.command {
            Commands::Calc {
                mode, overrides, json, save, ..
            } => {
                assert_eq!(mode, Mode::Fx);
                assert_eq!(overrides.win_rate, Some(60.0));
                assert_eq!(overrides.stop_margin, Some(1.5));
                assert!(json);
                assert!(!save);
            }
            _ => panic!("expected calc"),
        }
    }
}
