//! SQLite persistence of the last-used inputs for each mode.
//!
//! Each row stores the inputs as JSON together with a schema version.
//! Rows are read back through [`migrate_profile`]; anything it cannot
//! upgrade is dropped and the caller falls back to the mode defaults.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::{debug, warn};

use crate::models::{Mode, RawInputs};

/// Schema version written with every saved profile.
pub const PROFILE_VERSION: i64 = 1;

/// Raw row in the profiles table.
#[derive(Debug, Clone, sqlx::FromRow)]
struct ProfileRow {
    version: i64,
    inputs: String,
    saved_at: DateTime<Utc>,
}

/// A profile loaded back from storage.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredProfile {
    pub inputs: RawInputs,
    pub saved_at: DateTime<Utc>,
}

/// Upgrade a stored payload to the current [`RawInputs`] shape.
///
/// Only version 1 exists, so other versions and undecodable payloads yield
/// `None`.
pub fn migrate_profile(version: i64, payload: &str) -> Option<RawInputs> {
    match version {
        1 => serde_json::from_str(payload).ok(),
        _ => None,
    }
}

fn non_finite_field(inputs: &RawInputs) -> Option<&'static str> {
    let fields = [
        ("starting capital", inputs.starting_capital),
        ("stop-loss threshold", inputs.stop_loss_threshold_percent),
        ("win probability", inputs.win_probability_percent),
        ("average win", inputs.avg_win_percent),
        ("average loss", inputs.avg_loss_percent),
        ("breach probability", inputs.breach_probability_percent),
        ("Kelly cap", inputs.kelly_fraction_cap),
        ("stop-loss margin", inputs.stop_loss_margin),
        ("max risk per trade", inputs.max_risk_per_trade_percent),
    ];

    fields
        .into_iter()
        .find(|(_, value)| !value.is_finite())
        .map(|(name, _)| name)
        .or_else(|| {
            inputs
                .max_drawdown_percent
                .filter(|dd| !dd.is_finite())
                .map(|_| "max drawdown")
        })
}

/// Saved profiles, one per mode.
pub struct ProfileStore {
    pool: SqlitePool,
}

impl ProfileStore {
    /// Connect and create the schema if needed.
    pub async fn new(database_url: &str) -> Result<Self> {
        // One connection keeps `sqlite::memory:` on a single database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect(database_url)
            .await
            .context("Failed to connect to profile database")?;

        let store = Self { pool };
        store.run_migrations().await?;

        Ok(store)
    }

    async fn run_migrations(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS profiles (
                mode TEXT PRIMARY KEY,
                version INTEGER NOT NULL,
                inputs TEXT NOT NULL,
                saved_at TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .context("Failed to create profiles table")?;

        Ok(())
    }

    /// Load the saved profile for a mode, if a usable one exists.
    pub async fn load(&self, mode: Mode) -> Result<Option<StoredProfile>> {
        let row = sqlx::query_as::<_, ProfileRow>(
            "SELECT version, inputs, saved_at FROM profiles WHERE mode = ?",
        )
        .bind(mode.as_str())
        .fetch_optional(&self.pool)
        .await
        .context("Failed to load profile")?;

        let Some(row) = row else {
            debug!(mode = %mode, "No saved profile");
            return Ok(None);
        };

        match migrate_profile(row.version, &row.inputs) {
            Some(inputs) if inputs.mode == mode => Ok(Some(StoredProfile {
                inputs,
                saved_at: row.saved_at,
            })),
            Some(inputs) => {
                warn!(mode = %mode, stored_mode = %inputs.mode, "Saved profile has mismatched mode, ignoring");
                Ok(None)
            }
            None => {
                warn!(mode = %mode, version = row.version, "Saved profile unreadable, ignoring");
                Ok(None)
            }
        }
    }

    /// Save inputs as the profile for their mode, replacing any previous one.
    ///
    /// Non-finite fields are refused: JSON stores them as `null`, which would
    /// make the whole row unreadable on the next load.
    pub async fn save(&self, inputs: &RawInputs) -> Result<()> {
        if let Some(field) = non_finite_field(inputs) {
            bail!("Cannot save profile: {field} is not a finite number");
        }

        let payload = serde_json::to_string(inputs).context("Failed to encode profile")?;

        sqlx::query(
            r#"
            INSERT INTO profiles (mode, version, inputs, saved_at)
            VALUES (?, ?, ?, ?)
            ON CONFLICT(mode) DO UPDATE SET
                version = excluded.version,
                inputs = excluded.inputs,
                saved_at = excluded.saved_at
            "#,
        )
        .bind(inputs.mode.as_str())
        .bind(PROFILE_VERSION)
        .bind(payload)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .context("Failed to save profile")?;

        debug!(mode = %inputs.mode, "Profile saved");
        Ok(())
    }

    /// Delete the saved profile for a mode. Returns whether one existed.
    pub async fn clear(&self, mode: Mode) -> Result<bool> {
        let result = sqlx::query("DELETE FROM profiles WHERE mode = ?")
            .bind(mode.as_str())
            .execute(&self.pool)
            .await
            .context("Failed to clear profile")?;

        Ok(result.rows_affected() > 0)
    }

    #[cfg(test)]
    async fn put_raw(&self, mode: &str, version: i64, inputs: &str) -> Result<()> {
        sqlx::query("INSERT OR REPLACE INTO profiles (mode, version, inputs, saved_at) VALUES (?, ?, ?, ?)")
            .bind(mode)
            .bind(version)
            .bind(inputs)
            .bind(Utc::now())
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::defaults_for;

    async fn memory_store() -> ProfileStore {
        ProfileStore::new("sqlite::memory:").await.unwrap()
    }

    #[test]
    fn test_save_load_clear() {
        tokio_test::block_on(async {
            let store = memory_store().await;
            assert!(store.load(Mode::Stock).await.unwrap().is_none());

            let inputs = RawInputs {
                starting_capital: 250_000.0,
                max_drawdown_percent: Some(8.0),
                ..defaults_for(Mode::Stock)
            };
            store.save(&inputs).await.unwrap();

            let loaded = store.load(Mode::Stock).await.unwrap().unwrap();
            assert_eq!(loaded.inputs, inputs);
            // Profiles are keyed by mode
            assert!(store.load(Mode::Fx).await.unwrap().is_none());

            assert!(store.clear(Mode::Stock).await.unwrap());
            assert!(!store.clear(Mode::Stock).await.unwrap());
            assert!(store.load(Mode::Stock).await.unwrap().is_none());
        });
    }

    #[test]
    fn test_save_replaces_previous() {
        tokio_test::block_on(async {
            let store = memory_store().await;
            store.save(&defaults_for(Mode::Fx)).await.unwrap();

            let edited = RawInputs {
                horizon_trade_count: 500,
                ..defaults_for(Mode::Fx)
            };
            store.save(&edited).await.unwrap();

            let loaded = store.load(Mode::Fx).await.unwrap().unwrap();
            assert_eq!(loaded.inputs.horizon_trade_count, 500);
        });
    }

    #[test]
    fn test_non_finite_fields_are_not_saved() {
        tokio_test::block_on(async {
            let store = memory_store().await;
            let kept = RawInputs {
                starting_capital: 250_000.0,
                ..defaults_for(Mode::Stock)
            };
            store.save(&kept).await.unwrap();

            let half_edited = RawInputs {
                win_probability_percent: f64::NAN,
                ..kept.clone()
            };
            let err = store.save(&half_edited).await.unwrap_err();
            assert!(err.to_string().contains("win probability"));

            let drawdown_inf = RawInputs {
                max_drawdown_percent: Some(f64::INFINITY),
                ..kept.clone()
            };
            assert!(store.save(&drawdown_inf).await.is_err());

            // The previous profile survives intact
            let loaded = store.load(Mode::Stock).await.unwrap().unwrap();
            assert_eq!(loaded.inputs, kept);
        });
    }

    #[test]
    fn test_unknown_version_is_ignored() {
        tokio_test::block_on(async {
            let store = memory_store().await;
            let payload = serde_json::to_string(&defaults_for(Mode::Stock)).unwrap();
            store.put_raw("stock", 2, &payload).await.unwrap();

            assert!(store.load(Mode::Stock).await.unwrap().is_none());
        });
    }

    #[test]
    fn test_garbage_and_mismatched_rows_are_ignored() {
        tokio_test::block_on(async {
            let store = memory_store().await;
            store.put_raw("stock", 1, "{not json").await.unwrap();
            assert!(store.load(Mode::Stock).await.unwrap().is_none());

            let fx_payload = serde_json::to_string(&defaults_for(Mode::Fx)).unwrap();
            store.put_raw("stock", 1, &fx_payload).await.unwrap();
            assert!(store.load(Mode::Stock).await.unwrap().is_none());
        });
    }

    #[test]
    fn test_migrate_profile_versions() {
        let payload = serde_json::to_string(&defaults_for(Mode::Fx)).unwrap();
        assert_eq!(migrate_profile(1, &payload), Some(defaults_for(Mode::Fx)));
        assert_eq!(migrate_profile(0, &payload), None);
        assert_eq!(migrate_profile(PROFILE_VERSION + 1, &payload), None);
    }

    #[test]
    fn test_missing_drawdown_field_defaults_to_unset() {
        let payload = r#"{
            "mode": "stock",
            "starting_capital": 1000000.0,
            "stop_loss_threshold_percent": 50.0,
            "win_probability_percent": 55.0,
            "avg_win_percent": 1.8,
            "avg_loss_percent": 1.2,
            "horizon_trade_count": 60,
            "breach_probability_percent": 1.0,
            "kelly_fraction_cap": 0.25,
            "stop_loss_margin": 1.1,
            "max_risk_per_trade_percent": 1.0
        }"#;
        assert_eq!(migrate_profile(1, payload), Some(defaults_for(Mode::Stock)));
    }
}
