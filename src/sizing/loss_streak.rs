//! Loss-streak length estimation over a finite trade horizon.

/// Longest streak the search will consider.
pub const MAX_STREAK_SEARCH: u32 = 200;

/// Smallest run of consecutive losses `m` whose expected number of
/// occurrences within `horizon` trades is at most `breach_probability`.
///
/// The count is a union bound, `(horizon - m + 1) * q^m` with `q` the loss
/// probability. It over-counts overlapping runs and can exceed 1 for short
/// runs, so the result is a conservative heuristic rather than a confidence
/// bound. When no run length up to `min(200, horizon)` clears the target the
/// search ceiling is returned.
pub fn estimate_loss_streak(win_probability: f64, horizon: u32, breach_probability: f64) -> u32 {
    if horizon == 0 {
        return 1;
    }
    if breach_probability <= 0.0 {
        return horizon;
    }
    if win_probability <= 0.0 || win_probability >= 1.0 {
        return 1;
    }

    let q = 1.0 - win_probability;
    let max_m = horizon.min(MAX_STREAK_SEARCH);

    (1..=max_m)
        .find(|&m| {
            let windows = f64::from((horizon - m + 1).max(1));
            windows * q.powi(m as i32) <= breach_probability
        })
        .unwrap_or(max_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smoke_range() {
        let m = estimate_loss_streak(0.5, 200, 0.005);
        assert!((1..=200).contains(&m));
    }

    #[test]
    fn test_known_value() {
        // q = 0.45, horizon 60, target 1%:
        //   m=10: 51 * 0.45^10 ~ 0.0174 > 0.01
        //   m=11: 50 * 0.45^11 ~ 0.0077 <= 0.01
        assert_eq!(estimate_loss_streak(0.55, 60, 0.01), 11);
        assert_eq!(estimate_loss_streak(0.5, 200, 0.005), 16);
    }

    #[test]
    fn test_edge_cases() {
        assert_eq!(estimate_loss_streak(0.5, 0, 0.01), 1);
        assert_eq!(estimate_loss_streak(0.5, 0, 0.0), 1);
        // No tolerance at all: demand the full horizon, uncapped
        assert_eq!(estimate_loss_streak(0.5, 60, 0.0), 60);
        assert_eq!(estimate_loss_streak(0.5, 500, -1.0), 500);
        assert_eq!(estimate_loss_streak(0.0, 60, 0.01), 1);
        assert_eq!(estimate_loss_streak(1.0, 60, 0.01), 1);
    }

    #[test]
    fn test_returns_ceiling_when_bound_never_clears() {
        // q = 0.99 never drops 1 window below 1e-9 within 5 trades
        assert_eq!(estimate_loss_streak(0.01, 5, 1e-9), 5);
        // Ceiling is capped at 200 for long horizons
        assert_eq!(estimate_loss_streak(0.01, 10_000, 1e-12), MAX_STREAK_SEARCH);
    }

    #[test]
    fn test_always_within_bounds() {
        for &p in &[0.05, 0.3, 0.5, 0.7, 0.95] {
            for &n in &[1u32, 2, 10, 60, 200, 1000] {
                for &alpha in &[0.001, 0.01, 0.2, 0.99] {
                    let m = estimate_loss_streak(p, n, alpha);
                    assert!(m >= 1, "p={p} n={n} alpha={alpha}");
                    assert!(m <= n.min(MAX_STREAK_SEARCH), "p={p} n={n} alpha={alpha}");
                }
            }
        }
    }

    #[test]
    fn test_monotone_in_breach_target() {
        let loose = estimate_loss_streak(0.5, 200, 0.1);
        let tight = estimate_loss_streak(0.5, 200, 0.001);
        assert!(tight >= loose);
    }
}
