//! Business values feeding orb uniforms.

use serde::{Deserialize, Serialize};

use crate::error::OrbisError;
use crate::util::color::parse_hex;
use crate::util::math::{clamp01, finite_or};

/// Read-only balance figures for one entity, as delivered by the dashboard
/// data layer (camelCase JSON).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BalanceSnapshot {
    /// Entity id, matched against orb labels.
    pub id: String,
    /// Balance now.
    pub current_balance: f64,
    /// Historic income.
    pub total_income: f64,
    /// Historic expenses.
    pub total_expenses: f64,
    /// Optional brand color (`#RRGGBB`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl BalanceSnapshot {
    /// [`mood`] of this snapshot.
    pub fn mood(&self) -> f32 {
        mood(self.total_income, self.total_expenses)
    }

    /// Parsed brand color, if present and well-formed.
    pub fn brand_color(&self) -> Option<[f32; 3]> {
        self.color.as_deref().and_then(parse_hex)
    }
}

/// `clamp(value / max(max, 1), 0, 1)`; NaN maps to 0.
pub fn normalize_ratio(value: f64, max: f64) -> f32 {
    let denom = if max.is_nan() { 1.0 } else { max.max(1.0) };
    clamp01((value / denom) as f32)
}

/// `clamp((income − expenses) / max(income + expenses, 1), −1, 1)`; NaN
/// maps to 0.
pub fn mood(income: f64, expenses: f64) -> f32 {
    let total = income + expenses;
    let denom = if total.is_nan() { 1.0 } else { total.max(1.0) };
    finite_or(((income - expenses) / denom) as f32, 0.0).clamp(-1.0, 1.0)
}

/// Parse a JSON array of snapshots.
///
/// # Errors
///
/// Returns [`OrbisError::SnapshotParse`] on malformed JSON.
pub fn parse_snapshots(json: &str) -> Result<Vec<BalanceSnapshot>, OrbisError> {
    serde_json::from_str(json).map_err(|e| OrbisError::SnapshotParse(e.to_string()))
}

/// How an orb derives its `capital_ratio`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ValueBinding {
    /// `current_balance` normalized against `max_balance`.
    CapitalRatio {
        /// Balance that maps to 1.0.
        max_balance: f64,
    },
    /// Constant ratio, ignoring snapshots.
    Fixed(f32),
}

impl ValueBinding {
    /// Ratio for `snapshot` (`None` = no data yet).
    pub fn ratio(&self, snapshot: Option<&BalanceSnapshot>) -> f32 {
        match self {
            Self::CapitalRatio { max_balance } => snapshot
                .map_or(0.0, |s| normalize_ratio(s.current_balance, *max_balance)),
            Self::Fixed(v) => clamp01(*v),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ratios_exact_at_boundaries() {
        let got: Vec<f32> = [100.0, 50.0, 0.0]
            .into_iter()
            .map(|v| normalize_ratio(v, 100.0))
            .collect();
        assert_eq!(got, vec![1.0, 0.5, 0.0]);
    }

    #[test]
    fn ratio_degenerate_inputs() {
        assert_eq!(normalize_ratio(f64::NAN, 100.0), 0.0);
        assert_eq!(normalize_ratio(50.0, 0.0), 1.0);
        assert_eq!(normalize_ratio(0.5, -10.0), 0.5);
        assert_eq!(normalize_ratio(-20.0, 100.0), 0.0);
        assert_eq!(normalize_ratio(500.0, f64::NAN), 1.0);
        assert_eq!(normalize_ratio(f64::INFINITY, 100.0), 1.0);
    }

    #[test]
    fn mood_range() {
        assert_eq!(mood(100.0, 0.0), 1.0);
        assert_eq!(mood(0.0, 100.0), -1.0);
        assert_eq!(mood(50.0, 50.0), 0.0);
        assert_eq!(mood(0.0, 0.0), 0.0);
        assert_eq!(mood(f64::NAN, 3.0), 0.0);
        assert!((mood(75.0, 25.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn parses_camel_case_json() {
        let json = r##"[
            {"id": "boveda_monte", "currentBalance": 250000.0,
             "totalIncome": 900000, "totalExpenses": 650000, "color": "#FFD700"},
            {"id": "profit"}
        ]"##;
        let snaps = parse_snapshots(json).unwrap();
        assert_eq!(snaps.len(), 2);
        assert_eq!(snaps[0].current_balance, 250_000.0);
        assert!(snaps[0].brand_color().is_some());
        assert_eq!(snaps[1].total_income, 0.0);
        assert!(parse_snapshots("{not json").is_err());
    }

    #[test]
    fn binding_ratio() {
        let snap = BalanceSnapshot {
            id: "x".to_owned(),
            current_balance: 25.0,
            ..Default::default()
        };
        let bound = ValueBinding::CapitalRatio { max_balance: 100.0 };
        assert_eq!(bound.ratio(Some(&snap)), 0.25);
        assert_eq!(bound.ratio(None), 0.0);
        assert_eq!(ValueBinding::Fixed(3.0).ratio(Some(&snap)), 1.0);
    }
}
