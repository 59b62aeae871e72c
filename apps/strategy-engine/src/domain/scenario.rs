//! Scenario evaluation log entries.

use serde::{Deserialize, Serialize};

/// One evaluated what-if scenario. Append-only: records are never mutated,
/// only added to the log or cleared as a batch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioRecord {
    /// Underlying price change applied, in percent.
    pub price_change: f64,
    /// Volatility change applied, in percent.
    pub volatility_change: f64,
    /// Days to expiration the scenario was evaluated at.
    pub days_to_expiration: f64,
    /// Combined expected P/L delta for the scenario.
    pub expected_pl: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_wire_format() {
        let record = ScenarioRecord {
            price_change: 10.0,
            volatility_change: -5.0,
            days_to_expiration: 14.0,
            expected_pl: 132.5,
        };

        let json = serde_json::to_value(record).unwrap();
        assert_eq!(json["priceChange"], 10.0);
        assert_eq!(json["volatilityChange"], -5.0);

        let parsed: ScenarioRecord = serde_json::from_value(json).unwrap();
        assert_eq!(parsed, record);
    }
}
