//! Event kinds listeners can register for.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The closed set of events an application can listen on.
///
/// Listeners are matched by kind at dispatch time and invoked with the raw
/// payload the emitter supplies; there is no dependency injection on this
/// path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventKind {
    /// Gold price update.
    GoldPrice,
    /// Dollar exchange-rate update.
    DollarPrice,
    /// Stock market update.
    StockMarket,
    /// Weather update.
    WeatherUpdate,
    /// News update.
    NewsUpdate,
}

impl EventKind {
    /// Stable snake_case name of the kind.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoldPrice => "gold_price",
            Self::DollarPrice => "dollar_price",
            Self::StockMarket => "stock_market",
            Self::WeatherUpdate => "weather_update",
            Self::NewsUpdate => "news_update",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde_names_match_display() {
        let json = serde_json::to_string(&EventKind::GoldPrice).unwrap();
        assert_eq!(json, "\"gold_price\"");
        assert_eq!(EventKind::GoldPrice.to_string(), "gold_price");
    }

    #[test]
    fn test_deserialize() {
        let kind: EventKind = serde_json::from_str("\"weather_update\"").unwrap();
        assert_eq!(kind, EventKind::WeatherUpdate);
    }
}
