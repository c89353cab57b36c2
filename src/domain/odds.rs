use serde::{Deserialize, Serialize};

/// Betting market types produced by the pick generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MarketKind {
    Moneyline,
    Spread,
    Total,
}

impl MarketKind {
    /// Market key used by The Odds API
    pub fn wire_key(&self) -> &'static str {
        match self {
            MarketKind::Moneyline => "h2h",
            MarketKind::Spread => "spreads",
            MarketKind::Total => "totals",
        }
    }
}

/// Convert American odds to implied probability.
///
/// Favorites (negative prices) and underdogs (positive prices) use the
/// complementary formulas, so `implied(-p) + implied(+p) == 1`.
pub fn american_implied_probability(price: f64) -> f64 {
    if price < 0.0 {
        -price / (-price + 100.0)
    } else {
        100.0 / (price + 100.0)
    }
}

/// A single quoted outcome within a market
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutcomeQuote {
    pub name: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
    /// Player name on prop markets
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl OutcomeQuote {
    pub fn implied_probability(&self) -> f64 {
        american_implied_probability(self.price)
    }
}

/// Market quote (h2h, spreads, totals, or a player-prop key)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketQuote {
    pub key: String,
    pub outcomes: Vec<OutcomeQuote>,
}

impl MarketQuote {
    pub fn outcome_named(&self, name: &str) -> Option<&OutcomeQuote> {
        self.outcomes.iter().find(|o| o.name == name)
    }

    pub fn is_player_prop(&self) -> bool {
        self.key.starts_with("player_")
            || self.key.starts_with("batter_")
            || self.key.starts_with("pitcher_")
    }
}

/// One sportsbook's markets for a game
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookmakerQuote {
    pub key: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub markets: Vec<MarketQuote>,
}
