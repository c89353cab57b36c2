use crate::domain::odds::MarketKind;
use crate::domain::sport::Sport;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A scored selection in one game market
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pick {
    pub market: MarketKind,
    pub sport: Sport,
    /// "Away @ Home"
    pub game: String,
    pub home_team: String,
    pub away_team: String,
    /// Team name, or "Over"/"Under" for totals
    pub pick: String,
    pub confidence: u8,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
    pub implied_probability: f64,
    pub commence_time: DateTime<Utc>,
}

/// A scored player prop selection. The sentinel value stands in when no
/// prop markets were available at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropPick {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub game: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub player: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub market: String,
    pub pick: String,
    #[serde(default)]
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub point: Option<f64>,
    pub confidence: u8,
}

impl PropPick {
    pub fn sentinel() -> Self {
        PropPick {
            game: String::new(),
            player: String::new(),
            market: String::new(),
            pick: "No props available".to_string(),
            price: 0.0,
            point: None,
            confidence: 0,
        }
    }

    pub fn is_sentinel(&self) -> bool {
        self.confidence == 0 && self.player.is_empty()
    }
}

/// The featured slate: one lock per market class plus the full pick list
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeaturedSelection {
    pub moneyline_lock: Option<Pick>,
    pub spread_lock: Option<Pick>,
    pub prop_lock: PropPick,
    pub picks: Vec<Pick>,
    pub generated_at: DateTime<Utc>,
}

impl FeaturedSelection {
    pub fn empty() -> Self {
        FeaturedSelection {
            moneyline_lock: None,
            spread_lock: None,
            prop_lock: PropPick::sentinel(),
            picks: Vec::new(),
            generated_at: Utc::now(),
        }
    }
}

/// Featured selection frozen for one calendar day
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayLocks {
    /// UTC date, "YYYY-MM-DD"
    pub date: String,
    pub featured: FeaturedSelection,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sentinel_prop_is_recognized() {
        let sentinel = PropPick::sentinel();
        assert!(sentinel.is_sentinel());
        assert_eq!(sentinel.pick, "No props available");

        let real = PropPick {
            game: "A @ B".to_string(),
            player: "Somebody".to_string(),
            market: "player_pass_tds".to_string(),
            pick: "Over 1.5".to_string(),
            price: -120.0,
            point: Some(1.5),
            confidence: 61,
        };
        assert!(!real.is_sentinel());
    }

    #[test]
    fn pick_serializes_camel_case_and_skips_missing_point() {
        let pick = Pick {
            market: MarketKind::Moneyline,
            sport: Sport::NFL,
            game: "Green Bay Packers @ Chicago Bears".to_string(),
            home_team: "Chicago Bears".to_string(),
            away_team: "Green Bay Packers".to_string(),
            pick: "Chicago Bears".to_string(),
            confidence: 67,
            price: -150.0,
            point: None,
            implied_probability: 0.6,
            commence_time: Utc::now(),
        };
        let json = serde_json::to_value(&pick).unwrap();
        assert_eq!(json["homeTeam"], "Chicago Bears");
        assert_eq!(json["impliedProbability"], 0.6);
        assert!(json.get("point").is_none());
    }
}
