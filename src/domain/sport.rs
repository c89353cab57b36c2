use crate::error::LockboxError;
use serde::{Deserialize, Serialize};

/// Supported sports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sport {
    NFL,
    MLB,
    NHL,
    NCAAF,
}

impl Sport {
    pub const ALL: [Sport; 4] = [Sport::NFL, Sport::MLB, Sport::NHL, Sport::NCAAF];

    /// Sport key used by The Odds API
    pub fn api_key(&self) -> &'static str {
        match self {
            Sport::NFL => "americanfootball_nfl",
            Sport::MLB => "baseball_mlb",
            Sport::NHL => "icehockey_nhl",
            Sport::NCAAF => "americanfootball_ncaaf",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Sport::NFL => "NFL",
            Sport::MLB => "MLB",
            Sport::NHL => "NHL",
            Sport::NCAAF => "College Football",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Sport::NFL => "nfl",
            Sport::MLB => "mlb",
            Sport::NHL => "nhl",
            Sport::NCAAF => "ncaaf",
        }
    }

    /// League path segment on the ESPN site API
    pub fn espn_path(&self) -> &'static str {
        match self {
            Sport::NFL => "football/nfl",
            Sport::MLB => "baseball/mlb",
            Sport::NHL => "hockey/nhl",
            Sport::NCAAF => "football/college-football",
        }
    }

    /// Player-prop market keys requested from the event-odds endpoint
    pub fn prop_markets(&self) -> &'static str {
        match self {
            Sport::NFL => "player_pass_tds,player_anytime_td",
            Sport::MLB => "batter_home_runs,pitcher_strikeouts",
            Sport::NHL => "player_points,player_shots_on_goal",
            Sport::NCAAF => "player_pass_tds,player_anytime_td",
        }
    }
}

impl std::str::FromStr for Sport {
    type Err = LockboxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "nfl" => Ok(Sport::NFL),
            "mlb" => Ok(Sport::MLB),
            "nhl" => Ok(Sport::NHL),
            "ncaaf" => Ok(Sport::NCAAF),
            other => Err(LockboxError::UnknownSport(other.to_string())),
        }
    }
}

impl std::fmt::Display for Sport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
