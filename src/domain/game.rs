use crate::domain::odds::{BookmakerQuote, MarketQuote, OutcomeQuote};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Final score for one team, as reported by the scores endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamScore {
    pub name: String,
    #[serde(default)]
    pub score: Option<String>,
}

impl TeamScore {
    pub fn points(&self) -> Option<i64> {
        self.score.as_deref().and_then(|s| s.trim().parse().ok())
    }
}

/// Provider game record. The odds endpoint omits `completed` and `scores`;
/// the scores endpoint omits `bookmakers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Game {
    pub id: String,
    #[serde(default)]
    pub sport_key: String,
    pub commence_time: DateTime<Utc>,
    pub home_team: String,
    pub away_team: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default)]
    pub bookmakers: Vec<BookmakerQuote>,
    #[serde(default)]
    pub scores: Option<Vec<TeamScore>>,
}

impl Game {
    pub fn matchup(&self) -> String {
        format!("{} @ {}", self.away_team, self.home_team)
    }

    /// First bookmaker market with the given key that quotes all listed names
    fn market_with(&self, key: &str, names: &[&str]) -> Option<&MarketQuote> {
        self.bookmakers.iter().flat_map(|b| &b.markets).find(|m| {
            m.key == key && names.iter().all(|n| m.outcome_named(n).is_some())
        })
    }

    /// Two-sided moneyline as (home, away), if any book quotes both
    pub fn moneyline(&self) -> Option<(&OutcomeQuote, &OutcomeQuote)> {
        let market = self.market_with("h2h", &[&self.home_team, &self.away_team])?;
        Some((
            market.outcome_named(&self.home_team)?,
            market.outcome_named(&self.away_team)?,
        ))
    }

    /// Two-sided spread quotes as (home, away)
    pub fn spreads(&self) -> Option<(&OutcomeQuote, &OutcomeQuote)> {
        let market = self.market_with("spreads", &[&self.home_team, &self.away_team])?;
        Some((
            market.outcome_named(&self.home_team)?,
            market.outcome_named(&self.away_team)?,
        ))
    }

    /// Totals quotes as (over, under)
    pub fn totals(&self) -> Option<(&OutcomeQuote, &OutcomeQuote)> {
        let market = self.market_with("totals", &["Over", "Under"])?;
        Some((market.outcome_named("Over")?, market.outcome_named("Under")?))
    }

    pub fn score_for(&self, team: &str) -> Option<i64> {
        self.scores
            .as_ref()?
            .iter()
            .find(|s| names_match(&s.name, team))
            .and_then(TeamScore::points)
    }

    /// Winning team name from final scores. None when scores are missing,
    /// unparsable, or tied.
    pub fn winner(&self) -> Option<&str> {
        let home = self.score_for(&self.home_team)?;
        let away = self.score_for(&self.away_team)?;
        match home.cmp(&away) {
            std::cmp::Ordering::Greater => Some(self.home_team.as_str()),
            std::cmp::Ordering::Less => Some(self.away_team.as_str()),
            std::cmp::Ordering::Equal => None,
        }
    }
}

/// Case-insensitive containment match for team names. Provider and context
/// feeds disagree on exact names ("Chicago Bears" vs "Bears"), so either
/// direction counts.
pub fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a.is_empty() || b.is_empty() {
        return false;
    }
    a.contains(&b) || b.contains(&a)
}

/// Which fetched games are retained for pick generation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FilterPolicy {
    /// Future games inside a bounded horizon, completed games excluded
    Upcoming,
    /// Games within a day of now in either direction
    AroundNow,
}

impl Default for FilterPolicy {
    fn default() -> Self {
        FilterPolicy::Upcoming
    }
}

impl FilterPolicy {
    pub fn retains(&self, game: &Game, now: DateTime<Utc>, horizon_hours: i64) -> bool {
        match self {
            FilterPolicy::Upcoming => {
                !game.completed
                    && game.commence_time > now
                    && game.commence_time <= now + Duration::hours(horizon_hours)
            }
            FilterPolicy::AroundNow => {
                (game.commence_time - now).num_seconds().abs() <= 24 * 3600
            }
        }
    }
}
