use crate::domain::{FilterPolicy, Game, Sport};
use crate::error::Result;
use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Upstream odds provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait OddsSource: Send + Sync {
    /// Upcoming games with moneyline, spread, and totals quotes
    async fn fetch_odds(&self, sport: Sport) -> Result<Vec<Game>>;

    /// Recently completed and in-progress games with final scores
    async fn fetch_scores(&self, sport: Sport, days_from: u8) -> Result<Vec<Game>>;

    /// Player prop quotes for a single event
    async fn fetch_event_props(&self, sport: Sport, event_id: &str) -> Result<Game>;
}

#[derive(Default)]
struct Slot {
    games: Vec<Game>,
    fetched_at: Option<Instant>,
}

/// Per-sport odds snapshot cache. A slot's mutex doubles as single-flight:
/// concurrent callers for the same sport queue behind one upstream fetch.
/// Failed fetches never stamp freshness, so the next caller retries.
pub struct OddsCache {
    source: Arc<dyn OddsSource>,
    slots: DashMap<Sport, Arc<Mutex<Slot>>>,
    ttl: Duration,
    policy: FilterPolicy,
    horizon_hours: i64,
}

impl OddsCache {
    pub fn new(
        source: Arc<dyn OddsSource>,
        ttl: Duration,
        policy: FilterPolicy,
        horizon_hours: i64,
    ) -> Self {
        Self {
            source,
            slots: DashMap::new(),
            ttl,
            policy,
            horizon_hours,
        }
    }

    /// Retained games for a sport, served from cache within the TTL
    pub async fn games(&self, sport: Sport) -> Result<Vec<Game>> {
        // clone the slot handle out before locking so the map shard
        // is not held across an await
        let slot = self
            .slots
            .entry(sport)
            .or_insert_with(|| Arc::new(Mutex::new(Slot::default())))
            .clone();

        let mut slot = slot.lock().await;
        if let Some(fetched_at) = slot.fetched_at {
            if fetched_at.elapsed() < self.ttl {
                return Ok(slot.games.clone());
            }
        }

        let fetched = match self.source.fetch_odds(sport).await {
            Ok(games) => games,
            Err(e) => {
                warn!("odds fetch failed for {sport}: {e}");
                return Err(e);
            }
        };

        let now = Utc::now();
        let games: Vec<Game> = fetched
            .into_iter()
            .filter(|g| self.policy.retains(g, now, self.horizon_hours))
            .collect();

        info!("odds snapshot refreshed: {} {} games retained", games.len(), sport);
        slot.games = games.clone();
        slot.fetched_at = Some(Instant::now());
        Ok(games)
    }

    /// Size of the cached snapshot without triggering a fetch
    pub async fn cached_count(&self, sport: Sport) -> usize {
        let Some(slot) = self.slots.get(&sport).map(|s| s.clone()) else {
            return 0;
        };
        slot.lock().await.games.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LockboxError;
    use chrono::Duration as ChronoDuration;

    fn upcoming_game(id: &str) -> Game {
        Game {
            id: id.to_string(),
            sport_key: "americanfootball_nfl".to_string(),
            commence_time: Utc::now() + ChronoDuration::hours(6),
            home_team: "Chicago Bears".to_string(),
            away_team: "Green Bay Packers".to_string(),
            completed: false,
            bookmakers: Vec::new(),
            scores: None,
        }
    }

    fn stale_game(id: &str) -> Game {
        let mut game = upcoming_game(id);
        game.commence_time = Utc::now() - ChronoDuration::hours(2);
        game
    }

    fn cache_with(source: MockOddsSource) -> OddsCache {
        OddsCache::new(
            Arc::new(source),
            Duration::from_secs(300),
            FilterPolicy::Upcoming,
            168,
        )
    }

    #[tokio::test]
    async fn second_call_within_ttl_serves_cache() {
        let mut source = MockOddsSource::new();
        source
            .expect_fetch_odds()
            .times(1)
            .returning(|_| Ok(vec![upcoming_game("g1")]));

        let cache = cache_with(source);
        assert_eq!(cache.games(Sport::NFL).await.unwrap().len(), 1);
        assert_eq!(cache.games(Sport::NFL).await.unwrap().len(), 1);
        assert_eq!(cache.cached_count(Sport::NFL).await, 1);
    }

    #[tokio::test]
    async fn filter_drops_started_games() {
        let mut source = MockOddsSource::new();
        source
            .expect_fetch_odds()
            .times(1)
            .returning(|_| Ok(vec![upcoming_game("g1"), stale_game("g2")]));

        let cache = cache_with(source);
        let games = cache.games(Sport::NFL).await.unwrap();
        assert_eq!(games.len(), 1);
        assert_eq!(games[0].id, "g1");
    }

    #[tokio::test]
    async fn failed_fetch_does_not_stamp_freshness() {
        let mut source = MockOddsSource::new();
        let mut seq = mockall::Sequence::new();
        source
            .expect_fetch_odds()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(LockboxError::Upstream("boom".to_string())));
        source
            .expect_fetch_odds()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(vec![upcoming_game("g1")]));

        let cache = cache_with(source);
        assert!(cache.games(Sport::NFL).await.is_err());
        assert_eq!(cache.cached_count(Sport::NFL).await, 0);
        // retry goes back upstream instead of serving the failure
        assert_eq!(cache.games(Sport::NFL).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn sports_are_cached_independently() {
        let mut source = MockOddsSource::new();
        source
            .expect_fetch_odds()
            .times(2)
            .returning(|sport| match sport {
                Sport::NFL => Ok(vec![upcoming_game("nfl-1")]),
                _ => Ok(vec![]),
            });

        let cache = cache_with(source);
        assert_eq!(cache.games(Sport::NFL).await.unwrap().len(), 1);
        assert_eq!(cache.games(Sport::MLB).await.unwrap().len(), 0);
        assert_eq!(cache.cached_count(Sport::NFL).await, 1);
        assert_eq!(cache.cached_count(Sport::MLB).await, 0);
    }
}
