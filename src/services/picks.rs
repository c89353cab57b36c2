use crate::domain::{
    DayLocks, FeaturedSelection, Game, HistoryEntry, Pick, PropPick, ScoringVariant, Sport,
    TeamContext,
};
use crate::engine::{generate_picks, generate_prop_picks, select_featured, ScoringSettings};
use crate::error::Result;
use crate::services::odds::{OddsCache, OddsSource};
use crate::store::StateStore;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

/// How many upcoming events get a prop-odds lookup per slate. Each event
/// costs a separate upstream request.
const PROP_EVENT_LIMIT: usize = 5;

/// Standings and injury context, keyed back by the requested team names.
/// Implementations degrade to neutral context rather than failing.
#[async_trait::async_trait]
pub trait TeamContextProvider: Send + Sync {
    async fn team_contexts(
        &self,
        sport: Sport,
        teams: &[String],
    ) -> HashMap<String, TeamContext>;
}

/// Pick generation and the daily featured slate
pub struct PickService {
    cache: Arc<OddsCache>,
    source: Arc<dyn OddsSource>,
    context: Arc<dyn TeamContextProvider>,
    store: Arc<dyn StateStore>,
    write_lock: Arc<Mutex<()>>,
    settings: ScoringSettings,
}

impl PickService {
    pub fn new(
        cache: Arc<OddsCache>,
        source: Arc<dyn OddsSource>,
        context: Arc<dyn TeamContextProvider>,
        store: Arc<dyn StateStore>,
        write_lock: Arc<Mutex<()>>,
        settings: ScoringSettings,
    ) -> Self {
        Self {
            cache,
            source,
            context,
            store,
            write_lock,
            settings,
        }
    }

    /// Scored picks for every retained game in a sport
    pub async fn picks(&self, sport: Sport) -> Result<Vec<Pick>> {
        let games = self.cache.games(sport).await?;
        Ok(self.generate(sport, &games).await)
    }

    async fn generate(&self, sport: Sport, games: &[Game]) -> Vec<Pick> {
        let contexts = match self.settings.variant {
            ScoringVariant::Simple => HashMap::new(),
            ScoringVariant::Enhanced => {
                let mut teams: Vec<String> = Vec::new();
                for game in games {
                    teams.push(game.home_team.clone());
                    teams.push(game.away_team.clone());
                }
                self.context.team_contexts(sport, &teams).await
            }
        };
        generate_picks(sport, games, &contexts, self.settings)
    }

    /// Player prop picks across the next few events. Per-event prop
    /// lookups that fail are skipped, not fatal.
    pub async fn props(&self, sport: Sport) -> Result<Vec<PropPick>> {
        let games = self.cache.games(sport).await?;

        let mut events = Vec::new();
        for game in games.iter().take(PROP_EVENT_LIMIT) {
            match self.source.fetch_event_props(sport, &game.id).await {
                Ok(event) => events.push(event),
                Err(e) => debug!("prop odds unavailable for event {}: {e}", game.id),
            }
        }

        Ok(generate_prop_picks(&events))
    }

    /// Today's featured slate. The first request of a UTC day generates
    /// and locks it; every later request that day replays the stored copy.
    pub async fn featured(&self, sport: Sport) -> Result<FeaturedSelection> {
        let today = Utc::now().format("%Y-%m-%d").to_string();

        if let Some(locks) = self.store.load_day_locks().await? {
            if locks.date == today {
                return Ok(locks.featured);
            }
        }

        let picks = self.picks(sport).await?;
        let props = self.props(sport).await?;
        let featured = select_featured(&picks, &props);

        let _guard = self.write_lock.lock().await;
        // another request may have locked the day while we were generating
        if let Some(locks) = self.store.load_day_locks().await? {
            if locks.date == today {
                return Ok(locks.featured);
            }
        }

        let locks = DayLocks {
            date: today.clone(),
            featured: featured.clone(),
        };
        self.store.save_day_locks(&locks).await?;

        let mut history = self.store.load_history().await?;
        history.insert(
            0,
            HistoryEntry {
                id: Uuid::new_v4(),
                date: today.clone(),
                featured: featured.clone(),
                checked: false,
                result: None,
            },
        );
        self.store.save_history(&history).await?;

        info!("featured selection locked for {today}");
        Ok(featured)
    }
}
