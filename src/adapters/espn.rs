//! ESPN standings and injuries client
//!
//! Feeds the enhanced scoring variant with each team's win percentage and
//! open injury count. ESPN's public site API needs no key. Failures here
//! must never block pick generation, so every miss degrades to neutral
//! context and gets cached like a real snapshot.

use crate::domain::{names_match, Sport, TeamContext};
use crate::services::TeamContextProvider;
use anyhow::{Context, Result};
use async_trait::async_trait;
use dashmap::DashMap;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

const ESPN_API_BASE: &str = "https://site.api.espn.com/apis";

/// Standings move slowly; refetch a few times a day at most
const SNAPSHOT_TTL: Duration = Duration::from_secs(6 * 3600);

/// Context for one team as ESPN reports it
#[derive(Debug, Clone)]
pub struct TeamInfo {
    pub name: String,
    pub win_pct: f64,
    pub injuries: u32,
}

struct Snapshot {
    teams: Arc<Vec<TeamInfo>>,
    fetched_at: Instant,
}

// ── ESPN JSON deserialization structs ────────────────────────────

#[derive(Debug, Default, Deserialize)]
struct StandingsResponse {
    #[serde(default)]
    children: Vec<StandingsGroup>,
}

#[derive(Debug, Default, Deserialize)]
struct StandingsGroup {
    #[serde(default)]
    standings: GroupStandings,
}

#[derive(Debug, Default, Deserialize)]
struct GroupStandings {
    #[serde(default)]
    entries: Vec<StandingsEntry>,
}

#[derive(Debug, Deserialize)]
struct StandingsEntry {
    team: EntryTeam,
    #[serde(default)]
    stats: Vec<EntryStat>,
}

#[derive(Debug, Deserialize)]
struct EntryTeam {
    #[serde(rename = "displayName")]
    display_name: String,
}

#[derive(Debug, Deserialize)]
struct EntryStat {
    #[serde(default)]
    name: String,
    #[serde(default)]
    value: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
struct InjuriesResponse {
    #[serde(default)]
    injuries: Vec<TeamInjuryReport>,
}

#[derive(Debug, Deserialize)]
struct TeamInjuryReport {
    #[serde(rename = "displayName", default)]
    display_name: String,
    #[serde(default)]
    injuries: Vec<serde_json::Value>,
}

// ── Client ──────────────────────────────────────────────────────

/// ESPN-backed team context provider with a per-sport snapshot cache
pub struct EspnProvider {
    http: reqwest::Client,
    snapshots: DashMap<Sport, Snapshot>,
}

impl EspnProvider {
    pub fn new(timeout_secs: u64) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .expect("failed to build reqwest client");
        Self {
            http,
            snapshots: DashMap::new(),
        }
    }

    async fn snapshot(&self, sport: Sport) -> Arc<Vec<TeamInfo>> {
        if let Some(snap) = self.snapshots.get(&sport) {
            if snap.fetched_at.elapsed() < SNAPSHOT_TTL {
                return snap.teams.clone();
            }
        }

        let teams = Arc::new(self.fetch_teams(sport).await);
        self.snapshots.insert(
            sport,
            Snapshot {
                teams: teams.clone(),
                fetched_at: Instant::now(),
            },
        );
        teams
    }

    /// Standings merged with injury counts. A failed standings fetch
    /// caches an empty snapshot so every team scores neutral until the
    /// TTL expires; a failed injuries fetch just means zero injuries.
    async fn fetch_teams(&self, sport: Sport) -> Vec<TeamInfo> {
        let standings = match self.fetch_standings(sport).await {
            Ok(teams) => teams,
            Err(e) => {
                warn!("ESPN standings unavailable for {sport}: {e:#}");
                return Vec::new();
            }
        };

        let injuries = match self.fetch_injuries(sport).await {
            Ok(counts) => counts,
            Err(e) => {
                warn!("ESPN injuries unavailable for {sport}: {e:#}");
                HashMap::new()
            }
        };

        let teams: Vec<TeamInfo> = standings
            .into_iter()
            .map(|(name, win_pct)| {
                let injuries = injuries
                    .iter()
                    .find(|(team, _)| names_match(team, &name))
                    .map(|(_, count)| *count)
                    .unwrap_or(0);
                TeamInfo {
                    name,
                    win_pct,
                    injuries,
                }
            })
            .collect();

        debug!("ESPN: {} {} teams in snapshot", teams.len(), sport);
        teams
    }

    async fn fetch_standings(&self, sport: Sport) -> Result<Vec<(String, f64)>> {
        let url = format!("{}/v2/sports/{}/standings", ESPN_API_BASE, sport.espn_path());
        let data: StandingsResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("ESPN standings request failed")?
            .json()
            .await
            .context("ESPN standings JSON parse failed")?;
        Ok(parse_standings(data))
    }

    async fn fetch_injuries(&self, sport: Sport) -> Result<HashMap<String, u32>> {
        let url = format!(
            "{}/site/v2/sports/{}/injuries",
            ESPN_API_BASE,
            sport.espn_path()
        );
        let data: InjuriesResponse = self
            .http
            .get(&url)
            .send()
            .await
            .context("ESPN injuries request failed")?
            .json()
            .await
            .context("ESPN injuries JSON parse failed")?;
        Ok(parse_injuries(data))
    }
}

fn parse_standings(data: StandingsResponse) -> Vec<(String, f64)> {
    let mut teams = Vec::new();
    for group in data.children {
        for entry in group.standings.entries {
            let win_pct = entry
                .stats
                .iter()
                .find(|s| s.name == "winPercent")
                .and_then(|s| s.value)
                .unwrap_or(0.5);
            teams.push((entry.team.display_name, win_pct));
        }
    }
    teams
}

fn parse_injuries(data: InjuriesResponse) -> HashMap<String, u32> {
    data.injuries
        .into_iter()
        .map(|report| (report.display_name, report.injuries.len() as u32))
        .collect()
}

#[async_trait]
impl TeamContextProvider for EspnProvider {
    async fn team_contexts(
        &self,
        sport: Sport,
        teams: &[String],
    ) -> HashMap<String, TeamContext> {
        let snapshot = self.snapshot(sport).await;
        teams
            .iter()
            .map(|team| {
                let ctx = snapshot
                    .iter()
                    .find(|info| names_match(&info.name, team))
                    .map(|info| TeamContext {
                        win_pct: info.win_pct,
                        injuries: info.injuries,
                    })
                    .unwrap_or_default();
                (team.clone(), ctx)
            })
            .collect()
    }
}
