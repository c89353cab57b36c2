use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;

use crate::adapters::{CheckoutClient, EspnProvider, TheOddsApiClient};
use crate::auth::AuthService;
use crate::config::AppConfig;
use crate::engine::ScoringSettings;
use crate::error::Result;
use crate::services::{OddsCache, OddsSource, PickService, ResultsService, TeamContextProvider};
use crate::store::{JsonStore, StateStore};

/// Shared application state for API handlers
#[derive(Clone)]
pub struct AppState {
    pub picks: Arc<PickService>,
    pub results: Arc<ResultsService>,
    pub auth: Arc<AuthService>,
    pub store: Arc<dyn StateStore>,
    pub cache: Arc<OddsCache>,

    /// Checkout client, only set when a payment secret is configured
    pub checkout: Option<Arc<CheckoutClient>>,

    pub config: Arc<AppConfig>,

    /// Application start time
    pub start_time: DateTime<Utc>,
}

impl AppState {
    /// Wires the service graph from explicit adapters. Tests inject fakes here.
    pub fn new(
        config: AppConfig,
        source: Arc<dyn OddsSource>,
        context: Arc<dyn TeamContextProvider>,
        store: Arc<dyn StateStore>,
        checkout: Option<Arc<CheckoutClient>>,
    ) -> Self {
        // One lock serializes every read-modify-write of the persisted state.
        let write_lock = Arc::new(Mutex::new(()));

        let cache = Arc::new(OddsCache::new(
            source.clone(),
            Duration::from_secs(config.odds.cache_ttl_secs),
            config.odds.filter,
            config.odds.horizon_hours,
        ));

        let settings = ScoringSettings {
            variant: config.scoring.variant,
            spread_strategy: config.scoring.spread_strategy,
            spread_cap_margin: config.scoring.spread_cap_margin,
        };

        let picks = Arc::new(PickService::new(
            cache.clone(),
            source.clone(),
            context,
            store.clone(),
            write_lock.clone(),
            settings,
        ));

        let results = Arc::new(ResultsService::new(
            source,
            store.clone(),
            write_lock.clone(),
            config.odds.scores_days_from,
        ));

        let auth = Arc::new(AuthService::new(
            store.clone(),
            write_lock,
            config.auth.token_secret.clone(),
            config.auth.token_ttl_hours,
        ));

        Self {
            picks,
            results,
            auth,
            store,
            cache,
            checkout,
            config: Arc::new(config),
            start_time: Utc::now(),
        }
    }

    /// Builds the production adapters from configuration.
    pub fn from_config(config: AppConfig) -> Result<Self> {
        let source: Arc<dyn OddsSource> = Arc::new(TheOddsApiClient::new(
            &config.odds.api_key,
            &config.odds.region,
            config.odds.request_timeout_secs,
        )?);
        let context: Arc<dyn TeamContextProvider> =
            Arc::new(EspnProvider::new(config.odds.request_timeout_secs));
        let store: Arc<dyn StateStore> = Arc::new(JsonStore::new(&config.storage.data_dir));

        let checkout = if config.payment.secret_key.is_empty() {
            None
        } else {
            Some(Arc::new(CheckoutClient::new(
                &config.payment.secret_key,
                &config.payment.price_id,
                config.odds.request_timeout_secs,
            )?))
        };

        Ok(Self::new(config, source, context, store, checkout))
    }

    /// Get system uptime in seconds
    pub fn uptime_seconds(&self) -> i64 {
        (Utc::now() - self.start_time).num_seconds()
    }
}
