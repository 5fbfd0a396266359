//! Agent browser view-model
//!
//! State machine over [`BrowserState`]. All mutation happens on the caller's
//! (UI) thread; the network and location requests are either awaited directly
//! through [`AgentBrowserViewModel::initialize`] or run elsewhere and applied
//! through `apply_agents` / `apply_location` with the generation returned by
//! `begin_initialize`. Completions from an older generation are dropped.

use crate::browser::state::{BrowserState, LoadStatus, Modal};
use crate::config::Config;
use crate::error::BrowserError;
use crate::location::{self, LocationProvider, StaticLocationProvider};
use crate::models::{Ability, Agent, Coordinates};
use crate::repository::{AgentRepository, HttpAgentRepository};
use chrono::Utc;
use std::sync::Arc;

/// Notice shown when location access is refused
pub const PERMISSION_DENIED_NOTICE: &str = "Location permission not granted.";

/// View-model driving the agent browser
pub struct AgentBrowserViewModel {
    repository: Arc<dyn AgentRepository>,
    location: Arc<dyn LocationProvider>,
    state: BrowserState,
    generation: u64,
}

impl AgentBrowserViewModel {
    /// Create a view-model with an empty state
    pub fn new(repository: Arc<dyn AgentRepository>, location: Arc<dyn LocationProvider>) -> Self {
        Self {
            repository,
            location,
            state: BrowserState::new(),
            generation: 0,
        }
    }

    /// Create a view-model backed by the HTTP repository and the configured location
    pub fn from_config(config: &Config) -> Result<Self, BrowserError> {
        let repository = HttpAgentRepository::from_config(config)?;
        let location = StaticLocationProvider::from_config(&config.location);
        Ok(Self::new(Arc::new(repository), Arc::new(location)))
    }

    /// Read-only view of the state
    pub fn state(&self) -> &BrowserState {
        &self.state
    }

    /// Repository used for fetches
    pub fn repository(&self) -> Arc<dyn AgentRepository> {
        Arc::clone(&self.repository)
    }

    /// Location provider used at initialization
    pub fn location_provider(&self) -> Arc<dyn LocationProvider> {
        Arc::clone(&self.location)
    }

    /// Generation of the latest initialization (0 before the first)
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Fetch agents and the device position concurrently, then apply both
    ///
    /// Calling it again re-fetches and replaces the collection.
    pub async fn initialize(&mut self) {
        let generation = self.begin_initialize();
        let repository = self.repository();
        let provider = self.location_provider();

        let (agents, position) = tokio::join!(
            repository.fetch_all(),
            location::acquire(provider.as_ref())
        );

        self.apply_agents(generation, agents);
        self.apply_location(generation, position);
    }

    /// Mark the state as loading and start a new generation
    ///
    /// The current collection stays visible until the fetch completes.
    pub fn begin_initialize(&mut self) -> u64 {
        self.generation += 1;
        self.state.status = LoadStatus::Loading;
        self.state.notice = None;
        tracing::debug!(generation = self.generation, "Initializing agent browser");
        self.generation
    }

    /// Apply the result of the agent fetch started by `begin_initialize`
    ///
    /// Returns false (and leaves the state untouched) for a stale generation.
    pub fn apply_agents(
        &mut self,
        generation: u64,
        result: Result<Vec<Agent>, BrowserError>,
    ) -> bool {
        if generation != self.generation {
            tracing::warn!(
                generation = generation,
                current = self.generation,
                "Ignoring stale agent fetch"
            );
            return false;
        }

        match result {
            Ok(agents) => {
                tracing::info!(count = agents.len(), "Loaded agents");
                self.state.agents = agents;
                self.state.status = LoadStatus::Loaded;
                self.state.loaded_at = Some(Utc::now());
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to load agents");
                self.state.agents = Vec::new();
                self.state.status = LoadStatus::Failed(e.to_string());
            }
        }

        self.state.index = 0;
        // The open ability belonged to the old collection
        if self.state.is_ability_open() {
            self.state.modal = Modal::Idle;
        }
        true
    }

    /// Apply the result of the location request started by `begin_initialize`
    ///
    /// Location failures only clear the coordinate and set a notice.
    /// Returns false for a stale generation.
    pub fn apply_location(
        &mut self,
        generation: u64,
        result: Result<Coordinates, BrowserError>,
    ) -> bool {
        if generation != self.generation {
            tracing::warn!(
                generation = generation,
                current = self.generation,
                "Ignoring stale location reading"
            );
            return false;
        }

        match result {
            Ok(coordinates) => {
                tracing::debug!(
                    latitude = coordinates.latitude,
                    longitude = coordinates.longitude,
                    "Acquired device location"
                );
                self.state.coordinates = Some(coordinates);
            }
            Err(BrowserError::PermissionDenied(reason)) => {
                tracing::warn!(reason = %reason, "Location permission denied");
                self.state.coordinates = None;
                self.state.notice = Some(PERMISSION_DENIED_NOTICE.to_string());
            }
            Err(e) => {
                tracing::warn!(error = %e, "Failed to acquire device location");
                self.state.coordinates = None;
                self.state.notice = Some(e.to_string());
            }
        }
        true
    }

    /// Move to the next agent; no-op on the last one
    pub fn next(&mut self) {
        if self.state.has_next() {
            self.state.index += 1;
        }
    }

    /// Move to the previous agent; no-op on the first one
    pub fn previous(&mut self) {
        if self.state.has_previous() {
            self.state.index -= 1;
        }
    }

    /// Open the detail view for `ability`, replacing any open overlay
    pub fn select_ability(&mut self, ability: Ability) {
        self.state.modal = Modal::AbilityOpen(ability);
    }

    /// Close the ability detail view
    pub fn close_ability_detail(&mut self) {
        if self.state.is_ability_open() {
            self.state.modal = Modal::Idle;
        }
    }

    /// Open the location view
    pub fn open_map(&mut self) {
        self.state.modal = Modal::MapOpen;
    }

    /// Close the location view
    pub fn close_map(&mut self) {
        if self.state.is_map_open() {
            self.state.modal = Modal::Idle;
        }
    }

    /// Hide the current notice
    pub fn dismiss_notice(&mut self) {
        self.state.notice = None;
    }
}

impl std::fmt::Debug for AgentBrowserViewModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentBrowserViewModel")
            .field("state", &self.state)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    //! In-memory repository used by the browser tests

    use super::*;
    use async_trait::async_trait;

    pub struct FakeRepository {
        pub result: Result<Vec<Agent>, BrowserError>,
    }

    impl FakeRepository {
        pub fn with_agents(agents: Vec<Agent>) -> Arc<Self> {
            Arc::new(Self { result: Ok(agents) })
        }

        pub fn failing(error: BrowserError) -> Arc<Self> {
            Arc::new(Self { result: Err(error) })
        }
    }

    #[async_trait]
    impl AgentRepository for FakeRepository {
        async fn fetch_all(&self) -> Result<Vec<Agent>, BrowserError> {
            self.result.clone()
        }

        async fn fetch_by_id(&self, id: &str) -> Result<Agent, BrowserError> {
            self.result
                .clone()?
                .into_iter()
                .find(|agent| agent.id == id)
                .ok_or_else(|| BrowserError::NotFound(id.to_string()))
        }
    }
}
