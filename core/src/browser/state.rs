//! Browser state
//!
//! Agent collection, cursor, modal and location data read by the rendering surface.

use crate::models::{Ability, Agent, Coordinates};
use chrono::{DateTime, Utc};

/// The single overlay shown on top of the agent card
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Modal {
    /// No overlay
    #[default]
    Idle,
    /// Ability detail view for this ability
    AbilityOpen(Ability),
    /// Location view
    MapOpen,
}

/// Progress of the agent collection fetch
#[derive(Debug, Clone, PartialEq, Default)]
pub enum LoadStatus {
    /// Nothing requested yet
    #[default]
    Idle,
    /// A fetch is in flight
    Loading,
    /// The last fetch succeeded (the collection may still be empty)
    Loaded,
    /// The last fetch failed with this message
    Failed(String),
}

/// In-memory view state
///
/// Invariant: `index < agents.len()` whenever `agents` is non-empty, and
/// `index == 0` when it is empty.
#[derive(Debug, Clone, Default)]
pub struct BrowserState {
    pub(crate) agents: Vec<Agent>,
    pub(crate) index: usize,
    pub(crate) modal: Modal,
    pub(crate) coordinates: Option<Coordinates>,
    pub(crate) status: LoadStatus,
    pub(crate) notice: Option<String>,
    pub(crate) loaded_at: Option<DateTime<Utc>>,
}

impl BrowserState {
    /// Create an empty state
    pub fn new() -> Self {
        Self::default()
    }

    /// Agents in fetch order
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Number of agents
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    /// Whether no agents are loaded
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Zero-based cursor; meaningless when the collection is empty
    pub fn index(&self) -> usize {
        self.index
    }

    /// The agent under the cursor, if any
    pub fn current_agent(&self) -> Option<&Agent> {
        self.agents.get(self.index)
    }

    /// Whether `previous()` would move the cursor
    pub fn has_previous(&self) -> bool {
        self.index > 0
    }

    /// Whether `next()` would move the cursor
    pub fn has_next(&self) -> bool {
        self.index + 1 < self.agents.len()
    }

    /// One-based position label, e.g. "2 / 24"; `None` when empty
    pub fn page_label(&self) -> Option<String> {
        if self.agents.is_empty() {
            None
        } else {
            Some(format!("{} / {}", self.index + 1, self.agents.len()))
        }
    }

    /// Current overlay
    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Ability shown in the detail view, if it is open
    pub fn selected_ability(&self) -> Option<&Ability> {
        match &self.modal {
            Modal::AbilityOpen(ability) => Some(ability),
            _ => None,
        }
    }

    /// Whether the ability detail view is open
    pub fn is_ability_open(&self) -> bool {
        matches!(self.modal, Modal::AbilityOpen(_))
    }

    /// Whether the location view is open
    pub fn is_map_open(&self) -> bool {
        matches!(self.modal, Modal::MapOpen)
    }

    /// Last acquired device position
    pub fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    /// Progress of the agent fetch
    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    /// Whether a fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.status == LoadStatus::Loading
    }

    /// User-visible notice (e.g. location permission refused)
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Time of the last successful fetch
    pub fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.loaded_at
    }
}
