//! Agent Browser Core Library
//!
//! Data access and view-state for the agent browser. The GUI in the
//! workspace root renders what this crate exposes.

pub mod browser;
pub mod config;
pub mod error;
pub mod location;
pub mod models;
pub mod repository;

pub use browser::{AgentBrowserViewModel, BrowserState, LoadEvent, LoadStatus, Loader, Modal};
pub use config::Config;
pub use error::BrowserError;
pub use location::{LocationProvider, PermissionStatus, StaticLocationProvider};
pub use models::{Ability, Agent, Coordinates, Role};
pub use repository::{AgentRepository, HttpAgentRepository};
