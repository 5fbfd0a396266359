//! Browser view-state
//!
//! `BrowserState` is the data the rendering surface reads,
//! `AgentBrowserViewModel` the state machine that mutates it, and `Loader`
//! the bridge that runs its requests on a tokio runtime.

pub mod loader;
pub mod state;
pub mod view_model;

pub use loader::{LoadEvent, Loader};
pub use state::{BrowserState, LoadStatus, Modal};
pub use view_model::AgentBrowserViewModel;
