//! Background loader
//!
//! Runs the agent fetch and the location request as two tokio tasks and hands
//! their completions back over a channel, so the UI thread never blocks.
//! Dropping the loader aborts whatever is still in flight.

use crate::browser::view_model::AgentBrowserViewModel;
use crate::error::BrowserError;
use crate::location;
use crate::models::{Agent, Coordinates};
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, error::TryRecvError, UnboundedReceiver, UnboundedSender};
use tokio::task::JoinHandle;

/// A completed initialization request
#[derive(Debug)]
pub enum LoadEvent {
    /// The agent fetch finished
    Agents {
        /// Generation the request belongs to
        generation: u64,
        /// Fetch outcome
        result: Result<Vec<Agent>, BrowserError>,
    },
    /// The location request finished
    Location {
        /// Generation the request belongs to
        generation: u64,
        /// Location outcome
        result: Result<Coordinates, BrowserError>,
    },
}

impl LoadEvent {
    /// Generation the event belongs to
    pub fn generation(&self) -> u64 {
        match self {
            LoadEvent::Agents { generation, .. } | LoadEvent::Location { generation, .. } => {
                *generation
            }
        }
    }

    /// Route the event to the matching view-model transition
    ///
    /// Returns false if the view-model dropped it as stale.
    pub fn apply_to(self, view_model: &mut AgentBrowserViewModel) -> bool {
        match self {
            LoadEvent::Agents { generation, result } => view_model.apply_agents(generation, result),
            LoadEvent::Location { generation, result } => {
                view_model.apply_location(generation, result)
            }
        }
    }
}

/// Spawns initialization requests and collects their completions
pub struct Loader {
    handle: Handle,
    tx: UnboundedSender<LoadEvent>,
    rx: UnboundedReceiver<LoadEvent>,
    tasks: Vec<JoinHandle<()>>,
}

impl Loader {
    /// Create a loader spawning onto `handle`
    pub fn new(handle: Handle) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self {
            handle,
            tx,
            rx,
            tasks: Vec::new(),
        }
    }

    /// Start (or restart) initialization of `view_model`
    ///
    /// Requests from a previous start are aborted; any completion that slipped
    /// through is dropped by the generation check.
    pub fn start(&mut self, view_model: &mut AgentBrowserViewModel) -> u64 {
        self.abort_all();
        let generation = view_model.begin_initialize();

        let repository = view_model.repository();
        let tx = self.tx.clone();
        self.tasks.push(self.handle.spawn(async move {
            let result = repository.fetch_all().await;
            // Receiver is gone only when the loader was dropped
            let _ = tx.send(LoadEvent::Agents { generation, result });
        }));

        let provider = view_model.location_provider();
        let tx = self.tx.clone();
        self.tasks.push(self.handle.spawn(async move {
            let result = location::acquire(provider.as_ref()).await;
            let _ = tx.send(LoadEvent::Location { generation, result });
        }));

        generation
    }

    /// Next completed event, without blocking
    pub fn try_recv(&mut self) -> Option<LoadEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Wait for the next completed event
    pub async fn recv(&mut self) -> Option<LoadEvent> {
        self.rx.recv().await
    }

    /// Apply every completed event to `view_model`; returns how many were applied
    pub fn pump(&mut self, view_model: &mut AgentBrowserViewModel) -> usize {
        // Prune before draining: a task sends before it finishes, so every
        // pruned task has its event queued already.
        self.tasks.retain(|task| !task.is_finished());

        let mut applied = 0;
        while let Some(event) = self.try_recv() {
            if event.apply_to(view_model) {
                applied += 1;
            }
        }
        applied
    }

    /// Whether a request may still deliver an event
    ///
    /// Stays true until a `pump` has drained the events of every finished task.
    pub fn is_busy(&self) -> bool {
        !self.tasks.is_empty()
    }

    fn abort_all(&mut self) {
        for task in self.tasks.drain(..) {
            task.abort();
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        if self.is_busy() {
            tracing::debug!("Aborting in-flight agent browser requests");
        }
        self.abort_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::browser::view_model::test_support::FakeRepository;
    use crate::location::{LocationProvider, PermissionStatus, StaticLocationProvider};
    use crate::models::fixtures;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::Duration;

    /// Location provider that counts started and completed readings
    #[derive(Default)]
    struct SlowGps {
        delay: Duration,
        started: AtomicUsize,
        completed: AtomicUsize,
    }

    impl SlowGps {
        fn new(delay: Duration) -> Arc<Self> {
            Arc::new(Self {
                delay,
                ..Default::default()
            })
        }

        async fn wait_started(&self, count: usize) {
            while self.started.load(Ordering::SeqCst) < count {
                tokio::task::yield_now().await;
            }
        }
    }

    #[async_trait]
    impl LocationProvider for SlowGps {
        async fn request_permission(&self) -> PermissionStatus {
            PermissionStatus::Granted
        }

        async fn current_position(&self) -> Result<Coordinates, BrowserError> {
            self.started.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.completed.fetch_add(1, Ordering::SeqCst);
            Ok(Coordinates {
                latitude: 1.0,
                longitude: 2.0,
            })
        }
    }

    fn slow_view_model(gps: &Arc<SlowGps>) -> AgentBrowserViewModel {
        AgentBrowserViewModel::new(
            FakeRepository::with_agents(fixtures::agents(3)),
            Arc::clone(gps) as Arc<dyn LocationProvider>,
        )
    }

    fn view_model(location: StaticLocationProvider) -> AgentBrowserViewModel {
        AgentBrowserViewModel::new(
            FakeRepository::with_agents(fixtures::agents(3)),
            Arc::new(location),
        )
    }

    #[tokio::test]
    async fn test_start_delivers_both_events() {
        let mut vm = view_model(StaticLocationProvider::new(Coordinates {
            latitude: 1.0,
            longitude: 2.0,
        }));
        let mut loader = Loader::new(Handle::current());
        let generation = loader.start(&mut vm);
        assert!(vm.state().is_loading());

        for _ in 0..2 {
            let event = loader.recv().await.unwrap();
            assert_eq!(event.generation(), generation);
            assert!(event.apply_to(&mut vm));
        }

        assert_eq!(vm.state().len(), 3);
        assert!(!vm.state().is_loading());
        assert!(vm.state().coordinates().is_some());
    }

    #[tokio::test]
    async fn test_restart_drops_stale_events() {
        let mut vm = view_model(StaticLocationProvider::denied());
        let mut loader = Loader::new(Handle::current());
        let first = loader.start(&mut vm);
        let second = loader.start(&mut vm);
        assert!(second > first);

        let mut current = 0;
        while current < 2 {
            let event = loader.recv().await.unwrap();
            if event.generation() == second {
                current += 1;
                assert!(event.apply_to(&mut vm));
            } else {
                assert!(!event.apply_to(&mut vm));
            }
        }

        assert_eq!(vm.state().len(), 3);
        assert!(vm.state().coordinates().is_none());
        assert!(vm.state().notice().is_some());
    }

    #[tokio::test]
    async fn test_pump_without_events_is_noop() {
        let mut vm = view_model(StaticLocationProvider::denied());
        let mut loader = Loader::new(Handle::current());
        assert_eq!(loader.pump(&mut vm), 0);
        assert!(!loader.is_busy());
        assert!(vm.state().is_empty());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_idle_loader_has_no_pending_events() {
        for _ in 0..500 {
            let mut vm = view_model(StaticLocationProvider::denied());
            let mut loader = Loader::new(Handle::current());
            loader.start(&mut vm);

            while loader.is_busy() || vm.state().is_loading() {
                loader.pump(&mut vm);
                tokio::task::yield_now().await;
            }

            assert!(loader.try_recv().is_none());
            assert_eq!(vm.state().len(), 3);
            assert!(vm.state().notice().is_some());
        }
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_drop_aborts_in_flight_requests() {
        let gps = SlowGps::new(Duration::from_millis(200));
        let mut vm = slow_view_model(&gps);
        let mut loader = Loader::new(Handle::current());
        loader.start(&mut vm);

        gps.wait_started(1).await;
        assert!(loader.is_busy());
        drop(loader);

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(gps.completed.load(Ordering::SeqCst), 0);
        assert!(vm.state().coordinates().is_none());
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_restart_aborts_previous_requests() {
        let gps = SlowGps::new(Duration::from_millis(200));
        let mut vm = slow_view_model(&gps);
        let mut loader = Loader::new(Handle::current());
        loader.start(&mut vm);
        gps.wait_started(1).await;

        let second = loader.start(&mut vm);
        gps.wait_started(2).await;

        let mut received = 0;
        while received < 2 {
            let event = loader.recv().await.unwrap();
            // The first fetch may have answered before it was aborted
            if event.generation() == second {
                assert!(event.apply_to(&mut vm));
                received += 1;
            } else {
                assert!(!event.apply_to(&mut vm));
            }
        }

        tokio::time::sleep(Duration::from_millis(400)).await;
        assert_eq!(gps.completed.load(Ordering::SeqCst), 1);
        assert!(vm.state().coordinates().is_some());
    }
}
