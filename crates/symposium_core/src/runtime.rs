//! # Runtime
//!
//! Launches one OS thread per actor plus an optional observer thread, all
//! sharing one [`Table`]. Stopping is stop-the-world: fire the broadcast,
//! close every wake channel, join every unit, then destroy the table.
//!
//! ```rust,ignore
//! let table = Table::new(TableConfig::default())?;
//! let trigger = table.shutdown_trigger();
//! let symposium = Symposium::launch(table, Some(Box::new(renderer)))?;
//!
//! // ... later, from a signal handler:
//! trigger.trigger();
//!
//! symposium.wait();
//! let report = symposium.stop()?;
//! ```

use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::error::{CoreError, CoreResult};
use crate::observer::{Frame, Observer};
use crate::table::Table;

/// Outcome of a finished session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionReport {
    /// Completed think/use cycles per actor.
    pub cycles: Vec<u64>,
    /// Final frame taken when the table was destroyed.
    pub last_frame: Frame,
    /// Wall time between launch and teardown.
    pub elapsed: Duration,
}

/// A running table: N actor threads and an optional observer.
///
/// Dropping a running symposium stops the world and joins every unit;
/// only [`stop`](Self::stop) also destroys the table and reports.
pub struct Symposium {
    table: Arc<Table>,
    actors: Vec<JoinHandle<u64>>,
    observer: Option<JoinHandle<()>>,
    started: Instant,
}

impl Symposium {
    /// Starts the observer (if any) and then each actor, `stagger` apart.
    ///
    /// Shutdown fired during the staggered launch stops launching; the
    /// actors already running are still joined by [`stop`](Self::stop).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Spawn`] if a thread cannot be started; every
    /// unit started so far is stopped and joined first.
    pub fn launch(table: Table, observer: Option<Box<dyn Observer>>) -> CoreResult<Self> {
        let table = Arc::new(table);
        let mut symposium = Self {
            table: Arc::clone(&table),
            actors: Vec::with_capacity(table.len()),
            observer: None,
            started: Instant::now(),
        };

        if let Some(observer) = observer {
            match spawn_observer(&table, observer) {
                Ok(handle) => symposium.observer = Some(handle),
                Err(e) => return Err(symposium.abort(e)),
            }
        }

        let token = table.shutdown_token();
        let stagger = table.config().stagger();
        for id in table.ring().ids() {
            if id > 0 && !token.sleep(stagger) {
                break;
            }
            match spawn_actor(&table, id) {
                Ok(handle) => symposium.actors.push(handle),
                Err(e) => return Err(symposium.abort(e)),
            }
        }

        info!(actors = symposium.actors.len(), "symposium running");
        Ok(symposium)
    }

    /// The shared table.
    #[must_use]
    pub fn table(&self) -> &Arc<Table> {
        &self.table
    }

    /// Blocks until stop-the-world is triggered from anywhere.
    pub fn wait(&self) {
        self.table.shutdown_token().wait();
    }

    /// Blocks until `limit` elapses or shutdown fires, whichever is first.
    pub fn run_for(&self, limit: Duration) {
        let _ = self.table.shutdown_token().sleep(limit);
    }

    /// Stops the world, joins every unit and destroys the table.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::ActorPanicked`] or
    /// [`CoreError::ObserverPanicked`] if a unit died; the remaining
    /// units are still joined.
    pub fn stop(mut self) -> CoreResult<SessionReport> {
        self.table.stop_the_world();
        let cycles = self.join_all()?;

        let elapsed = self.started.elapsed();
        let table = Arc::clone(&self.table);
        drop(self);
        let last_frame = Table::destroy(table)?;
        info!(
            meals = last_frame.total_meals(),
            elapsed_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX),
            "symposium stopped"
        );

        Ok(SessionReport {
            cycles,
            last_frame,
            elapsed,
        })
    }

    fn join_all(&mut self) -> CoreResult<Vec<u64>> {
        let mut failure = None;
        let mut cycles = Vec::with_capacity(self.actors.len());

        for (id, handle) in self.actors.drain(..).enumerate() {
            match handle.join() {
                Ok(done) => cycles.push(done),
                Err(_) => {
                    warn!(actor = id, "actor panicked");
                    cycles.push(0);
                    failure.get_or_insert(CoreError::ActorPanicked { id });
                }
            }
        }
        if let Some(observer) = self.observer.take() {
            if observer.join().is_err() {
                failure.get_or_insert(CoreError::ObserverPanicked);
            }
        }

        match failure {
            Some(e) => Err(e),
            None => Ok(cycles),
        }
    }

    fn abort(self, error: CoreError) -> CoreError {
        warn!(%error, "launch failed");
        // dropping stops and joins whatever was already started
        drop(self);
        error
    }
}

impl Drop for Symposium {
    fn drop(&mut self) {
        // no-op after `stop`, which has already drained every handle
        if self.actors.is_empty() && self.observer.is_none() {
            return;
        }
        self.table.stop_the_world();
        // panics are logged by join_all; nothing left to report them to
        let _ = self.join_all();
    }
}

fn spawn_actor(table: &Arc<Table>, id: usize) -> CoreResult<JoinHandle<u64>> {
    let name = format!("actor-{id}");
    let table = Arc::clone(table);
    thread::Builder::new()
        .name(name.clone())
        .spawn(move || match table.run_actor(id) {
            Ok(cycles) => cycles,
            Err(error) => {
                warn!(%error, "actor never sat down");
                0
            }
        })
        .map_err(|source| CoreError::Spawn { name, source })
}

fn spawn_observer(table: &Arc<Table>, mut observer: Box<dyn Observer>) -> CoreResult<JoinHandle<()>> {
    let name = "observer".to_string();
    let table = Arc::clone(table);
    thread::Builder::new()
        .name(name.clone())
        .spawn(move || observe(&table, observer.as_mut()))
        .map_err(|source| CoreError::Spawn { name, source })
}

fn observe(table: &Table, observer: &mut dyn Observer) {
    let token = table.shutdown_token();
    let refresh = table.config().refresh();

    loop {
        if let Err(error) = observer.observe(&table.frame()) {
            warn!(%error, "observer sink failed, no longer rendering");
            return;
        }
        if !token.sleep(refresh) {
            break;
        }
    }

    if let Err(error) = observer.finish(&table.frame()) {
        warn!(%error, "observer sink failed on final frame");
    }
}
