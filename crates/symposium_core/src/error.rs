//! # Core Error Types
//!
//! Every error here is a startup or teardown error. Once the table is
//! running, correctness is established by construction and nothing in the
//! steady state can fail.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while building, running or tearing down a table.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A ring needs at least one actor.
    #[error("a table needs at least one actor")]
    NoActors,

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// An actor id outside `[0, N)` was used.
    #[error("actor {id} out of range for a table of {actors}")]
    ActorOutOfRange {
        /// The offending id.
        id: usize,
        /// Number of actors at the table.
        actors: usize,
    },

    /// The configuration file could not be read.
    #[error("failed to read config {path}: {source}")]
    ConfigRead {
        /// Path that was read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for [`crate::TableConfig`].
    #[error("failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    /// The OS refused to start a thread.
    #[error("failed to spawn {name}: {source}")]
    Spawn {
        /// Name of the thread.
        name: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An actor thread panicked (an invariant assertion fired).
    #[error("actor {id} panicked")]
    ActorPanicked {
        /// Id of the actor.
        id: usize,
    },

    /// The observer thread panicked.
    #[error("observer panicked")]
    ObserverPanicked,

    /// `destroy` was called while another handle to the table is alive.
    #[error("table is still shared by a running unit")]
    TableStillShared,
}

/// Result type for core operations.
pub type CoreResult<T> = Result<T, CoreError>;
