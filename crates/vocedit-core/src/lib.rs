//! VocEdit Core - the editing workflow orchestrator
//!
//! A parallel state machine with two regions sharing one context:
//! - Project: empty, opening, opened (resource create/delete dialogs,
//!   validation report), saving and save errors
//! - Auth: checking, authenticated (with a profile panel), unauthenticated,
//!   authenticating
//!
//! Long-running work (file I/O, pretty-printing, network) runs in actors
//! on their own tasks. Their results re-enter as events and are applied
//! only if the state that started them is still current.
//!
//! # Architecture
//!
//! ```text
//! UI events ──► Orchestrator ──► Machine::send ──► effects
//!                    ▲                               │
//!                    │                 EffectBridge ◄┤ (store, toasts,
//!                    │                               │  routes, session)
//!                    └──── actor results ◄── Actors ◄┘ (spawned tasks)
//! ```

#![warn(unreachable_pub)]

pub mod actors;
pub mod bridge;
pub mod config;
pub mod context;
pub mod effect;
pub mod error;
pub mod event;
pub mod file;
pub mod machine;
pub mod orchestrator;
pub mod prettify;
pub mod snapshot;
pub mod state;

pub use bridge::{EffectBridge, HistoryNavigator, Navigator, Notifier, TracingNotifier};
pub use config::EditorConfig;
pub use context::MachineContext;
pub use effect::{ActorRequest, Effect, Invocation, Level, Notification, Route};
pub use error::{ActorError, ConfigError, PrettifyError};
pub use event::{ActorOutput, Event, InvocationId, Region, ResourceDraft};
pub use file::{FileAccess, FileHandle, FilePicker, LocalFile, MemoryFile};
pub use machine::{Machine, Step};
pub use orchestrator::{event_channel, Collaborators, EventSender, Orchestrator};
pub use prettify::{Prettify, WorkerPrettifier};
pub use snapshot::Snapshot;
pub use state::{AuthState, OpenedState, ProfileView, ProjectState, Tag};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
