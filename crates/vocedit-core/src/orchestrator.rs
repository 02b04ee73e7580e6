//! Event-loop driver
//!
//! Owns the machine and processes one event at a time: step the machine,
//! apply the effects, spawn requested actors, publish a snapshot. Actor
//! results come back on an internal channel and go through the same path.

use crate::actors::Actors;
use crate::bridge::{EffectBridge, Navigator, Notifier};
use crate::config::EditorConfig;
use crate::context::MachineContext;
use crate::effect::Effect;
use crate::event::Event;
use crate::file::FilePicker;
use crate::machine::Machine;
use crate::prettify::Prettify;
use crate::snapshot::Snapshot;
use std::sync::Arc;
use tokio::sync::{mpsc, watch};
use vocedit_auth::{Redirect, Session, UserApi};
use vocedit_graph::ResourceManager;

/// Everything the orchestrator talks to
#[derive(Clone)]
pub struct Collaborators {
    /// Data graph store
    pub resource_manager: Arc<dyn ResourceManager>,
    /// Open and save-as dialogs
    pub file_picker: Arc<dyn FilePicker>,
    /// Formatter applied before every write
    pub prettifier: Arc<dyn Prettify>,
    /// Token and PKCE verifier owner
    pub session: Arc<Session>,
    /// Profile lookup
    pub user_api: Arc<dyn UserApi>,
    /// Sign-in navigation
    pub redirect: Arc<dyn Redirect>,
    /// Toast sink
    pub notifier: Arc<dyn Notifier>,
    /// Route history
    pub navigator: Arc<dyn Navigator>,
}

/// Sender half for UI events
pub type EventSender = mpsc::Sender<Event>;

/// Channel sized for UI events
#[must_use]
pub fn event_channel(config: &EditorConfig) -> (EventSender, mpsc::Receiver<Event>) {
    mpsc::channel(config.channel_capacity())
}

/// The workflow orchestrator
pub struct Orchestrator {
    machine: Machine,
    bridge: EffectBridge,
    actors: Arc<Actors>,
    results_tx: mpsc::Sender<Event>,
    results_rx: mpsc::Receiver<Event>,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl Orchestrator {
    /// Create an orchestrator; nothing runs until `start`
    #[must_use]
    pub fn new(config: &EditorConfig, collaborators: Collaborators) -> Self {
        let machine = Machine::new(MachineContext::new(Arc::clone(
            &collaborators.resource_manager,
        )));
        let bridge = EffectBridge::new(
            Arc::clone(&collaborators.resource_manager),
            Arc::clone(&collaborators.session),
            Arc::clone(&collaborators.notifier),
            Arc::clone(&collaborators.navigator),
        );
        let (results_tx, results_rx) = mpsc::channel(config.channel_capacity());
        let (snapshot_tx, _) = watch::channel(machine.snapshot());

        Self {
            machine,
            bridge,
            actors: Arc::new(Actors::new(collaborators, config)),
            results_tx,
            results_rx,
            snapshot_tx,
        }
    }

    /// Run initial entry actions (graph reset, auth check)
    ///
    /// Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        let effects = self.machine.start();
        self.apply(effects);
        self.publish();
    }

    /// Process one event to completion
    ///
    /// Returns whether any region reacted.
    pub fn process(&mut self, event: Event) -> bool {
        let name = event.name();
        let step = self.machine.send(event);
        if step.handled {
            tracing::debug!(
                event = name,
                project = %self.machine.project(),
                auth = %self.machine.auth(),
                "Processed event"
            );
            self.apply(step.effects);
            self.publish();
        } else {
            tracing::debug!(event = name, "Event not handled in current state");
        }
        step.handled
    }

    /// Wait for the next actor result without processing it
    pub async fn next_result(&mut self) -> Option<Event> {
        self.results_rx.recv().await
    }

    /// Wait for the next actor result and process it
    ///
    /// Returns whether it was applied; stale results are not.
    pub async fn settle_next(&mut self) -> bool {
        match self.next_result().await {
            Some(event) => self.process(event),
            None => false,
        }
    }

    /// Drive the orchestrator until the UI channel closes
    pub async fn run(mut self, mut events: mpsc::Receiver<Event>) {
        self.start();
        loop {
            let event = tokio::select! {
                event = events.recv() => match event {
                    Some(event) => event,
                    None => break,
                },
                Some(result) = self.results_rx.recv() => result,
            };
            self.process(event);
        }
        tracing::debug!("Event channel closed; orchestrator stopped");
    }

    /// Subscribe to snapshots
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Current snapshot
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.machine.snapshot()
    }

    /// The underlying machine
    #[inline]
    #[must_use]
    pub fn machine(&self) -> &Machine {
        &self.machine
    }

    fn apply(&self, effects: Vec<Effect>) {
        for invocation in self.bridge.apply(effects) {
            self.actors.spawn(invocation, self.results_tx.clone());
        }
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.machine.snapshot());
    }
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("machine", &self.machine)
            .finish_non_exhaustive()
    }
}
