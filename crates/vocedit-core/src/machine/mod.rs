//! The two-region workflow machine
//!
//! `Machine` is a plain value: `send` consumes one event, updates state
//! and context, and returns the effects to run. It never performs I/O, so
//! the same state and context always produce the same transition. The
//! only collaborator it reads is the store's `is_editing` flag for the
//! `resource.create` guard.
//!
//! Each region remembers the invocation it is waiting on. Leaving a state
//! forgets it, so a result that arrives afterwards no longer matches and
//! is dropped without touching state or context.

mod auth;
mod project;

use crate::context::MachineContext;
use crate::effect::{ActorRequest, Effect, Invocation};
use crate::event::{Event, InvocationId, Region};
use crate::snapshot::Snapshot;
use crate::state::{AuthState, ProjectState};

/// Result of sending one event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Step {
    /// Whether any region reacted to the event
    pub handled: bool,
    /// Effects to run, in order
    pub effects: Vec<Effect>,
}

impl Step {
    fn unhandled() -> Self {
        Self::default()
    }
}

/// Parallel project/auth state machine with its context
#[derive(Debug)]
pub struct Machine {
    project: ProjectState,
    auth: AuthState,
    context: MachineContext,
    project_invocation: Option<InvocationId>,
    auth_invocation: Option<InvocationId>,
    next_generation: u64,
    started: bool,
}

impl Machine {
    /// Machine in its initial states, not yet started
    #[must_use]
    pub fn new(context: MachineContext) -> Self {
        Self {
            project: ProjectState::Empty,
            auth: AuthState::Checking,
            context,
            project_invocation: None,
            auth_invocation: None,
            next_generation: 0,
            started: false,
        }
    }

    /// Run the entry actions of the initial states
    ///
    /// Returns no effects when called again.
    pub fn start(&mut self) -> Vec<Effect> {
        if self.started {
            return Vec::new();
        }
        self.started = true;
        let mut effects = vec![Effect::ResetGraph];
        self.invoke(Region::Auth, ActorRequest::CheckAuth, &mut effects);
        effects
    }

    /// Process one event to completion
    pub fn send(&mut self, event: Event) -> Step {
        let mut effects = Vec::new();

        let handled = match event.invocation() {
            Some(invocation) => {
                if self.pending(invocation.region) != Some(invocation) {
                    tracing::debug!(%invocation, "Discarding stale actor result");
                    return Step::unhandled();
                }
                let handled = match invocation.region {
                    Region::Project => self.project_event(&event, &mut effects),
                    Region::Auth => self.auth_event(&event, &mut effects),
                };
                if !handled {
                    tracing::warn!(%invocation, event = %event, "Actor result did not match its state");
                }
                handled
            }
            None => {
                // Both regions see every UI event; each ignores what it
                // has no handler for.
                let project = self.project_event(&event, &mut effects);
                let auth = self.auth_event(&event, &mut effects);
                project || auth
            }
        };

        Step { handled, effects }
    }

    /// Current project state
    #[inline]
    #[must_use]
    pub fn project(&self) -> ProjectState {
        self.project
    }

    /// Current auth state
    #[inline]
    #[must_use]
    pub fn auth(&self) -> AuthState {
        self.auth
    }

    /// Current context
    #[inline]
    #[must_use]
    pub fn context(&self) -> &MachineContext {
        &self.context
    }

    /// Invocation a region is waiting on
    #[must_use]
    pub fn pending(&self, region: Region) -> Option<InvocationId> {
        match region {
            Region::Project => self.project_invocation,
            Region::Auth => self.auth_invocation,
        }
    }

    /// Immutable view of state and context
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.project, self.auth, &self.context)
    }

    fn invoke(&mut self, region: Region, request: ActorRequest, effects: &mut Vec<Effect>) {
        self.next_generation += 1;
        let id = InvocationId {
            region,
            generation: self.next_generation,
        };
        match region {
            Region::Project => self.project_invocation = Some(id),
            Region::Auth => self.auth_invocation = Some(id),
        }
        effects.push(Effect::Invoke(Invocation { id, request }));
    }
}
