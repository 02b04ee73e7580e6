//! Async operation actors
//!
//! Each actor is a plain function from its declared input to an output or
//! a failure. `Actors` binds them to the session's collaborators and runs
//! each invocation as its own tokio task, reporting back through the
//! results channel.

pub mod auth;
pub mod file;
pub mod resource;

use crate::config::EditorConfig;
use crate::effect::{ActorRequest, Invocation};
use crate::error::ActorError;
use crate::event::{ActorOutput, Event};
use crate::orchestrator::Collaborators;
use std::fmt;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use vocedit_auth::AuthConfig;

/// Actor runner
pub struct Actors {
    collaborators: Collaborators,
    auth_config: AuthConfig,
    suggested_file_name: String,
}

impl Actors {
    /// Bind actors to collaborators
    #[must_use]
    pub fn new(collaborators: Collaborators, config: &EditorConfig) -> Self {
        Self {
            collaborators,
            auth_config: config.auth.clone(),
            suggested_file_name: config.suggested_file_name.clone(),
        }
    }

    /// Run one request to completion
    ///
    /// # Errors
    /// The failure of the actor serving the request.
    pub async fn run(&self, request: ActorRequest) -> Result<ActorOutput, ActorError> {
        let c = &self.collaborators;
        match request {
            ActorRequest::OpenFile => file::open_file(c.file_picker.as_ref()).await,
            ActorRequest::SaveFile { file_handle } => {
                file::save_file(c.resource_manager.as_ref(), c.prettifier.as_ref(), file_handle)
                    .await
            }
            ActorRequest::SaveFileAs => {
                file::save_file_as(
                    c.resource_manager.as_ref(),
                    c.prettifier.as_ref(),
                    c.file_picker.as_ref(),
                    &self.suggested_file_name,
                )
                .await
            }
            ActorRequest::CreateResource(draft) => {
                resource::create_resource(c.resource_manager.as_ref(), draft)
            }
            ActorRequest::DeleteResource(iri) => {
                resource::delete_resource(c.resource_manager.as_ref(), iri)
            }
            ActorRequest::CheckAuth => auth::check_auth(&c.session, c.user_api.as_ref()).await,
            ActorRequest::SignIn => {
                auth::sign_in(&self.auth_config, &c.session, c.redirect.as_ref())
            }
        }
    }

    /// Run an invocation on its own task
    ///
    /// The result is delivered as `ActorDone` / `ActorFailed`. If the
    /// receiver is gone the result is dropped.
    pub fn spawn(self: &Arc<Self>, invocation: Invocation, results: mpsc::Sender<Event>) -> JoinHandle<()> {
        let actors = Arc::clone(self);
        tokio::spawn(async move {
            let Invocation { id, request } = invocation;
            let name = request.name();
            tracing::debug!(actor = name, invocation = %id, "Actor started");

            let event = match actors.run(request).await {
                Ok(output) => {
                    tracing::debug!(actor = name, invocation = %id, "Actor done");
                    Event::ActorDone {
                        invocation: id,
                        output,
                    }
                }
                Err(error) => {
                    if error.is_user_cancelled() {
                        tracing::debug!(actor = name, invocation = %id, %error, "Actor cancelled");
                    } else {
                        tracing::warn!(actor = name, invocation = %id, %error, "Actor failed");
                    }
                    Event::ActorFailed {
                        invocation: id,
                        error,
                    }
                }
            };

            if results.send(event).await.is_err() {
                tracing::debug!(invocation = %id, "Orchestrator gone; dropping actor result");
            }
        })
    }
}

impl fmt::Debug for Actors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Actors")
            .field("suggested_file_name", &self.suggested_file_name)
            .finish_non_exhaustive()
    }
}
