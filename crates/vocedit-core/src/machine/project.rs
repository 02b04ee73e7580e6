//! Project region transitions

use super::Machine;
use crate::effect::{ActorRequest, Effect, Notification, Route};
use crate::event::{ActorOutput, Event, Region};
use crate::state::{OpenedState, ProjectState};

impl Machine {
    #[allow(clippy::too_many_lines)]
    pub(super) fn project_event(&mut self, event: &Event, effects: &mut Vec<Effect>) -> bool {
        use OpenedState as O;
        use ProjectState as P;

        match (self.project, event) {
            (P::Empty, Event::ProjectOpenFile) => {
                self.enter_project(P::OpeningLocalFile, effects);
                self.invoke(Region::Project, ActorRequest::OpenFile, effects);
            }
            (P::Empty, Event::ProjectNew { concept_scheme }) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.file_handle = None;
                effects.push(Effect::SeedProject(concept_scheme.clone()));
                effects.push(Effect::Notify(Notification::success("Project created")));
                effects.push(Effect::Navigate(Route::Resource(concept_scheme.clone())));
            }

            (P::OpeningLocalFile, Event::ProjectOpenFileCancel) => {
                self.enter_project(P::Empty, effects);
            }
            (
                P::OpeningLocalFile,
                Event::ActorDone {
                    output:
                        ActorOutput::FileOpened {
                            file_handle,
                            contents,
                        },
                    ..
                },
            ) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.file_handle = Some(file_handle.clone());
                effects.push(Effect::LoadGraph(contents.clone()));
                effects.push(Effect::Notify(Notification::success("Project opened")));
            }
            (P::OpeningLocalFile, Event::ActorFailed { error, .. }) => {
                self.enter_project(P::Empty, effects);
                if !error.is_user_cancelled() {
                    effects.push(Effect::Notify(
                        Notification::error("Failed to open project")
                            .with_description(error.to_string()),
                    ));
                }
            }

            // Shared by `idle` and `savingError`
            (P::Opened(O::Idle | O::SavingError), Event::ProjectClose) => {
                self.enter_project(P::Empty, effects);
                self.context.clear_project();
                effects.push(Effect::Notify(Notification::success("Project closed")));
            }
            (P::Opened(O::Idle | O::SavingError), Event::ProjectSave) => {
                self.context.saving_error = None;
                match self.context.file_handle.clone() {
                    Some(file_handle) => {
                        self.enter_project(P::Opened(O::Saving), effects);
                        self.invoke(
                            Region::Project,
                            ActorRequest::SaveFile { file_handle },
                            effects,
                        );
                    }
                    None => self.save_as(effects),
                }
            }
            (P::Opened(O::Idle | O::SavingError), Event::ProjectSaveAs) => {
                self.context.saving_error = None;
                self.save_as(effects);
            }

            (P::Opened(O::Idle), Event::ResourceDelete { resource_iri }) => {
                self.enter_project(P::Opened(O::DeleteResourceDialog), effects);
                self.context.resource_to_delete = Some(resource_iri.clone());
            }
            (P::Opened(O::Idle), Event::ResourceCreate) => {
                // First matching guard wins
                if self.context.resource_manager.is_editing() {
                    self.enter_project(P::Opened(O::Idle), effects);
                    effects.push(Effect::Notify(Notification::error(
                        "Please stop editing before creating a resource",
                    )));
                } else {
                    self.enter_project(P::Opened(O::CreateResourceDialog), effects);
                }
            }
            (P::Opened(O::Idle), Event::ValidationViewReport) => {
                self.enter_project(P::Opened(O::ValidationReport), effects);
            }

            (P::Opened(O::CreateResourceDialog), Event::ResourceCreateConfirm(draft)) => {
                self.enter_project(P::Opened(O::CreateResource), effects);
                self.invoke(
                    Region::Project,
                    ActorRequest::CreateResource(draft.clone()),
                    effects,
                );
            }
            (P::Opened(O::CreateResourceDialog), Event::ResourceCreateCancel) => {
                self.enter_project(P::Opened(O::Idle), effects);
            }

            (
                P::Opened(O::CreateResource),
                Event::ActorDone {
                    output: ActorOutput::ResourceCreated { iri, .. },
                    ..
                },
            ) => {
                self.enter_project(P::Opened(O::Idle), effects);
                effects.push(Effect::Notify(Notification::success("Resource created")));
                effects.push(Effect::Navigate(Route::Resource(iri.clone())));
            }
            (P::Opened(O::CreateResource), Event::ActorFailed { error, .. }) => {
                self.enter_project(P::Opened(O::Idle), effects);
                effects.push(Effect::Notify(Notification::error(format!(
                    "Failed to create resource: {error}"
                ))));
            }

            (P::Opened(O::DeleteResourceDialog), Event::ResourceDeleteConfirm) => {
                match self.context.resource_to_delete.clone() {
                    Some(iri) => {
                        self.enter_project(P::Opened(O::DeleteResource), effects);
                        self.invoke(Region::Project, ActorRequest::DeleteResource(iri), effects);
                    }
                    None => self.enter_project(P::Opened(O::Idle), effects),
                }
            }
            (P::Opened(O::DeleteResourceDialog), Event::ResourceDeleteCancel) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.resource_to_delete = None;
            }

            (
                P::Opened(O::DeleteResource),
                Event::ActorDone {
                    output: ActorOutput::ResourceDeleted { iri },
                    ..
                },
            ) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.resource_to_delete = None;
                effects.push(Effect::Notify(Notification::success("Resource deleted")));
                effects.push(Effect::LeaveResource(iri.clone()));
            }
            (P::Opened(O::DeleteResource), Event::ActorFailed { error, .. }) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.resource_to_delete = None;
                effects.push(Effect::Notify(Notification::error(format!(
                    "Failed to delete resource: {error}"
                ))));
            }

            (P::Opened(O::ValidationReport), Event::ValidationViewReportClose) => {
                self.enter_project(P::Opened(O::Idle), effects);
            }

            (
                P::Opened(O::Saving | O::SavingAs),
                Event::ActorDone {
                    output: ActorOutput::FileSaved { file_handle },
                    ..
                },
            ) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.file_handle = Some(file_handle.clone());
                effects.push(Effect::Notify(Notification::success(
                    "Project saved successfully",
                )));
            }
            (P::Opened(O::Saving | O::SavingAs), Event::ActorFailed { error, .. }) => {
                if error.is_user_cancelled() {
                    // Save-as picker dismissed
                    self.enter_project(P::Opened(O::Idle), effects);
                } else {
                    self.enter_project(P::Opened(O::SavingError), effects);
                    self.context.saving_error = Some(format!("Failed to save project file: {error}"));
                }
            }
            (P::Opened(O::Saving | O::SavingAs), Event::ProjectSaveCancel) => {
                self.enter_project(P::Opened(O::Idle), effects);
                effects.push(Effect::Notify(Notification::error("Save project cancelled")));
            }

            (P::Opened(O::SavingError), Event::ProjectSaveCancel) => {
                self.enter_project(P::Opened(O::Idle), effects);
                self.context.saving_error = None;
            }

            _ => return false,
        }
        true
    }

    fn save_as(&mut self, effects: &mut Vec<Effect>) {
        self.enter_project(ProjectState::Opened(OpenedState::SavingAs), effects);
        self.invoke(Region::Project, ActorRequest::SaveFileAs, effects);
    }

    /// Exit the current project state and enter `target`
    fn enter_project(&mut self, target: ProjectState, effects: &mut Vec<Effect>) {
        self.project_invocation = None;
        if target == ProjectState::Empty {
            effects.push(Effect::ResetGraph);
        }
        self.project = target;
    }
}
