//! Auth region transitions

use super::Machine;
use crate::effect::{ActorRequest, Effect, Notification};
use crate::event::{ActorOutput, Event, Region};
use crate::state::{AuthState, ProfileView};

impl Machine {
    pub(super) fn auth_event(&mut self, event: &Event, effects: &mut Vec<Effect>) -> bool {
        use AuthState as A;

        match (self.auth, event) {
            (
                A::Checking,
                Event::ActorDone {
                    output: ActorOutput::AuthChecked(check),
                    ..
                },
            ) => match (check.is_authenticated, &check.info) {
                (true, Some(info)) => {
                    self.enter_auth(A::Authenticated(ProfileView::Empty));
                    self.context.auth = Some(info.clone());
                }
                _ => {
                    self.enter_auth(A::Unauthenticated);
                    self.context.auth = None;
                }
            },
            (A::Checking, Event::ActorFailed { .. }) => {
                self.enter_auth(A::Unauthenticated);
                self.context.auth = None;
            }

            (A::Authenticated(ProfileView::Empty), Event::AuthProfile) => {
                self.enter_auth(A::Authenticated(ProfileView::Profile));
            }
            (A::Authenticated(ProfileView::Profile), Event::AuthProfileClose) => {
                self.enter_auth(A::Authenticated(ProfileView::Empty));
            }
            (A::Authenticated(_), Event::AuthLogout) => {
                self.enter_auth(A::Unauthenticated);
                self.context.auth = None;
                effects.push(Effect::EvictSession);
            }

            (A::Unauthenticated, Event::AuthRequest) => {
                self.enter_auth(A::Authenticating);
                self.invoke(Region::Auth, ActorRequest::SignIn, effects);
            }
            (A::Unauthenticated | A::Authenticating, Event::AuthRecheck) => {
                self.enter_checking(effects);
            }

            (
                A::Authenticating,
                Event::ActorDone {
                    output: ActorOutput::SignInStarted,
                    ..
                },
            ) => {
                // Waiting for the return trip
                self.enter_auth(A::Authenticating);
            }
            (A::Authenticating, Event::ActorFailed { error, .. }) => {
                self.enter_auth(A::Unauthenticated);
                effects.push(Effect::Notify(
                    Notification::error("Failed to sign in").with_description(error.to_string()),
                ));
            }

            _ => return false,
        }
        true
    }

    fn enter_checking(&mut self, effects: &mut Vec<Effect>) {
        self.enter_auth(AuthState::Checking);
        self.invoke(Region::Auth, ActorRequest::CheckAuth, effects);
    }

    /// Exit the current auth state and enter `target`
    fn enter_auth(&mut self, target: AuthState) {
        self.auth_invocation = None;
        self.auth = target;
    }
}
