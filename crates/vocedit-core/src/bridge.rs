//! Effect bridge
//!
//! Carries out the effects a transition emitted against the outside
//! world: the store, the notification and navigation sinks, and the
//! session. Actor invocations are handed back to the caller to spawn.

use crate::effect::{Effect, Invocation, Level, Notification, Route};
use parking_lot::RwLock;
use std::sync::Arc;
use vocedit_auth::Session;
use vocedit_graph::namespaces::{rdf, skos};
use vocedit_graph::{Iri, Literal, ResourceManager, Triple};

/// Toast sink
pub trait Notifier: Send + Sync {
    /// Show a notification
    fn notify(&self, notification: &Notification);
}

/// Router
pub trait Navigator: Send + Sync {
    /// Push a route
    fn push(&self, route: Route);

    /// Route currently shown
    fn current(&self) -> Route;
}

/// Notifier that writes to the log
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notification: &Notification) {
        let description = notification.description.as_deref().unwrap_or_default();
        match notification.level {
            Level::Error => tracing::warn!(description, "{}", notification.title),
            Level::Success => tracing::info!(description, "{}", notification.title),
        }
    }
}

/// Navigator keeping an in-memory history
#[derive(Debug, Default)]
pub struct HistoryNavigator {
    history: RwLock<Vec<Route>>,
}

impl HistoryNavigator {
    /// Navigator at the home route
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every route pushed so far
    #[must_use]
    pub fn history(&self) -> Vec<Route> {
        self.history.read().clone()
    }
}

impl Navigator for HistoryNavigator {
    fn push(&self, route: Route) {
        tracing::debug!(%route, "Navigating");
        self.history.write().push(route);
    }

    fn current(&self) -> Route {
        self.history.read().last().cloned().unwrap_or_default()
    }
}

/// Applies non-actor effects
#[derive(Clone)]
pub struct EffectBridge {
    resource_manager: Arc<dyn ResourceManager>,
    session: Arc<Session>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl EffectBridge {
    /// Bridge over the given sinks
    #[must_use]
    pub fn new(
        resource_manager: Arc<dyn ResourceManager>,
        session: Arc<Session>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            resource_manager,
            session,
            notifier,
            navigator,
        }
    }

    /// Apply effects in order, returning the invocations to start
    pub fn apply(&self, effects: Vec<Effect>) -> Vec<Invocation> {
        let mut invocations = Vec::new();
        for effect in effects {
            match effect {
                Effect::ResetGraph => self.load(""),
                Effect::LoadGraph(text) => self.load(&text),
                Effect::SeedProject(scheme) => self.seed(scheme),
                Effect::Invoke(invocation) => invocations.push(invocation),
                Effect::Notify(notification) => self.notifier.notify(&notification),
                Effect::Navigate(route) => self.navigator.push(route),
                Effect::LeaveResource(iri) => {
                    if self.navigator.current().resource() == Some(&iri) {
                        self.navigator.push(Route::Home);
                    }
                }
                Effect::EvictSession => {
                    if let Err(e) = self.session.evict() {
                        tracing::warn!(error = %e, "Failed to evict session token");
                    }
                }
            }
        }
        invocations
    }

    fn load(&self, text: &str) {
        if let Err(e) = self.resource_manager.reset_graph(text) {
            tracing::warn!(error = %e, "Failed to load data graph");
        }
    }

    fn seed(&self, scheme: Iri) {
        self.load("");
        self.resource_manager.add_statements(vec![
            Triple::new(scheme.clone(), rdf::type_(), skos::concept_scheme()),
            Triple::new(scheme, skos::pref_label(), Literal::lang("Untitled", "en")),
        ]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::effect::ActorRequest;
    use crate::event::{InvocationId, Region};
    use chrono::Utc;
    use vocedit_auth::SessionToken;
    use vocedit_graph::InMemoryResourceManager;

    #[derive(Default)]
    struct Collected(RwLock<Vec<Notification>>);

    impl Notifier for Collected {
        fn notify(&self, notification: &Notification) {
            self.0.write().push(notification.clone());
        }
    }

    fn bridge() -> (EffectBridge, Arc<InMemoryResourceManager>, Arc<HistoryNavigator>, Arc<Collected>, Arc<Session>) {
        let store = Arc::new(InMemoryResourceManager::new());
        let navigator = Arc::new(HistoryNavigator::new());
        let notifier = Arc::new(Collected::default());
        let session = Arc::new(Session::in_memory());
        let bridge = EffectBridge::new(store.clone(), session.clone(), notifier.clone(), navigator.clone());
        (bridge, store, navigator, notifier, session)
    }

    fn iri(value: &str) -> Iri {
        Iri::new(value).unwrap()
    }

    #[test]
    fn seed_project_writes_scheme_and_label() {
        let (bridge, store, ..) = bridge();
        bridge.apply(vec![Effect::SeedProject(iri("https://example.org/s"))]);

        let graph = store.data_graph();
        assert_eq!(graph.len(), 2);
        assert_eq!(graph.instances_of(&skos::concept_scheme()), vec![iri("https://example.org/s")]);
    }

    #[test]
    fn invocations_are_returned_in_order() {
        let (bridge, _, _, notifier, _) = bridge();
        let invocation = Invocation {
            id: InvocationId {
                region: Region::Project,
                generation: 1,
            },
            request: ActorRequest::OpenFile,
        };

        let invocations = bridge.apply(vec![
            Effect::Notify(Notification::success("one")),
            Effect::Invoke(invocation.clone()),
        ]);

        assert_eq!(invocations, vec![invocation]);
        assert_eq!(notifier.0.read().len(), 1);
    }

    #[test]
    fn leave_resource_only_when_shown() {
        let (bridge, _, navigator, ..) = bridge();
        navigator.push(Route::Resource(iri("https://example.org/a")));

        bridge.apply(vec![Effect::LeaveResource(iri("https://example.org/b"))]);
        assert_eq!(navigator.current(), Route::Resource(iri("https://example.org/a")));

        bridge.apply(vec![Effect::LeaveResource(iri("https://example.org/a"))]);
        assert_eq!(navigator.current(), Route::Home);
    }

    #[test]
    fn evict_session_clears_token() {
        let (bridge, _, _, _, session) = bridge();
        session
            .store_token(SessionToken::new("t", Utc::now()))
            .unwrap();

        bridge.apply(vec![Effect::EvictSession]);
        assert_eq!(session.token(), None);
    }

    #[test]
    fn invalid_load_leaves_graph_untouched() {
        let (bridge, store, ..) = bridge();
        bridge.apply(vec![Effect::SeedProject(iri("https://example.org/s"))]);
        bridge.apply(vec![Effect::LoadGraph("garbage".to_string())]);
        assert_eq!(store.data_graph().len(), 2);
    }
}
