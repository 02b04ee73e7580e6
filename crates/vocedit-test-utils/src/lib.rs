//! Testing utilities for VocEdit workspace
//!
//! Shared fakes, fixtures, and sample data.

#![allow(missing_docs)]

use async_trait::async_trait;
use chrono::{Duration, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::Semaphore;
use url::Url;
use vocedit_auth::{AuthError, Redirect, Session, SessionToken, UserApi, UserProfile};
use vocedit_core::{
    ActorError, Collaborators, EditorConfig, FileAccess, FileHandle, FilePicker, HistoryNavigator,
    Notification, Notifier, Orchestrator, WorkerPrettifier,
};
use vocedit_graph::{InMemoryResourceManager, Iri};

pub const SCHEME_IRI: &str = "https://example.org/vocab";
pub const CONCEPT_IRI: &str = "https://example.org/vocab/c1";

/// Small vocabulary with one scheme and one concept
pub fn sample_vocabulary() -> String {
    format!(
        "<{SCHEME_IRI}> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#ConceptScheme> .\n\
         <{SCHEME_IRI}> <http://www.w3.org/2004/02/skos/core#prefLabel> \"Vocabulary\"@en .\n\
         <{CONCEPT_IRI}> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#Concept> .\n\
         <{CONCEPT_IRI}> <http://www.w3.org/2004/02/skos/core#inScheme> <{SCHEME_IRI}> .\n"
    )
}

pub fn iri(value: &str) -> Iri {
    Iri::new(value).unwrap()
}

pub fn aborted() -> ActorError {
    ActorError::Cancelled("The user aborted a request.".to_string())
}

/// File whose writes fail with queued messages before succeeding
#[derive(Debug, Default)]
pub struct ScriptedFile {
    name: String,
    contents: RwLock<String>,
    write_failures: Mutex<VecDeque<String>>,
    writes: Mutex<usize>,
}

impl ScriptedFile {
    pub fn new(name: &str, contents: &str) -> Arc<Self> {
        Arc::new(Self {
            name: name.to_string(),
            contents: RwLock::new(contents.to_string()),
            ..Self::default()
        })
    }

    pub fn fail_next_write(&self, message: &str) {
        self.write_failures.lock().push_back(message.to_string());
    }

    pub fn contents(&self) -> String {
        self.contents.read().clone()
    }

    pub fn writes(&self) -> usize {
        *self.writes.lock()
    }

    pub fn handle(self: &Arc<Self>) -> FileHandle {
        FileHandle::from_arc(Arc::clone(self) as Arc<dyn FileAccess>)
    }
}

#[async_trait]
impl FileAccess for ScriptedFile {
    fn name(&self) -> String {
        self.name.clone()
    }

    async fn read_text(&self) -> Result<String, ActorError> {
        Ok(self.contents())
    }

    async fn write_text(&self, text: &str) -> Result<(), ActorError> {
        if let Some(message) = self.write_failures.lock().pop_front() {
            return Err(ActorError::Write(message));
        }
        *self.contents.write() = text.to_string();
        *self.writes.lock() += 1;
        Ok(())
    }
}

/// Picker answering from queues; an empty queue means the user dismissed it
///
/// A gated picker holds every answer until `release` is called.
#[derive(Debug, Default)]
pub struct ScriptedFilePicker {
    opens: Mutex<VecDeque<Result<FileHandle, ActorError>>>,
    saves: Mutex<VecDeque<Result<FileHandle, ActorError>>>,
    suggested_names: Mutex<Vec<String>>,
    gate: Option<Semaphore>,
}

impl ScriptedFilePicker {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gated() -> Arc<Self> {
        Arc::new(Self {
            gate: Some(Semaphore::new(0)),
            ..Self::default()
        })
    }

    pub fn push_open(&self, result: Result<FileHandle, ActorError>) {
        self.opens.lock().push_back(result);
    }

    pub fn push_save(&self, result: Result<FileHandle, ActorError>) {
        self.saves.lock().push_back(result);
    }

    /// Let one pending pick answer
    pub fn release(&self) {
        if let Some(gate) = &self.gate {
            gate.add_permits(1);
        }
    }

    pub fn suggested_names(&self) -> Vec<String> {
        self.suggested_names.lock().clone()
    }

    async fn wait(&self) {
        if let Some(gate) = &self.gate {
            gate.acquire().await.unwrap().forget();
        }
    }
}

#[async_trait]
impl FilePicker for ScriptedFilePicker {
    async fn open(&self) -> Result<FileHandle, ActorError> {
        self.wait().await;
        self.opens.lock().pop_front().unwrap_or_else(|| Err(aborted()))
    }

    async fn save_as(&self, suggested_name: &str) -> Result<FileHandle, ActorError> {
        self.suggested_names.lock().push(suggested_name.to_string());
        self.wait().await;
        self.saves.lock().pop_front().unwrap_or_else(|| Err(aborted()))
    }
}

#[derive(Debug, Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().clone()
    }

    pub fn titles(&self) -> Vec<String> {
        self.notifications.lock().iter().map(|n| n.title.clone()).collect()
    }

    pub fn clear(&self) {
        self.notifications.lock().clear();
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: &Notification) {
        self.notifications.lock().push(notification.clone());
    }
}

#[derive(Debug, Default)]
pub struct RecordingRedirect {
    urls: Mutex<Vec<Url>>,
    failure: Mutex<Option<String>>,
}

impl RecordingRedirect {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn fail_with(&self, message: &str) {
        *self.failure.lock() = Some(message.to_string());
    }

    pub fn urls(&self) -> Vec<Url> {
        self.urls.lock().clone()
    }
}

impl Redirect for RecordingRedirect {
    fn redirect(&self, url: &Url) -> Result<(), AuthError> {
        if let Some(message) = self.failure.lock().clone() {
            return Err(AuthError::Redirect(message));
        }
        self.urls.lock().push(url.clone());
        Ok(())
    }
}

/// User API returning a fixed answer
#[derive(Debug)]
pub struct StubUserApi {
    answer: Mutex<Result<UserProfile, AuthError>>,
    calls: Mutex<usize>,
}

impl StubUserApi {
    pub fn returning(profile: UserProfile) -> Arc<Self> {
        Arc::new(Self {
            answer: Mutex::new(Ok(profile)),
            calls: Mutex::new(0),
        })
    }

    pub fn failing(error: AuthError) -> Arc<Self> {
        Arc::new(Self {
            answer: Mutex::new(Err(error)),
            calls: Mutex::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        *self.calls.lock()
    }
}

#[async_trait]
impl UserApi for StubUserApi {
    async fn current_user(&self, _access_token: &str) -> Result<UserProfile, AuthError> {
        *self.calls.lock() += 1;
        self.answer.lock().clone()
    }
}

pub fn octocat() -> UserProfile {
    let mut profile = UserProfile::new("octocat", 583_231);
    profile.name = Some("The Octocat".to_string());
    profile
}

/// Session holding a token valid for another hour
pub fn signed_in_session() -> Arc<Session> {
    let session = Session::in_memory();
    session
        .store_token(SessionToken::new("gho_test", Utc::now() + Duration::hours(1)))
        .unwrap();
    Arc::new(session)
}

/// Session holding a token that expired a minute ago
pub fn expired_session() -> Arc<Session> {
    let session = Session::in_memory();
    session
        .store_token(SessionToken::new("gho_test", Utc::now() - Duration::minutes(1)))
        .unwrap();
    Arc::new(session)
}

/// Orchestrator wired to fakes, with handles to each of them
pub struct TestEditor {
    pub orchestrator: Orchestrator,
    pub store: Arc<InMemoryResourceManager>,
    pub picker: Arc<ScriptedFilePicker>,
    pub notifier: Arc<RecordingNotifier>,
    pub navigator: Arc<HistoryNavigator>,
    pub session: Arc<Session>,
    pub user_api: Arc<StubUserApi>,
    pub redirect: Arc<RecordingRedirect>,
}

impl TestEditor {
    pub fn builder() -> TestEditorBuilder {
        TestEditorBuilder::default()
    }

    pub fn snapshot(&self) -> vocedit_core::Snapshot {
        self.orchestrator.snapshot()
    }
}

#[derive(Default)]
pub struct TestEditorBuilder {
    picker: Option<Arc<ScriptedFilePicker>>,
    session: Option<Arc<Session>>,
    user_api: Option<Arc<StubUserApi>>,
    config: Option<EditorConfig>,
}

impl TestEditorBuilder {
    pub fn config(mut self, config: EditorConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn picker(mut self, picker: Arc<ScriptedFilePicker>) -> Self {
        self.picker = Some(picker);
        self
    }

    pub fn session(mut self, session: Arc<Session>) -> Self {
        self.session = Some(session);
        self
    }

    pub fn user_api(mut self, user_api: Arc<StubUserApi>) -> Self {
        self.user_api = Some(user_api);
        self
    }

    /// Build and start; must run inside a Tokio runtime
    pub fn start(self) -> TestEditor {
        let config = self.config.unwrap_or_default();
        let store = Arc::new(InMemoryResourceManager::new());
        let picker = self.picker.unwrap_or_else(ScriptedFilePicker::new);
        let notifier = RecordingNotifier::new();
        let navigator = Arc::new(HistoryNavigator::new());
        let session = self.session.unwrap_or_else(|| Arc::new(Session::in_memory()));
        let user_api = self.user_api.unwrap_or_else(|| StubUserApi::returning(octocat()));
        let redirect = RecordingRedirect::new();

        let collaborators = Collaborators {
            resource_manager: store.clone(),
            file_picker: picker.clone(),
            prettifier: Arc::new(WorkerPrettifier::spawn(config.prettify_timeout())),
            session: session.clone(),
            user_api: user_api.clone(),
            redirect: redirect.clone(),
            notifier: notifier.clone(),
            navigator: navigator.clone(),
        };
        let mut orchestrator = Orchestrator::new(&config, collaborators);
        orchestrator.start();

        TestEditor {
            orchestrator,
            store,
            picker,
            notifier,
            navigator,
            session,
            user_api,
            redirect,
        }
    }
}

/// Started editor with default fakes
pub fn setup_test_editor() -> TestEditor {
    TestEditor::builder().start()
}
