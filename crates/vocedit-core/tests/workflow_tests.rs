use std::time::Duration;
use vocedit_core::{
    AuthState, EditorConfig, Event, Navigator, OpenedState, ProfileView, ProjectState, ResourceDraft, Route,
    Snapshot, Tag,
};
use vocedit_graph::namespaces::{rdf, skos};
use vocedit_graph::{Node, ResourceManager, Term, Triple};
use vocedit_test_utils::{
    expired_session, iri, sample_vocabulary, setup_test_editor, signed_in_session, ScriptedFile,
    ScriptedFilePicker, StubUserApi, TestEditor, CONCEPT_IRI, SCHEME_IRI,
};

/// Process actor results until the snapshot satisfies `done`
async fn settle_until(editor: &mut TestEditor, done: impl Fn(&Snapshot) -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !done(&editor.snapshot()) {
            editor.orchestrator.settle_next().await;
        }
    })
    .await
    .expect("editor did not settle in time");
}

async fn open_sample(file: &std::sync::Arc<ScriptedFile>) -> TestEditor {
    let picker = ScriptedFilePicker::new();
    picker.push_open(Ok(file.handle()));
    let mut editor = TestEditor::builder().picker(picker).start();
    settle_until(&mut editor, |s| s.auth_state == AuthState::Unauthenticated).await;

    assert!(editor.orchestrator.process(Event::ProjectOpenFile));
    settle_until(&mut editor, |s| s.project.is_opened()).await;
    editor
}

#[tokio::test]
async fn test_open_save_fail_and_dismiss() {
    let file = ScriptedFile::new("vocab.ttl", &sample_vocabulary());
    let mut editor = open_sample(&file).await;

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.project, ProjectState::Opened(OpenedState::Idle));
    assert_eq!(snapshot.file_name.as_deref(), Some("vocab.ttl"));
    assert_eq!(editor.store.data_graph().len(), 4);
    assert!(editor.notifier.titles().contains(&"Project opened".to_string()));

    // Successful save writes the pretty-printed graph back
    editor.orchestrator.process(Event::ProjectSave);
    assert!(editor.snapshot().has_tag(Tag::Saving));
    settle_until(&mut editor, |s| s.matches("project.opened.idle")).await;
    assert_eq!(file.writes(), 1);
    assert!(file.contents().contains(SCHEME_IRI));
    assert!(editor
        .notifier
        .titles()
        .contains(&"Project saved successfully".to_string()));

    // Failing save lands in savingError with the message kept
    file.fail_next_write("disk full");
    editor.orchestrator.process(Event::ProjectSave);
    settle_until(&mut editor, |s| s.has_tag(Tag::SavingError)).await;
    let snapshot = editor.snapshot();
    assert_eq!(
        snapshot.saving_error.as_deref(),
        Some("Failed to save project file: disk full")
    );
    assert_eq!(file.writes(), 1);

    editor.orchestrator.process(Event::ProjectSaveCancel);
    let snapshot = editor.snapshot();
    assert_eq!(snapshot.project, ProjectState::Opened(OpenedState::Idle));
    assert_eq!(snapshot.saving_error, None);
}

#[tokio::test]
async fn test_cancelled_open_discards_late_result() {
    let picker = ScriptedFilePicker::gated();
    let file = ScriptedFile::new("late.ttl", &sample_vocabulary());
    picker.push_open(Ok(file.handle()));
    let mut editor = TestEditor::builder().picker(picker.clone()).start();
    settle_until(&mut editor, |s| s.auth_state == AuthState::Unauthenticated).await;

    editor.orchestrator.process(Event::ProjectOpenFile);
    assert!(editor.snapshot().matches("project.openingLocalFile"));
    editor.orchestrator.process(Event::ProjectOpenFileCancel);
    assert_eq!(editor.snapshot().project, ProjectState::Empty);

    picker.release();
    let applied = tokio::time::timeout(Duration::from_secs(5), editor.orchestrator.settle_next())
        .await
        .expect("picker result should arrive");
    assert!(!applied);

    let snapshot = editor.snapshot();
    assert_eq!(snapshot.project, ProjectState::Empty);
    assert_eq!(snapshot.file_name, None);
    assert!(editor.store.data_graph().is_empty());
}

#[tokio::test]
async fn test_dismissed_open_picker_returns_to_empty_quietly() {
    let mut editor = setup_test_editor();
    settle_until(&mut editor, |s| s.auth_state == AuthState::Unauthenticated).await;
    editor.notifier.clear();

    editor.orchestrator.process(Event::ProjectOpenFile);
    settle_until(&mut editor, |s| s.project == ProjectState::Empty).await;

    assert!(editor.notifier.notifications().is_empty());
    assert_eq!(editor.snapshot().file_name, None);
}

#[tokio::test]
async fn test_create_concept_navigates_to_it() {
    let file = ScriptedFile::new("vocab.ttl", &sample_vocabulary());
    let mut editor = open_sample(&file).await;
    let new_concept = iri("https://example.org/vocab/c2");

    editor.orchestrator.process(Event::ResourceCreate);
    assert!(editor.snapshot().has_tag(Tag::CreateResourceDialog));
    editor
        .orchestrator
        .process(Event::ResourceCreateConfirm(ResourceDraft::new(
            skos::concept(),
            new_concept.clone(),
        )));
    settle_until(&mut editor, |s| s.matches("project.opened.idle")).await;

    let graph = editor.store.data_graph();
    assert!(graph.contains(&Triple::new(
        new_concept.clone(),
        skos::in_scheme(),
        iri(SCHEME_IRI),
    )));
    assert!(!editor.store.is_editing());
    assert_eq!(editor.navigator.current(), Route::Resource(new_concept));
}

#[tokio::test]
async fn test_second_concept_scheme_is_rejected() {
    let file = ScriptedFile::new("vocab.ttl", &sample_vocabulary());
    let mut editor = open_sample(&file).await;
    editor.notifier.clear();

    editor.orchestrator.process(Event::ResourceCreate);
    editor
        .orchestrator
        .process(Event::ResourceCreateConfirm(ResourceDraft::new(
            skos::concept_scheme(),
            iri("https://example.org/other"),
        )));
    settle_until(&mut editor, |s| s.matches("project.opened.idle")).await;

    assert_eq!(
        editor.notifier.titles(),
        vec!["Failed to create resource: Multiple concept schemes found".to_string()]
    );
    assert_eq!(
        editor
            .store
            .data_graph()
            .instances_of(&skos::concept_scheme()),
        vec![iri(SCHEME_IRI)]
    );
}

#[tokio::test]
async fn test_delete_shown_resource_goes_home() {
    let file = ScriptedFile::new("vocab.ttl", &sample_vocabulary());
    let mut editor = open_sample(&file).await;
    let concept = iri(CONCEPT_IRI);
    editor.navigator.push(Route::Resource(concept.clone()));

    editor.orchestrator.process(Event::ResourceDelete {
        resource_iri: concept.clone(),
    });
    assert_eq!(editor.snapshot().resource_to_delete, Some(concept.clone()));
    editor.orchestrator.process(Event::ResourceDeleteConfirm);
    settle_until(&mut editor, |s| s.matches("project.opened.idle")).await;

    assert_eq!(editor.snapshot().resource_to_delete, None);
    assert!(!editor
        .store
        .data_graph()
        .contains_subject(&Node::Iri(concept)));
    assert_eq!(editor.navigator.current(), Route::Home);
}

#[tokio::test]
async fn test_new_project_seeds_scheme_and_close_clears_it() {
    let mut editor = setup_test_editor();
    let scheme = iri("https://example.org/fresh");

    editor.orchestrator.process(Event::ProjectNew {
        concept_scheme: scheme.clone(),
    });
    assert_eq!(
        editor.snapshot().project,
        ProjectState::Opened(OpenedState::Idle)
    );
    let graph = editor.store.data_graph();
    assert!(graph.contains(&Triple::new(
        scheme.clone(),
        rdf::type_(),
        skos::concept_scheme(),
    )));
    assert_eq!(editor.navigator.current(), Route::Resource(scheme));

    editor.orchestrator.process(Event::ProjectClose);
    assert_eq!(editor.snapshot().project, ProjectState::Empty);
    assert!(editor.store.data_graph().is_empty());
}

#[tokio::test]
async fn test_save_as_on_new_project_uses_picked_file() {
    let picker = ScriptedFilePicker::new();
    let target = ScriptedFile::new("chosen.ttl", "");
    picker.push_save(Ok(target.handle()));
    let mut editor = TestEditor::builder().picker(picker.clone()).start();

    editor.orchestrator.process(Event::ProjectNew {
        concept_scheme: iri(SCHEME_IRI),
    });
    editor.orchestrator.process(Event::ProjectSave);
    assert!(editor.snapshot().matches("project.opened.savingAs"));
    settle_until(&mut editor, |s| s.matches("project.opened.idle")).await;

    assert_eq!(picker.suggested_names(), vec!["untitled.ttl".to_string()]);
    assert_eq!(editor.snapshot().file_name.as_deref(), Some("chosen.ttl"));
    assert_eq!(target.writes(), 1);
    assert!(target.contents().contains("Untitled"));
}

#[tokio::test]
async fn test_expired_token_is_evicted_on_start() {
    let api = StubUserApi::returning(vocedit_test_utils::octocat());
    let mut editor = TestEditor::builder()
        .session(expired_session())
        .user_api(api.clone())
        .start();
    assert_eq!(editor.snapshot().auth_state, AuthState::Checking);

    settle_until(&mut editor, |s| s.auth_state != AuthState::Checking).await;
    assert_eq!(editor.snapshot().auth_state, AuthState::Unauthenticated);
    assert_eq!(editor.snapshot().auth, None);
    assert!(editor.session.token().is_none());
    assert_eq!(api.calls(), 0);
}

#[tokio::test]
async fn test_signed_in_profile_and_logout() {
    let mut editor = TestEditor::builder().session(signed_in_session()).start();
    settle_until(&mut editor, |s| s.auth_state.is_authenticated()).await;

    let user = editor.snapshot().auth.map(|info| info.user.login);
    assert_eq!(user.as_deref(), Some("octocat"));

    editor.orchestrator.process(Event::AuthProfile);
    assert_eq!(
        editor.snapshot().auth_state,
        AuthState::Authenticated(ProfileView::Profile)
    );
    editor.orchestrator.process(Event::AuthLogout);
    assert_eq!(editor.snapshot().auth_state, AuthState::Unauthenticated);
    assert_eq!(editor.snapshot().auth, None);
    assert!(editor.session.token().is_none());
}

#[tokio::test]
async fn test_sign_in_redirects_and_keeps_verifier() {
    let mut editor = setup_test_editor();
    settle_until(&mut editor, |s| s.auth_state == AuthState::Unauthenticated).await;

    editor.orchestrator.process(Event::AuthRequest);
    assert_eq!(editor.snapshot().auth_state, AuthState::Authenticating);
    let applied = tokio::time::timeout(Duration::from_secs(5), editor.orchestrator.settle_next())
        .await
        .expect("sign-in result should arrive");
    assert!(applied);

    let urls = editor.redirect.urls();
    assert_eq!(urls.len(), 1);
    assert!(urls[0]
        .query_pairs()
        .any(|(key, value)| key == "code_challenge_method" && value == "S256"));
    assert!(editor.session.take_code_verifier().unwrap().is_some());
    assert_eq!(editor.snapshot().auth_state, AuthState::Authenticating);
}

#[tokio::test]
async fn test_graph_edit_guard_blocks_create_dialog() {
    let file = ScriptedFile::new("vocab.ttl", &sample_vocabulary());
    let mut editor = open_sample(&file).await;
    editor.store.start_editing();
    editor.notifier.clear();

    editor.orchestrator.process(Event::ResourceCreate);
    assert!(editor.snapshot().matches("project.opened.idle"));
    assert_eq!(
        editor.notifier.titles(),
        vec!["Please stop editing before creating a resource".to_string()]
    );
    assert!(editor
        .store
        .data_graph()
        .objects(&Node::Iri(iri(SCHEME_IRI)), &skos::pref_label())
        .contains(&Term::from(vocedit_graph::Literal::lang("Vocabulary", "en"))));
}

#[tokio::test]
async fn test_zero_event_buffer_still_runs() {
    let config = EditorConfig {
        event_buffer: 0,
        ..EditorConfig::default()
    }
    .with_prettify_timeout(Duration::from_millis(1500));
    let mut editor = TestEditor::builder().config(config).start();
    settle_until(&mut editor, |s| s.auth_state == AuthState::Unauthenticated).await;

    editor.orchestrator.process(Event::ProjectOpenFile);
    settle_until(&mut editor, |s| s.project == ProjectState::Empty).await;
}
