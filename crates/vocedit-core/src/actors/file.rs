//! open-file and save-file actors

use crate::error::ActorError;
use crate::event::ActorOutput;
use crate::file::{FileHandle, FilePicker};
use crate::prettify::Prettify;
use vocedit_graph::{Graph, ResourceManager};

/// Let the user pick a document and read it
///
/// The text is parsed once here so unreadable documents fail the actor.
/// Loading it into the store is left to the transition that accepts the
/// result.
///
/// # Errors
/// Picker dismissal, read failures and parse failures.
pub async fn open_file(picker: &dyn FilePicker) -> Result<ActorOutput, ActorError> {
    let file_handle = picker.open().await?;
    let contents = file_handle.read_text().await?;
    let graph = Graph::parse(&contents)?;
    tracing::debug!(file = %file_handle.name(), triples = graph.len(), "Read project file");
    Ok(ActorOutput::FileOpened {
        file_handle,
        contents,
    })
}

/// Serialize the data graph and write it through `file_handle`
///
/// # Errors
/// Prettify failures and write failures.
pub async fn save_file(
    resource_manager: &dyn ResourceManager,
    prettifier: &dyn Prettify,
    file_handle: FileHandle,
) -> Result<ActorOutput, ActorError> {
    let text = resource_manager.data_graph().to_ntriples();
    let data = prettifier.prettify(text).await?;
    file_handle.write_text(&data).await?;
    tracing::debug!(file = %file_handle.name(), bytes = data.len(), "Wrote project file");
    Ok(ActorOutput::FileSaved { file_handle })
}

/// Ask for a destination, then save there
///
/// # Errors
/// Picker dismissal plus everything `save_file` reports.
pub async fn save_file_as(
    resource_manager: &dyn ResourceManager,
    prettifier: &dyn Prettify,
    picker: &dyn FilePicker,
    suggested_name: &str,
) -> Result<ActorOutput, ActorError> {
    let file_handle = picker.save_as(suggested_name).await?;
    save_file(resource_manager, prettifier, file_handle).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PrettifyError;
    use crate::file::MemoryFile;
    use crate::prettify::canonical_form;
    use async_trait::async_trait;
    use std::sync::Arc;
    use vocedit_graph::InMemoryResourceManager;

    const DOC: &str = "<https://example.org/s> <http://www.w3.org/1999/02/22-rdf-syntax-ns#type> <http://www.w3.org/2004/02/skos/core#ConceptScheme> .\n";

    struct OnePicker {
        file: Option<Arc<MemoryFile>>,
    }

    #[async_trait]
    impl FilePicker for OnePicker {
        async fn open(&self) -> Result<FileHandle, ActorError> {
            self.file
                .clone()
                .map(|f| FileHandle::from_arc(f))
                .ok_or_else(|| ActorError::Cancelled("The user aborted a request.".into()))
        }

        async fn save_as(&self, suggested_name: &str) -> Result<FileHandle, ActorError> {
            assert_eq!(suggested_name, "untitled.ttl");
            self.open().await
        }
    }

    struct InlinePrettifier;

    #[async_trait]
    impl Prettify for InlinePrettifier {
        async fn prettify(&self, text: String) -> Result<String, PrettifyError> {
            canonical_form(&text)
        }
    }

    #[tokio::test]
    async fn open_returns_handle_and_contents() {
        let picker = OnePicker {
            file: Some(Arc::new(MemoryFile::new("vocab.ttl", DOC))),
        };

        let output = open_file(&picker).await.unwrap();

        let ActorOutput::FileOpened { file_handle, contents } = output else {
            panic!("unexpected output {output:?}");
        };
        assert_eq!(file_handle.name(), "vocab.ttl");
        assert_eq!(contents, DOC);
    }

    #[tokio::test]
    async fn open_rejects_unparseable_file() {
        let picker = OnePicker {
            file: Some(Arc::new(MemoryFile::new("bad.ttl", "not rdf"))),
        };
        assert!(matches!(open_file(&picker).await, Err(ActorError::Graph(_))));
    }

    #[tokio::test]
    async fn open_dismissed_is_cancellation() {
        let err = open_file(&OnePicker { file: None }).await.unwrap_err();
        assert!(err.is_user_cancelled());
    }

    #[tokio::test]
    async fn save_writes_pretty_form() {
        let store = InMemoryResourceManager::new();
        store.reset_graph(DOC).unwrap();
        let file = Arc::new(MemoryFile::new("vocab.ttl", ""));
        let handle = FileHandle::from_arc(file.clone());

        let output = save_file(&store, &InlinePrettifier, handle.clone()).await.unwrap();

        assert_eq!(output, ActorOutput::FileSaved { file_handle: handle });
        assert_eq!(file.contents(), canonical_form(DOC).unwrap());
    }

    #[tokio::test]
    async fn save_as_uses_picked_destination() {
        let store = InMemoryResourceManager::new();
        store.reset_graph(DOC).unwrap();
        let file = Arc::new(MemoryFile::new("copy.ttl", ""));
        let picker = OnePicker {
            file: Some(file.clone()),
        };

        let output = save_file_as(&store, &InlinePrettifier, &picker, "untitled.ttl")
            .await
            .unwrap();

        let ActorOutput::FileSaved { file_handle } = output else {
            panic!("unexpected output {output:?}");
        };
        assert_eq!(file_handle.name(), "copy.ttl");
        assert!(!file.contents().is_empty());
    }
}
