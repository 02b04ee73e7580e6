//! create-resource and delete-resource actors

use crate::error::ActorError;
use crate::event::{ActorOutput, ResourceDraft};
use vocedit_graph::namespaces::{rdf, rdfs, skos};
use vocedit_graph::{Iri, ResourceManager, Triple};

/// Add a resource to the graph
///
/// A concept scheme gets a single type statement and may only be created
/// while no other scheme exists. Anything else is typed and linked to the
/// one existing scheme. The addition is committed as an edit session.
///
/// # Errors
/// - `ActorError::MissingFields` if the draft lacks a type or IRI
/// - `ActorError::NoConceptScheme` / `MultipleConceptSchemes` when the
///   scheme to link to is not unique
pub fn create_resource(
    resource_manager: &dyn ResourceManager,
    draft: ResourceDraft,
) -> Result<ActorOutput, ActorError> {
    let (Some(resource_type), Some(iri)) = (draft.resource_type, draft.iri) else {
        return Err(ActorError::MissingFields);
    };

    if resource_manager.is_editing() {
        resource_manager.cancel_editing();
    }

    let schemes = resource_manager.data_graph().instances_of(&skos::concept_scheme());
    let statements = if resource_type == skos::concept_scheme() {
        if !schemes.is_empty() {
            return Err(ActorError::MultipleConceptSchemes);
        }
        vec![Triple::new(iri.clone(), rdf::type_(), resource_type.clone())]
    } else {
        let scheme = single_scheme(schemes)?;
        vec![
            Triple::new(iri.clone(), rdf::type_(), resource_type.clone()),
            Triple::new(iri.clone(), skos::in_scheme(), scheme.clone()),
            Triple::new(iri.clone(), rdfs::is_defined_by(), scheme),
        ]
    };

    resource_manager.add_statements(statements);
    resource_manager.start_editing();
    resource_manager.save()?;

    tracing::debug!(%iri, %resource_type, "Created resource");
    Ok(ActorOutput::ResourceCreated { resource_type, iri })
}

/// Remove a resource from the graph
///
/// # Errors
/// Whatever the store rejects the delete with.
pub fn delete_resource(
    resource_manager: &dyn ResourceManager,
    iri: Iri,
) -> Result<ActorOutput, ActorError> {
    resource_manager.delete_resource(&iri)?;
    Ok(ActorOutput::ResourceDeleted { iri })
}

fn single_scheme(mut schemes: Vec<Iri>) -> Result<Iri, ActorError> {
    match schemes.len() {
        0 => Err(ActorError::NoConceptScheme),
        1 => Ok(schemes.remove(0)),
        _ => Err(ActorError::MultipleConceptSchemes),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use vocedit_graph::{GraphError, InMemoryResourceManager, Node, Term};

    fn iri(value: &str) -> Iri {
        Iri::new(value).unwrap()
    }

    fn scheme_draft(value: &str) -> ResourceDraft {
        ResourceDraft::new(skos::concept_scheme(), iri(value))
    }

    #[test]
    fn missing_fields_are_rejected() {
        let store = InMemoryResourceManager::new();
        let draft = ResourceDraft {
            resource_type: Some(skos::concept()),
            iri: None,
        };
        assert_eq!(create_resource(&store, draft), Err(ActorError::MissingFields));
        assert!(store.data_graph().is_empty());
    }

    #[test]
    fn scheme_on_empty_graph_is_one_statement() {
        let store = InMemoryResourceManager::new();

        create_resource(&store, scheme_draft("https://example.org/s1")).unwrap();

        let graph = store.data_graph();
        assert_eq!(graph.len(), 1);
        assert_eq!(
            graph.instances_of(&skos::concept_scheme()),
            vec![iri("https://example.org/s1")]
        );
        assert!(!store.is_editing());
    }

    #[test]
    fn second_scheme_fails_and_leaves_graph_unchanged() {
        let store = InMemoryResourceManager::new();
        create_resource(&store, scheme_draft("https://example.org/s1")).unwrap();
        let before = store.data_graph();

        let result = create_resource(&store, scheme_draft("https://example.org/s2"));

        assert_eq!(result, Err(ActorError::MultipleConceptSchemes));
        assert_eq!(result.unwrap_err().to_string(), "Multiple concept schemes found");
        assert_eq!(store.data_graph(), before);
    }

    #[test]
    fn concept_is_linked_to_scheme() {
        let store = InMemoryResourceManager::new();
        create_resource(&store, scheme_draft("https://example.org/s1")).unwrap();
        store.start_editing();

        let output = create_resource(
            &store,
            ResourceDraft::new(skos::concept(), iri("https://example.org/c1")),
        )
        .unwrap();

        assert_eq!(
            output,
            ActorOutput::ResourceCreated {
                resource_type: skos::concept(),
                iri: iri("https://example.org/c1"),
            }
        );
        let graph = store.data_graph();
        let concept = Node::Iri(iri("https://example.org/c1"));
        assert_eq!(
            graph.objects(&concept, &skos::in_scheme()),
            vec![Term::from(iri("https://example.org/s1"))]
        );
        assert_eq!(
            graph.objects(&concept, &rdfs::is_defined_by()),
            vec![Term::from(iri("https://example.org/s1"))]
        );
        assert!(!store.is_editing());
    }

    #[test]
    fn concept_without_scheme_fails() {
        let store = InMemoryResourceManager::new();
        let result = create_resource(
            &store,
            ResourceDraft::new(skos::collection(), iri("https://example.org/c1")),
        );
        assert_eq!(result, Err(ActorError::NoConceptScheme));
        assert!(store.data_graph().is_empty());
    }

    #[test]
    fn delete_returns_id_or_store_error() {
        let store = InMemoryResourceManager::new();
        create_resource(&store, scheme_draft("https://example.org/s1")).unwrap();

        assert_eq!(
            delete_resource(&store, iri("https://example.org/s1")),
            Ok(ActorOutput::ResourceDeleted {
                iri: iri("https://example.org/s1")
            })
        );
        assert_eq!(
            delete_resource(&store, iri("https://example.org/s1")),
            Err(ActorError::Graph(GraphError::ResourceNotFound(iri(
                "https://example.org/s1"
            ))))
        );
    }
}
