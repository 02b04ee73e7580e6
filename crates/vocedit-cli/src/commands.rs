//! Line commands for the interactive editor

use anyhow::{anyhow, bail, Result};
use std::path::PathBuf;
use vocedit_core::{Event, OpenedState, ProjectState, ResourceDraft};
use vocedit_graph::namespaces::skos;
use vocedit_graph::Iri;

pub(crate) const HELP: &str = "\
Commands:
  new IRI                 start a project with a concept scheme
  open PATH               open a vocabulary file
  save                    save to the current file
  save-as PATH            save to another file
  close                   close the project
  create                  open the create-resource dialog
  define TYPE IRI         create a resource (TYPE: scheme, concept, collection or an IRI)
  delete IRI              ask to delete a resource
  confirm                 confirm the deletion
  report                  show the validation report
  cancel                  leave the current dialog or operation
  login | logout          sign in or out
  profile | hide-profile  toggle the profile panel
  recheck                 check the session again
  status | help | quit";

/// One parsed input line
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Command {
    Send(Event),
    Open(PathBuf),
    SaveAs(PathBuf),
    Cancel,
    Status,
    Help,
    Quit,
}

/// Parse a line; blank lines yield `None`
pub(crate) fn parse(line: &str) -> Result<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match (verb, args.as_slice()) {
        ("new", [scheme]) => Command::Send(Event::ProjectNew {
            concept_scheme: Iri::new(*scheme)?,
        }),
        ("open", [path]) => Command::Open(PathBuf::from(path)),
        ("save", []) => Command::Send(Event::ProjectSave),
        ("save-as", [path]) => Command::SaveAs(PathBuf::from(path)),
        ("close", []) => Command::Send(Event::ProjectClose),
        ("create", []) => Command::Send(Event::ResourceCreate),
        ("define", [resource_type, iri]) => Command::Send(Event::ResourceCreateConfirm(
            ResourceDraft::new(resource_type_iri(resource_type)?, Iri::new(*iri)?),
        )),
        ("delete", [iri]) => Command::Send(Event::ResourceDelete {
            resource_iri: Iri::new(*iri)?,
        }),
        ("confirm", []) => Command::Send(Event::ResourceDeleteConfirm),
        ("report", []) => Command::Send(Event::ValidationViewReport),
        ("cancel", []) => Command::Cancel,
        ("login", []) => Command::Send(Event::AuthRequest),
        ("logout", []) => Command::Send(Event::AuthLogout),
        ("profile", []) => Command::Send(Event::AuthProfile),
        ("hide-profile", []) => Command::Send(Event::AuthProfileClose),
        ("recheck", []) => Command::Send(Event::AuthRecheck),
        ("status", []) => Command::Status,
        ("help" | "?", []) => Command::Help,
        ("quit" | "exit", []) => Command::Quit,
        (
            "new" | "open" | "save" | "save-as" | "close" | "create" | "define" | "delete"
            | "confirm" | "report" | "cancel" | "login" | "logout" | "profile"
            | "hide-profile" | "recheck" | "status" | "help" | "quit" | "exit",
            _,
        ) => bail!("Wrong arguments for `{verb}`; type `help`"),
        _ => bail!("Unknown command `{verb}`; type `help`"),
    };
    Ok(Some(command))
}

fn resource_type_iri(word: &str) -> Result<Iri> {
    match word {
        "scheme" => Ok(skos::concept_scheme()),
        "concept" => Ok(skos::concept()),
        "collection" => Ok(skos::collection()),
        other => Iri::new(other).map_err(|e| anyhow!("Unknown resource type `{other}`: {e}")),
    }
}

/// The cancel event that applies in `project`
pub(crate) fn cancel_event(project: ProjectState) -> Option<Event> {
    match project {
        ProjectState::OpeningLocalFile => Some(Event::ProjectOpenFileCancel),
        ProjectState::Opened(OpenedState::CreateResourceDialog) => Some(Event::ResourceCreateCancel),
        ProjectState::Opened(OpenedState::DeleteResourceDialog) => Some(Event::ResourceDeleteCancel),
        ProjectState::Opened(OpenedState::ValidationReport) => Some(Event::ValidationViewReportClose),
        ProjectState::Opened(
            OpenedState::Saving | OpenedState::SavingAs | OpenedState::SavingError,
        ) => Some(Event::ProjectSaveCancel),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_project_commands() {
        assert_eq!(parse("  ").unwrap(), None);
        assert_eq!(
            parse("open ./vocab.ttl").unwrap(),
            Some(Command::Open(PathBuf::from("./vocab.ttl")))
        );
        assert_eq!(
            parse("new https://example.org/vocab").unwrap(),
            Some(Command::Send(Event::ProjectNew {
                concept_scheme: Iri::new("https://example.org/vocab").unwrap()
            }))
        );
        assert_eq!(parse("save").unwrap(), Some(Command::Send(Event::ProjectSave)));
        assert_eq!(parse("exit").unwrap(), Some(Command::Quit));
    }

    #[test]
    fn define_accepts_shorthand_and_full_types() {
        let iri = Iri::new("https://example.org/vocab/c1").unwrap();
        assert_eq!(
            parse("define concept https://example.org/vocab/c1").unwrap(),
            Some(Command::Send(Event::ResourceCreateConfirm(ResourceDraft::new(
                skos::concept(),
                iri.clone()
            ))))
        );
        assert_eq!(
            parse("define http://www.w3.org/2004/02/skos/core#Collection https://example.org/vocab/c1")
                .unwrap(),
            Some(Command::Send(Event::ResourceCreateConfirm(ResourceDraft::new(
                skos::collection(),
                iri
            ))))
        );
    }

    #[test]
    fn rejects_bad_input() {
        let err = parse("frobnicate").unwrap_err();
        assert!(err.to_string().contains("Unknown command"));
        let err = parse("save-as").unwrap_err();
        assert!(err.to_string().contains("Wrong arguments"));
        assert!(parse("delete not-an-iri").is_err());
    }

    #[test]
    fn cancel_follows_the_project_state() {
        assert_eq!(
            cancel_event(ProjectState::OpeningLocalFile),
            Some(Event::ProjectOpenFileCancel)
        );
        assert_eq!(
            cancel_event(ProjectState::Opened(OpenedState::SavingError)),
            Some(Event::ProjectSaveCancel)
        );
        assert_eq!(cancel_event(ProjectState::Opened(OpenedState::Idle)), None);
        assert_eq!(cancel_event(ProjectState::Empty), None);
    }
}
