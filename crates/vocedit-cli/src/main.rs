//! VocEdit command line
//!
//! Runs an editing session against local files from a terminal, and
//! exposes the pretty-printer and the session check on their own.

mod commands;
mod terminal;

use anyhow::{Context, Result};
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use commands::Command as Line;
use std::path::PathBuf;
use std::sync::Arc;
use terminal::{ConsoleRedirect, PresetFilePicker};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;
use vocedit_auth::{GitHubClient, Session};
use vocedit_core::{
    Collaborators, EditorConfig, Event, HistoryNavigator, Orchestrator, Prettify, TracingNotifier,
    WorkerPrettifier,
};
use vocedit_graph::InMemoryResourceManager;

fn cli() -> Command {
    Command::new("vocedit")
        .version(vocedit_core::VERSION)
        .about("Controlled-vocabulary editing sessions from the terminal")
        .arg(
            Arg::new("config")
                .long("config")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Editor configuration file (TOML)"),
        )
        .arg(
            Arg::new("session")
                .long("session")
                .global(true)
                .value_parser(value_parser!(PathBuf))
                .help("Session file holding the sign-in token"),
        )
        .arg(
            Arg::new("json-logs")
                .long("json-logs")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Emit logs as JSON"),
        )
        .subcommand(Command::new("edit").about("Start an interactive editing session"))
        .subcommand(
            Command::new("prettify")
                .about("Pretty-print a vocabulary file to stdout")
                .arg(
                    Arg::new("file")
                        .required(true)
                        .value_parser(value_parser!(PathBuf))
                        .help("Turtle or N-Triples file"),
                ),
        )
        .subcommand(
            Command::new("check-auth")
                .about("Check the stored session against the API")
                .arg(
                    Arg::new("json")
                        .long("json")
                        .action(ArgAction::SetTrue)
                        .help("Print the profile as JSON"),
                ),
        )
}

#[tokio::main]
async fn main() -> Result<()> {
    let matches = cli().get_matches();
    init_tracing(matches.get_flag("json-logs"));

    match matches.subcommand() {
        Some(("edit", _)) => edit(&matches).await,
        Some(("prettify", args)) => prettify(&matches, args).await,
        Some(("check-auth", args)) => check_auth(&matches, args).await,
        _ => {
            cli().print_help()?;
            Ok(())
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

fn load_config(matches: &ArgMatches) -> Result<EditorConfig> {
    match matches.get_one::<PathBuf>("config") {
        Some(path) => EditorConfig::load(path)
            .with_context(|| format!("loading config from {}", path.display())),
        None => Ok(EditorConfig::default()),
    }
}

fn open_session(matches: &ArgMatches) -> Result<Session> {
    match matches.get_one::<PathBuf>("session") {
        Some(path) => Session::open(path)
            .with_context(|| format!("opening session {}", path.display())),
        None => Ok(Session::in_memory()),
    }
}

enum Input {
    Line(Option<String>),
    Result(Event),
}

async fn edit(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let picker = Arc::new(PresetFilePicker::default());
    let collaborators = Collaborators {
        resource_manager: Arc::new(InMemoryResourceManager::new()),
        file_picker: picker.clone(),
        prettifier: Arc::new(WorkerPrettifier::spawn(config.prettify_timeout())),
        session: Arc::new(open_session(matches)?),
        user_api: Arc::new(GitHubClient::new(&config.auth.api_base_url)?),
        redirect: Arc::new(ConsoleRedirect),
        notifier: Arc::new(TracingNotifier),
        navigator: Arc::new(HistoryNavigator::new()),
    };

    let mut orchestrator = Orchestrator::new(&config, collaborators);
    orchestrator.start();
    println!("{}", orchestrator.snapshot());
    println!("Type `help` for commands.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let input = tokio::select! {
            line = lines.next_line() => Input::Line(line?),
            Some(result) = orchestrator.next_result() => Input::Result(result),
        };
        match input {
            Input::Line(None) => break,
            Input::Line(Some(line)) => match commands::parse(&line) {
                Ok(Some(Line::Quit)) => break,
                Ok(Some(command)) => run_command(&mut orchestrator, &picker, command),
                Ok(None) => {}
                Err(e) => eprintln!("{e}"),
            },
            Input::Result(event) => {
                if orchestrator.process(event) {
                    println!("{}", orchestrator.snapshot());
                }
            }
        }
    }
    Ok(())
}

fn run_command(orchestrator: &mut Orchestrator, picker: &PresetFilePicker, command: Line) {
    let picks_file = matches!(command, Line::Open(_) | Line::SaveAs(_));
    let event = match command {
        Line::Send(event) => event,
        Line::Open(path) => {
            picker.preset(path);
            Event::ProjectOpenFile
        }
        Line::SaveAs(path) => {
            picker.preset(path);
            Event::ProjectSaveAs
        }
        Line::Cancel => {
            let Some(event) = commands::cancel_event(orchestrator.snapshot().project) else {
                println!("Nothing to cancel");
                return;
            };
            event
        }
        Line::Status => {
            println!("{}", orchestrator.snapshot());
            return;
        }
        Line::Help => {
            println!("{}", commands::HELP);
            return;
        }
        Line::Quit => return,
    };

    let name = event.name();
    if orchestrator.process(event) {
        println!("{}", orchestrator.snapshot());
    } else {
        if picks_file {
            picker.clear();
        }
        println!("`{name}` does nothing in {}", orchestrator.snapshot());
    }
}

async fn prettify(matches: &ArgMatches, args: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let path = args
        .get_one::<PathBuf>("file")
        .context("missing file argument")?;
    let text = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("reading {}", path.display()))?;

    let prettifier = WorkerPrettifier::spawn(config.prettify_timeout());
    let pretty = prettifier.prettify(text).await?;
    print!("{pretty}");
    Ok(())
}

async fn check_auth(matches: &ArgMatches, args: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let session = open_session(matches)?;
    let client = GitHubClient::new(&config.auth.api_base_url)?;

    let check = vocedit_auth::check_auth(&session, &client, chrono::Utc::now()).await?;
    match check.info {
        Some(info) if args.get_flag("json") => {
            println!("{}", serde_json::to_string_pretty(&info.user)?);
        }
        Some(info) => println!("Signed in as {}", info.user.display_name()),
        None => println!("Not signed in"),
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use vocedit_graph::Iri;

    fn terminal_editor(config: &EditorConfig, picker: Arc<PresetFilePicker>) -> Orchestrator {
        let collaborators = Collaborators {
            resource_manager: Arc::new(InMemoryResourceManager::new()),
            file_picker: picker,
            prettifier: Arc::new(WorkerPrettifier::spawn(config.prettify_timeout())),
            session: Arc::new(Session::in_memory()),
            user_api: Arc::new(GitHubClient::new(&config.auth.api_base_url).unwrap()),
            redirect: Arc::new(ConsoleRedirect),
            notifier: Arc::new(TracingNotifier),
            navigator: Arc::new(HistoryNavigator::new()),
        };
        let mut orchestrator = Orchestrator::new(config, collaborators);
        orchestrator.start();
        orchestrator
    }

    #[tokio::test]
    async fn rejected_open_does_not_answer_a_later_save() {
        let dir = tempfile::tempdir().unwrap();
        let precious = dir.path().join("precious.ttl");
        std::fs::write(&precious, "ORIGINAL").unwrap();

        let config = EditorConfig::default();
        let picker = Arc::new(PresetFilePicker::default());
        let mut orchestrator = terminal_editor(&config, picker.clone());

        let scheme = Iri::new("https://example.org/vocab").unwrap();
        run_command(
            &mut orchestrator,
            &picker,
            Line::Send(Event::ProjectNew {
                concept_scheme: scheme,
            }),
        );
        run_command(&mut orchestrator, &picker, Line::Open(precious.clone()));
        assert!(orchestrator.snapshot().matches("project.opened.idle"));

        run_command(&mut orchestrator, &picker, Line::Send(Event::ProjectSave));
        assert!(orchestrator.snapshot().matches("project.opened.savingAs"));
        tokio::time::timeout(Duration::from_secs(5), async {
            while !orchestrator.snapshot().matches("project.opened.idle") {
                orchestrator.settle_next().await;
            }
        })
        .await
        .expect("save-as should settle");

        assert_eq!(orchestrator.snapshot().file_name, None);
        assert_eq!(std::fs::read_to_string(&precious).unwrap(), "ORIGINAL");
    }

    #[tokio::test]
    async fn accepted_save_as_writes_the_named_file() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("vocab.ttl");

        let config = EditorConfig::default();
        let picker = Arc::new(PresetFilePicker::default());
        let mut orchestrator = terminal_editor(&config, picker.clone());

        run_command(
            &mut orchestrator,
            &picker,
            Line::Send(Event::ProjectNew {
                concept_scheme: Iri::new("https://example.org/vocab").unwrap(),
            }),
        );
        run_command(&mut orchestrator, &picker, Line::SaveAs(target.clone()));
        tokio::time::timeout(Duration::from_secs(5), async {
            while !orchestrator.snapshot().matches("project.opened.idle") {
                orchestrator.settle_next().await;
            }
        })
        .await
        .expect("save-as should settle");

        assert_eq!(orchestrator.snapshot().file_name.as_deref(), Some("vocab.ttl"));
        let written = std::fs::read_to_string(&target).unwrap();
        assert!(written.contains("a skos:ConceptScheme"));
    }
}
