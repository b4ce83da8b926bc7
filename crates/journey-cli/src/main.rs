//! journey CLI: Command-line interface for the life journey journal

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use journey_engine::config::{CONFIG_FILE, DATA_DIR_ENV};
use journey_engine::{
    assemble, export_timeline, render_timeline, resolve_data_dir, AnswerField, Catalog, Config,
    ConfigError, CustomEvent, EventField, Gate, GateError, GateSetup, ImageError, ImageRef,
    Journal, JournalError, JournalStore, Locale, PersistenceError, Translate,
};
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

/// Record the important moments of your life as a timeline
#[derive(Parser)]
#[command(name = "journey")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Data directory (default: $JOURNEY_HOME, then ./.journey)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Language for this invocation (zh or en)
    #[arg(long, global = true)]
    lang: Option<Locale>,

    /// Access phrase, if one is set
    #[arg(long, global = true, env = "JOURNEY_PHRASE", hide_env_values = true)]
    phrase: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Set, change or inspect the access phrase
    Gate {
        #[command(subcommand)]
        action: GateAction,
    },

    /// Set your name
    Name { name: String },

    /// List the preset questions
    Questions {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Answer one field of a preset question
    Answer {
        /// Question key (see `journey questions`)
        key: String,
        /// date, description, startDate, endDate or name
        field: AnswerField,
        value: String,
    },

    /// Attach or remove question images
    Image {
        #[command(subcommand)]
        action: ImageAction,
    },

    /// Manage custom events
    Event {
        #[command(subcommand)]
        action: EventAction,
    },

    /// Print the assembled timeline
    Timeline {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Export the timeline document
    Export {
        /// Output directory (default: config export_dir, then current directory)
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Set the default language, or toggle it when none is given
    Lang { locale: Option<Locale> },
}

#[derive(Subcommand)]
enum GateAction {
    /// Choose an access phrase (an empty phrase skips)
    Set {
        #[arg(value_name = "PHRASE")]
        new_phrase: String,
        confirm: String,
    },

    /// Continue without an access phrase
    Skip,

    /// Replace the phrase; pass the current one with --phrase
    Change {
        #[arg(value_name = "PHRASE")]
        new_phrase: String,
        confirm: String,
    },

    /// Show whether a phrase is set
    Status,
}

#[derive(Subcommand)]
enum ImageAction {
    /// Attach an image file to a question
    Attach { key: String, file: PathBuf },

    /// Remove a question's image
    Remove { key: String },
}

#[derive(Subcommand)]
enum EventAction {
    /// Add a custom event
    Add {
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        date: Option<String>,
        #[arg(long)]
        end_date: Option<String>,
        #[arg(long)]
        description: Option<String>,
        /// Image file to attach
        #[arg(long)]
        image: Option<PathBuf>,
    },

    /// Change one field of a custom event
    Set {
        id: Uuid,
        /// title, date, endDate or description
        field: EventField,
        value: String,
    },

    /// Attach an image to a custom event, or clear it when no file is given
    Image { id: Uuid, file: Option<PathBuf> },

    /// Delete a custom event
    Delete { id: Uuid },

    /// List custom events
    List,
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    /// Localized message for the user.
    #[error("{0}")]
    Message(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error(transparent)]
    Gate(#[from] GateError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error(transparent)]
    Journal(#[from] JournalError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Image(#[from] ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

fn main() {
    let cli = Cli::parse();
    init_logging();

    let cwd = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("Error: failed to get current directory: {e}");
            std::process::exit(1);
        }
    };
    let env_home = std::env::var(DATA_DIR_ENV).ok();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    if let Err(e) = run(cli, &cwd, env_home.as_deref(), &mut out) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Everything a command needs, resolved once per invocation.
struct Session {
    store: JournalStore,
    config: Config,
    config_path: PathBuf,
    locale: Locale,
    catalog: Catalog,
    phrase: Option<String>,
    cwd: PathBuf,
}

impl Session {
    fn open(cli: &Cli, cwd: &Path, env_home: Option<&str>) -> Result<Self, CliError> {
        let data_dir = resolve_data_dir(cli.data_dir.as_deref(), env_home, cwd);
        debug!(data_dir = %data_dir.display(), "Opening journal");

        let store = JournalStore::new(&data_dir)?;
        let config_path = data_dir.join(CONFIG_FILE);
        let config = Config::load_or_default(&config_path).unwrap_or_else(|e| {
            warn!(path = %config_path.display(), error = %e, "Ignoring unreadable config");
            Config::default()
        });
        let locale = cli.lang.unwrap_or(config.locale);

        Ok(Self {
            store,
            config,
            config_path,
            locale,
            catalog: Catalog::builtin(),
            phrase: cli.phrase.clone(),
            cwd: cwd.to_path_buf(),
        })
    }

    fn gate(&self) -> Result<Gate, CliError> {
        Ok(Gate::from_stored(self.store.load_gate()?))
    }

    /// Map a gate error to the localized message when there is one.
    fn gate_error(&self, e: GateError) -> CliError {
        match e.message_key() {
            Some(key) => CliError::Message(self.locale.translate(key)),
            None => CliError::Gate(e),
        }
    }

    /// Load the journal after checking the access phrase.
    fn journal(&self) -> Result<Journal, CliError> {
        self.gate()?
            .unlock(self.phrase.as_deref())
            .map_err(|e| self.gate_error(e))?;
        Ok(self.store.load()?)
    }

    fn commit(&self, journal: &Journal) -> Result<(), CliError> {
        self.store.save(journal)?;
        Ok(())
    }
}

fn run(cli: Cli, cwd: &Path, env_home: Option<&str>, out: &mut dyn Write) -> Result<(), CliError> {
    let session = Session::open(&cli, cwd, env_home)?;

    match cli.command {
        Commands::Gate { action } => cmd_gate(&session, action, out),
        Commands::Name { name } => {
            let journal = session.journal()?.with_user_name(name.trim());
            session.commit(&journal)?;
            writeln!(out, "{}", session.locale.translate("saved"))?;
            Ok(())
        }
        Commands::Questions { category } => cmd_questions(&session, category.as_deref(), out),
        Commands::Answer { key, field, value } => {
            let journal = session
                .journal()?
                .with_answer_field(&session.catalog, &key, field, value)?;
            session.commit(&journal)?;
            writeln!(out, "{}", session.locale.translate("saved"))?;
            Ok(())
        }
        Commands::Image { action } => cmd_image(&session, action, out),
        Commands::Event { action } => cmd_event(&session, action, out),
        Commands::Timeline { json } => cmd_timeline(&session, json, out),
        Commands::Export { out: dir } => cmd_export(&session, dir, out),
        Commands::Lang { locale } => {
            let config = Config {
                locale: locale.unwrap_or_else(|| session.config.locale.toggle()),
                ..session.config.clone()
            };
            config.save(&session.config_path)?;
            writeln!(out, "{}", config.locale)?;
            Ok(())
        }
    }
}

fn cmd_gate(session: &Session, action: GateAction, out: &mut dyn Write) -> Result<(), CliError> {
    let gate = session.gate()?;
    let t = &session.locale;

    let outcome = match action {
        GateAction::Status => {
            let status = if gate.is_locked() { "locked" } else { "open" };
            writeln!(out, "{status}")?;
            return Ok(());
        }
        GateAction::Skip => gate.set("", ""),
        GateAction::Set { new_phrase, confirm } => gate.set(&new_phrase, &confirm),
        GateAction::Change { new_phrase, confirm } => {
            let current = session.phrase.as_deref().unwrap_or_default();
            gate.change(current, &new_phrase, &confirm)
        }
    }
    .map_err(|e| session.gate_error(e))?;

    match outcome {
        GateSetup::Store(phrase) => {
            session.store.save_gate(&phrase)?;
            writeln!(out, "{}", t.translate("saved"))?;
        }
        GateSetup::Skipped => {
            // Skipping on a fresh gate stores nothing; skipping during a change removes the phrase
            session.store.clear_gate()?;
            writeln!(out, "{}", t.translate("skipPassword"))?;
        }
    }
    Ok(())
}

fn cmd_questions(session: &Session, category: Option<&str>, out: &mut dyn Write) -> Result<(), CliError> {
    let journal = session.journal()?;
    let t = &session.locale;

    let categories: Vec<_> = match category {
        Some(id) => vec![session
            .catalog
            .category(id)
            .ok_or_else(|| CliError::UnknownCategory(id.to_string()))?],
        None => session.catalog.categories().iter().collect(),
    };

    for category in categories {
        writeln!(
            out,
            "{} {} [{}]",
            category.icon,
            t.translate(&format!("categories.{}", category.id)),
            category.id
        )?;
        for q in &category.questions {
            let answered = journal.answers.get(&q.key).is_some_and(|a| a.is_present());
            let mark = if answered { " \u{2713}" } else { "" };
            let hint = q
                .placeholder
                .as_ref()
                .map(|p| format!(" ({})", t.translate(&format!("placeholders.{p}"))))
                .unwrap_or_default();
            writeln!(
                out,
                "  {:<20} {:<9} {}{hint}{mark}",
                q.key,
                q.kind.to_string(),
                t.translate(&format!("questions.{}", q.key)),
            )?;
        }
    }
    Ok(())
}

fn cmd_image(session: &Session, action: ImageAction, out: &mut dyn Write) -> Result<(), CliError> {
    let journal = session.journal()?;

    let journal = match action {
        ImageAction::Attach { key, file } => {
            let image = read_image(&file)?;
            journal.with_image(&session.catalog, &key, image)?
        }
        ImageAction::Remove { key } => journal.without_image(&key),
    };

    session.commit(&journal)?;
    writeln!(out, "{}", session.locale.translate("saved"))?;
    Ok(())
}

fn cmd_event(session: &Session, action: EventAction, out: &mut dyn Write) -> Result<(), CliError> {
    let journal = session.journal()?;
    let t = &session.locale;

    let (journal, confirmation) = match action {
        EventAction::List => {
            for event in &journal.custom_events {
                let hidden = if event.is_eligible() { "" } else { " *" };
                writeln!(out, "{}  {:<10}  {}{hidden}", event.id, event.date, event.title)?;
            }
            return Ok(());
        }
        EventAction::Add {
            title,
            date,
            end_date,
            description,
            image,
        } => {
            let mut event = CustomEvent::new();
            for (field, value) in [
                (EventField::Title, title),
                (EventField::Date, date),
                (EventField::EndDate, end_date),
                (EventField::Description, description),
            ] {
                if let Some(value) = value {
                    event = event.with_field(field, value);
                }
            }
            if let Some(path) = image {
                event = event.with_image(Some(read_image(&path)?));
            }
            let (journal, id) = journal.with_custom_event(event);
            (journal, id.to_string())
        }
        EventAction::Set { id, field, value } => (
            journal.with_custom_event_field(id, field, value)?,
            t.translate("saved"),
        ),
        EventAction::Image { id, file } => {
            let image = file.as_deref().map(read_image).transpose()?;
            (journal.with_custom_event_image(id, image)?, t.translate("saved"))
        }
        EventAction::Delete { id } => (journal.without_custom_event(id)?, t.translate("delete")),
    };

    session.commit(&journal)?;
    writeln!(out, "{confirmation}")?;
    Ok(())
}

fn cmd_timeline(session: &Session, json: bool, out: &mut dyn Write) -> Result<(), CliError> {
    let journal = session.journal()?;
    let entries = assemble(&session.catalog, &journal, &session.locale);

    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&entries)?)?;
    } else {
        let doc = render_timeline(
            &journal.user_name,
            &entries,
            &session.locale,
            session.config.wrap_width,
        );
        write!(out, "{doc}")?;
    }
    Ok(())
}

fn cmd_export(session: &Session, dir: Option<PathBuf>, out: &mut dyn Write) -> Result<(), CliError> {
    let journal = session.journal()?;
    let entries = assemble(&session.catalog, &journal, &session.locale);
    let dir = dir.unwrap_or_else(|| session.config.export_dir_or(&session.cwd));

    let path = export_timeline(
        &dir,
        &journal.user_name,
        &entries,
        &session.locale,
        session.config.wrap_width,
    )
    .map_err(|e| {
        warn!(error = %e, dir = %dir.display(), "Export failed");
        CliError::Message(session.locale.translate("exportFailed"))
    })?;

    writeln!(out, "{}: {}", session.locale.translate("exported"), path.display())?;
    Ok(())
}

/// Read an image file; on failure nothing is attached.
fn read_image(path: &Path) -> Result<ImageRef, CliError> {
    ImageRef::from_file(path).map_err(|e| {
        warn!(path = %path.display(), error = %e, "Failed to read image");
        CliError::Image(e)
    })
}
