use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use daybook_session::{Session, SessionConfig};
use daybook_storage::slots::{normalize_snapshot_name, snapshot_key, snapshot_names};
use daybook_storage::{read_document, FileStore};
use directories::ProjectDirs;

mod logging;
mod report;

use report::{render_text, JsonReport, Sheet};

#[derive(Debug, Parser)]
#[command(name = "daybook")]
#[command(about = "Inspect and manage a Daybook store: snapshots, autosave and sheet totals.")]
struct Cli {
    /// Store file. Defaults to `store.json` in the platform data directory.
    #[arg(long, global = true, value_name = "PATH")]
    store: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List snapshot names, one per line.
    Snapshots,
    /// Save the autosaved document as a named snapshot.
    Save {
        /// Snapshot name (surrounding whitespace is trimmed).
        name: String,
    },
    /// Restore a named snapshot into the autosave slot.
    Load { name: String },
    /// Print sheet totals.
    Report {
        /// Report on a named snapshot instead of the autosaved document.
        #[arg(long)]
        snapshot: Option<String>,

        #[arg(long, value_enum, default_value_t = Sheet::All)]
        sheet: Sheet,

        /// Emit totals as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn default_store_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("com", "daybook", "Daybook")
        .context("no data directory for this platform; pass --store")?;
    Ok(dirs.data_dir().join("store.json"))
}

fn open_store(path: Option<PathBuf>) -> Result<Arc<FileStore>> {
    let path = match path {
        Some(path) => path,
        None => default_store_path()?,
    };
    let store =
        FileStore::open(&path).with_context(|| format!("open store {}", path.display()))?;
    Ok(Arc::new(store))
}

/// Snapshot names given on the command line are trimmed like names saved from a session.
fn snapshot_name(raw: &str) -> Result<&str> {
    normalize_snapshot_name(raw).context("snapshot name must not be blank")
}

/// Write to stdout, treating a closed pipe as success.
fn emit(text: &str) -> Result<()> {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();
    match handle.write_all(text.as_bytes()).and_then(|()| handle.flush()) {
        Err(err) if err.kind() == std::io::ErrorKind::BrokenPipe => Ok(()),
        other => Ok(other?),
    }
}

fn main() -> Result<()> {
    logging::init();
    let cli = Cli::parse();
    let store = open_store(cli.store)?;

    match cli.command {
        Command::Snapshots => {
            let mut out = String::new();
            for name in snapshot_names(&*store)? {
                out.push_str(&name);
                out.push('\n');
            }
            emit(&out)
        }
        Command::Save { name } => {
            let name = snapshot_name(&name)?;
            let mut session = Session::open(store, SessionConfig::default());
            session
                .save_snapshot_as(name)
                .with_context(|| format!("save snapshot `{name}`"))?;
            emit(&format!("Saved \"{name}\".\n"))
        }
        Command::Load { name } => {
            let name = snapshot_name(&name)?;
            let mut session = Session::open(store, SessionConfig::default());
            session
                .load_snapshot(name)
                .with_context(|| format!("load snapshot `{name}`"))?;
            session.write_autosave().context("write autosave")?;
            emit(&format!("Loaded \"{name}\" into autosave.\n"))
        }
        Command::Report {
            snapshot,
            sheet,
            json,
        } => {
            let (source, doc) = match snapshot.as_deref() {
                Some(raw) => {
                    let name = snapshot_name(raw)?;
                    let doc = read_document(&*store, &snapshot_key(name))
                        .with_context(|| format!("read snapshot `{name}`"))?
                        .with_context(|| format!("no snapshot named `{name}`"))?;
                    (name.to_string(), doc)
                }
                None => {
                    let session = Session::open(store, SessionConfig::default());
                    ("autosave".to_string(), session.data().clone())
                }
            };

            if json {
                let totals = doc.totals();
                let report = JsonReport::new(&source, &totals, sheet);
                let mut text = serde_json::to_string_pretty(&report)?;
                text.push('\n');
                emit(&text)
            } else {
                emit(&render_text(&source, &doc, sheet))
            }
        }
    }
}
