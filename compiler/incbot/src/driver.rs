//! One complete run: configuration, identifier tables, then every source
//! file in order.
//!
//! Exit status: 0 when every file was processed, 1 when some source file
//! could not be read (or the command line was bad), 2 on a fatal error.

use std::env;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use tracing::{info, instrument, warn};

use crate::cli::Options;
use crate::config::Config;
use crate::{IdTable, IncbotContext, IncbotError};

pub const EXIT_OK: i32 = 0;
/// Some source files were skipped, or the command line was bad.
pub const EXIT_ERRORS: i32 = 1;
pub const EXIT_FATAL: i32 = 2;

/// Environment variable naming the default identifier table.
pub const ID_TABLE_ENV: &str = "INCBOT_ID_TABLE";

/// Source file name meaning standard input.
pub const STDIN: &str = "-";

/// What happened to the source files of a run.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub scanned: usize,
    /// Files that could not be read.
    pub skipped: usize,
}

impl RunSummary {
    pub fn exit_code(&self) -> i32 {
        if self.skipped > 0 {
            EXIT_ERRORS
        } else {
            EXIT_OK
        }
    }
}

/// Where to look for an identifier table when none was named, in order:
/// `$INCBOT_ID_TABLE`, then `share/incbot/id-table` next to the
/// executable's directory, then `id-table` inside it.
pub fn table_candidates(env_table: Option<OsString>, exe: Option<&Path>) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if let Some(path) = env_table.filter(|path| !path.is_empty()) {
        candidates.push(PathBuf::from(path));
    }
    if let Some(dir) = exe.and_then(Path::parent) {
        candidates.push(dir.join("../share/incbot/id-table"));
        candidates.push(dir.join("id-table"));
    }
    candidates
}

fn discover_table() -> Option<PathBuf> {
    let exe = env::current_exe()
        .ok()
        .map(|exe| fs::canonicalize(&exe).unwrap_or(exe));
    table_candidates(env::var_os(ID_TABLE_ENV), exe.as_deref())
        .into_iter()
        .find(|path| File::open(path).is_ok())
}

/// Load the configured identifier tables, or the default one.
///
/// An unreadable table is reported and skipped; having no table at all is
/// fatal. Traced identifiers are marked once every table is in.
pub fn load_tables(config: &Config) -> Result<IdTable, IncbotError> {
    let paths = if config.id_tables.is_empty() {
        discover_table().into_iter().collect()
    } else {
        config.id_tables.clone()
    };

    let mut table = IdTable::with_index(config.index_strategy());
    let mut loaded = 0;
    for path in &paths {
        info!(path = %path.display(), "identifier table");
        match table.load_file(path, config.load_options()) {
            Ok(_) => loaded += 1,
            Err(err @ IncbotError::Io { .. }) => eprintln!("incbot: {err}"),
            Err(err) => return Err(err),
        }
    }
    if loaded == 0 {
        return Err(IncbotError::NoIdTable);
    }
    table.verify()?;

    for name in &config.trace {
        if !table.trace(name) {
            warn!(id = %name, "traced identifier is not in the table");
        }
    }
    Ok(table)
}

fn read_source(name: &str) -> Result<Vec<u8>, IncbotError> {
    if name == STDIN {
        let mut source = Vec::new();
        io::stdin()
            .lock()
            .read_to_end(&mut source)
            .map_err(|err| IncbotError::io("<stdin>", err))?;
        Ok(source)
    } else {
        fs::read(name).map_err(|err| IncbotError::io(name, err))
    }
}

/// Run incbot as the command line asks, writing includes to `out`.
#[instrument(level = "info", skip_all)]
pub fn run<W: Write>(options: &Options, out: &mut W) -> Result<RunSummary, IncbotError> {
    let mut config = match &options.conf {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    config.apply(options);

    let table = load_tables(&config)?;
    info!(identifiers = table.len(), "tables loaded");
    let mut context = IncbotContext::new(table, config.xref_scope, config.emit_options());

    let stdin_only = [STDIN.to_owned()];
    let files: &[String] = if options.files.is_empty() {
        &stdin_only
    } else {
        &options.files
    };
    info!(?files, "sources");

    let mut summary = RunSummary::default();
    for file in files {
        let source = match read_source(file) {
            Ok(source) => source,
            Err(err) => {
                eprintln!("incbot: {err}");
                summary.skipped += 1;
                continue;
            }
        };
        context.process(&source, out).map_err(|err| match err {
            IncbotError::Output(_) => err,
            other => IncbotError::Scan {
                path: PathBuf::from(file),
                source: Box::new(other),
            },
        })?;
        summary.scanned += 1;
    }

    out.flush().map_err(IncbotError::Output)?;
    Ok(summary)
}
