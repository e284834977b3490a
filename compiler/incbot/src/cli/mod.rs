//! Command-line parsing.
//!
//! Hand-rolled; accepts `--opt value`, `--opt=value`, `-o value`, `-ovalue`
//! and bundled short flags (`-vd`). Option parsing stops at the first
//! operand or at `--`; `-` alone is an operand meaning stdin.

use std::fmt;
use std::path::PathBuf;

use crate::config::Separator;
use crate::tracing_setup::Verbosity;

/// Option errors tolerated before parsing gives up.
pub const MAX_OPTION_ERRORS: usize = 10;

const USAGE: &str = "\
usage: incbot [options] [files...]

Options:
  -h, --help              Show this help message and exit
  -V, --version           Show version information and exit
  -v, --verbose           Log table and file names
  -d, --debug             Log every identifier lookup
  -c, --conf <file>       JSON configuration file
  -t, --id-table <file>   Load a file describing library identifiers
                          (may be given more than once)
  -T, --trace <symbol>    Trace lookups of the given identifier
                          (may be given more than once)
      --separator <char>  Identifier table field separator (default ';')
      --accumulate        Keep cross-references across files
      --indent <n>        Indent `// Import` lines by n spaces

With no files, or when a file is '-', read standard input.
";

/// Usage text for `--help` and option errors.
pub fn usage() -> &'static str {
    USAGE
}

/// Text for `--version`.
pub fn version_text() -> String {
    format!(
        "incbot {}\nLicense {}\n",
        crate::VERSION,
        env!("CARGO_PKG_LICENSE")
    )
}

/// Parsed command line for a normal run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Options {
    pub verbose: bool,
    pub debug: bool,
    pub conf: Option<PathBuf>,
    pub id_tables: Vec<PathBuf>,
    pub trace: Vec<String>,
    pub separator: Option<Separator>,
    pub accumulate: bool,
    pub indent: Option<usize>,
    /// Source files; empty means stdin.
    pub files: Vec<String>,
}

impl Options {
    pub fn verbosity(&self) -> Verbosity {
        if self.debug {
            Verbosity::Debug
        } else if self.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Quiet
        }
    }
}

/// What the command line asks for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Options),
    Help,
    Version,
}

/// One or more bad options.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UsageError {
    pub messages: Vec<String>,
}

impl fmt::Display for UsageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.messages.join("\n"))
    }
}

impl std::error::Error for UsageError {}

/// Options that take a value.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Valued {
    Conf,
    IdTable,
    Trace,
    Separator,
    Indent,
}

impl Valued {
    fn from_long(name: &str) -> Option<Valued> {
        match name {
            "conf" => Some(Valued::Conf),
            "id-table" => Some(Valued::IdTable),
            "trace" => Some(Valued::Trace),
            "separator" => Some(Valued::Separator),
            "indent" => Some(Valued::Indent),
            _ => None,
        }
    }

    fn from_short(c: char) -> Option<Valued> {
        match c {
            'c' => Some(Valued::Conf),
            't' => Some(Valued::IdTable),
            'T' => Some(Valued::Trace),
            _ => None,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Valued::Conf => "--conf",
            Valued::IdTable => "--id-table",
            Valued::Trace => "--trace",
            Valued::Separator => "--separator",
            Valued::Indent => "--indent",
        }
    }
}

/// Options without a value.
enum Flag {
    Verbose,
    Debug,
    Accumulate,
    Help,
    Version,
}

impl Flag {
    fn from_long(name: &str) -> Option<Flag> {
        match name {
            "verbose" => Some(Flag::Verbose),
            "debug" => Some(Flag::Debug),
            "accumulate" => Some(Flag::Accumulate),
            "help" => Some(Flag::Help),
            "version" => Some(Flag::Version),
            _ => None,
        }
    }

    fn from_short(c: char) -> Option<Flag> {
        match c {
            'v' => Some(Flag::Verbose),
            'd' => Some(Flag::Debug),
            'h' | '?' => Some(Flag::Help),
            'V' => Some(Flag::Version),
            _ => None,
        }
    }
}

#[derive(Default)]
struct Parser {
    options: Options,
    errors: Vec<String>,
}

impl Parser {
    /// Apply a flag; returns the command it ends parsing with, if any.
    fn flag(&mut self, flag: Flag) -> Option<Command> {
        match flag {
            Flag::Verbose => self.options.verbose = true,
            Flag::Debug => self.options.debug = true,
            Flag::Accumulate => self.options.accumulate = true,
            Flag::Help => return Some(Command::Help),
            Flag::Version => return Some(Command::Version),
        }
        None
    }

    fn value(&mut self, option: Valued, value: Option<String>) {
        let Some(value) = value else {
            self.errors
                .push(format!("option '{}' requires an argument", option.name()));
            return;
        };
        match option {
            Valued::Conf => self.options.conf = Some(PathBuf::from(value)),
            Valued::IdTable => self.options.id_tables.push(PathBuf::from(value)),
            Valued::Trace => self.options.trace.push(value),
            Valued::Separator => match value.parse() {
                Ok(separator) => self.options.separator = Some(separator),
                Err(message) => self.errors.push(format!("--separator: {message}")),
            },
            Valued::Indent => match value.parse() {
                Ok(indent) => self.options.indent = Some(indent),
                Err(_) => self
                    .errors
                    .push(format!("--indent: expected a number, got '{value}'")),
            },
        }
    }
}

/// Parse the arguments that follow the program name.
pub fn parse_args<I, S>(args: I) -> Result<Command, UsageError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut args = args.into_iter().map(Into::<String>::into);
    let mut parser = Parser::default();

    while let Some(arg) = args.next() {
        if parser.errors.len() > MAX_OPTION_ERRORS {
            parser.errors.push("too many option errors".to_owned());
            break;
        }

        if arg == "--" {
            parser.options.files.extend(args.by_ref());
            break;
        }
        if arg == "-" || !arg.starts_with('-') {
            parser.options.files.push(arg);
            parser.options.files.extend(args.by_ref());
            break;
        }

        if let Some(long) = arg.strip_prefix("--") {
            let (name, inline) = match long.split_once('=') {
                Some((name, value)) => (name, Some(value.to_owned())),
                None => (long, None),
            };
            if let Some(option) = Valued::from_long(name) {
                let value = inline.or_else(|| args.next());
                parser.value(option, value);
            } else if let Some(flag) = Flag::from_long(name) {
                if inline.is_some() {
                    parser
                        .errors
                        .push(format!("option '--{name}' doesn't allow an argument"));
                } else if let Some(command) = parser.flag(flag) {
                    return Ok(command);
                }
            } else {
                parser.errors.push(format!("unknown long option '--{name}'"));
            }
            continue;
        }

        // Bundled short options: `-vd`, `-tTABLE`, `-t TABLE`.
        let cluster = &arg[1..];
        for (at, c) in cluster.char_indices() {
            if let Some(option) = Valued::from_short(c) {
                let rest = &cluster[at + c.len_utf8()..];
                let value = if rest.is_empty() {
                    args.next()
                } else {
                    Some(rest.to_owned())
                };
                parser.value(option, value);
                break;
            } else if let Some(flag) = Flag::from_short(c) {
                if let Some(command) = parser.flag(flag) {
                    return Ok(command);
                }
            } else {
                parser.errors.push(format!("unknown short option '-{c}'"));
            }
        }
    }

    if parser.errors.is_empty() {
        Ok(Command::Run(parser.options))
    } else {
        Err(UsageError {
            messages: parser.errors,
        })
    }
}
