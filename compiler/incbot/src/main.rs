//! incbot command line.

use std::io::{self, Write};
use std::process::ExitCode;

use incbot::cli::{parse_args, usage, version_text, Command};
use incbot::driver::{self, EXIT_ERRORS, EXIT_FATAL, EXIT_OK};
use incbot::tracing_setup::init_tracing;

fn exit(code: i32) -> ExitCode {
    ExitCode::from(u8::try_from(code).unwrap_or(u8::MAX))
}

fn main() -> ExitCode {
    let options = match parse_args(std::env::args().skip(1)) {
        Ok(Command::Run(options)) => options,
        Ok(Command::Help) => {
            print!("{}", usage());
            return exit(EXIT_OK);
        }
        Ok(Command::Version) => {
            print!("{}", version_text());
            return exit(EXIT_OK);
        }
        Err(err) => {
            for message in &err.messages {
                eprintln!("incbot: {message}");
            }
            eprint!("{}", usage());
            return exit(EXIT_ERRORS);
        }
    };

    init_tracing(options.verbosity());

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let code = match driver::run(&options, &mut out) {
        Ok(summary) => summary.exit_code(),
        Err(err) => {
            let _ = out.flush();
            eprintln!("incbot: {err}");
            EXIT_FATAL
        }
    };
    exit(code)
}
