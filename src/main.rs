//! Purpose: `roster` CLI entry point: manage user records in a JSON file.
//! Role: Binary crate root; parses args, runs the dispatcher, emits result bytes on stdout.
//! Invariants: Result payloads are forwarded to stdout unmodified.
//! Invariants: Non-interactive errors are emitted as JSON on stderr.
//! Invariants: Process exit code is derived from `to_exit_code`.
use std::error::Error as StdError;
use std::io::{self, IsTerminal, Write};
use std::path::PathBuf;

use clap::{Parser, ValueHint, error::ErrorKind as ClapErrorKind};
use serde_json::{Map, Value, json};
use tracing_subscriber::EnvFilter;

use roster::api::{DEFAULT_FILE_NAME, Error, ErrorKind, Request, perform, to_exit_code};

fn main() {
    init_tracing();
    let exit_code = match run() {
        Ok(()) => 0,
        Err(err) => {
            emit_error(&err);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<(), Error> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => {
                err.print().map_err(|io_err| {
                    Error::new(ErrorKind::Io)
                        .with_message("failed to write help")
                        .with_source(io_err)
                })?;
                return Ok(());
            }
            _ => {
                return Err(Error::new(ErrorKind::Usage)
                    .with_message(clap_error_summary(&err))
                    .with_hint("Try `roster --help`."));
            }
        },
    };

    let request = Request {
        operation: cli.operation.unwrap_or_default(),
        file_name: cli.file_name,
        item: cli.item,
        id: cli.id,
    };

    let stdout = io::stdout();
    let mut out = stdout.lock();
    perform(&request, &mut out)?;
    out.flush().map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to flush stdout")
            .with_source(err)
    })
}

#[derive(Parser)]
#[command(
    name = "roster",
    version,
    about = "Manage user records stored as a JSON array in a plain file",
    after_help = r#"EXAMPLES
  $ roster --operation add --item '{"id":"1","email":"a@b.com","age":30}'
  $ roster --operation list
  $ roster --operation findById --id 1
  $ roster --operation remove --id 1

NOTES
  - Records live in users.json by default (override with --file-name)
  - add rejects duplicate ids; remove deletes the first match only
  - findById prints nothing when the id is absent"#
)]
struct Cli {
    #[arg(long, help = "Operation to run: list|add|findById|remove")]
    operation: Option<String>,
    #[arg(
        long = "file-name",
        default_value = DEFAULT_FILE_NAME,
        value_hint = ValueHint::FilePath,
        help = "Backing JSON file"
    )]
    file_name: PathBuf,
    #[arg(long, help = "JSON-encoded record, required for add")]
    item: Option<String>,
    #[arg(long, help = "Record id, required for findById and remove")]
    id: Option<String>,
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

fn emit_error(err: &Error) {
    if io::stderr().is_terminal() {
        eprintln!("{}", error_text(err));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::Decode => "malformed JSON".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error) -> String {
    let mut lines = Vec::new();
    lines.push(format!("error: {}", error_message(err)));

    if let Some(hint) = err.hint() {
        lines.push(format!("hint: {hint}"));
    }
    if let Some(path) = err.path() {
        lines.push(format!("path: {}", path.display()));
    }
    if let Some(cause) = error_causes(err).first() {
        lines.push(format!("caused by: {cause}"));
    }

    lines.join("\n")
}

fn clap_error_summary(err: &clap::Error) -> String {
    for line in err.to_string().lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(rest) = trimmed.strip_prefix("error:") {
            return rest.trim().to_string();
        }
        return trimmed.to_string();
    }
    "invalid arguments".to_string()
}
