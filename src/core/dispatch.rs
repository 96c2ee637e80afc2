//! Purpose: Map a validated request onto record-store operations.
//! Exports: `Request`, `perform`, `DEFAULT_FILE_NAME`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate execution.
//! Invariants: Payload bytes reach the sink in a single write call.
//! Invariants: Domain outcomes ("already exists", "not found") are payloads, not errors.
use std::io::Write;
use std::path::PathBuf;

use crate::core::error::{Error, ErrorKind};
use crate::core::store::RecordStore;

pub const DEFAULT_FILE_NAME: &str = "users.json";

/// One operation request with named, typed fields.
#[derive(Clone, Debug)]
pub struct Request {
    pub operation: String,
    pub file_name: PathBuf,
    pub item: Option<String>,
    pub id: Option<String>,
}

impl Request {
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            file_name: PathBuf::from(DEFAULT_FILE_NAME),
            item: None,
            id: None,
        }
    }
}

/// Validates the request, runs the matching store operation, and forwards
/// the payload to `sink` in one write.
pub fn perform(request: &Request, sink: &mut impl Write) -> Result<(), Error> {
    if request.operation.is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("operation must be specified")
            .with_hint("Pass --operation list|add|findById|remove."));
    }
    if request.file_name.as_os_str().is_empty() {
        return Err(Error::new(ErrorKind::Usage)
            .with_message("file name must be specified")
            .with_hint("Pass --file-name or rely on the users.json default."));
    }

    let store = RecordStore::new(&request.file_name);
    let payload = match request.operation.as_str() {
        "list" => store.list()?,
        "add" => {
            let item = require_param(request.item.as_deref(), "add", "--item")?;
            store.add(item)?
        }
        "findById" => {
            let id = require_param(request.id.as_deref(), "findById", "--id")?;
            store.find_by_id(id)?
        }
        "remove" => {
            let id = require_param(request.id.as_deref(), "remove", "--id")?;
            store.remove_by_id(id)?
        }
        other => {
            return Err(Error::new(ErrorKind::Usage)
                .with_message(format!("operation {other} not allowed"))
                .with_hint("Valid operations: list, add, findById, remove."));
        }
    };

    sink.write_all(&payload).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write result")
            .with_source(err)
    })
}

fn require_param<'a>(value: Option<&'a str>, operation: &str, flag: &str) -> Result<&'a str, Error> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(Error::new(ErrorKind::Usage)
            .with_message(format!("{operation} requires {flag}"))
            .with_hint(format!("Pass {flag} with --operation {operation}."))),
    }
}

#[cfg(test)]
mod tests {
    use super::{Request, perform};
    use crate::core::error::{Error, ErrorKind};
    use std::io;

    const ALICE: &str = r#"{"id":"1","email":"a@b.com","age":30}"#;

    fn request_in(dir: &tempfile::TempDir, operation: &str) -> Request {
        Request {
            file_name: dir.path().join("users.json"),
            ..Request::new(operation)
        }
    }

    fn perform_into_vec(request: &Request) -> Result<Vec<u8>, Error> {
        let mut sink = Vec::new();
        perform(request, &mut sink)?;
        Ok(sink)
    }

    #[test]
    fn empty_operation_is_a_usage_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = perform_into_vec(&request_in(&dir, "")).expect_err("empty operation");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn empty_file_name_is_a_usage_error() {
        let request = Request {
            file_name: "".into(),
            ..Request::new("list")
        };
        let err = perform_into_vec(&request).expect_err("empty file name");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn unknown_operation_carries_the_name() {
        let dir = tempfile::tempdir().expect("tempdir");
        let err = perform_into_vec(&request_in(&dir, "compact")).expect_err("unknown operation");
        assert_eq!(err.kind(), ErrorKind::Usage);
        assert!(err.message().expect("message").contains("compact"));
    }

    #[test]
    fn add_requires_a_non_empty_item() {
        let dir = tempfile::tempdir().expect("tempdir");

        let err = perform_into_vec(&request_in(&dir, "add")).expect_err("missing item");
        assert_eq!(err.kind(), ErrorKind::Usage);

        let request = Request {
            item: Some(String::new()),
            ..request_in(&dir, "add")
        };
        let err = perform_into_vec(&request).expect_err("empty item");
        assert_eq!(err.kind(), ErrorKind::Usage);
    }

    #[test]
    fn find_and_remove_require_an_id() {
        let dir = tempfile::tempdir().expect("tempdir");

        for operation in ["findById", "remove"] {
            let err = perform_into_vec(&request_in(&dir, operation)).expect_err("missing id");
            assert_eq!(err.kind(), ErrorKind::Usage);
        }
    }

    #[test]
    fn add_then_list_round_trips_through_the_sink() {
        let dir = tempfile::tempdir().expect("tempdir");

        let request = Request {
            item: Some(ALICE.to_string()),
            ..request_in(&dir, "add")
        };
        let payload = perform_into_vec(&request).expect("add");
        assert_eq!(payload, format!("[{ALICE}]").into_bytes());

        let listed = perform_into_vec(&request_in(&dir, "list")).expect("list");
        assert_eq!(listed, payload);
    }

    #[test]
    fn list_on_absent_file_writes_zero_bytes() {
        let dir = tempfile::tempdir().expect("tempdir");
        let payload = perform_into_vec(&request_in(&dir, "list")).expect("list");
        assert!(payload.is_empty());
    }

    #[test]
    fn remove_not_found_message_reaches_the_sink() {
        let dir = tempfile::tempdir().expect("tempdir");

        let add = Request {
            item: Some(ALICE.to_string()),
            ..request_in(&dir, "add")
        };
        perform_into_vec(&add).expect("add");

        let request = Request {
            id: Some("404".to_string()),
            ..request_in(&dir, "remove")
        };
        let payload = perform_into_vec(&request).expect("remove");
        assert_eq!(payload, b"Item with id 404 not found".to_vec());
    }

    struct FailingSink;

    impl io::Write for FailingSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "sink closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn sink_failure_surfaces_as_io() {
        let dir = tempfile::tempdir().expect("tempdir");

        let add = Request {
            item: Some(ALICE.to_string()),
            ..request_in(&dir, "add")
        };
        let err = perform(&add, &mut FailingSink).expect_err("sink failure");
        assert_eq!(err.kind(), ErrorKind::Io);
    }
}
