// User record model and JSON encode/decode helpers.
use serde::{Deserialize, Serialize};

use crate::core::error::{Error, ErrorKind};

/// One user entry. `id` is the unique key; `email` and `age` default when
/// absent from the input JSON and are carried through otherwise unchecked.
#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub struct Record {
    pub id: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub age: i64,
}

pub fn decode_record(content: &str) -> Result<Record, Error> {
    serde_json::from_str(content).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("malformed record JSON")
            .with_source(err)
    })
}

pub fn decode_records(content: &[u8]) -> Result<Vec<Record>, Error> {
    serde_json::from_slice(content).map_err(|err| {
        Error::new(ErrorKind::Decode)
            .with_message("malformed record collection")
            .with_source(err)
    })
}

pub fn encode_record(record: &Record) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(record).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode record")
            .with_source(err)
    })
}

pub fn encode_records(records: &[Record]) -> Result<Vec<u8>, Error> {
    serde_json::to_vec(records).map_err(|err| {
        Error::new(ErrorKind::Internal)
            .with_message("failed to encode record collection")
            .with_source(err)
    })
}
