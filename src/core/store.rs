// Whole-file JSON record store: one open-read-(mutate)-write cycle per call.
use std::fs::{File, OpenOptions};
use std::io::{Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::error::{Error, ErrorKind};
use crate::core::record::{self, Record};

/// Record store over a single backing file holding one JSON array.
///
/// The file is the sole source of truth; each operation opens it, reads the
/// whole content, and (for mutations) rewrites it from offset zero. The
/// handle never outlives the call.
pub struct RecordStore {
    path: PathBuf,
}

impl RecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the raw file bytes. An empty file yields zero bytes; the
    /// store never synthesizes `[]` for content it did not write.
    pub fn list(&self) -> Result<Vec<u8>, Error> {
        let mut file = self.open()?;
        let content = self.read_all(&mut file)?;
        debug!(bytes = content.len(), "listed records");
        Ok(content)
    }

    /// Decodes `item_json` as one record and appends it, unless a record
    /// with the same id already exists (first match wins, no write).
    pub fn add(&self, item_json: &str) -> Result<Vec<u8>, Error> {
        let item = record::decode_record(item_json)?;
        let mut file = self.open()?;
        let content = self.read_all(&mut file)?;
        if content.is_empty() {
            return self.write_collection(&mut file, vec![item]);
        }

        let mut records = record::decode_records(&content)?;
        if records.iter().any(|existing| existing.id == item.id) {
            debug!(id = %item.id, "rejected duplicate id");
            return Ok(format!("Item with id {} already exists", item.id).into_bytes());
        }
        records.push(item);
        self.write_collection(&mut file, records)
    }

    /// First record whose id matches, serialized alone. No match yields an
    /// empty payload rather than a message.
    pub fn find_by_id(&self, id: &str) -> Result<Vec<u8>, Error> {
        let mut file = self.open()?;
        let content = self.read_all(&mut file)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let records = record::decode_records(&content)?;
        match records.iter().find(|existing| existing.id == id) {
            Some(found) => record::encode_record(found),
            None => Ok(Vec::new()),
        }
    }

    /// Removes the first record whose id matches; later duplicates survive
    /// and the relative order of the rest is preserved.
    pub fn remove_by_id(&self, id: &str) -> Result<Vec<u8>, Error> {
        let mut file = self.open()?;
        let content = self.read_all(&mut file)?;
        if content.is_empty() {
            return Ok(Vec::new());
        }

        let mut records = record::decode_records(&content)?;
        match records.iter().position(|existing| existing.id == id) {
            Some(index) => {
                records.remove(index);
                self.write_collection(&mut file, records)
            }
            None => Ok(format!("Item with id {id} not found").into_bytes()),
        }
    }

    fn open(&self) -> Result<File, Error> {
        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(&self.path)
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&self.path).with_source(err))
    }

    fn read_all(&self, file: &mut File) -> Result<Vec<u8>, Error> {
        let mut content = Vec::new();
        file.read_to_end(&mut content)
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&self.path).with_source(err))?;
        Ok(content)
    }

    // Serialize in memory first, then truncate and rewrite from offset zero.
    // The rewrite is not crash-atomic.
    fn write_collection(&self, file: &mut File, records: Vec<Record>) -> Result<Vec<u8>, Error> {
        let data = record::encode_records(&records)?;
        file.set_len(0)
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&self.path).with_source(err))?;
        file.seek(SeekFrom::Start(0))
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&self.path).with_source(err))?;
        file.write_all(&data)
            .map_err(|err| Error::new(ErrorKind::Io).with_path(&self.path).with_source(err))?;
        debug!(records = records.len(), bytes = data.len(), "rewrote collection");
        Ok(data)
    }
}
