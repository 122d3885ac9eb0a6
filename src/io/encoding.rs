//! Text and binary record encodings.
//!
//! Text files hold the JSON record directly. Binary files hold the same JSON
//! inside a zstd frame. Readers sniff the zstd magic number, so either
//! encoding can be loaded without knowing how it was written.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use log::debug;

use super::record::{Record, RecordError};
use crate::cast::{Cast, CastCollection};

/// Leading bytes of every zstd frame.
const ZSTD_MAGIC: [u8; 4] = [0x28, 0xB5, 0x2F, 0xFD];

/// Default zstd compression level.
pub const DEFAULT_COMPRESSION_LEVEL: i32 = 3;

/// On-disk representation of a record.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Encoding {
    /// Plain JSON
    #[default]
    Text,
    /// zstd-compressed JSON
    Binary,
}

impl Encoding {
    /// Encoding suggested by a file extension (`.nwz`/`.zst` are binary).
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("nwz") | Some("zst") => Encoding::Binary,
            _ => Encoding::Text,
        }
    }
}

/// Serialize `record` to `writer`.
pub fn write_record<W: Write>(
    writer: W,
    record: &Record,
    encoding: Encoding,
) -> Result<(), RecordError> {
    match encoding {
        Encoding::Text => {
            let mut writer = writer;
            serde_json::to_writer(&mut writer, record)?;
            writer.flush()?;
        }
        Encoding::Binary => {
            let json = serde_json::to_vec(record)?;
            let mut encoder = zstd::Encoder::new(writer, DEFAULT_COMPRESSION_LEVEL)?;
            encoder.write_all(&json)?;
            encoder.finish()?.flush()?;
            debug!("wrote {} record ({} bytes of JSON, zstd)", record.type_name(), json.len());
        }
    }
    Ok(())
}

/// Read a record from `reader`, detecting the encoding.
pub fn read_record<R: Read>(mut reader: R) -> Result<Record, RecordError> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;

    let record: Record = if bytes.starts_with(&ZSTD_MAGIC) {
        let json = zstd::decode_all(&bytes[..])?;
        debug!("decompressed {} -> {} bytes", bytes.len(), json.len());
        serde_json::from_slice(&json)?
    } else {
        serde_json::from_slice(&bytes)?
    };
    Ok(record)
}

/// Write a cast to `path`.
pub fn save_cast(path: &Path, cast: &Cast, encoding: Encoding) -> Result<(), RecordError> {
    let writer = BufWriter::new(File::create(path)?);
    write_record(writer, &Record::from(cast), encoding)
}

/// Write a collection to `path`.
pub fn save_collection(
    path: &Path,
    collection: &CastCollection,
    encoding: Encoding,
) -> Result<(), RecordError> {
    let writer = BufWriter::new(File::create(path)?);
    write_record(writer, &Record::from(collection), encoding)
}

/// Read any record from `path`.
pub fn load(path: &Path) -> Result<Record, RecordError> {
    let record = read_record(BufReader::new(File::open(path)?))?;
    debug!("loaded {} record from {}", record.type_name(), path.display());
    Ok(record)
}

/// Read a cast from `path`.
pub fn load_cast(path: &Path) -> Result<Cast, RecordError> {
    load(path)?.into_cast()
}

/// Read a collection from `path`.
pub fn load_collection(path: &Path) -> Result<CastCollection, RecordError> {
    load(path)?.into_collection()
}
