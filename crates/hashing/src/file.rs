//! Streaming file hashes

use crate::data::{HashOptions, ENVELOPE_PREFIX};
use hashtegrity_core::{Error, Result, FILE_READ_CHUNK_SIZE};
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Hash a file's contents and return lowercase hex
///
/// The result equals `generate_hash(&Value::bytes(contents), options)`; the
/// file is streamed in chunks and hex-encoded on the fly instead of being
/// loaded whole.
pub fn generate_file_hash(file_path: &Path, options: &HashOptions) -> Result<String> {
    let metadata = match file_path.metadata() {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(Error::file_not_found(file_path));
        }
        Err(e) => return Err(Error::file_system(file_path, "stat file for hashing", e)),
    };

    if !metadata.is_file() {
        return Err(Error::file_not_found(file_path));
    }

    let file = File::open(file_path)
        .map_err(|e| Error::file_system(file_path, "open file for hashing", e))?;

    let mut reader = BufReader::with_capacity(FILE_READ_CHUNK_SIZE, file);
    let mut hasher = options.hasher()?;
    let mut buffer = [0u8; FILE_READ_CHUNK_SIZE];
    let mut total = 0usize;

    hasher.update(ENVELOPE_PREFIX);

    // Stream the file in chunks
    loop {
        let bytes_read = reader
            .read(&mut buffer)
            .map_err(|e| Error::file_system(file_path, "read file chunk for hashing", e))?;

        if bytes_read == 0 {
            break;
        }

        hasher.update(hex::encode(&buffer[..bytes_read]));
        total += bytes_read;
    }

    hasher.update(options.envelope_suffix());

    tracing::trace!(path = %file_path.display(), bytes = total, "hashed file");

    Ok(hasher.finalize_hex())
}
