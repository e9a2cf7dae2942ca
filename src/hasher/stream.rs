use super::ChecksumAlgorithm;
use std::fs::File;
use std::io::{self, ErrorKind, Read};
use std::path::Path;

pub const DEFAULT_READ_BUFFER_SIZE: usize = 64 * 1024; // 64KB

/// Hash a file's full content without loading it into memory.
pub fn hash_file(path: &Path, algorithm: ChecksumAlgorithm, buffer_size: usize) -> io::Result<String> {
    let file = File::open(path)?;
    hash_reader(file, algorithm, buffer_size)
}

pub fn hash_reader<R: Read>(
    mut reader: R,
    algorithm: ChecksumAlgorithm,
    buffer_size: usize,
) -> io::Result<String> {
    let mut hasher = algorithm.hasher();
    let mut buffer = vec![0; buffer_size.max(1)];

    loop {
        let bytes_read = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(e) if e.kind() == ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        };
        hasher.update(&buffer[..bytes_read]);
    }

    Ok(hasher.finalize_hex())
}
