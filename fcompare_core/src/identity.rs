use fcompare_common::FcompareError;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

const CHUNK_SIZE: usize = 64 * 1024;

/// Check that `path` exists and is a regular file (or a link to one).
pub fn ensure_file(path: &Path) -> Result<(), FcompareError> {
    if !path.exists() {
        return Err(FcompareError::NotFound(path.to_path_buf()));
    }
    if !path.is_file() {
        return Err(FcompareError::NotAFile(path.to_path_buf()));
    }
    Ok(())
}

/// Byte-for-byte equality of two files.
///
/// Never trusts metadata for a positive answer; a length mismatch is only
/// used to answer "different" early.
pub fn files_identical(left_path: &Path, right_path: &Path) -> Result<bool, FcompareError> {
    let left_file = File::open(left_path)?;
    let right_file = File::open(right_path)?;

    if left_file.metadata()?.len() != right_file.metadata()?.len() {
        return Ok(false);
    }

    let mut left = BufReader::new(left_file);
    let mut right = BufReader::new(right_file);
    let mut left_buf = vec![0u8; CHUNK_SIZE];
    let mut right_buf = vec![0u8; CHUNK_SIZE];

    loop {
        let left_read = fill(&mut left, &mut left_buf)?;
        let right_read = fill(&mut right, &mut right_buf)?;

        if left_read != right_read || left_buf[..left_read] != right_buf[..right_read] {
            return Ok(false);
        }

        if left_read < CHUNK_SIZE {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or EOF; short reads from the OS are retried.
fn fill(reader: &mut impl Read, buf: &mut [u8]) -> std::io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == std::io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}
