//! Backward scan for the final delimited segment of a seekable source
//!
//! Used to read the last grid record without streaming through the whole file.
//! The scan starts just before the trailing delimiter and walks toward the
//! start of the source one block at a time:
//! - `step == sep.len()` treats the data as fixed-width code units (UTF-16/32)
//! - `step == 1` allows multi-character delimiters at any byte offset

use std::io::{Read, Seek, SeekFrom};

use crate::error::{GridError, Result};

/// Outcome of a backward scan
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LastSegment {
    /// Bytes following the last delimiter (excluding a single trailing one)
    AfterDelimiter(Vec<u8>),
    /// No delimiter was found before reaching the start, so the whole source
    WholeSource(Vec<u8>),
}

impl LastSegment {
    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            LastSegment::AfterDelimiter(bytes) | LastSegment::WholeSource(bytes) => bytes,
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        match self {
            LastSegment::AfterDelimiter(bytes) | LastSegment::WholeSource(bytes) => bytes,
        }
    }
}

/// Read the last `sep`-delimited segment of `source`.
///
/// # Arguments
/// * `source` - Any readable, seekable byte source
/// * `sep` - Record delimiter; must match the encoding's terminator exactly
/// * `step` - How far to move back after a failed match
///
/// # Returns
/// * `LastSegment::AfterDelimiter` when a delimiter was found
/// * `LastSegment::WholeSource` when the scan reached the start of the source
pub fn read_last_segment<R: Read + Seek>(
    source: &mut R,
    sep: &[u8],
    step: usize,
) -> Result<LastSegment> {
    if sep.is_empty() {
        return Err(GridError::EmptySeparator);
    }
    let width = sep.len() as i64;
    let step = step.max(1) as i64;

    let len = source.seek(SeekFrom::End(0))? as i64;
    let mut pos = len - width - step;
    let mut block = Vec::with_capacity(sep.len());

    while pos >= 0 {
        source.seek(SeekFrom::Start(pos as u64))?;
        block.clear();
        source.by_ref().take(width as u64).read_to_end(&mut block)?;

        if block == sep {
            let mut rest = Vec::new();
            source.read_to_end(&mut rest)?;
            return Ok(LastSegment::AfterDelimiter(rest));
        }
        pos -= step;
    }

    source.seek(SeekFrom::Start(0))?;
    let mut all = Vec::new();
    source.read_to_end(&mut all)?;
    Ok(LastSegment::WholeSource(all))
}
