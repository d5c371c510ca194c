use serde::Serialize;

use crate::error::{GridError, Result};

/// One line of the input grid: `<lat> <lon> <elev>`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GridRecord {
    /// Degrees
    pub latitude: f64,
    /// Degrees
    pub longitude: f64,
    /// Meters relative to current sea level
    pub elevation: f64,
}

impl GridRecord {
    /// Parse a whitespace-separated record.
    ///
    /// # Arguments
    /// * `text` - Line contents, trailing newline allowed
    /// * `line` - 1-based line number, used for error reporting
    pub fn parse(text: &str, line: usize) -> Result<Self> {
        let mut fields = text.split_whitespace();
        let mut values = [0.0f64; 3];

        for (i, value) in values.iter_mut().enumerate() {
            let field = fields.next().ok_or_else(|| GridError::MalformedRecord {
                line,
                reason: format!("expected 3 fields, found {}", i),
            })?;
            *value = field.parse().map_err(|_| GridError::MalformedRecord {
                line,
                reason: format!("field {} is not a number: {:?}", i + 1, field),
            })?;
        }

        if fields.next().is_some() {
            return Err(GridError::MalformedRecord {
                line,
                reason: format!("expected 3 fields, found {}", 3 + 1 + fields.count()),
            });
        }

        let [latitude, longitude, elevation] = values;
        Ok(Self {
            latitude,
            longitude,
            elevation,
        })
    }

    /// Parse a raw line read from disk; invalid UTF-8 is a malformed record.
    pub fn parse_bytes(bytes: &[u8], line: usize) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| GridError::MalformedRecord {
            line,
            reason: format!("not valid UTF-8: {}", e),
        })?;
        Self::parse(text, line)
    }
}
