//! Codec for the `genres` column.
//!
//! Venues and artists persist their genre tags as a JSON array in a plain
//! text column. Every write goes through [`encode`] and every read through
//! [`decode`], so the on-disk shape lives in one place.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GenresError {
    #[error("malformed genres column: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Serialize genre tags, keeping their order.
pub fn encode(genres: &[String]) -> String {
    // A slice of strings always serializes.
    serde_json::to_string(genres).unwrap_or_else(|_| "[]".to_string())
}

/// Deserialize a stored genres column. An empty column reads as no genres.
pub fn decode(raw: &str) -> Result<Vec<String>, GenresError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }
    Ok(serde_json::from_str(raw)?)
}
