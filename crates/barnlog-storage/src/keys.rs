//! Photo identifiers.

use std::fmt;

use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::traits::{StorageError, StorageResult};

const PHOTO_ID_BYTES: usize = 16;

/// Backend-generated photo identifier: 128 random bits as 32 lowercase hex characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoId(String);

impl PhotoId {
    /// Draw a fresh identifier from the operating system's entropy source.
    pub fn generate() -> StorageResult<Self> {
        let mut bytes = [0u8; PHOTO_ID_BYTES];
        OsRng
            .try_fill_bytes(&mut bytes)
            .map_err(|e| StorageError::RandomSource(e.to_string()))?;
        Ok(PhotoId(hex::encode(bytes)))
    }

    /// Accept an existing identifier only if it has the generated shape.
    pub fn parse(value: &str) -> Option<Self> {
        let well_formed = value.len() == PHOTO_ID_BYTES * 2
            && value
                .bytes()
                .all(|b| b.is_ascii_digit() || (b'a'..=b'f').contains(&b));
        well_formed.then(|| PhotoId(value.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for PhotoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_id_shape() {
        let id = PhotoId::generate().unwrap();
        assert_eq!(id.as_str().len(), 32);
        assert!(PhotoId::parse(id.as_str()).is_some());
    }

    #[test]
    fn test_generated_ids_are_distinct() {
        let ids: HashSet<String> = (0..64)
            .map(|_| PhotoId::generate().unwrap().into_string())
            .collect();
        assert_eq!(ids.len(), 64);
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(PhotoId::parse("").is_none());
        assert!(PhotoId::parse("0123456789ABCDEF0123456789abcdef").is_none());
        assert!(PhotoId::parse("0123456789abcdef0123456789abcde").is_none());
        assert!(PhotoId::parse("../3456789abcdef0123456789abcdef").is_none());
        assert!(PhotoId::parse("0123456789abcdef0123456789abcdef").is_some());
    }
}
