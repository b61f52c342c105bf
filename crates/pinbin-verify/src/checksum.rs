use std::fmt;

use crate::{Result, VerificationError};

/// Checksum match rule: `actual` equals `expected`, or begins with it.
///
/// An empty `expected` never matches.
pub fn matches(actual: &str, expected: &str) -> bool {
    if expected.is_empty() {
        return false;
    }
    actual == expected || actual.starts_with(expected)
}

/// A checksum as text, normally lowercase hex.
///
/// Also used for untrusted text that claims to be a checksum, such as the
/// content of a marker file.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Checksum(String);

impl Checksum {
    pub fn new(value: impl Into<String>) -> Self { Self(value.into()) }

    pub fn from_digest(digest: &[u8]) -> Self { Self(hex::encode(digest)) }

    pub fn as_str(&self) -> &str { &self.0 }

    pub fn into_string(self) -> String { self.0 }

    pub fn matches(&self, expected: &str) -> bool { matches(&self.0, expected) }

    pub fn verify(&self, expected: &str) -> Result<()> {
        if self.matches(expected) {
            Ok(())
        } else {
            Err(VerificationError::Mismatch {
                expected: expected.to_string(),
                actual:   self.0.clone(),
            })
        }
    }
}

impl fmt::Display for Checksum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl From<String> for Checksum {
    fn from(value: String) -> Self { Self(value) }
}

impl AsRef<str> for Checksum {
    fn as_ref(&self) -> &str { &self.0 }
}
