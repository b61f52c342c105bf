//! Checksum primitives for pinned artifacts.
//!
//! Files are hashed as they stream through a [`VerifiedReader`], so large
//! archives are never read into memory. Digests are carried around as
//! lowercase hex in a [`Checksum`].
//!
//! # Match rule
//!
//! A checksum satisfies an expected value when it equals it, or when it
//! starts with it. The second form tolerates tools that append trailing
//! metadata (such as `  apollo.tar.gz`) after the digest while still
//! requiring the full expected digest verbatim at the start.
//!
//! # Example
//!
//! ```
//! use pinbin_verify::{Checksum, Sha256Hasher};
//!
//! let checksum = Checksum::from_digest(&Sha256Hasher::digest(b"hello world"));
//! let expected = "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9";
//!
//! assert!(checksum.matches(expected));
//! assert!(Checksum::new(format!("{expected}  hello.txt")).matches(expected));
//! assert!(!Checksum::new(&expected[..32]).matches(expected));
//! ```

pub use self::checksum::{Checksum, matches};
pub use self::checksummer::{Checksummer, Sha256Checksummer};
pub use self::error::{Result, VerificationError};
pub use self::hasher::{Hasher, Sha256Hasher};
pub use self::reader::VerifiedReader;

mod checksum;
mod checksummer;
mod error;
mod hasher;
mod reader;
