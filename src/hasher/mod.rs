//! Checksum registry.
//!
//! A run selects exactly one [`ChecksumAlgorithm`]; every file in both trees
//! is hashed with a fresh [`ContentHasher`] obtained from it.

pub mod algorithms;
pub mod stream;

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

pub use stream::{hash_file, hash_reader, DEFAULT_READ_BUFFER_SIZE};

/// Streaming accumulator for one file's content.
pub trait ContentHasher {
    fn update(&mut self, data: &[u8]);

    /// Consume the accumulator and return the lowercase hex digest.
    fn finalize_hex(self: Box<Self>) -> String;
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ChecksumAlgorithm {
    #[default]
    Md5,
    Sha1,
    Sha256,
    Adler32,
    Crc32,
    XxHash64,
    Blake3,
}

impl ChecksumAlgorithm {
    pub const ALL: [ChecksumAlgorithm; 7] = [
        ChecksumAlgorithm::Md5,
        ChecksumAlgorithm::Sha1,
        ChecksumAlgorithm::Sha256,
        ChecksumAlgorithm::Adler32,
        ChecksumAlgorithm::Crc32,
        ChecksumAlgorithm::XxHash64,
        ChecksumAlgorithm::Blake3,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ChecksumAlgorithm::Md5 => "md5",
            ChecksumAlgorithm::Sha1 => "sha1",
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Adler32 => "adler32",
            ChecksumAlgorithm::Crc32 => "crc32",
            ChecksumAlgorithm::XxHash64 => "xxhash64",
            ChecksumAlgorithm::Blake3 => "blake3",
        }
    }

    pub fn is_cryptographic(self) -> bool {
        matches!(
            self,
            ChecksumAlgorithm::Md5
                | ChecksumAlgorithm::Sha1
                | ChecksumAlgorithm::Sha256
                | ChecksumAlgorithm::Blake3
        )
    }

    /// A fresh accumulator for this algorithm.
    pub fn hasher(self) -> Box<dyn ContentHasher> {
        match self {
            ChecksumAlgorithm::Md5 => Box::new(algorithms::DigestHasher::<md5::Md5>::default()),
            ChecksumAlgorithm::Sha1 => Box::new(algorithms::DigestHasher::<sha1::Sha1>::default()),
            ChecksumAlgorithm::Sha256 => {
                Box::new(algorithms::DigestHasher::<sha2::Sha256>::default())
            }
            ChecksumAlgorithm::Adler32 => Box::new(algorithms::Adler32Hasher::default()),
            ChecksumAlgorithm::Crc32 => Box::new(algorithms::Crc32Hasher::default()),
            ChecksumAlgorithm::XxHash64 => Box::new(algorithms::XxHash64Hasher::default()),
            ChecksumAlgorithm::Blake3 => Box::new(algorithms::Blake3Hasher::default()),
        }
    }

    /// Hash an in-memory buffer in one call.
    pub fn digest(self, data: &[u8]) -> String {
        let mut hasher = self.hasher();
        hasher.update(data);
        hasher.finalize_hex()
    }
}

impl fmt::Display for ChecksumAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name().to_uppercase())
    }
}

impl FromStr for ChecksumAlgorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "md5" => Ok(ChecksumAlgorithm::Md5),
            "sha1" => Ok(ChecksumAlgorithm::Sha1),
            "sha256" | "sha2" => Ok(ChecksumAlgorithm::Sha256),
            "adler32" | "adler" => Ok(ChecksumAlgorithm::Adler32),
            "crc32" | "crc" => Ok(ChecksumAlgorithm::Crc32),
            "xxhash64" | "xxhash" | "xxh64" => Ok(ChecksumAlgorithm::XxHash64),
            "blake3" => Ok(ChecksumAlgorithm::Blake3),
            _ => Err(Error::UnknownChecksum(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_md5() {
        assert_eq!(ChecksumAlgorithm::default(), ChecksumAlgorithm::Md5);
        assert!(ChecksumAlgorithm::default().is_cryptographic());
    }

    #[test]
    fn test_known_vectors() {
        let data = b"abc";
        assert_eq!(
            ChecksumAlgorithm::Md5.digest(data),
            "900150983cd24fb0d6963f7d28e17f72"
        );
        assert_eq!(
            ChecksumAlgorithm::Sha1.digest(data),
            "a9993e364706816aba3e25717850c26c9cd0d89d"
        );
        assert_eq!(
            ChecksumAlgorithm::Sha256.digest(data),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
        assert_eq!(ChecksumAlgorithm::Crc32.digest(data), "352441c2");
        assert_eq!(ChecksumAlgorithm::Adler32.digest(data), "024d0127");
    }

    #[test]
    fn test_blake3_matches_library() {
        let data = b"some file content";
        assert_eq!(
            ChecksumAlgorithm::Blake3.digest(data),
            blake3::hash(data).to_hex().to_string()
        );
    }

    #[test]
    fn test_short_checksums_are_zero_padded() {
        // adler32 of empty input is 1
        assert_eq!(ChecksumAlgorithm::Adler32.digest(b""), "00000001");
        assert_eq!(ChecksumAlgorithm::Crc32.digest(b""), "00000000");
        assert_eq!(ChecksumAlgorithm::XxHash64.digest(b"").len(), 16);
    }

    #[test]
    fn test_incremental_updates_match_single_update() {
        for algorithm in ChecksumAlgorithm::ALL {
            let mut hasher = algorithm.hasher();
            hasher.update(b"hello ");
            hasher.update(b"world");
            assert_eq!(
                hasher.finalize_hex(),
                algorithm.digest(b"hello world"),
                "{} differs when fed incrementally",
                algorithm
            );
        }
    }

    #[test]
    fn test_from_str_names_and_aliases() {
        for algorithm in ChecksumAlgorithm::ALL {
            assert_eq!(algorithm.name().parse::<ChecksumAlgorithm>().unwrap(), algorithm);
        }
        assert_eq!("SHA2".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Sha256);
        assert_eq!("crc".parse::<ChecksumAlgorithm>().unwrap(), ChecksumAlgorithm::Crc32);
    }

    #[test]
    fn test_from_str_unknown() {
        let err = "whirlpool".parse::<ChecksumAlgorithm>().unwrap_err();
        assert!(matches!(err, Error::UnknownChecksum(name) if name == "whirlpool"));
    }
}
