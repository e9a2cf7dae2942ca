use super::ContentHasher;
use sha2::Digest;
use std::hash::Hasher as _;
use twox_hash::XxHash64;

/// Any RustCrypto digest (MD5, SHA-1, SHA-256).
#[derive(Default)]
pub struct DigestHasher<D: Digest> {
    inner: D,
}

impl<D: Digest> ContentHasher for DigestHasher<D> {
    fn update(&mut self, data: &[u8]) {
        Digest::update(&mut self.inner, data);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        hex::encode(self.inner.finalize())
    }
}

pub struct Adler32Hasher {
    inner: adler::Adler32,
}

impl Default for Adler32Hasher {
    fn default() -> Self {
        Self {
            inner: adler::Adler32::new(),
        }
    }
}

impl ContentHasher for Adler32Hasher {
    fn update(&mut self, data: &[u8]) {
        self.inner.write_slice(data);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        format!("{:08x}", self.inner.checksum())
    }
}

#[derive(Default)]
pub struct Crc32Hasher {
    inner: crc32fast::Hasher,
}

impl ContentHasher for Crc32Hasher {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        format!("{:08x}", self.inner.finalize())
    }
}

pub struct XxHash64Hasher {
    inner: XxHash64,
}

impl Default for XxHash64Hasher {
    fn default() -> Self {
        Self {
            inner: XxHash64::with_seed(0),
        }
    }
}

impl ContentHasher for XxHash64Hasher {
    fn update(&mut self, data: &[u8]) {
        self.inner.write(data);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        format!("{:016x}", self.inner.finish())
    }
}

#[derive(Default)]
pub struct Blake3Hasher {
    inner: blake3::Hasher,
}

impl ContentHasher for Blake3Hasher {
    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize_hex(self: Box<Self>) -> String {
        self.inner.finalize().to_hex().to_string()
    }
}
