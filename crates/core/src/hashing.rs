//! Incremental SHA-256 digest over the files of a dataset.

use sha2::{Digest, Sha256};

/// Accumulates a content hash over named chunks.
///
/// Each chunk contributes its name, a NUL separator, its length and its
/// bytes, so renaming a file or moving bytes between files changes the
/// digest.
#[derive(Default)]
pub struct ContentHasher {
    inner: Sha256,
}

impl ContentHasher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one named chunk into the digest.
    pub fn update(&mut self, name: &str, data: &[u8]) {
        self.inner.update(name.as_bytes());
        self.inner.update([0u8]);
        self.inner.update((data.len() as u64).to_le_bytes());
        self.inner.update(data);
    }

    /// Finish and return the lowercase hex digest.
    pub fn finish_hex(self) -> String {
        let hash = self.inner.finalize();
        format!("{hash:x}")
    }
}
