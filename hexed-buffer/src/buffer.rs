//! The file-backed buffer.

use std::path::{Path, PathBuf};

use hexed_core::{Direction, Document, OperationLog};
use hexed_types::{DigestKind, Fingerprint};

use crate::error::{BufferError, Result};
use crate::store::{DiskStore, FileStore};

/// An editable byte buffer bound (optionally) to a file.
///
/// Edits go to the in-memory [`Document`]; the file is only touched by
/// [`open`](Buffer::open), [`save`](Buffer::save) and
/// [`has_changed_on_disk`](Buffer::has_changed_on_disk).
///
/// The fingerprint captured at open or save time is what external-change
/// detection compares against. It is never updated by edits.
#[derive(Debug)]
pub struct Buffer<S: FileStore = DiskStore> {
    doc: Document,
    store: S,
    path: Option<PathBuf>,
    is_new: bool,
    digest_kind: DigestKind,
    fingerprint: Option<Fingerprint>,
}

impl Buffer<DiskStore> {
    /// Create an empty, unbound buffer backed by the local filesystem.
    pub fn new() -> Self {
        Self::with_store(DiskStore)
    }

    /// Load `path` from the local filesystem.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        Self::open_with(DiskStore, path)
    }
}

impl Default for Buffer<DiskStore> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: FileStore> Buffer<S> {
    /// Create an empty, unbound buffer using `store` for file access.
    pub fn with_store(store: S) -> Self {
        Self {
            doc: Document::new(),
            store,
            path: None,
            is_new: true,
            digest_kind: DigestKind::default(),
            fingerprint: None,
        }
    }

    /// Load `path` through `store`.
    ///
    /// The buffer is bound to `path`, unmodified, with empty history.
    pub fn open_with(store: S, path: impl AsRef<Path>) -> Result<Self> {
        Self::with_store(store).load_file(path)
    }

    /// Use `kind` for fingerprints taken from now on.
    ///
    /// Chain before [`load_file`](Buffer::load_file) to fingerprint the
    /// opened file with `kind`. A fingerprint already captured keeps its own
    /// algorithm and stays the baseline until the next save.
    pub fn with_digest_kind(mut self, kind: DigestKind) -> Self {
        self.digest_kind = kind;
        self
    }

    /// Replace the content with the file at `path` and bind to it.
    ///
    /// History is dropped and the file's fingerprint becomes the baseline
    /// for [`has_changed_on_disk`](Buffer::has_changed_on_disk).
    pub fn load_file(mut self, path: impl AsRef<Path>) -> Result<Self> {
        self.load(path.as_ref())?;
        Ok(self)
    }

    fn load(&mut self, path: &Path) -> Result<()> {
        let bytes = self.store.read(path)?;
        let fingerprint = Fingerprint::compute(self.digest_kind, &bytes);
        tracing::debug!(
            "Opened {} ({} bytes, {})",
            path.display(),
            bytes.len(),
            fingerprint
        );

        self.doc.load(bytes);
        self.path = Some(path.to_path_buf());
        self.is_new = false;
        self.fingerprint = Some(fingerprint);
        Ok(())
    }

    // ---- content ----

    /// Number of bytes in the buffer.
    pub fn size(&self) -> usize {
        self.doc.size()
    }

    /// Byte at `offset`, or `None` past the end.
    pub fn get_byte(&self, offset: usize) -> Option<u8> {
        self.doc.get_byte(offset)
    }

    /// Up to `count` bytes starting at `offset`, clipped to the end.
    pub fn get_bytes(&self, offset: usize, count: usize) -> Vec<u8> {
        self.doc.get_bytes(offset, count)
    }

    /// The whole content.
    pub fn data(&self) -> &[u8] {
        self.doc.data()
    }

    /// Insert `data` at `offset`, clamped to the end.
    pub fn insert(&mut self, offset: usize, data: &[u8]) {
        tracing::trace!("insert {} bytes at {}", data.len(), offset);
        self.doc.insert(offset, data);
    }

    /// Delete up to `count` bytes at `offset`.
    pub fn delete(&mut self, offset: usize, count: usize) {
        tracing::trace!("delete {} bytes at {}", count, offset);
        self.doc.delete(offset, count);
    }

    /// Overwrite the byte at `offset`.
    pub fn replace(&mut self, offset: usize, byte: u8) {
        tracing::trace!("replace byte at {} with {:#04x}", offset, byte);
        self.doc.replace(offset, byte);
    }

    /// Overwrite bytes from `offset`, growing the buffer past the end.
    pub fn replace_bytes(&mut self, offset: usize, data: &[u8]) {
        tracing::trace!("replace {} bytes at {}", data.len(), offset);
        self.doc.replace_bytes(offset, data);
    }

    // ---- history ----

    /// Revert the newest edit.
    pub fn undo(&mut self) -> bool {
        let undone = self.doc.undo();
        tracing::trace!("undo: {}", undone);
        undone
    }

    /// Re-apply the newest undone edit.
    pub fn redo(&mut self) -> bool {
        let redone = self.doc.redo();
        tracing::trace!("redo: {}", redone);
        redone
    }

    /// Check if there is anything to undo.
    pub fn can_undo(&self) -> bool {
        self.doc.can_undo()
    }

    /// Check if there is anything to redo.
    pub fn can_redo(&self) -> bool {
        self.doc.can_redo()
    }

    /// Read access to the undo/redo stacks.
    pub fn history(&self) -> &OperationLog {
        self.doc.history()
    }

    // ---- status ----

    /// Whether the content changed since the last open or save.
    pub fn is_modified(&self) -> bool {
        self.doc.is_modified()
    }

    /// True until the buffer is opened from, saved to, or bound to a file.
    pub fn is_new(&self) -> bool {
        self.is_new
    }

    /// The bound file path.
    pub fn filename(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Bind the buffer to `path` without reading or writing it.
    ///
    /// The fingerprint from the last open or save is kept as the baseline,
    /// so rebinding to the same file reports no change. A buffer that was
    /// never opened or saved has no baseline, and any existing file at
    /// `path` then reports as changed.
    pub fn set_filename(&mut self, path: impl Into<PathBuf>) {
        self.path = Some(path.into());
        self.is_new = false;
    }

    /// Fingerprint captured at the last open or save.
    pub fn fingerprint(&self) -> Option<Fingerprint> {
        self.fingerprint
    }

    /// Digest algorithm used for fingerprints.
    pub fn digest_kind(&self) -> DigestKind {
        self.digest_kind
    }

    // ---- search ----

    /// Find `pattern` from `start` in `direction`.
    pub fn find(&self, pattern: &[u8], start: usize, direction: Direction) -> Option<usize> {
        self.doc.find(pattern, start, direction)
    }

    /// Count possibly overlapping occurrences of `pattern`.
    pub fn count_matches(&self, pattern: &[u8]) -> usize {
        self.doc.count_matches(pattern)
    }

    // ---- persistence ----

    /// Write the content to the bound file.
    ///
    /// On success the history is cleared, the buffer is clean and the
    /// fingerprint reflects the written bytes. On failure nothing changes.
    pub fn save(&mut self) -> Result<()> {
        let path = self.path.clone().ok_or(BufferError::NoPath)?;
        self.write_to(&path)
    }

    /// Bind the buffer to `path`, then [`save`](Buffer::save).
    ///
    /// The binding stays in place even if the write fails; content,
    /// history, and the modified flag do not change in that case.
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<()> {
        self.set_filename(path);
        self.save()
    }

    fn write_to(&mut self, path: &Path) -> Result<()> {
        self.store.write(path, self.doc.data())?;

        let fingerprint = Fingerprint::compute(self.digest_kind, self.doc.data());
        tracing::debug!(
            "Saved {} ({} bytes, {})",
            path.display(),
            self.doc.size(),
            fingerprint
        );

        self.fingerprint = Some(fingerprint);
        self.doc.mark_saved();
        self.is_new = false;
        Ok(())
    }

    /// Check whether the bound file differs from what was last opened or
    /// saved.
    ///
    /// Always `false` for a new or unbound buffer. This only reads the
    /// file; it never locks it or blocks a save.
    pub fn has_changed_on_disk(&self) -> Result<bool> {
        let path = match &self.path {
            Some(path) if !self.is_new => path,
            _ => return Ok(false),
        };

        let bytes = self.store.read(path)?;
        let kind = self.fingerprint.map_or(self.digest_kind, |f| f.kind());
        let current = Fingerprint::compute(kind, &bytes);
        let changed = self.fingerprint != Some(current);
        tracing::debug!(
            "Checked {} on disk: {} (changed: {})",
            path.display(),
            current,
            changed
        );
        Ok(changed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;

    fn open_mem(contents: &[u8]) -> (MemoryStore, Buffer<MemoryStore>) {
        let store = MemoryStore::new();
        store.put("file.bin", contents.to_vec());
        let buffer = Buffer::open_with(store.clone(), "file.bin").unwrap();
        (store, buffer)
    }

    #[test]
    fn new_buffer_state() {
        let buffer = Buffer::new();
        assert_eq!(buffer.size(), 0);
        assert!(buffer.is_new());
        assert!(!buffer.is_modified());
        assert!(buffer.filename().is_none());
        assert!(buffer.fingerprint().is_none());
        assert!(!buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn open_loads_clean() {
        let (_, buffer) = open_mem(b"Hello");
        assert_eq!(buffer.data(), b"Hello");
        assert!(!buffer.is_new());
        assert!(!buffer.is_modified());
        assert!(!buffer.can_undo());
        assert_eq!(buffer.filename(), Some(Path::new("file.bin")));
        assert_eq!(
            buffer.fingerprint(),
            Some(Fingerprint::compute(DigestKind::Sha256, b"Hello"))
        );
    }

    #[test]
    fn open_missing_file_is_io_error() {
        let err = Buffer::open_with(MemoryStore::new(), "missing.bin").unwrap_err();
        assert!(matches!(err, BufferError::Io(e) if e.kind() == std::io::ErrorKind::NotFound));
    }

    #[test]
    fn save_without_path_fails() {
        let mut buffer = Buffer::with_store(MemoryStore::new());
        buffer.insert(0, b"data");
        assert!(matches!(buffer.save(), Err(BufferError::NoPath)));
        assert!(buffer.is_modified());
        assert!(buffer.can_undo());
    }

    #[test]
    fn save_clears_history_and_modified() {
        let (store, mut buffer) = open_mem(b"abc");
        buffer.insert(3, b"def");
        buffer.replace(0, b'A');
        buffer.undo();
        assert!(buffer.can_redo());

        buffer.save().unwrap();
        assert!(!buffer.is_modified());
        assert!(!buffer.can_undo());
        assert!(!buffer.can_redo());
        assert_eq!(store.get(Path::new("file.bin")).unwrap(), b"abcdef");
    }

    #[test]
    fn external_write_detected() {
        let (store, buffer) = open_mem(b"original");
        assert!(!buffer.has_changed_on_disk().unwrap());

        store.put("file.bin", b"tampered".to_vec());
        assert!(buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn save_resets_change_detection() {
        let (store, mut buffer) = open_mem(b"original");
        store.put("file.bin", b"external".to_vec());
        assert!(buffer.has_changed_on_disk().unwrap());

        buffer.save().unwrap();
        assert!(!buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn in_memory_edits_do_not_count_as_disk_changes() {
        let (_, mut buffer) = open_mem(b"abc");
        buffer.delete(0, 3);
        assert!(!buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn deleted_file_is_io_error_on_check() {
        let (store, buffer) = open_mem(b"abc");
        store.remove(Path::new("file.bin"));
        assert!(matches!(buffer.has_changed_on_disk(), Err(BufferError::Io(_))));
    }

    #[test]
    fn save_as_binds_path() {
        let store = MemoryStore::new();
        let mut buffer = Buffer::with_store(store.clone());
        buffer.insert(0, &[0xDE, 0xAD]);

        buffer.save_as("out.bin").unwrap();
        assert!(!buffer.is_new());
        assert!(!buffer.is_modified());
        assert_eq!(buffer.filename(), Some(Path::new("out.bin")));
        assert_eq!(store.get(Path::new("out.bin")).unwrap(), vec![0xDE, 0xAD]);
        assert!(!buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn failed_save_keeps_content_and_history() {
        let dir = tempfile::tempdir().unwrap();
        let mut buffer = Buffer::new();
        buffer.insert(0, b"xyz");

        let bad = dir.path().join("no-such-dir").join("out.bin");
        assert!(matches!(buffer.save_as(&bad), Err(BufferError::Io(_))));
        assert!(buffer.is_modified());
        assert!(buffer.can_undo());
        assert!(buffer.fingerprint().is_none());
        assert_eq!(buffer.data(), b"xyz");

        // The path was bound before the write was attempted.
        assert_eq!(buffer.filename(), Some(bad.as_path()));
        assert!(!buffer.is_new());
    }

    #[test]
    fn set_filename_clears_is_new() {
        let store = MemoryStore::new();
        let mut buffer = Buffer::with_store(store.clone());
        buffer.set_filename("bound.bin");
        assert!(!buffer.is_new());
        assert_eq!(buffer.filename(), Some(Path::new("bound.bin")));

        // Never opened or saved, so there is no baseline to match.
        store.put("bound.bin", b"anything".to_vec());
        assert!(buffer.has_changed_on_disk().unwrap());

        buffer.save().unwrap();
        assert!(!buffer.has_changed_on_disk().unwrap());
        assert_eq!(store.get(Path::new("bound.bin")).unwrap(), b"");
    }

    #[test]
    fn set_filename_to_same_path_keeps_baseline() {
        let (store, mut buffer) = open_mem(b"abc");
        let baseline = buffer.fingerprint();

        buffer.set_filename("file.bin");
        assert_eq!(buffer.fingerprint(), baseline);
        assert!(!buffer.has_changed_on_disk().unwrap());

        store.put("file.bin", b"abd".to_vec());
        assert!(buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn set_filename_compares_other_file_against_baseline() {
        let (store, mut buffer) = open_mem(b"abc");
        store.put("copy.bin", b"abc".to_vec());
        store.put("other.bin", b"xyz".to_vec());

        buffer.set_filename("copy.bin");
        assert!(!buffer.has_changed_on_disk().unwrap());

        buffer.set_filename("other.bin");
        assert!(buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn blake3_fingerprints() {
        let store = MemoryStore::new();
        store.put("file.bin", b"data".to_vec());
        let buffer = Buffer::with_store(store.clone())
            .with_digest_kind(DigestKind::Blake3)
            .load_file("file.bin")
            .unwrap();
        assert_eq!(buffer.digest_kind(), DigestKind::Blake3);
        assert_eq!(
            buffer.fingerprint(),
            Some(Fingerprint::compute(DigestKind::Blake3, b"data"))
        );
        assert!(!buffer.has_changed_on_disk().unwrap());

        store.put("file.bin", b"date".to_vec());
        assert!(buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn digest_switch_after_open_keeps_baseline() {
        let (store, buffer) = open_mem(b"abc");
        store.put("file.bin", b"tampered".to_vec());

        let mut buffer = buffer.with_digest_kind(DigestKind::Blake3);
        assert_eq!(buffer.data(), b"abc");
        assert_eq!(
            buffer.fingerprint(),
            Some(Fingerprint::compute(DigestKind::Sha256, b"abc"))
        );
        assert!(buffer.has_changed_on_disk().unwrap());

        // The next save adopts the new algorithm.
        buffer.save().unwrap();
        assert_eq!(
            buffer.fingerprint(),
            Some(Fingerprint::compute(DigestKind::Blake3, b"abc"))
        );
        assert!(!buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn disk_roundtrip_is_byte_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.bin");
        let bytes: Vec<u8> = (0..=255).collect();
        std::fs::write(&path, &bytes).unwrap();

        let mut buffer = Buffer::open(&path).unwrap();
        buffer.replace_bytes(254, &[0x00, 0x01, 0x02]);
        buffer.save().unwrap();

        let mut expected = bytes[..254].to_vec();
        expected.extend_from_slice(&[0x00, 0x01, 0x02]);
        assert_eq!(std::fs::read(&path).unwrap(), expected);

        let reopened = Buffer::open(&path).unwrap();
        assert_eq!(reopened.data(), expected.as_slice());
        assert_eq!(reopened.fingerprint(), buffer.fingerprint());
    }

    #[test]
    fn disk_external_modification() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watched.bin");
        std::fs::write(&path, b"one").unwrap();

        let buffer = Buffer::open(&path).unwrap();
        assert!(!buffer.has_changed_on_disk().unwrap());

        std::fs::write(&path, b"two").unwrap();
        assert!(buffer.has_changed_on_disk().unwrap());
    }

    #[test]
    fn search_through_buffer() {
        let (_, buffer) = open_mem(b"Hello, World!");
        assert_eq!(buffer.find(b"World", 0, Direction::Forward), Some(7));
        assert_eq!(buffer.find(b"xyz", 0, Direction::Forward), None);
        assert_eq!(buffer.count_matches(b"o"), 2);
    }
}
