//! Write-ahead journal
//!
//! A single append-only file, `journal.wal`, inside the data directory.
//! Every applied write is appended here before it touches the in-memory
//! stores; reopening the directory replays the file in order.
//!
//! # Recovery
//!
//! Frames are read until end of file. A torn or checksum-failing frame at
//! the very end is what an interrupted append leaves behind: it is dropped
//! and the file truncated to the last good frame. A bad frame followed by
//! more data is corruption and fails the open. A short frame only counts as
//! torn when no intact frame starts anywhere after it.
//!
//! # Failed appends
//!
//! An append that fails to write or to sync is cut back out of the file
//! before the error is returned, so replay never applies a write whose
//! caller saw an error. If the cut itself fails the journal is poisoned and
//! refuses every later append.
//!
//! TODO: compact by rewriting the file from the live stores once the
//! archive dominates the journal size.

pub mod durability;
pub mod entry;

pub use durability::DurabilityMode;
pub use entry::{JournalEntry, JOURNAL_VERSION};

use crate::format::{
    decode_frame, decode_header, encode_frame, encode_header, Decoded, FrameError,
    JOURNAL_HEADER_SIZE,
};
use contrail_core::{Error, Result};
use parking_lot::Mutex;
use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, error, warn};

/// File name of the journal inside a data directory
pub const JOURNAL_FILE: &str = "journal.wal";

/// What was read back when the journal was opened
#[derive(Debug, Default)]
pub struct Recovered {
    /// Entries in append order, checkpoints included
    pub entries: Vec<JournalEntry>,
    /// The last entry was a shutdown checkpoint
    pub clean_shutdown: bool,
    /// Bytes dropped from a torn tail
    pub truncated_bytes: u64,
}

/// File operations the append path relies on
trait JournalIo {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()>;
    fn sync(&mut self) -> io::Result<()>;
    /// Cut the file to `len` and position the cursor there
    fn truncate(&mut self, len: u64) -> io::Result<()>;
}

impl JournalIo for File {
    fn write_frame(&mut self, frame: &[u8]) -> io::Result<()> {
        self.write_all(frame)
    }

    fn sync(&mut self) -> io::Result<()> {
        self.sync_data()
    }

    fn truncate(&mut self, len: u64) -> io::Result<()> {
        self.set_len(len)?;
        self.seek(SeekFrom::Start(len))?;
        Ok(())
    }
}

struct JournalFile<F = File> {
    file: F,
    /// Length of the valid prefix; appends go here
    len: u64,
    /// Appends since the last fsync
    pending: usize,
    /// A failed append could not be cut back out of the file
    poisoned: bool,
}

impl<F: JournalIo> JournalFile<F> {
    fn new(file: F, len: u64) -> Self {
        Self {
            file,
            len,
            pending: 0,
            poisoned: false,
        }
    }

    /// Write one frame at the end of the valid prefix
    ///
    /// On failure the frame is removed again; `len` only moves on success.
    fn append_frame(&mut self, frame: &[u8], mode: DurabilityMode) -> Result<()> {
        if self.poisoned {
            return Err(Error::Storage(
                "journal is poisoned by an earlier failed append".into(),
            ));
        }

        let sync = mode.should_sync(self.pending + 1);
        let written =
            self.file.write_frame(frame).and_then(
                |()| {
                    if sync {
                        self.file.sync()
                    } else {
                        Ok(())
                    }
                },
            );

        if let Err(e) = written {
            return Err(self.roll_back(e));
        }
        self.len += frame.len() as u64;
        self.pending = if sync { 0 } else { self.pending + 1 };
        Ok(())
    }

    fn roll_back(&mut self, cause: io::Error) -> Error {
        let len = self.len;
        match self.file.truncate(len).and_then(|()| self.file.sync()) {
            Ok(()) => {
                self.pending = 0;
                warn!(target: "contrail::journal", error = %cause, "journal append rolled back");
                Error::Storage(format!("journal append failed: {}", cause))
            }
            Err(rollback) => {
                self.poisoned = true;
                error!(
                    target: "contrail::journal",
                    error = %cause,
                    rollback = %rollback,
                    "journal rollback failed; refusing further appends"
                );
                Error::Storage(format!(
                    "journal append failed: {}; rollback failed: {}",
                    cause, rollback
                ))
            }
        }
    }
}

/// Append handle on a journal file
///
/// Appends are serialized by an internal mutex.
pub struct Journal {
    path: PathBuf,
    mode: DurabilityMode,
    inner: Mutex<JournalFile>,
    appended: AtomicU64,
}

impl Journal {
    /// Open or create the journal in `dir`, returning its recovered entries
    pub fn open(dir: impl AsRef<Path>, mode: DurabilityMode) -> Result<(Self, Recovered)> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let path = dir.join(JOURNAL_FILE);

        let mut file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;

        let header = encode_header();
        let mut recovered = Recovered::default();
        let len = if bytes.len() < JOURNAL_HEADER_SIZE && header.starts_with(&bytes) {
            // New file, or a crash while the header was being written.
            file.set_len(0)?;
            file.seek(SeekFrom::Start(0))?;
            file.write_all(&header)?;
            file.sync_all()?;
            JOURNAL_HEADER_SIZE as u64
        } else {
            let (entries, valid) = scan(&bytes)?;
            if valid < bytes.len() {
                recovered.truncated_bytes = (bytes.len() - valid) as u64;
                warn!(
                    target: "contrail::journal",
                    path = %path.display(),
                    dropped = recovered.truncated_bytes,
                    "truncating torn journal tail"
                );
                file.set_len(valid as u64)?;
                file.sync_all()?;
            }
            recovered.clean_shutdown = entries.last().map_or(false, JournalEntry::is_checkpoint);
            recovered.entries = entries;
            valid as u64
        };
        file.seek(SeekFrom::Start(len))?;

        debug!(
            target: "contrail::journal",
            path = %path.display(),
            entries = recovered.entries.len(),
            mode = mode.description(),
            "journal opened"
        );

        let journal = Self {
            path,
            mode,
            inner: Mutex::new(JournalFile::new(file, len)),
            appended: AtomicU64::new(0),
        };
        Ok((journal, recovered))
    }

    /// Append one entry, syncing as the durability mode requires
    ///
    /// On failure the file is cut back to its previous length, so neither a
    /// partial frame nor an unsynced one outlives the error.
    pub fn append(&self, entry: &JournalEntry) -> Result<()> {
        let frame = encode_frame(entry).map_err(|e| Error::Storage(e.to_string()))?;
        self.inner.lock().append_frame(&frame, self.mode)?;
        self.appended.fetch_add(1, Ordering::Relaxed);
        Ok(())
    }

    /// Whether a failed rollback has disabled appends
    pub fn is_poisoned(&self) -> bool {
        self.inner.lock().poisoned
    }

    /// fsync everything appended so far
    pub fn flush(&self) -> Result<()> {
        let mut inner = self.inner.lock();
        if inner.pending > 0 {
            inner.file.sync_data()?;
            inner.pending = 0;
        }
        Ok(())
    }

    /// Path of the journal file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Durability mode in effect
    pub fn mode(&self) -> DurabilityMode {
        self.mode
    }

    /// Entries appended through this handle
    pub fn appended(&self) -> u64 {
        self.appended.load(Ordering::Relaxed)
    }

    /// Current file size in bytes
    pub fn size(&self) -> u64 {
        self.inner.lock().len
    }
}

impl std::fmt::Debug for Journal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Journal")
            .field("path", &self.path)
            .field("mode", &self.mode)
            .finish()
    }
}

/// Decode every frame; returns the entries and the length of the valid prefix
fn scan(bytes: &[u8]) -> Result<(Vec<JournalEntry>, usize)> {
    decode_header(bytes).map_err(|e| Error::Corruption(e.to_string()))?;

    let mut entries = Vec::new();
    let mut offset = JOURNAL_HEADER_SIZE;
    while offset < bytes.len() {
        match decode_frame(&bytes[offset..]) {
            Ok(Decoded::Entry { entry, len }) => {
                entries.push(entry);
                offset += len;
            }
            Ok(Decoded::Incomplete) => {
                if let Some(next) = next_intact_frame(bytes, offset + 1) {
                    return Err(Error::Corruption(format!(
                        "journal frame at offset {} overruns intact frame at offset {}",
                        offset, next
                    )));
                }
                break;
            }
            Err(FrameError::Checksum { frame_len, .. }) if offset + frame_len == bytes.len() => {
                break
            }
            Err(e) => {
                return Err(Error::Corruption(format!(
                    "journal frame at offset {}: {}",
                    offset, e
                )))
            }
        }
    }
    Ok((entries, offset))
}

/// Offset of the first frame at or after `from` that decodes cleanly
fn next_intact_frame(bytes: &[u8], from: usize) -> Option<usize> {
    (from..bytes.len()).find(|&at| matches!(decode_frame(&bytes[at..]), Ok(Decoded::Entry { .. })))
}
