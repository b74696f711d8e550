//! Journal file layout
//!
//! ```text
//! file   := header frame*
//! header := magic[8] = "CTRLJRNL" | version: u32 LE
//! frame  := len: u32 LE | crc32(payload): u32 LE | payload[len]
//! ```
//!
//! `payload` is the bincode encoding of a [`JournalEntry`]. A frame is only
//! trusted when its length fits in the remaining bytes and its checksum
//! matches.

use crate::wal::JournalEntry;
use byteorder::{ByteOrder, LittleEndian};
use thiserror::Error;

/// Magic bytes at the start of every journal file
pub const JOURNAL_MAGIC: [u8; 8] = *b"CTRLJRNL";

/// Current file format version
pub const JOURNAL_FORMAT_VERSION: u32 = 1;

/// Size of the file header
pub const JOURNAL_HEADER_SIZE: usize = 12;

/// Size of the per-frame header (length + checksum)
pub const FRAME_HEADER_SIZE: usize = 8;

/// Largest payload accepted on decode
pub const MAX_FRAME_LEN: u32 = 16 * 1024 * 1024;

/// Frame-level decode failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// File does not start with the journal magic
    #[error("not a journal file (bad magic)")]
    BadMagic,

    /// File written by an unknown format version
    #[error("unsupported journal format version {0}")]
    UnsupportedVersion(u32),

    /// Declared length exceeds the limit
    #[error("frame length {0} exceeds limit")]
    Oversized(u32),

    /// Payload does not match its checksum
    #[error("checksum mismatch (expected {expected:#010x}, got {actual:#010x})")]
    Checksum {
        /// Checksum stored in the frame
        expected: u32,
        /// Checksum of the bytes read
        actual: u32,
        /// Total frame size, header included
        frame_len: usize,
    },

    /// Checksum matched but the payload is not a valid entry
    #[error("undecodable entry: {0}")]
    Payload(String),
}

/// Outcome of decoding one frame
#[derive(Debug, PartialEq)]
pub enum Decoded {
    /// A complete frame
    Entry {
        /// The entry
        entry: JournalEntry,
        /// Bytes consumed, header included
        len: usize,
    },
    /// Not enough bytes for a whole frame
    Incomplete,
}

/// Encode the file header
pub fn encode_header() -> [u8; JOURNAL_HEADER_SIZE] {
    let mut header = [0u8; JOURNAL_HEADER_SIZE];
    header[..8].copy_from_slice(&JOURNAL_MAGIC);
    LittleEndian::write_u32(&mut header[8..], JOURNAL_FORMAT_VERSION);
    header
}

/// Validate the file header
pub fn decode_header(bytes: &[u8]) -> Result<(), FrameError> {
    if bytes.len() < JOURNAL_HEADER_SIZE || bytes[..8] != JOURNAL_MAGIC {
        return Err(FrameError::BadMagic);
    }
    let version = LittleEndian::read_u32(&bytes[8..12]);
    if version != JOURNAL_FORMAT_VERSION {
        return Err(FrameError::UnsupportedVersion(version));
    }
    Ok(())
}

/// Encode one entry as a frame
pub fn encode_frame(entry: &JournalEntry) -> Result<Vec<u8>, FrameError> {
    let payload = bincode::serialize(entry).map_err(|e| FrameError::Payload(e.to_string()))?;
    let len = u32::try_from(payload.len())
        .ok()
        .filter(|len| *len <= MAX_FRAME_LEN)
        .ok_or(FrameError::Oversized(u32::MAX))?;

    let mut frame = Vec::with_capacity(FRAME_HEADER_SIZE + payload.len());
    let mut header = [0u8; FRAME_HEADER_SIZE];
    LittleEndian::write_u32(&mut header[..4], len);
    LittleEndian::write_u32(&mut header[4..], crc32fast::hash(&payload));
    frame.extend_from_slice(&header);
    frame.extend_from_slice(&payload);
    Ok(frame)
}

/// Decode the frame at the start of `bytes`
pub fn decode_frame(bytes: &[u8]) -> Result<Decoded, FrameError> {
    if bytes.len() < FRAME_HEADER_SIZE {
        return Ok(Decoded::Incomplete);
    }
    let len = LittleEndian::read_u32(&bytes[..4]);
    if len > MAX_FRAME_LEN {
        return Err(FrameError::Oversized(len));
    }
    let frame_len = FRAME_HEADER_SIZE + len as usize;
    if bytes.len() < frame_len {
        return Ok(Decoded::Incomplete);
    }

    let expected = LittleEndian::read_u32(&bytes[4..8]);
    let payload = &bytes[FRAME_HEADER_SIZE..frame_len];
    let actual = crc32fast::hash(payload);
    if actual != expected {
        return Err(FrameError::Checksum {
            expected,
            actual,
            frame_len,
        });
    }

    let entry = bincode::deserialize(payload).map_err(|e| FrameError::Payload(e.to_string()))?;
    Ok(Decoded::Entry {
        entry,
        len: frame_len,
    })
}
