//! On-disk byte formats for the journal.
//!
//! Serialization lives here, apart from how the journal file is managed, so
//! the format can evolve without touching the append/recovery logic.
//!
//! # Module Structure
//!
//! - `frame`: journal file header and CRC-checked entry frames

pub mod frame;

pub use frame::{
    decode_frame, decode_header, encode_frame, encode_header, Decoded, FrameError,
    FRAME_HEADER_SIZE, JOURNAL_FORMAT_VERSION, JOURNAL_HEADER_SIZE, JOURNAL_MAGIC, MAX_FRAME_LEN,
};
