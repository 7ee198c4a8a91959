//! # Cache Proxy Codec Test Support
//!
//! ## Purpose
//!
//! Memcache-family wire decoders are incremental: bytes arrive in whatever
//! pieces the socket delivers. This crate enumerates every way a buffer can be
//! fragmented so decoder tests can prove the result does not depend on where
//! the transport cut the stream.
//!
//! ## What This Crate Contains
//! - [`count_compositions`]: number of fragmentations without enumerating them
//! - [`enumerate_compositions`]: lazy piece-size lists in lexicographic order
//! - [`split_buffer`] / [`try_split_buffer`]: zero-copy slicing of a buffer
//! - [`fragmentations`]: composition and split in one step
//!
//! ## What This Crate Does NOT Contain
//! - The wire decoders themselves
//! - Endpoint parsing (belongs in network/)
//!
//! ```
//! use bytes::Bytes;
//! use codec::fragmentations;
//!
//! let buffer = Bytes::from_static(b"get k\r\n");
//! for pieces in fragmentations(&buffer, 3) {
//!     let joined: Vec<u8> = pieces.iter().flat_map(|p| p.iter().copied()).collect();
//!     assert_eq!(joined, buffer);
//! }
//! ```

pub mod chunking;
pub mod error;

pub use chunking::{
    count_compositions, enumerate_compositions, fragmentations, split_buffer, try_split_buffer,
    Compositions, Fragmentations,
};
pub use error::{ChunkingError, Result};
