//! Errors raised when splitting a buffer into fragments

use thiserror::Error;

/// A piece list that cannot be laid over a buffer
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ChunkingError {
    /// Piece lengths do not add up to the buffer length
    #[error("Pieces sum to {pieces_total} bytes but buffer holds {buffer_len}")]
    LengthMismatch {
        buffer_len: usize,
        pieces_total: usize,
    },

    /// A fragment must carry at least one byte
    #[error("Piece {index} has zero length")]
    ZeroLengthPiece { index: usize },
}

impl ChunkingError {
    pub(crate) fn length_mismatch(buffer_len: usize, pieces_total: usize) -> Self {
        ChunkingError::LengthMismatch {
            buffer_len,
            pieces_total,
        }
    }

    pub(crate) fn zero_length_piece(index: usize) -> Self {
        ChunkingError::ZeroLengthPiece { index }
    }
}

/// Result type for buffer splitting
pub type Result<T> = std::result::Result<T, ChunkingError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = ChunkingError::length_mismatch(5, 4);
        assert_eq!(err.to_string(), "Pieces sum to 4 bytes but buffer holds 5");

        let err = ChunkingError::zero_length_piece(2);
        assert_eq!(err.to_string(), "Piece 2 has zero length");
    }
}
