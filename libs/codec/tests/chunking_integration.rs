//! Integration tests for buffer fragmentation
//!
//! Drives a small incremental line decoder with every fragmentation of a
//! request stream, the way wire decoder tests use this crate.

use bytes::{Buf, Bytes, BytesMut};
use codec::{count_compositions, enumerate_compositions, fragmentations, split_buffer};
use proptest::prelude::*;

/// Minimal `\r\n`-terminated line decoder fed one fragment at a time
#[derive(Default)]
struct LineDecoder {
    pending: BytesMut,
    lines: Vec<Bytes>,
}

impl LineDecoder {
    fn feed(&mut self, fragment: &[u8]) {
        self.pending.extend_from_slice(fragment);
        while let Some(end) = self.pending.windows(2).position(|w| w == b"\r\n") {
            let line = self.pending.split_to(end).freeze();
            self.pending.advance(2);
            self.lines.push(line);
        }
    }

    fn finish(self) -> (Vec<Bytes>, Bytes) {
        (self.lines, self.pending.freeze())
    }
}

fn decode_whole(buffer: &Bytes) -> (Vec<Bytes>, Bytes) {
    let mut decoder = LineDecoder::default();
    decoder.feed(buffer);
    decoder.finish()
}

#[test_log::test]
fn test_decoder_agrees_across_fragmentations() {
    let stream = Bytes::from_static(b"get a\r\nset b 0 0 1\r\nx\r\nge");
    let expected = decode_whole(&stream);
    assert_eq!(expected.0.len(), 3);
    assert_eq!(expected.1, "ge");

    let mut seen = 0u128;
    for pieces in fragmentations(&stream, 4) {
        let mut decoder = LineDecoder::default();
        for piece in &pieces {
            decoder.feed(piece);
        }
        assert_eq!(decoder.finish(), expected, "fragments {pieces:?}");
        seen += 1;
    }
    assert_eq!(seen, count_compositions(stream.len(), 4));
}

#[test]
fn test_five_bytes_in_pieces_of_two() {
    let compositions: Vec<Vec<usize>> = enumerate_compositions(5, 2).collect();
    assert_eq!(compositions.len() as u128, count_compositions(5, 2));
    assert_eq!(compositions.len(), 8);

    for composition in &compositions {
        assert!(composition.iter().all(|&piece| (1..=2).contains(&piece)));
        assert_eq!(composition.iter().sum::<usize>(), 5);
    }

    assert_eq!(compositions.first(), Some(&vec![1, 1, 1, 1, 1]));
    assert_eq!(compositions.last(), Some(&vec![2, 2, 1]));
}

#[test]
fn test_split_abcde() {
    let buffer = Bytes::from_static(b"ABCDE");
    assert_eq!(split_buffer(&buffer, &[1, 2, 2]), vec!["A", "BC", "DE"]);

    for composition in enumerate_compositions(buffer.len(), 3) {
        let joined: Vec<u8> = split_buffer(&buffer, &composition).concat();
        assert_eq!(joined, buffer);
    }
}

#[test]
fn test_slices_share_storage() {
    let buffer = Bytes::from(b"0123456789".to_vec());
    let slices = split_buffer(&buffer, &[3, 3, 4]);
    let base = buffer.as_ptr() as usize;
    let offsets: Vec<usize> = slices.iter().map(|s| s.as_ptr() as usize - base).collect();
    assert_eq!(offsets, vec![0, 3, 6]);
}

proptest! {
    #[test]
    fn prop_enumeration_length_matches_count(length in 0usize..12, max_piece_size in 0usize..14) {
        let produced = enumerate_compositions(length, max_piece_size).count() as u128;
        prop_assert_eq!(produced, count_compositions(length, max_piece_size));
    }

    #[test]
    fn prop_compositions_are_strictly_ascending(length in 1usize..10, max_piece_size in 1usize..10) {
        let compositions: Vec<Vec<usize>> = enumerate_compositions(length, max_piece_size).collect();
        for pair in compositions.windows(2) {
            prop_assert!(pair[0] < pair[1]);
        }
    }

    #[test]
    fn prop_every_split_reassembles(data in prop::collection::vec(any::<u8>(), 0..9), max_piece_size in 1usize..5) {
        let buffer = Bytes::from(data);
        for pieces in fragmentations(&buffer, max_piece_size) {
            prop_assert!(pieces.iter().all(|p| !p.is_empty() && p.len() <= max_piece_size));
            prop_assert_eq!(pieces.concat(), buffer.to_vec());
        }
    }
}
