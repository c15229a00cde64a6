//! Comparison, equality, substring search and fill

use std::{cell::Cell, cmp::Ordering, ops::RangeBounds};

use crate::{
    config::COMPARE_WORD_SIZE,
    encoding::{self, Encoding},
    error::{BufferError, Result},
};

use super::buffer::{clamp_range, Buffer};

/// A value accepted by `fill`, `index_of` and friends
///
/// Every variant is resolved to a concrete byte sequence before the shared
/// algorithm runs; a [`ByteValue::Buffer`] is copied out first, so it may
/// alias the buffer being searched or filled.
#[derive(Debug, Clone, Copy)]
pub enum ByteValue<'a> {
    /// A single byte
    Byte(u8),
    /// Text, converted with the given encoding
    Text(&'a str, Encoding),
    /// Raw bytes
    Bytes(&'a [u8]),
    /// The bytes of another view
    Buffer(&'a Buffer),
}

/// A resolved `ByteValue`
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Pattern {
    Byte(u8),
    Sequence(Vec<u8>),
}

impl Pattern {
    fn as_bytes(&self) -> &[u8] {
        match self {
            Pattern::Byte(byte) => std::slice::from_ref(byte),
            Pattern::Sequence(bytes) => bytes,
        }
    }
}

impl ByteValue<'_> {
    pub(crate) fn resolve(self) -> Result<Pattern> {
        Ok(match self {
            ByteValue::Byte(byte) => Pattern::Byte(byte),
            ByteValue::Text(text, encoding) => Pattern::Sequence(encoding::encode(text, encoding)?),
            ByteValue::Bytes(bytes) => Pattern::Sequence(bytes.to_vec()),
            ByteValue::Buffer(buffer) => Pattern::Sequence(buffer.to_vec()),
        })
    }
}

impl From<u8> for ByteValue<'_> {
    fn from(byte: u8) -> Self {
        ByteValue::Byte(byte)
    }
}

/// UTF-8 text
impl<'a> From<&'a str> for ByteValue<'a> {
    fn from(text: &'a str) -> Self {
        ByteValue::Text(text, Encoding::Utf8)
    }
}

impl<'a> From<(&'a str, Encoding)> for ByteValue<'a> {
    fn from((text, encoding): (&'a str, Encoding)) -> Self {
        ByteValue::Text(text, encoding)
    }
}

impl<'a> From<&'a [u8]> for ByteValue<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        ByteValue::Bytes(bytes)
    }
}

impl<'a, const N: usize> From<&'a [u8; N]> for ByteValue<'a> {
    fn from(bytes: &'a [u8; N]) -> Self {
        ByteValue::Bytes(bytes)
    }
}

impl<'a> From<&'a Vec<u8>> for ByteValue<'a> {
    fn from(bytes: &'a Vec<u8>) -> Self {
        ByteValue::Bytes(bytes)
    }
}

impl<'a> From<&'a Buffer> for ByteValue<'a> {
    fn from(buffer: &'a Buffer) -> Self {
        ByteValue::Buffer(buffer)
    }
}

impl Buffer {
    /// Lexicographic comparison of the whole of both views
    ///
    /// The first differing byte decides; when one view is a prefix of the
    /// other, the shorter one sorts first.
    pub fn compare(&self, target: &Buffer) -> Ordering {
        self.compare_range(target, 0, target.len(), 0, self.len())
    }

    /// Compare `[source_start, source_end)` of this view with
    /// `[target_start, target_end)` of `target`
    ///
    /// Ranges are clamped into their views.
    pub fn compare_range(
        &self,
        target: &Buffer,
        target_start: usize,
        target_end: usize,
        source_start: usize,
        source_end: usize,
    ) -> Ordering {
        let (source_start, source_end) = clamp_range(source_start..source_end, self.len());
        let (target_start, target_end) = clamp_range(target_start..target_end, target.len());
        compare_cells(
            &self.cells()[source_start..source_end],
            &target.cells()[target_start..target_end],
        )
    }

    /// Byte-wise equality of two views
    ///
    /// When both views start at a word-aligned offset of their stores, the
    /// bulk is compared a word at a time and the remainder byte by byte.
    pub fn equals(&self, other: &Buffer) -> bool {
        if self.len() != other.len() {
            return false;
        }
        if self.shares_store(other) && self.byte_offset() == other.byte_offset() {
            return true;
        }
        let (a, b) = (self.cells(), other.cells());
        if a.len() >= COMPARE_WORD_SIZE
            && self.byte_offset() % COMPARE_WORD_SIZE == 0
            && other.byte_offset() % COMPARE_WORD_SIZE == 0
        {
            words_equal(a, b)
        } else {
            bytes_equal(a, b)
        }
    }

    /// Equality with a plain byte slice
    pub fn equals_bytes(&self, other: &[u8]) -> bool {
        self.len() == other.len() && self.iter().zip(other).all(|(a, &b)| a == b)
    }

    /// Smallest index `>= from` where `value` occurs
    ///
    /// A negative `from` counts back from the end and is clamped to 0. An
    /// empty `value` matches at `from` (clamped to the length).
    ///
    /// # Errors
    ///
    /// Propagates text codec failures while resolving `value`.
    pub fn index_of<'a>(&self, value: impl Into<ByteValue<'a>>, from: isize) -> Result<Option<usize>> {
        let pattern = value.into().resolve()?;
        let start = resolve_offset(from, self.len()).unwrap_or(0);
        Ok(find_forward(self.cells(), pattern.as_bytes(), start))
    }

    /// Largest index `<= from` where `value` occurs
    ///
    /// A negative `from` counts back from the end; if it is still negative the
    /// search is empty. Pass `isize::MAX` (or the length) to search the whole view.
    ///
    /// # Errors
    ///
    /// Propagates text codec failures while resolving `value`.
    pub fn last_index_of<'a>(
        &self,
        value: impl Into<ByteValue<'a>>,
        from: isize,
    ) -> Result<Option<usize>> {
        let pattern = value.into().resolve()?;
        Ok(match resolve_offset(from, self.len()) {
            Some(start) => find_backward(self.cells(), pattern.as_bytes(), start),
            None => None,
        })
    }

    /// Check whether `value` occurs at or after `from`
    ///
    /// # Errors
    ///
    /// Propagates text codec failures while resolving `value`.
    pub fn includes<'a>(&self, value: impl Into<ByteValue<'a>>, from: isize) -> Result<bool> {
        self.index_of(value, from).map(|found| found.is_some())
    }

    /// Fill `range` with `value`
    ///
    /// A byte sets every position; a sequence is tiled from the start of the
    /// range, with the last copy truncated to fit.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidParameter`] for an empty sequence over a
    /// non-empty range, and propagates text codec failures. No byte is written
    /// on failure.
    pub fn fill<'a>(&self, value: impl Into<ByteValue<'a>>, range: impl RangeBounds<usize>) -> Result<&Self> {
        let pattern = value.into().resolve()?;
        self.fill_pattern(&pattern, range)?;
        Ok(self)
    }

    pub(crate) fn fill_pattern(&self, pattern: &Pattern, range: impl RangeBounds<usize>) -> Result<()> {
        let (start, end) = clamp_range(range, self.len());
        let target = &self.cells()[start..end];
        match pattern {
            Pattern::Byte(byte) => target.iter().for_each(|cell| cell.set(*byte)),
            Pattern::Sequence(bytes) if bytes.is_empty() => {
                if !target.is_empty() {
                    return Err(BufferError::invalid_parameter(
                        "value",
                        "fill sequence must not be empty",
                    ));
                }
            }
            Pattern::Sequence(bytes) => {
                for (cell, byte) in target.iter().zip(bytes.iter().cycle()) {
                    cell.set(*byte);
                }
            }
        }
        Ok(())
    }
}

/// Normalize a possibly negative search offset against `len`
///
/// Returns `None` when a negative offset reaches before the start.
fn resolve_offset(from: isize, len: usize) -> Option<usize> {
    if from < 0 {
        len.checked_sub(from.unsigned_abs())
    } else {
        Some((from as usize).min(len))
    }
}

fn compare_cells(source: &[Cell<u8>], target: &[Cell<u8>]) -> Ordering {
    for (a, b) in source.iter().zip(target) {
        match a.get().cmp(&b.get()) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    source.len().cmp(&target.len())
}

pub(crate) fn bytes_equal(a: &[Cell<u8>], b: &[Cell<u8>]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.get() == y.get())
}

pub(crate) fn words_equal(a: &[Cell<u8>], b: &[Cell<u8>]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let split = a.len() - a.len() % COMPARE_WORD_SIZE;
    let (a_words, a_tail) = a.split_at(split);
    let (b_words, b_tail) = b.split_at(split);
    a_words
        .chunks_exact(COMPARE_WORD_SIZE)
        .zip(b_words.chunks_exact(COMPARE_WORD_SIZE))
        .all(|(x, y)| load_word(x) == load_word(y))
        && bytes_equal(a_tail, b_tail)
}

fn load_word(cells: &[Cell<u8>]) -> u32 {
    u32::from_ne_bytes([cells[0].get(), cells[1].get(), cells[2].get(), cells[3].get()])
}

fn window_matches(window: &[Cell<u8>], needle: &[u8]) -> bool {
    window.iter().zip(needle).all(|(cell, &byte)| cell.get() == byte)
}

fn find_forward(haystack: &[Cell<u8>], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(haystack.len()));
    }
    let last = haystack.len().checked_sub(needle.len())?;
    (from..=last).find(|&i| window_matches(&haystack[i..i + needle.len()], needle))
}

fn find_backward(haystack: &[Cell<u8>], needle: &[u8], from: usize) -> Option<usize> {
    if needle.is_empty() {
        return Some(from.min(haystack.len()));
    }
    let last = haystack.len().checked_sub(needle.len())?.min(from);
    (0..=last)
        .rev()
        .find(|&i| window_matches(&haystack[i..i + needle.len()], needle))
}

impl PartialEq for Buffer {
    fn eq(&self, other: &Self) -> bool {
        self.equals(other)
    }
}

impl Eq for Buffer {}

impl PartialEq<[u8]> for Buffer {
    fn eq(&self, other: &[u8]) -> bool {
        self.equals_bytes(other)
    }
}

impl PartialEq<Vec<u8>> for Buffer {
    fn eq(&self, other: &Vec<u8>) -> bool {
        self.equals_bytes(other)
    }
}

impl PartialOrd for Buffer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Buffer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::BackingStore;
    use proptest::prelude::*;

    #[test]
    fn test_resolve_offset() {
        assert_eq!(resolve_offset(0, 6), Some(0));
        assert_eq!(resolve_offset(-2, 6), Some(4));
        assert_eq!(resolve_offset(-7, 6), None);
        assert_eq!(resolve_offset(100, 6), Some(6));
    }

    #[test]
    fn test_empty_needle_and_oversized_needle() {
        let buf = Buffer::from(vec![1, 2, 3]);
        assert_eq!(buf.index_of(&[] as &[u8], 1).unwrap(), Some(1));
        assert_eq!(buf.index_of(&[] as &[u8], 10).unwrap(), Some(3));
        assert_eq!(buf.last_index_of(&[] as &[u8], isize::MAX).unwrap(), Some(3));
        assert_eq!(buf.index_of(&[1u8, 2, 3, 4], 0).unwrap(), None);
        assert_eq!(Buffer::empty().index_of(1u8, 0).unwrap(), None);
    }

    #[test]
    fn test_empty_fill_sequence() {
        let buf = Buffer::from(vec![7, 7]);
        assert!(buf.fill(&[] as &[u8], ..).is_err());
        assert_eq!(buf.to_vec(), vec![7, 7]);
        // nothing to fill, nothing to complain about
        assert!(buf.fill(&[] as &[u8], 1..1).is_ok());
    }

    fn view_at(bytes: &[u8], offset: usize) -> Buffer {
        let mut backing = vec![0xaa; offset];
        backing.extend_from_slice(bytes);
        Buffer::from_store(BackingStore::from_vec(backing), offset, bytes.len()).unwrap()
    }

    proptest! {
        #[test]
        fn prop_word_and_byte_equality_agree(
            a in proptest::collection::vec(any::<u8>(), 0..40),
            flip in any::<prop::sample::Index>(),
            offset_a in 0usize..9,
            offset_b in 0usize..9,
            mutate in any::<bool>(),
        ) {
            let mut b = a.clone();
            if mutate && !b.is_empty() {
                let i = flip.index(b.len());
                b[i] = b[i].wrapping_add(1);
            }
            let va = view_at(&a, offset_a);
            let vb = view_at(&b, offset_b);
            let expected = a == b;
            prop_assert_eq!(bytes_equal(va.cells(), vb.cells()), expected);
            prop_assert_eq!(words_equal(va.cells(), vb.cells()), expected);
            prop_assert_eq!(va.equals(&vb), expected);
        }

        #[test]
        fn prop_index_of_matches_reference(
            haystack in proptest::collection::vec(0u8..3, 0..24),
            needle in proptest::collection::vec(0u8..3, 1..4),
            from in -30isize..30,
        ) {
            let buf = Buffer::from(haystack.clone());
            let len = haystack.len() as isize;
            let start = (if from < 0 { (len + from).max(0) } else { from.min(len) }) as usize;
            let expected = (start..haystack.len())
                .find(|&i| haystack[i..].starts_with(&needle));
            prop_assert_eq!(buf.index_of(&needle, from).unwrap(), expected);

            let expected_last = if from < 0 && len + from < 0 {
                None
            } else {
                let limit = (if from < 0 { len + from } else { from.min(len) }) as usize;
                (0..=limit.min(haystack.len()))
                    .rev()
                    .find(|&i| haystack[i..].starts_with(&needle))
            };
            prop_assert_eq!(buf.last_index_of(&needle, from).unwrap(), expected_last);
        }
    }
}
