use super::*;
use crate::{encoding::Encoding, memory::BackingStore};

#[test]
fn test_slice_shares_bytes_with_parent() {
    let parent = Buffer::from(vec![0u8; 8]);
    let child = parent.slice(2..6);
    let grandchild = child.slice(1..);

    assert_eq!(child.len(), 4);
    assert_eq!(child.byte_offset(), 2);
    assert_eq!(grandchild.byte_offset(), 3);

    grandchild.set(0, 0xaa).unwrap();
    assert_eq!(parent.get(3), Some(0xaa));
    parent.set(4, 0xbb).unwrap();
    assert_eq!(child.get(2), Some(0xbb));
}

#[test]
fn test_slice_clamps() {
    let buf = Buffer::from(vec![1, 2, 3, 4]);
    assert_eq!(buf.slice(2..100).to_vec(), vec![3, 4]);
    assert!(buf.slice(3..1).is_empty());
    assert!(buf.slice(10..).is_empty());
    assert_eq!(buf.slice(..=1).to_vec(), vec![1, 2]);
}

#[test]
fn test_clone_is_an_alias() {
    let buf = Buffer::from(vec![0, 0]);
    let alias = buf.clone();
    alias.set(1, 5).unwrap();
    assert_eq!(buf.to_vec(), vec![0, 5]);
    assert!(buf.shares_store(&alias));
    assert_eq!(buf.store().handle_count(), 2);
}

#[test]
fn test_set_out_of_bounds() {
    let buf = Buffer::from(vec![0, 0]);
    assert!(buf.set(2, 1).unwrap_err().is_range_error());
    assert_eq!(buf.get(2), None);
}

#[test]
fn test_copy_into_limits_to_target() {
    let source = Buffer::from(vec![1, 2, 3, 4, 5]);
    let target = Buffer::new(4);
    assert_eq!(source.copy_into(&target, 1, 0, 5), 3);
    assert_eq!(target.to_vec(), vec![0, 1, 2, 3]);

    assert_eq!(source.copy_into(&target, 0, 3, 100), 2);
    assert_eq!(target.to_vec(), vec![4, 5, 2, 3]);

    assert_eq!(source.copy_into(&target, 4, 0, 5), 0);
    assert_eq!(source.copy_into(&target, 9, 0, 5), 0);
    assert_eq!(source.copy_into(&target, 0, 4, 2), 0);
}

#[test]
fn test_write_and_read_text() {
    let buf = Buffer::new(8);
    assert_eq!(buf.write("hey", 2, Encoding::Utf8).unwrap(), 3);
    assert_eq!(buf.to_string_range(Encoding::Utf8, 2..5), "hey");
    assert_eq!(buf.write_bounded("abcdef", 6, 10, Encoding::Latin1).unwrap(), 2);
    assert_eq!(buf.to_string_range(Encoding::Hex, 5..), "006162");
    assert_eq!(buf.write_bounded("zz", 0, 1, Encoding::Ascii).unwrap(), 1);
    assert_eq!(buf.get(1), Some(0));
    assert!(buf.write("x", 9, Encoding::Utf8).is_err());
    assert_eq!(buf.write("x", 8, Encoding::Utf8).unwrap(), 0);
}

#[test]
fn test_map_produces_dedicated_copy() {
    let buf = Buffer::from(vec![1, 2, 3]);
    let doubled = buf.map(|b| b * 2);
    assert_eq!(doubled.to_vec(), vec![2, 4, 6]);
    assert!(!doubled.shares_store(&buf));
}

#[test]
fn test_debug_and_display() {
    let buf = Buffer::from("hi");
    assert_eq!(format!("{:?}", buf), "<Buffer 68 69>");
    assert_eq!(buf.to_string(), "hi");

    let long = Buffer::new(52);
    assert!(format!("{:?}", long).ends_with("00 ... 2 more bytes>"));
}

#[test]
fn test_from_store_bounds() {
    let store = BackingStore::zeroed(16);
    let view = Buffer::from_store(store.clone(), 8, 8).unwrap();
    assert_eq!(view.byte_offset(), 8);
    assert!(Buffer::from_store(store.clone(), 9, 8).is_err());
    assert!(Buffer::from_store(store, usize::MAX, 2).is_err());
}

#[test]
fn test_copy_bytes_from_elements() {
    let words: [u16; 3] = [0x0102, 0x0304, 0x0506];
    let buf = Buffer::copy_bytes_from(&words, 1, Some(2)).unwrap();
    let mut expected = Vec::new();
    expected.extend_from_slice(&0x0304u16.to_ne_bytes());
    expected.extend_from_slice(&0x0506u16.to_ne_bytes());
    assert_eq!(buf.to_vec(), expected);

    assert_eq!(Buffer::copy_bytes_from(&words, 3, None).unwrap().len(), 0);
    assert!(Buffer::copy_bytes_from(&words, 2, Some(2)).is_err());
}

#[test]
fn test_conversions() {
    let buf: Buffer = (1u8..=3).collect();
    assert_eq!(Vec::from(buf.clone()), vec![1, 2, 3]);
    assert_eq!(buf, vec![1u8, 2, 3]);
    assert_eq!(Buffer::from([9u8, 8]).to_vec(), vec![9, 8]);
    assert_eq!(Buffer::from_encoded("0a0b", Encoding::Hex).unwrap().to_vec(), vec![10, 11]);
    assert_eq!(Buffer::byte_length("abc", Encoding::Utf16Le), 6);
    assert_eq!(Buffer::byte_length_of(&buf), 3);
    assert!(Buffer::default().is_empty());
}

#[test]
fn test_pooled_buffers_round_trip_numbers() {
    let pool = BufferPool::default();
    let a = pool.alloc(16);
    let b = pool.alloc(16);
    a.write_f64_le(1.5, 8).unwrap();
    b.write_i64_be(-3, 0).unwrap();
    assert_eq!(a.read_f64_le(8).unwrap(), 1.5);
    assert_eq!(b.read_i64_be(0).unwrap(), -3);
    assert!(a.shares_store(&b));
    assert_eq!(b.byte_offset(), 16);
}
