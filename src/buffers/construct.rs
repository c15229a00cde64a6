//! Buffer constructors
//!
//! Everything here allocates a dedicated backing store. Pooled allocation
//! goes through [`BufferPool`](super::BufferPool).

use crate::{
    encoding::{self, Encoding},
    error::{BufferError, Result},
    memory::BackingStore,
};

use super::buffer::Buffer;

/// Fixed-width element whose native-order bytes can seed a buffer
pub trait Element: Copy {
    /// Width of one element in bytes
    const WIDTH: usize;

    /// Append the element's native-order bytes to `out`
    fn extend_ne_bytes(self, out: &mut Vec<u8>);
}

macro_rules! impl_element {
    ($($ty:ty),* $(,)?) => {$(
        impl Element for $ty {
            const WIDTH: usize = std::mem::size_of::<$ty>();

            fn extend_ne_bytes(self, out: &mut Vec<u8>) {
                out.extend_from_slice(&self.to_ne_bytes());
            }
        }
    )*};
}

impl_element!(u8, i8, u16, i16, u32, i32, u64, i64, f32, f64);

impl Buffer {
    /// Zero-filled dedicated buffer of `len` bytes
    pub fn new(len: usize) -> Self {
        Self::from_parts(BackingStore::zeroed(len), 0, len)
    }

    /// Dedicated buffer holding a copy of `bytes`
    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::from(bytes.to_vec())
    }

    /// View `len` bytes of an existing store starting at `offset`
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the window does not fit in the store.
    pub fn from_store(store: BackingStore, offset: usize, len: usize) -> Result<Self> {
        match offset.checked_add(len) {
            Some(end) if end <= store.len() => Ok(Self::from_parts(store, offset, len)),
            _ => Err(BufferError::out_of_bounds(offset, len, store.len())),
        }
    }

    /// Dedicated buffer holding `input` encoded with `encoding`
    ///
    /// # Errors
    ///
    /// Propagates text codec failures.
    pub fn from_encoded(input: &str, encoding: Encoding) -> Result<Self> {
        encoding::encode(input, encoding).map(Self::from)
    }

    /// Copy `len` elements of `view` starting at element `offset` into a new
    /// buffer, in native byte order; `None` copies to the end of `view`
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::OutOfBounds`] if the element range leaves `view`.
    pub fn copy_bytes_from<T: Element>(view: &[T], offset: usize, len: Option<usize>) -> Result<Self> {
        let len = len.unwrap_or_else(|| view.len().saturating_sub(offset));
        let elements = offset
            .checked_add(len)
            .and_then(|end| view.get(offset..end))
            .ok_or_else(|| BufferError::out_of_bounds(offset, len, view.len()))?;
        let mut bytes = Vec::with_capacity(elements.len() * T::WIDTH);
        for element in elements {
            element.extend_ne_bytes(&mut bytes);
        }
        Ok(Self::from(bytes))
    }

    /// Number of bytes `input` occupies once encoded with `encoding`
    pub fn byte_length(input: &str, encoding: Encoding) -> usize {
        encoding::byte_length(input, encoding)
    }

    /// Length of an existing buffer, for callers that measure text and bytes alike
    pub fn byte_length_of(buffer: &Buffer) -> usize {
        buffer.len()
    }
}

impl From<Vec<u8>> for Buffer {
    fn from(bytes: Vec<u8>) -> Self {
        let len = bytes.len();
        Self::from_parts(BackingStore::from_vec(bytes), 0, len)
    }
}

impl From<&[u8]> for Buffer {
    fn from(bytes: &[u8]) -> Self {
        Self::from_bytes(bytes)
    }
}

impl<const N: usize> From<[u8; N]> for Buffer {
    fn from(bytes: [u8; N]) -> Self {
        Self::from(bytes.to_vec())
    }
}

/// UTF-8 bytes of the string
impl From<&str> for Buffer {
    fn from(input: &str) -> Self {
        Self::from(input.as_bytes().to_vec())
    }
}

impl From<Buffer> for Vec<u8> {
    fn from(buffer: Buffer) -> Self {
        buffer.to_vec()
    }
}

impl FromIterator<u8> for Buffer {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<Vec<u8>>())
    }
}
