//! Fixed-width numeric codec
//!
//! Every read and write takes a byte offset into the view and checks it
//! against the view length in O(1) before touching any byte. Writes return
//! the offset just past the written value.
//!
//! Signed values are stored in two's complement: a signed read is the
//! unsigned read of the same width with `2^width` subtracted when the result
//! exceeds `2^(width-1) - 1`, and a signed write adds `2^width` to negative
//! values before the unsigned write.

use std::cell::Cell;

use crate::{
    config::MAX_VARIABLE_WIDTH,
    error::{BufferError, Result},
};

use super::buffer::Buffer;

/// Unsigned and floating point accessors: (read, write, type, from_bytes, to_bytes)
macro_rules! fixed_width {
    ($($read:ident, $write:ident, $ty:ty, $from:ident, $to:ident;)*) => {
        impl Buffer {$(
            #[doc = concat!("Read a `", stringify!($ty), "` at `offset` (`", stringify!($from), "`)")]
            ///
            /// # Errors
            ///
            /// Returns [`BufferError::OutOfBounds`] if the value does not fit in the view.
            pub fn $read(&self, offset: usize) -> Result<$ty> {
                self.read_array(offset).map(<$ty>::$from)
            }

            #[doc = concat!("Write a `", stringify!($ty), "` at `offset` (`", stringify!($to), "`)")]
            ///
            /// # Errors
            ///
            /// Returns [`BufferError::OutOfBounds`] if the value does not fit in the view.
            pub fn $write(&self, value: $ty, offset: usize) -> Result<usize> {
                self.write_array(offset, value.$to())
            }
        )*}
    };
}

/// Signed accessors layered on the unsigned ones: (read, write, signed, unsigned, unsigned read, unsigned write)
macro_rules! signed_width {
    ($($read:ident, $write:ident, $ity:ty, $uty:ty, $uread:ident, $uwrite:ident;)*) => {
        impl Buffer {$(
            #[doc = concat!("Read an `", stringify!($ity), "` at `offset`")]
            ///
            /// # Errors
            ///
            /// Returns [`BufferError::OutOfBounds`] if the value does not fit in the view.
            pub fn $read(&self, offset: usize) -> Result<$ity> {
                self.$uread(offset).map(|value| value as $ity)
            }

            #[doc = concat!("Write an `", stringify!($ity), "` at `offset`")]
            ///
            /// # Errors
            ///
            /// Returns [`BufferError::OutOfBounds`] if the value does not fit in the view.
            pub fn $write(&self, value: $ity, offset: usize) -> Result<usize> {
                self.$uwrite(value as $uty, offset)
            }
        )*}
    };
}

fixed_width! {
    read_u8, write_u8, u8, from_be_bytes, to_be_bytes;
    read_u16_be, write_u16_be, u16, from_be_bytes, to_be_bytes;
    read_u16_le, write_u16_le, u16, from_le_bytes, to_le_bytes;
    read_u32_be, write_u32_be, u32, from_be_bytes, to_be_bytes;
    read_u32_le, write_u32_le, u32, from_le_bytes, to_le_bytes;
    read_u64_be, write_u64_be, u64, from_be_bytes, to_be_bytes;
    read_u64_le, write_u64_le, u64, from_le_bytes, to_le_bytes;
    read_f32_be, write_f32_be, f32, from_be_bytes, to_be_bytes;
    read_f32_le, write_f32_le, f32, from_le_bytes, to_le_bytes;
    read_f64_be, write_f64_be, f64, from_be_bytes, to_be_bytes;
    read_f64_le, write_f64_le, f64, from_le_bytes, to_le_bytes;
}

signed_width! {
    read_i8, write_i8, i8, u8, read_u8, write_u8;
    read_i16_be, write_i16_be, i16, u16, read_u16_be, write_u16_be;
    read_i16_le, write_i16_le, i16, u16, read_u16_le, write_u16_le;
    read_i32_be, write_i32_be, i32, u32, read_u32_be, write_u32_be;
    read_i32_le, write_i32_le, i32, u32, read_u32_le, write_u32_le;
    read_i64_be, write_i64_be, i64, u64, read_u64_be, write_u64_be;
    read_i64_le, write_i64_le, i64, u64, read_u64_le, write_u64_le;
}

impl Buffer {
    /// Read a `byte_length`-byte (1-6) big-endian unsigned integer
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidParameter`] for an unsupported width and
    /// [`BufferError::OutOfBounds`] if the value does not fit in the view.
    pub fn read_uint_be(&self, offset: usize, byte_length: usize) -> Result<u64> {
        let bytes = self.variable_window(offset, byte_length)?;
        let mut mul = 1u64;
        let mut value = 0u64;
        for byte in bytes.iter().rev() {
            value += u64::from(byte.get()) * mul;
            mul *= 0x100;
        }
        Ok(value)
    }

    /// Read a `byte_length`-byte (1-6) little-endian unsigned integer
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidParameter`] for an unsupported width and
    /// [`BufferError::OutOfBounds`] if the value does not fit in the view.
    pub fn read_uint_le(&self, offset: usize, byte_length: usize) -> Result<u64> {
        let bytes = self.variable_window(offset, byte_length)?;
        let mut mul = 1u64;
        let mut value = 0u64;
        for byte in bytes {
            value += u64::from(byte.get()) * mul;
            mul *= 0x100;
        }
        Ok(value)
    }

    /// Read a `byte_length`-byte (1-6) big-endian signed integer
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::read_uint_be`].
    pub fn read_int_be(&self, offset: usize, byte_length: usize) -> Result<i64> {
        self.read_uint_be(offset, byte_length)
            .map(|value| sign_extend(value, byte_length))
    }

    /// Read a `byte_length`-byte (1-6) little-endian signed integer
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::read_uint_le`].
    pub fn read_int_le(&self, offset: usize, byte_length: usize) -> Result<i64> {
        self.read_uint_le(offset, byte_length)
            .map(|value| sign_extend(value, byte_length))
    }

    /// Write the low `byte_length` (1-6) bytes of `value`, big-endian
    ///
    /// Bits above `byte_length * 8` are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidParameter`] for an unsupported width and
    /// [`BufferError::OutOfBounds`] if the value does not fit in the view.
    pub fn write_uint_be(&self, value: u64, offset: usize, byte_length: usize) -> Result<usize> {
        let bytes = self.variable_window(offset, byte_length)?;
        let mut mul = 0x100u64.pow(byte_length as u32);
        for byte in bytes {
            mul /= 0x100;
            byte.set(((value / mul) & 0xff) as u8);
        }
        Ok(offset + byte_length)
    }

    /// Write the low `byte_length` (1-6) bytes of `value`, little-endian
    ///
    /// Bits above `byte_length * 8` are discarded.
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidParameter`] for an unsupported width and
    /// [`BufferError::OutOfBounds`] if the value does not fit in the view.
    pub fn write_uint_le(&self, value: u64, offset: usize, byte_length: usize) -> Result<usize> {
        let bytes = self.variable_window(offset, byte_length)?;
        let mut mul = 1u64;
        for byte in bytes {
            byte.set(((value / mul) & 0xff) as u8);
            mul *= 0x100;
        }
        Ok(offset + byte_length)
    }

    /// Write `value` as a `byte_length`-byte (1-6) big-endian signed integer
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::write_uint_be`].
    pub fn write_int_be(&self, value: i64, offset: usize, byte_length: usize) -> Result<usize> {
        self.write_uint_be(to_twos_complement(value, byte_length), offset, byte_length)
    }

    /// Write `value` as a `byte_length`-byte (1-6) little-endian signed integer
    ///
    /// # Errors
    ///
    /// Same as [`Buffer::write_uint_le`].
    pub fn write_int_le(&self, value: i64, offset: usize, byte_length: usize) -> Result<usize> {
        self.write_uint_le(to_twos_complement(value, byte_length), offset, byte_length)
    }

    /// Reverse the byte order of every 16-bit group in place
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Misaligned`] if the length is odd; nothing is swapped.
    pub fn swap16(&self) -> Result<&Self> {
        self.swap_groups(2)
    }

    /// Reverse the byte order of every 32-bit group in place
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Misaligned`] if the length is not a multiple of 4.
    pub fn swap32(&self) -> Result<&Self> {
        self.swap_groups(4)
    }

    /// Reverse the byte order of every 64-bit group in place
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Misaligned`] if the length is not a multiple of 8.
    pub fn swap64(&self) -> Result<&Self> {
        self.swap_groups(8)
    }

    fn swap_groups(&self, group: usize) -> Result<&Self> {
        if self.len() % group != 0 {
            return Err(BufferError::misaligned(group, self.len()));
        }
        for chunk in self.cells().chunks_exact(group) {
            for i in 0..group / 2 {
                chunk[i].swap(&chunk[group - 1 - i]);
            }
        }
        Ok(self)
    }

    fn check_bounds(&self, offset: usize, width: usize) -> Result<()> {
        match offset.checked_add(width) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(BufferError::out_of_bounds(offset, width, self.len())),
        }
    }

    fn read_array<const N: usize>(&self, offset: usize) -> Result<[u8; N]> {
        self.check_bounds(offset, N)?;
        let mut out = [0u8; N];
        for (dst, src) in out.iter_mut().zip(&self.cells()[offset..offset + N]) {
            *dst = src.get();
        }
        Ok(out)
    }

    fn write_array<const N: usize>(&self, offset: usize, bytes: [u8; N]) -> Result<usize> {
        self.check_bounds(offset, N)?;
        for (dst, src) in self.cells()[offset..offset + N].iter().zip(bytes) {
            dst.set(src);
        }
        Ok(offset + N)
    }

    fn variable_window(&self, offset: usize, byte_length: usize) -> Result<&[Cell<u8>]> {
        if !(1..=MAX_VARIABLE_WIDTH).contains(&byte_length) {
            return Err(BufferError::invalid_parameter(
                "byte_length",
                format!("must be between 1 and {}, got {}", MAX_VARIABLE_WIDTH, byte_length),
            ));
        }
        self.check_bounds(offset, byte_length)?;
        Ok(&self.cells()[offset..offset + byte_length])
    }
}

fn sign_extend(value: u64, byte_length: usize) -> i64 {
    let bits = byte_length * 8;
    let value = value as i64;
    if value > (1i64 << (bits - 1)) - 1 {
        value - (1i64 << bits)
    } else {
        value
    }
}

fn to_twos_complement(value: i64, byte_length: usize) -> u64 {
    if value < 0 {
        value.wrapping_add(1i64 << (byte_length * 8)) as u64
    } else {
        value as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_u32_keeps_full_unsigned_range() {
        let buf = Buffer::from(vec![0xff, 0xff, 0xff, 0xfe]);
        assert_eq!(buf.read_u32_be(0).unwrap(), 0xffff_fffe);
        assert_eq!(buf.read_u32_le(0).unwrap(), 0xfeff_ffff);
        assert_eq!(buf.read_i32_be(0).unwrap(), -2);
    }

    #[test]
    fn test_sign_extend_boundaries() {
        assert_eq!(sign_extend(0x7f, 1), 127);
        assert_eq!(sign_extend(0x80, 1), -128);
        assert_eq!(sign_extend(0x7fff_ffff_ffff, 6), 0x7fff_ffff_ffff);
        assert_eq!(sign_extend(0x8000_0000_0000, 6), -0x8000_0000_0000);
        assert_eq!(sign_extend(0xffff_ffff_ffff, 6), -1);
    }

    #[test]
    fn test_twos_complement_keeps_low_bytes() {
        assert_eq!(to_twos_complement(-1, 3), 0xff_ffff);
        assert_eq!(to_twos_complement(-2, 1), 0xfe);
        assert_eq!(to_twos_complement(5, 2), 5);
    }

    #[test]
    fn test_bounds_checked_before_write() {
        let buf = Buffer::from(vec![1, 2, 3]);
        let err = buf.write_u32_le(0, 0).unwrap_err();
        assert!(err.is_range_error());
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
        assert!(buf.read_u16_be(usize::MAX).is_err());
    }

    #[test]
    fn test_swap_groups() {
        let buf = Buffer::from(vec![1, 2, 3, 4, 5, 6, 7, 8]);
        buf.swap16().unwrap();
        assert_eq!(buf.to_vec(), vec![2, 1, 4, 3, 6, 5, 8, 7]);
        buf.swap16().unwrap().swap32().unwrap();
        assert_eq!(buf.to_vec(), vec![4, 3, 2, 1, 8, 7, 6, 5]);
        buf.swap32().unwrap().swap64().unwrap();
        assert_eq!(buf.to_vec(), vec![8, 7, 6, 5, 4, 3, 2, 1]);
    }

    #[test]
    fn test_swap_rejects_partial_group() {
        let buf = Buffer::from(vec![1, 2, 3]);
        assert!(matches!(
            buf.swap16().unwrap_err(),
            BufferError::Misaligned { group: 2, length: 3 }
        ));
        assert_eq!(buf.to_vec(), vec![1, 2, 3]);
        assert!(Buffer::from(vec![0; 6]).swap32().is_err());
        assert!(Buffer::from(vec![0; 12]).swap64().is_err());
    }
}
