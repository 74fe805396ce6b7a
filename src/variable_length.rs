//! Encoders for the WOFF2 variable length integer types: 255UInt16 and UIntBase128

use arrayvec::ArrayVec;
use bytes::BufMut;

use crate::error::PackError;

/// Lowest value that needs an escape byte
const LOWEST_U_CODE: u32 = 253;

/// Encode a value as a 255UInt16
///
/// Based on section 6.1.1 of the MicroType Express draft spec. Values of
/// 762 and above are stored as a plain 2-byte big-endian word.
pub fn encode_255_u16(value: u32) -> Result<ArrayVec<u8, 2>, PackError> {
    let mut packed: ArrayVec<u8, 2> = ArrayVec::new();
    if value < 253 {
        packed.push(value as u8);
    } else if value < 506 {
        packed.push(255);
        packed.push((value - LOWEST_U_CODE) as u8);
    } else if value < 762 {
        packed.push(254);
        packed.push((value - LOWEST_U_CODE * 2) as u8);
    } else if value < 65536 {
        packed.push((value >> 8) as u8);
        packed.push((value & 0xff) as u8);
    } else {
        return Err(PackError::Value255OutOfRange(value));
    }
    Ok(packed)
}

/// Number of base-128 groups needed to store `value`
fn base128_size(value: u32) -> usize {
    let mut size: usize = 1;
    let mut value = value;
    while value >= 128 {
        value >>= 7;
        size += 1;
    }
    size
}

/// Encode a value as a UIntBase128
///
/// Minimal-length big-endian base-128 groups, most significant first.
/// Every byte except the last has its high bit set.
pub fn encode_base128(value: u32) -> ArrayVec<u8, 5> {
    let size = base128_size(value);
    let mut packed: ArrayVec<u8, 5> = ArrayVec::new();
    for i in 0..size {
        let mut b: u8 = ((value >> (7 * (size - i - 1))) & 0x7f) as u8;
        if i < size - 1 {
            b |= 0x80;
        }
        packed.push(b);
    }
    packed
}

/// Extension trait to write variable length integers to a [`BufMut`]
pub trait BufMutVariableExt: BufMut {
    fn put_255_u16(&mut self, value: u32) -> Result<(), PackError> {
        for byte in encode_255_u16(value)? {
            self.put_u8(byte);
        }
        Ok(())
    }

    fn put_base128(&mut self, value: u32) {
        for byte in encode_base128(value) {
            self.put_u8(byte);
        }
    }
}

impl<B: BufMut> BufMutVariableExt for B {}
