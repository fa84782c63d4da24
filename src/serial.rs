//! Utilities for serialization.
//!
//! Integers cross the wire big-endian and lengths as 64-bit words, matching
//! the byte order of the node records of a serialized trie.
#![cfg(target_pointer_width = "64")]

use std::io::{Read, Write};
use std::mem::size_of;

use anyhow::Result;

/// Trait to serialize/deserialize data structures.
///
/// # Examples
///
/// ```
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// use zfast::{BitVector, Serializable};
///
/// let bv = BitVector::from_bits([true, false, false, true]);
///
/// let mut bytes = vec![];
/// let size = bv.serialize_into(&mut bytes)?;
/// let other = BitVector::deserialize_from(&bytes[..])?;
///
/// assert_eq!(bv, other);
/// assert_eq!(size, bytes.len());
/// assert_eq!(size, bv.size_in_bytes());
/// # Ok(())
/// # }
/// ```
pub trait Serializable: Sized {
    /// Serializes the data structure into `writer`, returning the number of
    /// written bytes.
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize>;

    /// Deserializes the data structure from `reader`.
    fn deserialize_from<R: Read>(reader: R) -> Result<Self>;

    /// Returns the number of bytes the serialized form takes.
    fn size_in_bytes(&self) -> usize;
}

impl Serializable for u8 {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_all(&[*self])?;
        Ok(size_of::<Self>())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = [0; 1];
        reader.read_exact(&mut buf)?;
        Ok(buf[0])
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<Self>()
    }
}

impl Serializable for u64 {
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        writer.write_all(&self.to_be_bytes())?;
        Ok(size_of::<Self>())
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let mut buf = [0; size_of::<Self>()];
        reader.read_exact(&mut buf)?;
        Ok(Self::from_be_bytes(buf))
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<Self>()
    }
}

impl Serializable for usize {
    /// Lengths and counts are written as 64-bit words.
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        (*self as u64).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        u64::deserialize_from(reader).map(|x| x as usize)
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<u64>()
    }
}

impl Serializable for bool {
    /// A single flag byte, 0 or 1.
    fn serialize_into<W: Write>(&self, writer: W) -> Result<usize> {
        (*self as u8).serialize_into(writer)
    }

    fn deserialize_from<R: Read>(reader: R) -> Result<Self> {
        u8::deserialize_from(reader).map(|x| x != 0)
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<u8>()
    }
}

impl Serializable for Vec<u64> {
    /// A word count followed by the words themselves.
    fn serialize_into<W: Write>(&self, mut writer: W) -> Result<usize> {
        let mut mem = self.len().serialize_into(&mut writer)?;
        for &word in self {
            mem += word.serialize_into(&mut writer)?;
        }
        Ok(mem)
    }

    fn deserialize_from<R: Read>(mut reader: R) -> Result<Self> {
        let len = usize::deserialize_from(&mut reader)?;
        let mut words = Self::with_capacity(len);
        for _ in 0..len {
            words.push(u64::deserialize_from(&mut reader)?);
        }
        Ok(words)
    }

    fn size_in_bytes(&self) -> usize {
        size_of::<u64>() * (self.len() + 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_big_endian_layout() {
        let mut bytes = vec![];
        0x0102_0304_0506_0708u64.serialize_into(&mut bytes).unwrap();
        assert_eq!(bytes, [1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_word_vector_round_trip() {
        let words = vec![3u64, 0, u64::MAX];
        let mut bytes = vec![];
        let size = words.serialize_into(&mut bytes).unwrap();
        assert_eq!(size, bytes.len());
        assert_eq!(size, words.size_in_bytes());
        assert_eq!(Vec::<u64>::deserialize_from(&bytes[..]).unwrap(), words);
    }

    #[test]
    fn test_truncated_word_errors() {
        let mut bytes = vec![];
        vec![7u64; 4].serialize_into(&mut bytes).unwrap();
        assert!(Vec::<u64>::deserialize_from(&bytes[..bytes.len() - 1]).is_err());
    }
}
