//! Bounds-safe primitive reads over a raw level blob.
//!
//! Every read degrades to a zero value instead of failing when the requested
//! bytes fall outside the buffer. The locators probe far past valid data, so
//! an out-of-range read is routine, not an error.

use encoding_rs::UTF_8;

use super::layout::{WORD, header};
use crate::level::Vec3;

/// Round to 4 decimal places (the precision positions are compared at)
pub fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Round to 2 decimal places
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Align an offset up to the next 4-byte boundary
pub fn align4(offset: usize) -> usize {
    offset.div_ceil(WORD) * WORD
}

/// Read-only view over one serialized level object
#[derive(Debug, Clone, Copy)]
pub struct BlobReader<'a> {
    data: &'a [u8],
}

impl<'a> BlobReader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn bytes(&self) -> &'a [u8] {
        self.data
    }

    fn word(&self, offset: usize) -> Option<[u8; 4]> {
        let end = offset.checked_add(WORD)?;
        self.data.get(offset..end)?.try_into().ok()
    }

    /// Little-endian i32, or 0 when out of range
    pub fn read_i32(&self, offset: usize) -> i32 {
        self.word(offset).map(i32::from_le_bytes).unwrap_or(0)
    }

    /// Little-endian f32 widened to f64, or 0.0 when out of range
    pub fn read_f32(&self, offset: usize) -> f64 {
        self.word(offset)
            .map(|b| f32::from_le_bytes(b) as f64)
            .unwrap_or(0.0)
    }

    /// Three consecutive floats, each rounded to 4 decimals
    pub fn read_vec3(&self, offset: usize) -> Vec3 {
        Vec3 {
            x: round4(self.read_f32(offset)),
            y: round4(self.read_f32(offset + WORD)),
            z: round4(self.read_f32(offset + WORD * 2)),
        }
    }

    /// Length-prefixed UTF-8 string.
    ///
    /// Returns the decoded string and the 4-byte-aligned offset just past the
    /// field. A length outside `(0, 500]` yields an empty string and the
    /// offset right after the length prefix.
    pub fn read_string(&self, offset: usize) -> (String, usize) {
        let length = self.read_i32(offset);
        let start = offset + WORD;
        if length <= 0 || length > header::MAX_STRING_LEN {
            return (String::new(), start);
        }

        let end = start + length as usize;
        let bytes = &self.data[start.min(self.data.len())..end.min(self.data.len())];
        let (decoded, _) = UTF_8.decode_without_bom_handling(bytes);
        (decoded.into_owned(), align4(end))
    }
}
