//! Source text storage and location resolution.
//!
//! [`Location`] is the core data model's address into source text: a
//! plain 32-bit offset, with `0xFFFFFFFF` reserved as "invalid". It
//! carries no file or line information of its own — resolving one to
//! human-readable coordinates is the job of [`SourceRegistry`], kept
//! deliberately external to the token/hash-table core so that core
//! data structures never need to borrow from, or even know about, the
//! files they came from.
//!
//! `SourceRegistry` divides each loaded buffer into fixed `4096`-byte
//! chunks and encodes a `Location` as `(chunk_index << 12) | offset`.
//! This lets every location stay a `u32` regardless of how many files
//! are loaded or how large any one of them is, at the cost of an
//! indirection through the chunk table on every resolution.

use std::fmt;

const CHUNK_BITS: u32 = 12;
const CHUNK_SIZE: u32 = 1 << CHUNK_BITS;
const CHUNK_MASK: u32 = CHUNK_SIZE - 1;

/// An offset into source text registered with a [`SourceRegistry`].
///
/// # Examples
///
/// ```
/// use faxc_util::source::Location;
///
/// assert!(Location::INVALID.is_invalid());
/// let loc = Location::from_raw(10) + 5;
/// assert_eq!(loc.raw(), 15);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Location(u32);

impl Location {
    /// The sentinel value denoting "no location".
    pub const INVALID: Location = Location(0xFFFF_FFFF);

    #[inline]
    pub const fn from_raw(value: u32) -> Self {
        Location(value)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }

    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl std::ops::Add<u32> for Location {
    type Output = Location;

    #[inline]
    fn add(self, offset: u32) -> Location {
        Location(self.0 + offset)
    }
}

impl fmt::Debug for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_invalid() {
            write!(f, "Location(invalid)")
        } else {
            write!(f, "Location({})", self.0)
        }
    }
}

struct Chunk {
    file_path: std::rc::Rc<str>,
    file_text: std::rc::Rc<str>,
    chunk_offset: u32,
}

/// Owns loaded source buffers and maps [`Location`]s back to file
/// path, raw text, and line/column coordinates.
///
/// Buffers are registered once via [`SourceRegistry::load_from_buffer`]
/// and never mutated afterward, so resolution never has to worry about
/// a location outliving the text it points into.
pub struct SourceRegistry {
    chunks: Vec<Chunk>,
}

impl SourceRegistry {
    pub fn new() -> Self {
        Self { chunks: Vec::new() }
    }

    /// Registers `text` under `path`, returning the `Location` of its
    /// first byte. Every subsequent byte is addressable as
    /// `location + offset` up to `text.len()`.
    pub fn load_from_buffer(&mut self, path: impl Into<String>, text: impl Into<String>) -> Location {
        let path: std::rc::Rc<str> = std::rc::Rc::from(path.into().into_boxed_str());
        let text: std::rc::Rc<str> = std::rc::Rc::from(text.into().into_boxed_str());
        let base = (self.chunks.len() as u32) * CHUNK_SIZE;
        let len = text.len() as u32;
        let mut offset = 0u32;
        loop {
            self.chunks.push(Chunk {
                file_path: path.clone(),
                file_text: text.clone(),
                chunk_offset: offset,
            });
            offset += CHUNK_SIZE;
            if offset >= len {
                break;
            }
        }
        Location::from_raw(base)
    }

    fn resolve(&self, location: Location) -> Option<(&Chunk, usize)> {
        if location.is_invalid() {
            return None;
        }
        let index = (location.raw() >> CHUNK_BITS) as usize;
        let chunk = self.chunks.get(index)?;
        let within_chunk = (location.raw() & CHUNK_MASK) as usize;
        let byte_offset = chunk.chunk_offset as usize + within_chunk;
        Some((chunk, byte_offset))
    }

    /// The source text starting at `location`, through the end of its
    /// file.
    pub fn get_source(&self, location: Location) -> &str {
        match self.resolve(location) {
            None => "<Invalid location>",
            Some((chunk, byte_offset)) => &chunk.file_text[byte_offset.min(chunk.file_text.len())..],
        }
    }

    /// The file path a location was loaded under.
    pub fn get_file_path(&self, location: Location) -> &str {
        match self.resolve(location) {
            None => "<Invalid location>",
            Some((chunk, _)) => &chunk.file_path,
        }
    }

    /// The full line of text containing `location`, with no trailing
    /// newline.
    pub fn get_line(&self, location: Location) -> &str {
        let Some((chunk, byte_offset)) = self.resolve(location) else {
            return "<Invalid location>";
        };
        let text = chunk.file_text.as_bytes();
        let byte_offset = byte_offset.min(text.len().saturating_sub(1));
        let mut start = byte_offset;
        while start > 0 && text[start - 1] != b'\n' && text[start - 1] != b'\r' {
            start -= 1;
        }
        let mut end = byte_offset;
        while end < text.len() && text[end] != b'\n' && text[end] != b'\r' {
            end += 1;
        }
        std::str::from_utf8(&text[start..end]).unwrap_or("")
    }

    /// Computes 1-based `(line, column)` for a location by scanning
    /// from the start of its file. Intended for diagnostic formatting,
    /// not hot-path use.
    pub fn line_column(&self, location: Location) -> (u32, u32) {
        let Some((chunk, byte_offset)) = self.resolve(location) else {
            return (0, 0);
        };
        let text = chunk.file_text.as_bytes();
        let byte_offset = byte_offset.min(text.len());
        let mut line = 1u32;
        let mut column = 1u32;
        for &b in &text[..byte_offset] {
            if b == b'\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }
        (line, column)
    }
}

impl Default for SourceRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_location_round_trips() {
        assert!(Location::INVALID.is_invalid());
        assert!(!Location::from_raw(0).is_invalid());
    }

    #[test]
    fn load_and_get_source_single_chunk() {
        let mut reg = SourceRegistry::new();
        let loc = reg.load_from_buffer("a.fax", "hello world");
        assert_eq!(reg.get_source(loc), "hello world");
        assert_eq!(reg.get_file_path(loc), "a.fax");
    }

    #[test]
    fn location_plus_offset_addresses_mid_buffer() {
        let mut reg = SourceRegistry::new();
        let loc = reg.load_from_buffer("a.fax", "hello world");
        assert_eq!(reg.get_source(loc + 6), "world");
    }

    #[test]
    fn get_line_finds_bounds_without_newline() {
        let mut reg = SourceRegistry::new();
        let loc = reg.load_from_buffer("a.fax", "a\nbcd\ne");
        let mid = loc + 3; // 'c'
        assert_eq!(reg.get_line(mid), "bcd");
    }

    #[test]
    fn line_column_tracks_newlines() {
        let mut reg = SourceRegistry::new();
        let loc = reg.load_from_buffer("a.fax", "a\nbcd\ne");
        assert_eq!(reg.line_column(loc), (1, 1));
        assert_eq!(reg.line_column(loc + 3), (2, 2));
    }

    #[test]
    fn resolution_across_multiple_files() {
        let mut reg = SourceRegistry::new();
        let first = reg.load_from_buffer("a.fax", "aaa");
        let second = reg.load_from_buffer("b.fax", "bbb");
        assert_eq!(reg.get_source(first), "aaa");
        assert_eq!(reg.get_source(second), "bbb");
        assert_eq!(reg.get_file_path(second), "b.fax");
    }

    #[test]
    fn invalid_location_reports_placeholder() {
        let reg = SourceRegistry::new();
        assert_eq!(reg.get_source(Location::INVALID), "<Invalid location>");
    }
}
