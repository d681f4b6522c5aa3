//! Arena allocation for front-end data structures.
//!
//! Every core structure in this crate — the Robin Hood hash table, trie
//! nodes, token buffers, copied lexeme bytes — is allocated out of a
//! single [`Zone`] scoped to one compilation unit. Nothing is freed
//! individually; the whole arena is dropped at once when the unit is
//! done. This mirrors a bump/region allocator: allocation is a pointer
//! bump, and "rehash"-style reallocation simply abandons the old
//! backing in the arena rather than freeing it.
//!
//! # Examples
//!
//! ```
//! use faxc_util::arena::Zone;
//!
//! let zone = Zone::new();
//! let slice: &mut [u32] = zone.alloc_slice_fill_with(4, |i| i as u32);
//! assert_eq!(slice, &[0, 1, 2, 3]);
//! ```

use bumpalo::Bump;

/// A bump-allocated region backing all core data structures for one
/// compilation unit.
///
/// `Zone` never frees individual allocations. Dropping it releases
/// everything at once.
#[derive(Default)]
pub struct Zone {
    bump: Bump,
}

impl Zone {
    /// Creates a new, empty zone.
    pub fn new() -> Self {
        Self { bump: Bump::new() }
    }

    /// Creates a zone that pre-reserves at least `bytes` of capacity.
    pub fn with_capacity(bytes: usize) -> Self {
        Self {
            bump: Bump::with_capacity(bytes),
        }
    }

    /// Allocates a single value in the zone and returns a mutable
    /// reference to it, valid for the zone's lifetime.
    pub fn alloc<T>(&self, value: T) -> &mut T {
        self.bump.alloc(value)
    }

    /// Allocates a slice of `len` elements, each produced by `f(index)`.
    pub fn alloc_slice_fill_with<T, F>(&self, len: usize, f: F) -> &mut [T]
    where
        F: FnMut(usize) -> T,
    {
        self.bump.alloc_slice_fill_with(len, f)
    }

    /// Copies a `str` into the zone and returns a reference to the copy.
    pub fn alloc_str(&self, s: &str) -> &mut str {
        self.bump.alloc_str(s)
    }

    /// Copies a byte slice into the zone and returns a reference to the copy.
    pub fn alloc_bytes(&self, bytes: &[u8]) -> &mut [u8] {
        self.bump.alloc_slice_copy(bytes)
    }

    /// Total bytes currently allocated from the underlying chunks.
    pub fn allocated_bytes(&self) -> usize {
        self.bump.allocated_bytes()
    }

    /// Direct access to the underlying bump allocator, for callers that
    /// need bumpalo APIs not re-exposed here (e.g. `alloc_slice_copy`
    /// for a `Copy` type via a different constructor).
    pub fn bump(&self) -> &Bump {
        &self.bump
    }
}
