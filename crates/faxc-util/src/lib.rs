//! Core data structures shared by the front-end: arena allocation, the
//! zone-backed Robin Hood hash table and its typed façades, a byte-keyed
//! trie, source location bookkeeping, and diagnostic reporting.
//!
//! Everything here is a leaf or near-leaf dependency for [`faxc-lex`]'s
//! scanner — nothing in this crate knows about tokens, strings, or
//! interning. It supplies the associative-container and allocation
//! primitives the scanner (and, eventually, later compiler phases) build
//! on top of.

pub mod arena;
pub mod collections;
pub mod diagnostic;
pub mod robin_hood;
pub mod source;
pub mod trie;

pub use arena::Zone;
pub use collections::{HashMap, HashSet};
pub use diagnostic::{Diagnostic, DiagnosticBuilder, DiagnosticCode, Handler, Level};
pub use robin_hood::{RawKey, RobinHoodTable};
pub use source::{Location, SourceRegistry};
pub use trie::TrieNode;
