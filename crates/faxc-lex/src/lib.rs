//! Lexical front-end: the punctuation/identifier/number tries, the
//! streaming scanner, the bracket-balance stack it reconciles against,
//! and the read cursor a parser drives over the finished token array.
//!
//! Everything downstream of a raw source buffer — interning, source
//! location resolution, diagnostic rendering — is reached only through
//! [`builder::Builder`]; this crate never owns a string table or a file
//! handle itself.

pub mod bracket_stack;
pub mod builder;
pub mod scanner;
pub mod stream;
pub mod token;

pub use bracket_stack::BracketMarker;
pub use builder::{Builder, HandlerBuilder, SimpleBuilder, TerminalData};
pub use scanner::Scanner;
pub use stream::TokenStream;
pub use token::{TokenInfo, TokenKind};
