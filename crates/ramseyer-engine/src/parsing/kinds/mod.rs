//! # Atom Kinds
//!
//! Kinds that own their syntax delimiters. The parser refers to these
//! constants and never hardcodes `[` or `]`.

pub mod citation;

pub use citation::Citation;
