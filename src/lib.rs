//! # pdf-flags – typed rendering options for an HTML → PDF renderer
//!
//! The renderer is an external executable driven entirely by its command
//! line. This crate models its settings as a typed record and serializes
//! that record into the exact argument string the renderer expects:
//!
//! 1. **Model** – fill in a [`ConvertOptions`] ([`options`]), optionally
//!    copied from a shared base configuration.
//! 2. **Tag** – every field is paired with its renderer flag in a static
//!    table ([`flags`]); [`Margins`] carry a table of their own ([`margins`]).
//! 3. **Serialize** – walk the tables, margins first, into a token list or
//!    a single space-separated string ([`serializer`]).
//!
//! A C-compatible FFI surface is exposed via the [`ffi`] module.

pub mod error;
pub mod ffi;
pub mod flags;
pub mod margins;
pub mod options;
pub mod serializer;

// Re-exports for convenience
pub use error::OptionsError;
pub use flags::{FlagSet, FlagValue, OptionFlag};
pub use margins::Margins;
pub use options::{ConvertOptions, OptionWarning, Orientation, PageSize, CONTENT_TYPE};
pub use serializer::{to_args, to_tokens};
