//! Pipeline stages for HTML-to-LaTeX conversion.
//!
//! Each submodule implements exactly one step. Only [`input`] and [`write`]
//! touch the network or the file system; the three middle stages are pure
//! and infallible.
//!
//! ## Data Flow
//!
//! ```text
//! input ──▶ transform ──▶ document ──▶ write
//! (URL/path)  (html5ever)   (fragments)  (file/stream)
//!                 │
//!                 └── escape (all handout text)
//! ```
//!
//! 1. [`input`]     - fetch the handout over HTTP(S) or read it from disk
//! 2. [`transform`] - state machine over tag/text events that finds problem
//!    headers and turns the paragraph after each into a section body
//! 3. [`document`]  - ordered LaTeX fragment list with one append operation
//!    per construct
//! 4. [`escape`]    - LaTeX-special character substitution
//! 5. [`write`]     - concatenate fragments into the output sink

pub mod document;
pub mod escape;
pub mod input;
pub mod transform;
pub mod write;
