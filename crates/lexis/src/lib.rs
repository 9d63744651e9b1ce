//! Hunspell-compatible spellchecking engine.
//!
//! Built on the two dictionary inputs parsed by `lexis-aff`, this crate
//! answers the two questions a spellchecker is asked: is a word spelled
//! correctly, and what was probably meant instead.
//!
//! # Architecture
//!
//! - [`handle`] -- the public entry point: owns the parsed tables and
//!   exposes `check` / `suggest` / `stems` / `data`
//! - `lookup` -- acceptance: affix decomposition, form validation, and
//!   the two compounding regimes
//! - `suggest` -- correction search: edit permutators validated through
//!   the lookup pipeline, then n-gram and phonetic similarity ranking
//!
//! The engine is immutable after construction; queries share it freely.

pub mod handle;
mod lookup;
mod suggest;

pub use handle::{LexisError, LexisHandle, LookupResult};

/// Words longer than this are rejected outright rather than analyzed.
pub(crate) const MAX_WORD_LEN: usize = 100;
