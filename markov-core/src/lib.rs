//! Order-K Markov model library.
//!
//! This crate builds a character-level Markov model of a source text:
//! - For every kgram (K consecutive characters) it records the characters
//!   observed immediately after each occurrence, duplicates retained
//! - Next-character sampling follows the empirical distribution
//! - Query methods cover the first kgram, the distinct kgram set,
//!   a uniformly random kgram and frequency-proportional next characters
//!
//! Only the high-level API is exposed publicly. Low-level components
//! are kept internal to ensure consistency and prevent misuse.

/// Core Markov model and sampling logic.
///
/// This module exposes the model interface while keeping internal
/// representations private.
pub mod model;

/// I/O utilities (file loading).
///
/// Not exposed
pub(crate) mod io;
