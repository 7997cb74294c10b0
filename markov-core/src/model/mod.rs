//! Top-level module for the Markov model system.
//!
//! This crate provides a character-level order-K Markov model, including:
//! - The model itself (`MarkovModel`)
//! - Internal successor-sequence storage (`Successors`)
//! - Error types (`ModelError`)

/// Order-K Markov model over a source text.
///
/// Exposes construction from a string or a file, kgram queries and
/// probabilistic next-character sampling with optional caller-supplied
/// random generators.
pub mod markov_model;

/// Error types for model construction and sampling.
pub mod error;

/// Internal representation of the successor sequence of a single kgram.
///
/// Tracks observed next characters in occurrence order. This module is
/// not exposed publicly.
mod successors;
