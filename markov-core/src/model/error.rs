use thiserror::Error;

/// Errors that can occur while building or querying a Markov model.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ModelError {
	/// The model order must be at least 1.
	#[error("order must be >= 1")]
	InvalidOrder,

	/// A random kgram was requested from a model with no kgrams.
	#[error("empty model: no kgram to sample")]
	EmptyModel,

	/// A random index was requested over an invalid closed range.
	#[error("invalid range: [{min}, {max}]")]
	InvalidRange {
		/// Lower bound of the requested range (inclusive).
		min: usize,
		/// Upper bound of the requested range (inclusive).
		max: usize,
	},
}
