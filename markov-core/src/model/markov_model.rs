use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use rand::Rng;

use crate::io;
use super::error::ModelError;
use super::successors::Successors;

pub use super::successors::NO_SUCCESSOR;

/// Represents an order-K Markov model of a source text.
///
/// The `MarkovModel` stores, for every kgram (K consecutive characters of
/// the source text), the sequence of characters observed immediately after
/// each occurrence of that kgram, and samples a next character according
/// to the empirical distribution.
///
/// # Responsibilities
/// - Build the model from a source string or a text file
/// - Record the first kgram of the source text
/// - Expose the distinct kgram set and uniform random kgram selection
/// - Sample the next character of a kgram proportionally to frequency
///
/// # Invariants
/// - `order` is always >= 1
/// - Each key in `model` is a distinct kgram of exactly `order` characters
/// - With a source of `len` characters and `len >= order`, the successor
///   sequence lengths sum to `len - order + 1`
/// - The model is never mutated after construction; all queries take `&self`
#[derive(Clone, Debug)]
pub struct MarkovModel {
	/// The order of the model (number of characters in a kgram)
	order: usize, // must be >= 1

	/// Mapping from kgram to its observed successor sequence
	model: HashMap<String, Successors>,

	/// The kgram formed by the first `order` characters of the source,
	/// empty if the source was shorter than `order`
	first_kgram: String,
}

impl MarkovModel {
	/// Creates a new order-K Markov model of `source_text`.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn new(order: usize, source_text: &str) -> Result<Self, ModelError> {
		if order == 0 {
			return Err(ModelError::InvalidOrder);
		}
		let mut model = Self {
			order,
			model: HashMap::new(),
			first_kgram: String::new(),
		};
		model.build(source_text);
		Ok(model)
	}

	/// Creates a new order-K Markov model from the contents of a text file.
	///
	/// # Behavior
	/// - Reads the entire file into memory before building.
	/// - On I/O failure the error is logged and an empty, queryable model
	///   is returned instead of propagating the failure.
	///
	/// # Errors
	/// Returns an error if `order` is 0.
	pub fn from_file<P: AsRef<Path>>(order: usize, filename: P) -> Result<Self, ModelError> {
		if order == 0 {
			return Err(ModelError::InvalidOrder);
		}
		match io::read_file(&filename) {
			Ok(text) => Self::new(order, &text),
			Err(e) => {
				log::error!(
					"Error loading source text {}: {}",
					filename.as_ref().display(),
					e
				);
				Self::new(order, "")
			}
		}
	}

	/// Builds the model by sliding a window of `order` characters over the
	/// source text.
	///
	/// For each start offset, the kgram is the window content and the
	/// recorded successor is the character right after the window, or
	/// [`NO_SUCCESSOR`] when the window ends the text.
	///
	/// # Notes
	/// - UTF-8 safe: iterates over characters, not bytes.
	/// - Sources shorter than `order` produce an empty model.
	fn build(&mut self, source_text: &str) {
		let chars: Vec<char> = source_text.chars().collect();
		if chars.len() < self.order {
			// Source too short, no kgram to record
			return;
		}

		// For each kgram occurrence in the source text
		for i in 0..=chars.len() - self.order {
			let kgram: String = chars[i..i + self.order].iter().collect();
			let next_char = chars.get(i + self.order).copied().unwrap_or(NO_SUCCESSOR);

			if i == 0 {
				self.first_kgram = kgram.clone();
			}

			self.model
				.entry(kgram)
				.or_insert_with(Successors::new)
				.record(next_char);
		}
	}

	/// Returns the order K of the model.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Returns the first kgram found in the source text.
	///
	/// Returns the empty string if the source was shorter than `order`.
	pub fn first_kgram(&self) -> &str {
		&self.first_kgram
	}

	/// Returns the distinct kgrams of the source text.
	///
	/// Iteration order is not significant and must not be relied upon.
	pub fn kgrams(&self) -> impl Iterator<Item = &str> {
		self.model.keys().map(String::as_str)
	}

	/// Returns the number of distinct kgrams in the model.
	pub fn len(&self) -> usize {
		self.model.len()
	}

	/// Returns `true` if the model contains no kgram.
	pub fn is_empty(&self) -> bool {
		self.model.is_empty()
	}

	/// Returns a kgram chosen uniformly at random among the distinct
	/// kgrams of the model.
	///
	/// # Errors
	/// Returns an error if the model is empty.
	pub fn random_kgram(&self) -> Result<&str, ModelError> {
		self.random_kgram_with(&mut rand::rng())
	}

	/// Same as [`random_kgram`](Self::random_kgram), drawing from the
	/// supplied generator. Useful for deterministic sampling in tests.
	///
	/// # Errors
	/// Returns an error if the model is empty.
	pub fn random_kgram_with<R: Rng>(&self, rng: &mut R) -> Result<&str, ModelError> {
		if self.model.is_empty() {
			return Err(ModelError::EmptyModel);
		}
		let index = random_index(rng, 0, self.model.len() - 1)?;
		// Should not panic, index < number of keys
		Ok(self.model.keys().nth(index).map(String::as_str).unwrap())
	}

	/// Returns a single character that follows the given kgram in the
	/// source text, selected according to the probability distribution of
	/// all characters observed after that kgram.
	///
	/// # Errors
	/// Returns an error only through the fallback path, when the model
	/// itself is empty.
	pub fn next_char(&self, kgram: &str) -> Result<char, ModelError> {
		self.next_char_with(kgram, &mut rand::rng())
	}

	/// Same as [`next_char`](Self::next_char), drawing from the supplied
	/// generator.
	///
	/// # Behavior
	/// - A kgram with recorded successors samples uniformly over the full
	///   recording, so more frequent successors are more likely. The
	///   recording may include [`NO_SUCCESSOR`] for occurrences that ended
	///   the source text.
	/// - An unknown kgram, or one whose recording holds no real successor,
	///   falls back to the first character of a random kgram. This is a
	///   deliberate policy kept for compatibility, not an error: callers
	///   depend on always receiving some character.
	///
	/// # Errors
	/// Returns an error only through the fallback path, when the model
	/// itself is empty.
	pub fn next_char_with<R: Rng>(&self, kgram: &str, rng: &mut R) -> Result<char, ModelError> {
		match self.model.get(kgram) {
			Some(successors) if successors.has_real_successor() => {
				let index = random_index(rng, 0, successors.len() - 1)?;
				// Should not panic, index < recorded length
				Ok(successors.get(index).unwrap())
			}
			_ => {
				let fallback = self.random_kgram_with(rng)?;
				// Should not panic, kgrams hold at least one character
				Ok(fallback.chars().next().unwrap())
			}
		}
	}
}

impl fmt::Display for MarkovModel {
	/// Renders the full kgram-to-successors mapping, keys sorted for a
	/// stable debugging dump.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let mut entries: Vec<(&str, &Successors)> = self
			.model
			.iter()
			.map(|(kgram, successors)| (kgram.as_str(), successors))
			.collect();
		entries.sort_by(|a, b| a.0.cmp(b.0));

		write!(f, "{{")?;
		for (i, (kgram, successors)) in entries.iter().enumerate() {
			if i > 0 {
				write!(f, ", ")?;
			}
			write!(f, "{}={}", kgram, successors)?;
		}
		write!(f, "}}")
	}
}

/// Draws a uniformly distributed integer in the closed range `[min, max]`.
///
/// # Errors
/// Returns an error if `min > max` or if the range size overflows `usize`.
fn random_index<R: Rng>(rng: &mut R, min: usize, max: usize) -> Result<usize, ModelError> {
	if min > max || (max - min).checked_add(1).is_none() {
		return Err(ModelError::InvalidRange { min, max });
	}
	Ok(rng.random_range(min..=max))
}

#[cfg(test)]
mod tests {
	use std::collections::HashSet;

	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;

	fn rng() -> StdRng {
		StdRng::seed_from_u64(42)
	}

	#[test]
	fn order_one_model_of_abcde() {
		let model = MarkovModel::new(1, "ABCDE").unwrap();

		let kgrams: HashSet<&str> = model.kgrams().collect();
		assert_eq!(kgrams, HashSet::from(["A", "B", "C", "D", "E"]));
		assert_eq!(model.first_kgram(), "A");

		let mut rng = rng();
		assert_eq!(model.next_char_with("A", &mut rng).unwrap(), 'B');
		assert_eq!(model.next_char_with("B", &mut rng).unwrap(), 'C');
		assert_eq!(model.next_char_with("C", &mut rng).unwrap(), 'D');
		assert_eq!(model.next_char_with("D", &mut rng).unwrap(), 'E');
	}

	#[test]
	fn order_two_model_of_handout_text() {
		let model = MarkovModel::new(2, "agggcagcgggcg").unwrap();

		let kgrams: HashSet<&str> = model.kgrams().collect();
		assert_eq!(kgrams, HashSet::from(["ag", "gg", "gc", "ca", "cg"]));
		assert_eq!(model.first_kgram(), "ag");
		assert_eq!(model.to_string(), "{ag=gc, ca=g, cg=g\\0, gc=agg, gg=gcgc}");
	}

	#[test]
	fn successor_counts_sum_to_occurrence_count() {
		let text = "Adam is the absolute best person in the whole wide world";
		for order in 1..=5 {
			let model = MarkovModel::new(order, text).unwrap();
			let expected = text.chars().count() - order + 1;
			assert_eq!(occurrences(&model), expected);
		}
	}

	/// Sums the recorded successor-sequence lengths of a model.
	fn occurrences(model: &MarkovModel) -> usize {
		model.model.values().map(Successors::len).sum()
	}

	#[test]
	fn source_shorter_than_order_builds_empty_model() {
		let model = MarkovModel::new(5, "abc").unwrap();
		assert!(model.is_empty());
		assert_eq!(model.len(), 0);
		assert_eq!(model.first_kgram(), "");
		assert_eq!(model.kgrams().count(), 0);
	}

	#[test]
	fn order_zero_is_rejected() {
		assert_eq!(MarkovModel::new(0, "abc").unwrap_err(), ModelError::InvalidOrder);
		assert_eq!(
			MarkovModel::from_file(0, "whatever.txt").unwrap_err(),
			ModelError::InvalidOrder
		);
	}

	#[test]
	fn random_kgram_returns_a_member_of_the_key_set() {
		let model = MarkovModel::new(2, "agggcagcgggcg").unwrap();
		let kgrams: HashSet<&str> = model.kgrams().collect();

		let mut rng = rng();
		for _ in 0..50 {
			let kgram = model.random_kgram_with(&mut rng).unwrap();
			assert!(kgrams.contains(kgram));
		}
	}

	#[test]
	fn random_kgram_on_empty_model_fails() {
		let model = MarkovModel::new(3, "ab").unwrap();
		let mut rng = rng();
		assert_eq!(
			model.random_kgram_with(&mut rng).unwrap_err(),
			ModelError::EmptyModel
		);
	}

	#[test]
	fn next_char_stays_inside_the_recorded_successors() {
		let model = MarkovModel::new(2, "agggcagcgggcg").unwrap();

		let mut rng = rng();
		for _ in 0..50 {
			let c = model.next_char_with("gg", &mut rng).unwrap();
			assert!(c == 'g' || c == 'c');
		}
	}

	#[test]
	fn next_char_can_return_the_sentinel_from_a_mixed_recording() {
		// "a" occurs twice: once followed by 'a', once ending the text.
		let model = MarkovModel::new(1, "aa").unwrap();

		let mut rng = rng();
		let mut seen = HashSet::new();
		for _ in 0..100 {
			seen.insert(model.next_char_with("a", &mut rng).unwrap());
		}
		assert!(seen.is_subset(&HashSet::from(['a', NO_SUCCESSOR])));
	}

	#[test]
	fn next_char_falls_back_on_unknown_kgram() {
		let model = MarkovModel::new(2, "agggcagcgggcg").unwrap();
		let first_chars: HashSet<char> = model
			.kgrams()
			.map(|kgram| kgram.chars().next().unwrap())
			.collect();

		let mut rng = rng();
		for _ in 0..50 {
			let c = model.next_char_with("zz", &mut rng).unwrap();
			assert!(first_chars.contains(&c));
		}
	}

	#[test]
	fn next_char_falls_back_when_only_the_sentinel_was_recorded() {
		// Single kgram covering the whole text, its only successor is the
		// sentinel, so the fallback returns the kgram's own first character.
		let model = MarkovModel::new(5, "ABCDE").unwrap();
		let mut rng = rng();
		assert_eq!(model.next_char_with("ABCDE", &mut rng).unwrap(), 'A');
	}

	#[test]
	fn multibyte_characters_are_counted_as_single_characters() {
		let model = MarkovModel::new(1, "ééé").unwrap();
		assert_eq!(model.len(), 1);
		assert_eq!(model.first_kgram(), "é");
		assert_eq!(occurrences(&model), 3);
	}

	#[test]
	fn missing_file_degrades_to_an_empty_model() {
		let model = MarkovModel::from_file(2, "no/such/source.txt").unwrap();
		assert!(model.is_empty());
		assert_eq!(model.first_kgram(), "");
	}

	#[test]
	fn random_index_rejects_inverted_ranges() {
		let mut rng = rng();
		assert_eq!(
			random_index(&mut rng, 3, 2).unwrap_err(),
			ModelError::InvalidRange { min: 3, max: 2 }
		);
	}

	#[test]
	fn random_index_rejects_ranges_whose_size_overflows() {
		let mut rng = rng();
		assert_eq!(
			random_index(&mut rng, 0, usize::MAX).unwrap_err(),
			ModelError::InvalidRange { min: 0, max: usize::MAX }
		);
	}

	#[test]
	fn random_index_covers_the_closed_range() {
		let mut rng = rng();
		for _ in 0..50 {
			let index = random_index(&mut rng, 2, 4).unwrap();
			assert!((2..=4).contains(&index));
		}
		assert_eq!(random_index(&mut rng, 7, 7).unwrap(), 7);
	}
}
