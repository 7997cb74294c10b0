use std::fmt;

/// Sentinel recorded when a kgram occurrence ends the source text and
/// therefore has no successor character.
pub const NO_SUCCESSOR: char = '\u{0}';

/// Represents the successor sequence of a single kgram.
///
/// A `Successors` stores, in occurrence order, the character observed
/// immediately after each occurrence of one kgram in the source text.
/// Duplicates are retained on purpose: a character that followed the
/// kgram more often appears more times, so a uniform draw over the
/// positions samples proportionally to empirical frequency.
///
/// ## Responsibilities
/// - Accumulate observed successor characters during model construction
/// - Expose positional access for uniform sampling by the model
/// - Report whether any real (non-sentinel) successor was observed
///
/// ## Invariants
/// - One entry per occurrence of the kgram in the source text
/// - Entries are either real characters or [`NO_SUCCESSOR`]
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Successors {
	/// Observed next characters, first-to-last occurrence.
	chars: Vec<char>,
}

impl Successors {
	/// Creates an empty successor sequence.
	pub fn new() -> Self {
		Self { chars: Vec::new() }
	}

	/// Records the successor observed for one more occurrence of the kgram.
	///
	/// Pass [`NO_SUCCESSOR`] when the occurrence sits at the very end of
	/// the source text.
	pub fn record(&mut self, next_char: char) {
		self.chars.push(next_char);
	}

	/// Number of recorded occurrences.
	pub fn len(&self) -> usize {
		self.chars.len()
	}

	/// Returns the character recorded at `index`.
	///
	/// Returns `None` if the index is out of bounds.
	pub fn get(&self, index: usize) -> Option<char> {
		self.chars.get(index).copied()
	}

	/// Returns `true` if at least one real (non-sentinel) successor was
	/// observed.
	///
	/// A sequence that is empty or made only of sentinels is considered
	/// exhausted; the model falls back to an unrelated kgram in that case.
	pub fn has_real_successor(&self) -> bool {
		self.chars.iter().any(|c| *c != NO_SUCCESSOR)
	}

	/// Iterates over the recorded successors in occurrence order.
	pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
		self.chars.iter().copied()
	}
}

impl fmt::Display for Successors {
	/// Renders the sequence as a compact string, the sentinel as `\0`.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		for c in &self.chars {
			if *c == NO_SUCCESSOR {
				write!(f, "\\0")?;
			} else {
				write!(f, "{}", c)?;
			}
		}
		Ok(())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_keeps_occurrence_order_and_duplicates() {
		let mut successors = Successors::new();
		successors.record('g');
		successors.record('c');
		successors.record('g');
		successors.record('c');

		assert_eq!(successors.len(), 4);
		assert_eq!(successors.iter().collect::<String>(), "gcgc");
		assert_eq!(successors.get(2), Some('g'));
		assert_eq!(successors.get(4), None);
	}

	#[test]
	fn sentinel_only_sequence_has_no_real_successor() {
		let mut successors = Successors::new();
		assert!(!successors.has_real_successor());

		successors.record(NO_SUCCESSOR);
		assert!(!successors.has_real_successor());

		successors.record('a');
		assert!(successors.has_real_successor());
	}

	#[test]
	fn display_escapes_the_sentinel() {
		let mut successors = Successors::new();
		successors.record('x');
		successors.record(NO_SUCCESSOR);
		assert_eq!(successors.to_string(), "x\\0");
	}
}
