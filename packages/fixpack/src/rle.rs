//! The run-length codec: collapses runs of equal floats into `(value, count)`
//! entries. Its output often feeds the record codecs, which pack the run values
//! far more tightly than 32 bits each.

/// A run of consecutive, bitwise-identical float values.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RunLengthEntry {
	/// The repeated value.
	pub value: f32,
	/// How many consecutive times the value appears.
	pub count: u32
}

/// Collapses `values` into run-length entries, preserving order.
///
/// Runs are detected by bitwise equality of the `f32` representation, so `+0.0`
/// and `-0.0` belong to separate runs. Runs longer than `u32::MAX` split into
/// consecutive entries for the same value.
///
/// The worst case, an input with no runs at all, inflates the data by one
/// `count` per element; callers should only apply this codec when they expect
/// runs.
pub fn rle_encode(values: &[f32]) -> Vec<RunLengthEntry> {
	let mut entries: Vec<RunLengthEntry> = Vec::new();

	for &value in values {
		match entries.last_mut() {
			Some(entry) if entry.value.to_bits() == value.to_bits() && entry.count < u32::MAX => {
				entry.count += 1;
			}
			_ => entries.push(RunLengthEntry { value, count: 1 })
		}
	}

	entries
}

/// Expands run-length entries back into the flat value array they encode. The
/// output holds the sum of all entry counts.
pub fn rle_decode(entries: &[RunLengthEntry]) -> Vec<f32> {
	let mut values = Vec::with_capacity(
		entries
			.iter()
			.map(|entry| entry.count as usize)
			.sum::<usize>()
	);

	for entry in entries {
		values.resize(values.len() + entry.count as usize, entry.value);
	}

	values
}

#[cfg(test)]
mod test {
	use super::*;

	#[test]
	fn runs_collapse_in_order() {
		assert_eq!(
			rle_encode(&[1.0, 1.0, 2.0, 2.0, 2.0, 1.0]),
			[
				RunLengthEntry {
					value: 1.0,
					count: 2
				},
				RunLengthEntry {
					value: 2.0,
					count: 3
				},
				RunLengthEntry {
					value: 1.0,
					count: 1
				}
			]
		);
	}

	#[test]
	fn round_trip_restores_every_element() {
		let values = [0.0, 0.0, -3.5, 7.25, 7.25, 7.25, 0.0];

		assert_eq!(rle_decode(&rle_encode(&values)), values);
	}

	#[test]
	fn signed_zeros_belong_to_separate_runs() {
		let entries = rle_encode(&[0.0, -0.0, -0.0]);

		assert_eq!(entries.len(), 2, "+0.0 and -0.0 collapsed into one run");
		assert_eq!(entries[0].count, 1);
		assert_eq!(entries[1].count, 2);
	}

	#[test]
	fn empty_input_works() {
		assert!(rle_encode(&[]).is_empty());
		assert!(rle_decode(&[]).is_empty());
	}
}
