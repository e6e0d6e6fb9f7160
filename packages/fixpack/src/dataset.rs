//! Helpers for locating and loading whitespace-separated ASCII numeric dumps,
//! the on-disk form of the simulation datasets this library targets.
//!
//! These are deliberately thin wrappers around standard I/O: the codecs
//! themselves only ever consume and produce in-memory slices.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use log::debug;
use thiserror::Error;

/// An error that may happen while loading a numeric dump file.
#[derive(Debug, Error)]
pub enum DatasetError {
	/// The file could not be read at all.
	#[error("I/O error: {0}")]
	IoError(#[from] io::Error),
	/// A whitespace-separated token of the file was not a number of the
	/// expected type.
	#[error("Invalid numeric token {token:?} at position {position}")]
	InvalidToken {
		/// The token that did not parse.
		token: String,
		/// The zero-based position of the token within the file.
		position: usize
	}
}

/// Summary statistics of a loaded value array.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DataSummary {
	/// The number of values.
	pub count: usize,
	/// The smallest value.
	pub min: f32,
	/// The largest value.
	pub max: f32,
	/// The arithmetic mean, accumulated in `f64`.
	pub mean: f32
}

/// Computes the summary statistics of `values`, or `None` for an empty slice,
/// which has no defined extrema or mean.
///
/// These statistics are what informs the choice of magnitude and precision bit
/// counts for a dataset.
pub fn summarize(values: &[f32]) -> Option<DataSummary> {
	let (&first, rest) = values.split_first()?;

	let mut min = first;
	let mut max = first;
	let mut total = f64::from(first);

	for &value in rest {
		if value < min {
			min = value;
		}
		if value > max {
			max = value;
		}
		total += f64::from(value);
	}

	Some(DataSummary {
		count: values.len(),
		min,
		max,
		mean: (total / values.len() as f64) as f32
	})
}

/// Returns the paths of all files with the given extension (without the leading
/// dot) directly inside `directory`, sorted so repeated scans list the same
/// dataset in the same order.
pub fn discover_files(directory: &Path, extension: &str) -> io::Result<Vec<PathBuf>> {
	let mut files = Vec::new();

	for entry in fs::read_dir(directory)? {
		let path = entry?.path();

		if path.is_file() && path.extension().is_some_and(|found| found == extension) {
			files.push(path);
		}
	}

	files.sort();

	debug!(
		"Found {} .{extension} files in {}",
		files.len(),
		directory.display()
	);

	Ok(files)
}

/// Loads a whitespace-separated ASCII dump of `f32` values, such as a
/// simulation output file.
pub fn load_values(path: &Path) -> Result<Vec<f32>, DatasetError> {
	let values = parse_tokens(&fs::read_to_string(path)?)?;

	debug!("Loaded {} values from {}", values.len(), path.display());

	Ok(values)
}

/// Loads a whitespace-separated ASCII dump of `u32` values. Dumps of this kind
/// hold expected byte values for compressed-buffer verification fixtures.
pub fn load_verification_values(path: &Path) -> Result<Vec<u32>, DatasetError> {
	let values = parse_tokens(&fs::read_to_string(path)?)?;

	debug!(
		"Loaded {} verification values from {}",
		values.len(),
		path.display()
	);

	Ok(values)
}

fn parse_tokens<T: FromStr>(contents: &str) -> Result<Vec<T>, DatasetError> {
	contents
		.split_whitespace()
		.enumerate()
		.map(|(position, token)| {
			token.parse().map_err(|_| DatasetError::InvalidToken {
				token: token.to_owned(),
				position
			})
		})
		.collect()
}

#[cfg(test)]
mod test {
	use std::fs::{self, File};

	use super::*;

	/// Runs `body` against a fresh scratch directory that is removed afterwards.
	fn with_scratch_directory(name: &str, body: impl FnOnce(&Path)) {
		let directory = std::env::temp_dir().join(format!("fixpack_dataset_{name}_{}", std::process::id()));

		fs::create_dir_all(&directory).expect("Could not create the scratch directory");
		body(&directory);
		fs::remove_dir_all(&directory).ok();
	}

	#[test]
	fn parsing_floats_works() {
		assert_eq!(
			parse_tokens::<f32>("1.5 -2\n\t3.25  0").expect("No parse error expected"),
			[1.5, -2.0, 3.25, 0.0]
		);
	}

	#[test]
	fn invalid_tokens_are_reported_with_their_position() {
		match parse_tokens::<f32>("1.5 2.x 3.25") {
			Err(DatasetError::InvalidToken { token, position }) => {
				assert_eq!(token, "2.x");
				assert_eq!(position, 1);
			}
			other => panic!("Expected an invalid token error, got {other:?}")
		}
	}

	#[test]
	fn summary_covers_extrema_and_mean() {
		let summary = summarize(&[2.0, -4.0, 8.0]).expect("A non-empty slice has a summary");

		assert_eq!(summary.count, 3);
		assert_eq!(summary.min, -4.0);
		assert_eq!(summary.max, 8.0);
		assert_eq!(summary.mean, 2.0);
	}

	#[test]
	fn empty_slices_have_no_summary() {
		assert_eq!(summarize(&[]), None);
	}

	#[test]
	fn discovery_filters_and_sorts_by_extension() {
		with_scratch_directory("discovery", |directory| {
			for name in ["b.dat", "a.dat", "ignored.txt"] {
				File::create(directory.join(name)).expect("Could not create a scratch file");
			}

			let files =
				discover_files(directory, "dat").expect("No discovery error expected");

			assert_eq!(
				files,
				[directory.join("a.dat"), directory.join("b.dat")],
				"Unexpected discovery result"
			);
		});
	}

	#[test]
	fn loading_values_from_a_file_works() {
		with_scratch_directory("load", |directory| {
			let path = directory.join("values.dat");

			fs::write(&path, "0.5 -1.25\n100").expect("Could not write the scratch file");

			assert_eq!(
				load_values(&path).expect("No load error expected"),
				[0.5, -1.25, 100.0]
			);
		});
	}

	#[test]
	fn loading_verification_values_works() {
		with_scratch_directory("verification", |directory| {
			let path = directory.join("expected.txt");

			fs::write(&path, "129 0 255").expect("Could not write the scratch file");

			assert_eq!(
				load_verification_values(&path).expect("No load error expected"),
				[129, 0, 255]
			);
		});
	}
}
