//! Contains the fixed-point record codecs: densely packed variable-width records
//! and the byte-aligned 24-bit variant.

use fixed_bitpack::{BitpackError, BitpackReader, BitpackWriter, FieldWidth};
use thiserror::Error;

use crate::split::{self, SplitValue};

mod fixed;
mod variable;


pub use fixed::{decode_24, encode_24, read_24, write_24};
pub use variable::{decode_bits, encode_bits, read_bits, write_bits};

/// An error that may happen when packing or unpacking fixed-point records.
#[derive(Debug, Error)]
pub enum CodecError {
	/// The requested record layout does not fit the 24-bit record ceiling.
	#[error("Unsupported record layout: 1 + {mag_bits} + {prec_bits} bits per record exceed 24")]
	UnsupportedLayout {
		/// The requested magnitude bit count.
		mag_bits: u32,
		/// The requested precision bit count.
		prec_bits: u32
	},
	/// A 24-bit path operation was invoked with a layout that does not fill its
	/// 3-byte records exactly.
	#[error("1 + {mag_bits} + {prec_bits} bits per record do not fill a 24-bit record exactly")]
	Not24BitLayout {
		/// The requested magnitude bit count.
		mag_bits: u32,
		/// The requested precision bit count.
		prec_bits: u32
	},
	/// A NaN or infinite value was handed to an encoder. The fixed-point record
	/// format has no representation for these.
	#[error("Cannot quantize the non-finite value {value}")]
	NonFiniteValue {
		/// The rejected value.
		value: f32
	},
	/// The integer part of a value does not fit the magnitude bits of the layout.
	#[error("The integer part of {value} does not fit in {mag_bits} magnitude bits")]
	MagnitudeOverflow {
		/// The rejected value.
		value: f32,
		/// The magnitude bit count of the layout.
		mag_bits: u32
	},
	/// The scaled fractional part of a value does not fit the precision bits of
	/// the layout.
	#[error(
		"The fractional part of {value}, scaled by {scale}, does not fit in {prec_bits} precision bits"
	)]
	PrecisionOverflow {
		/// The rejected value.
		value: f32,
		/// The precision bit count of the layout.
		prec_bits: u32,
		/// The decimal scale factor of the layout.
		scale: u32
	},
	/// A random-access operation pointed past the last record of the buffer.
	#[error("Index {index} is out of bounds for a buffer of {count} records")]
	IndexOutOfBounds {
		/// The requested record index.
		index: usize,
		/// The number of records the buffer holds.
		count: usize
	},
	/// A bitpacking cursor ran off its buffer. This error surfacing from any
	/// operation of this module on an encoder-produced buffer is a bug.
	#[error("Bitpacking error: {0}")]
	BitpackError(#[from] BitpackError)
}

/// A validated record layout: one sign bit plus magnitude and precision fields,
/// with the decimal scale factor derived from the precision bit count.
#[derive(Clone, Copy)]
pub(crate) struct RecordLayout {
	mag_width: FieldWidth,
	prec_width: FieldWidth,
	record_width: FieldWidth,
	scale: u32
}

impl RecordLayout {
	/// Validates a `1 + mag_bits + prec_bits` bit record layout.
	pub(crate) fn new(mag_bits: u32, prec_bits: u32) -> Result<Self, CodecError> {
		let layout_error = || CodecError::UnsupportedLayout { mag_bits, prec_bits };

		let record_bits = 1u32
			.checked_add(mag_bits)
			.and_then(|bits| bits.checked_add(prec_bits))
			.filter(|bits| *bits <= 24)
			.ok_or_else(layout_error)?;

		// The casts cannot truncate: no field is wider than 23 bits here
		Ok(Self {
			mag_width: FieldWidth::new(mag_bits as u8).ok_or_else(layout_error)?,
			prec_width: FieldWidth::new(prec_bits as u8).ok_or_else(layout_error)?,
			record_width: FieldWidth::new(record_bits as u8).ok_or_else(layout_error)?,
			scale: split::fraction_scale(prec_bits)
		})
	}

	/// Validates a record layout that fills a 3-byte record exactly, as the
	/// byte-aligned codec requires.
	pub(crate) fn new_24(mag_bits: u32, prec_bits: u32) -> Result<Self, CodecError> {
		let layout = Self::new(mag_bits, prec_bits)?;

		if layout.record_width.get() == 24 {
			Ok(layout)
		} else {
			Err(CodecError::Not24BitLayout {
				mag_bits,
				prec_bits
			})
		}
	}

	/// The number of bits one record takes.
	pub(crate) fn record_bits(&self) -> usize {
		self.record_width.get() as usize
	}

	/// The number of complete records a buffer of `byte_len` bytes holds.
	///
	/// This reconstructs the element count the encoder packed whenever the record
	/// width is at least 8 bits; narrower records can leave enough zero padding
	/// for phantom zero records to appear at the end.
	pub(crate) fn record_count(&self, byte_len: usize) -> usize {
		byte_len * 8 / self.record_bits()
	}

	/// The number of bytes needed to pack `count` records.
	pub(crate) fn byte_len(&self, count: usize) -> usize {
		(count * self.record_bits()).div_ceil(8)
	}

	/// The decimal scale factor applied to fractional parts under this layout.
	pub(crate) fn scale(&self) -> u32 {
		self.scale
	}

	/// The width of the whole record, for clearing it in one go.
	pub(crate) fn record_width(&self) -> FieldWidth {
		self.record_width
	}
}

/// Quantizes `value` into its packable decomposition, rejecting values the layout
/// cannot represent. Nothing is written anywhere on error, so callers can vet
/// values before touching any buffer.
pub(crate) fn quantize(value: f32, layout: &RecordLayout) -> Result<SplitValue, CodecError> {
	if !value.is_finite() {
		return Err(CodecError::NonFiniteValue { value });
	}

	// The magnitude check runs on the float itself: past 2^24 the staged integer
	// part no longer reflects the value
	if value.abs() >= (1u32 << layout.mag_width.get()) as f32 {
		return Err(CodecError::MagnitudeOverflow {
			value,
			mag_bits: layout.mag_width.get().into()
		});
	}

	let split = split::split_float(value, layout.scale);

	if u64::from(split.fraction_word()) >= 1 << layout.prec_width.get() {
		return Err(CodecError::PrecisionOverflow {
			value,
			prec_bits: layout.prec_width.get().into(),
			scale: layout.scale
		});
	}

	Ok(split)
}

/// Packs one `[sign | magnitude | fraction]` record at the writer's cursor.
pub(crate) fn write_record(
	writer: &mut BitpackWriter<'_>,
	split: &SplitValue,
	layout: &RecordLayout
) -> Result<(), BitpackError> {
	writer.write_flag(split.negative)?;
	writer.write_unsigned_integer(split.integer_word(), layout.mag_width)?;
	writer.write_unsigned_integer(split.fraction_word(), layout.prec_width)
}

/// Unpacks one record at the reader's cursor back into its float value.
pub(crate) fn read_record(
	reader: &mut BitpackReader<'_>,
	layout: &RecordLayout
) -> Result<f32, BitpackError> {
	let negative = reader.read_flag()?;
	let magnitude = reader.read_unsigned_integer(layout.mag_width)?;
	let fraction = reader.read_unsigned_integer(layout.prec_width)?;

	let value = (f64::from(magnitude) + f64::from(fraction) / f64::from(layout.scale())) as f32;

	Ok(if negative { -value } else { value })
}
