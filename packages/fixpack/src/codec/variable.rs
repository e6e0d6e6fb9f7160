//! The variable-width record codec: `1 + M + P` bit records packed back to back
//! with no per-element alignment, starting at the most significant bits of the
//! last byte of the buffer.

use fixed_bitpack::{BitpackReader, BitpackWriter};
use log::debug;

use super::{CodecError, RecordLayout, quantize, read_record, write_record};

/// Packs `values` into a byte buffer of densely packed `1 + mag_bits + prec_bits`
/// bit records.
///
/// The returned buffer is exactly `⌈n · (1 + M + P) / 8⌉` bytes long; any unused
/// bits at its low end are left zeroed. The buffer carries no header: decoding it
/// again takes the same `(mag_bits, prec_bits)` pair, which the caller keeps out
/// of band.
///
/// # Errors
///
/// Fails if the layout exceeds 24 bits per record, or if any value is non-finite
/// or does not fit the layout. No buffer is returned in that case.
pub fn encode_bits(values: &[f32], mag_bits: u32, prec_bits: u32) -> Result<Vec<u8>, CodecError> {
	let layout = RecordLayout::new(mag_bits, prec_bits)?;
	let mut buf = vec![0; layout.byte_len(values.len())];

	debug!(
		"Packing {} values into {} bytes as {}-bit records",
		values.len(),
		buf.len(),
		layout.record_bits()
	);

	if !values.is_empty() {
		let mut writer = BitpackWriter::new(&mut buf)?;

		for &value in values {
			let split = quantize(value, &layout)?;
			write_record(&mut writer, &split, &layout)?;
		}
	}

	Ok(buf)
}

/// Unpacks every complete `1 + mag_bits + prec_bits` bit record of `buf` back
/// into float values, in packing order.
///
/// The element count is reconstructed from the buffer size. For record widths of
/// at least 8 bits this recovers exactly the count that was encoded; narrower
/// records can leave enough zero padding at the low end of the buffer for
/// phantom zero records to appear after the encoded ones, which callers tracking
/// the original count out of band may truncate.
///
/// # Errors
///
/// Fails if the layout exceeds 24 bits per record.
pub fn decode_bits(buf: &[u8], mag_bits: u32, prec_bits: u32) -> Result<Vec<f32>, CodecError> {
	let layout = RecordLayout::new(mag_bits, prec_bits)?;
	let count = layout.record_count(buf.len());
	let mut values = Vec::with_capacity(count);

	debug!(
		"Unpacking {count} {}-bit records from {} bytes",
		layout.record_bits(),
		buf.len()
	);

	if count > 0 {
		let mut reader = BitpackReader::new(buf)?;

		for _ in 0..count {
			values.push(read_record(&mut reader, &layout)?);
		}
	}

	Ok(values)
}

/// Unpacks the single record at `index` without touching any other record.
///
/// # Errors
///
/// Fails if the layout exceeds 24 bits per record or `index` points past the
/// last complete record of the buffer.
pub fn read_bits(buf: &[u8], index: usize, mag_bits: u32, prec_bits: u32) -> Result<f32, CodecError> {
	let layout = RecordLayout::new(mag_bits, prec_bits)?;
	let count = layout.record_count(buf.len());

	if index >= count {
		return Err(CodecError::IndexOutOfBounds { index, count });
	}

	let mut reader = BitpackReader::at_bit_offset(buf, index * layout.record_bits())?;

	Ok(read_record(&mut reader, &layout)?)
}

/// Quantizes `value` and overwrites the single record at `index` with it,
/// leaving every neighbouring record untouched.
///
/// The target bits are cleared before the new record is OR'd in, as the write
/// primitive on its own cannot dislodge previously set bits.
///
/// # Errors
///
/// Fails if the layout exceeds 24 bits per record, `index` points past the last
/// complete record, or `value` does not fit the layout. The buffer is not
/// modified in any of those cases.
pub fn write_bits(
	buf: &mut [u8],
	index: usize,
	value: f32,
	mag_bits: u32,
	prec_bits: u32
) -> Result<(), CodecError> {
	let layout = RecordLayout::new(mag_bits, prec_bits)?;
	let count = layout.record_count(buf.len());

	if index >= count {
		return Err(CodecError::IndexOutOfBounds { index, count });
	}

	let split = quantize(value, &layout)?;

	let mut writer = BitpackWriter::at_bit_offset(buf, index * layout.record_bits())?;
	writer.clear_bits(layout.record_width())?;
	write_record(&mut writer, &split, &layout)?;

	Ok(())
}
