//! The byte-aligned 24-bit record codec: one `[u8; 3]` record per value.
//!
//! This is the `1 + M + P = 24` degenerate case of the variable-width codec,
//! kept as its own path because the fixed 3-byte stride gives random access a
//! plain array-indexing guarantee. Each record is spliced with the same
//! bitpacking primitives as the variable-width path, over its own 3-byte buffer,
//! so both paths produce identical record bit patterns.

use fixed_bitpack::{BitpackError, BitpackReader, BitpackWriter};
use log::debug;

use super::{CodecError, RecordLayout, quantize, read_record, write_record};
use crate::split::SplitValue;

/// Packs `values` into 3-byte records of 1 sign + `mag_bits` magnitude +
/// `prec_bits` precision bits. Byte 2 of each record holds the sign and the most
/// significant magnitude bits.
///
/// # Errors
///
/// Fails unless `1 + mag_bits + prec_bits = 24` exactly, or if any value is
/// non-finite or does not fit the layout.
pub fn encode_24(
	values: &[f32],
	mag_bits: u32,
	prec_bits: u32
) -> Result<Vec<[u8; 3]>, CodecError> {
	let layout = RecordLayout::new_24(mag_bits, prec_bits)?;
	let mut records = Vec::with_capacity(values.len());

	debug!(
		"Packing {} values into byte-aligned 24-bit records ({mag_bits} magnitude, {prec_bits} precision)",
		values.len()
	);

	for &value in values {
		let split = quantize(value, &layout)?;
		records.push(pack_record(&split, &layout)?);
	}

	Ok(records)
}

/// Unpacks 3-byte records back into float values, in packing order.
///
/// # Errors
///
/// Fails unless `1 + mag_bits + prec_bits = 24` exactly.
pub fn decode_24(
	records: &[[u8; 3]],
	mag_bits: u32,
	prec_bits: u32
) -> Result<Vec<f32>, CodecError> {
	let layout = RecordLayout::new_24(mag_bits, prec_bits)?;
	let values = records
		.iter()
		.map(|record| unpack_record(record, &layout))
		.collect::<Result<_, _>>()?;

	Ok(values)
}

/// Unpacks the single record at `index` without touching any other record.
///
/// # Errors
///
/// Fails unless `1 + mag_bits + prec_bits = 24` exactly, or if `index` points
/// past the last record.
pub fn read_24(
	records: &[[u8; 3]],
	index: usize,
	mag_bits: u32,
	prec_bits: u32
) -> Result<f32, CodecError> {
	let layout = RecordLayout::new_24(mag_bits, prec_bits)?;
	let record = records.get(index).ok_or(CodecError::IndexOutOfBounds {
		index,
		count: records.len()
	})?;

	Ok(unpack_record(record, &layout)?)
}

/// Quantizes `value` and overwrites the single record at `index` with it.
///
/// The record is rebuilt from scratch in a zeroed staging array, so no stale
/// bits of the previous value survive.
///
/// # Errors
///
/// Fails unless `1 + mag_bits + prec_bits = 24` exactly, or if `index` points
/// past the last record, or if `value` does not fit the layout. The records are
/// not modified in any of those cases.
pub fn write_24(
	records: &mut [[u8; 3]],
	index: usize,
	value: f32,
	mag_bits: u32,
	prec_bits: u32
) -> Result<(), CodecError> {
	let layout = RecordLayout::new_24(mag_bits, prec_bits)?;
	let count = records.len();
	let record = records
		.get_mut(index)
		.ok_or(CodecError::IndexOutOfBounds { index, count })?;

	let split = quantize(value, &layout)?;
	*record = pack_record(&split, &layout)?;

	Ok(())
}

fn pack_record(split: &SplitValue, layout: &RecordLayout) -> Result<[u8; 3], BitpackError> {
	let mut record = [0; 3];
	let mut writer = BitpackWriter::new(&mut record)?;

	write_record(&mut writer, split, layout)?;

	Ok(record)
}

fn unpack_record(record: &[u8; 3], layout: &RecordLayout) -> Result<f32, BitpackError> {
	let mut reader = BitpackReader::new(record)?;

	read_record(&mut reader, layout)
}
