#![allow(clippy::unusual_byte_groupings)]

use super::*;

/// Byte image of two 11-bit records, `[sign | 4-bit magnitude | 6-bit fraction]`:
/// `(1, 11, 50)` followed by `(0, 5, 7)`, with two zero padding bits at the low
/// end of byte 0.
const TWO_RECORD_IMAGE: [u8; 3] = [0b000111_00, 0b010_0_0101, 0b1_1011_110];

#[test]
fn packing_record_example_works() {
	let mut buf = [0u8; 3];
	let mut bitpacker = BitpackWriter::new(&mut buf).expect("Non-empty buffer expected");

	bitpacker.write_flag(true).expect("No overrun expected");
	bitpacker
		.write_unsigned_integer(1, field_width!(7))
		.expect("No overrun expected");
	bitpacker
		.write_unsigned_integer(50_000, field_width!(16))
		.expect("No overrun expected");

	assert_eq!(
		buf,
		[0x50, 0xC3, 0x81],
		"Unexpected bitpack write result"
	);
}

#[test]
fn packing_across_byte_boundaries_works() {
	let mut buf = [0u8; 3];
	let mut bitpacker = BitpackWriter::new(&mut buf).expect("Non-empty buffer expected");

	for (negative, magnitude, fraction) in [(true, 11, 50), (false, 5, 7)] {
		bitpacker.write_flag(negative).expect("No overrun expected");
		bitpacker
			.write_unsigned_integer(magnitude, field_width!(4))
			.expect("No overrun expected");
		bitpacker
			.write_unsigned_integer(fraction, field_width!(6))
			.expect("No overrun expected");
	}

	assert_eq!(buf, TWO_RECORD_IMAGE, "Unexpected bitpack write result");
}

#[test]
fn reading_across_byte_boundaries_works() {
	let mut bitpacker = BitpackReader::new(&TWO_RECORD_IMAGE).expect("Non-empty buffer expected");

	for (negative, magnitude, fraction) in [(true, 11, 50), (false, 5, 7)] {
		assert_eq!(
			bitpacker.read_flag().expect("No overrun expected"),
			negative
		);
		assert_eq!(
			bitpacker
				.read_unsigned_integer(field_width!(4))
				.expect("No overrun expected"),
			magnitude
		);
		assert_eq!(
			bitpacker
				.read_unsigned_integer(field_width!(6))
				.expect("No overrun expected"),
			fraction
		);
	}
}

#[test]
fn reading_zero_width_integer_works() {
	// Initialize the bitpacker to a state where lots of non-zero
	// bits are available. This should help catching non-conformances
	let mut bitpacker = BitpackReader {
		buf: &[0xFF; 2],
		byte_index: 1,
		bits_left: 8
	};

	assert_eq!(
		bitpacker
			.read_unsigned_integer(FieldWidth(0))
			.expect("No overrun expected"),
		0
	);

	// Also assert that the internal bitpacker state is the same
	assert_eq!(bitpacker.byte_index, 1, "Unexpected internal state");
	assert_eq!(bitpacker.bits_left, 8, "Unexpected internal state");
}

#[test]
fn writing_zero_width_integers_does_nothing() {
	let mut buf = [0u8; 2];
	let mut bitpacker = BitpackWriter::new(&mut buf).expect("Non-empty buffer expected");

	bitpacker
		.write_unsigned_integer(u32::MAX, field_width!(0))
		.expect("No overrun expected");

	assert_eq!(
		buf, [0, 0],
		"Some bits were written to the buffer when packing zero width integers"
	);
}

#[test]
fn positioning_at_bit_offset_works() {
	// Skip the first 11-bit record and decode the second one only
	let mut bitpacker =
		BitpackReader::at_bit_offset(&TWO_RECORD_IMAGE, 11).expect("Offset inside buffer expected");

	assert!(!bitpacker.read_flag().expect("No overrun expected"));
	assert_eq!(
		bitpacker
			.read_unsigned_integer(field_width!(4))
			.expect("No overrun expected"),
		5
	);
	assert_eq!(
		bitpacker
			.read_unsigned_integer(field_width!(6))
			.expect("No overrun expected"),
		7
	);
}

#[test]
fn clearing_bits_does_not_advance_the_cursor() {
	let mut buf = [0xFF; 3];
	let mut bitpacker =
		BitpackWriter::at_bit_offset(&mut buf, 11).expect("Offset inside buffer expected");

	bitpacker
		.clear_bits(field_width!(11))
		.expect("No overrun expected");

	// Bits 0..11 and 22..24 survive; bits 11..22 are zeroed
	assert_eq!(buf, [0b000000_11, 0b111_00000, 0xFF], "Unexpected clear result");

	// The cursor is still at bit offset 11, so the new record lands on the
	// cleared bits
	bitpacker.write_flag(false).expect("No overrun expected");
	bitpacker
		.write_unsigned_integer(5, field_width!(4))
		.expect("No overrun expected");
	bitpacker
		.write_unsigned_integer(7, field_width!(6))
		.expect("No overrun expected");

	assert_eq!(
		buf,
		[0b000111_11, 0b111_0_0101, 0xFF],
		"Unexpected overwrite result"
	);
}

#[test]
fn running_off_the_buffer_returns_error() {
	let mut bitpacker = BitpackReader::new(&[0xAB]).expect("Non-empty buffer expected");
	assert_eq!(
		bitpacker.read_unsigned_integer(field_width!(9)),
		Err(BitpackError::UnexpectedEndOfBuffer)
	);

	let mut buf = [0u8; 1];
	let mut bitpacker = BitpackWriter::new(&mut buf).expect("Non-empty buffer expected");
	assert_eq!(
		bitpacker.write_unsigned_integer(0, field_width!(9)),
		Err(BitpackError::UnexpectedEndOfBuffer)
	);
	assert_eq!(
		bitpacker.clear_bits(field_width!(9)),
		Err(BitpackError::UnexpectedEndOfBuffer)
	);
}

#[test]
fn empty_and_out_of_range_positions_are_rejected() {
	assert!(matches!(
		BitpackReader::new(&[]),
		Err(BitpackError::UnexpectedEndOfBuffer)
	));
	assert!(matches!(
		BitpackReader::at_bit_offset(&[0, 0], 16),
		Err(BitpackError::UnexpectedEndOfBuffer)
	));
}

#[test]
fn invalid_field_widths_are_rejected() {
	assert_eq!(FieldWidth::new(25), None);
	assert_eq!(FieldWidth::new(24).map(FieldWidth::get), Some(24));
}
