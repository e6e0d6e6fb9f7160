//! Fixed-point decomposition of scalar floats into a sign, an integer part and a
//! decimally scaled fractional part.

/// The fixed-point decomposition of a float: its sign, and the integer values of
/// the parts before and after the decimal point, the latter scaled up by the
/// decimal multiplier the decomposition was made with.
///
/// Both parts are staged little-endian in 3-byte arrays, the widest a 24-bit
/// record field can get, so the packers can index them uniformly.
pub(crate) struct SplitValue {
	pub(crate) integer: [u8; 3],
	pub(crate) fraction: [u8; 3],
	pub(crate) negative: bool
}

impl SplitValue {
	/// Reassembles the integer part staging bytes into a single word.
	pub(crate) fn integer_word(&self) -> u32 {
		word_from_staging(self.integer)
	}

	/// Reassembles the scaled fractional part staging bytes into a single word.
	pub(crate) fn fraction_word(&self) -> u32 {
		word_from_staging(self.fraction)
	}
}

/// Splits `value` into its fixed-point decomposition, scaling the fractional part
/// by `multiplier` and rounding it to the nearest integer.
///
/// The integer part saturates at the `f32` to integer conversion and wraps to its
/// low 24 bits in the staging array, so magnitudes at or beyond `2^24` do not
/// survive a decomposition intact: callers enforce their own, much smaller range
/// limits before a decomposition is packed. Non-finite values are likewise the
/// caller's to reject.
pub(crate) fn split_float(value: f32, multiplier: u32) -> SplitValue {
	let magnitude = value.abs();
	let integer_part = magnitude.trunc();
	let fraction_part = magnitude - integer_part;

	SplitValue {
		integer: staging_bytes(integer_part as u32),
		fraction: staging_bytes((f64::from(fraction_part) * f64::from(multiplier)).round() as u32),
		negative: value < 0.0
	}
}

/// Returns the number of decimal digits needed to write any `bits`-wide unsigned
/// integer, i.e. the digit count of `2^bits`. A 0-bit number still takes one
/// digit to write.
pub(crate) fn decimal_digits(bits: u32) -> u32 {
	let mut value = 1u64 << bits;
	let mut digits = 1;

	while value >= 10 {
		value /= 10;
		digits += 1;
	}

	digits
}

/// Returns the decimal scale factor applied to fractional parts quantized with
/// `bits` bits of precision: `10^digits(bits)`.
pub(crate) fn fraction_scale(bits: u32) -> u32 {
	10u32.pow(decimal_digits(bits))
}

fn staging_bytes(word: u32) -> [u8; 3] {
	[word as u8, (word >> 8) as u8, (word >> 16) as u8]
}

fn word_from_staging(staging: [u8; 3]) -> u32 {
	u32::from(staging[2]) << 16 | u32::from(staging[1]) << 8 | u32::from(staging[0])
}
