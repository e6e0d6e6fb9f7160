//! FixPack is a lossy fixed-point compression library for scalar `f32` arrays
//! whose values lie within a known magnitude range and only need a bounded
//! number of decimal digits of precision, as is typical of simulation output
//! dumps. Choosing how many bits to spend on magnitude and precision yields a
//! predictable per-element size smaller than the 32-bit source.
//!
//! # Quantization model
//!
//! Every value is stored as a `1 + M + P` bit record: a sign bit, `M` bits for
//! the integer part of its absolute value, and `P` bits for the fractional part
//! scaled by the decimal factor `D = 10^digits(P)`, where `digits(P)` is the
//! decimal digit count of `2^P`. Decoding returns `(−1)^s · (m + f / D)`, so a
//! round trip reproduces each input up to the quantization step `1/D`, provided
//! the input fits the chosen layout in the first place: values with
//! `⌊|x|⌋ ≥ 2^M`, values whose scaled fraction needs more than `P` bits, and
//! non-finite values are rejected with a typed error before any buffer is
//! touched.
//!
//! This is *not* a general-purpose floating-point compressor: IEEE-754 bit
//! patterns are not preserved, no exponent is encoded, and NaN, infinities and
//! subnormal precision are out of contract by design.
//!
//! # Codecs
//!
//! - The variable-width codec ([`encode_bits`], [`decode_bits`], [`read_bits`],
//!   [`write_bits`]) packs records back to back with no per-element alignment,
//!   for the densest representation any `1 + M + P ≤ 24` layout allows.
//! - The 24-bit codec ([`encode_24`], [`decode_24`], [`read_24`], [`write_24`])
//!   requires `1 + M + P = 24` exactly and stores each record in its own
//!   `[u8; 3]`, trading density knobs for a fixed 3-byte random-access stride.
//!   At that layout both codecs produce identical record bit patterns.
//! - The run-length codec ([`rle_encode`], [`rle_decode`]) collapses runs of
//!   bitwise-equal values and is often worth applying before record packing.
//!
//! Both record codecs support bulk operation and random access: any record can
//! be read or overwritten in place without touching its neighbours.
//!
//! # Headerless buffers
//!
//! Compressed buffers are raw records with no self-describing metadata: the
//! consumer must independently know the element count and the `(M, P)` layout.
//! Keeping the buffers bare is deliberate; callers own their metadata.
//!
//! The [`dataset`] module bundles the thin file-handling helpers used around
//! the codecs: dataset discovery, ASCII dump ingestion and summary statistics.
//!
//! # Logging
//!
//! This crate uses the [`log`](https://crates.io/crates/log) crate for logging
//! status and diagnostic messages to any interested consumers. Executables can
//! customize the verbosity of this logging, and even compile it out, [as
//! explained in the `log` crate documentation](https://docs.rs/log/0.4.16/log).
//!
//! # Examples
//!
//! ```
//! # fn main() -> Result<(), fixpack::CodecError> {
//! use fixpack::{decode_bits, encode_bits, read_bits};
//!
//! // 1 sign + 7 magnitude + 16 precision bits per value: 3 bytes instead of 4
//! let compressed = encode_bits(&[-1.5, 20.25, 0.125], 7, 16)?;
//! assert_eq!(compressed.len(), 9);
//!
//! let values = decode_bits(&compressed, 7, 16)?;
//! assert_eq!(values, [-1.5, 20.25, 0.125]);
//!
//! // Any record can also be read back without unpacking the rest
//! assert_eq!(read_bits(&compressed, 1, 7, 16)?, 20.25);
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![forbid(unsafe_op_in_unsafe_fn)]
#![forbid(rustdoc::broken_intra_doc_links)]
#![deny(missing_docs)]
#![deny(non_ascii_idents)]
#![deny(clippy::print_stdout)]
#![deny(clippy::unimplemented)]
#![warn(explicit_outlives_requirements)]
#![warn(noop_method_call)]
#![warn(unreachable_pub)]
#![warn(unused_import_braces)]
#![warn(unused_qualifications)]
#![warn(variant_size_differences)]
#![warn(clippy::empty_enum)]
#![warn(clippy::enum_glob_use)]
#![warn(clippy::float_cmp_const)]
#![warn(clippy::invalid_upcast_comparisons)]
#![warn(clippy::multiple_inherent_impl)]
#![warn(clippy::use_self)]
#![warn(clippy::used_underscore_binding)]
#![warn(clippy::redundant_feature_names)]

pub use codec::{
	CodecError, decode_24, decode_bits, encode_24, encode_bits, read_24, read_bits, write_24,
	write_bits
};
pub use rle::{RunLengthEntry, rle_decode, rle_encode};

pub mod dataset;

mod codec;
mod rle;
mod split;
