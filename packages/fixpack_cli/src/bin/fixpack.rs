use std::borrow::Cow;
use std::env;
use std::fs;
use std::io::{Write, stdout};
use std::path::Path;
use std::process::exit;
use std::str::FromStr;
use std::time::Instant;

use getopts::{Matches, Options, ParsingStyle};
use log::info;
use stderrlog::ColorChoice;

use fixpack::{dataset, decode_24, decode_bits, encode_24, encode_bits};

fn main() {
	exit(match run() {
		Ok(_) => 0,
		Err(err) => {
			eprintln!("{}", err);
			1
		}
	})
}

fn run() -> Result<(), Cow<'static, str>> {
	let mut options = Options::new();

	options
		.optflag(
			"h",
			"help",
			"Prints information about the accepted command line arguments and exits."
		)
		.optflag(
			"",
			"version",
			"Prints version and copyright information, then exits."
		)
		.optflag(
			"q",
			"quiet",
			"When enabled, the program will only print error messages, unless -h is specified."
		)
		.optflagmulti(
			"v",
			"verbose",
			"Increases the verbosity of the messages. Can be repeated several times."
		)
		.optflag(
			"d",
			"decompress",
			"Decompresses the input file instead of compressing it. The magnitude and precision \
			bit counts must match the ones the file was compressed with: compressed files carry \
			no header to deduce them from."
		)
		.optflag(
			"",
			"stats",
			"Logs the count, minimum, maximum and mean of the input values before compressing \
			them. These statistics are a good guide for choosing the bit counts."
		)
		.optopt(
			"m",
			"magnitude-bits",
			"The number of bits used for the integer part of each value. \
			The default value is 7.",
			"BITS"
		)
		.optopt(
			"p",
			"precision-bits",
			"The number of bits used for the decimally scaled fractional part of each value. \
			The default value is 16.",
			"BITS"
		)
		.optopt(
			"c",
			"codec",
			"The codec used for the compressed representation. The variable codec packs \
			1 + magnitude + precision bit records back to back; the fixed24 codec requires the \
			bit counts to add up to 23 and aligns every record to 3 bytes.\n\
			Available codecs: variable, fixed24",
			"CODEC"
		)
		.parsing_style(ParsingStyle::StopAtFirstFree);

	match options.parse(env::args().skip(1)) {
		Ok(matches) => {
			if matches.opt_present("h") {
				print_header();
				println!();
				println!("Usage:");
				print!(
					"    {} [OPTION]... <input file> <output file or ->",
					env!("CARGO_BIN_NAME")
				);
				println!("{}", options.usage(""));
			} else if matches.opt_present("version") {
				print_header();
			} else {
				let quiet_mode = matches.opt_present("q");

				if !quiet_mode {
					print_header();
					println!();
				}

				if matches.free.len() != 2 {
					return Err(format!(
						"Too many or few file arguments specified. Run {} -h to see command line argument help",
						env!("CARGO_BIN_NAME")
					))?;
				}

				init_logging(&matches, quiet_mode);

				process(&matches)?;
			}

			Ok(())
		}
		Err(parse_err) => Err(format!(
			"{}\nRun {} -h to see command line argument help",
			parse_err,
			env!("CARGO_BIN_NAME")
		))?
	}
}

fn process(matches: &Matches) -> Result<(), Cow<'static, str>> {
	let mag_bits = matches
		.opt_get_default("magnitude-bits", 7u32)
		.map_err(|err| format!("Invalid magnitude bit count: {}", err))?;
	let prec_bits = matches
		.opt_get_default("precision-bits", 16u32)
		.map_err(|err| format!("Invalid precision bit count: {}", err))?;
	let chosen_codec = matches
		.opt_get("codec")?
		.unwrap_or(AvailableCodec::Variable);

	let input_file_name = &*matches.free[0];
	let output_file_name = &*matches.free[1];

	let begin = Instant::now();

	let output_bytes = if matches.opt_present("d") {
		decompress(input_file_name, chosen_codec, mag_bits, prec_bits)?
	} else {
		compress(matches, input_file_name, chosen_codec, mag_bits, prec_bits)?
	};

	match output_file_name {
		"-" => stdout()
			.lock()
			.write_all(&output_bytes)
			.map_err(|err| format!("Could not write to standard output: {}", err))?,
		file_path => fs::write(file_path, &output_bytes)
			.map_err(|err| format!("Could not write output file: {}", err))?
	}

	info!(
		"Processed {} into {} in {:.3} s. Have a nice day!",
		input_file_name,
		output_file_name,
		begin.elapsed().as_secs_f64()
	);

	Ok(())
}

fn compress(
	matches: &Matches,
	input_file_name: &str,
	chosen_codec: AvailableCodec,
	mag_bits: u32,
	prec_bits: u32
) -> Result<Vec<u8>, Cow<'static, str>> {
	let values = dataset::load_values(Path::new(input_file_name))
		.map_err(|err| format!("Could not load the input values: {}", err))?;

	if matches.opt_present("stats") {
		if let Some(summary) = dataset::summarize(&values) {
			info!(
				"{} values, min {}, max {}, mean {}",
				summary.count, summary.min, summary.max, summary.mean
			);
		}
	}

	info!(
		"Compressing {} values with the {} codec, {} magnitude and {} precision bits...",
		values.len(),
		chosen_codec,
		mag_bits,
		prec_bits
	);

	let compressed = match chosen_codec {
		AvailableCodec::Variable => encode_bits(&values, mag_bits, prec_bits),
		AvailableCodec::Fixed24 => encode_24(&values, mag_bits, prec_bits)
			.map(|records| records.into_iter().flatten().collect())
	}
	.map_err(|err| format!("Error while compressing the input file: {}", err))?;

	info!(
		"Compressed {} bytes of values into {} bytes",
		values.len() * 4,
		compressed.len()
	);

	Ok(compressed)
}

fn decompress(
	input_file_name: &str,
	chosen_codec: AvailableCodec,
	mag_bits: u32,
	prec_bits: u32
) -> Result<Vec<u8>, Cow<'static, str>> {
	let compressed = fs::read(input_file_name)
		.map_err(|err| format!("Could not open input file: {}", err))?;

	let values = match chosen_codec {
		AvailableCodec::Variable => decode_bits(&compressed, mag_bits, prec_bits),
		AvailableCodec::Fixed24 => {
			if compressed.len() % 3 != 0 {
				return Err(format!(
					"The input file holds {} bytes, which do not divide into 3-byte records",
					compressed.len()
				))?;
			}

			let records: Vec<[u8; 3]> = compressed
				.chunks_exact(3)
				.map(|chunk| [chunk[0], chunk[1], chunk[2]])
				.collect();

			decode_24(&records, mag_bits, prec_bits)
		}
	}
	.map_err(|err| format!("Error while decompressing the input file: {}", err))?;

	info!("Decompressed {} values", values.len());

	let mut dump = String::new();
	for value in values {
		dump.push_str(&value.to_string());
		dump.push('\n');
	}

	Ok(dump.into_bytes())
}

fn init_logging(option_matches: &Matches, quiet_mode: bool) {
	let verbosity_level = option_matches.opt_count("v");

	stderrlog::new()
		.module("fixpack")
		.verbosity(2 + verbosity_level)
		.show_level(false)
		.quiet(quiet_mode)
		.color(ColorChoice::Never)
		.init()
		.unwrap();
}

fn print_header() {
	println!(
		"FixPack {} ({})",
		env!("CARGO_PKG_VERSION"),
		env!("CARGO_BIN_NAME")
	);
	println!("{}", env!("CARGO_PKG_DESCRIPTION"));
	println!("Copyright (C) {}", env!("CARGO_PKG_AUTHORS"));
}

#[derive(Clone, Copy)]
enum AvailableCodec {
	Variable,
	Fixed24
}

impl FromStr for AvailableCodec {
	type Err = Cow<'static, str>;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"variable" => Ok(Self::Variable),
			"fixed24" => Ok(Self::Fixed24),
			_ => Err(format!("The specified codec is not valid: {}", s).into())
		}
	}
}

impl std::fmt::Display for AvailableCodec {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.write_str(match self {
			Self::Variable => "variable",
			Self::Fixed24 => "fixed24"
		})
	}
}
