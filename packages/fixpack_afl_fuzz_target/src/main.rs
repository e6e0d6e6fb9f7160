use fixpack::decode_bits;

fn main() {
	afl::fuzz!(|data: &[u8]| {
		// Each fuzz run has to be pretty fast. Just check that no crashes happen:
		// decoding arbitrary bytes under any layout must never panic
		if let [mag_bits, prec_bits, buf @ ..] = data {
			decode_bits(buf, u32::from(*mag_bits) % 24, u32::from(*prec_bits) % 24).ok();
		}
	})
}
