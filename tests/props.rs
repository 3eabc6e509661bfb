//! Properties that hold for every byte sequence in every mode.

use proptest::prelude::*;

use p8n_x86_decoder::{
    Code, Decoder, DecoderError, DecoderOptions, SliceReader, MAX_INSTRUCTION_LENGTH,
};

fn bitness() -> impl Strategy<Value = u32> {
    prop_oneof![Just(16u32), Just(32u32), Just(64u32)]
}

fn options() -> impl Strategy<Value = DecoderOptions> {
    prop_oneof![
        Just(DecoderOptions::empty()),
        Just(DecoderOptions::NO_INVALID_CHECK),
        Just(DecoderOptions::KNC),
        Just(DecoderOptions::AMD | DecoderOptions::NO_PAUSE),
        Just(DecoderOptions::UMOV | DecoderOptions::XBTS | DecoderOptions::JMPE),
        Just(DecoderOptions::all()),
    ]
}

const ENCODINGS: &[(u32, &[u8])] = &[
    (64, &[0x48, 0x8d, 0x44, 0x8b, 0x20]),
    (64, &[0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]),
    (32, &[0x81, 0xc1, 0x78, 0x56, 0x34, 0x12]),
    (16, &[0xea, 0x34, 0x12, 0x78, 0x56]),
    (32, &[0xf2, 0xf0, 0x01, 0x08]),
    (64, &[0xc5, 0xec, 0x58, 0xcb]),
    (64, &[0x8f, 0xe9, 0x78, 0x90, 0xc1]),
    (64, &[0x62, 0xf1, 0x6c, 0xc9, 0x58, 0xcb]),
    (64, &[0x62, 0xf2, 0x7d, 0x49, 0x90, 0x0c, 0x90]),
    (32, &[0x0f, 0x0f, 0xc1, 0x9e]),
    (64, &[0x66, 0x0f, 0x3a, 0x0f, 0xc1, 0x08]),
];

proptest! {
    #![proptest_config(ProptestConfig::with_cases(4096))]

    #[test]
    fn decoding_never_panics(
        bytes in prop::collection::vec(any::<u8>(), 0..32),
        bits in bitness(),
        opts in options(),
    ) {
        let mut d = Decoder::new(bits, SliceReader::new(&bytes), 0x1000, opts).unwrap();
        while d.can_decode() {
            let _ = d.decode();
        }
    }

    #[test]
    fn decoding_is_deterministic(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        bits in bitness(),
        opts in options(),
    ) {
        let mut a = Decoder::new(bits, SliceReader::new(&bytes), 0x1000, opts).unwrap();
        let mut b = Decoder::new(bits, SliceReader::new(&bytes), 0x1000, opts).unwrap();
        let (x, y) = (a.decode(), b.decode());
        prop_assert_eq!(x, y);
        prop_assert_eq!(a.last_error(), b.last_error());
    }

    #[test]
    fn length_is_bounded_and_consumed(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        bits in bitness(),
        opts in options(),
    ) {
        let mut d = Decoder::new(bits, SliceReader::new(&bytes), 0x1000, opts).unwrap();
        let insn = d.decode();
        prop_assert!(insn.len() <= MAX_INSTRUCTION_LENGTH);
        prop_assert!(insn.len() <= bytes.len());
        prop_assert_eq!(d.position(), insn.len());
        prop_assert_eq!(insn.ip(), 0x1000);
        prop_assert_eq!(insn.next_ip(), 0x1000 + insn.len() as u64);
        prop_assert_eq!(d.ip(), insn.next_ip());
        if d.last_error() == DecoderError::None {
            prop_assert!(insn.len() >= 1);
            prop_assert!(!insn.is_invalid());
        } else {
            prop_assert_eq!(insn.code(), Code::INVALID);
        }
    }

    #[test]
    fn strict_prefix_of_an_instruction_runs_out_of_bytes(
        bytes in prop::collection::vec(any::<u8>(), 2..32),
        bits in bitness(),
        cut in 0usize..15,
    ) {
        let full = {
            let mut d = Decoder::new(bits, SliceReader::new(&bytes), 0, DecoderOptions::empty()).unwrap();
            let insn = d.decode();
            (insn, d.last_error())
        };
        if full.1 != DecoderError::None || full.0.len() < 2 {
            return Ok(());
        }
        let prefix = &bytes[..cut % full.0.len()];

        let mut d = Decoder::new(bits, SliceReader::new(prefix), 0, DecoderOptions::empty()).unwrap();
        let insn = d.decode();
        prop_assert_eq!(insn.code(), Code::INVALID);
        prop_assert_eq!(d.last_error(), DecoderError::NoMoreBytes);
        prop_assert_eq!(insn.len(), prefix.len());
    }

    #[test]
    fn truncated_known_encodings_run_out_of_bytes(
        index in 0..ENCODINGS.len(),
        cut in 0usize..15,
    ) {
        let (bits, bytes) = ENCODINGS[index];
        let prefix = &bytes[..cut % bytes.len()];

        let mut d = Decoder::new(bits, SliceReader::new(prefix), 0, DecoderOptions::empty()).unwrap();
        let insn = d.decode();
        prop_assert_eq!(insn.code(), Code::INVALID);
        prop_assert_eq!(d.last_error(), DecoderError::NoMoreBytes);
        prop_assert_eq!(insn.len(), prefix.len());
    }

    #[test]
    fn every_decoded_operand_is_indexable(
        bytes in prop::collection::vec(any::<u8>(), 1..32),
        bits in bitness(),
    ) {
        let mut d = Decoder::new(bits, SliceReader::new(&bytes), 0, DecoderOptions::empty()).unwrap();
        let insn = d.decode();
        prop_assert!(insn.op_count() <= 5);
        prop_assert_eq!(insn.op_kinds().count(), insn.op_count());
    }
}
