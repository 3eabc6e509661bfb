use bitflags::bitflags;

use crate::common::{CodeSize, DecoderOptions, EncodingKind, MandatoryPrefix, Mode, OpSize};

bitflags! {
    /// Per instruction decode flags. Some bit positions double as raw prefix bits: `W` is bit
    /// 7 of the VEX/EVEX W byte and `B` is EVEX.b in P2, so both can be or'ed in unshifted.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct StateFlags: u32 {
        const IP_REL64 = 0x0000_0001;
        const IP_REL32 = 0x0000_0002;
        const HAS_REX = 0x0000_0008;
        const B = 0x0000_0010;
        const Z = 0x0000_0020;
        const IS_INVALID = 0x0000_0040;
        const W = 0x0000_0080;
        const NO_IMM = 0x0000_0100;
        const ADDR64 = 0x0000_0200;
        const BRANCH_IMM8 = 0x0000_0400;
        const XBEGIN = 0x0000_0800;
        const LOCK = 0x0000_1000;
        const ALLOW_LOCK = 0x0000_2000;
        const NO_MORE_BYTES = 0x0000_4000;
        const HAS66 = 0x0000_8000;
        const MVEX_SSS = 0x0007_0000;
        const MVEX_EH = 0x0008_0000;
    }
}

pub(crate) const MVEX_SSS_SHIFT: u32 = 16;

/// Everything about the decoder that is fixed once the mode and options are known.
#[derive(Debug, Clone)]
pub(crate) struct DecoderConfig {
    pub mode: Mode,
    pub options: DecoderOptions,
    /// All ones unless `NO_INVALID_CHECK` is set. And'ed into every structural check.
    pub invalid_check_mask: u32,
    pub default_operand_size: OpSize,
    pub default_inverted_operand_size: OpSize,
    pub default_address_size: OpSize,
    pub default_inverted_address_size: OpSize,
    pub default_code_size: CodeSize,
    /// 0xf0 in 64-bit mode, 0 otherwise. `b & rex_mask == 0x40` detects a REX prefix.
    pub rex_mask: u8,
    /// Mask for 4-bit register numbers taken from VEX/XOP bytes.
    pub reg15_mask: u8,
    /// Keeps the inverted R/X/B bits of VEX3/XOP in 64-bit mode only.
    pub mask_e0: u8,
}

impl DecoderConfig {
    pub fn new(mode: Mode, options: DecoderOptions) -> DecoderConfig {
        let (op, inv_op, addr, inv_addr, code_size) = match mode {
            Mode::Real => (
                OpSize::Size16,
                OpSize::Size32,
                OpSize::Size16,
                OpSize::Size32,
                CodeSize::Code16,
            ),
            Mode::Protected => (
                OpSize::Size32,
                OpSize::Size16,
                OpSize::Size32,
                OpSize::Size16,
                CodeSize::Code32,
            ),
            Mode::Long => (
                OpSize::Size32,
                OpSize::Size16,
                OpSize::Size64,
                OpSize::Size32,
                CodeSize::Code64,
            ),
        };
        let long = mode == Mode::Long;

        DecoderConfig {
            mode,
            options,
            invalid_check_mask: if options.contains(DecoderOptions::NO_INVALID_CHECK) {
                0
            } else {
                !0
            },
            default_operand_size: op,
            default_inverted_operand_size: inv_op,
            default_address_size: addr,
            default_inverted_address_size: inv_addr,
            default_code_size: code_size,
            rex_mask: if long { 0xf0 } else { 0 },
            reg15_mask: if long { 0xf } else { 0x7 },
            mask_e0: if long { 0xe0 } else { 0 },
        }
    }

    pub fn is_long(&self) -> bool {
        self.mode == Mode::Long
    }

    pub fn checks_invalid(&self) -> bool {
        self.invalid_check_mask != 0
    }
}

/// Scratch state of the instruction currently being decoded.
#[derive(Debug, Clone)]
pub(crate) struct DecodeState {
    pub modrm: u8,
    pub mod_: u8,
    pub reg: u8,
    pub rm: u8,
    /// Bytes consumed so far.
    pub len: usize,
    pub flags: StateFlags,
    pub mandatory_prefix: MandatoryPrefix,
    pub operand_size: OpSize,
    pub address_size: OpSize,
    pub vvvv: u8,
    /// Unmasked vvvv including EVEX.V'. Must be zero for encodings that don't use vvvv.
    pub vvvv_invalid_check: u8,
    pub vector_length: u8,
    pub aaa: u8,
    pub extra_register_base: u8,
    pub extra_index_register_base: u8,
    pub extra_base_register_base: u8,
    pub extra_register_base_evex: u8,
    pub extra_base_register_base_evex: u8,
    pub extra_index_register_base_vsib: u8,
    /// 1 once FS or GS was seen. Later ES/CS/SS/DS prefixes are ignored in 64-bit mode.
    pub segment_priority: u8,
    /// Offset of the displacement inside the instruction.
    pub displ_index: u8,
    pub encoding: EncodingKind,
}

impl DecodeState {
    pub fn new(cfg: &DecoderConfig) -> DecodeState {
        DecodeState {
            modrm: 0,
            mod_: 0,
            reg: 0,
            rm: 0,
            len: 0,
            flags: StateFlags::empty(),
            mandatory_prefix: MandatoryPrefix::None,
            operand_size: cfg.default_operand_size,
            address_size: cfg.default_address_size,
            vvvv: 0,
            vvvv_invalid_check: 0,
            vector_length: 0,
            aaa: 0,
            extra_register_base: 0,
            extra_index_register_base: 0,
            extra_base_register_base: 0,
            extra_register_base_evex: 0,
            extra_base_register_base_evex: 0,
            extra_index_register_base_vsib: 0,
            segment_priority: 0,
            displ_index: 0,
            encoding: EncodingKind::Legacy,
        }
    }

    pub fn reset(&mut self, cfg: &DecoderConfig) {
        *self = DecodeState::new(cfg);
    }

    pub fn set_modrm(&mut self, modrm: u8) {
        self.modrm = modrm;
        self.mod_ = modrm >> 6;
        self.reg = (modrm >> 3) & 7;
        self.rm = modrm & 7;
    }

    pub fn sss(&self) -> u32 {
        (self.flags & StateFlags::MVEX_SSS).bits() >> MVEX_SSS_SHIFT
    }

    pub fn is_invalid(&self) -> bool {
        self.flags.contains(StateFlags::IS_INVALID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_mode_defaults() {
        let cfg = DecoderConfig::new(Mode::Long, DecoderOptions::empty());
        let st = DecodeState::new(&cfg);

        assert_eq!(st.operand_size, OpSize::Size32);
        assert_eq!(st.address_size, OpSize::Size64);
        assert_eq!(cfg.default_inverted_address_size, OpSize::Size32);
        assert_eq!(cfg.rex_mask, 0xf0);
        assert!(cfg.checks_invalid());
    }

    #[test]
    fn no_invalid_check_clears_mask() {
        let cfg = DecoderConfig::new(Mode::Real, DecoderOptions::NO_INVALID_CHECK);
        assert_eq!(cfg.invalid_check_mask, 0);
        assert_eq!(cfg.rex_mask, 0);
        assert_eq!(cfg.reg15_mask, 7);
    }

    #[test]
    fn modrm_split() {
        let cfg = DecoderConfig::new(Mode::Protected, DecoderOptions::empty());
        let mut st = DecodeState::new(&cfg);
        st.set_modrm(0b10_011_101);
        assert_eq!((st.mod_, st.reg, st.rm), (2, 3, 5));
    }

    #[test]
    fn sss_field() {
        let cfg = DecoderConfig::new(Mode::Long, DecoderOptions::KNC);
        let mut st = DecodeState::new(&cfg);
        st.flags |= StateFlags::from_bits_retain(5 << MVEX_SSS_SHIFT) | StateFlags::MVEX_EH;
        assert_eq!(st.sss(), 5);
    }
}
