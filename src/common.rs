#![allow(non_camel_case_types)]

use bitflags::bitflags;

use crate::error::DecoderCreateError;

/// Longest legal x86 instruction, in bytes. Reading past this marks the instruction invalid.
pub const MAX_INSTRUCTION_LENGTH: usize = 15;

/// Processor mode the byte stream is decoded for.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum Mode {
    /// 16-bit code
    Real,
    /// 32-bit code
    Protected,
    /// 64-bit code
    Long,
}

impl Mode {
    pub fn from_bitness(bitness: u32) -> Result<Mode, DecoderCreateError> {
        match bitness {
            16 => Ok(Mode::Real),
            32 => Ok(Mode::Protected),
            64 => Ok(Mode::Long),
            b => Err(DecoderCreateError::UnsupportedBitness(b)),
        }
    }

    pub fn bitness(self) -> u32 {
        match self {
            Mode::Real => 16,
            Mode::Protected => 32,
            Mode::Long => 64,
        }
    }
}

/// Code size an instruction was decoded in.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum CodeSize {
    Unknown,
    Code16,
    Code32,
    Code64,
}

impl Default for CodeSize {
    fn default() -> Self {
        CodeSize::Unknown
    }
}

/// Effective operand or address size.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub(crate) enum OpSize {
    Size16,
    Size32,
    Size64,
}

impl OpSize {
    /// 0, 1 or 2. Used to step through register banks (AX, EAX, RAX) and code siblings.
    pub(crate) fn index(self) -> u32 {
        match self {
            OpSize::Size16 => 0,
            OpSize::Size32 => 1,
            OpSize::Size64 => 2,
        }
    }

    pub(crate) fn bits(self) -> u32 {
        16 << self.index()
    }
}

/// Operand kinds reported by `Instruction::op_kind`.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum OpKind {
    Register,
    NearBranch16,
    NearBranch32,
    NearBranch64,
    FarBranch16,
    FarBranch32,
    Immediate8,
    Immediate8_2nd,
    Immediate16,
    Immediate32,
    Immediate64,
    Immediate8to16,
    Immediate8to32,
    Immediate8to64,
    Immediate32to64,
    MemorySegSI,
    MemorySegESI,
    MemorySegRSI,
    MemorySegDI,
    MemorySegEDI,
    MemorySegRDI,
    MemoryESDI,
    MemoryESEDI,
    MemoryESRDI,
    Memory,
}

impl Default for OpKind {
    fn default() -> Self {
        OpKind::Register
    }
}

/// Result of the last `Decoder::decode` call.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum DecoderError {
    None,
    /// The instruction is structurally invalid.
    InvalidInstruction,
    /// The byte source ran out (or the 15 byte limit was hit) before the instruction was complete.
    NoMoreBytes,
}

/// Legacy prefix acting as an opcode extension (none/66/F3/F2).
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub(crate) enum MandatoryPrefix {
    None,
    P66,
    PF3,
    PF2,
}

impl MandatoryPrefix {
    pub(crate) fn from_bits(pp: u8) -> MandatoryPrefix {
        match pp & 3 {
            0 => MandatoryPrefix::None,
            1 => MandatoryPrefix::P66,
            2 => MandatoryPrefix::PF3,
            _ => MandatoryPrefix::PF2,
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            MandatoryPrefix::None => 0,
            MandatoryPrefix::P66 => 1,
            MandatoryPrefix::PF3 => 2,
            MandatoryPrefix::PF2 => 3,
        }
    }
}

impl Default for MandatoryPrefix {
    fn default() -> Self {
        MandatoryPrefix::None
    }
}

bitflags! {
    /// Decoder behavior switches. Bits without a named constant are kept and ignored.
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    pub struct DecoderOptions: u32 {
        /// Skip all structural validity checks and decode what the bits say.
        const NO_INVALID_CHECK = 0x0000_0001;
        /// AMD decoding rules: 16-bit near branches in 64-bit mode, `LOCK MOV CR0` as `MOV CR8`.
        const AMD = 0x0000_0002;
        /// Decode 0F 0D and 0F 18-1F as reserved NOPs.
        const FORCE_RESERVED_NOP = 0x0000_0004;
        /// `UMOV` (0F 10-13) in 16/32-bit mode.
        const UMOV = 0x0000_0008;
        /// `XBTS`/`IBTS` (0F A6/A7) in 16/32-bit mode.
        const XBTS = 0x0000_0010;
        /// 486 A-stepping `CMPXCHG` (0F A6/A7) in 16/32-bit mode.
        const CMPXCHG486A = 0x0000_0020;
        /// `PCOMMIT` (66 0F AE F8).
        const PCOMMIT = 0x0000_0080;
        /// `CL1INVMB` (0F 0A) in 16/32-bit mode.
        const CL1INVMB = 0x0000_0400;
        /// `JMPE` (0F 00 /6 and 0F B8) in 16/32-bit mode.
        const JMPE = 0x0000_1000;
        /// `UD0` (0F FF) has no operands, the old AMD/Cyrix form.
        const UDBG = 0x0000_8000;
        /// `MOV r32, TRx` and `MOV TRx, r32` (0F 24/0F 26) in 16/32-bit mode.
        const MOV_TR = 0x0000_0800;
        /// 286 `LOADALL` (0F 05) in 16/32-bit mode.
        const LOADALL286 = 0x0000_0100;
        /// 386 `LOADALL` (0F 07) in 16/32-bit mode.
        const LOADALL386 = 0x0000_0200;
        /// F3 90 is `NOP` with a REP prefix instead of `PAUSE`.
        const NO_PAUSE = 0x0000_2000;
        /// F3 0F 09 is `WBINVD` with a REP prefix instead of `WBNOINVD`.
        const NO_WBNOINVD = 0x0000_4000;
        /// F3 0F BC is `BSF` instead of `TZCNT`.
        const NO_MPFX_0FBC = 0x0001_0000;
        /// F3 0F BD is `BSR` instead of `LZCNT`.
        const NO_MPFX_0FBD = 0x0002_0000;
        /// `LAHF`/`SAHF` are invalid in 64-bit mode.
        const NO_LAHF_SAHF_64 = 0x0004_0000;
        /// Knights Corner MVEX instructions (62 with P1 bit 2 clear) in 64-bit mode.
        const KNC = 0x0100_0000;

        const _ = !0;
    }
}

/// Shape of an AVX-512 memory operand. Determines the Disp8*N scale factor.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, FromPrimitive)]
pub enum TupleType {
    N1,
    N2,
    N4,
    N8,
    N16,
    N32,
    N64,
    N8b4,
    N16b4,
    N32b4,
    N64b4,
    N16b8,
    N32b8,
    N64b8,
    N4b2,
    N8b2,
    N16b2,
    N32b2,
    N64b2,
}

impl Default for TupleType {
    fn default() -> Self {
        TupleType::N1
    }
}

impl TupleType {
    /// Disp8 scale factor, depending on whether EVEX.b (broadcast) is set.
    pub fn disp8n(self, broadcast: bool) -> u32 {
        use self::TupleType::*;

        let (full, bcst) = match self {
            N1 => (1, 1),
            N2 => (2, 2),
            N4 => (4, 4),
            N8 => (8, 8),
            N16 => (16, 16),
            N32 => (32, 32),
            N64 => (64, 64),
            N8b4 => (8, 4),
            N16b4 => (16, 4),
            N32b4 => (32, 4),
            N64b4 => (64, 4),
            N16b8 => (16, 8),
            N32b8 => (32, 8),
            N64b8 => (64, 8),
            N4b2 => (4, 2),
            N8b2 => (8, 2),
            N16b2 => (16, 2),
            N32b2 => (32, 2),
            N64b2 => (64, 2),
        };

        if broadcast {
            bcst
        } else {
            full
        }
    }
}

/// EVEX static rounding mode.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum RoundingControl {
    None,
    RoundToNearest,
    RoundDown,
    RoundUp,
    RoundTowardZero,
}

impl Default for RoundingControl {
    fn default() -> Self {
        RoundingControl::None
    }
}

impl RoundingControl {
    /// `RC` field value (0..=3) to rounding mode.
    pub(crate) fn from_rc(rc: u32) -> RoundingControl {
        match rc & 3 {
            0 => RoundingControl::RoundToNearest,
            1 => RoundingControl::RoundDown,
            2 => RoundingControl::RoundUp,
            _ => RoundingControl::RoundTowardZero,
        }
    }
}

/// MVEX register swizzle or memory up/down conversion selected by the `sss` bits.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum MvexRegMemConv {
    None,
    RegSwizzleNone,
    RegSwizzleCdab,
    RegSwizzleBadc,
    RegSwizzleDacb,
    RegSwizzleAaaa,
    RegSwizzleBbbb,
    RegSwizzleCccc,
    RegSwizzleDddd,
    MemConvNone,
    MemConvBroadcast1,
    MemConvBroadcast4,
    MemConvFloat16,
    MemConvUint8,
    MemConvSint8,
    MemConvUint16,
    MemConvSint16,
}

impl Default for MvexRegMemConv {
    fn default() -> Self {
        MvexRegMemConv::None
    }
}

impl MvexRegMemConv {
    pub(crate) fn register_swizzle(sss: u32) -> MvexRegMemConv {
        use self::MvexRegMemConv::*;
        [
            RegSwizzleNone,
            RegSwizzleCdab,
            RegSwizzleBadc,
            RegSwizzleDacb,
            RegSwizzleAaaa,
            RegSwizzleBbbb,
            RegSwizzleCccc,
            RegSwizzleDddd,
        ][(sss & 7) as usize]
    }

    pub(crate) fn memory_conversion(sss: u32) -> MvexRegMemConv {
        use self::MvexRegMemConv::*;
        [
            MemConvNone,
            MemConvBroadcast1,
            MemConvBroadcast4,
            MemConvFloat16,
            MemConvUint8,
            MemConvSint8,
            MemConvUint16,
            MemConvSint16,
        ][(sss & 7) as usize]
    }
}

/// Prefix family an instruction was encoded with.
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash)]
pub enum EncodingKind {
    Legacy,
    Vex,
    Evex,
    Xop,
    D3now,
    Mvex,
}

impl Default for EncodingKind {
    fn default() -> Self {
        EncodingKind::Legacy
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitness_round_trips_through_mode() {
        for &b in &[16, 32, 64] {
            assert_eq!(Mode::from_bitness(b).unwrap().bitness(), b);
        }
        assert!(Mode::from_bitness(8).is_err());
        assert!(Mode::from_bitness(0).is_err());
    }

    #[test]
    fn disp8n_depends_on_broadcast() {
        assert_eq!(TupleType::N1.disp8n(false), 1);
        assert_eq!(TupleType::N64.disp8n(true), 64);
        assert_eq!(TupleType::N64b4.disp8n(false), 64);
        assert_eq!(TupleType::N64b4.disp8n(true), 4);
        assert_eq!(TupleType::N32b8.disp8n(true), 8);
        assert_eq!(TupleType::N16b2.disp8n(true), 2);
    }

    #[test]
    fn unknown_option_bits_are_retained() {
        let opts = DecoderOptions::from_bits_retain(0x8000_0000 | DecoderOptions::AMD.bits());
        assert!(opts.contains(DecoderOptions::AMD));
        assert_eq!(opts.bits() & 0x8000_0000, 0x8000_0000);
    }

    #[test]
    fn rounding_control_from_field() {
        assert_eq!(RoundingControl::from_rc(0), RoundingControl::RoundToNearest);
        assert_eq!(RoundingControl::from_rc(3), RoundingControl::RoundTowardZero);
    }
}
