//! Byte values of the table blob format.

/// Handler kind bytes. The first two double as record tags at the top level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum Kind {
    /// Back reference to a handler record by id.
    HandlerReference = 0x00,
    /// Back reference to an array record by id. Also the array record tag.
    ArrayReference = 0x01,
    Invalid = 0x02,
    InvalidNoModrm = 0x03,
    /// Two invalid handlers in a row.
    Invalid2 = 0x04,
    /// One handler repeated `count` times.
    Dup = 0x05,
    /// Empty slot. Only allowed where the array is nullable.
    Null = 0x06,

    Group = 0x10,
    Group8x8 = 0x11,
    Group8x64 = 0x12,
    AnotherTable = 0x13,
    Rm = 0x14,
    MandatoryPrefix = 0x15,
    W = 0x16,
    Bitness = 0x17,
    Options = 0x18,
    VectorLength = 0x19,
    Eh = 0x1a,
    ReservedNop = 0x1b,
    Wbinvd = 0x1c,
    XchgRegRax = 0x1d,
    D3Now = 0x1e,
    Prefix = 0x1f,
    Rex = 0x20,
    Vex2 = 0x21,
    Vex3 = 0x22,
    Xop = 0x23,
    Evex = 0x24,
    Terminal = 0x25,
}

/// Operand shape bytes inside a terminal descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum OperandTag {
    Gpr = 0,
    GprRm,
    GprOrMem,
    GprVvvv,
    GprOpcode,
    Acc,
    Fixed,
    Mem,
    MemMpx,
    MemSib,
    Vsib,
    Reg,
    RegRm,
    RegOrMem,
    Vvvv,
    Is4,
    Sreg,
    SregDst,
    Cr,
    Dr,
    Tr,
    Ib,
    Iw,
    Id,
    Iq,
    Ibs,
    Iz,
    Iv,
    Ib2,
    One,
    Jb,
    Jz,
    Jx,
    Far,
    Moffs,
    StrSrc,
    StrDst,
    StrDstSeg,
    Xlat,
}

/// The opcode map families. Each has its own blob and its own set of allowed kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Family {
    Legacy,
    Vex,
    Xop,
    Evex,
    Mvex,
}

impl Family {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Family::Legacy => "legacy",
            Family::Vex => "VEX",
            Family::Xop => "XOP",
            Family::Evex => "EVEX",
            Family::Mvex => "MVEX",
        }
    }

    pub(crate) fn allows(self, kind: Kind) -> bool {
        match kind {
            Kind::Prefix
            | Kind::Rex
            | Kind::Vex2
            | Kind::Vex3
            | Kind::Xop
            | Kind::Evex
            | Kind::Wbinvd
            | Kind::XchgRegRax
            | Kind::D3Now
            | Kind::ReservedNop => self == Family::Legacy,
            Kind::Eh => self == Family::Mvex,
            _ => true,
        }
    }
}

/// Bits of the MVEX descriptor byte.
pub(crate) const MVEX_SAE: u8 = 1;
pub(crate) const MVEX_ROUNDING: u8 = 2;
pub(crate) const MVEX_EVICTION_HINT: u8 = 4;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prefix_kinds_are_legacy_only() {
        assert!(Family::Legacy.allows(Kind::Vex2));
        assert!(!Family::Vex.allows(Kind::Vex2));
        assert!(!Family::Evex.allows(Kind::Prefix));
        assert!(Family::Mvex.allows(Kind::Eh));
        assert!(!Family::Evex.allows(Kind::Eh));
        assert!(Family::Xop.allows(Kind::Terminal));
    }
}
