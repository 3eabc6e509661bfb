#![allow(non_camel_case_types)]

use num_traits::FromPrimitive;

/// Register identifiers. Each bank is contiguous so a register can be computed as
/// `bank base + encoded index`.
#[derive(PartialEq, Eq, PartialOrd, Ord, FromPrimitive, Clone, Copy, Debug, Hash)]
#[rustfmt::skip]
pub enum Register {
    None,
    // 8-bit general purpose registers. SPL..DIL need a REX prefix.
    AL, CL, DL, BL, AH, CH, DH, BH,
    SPL, BPL, SIL, DIL, R8L, R9L, R10L, R11L,
    R12L, R13L, R14L, R15L,
    AX, CX, DX, BX, SP, BP, SI, DI,
    R8W, R9W, R10W, R11W, R12W, R13W, R14W, R15W,
    EAX, ECX, EDX, EBX, ESP, EBP, ESI, EDI,
    R8D, R9D, R10D, R11D, R12D, R13D, R14D, R15D,
    RAX, RCX, RDX, RBX, RSP, RBP, RSI, RDI,
    R8, R9, R10, R11, R12, R13, R14, R15,
    EIP, RIP,
    ES, CS, SS, DS, FS, GS,
    XMM0, XMM1, XMM2, XMM3, XMM4, XMM5, XMM6, XMM7,
    XMM8, XMM9, XMM10, XMM11, XMM12, XMM13, XMM14, XMM15,
    XMM16, XMM17, XMM18, XMM19, XMM20, XMM21, XMM22, XMM23,
    XMM24, XMM25, XMM26, XMM27, XMM28, XMM29, XMM30, XMM31,
    YMM0, YMM1, YMM2, YMM3, YMM4, YMM5, YMM6, YMM7,
    YMM8, YMM9, YMM10, YMM11, YMM12, YMM13, YMM14, YMM15,
    YMM16, YMM17, YMM18, YMM19, YMM20, YMM21, YMM22, YMM23,
    YMM24, YMM25, YMM26, YMM27, YMM28, YMM29, YMM30, YMM31,
    ZMM0, ZMM1, ZMM2, ZMM3, ZMM4, ZMM5, ZMM6, ZMM7,
    ZMM8, ZMM9, ZMM10, ZMM11, ZMM12, ZMM13, ZMM14, ZMM15,
    ZMM16, ZMM17, ZMM18, ZMM19, ZMM20, ZMM21, ZMM22, ZMM23,
    ZMM24, ZMM25, ZMM26, ZMM27, ZMM28, ZMM29, ZMM30, ZMM31,
    // Opmask registers
    K0, K1, K2, K3, K4, K5, K6, K7,
    BND0, BND1, BND2, BND3,
    CR0, CR1, CR2, CR3, CR4, CR5, CR6, CR7,
    CR8, CR9, CR10, CR11, CR12, CR13, CR14, CR15,
    DR0, DR1, DR2, DR3, DR4, DR5, DR6, DR7,
    DR8, DR9, DR10, DR11, DR12, DR13, DR14, DR15,
    TR0, TR1, TR2, TR3, TR4, TR5, TR6, TR7,
    // x87 stack
    ST0, ST1, ST2, ST3, ST4, ST5, ST6, ST7,
    MM0, MM1, MM2, MM3, MM4, MM5, MM6, MM7,
    TMM0, TMM1, TMM2, TMM3, TMM4, TMM5, TMM6, TMM7,
}

impl Default for Register {
    fn default() -> Self {
        Register::None
    }
}

impl Register {
    /// Register with the given raw id, `Register::None` if out of range.
    pub fn from_index(index: u32) -> Register {
        Register::from_u32(index).unwrap_or(Register::None)
    }

    /// `self` moved `n` registers forward in the enumeration.
    pub(crate) fn add(self, n: u32) -> Register {
        Register::from_index(self as u32 + n)
    }

    pub fn is_gpr(self) -> bool {
        Register::AL <= self && self <= Register::R15
    }

    pub fn is_segment(self) -> bool {
        Register::ES <= self && self <= Register::GS
    }

    pub fn is_vector(self) -> bool {
        Register::XMM0 <= self && self <= Register::ZMM31
    }

    pub fn is_opmask(self) -> bool {
        Register::K0 <= self && self <= Register::K7
    }

    /// Size in bytes, 0 for `None`.
    pub fn size(self) -> usize {
        use self::Register::*;

        match self {
            None => 0,
            r if r <= R15L => 1,
            r if r <= R15W => 2,
            r if r <= R15D => 4,
            r if r <= R15 => 8,
            EIP => 4,
            RIP => 8,
            r if r <= GS => 2,
            r if r <= XMM31 => 16,
            r if r <= YMM31 => 32,
            r if r <= ZMM31 => 64,
            r if r <= K7 => 8,
            r if r <= BND3 => 16,
            r if r <= DR15 => 8,
            r if r <= TR7 => 4,
            r if r <= ST7 => 10,
            r if r <= MM7 => 8,
            _ => 1024,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn banks_are_contiguous() {
        assert_eq!(Register::AL.add(4), Register::AH);
        assert_eq!(Register::AL.add(8), Register::SPL);
        assert_eq!(Register::AX.add(16), Register::EAX);
        assert_eq!(Register::EAX.add(16), Register::RAX);
        assert_eq!(Register::R8.add(7), Register::R15);
        assert_eq!(Register::XMM0.add(32), Register::YMM0);
        assert_eq!(Register::YMM0.add(32), Register::ZMM0);
        assert_eq!(Register::ES.add(5), Register::GS);
        assert_eq!(Register::TMM7 as u32, 248);
    }

    #[test]
    fn out_of_range_is_none() {
        assert_eq!(Register::from_index(249), Register::None);
        assert_eq!(Register::TMM7.add(1), Register::None);
    }

    #[test]
    fn sizes() {
        assert_eq!(Register::DIL.size(), 1);
        assert_eq!(Register::R9W.size(), 2);
        assert_eq!(Register::RIP.size(), 8);
        assert_eq!(Register::ZMM3.size(), 64);
        assert_eq!(Register::ST3.size(), 10);
        assert!(Register::K1.is_opmask());
        assert!(!Register::EIP.is_gpr());
    }
}
