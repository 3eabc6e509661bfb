//! Shorthand used by the table descriptions.

use crate::code::Code;
use crate::common::{DecoderOptions, TupleType};
use crate::handlers::{
    MvexElem, MvexInfo, Operand, OptionsScope, RegWidth, Sizing, TermFlags, Terminal, VecClass,
};
use crate::register::Register;
use crate::table_de::writer::Node;

/// `vec![Node::from(a), Node::from(b), ..]`
macro_rules! nodes {
    ($($n:expr),* $(,)?) => {
        vec![$($crate::table_de::writer::Node::from($n)),*]
    };
}

// General purpose registers and memory.
pub(super) const EB: Operand = Operand::GprOrMem(RegWidth::B);
pub(super) const EV: Operand = Operand::GprOrMem(RegWidth::V);
pub(super) const EW: Operand = Operand::GprOrMem(RegWidth::W16);
pub(super) const ED: Operand = Operand::GprOrMem(RegWidth::D32);
pub(super) const EQ: Operand = Operand::GprOrMem(RegWidth::Q64);
pub(super) const GB: Operand = Operand::Gpr(RegWidth::B);
pub(super) const GV: Operand = Operand::Gpr(RegWidth::V);
pub(super) const GD: Operand = Operand::Gpr(RegWidth::D32);
pub(super) const GQ: Operand = Operand::Gpr(RegWidth::Q64);
pub(super) const RV: Operand = Operand::GprRm(RegWidth::V);
pub(super) const RD: Operand = Operand::GprRm(RegWidth::D32);
pub(super) const BV: Operand = Operand::GprVvvv(RegWidth::V);
pub(super) const AL: Operand = Operand::Acc(RegWidth::B);
pub(super) const AV: Operand = Operand::Acc(RegWidth::V);
pub(super) const CL: Operand = Operand::Fixed(Register::CL);
pub(super) const DX: Operand = Operand::Fixed(Register::DX);
pub(super) const M: Operand = Operand::Mem;
pub(super) const MIB: Operand = Operand::MemMpx;
pub(super) const MSIB: Operand = Operand::MemSib;

// Immediates and branches.
pub(super) const IB: Operand = Operand::Ib;
pub(super) const IW: Operand = Operand::Iw;
pub(super) const ID: Operand = Operand::Id;
pub(super) const IBS: Operand = Operand::Ibs;
pub(super) const IZ: Operand = Operand::Iz;
pub(super) const IV: Operand = Operand::Iv;
pub(super) const IB2: Operand = Operand::Ib2;
pub(super) const ONE: Operand = Operand::One;
pub(super) const JB: Operand = Operand::Jb;
pub(super) const JZ: Operand = Operand::Jz;

// x87, MMX and bound registers.
pub(super) const ST0: Operand = Operand::Fixed(Register::ST0);
pub(super) const STI: Operand = Operand::RegRm(VecClass::St);
pub(super) const PQ: Operand = Operand::Reg(VecClass::Mm);
pub(super) const QQ: Operand = Operand::RegOrMem(VecClass::Mm);
pub(super) const NQ: Operand = Operand::RegRm(VecClass::Mm);
pub(super) const BNDG: Operand = Operand::Reg(VecClass::Bnd);
pub(super) const BNDE: Operand = Operand::RegOrMem(VecClass::Bnd);

// Vector registers: V is ModRM.reg, W is reg/mem, U is ModRM.rm, H is vvvv, L is is4.
pub(super) const VX: Operand = Operand::Reg(VecClass::Xmm);
pub(super) const VY: Operand = Operand::Reg(VecClass::Ymm);
pub(super) const VZ: Operand = Operand::Reg(VecClass::Zmm);
pub(super) const WX: Operand = Operand::RegOrMem(VecClass::Xmm);
pub(super) const WY: Operand = Operand::RegOrMem(VecClass::Ymm);
pub(super) const WZ: Operand = Operand::RegOrMem(VecClass::Zmm);
pub(super) const UX: Operand = Operand::RegRm(VecClass::Xmm);
pub(super) const UY: Operand = Operand::RegRm(VecClass::Ymm);
pub(super) const HX: Operand = Operand::Vvvv(VecClass::Xmm);
pub(super) const HY: Operand = Operand::Vvvv(VecClass::Ymm);
pub(super) const HZ: Operand = Operand::Vvvv(VecClass::Zmm);
pub(super) const LX: Operand = Operand::Is4(VecClass::Xmm);
pub(super) const LY: Operand = Operand::Is4(VecClass::Ymm);
pub(super) const XMM0: Operand = Operand::Fixed(Register::XMM0);

// Opmask registers.
pub(super) const KG: Operand = Operand::Reg(VecClass::K);
pub(super) const KR: Operand = Operand::RegRm(VecClass::K);
pub(super) const KW: Operand = Operand::RegOrMem(VecClass::K);
pub(super) const KH: Operand = Operand::Vvvv(VecClass::K);

// AMX tile registers.
pub(super) const TG: Operand = Operand::Reg(VecClass::Tmm);
pub(super) const TR: Operand = Operand::RegRm(VecClass::Tmm);
pub(super) const TH: Operand = Operand::Vvvv(VecClass::Tmm);

/// Register classes for L = 0, 1, 2.
pub(super) const XYZ: [VecClass; 3] = [VecClass::Xmm, VecClass::Ymm, VecClass::Zmm];

/// Full vector Disp8*N for 32 and 64-bit elements and full vector memory without broadcast.
pub(super) const FV32: [TupleType; 3] = [TupleType::N16b4, TupleType::N32b4, TupleType::N64b4];
pub(super) const FV64: [TupleType; 3] = [TupleType::N16b8, TupleType::N32b8, TupleType::N64b8];
pub(super) const FV16: [TupleType; 3] = [TupleType::N16b2, TupleType::N32b2, TupleType::N64b2];
pub(super) const FVM: [TupleType; 3] = [TupleType::N16, TupleType::N32, TupleType::N64];

pub(super) fn blank() -> Vec<Node> {
    vec![Node::Invalid; 256]
}

pub(super) fn inv() -> Node {
    Node::Invalid
}

pub(super) fn inv_nm() -> Node {
    Node::InvalidNoModrm
}

/// Single code terminal.
pub(super) fn fx(code: Code, ops: &[Operand]) -> Terminal {
    Terminal::new(Sizing::Fixed, &[code], ops)
}

/// Terminal whose code is picked by `sizing`.
pub(super) fn sz(sizing: Sizing, codes: &[Code], ops: &[Operand]) -> Terminal {
    Terminal::new(sizing, codes, ops)
}

/// 16/32/64-bit operand size forms.
pub(super) fn v3(codes: [Code; 3], ops: &[Operand]) -> Terminal {
    Terminal::new(Sizing::OpSize, &codes, ops)
}

pub(super) fn group(handlers: Vec<Node>) -> Node {
    Node::Group(handlers)
}

pub(super) fn group8x8(mem: Vec<Node>, reg: Vec<Node>) -> Node {
    Node::Group8x8 { mem, reg }
}

/// `high` lists the register forms by the low six ModRM bits; the rest fall back to `low`.
pub(super) fn group8x64(low: Vec<Node>, high: Vec<(u8, Node)>) -> Node {
    let mut slots = vec![Node::Null; 64];
    for (modrm, h) in high {
        slots[(modrm & 0x3f) as usize] = h;
    }
    Node::Group8x64 { low, high: slots }
}

pub(super) fn rm(reg: impl Into<Node>, mem: impl Into<Node>) -> Node {
    Node::Rm {
        reg: Box::new(reg.into()),
        mem: Box::new(mem.into()),
    }
}

/// Selects by none/66/F3/F2 after the ModRM byte.
pub(super) fn mp(
    none: impl Into<Node>,
    p66: impl Into<Node>,
    pf3: impl Into<Node>,
    pf2: impl Into<Node>,
) -> Node {
    Node::MandatoryPrefix {
        modrm: true,
        clear: true,
        handlers: nodes![none.into(), p66.into(), pf3.into(), pf2.into()],
    }
}

/// Selects by none/66/F3/F2 before the ModRM byte.
pub(super) fn mp_nomodrm(
    none: impl Into<Node>,
    p66: impl Into<Node>,
    pf3: impl Into<Node>,
    pf2: impl Into<Node>,
) -> Node {
    Node::MandatoryPrefix {
        modrm: false,
        clear: true,
        handlers: nodes![none.into(), p66.into(), pf3.into(), pf2.into()],
    }
}

pub(super) fn w(w0: impl Into<Node>, w1: impl Into<Node>) -> Node {
    Node::W {
        w0: Box::new(w0.into()),
        w1: Box::new(w1.into()),
    }
}

/// 16/32-bit mode vs 64-bit mode, ModRM read afterwards.
pub(super) fn bits(legacy: impl Into<Node>, long: impl Into<Node>) -> Node {
    Node::Bitness {
        modrm: false,
        legacy: Box::new(legacy.into()),
        long: Box::new(long.into()),
    }
}

/// 16/32-bit mode vs 64-bit mode, ModRM already read.
pub(super) fn bits_modrm(legacy: impl Into<Node>, long: impl Into<Node>) -> Node {
    Node::Bitness {
        modrm: true,
        legacy: Box::new(legacy.into()),
        long: Box::new(long.into()),
    }
}

/// Invalid in 64-bit mode.
pub(super) fn not64(h: impl Into<Node>) -> Node {
    bits(h, inv())
}

/// Only valid in 64-bit mode. ModRM already read.
pub(super) fn only64(h: impl Into<Node>) -> Node {
    bits_modrm(inv(), h)
}

pub(super) fn opts(
    scope: OptionsScope,
    default: impl Into<Node>,
    alternates: Vec<(DecoderOptions, Node)>,
) -> Node {
    Node::Options {
        scope,
        default: Box::new(default.into()),
        alternates,
    }
}

/// By L = 0, 1, 2. ModRM already read.
pub(super) fn vl(l0: impl Into<Node>, l1: impl Into<Node>, l2: impl Into<Node>) -> Node {
    Node::VectorLength {
        modrm: true,
        er: false,
        handlers: nodes![l0.into(), l1.into(), l2.into(), inv()],
    }
}

/// By L = 0, 1, 2, register forms with EVEX.b always take the 512-bit entry (L'L holds RC).
pub(super) fn vl_er(l0: impl Into<Node>, l1: impl Into<Node>, l2: impl Into<Node>) -> Node {
    Node::VectorLength {
        modrm: true,
        er: true,
        handlers: nodes![l0.into(), l1.into(), l2.into(), inv()],
    }
}

/// By L before the ModRM byte (VZEROUPPER/VZEROALL).
pub(super) fn vl_nomodrm(l0: impl Into<Node>, l1: impl Into<Node>) -> Node {
    Node::VectorLength {
        modrm: false,
        er: false,
        handlers: nodes![l0.into(), l1.into(), inv_nm(), inv_nm()],
    }
}

/// Only valid with L = 0.
pub(super) fn l0(h: impl Into<Node>) -> Node {
    vl(h, inv(), inv())
}

pub(super) fn eh(eh0: impl Into<Node>, eh1: impl Into<Node>) -> Node {
    Node::Eh {
        eh0: Box::new(eh0.into()),
        eh1: Box::new(eh1.into()),
    }
}

pub(super) fn reserved_nop(nop: impl Into<Node>, other: impl Into<Node>) -> Node {
    Node::ReservedNop {
        reserved_nop: Box::new(nop.into()),
        other: Box::new(other.into()),
    }
}

/// Packed single/double and scalar single/double forms of an SSE arithmetic op.
pub(super) fn sse4(ps: Code, pd: Code, ss: Code, sd: Code) -> Node {
    mp(
        fx(ps, &[VX, WX]),
        fx(pd, &[VX, WX]),
        fx(ss, &[VX, WX]),
        fx(sd, &[VX, WX]),
    )
}

/// Packed single/double forms only.
pub(super) fn sse2(ps: Code, pd: Code) -> Node {
    mp(fx(ps, &[VX, WX]), fx(pd, &[VX, WX]), inv(), inv())
}

/// MMX form without a prefix and SSE2 form with 66.
pub(super) fn mmx_sse(mm: Code, xmm: Code) -> Node {
    mp(fx(mm, &[PQ, QQ]), fx(xmm, &[VX, WX]), inv(), inv())
}

/// 66 prefixed SSE form only.
pub(super) fn p66(code: Code, ops: &[Operand]) -> Node {
    mp(inv(), fx(code, ops), inv(), inv())
}

/// VEX 128/256-bit forms, `ops` given for the 128-bit form and widened for L1.
pub(super) fn vex2l(c128: Code, c256: Code, ops: &[Operand]) -> Node {
    vl(fx(c128, ops), fx(c256, &widen(ops, VecClass::Ymm)), inv())
}

/// Same operand shape with every XMM operand replaced by `class`.
pub(super) fn widen(ops: &[Operand], class: VecClass) -> Vec<Operand> {
    ops.iter()
        .map(|op| match *op {
            Operand::Reg(VecClass::Xmm) => Operand::Reg(class),
            Operand::RegRm(VecClass::Xmm) => Operand::RegRm(class),
            Operand::RegOrMem(VecClass::Xmm) => Operand::RegOrMem(class),
            Operand::Vvvv(VecClass::Xmm) => Operand::Vvvv(class),
            Operand::Is4(VecClass::Xmm) => Operand::Is4(class),
            other => other,
        })
        .collect()
}

/// EVEX 128/256/512-bit forms. `ops` are given for the 128-bit form.
pub(super) fn evex3(
    codes: [Code; 3],
    ops: &[Operand],
    flags: TermFlags,
    tuples: [TupleType; 3],
) -> Node {
    let form = |l: usize| -> Node {
        Terminal::new(Sizing::Fixed, &[codes[l]], &widen(ops, XYZ[l]))
            .with_flags(flags)
            .with_tuple(tuples[l])
            .into()
    };
    if flags.intersects(TermFlags::ROUNDING | TermFlags::SAE) {
        vl_er(form(0), form(1), form(2))
    } else {
        vl(form(0), form(1), form(2))
    }
}

/// EVEX scalar form, vector length ignored.
pub(super) fn evex_scalar(code: Code, ops: &[Operand], flags: TermFlags, tuple: TupleType) -> Node {
    fx(code, ops).with_flags(flags).with_tuple(tuple).into()
}

/// MVEX descriptor for 32-bit elements.
pub(super) fn mvex32(invalid_conv: u8, invalid_swizzle: u8) -> MvexInfo {
    MvexInfo {
        elem: MvexElem::Elem32,
        invalid_conv,
        invalid_swizzle,
        sae: false,
        rounding: false,
        eviction_hint: true,
    }
}

/// MVEX descriptor for 64-bit elements.
pub(super) fn mvex64(invalid_conv: u8, invalid_swizzle: u8) -> MvexInfo {
    MvexInfo {
        elem: MvexElem::Elem64,
        ..mvex32(invalid_conv, invalid_swizzle)
    }
}
