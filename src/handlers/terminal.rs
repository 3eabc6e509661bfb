//! Handlers that produce an instruction. One generic shape: a size selector picks the code,
//! then each operand descriptor reads its part of the encoding in order.

use bitflags::bitflags;

use crate::code::Code;
use crate::common::{
    DecoderOptions, EncodingKind, MvexRegMemConv, OpKind, OpSize, RoundingControl, TupleType,
};
use crate::decoder::{DecodeContext, StateFlags};
use crate::instruction::Instruction;
use crate::reader::ByteSource;
use crate::register::Register;

bitflags! {
    /// Prefix rules and invalid-encoding checks of a terminal handler.
    #[derive(Debug, Copy, Clone, PartialEq, Eq)]
    pub(crate) struct TermFlags: u32 {
        /// LOCK is allowed if the instruction has a memory operand.
        const LOCK = 0x0001;
        /// F2/F3 are XACQUIRE/XRELEASE if LOCK is present.
        const XACQUIRE_XRELEASE = 0x0002;
        /// F2/F3 are XACQUIRE/XRELEASE even without LOCK (XCHG).
        const XACQUIRE_XRELEASE_NO_LOCK = 0x0004;
        /// F3 is XRELEASE (MOV stores).
        const XRELEASE_NO_LOCK = 0x0008;
        /// EVEX.b with a memory operand is embedded broadcast.
        const BROADCAST = 0x0010;
        /// EVEX.b with register operands selects static rounding.
        const ROUNDING = 0x0020;
        /// EVEX.b with register operands suppresses exceptions.
        const SAE = 0x0040;
        /// Opmask must be k0.
        const NO_OPMASK = 0x0080;
        /// Opmask must not be k0 (gathers/scatters).
        const REQUIRE_OPMASK = 0x0100;
        /// EVEX.z is reserved.
        const NO_ZEROING = 0x0200;
        /// Reads a ModRM byte even though no operand refers to it.
        const MODRM = 0x0400;
        /// VSIB gather: the destination can't be the index register, and with VEX the mask
        /// can't be either of them.
        const GATHER = 0x0800;
    }
}

/// How the code index and the width of `RegWidth::V` operands are derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum Sizing {
    /// One code, operand size as prefixed.
    Fixed,
    /// 16/32/64-bit operand size.
    OpSize,
    /// 16 vs 32/64-bit operand size.
    Op1632,
    /// Push/pop: 64-bit in long mode unless 66 is present.
    Stack,
    /// Near branches: 64-bit in long mode, 16-bit there only with 66 on AMD.
    Branch,
    /// Always 64-bit in long mode, otherwise by operand size.
    Mode64,
    /// 32-bit outside of long mode, 64-bit in long mode.
    Mode3264,
    /// 32-bit, or 64-bit with W in long mode.
    W,
    /// By address size.
    AddrSize,
    /// LOOPcc/JrCXZ: branch size and counter register size.
    LoopBranch,
}

impl Sizing {
    pub(crate) fn code_count(self) -> usize {
        match self {
            Sizing::Fixed => 1,
            Sizing::Op1632 | Sizing::Mode3264 | Sizing::W => 2,
            Sizing::OpSize | Sizing::Stack | Sizing::Branch | Sizing::Mode64 => 3,
            Sizing::AddrSize => 3,
            Sizing::LoopBranch => 7,
        }
    }

    /// Code index and effective operand size.
    fn resolve<R: ByteSource>(self, cx: &DecodeContext<'_, R>) -> (usize, OpSize) {
        let op = cx.state.operand_size;

        match self {
            Sizing::Fixed => (0, op),
            Sizing::OpSize => (op.index() as usize, op),
            Sizing::Op1632 => {
                if op == OpSize::Size16 {
                    (0, OpSize::Size16)
                } else {
                    (1, OpSize::Size32)
                }
            }
            Sizing::Stack => {
                let size = if cx.is_long() && op != OpSize::Size16 {
                    OpSize::Size64
                } else {
                    op
                };
                (size.index() as usize, size)
            }
            Sizing::Branch => {
                let size = branch_size(cx);
                (size.index() as usize, size)
            }
            Sizing::Mode64 => {
                let size = if cx.is_long() { OpSize::Size64 } else { op };
                (size.index() as usize, size)
            }
            Sizing::Mode3264 => {
                if cx.is_long() {
                    (1, OpSize::Size64)
                } else {
                    (0, OpSize::Size32)
                }
            }
            Sizing::W => {
                if cx.is_long() && cx.state.flags.contains(StateFlags::W) {
                    (1, OpSize::Size64)
                } else {
                    (0, OpSize::Size32)
                }
            }
            Sizing::AddrSize => (cx.state.address_size.index() as usize, op),
            Sizing::LoopBranch => {
                let size = branch_size(cx);
                let index = match (size, cx.state.address_size) {
                    (OpSize::Size16, OpSize::Size16) => 0,
                    (OpSize::Size16, OpSize::Size32) => 1,
                    (OpSize::Size16, OpSize::Size64) => 2,
                    (OpSize::Size32, OpSize::Size16) => 3,
                    (OpSize::Size32, _) => 4,
                    (OpSize::Size64, OpSize::Size64) => 6,
                    (OpSize::Size64, _) => 5,
                };
                (index, size)
            }
        }
    }
}

fn branch_size<R: ByteSource>(cx: &DecodeContext<'_, R>) -> OpSize {
    let op = cx.state.operand_size;

    if !cx.is_long() {
        op
    } else if cx.has_option(DecoderOptions::AMD) && op == OpSize::Size16 {
        OpSize::Size16
    } else {
        OpSize::Size64
    }
}

fn check_gather<R: ByteSource>(cx: &mut DecodeContext<'_, R>, instruction: &Instruction) {
    let number = |reg: Register| (reg as u32).wrapping_sub(Register::XMM0 as u32) % 32;

    let index = number(instruction.memory_index());
    let dst = number(instruction.op_register(0));
    let mut overlap = dst == index;
    if cx.state.encoding == EncodingKind::Vex {
        let mask = number(instruction.op_register(2));
        overlap |= mask == index || mask == dst;
    }
    cx.invalid_if(overlap);
}

/// Width of a general purpose register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum RegWidth {
    /// 8-bit. With any REX prefix 4..7 are SPL..DIL instead of AH..BH.
    B,
    /// Effective operand size.
    V,
    W16,
    D32,
    Q64,
}

/// Register file of a non-GPR register operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum VecClass {
    Xmm,
    Ymm,
    Zmm,
    Mm,
    K,
    Bnd,
    St,
    Tmm,
}

impl VecClass {
    fn base(self) -> Register {
        match self {
            VecClass::Xmm => Register::XMM0,
            VecClass::Ymm => Register::YMM0,
            VecClass::Zmm => Register::ZMM0,
            VecClass::Mm => Register::MM0,
            VecClass::K => Register::K0,
            VecClass::Bnd => Register::BND0,
            VecClass::St => Register::ST0,
            VecClass::Tmm => Register::TMM0,
        }
    }
}

/// One operand of a terminal and the encoding field it comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Operand {
    /// GPR in ModRM.reg
    Gpr(RegWidth),
    /// GPR in ModRM.rm, mod is ignored
    GprRm(RegWidth),
    /// GPR or memory (ModRM.rm)
    GprOrMem(RegWidth),
    /// GPR in VEX.vvvv
    GprVvvv(RegWidth),
    /// GPR in the low three opcode bits
    GprOpcode(RegWidth, u8),
    /// AL/AX/EAX/RAX
    Acc(RegWidth),
    Fixed(Register),
    /// Memory only
    Mem,
    MemMpx,
    /// Memory with a mandatory SIB byte
    MemSib,
    /// VSIB memory, the index register is from the given bank
    Vsib(VecClass),
    /// Register in ModRM.reg
    Reg(VecClass),
    /// Register in ModRM.rm, mod must be 3
    RegRm(VecClass),
    /// Register or memory
    RegOrMem(VecClass),
    /// Register in vvvv
    Vvvv(VecClass),
    /// Register in bits 7:4 of the trailing immediate byte
    Is4(VecClass),
    Sreg,
    /// Segment register that is written. CS is invalid.
    SregDst,
    Cr,
    Dr,
    Tr,
    Ib,
    Iw,
    Id,
    Iq,
    /// imm8 sign extended to the operand size
    Ibs,
    /// imm16/imm32, sign extended to 64 bits
    Iz,
    /// imm16/imm32/imm64
    Iv,
    /// Second imm8
    Ib2,
    /// Implicit 1 of the shift-by-one forms
    One,
    Jb,
    Jz,
    /// XBEGIN displacement
    Jx,
    /// ptr16:16/ptr16:32
    Far,
    /// Absolute memory offset sized by the address size
    Moffs,
    StrSrc,
    StrDst,
    /// [rDI] with the default segment (MASKMOVQ)
    StrDstSeg,
    /// [rBX+AL]
    Xlat,
}

impl Operand {
    fn uses_modrm(self) -> bool {
        use self::Operand::*;

        match self {
            Gpr(_) | GprRm(_) | GprOrMem(_) | Mem | MemMpx | MemSib | Vsib(_) | Reg(_)
            | RegRm(_) | RegOrMem(_) | Sreg | SregDst | Cr | Dr | Tr => true,
            _ => false,
        }
    }

    fn uses_vvvv(self) -> bool {
        match self {
            Operand::GprVvvv(_) | Operand::Vvvv(_) => true,
            _ => false,
        }
    }
}

/// Element type of an MVEX instruction. Determines Disp8*N for each conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum MvexElem {
    Elem32,
    Elem64,
}

/// MVEX specific behavior of a terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct MvexInfo {
    pub elem: MvexElem,
    /// Bit n set: memory conversion n is invalid.
    pub invalid_conv: u8,
    /// Bit n set: register swizzle n is invalid.
    pub invalid_swizzle: u8,
    pub sae: bool,
    pub rounding: bool,
    pub eviction_hint: bool,
}

impl MvexInfo {
    fn tuple(&self, sss: u32) -> TupleType {
        use crate::common::TupleType::*;

        let tuples = match self.elem {
            MvexElem::Elem32 => [N64, N4, N16, N32, N16, N16, N32, N32],
            MvexElem::Elem64 => [N64, N8, N32, N64, N64, N64, N64, N64],
        };
        tuples[(sss & 7) as usize]
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Terminal {
    pub modrm: bool,
    pub sizing: Sizing,
    pub codes: Box<[Code]>,
    pub operands: Box<[Operand]>,
    pub flags: TermFlags,
    pub tuple: TupleType,
    pub mvex: Option<MvexInfo>,
}

impl Terminal {
    pub(crate) fn new(sizing: Sizing, codes: &[Code], operands: &[Operand]) -> Terminal {
        Terminal {
            modrm: operands.iter().any(|op| op.uses_modrm()),
            sizing,
            codes: codes.into(),
            operands: operands.into(),
            flags: TermFlags::empty(),
            tuple: TupleType::N1,
            mvex: None,
        }
    }

    pub(crate) fn with_flags(mut self, flags: TermFlags) -> Terminal {
        self.flags |= flags;
        if flags.contains(TermFlags::MODRM) {
            self.modrm = true;
        }
        self
    }

    pub(crate) fn with_tuple(mut self, tuple: TupleType) -> Terminal {
        self.tuple = tuple;
        self
    }

    pub(crate) fn with_mvex(mut self, mvex: MvexInfo) -> Terminal {
        self.mvex = Some(mvex);
        self
    }

    pub(crate) fn has_modrm(&self) -> bool {
        self.modrm
    }

    pub(crate) fn decode<R: ByteSource>(
        &self,
        cx: &mut DecodeContext<'_, R>,
        instruction: &mut Instruction,
    ) {
        let (index, size) = self.sizing.resolve(cx);
        instruction.set_code(self.codes.get(index).cloned().unwrap_or(Code::INVALID));

        let mut has_mem = false;
        let mut mem_dst = false;
        let mut is4 = None;

        for (i, &op) in self.operands.iter().enumerate() {
            if let Operand::Is4(class) = op {
                is4 = Some((i, class));
                continue;
            }
            if self.decode_operand(op, i, size, cx, instruction) {
                has_mem = true;
                mem_dst |= i == 0;
            }
        }

        // The is4 byte always comes last, after any displacement.
        if let Some((i, class)) = is4 {
            let reg = (cx.read_byte() >> 4) & cx.cfg.reg15_mask;
            instruction.set_op_reg(i, class.base().add(reg as u32));
        }

        if has_mem && self.flags.contains(TermFlags::GATHER) {
            check_gather(cx, instruction);
        }

        if has_mem {
            if self.flags.contains(TermFlags::LOCK) {
                cx.state.flags |= StateFlags::ALLOW_LOCK;
            }
            if self.flags.contains(TermFlags::XACQUIRE_XRELEASE_NO_LOCK)
                || (self.flags.contains(TermFlags::XACQUIRE_XRELEASE)
                    && instruction.has_lock_prefix())
            {
                cx.set_xacquire_xrelease(instruction, true);
            } else if self.flags.contains(TermFlags::XRELEASE_NO_LOCK) {
                cx.set_xacquire_xrelease(instruction, false);
            }
        }

        match cx.state.encoding {
            EncodingKind::Legacy | EncodingKind::D3now => {}
            EncodingKind::Vex | EncodingKind::Xop => self.check_vvvv(cx, 0x1f),
            EncodingKind::Evex => {
                self.check_vvvv(cx, self.vvvv_mask());
                self.evex_epilogue(cx, instruction, has_mem, mem_dst);
            }
            EncodingKind::Mvex => {
                self.check_vvvv(cx, self.vvvv_mask());
                self.check_opmask(cx);
                self.mvex_epilogue(cx, instruction, has_mem);
            }
        }
    }

    /// VSIB forms use EVEX.V' as the high bit of the index register.
    fn vvvv_mask(&self) -> u8 {
        if self.operands.iter().any(|op| matches!(op, Operand::Vsib(_))) {
            0xf
        } else {
            0x1f
        }
    }

    /// Encodings that don't use vvvv must leave it 1111b.
    fn check_vvvv<R: ByteSource>(&self, cx: &mut DecodeContext<'_, R>, mask: u8) {
        if !self.operands.iter().any(|op| op.uses_vvvv()) {
            let vvvv = cx.state.vvvv_invalid_check & mask;
            cx.invalid_if(vvvv != 0);
        }
    }

    fn check_opmask<R: ByteSource>(&self, cx: &mut DecodeContext<'_, R>) {
        let aaa = cx.state.aaa;
        cx.invalid_if(self.flags.contains(TermFlags::NO_OPMASK) && aaa != 0);
        cx.invalid_if(self.flags.contains(TermFlags::REQUIRE_OPMASK) && aaa == 0);
    }

    fn evex_epilogue<R: ByteSource>(
        &self,
        cx: &mut DecodeContext<'_, R>,
        instruction: &mut Instruction,
        has_mem: bool,
        mem_dst: bool,
    ) {
        self.check_opmask(cx);

        if cx.state.flags.contains(StateFlags::Z) {
            cx.invalid_if(self.flags.contains(TermFlags::NO_ZEROING) || mem_dst);
        }

        if cx.state.flags.contains(StateFlags::B) {
            if has_mem {
                if self.flags.contains(TermFlags::BROADCAST) {
                    instruction.set_broadcast();
                } else {
                    cx.invalid_if(true);
                }
            } else if self.flags.contains(TermFlags::ROUNDING) {
                let rc = RoundingControl::from_rc(cx.state.vector_length as u32);
                instruction.set_rounding_control(rc);
            } else if self.flags.contains(TermFlags::SAE) {
                instruction.set_suppress_all_exceptions();
            } else {
                cx.invalid_if(true);
            }
        }
    }

    fn mvex_epilogue<R: ByteSource>(
        &self,
        cx: &mut DecodeContext<'_, R>,
        instruction: &mut Instruction,
        has_mem: bool,
    ) {
        let mv = match &self.mvex {
            Some(mv) => mv,
            None => return,
        };
        let sss = cx.state.sss();
        let eh = cx.state.flags.contains(StateFlags::MVEX_EH);

        if has_mem {
            if eh && mv.eviction_hint {
                instruction.set_mvex_eviction_hint();
            }
            cx.invalid_if(mv.invalid_conv & (1 << sss) != 0);
            instruction.set_mvex_reg_mem_conv(MvexRegMemConv::memory_conversion(sss));
        } else if eh {
            if mv.sae {
                if sss & 4 != 0 {
                    instruction.set_suppress_all_exceptions();
                }
                if mv.rounding {
                    instruction.set_rounding_control(RoundingControl::from_rc(sss & 3));
                }
            } else {
                cx.invalid_if(sss != 0);
            }
        } else {
            cx.invalid_if(mv.invalid_swizzle & (1 << sss) != 0);
            instruction.set_mvex_reg_mem_conv(MvexRegMemConv::register_swizzle(sss));
        }
    }

    fn mem_tuple<R: ByteSource>(&self, cx: &DecodeContext<'_, R>) -> TupleType {
        match (&self.mvex, cx.state.encoding) {
            (Some(mv), EncodingKind::Mvex) => mv.tuple(cx.state.sss()),
            _ => self.tuple,
        }
    }

    fn read_mem<R: ByteSource>(
        &self,
        i: usize,
        cx: &mut DecodeContext<'_, R>,
        instruction: &mut Instruction,
    ) {
        instruction.set_op_kind(i, OpKind::Memory);
        let tuple = self.mem_tuple(cx);
        cx.read_op_mem(instruction, tuple);
    }

    /// Decodes operand `i`. Returns `true` if it was a ModRM memory operand.
    fn decode_operand<R: ByteSource>(
        &self,
        op: Operand,
        i: usize,
        size: OpSize,
        cx: &mut DecodeContext<'_, R>,
        instruction: &mut Instruction,
    ) -> bool {
        use self::Operand::*;

        match op {
            Gpr(w) => {
                let idx = cx.state.reg + cx.state.extra_register_base;
                instruction.set_op_reg(i, gpr(cx, w, size, idx));
            }
            GprRm(w) => {
                let idx = cx.state.rm + cx.state.extra_base_register_base;
                instruction.set_op_reg(i, gpr(cx, w, size, idx));
            }
            GprOrMem(w) => {
                if cx.state.mod_ != 3 {
                    self.read_mem(i, cx, instruction);
                    return true;
                }
                let idx = cx.state.rm + cx.state.extra_base_register_base;
                instruction.set_op_reg(i, gpr(cx, w, size, idx));
            }
            GprVvvv(w) => {
                let idx = cx.state.vvvv;
                instruction.set_op_reg(i, gpr(cx, w, size, idx));
            }
            GprOpcode(w, n) => {
                let idx = n + cx.state.extra_base_register_base;
                instruction.set_op_reg(i, gpr(cx, w, size, idx));
            }
            Acc(w) => instruction.set_op_reg(i, gpr(cx, w, size, 0)),
            Fixed(reg) => instruction.set_op_reg(i, reg),
            Mem => {
                if cx.state.mod_ == 3 {
                    cx.set_invalid();
                    return false;
                }
                self.read_mem(i, cx, instruction);
                return true;
            }
            MemMpx => {
                if cx.state.mod_ == 3 {
                    cx.set_invalid();
                    return false;
                }
                instruction.set_op_kind(i, OpKind::Memory);
                cx.read_op_mem_mpx(instruction);
                return true;
            }
            MemSib => {
                if cx.state.mod_ == 3 {
                    cx.set_invalid();
                    return false;
                }
                instruction.set_op_kind(i, OpKind::Memory);
                let tuple = self.mem_tuple(cx);
                cx.read_op_mem_sib(instruction, tuple);
                return true;
            }
            Vsib(class) => {
                if cx.state.mod_ == 3 {
                    cx.set_invalid();
                    return false;
                }
                instruction.set_op_kind(i, OpKind::Memory);
                let tuple = self.mem_tuple(cx);
                cx.read_op_mem_vsib(instruction, class.base(), tuple);
                return true;
            }
            Reg(class) => {
                let reg = reg_field(cx, class);
                instruction.set_op_reg(i, reg);
            }
            RegRm(class) => {
                if cx.state.mod_ != 3 {
                    cx.set_invalid();
                    return false;
                }
                let reg = rm_field(cx, class);
                instruction.set_op_reg(i, reg);
            }
            RegOrMem(class) => {
                if cx.state.mod_ != 3 {
                    self.read_mem(i, cx, instruction);
                    return true;
                }
                let reg = rm_field(cx, class);
                instruction.set_op_reg(i, reg);
            }
            Vvvv(class) => {
                let reg = vvvv_field(cx, class);
                instruction.set_op_reg(i, reg);
            }
            Is4(_) => {}
            Sreg | SregDst => {
                let reg = cx.state.reg;
                if reg < 6 {
                    let sreg = Register::ES.add(reg as u32);
                    cx.invalid_if(op == SregDst && sreg == Register::CS);
                    instruction.set_op_reg(i, sreg);
                } else {
                    cx.set_invalid();
                    instruction.set_op_reg(i, Register::None);
                }
            }
            Cr => {
                let mut extra = cx.state.extra_register_base;
                if cx.state.flags.contains(StateFlags::LOCK) && cx.has_option(DecoderOptions::AMD)
                {
                    // AMD encodes CR8 as LOCK MOV CR0
                    cx.invalid_if(extra != 0);
                    extra = 8;
                    instruction.set_lock_prefix(false);
                    cx.state.flags.remove(StateFlags::LOCK);
                }
                let reg = cx.state.reg + extra;
                cx.invalid_if(reg == 1 || (reg != 8 && reg >= 5));
                instruction.set_op_reg(i, Register::CR0.add(reg as u32));
            }
            Dr => {
                let reg = cx.state.reg + cx.state.extra_register_base;
                cx.invalid_if(reg > 7);
                instruction.set_op_reg(i, Register::DR0.add(reg as u32));
            }
            Tr => {
                instruction.set_op_reg(i, Register::TR0.add(cx.state.reg as u32));
            }
            Ib => {
                instruction.set_op_kind(i, OpKind::Immediate8);
                let imm = cx.read_byte();
                instruction.set_immediate(imm as u64);
            }
            Iw => {
                instruction.set_op_kind(i, OpKind::Immediate16);
                let imm = cx.read_u16();
                instruction.set_immediate(imm as u64);
            }
            Id => {
                instruction.set_op_kind(i, OpKind::Immediate32);
                let imm = cx.read_u32();
                instruction.set_immediate(imm as u64);
            }
            Iq => {
                instruction.set_op_kind(i, OpKind::Immediate64);
                let imm = cx.read_u64();
                instruction.set_immediate(imm);
            }
            Ibs => {
                let kind = match size {
                    OpSize::Size16 => OpKind::Immediate8to16,
                    OpSize::Size32 => OpKind::Immediate8to32,
                    OpSize::Size64 => OpKind::Immediate8to64,
                };
                instruction.set_op_kind(i, kind);
                let imm = cx.read_byte();
                instruction.set_immediate(imm as u64);
            }
            Iz => {
                if size == OpSize::Size16 {
                    instruction.set_op_kind(i, OpKind::Immediate16);
                    let imm = cx.read_u16();
                    instruction.set_immediate(imm as u64);
                } else {
                    let kind = if size == OpSize::Size64 {
                        OpKind::Immediate32to64
                    } else {
                        OpKind::Immediate32
                    };
                    instruction.set_op_kind(i, kind);
                    let imm = cx.read_u32();
                    instruction.set_immediate(imm as u64);
                }
            }
            Iv => match size {
                OpSize::Size16 => return self.decode_operand(Iw, i, size, cx, instruction),
                OpSize::Size32 => return self.decode_operand(Id, i, size, cx, instruction),
                OpSize::Size64 => return self.decode_operand(Iq, i, size, cx, instruction),
            },
            Ib2 => {
                instruction.set_op_kind(i, OpKind::Immediate8_2nd);
                let imm = cx.read_byte();
                instruction.set_immediate8_2nd(imm);
            }
            One => {
                cx.state.flags |= StateFlags::NO_IMM;
                instruction.set_op_kind(i, OpKind::Immediate8);
                instruction.set_immediate(1);
            }
            Jb => {
                cx.state.flags |= StateFlags::BRANCH_IMM8;
                let displ = cx.read_byte() as i8 as i64;
                set_near_branch(cx, instruction, i, branch_size(cx), displ);
            }
            Jz => {
                let bs = branch_size(cx);
                let displ = if bs == OpSize::Size16 {
                    cx.read_u16() as i16 as i64
                } else {
                    cx.read_u32() as i32 as i64
                };
                set_near_branch(cx, instruction, i, bs, displ);
            }
            Jx => {
                cx.state.flags |= StateFlags::XBEGIN;
                let displ = if cx.state.operand_size == OpSize::Size16 {
                    cx.read_u16() as i16 as i64
                } else {
                    cx.read_u32() as i32 as i64
                };
                let bs = if cx.is_long() {
                    OpSize::Size64
                } else {
                    OpSize::Size32
                };
                set_near_branch(cx, instruction, i, bs, displ);
            }
            Far => {
                if size == OpSize::Size16 {
                    instruction.set_op_kind(i, OpKind::FarBranch16);
                    let offset = cx.read_u16() as u32;
                    let selector = cx.read_u16();
                    instruction.set_far_branch(offset, selector);
                } else {
                    instruction.set_op_kind(i, OpKind::FarBranch32);
                    let offset = cx.read_u32();
                    let selector = cx.read_u16();
                    instruction.set_far_branch(offset, selector);
                }
            }
            Moffs => {
                instruction.set_op_kind(i, OpKind::Memory);
                cx.state.displ_index = cx.state.len as u8;
                match cx.state.address_size {
                    OpSize::Size64 => {
                        instruction.set_memory_displ_size(8);
                        cx.state.flags |= StateFlags::ADDR64;
                        let displ = cx.read_u64();
                        instruction.set_memory_displacement64(displ);
                    }
                    OpSize::Size32 => {
                        instruction.set_memory_displ_size(4);
                        let displ = cx.read_u32();
                        instruction.set_memory_displacement64(displ as u64);
                    }
                    OpSize::Size16 => {
                        instruction.set_memory_displ_size(2);
                        let displ = cx.read_u16();
                        instruction.set_memory_displacement64(displ as u64);
                    }
                }
            }
            StrSrc => {
                let kind = match cx.state.address_size {
                    OpSize::Size16 => OpKind::MemorySegSI,
                    OpSize::Size32 => OpKind::MemorySegESI,
                    OpSize::Size64 => OpKind::MemorySegRSI,
                };
                instruction.set_op_kind(i, kind);
            }
            StrDst => {
                let kind = match cx.state.address_size {
                    OpSize::Size16 => OpKind::MemoryESDI,
                    OpSize::Size32 => OpKind::MemoryESEDI,
                    OpSize::Size64 => OpKind::MemoryESRDI,
                };
                instruction.set_op_kind(i, kind);
            }
            StrDstSeg => {
                let kind = match cx.state.address_size {
                    OpSize::Size16 => OpKind::MemorySegDI,
                    OpSize::Size32 => OpKind::MemorySegEDI,
                    OpSize::Size64 => OpKind::MemorySegRDI,
                };
                instruction.set_op_kind(i, kind);
            }
            Xlat => {
                instruction.set_op_kind(i, OpKind::Memory);
                let base = match cx.state.address_size {
                    OpSize::Size16 => Register::BX,
                    OpSize::Size32 => Register::EBX,
                    OpSize::Size64 => Register::RBX,
                };
                instruction.set_memory_base(base);
                instruction.set_memory_index(Register::AL);
                instruction.set_memory_index_scale_raw(0);
            }
        }

        false
    }
}

fn gpr<R: ByteSource>(cx: &DecodeContext<'_, R>, w: RegWidth, size: OpSize, idx: u8) -> Register {
    let idx = idx as u32;

    match w {
        RegWidth::B => {
            if cx.state.flags.contains(StateFlags::HAS_REX) && idx >= 4 {
                Register::AL.add(idx + 4)
            } else {
                Register::AL.add(idx)
            }
        }
        RegWidth::V => Register::AX.add(size.index() * 16 + idx),
        RegWidth::W16 => Register::AX.add(idx),
        RegWidth::D32 => Register::EAX.add(idx),
        RegWidth::Q64 => Register::RAX.add(idx),
    }
}

fn reg_field<R: ByteSource>(cx: &mut DecodeContext<'_, R>, class: VecClass) -> Register {
    let st = &*cx.state;
    let base = class.base();

    match class {
        VecClass::Xmm | VecClass::Ymm | VecClass::Zmm => {
            let idx = st.reg + st.extra_register_base + st.extra_register_base_evex;
            base.add(idx as u32)
        }
        VecClass::Mm | VecClass::St => base.add(st.reg as u32),
        VecClass::K => {
            let extra = st.extra_register_base | st.extra_register_base_evex;
            let reg = st.reg;
            cx.invalid_if(extra != 0);
            base.add(reg as u32)
        }
        VecClass::Bnd | VecClass::Tmm => {
            let idx = st.reg + st.extra_register_base;
            let limit = if class == VecClass::Bnd { 3 } else { 7 };
            cx.invalid_if(idx > limit);
            base.add((idx & limit) as u32)
        }
    }
}

fn rm_field<R: ByteSource>(cx: &mut DecodeContext<'_, R>, class: VecClass) -> Register {
    let st = &*cx.state;
    let base = class.base();

    match class {
        VecClass::Xmm | VecClass::Ymm | VecClass::Zmm => {
            let idx = st.rm + st.extra_base_register_base + st.extra_base_register_base_evex;
            base.add(idx as u32)
        }
        VecClass::Mm | VecClass::St | VecClass::K => base.add(st.rm as u32),
        VecClass::Bnd | VecClass::Tmm => {
            let idx = st.rm + st.extra_base_register_base;
            let limit = if class == VecClass::Bnd { 3 } else { 7 };
            cx.invalid_if(idx > limit);
            base.add((idx & limit) as u32)
        }
    }
}

fn vvvv_field<R: ByteSource>(cx: &mut DecodeContext<'_, R>, class: VecClass) -> Register {
    let vvvv = cx.state.vvvv;
    let base = class.base();

    match class {
        VecClass::Xmm | VecClass::Ymm | VecClass::Zmm => base.add(vvvv as u32),
        _ => {
            cx.invalid_if(cx.state.vvvv_invalid_check > 7);
            base.add((vvvv & 7) as u32)
        }
    }
}

fn set_near_branch<R: ByteSource>(
    cx: &DecodeContext<'_, R>,
    instruction: &mut Instruction,
    i: usize,
    size: OpSize,
    displ: i64,
) {
    let target = cx.current_ip().wrapping_add(displ as u64);

    match size {
        OpSize::Size16 => {
            instruction.set_op_kind(i, OpKind::NearBranch16);
            instruction.set_near_branch(target as u16 as u64);
        }
        OpSize::Size32 => {
            instruction.set_op_kind(i, OpKind::NearBranch32);
            instruction.set_near_branch(target as u32 as u64);
        }
        OpSize::Size64 => {
            instruction.set_op_kind(i, OpKind::NearBranch64);
            instruction.set_near_branch(target);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modrm_is_derived_from_operands() {
        let t = Terminal::new(
            Sizing::OpSize,
            &[Code::Add_rm16_r16, Code::Add_rm32_r32, Code::Add_rm64_r64],
            &[Operand::GprOrMem(RegWidth::V), Operand::Gpr(RegWidth::V)],
        );
        assert!(t.has_modrm());

        let t = Terminal::new(Sizing::Fixed, &[Code::Cpuid], &[]);
        assert!(!t.has_modrm());
        assert!(t.with_flags(TermFlags::MODRM).has_modrm());
    }

    #[test]
    fn code_counts() {
        assert_eq!(Sizing::Fixed.code_count(), 1);
        assert_eq!(Sizing::W.code_count(), 2);
        assert_eq!(Sizing::Stack.code_count(), 3);
        assert_eq!(Sizing::LoopBranch.code_count(), 7);
    }

    #[test]
    fn mvex_disp8_scale() {
        let mv = MvexInfo {
            elem: MvexElem::Elem32,
            invalid_conv: 0,
            invalid_swizzle: 0,
            sae: false,
            rounding: false,
            eviction_hint: true,
        };
        assert_eq!(mv.tuple(0), TupleType::N64);
        assert_eq!(mv.tuple(1), TupleType::N4);
        assert_eq!(mv.tuple(5), TupleType::N16);
    }
}
