//! Opcode handlers. A table maps an opcode byte to a handler which either selects another
//! handler based on some part of the decode state or decodes the instruction itself.

use std::sync::Arc;

use crate::code::Code;
use crate::common::{DecoderOptions, EncodingKind, MandatoryPrefix, OpKind};
use crate::decoder::{DecodeContext, StateFlags};
use crate::instruction::Instruction;
use crate::reader::ByteSource;
use crate::register::Register;

mod terminal;

pub(crate) use self::terminal::{
    MvexElem, MvexInfo, Operand, RegWidth, Sizing, TermFlags, Terminal, VecClass,
};

pub(crate) type HandlerRef = Arc<OpCodeHandler>;

/// Legacy prefix bytes handled by `OpCodeHandler::Prefix`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum PrefixKind {
    Es,
    Cs,
    Ss,
    Ds,
    Fs,
    Gs,
    OperandSize,
    AddressSize,
    Lock,
    Repne,
    Repe,
}

/// Which decoder options an `Options` handler looks at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromPrimitive)]
pub(crate) enum OptionsScope {
    /// Consulted in every mode. The ModRM byte hasn't been read yet.
    Any,
    /// Consulted in 16 and 32-bit mode only. The ModRM byte hasn't been read yet.
    Only1632,
    /// Consulted in every mode. The ModRM byte has already been read.
    DontReadModRM,
}

#[derive(Debug)]
pub(crate) enum OpCodeHandler {
    /// Not an instruction.
    Invalid { modrm: bool },
    /// Selects by ModRM.reg.
    Group(Box<[HandlerRef]>),
    /// Selects by ModRM.reg, separate tables for register and memory forms.
    Group8x8 {
        mem: Box<[HandlerRef]>,
        reg: Box<[HandlerRef]>,
    },
    /// Selects by ModRM.reg for memory forms and by the low six ModRM bits for register forms,
    /// falling back to the reg table for empty entries.
    Group8x64 {
        low: Box<[HandlerRef]>,
        high: Box<[Option<HandlerRef>]>,
    },
    /// Reads the next opcode byte from another table.
    AnotherTable(Arc<[HandlerRef]>),
    /// Register or memory form.
    Rm { reg: HandlerRef, mem: HandlerRef },
    /// Selects by none/66/F3/F2. With `clear`, an F2/F3 used this way isn't reported as a
    /// REP prefix.
    MandatoryPrefix {
        modrm: bool,
        clear: bool,
        handlers: Box<[HandlerRef]>,
    },
    /// Selects by REX.W/VEX.W/EVEX.W.
    W { w0: HandlerRef, w1: HandlerRef },
    /// Selects by mode. With `modrm`, the ModRM byte was read by the caller, otherwise it's
    /// read after the selection if the chosen handler wants one.
    Bitness {
        modrm: bool,
        legacy: HandlerRef,
        long: HandlerRef,
    },
    /// First alternate whose options are all enabled, `default` otherwise.
    Options {
        scope: OptionsScope,
        default: HandlerRef,
        alternates: Box<[(DecoderOptions, HandlerRef)]>,
    },
    /// Selects by vector length. With `er`, a register form with EVEX.b set always takes the
    /// 512-bit entry because L'L holds the rounding mode.
    VectorLength {
        modrm: bool,
        er: bool,
        handlers: Box<[HandlerRef]>,
    },
    /// MVEX eviction hint bit.
    Eh { eh0: HandlerRef, eh1: HandlerRef },
    /// 0F 0D and 0F 18..1F when reserved NOPs are forced.
    ReservedNop {
        reserved_nop: HandlerRef,
        other: HandlerRef,
    },
    /// 0F 09 (WBINVD or, with F3, WBNOINVD).
    Wbinvd,
    /// 90..97: XCHG with the accumulator, NOP and PAUSE.
    XchgRegRax(u8),
    /// 0F 0F: 3DNow!, the opcode follows the operands.
    D3Now(Box<[Code]>),
    Prefix(PrefixKind),
    /// 40..4F, REX in 64-bit mode and `fallback` otherwise.
    Rex { fallback: HandlerRef, rex: u8 },
    /// C5: VEX2 in 64-bit mode or with mod == 3, otherwise `legacy` (LDS).
    Vex2(HandlerRef),
    /// C4: VEX3, otherwise LES.
    Vex3(HandlerRef),
    /// 8F: XOP when the map select is at least 8, otherwise POP Ev.
    Xop(HandlerRef),
    /// 62: EVEX/MVEX, otherwise BOUND.
    Evex(HandlerRef),
    Terminal(Box<Terminal>),
}

impl OpCodeHandler {
    /// Whether the ModRM byte is read before `decode` runs.
    pub(crate) fn has_modrm(&self) -> bool {
        use self::OpCodeHandler::*;

        match self {
            Invalid { modrm } => *modrm,
            Group(_) | Group8x8 { .. } | Group8x64 { .. } | Rm { .. } | W { .. } => true,
            AnotherTable(_) => false,
            MandatoryPrefix { modrm, .. } => *modrm,
            Bitness { modrm, .. } => *modrm,
            Options { scope, .. } => *scope == OptionsScope::DontReadModRM,
            VectorLength { modrm, .. } => *modrm,
            Eh { .. } | ReservedNop { .. } => true,
            Wbinvd | XchgRegRax(_) => false,
            D3Now(_) => true,
            Prefix(_) | Rex { .. } => false,
            Vex2(_) | Vex3(_) | Xop(_) | Evex(_) => true,
            Terminal(t) => t.has_modrm(),
        }
    }

    pub(crate) fn decode<R: ByteSource>(
        &self,
        cx: &mut DecodeContext<'_, R>,
        instruction: &mut Instruction,
    ) {
        use self::OpCodeHandler::*;

        match self {
            Invalid { .. } => cx.set_invalid(),
            Group(handlers) => handlers[cx.state.reg as usize].decode(cx, instruction),
            Group8x8 { mem, reg } => {
                let table = if cx.state.mod_ == 3 { reg } else { mem };
                table[cx.state.reg as usize].decode(cx, instruction)
            }
            Group8x64 { low, high } => {
                if cx.state.mod_ == 3 {
                    if let Some(h) = &high[(cx.state.modrm & 0x3f) as usize] {
                        return h.decode(cx, instruction);
                    }
                }
                low[cx.state.reg as usize].decode(cx, instruction)
            }
            AnotherTable(table) => cx.decode_table(table, instruction),
            Rm { reg, mem } => {
                let h = if cx.state.mod_ == 3 { reg } else { mem };
                h.decode(cx, instruction)
            }
            MandatoryPrefix {
                modrm,
                clear,
                handlers,
            } => {
                if *clear {
                    cx.clear_mandatory_prefix(instruction);
                }
                let h = &handlers[cx.state.mandatory_prefix.index()];
                if *modrm {
                    h.decode(cx, instruction)
                } else {
                    cx.dispatch(h, instruction)
                }
            }
            W { w0, w1 } => {
                let h = if cx.state.flags.contains(StateFlags::W) {
                    w1
                } else {
                    w0
                };
                h.decode(cx, instruction)
            }
            Bitness {
                modrm,
                legacy,
                long,
            } => {
                let h = if cx.is_long() { long } else { legacy };
                if *modrm {
                    h.decode(cx, instruction)
                } else {
                    cx.dispatch(h, instruction)
                }
            }
            Options {
                scope,
                default,
                alternates,
            } => {
                let mut h = default;
                if *scope != OptionsScope::Only1632 || !cx.is_long() {
                    if let Some((_, alt)) = alternates
                        .iter()
                        .find(|(opts, _)| cx.cfg.options.contains(*opts))
                    {
                        h = alt;
                    }
                }
                if *scope == OptionsScope::DontReadModRM {
                    h.decode(cx, instruction)
                } else {
                    cx.dispatch(h, instruction)
                }
            }
            VectorLength {
                modrm,
                er,
                handlers,
            } => {
                let mut index = cx.state.vector_length as usize;
                if *er && cx.state.mod_ == 3 && cx.state.flags.contains(StateFlags::B) {
                    index = 2;
                }
                let h = &handlers[index];
                if *modrm {
                    h.decode(cx, instruction)
                } else {
                    cx.dispatch(h, instruction)
                }
            }
            Eh { eh0, eh1 } => {
                let h = if cx.state.flags.contains(StateFlags::MVEX_EH) {
                    eh1
                } else {
                    eh0
                };
                h.decode(cx, instruction)
            }
            ReservedNop {
                reserved_nop,
                other,
            } => {
                let h = if cx.has_option(DecoderOptions::FORCE_RESERVED_NOP) {
                    reserved_nop
                } else {
                    other
                };
                h.decode(cx, instruction)
            }
            Wbinvd => cx.wbinvd(instruction),
            XchgRegRax(index) => decode_xchg_reg_rax(*index, cx, instruction),
            D3Now(codes) => decode_d3now(codes, cx, instruction),
            Prefix(kind) => match kind {
                PrefixKind::Es => cx.segment_prefix(Register::ES, instruction),
                PrefixKind::Cs => cx.segment_prefix(Register::CS, instruction),
                PrefixKind::Ss => cx.segment_prefix(Register::SS, instruction),
                PrefixKind::Ds => cx.segment_prefix(Register::DS, instruction),
                PrefixKind::Fs => cx.segment_prefix(Register::FS, instruction),
                PrefixKind::Gs => cx.segment_prefix(Register::GS, instruction),
                PrefixKind::OperandSize => cx.operand_size_prefix(instruction),
                PrefixKind::AddressSize => cx.address_size_prefix(instruction),
                PrefixKind::Lock => cx.lock_prefix(instruction),
                PrefixKind::Repne => cx.rep_prefix(true, instruction),
                PrefixKind::Repe => cx.rep_prefix(false, instruction),
            },
            Rex { fallback, rex } => cx.rex_prefix(*rex, fallback, instruction),
            Vex2(legacy) => {
                if cx.is_long() || cx.state.mod_ == 3 {
                    cx.vex2(instruction)
                } else {
                    legacy.decode(cx, instruction)
                }
            }
            Vex3(legacy) => {
                if cx.is_long() || cx.state.mod_ == 3 {
                    cx.vex3(instruction)
                } else {
                    legacy.decode(cx, instruction)
                }
            }
            Xop(reg0) => {
                if cx.state.modrm & 0x1f < 8 {
                    reg0.decode(cx, instruction)
                } else {
                    cx.xop(instruction)
                }
            }
            Evex(legacy) => {
                if cx.is_long() || cx.state.mod_ == 3 {
                    cx.evex_mvex(instruction)
                } else {
                    legacy.decode(cx, instruction)
                }
            }
            Terminal(t) => t.decode(cx, instruction),
        }
    }
}

/// 90+r. Index 0 without REX.B is NOP, or PAUSE with F3.
fn decode_xchg_reg_rax<R: ByteSource>(
    index: u8,
    cx: &mut DecodeContext<'_, R>,
    instruction: &mut Instruction,
) {
    if index == 0
        && cx.state.mandatory_prefix == MandatoryPrefix::PF3
        && !cx.has_option(DecoderOptions::NO_PAUSE)
    {
        cx.clear_mandatory_prefix_f3(instruction);
        instruction.set_code(Code::Pause);
        return;
    }

    let size = cx.state.operand_size;
    let reg = (index + cx.state.extra_base_register_base) as u32;
    let bank = Register::AX.add(size.index() * 16);

    if reg == 0 {
        instruction.set_code(match size.index() {
            0 => Code::Nopw,
            1 => Code::Nopd,
            _ => Code::Nopq,
        });
    } else {
        instruction.set_code(match size.index() {
            0 => Code::Xchg_r16_AX,
            1 => Code::Xchg_r32_EAX,
            _ => Code::Xchg_r64_RAX,
        });
        instruction.set_op_reg(0, bank.add(reg));
        instruction.set_op_reg(1, bank);
    }
}

/// 0F 0F /r ib. The suffix byte after the memory operand picks the instruction.
fn decode_d3now<R: ByteSource>(
    codes: &[Code],
    cx: &mut DecodeContext<'_, R>,
    instruction: &mut Instruction,
) {
    cx.state.encoding = EncodingKind::D3now;
    instruction.set_encoding(EncodingKind::D3now);
    instruction.set_op_reg(0, Register::MM0.add(cx.state.reg as u32));
    if cx.state.mod_ == 3 {
        instruction.set_op_reg(1, Register::MM0.add(cx.state.rm as u32));
    } else {
        instruction.set_op_kind(1, OpKind::Memory);
        cx.read_op_mem(instruction, crate::common::TupleType::N1);
    }

    let code = codes[cx.read_byte() as usize];
    if code == Code::INVALID {
        cx.set_invalid();
    }
    instruction.set_code(code);
}
