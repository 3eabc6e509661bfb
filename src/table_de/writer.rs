//! Produces table blobs from handler descriptions. Runs once when the tables are built; the
//! output is only ever consumed by `TableDeserializer`.

use crate::code::Code;
use crate::common::DecoderOptions;
use crate::error::TableError;
use crate::handlers::{OptionsScope, Operand, PrefixKind, Terminal};
use crate::table_de::kinds::{
    Kind, OperandTag, MVEX_EVICTION_HINT, MVEX_ROUNDING, MVEX_SAE,
};

/// Description of a handler. Mirrors `OpCodeHandler`, with earlier records referenced by id.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Node {
    Invalid,
    InvalidNoModrm,
    /// Empty slot of a `Group8x64` register table.
    Null,
    /// Handler record written before.
    Ref(u32),
    Group(Vec<Node>),
    Group8x8 {
        mem: Vec<Node>,
        reg: Vec<Node>,
    },
    Group8x64 {
        low: Vec<Node>,
        high: Vec<Node>,
    },
    /// Array record written before.
    AnotherTable(u32),
    Rm {
        reg: Box<Node>,
        mem: Box<Node>,
    },
    MandatoryPrefix {
        modrm: bool,
        clear: bool,
        handlers: Vec<Node>,
    },
    W {
        w0: Box<Node>,
        w1: Box<Node>,
    },
    Bitness {
        modrm: bool,
        legacy: Box<Node>,
        long: Box<Node>,
    },
    Options {
        scope: OptionsScope,
        default: Box<Node>,
        alternates: Vec<(DecoderOptions, Node)>,
    },
    VectorLength {
        modrm: bool,
        er: bool,
        handlers: Vec<Node>,
    },
    Eh {
        eh0: Box<Node>,
        eh1: Box<Node>,
    },
    ReservedNop {
        reserved_nop: Box<Node>,
        other: Box<Node>,
    },
    Wbinvd,
    XchgRegRax(u8),
    /// Suffix byte to code. Missing suffixes are invalid.
    D3Now(Vec<(u8, Code)>),
    Prefix(PrefixKind),
    Rex {
        fallback: Box<Node>,
        rex: u8,
    },
    Vex2(Box<Node>),
    Vex3(Box<Node>),
    Xop(Box<Node>),
    Evex(Box<Node>),
    Terminal(Terminal),
}

impl From<Terminal> for Node {
    fn from(t: Terminal) -> Node {
        Node::Terminal(t)
    }
}

/// Appends records to a blob and hands out their ids.
#[derive(Debug, Default)]
pub(crate) struct TableWriter {
    out: Vec<u8>,
    next_id: u32,
}

impl TableWriter {
    pub(crate) fn new() -> TableWriter {
        TableWriter::default()
    }

    /// Writes a handler record and returns its id.
    pub(crate) fn handler(&mut self, node: &Node) -> Result<u32, TableError> {
        self.out.push(Kind::HandlerReference as u8);
        self.write_node(node)?;
        Ok(self.bump())
    }

    /// Writes an array record and returns its id.
    pub(crate) fn array(&mut self, nodes: &[Node]) -> Result<u32, TableError> {
        self.out.push(Kind::ArrayReference as u8);
        self.write_u32(nodes.len() as u32);
        self.write_slots(nodes)?;
        Ok(self.bump())
    }

    pub(crate) fn len(&self) -> usize {
        self.out.len()
    }

    pub(crate) fn finish(self) -> Vec<u8> {
        self.out
    }

    fn bump(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    fn write_u8(&mut self, b: u8) {
        self.out.push(b);
    }

    fn write_bool(&mut self, b: bool) {
        self.out.push(b as u8);
    }

    /// LEB128
    fn write_u32(&mut self, mut v: u32) {
        loop {
            let b = (v & 0x7f) as u8;
            v >>= 7;
            if v == 0 {
                self.out.push(b);
                return;
            }
            self.out.push(b | 0x80);
        }
    }

    fn write_kind(&mut self, kind: Kind) {
        self.out.push(kind as u8);
    }

    /// Writes `nodes` as consecutive slots, folding runs into DUP and INVALID2 entries.
    fn write_slots(&mut self, nodes: &[Node]) -> Result<(), TableError> {
        let mut i = 0;

        while i < nodes.len() {
            let node = &nodes[i];
            let run = nodes[i..].iter().take_while(|n| *n == node).count();

            if run == 2 && *node == Node::Invalid {
                self.write_kind(Kind::Invalid2);
            } else if run >= 3 {
                self.write_kind(Kind::Dup);
                self.write_u32(run as u32);
                self.write_node(node)?;
            } else {
                self.write_node(node)?;
                i += 1;
                continue;
            }
            i += run;
        }

        Ok(())
    }

    fn write_node(&mut self, node: &Node) -> Result<(), TableError> {
        match node {
            Node::Invalid => self.write_kind(Kind::Invalid),
            Node::InvalidNoModrm => self.write_kind(Kind::InvalidNoModrm),
            Node::Null => self.write_kind(Kind::Null),
            Node::Ref(id) => {
                self.write_kind(Kind::HandlerReference);
                self.write_u32(*id);
            }
            Node::Group(handlers) => {
                self.write_kind(Kind::Group);
                self.write_fixed(handlers, 8)?;
            }
            Node::Group8x8 { mem, reg } => {
                self.write_kind(Kind::Group8x8);
                self.write_fixed(mem, 8)?;
                self.write_fixed(reg, 8)?;
            }
            Node::Group8x64 { low, high } => {
                self.write_kind(Kind::Group8x64);
                self.write_fixed(low, 8)?;
                self.write_fixed(high, 64)?;
            }
            Node::AnotherTable(id) => {
                self.write_kind(Kind::AnotherTable);
                self.write_kind(Kind::ArrayReference);
                self.write_u32(*id);
            }
            Node::Rm { reg, mem } => {
                self.write_kind(Kind::Rm);
                self.write_node(reg)?;
                self.write_node(mem)?;
            }
            Node::MandatoryPrefix {
                modrm,
                clear,
                handlers,
            } => {
                self.write_kind(Kind::MandatoryPrefix);
                self.write_bool(*modrm);
                self.write_bool(*clear);
                self.write_fixed(handlers, 4)?;
            }
            Node::W { w0, w1 } => {
                self.write_kind(Kind::W);
                self.write_node(w0)?;
                self.write_node(w1)?;
            }
            Node::Bitness {
                modrm,
                legacy,
                long,
            } => {
                self.write_kind(Kind::Bitness);
                self.write_bool(*modrm);
                self.write_node(legacy)?;
                self.write_node(long)?;
            }
            Node::Options {
                scope,
                default,
                alternates,
            } => {
                self.write_kind(Kind::Options);
                self.write_u8(*scope as u8);
                self.write_node(default)?;
                self.write_u32(alternates.len() as u32);
                for (options, alt) in alternates {
                    self.write_u32(options.bits());
                    self.write_node(alt)?;
                }
            }
            Node::VectorLength {
                modrm,
                er,
                handlers,
            } => {
                self.write_kind(Kind::VectorLength);
                self.write_bool(*modrm);
                self.write_bool(*er);
                self.write_fixed(handlers, 4)?;
            }
            Node::Eh { eh0, eh1 } => {
                self.write_kind(Kind::Eh);
                self.write_node(eh0)?;
                self.write_node(eh1)?;
            }
            Node::ReservedNop {
                reserved_nop,
                other,
            } => {
                self.write_kind(Kind::ReservedNop);
                self.write_node(reserved_nop)?;
                self.write_node(other)?;
            }
            Node::Wbinvd => self.write_kind(Kind::Wbinvd),
            Node::XchgRegRax(index) => {
                self.write_kind(Kind::XchgRegRax);
                self.write_u8(*index);
            }
            Node::D3Now(codes) => {
                self.write_kind(Kind::D3Now);
                self.write_u32(codes.len() as u32);
                for &(suffix, code) in codes {
                    self.write_u8(suffix);
                    self.write_u32(code as u32);
                }
            }
            Node::Prefix(kind) => {
                self.write_kind(Kind::Prefix);
                self.write_u8(*kind as u8);
            }
            Node::Rex { fallback, rex } => {
                self.write_kind(Kind::Rex);
                self.write_u8(*rex);
                self.write_node(fallback)?;
            }
            Node::Vex2(legacy) => {
                self.write_kind(Kind::Vex2);
                self.write_node(legacy)?;
            }
            Node::Vex3(legacy) => {
                self.write_kind(Kind::Vex3);
                self.write_node(legacy)?;
            }
            Node::Xop(legacy) => {
                self.write_kind(Kind::Xop);
                self.write_node(legacy)?;
            }
            Node::Evex(legacy) => {
                self.write_kind(Kind::Evex);
                self.write_node(legacy)?;
            }
            Node::Terminal(t) => self.write_terminal(t)?,
        }

        Ok(())
    }

    /// A nested handler list of a fixed size.
    fn write_fixed(&mut self, nodes: &[Node], size: usize) -> Result<(), TableError> {
        if nodes.len() != size {
            return Err(TableError::BadArrayLength {
                id: self.next_id,
                expected: size,
                found: nodes.len(),
            });
        }
        self.write_slots(nodes)
    }

    fn write_terminal(&mut self, t: &Terminal) -> Result<(), TableError> {
        let expected = t.sizing.code_count();
        if t.codes.len() != expected {
            return Err(TableError::BadCodeCount {
                expected,
                found: t.codes.len(),
            });
        }
        let base = t.codes[0] as u32;
        if t
            .codes
            .iter()
            .enumerate()
            .any(|(i, &c)| c as u32 != base + i as u32)
        {
            return Err(TableError::NonContiguousCodes(format!("{:?}", t.codes[0])));
        }

        self.write_kind(Kind::Terminal);
        self.write_bool(t.modrm);
        self.write_u8(t.sizing as u8);
        self.write_u32(base);
        self.write_u8(t.operands.len() as u8);
        for op in t.operands.iter() {
            self.write_operand(*op);
        }
        self.write_u32(t.flags.bits());
        self.write_u8(t.tuple as u8);

        match &t.mvex {
            None => self.write_bool(false),
            Some(mv) => {
                self.write_bool(true);
                self.write_u8(mv.elem as u8);
                self.write_u8(mv.invalid_conv);
                self.write_u8(mv.invalid_swizzle);
                let mut bits = 0;
                if mv.sae {
                    bits |= MVEX_SAE;
                }
                if mv.rounding {
                    bits |= MVEX_ROUNDING;
                }
                if mv.eviction_hint {
                    bits |= MVEX_EVICTION_HINT;
                }
                self.write_u8(bits);
            }
        }

        Ok(())
    }

    fn write_operand(&mut self, op: Operand) {
        use self::Operand::*;

        let (tag, arg) = match op {
            Gpr(w) => (OperandTag::Gpr, Some(w as u8)),
            GprRm(w) => (OperandTag::GprRm, Some(w as u8)),
            GprOrMem(w) => (OperandTag::GprOrMem, Some(w as u8)),
            GprVvvv(w) => (OperandTag::GprVvvv, Some(w as u8)),
            GprOpcode(w, n) => {
                self.write_u8(OperandTag::GprOpcode as u8);
                self.write_u8(w as u8);
                self.write_u8(n);
                return;
            }
            Acc(w) => (OperandTag::Acc, Some(w as u8)),
            Fixed(reg) => {
                self.write_u8(OperandTag::Fixed as u8);
                self.write_u32(reg as u32);
                return;
            }
            Mem => (OperandTag::Mem, None),
            MemMpx => (OperandTag::MemMpx, None),
            MemSib => (OperandTag::MemSib, None),
            Vsib(c) => (OperandTag::Vsib, Some(c as u8)),
            Reg(c) => (OperandTag::Reg, Some(c as u8)),
            RegRm(c) => (OperandTag::RegRm, Some(c as u8)),
            RegOrMem(c) => (OperandTag::RegOrMem, Some(c as u8)),
            Vvvv(c) => (OperandTag::Vvvv, Some(c as u8)),
            Is4(c) => (OperandTag::Is4, Some(c as u8)),
            Sreg => (OperandTag::Sreg, None),
            SregDst => (OperandTag::SregDst, None),
            Cr => (OperandTag::Cr, None),
            Dr => (OperandTag::Dr, None),
            Tr => (OperandTag::Tr, None),
            Ib => (OperandTag::Ib, None),
            Iw => (OperandTag::Iw, None),
            Id => (OperandTag::Id, None),
            Iq => (OperandTag::Iq, None),
            Ibs => (OperandTag::Ibs, None),
            Iz => (OperandTag::Iz, None),
            Iv => (OperandTag::Iv, None),
            Ib2 => (OperandTag::Ib2, None),
            One => (OperandTag::One, None),
            Jb => (OperandTag::Jb, None),
            Jz => (OperandTag::Jz, None),
            Jx => (OperandTag::Jx, None),
            Far => (OperandTag::Far, None),
            Moffs => (OperandTag::Moffs, None),
            StrSrc => (OperandTag::StrSrc, None),
            StrDst => (OperandTag::StrDst, None),
            StrDstSeg => (OperandTag::StrDstSeg, None),
            Xlat => (OperandTag::Xlat, None),
        };

        self.write_u8(tag as u8);
        if let Some(arg) = arg {
            self.write_u8(arg);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::{Operand, RegWidth, Sizing};

    #[test]
    fn leb128() {
        let mut w = TableWriter::new();
        w.write_u32(0x7f);
        w.write_u32(0x80);
        w.write_u32(300);
        assert_eq!(w.finish(), vec![0x7f, 0x80, 0x01, 0xac, 0x02]);
    }

    #[test]
    fn runs_are_folded() {
        let mut w = TableWriter::new();
        let id = w
            .array(&[
                Node::Invalid,
                Node::Invalid,
                Node::Wbinvd,
                Node::Wbinvd,
                Node::Wbinvd,
                Node::InvalidNoModrm,
            ])
            .unwrap();
        assert_eq!(id, 0);
        assert_eq!(
            w.finish(),
            vec![
                Kind::ArrayReference as u8,
                6,
                Kind::Invalid2 as u8,
                Kind::Dup as u8,
                3,
                Kind::Wbinvd as u8,
                Kind::InvalidNoModrm as u8,
            ]
        );
    }

    #[test]
    fn terminal_codes_must_match_sizing() {
        let mut w = TableWriter::new();
        let t = Terminal::new(
            Sizing::OpSize,
            &[Code::Add_rm16_r16, Code::Add_rm32_r32],
            &[Operand::GprOrMem(RegWidth::V), Operand::Gpr(RegWidth::V)],
        );
        assert_eq!(
            w.handler(&t.into()),
            Err(TableError::BadCodeCount {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn fixed_lists_are_checked() {
        let mut w = TableWriter::new();
        let res = w.handler(&Node::Group(vec![Node::Invalid; 7]));
        assert!(matches!(res, Err(TableError::BadArrayLength { expected: 8, found: 7, .. })));
    }
}
