//! Reads the handler table blobs.
//!
//! A blob is a flat list of records. Every record is either a handler or an array of handlers
//! and gets the next free id. Later records refer to earlier ones by id, which is how tables
//! share sub-tables and handlers. Reading is a single forward pass; anything left over or
//! missing is an error.

use std::sync::Arc;

use num_traits::FromPrimitive;
use tracing::trace;

use crate::code::Code;
use crate::common::{DecoderOptions, TupleType};
use crate::error::TableError;
use crate::handlers::{
    HandlerRef, MvexElem, MvexInfo, OpCodeHandler, Operand, OptionsScope, PrefixKind, RegWidth,
    Sizing, TermFlags, Terminal, VecClass,
};
use crate::instruction::MAX_OP_COUNT;
use crate::register::Register;

pub(crate) mod kinds;
pub(crate) mod writer;

use self::kinds::{
    Family, Kind, OperandTag, MVEX_EVICTION_HINT, MVEX_ROUNDING, MVEX_SAE,
};

/// A record of a blob.
#[derive(Debug, Clone)]
pub(crate) enum Entry {
    Handler(HandlerRef),
    Array(Arc<[HandlerRef]>),
}

/// All records of a blob, indexed by id.
#[derive(Debug)]
pub(crate) struct Records {
    entries: Vec<Entry>,
}

impl Records {
    /// The 256 entry opcode table with id `id`.
    pub(crate) fn table(&self, id: u32) -> Result<Arc<[HandlerRef]>, TableError> {
        match self.entries.get(id as usize) {
            Some(Entry::Array(a)) if a.len() == 256 => Ok(a.clone()),
            Some(Entry::Array(a)) => Err(TableError::BadArrayLength {
                id,
                expected: 256,
                found: a.len(),
            }),
            Some(Entry::Handler(_)) => Err(TableError::WrongIdType {
                id,
                expected: "an array",
            }),
            None => Err(TableError::UndefinedId(id)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

pub(crate) struct TableDeserializer<'a> {
    blob: &'a [u8],
    pos: usize,
    family: Family,
    entries: Vec<Entry>,
    invalid: HandlerRef,
    invalid_no_modrm: HandlerRef,
}

impl<'a> TableDeserializer<'a> {
    pub(crate) fn new(family: Family, blob: &'a [u8]) -> TableDeserializer<'a> {
        TableDeserializer {
            blob,
            pos: 0,
            family,
            entries: Vec::new(),
            invalid: Arc::new(OpCodeHandler::Invalid { modrm: true }),
            invalid_no_modrm: Arc::new(OpCodeHandler::Invalid { modrm: false }),
        }
    }

    /// Reads every record of the blob.
    pub(crate) fn read_all(mut self) -> Result<Records, TableError> {
        while self.pos < self.blob.len() {
            self.read_record()?;
        }

        trace!(
            family = self.family.name(),
            records = self.entries.len(),
            bytes = self.blob.len(),
            "table blob read"
        );

        Ok(Records {
            entries: self.entries,
        })
    }

    fn read_record(&mut self) -> Result<(), TableError> {
        let offset = self.pos;
        let tag = self.read_u8()?;

        let entry = match Kind::from_u8(tag) {
            Some(Kind::HandlerReference) => Entry::Handler(self.read_handler()?),
            Some(Kind::ArrayReference) => {
                let count = self.read_u32()?;
                let slots = self.read_slots(count as usize)?;
                let handlers = slots
                    .into_iter()
                    .collect::<Option<Vec<HandlerRef>>>()
                    .ok_or(TableError::UnexpectedNull)?;
                Entry::Array(handlers.into())
            }
            _ => return Err(TableError::UnknownRecord { offset, tag }),
        };

        self.entries.push(entry);
        Ok(())
    }

    fn read_u8(&mut self) -> Result<u8, TableError> {
        let b = *self
            .blob
            .get(self.pos)
            .ok_or(TableError::Truncated(self.pos))?;
        self.pos += 1;
        Ok(b)
    }

    fn read_bool(&mut self) -> Result<bool, TableError> {
        Ok(self.read_u8()? != 0)
    }

    fn read_u32(&mut self) -> Result<u32, TableError> {
        let offset = self.pos;
        let mut v = 0u32;
        let mut shift = 0;

        loop {
            let b = self.read_u8()?;
            if shift > 28 || (shift == 28 && b & 0x70 != 0) {
                return Err(TableError::VarintOverflow(offset));
            }
            v |= ((b & 0x7f) as u32) << shift;
            if b & 0x80 == 0 {
                return Ok(v);
            }
            shift += 7;
        }
    }

    fn read_kind(&mut self) -> Result<(usize, Kind), TableError> {
        let offset = self.pos;
        let b = self.read_u8()?;
        let kind = Kind::from_u8(b).ok_or(TableError::UnknownKind { offset, kind: b })?;

        if !self.family.allows(kind) {
            return Err(TableError::KindNotInFamily {
                kind: format!("{:?}", kind),
                family: self.family.name(),
            });
        }
        Ok((offset, kind))
    }

    fn read_code(&self, id: u32) -> Result<Code, TableError> {
        Code::from_u32(id).ok_or(TableError::UnknownCode(id))
    }

    fn read_enum<T: FromPrimitive>(&mut self, what: &'static str) -> Result<T, TableError> {
        let b = self.read_u8()?;
        T::from_u8(b).ok_or(TableError::BadEnum {
            what,
            value: b as u32,
        })
    }

    /// Reads slots until `count` are filled. DUP and INVALID2 fill more than one.
    fn read_slots(&mut self, count: usize) -> Result<Vec<Option<HandlerRef>>, TableError> {
        let mut slots = Vec::with_capacity(count);

        while slots.len() < count {
            let (offset, kind) = self.read_kind()?;
            match kind {
                Kind::Invalid2 => {
                    slots.push(Some(self.invalid.clone()));
                    slots.push(Some(self.invalid.clone()));
                }
                Kind::Dup => {
                    let n = self.read_u32()? as usize;
                    if slots.len() + n > count {
                        return Err(TableError::ArrayOverflow {
                            offset,
                            size: count as u32,
                        });
                    }
                    let (offset, kind) = self.read_kind()?;
                    let h = self.read_body_or_null(offset, kind)?;
                    for _ in 0..n {
                        slots.push(h.clone());
                    }
                }
                _ => {
                    let h = self.read_body_or_null(offset, kind)?;
                    slots.push(h);
                }
            }
            if slots.len() > count {
                return Err(TableError::ArrayOverflow {
                    offset,
                    size: count as u32,
                });
            }
        }

        Ok(slots)
    }

    fn read_body_or_null(
        &mut self,
        offset: usize,
        kind: Kind,
    ) -> Result<Option<HandlerRef>, TableError> {
        if kind == Kind::Null {
            Ok(None)
        } else {
            self.read_body(offset, kind).map(Some)
        }
    }

    /// `count` handlers, none of them null.
    fn read_handlers(&mut self, count: usize) -> Result<Box<[HandlerRef]>, TableError> {
        self.read_slots(count)?
            .into_iter()
            .collect::<Option<Box<[HandlerRef]>>>()
            .ok_or(TableError::UnexpectedNull)
    }

    fn read_handler(&mut self) -> Result<HandlerRef, TableError> {
        let (offset, kind) = self.read_kind()?;
        match kind {
            Kind::Null => Err(TableError::UnexpectedNull),
            _ => self.read_body(offset, kind),
        }
    }

    fn read_array_ref(&mut self) -> Result<Arc<[HandlerRef]>, TableError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        if tag != Kind::ArrayReference as u8 {
            return Err(TableError::ArrayTagMismatch {
                offset,
                expected: Kind::ArrayReference as u8,
                found: tag,
            });
        }

        let id = self.read_u32()?;
        match self.entries.get(id as usize) {
            Some(Entry::Array(a)) => Ok(a.clone()),
            Some(Entry::Handler(_)) => Err(TableError::WrongIdType {
                id,
                expected: "an array",
            }),
            None => Err(TableError::UndefinedId(id)),
        }
    }

    fn read_body(&mut self, offset: usize, kind: Kind) -> Result<HandlerRef, TableError> {
        let handler = match kind {
            Kind::HandlerReference => {
                let id = self.read_u32()?;
                return match self.entries.get(id as usize) {
                    Some(Entry::Handler(h)) => Ok(h.clone()),
                    Some(Entry::Array(_)) => Err(TableError::WrongIdType {
                        id,
                        expected: "a handler",
                    }),
                    None => Err(TableError::UndefinedId(id)),
                };
            }
            Kind::Invalid => return Ok(self.invalid.clone()),
            Kind::InvalidNoModrm => return Ok(self.invalid_no_modrm.clone()),
            Kind::ArrayReference | Kind::Invalid2 | Kind::Dup | Kind::Null => {
                return Err(TableError::MisplacedKind {
                    offset,
                    kind: kind as u8,
                });
            }

            Kind::Group => OpCodeHandler::Group(self.read_handlers(8)?),
            Kind::Group8x8 => {
                let mem = self.read_handlers(8)?;
                let reg = self.read_handlers(8)?;
                OpCodeHandler::Group8x8 { mem, reg }
            }
            Kind::Group8x64 => {
                let low = self.read_handlers(8)?;
                let high = self.read_slots(64)?.into_boxed_slice();
                OpCodeHandler::Group8x64 { low, high }
            }
            Kind::AnotherTable => OpCodeHandler::AnotherTable(self.read_array_ref()?),
            Kind::Rm => {
                let reg = self.read_handler()?;
                let mem = self.read_handler()?;
                OpCodeHandler::Rm { reg, mem }
            }
            Kind::MandatoryPrefix => {
                let modrm = self.read_bool()?;
                let clear = self.read_bool()?;
                let handlers = self.read_handlers(4)?;
                OpCodeHandler::MandatoryPrefix {
                    modrm,
                    clear,
                    handlers,
                }
            }
            Kind::W => {
                let w0 = self.read_handler()?;
                let w1 = self.read_handler()?;
                OpCodeHandler::W { w0, w1 }
            }
            Kind::Bitness => {
                let modrm = self.read_bool()?;
                let legacy = self.read_handler()?;
                let long = self.read_handler()?;
                OpCodeHandler::Bitness {
                    modrm,
                    legacy,
                    long,
                }
            }
            Kind::Options => {
                let scope: OptionsScope = self.read_enum("options scope")?;
                let default = self.read_handler()?;
                let count = self.read_u32()?;
                let mut alternates = Vec::with_capacity(count as usize);
                for _ in 0..count {
                    let options = DecoderOptions::from_bits_retain(self.read_u32()?);
                    alternates.push((options, self.read_handler()?));
                }
                OpCodeHandler::Options {
                    scope,
                    default,
                    alternates: alternates.into(),
                }
            }
            Kind::VectorLength => {
                let modrm = self.read_bool()?;
                let er = self.read_bool()?;
                if er && self.family != Family::Evex {
                    return Err(TableError::KindNotInFamily {
                        kind: "VectorLength with rounding".to_string(),
                        family: self.family.name(),
                    });
                }
                let handlers = self.read_handlers(4)?;
                OpCodeHandler::VectorLength {
                    modrm,
                    er,
                    handlers,
                }
            }
            Kind::Eh => {
                let eh0 = self.read_handler()?;
                let eh1 = self.read_handler()?;
                OpCodeHandler::Eh { eh0, eh1 }
            }
            Kind::ReservedNop => {
                let reserved_nop = self.read_handler()?;
                let other = self.read_handler()?;
                OpCodeHandler::ReservedNop {
                    reserved_nop,
                    other,
                }
            }
            Kind::Wbinvd => OpCodeHandler::Wbinvd,
            Kind::XchgRegRax => {
                let index = self.read_u8()?;
                if index > 7 {
                    return Err(TableError::BadEnum {
                        what: "opcode register",
                        value: index as u32,
                    });
                }
                OpCodeHandler::XchgRegRax(index)
            }
            Kind::D3Now => {
                let count = self.read_u32()?;
                let mut codes = vec![Code::INVALID; 256];
                for _ in 0..count {
                    let suffix = self.read_u8()?;
                    let id = self.read_u32()?;
                    codes[suffix as usize] = self.read_code(id)?;
                }
                OpCodeHandler::D3Now(codes.into_boxed_slice())
            }
            Kind::Prefix => {
                let prefix: PrefixKind = self.read_enum("prefix")?;
                OpCodeHandler::Prefix(prefix)
            }
            Kind::Rex => {
                let rex = self.read_u8()?;
                let fallback = self.read_handler()?;
                OpCodeHandler::Rex { fallback, rex }
            }
            Kind::Vex2 => OpCodeHandler::Vex2(self.read_handler()?),
            Kind::Vex3 => OpCodeHandler::Vex3(self.read_handler()?),
            Kind::Xop => OpCodeHandler::Xop(self.read_handler()?),
            Kind::Evex => OpCodeHandler::Evex(self.read_handler()?),
            Kind::Terminal => OpCodeHandler::Terminal(Box::new(self.read_terminal()?)),
        };

        Ok(Arc::new(handler))
    }

    fn read_terminal(&mut self) -> Result<Terminal, TableError> {
        let modrm = self.read_bool()?;
        let sizing: Sizing = self.read_enum("size selector")?;
        let base = self.read_u32()?;
        let codes = (0..sizing.code_count() as u32)
            .map(|i| self.read_code(base + i))
            .collect::<Result<Box<[Code]>, TableError>>()?;

        let count = self.read_u8()? as usize;
        if count > MAX_OP_COUNT {
            return Err(TableError::TooManyOperands {
                count,
                max: MAX_OP_COUNT,
            });
        }
        let mut operands = Vec::with_capacity(count);
        for _ in 0..count {
            operands.push(self.read_operand()?);
        }

        let bits = self.read_u32()?;
        let flags = TermFlags::from_bits(bits).ok_or(TableError::UnknownFlags(bits))?;
        let tuple = self.read_u8()?;
        let tuple = TupleType::from_u8(tuple).ok_or(TableError::UnknownTupleType(tuple as u32))?;

        let mvex = if self.read_bool()? {
            if self.family != Family::Mvex {
                return Err(TableError::KindNotInFamily {
                    kind: "MVEX terminal".to_string(),
                    family: self.family.name(),
                });
            }
            let elem: MvexElem = self.read_enum("MVEX element type")?;
            let invalid_conv = self.read_u8()?;
            let invalid_swizzle = self.read_u8()?;
            let bits = self.read_u8()?;
            Some(MvexInfo {
                elem,
                invalid_conv,
                invalid_swizzle,
                sae: bits & MVEX_SAE != 0,
                rounding: bits & MVEX_ROUNDING != 0,
                eviction_hint: bits & MVEX_EVICTION_HINT != 0,
            })
        } else {
            None
        };

        Ok(Terminal {
            modrm,
            sizing,
            codes,
            operands: operands.into(),
            flags,
            tuple,
            mvex,
        })
    }

    fn read_operand(&mut self) -> Result<Operand, TableError> {
        let offset = self.pos;
        let tag = self.read_u8()?;
        let tag = OperandTag::from_u8(tag).ok_or(TableError::UnknownOperand { offset, tag })?;

        let op = match tag {
            OperandTag::Gpr => Operand::Gpr(self.read_width()?),
            OperandTag::GprRm => Operand::GprRm(self.read_width()?),
            OperandTag::GprOrMem => Operand::GprOrMem(self.read_width()?),
            OperandTag::GprVvvv => Operand::GprVvvv(self.read_width()?),
            OperandTag::GprOpcode => {
                let w = self.read_width()?;
                let n = self.read_u8()?;
                if n > 7 {
                    return Err(TableError::BadEnum {
                        what: "opcode register",
                        value: n as u32,
                    });
                }
                Operand::GprOpcode(w, n)
            }
            OperandTag::Acc => Operand::Acc(self.read_width()?),
            OperandTag::Fixed => {
                let id = self.read_u32()?;
                let reg = Register::from_u32(id).ok_or(TableError::UnknownRegister(id))?;
                Operand::Fixed(reg)
            }
            OperandTag::Mem => Operand::Mem,
            OperandTag::MemMpx => Operand::MemMpx,
            OperandTag::MemSib => Operand::MemSib,
            OperandTag::Vsib => Operand::Vsib(self.read_class()?),
            OperandTag::Reg => Operand::Reg(self.read_class()?),
            OperandTag::RegRm => Operand::RegRm(self.read_class()?),
            OperandTag::RegOrMem => Operand::RegOrMem(self.read_class()?),
            OperandTag::Vvvv => Operand::Vvvv(self.read_class()?),
            OperandTag::Is4 => Operand::Is4(self.read_class()?),
            OperandTag::Sreg => Operand::Sreg,
            OperandTag::SregDst => Operand::SregDst,
            OperandTag::Cr => Operand::Cr,
            OperandTag::Dr => Operand::Dr,
            OperandTag::Tr => Operand::Tr,
            OperandTag::Ib => Operand::Ib,
            OperandTag::Iw => Operand::Iw,
            OperandTag::Id => Operand::Id,
            OperandTag::Iq => Operand::Iq,
            OperandTag::Ibs => Operand::Ibs,
            OperandTag::Iz => Operand::Iz,
            OperandTag::Iv => Operand::Iv,
            OperandTag::Ib2 => Operand::Ib2,
            OperandTag::One => Operand::One,
            OperandTag::Jb => Operand::Jb,
            OperandTag::Jz => Operand::Jz,
            OperandTag::Jx => Operand::Jx,
            OperandTag::Far => Operand::Far,
            OperandTag::Moffs => Operand::Moffs,
            OperandTag::StrSrc => Operand::StrSrc,
            OperandTag::StrDst => Operand::StrDst,
            OperandTag::StrDstSeg => Operand::StrDstSeg,
            OperandTag::Xlat => Operand::Xlat,
        };

        Ok(op)
    }

    fn read_width(&mut self) -> Result<RegWidth, TableError> {
        self.read_enum("register width")
    }

    fn read_class(&mut self) -> Result<VecClass, TableError> {
        self.read_enum("register class")
    }
}

#[cfg(test)]
mod tests {
    use super::writer::{Node, TableWriter};
    use super::*;

    fn add_rm_r() -> Node {
        Terminal::new(
            Sizing::OpSize,
            &[Code::Add_rm16_r16, Code::Add_rm32_r32, Code::Add_rm64_r64],
            &[Operand::GprOrMem(RegWidth::V), Operand::Gpr(RegWidth::V)],
        )
        .with_flags(TermFlags::LOCK)
        .into()
    }

    #[test]
    fn reads_back_written_records() {
        let mut w = TableWriter::new();
        let h = w.handler(&add_rm_r()).unwrap();
        let mut table = vec![Node::Invalid; 256];
        table[1] = Node::Ref(h);
        table[0x90] = Node::XchgRegRax(0);
        let t = w.array(&table).unwrap();
        let blob = w.finish();

        let records = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap();
        assert_eq!(records.len(), 2);

        let table = records.table(t).unwrap();
        match &*table[1] {
            OpCodeHandler::Terminal(t) => {
                assert_eq!(t.codes[2], Code::Add_rm64_r64);
                assert!(t.has_modrm());
                assert!(t.flags.contains(TermFlags::LOCK));
            }
            h => panic!("unexpected handler {:?}", h),
        }
        // the reference and the table slot are the same object
        assert!(Arc::ptr_eq(&table[0], &table[2]));
        assert!(matches!(*table[0x90], OpCodeHandler::XchgRegRax(0)));

        assert_eq!(
            records.table(h).unwrap_err(),
            TableError::WrongIdType {
                id: h,
                expected: "an array"
            }
        );
    }

    #[test]
    fn unknown_kind() {
        let blob = [Kind::HandlerReference as u8, 0x7f];
        let err = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(err, TableError::UnknownKind { offset: 1, kind: 0x7f });
    }

    #[test]
    fn unknown_record() {
        let blob = [0x42];
        let err = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(err, TableError::UnknownRecord { offset: 0, tag: 0x42 });
    }

    #[test]
    fn truncated_array() {
        // three slots announced, one present
        let blob = [Kind::ArrayReference as u8, 3, Kind::Invalid as u8];
        let err = TableDeserializer::new(Family::Vex, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(err, TableError::Truncated(3));
    }

    #[test]
    fn dup_overflow() {
        let blob = [
            Kind::ArrayReference as u8,
            2,
            Kind::Dup as u8,
            3,
            Kind::Invalid as u8,
        ];
        let err = TableDeserializer::new(Family::Vex, &blob)
            .read_all()
            .unwrap_err();
        assert!(matches!(err, TableError::ArrayOverflow { size: 2, .. }));
    }

    #[test]
    fn array_tag_mismatch() {
        let mut w = TableWriter::new();
        w.array(&vec![Node::Invalid; 256]).unwrap();
        let mut blob = w.finish();
        blob.extend_from_slice(&[
            Kind::HandlerReference as u8,
            Kind::AnotherTable as u8,
            Kind::HandlerReference as u8,
            0,
        ]);
        let err = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap_err();
        assert!(matches!(err, TableError::ArrayTagMismatch { found: 0, .. }));
    }

    #[test]
    fn dangling_reference() {
        let blob = [Kind::HandlerReference as u8, Kind::HandlerReference as u8, 5];
        let err = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(err, TableError::UndefinedId(5));
    }

    #[test]
    fn null_outside_nullable_array() {
        let blob = [Kind::ArrayReference as u8, 1, Kind::Null as u8];
        let err = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(err, TableError::UnexpectedNull);
    }

    #[test]
    fn prefix_kinds_only_in_legacy_blobs() {
        let mut w = TableWriter::new();
        w.handler(&Node::Wbinvd).unwrap();
        let blob = w.finish();

        assert!(TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .is_ok());
        let err = TableDeserializer::new(Family::Evex, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(
            err,
            TableError::KindNotInFamily {
                kind: "Wbinvd".to_string(),
                family: "EVEX"
            }
        );
    }

    #[test]
    fn varint_overflow() {
        let blob = [
            Kind::ArrayReference as u8,
            0xff,
            0xff,
            0xff,
            0xff,
            0x7f,
        ];
        let err = TableDeserializer::new(Family::Legacy, &blob)
            .read_all()
            .unwrap_err();
        assert_eq!(err, TableError::VarintOverflow(1));
    }
}
