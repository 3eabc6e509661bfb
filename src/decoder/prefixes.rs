//! VEX, XOP, EVEX and MVEX prefixes. Each decoder runs after the ambiguity handler has read the
//! byte following C5/C4/8F/62 as a ModRM byte and decided it is a prefix.

#![allow(non_snake_case)]

use crate::common::{DecoderOptions, EncodingKind, MandatoryPrefix};
use crate::decoder::state::MVEX_SSS_SHIFT;
use crate::decoder::{DecodeContext, StateFlags};
use crate::instruction::Instruction;
use crate::reader::ByteSource;
use crate::register::Register;

// Accessors for the payload bytes. Register extension bits are stored inverted.
fn rFromVEX2of2(vex: u8) -> u8 {
    ((!vex) >> 4) & 8
}
fn vvvvFromVEX2of2(vex: u8) -> u8 {
    ((!vex) >> 3) & 0xf
}
fn lFromVEX(vex: u8) -> u8 {
    (vex >> 2) & 1
}
fn ppFromVEX(vex: u8) -> u8 {
    vex & 3
}
fn mmmmmFromVEX2of3(vex: u8) -> u8 {
    vex & 0x1f
}
fn vvvvFromVEX3of3(vex: u8) -> u8 {
    ((!vex) >> 3) & 0xf
}
fn mmmFromEVEX2of4(evex: u8) -> u8 {
    evex & 7
}
fn aaaFromEVEX4of4(evex: u8) -> u8 {
    evex & 7
}
fn llFromEVEX4of4(evex: u8) -> u8 {
    (evex >> 5) & 3
}
fn v2FromEVEX4of4(evex: u8) -> u8 {
    ((!evex) & 8) << 1
}

impl<'a, R: ByteSource> DecodeContext<'a, R> {
    /// REX, 66, F2 or F3 before a VEX style prefix is invalid.
    fn check_no_legacy_prefix(&mut self) {
        let rex = self.state.flags.contains(StateFlags::HAS_REX);
        let mp = self.state.mandatory_prefix != MandatoryPrefix::None;
        self.invalid_if(rex || mp);
    }

    fn set_opmask(&mut self, aaa: u8, instruction: &mut Instruction) {
        self.state.aaa = aaa;
        if aaa != 0 {
            instruction.set_op_mask(Register::K0.add(aaa as u32));
        }
    }

    /// Two byte VEX (C5). The payload byte is the already read ModRM byte.
    pub fn vex2(&mut self, instruction: &mut Instruction) {
        self.check_no_legacy_prefix();
        self.state.flags.remove(StateFlags::W);
        self.state.extra_index_register_base = 0;
        self.state.extra_base_register_base = 0;
        self.state.encoding = EncodingKind::Vex;
        instruction.set_encoding(EncodingKind::Vex);

        let b = self.state.modrm;
        self.state.vector_length = lFromVEX(b);
        self.state.mandatory_prefix = MandatoryPrefix::from_bits(ppFromVEX(b));
        self.state.extra_register_base = rFromVEX2of2(b);
        self.state.vvvv = vvvvFromVEX2of2(b);
        self.state.vvvv_invalid_check = self.state.vvvv;

        let tables = self.tables;
        self.decode_table(&tables.vex.map0f, instruction);
    }

    /// Three byte VEX (C4).
    pub fn vex3(&mut self, instruction: &mut Instruction) {
        self.vex3_or_xop(false, instruction)
    }

    /// XOP (8F with a map select of 8 or more).
    pub fn xop(&mut self, instruction: &mut Instruction) {
        self.vex3_or_xop(true, instruction)
    }

    fn vex3_or_xop(&mut self, xop: bool, instruction: &mut Instruction) {
        self.check_no_legacy_prefix();
        self.state.flags.remove(StateFlags::W);
        let encoding = if xop {
            EncodingKind::Xop
        } else {
            EncodingKind::Vex
        };
        self.state.encoding = encoding;
        instruction.set_encoding(encoding);

        let b1 = self.state.modrm;
        let b2 = self.read_byte();

        self.state.flags |= StateFlags::from_bits_retain((b2 & 0x80) as u32);
        self.state.vector_length = lFromVEX(b2);
        self.state.mandatory_prefix = MandatoryPrefix::from_bits(ppFromVEX(b2));
        let vvvv = vvvvFromVEX3of3(b2);
        self.state.vvvv_invalid_check = vvvv;
        self.state.vvvv = vvvv & self.cfg.reg15_mask;

        let b1x = !b1 & self.cfg.mask_e0;
        self.state.extra_register_base = (b1x >> 4) & 8;
        self.state.extra_index_register_base = (b1x >> 3) & 8;
        self.state.extra_base_register_base = (b1x >> 2) & 8;

        let opcode = self.read_byte();
        let tables = self.tables;
        let table = match (xop, mmmmmFromVEX2of3(b1)) {
            (false, 0) => &tables.vex.map0,
            (false, 1) => &tables.vex.map0f,
            (false, 2) => &tables.vex.map0f38,
            (false, 3) => &tables.vex.map0f3a,
            (true, 8) => &tables.xop.map8,
            (true, 9) => &tables.xop.map9,
            (true, 10) => &tables.xop.map10,
            _ => {
                self.set_invalid();
                return;
            }
        };
        self.dispatch(&table[opcode as usize], instruction);
    }

    /// EVEX or MVEX (62). Reads the remaining payload bytes, the opcode and the real ModRM byte.
    pub fn evex_mvex(&mut self, instruction: &mut Instruction) {
        self.check_no_legacy_prefix();
        self.state.flags.remove(StateFlags::W);

        let p0 = self.state.modrm;
        let p1 = self.read_byte();
        let p2 = self.read_byte();
        let p3 = self.read_byte();
        let p4 = self.read_byte();

        if p1 & 4 != 0 {
            self.evex(p0, p1, p2, p3, p4, instruction);
        } else if !self.has_option(DecoderOptions::KNC) || !self.is_long() {
            self.set_invalid();
        } else {
            self.mvex(p0, p1, p2, p3, p4, instruction);
        }
    }

    fn evex(&mut self, p0: u8, p1: u8, p2: u8, p3: u8, p4: u8, instruction: &mut Instruction) {
        if p0 & 8 != 0 {
            self.set_invalid();
            return;
        }
        self.state.encoding = EncodingKind::Evex;
        instruction.set_encoding(EncodingKind::Evex);

        self.state.mandatory_prefix = MandatoryPrefix::from_bits(ppFromVEX(p1));
        self.state.flags |= StateFlags::from_bits_retain((p1 & 0x80) as u32);

        let aaa = aaaFromEVEX4of4(p2);
        self.set_opmask(aaa, instruction);
        if p2 & 0x80 != 0 {
            // zeroing needs a mask register
            self.invalid_if(aaa == 0);
            self.state.flags |= StateFlags::Z;
            instruction.set_zeroing_masking();
        }
        self.state.flags |= StateFlags::from_bits_retain((p2 & 0x10) as u32);
        self.state.vector_length = llFromEVEX4of4(p2);

        let vvvv = vvvvFromVEX3of3(p1);
        if self.is_long() {
            let v2 = v2FromEVEX4of4(p2);
            self.state.extra_index_register_base_vsib = v2;
            self.state.vvvv = v2 + vvvv;
            self.state.vvvv_invalid_check = v2 + vvvv;
            self.set_evex_register_bases(p0);
        } else {
            self.state.vvvv_invalid_check = vvvv;
            self.state.vvvv = vvvv & 7;
            // EVEX.V' must be set outside of 64-bit mode
            if v2FromEVEX4of4(p2) != 0 {
                self.set_invalid();
            }
        }

        let tables = self.tables;
        let table = match mmmFromEVEX2of4(p0) {
            1 => &tables.evex.map0f,
            2 => &tables.evex.map0f38,
            3 => &tables.evex.map0f3a,
            5 => &tables.evex.map5,
            6 => &tables.evex.map6,
            _ => {
                self.set_invalid();
                return;
            }
        };
        let handler = &table[p3 as usize];
        self.state.set_modrm(p4);

        // LL=3 is reserved unless EVEX.b selects rounding
        let b = self.state.flags.contains(StateFlags::B);
        self.invalid_if(!b && self.state.vector_length == 3);

        handler.decode(self, instruction);
    }

    fn mvex(&mut self, p0: u8, p1: u8, p2: u8, p3: u8, p4: u8, instruction: &mut Instruction) {
        self.state.encoding = EncodingKind::Mvex;
        instruction.set_encoding(EncodingKind::Mvex);

        self.state.mandatory_prefix = MandatoryPrefix::from_bits(ppFromVEX(p1));
        self.state.flags |= StateFlags::from_bits_retain((p1 & 0x80) as u32);
        self.set_opmask(aaaFromEVEX4of4(p2), instruction);
        // sss and EH
        self.state.flags |=
            StateFlags::from_bits_retain(((p2 & 0xf0) as u32) << (MVEX_SSS_SHIFT - 4));

        let v2 = v2FromEVEX4of4(p2);
        let vvvv = vvvvFromVEX3of3(p1);
        self.state.extra_index_register_base_vsib = v2;
        self.state.vvvv = v2 + vvvv;
        self.state.vvvv_invalid_check = v2 + vvvv;
        self.set_evex_register_bases(p0);

        let tables = self.tables;
        let table = match p0 & 0xf {
            1 => &tables.mvex.map0f,
            2 => &tables.mvex.map0f38,
            3 => &tables.mvex.map0f3a,
            _ => {
                self.set_invalid();
                return;
            }
        };
        let handler = &table[p3 as usize];
        self.state.set_modrm(p4);

        handler.decode(self, instruction);
    }

    /// R, X, B, R' and the X bit reused as the high bit of a register in ModRM.rm.
    fn set_evex_register_bases(&mut self, p0: u8) {
        let p0x = !p0;
        self.state.extra_register_base = (p0x >> 4) & 8;
        self.state.extra_index_register_base = (p0x >> 3) & 8;
        self.state.extra_register_base_evex = p0x & 0x10;
        let p0x = p0x >> 2;
        self.state.extra_base_register_base_evex = p0x & 0x18;
        self.state.extra_base_register_base = p0x & 8;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vex_field_accessors() {
        // C5 F8: R=1 vvvv=1111 L=0 pp=00
        assert_eq!(rFromVEX2of2(0xf8), 0);
        assert_eq!(vvvvFromVEX2of2(0xf8), 0);
        // C5 C5: R=1 vvvv=1000 (ymm7 inverted) L=1 pp=01
        assert_eq!(vvvvFromVEX2of2(0xc5), 7);
        assert_eq!(lFromVEX(0xc5), 1);
        assert_eq!(ppFromVEX(0xc5), 1);
        assert_eq!(rFromVEX2of2(0x45), 8);
    }

    #[test]
    fn evex_field_accessors() {
        assert_eq!(mmmFromEVEX2of4(0xf1), 1);
        assert_eq!(aaaFromEVEX4of4(0x8b), 3);
        assert_eq!(llFromEVEX4of4(0x48), 2);
        assert_eq!(v2FromEVEX4of4(0x08), 0);
        assert_eq!(v2FromEVEX4of4(0x00), 0x10);
    }
}
