use crate::common::{OpKind, OpSize};
use crate::decoder::{DecodeState, StateFlags};
use crate::instruction::Instruction;

/// Where the displacement and immediates of an instruction are located in its bytes. Useful
/// for relocating or patching code.
#[derive(Default, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ConstantOffsets {
    pub displacement_offset: u8,
    pub displacement_size: u8,
    pub immediate_offset: u8,
    pub immediate_size: u8,
    /// Second immediate: the selector of a far branch or the second imm8 of `ENTER`/`EXTRQ`.
    pub immediate_offset2: u8,
    pub immediate_size2: u8,
}

impl ConstantOffsets {
    pub fn has_displacement(&self) -> bool {
        self.displacement_size != 0
    }

    pub fn has_immediate(&self) -> bool {
        self.immediate_size != 0
    }

    pub fn has_immediate2(&self) -> bool {
        self.immediate_size2 != 0
    }

    pub(crate) fn new(state: &DecodeState, instruction: &Instruction) -> ConstantOffsets {
        let mut co = ConstantOffsets::default();
        let len = instruction.len() as u8;

        let displ_size = instruction.memory_displ_size() as u8;
        if displ_size != 0 {
            co.displacement_offset = state.displ_index;
            co.displacement_size =
                if displ_size == 8 && !state.flags.contains(StateFlags::ADDR64) {
                    4
                } else {
                    displ_size
                };
        }

        if state.flags.contains(StateFlags::NO_IMM) {
            return co;
        }

        let mut extra_imm_sub = 0u8;
        for i in (0..instruction.op_count()).rev() {
            match instruction.op_kind(i) {
                OpKind::Immediate8
                | OpKind::Immediate8to16
                | OpKind::Immediate8to32
                | OpKind::Immediate8to64 => {
                    co.set_imm(len.wrapping_sub(extra_imm_sub + 1), 1);
                    break;
                }
                OpKind::Immediate16 => {
                    co.set_imm(len.wrapping_sub(extra_imm_sub + 2), 2);
                    break;
                }
                OpKind::Immediate32 | OpKind::Immediate32to64 => {
                    co.set_imm(len.wrapping_sub(extra_imm_sub + 4), 4);
                    break;
                }
                OpKind::Immediate64 => {
                    co.set_imm(len.wrapping_sub(extra_imm_sub + 8), 8);
                    break;
                }
                OpKind::Immediate8_2nd => {
                    co.immediate_offset2 = len.wrapping_sub(1);
                    co.immediate_size2 = 1;
                    extra_imm_sub = 1;
                }
                OpKind::NearBranch16 => co.set_branch(state, len, 2),
                OpKind::NearBranch32 | OpKind::NearBranch64 => co.set_branch(state, len, 4),
                OpKind::FarBranch16 => {
                    co.set_imm(len.wrapping_sub(4), 2);
                    co.immediate_offset2 = len.wrapping_sub(2);
                    co.immediate_size2 = 2;
                }
                OpKind::FarBranch32 => {
                    co.set_imm(len.wrapping_sub(6), 4);
                    co.immediate_offset2 = len.wrapping_sub(2);
                    co.immediate_size2 = 2;
                }
                _ => {}
            }
        }

        co
    }

    fn set_imm(&mut self, offset: u8, size: u8) {
        self.immediate_offset = offset;
        self.immediate_size = size;
    }

    /// Relative branch displacement: 1 byte for the short forms, otherwise `default_size` or,
    /// for `XBEGIN`, whatever the operand size selected.
    fn set_branch(&mut self, state: &DecodeState, len: u8, default_size: u8) {
        let size = if state.flags.contains(StateFlags::BRANCH_IMM8) {
            1
        } else if !state.flags.contains(StateFlags::XBEGIN) {
            default_size
        } else if state.operand_size != OpSize::Size16 {
            4
        } else {
            2
        };
        self.set_imm(len.wrapping_sub(size), size);
    }
}

#[cfg(test)]
mod tests {
    use crate::common::DecoderOptions;
    use crate::decoder::Decoder;
    use crate::reader::SliceReader;

    fn offsets(bitness: u32, bytes: &[u8]) -> super::ConstantOffsets {
        let mut d =
            Decoder::new(bitness, SliceReader::new(bytes), 0, DecoderOptions::empty()).unwrap();
        let insn = d.decode();
        assert!(!insn.is_invalid());
        d.constant_offsets(&insn)
    }

    #[test]
    fn add_eax_imm32() {
        let co = offsets(32, &[0x05, 0x78, 0x56, 0x34, 0x12]);
        assert!(!co.has_displacement());
        assert_eq!((co.immediate_offset, co.immediate_size), (1, 4));
        assert!(!co.has_immediate2());
    }

    #[test]
    fn displacement_and_immediate() {
        // mov dword [ebx+0x11223344], 0x55667788
        let co = offsets(
            32,
            &[0xc7, 0x83, 0x44, 0x33, 0x22, 0x11, 0x88, 0x77, 0x66, 0x55],
        );
        assert_eq!((co.displacement_offset, co.displacement_size), (2, 4));
        assert_eq!((co.immediate_offset, co.immediate_size), (6, 4));
    }

    #[test]
    fn rip_relative_displacement_is_four_bytes() {
        // mov rax, [rip+0x10]
        let co = offsets(64, &[0x48, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!((co.displacement_offset, co.displacement_size), (3, 4));
    }

    #[test]
    fn short_and_near_branches() {
        let co = offsets(64, &[0xeb, 0x10]);
        assert_eq!((co.immediate_offset, co.immediate_size), (1, 1));
        let co = offsets(64, &[0xe8, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!((co.immediate_offset, co.immediate_size), (1, 4));
    }

    #[test]
    fn far_pointer() {
        // call 0x1234:0x56789abc
        let co = offsets(32, &[0x9a, 0xbc, 0x9a, 0x78, 0x56, 0x34, 0x12]);
        assert_eq!((co.immediate_offset, co.immediate_size), (1, 4));
        assert_eq!((co.immediate_offset2, co.immediate_size2), (5, 2));
    }

    #[test]
    fn enter_has_two_immediates() {
        // enter 0x10, 1
        let co = offsets(32, &[0xc8, 0x10, 0x00, 0x01]);
        assert_eq!((co.immediate_offset, co.immediate_size), (1, 2));
        assert_eq!((co.immediate_offset2, co.immediate_size2), (3, 1));
    }

    #[test]
    fn shift_by_one_has_no_immediate() {
        // shl eax, 1
        let co = offsets(32, &[0xd1, 0xe0]);
        assert!(!co.has_immediate());
    }

    #[test]
    fn moffs_displacement() {
        // mov al, [0x1122334455667788]
        let co = offsets(64, &[0xa0, 0x88, 0x77, 0x66, 0x55, 0x44, 0x33, 0x22, 0x11]);
        assert_eq!((co.displacement_offset, co.displacement_size), (1, 8));
    }
}
