//! ModRM/SIB memory operands.

#![allow(non_snake_case)]

use crate::common::{OpSize, TupleType};
use crate::decoder::{DecodeContext, StateFlags};
use crate::instruction::Instruction;
use crate::reader::ByteSource;
use crate::register::Register;

fn scaleFromSIB(sib: u8) -> u32 {
    ((sib & 0xc0) >> 6) as u32
}
fn indexFromSIB(sib: u8) -> u8 {
    (sib & 0x38) >> 3
}
fn baseFromSIB(sib: u8) -> u8 {
    sib & 0x7
}

/// Base and index of the eight 16-bit addressing forms, by ModRM.rm.
const MEM16_REGS: [(Register, Register); 8] = [
    (Register::BX, Register::SI),
    (Register::BX, Register::DI),
    (Register::BP, Register::SI),
    (Register::BP, Register::DI),
    (Register::SI, Register::None),
    (Register::DI, Register::None),
    (Register::BP, Register::None),
    (Register::BX, Register::None),
];

impl<'a, R: ByteSource> DecodeContext<'a, R> {
    /// Memory operand selected by ModRM (mod != 3) using the current address size.
    pub fn read_op_mem(&mut self, instruction: &mut Instruction, tuple: TupleType) {
        match self.state.address_size {
            OpSize::Size64 => {
                self.read_op_mem_32_or_64(instruction, Register::RAX, Register::RAX, tuple, false);
            }
            OpSize::Size32 => {
                self.read_op_mem_32_or_64(instruction, Register::EAX, Register::EAX, tuple, false);
            }
            OpSize::Size16 => self.read_op_mem_16(instruction, tuple),
        }
    }

    /// Memory operand that must use a SIB byte (AMX tile loads and stores).
    pub fn read_op_mem_sib(&mut self, instruction: &mut Instruction, tuple: TupleType) {
        let has_sib = match self.state.address_size {
            OpSize::Size64 => {
                self.read_op_mem_32_or_64(instruction, Register::RAX, Register::RAX, tuple, false)
            }
            OpSize::Size32 => {
                self.read_op_mem_32_or_64(instruction, Register::EAX, Register::EAX, tuple, false)
            }
            OpSize::Size16 => {
                self.read_op_mem_16(instruction, tuple);
                false
            }
        };
        self.invalid_if(!has_sib);
    }

    /// MPX memory operand. 64-bit mode always uses 64-bit addressing and 16-bit addressing is
    /// invalid.
    pub fn read_op_mem_mpx(&mut self, instruction: &mut Instruction) {
        if self.is_long() {
            self.read_op_mem_32_or_64(
                instruction,
                Register::RAX,
                Register::RAX,
                TupleType::N1,
                false,
            );
        } else if self.state.address_size == OpSize::Size32 {
            self.read_op_mem_32_or_64(
                instruction,
                Register::EAX,
                Register::EAX,
                TupleType::N1,
                false,
            );
        } else {
            self.read_op_mem_16(instruction, TupleType::N1);
            self.invalid_if(true);
        }
    }

    /// VSIB memory operand. The index is a vector register from the `vsib_index` bank.
    pub fn read_op_mem_vsib(
        &mut self,
        instruction: &mut Instruction,
        vsib_index: Register,
        tuple: TupleType,
    ) {
        let has_sib = match self.state.address_size {
            OpSize::Size64 => {
                self.read_op_mem_32_or_64(instruction, Register::RAX, vsib_index, tuple, true)
            }
            OpSize::Size32 => {
                self.read_op_mem_32_or_64(instruction, Register::EAX, vsib_index, tuple, true)
            }
            OpSize::Size16 => {
                self.read_op_mem_16(instruction, tuple);
                false
            }
        };
        self.invalid_if(!has_sib);
    }

    fn disp8n(&self, tuple: TupleType) -> i32 {
        tuple.disp8n(self.state.flags.contains(StateFlags::B)) as i32
    }

    fn read_op_mem_16(&mut self, instruction: &mut Instruction, tuple: TupleType) {
        let (base, index) = MEM16_REGS[self.state.rm as usize];

        match self.state.mod_ {
            0 if self.state.rm == 6 => {
                instruction.set_memory_displ_size(2);
                self.state.displ_index = self.state.len as u8;
                let displ = self.read_u16();
                instruction.set_memory_displacement64(displ as u64);
                return;
            }
            0 => {}
            1 => {
                instruction.set_memory_displ_size(1);
                self.state.displ_index = self.state.len as u8;
                let b = self.read_byte() as i8 as i32;
                let displ = b.wrapping_mul(self.disp8n(tuple)) as u16;
                instruction.set_memory_displacement64(displ as u64);
            }
            _ => {
                instruction.set_memory_displ_size(2);
                self.state.displ_index = self.state.len as u8;
                let displ = self.read_u16();
                instruction.set_memory_displacement64(displ as u64);
            }
        }

        instruction.set_memory_base(base);
        instruction.set_memory_index(index);
    }

    /// 32/64-bit addressing forms. Returns `true` if a SIB byte was read.
    fn read_op_mem_32_or_64(
        &mut self,
        instruction: &mut Instruction,
        base_reg: Register,
        index_reg: Register,
        tuple: TupleType,
        is_vsib: bool,
    ) -> bool {
        let addr64 = self.state.address_size == OpSize::Size64;
        let sib;
        let displ_size;

        match self.state.mod_ {
            0 => match self.state.rm {
                4 => {
                    sib = self.read_byte();
                    displ_size = 0;
                }
                5 => {
                    self.state.displ_index = self.state.len as u8;
                    let displ = self.read_u32();
                    if addr64 {
                        instruction.set_memory_displ_size(8);
                        instruction.set_memory_displacement64(displ as i32 as i64 as u64);
                    } else {
                        instruction.set_memory_displ_size(4);
                        instruction.set_memory_displacement64(displ as u64);
                    }
                    if self.is_long() {
                        if addr64 {
                            self.state.flags |= StateFlags::IP_REL64;
                            instruction.set_memory_base(Register::RIP);
                        } else {
                            self.state.flags |= StateFlags::IP_REL32;
                            instruction.set_memory_base(Register::EIP);
                        }
                    }
                    return false;
                }
                rm => {
                    let base = rm + self.state.extra_base_register_base;
                    instruction.set_memory_base(base_reg.add(base as u32));
                    return false;
                }
            },
            1 => {
                if self.state.rm == 4 {
                    sib = self.read_byte();
                    displ_size = 1;
                    self.state.displ_index = self.state.len as u8;
                    let b = self.read_byte() as i8 as i32;
                    let displ = b.wrapping_mul(self.disp8n(tuple));
                    self.set_displ(instruction, displ, addr64);
                } else {
                    instruction.set_memory_displ_size(1);
                    self.state.displ_index = self.state.len as u8;
                    let b = self.read_byte() as i8 as i32;
                    let displ = b.wrapping_mul(self.disp8n(tuple));
                    self.set_displ(instruction, displ, addr64);
                    let base = self.state.rm + self.state.extra_base_register_base;
                    instruction.set_memory_base(base_reg.add(base as u32));
                    return false;
                }
            }
            _ => {
                if self.state.rm == 4 {
                    sib = self.read_byte();
                    displ_size = if addr64 { 8 } else { 4 };
                    self.state.displ_index = self.state.len as u8;
                    let displ = self.read_u32() as i32;
                    self.set_displ(instruction, displ, addr64);
                } else {
                    instruction.set_memory_displ_size(if addr64 { 8 } else { 4 });
                    self.state.displ_index = self.state.len as u8;
                    let displ = self.read_u32() as i32;
                    self.set_displ(instruction, displ, addr64);
                    let base = self.state.rm + self.state.extra_base_register_base;
                    instruction.set_memory_base(base_reg.add(base as u32));
                    return false;
                }
            }
        }

        let index = indexFromSIB(sib) + self.state.extra_index_register_base;
        instruction.set_memory_index_scale_raw(scaleFromSIB(sib));
        if is_vsib {
            let index = index + self.state.extra_index_register_base_vsib;
            instruction.set_memory_index(index_reg.add(index as u32));
        } else if index != 4 {
            instruction.set_memory_index(index_reg.add(index as u32));
        }

        let base = baseFromSIB(sib);
        if base == 5 && self.state.mod_ == 0 {
            self.state.displ_index = self.state.len as u8;
            let displ = self.read_u32();
            if addr64 {
                instruction.set_memory_displ_size(8);
                instruction.set_memory_displacement64(displ as i32 as i64 as u64);
            } else {
                instruction.set_memory_displ_size(4);
                instruction.set_memory_displacement64(displ as u64);
            }
        } else {
            let base = base + self.state.extra_base_register_base;
            instruction.set_memory_base(base_reg.add(base as u32));
            instruction.set_memory_displ_size(displ_size);
        }

        true
    }

    fn set_displ(&mut self, instruction: &mut Instruction, displ: i32, addr64: bool) {
        if addr64 {
            instruction.set_memory_displacement64(displ as i64 as u64);
        } else {
            instruction.set_memory_displacement64(displ as u32 as u64);
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::code::Code;
    use crate::common::DecoderOptions;
    use crate::decoder::Decoder;
    use crate::reader::SliceReader;
    use crate::register::Register;

    fn decode(bitness: u32, bytes: &[u8]) -> crate::Instruction {
        let mut d =
            Decoder::new(bitness, SliceReader::new(bytes), 0, DecoderOptions::empty()).unwrap();
        d.decode()
    }

    #[test]
    fn sixteen_bit_forms() {
        // mov ax, [bp+si-2]
        let insn = decode(16, &[0x8b, 0x42, 0xfe]);
        assert_eq!(insn.code(), Code::Mov_r16_rm16);
        assert_eq!(insn.memory_base(), Register::BP);
        assert_eq!(insn.memory_index(), Register::SI);
        assert_eq!(insn.memory_displacement64(), 0xfffe);
        assert_eq!(insn.memory_displ_size(), 1);

        // mov ax, [0x1234]
        let insn = decode(16, &[0x8b, 0x06, 0x34, 0x12]);
        assert_eq!(insn.memory_base(), Register::None);
        assert_eq!(insn.memory_displacement64(), 0x1234);
        assert_eq!(insn.len(), 4);
    }

    #[test]
    fn sib_without_index() {
        // mov eax, [esp+8]
        let insn = decode(32, &[0x8b, 0x44, 0x24, 0x08]);
        assert_eq!(insn.memory_base(), Register::ESP);
        assert_eq!(insn.memory_index(), Register::None);
        assert_eq!(insn.memory_displacement64(), 8);
    }

    #[test]
    fn sib_scaled_index_with_rex() {
        // mov rax, [r12+r13*8+0x10]
        let insn = decode(64, &[0x4b, 0x8b, 0x44, 0xec, 0x10]);
        assert_eq!(insn.code(), Code::Mov_r64_rm64);
        assert_eq!(insn.memory_base(), Register::R12);
        assert_eq!(insn.memory_index(), Register::R13);
        assert_eq!(insn.memory_index_scale(), 8);
    }

    #[test]
    fn sib_no_base() {
        // mov eax, [ecx*4+0x100]
        let insn = decode(32, &[0x8b, 0x04, 0x8d, 0x00, 0x01, 0x00, 0x00]);
        assert_eq!(insn.memory_base(), Register::None);
        assert_eq!(insn.memory_index(), Register::ECX);
        assert_eq!(insn.memory_displacement64(), 0x100);
        assert_eq!(insn.memory_displ_size(), 4);
    }

    #[test]
    fn eip_relative_in_long_mode() {
        // 67 mov eax, [eip+0x10]
        let insn = decode(64, &[0x67, 0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(insn.memory_base(), Register::EIP);
        assert_eq!(insn.memory_displacement64(), 0x17);
    }

    #[test]
    fn absolute_in_protected_mode() {
        // mov eax, [0x10]
        let insn = decode(32, &[0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]);
        assert_eq!(insn.memory_base(), Register::None);
        assert_eq!(insn.memory_displacement64(), 0x10);
    }
}
