use bitflags::bitflags;

use crate::code::Code;
use crate::common::{CodeSize, EncodingKind, MvexRegMemConv, OpKind, RoundingControl};
use crate::register::Register;

/// Maximum number of operands an instruction can have.
pub const MAX_OP_COUNT: usize = 5;

bitflags! {
    #[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
    struct InstrFlags: u16 {
        const LOCK = 0x0001;
        const REPE = 0x0002;
        const REPNE = 0x0004;
        const XACQUIRE = 0x0008;
        const XRELEASE = 0x0010;
        const BROADCAST = 0x0020;
        const ZEROING = 0x0040;
        const SAE = 0x0080;
        const EVICTION_HINT = 0x0100;
    }
}

impl Default for InstrFlags {
    fn default() -> Self {
        InstrFlags::empty()
    }
}

/// A decoded instruction.
///
/// Owned by the caller and overwritten by every `Decoder::decode_out` call. The decoder writes the
/// fields, everything else only reads them.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct Instruction {
    code: Code,
    code_size: CodeSize,
    len: u8,
    next_ip: u64,
    op_count: u8,
    op_kinds: [OpKind; MAX_OP_COUNT],
    op_regs: [Register; MAX_OP_COUNT],
    mem_base: Register,
    mem_index: Register,
    mem_scale: u8,
    mem_displ: u64,
    mem_displ_size: u8,
    segment_prefix: Register,
    immediate: u64,
    imm8_2nd: u8,
    near_branch: u64,
    far_branch: u32,
    far_selector: u16,
    flags: InstrFlags,
    op_mask: Register,
    rounding: RoundingControl,
    mvex_conv: MvexRegMemConv,
    encoding: EncodingKind,
}

impl Instruction {
    pub fn new() -> Instruction {
        Instruction::default()
    }

    pub fn code(&self) -> Code {
        self.code
    }

    /// `true` if the bytes did not decode to an instruction.
    pub fn is_invalid(&self) -> bool {
        self.code == Code::INVALID
    }

    pub fn code_size(&self) -> CodeSize {
        self.code_size
    }

    /// Length in bytes, 1..=15 for anything the decoder consumed bytes for.
    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn ip(&self) -> u64 {
        self.next_ip.wrapping_sub(self.len as u64)
    }

    pub fn next_ip(&self) -> u64 {
        self.next_ip
    }

    pub fn op_count(&self) -> usize {
        self.op_count as usize
    }

    /// Kind of operand `index`. Slots at or past `op_count()` report `OpKind::Register` with
    /// `Register::None`.
    pub fn op_kind(&self, index: usize) -> OpKind {
        self.op_kinds.get(index).cloned().unwrap_or_default()
    }

    /// Register of operand `index` if its kind is `OpKind::Register`.
    pub fn op_register(&self, index: usize) -> Register {
        self.op_regs.get(index).cloned().unwrap_or_default()
    }

    pub fn op_kinds(&self) -> impl Iterator<Item = OpKind> + '_ {
        self.op_kinds[..self.op_count()].iter().cloned()
    }

    pub fn memory_base(&self) -> Register {
        self.mem_base
    }

    pub fn memory_index(&self) -> Register {
        self.mem_index
    }

    /// 1, 2, 4 or 8.
    pub fn memory_index_scale(&self) -> u32 {
        1 << self.mem_scale
    }

    /// Displacement sign or zero extended to 64 bits. For RIP/EIP relative operands this is the
    /// absolute target address.
    pub fn memory_displacement64(&self) -> u64 {
        self.mem_displ
    }

    pub fn memory_displacement32(&self) -> u32 {
        self.mem_displ as u32
    }

    /// Size of the displacement in bytes: 0, 1, 2, 4 or 8.
    pub fn memory_displ_size(&self) -> usize {
        self.mem_displ_size as usize
    }

    /// Segment override prefix, `Register::None` if there's none.
    pub fn segment_prefix(&self) -> Register {
        self.segment_prefix
    }

    pub fn has_segment_prefix(&self) -> bool {
        self.segment_prefix != Register::None
    }

    /// Segment used by the memory operand, taking the default `SS` for stack based addressing
    /// and `ES` for string destinations into account.
    pub fn memory_segment(&self) -> Register {
        if self.op_kinds().any(|k| {
            k == OpKind::MemoryESDI || k == OpKind::MemoryESEDI || k == OpKind::MemoryESRDI
        }) {
            return Register::ES;
        }
        if self.segment_prefix != Register::None {
            return self.segment_prefix;
        }
        match self.mem_base {
            Register::BP | Register::EBP | Register::SP | Register::ESP | Register::RBP
            | Register::RSP => Register::SS,
            _ => Register::DS,
        }
    }

    pub fn immediate8(&self) -> u8 {
        self.immediate as u8
    }

    pub fn immediate8_2nd(&self) -> u8 {
        self.imm8_2nd
    }

    pub fn immediate16(&self) -> u16 {
        self.immediate as u16
    }

    pub fn immediate32(&self) -> u32 {
        self.immediate as u32
    }

    pub fn immediate64(&self) -> u64 {
        self.immediate
    }

    /// Value of the immediate operand `index`, sign extended as its kind requires. `None` if
    /// the operand is not an immediate.
    pub fn immediate(&self, index: usize) -> Option<u64> {
        let v = match self.op_kind(index) {
            OpKind::Immediate8 => self.immediate8() as u64,
            OpKind::Immediate8_2nd => self.imm8_2nd as u64,
            OpKind::Immediate16 => self.immediate16() as u64,
            OpKind::Immediate32 => self.immediate32() as u64,
            OpKind::Immediate64 => self.immediate,
            OpKind::Immediate8to16 => self.immediate8() as i8 as i16 as u16 as u64,
            OpKind::Immediate8to32 => self.immediate8() as i8 as i32 as u32 as u64,
            OpKind::Immediate8to64 => self.immediate8() as i8 as i64 as u64,
            OpKind::Immediate32to64 => self.immediate32() as i32 as i64 as u64,
            _ => return None,
        };
        Some(v)
    }

    /// Target of a near branch, already truncated to the branch width.
    pub fn near_branch_target(&self) -> u64 {
        self.near_branch
    }

    pub fn far_branch16(&self) -> u16 {
        self.far_branch as u16
    }

    pub fn far_branch32(&self) -> u32 {
        self.far_branch
    }

    pub fn far_branch_selector(&self) -> u16 {
        self.far_selector
    }

    pub fn has_lock_prefix(&self) -> bool {
        self.flags.contains(InstrFlags::LOCK)
    }

    pub fn has_rep_prefix(&self) -> bool {
        self.flags.contains(InstrFlags::REPE)
    }

    pub fn has_repne_prefix(&self) -> bool {
        self.flags.contains(InstrFlags::REPNE)
    }

    pub fn has_xacquire_prefix(&self) -> bool {
        self.flags.contains(InstrFlags::XACQUIRE)
    }

    pub fn has_xrelease_prefix(&self) -> bool {
        self.flags.contains(InstrFlags::XRELEASE)
    }

    /// EVEX embedded broadcast of the memory operand.
    pub fn is_broadcast(&self) -> bool {
        self.flags.contains(InstrFlags::BROADCAST)
    }

    pub fn op_mask(&self) -> Register {
        self.op_mask
    }

    pub fn has_op_mask(&self) -> bool {
        self.op_mask != Register::None
    }

    pub fn zeroing_masking(&self) -> bool {
        self.flags.contains(InstrFlags::ZEROING)
    }

    pub fn merging_masking(&self) -> bool {
        !self.zeroing_masking()
    }

    pub fn rounding_control(&self) -> RoundingControl {
        self.rounding
    }

    pub fn suppress_all_exceptions(&self) -> bool {
        self.flags.contains(InstrFlags::SAE)
    }

    pub fn is_mvex_eviction_hint(&self) -> bool {
        self.flags.contains(InstrFlags::EVICTION_HINT)
    }

    pub fn mvex_reg_mem_conv(&self) -> MvexRegMemConv {
        self.mvex_conv
    }

    pub fn encoding(&self) -> EncodingKind {
        self.encoding
    }
}

// Decoder side. Nothing outside the crate writes an instruction.
impl Instruction {
    pub(crate) fn set_code(&mut self, code: Code) {
        self.code = code;
    }

    pub(crate) fn set_code_size(&mut self, code_size: CodeSize) {
        self.code_size = code_size;
    }

    pub(crate) fn set_len(&mut self, len: usize) {
        self.len = len as u8;
    }

    pub(crate) fn set_next_ip(&mut self, ip: u64) {
        self.next_ip = ip;
    }

    pub(crate) fn set_op_kind(&mut self, index: usize, kind: OpKind) {
        if let Some(slot) = self.op_kinds.get_mut(index) {
            *slot = kind;
            self.op_count = self.op_count.max(index as u8 + 1);
        }
    }

    pub(crate) fn set_op_register(&mut self, index: usize, reg: Register) {
        if let Some(slot) = self.op_regs.get_mut(index) {
            *slot = reg;
            self.op_count = self.op_count.max(index as u8 + 1);
        }
    }

    pub(crate) fn set_op_reg(&mut self, index: usize, reg: Register) {
        self.set_op_kind(index, OpKind::Register);
        self.set_op_register(index, reg);
    }

    pub(crate) fn set_memory_base(&mut self, reg: Register) {
        self.mem_base = reg;
    }

    pub(crate) fn set_memory_index(&mut self, reg: Register) {
        self.mem_index = reg;
    }

    pub(crate) fn set_memory_index_scale_raw(&mut self, scale: u32) {
        self.mem_scale = (scale & 3) as u8;
    }

    pub(crate) fn set_memory_displacement64(&mut self, displ: u64) {
        self.mem_displ = displ;
    }

    pub(crate) fn set_memory_displ_size(&mut self, size: u32) {
        self.mem_displ_size = size as u8;
    }

    pub(crate) fn set_segment_prefix(&mut self, reg: Register) {
        self.segment_prefix = reg;
    }

    pub(crate) fn set_immediate(&mut self, imm: u64) {
        self.immediate = imm;
    }

    pub(crate) fn set_immediate8_2nd(&mut self, imm: u8) {
        self.imm8_2nd = imm;
    }

    pub(crate) fn set_near_branch(&mut self, target: u64) {
        self.near_branch = target;
    }

    pub(crate) fn set_far_branch(&mut self, offset: u32, selector: u16) {
        self.far_branch = offset;
        self.far_selector = selector;
    }

    pub(crate) fn set_lock_prefix(&mut self, on: bool) {
        self.flags.set(InstrFlags::LOCK, on);
    }

    pub(crate) fn set_rep_prefix(&mut self, on: bool) {
        self.flags.set(InstrFlags::REPE, on);
    }

    pub(crate) fn set_repne_prefix(&mut self, on: bool) {
        self.flags.set(InstrFlags::REPNE, on);
    }

    pub(crate) fn set_xacquire_prefix(&mut self) {
        self.flags.insert(InstrFlags::XACQUIRE);
    }

    pub(crate) fn set_xrelease_prefix(&mut self) {
        self.flags.insert(InstrFlags::XRELEASE);
    }

    pub(crate) fn set_broadcast(&mut self) {
        self.flags.insert(InstrFlags::BROADCAST);
    }

    pub(crate) fn set_zeroing_masking(&mut self) {
        self.flags.insert(InstrFlags::ZEROING);
    }

    pub(crate) fn set_suppress_all_exceptions(&mut self) {
        self.flags.insert(InstrFlags::SAE);
    }

    pub(crate) fn set_mvex_eviction_hint(&mut self) {
        self.flags.insert(InstrFlags::EVICTION_HINT);
    }

    pub(crate) fn set_op_mask(&mut self, reg: Register) {
        self.op_mask = reg;
    }

    pub(crate) fn set_rounding_control(&mut self, rc: RoundingControl) {
        self.rounding = rc;
    }

    pub(crate) fn set_mvex_reg_mem_conv(&mut self, conv: MvexRegMemConv) {
        self.mvex_conv = conv;
    }

    pub(crate) fn set_encoding(&mut self, encoding: EncodingKind) {
        self.encoding = encoding;
    }

    /// Wipes everything but the size, length and instruction pointer and marks the instruction
    /// invalid.
    pub(crate) fn reset_to_invalid(&mut self) {
        let code_size = self.code_size;
        let len = self.len;
        let next_ip = self.next_ip;

        *self = Instruction::default();
        self.code_size = code_size;
        self.len = len;
        self.next_ip = next_ip;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn op_count_follows_highest_slot() {
        let mut insn = Instruction::new();
        assert_eq!(insn.op_count(), 0);
        insn.set_op_reg(0, Register::EAX);
        insn.set_op_kind(2, OpKind::Immediate8);
        assert_eq!(insn.op_count(), 3);
        insn.set_op_kind(7, OpKind::Immediate8);
        assert_eq!(insn.op_count(), 3);
    }

    #[test]
    fn invalid_reset_keeps_length() {
        let mut insn = Instruction::new();
        insn.set_code(Code::Nopd);
        insn.set_len(3);
        insn.set_next_ip(0x1003);
        insn.set_lock_prefix(true);
        insn.set_op_reg(0, Register::EAX);
        insn.reset_to_invalid();

        assert!(insn.is_invalid());
        assert_eq!(insn.len(), 3);
        assert_eq!(insn.ip(), 0x1000);
        assert_eq!(insn.op_count(), 0);
        assert!(!insn.has_lock_prefix());
    }

    #[test]
    fn sign_extended_immediates() {
        let mut insn = Instruction::new();
        insn.set_op_kind(0, OpKind::Immediate8to32);
        insn.set_immediate(0xff);
        assert_eq!(insn.immediate(0), Some(0xffff_ffff));
        insn.set_op_kind(0, OpKind::Immediate32to64);
        insn.set_immediate(0x8000_0000);
        assert_eq!(insn.immediate(0), Some(0xffff_ffff_8000_0000));
        insn.set_op_kind(1, OpKind::Register);
        assert_eq!(insn.immediate(1), None);
    }
}
