//! Instruction decoder. Walks the handler tables one byte at a time and fills in an
//! `Instruction`.

use std::sync::Arc;

use byteorder::{ByteOrder, LittleEndian};
use tracing::{debug, trace};

use crate::code::Code;
use crate::common::{
    DecoderError, DecoderOptions, MandatoryPrefix, Mode, OpSize, MAX_INSTRUCTION_LENGTH,
};
use crate::error::DecoderCreateError;
use crate::handlers::{HandlerRef, OpCodeHandler};
use crate::instruction::Instruction;
use crate::reader::{ByteSource, SliceReader};
use crate::register::Register;
use crate::tables::DecoderTables;

mod constant_offsets;
mod memory;
mod prefixes;
pub(crate) mod state;

pub use self::constant_offsets::ConstantOffsets;
pub(crate) use self::state::{DecodeState, DecoderConfig, StateFlags};

/// Decodes x86 instructions from a `ByteSource`.
///
/// A decoder keeps the address of the next instruction and advances it by the length of each
/// decoded instruction. The handler tables are shared between all decoders.
///
/// ```
/// use p8n_x86_decoder::{Code, Decoder, DecoderOptions, SliceReader};
///
/// let bytes = [0x00, 0xce];
/// let mut decoder = Decoder::new(64, SliceReader::new(&bytes), 0x1000, DecoderOptions::empty())
///     .unwrap();
/// let insn = decoder.decode();
///
/// assert_eq!(insn.code(), Code::Add_rm8_r8);
/// assert_eq!(insn.len(), 2);
/// assert_eq!(decoder.ip(), 0x1002);
/// ```
pub struct Decoder<R: ByteSource> {
    reader: R,
    ip: u64,
    tables: Arc<DecoderTables>,
    config: DecoderConfig,
    state: DecodeState,
}

impl<R: ByteSource> Decoder<R> {
    /// New decoder for `bitness` (16, 32 or 64) code starting at `ip`. Uses the process wide
    /// handler tables, building them on first use.
    pub fn new(
        bitness: u32,
        reader: R,
        ip: u64,
        options: DecoderOptions,
    ) -> Result<Decoder<R>, DecoderCreateError> {
        let mode = Mode::from_bitness(bitness)?;
        let tables = DecoderTables::shared()?;

        Ok(Decoder::with_tables(mode, reader, ip, options, tables))
    }

    /// New decoder using an explicitly built set of handler tables.
    pub fn with_tables(
        mode: Mode,
        reader: R,
        ip: u64,
        options: DecoderOptions,
        tables: Arc<DecoderTables>,
    ) -> Decoder<R> {
        let config = DecoderConfig::new(mode, options);
        let state = DecodeState::new(&config);

        debug!(bitness = mode.bitness(), ip, options = options.bits(), "new decoder");

        Decoder {
            reader,
            ip,
            tables,
            config,
            state,
        }
    }

    /// Address of the next instruction.
    pub fn ip(&self) -> u64 {
        self.ip
    }

    /// Changes the address of the next instruction. Does not move the reader.
    pub fn set_ip(&mut self, ip: u64) {
        self.ip = ip;
    }

    pub fn bitness(&self) -> u32 {
        self.config.mode.bitness()
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn options(&self) -> DecoderOptions {
        self.config.options
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }

    pub fn reader_mut(&mut self) -> &mut R {
        &mut self.reader
    }

    pub fn into_reader(self) -> R {
        self.reader
    }

    /// Outcome of the last `decode` call. Running out of bytes wins over other problems.
    pub fn last_error(&self) -> DecoderError {
        let flags = self.state.flags;

        if flags.contains(StateFlags::NO_MORE_BYTES) {
            DecoderError::NoMoreBytes
        } else if flags.contains(StateFlags::IS_INVALID) {
            DecoderError::InvalidInstruction
        } else {
            DecoderError::None
        }
    }

    /// Decodes the next instruction.
    pub fn decode(&mut self) -> Instruction {
        let mut instruction = Instruction::default();
        self.decode_out(&mut instruction);
        instruction
    }

    /// Decodes the next instruction into `instruction`, overwriting all of its fields.
    pub fn decode_out(&mut self, instruction: &mut Instruction) {
        *instruction = Instruction::default();
        self.state.reset(&self.config);

        let tables: &DecoderTables = &self.tables;
        let mut cx = DecodeContext {
            reader: &mut self.reader,
            tables,
            cfg: &self.config,
            state: &mut self.state,
            ip: self.ip,
        };

        let mut b = cx.read_byte();
        if b & cx.cfg.rex_mask == 0x40 {
            cx.apply_rex(b);
            b = cx.read_byte();
        }
        cx.dispatch(&tables.legacy.map0[b as usize], instruction);

        self.finish(instruction);

        if tracing::enabled!(tracing::Level::TRACE) {
            trace!(
                ip = instruction.ip(),
                len = instruction.len(),
                code = ?instruction.code(),
                error = ?self.last_error(),
                "decoded"
            );
        }
    }

    /// Sets length and addresses, rebases RIP/EIP relative displacements and turns the
    /// instruction into `INVALID` if one of the checks failed.
    fn finish(&mut self, instruction: &mut Instruction) {
        let len = self.state.len;
        let flags = self.state.flags;

        instruction.set_code_size(self.config.default_code_size);
        instruction.set_len(len);
        let ip = self.ip.wrapping_add(len as u64);
        self.ip = ip;
        instruction.set_next_ip(ip);

        let special = StateFlags::IS_INVALID
            | StateFlags::LOCK
            | StateFlags::IP_REL32
            | StateFlags::IP_REL64;
        if !flags.intersects(special) {
            return;
        }

        let displ = instruction.memory_displacement64();
        if flags & (StateFlags::IS_INVALID | StateFlags::LOCK | StateFlags::IP_REL64)
            == StateFlags::IP_REL64
        {
            instruction.set_memory_displacement64(displ.wrapping_add(ip));
            return;
        }
        if flags.contains(StateFlags::IP_REL64) {
            instruction.set_memory_displacement64(displ.wrapping_add(ip));
        }
        if flags.contains(StateFlags::IP_REL32) {
            let target = (displ as u32).wrapping_add(ip as u32);
            instruction.set_memory_displacement64(target as u64);
        }

        let lock = (flags & (StateFlags::LOCK | StateFlags::ALLOW_LOCK)).bits()
            & self.config.invalid_check_mask;
        if flags.contains(StateFlags::IS_INVALID) || lock == StateFlags::LOCK.bits() {
            instruction.reset_to_invalid();
            self.state.flags |= StateFlags::IS_INVALID;
        }
    }

    /// Positions of the displacement and immediates inside the last decoded instruction.
    pub fn constant_offsets(&self, instruction: &Instruction) -> ConstantOffsets {
        ConstantOffsets::new(&self.state, instruction)
    }

    /// Iterator decoding instructions until the reader runs dry.
    pub fn iter(&mut self) -> DecoderIter<'_, R> {
        DecoderIter { decoder: self }
    }
}

impl<'a> Decoder<SliceReader<'a>> {
    /// `true` if there are bytes left to decode.
    pub fn can_decode(&self) -> bool {
        self.reader.can_read()
    }

    /// Offset of the next instruction in the buffer.
    pub fn position(&self) -> usize {
        self.reader.position()
    }

    /// Moves to `pos` in the buffer. Does not change the instruction pointer.
    pub fn set_position(&mut self, pos: usize) {
        self.reader.set_position(pos)
    }
}

/// Decodes instructions until one of them has length zero, i.e. the reader had nothing left.
pub struct DecoderIter<'a, R: ByteSource> {
    decoder: &'a mut Decoder<R>,
}

impl<'a, R: ByteSource> Iterator for DecoderIter<'a, R> {
    type Item = Instruction;

    fn next(&mut self) -> Option<Instruction> {
        let insn = self.decoder.decode();
        if insn.is_empty() {
            None
        } else {
            Some(insn)
        }
    }
}

impl<'a, R: ByteSource> IntoIterator for &'a mut Decoder<R> {
    type Item = Instruction;
    type IntoIter = DecoderIter<'a, R>;

    fn into_iter(self) -> DecoderIter<'a, R> {
        self.iter()
    }
}

/// What a handler sees while decoding: the reader, the tables, the fixed configuration and the
/// scratch state of the current instruction.
pub(crate) struct DecodeContext<'a, R: ByteSource> {
    pub reader: &'a mut R,
    pub tables: &'a DecoderTables,
    pub cfg: &'a DecoderConfig,
    pub state: &'a mut DecodeState,
    /// Address of the first byte of the instruction.
    pub ip: u64,
}

impl<'a, R: ByteSource> DecodeContext<'a, R> {
    /// Next byte of the instruction. Past the end of the input or the 15 byte limit this marks
    /// the instruction invalid and returns 0.
    pub fn read_byte(&mut self) -> u8 {
        if self.state.len < MAX_INSTRUCTION_LENGTH {
            if let Some(b) = self.reader.read_byte() {
                self.state.len += 1;
                return b;
            }
        }
        self.state.flags |= StateFlags::NO_MORE_BYTES | StateFlags::IS_INVALID;
        0
    }

    pub fn read_u16(&mut self) -> u16 {
        let buf = [self.read_byte(), self.read_byte()];
        LittleEndian::read_u16(&buf)
    }

    pub fn read_u32(&mut self) -> u32 {
        let mut buf = [0u8; 4];
        for b in buf.iter_mut() {
            *b = self.read_byte();
        }
        LittleEndian::read_u32(&buf)
    }

    pub fn read_u64(&mut self) -> u64 {
        let mut buf = [0u8; 8];
        for b in buf.iter_mut() {
            *b = self.read_byte();
        }
        LittleEndian::read_u64(&buf)
    }

    pub fn read_modrm(&mut self) {
        let modrm = self.read_byte();
        self.state.set_modrm(modrm);
    }

    /// Address right after the bytes read so far.
    pub fn current_ip(&self) -> u64 {
        self.ip.wrapping_add(self.state.len as u64)
    }

    /// Reads a byte and runs the handler it selects in `table`.
    pub fn decode_table(&mut self, table: &[HandlerRef], instruction: &mut Instruction) {
        let b = self.read_byte();
        self.dispatch(&table[b as usize], instruction);
    }

    /// Runs `handler`, reading the ModRM byte first if it wants one.
    pub fn dispatch(&mut self, handler: &OpCodeHandler, instruction: &mut Instruction) {
        if handler.has_modrm() {
            self.read_modrm();
        }
        handler.decode(self, instruction);
    }

    /// Unconditionally marks the instruction invalid.
    pub fn set_invalid(&mut self) {
        self.state.flags |= StateFlags::IS_INVALID;
    }

    /// Marks the instruction invalid if `cond` holds and invalid checks are enabled.
    pub fn invalid_if(&mut self, cond: bool) {
        if cond && self.cfg.checks_invalid() {
            self.set_invalid();
        }
    }

    pub fn checks_invalid(&self) -> bool {
        self.cfg.checks_invalid()
    }

    pub fn is_long(&self) -> bool {
        self.cfg.is_long()
    }

    pub fn has_option(&self, option: DecoderOptions) -> bool {
        self.cfg.options.intersects(option)
    }

    fn apply_rex(&mut self, b: u8) {
        let st = &mut *self.state;

        st.flags |= StateFlags::HAS_REX;
        if b & 8 != 0 {
            st.flags |= StateFlags::W;
            st.operand_size = OpSize::Size64;
        }
        st.extra_register_base = (b << 1) & 8;
        st.extra_index_register_base = (b << 2) & 8;
        st.extra_base_register_base = (b << 3) & 8;
    }

    /// A legacy prefix after a REX prefix cancels the REX prefix.
    fn reset_rex_prefix_state(&mut self) {
        let cfg = self.cfg;
        let st = &mut *self.state;

        st.flags.remove(StateFlags::HAS_REX | StateFlags::W);
        st.operand_size = if st.flags.contains(StateFlags::HAS66) {
            cfg.default_inverted_operand_size
        } else {
            cfg.default_operand_size
        };
        st.extra_register_base = 0;
        st.extra_index_register_base = 0;
        st.extra_base_register_base = 0;
    }

    /// Continues in the one byte opcode map after a prefix.
    fn next_map0(&mut self, instruction: &mut Instruction) {
        let tables = self.tables;
        self.decode_table(&tables.legacy.map0, instruction);
    }

    pub fn segment_prefix(&mut self, seg: Register, instruction: &mut Instruction) {
        match seg {
            Register::FS | Register::GS => {
                instruction.set_segment_prefix(seg);
                self.state.segment_priority = 1;
            }
            _ => {
                if !self.is_long() || self.state.segment_priority == 0 {
                    instruction.set_segment_prefix(seg);
                }
            }
        }
        self.reset_rex_prefix_state();
        self.next_map0(instruction);
    }

    pub fn operand_size_prefix(&mut self, instruction: &mut Instruction) {
        self.state.flags |= StateFlags::HAS66;
        self.state.operand_size = self.cfg.default_inverted_operand_size;
        if self.state.mandatory_prefix == MandatoryPrefix::None {
            self.state.mandatory_prefix = MandatoryPrefix::P66;
        }
        self.reset_rex_prefix_state();
        self.next_map0(instruction);
    }

    pub fn address_size_prefix(&mut self, instruction: &mut Instruction) {
        self.state.address_size = self.cfg.default_inverted_address_size;
        self.reset_rex_prefix_state();
        self.next_map0(instruction);
    }

    pub fn lock_prefix(&mut self, instruction: &mut Instruction) {
        instruction.set_lock_prefix(true);
        self.state.flags |= StateFlags::LOCK;
        self.reset_rex_prefix_state();
        self.next_map0(instruction);
    }

    /// F2 (`repne == true`) or F3.
    pub fn rep_prefix(&mut self, repne: bool, instruction: &mut Instruction) {
        instruction.set_rep_prefix(!repne);
        instruction.set_repne_prefix(repne);
        self.state.mandatory_prefix = if repne {
            MandatoryPrefix::PF2
        } else {
            MandatoryPrefix::PF3
        };
        self.reset_rex_prefix_state();
        self.next_map0(instruction);
    }

    /// REX prefix seen after some other prefix. Outside of 64-bit mode 40..4F are INC/DEC.
    pub fn rex_prefix(&mut self, rex: u8, fallback: &OpCodeHandler, instruction: &mut Instruction) {
        if !self.is_long() {
            self.dispatch(fallback, instruction);
            return;
        }

        let st = &mut *self.state;
        if rex & 8 != 0 {
            st.operand_size = OpSize::Size64;
            st.flags |= StateFlags::HAS_REX | StateFlags::W;
        } else {
            st.flags |= StateFlags::HAS_REX;
            st.flags.remove(StateFlags::W);
            st.operand_size = if st.flags.contains(StateFlags::HAS66) {
                OpSize::Size16
            } else {
                OpSize::Size32
            };
        }
        st.extra_register_base = (rex << 1) & 8;
        st.extra_index_register_base = (rex << 2) & 8;
        st.extra_base_register_base = (rex << 3) & 8;

        self.next_map0(instruction);
    }

    /// The prefix byte was an opcode extension. It must not be reported as REP/REPNE.
    pub fn clear_mandatory_prefix(&mut self, instruction: &mut Instruction) {
        instruction.set_rep_prefix(false);
        instruction.set_repne_prefix(false);
    }

    pub fn clear_mandatory_prefix_f3(&mut self, instruction: &mut Instruction) {
        if self.state.mandatory_prefix == MandatoryPrefix::PF3 {
            instruction.set_rep_prefix(false);
        }
    }

    pub fn clear_mandatory_prefix_f2(&mut self, instruction: &mut Instruction) {
        if self.state.mandatory_prefix == MandatoryPrefix::PF2 {
            instruction.set_repne_prefix(false);
        }
    }

    /// XACQUIRE/XRELEASE hints (F2/F3) on an HLE capable memory instruction.
    pub fn set_xacquire_xrelease(&mut self, instruction: &mut Instruction, xacquire: bool) {
        match self.state.mandatory_prefix {
            MandatoryPrefix::PF2 if xacquire => {
                self.clear_mandatory_prefix_f2(instruction);
                instruction.set_xacquire_prefix();
            }
            MandatoryPrefix::PF3 => {
                self.clear_mandatory_prefix_f3(instruction);
                instruction.set_xrelease_prefix();
            }
            _ => {}
        }
    }

    /// F3 0F 09: WBNOINVD unless disabled.
    pub fn wbinvd(&mut self, instruction: &mut Instruction) {
        if self.has_option(DecoderOptions::NO_WBNOINVD)
            || self.state.mandatory_prefix != MandatoryPrefix::PF3
        {
            instruction.set_code(Code::Wbinvd);
        } else {
            self.clear_mandatory_prefix_f3(instruction);
            instruction.set_code(Code::Wbnoinvd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decoder(bitness: u32, bytes: &[u8]) -> Decoder<SliceReader<'_>> {
        Decoder::new(bitness, SliceReader::new(bytes), 0, DecoderOptions::empty()).unwrap()
    }

    #[test]
    fn rejects_bad_bitness() {
        let bytes = [0x90];
        let res = Decoder::new(8, SliceReader::new(&bytes), 0, DecoderOptions::empty());
        assert_eq!(res.err(), Some(DecoderCreateError::UnsupportedBitness(8)));
    }

    #[test]
    fn empty_input_is_no_more_bytes() {
        let mut d = decoder(32, &[]);
        let insn = d.decode();
        assert!(insn.is_invalid());
        assert_eq!(insn.len(), 0);
        assert_eq!(d.last_error(), DecoderError::NoMoreBytes);
    }

    #[test]
    fn length_limit() {
        // 15 operand size prefixes and no opcode
        let bytes = [0x66u8; 16];
        let mut d = decoder(32, &bytes);
        let insn = d.decode();
        assert!(insn.is_invalid());
        assert_eq!(insn.len(), MAX_INSTRUCTION_LENGTH);
        assert_eq!(d.reader().position(), MAX_INSTRUCTION_LENGTH);
    }

    #[test]
    fn rex_before_prefix_is_dropped() {
        // REX.W 66 add ax, cx
        let bytes = [0x48, 0x66, 0x01, 0xc8];
        let mut d = decoder(64, &bytes);
        let insn = d.decode();
        assert_eq!(insn.code(), Code::Add_rm16_r16);
        assert_eq!(insn.op_register(0), Register::AX);

        // 66 REX.W: REX wins
        let bytes = [0x66, 0x48, 0x01, 0xc8];
        let mut d = decoder(64, &bytes);
        assert_eq!(d.decode().code(), Code::Add_rm64_r64);
    }

    #[test]
    fn segment_priority_in_long_mode() {
        // fs ds mov eax, [rax]
        let bytes = [0x64, 0x3e, 0x8b, 0x00];
        let mut d = decoder(64, &bytes);
        assert_eq!(d.decode().segment_prefix(), Register::FS);

        let mut d = decoder(32, &bytes);
        assert_eq!(d.decode().segment_prefix(), Register::DS);
    }

    #[test]
    fn lock_without_memory_operand() {
        // lock add eax, ecx
        let bytes = [0xf0, 0x01, 0xc8];
        let mut d = decoder(32, &bytes);
        let insn = d.decode();
        assert!(insn.is_invalid());
        assert_eq!(insn.len(), 3);
        assert_eq!(d.last_error(), DecoderError::InvalidInstruction);

        let mut d = Decoder::new(
            32,
            SliceReader::new(&bytes),
            0,
            DecoderOptions::NO_INVALID_CHECK,
        )
        .unwrap();
        assert_eq!(d.decode().code(), Code::Add_rm32_r32);
    }

    #[test]
    fn iterator_stops_at_end() {
        let bytes = [0x90, 0x90, 0xc3];
        let mut d = decoder(64, &bytes);
        let codes: Vec<Code> = d.iter().map(|i| i.code()).collect();
        assert_eq!(codes, vec![Code::Nopd, Code::Nopd, Code::Retnq]);
        assert!(!d.can_decode());
    }
}
