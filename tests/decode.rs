use p8n_x86_decoder::{
    Code, Decoder, DecoderError, DecoderOptions, EncodingKind, Instruction, MvexRegMemConv,
    OpKind, Register, RoundingControl, SliceReader,
};

fn decode_with(bitness: u32, bytes: &[u8], options: DecoderOptions) -> (Instruction, DecoderError) {
    let mut d = Decoder::new(bitness, SliceReader::new(bytes), 0x1000, options).unwrap();
    let insn = d.decode();
    (insn, d.last_error())
}

fn decode(bitness: u32, bytes: &[u8]) -> Instruction {
    let (insn, err) = decode_with(bitness, bytes, DecoderOptions::empty());
    assert_eq!(err, DecoderError::None, "{:02x?} failed to decode", bytes);
    insn
}

#[test]
fn add_rm8_r8_in_every_mode() {
    for &bitness in &[16, 32, 64] {
        let insn = decode(bitness, &[0x00, 0xce]);
        assert_eq!(insn.code(), Code::Add_rm8_r8);
        assert_eq!(insn.len(), 2);
        assert_eq!(insn.op_count(), 2);
        assert_eq!(insn.op_kind(0), OpKind::Register);
        assert_eq!(insn.op_kind(1), OpKind::Register);
        assert_eq!(insn.op_register(0), Register::DH);
        assert_eq!(insn.op_register(1), Register::CL);
        assert_eq!(insn.next_ip(), 0x1002);
    }
}

#[test]
fn operand_size_follows_mode() {
    let insn = decode(16, &[0x01, 0xce]);
    assert_eq!(insn.code(), Code::Add_rm16_r16);
    assert_eq!(insn.op_register(0), Register::SI);
    assert_eq!(insn.op_register(1), Register::CX);

    let insn = decode(32, &[0x01, 0xce]);
    assert_eq!(insn.code(), Code::Add_rm32_r32);
    assert_eq!(insn.op_register(0), Register::ESI);

    // REX.W
    let insn = decode(64, &[0x48, 0x01, 0xce]);
    assert_eq!(insn.code(), Code::Add_rm64_r64);
    assert_eq!(insn.op_register(0), Register::RSI);
    assert_eq!(insn.len(), 3);
}

#[test]
fn rex_selects_new_byte_registers() {
    // add sil, cl
    let insn = decode(64, &[0x40, 0x00, 0xce]);
    assert_eq!(insn.op_register(0), Register::SIL);

    // add r14b, r9b
    let insn = decode(64, &[0x45, 0x00, 0xce]);
    assert_eq!(insn.op_register(0), Register::R14L);
    assert_eq!(insn.op_register(1), Register::R9L);
}

#[test]
fn rip_relative_displacement_is_rebased() {
    // mov eax, [rip+0x10]
    let insn = decode(64, &[0x8b, 0x05, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(insn.code(), Code::Mov_r32_rm32);
    assert_eq!(insn.op_kind(1), OpKind::Memory);
    assert_eq!(insn.memory_base(), Register::RIP);
    assert_eq!(insn.memory_displacement64(), 0x1000 + 6 + 0x10);
}

#[test]
fn sib_with_scale_and_displacement() {
    // lea rax, [rbx+rcx*4+0x20]
    let insn = decode(64, &[0x48, 0x8d, 0x44, 0x8b, 0x20]);
    assert_eq!(insn.code(), Code::Lea_r64_m);
    assert_eq!(insn.memory_base(), Register::RBX);
    assert_eq!(insn.memory_index(), Register::RCX);
    assert_eq!(insn.memory_index_scale(), 4);
    assert_eq!(insn.memory_displacement64(), 0x20);
    assert_eq!(insn.memory_displ_size(), 1);
}

#[test]
fn truncated_instruction_reports_no_more_bytes() {
    // mov eax, imm32 with one immediate byte missing
    let (insn, err) = decode_with(32, &[0xb8, 0x01, 0x02, 0x03], DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::NoMoreBytes);
    assert_eq!(insn.len(), 4);

    let insn = decode(32, &[0xb8, 0x01, 0x02, 0x03, 0x04]);
    assert_eq!(insn.code(), Code::Mov_r32_imm32);
    assert_eq!(insn.immediate32(), 0x0403_0201);
}

#[test]
fn pause_and_its_option() {
    let insn = decode(64, &[0xf3, 0x90]);
    assert_eq!(insn.code(), Code::Pause);
    assert!(!insn.has_rep_prefix());

    let (insn, _) = decode_with(64, &[0xf3, 0x90], DecoderOptions::NO_PAUSE);
    assert_eq!(insn.code(), Code::Nopd);
    assert!(insn.has_rep_prefix());
}

#[test]
fn xchg_with_accumulator() {
    let insn = decode(32, &[0x91]);
    assert_eq!(insn.code(), Code::Xchg_r32_EAX);
    assert_eq!(insn.op_register(0), Register::ECX);
    assert_eq!(insn.op_register(1), Register::EAX);

    // REX.B 90 is xchg r8d, eax, not nop
    let insn = decode(64, &[0x41, 0x90]);
    assert_eq!(insn.code(), Code::Xchg_r32_EAX);
    assert_eq!(insn.op_register(0), Register::R8D);
}

#[test]
fn wbnoinvd_and_its_option() {
    let insn = decode(64, &[0xf3, 0x0f, 0x09]);
    assert_eq!(insn.code(), Code::Wbnoinvd);

    let (insn, _) = decode_with(64, &[0xf3, 0x0f, 0x09], DecoderOptions::NO_WBNOINVD);
    assert_eq!(insn.code(), Code::Wbinvd);
}

#[test]
fn far_jump_offsets() {
    let bytes = [0xea, 0x78, 0x56, 0x34, 0x12, 0x00, 0x10];
    let mut d = Decoder::new(32, SliceReader::new(&bytes), 0, DecoderOptions::empty()).unwrap();
    let insn = d.decode();
    assert_eq!(insn.code(), Code::Jmp_ptr1632);
    assert_eq!(insn.op_kind(0), OpKind::FarBranch32);
    assert_eq!(insn.far_branch32(), 0x1234_5678);
    assert_eq!(insn.far_branch_selector(), 0x1000);

    let co = d.constant_offsets(&insn);
    assert_eq!((co.immediate_offset, co.immediate_size), (1, 4));
    assert_eq!((co.immediate_offset2, co.immediate_size2), (5, 2));

    // no far jumps in 64-bit mode
    let (insn, err) = decode_with(64, &bytes, DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);
}

#[test]
fn immediate_offsets() {
    // add ecx, 0x12345678
    let bytes = [0x81, 0xc1, 0x78, 0x56, 0x34, 0x12];
    let mut d = Decoder::new(32, SliceReader::new(&bytes), 0, DecoderOptions::empty()).unwrap();
    let insn = d.decode();
    assert_eq!(insn.code(), Code::Add_rm32_imm32);
    let co = d.constant_offsets(&insn);
    assert!(!co.has_displacement());
    assert_eq!((co.immediate_offset, co.immediate_size), (2, 4));
}

#[test]
fn vex_three_operand_form() {
    // vaddps ymm1, ymm2, ymm3
    let insn = decode(64, &[0xc5, 0xec, 0x58, 0xcb]);
    assert_eq!(insn.code(), Code::VEX_Vaddps_ymm_ymm_ymmm256);
    assert_eq!(insn.encoding(), EncodingKind::Vex);
    assert_eq!(insn.op_register(0), Register::YMM1);
    assert_eq!(insn.op_register(1), Register::YMM2);
    assert_eq!(insn.op_register(2), Register::YMM3);
}

#[test]
fn c5_outside_long_mode_is_lds_with_memory() {
    // lds eax, [ecx]
    let insn = decode(32, &[0xc5, 0x01]);
    assert_eq!(insn.encoding(), EncodingKind::Legacy);
    assert_eq!(insn.op_kind(1), OpKind::Memory);
    assert_eq!(insn.len(), 2);
}

#[test]
fn vex_after_legacy_prefix_is_invalid() {
    let (insn, err) = decode_with(64, &[0x66, 0xc5, 0xec, 0x58, 0xcb], DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);
    assert_eq!(insn.len(), 5);
}

#[test]
fn xop_rotate() {
    // vprotb xmm0, xmm1, xmm0
    let insn = decode(64, &[0x8f, 0xe9, 0x78, 0x90, 0xc1]);
    assert_eq!(insn.code(), Code::XOP_Vprotb_xmm_xmmm128_xmm);
    assert_eq!(insn.encoding(), EncodingKind::Xop);
    assert_eq!(insn.op_register(0), Register::XMM0);
    assert_eq!(insn.op_register(1), Register::XMM1);
    assert_eq!(insn.op_register(2), Register::XMM0);
}

#[test]
fn evex_masking() {
    // vaddps zmm1{k1}{z}, zmm2, zmm3
    let insn = decode(64, &[0x62, 0xf1, 0x6c, 0xc9, 0x58, 0xcb]);
    assert_eq!(insn.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
    assert_eq!(insn.encoding(), EncodingKind::Evex);
    assert_eq!(insn.op_register(0), Register::ZMM1);
    assert_eq!(insn.op_register(1), Register::ZMM2);
    assert_eq!(insn.op_register(2), Register::ZMM3);
    assert_eq!(insn.op_mask(), Register::K1);
    assert!(insn.zeroing_masking());
}

#[test]
fn evex_embedded_rounding_implies_512_bits() {
    // vaddps zmm1, zmm2, zmm3, {rn-sae}
    let insn = decode(64, &[0x62, 0xf1, 0x6c, 0x18, 0x58, 0xcb]);
    assert_eq!(insn.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
    assert_eq!(insn.rounding_control(), RoundingControl::RoundToNearest);

    // {rz-sae}
    let insn = decode(64, &[0x62, 0xf1, 0x6c, 0x78, 0x58, 0xcb]);
    assert_eq!(insn.rounding_control(), RoundingControl::RoundTowardZero);
}

#[test]
fn evex_broadcast_and_compressed_displacement() {
    // vaddps zmm1, zmm2, dword bcst [rax+0x40]: disp8 1 scaled by 4
    let insn = decode(64, &[0x62, 0xf1, 0x6c, 0x58, 0x58, 0x48, 0x10]);
    assert!(insn.is_broadcast());
    assert_eq!(insn.memory_base(), Register::RAX);
    assert_eq!(insn.memory_displacement64(), 0x40);

    // without broadcast the full 64 byte vector is the unit
    let insn = decode(64, &[0x62, 0xf1, 0x6c, 0x48, 0x58, 0x48, 0x01]);
    assert!(!insn.is_broadcast());
    assert_eq!(insn.memory_displacement64(), 0x40);
}

#[test]
fn zeroing_without_mask_is_gated_by_invalid_check() {
    // {z} with k0
    let bytes = [0x62, 0xf1, 0x6c, 0xc8, 0x58, 0xcb];
    let (insn, err) = decode_with(64, &bytes, DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);
    assert_eq!(insn.len(), 6);

    let (insn, err) = decode_with(64, &bytes, DecoderOptions::NO_INVALID_CHECK);
    assert_eq!(err, DecoderError::None);
    assert_eq!(insn.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
    assert_eq!(insn.op_mask(), Register::None);
}

#[test]
fn gather_needs_an_opmask() {
    // vpgatherdd zmm1{k1}, [rax+zmm2*4]
    let insn = decode(64, &[0x62, 0xf2, 0x7d, 0x49, 0x90, 0x0c, 0x90]);
    assert_eq!(insn.code(), Code::EVEX_Vpgatherdd_zmm_k1_vm32z);
    assert_eq!(insn.memory_index(), Register::ZMM2);
    assert_eq!(insn.memory_index_scale(), 4);

    let (insn, err) = decode_with(64, &[0x62, 0xf2, 0x7d, 0x48, 0x90, 0x0c, 0x90], DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);
}

#[test]
fn mvex_needs_the_knc_option() {
    // vaddps zmm1, zmm2, zmm3
    let bytes = [0x62, 0xf1, 0x68, 0x08, 0x58, 0xcb];
    let (insn, err) = decode_with(64, &bytes, DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);

    let (insn, err) = decode_with(64, &bytes, DecoderOptions::KNC);
    assert_eq!(err, DecoderError::None);
    assert_eq!(insn.code(), Code::MVEX_Vaddps_zmm_k1_zmm_zmmmt);
    assert_eq!(insn.encoding(), EncodingKind::Mvex);
    assert_eq!(insn.mvex_reg_mem_conv(), MvexRegMemConv::RegSwizzleNone);
}

#[test]
fn three_dnow_suffix() {
    // pfadd mm0, mm1
    let insn = decode(32, &[0x0f, 0x0f, 0xc1, 0x9e]);
    assert_eq!(insn.code(), Code::Pfadd_mm_mmm64);
    assert_eq!(insn.encoding(), EncodingKind::D3now);
    assert_eq!(insn.op_register(0), Register::MM0);
    assert_eq!(insn.op_register(1), Register::MM1);
    assert_eq!(insn.len(), 4);
}

#[test]
fn xacquire_on_locked_memory_form() {
    // xacquire lock add [eax], ecx
    let insn = decode(32, &[0xf2, 0xf0, 0x01, 0x08]);
    assert_eq!(insn.code(), Code::Add_rm32_r32);
    assert!(insn.has_lock_prefix());
    assert!(insn.has_xacquire_prefix());
    assert!(!insn.has_repne_prefix());
}

#[test]
fn decoding_a_buffer() {
    // push rbp; mov rbp, rsp; pop rbp; ret
    let bytes = [0x55, 0x48, 0x89, 0xe5, 0x5d, 0xc3];
    let mut d = Decoder::new(64, SliceReader::new(&bytes), 0x40_0000, DecoderOptions::empty())
        .unwrap();
    let insns: Vec<Instruction> = d.iter().collect();
    let codes: Vec<Code> = insns.iter().map(|i| i.code()).collect();
    assert_eq!(
        codes,
        vec![Code::Push_r64, Code::Mov_rm64_r64, Code::Pop_r64, Code::Retnq]
    );
    assert_eq!(insns[1].ip(), 0x40_0001);
    assert_eq!(d.ip(), 0x40_0006);
}

#[test]
fn bound_or_evex_depends_on_mode() {
    // bound ecx, [eax]
    let insn = decode(32, &[0x62, 0x08]);
    assert_eq!(insn.code(), Code::Bound_r32_m3232);
    assert_eq!(insn.encoding(), EncodingKind::Legacy);

    let (insn, _) = decode_with(64, &[0x62, 0x08], DecoderOptions::empty());
    assert_ne!(insn.code(), Code::Bound_r32_m3232);

    let insn = decode(64, &[0x62, 0xf1, 0x6c, 0x48, 0x58, 0xcb]);
    assert_eq!(insn.code(), Code::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er);
    assert_eq!(insn.encoding(), EncodingKind::Evex);
    assert_eq!(insn.op_register(0), Register::ZMM1);
    assert_eq!(insn.op_register(1), Register::ZMM2);
    assert_eq!(insn.op_register(2), Register::ZMM3);
}

#[test]
fn near_branch_targets() {
    let insn = decode(64, &[0xe8, 0x10, 0x00, 0x00, 0x00]);
    assert_eq!(insn.code(), Code::Call_rel32_64);
    assert_eq!(insn.op_kind(0), OpKind::NearBranch64);
    assert_eq!(insn.near_branch_target(), 0x1015);

    let mut d = Decoder::new(64, SliceReader::new(&[0xeb, 0xfe]), 0, DecoderOptions::empty())
        .unwrap();
    d.set_ip(0x2000);
    let insn = d.decode();
    assert_eq!(insn.code(), Code::Jmp_rel8_64);
    assert_eq!(insn.near_branch_target(), 0x2000);
}

#[test]
fn effective_segment() {
    let insn = decode(32, &[0x64, 0x8b, 0x00]);
    assert!(insn.has_segment_prefix());
    assert_eq!(insn.memory_segment(), Register::FS);

    let insn = decode(32, &[0x8b, 0x04, 0x24]);
    assert!(!insn.has_segment_prefix());
    assert_eq!(insn.memory_base(), Register::ESP);
    assert_eq!(insn.memory_segment(), Register::SS);
}

#[test]
fn evex_suppress_all_exceptions() {
    // vcvttps2dq zmm0, zmm1, {sae}
    let insn = decode(64, &[0x62, 0xf1, 0x7e, 0x18, 0x5b, 0xc1]);
    assert_eq!(insn.code(), Code::EVEX_Vcvttps2dq_zmm_k1z_zmmm512b32_sae);
    assert!(insn.suppress_all_exceptions());
    assert_eq!(insn.rounding_control(), RoundingControl::None);
    assert_eq!(insn.op_register(0), Register::ZMM0);
    assert_eq!(insn.op_register(1), Register::ZMM1);
}

#[test]
fn invalid_in_long_mode_still_consumes_modrm() {
    // daa has no 64-bit form
    let (insn, err) = decode_with(64, &[0x27, 0x91], DecoderOptions::empty());
    assert_eq!(err, DecoderError::InvalidInstruction);
    assert_eq!(insn.code(), Code::INVALID);
    assert_eq!(insn.len(), 2);

    let insn = decode(32, &[0x27]);
    assert_eq!(insn.code(), Code::Daa);
    assert_eq!(insn.len(), 1);
}

#[test]
fn unknown_vex_and_xop_maps_stop_after_the_opcode() {
    for bytes in &[[0xc4, 0xe4, 0x78, 0x90, 0x90], [0x8f, 0xeb, 0x78, 0x90, 0x90]] {
        let (insn, err) = decode_with(64, bytes, DecoderOptions::empty());
        assert_eq!(err, DecoderError::InvalidInstruction, "{:02x?}", bytes);
        assert_eq!(insn.len(), 4, "{:02x?}", bytes);
    }
}

#[test]
fn gather_registers_must_not_overlap() {
    let bad: &[&[u8]] = &[
        // vpgatherdd xmm0, [rax+xmm0*4], xmm1
        &[0xc4, 0xe2, 0x71, 0x90, 0x04, 0x80],
        // vpgatherdd xmm1, [rax+xmm2*4], xmm1
        &[0xc4, 0xe2, 0x71, 0x90, 0x0c, 0x90],
        // vpgatherdd zmm0{k1}, [rax+zmm0*4]
        &[0x62, 0xf2, 0x7d, 0x49, 0x90, 0x04, 0x80],
    ];
    for bytes in bad {
        let (insn, err) = decode_with(64, bytes, DecoderOptions::empty());
        assert!(insn.is_invalid(), "{:02x?}", bytes);
        assert_eq!(err, DecoderError::InvalidInstruction);
        assert_eq!(insn.len(), bytes.len());

        let (insn, err) = decode_with(64, bytes, DecoderOptions::NO_INVALID_CHECK);
        assert_eq!(err, DecoderError::None, "{:02x?}", bytes);
        assert!(!insn.is_invalid());
    }

    // vpgatherdd xmm1, [rax+xmm2*4], xmm3
    let insn = decode(64, &[0xc4, 0xe2, 0x61, 0x90, 0x0c, 0x90]);
    assert_eq!(insn.code(), Code::VEX_Vpgatherdd_xmm_vm32x_xmm);
    assert_eq!(insn.op_register(0), Register::XMM1);
    assert_eq!(insn.memory_index(), Register::XMM2);
    assert_eq!(insn.op_register(2), Register::XMM3);
}

#[test]
fn xop_requires_no_simd_prefix() {
    // vpcmov with pp = F3
    let (insn, err) = decode_with(64, &[0x8f, 0x48, 0x16, 0xa2, 0xc1, 0x10], DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);

    // vphsubbw with pp = F2 reads the ModRM byte but no displacement
    let bytes = [0x8f, 0x29, 0x23, 0xe1, 0x05, 0x00, 0x00, 0x00, 0x00];
    let (insn, err) = decode_with(64, &bytes, DecoderOptions::empty());
    assert_eq!(err, DecoderError::InvalidInstruction);
    assert_eq!(insn.len(), 5);

    // pp = 00 and vvvv unused
    let insn = decode(64, &[0x8f, 0x29, 0x78, 0xe1, 0x05, 0x00, 0x00, 0x00, 0x00]);
    assert_eq!(insn.code(), Code::XOP_Vphsubbw_xmm_xmmm128);
    assert_eq!(insn.len(), 9);
}

#[test]
fn evex_broadcast_on_a_non_broadcast_form_reads_the_whole_operand() {
    // vpaddsb ymm8{k3}{z}, ymm?, [r13+0] with EVEX.b set
    let bytes = [0x62, 0x51, 0x4d, 0xbb, 0xec, 0x85, 0x00, 0x00, 0x00, 0x00];
    let (insn, err) = decode_with(64, &bytes, DecoderOptions::empty());
    assert_eq!(err, DecoderError::InvalidInstruction);
    assert_eq!(insn.len(), 10);

    let bytes = [0x62, 0x51, 0x4d, 0xab, 0xec, 0x85, 0x00, 0x00, 0x00, 0x00];
    let insn = decode(64, &bytes);
    assert_eq!(insn.code(), Code::EVEX_Vpaddsb_ymm_k1z_ymm_ymmm256);
    assert_eq!(insn.len(), 10);
    assert_eq!(insn.memory_base(), Register::R13);
    assert_eq!(insn.op_mask(), Register::K3);
}

#[test]
fn x87_dc_compare_aliases_put_st0_first() {
    let insn = decode(32, &[0xdc, 0xd1]);
    assert_eq!(insn.code(), Code::Fcom_st0_sti_DCD0);
    assert_eq!(insn.op_register(0), Register::ST0);
    assert_eq!(insn.op_register(1), Register::ST1);

    let insn = decode(32, &[0xdc, 0xd9]);
    assert_eq!(insn.code(), Code::Fcomp_st0_sti_DCD8);
    assert_eq!(insn.op_register(0), Register::ST0);
    assert_eq!(insn.op_register(1), Register::ST1);
}

#[test]
fn x87_environment_size_follows_operand_size() {
    assert_eq!(decode(32, &[0xd9, 0x20]).code(), Code::Fldenv_m28byte);
    assert_eq!(decode(16, &[0xd9, 0x20]).code(), Code::Fldenv_m14byte);
    assert_eq!(decode(32, &[0x66, 0xd9, 0x20]).code(), Code::Fldenv_m14byte);
    assert_eq!(decode(64, &[0xd9, 0x30]).code(), Code::Fnstenv_m28byte);
    assert_eq!(decode(32, &[0xdd, 0x20]).code(), Code::Frstor_m108byte);
    assert_eq!(decode(16, &[0xdd, 0x30]).code(), Code::Fnsave_m94byte);
}

#[test]
fn kmov_from_gpr_needs_a_register_operand() {
    let bytes = [0xc5, 0xf9, 0x92, 0x05, 0x73, 0x51, 0x95, 0x2e];
    let (insn, err) = decode_with(64, &bytes, DecoderOptions::empty());
    assert!(insn.is_invalid());
    assert_eq!(err, DecoderError::InvalidInstruction);

    // kmovw k1, eax
    let insn = decode(64, &[0xc5, 0xf8, 0x92, 0xc8]);
    assert_eq!(insn.code(), Code::VEX_Kmovw_kr_r32);
    assert_eq!(insn.op_register(0), Register::K1);
    assert_eq!(insn.op_register(1), Register::EAX);
}

#[test]
fn evex_permute_and_unsigned_conversions() {
    // vpermt2d ymm0{k1}{z}, ymm5, [eax]
    let insn = decode(32, &[0x62, 0xf2, 0x55, 0xa9, 0x7e, 0x00]);
    assert_eq!(insn.code(), Code::EVEX_Vpermt2d_ymm_k1z_ymm_ymmm256b32);
    assert_eq!(insn.op_register(0), Register::YMM0);
    assert_eq!(insn.op_register(1), Register::YMM5);
    assert_eq!(insn.memory_base(), Register::EAX);
    assert_eq!(insn.len(), 6);

    // vcvttps2udq zmm18{k2}, zmm2, {sae}
    let insn = decode(64, &[0x62, 0xe1, 0x7c, 0x7a, 0x78, 0xd2]);
    assert_eq!(insn.code(), Code::EVEX_Vcvttps2udq_zmm_k1z_zmmm512b32_sae);
    assert_eq!(insn.op_register(0), Register::ZMM18);
    assert_eq!(insn.op_register(1), Register::ZMM2);
    assert_eq!(insn.op_mask(), Register::K2);
    assert!(insn.suppress_all_exceptions());
}

#[test]
fn fma4_subtract_and_add_forms() {
    // vfmsubaddpd ymm0, ymm14, ymm1, ymm2
    let insn = decode(64, &[0xc4, 0xe3, 0x0d, 0x5f, 0xc1, 0x20]);
    assert_eq!(insn.code(), Code::VEX_Vfmsubaddpd_ymm_ymm_ymmm256_ymm);
    assert_eq!(insn.op_count(), 4);
    assert_eq!(insn.op_register(0), Register::YMM0);
    assert_eq!(insn.op_register(1), Register::YMM14);
    assert_eq!(insn.op_register(2), Register::YMM1);
    assert_eq!(insn.op_register(3), Register::YMM2);
    assert_eq!(insn.len(), 6);
}

#[test]
fn system_register_forms_follow_operand_size() {
    let insn = decode(32, &[0x0f, 0x00, 0xd0]);
    assert_eq!(insn.code(), Code::Lldt_r32m16);
    assert_eq!(insn.op_register(0), Register::EAX);
    assert_eq!(decode(16, &[0x0f, 0x00, 0xd0]).code(), Code::Lldt_rm16);

    let insn = decode(32, &[0x63, 0xc8]);
    assert_eq!(insn.code(), Code::Arpl_r32m16_r32);
    assert_eq!(insn.op_register(0), Register::EAX);
    assert_eq!(insn.op_register(1), Register::ECX);
    assert_eq!(decode(32, &[0x66, 0x63, 0xc8]).code(), Code::Arpl_rm16_r16);

    assert_eq!(decode(32, &[0x0f, 0x00, 0xe0]).code(), Code::Verr_r32m16);
    assert_eq!(decode(32, &[0x0f, 0x01, 0xf0]).code(), Code::Lmsw_r32m16);
    assert_eq!(decode(64, &[0x48, 0x0f, 0x01, 0xf0]).code(), Code::Lmsw_r64m16);
}

#[test]
fn svm_and_cache_line_forms() {
    assert_eq!(decode(32, &[0x0f, 0x01, 0xd8]).code(), Code::Vmrund);
    assert_eq!(decode(64, &[0x0f, 0x01, 0xdf]).code(), Code::Invlpgaq);
    assert_eq!(decode(64, &[0x0f, 0x01, 0xde]).code(), Code::Skinit);
    assert_eq!(decode(64, &[0x0f, 0x01, 0xc0]).code(), Code::Enclv);
    assert_eq!(decode(64, &[0x48, 0x0f, 0x01, 0xfc]).code(), Code::Clzeroq);
    assert_eq!(decode(64, &[0x66, 0x0f, 0xae, 0x30]).code(), Code::Clwb_m8);

    // ptwrite has register and memory forms, xsave only a memory one
    let insn = decode(64, &[0xf3, 0x0f, 0xae, 0xe0]);
    assert_eq!(insn.code(), Code::Ptwrite_rm32);
    assert_eq!(insn.op_register(0), Register::EAX);
    assert_eq!(decode(64, &[0xf3, 0x48, 0x0f, 0xae, 0x20]).code(), Code::Ptwrite_rm64);
    let (insn, _) = decode_with(64, &[0x0f, 0xae, 0xe0], DecoderOptions::empty());
    assert!(insn.is_invalid());
}

#[test]
fn sse4a_and_non_temporal_scalar_stores() {
    // extrq xmm1, 4, 8
    let insn = decode(64, &[0x66, 0x0f, 0x78, 0xc1, 0x04, 0x08]);
    assert_eq!(insn.code(), Code::Extrq_xmm_imm8_imm8);
    assert_eq!(insn.op_register(0), Register::XMM1);
    assert_eq!(insn.len(), 6);

    let insn = decode(64, &[0xf2, 0x0f, 0x79, 0xc1]);
    assert_eq!(insn.code(), Code::Insertq_xmm_xmm);
    assert_eq!(insn.op_register(0), Register::XMM0);
    assert_eq!(insn.op_register(1), Register::XMM1);

    assert_eq!(decode(64, &[0xf3, 0x0f, 0x2b, 0x00]).code(), Code::Movntss_m32_xmm);
    assert_eq!(decode(64, &[0x0f, 0x78, 0xc8]).code(), Code::Vmread_rm64_r64);

    let insn = decode(64, &[0x66, 0x48, 0x0f, 0x3a, 0x61, 0xc1, 0x00]);
    assert_eq!(insn.code(), Code::Pcmpestri64_xmm_xmmm128_imm8);
}
