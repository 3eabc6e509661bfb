//! Legacy encoded instructions: the one byte map and the 0F, 0F38 and 0F3A maps.

use crate::code::Code as C;
use crate::common::DecoderOptions as O;
use crate::error::TableError;
use crate::handlers::{Operand, OptionsScope, PrefixKind, RegWidth, Sizing, TermFlags};
use crate::register::Register;
use crate::table_de::writer::{Node, TableWriter};

use super::ops::*;

const LOCK: TermFlags = TermFlags::LOCK.union(TermFlags::XACQUIRE_XRELEASE);
const XCHG: TermFlags = TermFlags::LOCK.union(TermFlags::XACQUIRE_XRELEASE_NO_LOCK);
const XREL: TermFlags = TermFlags::XRELEASE_NO_LOCK;

const ES: Operand = Operand::Fixed(Register::ES);
const CS: Operand = Operand::Fixed(Register::CS);
const SS: Operand = Operand::Fixed(Register::SS);
const DS: Operand = Operand::Fixed(Register::DS);
const FS: Operand = Operand::Fixed(Register::FS);
const GS: Operand = Operand::Fixed(Register::GS);
const AX16: Operand = Operand::Fixed(Register::AX);
const SRC: Operand = Operand::StrSrc;
const DST: Operand = Operand::StrDst;

/// Writes the legacy maps. Roots: map 0, 0F, 0F38, 0F3A.
pub(super) fn write(w: &mut TableWriter) -> Result<Vec<u32>, TableError> {
    let map0f38 = w.array(&map0f38())?;
    let map0f3a = w.array(&map0f3a())?;
    let map0f = w.array(&map0f(map0f38, map0f3a))?;
    let map0 = w.array(&map0(map0f))?;

    Ok(vec![map0])
}

/// The eight two-operand ALU ops at 00..3F: Eb,Gb  Ev,Gv  Gb,Eb  Gv,Ev  AL,Ib  rAX,Iz.
fn alu(m: &mut [Node], base: usize, c: [C; 12], flags: TermFlags) {
    m[base] = fx(c[0], &[EB, GB]).with_flags(flags).into();
    m[base + 1] = v3([c[1], c[2], c[3]], &[EV, GV]).with_flags(flags).into();
    m[base + 2] = fx(c[4], &[GB, EB]).into();
    m[base + 3] = v3([c[5], c[6], c[7]], &[GV, EV]).into();
    m[base + 4] = fx(c[8], &[AL, IB]).into();
    m[base + 5] = v3([c[9], c[10], c[11]], &[AV, IZ]).into();
}

/// Group with one code per ModRM.reg.
fn group8(codes: [C; 8], ops: &[Operand], flags: [TermFlags; 8]) -> Node {
    group(
        codes
            .iter()
            .zip(flags.iter())
            .map(|(&c, &f)| fx(c, ops).with_flags(f).into())
            .collect(),
    )
}

/// Group with 16/32/64-bit codes per ModRM.reg.
fn group8v(codes: [[C; 3]; 8], ops: &[Operand], flags: [TermFlags; 8]) -> Node {
    group(
        codes
            .iter()
            .zip(flags.iter())
            .map(|(&c, &f)| v3(c, ops).with_flags(f).into())
            .collect(),
    )
}

const NONE: TermFlags = TermFlags::empty();
/// Lockable except the last (CMP).
const ALU_LOCK: [TermFlags; 8] = [LOCK, LOCK, LOCK, LOCK, LOCK, LOCK, LOCK, NONE];
const NO_LOCK: [TermFlags; 8] = [NONE; 8];

fn map0(map0f: u32) -> Vec<Node> {
    use self::PrefixKind::*;
    let mut m = blank();

    alu(&mut m, 0x00, [
        C::Add_rm8_r8, C::Add_rm16_r16, C::Add_rm32_r32, C::Add_rm64_r64,
        C::Add_r8_rm8, C::Add_r16_rm16, C::Add_r32_rm32, C::Add_r64_rm64,
        C::Add_AL_imm8, C::Add_AX_imm16, C::Add_EAX_imm32, C::Add_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x08, [
        C::Or_rm8_r8, C::Or_rm16_r16, C::Or_rm32_r32, C::Or_rm64_r64,
        C::Or_r8_rm8, C::Or_r16_rm16, C::Or_r32_rm32, C::Or_r64_rm64,
        C::Or_AL_imm8, C::Or_AX_imm16, C::Or_EAX_imm32, C::Or_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x10, [
        C::Adc_rm8_r8, C::Adc_rm16_r16, C::Adc_rm32_r32, C::Adc_rm64_r64,
        C::Adc_r8_rm8, C::Adc_r16_rm16, C::Adc_r32_rm32, C::Adc_r64_rm64,
        C::Adc_AL_imm8, C::Adc_AX_imm16, C::Adc_EAX_imm32, C::Adc_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x18, [
        C::Sbb_rm8_r8, C::Sbb_rm16_r16, C::Sbb_rm32_r32, C::Sbb_rm64_r64,
        C::Sbb_r8_rm8, C::Sbb_r16_rm16, C::Sbb_r32_rm32, C::Sbb_r64_rm64,
        C::Sbb_AL_imm8, C::Sbb_AX_imm16, C::Sbb_EAX_imm32, C::Sbb_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x20, [
        C::And_rm8_r8, C::And_rm16_r16, C::And_rm32_r32, C::And_rm64_r64,
        C::And_r8_rm8, C::And_r16_rm16, C::And_r32_rm32, C::And_r64_rm64,
        C::And_AL_imm8, C::And_AX_imm16, C::And_EAX_imm32, C::And_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x28, [
        C::Sub_rm8_r8, C::Sub_rm16_r16, C::Sub_rm32_r32, C::Sub_rm64_r64,
        C::Sub_r8_rm8, C::Sub_r16_rm16, C::Sub_r32_rm32, C::Sub_r64_rm64,
        C::Sub_AL_imm8, C::Sub_AX_imm16, C::Sub_EAX_imm32, C::Sub_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x30, [
        C::Xor_rm8_r8, C::Xor_rm16_r16, C::Xor_rm32_r32, C::Xor_rm64_r64,
        C::Xor_r8_rm8, C::Xor_r16_rm16, C::Xor_r32_rm32, C::Xor_r64_rm64,
        C::Xor_AL_imm8, C::Xor_AX_imm16, C::Xor_EAX_imm32, C::Xor_RAX_imm32,
    ], LOCK);
    alu(&mut m, 0x38, [
        C::Cmp_rm8_r8, C::Cmp_rm16_r16, C::Cmp_rm32_r32, C::Cmp_rm64_r64,
        C::Cmp_r8_rm8, C::Cmp_r16_rm16, C::Cmp_r32_rm32, C::Cmp_r64_rm64,
        C::Cmp_AL_imm8, C::Cmp_AX_imm16, C::Cmp_EAX_imm32, C::Cmp_RAX_imm32,
    ], NONE);

    m[0x06] = not64(sz(Sizing::Op1632, &[C::Pushw_ES, C::Pushd_ES], &[ES]));
    m[0x07] = not64(sz(Sizing::Op1632, &[C::Popw_ES, C::Popd_ES], &[ES]));
    m[0x0e] = not64(sz(Sizing::Op1632, &[C::Pushw_CS, C::Pushd_CS], &[CS]));
    m[0x0f] = Node::AnotherTable(map0f);
    m[0x16] = not64(sz(Sizing::Op1632, &[C::Pushw_SS, C::Pushd_SS], &[SS]));
    m[0x17] = not64(sz(Sizing::Op1632, &[C::Popw_SS, C::Popd_SS], &[SS]));
    m[0x1e] = not64(sz(Sizing::Op1632, &[C::Pushw_DS, C::Pushd_DS], &[DS]));
    m[0x1f] = not64(sz(Sizing::Op1632, &[C::Popw_DS, C::Popd_DS], &[DS]));

    m[0x26] = Node::Prefix(Es);
    m[0x27] = not64(fx(C::Daa, &[]));
    m[0x2e] = Node::Prefix(Cs);
    m[0x2f] = not64(fx(C::Das, &[]));
    m[0x36] = Node::Prefix(Ss);
    m[0x37] = not64(fx(C::Aaa, &[]));
    m[0x3e] = Node::Prefix(Ds);
    m[0x3f] = not64(fx(C::Aas, &[]));

    for n in 0..8u8 {
        let r = Operand::GprOpcode(RegWidth::V, n);
        m[0x40 + n as usize] = Node::Rex {
            fallback: Box::new(sz(Sizing::Op1632, &[C::Inc_r16, C::Inc_r32], &[r]).into()),
            rex: 0x40 + n,
        };
        m[0x48 + n as usize] = Node::Rex {
            fallback: Box::new(sz(Sizing::Op1632, &[C::Dec_r16, C::Dec_r32], &[r]).into()),
            rex: 0x48 + n,
        };
        m[0x50 + n as usize] =
            sz(Sizing::Stack, &[C::Push_r16, C::Push_r32, C::Push_r64], &[r]).into();
        m[0x58 + n as usize] =
            sz(Sizing::Stack, &[C::Pop_r16, C::Pop_r32, C::Pop_r64], &[r]).into();
    }

    m[0x60] = not64(sz(Sizing::Op1632, &[C::Pushaw, C::Pushad], &[]));
    m[0x61] = not64(sz(Sizing::Op1632, &[C::Popaw, C::Popad], &[]));
    m[0x62] = Node::Evex(Box::new(
        sz(Sizing::Op1632, &[C::Bound_r16_m1616, C::Bound_r32_m3232], &[GV, M]).into(),
    ));
    m[0x63] = bits(
        sz(Sizing::Op1632, &[C::Arpl_rm16_r16, C::Arpl_r32m16_r32], &[EV, GV]),
        w(
            sz(Sizing::Op1632, &[C::Movsxd_r16_rm16, C::Movsxd_r32_rm32], &[GV, EV]),
            fx(C::Movsxd_r64_rm32, &[GQ, ED]),
        ),
    );
    m[0x64] = Node::Prefix(Fs);
    m[0x65] = Node::Prefix(Gs);
    m[0x66] = Node::Prefix(OperandSize);
    m[0x67] = Node::Prefix(AddressSize);
    m[0x68] = sz(Sizing::Stack, &[C::Push_imm16, C::Pushd_imm32, C::Pushq_imm32], &[IZ]).into();
    m[0x69] = v3(
        [C::Imul_r16_rm16_imm16, C::Imul_r32_rm32_imm32, C::Imul_r64_rm64_imm32],
        &[GV, EV, IZ],
    )
    .into();
    m[0x6a] = sz(Sizing::Stack, &[C::Pushw_imm8, C::Pushd_imm8, C::Pushq_imm8], &[IBS]).into();
    m[0x6b] = v3(
        [C::Imul_r16_rm16_imm8, C::Imul_r32_rm32_imm8, C::Imul_r64_rm64_imm8],
        &[GV, EV, IBS],
    )
    .into();
    m[0x6c] = fx(C::Insb_m8_DX, &[DST, DX]).into();
    m[0x6d] = sz(Sizing::Op1632, &[C::Insw_m16_DX, C::Insd_m32_DX], &[DST, DX]).into();
    m[0x6e] = fx(C::Outsb_DX_m8, &[DX, SRC]).into();
    m[0x6f] = sz(Sizing::Op1632, &[C::Outsw_DX_m16, C::Outsd_DX_m32], &[DX, SRC]).into();

    let jcc8 = [
        [C::Jo_rel8_16, C::Jo_rel8_32, C::Jo_rel8_64],
        [C::Jno_rel8_16, C::Jno_rel8_32, C::Jno_rel8_64],
        [C::Jb_rel8_16, C::Jb_rel8_32, C::Jb_rel8_64],
        [C::Jae_rel8_16, C::Jae_rel8_32, C::Jae_rel8_64],
        [C::Je_rel8_16, C::Je_rel8_32, C::Je_rel8_64],
        [C::Jne_rel8_16, C::Jne_rel8_32, C::Jne_rel8_64],
        [C::Jbe_rel8_16, C::Jbe_rel8_32, C::Jbe_rel8_64],
        [C::Ja_rel8_16, C::Ja_rel8_32, C::Ja_rel8_64],
        [C::Js_rel8_16, C::Js_rel8_32, C::Js_rel8_64],
        [C::Jns_rel8_16, C::Jns_rel8_32, C::Jns_rel8_64],
        [C::Jp_rel8_16, C::Jp_rel8_32, C::Jp_rel8_64],
        [C::Jnp_rel8_16, C::Jnp_rel8_32, C::Jnp_rel8_64],
        [C::Jl_rel8_16, C::Jl_rel8_32, C::Jl_rel8_64],
        [C::Jge_rel8_16, C::Jge_rel8_32, C::Jge_rel8_64],
        [C::Jle_rel8_16, C::Jle_rel8_32, C::Jle_rel8_64],
        [C::Jg_rel8_16, C::Jg_rel8_32, C::Jg_rel8_64],
    ];
    for (i, codes) in jcc8.iter().enumerate() {
        m[0x70 + i] = sz(Sizing::Branch, codes, &[JB]).into();
    }

    m[0x80] = group8(
        [
            C::Add_rm8_imm8, C::Or_rm8_imm8, C::Adc_rm8_imm8, C::Sbb_rm8_imm8,
            C::And_rm8_imm8, C::Sub_rm8_imm8, C::Xor_rm8_imm8, C::Cmp_rm8_imm8,
        ],
        &[EB, IB],
        ALU_LOCK,
    );
    m[0x81] = group8v(
        [
            [C::Add_rm16_imm16, C::Add_rm32_imm32, C::Add_rm64_imm32],
            [C::Or_rm16_imm16, C::Or_rm32_imm32, C::Or_rm64_imm32],
            [C::Adc_rm16_imm16, C::Adc_rm32_imm32, C::Adc_rm64_imm32],
            [C::Sbb_rm16_imm16, C::Sbb_rm32_imm32, C::Sbb_rm64_imm32],
            [C::And_rm16_imm16, C::And_rm32_imm32, C::And_rm64_imm32],
            [C::Sub_rm16_imm16, C::Sub_rm32_imm32, C::Sub_rm64_imm32],
            [C::Xor_rm16_imm16, C::Xor_rm32_imm32, C::Xor_rm64_imm32],
            [C::Cmp_rm16_imm16, C::Cmp_rm32_imm32, C::Cmp_rm64_imm32],
        ],
        &[EV, IZ],
        ALU_LOCK,
    );
    m[0x82] = not64(group8(
        [
            C::Add_rm8_imm8_82, C::Or_rm8_imm8_82, C::Adc_rm8_imm8_82, C::Sbb_rm8_imm8_82,
            C::And_rm8_imm8_82, C::Sub_rm8_imm8_82, C::Xor_rm8_imm8_82, C::Cmp_rm8_imm8_82,
        ],
        &[EB, IB],
        ALU_LOCK,
    ));
    m[0x83] = group8v(
        [
            [C::Add_rm16_imm8, C::Add_rm32_imm8, C::Add_rm64_imm8],
            [C::Or_rm16_imm8, C::Or_rm32_imm8, C::Or_rm64_imm8],
            [C::Adc_rm16_imm8, C::Adc_rm32_imm8, C::Adc_rm64_imm8],
            [C::Sbb_rm16_imm8, C::Sbb_rm32_imm8, C::Sbb_rm64_imm8],
            [C::And_rm16_imm8, C::And_rm32_imm8, C::And_rm64_imm8],
            [C::Sub_rm16_imm8, C::Sub_rm32_imm8, C::Sub_rm64_imm8],
            [C::Xor_rm16_imm8, C::Xor_rm32_imm8, C::Xor_rm64_imm8],
            [C::Cmp_rm16_imm8, C::Cmp_rm32_imm8, C::Cmp_rm64_imm8],
        ],
        &[EV, IBS],
        ALU_LOCK,
    );

    m[0x84] = fx(C::Test_rm8_r8, &[EB, GB]).into();
    m[0x85] = v3([C::Test_rm16_r16, C::Test_rm32_r32, C::Test_rm64_r64], &[EV, GV]).into();
    m[0x86] = fx(C::Xchg_rm8_r8, &[EB, GB]).with_flags(XCHG).into();
    m[0x87] = v3([C::Xchg_rm16_r16, C::Xchg_rm32_r32, C::Xchg_rm64_r64], &[EV, GV])
        .with_flags(XCHG)
        .into();
    m[0x88] = fx(C::Mov_rm8_r8, &[EB, GB]).with_flags(XREL).into();
    m[0x89] = v3([C::Mov_rm16_r16, C::Mov_rm32_r32, C::Mov_rm64_r64], &[EV, GV])
        .with_flags(XREL)
        .into();
    m[0x8a] = fx(C::Mov_r8_rm8, &[GB, EB]).into();
    m[0x8b] = v3([C::Mov_r16_rm16, C::Mov_r32_rm32, C::Mov_r64_rm64], &[GV, EV]).into();
    m[0x8c] = v3(
        [C::Mov_rm16_Sreg, C::Mov_r32m16_Sreg, C::Mov_r64m16_Sreg],
        &[EV, Operand::Sreg],
    )
    .into();
    m[0x8d] = v3([C::Lea_r16_m, C::Lea_r32_m, C::Lea_r64_m], &[GV, M]).into();
    m[0x8e] = v3(
        [C::Mov_Sreg_rm16, C::Mov_Sreg_r32m16, C::Mov_Sreg_r64m16],
        &[Operand::SregDst, EV],
    )
    .into();
    m[0x8f] = Node::Xop(Box::new(group(nodes![
        sz(Sizing::Stack, &[C::Pop_rm16, C::Pop_rm32, C::Pop_rm64], &[EV]),
        inv(), inv(), inv(), inv(), inv(), inv(), inv(),
    ])));

    for n in 0..8u8 {
        m[0x90 + n as usize] = Node::XchgRegRax(n);
    }
    m[0x98] = v3([C::Cbw, C::Cwde, C::Cdqe], &[]).into();
    m[0x99] = v3([C::Cwd, C::Cdq, C::Cqo], &[]).into();
    m[0x9a] = not64(sz(Sizing::Op1632, &[C::Call_ptr1616, C::Call_ptr1632], &[Operand::Far]));
    m[0x9b] = fx(C::Wait, &[]).into();
    m[0x9c] = sz(Sizing::Stack, &[C::Pushfw, C::Pushfd, C::Pushfq], &[]).into();
    m[0x9d] = sz(Sizing::Stack, &[C::Popfw, C::Popfd, C::Popfq], &[]).into();
    m[0x9e] = opts(
        OptionsScope::Any,
        fx(C::Sahf, &[]),
        vec![(O::NO_LAHF_SAHF_64, not64(fx(C::Sahf, &[])))],
    );
    m[0x9f] = opts(
        OptionsScope::Any,
        fx(C::Lahf, &[]),
        vec![(O::NO_LAHF_SAHF_64, not64(fx(C::Lahf, &[])))],
    );

    m[0xa0] = fx(C::Mov_AL_moffs8, &[AL, Operand::Moffs]).into();
    m[0xa1] = v3(
        [C::Mov_AX_moffs16, C::Mov_EAX_moffs32, C::Mov_RAX_moffs64],
        &[AV, Operand::Moffs],
    )
    .into();
    m[0xa2] = fx(C::Mov_moffs8_AL, &[Operand::Moffs, AL]).into();
    m[0xa3] = v3(
        [C::Mov_moffs16_AX, C::Mov_moffs32_EAX, C::Mov_moffs64_RAX],
        &[Operand::Moffs, AV],
    )
    .into();
    m[0xa4] = fx(C::Movsb_m8_m8, &[DST, SRC]).into();
    m[0xa5] = v3([C::Movsw_m16_m16, C::Movsd_m32_m32, C::Movsq_m64_m64], &[DST, SRC]).into();
    m[0xa6] = fx(C::Cmpsb_m8_m8, &[SRC, DST]).into();
    m[0xa7] = v3([C::Cmpsw_m16_m16, C::Cmpsd_m32_m32, C::Cmpsq_m64_m64], &[SRC, DST]).into();
    m[0xa8] = fx(C::Test_AL_imm8, &[AL, IB]).into();
    m[0xa9] = v3([C::Test_AX_imm16, C::Test_EAX_imm32, C::Test_RAX_imm32], &[AV, IZ]).into();
    m[0xaa] = fx(C::Stosb_m8_AL, &[DST, AL]).into();
    m[0xab] = v3([C::Stosw_m16_AX, C::Stosd_m32_EAX, C::Stosq_m64_RAX], &[DST, AV]).into();
    m[0xac] = fx(C::Lodsb_AL_m8, &[AL, SRC]).into();
    m[0xad] = v3([C::Lodsw_AX_m16, C::Lodsd_EAX_m32, C::Lodsq_RAX_m64], &[AV, SRC]).into();
    m[0xae] = fx(C::Scasb_AL_m8, &[AL, DST]).into();
    m[0xaf] = v3([C::Scasw_AX_m16, C::Scasd_EAX_m32, C::Scasq_RAX_m64], &[AV, DST]).into();

    for n in 0..8u8 {
        m[0xb0 + n as usize] = fx(C::Mov_r8_imm8, &[Operand::GprOpcode(RegWidth::B, n), IB]).into();
        m[0xb8 + n as usize] = v3(
            [C::Mov_r16_imm16, C::Mov_r32_imm32, C::Mov_r64_imm64],
            &[Operand::GprOpcode(RegWidth::V, n), IV],
        )
        .into();
    }

    let shift8 = |codes: [C; 8], ops: &[Operand]| group8(codes, ops, NO_LOCK);
    let shiftv = |codes: [[C; 3]; 8], ops: &[Operand]| group8v(codes, ops, NO_LOCK);

    m[0xc0] = shift8(
        [
            C::Rol_rm8_imm8, C::Ror_rm8_imm8, C::Rcl_rm8_imm8, C::Rcr_rm8_imm8,
            C::Shl_rm8_imm8, C::Shr_rm8_imm8, C::Sal_rm8_imm8, C::Sar_rm8_imm8,
        ],
        &[EB, IB],
    );
    m[0xc1] = shiftv(
        [
            [C::Rol_rm16_imm8, C::Rol_rm32_imm8, C::Rol_rm64_imm8],
            [C::Ror_rm16_imm8, C::Ror_rm32_imm8, C::Ror_rm64_imm8],
            [C::Rcl_rm16_imm8, C::Rcl_rm32_imm8, C::Rcl_rm64_imm8],
            [C::Rcr_rm16_imm8, C::Rcr_rm32_imm8, C::Rcr_rm64_imm8],
            [C::Shl_rm16_imm8, C::Shl_rm32_imm8, C::Shl_rm64_imm8],
            [C::Shr_rm16_imm8, C::Shr_rm32_imm8, C::Shr_rm64_imm8],
            [C::Sal_rm16_imm8, C::Sal_rm32_imm8, C::Sal_rm64_imm8],
            [C::Sar_rm16_imm8, C::Sar_rm32_imm8, C::Sar_rm64_imm8],
        ],
        &[EV, IB],
    );
    m[0xc2] = sz(Sizing::Branch, &[C::Retnw_imm16, C::Retnd_imm16, C::Retnq_imm16], &[IW]).into();
    m[0xc3] = sz(Sizing::Branch, &[C::Retnw, C::Retnd, C::Retnq], &[]).into();
    m[0xc4] = Node::Vex3(Box::new(
        sz(Sizing::Op1632, &[C::Les_r16_m1616, C::Les_r32_m1632], &[GV, M]).into(),
    ));
    m[0xc5] = Node::Vex2(Box::new(
        sz(Sizing::Op1632, &[C::Lds_r16_m1616, C::Lds_r32_m1632], &[GV, M]).into(),
    ));
    m[0xc6] = group8x64(
        nodes![
            fx(C::Mov_rm8_imm8, &[EB, IB]).with_flags(XREL),
            inv(), inv(), inv(), inv(), inv(), inv(), inv(),
        ],
        vec![(0xf8, fx(C::Xabort_imm8, &[IB]).into())],
    );
    m[0xc7] = group8x64(
        nodes![
            v3([C::Mov_rm16_imm16, C::Mov_rm32_imm32, C::Mov_rm64_imm32], &[EV, IZ])
                .with_flags(XREL),
            inv(), inv(), inv(), inv(), inv(), inv(), inv(),
        ],
        vec![(
            0xf8,
            sz(Sizing::Op1632, &[C::Xbegin_rel16, C::Xbegin_rel32], &[Operand::Jx]).into(),
        )],
    );
    m[0xc8] = sz(
        Sizing::Stack,
        &[C::Enterw_imm16_imm8, C::Enterd_imm16_imm8, C::Enterq_imm16_imm8],
        &[IW, IB2],
    )
    .into();
    m[0xc9] = sz(Sizing::Stack, &[C::Leavew, C::Leaved, C::Leaveq], &[]).into();
    m[0xca] = v3([C::Retfw_imm16, C::Retfd_imm16, C::Retfq_imm16], &[IW]).into();
    m[0xcb] = v3([C::Retfw, C::Retfd, C::Retfq], &[]).into();
    m[0xcc] = fx(C::Int3, &[]).into();
    m[0xcd] = fx(C::Int_imm8, &[IB]).into();
    m[0xce] = not64(fx(C::Into, &[]));
    m[0xcf] = v3([C::Iretw, C::Iretd, C::Iretq], &[]).into();

    m[0xd0] = shift8(
        [
            C::Rol_rm8_1, C::Ror_rm8_1, C::Rcl_rm8_1, C::Rcr_rm8_1,
            C::Shl_rm8_1, C::Shr_rm8_1, C::Sal_rm8_1, C::Sar_rm8_1,
        ],
        &[EB, ONE],
    );
    m[0xd1] = shiftv(
        [
            [C::Rol_rm16_1, C::Rol_rm32_1, C::Rol_rm64_1],
            [C::Ror_rm16_1, C::Ror_rm32_1, C::Ror_rm64_1],
            [C::Rcl_rm16_1, C::Rcl_rm32_1, C::Rcl_rm64_1],
            [C::Rcr_rm16_1, C::Rcr_rm32_1, C::Rcr_rm64_1],
            [C::Shl_rm16_1, C::Shl_rm32_1, C::Shl_rm64_1],
            [C::Shr_rm16_1, C::Shr_rm32_1, C::Shr_rm64_1],
            [C::Sal_rm16_1, C::Sal_rm32_1, C::Sal_rm64_1],
            [C::Sar_rm16_1, C::Sar_rm32_1, C::Sar_rm64_1],
        ],
        &[EV, ONE],
    );
    m[0xd2] = shift8(
        [
            C::Rol_rm8_CL, C::Ror_rm8_CL, C::Rcl_rm8_CL, C::Rcr_rm8_CL,
            C::Shl_rm8_CL, C::Shr_rm8_CL, C::Sal_rm8_CL, C::Sar_rm8_CL,
        ],
        &[EB, CL],
    );
    m[0xd3] = shiftv(
        [
            [C::Rol_rm16_CL, C::Rol_rm32_CL, C::Rol_rm64_CL],
            [C::Ror_rm16_CL, C::Ror_rm32_CL, C::Ror_rm64_CL],
            [C::Rcl_rm16_CL, C::Rcl_rm32_CL, C::Rcl_rm64_CL],
            [C::Rcr_rm16_CL, C::Rcr_rm32_CL, C::Rcr_rm64_CL],
            [C::Shl_rm16_CL, C::Shl_rm32_CL, C::Shl_rm64_CL],
            [C::Shr_rm16_CL, C::Shr_rm32_CL, C::Shr_rm64_CL],
            [C::Sal_rm16_CL, C::Sal_rm32_CL, C::Sal_rm64_CL],
            [C::Sar_rm16_CL, C::Sar_rm32_CL, C::Sar_rm64_CL],
        ],
        &[EV, CL],
    );
    m[0xd4] = not64(fx(C::Aam_imm8, &[IB]));
    m[0xd5] = not64(fx(C::Aad_imm8, &[IB]));
    m[0xd6] = not64(fx(C::Salc, &[]));
    m[0xd7] = fx(C::Xlat_m8, &[Operand::Xlat]).into();

    x87(&mut m);

    let loops = [
        [
            C::Loopne_rel8_16_CX, C::Loopne_rel8_16_ECX, C::Loopne_rel8_16_RCX,
            C::Loopne_rel8_32_CX, C::Loopne_rel8_32_ECX, C::Loopne_rel8_64_ECX,
            C::Loopne_rel8_64_RCX,
        ],
        [
            C::Loope_rel8_16_CX, C::Loope_rel8_16_ECX, C::Loope_rel8_16_RCX,
            C::Loope_rel8_32_CX, C::Loope_rel8_32_ECX, C::Loope_rel8_64_ECX,
            C::Loope_rel8_64_RCX,
        ],
        [
            C::Loop_rel8_16_CX, C::Loop_rel8_16_ECX, C::Loop_rel8_16_RCX,
            C::Loop_rel8_32_CX, C::Loop_rel8_32_ECX, C::Loop_rel8_64_ECX,
            C::Loop_rel8_64_RCX,
        ],
        [
            C::Jcxz_rel8_16, C::Jecxz_rel8_16, C::Jrcxz_rel8_16,
            C::Jcxz_rel8_32, C::Jecxz_rel8_32, C::Jecxz_rel8_64,
            C::Jrcxz_rel8_64,
        ],
    ];
    for (i, codes) in loops.iter().enumerate() {
        m[0xe0 + i] = sz(Sizing::LoopBranch, codes, &[JB]).into();
    }

    m[0xe4] = fx(C::In_AL_imm8, &[AL, IB]).into();
    m[0xe5] = sz(Sizing::Op1632, &[C::In_AX_imm8, C::In_EAX_imm8], &[AV, IB]).into();
    m[0xe6] = fx(C::Out_imm8_AL, &[IB, AL]).into();
    m[0xe7] = sz(Sizing::Op1632, &[C::Out_imm8_AX, C::Out_imm8_EAX], &[IB, AV]).into();
    m[0xe8] = sz(Sizing::Branch, &[C::Call_rel16, C::Call_rel32_32, C::Call_rel32_64], &[JZ]).into();
    m[0xe9] = sz(Sizing::Branch, &[C::Jmp_rel16, C::Jmp_rel32_32, C::Jmp_rel32_64], &[JZ]).into();
    m[0xea] = not64(sz(Sizing::Op1632, &[C::Jmp_ptr1616, C::Jmp_ptr1632], &[Operand::Far]));
    m[0xeb] = sz(Sizing::Branch, &[C::Jmp_rel8_16, C::Jmp_rel8_32, C::Jmp_rel8_64], &[JB]).into();
    m[0xec] = fx(C::In_AL_DX, &[AL, DX]).into();
    m[0xed] = sz(Sizing::Op1632, &[C::In_AX_DX, C::In_EAX_DX], &[AV, DX]).into();
    m[0xee] = fx(C::Out_DX_AL, &[DX, AL]).into();
    m[0xef] = sz(Sizing::Op1632, &[C::Out_DX_AX, C::Out_DX_EAX], &[DX, AV]).into();

    m[0xf0] = Node::Prefix(Lock);
    m[0xf1] = fx(C::Int1, &[]).into();
    m[0xf2] = Node::Prefix(Repne);
    m[0xf3] = Node::Prefix(Repe);
    m[0xf4] = fx(C::Hlt, &[]).into();
    m[0xf5] = fx(C::Cmc, &[]).into();
    m[0xf6] = group(nodes![
        fx(C::Test_rm8_imm8, &[EB, IB]),
        fx(C::Test_rm8_imm8_F6r1, &[EB, IB]),
        fx(C::Not_rm8, &[EB]).with_flags(LOCK),
        fx(C::Neg_rm8, &[EB]).with_flags(LOCK),
        fx(C::Mul_rm8, &[EB]),
        fx(C::Imul_rm8, &[EB]),
        fx(C::Div_rm8, &[EB]),
        fx(C::Idiv_rm8, &[EB]),
    ]);
    m[0xf7] = group(nodes![
        v3([C::Test_rm16_imm16, C::Test_rm32_imm32, C::Test_rm64_imm32], &[EV, IZ]),
        v3([C::Test_rm16_imm16_F7r1, C::Test_rm32_imm32_F7r1, C::Test_rm64_imm32_F7r1], &[EV, IZ]),
        v3([C::Not_rm16, C::Not_rm32, C::Not_rm64], &[EV]).with_flags(LOCK),
        v3([C::Neg_rm16, C::Neg_rm32, C::Neg_rm64], &[EV]).with_flags(LOCK),
        v3([C::Mul_rm16, C::Mul_rm32, C::Mul_rm64], &[EV]),
        v3([C::Imul_rm16, C::Imul_rm32, C::Imul_rm64], &[EV]),
        v3([C::Div_rm16, C::Div_rm32, C::Div_rm64], &[EV]),
        v3([C::Idiv_rm16, C::Idiv_rm32, C::Idiv_rm64], &[EV]),
    ]);
    m[0xf8] = fx(C::Clc, &[]).into();
    m[0xf9] = fx(C::Stc, &[]).into();
    m[0xfa] = fx(C::Cli, &[]).into();
    m[0xfb] = fx(C::Sti, &[]).into();
    m[0xfc] = fx(C::Cld, &[]).into();
    m[0xfd] = fx(C::Std, &[]).into();
    m[0xfe] = group(nodes![
        fx(C::Inc_rm8, &[EB]).with_flags(LOCK),
        fx(C::Dec_rm8, &[EB]).with_flags(LOCK),
        inv(), inv(), inv(), inv(), inv(), inv(),
    ]);
    m[0xff] = group(nodes![
        v3([C::Inc_rm16, C::Inc_rm32, C::Inc_rm64], &[EV]).with_flags(LOCK),
        v3([C::Dec_rm16, C::Dec_rm32, C::Dec_rm64], &[EV]).with_flags(LOCK),
        sz(Sizing::Branch, &[C::Call_rm16, C::Call_rm32, C::Call_rm64], &[EV]),
        v3([C::Call_m1616, C::Call_m1632, C::Call_m1664], &[M]),
        sz(Sizing::Branch, &[C::Jmp_rm16, C::Jmp_rm32, C::Jmp_rm64], &[EV]),
        v3([C::Jmp_m1616, C::Jmp_m1632, C::Jmp_m1664], &[M]),
        sz(Sizing::Stack, &[C::Push_rm16, C::Push_rm32, C::Push_rm64], &[EV]),
        inv(),
    ]);

    m
}

/// D8..DF
fn x87(m: &mut [Node]) {
    let mem = |codes: [Option<C>; 8]| -> Vec<Node> {
        codes
            .iter()
            .map(|c| match c {
                Some(c) => fx(*c, &[M]).into(),
                None => inv(),
            })
            .collect()
    };
    let st0_sti = |codes: [C; 8]| -> Vec<Node> {
        codes.iter().map(|&c| fx(c, &[ST0, STI]).into()).collect()
    };
    // Eight register forms sharing one code, starting at `modrm`.
    let run = |high: &mut Vec<(u8, Node)>, modrm: u8, code: C, ops: &[Operand]| {
        for i in 0..8 {
            high.push((modrm + i, fx(code, ops).into()));
        }
    };
    let none = |high: &mut Vec<(u8, Node)>, modrm: u8, code: C| {
        high.push((modrm, fx(code, &[]).into()));
    };

    m[0xd8] = group8x8(
        mem([
            Some(C::Fadd_m32fp), Some(C::Fmul_m32fp), Some(C::Fcom_m32fp), Some(C::Fcomp_m32fp),
            Some(C::Fsub_m32fp), Some(C::Fsubr_m32fp), Some(C::Fdiv_m32fp), Some(C::Fdivr_m32fp),
        ]),
        st0_sti([
            C::Fadd_st0_sti, C::Fmul_st0_sti, C::Fcom_st0_sti, C::Fcomp_st0_sti,
            C::Fsub_st0_sti, C::Fsubr_st0_sti, C::Fdiv_st0_sti, C::Fdivr_st0_sti,
        ]),
    );

    let mut high = Vec::new();
    run(&mut high, 0xc0, C::Fld_sti, &[STI]);
    run(&mut high, 0xc8, C::Fxch_st0_sti, &[ST0, STI]);
    none(&mut high, 0xd0, C::Fnop);
    run(&mut high, 0xd8, C::Fstpnce_sti, &[STI]);
    for &(modrm, code) in &[
        (0xe0, C::Fchs), (0xe1, C::Fabs), (0xe4, C::Ftst), (0xe5, C::Fxam),
        (0xe8, C::Fld1), (0xe9, C::Fldl2t), (0xea, C::Fldl2e), (0xeb, C::Fldpi),
        (0xec, C::Fldlg2), (0xed, C::Fldln2), (0xee, C::Fldz),
        (0xf0, C::F2xm1), (0xf1, C::Fyl2x), (0xf2, C::Fptan), (0xf3, C::Fpatan),
        (0xf4, C::Fxtract), (0xf5, C::Fprem1), (0xf6, C::Fdecstp), (0xf7, C::Fincstp),
        (0xf8, C::Fprem), (0xf9, C::Fyl2xp1), (0xfa, C::Fsqrt), (0xfb, C::Fsincos),
        (0xfc, C::Frndint), (0xfd, C::Fscale), (0xfe, C::Fsin), (0xff, C::Fcos),
    ] {
        none(&mut high, modrm, code);
    }
    let mut low = mem([
        Some(C::Fld_m32fp), None, Some(C::Fst_m32fp), Some(C::Fstp_m32fp),
        None, Some(C::Fldcw_m2byte), None, Some(C::Fnstcw_m2byte),
    ]);
    low[4] = sz(Sizing::Op1632, &[C::Fldenv_m14byte, C::Fldenv_m28byte], &[M]).into();
    low[6] = sz(Sizing::Op1632, &[C::Fnstenv_m14byte, C::Fnstenv_m28byte], &[M]).into();
    m[0xd9] = group8x64(low, high);

    let mut high = Vec::new();
    run(&mut high, 0xc0, C::Fcmovb_st0_sti, &[ST0, STI]);
    run(&mut high, 0xc8, C::Fcmove_st0_sti, &[ST0, STI]);
    run(&mut high, 0xd0, C::Fcmovbe_st0_sti, &[ST0, STI]);
    run(&mut high, 0xd8, C::Fcmovu_st0_sti, &[ST0, STI]);
    none(&mut high, 0xe9, C::Fucompp);
    m[0xda] = group8x64(
        mem([
            Some(C::Fiadd_m32int), Some(C::Fimul_m32int), Some(C::Ficom_m32int),
            Some(C::Ficomp_m32int), Some(C::Fisub_m32int), Some(C::Fisubr_m32int),
            Some(C::Fidiv_m32int), Some(C::Fidivr_m32int),
        ]),
        high,
    );

    let mut high = Vec::new();
    run(&mut high, 0xc0, C::Fcmovnb_st0_sti, &[ST0, STI]);
    run(&mut high, 0xc8, C::Fcmovne_st0_sti, &[ST0, STI]);
    run(&mut high, 0xd0, C::Fcmovnbe_st0_sti, &[ST0, STI]);
    run(&mut high, 0xd8, C::Fcmovnu_st0_sti, &[ST0, STI]);
    none(&mut high, 0xe0, C::Fneni);
    none(&mut high, 0xe1, C::Fndisi);
    none(&mut high, 0xe2, C::Fnclex);
    none(&mut high, 0xe3, C::Fninit);
    none(&mut high, 0xe4, C::Fnsetpm);
    run(&mut high, 0xe8, C::Fucomi_st0_sti, &[ST0, STI]);
    run(&mut high, 0xf0, C::Fcomi_st0_sti, &[ST0, STI]);
    m[0xdb] = group8x64(
        mem([
            Some(C::Fild_m32int), Some(C::Fisttp_m32int), Some(C::Fist_m32int),
            Some(C::Fistp_m32int), None, Some(C::Fld_m80fp), None, Some(C::Fstp_m80fp),
        ]),
        high,
    );

    m[0xdc] = group8x8(
        mem([
            Some(C::Fadd_m64fp), Some(C::Fmul_m64fp), Some(C::Fcom_m64fp), Some(C::Fcomp_m64fp),
            Some(C::Fsub_m64fp), Some(C::Fsubr_m64fp), Some(C::Fdiv_m64fp), Some(C::Fdivr_m64fp),
        ]),
        nodes![
            fx(C::Fadd_sti_st0, &[STI, ST0]),
            fx(C::Fmul_sti_st0, &[STI, ST0]),
            fx(C::Fcom_st0_sti_DCD0, &[ST0, STI]),
            fx(C::Fcomp_st0_sti_DCD8, &[ST0, STI]),
            fx(C::Fsubr_sti_st0, &[STI, ST0]),
            fx(C::Fsub_sti_st0, &[STI, ST0]),
            fx(C::Fdivr_sti_st0, &[STI, ST0]),
            fx(C::Fdiv_sti_st0, &[STI, ST0]),
        ],
    );

    let mut low = mem([
        Some(C::Fld_m64fp), Some(C::Fisttp_m64int), Some(C::Fst_m64fp), Some(C::Fstp_m64fp),
        None, None, None, Some(C::Fnstsw_m2byte),
    ]);
    low[4] = sz(Sizing::Op1632, &[C::Frstor_m94byte, C::Frstor_m108byte], &[M]).into();
    low[6] = sz(Sizing::Op1632, &[C::Fnsave_m94byte, C::Fnsave_m108byte], &[M]).into();
    m[0xdd] = group8x8(
        low,
        nodes![
            fx(C::Ffree_sti, &[STI]),
            fx(C::Fxch_st0_sti_DDC8, &[ST0, STI]),
            fx(C::Fst_sti, &[STI]),
            fx(C::Fstp_sti, &[STI]),
            fx(C::Fucom_st0_sti, &[ST0, STI]),
            fx(C::Fucomp_st0_sti, &[ST0, STI]),
            inv(),
            inv(),
        ],
    );

    let mut high = Vec::new();
    run(&mut high, 0xc0, C::Faddp_sti_st0, &[STI, ST0]);
    run(&mut high, 0xc8, C::Fmulp_sti_st0, &[STI, ST0]);
    run(&mut high, 0xd0, C::Fcomp_st0_sti_DED0, &[ST0, STI]);
    none(&mut high, 0xd9, C::Fcompp);
    run(&mut high, 0xe0, C::Fsubrp_sti_st0, &[STI, ST0]);
    run(&mut high, 0xe8, C::Fsubp_sti_st0, &[STI, ST0]);
    run(&mut high, 0xf0, C::Fdivrp_sti_st0, &[STI, ST0]);
    run(&mut high, 0xf8, C::Fdivp_sti_st0, &[STI, ST0]);
    m[0xde] = group8x64(
        mem([
            Some(C::Fiadd_m16int), Some(C::Fimul_m16int), Some(C::Ficom_m16int),
            Some(C::Ficomp_m16int), Some(C::Fisub_m16int), Some(C::Fisubr_m16int),
            Some(C::Fidiv_m16int), Some(C::Fidivr_m16int),
        ]),
        high,
    );

    let mut high = Vec::new();
    run(&mut high, 0xc0, C::Ffreep_sti, &[STI]);
    run(&mut high, 0xc8, C::Fxch_st0_sti_DFC8, &[ST0, STI]);
    run(&mut high, 0xd0, C::Fstp_sti_DFD0, &[STI]);
    run(&mut high, 0xd8, C::Fstp_sti_DFD8, &[STI]);
    high.push((0xe0, fx(C::Fnstsw_AX, &[AX16]).into()));
    run(&mut high, 0xe8, C::Fucomip_st0_sti, &[ST0, STI]);
    run(&mut high, 0xf0, C::Fcomip_st0_sti, &[ST0, STI]);
    m[0xdf] = group8x64(
        mem([
            Some(C::Fild_m16int), Some(C::Fisttp_m16int), Some(C::Fist_m16int),
            Some(C::Fistp_m16int), Some(C::Fbld_m80bcd), Some(C::Fild_m64int),
            Some(C::Fbstp_m80bcd), Some(C::Fistp_m64int),
        ]),
        high,
    );
}

fn map0f(map0f38: u32, map0f3a: u32) -> Vec<Node> {
    let mut m = blank();

    m[0x00] = group(nodes![
        v3([C::Sldt_rm16, C::Sldt_r32m16, C::Sldt_r64m16], &[EV]),
        v3([C::Str_rm16, C::Str_r32m16, C::Str_r64m16], &[EV]),
        v3([C::Lldt_rm16, C::Lldt_r32m16, C::Lldt_r64m16], &[EV]),
        v3([C::Ltr_rm16, C::Ltr_r32m16, C::Ltr_r64m16], &[EV]),
        v3([C::Verr_rm16, C::Verr_r32m16, C::Verr_r64m16], &[EV]),
        v3([C::Verw_rm16, C::Verw_r32m16, C::Verw_r64m16], &[EV]),
        opts(
            OptionsScope::DontReadModRM,
            inv(),
            vec![(
                O::JMPE,
                bits_modrm(sz(Sizing::Op1632, &[C::Jmpe_rm16, C::Jmpe_rm32], &[EV]), inv()),
            )],
        ),
        inv(),
    ]);

    let mut high = Vec::new();
    for &(modrm, code) in &[
        (0xc0, C::Enclv), (0xc1, C::Vmcall), (0xc2, C::Vmlaunch), (0xc3, C::Vmresume), (0xc4, C::Vmxoff),
        (0xca, C::Clac), (0xcb, C::Stac), (0xcf, C::Encls),
        (0xd0, C::Xgetbv), (0xd1, C::Xsetbv), (0xd4, C::Vmfunc), (0xd5, C::Xend),
        (0xd6, C::Xtest), (0xd7, C::Enclu), (0xd9, C::Vmmcall), (0xdc, C::Stgi),
        (0xdd, C::Clgi), (0xde, C::Skinit), (0xee, C::Rdpkru), (0xef, C::Wrpkru),
        (0xf9, C::Rdtscp),
    ] {
        high.push((modrm, fx(code, &[]).into()));
    }
    // SVM forms taking rAX as an address.
    for &(modrm, codes) in &[
        (0xd8, [C::Vmrunw, C::Vmrund, C::Vmrunq]),
        (0xda, [C::Vmloadw, C::Vmloadd, C::Vmloadq]),
        (0xdb, [C::Vmsavew, C::Vmsaved, C::Vmsaveq]),
        (0xdf, [C::Invlpgaw, C::Invlpgad, C::Invlpgaq]),
    ] {
        high.push((modrm, sz(Sizing::AddrSize, &codes, &[]).into()));
    }
    high.push((0xc8, sz(Sizing::AddrSize, &[C::Monitorw, C::Monitord, C::Monitorq], &[]).into()));
    high.push((0xc9, fx(C::Mwait, &[]).into()));
    high.push((0xf8, only64(fx(C::Swapgs, &[]))));
    high.push((0xfa, sz(Sizing::AddrSize, &[C::Monitorxw, C::Monitorxd, C::Monitorxq], &[]).into()));
    high.push((0xfb, fx(C::Mwaitx, &[]).into()));
    high.push((0xfc, v3([C::Clzerow, C::Clzerod, C::Clzeroq], &[]).into()));
    m[0x01] = group8x64(
        nodes![
            sz(Sizing::Mode64, &[C::Sgdt_m1632_16, C::Sgdt_m1632, C::Sgdt_m1664], &[M]),
            sz(Sizing::Mode64, &[C::Sidt_m1632_16, C::Sidt_m1632, C::Sidt_m1664], &[M]),
            sz(Sizing::Mode64, &[C::Lgdt_m1632_16, C::Lgdt_m1632, C::Lgdt_m1664], &[M]),
            sz(Sizing::Mode64, &[C::Lidt_m1632_16, C::Lidt_m1632, C::Lidt_m1664], &[M]),
            v3([C::Smsw_rm16, C::Smsw_r32m16, C::Smsw_r64m16], &[EV]),
            inv(),
            v3([C::Lmsw_rm16, C::Lmsw_r32m16, C::Lmsw_r64m16], &[EV]),
            fx(C::Invlpg_m, &[M]),
        ],
        high,
    );

    m[0x02] = v3([C::Lar_r16_rm16, C::Lar_r32_r32m16, C::Lar_r64_r64m16], &[GV, EV]).into();
    m[0x03] = v3([C::Lsl_r16_rm16, C::Lsl_r32_r32m16, C::Lsl_r64_r64m16], &[GV, EV]).into();
    m[0x05] = opts(
        OptionsScope::Only1632,
        fx(C::Syscall, &[]),
        vec![(O::LOADALL286, fx(C::Loadall286, &[]).into())],
    );
    m[0x06] = fx(C::Clts, &[]).into();
    m[0x07] = opts(
        OptionsScope::Only1632,
        sz(Sizing::W, &[C::Sysretd, C::Sysretq], &[]),
        vec![(O::LOADALL386, fx(C::Loadall386, &[]).into())],
    );
    m[0x08] = fx(C::Invd, &[]).into();
    m[0x09] = Node::Wbinvd;
    m[0x0a] = opts(
        OptionsScope::Only1632,
        inv_nm(),
        vec![(O::CL1INVMB, fx(C::Cl1invmb, &[]).into())],
    );
    m[0x0b] = fx(C::Ud2, &[]).into();
    m[0x0d] = reserved_nop(
        v3(
            [C::Reservednop_rm16_r16_0F0D, C::Reservednop_rm32_r32_0F0D, C::Reservednop_rm64_r64_0F0D],
            &[EV, GV],
        ),
        rm(
            v3(
                [C::Reservednop_rm16_r16_0F0D, C::Reservednop_rm32_r32_0F0D, C::Reservednop_rm64_r64_0F0D],
                &[EV, GV],
            ),
            group(nodes![
                fx(C::Prefetch_m8, &[M]),
                fx(C::Prefetchw_m8, &[M]),
                fx(C::Prefetchwt1_m8, &[M]),
                fx(C::Prefetch_m8_r3, &[M]),
                fx(C::Prefetch_m8_r4, &[M]),
                fx(C::Prefetch_m8_r5, &[M]),
                fx(C::Prefetch_m8_r6, &[M]),
                fx(C::Prefetch_m8_r7, &[M]),
            ]),
        ),
    );
    m[0x0e] = fx(C::Femms, &[]).into();
    m[0x0f] = Node::D3Now(vec![
        (0x0c, C::Pi2fw_mm_mmm64), (0x0d, C::Pi2fd_mm_mmm64),
        (0x1c, C::Pf2iw_mm_mmm64), (0x1d, C::Pf2id_mm_mmm64),
        (0x8a, C::Pfnacc_mm_mmm64), (0x8e, C::Pfpnacc_mm_mmm64),
        (0x90, C::Pfcmpge_mm_mmm64), (0x94, C::Pfmin_mm_mmm64),
        (0x96, C::Pfrcp_mm_mmm64), (0x97, C::Pfrsqrt_mm_mmm64),
        (0x9a, C::Pfsub_mm_mmm64), (0x9e, C::Pfadd_mm_mmm64),
        (0xa0, C::Pfcmpgt_mm_mmm64), (0xa4, C::Pfmax_mm_mmm64),
        (0xa6, C::Pfrcpit1_mm_mmm64), (0xa7, C::Pfrsqit1_mm_mmm64),
        (0xaa, C::Pfsubr_mm_mmm64), (0xae, C::Pfacc_mm_mmm64),
        (0xb0, C::Pfcmpeq_mm_mmm64), (0xb4, C::Pfmul_mm_mmm64),
        (0xb6, C::Pfrcpit2_mm_mmm64), (0xb7, C::Pmulhrw_mm_mmm64),
        (0xbb, C::Pswapd_mm_mmm64), (0xbf, C::Pavgusb_mm_mmm64),
    ]);

    // UMOV shares 0F 10..13 with the SSE moves.
    let umov = |h: Node, umov: Node| {
        opts(OptionsScope::Only1632, h, vec![(O::UMOV, umov)])
    };
    m[0x10] = umov(
        mp(
            fx(C::Movups_xmm_xmmm128, &[VX, WX]),
            fx(C::Movupd_xmm_xmmm128, &[VX, WX]),
            fx(C::Movss_xmm_xmmm32, &[VX, WX]),
            fx(C::Movsd_xmm_xmmm64, &[VX, WX]),
        ),
        fx(C::Umov_rm8_r8, &[EB, GB]).into(),
    );
    m[0x11] = umov(
        mp(
            fx(C::Movups_xmmm128_xmm, &[WX, VX]),
            fx(C::Movupd_xmmm128_xmm, &[WX, VX]),
            fx(C::Movss_xmmm32_xmm, &[WX, VX]),
            fx(C::Movsd_xmmm64_xmm, &[WX, VX]),
        ),
        sz(Sizing::Op1632, &[C::Umov_rm16_r16, C::Umov_rm32_r32], &[EV, GV]).into(),
    );
    m[0x12] = umov(
        mp(
            rm(fx(C::Movhlps_xmm_xmm, &[VX, UX]), fx(C::Movlps_xmm_m64, &[VX, M])),
            fx(C::Movlpd_xmm_m64, &[VX, M]),
            fx(C::Movsldup_xmm_xmmm128, &[VX, WX]),
            fx(C::Movddup_xmm_xmmm64, &[VX, WX]),
        ),
        fx(C::Umov_r8_rm8, &[GB, EB]).into(),
    );
    m[0x13] = umov(
        mp(
            fx(C::Movlps_m64_xmm, &[M, VX]),
            fx(C::Movlpd_m64_xmm, &[M, VX]),
            inv(),
            inv(),
        ),
        sz(Sizing::Op1632, &[C::Umov_r16_rm16, C::Umov_r32_rm32], &[GV, EV]).into(),
    );
    m[0x14] = sse2(C::Unpcklps_xmm_xmmm128, C::Unpcklpd_xmm_xmmm128);
    m[0x15] = sse2(C::Unpckhps_xmm_xmmm128, C::Unpckhpd_xmm_xmmm128);
    m[0x16] = mp(
        rm(fx(C::Movlhps_xmm_xmm, &[VX, UX]), fx(C::Movhps_xmm_m64, &[VX, M])),
        fx(C::Movhpd_xmm_m64, &[VX, M]),
        fx(C::Movshdup_xmm_xmmm128, &[VX, WX]),
        inv(),
    );
    m[0x17] = mp(
        fx(C::Movhps_m64_xmm, &[M, VX]),
        fx(C::Movhpd_m64_xmm, &[M, VX]),
        inv(),
        inv(),
    );

    let nop = |codes: [C; 3]| v3(codes, &[EV, GV]);
    m[0x18] = reserved_nop(
        nop([C::Reservednop_rm16_r16_0F18, C::Reservednop_rm32_r32_0F18, C::Reservednop_rm64_r64_0F18]),
        rm(
            nop([C::Reservednop_rm16_r16_0F18, C::Reservednop_rm32_r32_0F18, C::Reservednop_rm64_r64_0F18]),
            group(nodes![
                fx(C::Prefetchnta_m8, &[M]),
                fx(C::Prefetcht0_m8, &[M]),
                fx(C::Prefetcht1_m8, &[M]),
                fx(C::Prefetcht2_m8, &[M]),
                nop([C::Reservednop_rm16_r16_0F18, C::Reservednop_rm32_r32_0F18, C::Reservednop_rm64_r64_0F18]),
                nop([C::Reservednop_rm16_r16_0F18, C::Reservednop_rm32_r32_0F18, C::Reservednop_rm64_r64_0F18]),
                nop([C::Reservednop_rm16_r16_0F18, C::Reservednop_rm32_r32_0F18, C::Reservednop_rm64_r64_0F18]),
                nop([C::Reservednop_rm16_r16_0F18, C::Reservednop_rm32_r32_0F18, C::Reservednop_rm64_r64_0F18]),
            ]),
        ),
    );
    m[0x19] = nop([C::Reservednop_rm16_r16_0F19, C::Reservednop_rm32_r32_0F19, C::Reservednop_rm64_r64_0F19]).into();
    let nop1a = [C::Reservednop_rm16_r16_0F1A, C::Reservednop_rm32_r32_0F1A, C::Reservednop_rm64_r64_0F1A];
    let bnd_gpr = |c32: C, c64: C| sz(Sizing::Mode3264, &[c32, c64], &[BNDG, EV]);
    m[0x1a] = reserved_nop(
        nop(nop1a),
        mp(
            fx(C::Bndldx_bnd_mib, &[BNDG, MIB]),
            fx(C::Bndmov_bnd_bndm128, &[BNDG, BNDE]),
            bnd_gpr(C::Bndcl_bnd_rm32, C::Bndcl_bnd_rm64),
            bnd_gpr(C::Bndcu_bnd_rm32, C::Bndcu_bnd_rm64),
        ),
    );
    let nop1b = [C::Reservednop_rm16_r16_0F1B, C::Reservednop_rm32_r32_0F1B, C::Reservednop_rm64_r64_0F1B];
    m[0x1b] = reserved_nop(
        nop(nop1b),
        mp(
            fx(C::Bndstx_mib_bnd, &[MIB, BNDG]),
            fx(C::Bndmov_bndm128_bnd, &[BNDE, BNDG]),
            sz(Sizing::Mode3264, &[C::Bndmk_bnd_m32, C::Bndmk_bnd_m64], &[BNDG, M]),
            bnd_gpr(C::Bndcn_bnd_rm32, C::Bndcn_bnd_rm64),
        ),
    );
    m[0x1c] = nop([C::Reservednop_rm16_r16_0F1C, C::Reservednop_rm32_r32_0F1C, C::Reservednop_rm64_r64_0F1C]).into();
    m[0x1d] = nop([C::Reservednop_rm16_r16_0F1D, C::Reservednop_rm32_r32_0F1D, C::Reservednop_rm64_r64_0F1D]).into();
    let nop1e = [C::Reservednop_rm16_r16_0F1E, C::Reservednop_rm32_r32_0F1E, C::Reservednop_rm64_r64_0F1E];
    m[0x1e] = reserved_nop(
        nop(nop1e),
        mp(
            nop(nop1e),
            nop(nop1e),
            group8x64(
                vec![Node::from(nop(nop1e)); 8],
                vec![
                    (0xfa, fx(C::Endbr64, &[]).into()),
                    (0xfb, fx(C::Endbr32, &[]).into()),
                ],
            ),
            nop(nop1e),
        ),
    );
    m[0x1f] = reserved_nop(
        nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
        group(nodes![
            v3([C::Nop_rm16, C::Nop_rm32, C::Nop_rm64], &[EV]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
            nop([C::Reservednop_rm16_r16_0F1F, C::Reservednop_rm32_r32_0F1F, C::Reservednop_rm64_r64_0F1F]),
        ]),
    );

    // MOV to/from control, debug and test registers ignore mod.
    let rv = Operand::GprRm(RegWidth::V);
    m[0x20] = sz(Sizing::Mode3264, &[C::Mov_r32_cr, C::Mov_r64_cr], &[rv, Operand::Cr]).into();
    m[0x21] = sz(Sizing::Mode3264, &[C::Mov_r32_dr, C::Mov_r64_dr], &[rv, Operand::Dr]).into();
    m[0x22] = sz(Sizing::Mode3264, &[C::Mov_cr_r32, C::Mov_cr_r64], &[Operand::Cr, rv]).into();
    m[0x23] = sz(Sizing::Mode3264, &[C::Mov_dr_r32, C::Mov_dr_r64], &[Operand::Dr, rv]).into();
    m[0x24] = opts(
        OptionsScope::Only1632,
        inv(),
        vec![(O::MOV_TR, fx(C::Mov_r32_tr, &[RD, Operand::Tr]).into())],
    );
    m[0x26] = opts(
        OptionsScope::Only1632,
        inv(),
        vec![(O::MOV_TR, fx(C::Mov_tr_r32, &[Operand::Tr, RD]).into())],
    );

    m[0x28] = sse2(C::Movaps_xmm_xmmm128, C::Movapd_xmm_xmmm128);
    m[0x29] = mp(
        fx(C::Movaps_xmmm128_xmm, &[WX, VX]),
        fx(C::Movapd_xmmm128_xmm, &[WX, VX]),
        inv(),
        inv(),
    );
    m[0x2a] = mp(
        fx(C::Cvtpi2ps_xmm_mmm64, &[VX, QQ]),
        fx(C::Cvtpi2pd_xmm_mmm64, &[VX, QQ]),
        sz(Sizing::W, &[C::Cvtsi2ss_xmm_rm32, C::Cvtsi2ss_xmm_rm64], &[VX, EV]),
        sz(Sizing::W, &[C::Cvtsi2sd_xmm_rm32, C::Cvtsi2sd_xmm_rm64], &[VX, EV]),
    );
    m[0x2b] = mp(
        fx(C::Movntps_m128_xmm, &[M, VX]),
        fx(C::Movntpd_m128_xmm, &[M, VX]),
        fx(C::Movntss_m32_xmm, &[M, VX]),
        fx(C::Movntsd_m64_xmm, &[M, VX]),
    );
    m[0x2c] = mp(
        fx(C::Cvttps2pi_mm_xmmm64, &[PQ, WX]),
        fx(C::Cvttpd2pi_mm_xmmm128, &[PQ, WX]),
        sz(Sizing::W, &[C::Cvttss2si_r32_xmmm32, C::Cvttss2si_r64_xmmm32], &[GV, WX]),
        sz(Sizing::W, &[C::Cvttsd2si_r32_xmmm64, C::Cvttsd2si_r64_xmmm64], &[GV, WX]),
    );
    m[0x2d] = mp(
        fx(C::Cvtps2pi_mm_xmmm64, &[PQ, WX]),
        fx(C::Cvtpd2pi_mm_xmmm128, &[PQ, WX]),
        sz(Sizing::W, &[C::Cvtss2si_r32_xmmm32, C::Cvtss2si_r64_xmmm32], &[GV, WX]),
        sz(Sizing::W, &[C::Cvtsd2si_r32_xmmm64, C::Cvtsd2si_r64_xmmm64], &[GV, WX]),
    );
    m[0x2e] = sse2(C::Ucomiss_xmm_xmmm32, C::Ucomisd_xmm_xmmm64);
    m[0x2f] = sse2(C::Comiss_xmm_xmmm32, C::Comisd_xmm_xmmm64);

    m[0x30] = fx(C::Wrmsr, &[]).into();
    m[0x31] = fx(C::Rdtsc, &[]).into();
    m[0x32] = fx(C::Rdmsr, &[]).into();
    m[0x33] = fx(C::Rdpmc, &[]).into();
    m[0x34] = fx(C::Sysenter, &[]).into();
    m[0x35] = sz(Sizing::W, &[C::Sysexitd, C::Sysexitq], &[]).into();
    m[0x37] = fx(C::Getsec, &[]).into();
    m[0x38] = Node::AnotherTable(map0f38);
    m[0x3a] = Node::AnotherTable(map0f3a);

    let cmov = [
        [C::Cmovo_r16_rm16, C::Cmovo_r32_rm32, C::Cmovo_r64_rm64],
        [C::Cmovno_r16_rm16, C::Cmovno_r32_rm32, C::Cmovno_r64_rm64],
        [C::Cmovb_r16_rm16, C::Cmovb_r32_rm32, C::Cmovb_r64_rm64],
        [C::Cmovae_r16_rm16, C::Cmovae_r32_rm32, C::Cmovae_r64_rm64],
        [C::Cmove_r16_rm16, C::Cmove_r32_rm32, C::Cmove_r64_rm64],
        [C::Cmovne_r16_rm16, C::Cmovne_r32_rm32, C::Cmovne_r64_rm64],
        [C::Cmovbe_r16_rm16, C::Cmovbe_r32_rm32, C::Cmovbe_r64_rm64],
        [C::Cmova_r16_rm16, C::Cmova_r32_rm32, C::Cmova_r64_rm64],
        [C::Cmovs_r16_rm16, C::Cmovs_r32_rm32, C::Cmovs_r64_rm64],
        [C::Cmovns_r16_rm16, C::Cmovns_r32_rm32, C::Cmovns_r64_rm64],
        [C::Cmovp_r16_rm16, C::Cmovp_r32_rm32, C::Cmovp_r64_rm64],
        [C::Cmovnp_r16_rm16, C::Cmovnp_r32_rm32, C::Cmovnp_r64_rm64],
        [C::Cmovl_r16_rm16, C::Cmovl_r32_rm32, C::Cmovl_r64_rm64],
        [C::Cmovge_r16_rm16, C::Cmovge_r32_rm32, C::Cmovge_r64_rm64],
        [C::Cmovle_r16_rm16, C::Cmovle_r32_rm32, C::Cmovle_r64_rm64],
        [C::Cmovg_r16_rm16, C::Cmovg_r32_rm32, C::Cmovg_r64_rm64],
    ];
    for (i, codes) in cmov.iter().enumerate() {
        m[0x40 + i] = v3(*codes, &[GV, EV]).into();
    }

    m[0x50] = mp(
        sz(Sizing::W, &[C::Movmskps_r32_xmm, C::Movmskps_r64_xmm], &[GV, UX]),
        sz(Sizing::W, &[C::Movmskpd_r32_xmm, C::Movmskpd_r64_xmm], &[GV, UX]),
        inv(),
        inv(),
    );
    m[0x51] = sse4(C::Sqrtps_xmm_xmmm128, C::Sqrtpd_xmm_xmmm128, C::Sqrtss_xmm_xmmm32, C::Sqrtsd_xmm_xmmm64);
    m[0x52] = mp(fx(C::Rsqrtps_xmm_xmmm128, &[VX, WX]), inv(), fx(C::Rsqrtss_xmm_xmmm32, &[VX, WX]), inv());
    m[0x53] = mp(fx(C::Rcpps_xmm_xmmm128, &[VX, WX]), inv(), fx(C::Rcpss_xmm_xmmm32, &[VX, WX]), inv());
    m[0x54] = sse2(C::Andps_xmm_xmmm128, C::Andpd_xmm_xmmm128);
    m[0x55] = sse2(C::Andnps_xmm_xmmm128, C::Andnpd_xmm_xmmm128);
    m[0x56] = sse2(C::Orps_xmm_xmmm128, C::Orpd_xmm_xmmm128);
    m[0x57] = sse2(C::Xorps_xmm_xmmm128, C::Xorpd_xmm_xmmm128);
    m[0x58] = sse4(C::Addps_xmm_xmmm128, C::Addpd_xmm_xmmm128, C::Addss_xmm_xmmm32, C::Addsd_xmm_xmmm64);
    m[0x59] = sse4(C::Mulps_xmm_xmmm128, C::Mulpd_xmm_xmmm128, C::Mulss_xmm_xmmm32, C::Mulsd_xmm_xmmm64);
    m[0x5a] = sse4(C::Cvtps2pd_xmm_xmmm64, C::Cvtpd2ps_xmm_xmmm128, C::Cvtss2sd_xmm_xmmm32, C::Cvtsd2ss_xmm_xmmm64);
    m[0x5b] = mp(
        fx(C::Cvtdq2ps_xmm_xmmm128, &[VX, WX]),
        fx(C::Cvtps2dq_xmm_xmmm128, &[VX, WX]),
        fx(C::Cvttps2dq_xmm_xmmm128, &[VX, WX]),
        inv(),
    );
    m[0x5c] = sse4(C::Subps_xmm_xmmm128, C::Subpd_xmm_xmmm128, C::Subss_xmm_xmmm32, C::Subsd_xmm_xmmm64);
    m[0x5d] = sse4(C::Minps_xmm_xmmm128, C::Minpd_xmm_xmmm128, C::Minss_xmm_xmmm32, C::Minsd_xmm_xmmm64);
    m[0x5e] = sse4(C::Divps_xmm_xmmm128, C::Divpd_xmm_xmmm128, C::Divss_xmm_xmmm32, C::Divsd_xmm_xmmm64);
    m[0x5f] = sse4(C::Maxps_xmm_xmmm128, C::Maxpd_xmm_xmmm128, C::Maxss_xmm_xmmm32, C::Maxsd_xmm_xmmm64);

    let mmx = [
        (0x60, C::Punpcklbw_mm_mmm32, C::Punpcklbw_xmm_xmmm128),
        (0x61, C::Punpcklwd_mm_mmm32, C::Punpcklwd_xmm_xmmm128),
        (0x62, C::Punpckldq_mm_mmm32, C::Punpckldq_xmm_xmmm128),
        (0x63, C::Packsswb_mm_mmm64, C::Packsswb_xmm_xmmm128),
        (0x64, C::Pcmpgtb_mm_mmm64, C::Pcmpgtb_xmm_xmmm128),
        (0x65, C::Pcmpgtw_mm_mmm64, C::Pcmpgtw_xmm_xmmm128),
        (0x66, C::Pcmpgtd_mm_mmm64, C::Pcmpgtd_xmm_xmmm128),
        (0x67, C::Packuswb_mm_mmm64, C::Packuswb_xmm_xmmm128),
        (0x68, C::Punpckhbw_mm_mmm64, C::Punpckhbw_xmm_xmmm128),
        (0x69, C::Punpckhwd_mm_mmm64, C::Punpckhwd_xmm_xmmm128),
        (0x6a, C::Punpckhdq_mm_mmm64, C::Punpckhdq_xmm_xmmm128),
        (0x6b, C::Packssdw_mm_mmm64, C::Packssdw_xmm_xmmm128),
        (0x74, C::Pcmpeqb_mm_mmm64, C::Pcmpeqb_xmm_xmmm128),
        (0x75, C::Pcmpeqw_mm_mmm64, C::Pcmpeqw_xmm_xmmm128),
        (0x76, C::Pcmpeqd_mm_mmm64, C::Pcmpeqd_xmm_xmmm128),
        (0xd1, C::Psrlw_mm_mmm64, C::Psrlw_xmm_xmmm128),
        (0xd2, C::Psrld_mm_mmm64, C::Psrld_xmm_xmmm128),
        (0xd3, C::Psrlq_mm_mmm64, C::Psrlq_xmm_xmmm128),
        (0xd4, C::Paddq_mm_mmm64, C::Paddq_xmm_xmmm128),
        (0xd5, C::Pmullw_mm_mmm64, C::Pmullw_xmm_xmmm128),
        (0xd8, C::Psubusb_mm_mmm64, C::Psubusb_xmm_xmmm128),
        (0xd9, C::Psubusw_mm_mmm64, C::Psubusw_xmm_xmmm128),
        (0xda, C::Pminub_mm_mmm64, C::Pminub_xmm_xmmm128),
        (0xdb, C::Pand_mm_mmm64, C::Pand_xmm_xmmm128),
        (0xdc, C::Paddusb_mm_mmm64, C::Paddusb_xmm_xmmm128),
        (0xdd, C::Paddusw_mm_mmm64, C::Paddusw_xmm_xmmm128),
        (0xde, C::Pmaxub_mm_mmm64, C::Pmaxub_xmm_xmmm128),
        (0xdf, C::Pandn_mm_mmm64, C::Pandn_xmm_xmmm128),
        (0xe0, C::Pavgb_mm_mmm64, C::Pavgb_xmm_xmmm128),
        (0xe1, C::Psraw_mm_mmm64, C::Psraw_xmm_xmmm128),
        (0xe2, C::Psrad_mm_mmm64, C::Psrad_xmm_xmmm128),
        (0xe3, C::Pavgw_mm_mmm64, C::Pavgw_xmm_xmmm128),
        (0xe4, C::Pmulhuw_mm_mmm64, C::Pmulhuw_xmm_xmmm128),
        (0xe5, C::Pmulhw_mm_mmm64, C::Pmulhw_xmm_xmmm128),
        (0xe8, C::Psubsb_mm_mmm64, C::Psubsb_xmm_xmmm128),
        (0xe9, C::Psubsw_mm_mmm64, C::Psubsw_xmm_xmmm128),
        (0xea, C::Pminsw_mm_mmm64, C::Pminsw_xmm_xmmm128),
        (0xeb, C::Por_mm_mmm64, C::Por_xmm_xmmm128),
        (0xec, C::Paddsb_mm_mmm64, C::Paddsb_xmm_xmmm128),
        (0xed, C::Paddsw_mm_mmm64, C::Paddsw_xmm_xmmm128),
        (0xee, C::Pmaxsw_mm_mmm64, C::Pmaxsw_xmm_xmmm128),
        (0xef, C::Pxor_mm_mmm64, C::Pxor_xmm_xmmm128),
        (0xf1, C::Psllw_mm_mmm64, C::Psllw_xmm_xmmm128),
        (0xf2, C::Pslld_mm_mmm64, C::Pslld_xmm_xmmm128),
        (0xf3, C::Psllq_mm_mmm64, C::Psllq_xmm_xmmm128),
        (0xf4, C::Pmuludq_mm_mmm64, C::Pmuludq_xmm_xmmm128),
        (0xf5, C::Pmaddwd_mm_mmm64, C::Pmaddwd_xmm_xmmm128),
        (0xf6, C::Psadbw_mm_mmm64, C::Psadbw_xmm_xmmm128),
        (0xf8, C::Psubb_mm_mmm64, C::Psubb_xmm_xmmm128),
        (0xf9, C::Psubw_mm_mmm64, C::Psubw_xmm_xmmm128),
        (0xfa, C::Psubd_mm_mmm64, C::Psubd_xmm_xmmm128),
        (0xfb, C::Psubq_mm_mmm64, C::Psubq_xmm_xmmm128),
        (0xfc, C::Paddb_mm_mmm64, C::Paddb_xmm_xmmm128),
        (0xfd, C::Paddw_mm_mmm64, C::Paddw_xmm_xmmm128),
        (0xfe, C::Paddd_mm_mmm64, C::Paddd_xmm_xmmm128),
    ];
    for &(op, mm, xmm) in mmx.iter() {
        m[op] = mmx_sse(mm, xmm);
    }

    m[0x6c] = p66(C::Punpcklqdq_xmm_xmmm128, &[VX, WX]);
    m[0x6d] = p66(C::Punpckhqdq_xmm_xmmm128, &[VX, WX]);
    m[0x6e] = mp(
        sz(Sizing::W, &[C::Movd_mm_rm32, C::Movq_mm_rm64], &[PQ, EV]),
        sz(Sizing::W, &[C::Movd_xmm_rm32, C::Movq_xmm_rm64], &[VX, EV]),
        inv(),
        inv(),
    );
    m[0x6f] = mp(
        fx(C::Movq_mm_mmm64, &[PQ, QQ]),
        fx(C::Movdqa_xmm_xmmm128, &[VX, WX]),
        fx(C::Movdqu_xmm_xmmm128, &[VX, WX]),
        inv(),
    );
    m[0x70] = mp(
        fx(C::Pshufw_mm_mmm64_imm8, &[PQ, QQ, IB]),
        fx(C::Pshufd_xmm_xmmm128_imm8, &[VX, WX, IB]),
        fx(C::Pshufhw_xmm_xmmm128_imm8, &[VX, WX, IB]),
        fx(C::Pshuflw_xmm_xmmm128_imm8, &[VX, WX, IB]),
    );

    let shift_imm = |mm: C, xmm: C| {
        mp(fx(mm, &[NQ, IB]), fx(xmm, &[UX, IB]), inv(), inv())
    };
    m[0x71] = group(nodes![
        inv(), inv(),
        shift_imm(C::Psrlw_mm_imm8, C::Psrlw_xmm_imm8), inv(),
        shift_imm(C::Psraw_mm_imm8, C::Psraw_xmm_imm8), inv(),
        shift_imm(C::Psllw_mm_imm8, C::Psllw_xmm_imm8), inv(),
    ]);
    m[0x72] = group(nodes![
        inv(), inv(),
        shift_imm(C::Psrld_mm_imm8, C::Psrld_xmm_imm8), inv(),
        shift_imm(C::Psrad_mm_imm8, C::Psrad_xmm_imm8), inv(),
        shift_imm(C::Pslld_mm_imm8, C::Pslld_xmm_imm8), inv(),
    ]);
    m[0x73] = group(nodes![
        inv(), inv(),
        shift_imm(C::Psrlq_mm_imm8, C::Psrlq_xmm_imm8),
        p66(C::Psrldq_xmm_imm8, &[UX, IB]),
        inv(), inv(),
        shift_imm(C::Psllq_mm_imm8, C::Psllq_xmm_imm8),
        p66(C::Pslldq_xmm_imm8, &[UX, IB]),
    ]);
    m[0x77] = fx(C::Emms, &[]).into();
    m[0x78] = mp(
        sz(Sizing::Mode3264, &[C::Vmread_rm32_r32, C::Vmread_rm64_r64], &[EV, GV]),
        group(nodes![
            fx(C::Extrq_xmm_imm8_imm8, &[UX, IB, IB2]),
            inv(), inv(), inv(), inv(), inv(), inv(), inv(),
        ]),
        inv(),
        fx(C::Insertq_xmm_xmm_imm8_imm8, &[VX, UX, IB, IB2]),
    );
    m[0x79] = mp(
        sz(Sizing::Mode3264, &[C::Vmwrite_r32_rm32, C::Vmwrite_r64_rm64], &[GV, EV]),
        fx(C::Extrq_xmm_xmm, &[VX, UX]),
        inv(),
        fx(C::Insertq_xmm_xmm, &[VX, UX]),
    );
    m[0x7c] = mp(inv(), fx(C::Haddpd_xmm_xmmm128, &[VX, WX]), inv(), fx(C::Haddps_xmm_xmmm128, &[VX, WX]));
    m[0x7d] = mp(inv(), fx(C::Hsubpd_xmm_xmmm128, &[VX, WX]), inv(), fx(C::Hsubps_xmm_xmmm128, &[VX, WX]));
    m[0x7e] = mp(
        sz(Sizing::W, &[C::Movd_rm32_mm, C::Movq_rm64_mm], &[EV, PQ]),
        sz(Sizing::W, &[C::Movd_rm32_xmm, C::Movq_rm64_xmm], &[EV, VX]),
        fx(C::Movq_xmm_xmmm64, &[VX, WX]),
        inv(),
    );
    m[0x7f] = mp(
        fx(C::Movq_mmm64_mm, &[QQ, PQ]),
        fx(C::Movdqa_xmmm128_xmm, &[WX, VX]),
        fx(C::Movdqu_xmmm128_xmm, &[WX, VX]),
        inv(),
    );

    let jcc = [
        [C::Jo_rel16, C::Jo_rel32_32, C::Jo_rel32_64],
        [C::Jno_rel16, C::Jno_rel32_32, C::Jno_rel32_64],
        [C::Jb_rel16, C::Jb_rel32_32, C::Jb_rel32_64],
        [C::Jae_rel16, C::Jae_rel32_32, C::Jae_rel32_64],
        [C::Je_rel16, C::Je_rel32_32, C::Je_rel32_64],
        [C::Jne_rel16, C::Jne_rel32_32, C::Jne_rel32_64],
        [C::Jbe_rel16, C::Jbe_rel32_32, C::Jbe_rel32_64],
        [C::Ja_rel16, C::Ja_rel32_32, C::Ja_rel32_64],
        [C::Js_rel16, C::Js_rel32_32, C::Js_rel32_64],
        [C::Jns_rel16, C::Jns_rel32_32, C::Jns_rel32_64],
        [C::Jp_rel16, C::Jp_rel32_32, C::Jp_rel32_64],
        [C::Jnp_rel16, C::Jnp_rel32_32, C::Jnp_rel32_64],
        [C::Jl_rel16, C::Jl_rel32_32, C::Jl_rel32_64],
        [C::Jge_rel16, C::Jge_rel32_32, C::Jge_rel32_64],
        [C::Jle_rel16, C::Jle_rel32_32, C::Jle_rel32_64],
        [C::Jg_rel16, C::Jg_rel32_32, C::Jg_rel32_64],
    ];
    for (i, codes) in jcc.iter().enumerate() {
        m[0x80 + i] = sz(Sizing::Branch, codes, &[JZ]).into();
    }

    let setcc = [
        C::Seto_rm8, C::Setno_rm8, C::Setb_rm8, C::Setae_rm8,
        C::Sete_rm8, C::Setne_rm8, C::Setbe_rm8, C::Seta_rm8,
        C::Sets_rm8, C::Setns_rm8, C::Setp_rm8, C::Setnp_rm8,
        C::Setl_rm8, C::Setge_rm8, C::Setle_rm8, C::Setg_rm8,
    ];
    for (i, &code) in setcc.iter().enumerate() {
        m[0x90 + i] = fx(code, &[EB]).into();
    }

    m[0xa0] = sz(Sizing::Stack, &[C::Pushw_FS, C::Pushd_FS, C::Pushq_FS], &[FS]).into();
    m[0xa1] = sz(Sizing::Stack, &[C::Popw_FS, C::Popd_FS, C::Popq_FS], &[FS]).into();
    m[0xa2] = fx(C::Cpuid, &[]).into();
    m[0xa3] = v3([C::Bt_rm16_r16, C::Bt_rm32_r32, C::Bt_rm64_r64], &[EV, GV]).into();
    m[0xa4] = v3([C::Shld_rm16_r16_imm8, C::Shld_rm32_r32_imm8, C::Shld_rm64_r64_imm8], &[EV, GV, IB]).into();
    m[0xa5] = v3([C::Shld_rm16_r16_CL, C::Shld_rm32_r32_CL, C::Shld_rm64_r64_CL], &[EV, GV, CL]).into();
    m[0xa6] = opts(
        OptionsScope::Only1632,
        inv(),
        vec![
            (O::XBTS, sz(Sizing::Op1632, &[C::Xbts_r16_rm16, C::Xbts_r32_rm32], &[GV, EV]).into()),
            (O::CMPXCHG486A, fx(C::Cmpxchg486_rm8_r8, &[EB, GB]).with_flags(LOCK).into()),
        ],
    );
    m[0xa7] = opts(
        OptionsScope::Only1632,
        inv(),
        vec![
            (O::XBTS, sz(Sizing::Op1632, &[C::Ibts_rm16_r16, C::Ibts_rm32_r32], &[EV, GV]).into()),
            (
                O::CMPXCHG486A,
                sz(Sizing::Op1632, &[C::Cmpxchg486_rm16_r16, C::Cmpxchg486_rm32_r32], &[EV, GV])
                    .with_flags(LOCK)
                    .into(),
            ),
        ],
    );
    m[0xa8] = sz(Sizing::Stack, &[C::Pushw_GS, C::Pushd_GS, C::Pushq_GS], &[GS]).into();
    m[0xa9] = sz(Sizing::Stack, &[C::Popw_GS, C::Popd_GS, C::Popq_GS], &[GS]).into();
    m[0xaa] = fx(C::Rsm, &[]).into();
    m[0xab] = v3([C::Bts_rm16_r16, C::Bts_rm32_r32, C::Bts_rm64_r64], &[EV, GV]).with_flags(LOCK).into();
    m[0xac] = v3([C::Shrd_rm16_r16_imm8, C::Shrd_rm32_r32_imm8, C::Shrd_rm64_r64_imm8], &[EV, GV, IB]).into();
    m[0xad] = v3([C::Shrd_rm16_r16_CL, C::Shrd_rm32_r32_CL, C::Shrd_rm64_r64_CL], &[EV, GV, CL]).into();

    let fsgs = |codes: [C; 2]| -> Node {
        only64(mp(inv(), inv(), sz(Sizing::W, &codes, &[RV]), inv()))
    };
    let mut high = Vec::new();
    for i in 0..8u8 {
        high.push((0xc0 + i, fsgs([C::Rdfsbase_r32, C::Rdfsbase_r64])));
        high.push((0xc8 + i, fsgs([C::Rdgsbase_r32, C::Rdgsbase_r64])));
        high.push((0xd0 + i, fsgs([C::Wrfsbase_r32, C::Wrfsbase_r64])));
        high.push((0xd8 + i, fsgs([C::Wrgsbase_r32, C::Wrgsbase_r64])));
        high.push((0xe8 + i, fx(C::Lfence, &[]).into()));
        high.push((0xf0 + i, fx(C::Mfence, &[]).into()));
        high.push((
            0xf8 + i,
            opts(
                OptionsScope::DontReadModRM,
                fx(C::Sfence, &[]),
                vec![(O::PCOMMIT, mp(fx(C::Sfence, &[]), fx(C::Pcommit, &[]), inv(), inv()))],
            ),
        ));
    }
    m[0xae] = group8x64(
        nodes![
            sz(Sizing::W, &[C::Fxsave_m512byte, C::Fxsave64_m512byte], &[M]),
            sz(Sizing::W, &[C::Fxrstor_m512byte, C::Fxrstor64_m512byte], &[M]),
            fx(C::Ldmxcsr_m32, &[M]),
            fx(C::Stmxcsr_m32, &[M]),
            mp(
                sz(Sizing::W, &[C::Xsave_mem, C::Xsave64_mem], &[M]),
                inv(),
                sz(Sizing::W, &[C::Ptwrite_rm32, C::Ptwrite_rm64], &[EV]),
                inv(),
            ),
            sz(Sizing::W, &[C::Xrstor_mem, C::Xrstor64_mem], &[M]),
            mp(
                sz(Sizing::W, &[C::Xsaveopt_mem, C::Xsaveopt64_mem], &[M]),
                fx(C::Clwb_m8, &[M]),
                inv(),
                inv(),
            ),
            mp(fx(C::Clflush_m8, &[M]), fx(C::Clflushopt_m8, &[M]), inv(), inv()),
        ],
        high,
    );
    m[0xaf] = v3([C::Imul_r16_rm16, C::Imul_r32_rm32, C::Imul_r64_rm64], &[GV, EV]).into();

    m[0xb0] = fx(C::Cmpxchg_rm8_r8, &[EB, GB]).with_flags(LOCK).into();
    m[0xb1] = v3([C::Cmpxchg_rm16_r16, C::Cmpxchg_rm32_r32, C::Cmpxchg_rm64_r64], &[EV, GV])
        .with_flags(LOCK)
        .into();
    m[0xb2] = v3([C::Lss_r16_m1616, C::Lss_r32_m1632, C::Lss_r64_m1664], &[GV, M]).into();
    m[0xb3] = v3([C::Btr_rm16_r16, C::Btr_rm32_r32, C::Btr_rm64_r64], &[EV, GV]).with_flags(LOCK).into();
    m[0xb4] = v3([C::Lfs_r16_m1616, C::Lfs_r32_m1632, C::Lfs_r64_m1664], &[GV, M]).into();
    m[0xb5] = v3([C::Lgs_r16_m1616, C::Lgs_r32_m1632, C::Lgs_r64_m1664], &[GV, M]).into();
    m[0xb6] = v3([C::Movzx_r16_rm8, C::Movzx_r32_rm8, C::Movzx_r64_rm8], &[GV, EB]).into();
    m[0xb7] = v3([C::Movzx_r16_rm16, C::Movzx_r32_rm16, C::Movzx_r64_rm16], &[GV, EW]).into();
    m[0xb8] = mp(
        opts(
            OptionsScope::DontReadModRM,
            inv(),
            vec![(
                O::JMPE,
                bits_modrm(sz(Sizing::Op1632, &[C::Jmpe_disp16, C::Jmpe_disp32], &[IZ]), inv()),
            )],
        ),
        inv(),
        v3([C::Popcnt_r16_rm16, C::Popcnt_r32_rm32, C::Popcnt_r64_rm64], &[GV, EV]),
        inv(),
    );
    m[0xb9] = v3([C::Ud1_r16_rm16, C::Ud1_r32_rm32, C::Ud1_r64_rm64], &[GV, EV]).into();
    m[0xba] = group(nodes![
        inv(), inv(), inv(), inv(),
        v3([C::Bt_rm16_imm8, C::Bt_rm32_imm8, C::Bt_rm64_imm8], &[EV, IB]),
        v3([C::Bts_rm16_imm8, C::Bts_rm32_imm8, C::Bts_rm64_imm8], &[EV, IB]).with_flags(LOCK),
        v3([C::Btr_rm16_imm8, C::Btr_rm32_imm8, C::Btr_rm64_imm8], &[EV, IB]).with_flags(LOCK),
        v3([C::Btc_rm16_imm8, C::Btc_rm32_imm8, C::Btc_rm64_imm8], &[EV, IB]).with_flags(LOCK),
    ]);
    m[0xbb] = v3([C::Btc_rm16_r16, C::Btc_rm32_r32, C::Btc_rm64_r64], &[EV, GV]).with_flags(LOCK).into();

    let bsf = v3([C::Bsf_r16_rm16, C::Bsf_r32_rm32, C::Bsf_r64_rm64], &[GV, EV]);
    let bsr = v3([C::Bsr_r16_rm16, C::Bsr_r32_rm32, C::Bsr_r64_rm64], &[GV, EV]);
    m[0xbc] = mp(
        bsf.clone(),
        bsf.clone(),
        opts(
            OptionsScope::DontReadModRM,
            v3([C::Tzcnt_r16_rm16, C::Tzcnt_r32_rm32, C::Tzcnt_r64_rm64], &[GV, EV]),
            vec![(O::NO_MPFX_0FBC, bsf.clone().into())],
        ),
        bsf,
    );
    m[0xbd] = mp(
        bsr.clone(),
        bsr.clone(),
        opts(
            OptionsScope::DontReadModRM,
            v3([C::Lzcnt_r16_rm16, C::Lzcnt_r32_rm32, C::Lzcnt_r64_rm64], &[GV, EV]),
            vec![(O::NO_MPFX_0FBD, bsr.clone().into())],
        ),
        bsr,
    );
    m[0xbe] = v3([C::Movsx_r16_rm8, C::Movsx_r32_rm8, C::Movsx_r64_rm8], &[GV, EB]).into();
    m[0xbf] = v3([C::Movsx_r16_rm16, C::Movsx_r32_rm16, C::Movsx_r64_rm16], &[GV, EW]).into();

    m[0xc0] = fx(C::Xadd_rm8_r8, &[EB, GB]).with_flags(LOCK).into();
    m[0xc1] = v3([C::Xadd_rm16_r16, C::Xadd_rm32_r32, C::Xadd_rm64_r64], &[EV, GV])
        .with_flags(LOCK)
        .into();
    m[0xc2] = mp(
        fx(C::Cmpps_xmm_xmmm128_imm8, &[VX, WX, IB]),
        fx(C::Cmppd_xmm_xmmm128_imm8, &[VX, WX, IB]),
        fx(C::Cmpss_xmm_xmmm32_imm8, &[VX, WX, IB]),
        fx(C::Cmpsd_xmm_xmmm64_imm8, &[VX, WX, IB]),
    );
    m[0xc3] = mp(
        sz(Sizing::W, &[C::Movnti_m32_r32, C::Movnti_m64_r64], &[M, GV]),
        inv(),
        inv(),
        inv(),
    );
    m[0xc4] = mp(
        fx(C::Pinsrw_mm_r32m16_imm8, &[PQ, ED, IB]),
        fx(C::Pinsrw_xmm_r32m16_imm8, &[VX, ED, IB]),
        inv(),
        inv(),
    );
    m[0xc5] = mp(
        sz(Sizing::W, &[C::Pextrw_r32_mm_imm8, C::Pextrw_r64_mm_imm8], &[GV, NQ, IB]),
        sz(Sizing::W, &[C::Pextrw_r32_xmm_imm8, C::Pextrw_r64_xmm_imm8], &[GV, UX, IB]),
        inv(),
        inv(),
    );
    m[0xc6] = mp(
        fx(C::Shufps_xmm_xmmm128_imm8, &[VX, WX, IB]),
        fx(C::Shufpd_xmm_xmmm128_imm8, &[VX, WX, IB]),
        inv(),
        inv(),
    );
    m[0xc7] = group8x8(
        nodes![
            inv(),
            sz(Sizing::W, &[C::Cmpxchg8b_m64, C::Cmpxchg16b_m128], &[M]).with_flags(LOCK),
            inv(),
            sz(Sizing::W, &[C::Xrstors_mem, C::Xrstors64_mem], &[M]),
            sz(Sizing::W, &[C::Xsavec_mem, C::Xsavec64_mem], &[M]),
            sz(Sizing::W, &[C::Xsaves_mem, C::Xsaves64_mem], &[M]),
            mp(fx(C::Vmptrld_m64, &[M]), fx(C::Vmclear_m64, &[M]), fx(C::Vmxon_m64, &[M]), inv()),
            mp(fx(C::Vmptrst_m64, &[M]), inv(), inv(), inv()),
        ],
        nodes![
            inv(), inv(), inv(), inv(), inv(), inv(),
            v3([C::Rdrand_r16, C::Rdrand_r32, C::Rdrand_r64], &[RV]),
            mp(
                v3([C::Rdseed_r16, C::Rdseed_r32, C::Rdseed_r64], &[RV]),
                v3([C::Rdseed_r16, C::Rdseed_r32, C::Rdseed_r64], &[RV]),
                sz(Sizing::Mode3264, &[C::Rdpid_r32, C::Rdpid_r64], &[RV]),
                inv(),
            ),
        ],
    );
    for n in 0..8u8 {
        m[0xc8 + n as usize] = v3(
            [C::Bswap_r16, C::Bswap_r32, C::Bswap_r64],
            &[Operand::GprOpcode(RegWidth::V, n)],
        )
        .into();
    }

    m[0xd0] = mp(inv(), fx(C::Addsubpd_xmm_xmmm128, &[VX, WX]), inv(), fx(C::Addsubps_xmm_xmmm128, &[VX, WX]));
    m[0xd6] = mp(
        inv(),
        fx(C::Movq_xmmm64_xmm, &[WX, VX]),
        fx(C::Movq2dq_xmm_mm, &[VX, NQ]),
        fx(C::Movdq2q_mm_xmm, &[PQ, UX]),
    );
    m[0xd7] = mp(
        sz(Sizing::W, &[C::Pmovmskb_r32_mm, C::Pmovmskb_r64_mm], &[GV, NQ]),
        sz(Sizing::W, &[C::Pmovmskb_r32_xmm, C::Pmovmskb_r64_xmm], &[GV, UX]),
        inv(),
        inv(),
    );
    m[0xe6] = mp(
        inv(),
        fx(C::Cvttpd2dq_xmm_xmmm128, &[VX, WX]),
        fx(C::Cvtdq2pd_xmm_xmmm64, &[VX, WX]),
        fx(C::Cvtpd2dq_xmm_xmmm128, &[VX, WX]),
    );
    m[0xe7] = mp(fx(C::Movntq_m64_mm, &[M, PQ]), fx(C::Movntdq_m128_xmm, &[M, VX]), inv(), inv());
    m[0xf0] = mp(inv(), inv(), inv(), fx(C::Lddqu_xmm_m128, &[VX, M]));
    m[0xf7] = mp(
        fx(C::Maskmovq_rDI_mm_mm, &[Operand::StrDstSeg, PQ, NQ]),
        fx(C::Maskmovdqu_rDI_xmm_xmm, &[Operand::StrDstSeg, VX, UX]),
        inv(),
        inv(),
    );
    m[0xff] = opts(
        OptionsScope::Any,
        v3([C::Ud0_r16_rm16, C::Ud0_r32_rm32, C::Ud0_r64_rm64], &[GV, EV]),
        vec![(O::UDBG, fx(C::Ud0, &[]).into())],
    );

    m
}

fn map0f38() -> Vec<Node> {
    let mut m = blank();

    let ssse3 = [
        (0x00, C::Pshufb_mm_mmm64, C::Pshufb_xmm_xmmm128),
        (0x01, C::Phaddw_mm_mmm64, C::Phaddw_xmm_xmmm128),
        (0x02, C::Phaddd_mm_mmm64, C::Phaddd_xmm_xmmm128),
        (0x03, C::Phaddsw_mm_mmm64, C::Phaddsw_xmm_xmmm128),
        (0x04, C::Pmaddubsw_mm_mmm64, C::Pmaddubsw_xmm_xmmm128),
        (0x05, C::Phsubw_mm_mmm64, C::Phsubw_xmm_xmmm128),
        (0x06, C::Phsubd_mm_mmm64, C::Phsubd_xmm_xmmm128),
        (0x07, C::Phsubsw_mm_mmm64, C::Phsubsw_xmm_xmmm128),
        (0x08, C::Psignb_mm_mmm64, C::Psignb_xmm_xmmm128),
        (0x09, C::Psignw_mm_mmm64, C::Psignw_xmm_xmmm128),
        (0x0a, C::Psignd_mm_mmm64, C::Psignd_xmm_xmmm128),
        (0x0b, C::Pmulhrsw_mm_mmm64, C::Pmulhrsw_xmm_xmmm128),
        (0x1c, C::Pabsb_mm_mmm64, C::Pabsb_xmm_xmmm128),
        (0x1d, C::Pabsw_mm_mmm64, C::Pabsw_xmm_xmmm128),
        (0x1e, C::Pabsd_mm_mmm64, C::Pabsd_xmm_xmmm128),
    ];
    for &(op, mm, xmm) in ssse3.iter() {
        m[op] = mmx_sse(mm, xmm);
    }

    m[0x10] = p66(C::Pblendvb_xmm_xmmm128, &[VX, WX, XMM0]);
    m[0x14] = p66(C::Blendvps_xmm_xmmm128, &[VX, WX, XMM0]);
    m[0x15] = p66(C::Blendvpd_xmm_xmmm128, &[VX, WX, XMM0]);

    let sse41 = [
        (0x17, C::Ptest_xmm_xmmm128),
        (0x20, C::Pmovsxbw_xmm_xmmm64),
        (0x21, C::Pmovsxbd_xmm_xmmm32),
        (0x22, C::Pmovsxbq_xmm_xmmm16),
        (0x23, C::Pmovsxwd_xmm_xmmm64),
        (0x24, C::Pmovsxwq_xmm_xmmm32),
        (0x25, C::Pmovsxdq_xmm_xmmm64),
        (0x28, C::Pmuldq_xmm_xmmm128),
        (0x29, C::Pcmpeqq_xmm_xmmm128),
        (0x2b, C::Packusdw_xmm_xmmm128),
        (0x30, C::Pmovzxbw_xmm_xmmm64),
        (0x31, C::Pmovzxbd_xmm_xmmm32),
        (0x32, C::Pmovzxbq_xmm_xmmm16),
        (0x33, C::Pmovzxwd_xmm_xmmm64),
        (0x34, C::Pmovzxwq_xmm_xmmm32),
        (0x35, C::Pmovzxdq_xmm_xmmm64),
        (0x37, C::Pcmpgtq_xmm_xmmm128),
        (0x38, C::Pminsb_xmm_xmmm128),
        (0x39, C::Pminsd_xmm_xmmm128),
        (0x3a, C::Pminuw_xmm_xmmm128),
        (0x3b, C::Pminud_xmm_xmmm128),
        (0x3c, C::Pmaxsb_xmm_xmmm128),
        (0x3d, C::Pmaxsd_xmm_xmmm128),
        (0x3e, C::Pmaxuw_xmm_xmmm128),
        (0x3f, C::Pmaxud_xmm_xmmm128),
        (0x40, C::Pmulld_xmm_xmmm128),
        (0x41, C::Phminposuw_xmm_xmmm128),
        (0xdb, C::Aesimc_xmm_xmmm128),
        (0xdc, C::Aesenc_xmm_xmmm128),
        (0xdd, C::Aesenclast_xmm_xmmm128),
        (0xde, C::Aesdec_xmm_xmmm128),
        (0xdf, C::Aesdeclast_xmm_xmmm128),
    ];
    for &(op, code) in sse41.iter() {
        m[op] = p66(code, &[VX, WX]);
    }
    m[0x2a] = p66(C::Movntdqa_xmm_m128, &[VX, M]);

    let sha = [
        (0xc8, C::Sha1nexte_xmm_xmmm128),
        (0xc9, C::Sha1msg1_xmm_xmmm128),
        (0xca, C::Sha1msg2_xmm_xmmm128),
        (0xcb, C::Sha256rnds2_xmm_xmmm128),
        (0xcc, C::Sha256msg1_xmm_xmmm128),
        (0xcd, C::Sha256msg2_xmm_xmmm128),
    ];
    for &(op, code) in sha.iter() {
        let ops: &[Operand] = if op == 0xcb { &[VX, WX, XMM0] } else { &[VX, WX] };
        m[op] = mp(fx(code, ops), inv(), inv(), inv());
    }

    let inv_ept = |codes: [C; 2]| p66_node(sz(Sizing::Mode3264, &codes, &[GV, M]).into());
    m[0x80] = inv_ept([C::Invept_r32_m128, C::Invept_r64_m128]);
    m[0x81] = inv_ept([C::Invvpid_r32_m128, C::Invvpid_r64_m128]);
    m[0x82] = inv_ept([C::Invpcid_r32_m128, C::Invpcid_r64_m128]);

    let movbe_load = v3([C::Movbe_r16_m16, C::Movbe_r32_m32, C::Movbe_r64_m64], &[GV, M]);
    let movbe_store = v3([C::Movbe_m16_r16, C::Movbe_m32_r32, C::Movbe_m64_r64], &[M, GV]);
    m[0xf0] = mp(
        movbe_load.clone(),
        movbe_load,
        inv(),
        sz(Sizing::W, &[C::Crc32_r32_rm8, C::Crc32_r64_rm8], &[GV, EB]),
    );
    m[0xf1] = mp(
        movbe_store.clone(),
        movbe_store,
        inv(),
        w(
            sz(Sizing::Op1632, &[C::Crc32_r32_rm16, C::Crc32_r32_rm32], &[GD, EV]),
            fx(C::Crc32_r64_rm64, &[GQ, EQ]),
        ),
    );
    m[0xf6] = mp(
        inv(),
        sz(Sizing::W, &[C::Adcx_r32_rm32, C::Adcx_r64_rm64], &[GV, EV]),
        sz(Sizing::W, &[C::Adox_r32_rm32, C::Adox_r64_rm64], &[GV, EV]),
        inv(),
    );
    m[0xf8] = mp(
        inv(),
        sz(Sizing::AddrSize, &[C::Movdir64b_r16_m512, C::Movdir64b_r32_m512, C::Movdir64b_r64_m512], &[GV, M]),
        inv(),
        inv(),
    );
    m[0xf9] = mp(
        sz(Sizing::W, &[C::Movdiri_m32_r32, C::Movdiri_m64_r64], &[M, GV]),
        inv(),
        inv(),
        inv(),
    );

    m
}

fn p66_node(h: Node) -> Node {
    mp(inv(), h, inv(), inv())
}

fn map0f3a() -> Vec<Node> {
    let mut m = blank();

    let sse41 = [
        (0x08, C::Roundps_xmm_xmmm128_imm8),
        (0x09, C::Roundpd_xmm_xmmm128_imm8),
        (0x0a, C::Roundss_xmm_xmmm32_imm8),
        (0x0b, C::Roundsd_xmm_xmmm64_imm8),
        (0x0c, C::Blendps_xmm_xmmm128_imm8),
        (0x0d, C::Blendpd_xmm_xmmm128_imm8),
        (0x0e, C::Pblendw_xmm_xmmm128_imm8),
        (0x21, C::Insertps_xmm_xmmm32_imm8),
        (0x40, C::Dpps_xmm_xmmm128_imm8),
        (0x41, C::Dppd_xmm_xmmm128_imm8),
        (0x42, C::Mpsadbw_xmm_xmmm128_imm8),
        (0x44, C::Pclmulqdq_xmm_xmmm128_imm8),
        (0x62, C::Pcmpistrm_xmm_xmmm128_imm8),
        (0x63, C::Pcmpistri_xmm_xmmm128_imm8),
        (0xdf, C::Aeskeygenassist_xmm_xmmm128_imm8),
    ];
    for &(op, code) in sse41.iter() {
        m[op] = p66(code, &[VX, WX, IB]);
    }
    m[0x60] = p66_node(
        sz(Sizing::W, &[C::Pcmpestrm_xmm_xmmm128_imm8, C::Pcmpestrm64_xmm_xmmm128_imm8], &[VX, WX, IB]).into(),
    );
    m[0x61] = p66_node(
        sz(Sizing::W, &[C::Pcmpestri_xmm_xmmm128_imm8, C::Pcmpestri64_xmm_xmmm128_imm8], &[VX, WX, IB]).into(),
    );
    m[0x0f] = mp(
        fx(C::Palignr_mm_mmm64_imm8, &[PQ, QQ, IB]),
        fx(C::Palignr_xmm_xmmm128_imm8, &[VX, WX, IB]),
        inv(),
        inv(),
    );
    m[0x14] = p66(C::Pextrb_r32m8_xmm_imm8, &[ED, VX, IB]);
    m[0x15] = p66(C::Pextrw_r32m16_xmm_imm8, &[ED, VX, IB]);
    m[0x16] = p66_node(sz(Sizing::W, &[C::Pextrd_rm32_xmm_imm8, C::Pextrq_rm64_xmm_imm8], &[EV, VX, IB]).into());
    m[0x17] = p66(C::Extractps_rm32_xmm_imm8, &[ED, VX, IB]);
    m[0x20] = p66(C::Pinsrb_xmm_r32m8_imm8, &[VX, ED, IB]);
    m[0x22] = p66_node(sz(Sizing::W, &[C::Pinsrd_xmm_rm32_imm8, C::Pinsrq_xmm_rm64_imm8], &[VX, EV, IB]).into());
    m[0xcc] = mp(fx(C::Sha1rnds4_xmm_xmmm128_imm8, &[VX, WX, IB]), inv(), inv(), inv());

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_de::kinds::Family;
    use crate::table_de::TableDeserializer;

    #[test]
    fn legacy_blob_reads_back() {
        let mut w = TableWriter::new();
        let roots = write(&mut w).unwrap();
        let blob = w.finish();
        // 0F, 0F38 and 0F3A are reached through the escape entries of the one-byte map
        assert_eq!(roots.len(), 1);
        let records = TableDeserializer::new(Family::Legacy, &blob).read_all().unwrap();
        for &id in &roots {
            assert_eq!(records.table(id).unwrap().len(), 256);
        }
    }

    #[test]
    fn alu_rows_are_complete() {
        let m = map0(0);
        for &op in &[0x00usize, 0x08, 0x10, 0x18, 0x20, 0x28, 0x30, 0x38] {
            for i in 0..6 {
                assert!(matches!(m[op + i], Node::Terminal(_)), "{:#x}", op + i);
            }
        }
    }
}
