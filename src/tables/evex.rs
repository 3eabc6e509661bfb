//! EVEX encoded instructions: AVX-512 in maps 0F, 0F38 and 0F3A, AVX512-FP16 in maps 5 and 6.

use crate::code::Code as C;
use crate::common::TupleType::{self, *};
use crate::error::TableError;
use crate::handlers::{Operand, RegWidth, TermFlags, VecClass};
use crate::table_de::writer::{Node, TableWriter};

use super::ops::*;

const NONE: TermFlags = TermFlags::empty();
const BR: TermFlags = TermFlags::BROADCAST;
const ER: TermFlags = TermFlags::ROUNDING;
const SAE: TermFlags = TermFlags::SAE;
const BER: TermFlags = TermFlags::BROADCAST.union(TermFlags::ROUNDING);
const BSAE: TermFlags = TermFlags::BROADCAST.union(TermFlags::SAE);
/// Opmask destination: merge masking only.
const KDST: TermFlags = TermFlags::NO_ZEROING;
const KDST_BR: TermFlags = TermFlags::NO_ZEROING.union(TermFlags::BROADCAST);
const NOMASK: TermFlags = TermFlags::NO_OPMASK.union(TermFlags::NO_ZEROING);
const GATHER: TermFlags = TermFlags::REQUIRE_OPMASK
    .union(TermFlags::NO_ZEROING)
    .union(TermFlags::GATHER);
const SCATTER: TermFlags = TermFlags::REQUIRE_OPMASK;
const PREFETCH: TermFlags = TermFlags::REQUIRE_OPMASK.union(TermFlags::NO_ZEROING);

/// Half width source with 32-bit element broadcast.
const HALF: [TupleType; 3] = [N8b4, N16b4, N32b4];

const RQ: Operand = Operand::GprRm(RegWidth::Q64);
const VSX: Operand = Operand::Vsib(VecClass::Xmm);
const VSY: Operand = Operand::Vsib(VecClass::Ymm);
const VSZ: Operand = Operand::Vsib(VecClass::Zmm);

/// Writes the EVEX maps. Roots: 0F, 0F38, 0F3A, map 5, map 6.
pub(super) fn write(w: &mut TableWriter) -> Result<Vec<u32>, TableError> {
    let map0f = w.array(&map0f())?;
    let map0f38 = w.array(&map0f38())?;
    let map0f3a = w.array(&map0f3a())?;
    let map5 = w.array(&map5())?;
    let map6 = w.array(&map6())?;

    Ok(vec![map0f, map0f38, map0f3a, map5, map6])
}

fn w0(h: impl Into<Node>) -> Node {
    w(h, inv())
}

fn w1(h: impl Into<Node>) -> Node {
    w(inv(), h)
}

fn p66e(h: impl Into<Node>) -> Node {
    mp(inv(), h, inv(), inv())
}

/// One form per vector length with its own operands. `None` lengths are invalid.
fn evl(
    codes: [Option<C>; 3],
    ops: [&[Operand]; 3],
    flags: TermFlags,
    tuples: [TupleType; 3],
) -> Node {
    let form = |l: usize| -> Node {
        match codes[l] {
            Some(code) => fx(code, ops[l]).with_flags(flags).with_tuple(tuples[l]).into(),
            None => inv(),
        }
    };
    if flags.intersects(ER | SAE) {
        vl_er(form(0), form(1), form(2))
    } else {
        vl(form(0), form(1), form(2))
    }
}

/// 256 and 512-bit forms only.
fn ev12(c256: C, c512: C, ops: &[Operand], flags: TermFlags, tuples: [TupleType; 3]) -> Node {
    let y = widen(ops, VecClass::Ymm);
    let z = widen(ops, VecClass::Zmm);
    evl([None, Some(c256), Some(c512)], [ops, y.as_slice(), z.as_slice()], flags, tuples)
}

fn scalar(code: C, ops: &[Operand], flags: TermFlags, tuple: TupleType) -> Node {
    evex_scalar(code, ops, flags, tuple)
}

/// Packed single/double and scalar single/double forms of an arithmetic op.
fn farith(ps: [C; 3], pd: [C; 3], ss: C, sd: C, packed: TermFlags, scal: TermFlags) -> Node {
    let ops = [VX, HX, WX];
    mp(
        w0(evex3(ps, &ops, packed, FV32)),
        w1(evex3(pd, &ops, packed, FV64)),
        w0(scalar(ss, &ops, scal, N4)),
        w1(scalar(sd, &ops, scal, N8)),
    )
}

/// Packed single (NP W0) and double (66 W1).
fn fpacked(ps: [C; 3], pd: [C; 3], ops: &[Operand], flags: TermFlags) -> Node {
    mp(
        w0(evex3(ps, ops, flags, FV32)),
        w1(evex3(pd, ops, flags, FV64)),
        inv(),
        inv(),
    )
}

fn p66f3(p66: impl Into<Node>, pf3: impl Into<Node>) -> Node {
    mp(inv(), p66, pf3, inv())
}

/// Dword (W0) and qword (W1) element forms.
fn dq(d: [C; 3], q: [C; 3], ops: &[Operand], flags: TermFlags) -> Node {
    w(evex3(d, ops, flags, FV32), evex3(q, ops, flags, FV64))
}

/// 66 prefixed dword (W0) and qword (W1) element forms.
fn idq(d: [C; 3], q: [C; 3], ops: &[Operand], flags: TermFlags) -> Node {
    p66e(dq(d, q, ops, flags))
}

/// Byte (W0) and word (W1) element forms.
fn bw_pair(b: [C; 3], wd: [C; 3], ops: &[Operand], flags: TermFlags) -> Node {
    w(evex3(b, ops, flags, FVM), evex3(wd, ops, flags, FVM))
}

/// Packed 64-bit elements into 32-bit elements: the destination is half as wide.
fn cvt_narrow(c: [C; 3], flags: TermFlags) -> Node {
    evl([Some(c[0]), Some(c[1]), Some(c[2])], [&[VX, WX], &[VX, WY], &[VY, WZ]], flags, FV64)
}

/// Packed 32-bit elements into 64-bit elements: the source is half as wide.
fn cvt_widen(c: [C; 3], flags: TermFlags) -> Node {
    evl([Some(c[0]), Some(c[1]), Some(c[2])], [&[VX, WX], &[VY, WX], &[VZ, WY]], flags, HALF)
}

/// 512-bit form only.
fn ev2(code: C, ops: &[Operand], flags: TermFlags, tuples: [TupleType; 3]) -> Node {
    let z = widen(ops, VecClass::Zmm);
    evl([None, None, Some(code)], [&[], &[], z.as_slice()], flags, tuples)
}

/// Down-conversion stores: the destination is half, a quarter or an eighth of the source.
fn down(c: [C; 3], tuples: [TupleType; 3]) -> Node {
    let zdst = if tuples[2] == N32 { WY } else { WX };
    w0(evl([Some(c[0]), Some(c[1]), Some(c[2])], [&[WX, VX], &[WX, VY], &[zdst, VZ]], NONE, tuples))
}

/// Broadcast of a 128 or 256-bit memory block.
fn bcast_mem(c: [Option<C>; 3], tuple: TupleType) -> Node {
    evl(c, [&[VX, M], &[VY, M], &[VZ, M]], NONE, [tuple; 3])
}

/// Scalar single (W0) and double (W1) forms with 66.
fn sdq(ss: C, sd: C, ops: &[Operand], flags: TermFlags) -> Node {
    p66e(w(scalar(ss, ops, flags, N4), scalar(sd, ops, flags, N8)))
}

/// 66 prefixed byte/word element forms, W ignored.
fn ibw(c: [C; 3], ops: &[Operand]) -> Node {
    p66e(evex3(c, ops, NONE, FVM))
}

/// 32-bit GPR form, and the 64-bit form with W1 in 64-bit mode.
fn gpr_w(c32: Node, c64: Node) -> Node {
    let legacy = c32.clone();
    w(c32, bits_modrm(legacy, c64))
}

fn map0f() -> Vec<Node> {
    let mut m = blank();

    m[0x10] = mp(
        w0(evex3(
            [C::EVEX_Vmovups_xmm_k1z_xmmm128, C::EVEX_Vmovups_ymm_k1z_ymmm256, C::EVEX_Vmovups_zmm_k1z_zmmm512],
            &[VX, WX],
            NONE,
            FVM,
        )),
        w1(evex3(
            [C::EVEX_Vmovupd_xmm_k1z_xmmm128, C::EVEX_Vmovupd_ymm_k1z_ymmm256, C::EVEX_Vmovupd_zmm_k1z_zmmm512],
            &[VX, WX],
            NONE,
            FVM,
        )),
        w0(rm(
            scalar(C::EVEX_Vmovss_xmm_k1z_xmm_xmm, &[VX, HX, UX], NONE, N4),
            scalar(C::EVEX_Vmovss_xmm_k1z_m32, &[VX, M], NONE, N4),
        )),
        w1(rm(
            scalar(C::EVEX_Vmovsd_xmm_k1z_xmm_xmm, &[VX, HX, UX], NONE, N8),
            scalar(C::EVEX_Vmovsd_xmm_k1z_m64, &[VX, M], NONE, N8),
        )),
    );
    m[0x11] = mp(
        w0(evex3(
            [C::EVEX_Vmovups_xmmm128_k1z_xmm, C::EVEX_Vmovups_ymmm256_k1z_ymm, C::EVEX_Vmovups_zmmm512_k1z_zmm],
            &[WX, VX],
            NONE,
            FVM,
        )),
        w1(evex3(
            [C::EVEX_Vmovupd_xmmm128_k1z_xmm, C::EVEX_Vmovupd_ymmm256_k1z_ymm, C::EVEX_Vmovupd_zmmm512_k1z_zmm],
            &[WX, VX],
            NONE,
            FVM,
        )),
        w0(rm(
            scalar(C::EVEX_Vmovss_xmm_k1z_xmm_xmm_0F11, &[UX, HX, VX], NONE, N4),
            scalar(C::EVEX_Vmovss_m32_k1_xmm, &[M, VX], NONE, N4),
        )),
        w1(rm(
            scalar(C::EVEX_Vmovsd_xmm_k1z_xmm_xmm_0F11, &[UX, HX, VX], NONE, N8),
            scalar(C::EVEX_Vmovsd_m64_k1_xmm, &[M, VX], NONE, N8),
        )),
    );
    m[0x12] = mp(
        w0(l0(rm(
            scalar(C::EVEX_Vmovhlps_xmm_xmm_xmm, &[VX, HX, UX], NOMASK, N8),
            scalar(C::EVEX_Vmovlps_xmm_xmm_m64, &[VX, HX, M], NOMASK, N8),
        ))),
        w1(l0(scalar(C::EVEX_Vmovlpd_xmm_xmm_m64, &[VX, HX, M], NOMASK, N8))),
        w0(evex3(
            [C::EVEX_Vmovsldup_xmm_k1z_xmmm128, C::EVEX_Vmovsldup_ymm_k1z_ymmm256, C::EVEX_Vmovsldup_zmm_k1z_zmmm512],
            &[VX, WX],
            NONE,
            FVM,
        )),
        w1(evl(
            [
                Some(C::EVEX_Vmovddup_xmm_k1z_xmmm64),
                Some(C::EVEX_Vmovddup_ymm_k1z_ymmm256),
                Some(C::EVEX_Vmovddup_zmm_k1z_zmmm512),
            ],
            [&[VX, WX], &[VY, WY], &[VZ, WZ]],
            NONE,
            [N8, N32, N64],
        )),
    );
    m[0x13] = mp(
        w0(l0(scalar(C::EVEX_Vmovlps_m64_xmm, &[M, VX], NOMASK, N8))),
        w1(l0(scalar(C::EVEX_Vmovlpd_m64_xmm, &[M, VX], NOMASK, N8))),
        inv(),
        inv(),
    );
    m[0x14] = fpacked(
        [C::EVEX_Vunpcklps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vunpcklps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vunpcklps_zmm_k1z_zmm_zmmm512b32],
        [C::EVEX_Vunpcklpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vunpcklpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vunpcklpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
    );
    m[0x15] = fpacked(
        [C::EVEX_Vunpckhps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vunpckhps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vunpckhps_zmm_k1z_zmm_zmmm512b32],
        [C::EVEX_Vunpckhpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vunpckhpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vunpckhpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
    );
    m[0x16] = mp(
        w0(l0(rm(
            scalar(C::EVEX_Vmovlhps_xmm_xmm_xmm, &[VX, HX, UX], NOMASK, N8),
            scalar(C::EVEX_Vmovhps_xmm_xmm_m64, &[VX, HX, M], NOMASK, N8),
        ))),
        w1(l0(scalar(C::EVEX_Vmovhpd_xmm_xmm_m64, &[VX, HX, M], NOMASK, N8))),
        w0(evex3(
            [C::EVEX_Vmovshdup_xmm_k1z_xmmm128, C::EVEX_Vmovshdup_ymm_k1z_ymmm256, C::EVEX_Vmovshdup_zmm_k1z_zmmm512],
            &[VX, WX],
            NONE,
            FVM,
        )),
        inv(),
    );
    m[0x17] = mp(
        w0(l0(scalar(C::EVEX_Vmovhps_m64_xmm, &[M, VX], NOMASK, N8))),
        w1(l0(scalar(C::EVEX_Vmovhpd_m64_xmm, &[M, VX], NOMASK, N8))),
        inv(),
        inv(),
    );
    m[0x28] = mp(
        w0(evex3(
            [C::EVEX_Vmovaps_xmm_k1z_xmmm128, C::EVEX_Vmovaps_ymm_k1z_ymmm256, C::EVEX_Vmovaps_zmm_k1z_zmmm512],
            &[VX, WX],
            NONE,
            FVM,
        )),
        w1(evex3(
            [C::EVEX_Vmovapd_xmm_k1z_xmmm128, C::EVEX_Vmovapd_ymm_k1z_ymmm256, C::EVEX_Vmovapd_zmm_k1z_zmmm512],
            &[VX, WX],
            NONE,
            FVM,
        )),
        inv(),
        inv(),
    );
    m[0x29] = mp(
        w0(evex3(
            [C::EVEX_Vmovaps_xmmm128_k1z_xmm, C::EVEX_Vmovaps_ymmm256_k1z_ymm, C::EVEX_Vmovaps_zmmm512_k1z_zmm],
            &[WX, VX],
            NONE,
            FVM,
        )),
        w1(evex3(
            [C::EVEX_Vmovapd_xmmm128_k1z_xmm, C::EVEX_Vmovapd_ymmm256_k1z_ymm, C::EVEX_Vmovapd_zmmm512_k1z_zmm],
            &[WX, VX],
            NONE,
            FVM,
        )),
        inv(),
        inv(),
    );
    m[0x2a] = mp(
        inv(),
        inv(),
        gpr_w(
            scalar(C::EVEX_Vcvtsi2ss_xmm_xmm_rm32_er, &[VX, HX, ED], ER | NOMASK, N4),
            scalar(C::EVEX_Vcvtsi2ss_xmm_xmm_rm64_er, &[VX, HX, EQ], ER | NOMASK, N8),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvtsi2sd_xmm_xmm_rm32, &[VX, HX, ED], NOMASK, N4),
            scalar(C::EVEX_Vcvtsi2sd_xmm_xmm_rm64_er, &[VX, HX, EQ], ER | NOMASK, N8),
        ),
    );
    m[0x2b] = fpacked(
        [C::EVEX_Vmovntps_m128_xmm, C::EVEX_Vmovntps_m256_ymm, C::EVEX_Vmovntps_m512_zmm],
        [C::EVEX_Vmovntpd_m128_xmm, C::EVEX_Vmovntpd_m256_ymm, C::EVEX_Vmovntpd_m512_zmm],
        &[M, VX],
        NOMASK,
    );
    m[0x2c] = mp(
        inv(),
        inv(),
        gpr_w(
            scalar(C::EVEX_Vcvttss2si_r32_xmmm32_sae, &[GD, WX], SAE | NOMASK, N4),
            scalar(C::EVEX_Vcvttss2si_r64_xmmm32_sae, &[GQ, WX], SAE | NOMASK, N4),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvttsd2si_r32_xmmm64_sae, &[GD, WX], SAE | NOMASK, N8),
            scalar(C::EVEX_Vcvttsd2si_r64_xmmm64_sae, &[GQ, WX], SAE | NOMASK, N8),
        ),
    );
    m[0x2d] = mp(
        inv(),
        inv(),
        gpr_w(
            scalar(C::EVEX_Vcvtss2si_r32_xmmm32_er, &[GD, WX], ER | NOMASK, N4),
            scalar(C::EVEX_Vcvtss2si_r64_xmmm32_er, &[GQ, WX], ER | NOMASK, N4),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvtsd2si_r32_xmmm64_er, &[GD, WX], ER | NOMASK, N8),
            scalar(C::EVEX_Vcvtsd2si_r64_xmmm64_er, &[GQ, WX], ER | NOMASK, N8),
        ),
    );
    m[0x2e] = mp(
        w0(scalar(C::EVEX_Vucomiss_xmm_xmmm32_sae, &[VX, WX], SAE | NOMASK, N4)),
        w1(scalar(C::EVEX_Vucomisd_xmm_xmmm64_sae, &[VX, WX], SAE | NOMASK, N8)),
        inv(),
        inv(),
    );
    m[0x2f] = mp(
        w0(scalar(C::EVEX_Vcomiss_xmm_xmmm32_sae, &[VX, WX], SAE | NOMASK, N4)),
        w1(scalar(C::EVEX_Vcomisd_xmm_xmmm64_sae, &[VX, WX], SAE | NOMASK, N8)),
        inv(),
        inv(),
    );

    m[0x51] = mp(
        w0(evex3(
            [C::EVEX_Vsqrtps_xmm_k1z_xmmm128b32, C::EVEX_Vsqrtps_ymm_k1z_ymmm256b32, C::EVEX_Vsqrtps_zmm_k1z_zmmm512b32_er],
            &[VX, WX],
            BER,
            FV32,
        )),
        w1(evex3(
            [C::EVEX_Vsqrtpd_xmm_k1z_xmmm128b64, C::EVEX_Vsqrtpd_ymm_k1z_ymmm256b64, C::EVEX_Vsqrtpd_zmm_k1z_zmmm512b64_er],
            &[VX, WX],
            BER,
            FV64,
        )),
        w0(scalar(C::EVEX_Vsqrtss_xmm_k1z_xmm_xmmm32_er, &[VX, HX, WX], ER, N4)),
        w1(scalar(C::EVEX_Vsqrtsd_xmm_k1z_xmm_xmmm64_er, &[VX, HX, WX], ER, N8)),
    );
    m[0x54] = fpacked(
        [C::EVEX_Vandps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vandps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vandps_zmm_k1z_zmm_zmmm512b32],
        [C::EVEX_Vandpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vandpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vandpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
    );
    m[0x55] = fpacked(
        [C::EVEX_Vandnps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vandnps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vandnps_zmm_k1z_zmm_zmmm512b32],
        [C::EVEX_Vandnpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vandnpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vandnpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
    );
    m[0x56] = fpacked(
        [C::EVEX_Vorps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vorps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vorps_zmm_k1z_zmm_zmmm512b32],
        [C::EVEX_Vorpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vorpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vorpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
    );
    m[0x57] = fpacked(
        [C::EVEX_Vxorps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vxorps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vxorps_zmm_k1z_zmm_zmmm512b32],
        [C::EVEX_Vxorpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vxorpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vxorpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
    );
    m[0x58] = farith(
        [C::EVEX_Vaddps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vaddps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vaddps_zmm_k1z_zmm_zmmm512b32_er],
        [C::EVEX_Vaddpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vaddpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vaddpd_zmm_k1z_zmm_zmmm512b64_er],
        C::EVEX_Vaddss_xmm_k1z_xmm_xmmm32_er,
        C::EVEX_Vaddsd_xmm_k1z_xmm_xmmm64_er,
        BER,
        ER,
    );
    m[0x59] = farith(
        [C::EVEX_Vmulps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vmulps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vmulps_zmm_k1z_zmm_zmmm512b32_er],
        [C::EVEX_Vmulpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vmulpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vmulpd_zmm_k1z_zmm_zmmm512b64_er],
        C::EVEX_Vmulss_xmm_k1z_xmm_xmmm32_er,
        C::EVEX_Vmulsd_xmm_k1z_xmm_xmmm64_er,
        BER,
        ER,
    );
    m[0x5a] = mp(
        w0(evl(
            [
                Some(C::EVEX_Vcvtps2pd_xmm_k1z_xmmm64b32),
                Some(C::EVEX_Vcvtps2pd_ymm_k1z_xmmm128b32),
                Some(C::EVEX_Vcvtps2pd_zmm_k1z_ymmm256b32_sae),
            ],
            [&[VX, WX], &[VY, WX], &[VZ, WY]],
            BSAE,
            [N8b4, N16b4, N32b4],
        )),
        w1(evl(
            [
                Some(C::EVEX_Vcvtpd2ps_xmm_k1z_xmmm128b64),
                Some(C::EVEX_Vcvtpd2ps_xmm_k1z_ymmm256b64),
                Some(C::EVEX_Vcvtpd2ps_ymm_k1z_zmmm512b64_er),
            ],
            [&[VX, WX], &[VX, WY], &[VY, WZ]],
            BER,
            [N16b8, N32b8, N64b8],
        )),
        w0(scalar(C::EVEX_Vcvtss2sd_xmm_k1z_xmm_xmmm32_sae, &[VX, HX, WX], SAE, N4)),
        w1(scalar(C::EVEX_Vcvtsd2ss_xmm_k1z_xmm_xmmm64_er, &[VX, HX, WX], ER, N8)),
    );
    m[0x5b] = mp(
        w(
            evex3(
                [C::EVEX_Vcvtdq2ps_xmm_k1z_xmmm128b32, C::EVEX_Vcvtdq2ps_ymm_k1z_ymmm256b32, C::EVEX_Vcvtdq2ps_zmm_k1z_zmmm512b32_er],
                &[VX, WX],
                BER,
                FV32,
            ),
            cvt_narrow(
                [C::EVEX_Vcvtqq2ps_xmm_k1z_xmmm128b64, C::EVEX_Vcvtqq2ps_xmm_k1z_ymmm256b64, C::EVEX_Vcvtqq2ps_ymm_k1z_zmmm512b64_er],
                BER,
            ),
        ),
        w0(evex3(
            [C::EVEX_Vcvtps2dq_xmm_k1z_xmmm128b32, C::EVEX_Vcvtps2dq_ymm_k1z_ymmm256b32, C::EVEX_Vcvtps2dq_zmm_k1z_zmmm512b32_er],
            &[VX, WX],
            BER,
            FV32,
        )),
        w0(evex3(
            [C::EVEX_Vcvttps2dq_xmm_k1z_xmmm128b32, C::EVEX_Vcvttps2dq_ymm_k1z_ymmm256b32, C::EVEX_Vcvttps2dq_zmm_k1z_zmmm512b32_sae],
            &[VX, WX],
            BSAE,
            FV32,
        )),
        inv(),
    );
    m[0x5c] = farith(
        [C::EVEX_Vsubps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vsubps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vsubps_zmm_k1z_zmm_zmmm512b32_er],
        [C::EVEX_Vsubpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vsubpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vsubpd_zmm_k1z_zmm_zmmm512b64_er],
        C::EVEX_Vsubss_xmm_k1z_xmm_xmmm32_er,
        C::EVEX_Vsubsd_xmm_k1z_xmm_xmmm64_er,
        BER,
        ER,
    );
    m[0x5d] = farith(
        [C::EVEX_Vminps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vminps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vminps_zmm_k1z_zmm_zmmm512b32_sae],
        [C::EVEX_Vminpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vminpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vminpd_zmm_k1z_zmm_zmmm512b64_sae],
        C::EVEX_Vminss_xmm_k1z_xmm_xmmm32_sae,
        C::EVEX_Vminsd_xmm_k1z_xmm_xmmm64_sae,
        BSAE,
        SAE,
    );
    m[0x5e] = farith(
        [C::EVEX_Vdivps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vdivps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vdivps_zmm_k1z_zmm_zmmm512b32_er],
        [C::EVEX_Vdivpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vdivpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vdivpd_zmm_k1z_zmm_zmmm512b64_er],
        C::EVEX_Vdivss_xmm_k1z_xmm_xmmm32_er,
        C::EVEX_Vdivsd_xmm_k1z_xmm_xmmm64_er,
        BER,
        ER,
    );
    m[0x5f] = farith(
        [C::EVEX_Vmaxps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vmaxps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vmaxps_zmm_k1z_zmm_zmmm512b32_sae],
        [C::EVEX_Vmaxpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vmaxpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vmaxpd_zmm_k1z_zmm_zmmm512b64_sae],
        C::EVEX_Vmaxss_xmm_k1z_xmm_xmmm32_sae,
        C::EVEX_Vmaxsd_xmm_k1z_xmm_xmmm64_sae,
        BSAE,
        SAE,
    );

    // Byte and word element ops ignore W.
    let bw = [
        (0x60, [C::EVEX_Vpunpcklbw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpunpcklbw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpunpcklbw_zmm_k1z_zmm_zmmm512]),
        (0x61, [C::EVEX_Vpunpcklwd_xmm_k1z_xmm_xmmm128, C::EVEX_Vpunpcklwd_ymm_k1z_ymm_ymmm256, C::EVEX_Vpunpcklwd_zmm_k1z_zmm_zmmm512]),
        (0x63, [C::EVEX_Vpacksswb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpacksswb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpacksswb_zmm_k1z_zmm_zmmm512]),
        (0x67, [C::EVEX_Vpackuswb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpackuswb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpackuswb_zmm_k1z_zmm_zmmm512]),
        (0x68, [C::EVEX_Vpunpckhbw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpunpckhbw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpunpckhbw_zmm_k1z_zmm_zmmm512]),
        (0x69, [C::EVEX_Vpunpckhwd_xmm_k1z_xmm_xmmm128, C::EVEX_Vpunpckhwd_ymm_k1z_ymm_ymmm256, C::EVEX_Vpunpckhwd_zmm_k1z_zmm_zmmm512]),
        (0xd5, [C::EVEX_Vpmullw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmullw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmullw_zmm_k1z_zmm_zmmm512]),
        (0xd8, [C::EVEX_Vpsubusb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsubusb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsubusb_zmm_k1z_zmm_zmmm512]),
        (0xd9, [C::EVEX_Vpsubusw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsubusw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsubusw_zmm_k1z_zmm_zmmm512]),
        (0xda, [C::EVEX_Vpminub_xmm_k1z_xmm_xmmm128, C::EVEX_Vpminub_ymm_k1z_ymm_ymmm256, C::EVEX_Vpminub_zmm_k1z_zmm_zmmm512]),
        (0xdc, [C::EVEX_Vpaddusb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpaddusb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpaddusb_zmm_k1z_zmm_zmmm512]),
        (0xdd, [C::EVEX_Vpaddusw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpaddusw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpaddusw_zmm_k1z_zmm_zmmm512]),
        (0xde, [C::EVEX_Vpmaxub_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmaxub_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmaxub_zmm_k1z_zmm_zmmm512]),
        (0xe0, [C::EVEX_Vpavgb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpavgb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpavgb_zmm_k1z_zmm_zmmm512]),
        (0xe3, [C::EVEX_Vpavgw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpavgw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpavgw_zmm_k1z_zmm_zmmm512]),
        (0xe4, [C::EVEX_Vpmulhuw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmulhuw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmulhuw_zmm_k1z_zmm_zmmm512]),
        (0xe5, [C::EVEX_Vpmulhw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmulhw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmulhw_zmm_k1z_zmm_zmmm512]),
        (0xe8, [C::EVEX_Vpsubsb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsubsb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsubsb_zmm_k1z_zmm_zmmm512]),
        (0xe9, [C::EVEX_Vpsubsw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsubsw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsubsw_zmm_k1z_zmm_zmmm512]),
        (0xea, [C::EVEX_Vpminsw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpminsw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpminsw_zmm_k1z_zmm_zmmm512]),
        (0xec, [C::EVEX_Vpaddsb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpaddsb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpaddsb_zmm_k1z_zmm_zmmm512]),
        (0xed, [C::EVEX_Vpaddsw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpaddsw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpaddsw_zmm_k1z_zmm_zmmm512]),
        (0xee, [C::EVEX_Vpmaxsw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmaxsw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmaxsw_zmm_k1z_zmm_zmmm512]),
        (0xf5, [C::EVEX_Vpmaddwd_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmaddwd_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmaddwd_zmm_k1z_zmm_zmmm512]),
        (0xf8, [C::EVEX_Vpsubb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsubb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsubb_zmm_k1z_zmm_zmmm512]),
        (0xf9, [C::EVEX_Vpsubw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsubw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsubw_zmm_k1z_zmm_zmmm512]),
        (0xfc, [C::EVEX_Vpaddb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpaddb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpaddb_zmm_k1z_zmm_zmmm512]),
        (0xfd, [C::EVEX_Vpaddw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpaddw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpaddw_zmm_k1z_zmm_zmmm512]),
    ];
    for &(op, c) in bw.iter() {
        m[op] = ibw(c, &[VX, HX, WX]);
    }

    let dword = [
        (0x62, [C::EVEX_Vpunpckldq_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpunpckldq_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpunpckldq_zmm_k1z_zmm_zmmm512b32]),
        (0x6a, [C::EVEX_Vpunpckhdq_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpunpckhdq_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpunpckhdq_zmm_k1z_zmm_zmmm512b32]),
        (0x6b, [C::EVEX_Vpackssdw_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpackssdw_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpackssdw_zmm_k1z_zmm_zmmm512b32]),
        (0xfa, [C::EVEX_Vpsubd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpsubd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpsubd_zmm_k1z_zmm_zmmm512b32]),
        (0xfe, [C::EVEX_Vpaddd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpaddd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpaddd_zmm_k1z_zmm_zmmm512b32]),
    ];
    for &(op, c) in dword.iter() {
        m[op] = p66e(w0(evex3(c, &[VX, HX, WX], BR, FV32)));
    }
    let qword = [
        (0x6c, [C::EVEX_Vpunpcklqdq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpunpcklqdq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpunpcklqdq_zmm_k1z_zmm_zmmm512b64]),
        (0x6d, [C::EVEX_Vpunpckhqdq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpunpckhqdq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpunpckhqdq_zmm_k1z_zmm_zmmm512b64]),
        (0xd4, [C::EVEX_Vpaddq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpaddq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpaddq_zmm_k1z_zmm_zmmm512b64]),
        (0xf4, [C::EVEX_Vpmuludq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmuludq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmuludq_zmm_k1z_zmm_zmmm512b64]),
        (0xfb, [C::EVEX_Vpsubq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpsubq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpsubq_zmm_k1z_zmm_zmmm512b64]),
    ];
    for &(op, c) in qword.iter() {
        m[op] = p66e(w1(evex3(c, &[VX, HX, WX], BR, FV64)));
    }
    let logic = [
        (0xdb, [C::EVEX_Vpandd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpandd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpandd_zmm_k1z_zmm_zmmm512b32],
               [C::EVEX_Vpandq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpandq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpandq_zmm_k1z_zmm_zmmm512b64]),
        (0xdf, [C::EVEX_Vpandnd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpandnd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpandnd_zmm_k1z_zmm_zmmm512b32],
               [C::EVEX_Vpandnq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpandnq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpandnq_zmm_k1z_zmm_zmmm512b64]),
        (0xeb, [C::EVEX_Vpord_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpord_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpord_zmm_k1z_zmm_zmmm512b32],
               [C::EVEX_Vporq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vporq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vporq_zmm_k1z_zmm_zmmm512b64]),
        (0xef, [C::EVEX_Vpxord_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpxord_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpxord_zmm_k1z_zmm_zmmm512b32],
               [C::EVEX_Vpxorq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpxorq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpxorq_zmm_k1z_zmm_zmmm512b64]),
    ];
    for &(op, d, q) in logic.iter() {
        m[op] = idq(d, q, &[VX, HX, WX], BR);
    }

    // Compares into an opmask register.
    let kcmp_bw = [
        (0x64, [C::EVEX_Vpcmpgtb_kr_k1_xmm_xmmm128, C::EVEX_Vpcmpgtb_kr_k1_ymm_ymmm256, C::EVEX_Vpcmpgtb_kr_k1_zmm_zmmm512]),
        (0x65, [C::EVEX_Vpcmpgtw_kr_k1_xmm_xmmm128, C::EVEX_Vpcmpgtw_kr_k1_ymm_ymmm256, C::EVEX_Vpcmpgtw_kr_k1_zmm_zmmm512]),
        (0x74, [C::EVEX_Vpcmpeqb_kr_k1_xmm_xmmm128, C::EVEX_Vpcmpeqb_kr_k1_ymm_ymmm256, C::EVEX_Vpcmpeqb_kr_k1_zmm_zmmm512]),
        (0x75, [C::EVEX_Vpcmpeqw_kr_k1_xmm_xmmm128, C::EVEX_Vpcmpeqw_kr_k1_ymm_ymmm256, C::EVEX_Vpcmpeqw_kr_k1_zmm_zmmm512]),
    ];
    for &(op, c) in kcmp_bw.iter() {
        m[op] = p66e(evex3(c, &[KG, HX, WX], KDST, FVM));
    }
    m[0x66] = p66e(w0(evex3(
        [C::EVEX_Vpcmpgtd_kr_k1_xmm_xmmm128b32, C::EVEX_Vpcmpgtd_kr_k1_ymm_ymmm256b32, C::EVEX_Vpcmpgtd_kr_k1_zmm_zmmm512b32],
        &[KG, HX, WX],
        KDST_BR,
        FV32,
    )));
    m[0x76] = p66e(w0(evex3(
        [C::EVEX_Vpcmpeqd_kr_k1_xmm_xmmm128b32, C::EVEX_Vpcmpeqd_kr_k1_ymm_ymmm256b32, C::EVEX_Vpcmpeqd_kr_k1_zmm_zmmm512b32],
        &[KG, HX, WX],
        KDST_BR,
        FV32,
    )));

    m[0x6e] = p66e(l0(gpr_w(
        scalar(C::EVEX_Vmovd_xmm_rm32, &[VX, ED], NOMASK, N4),
        scalar(C::EVEX_Vmovq_xmm_rm64, &[VX, EQ], NOMASK, N8),
    )));
    m[0x7e] = mp(
        inv(),
        l0(gpr_w(
            scalar(C::EVEX_Vmovd_rm32_xmm, &[ED, VX], NOMASK, N4),
            scalar(C::EVEX_Vmovq_rm64_xmm, &[EQ, VX], NOMASK, N8),
        )),
        w1(l0(scalar(C::EVEX_Vmovq_xmm_xmmm64, &[VX, WX], NOMASK, N8))),
        inv(),
    );
    m[0x6f] = mp(
        inv(),
        w(
            evex3(
                [C::EVEX_Vmovdqa32_xmm_k1z_xmmm128, C::EVEX_Vmovdqa32_ymm_k1z_ymmm256, C::EVEX_Vmovdqa32_zmm_k1z_zmmm512],
                &[VX, WX],
                NONE,
                FVM,
            ),
            evex3(
                [C::EVEX_Vmovdqa64_xmm_k1z_xmmm128, C::EVEX_Vmovdqa64_ymm_k1z_ymmm256, C::EVEX_Vmovdqa64_zmm_k1z_zmmm512],
                &[VX, WX],
                NONE,
                FVM,
            ),
        ),
        w(
            evex3(
                [C::EVEX_Vmovdqu32_xmm_k1z_xmmm128, C::EVEX_Vmovdqu32_ymm_k1z_ymmm256, C::EVEX_Vmovdqu32_zmm_k1z_zmmm512],
                &[VX, WX],
                NONE,
                FVM,
            ),
            evex3(
                [C::EVEX_Vmovdqu64_xmm_k1z_xmmm128, C::EVEX_Vmovdqu64_ymm_k1z_ymmm256, C::EVEX_Vmovdqu64_zmm_k1z_zmmm512],
                &[VX, WX],
                NONE,
                FVM,
            ),
        ),
        w(
            evex3(
                [C::EVEX_Vmovdqu8_xmm_k1z_xmmm128, C::EVEX_Vmovdqu8_ymm_k1z_ymmm256, C::EVEX_Vmovdqu8_zmm_k1z_zmmm512],
                &[VX, WX],
                NONE,
                FVM,
            ),
            evex3(
                [C::EVEX_Vmovdqu16_xmm_k1z_xmmm128, C::EVEX_Vmovdqu16_ymm_k1z_ymmm256, C::EVEX_Vmovdqu16_zmm_k1z_zmmm512],
                &[VX, WX],
                NONE,
                FVM,
            ),
        ),
    );
    m[0x7f] = mp(
        inv(),
        w(
            evex3(
                [C::EVEX_Vmovdqa32_xmmm128_k1z_xmm, C::EVEX_Vmovdqa32_ymmm256_k1z_ymm, C::EVEX_Vmovdqa32_zmmm512_k1z_zmm],
                &[WX, VX],
                NONE,
                FVM,
            ),
            evex3(
                [C::EVEX_Vmovdqa64_xmmm128_k1z_xmm, C::EVEX_Vmovdqa64_ymmm256_k1z_ymm, C::EVEX_Vmovdqa64_zmmm512_k1z_zmm],
                &[WX, VX],
                NONE,
                FVM,
            ),
        ),
        w(
            evex3(
                [C::EVEX_Vmovdqu32_xmmm128_k1z_xmm, C::EVEX_Vmovdqu32_ymmm256_k1z_ymm, C::EVEX_Vmovdqu32_zmmm512_k1z_zmm],
                &[WX, VX],
                NONE,
                FVM,
            ),
            evex3(
                [C::EVEX_Vmovdqu64_xmmm128_k1z_xmm, C::EVEX_Vmovdqu64_ymmm256_k1z_ymm, C::EVEX_Vmovdqu64_zmmm512_k1z_zmm],
                &[WX, VX],
                NONE,
                FVM,
            ),
        ),
        w(
            evex3(
                [C::EVEX_Vmovdqu8_xmmm128_k1z_xmm, C::EVEX_Vmovdqu8_ymmm256_k1z_ymm, C::EVEX_Vmovdqu8_zmmm512_k1z_zmm],
                &[WX, VX],
                NONE,
                FVM,
            ),
            evex3(
                [C::EVEX_Vmovdqu16_xmmm128_k1z_xmm, C::EVEX_Vmovdqu16_ymmm256_k1z_ymm, C::EVEX_Vmovdqu16_zmmm512_k1z_zmm],
                &[WX, VX],
                NONE,
                FVM,
            ),
        ),
    );
    m[0x70] = mp(
        inv(),
        w0(evex3(
            [C::EVEX_Vpshufd_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vpshufd_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vpshufd_zmm_k1z_zmmm512b32_imm8],
            &[VX, WX, IB],
            BR,
            FV32,
        )),
        evex3(
            [C::EVEX_Vpshufhw_xmm_k1z_xmmm128_imm8, C::EVEX_Vpshufhw_ymm_k1z_ymmm256_imm8, C::EVEX_Vpshufhw_zmm_k1z_zmmm512_imm8],
            &[VX, WX, IB],
            NONE,
            FVM,
        ),
        evex3(
            [C::EVEX_Vpshuflw_xmm_k1z_xmmm128_imm8, C::EVEX_Vpshuflw_ymm_k1z_ymmm256_imm8, C::EVEX_Vpshuflw_zmm_k1z_zmmm512_imm8],
            &[VX, WX, IB],
            NONE,
            FVM,
        ),
    );

    // Shifts by immediate. The destination is vvvv.
    let imm = [HX, WX, IB];
    m[0x71] = group(nodes![
        inv(),
        inv(),
        p66e(evex3(
            [C::EVEX_Vpsrlw_xmm_k1z_xmmm128_imm8, C::EVEX_Vpsrlw_ymm_k1z_ymmm256_imm8, C::EVEX_Vpsrlw_zmm_k1z_zmmm512_imm8],
            &imm, NONE, FVM,
        )),
        inv(),
        p66e(evex3(
            [C::EVEX_Vpsraw_xmm_k1z_xmmm128_imm8, C::EVEX_Vpsraw_ymm_k1z_ymmm256_imm8, C::EVEX_Vpsraw_zmm_k1z_zmmm512_imm8],
            &imm, NONE, FVM,
        )),
        inv(),
        p66e(evex3(
            [C::EVEX_Vpsllw_xmm_k1z_xmmm128_imm8, C::EVEX_Vpsllw_ymm_k1z_ymmm256_imm8, C::EVEX_Vpsllw_zmm_k1z_zmmm512_imm8],
            &imm, NONE, FVM,
        )),
        inv(),
    ]);
    m[0x72] = group(nodes![
        idq(
            [C::EVEX_Vprord_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vprord_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vprord_zmm_k1z_zmmm512b32_imm8],
            [C::EVEX_Vprorq_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vprorq_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vprorq_zmm_k1z_zmmm512b64_imm8],
            &imm, BR,
        ),
        idq(
            [C::EVEX_Vprold_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vprold_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vprold_zmm_k1z_zmmm512b32_imm8],
            [C::EVEX_Vprolq_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vprolq_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vprolq_zmm_k1z_zmmm512b64_imm8],
            &imm, BR,
        ),
        p66e(w0(evex3(
            [C::EVEX_Vpsrld_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vpsrld_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vpsrld_zmm_k1z_zmmm512b32_imm8],
            &imm, BR, FV32,
        ))),
        inv(),
        idq(
            [C::EVEX_Vpsrad_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vpsrad_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vpsrad_zmm_k1z_zmmm512b32_imm8],
            [C::EVEX_Vpsraq_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vpsraq_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vpsraq_zmm_k1z_zmmm512b64_imm8],
            &imm, BR,
        ),
        inv(),
        p66e(w0(evex3(
            [C::EVEX_Vpslld_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vpslld_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vpslld_zmm_k1z_zmmm512b32_imm8],
            &imm, BR, FV32,
        ))),
        inv(),
    ]);
    m[0x73] = group(nodes![
        inv(),
        inv(),
        p66e(w1(evex3(
            [C::EVEX_Vpsrlq_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vpsrlq_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vpsrlq_zmm_k1z_zmmm512b64_imm8],
            &imm, BR, FV64,
        ))),
        p66e(evex3(
            [C::EVEX_Vpsrldq_xmm_xmmm128_imm8, C::EVEX_Vpsrldq_ymm_ymmm256_imm8, C::EVEX_Vpsrldq_zmm_zmmm512_imm8],
            &imm, NOMASK, FVM,
        )),
        inv(),
        inv(),
        p66e(w1(evex3(
            [C::EVEX_Vpsllq_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vpsllq_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vpsllq_zmm_k1z_zmmm512b64_imm8],
            &imm, BR, FV64,
        ))),
        p66e(evex3(
            [C::EVEX_Vpslldq_xmm_xmmm128_imm8, C::EVEX_Vpslldq_ymm_ymmm256_imm8, C::EVEX_Vpslldq_zmm_zmmm512_imm8],
            &imm, NOMASK, FVM,
        )),
    ]);

    m[0x78] = mp(
        w(
            evex3(
                [C::EVEX_Vcvttps2udq_xmm_k1z_xmmm128b32, C::EVEX_Vcvttps2udq_ymm_k1z_ymmm256b32, C::EVEX_Vcvttps2udq_zmm_k1z_zmmm512b32_sae],
                &[VX, WX],
                BSAE,
                FV32,
            ),
            cvt_narrow(
                [C::EVEX_Vcvttpd2udq_xmm_k1z_xmmm128b64, C::EVEX_Vcvttpd2udq_xmm_k1z_ymmm256b64, C::EVEX_Vcvttpd2udq_ymm_k1z_zmmm512b64_sae],
                BSAE,
            ),
        ),
        w(
            cvt_widen(
                [C::EVEX_Vcvttps2uqq_xmm_k1z_xmmm64b32, C::EVEX_Vcvttps2uqq_ymm_k1z_xmmm128b32, C::EVEX_Vcvttps2uqq_zmm_k1z_ymmm256b32_sae],
                BSAE,
            ),
            evex3(
                [C::EVEX_Vcvttpd2uqq_xmm_k1z_xmmm128b64, C::EVEX_Vcvttpd2uqq_ymm_k1z_ymmm256b64, C::EVEX_Vcvttpd2uqq_zmm_k1z_zmmm512b64_sae],
                &[VX, WX],
                BSAE,
                FV64,
            ),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvttss2usi_r32_xmmm32_sae, &[GD, WX], SAE | NOMASK, N4),
            scalar(C::EVEX_Vcvttss2usi_r64_xmmm32_sae, &[GQ, WX], SAE | NOMASK, N4),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvttsd2usi_r32_xmmm64_sae, &[GD, WX], SAE | NOMASK, N8),
            scalar(C::EVEX_Vcvttsd2usi_r64_xmmm64_sae, &[GQ, WX], SAE | NOMASK, N8),
        ),
    );
    m[0x79] = mp(
        w(
            evex3(
                [C::EVEX_Vcvtps2udq_xmm_k1z_xmmm128b32, C::EVEX_Vcvtps2udq_ymm_k1z_ymmm256b32, C::EVEX_Vcvtps2udq_zmm_k1z_zmmm512b32_er],
                &[VX, WX],
                BER,
                FV32,
            ),
            cvt_narrow(
                [C::EVEX_Vcvtpd2udq_xmm_k1z_xmmm128b64, C::EVEX_Vcvtpd2udq_xmm_k1z_ymmm256b64, C::EVEX_Vcvtpd2udq_ymm_k1z_zmmm512b64_er],
                BER,
            ),
        ),
        w(
            cvt_widen(
                [C::EVEX_Vcvtps2uqq_xmm_k1z_xmmm64b32, C::EVEX_Vcvtps2uqq_ymm_k1z_xmmm128b32, C::EVEX_Vcvtps2uqq_zmm_k1z_ymmm256b32_er],
                BER,
            ),
            evex3(
                [C::EVEX_Vcvtpd2uqq_xmm_k1z_xmmm128b64, C::EVEX_Vcvtpd2uqq_ymm_k1z_ymmm256b64, C::EVEX_Vcvtpd2uqq_zmm_k1z_zmmm512b64_er],
                &[VX, WX],
                BER,
                FV64,
            ),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvtss2usi_r32_xmmm32_er, &[GD, WX], ER | NOMASK, N4),
            scalar(C::EVEX_Vcvtss2usi_r64_xmmm32_er, &[GQ, WX], ER | NOMASK, N4),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvtsd2usi_r32_xmmm64_er, &[GD, WX], ER | NOMASK, N8),
            scalar(C::EVEX_Vcvtsd2usi_r64_xmmm64_er, &[GQ, WX], ER | NOMASK, N8),
        ),
    );
    m[0x7a] = mp(
        inv(),
        w(
            cvt_widen(
                [C::EVEX_Vcvttps2qq_xmm_k1z_xmmm64b32, C::EVEX_Vcvttps2qq_ymm_k1z_xmmm128b32, C::EVEX_Vcvttps2qq_zmm_k1z_ymmm256b32_sae],
                BSAE,
            ),
            evex3(
                [C::EVEX_Vcvttpd2qq_xmm_k1z_xmmm128b64, C::EVEX_Vcvttpd2qq_ymm_k1z_ymmm256b64, C::EVEX_Vcvttpd2qq_zmm_k1z_zmmm512b64_sae],
                &[VX, WX],
                BSAE,
                FV64,
            ),
        ),
        w(
            cvt_widen(
                [C::EVEX_Vcvtudq2pd_xmm_k1z_xmmm64b32, C::EVEX_Vcvtudq2pd_ymm_k1z_xmmm128b32, C::EVEX_Vcvtudq2pd_zmm_k1z_ymmm256b32_er],
                BER,
            ),
            evex3(
                [C::EVEX_Vcvtuqq2pd_xmm_k1z_xmmm128b64, C::EVEX_Vcvtuqq2pd_ymm_k1z_ymmm256b64, C::EVEX_Vcvtuqq2pd_zmm_k1z_zmmm512b64_er],
                &[VX, WX],
                BER,
                FV64,
            ),
        ),
        w(
            evex3(
                [C::EVEX_Vcvtudq2ps_xmm_k1z_xmmm128b32, C::EVEX_Vcvtudq2ps_ymm_k1z_ymmm256b32, C::EVEX_Vcvtudq2ps_zmm_k1z_zmmm512b32_er],
                &[VX, WX],
                BER,
                FV32,
            ),
            cvt_narrow(
                [C::EVEX_Vcvtuqq2ps_xmm_k1z_xmmm128b64, C::EVEX_Vcvtuqq2ps_xmm_k1z_ymmm256b64, C::EVEX_Vcvtuqq2ps_ymm_k1z_zmmm512b64_er],
                BER,
            ),
        ),
    );
    m[0x7b] = mp(
        inv(),
        w(
            cvt_widen(
                [C::EVEX_Vcvtps2qq_xmm_k1z_xmmm64b32, C::EVEX_Vcvtps2qq_ymm_k1z_xmmm128b32, C::EVEX_Vcvtps2qq_zmm_k1z_ymmm256b32_er],
                BER,
            ),
            evex3(
                [C::EVEX_Vcvtpd2qq_xmm_k1z_xmmm128b64, C::EVEX_Vcvtpd2qq_ymm_k1z_ymmm256b64, C::EVEX_Vcvtpd2qq_zmm_k1z_zmmm512b64_er],
                &[VX, WX],
                BER,
                FV64,
            ),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvtusi2ss_xmm_xmm_rm32_er, &[VX, HX, ED], ER | NOMASK, N4),
            scalar(C::EVEX_Vcvtusi2ss_xmm_xmm_rm64_er, &[VX, HX, EQ], ER | NOMASK, N8),
        ),
        gpr_w(
            scalar(C::EVEX_Vcvtusi2sd_xmm_xmm_rm32, &[VX, HX, ED], NOMASK, N4),
            scalar(C::EVEX_Vcvtusi2sd_xmm_xmm_rm64_er, &[VX, HX, EQ], ER | NOMASK, N8),
        ),
    );
    m[0xc2] = mp(
        w0(evex3(
            [C::EVEX_Vcmpps_kr_k1_xmm_xmmm128b32_imm8, C::EVEX_Vcmpps_kr_k1_ymm_ymmm256b32_imm8, C::EVEX_Vcmpps_kr_k1_zmm_zmmm512b32_imm8_sae],
            &[KG, HX, WX, IB],
            BSAE | KDST,
            FV32,
        )),
        w1(evex3(
            [C::EVEX_Vcmppd_kr_k1_xmm_xmmm128b64_imm8, C::EVEX_Vcmppd_kr_k1_ymm_ymmm256b64_imm8, C::EVEX_Vcmppd_kr_k1_zmm_zmmm512b64_imm8_sae],
            &[KG, HX, WX, IB],
            BSAE | KDST,
            FV64,
        )),
        w0(scalar(C::EVEX_Vcmpss_kr_k1_xmm_xmmm32_imm8_sae, &[KG, HX, WX, IB], SAE | KDST, N4)),
        w1(scalar(C::EVEX_Vcmpsd_kr_k1_xmm_xmmm64_imm8_sae, &[KG, HX, WX, IB], SAE | KDST, N8)),
    );
    m[0xc6] = fpacked(
        [C::EVEX_Vshufps_xmm_k1z_xmm_xmmm128b32_imm8, C::EVEX_Vshufps_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Vshufps_zmm_k1z_zmm_zmmm512b32_imm8],
        [C::EVEX_Vshufpd_xmm_k1z_xmm_xmmm128b64_imm8, C::EVEX_Vshufpd_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Vshufpd_zmm_k1z_zmm_zmmm512b64_imm8],
        &[VX, HX, WX, IB],
        BR,
    );
    m[0xc4] = p66e(l0(scalar(C::EVEX_Vpinsrw_xmm_xmm_r32m16_imm8, &[VX, HX, ED, IB], NOMASK, N2)));
    m[0xc5] = p66e(l0(scalar(C::EVEX_Vpextrw_r32_xmm_imm8, &[GD, UX, IB], NOMASK, N2)));
    m[0xd6] = p66e(w1(l0(scalar(C::EVEX_Vmovq_xmmm64_xmm, &[WX, VX], NOMASK, N8))));

    // Shifts by the count in the low quadword of an XMM register or m128.
    let count = |c: [C; 3], flags: TermFlags| -> Node {
        evl(
            [Some(c[0]), Some(c[1]), Some(c[2])],
            [&[VX, HX, WX], &[VY, HY, WX], &[VZ, HZ, WX]],
            flags,
            [N16, N16, N16],
        )
    };
    m[0xd1] = p66e(count(
        [C::EVEX_Vpsrlw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsrlw_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsrlw_zmm_k1z_zmm_xmmm128],
        NONE,
    ));
    m[0xd2] = p66e(w0(count(
        [C::EVEX_Vpsrld_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsrld_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsrld_zmm_k1z_zmm_xmmm128],
        NONE,
    )));
    m[0xd3] = p66e(w1(count(
        [C::EVEX_Vpsrlq_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsrlq_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsrlq_zmm_k1z_zmm_xmmm128],
        NONE,
    )));
    m[0xe1] = p66e(count(
        [C::EVEX_Vpsraw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsraw_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsraw_zmm_k1z_zmm_xmmm128],
        NONE,
    ));
    m[0xe2] = p66e(w(
        count([C::EVEX_Vpsrad_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsrad_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsrad_zmm_k1z_zmm_xmmm128], NONE),
        count([C::EVEX_Vpsraq_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsraq_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsraq_zmm_k1z_zmm_xmmm128], NONE),
    ));
    m[0xf1] = p66e(count(
        [C::EVEX_Vpsllw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsllw_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsllw_zmm_k1z_zmm_xmmm128],
        NONE,
    ));
    m[0xf2] = p66e(w0(count(
        [C::EVEX_Vpslld_xmm_k1z_xmm_xmmm128, C::EVEX_Vpslld_ymm_k1z_ymm_xmmm128, C::EVEX_Vpslld_zmm_k1z_zmm_xmmm128],
        NONE,
    )));
    m[0xf3] = p66e(w1(count(
        [C::EVEX_Vpsllq_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsllq_ymm_k1z_ymm_xmmm128, C::EVEX_Vpsllq_zmm_k1z_zmm_xmmm128],
        NONE,
    )));

    m[0xe6] = mp(
        inv(),
        w1(evl(
            [
                Some(C::EVEX_Vcvttpd2dq_xmm_k1z_xmmm128b64),
                Some(C::EVEX_Vcvttpd2dq_xmm_k1z_ymmm256b64),
                Some(C::EVEX_Vcvttpd2dq_ymm_k1z_zmmm512b64_sae),
            ],
            [&[VX, WX], &[VX, WY], &[VY, WZ]],
            BSAE,
            FV64,
        )),
        w(
            cvt_widen(
                [C::EVEX_Vcvtdq2pd_xmm_k1z_xmmm64b32, C::EVEX_Vcvtdq2pd_ymm_k1z_xmmm128b32, C::EVEX_Vcvtdq2pd_zmm_k1z_ymmm256b32_er],
                BER,
            ),
            evex3(
                [C::EVEX_Vcvtqq2pd_xmm_k1z_xmmm128b64, C::EVEX_Vcvtqq2pd_ymm_k1z_ymmm256b64, C::EVEX_Vcvtqq2pd_zmm_k1z_zmmm512b64_er],
                &[VX, WX],
                BER,
                FV64,
            ),
        ),
        w1(evl(
            [
                Some(C::EVEX_Vcvtpd2dq_xmm_k1z_xmmm128b64),
                Some(C::EVEX_Vcvtpd2dq_xmm_k1z_ymmm256b64),
                Some(C::EVEX_Vcvtpd2dq_ymm_k1z_zmmm512b64_er),
            ],
            [&[VX, WX], &[VX, WY], &[VY, WZ]],
            BER,
            FV64,
        )),
    );
    m[0xe7] = p66e(w0(evex3(
        [C::EVEX_Vmovntdq_m128_xmm, C::EVEX_Vmovntdq_m256_ymm, C::EVEX_Vmovntdq_m512_zmm],
        &[M, VX],
        NOMASK,
        FVM,
    )));
    m[0xf6] = p66e(evex3(
        [C::EVEX_Vpsadbw_xmm_xmm_xmmm128, C::EVEX_Vpsadbw_ymm_ymm_ymmm256, C::EVEX_Vpsadbw_zmm_zmm_zmmm512],
        &[VX, HX, WX],
        NOMASK,
        FVM,
    ));

    m
}

fn map0f38() -> Vec<Node> {
    let mut m = blank();

    let bw = [
        (0x00, [C::EVEX_Vpshufb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpshufb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpshufb_zmm_k1z_zmm_zmmm512]),
        (0x04, [C::EVEX_Vpmaddubsw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmaddubsw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmaddubsw_zmm_k1z_zmm_zmmm512]),
        (0x0b, [C::EVEX_Vpmulhrsw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmulhrsw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmulhrsw_zmm_k1z_zmm_zmmm512]),
        (0x3c, [C::EVEX_Vpmaxsb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmaxsb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmaxsb_zmm_k1z_zmm_zmmm512]),
        (0x3e, [C::EVEX_Vpmaxuw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpmaxuw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpmaxuw_zmm_k1z_zmm_zmmm512]),
    ];
    for &(op, c) in bw.iter() {
        m[op] = ibw(c, &[VX, HX, WX]);
    }
    m[0x1c] = ibw(
        [C::EVEX_Vpabsb_xmm_k1z_xmmm128, C::EVEX_Vpabsb_ymm_k1z_ymmm256, C::EVEX_Vpabsb_zmm_k1z_zmmm512],
        &[VX, WX],
    );
    m[0x1d] = ibw(
        [C::EVEX_Vpabsw_xmm_k1z_xmmm128, C::EVEX_Vpabsw_ymm_k1z_ymmm256, C::EVEX_Vpabsw_zmm_k1z_zmmm512],
        &[VX, WX],
    );
    m[0x1e] = p66e(w0(evex3(
        [C::EVEX_Vpabsd_xmm_k1z_xmmm128b32, C::EVEX_Vpabsd_ymm_k1z_ymmm256b32, C::EVEX_Vpabsd_zmm_k1z_zmmm512b32],
        &[VX, WX],
        BR,
        FV32,
    )));
    m[0x1f] = p66e(w1(evex3(
        [C::EVEX_Vpabsq_xmm_k1z_xmmm128b64, C::EVEX_Vpabsq_ymm_k1z_ymmm256b64, C::EVEX_Vpabsq_zmm_k1z_zmmm512b64],
        &[VX, WX],
        BR,
        FV64,
    )));
    m[0x0c] = p66e(w0(evex3(
        [C::EVEX_Vpermilps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpermilps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermilps_zmm_k1z_zmm_zmmm512b32],
        &[VX, HX, WX],
        BR,
        FV32,
    )));
    m[0x0d] = p66e(w1(evex3(
        [C::EVEX_Vpermilpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpermilpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermilpd_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
        FV64,
    )));
    m[0x16] = p66e(w(
        ev12(C::EVEX_Vpermps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermps_zmm_k1z_zmm_zmmm512b32, &[VX, HX, WX], BR, FV32),
        ev12(C::EVEX_Vpermpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermpd_zmm_k1z_zmm_zmmm512b64, &[VX, HX, WX], BR, FV64),
    ));
    m[0x36] = p66e(w(
        ev12(C::EVEX_Vpermd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermd_zmm_k1z_zmm_zmmm512b32, &[VX, HX, WX], BR, FV32),
        ev12(C::EVEX_Vpermq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermq_zmm_k1z_zmm_zmmm512b64, &[VX, HX, WX], BR, FV64),
    ));
    m[0x18] = p66e(w0(evl(
        [
            Some(C::EVEX_Vbroadcastss_xmm_k1z_xmmm32),
            Some(C::EVEX_Vbroadcastss_ymm_k1z_xmmm32),
            Some(C::EVEX_Vbroadcastss_zmm_k1z_xmmm32),
        ],
        [&[VX, WX], &[VY, WX], &[VZ, WX]],
        NONE,
        [N4, N4, N4],
    )));
    m[0x19] = p66e(w(
        evl(
            [None, Some(C::EVEX_Vbroadcastf32x2_ymm_k1z_xmmm64), Some(C::EVEX_Vbroadcastf32x2_zmm_k1z_xmmm64)],
            [&[VX, WX], &[VY, WX], &[VZ, WX]],
            NONE,
            [N8, N8, N8],
        ),
        evl(
            [None, Some(C::EVEX_Vbroadcastsd_ymm_k1z_xmmm64), Some(C::EVEX_Vbroadcastsd_zmm_k1z_xmmm64)],
            [&[VX, WX], &[VY, WX], &[VZ, WX]],
            NONE,
            [N8, N8, N8],
        ),
    ));
    m[0x1a] = p66e(w(
        bcast_mem([None, Some(C::EVEX_Vbroadcastf32x4_ymm_k1z_m128), Some(C::EVEX_Vbroadcastf32x4_zmm_k1z_m128)], N16),
        bcast_mem([None, Some(C::EVEX_Vbroadcastf64x2_ymm_k1z_m128), Some(C::EVEX_Vbroadcastf64x2_zmm_k1z_m128)], N16),
    ));
    m[0x1b] = p66e(w(
        bcast_mem([None, None, Some(C::EVEX_Vbroadcastf32x8_zmm_k1z_m256)], N32),
        bcast_mem([None, None, Some(C::EVEX_Vbroadcastf64x4_zmm_k1z_m256)], N32),
    ));
    m[0x5a] = p66e(w(
        bcast_mem([None, Some(C::EVEX_Vbroadcasti32x4_ymm_k1z_m128), Some(C::EVEX_Vbroadcasti32x4_zmm_k1z_m128)], N16),
        bcast_mem([None, Some(C::EVEX_Vbroadcasti64x2_ymm_k1z_m128), Some(C::EVEX_Vbroadcasti64x2_zmm_k1z_m128)], N16),
    ));
    m[0x5b] = p66e(w(
        bcast_mem([None, None, Some(C::EVEX_Vbroadcasti32x8_zmm_k1z_m256)], N32),
        bcast_mem([None, None, Some(C::EVEX_Vbroadcasti64x4_zmm_k1z_m256)], N32),
    ));

    // Sign and zero extensions with 66, the matching down-conversions with F3.
    let half = [N8, N16, N32];
    let quarter = [N4, N8, N16];
    let eighth = [N2, N4, N8];
    let extend: [(usize, [C; 3], [C; 3], [TupleType; 3]); 12] = [
        (0x20,
         [C::EVEX_Vpmovsxbw_xmm_k1z_xmmm64, C::EVEX_Vpmovsxbw_ymm_k1z_xmmm128, C::EVEX_Vpmovsxbw_zmm_k1z_ymmm256],
         [C::EVEX_Vpmovswb_xmmm64_k1z_xmm, C::EVEX_Vpmovswb_xmmm128_k1z_ymm, C::EVEX_Vpmovswb_ymmm256_k1z_zmm],
         half),
        (0x21,
         [C::EVEX_Vpmovsxbd_xmm_k1z_xmmm32, C::EVEX_Vpmovsxbd_ymm_k1z_xmmm64, C::EVEX_Vpmovsxbd_zmm_k1z_xmmm128],
         [C::EVEX_Vpmovsdb_xmmm32_k1z_xmm, C::EVEX_Vpmovsdb_xmmm64_k1z_ymm, C::EVEX_Vpmovsdb_xmmm128_k1z_zmm],
         quarter),
        (0x22,
         [C::EVEX_Vpmovsxbq_xmm_k1z_xmmm16, C::EVEX_Vpmovsxbq_ymm_k1z_xmmm32, C::EVEX_Vpmovsxbq_zmm_k1z_xmmm64],
         [C::EVEX_Vpmovsqb_xmmm16_k1z_xmm, C::EVEX_Vpmovsqb_xmmm32_k1z_ymm, C::EVEX_Vpmovsqb_xmmm64_k1z_zmm],
         eighth),
        (0x23,
         [C::EVEX_Vpmovsxwd_xmm_k1z_xmmm64, C::EVEX_Vpmovsxwd_ymm_k1z_xmmm128, C::EVEX_Vpmovsxwd_zmm_k1z_ymmm256],
         [C::EVEX_Vpmovsdw_xmmm64_k1z_xmm, C::EVEX_Vpmovsdw_xmmm128_k1z_ymm, C::EVEX_Vpmovsdw_ymmm256_k1z_zmm],
         half),
        (0x24,
         [C::EVEX_Vpmovsxwq_xmm_k1z_xmmm32, C::EVEX_Vpmovsxwq_ymm_k1z_xmmm64, C::EVEX_Vpmovsxwq_zmm_k1z_xmmm128],
         [C::EVEX_Vpmovsqw_xmmm32_k1z_xmm, C::EVEX_Vpmovsqw_xmmm64_k1z_ymm, C::EVEX_Vpmovsqw_xmmm128_k1z_zmm],
         quarter),
        (0x25,
         [C::EVEX_Vpmovsxdq_xmm_k1z_xmmm64, C::EVEX_Vpmovsxdq_ymm_k1z_xmmm128, C::EVEX_Vpmovsxdq_zmm_k1z_ymmm256],
         [C::EVEX_Vpmovsqd_xmmm64_k1z_xmm, C::EVEX_Vpmovsqd_xmmm128_k1z_ymm, C::EVEX_Vpmovsqd_ymmm256_k1z_zmm],
         half),
        (0x30,
         [C::EVEX_Vpmovzxbw_xmm_k1z_xmmm64, C::EVEX_Vpmovzxbw_ymm_k1z_xmmm128, C::EVEX_Vpmovzxbw_zmm_k1z_ymmm256],
         [C::EVEX_Vpmovwb_xmmm64_k1z_xmm, C::EVEX_Vpmovwb_xmmm128_k1z_ymm, C::EVEX_Vpmovwb_ymmm256_k1z_zmm],
         half),
        (0x31,
         [C::EVEX_Vpmovzxbd_xmm_k1z_xmmm32, C::EVEX_Vpmovzxbd_ymm_k1z_xmmm64, C::EVEX_Vpmovzxbd_zmm_k1z_xmmm128],
         [C::EVEX_Vpmovdb_xmmm32_k1z_xmm, C::EVEX_Vpmovdb_xmmm64_k1z_ymm, C::EVEX_Vpmovdb_xmmm128_k1z_zmm],
         quarter),
        (0x32,
         [C::EVEX_Vpmovzxbq_xmm_k1z_xmmm16, C::EVEX_Vpmovzxbq_ymm_k1z_xmmm32, C::EVEX_Vpmovzxbq_zmm_k1z_xmmm64],
         [C::EVEX_Vpmovqb_xmmm16_k1z_xmm, C::EVEX_Vpmovqb_xmmm32_k1z_ymm, C::EVEX_Vpmovqb_xmmm64_k1z_zmm],
         eighth),
        (0x33,
         [C::EVEX_Vpmovzxwd_xmm_k1z_xmmm64, C::EVEX_Vpmovzxwd_ymm_k1z_xmmm128, C::EVEX_Vpmovzxwd_zmm_k1z_ymmm256],
         [C::EVEX_Vpmovdw_xmmm64_k1z_xmm, C::EVEX_Vpmovdw_xmmm128_k1z_ymm, C::EVEX_Vpmovdw_ymmm256_k1z_zmm],
         half),
        (0x34,
         [C::EVEX_Vpmovzxwq_xmm_k1z_xmmm32, C::EVEX_Vpmovzxwq_ymm_k1z_xmmm64, C::EVEX_Vpmovzxwq_zmm_k1z_xmmm128],
         [C::EVEX_Vpmovqw_xmmm32_k1z_xmm, C::EVEX_Vpmovqw_xmmm64_k1z_ymm, C::EVEX_Vpmovqw_xmmm128_k1z_zmm],
         quarter),
        (0x35,
         [C::EVEX_Vpmovzxdq_xmm_k1z_xmmm64, C::EVEX_Vpmovzxdq_ymm_k1z_xmmm128, C::EVEX_Vpmovzxdq_zmm_k1z_ymmm256],
         [C::EVEX_Vpmovqd_xmmm64_k1z_xmm, C::EVEX_Vpmovqd_xmmm128_k1z_ymm, C::EVEX_Vpmovqd_ymmm256_k1z_zmm],
         half),
    ];
    for &(op, c, narrow, tuples) in extend.iter() {
        let zsrc = if tuples == half { WY } else { WX };
        let ext = evl(
            [Some(c[0]), Some(c[1]), Some(c[2])],
            [&[VX, WX], &[VY, WX], &[VZ, zsrc]],
            NONE,
            tuples,
        );
        m[op] = p66f3(ext, down(narrow, tuples));
    }

    // Unsigned saturating down-conversions share their opcodes with 66 forms.
    let ws = [VX, HX, WX];
    m[0x10] = p66f3(
        w1(evex3(
            [C::EVEX_Vpsrlvw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsrlvw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsrlvw_zmm_k1z_zmm_zmmm512],
            &ws, NONE, FVM,
        )),
        down([C::EVEX_Vpmovuswb_xmmm64_k1z_xmm, C::EVEX_Vpmovuswb_xmmm128_k1z_ymm, C::EVEX_Vpmovuswb_ymmm256_k1z_zmm], half),
    );
    m[0x11] = p66f3(
        w1(evex3(
            [C::EVEX_Vpsravw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsravw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsravw_zmm_k1z_zmm_zmmm512],
            &ws, NONE, FVM,
        )),
        down([C::EVEX_Vpmovusdb_xmmm32_k1z_xmm, C::EVEX_Vpmovusdb_xmmm64_k1z_ymm, C::EVEX_Vpmovusdb_xmmm128_k1z_zmm], quarter),
    );
    m[0x12] = p66f3(
        w1(evex3(
            [C::EVEX_Vpsllvw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpsllvw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpsllvw_zmm_k1z_zmm_zmmm512],
            &ws, NONE, FVM,
        )),
        down([C::EVEX_Vpmovusqb_xmmm16_k1z_xmm, C::EVEX_Vpmovusqb_xmmm32_k1z_ymm, C::EVEX_Vpmovusqb_xmmm64_k1z_zmm], eighth),
    );
    m[0x13] = p66f3(
        w0(evl(
            [
                Some(C::EVEX_Vcvtph2ps_xmm_k1z_xmmm64),
                Some(C::EVEX_Vcvtph2ps_ymm_k1z_xmmm128),
                Some(C::EVEX_Vcvtph2ps_zmm_k1z_ymmm256_sae),
            ],
            [&[VX, WX], &[VY, WX], &[VZ, WY]],
            SAE,
            half,
        )),
        down([C::EVEX_Vpmovusdw_xmmm64_k1z_xmm, C::EVEX_Vpmovusdw_xmmm128_k1z_ymm, C::EVEX_Vpmovusdw_ymmm256_k1z_zmm], half),
    );
    m[0x14] = p66f3(
        dq(
            [C::EVEX_Vprorvd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vprorvd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vprorvd_zmm_k1z_zmm_zmmm512b32],
            [C::EVEX_Vprorvq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vprorvq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vprorvq_zmm_k1z_zmm_zmmm512b64],
            &ws, BR,
        ),
        down([C::EVEX_Vpmovusqw_xmmm32_k1z_xmm, C::EVEX_Vpmovusqw_xmmm64_k1z_ymm, C::EVEX_Vpmovusqw_xmmm128_k1z_zmm], quarter),
    );
    m[0x15] = p66f3(
        dq(
            [C::EVEX_Vprolvd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vprolvd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vprolvd_zmm_k1z_zmm_zmmm512b32],
            [C::EVEX_Vprolvq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vprolvq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vprolvq_zmm_k1z_zmm_zmmm512b64],
            &ws, BR,
        ),
        down([C::EVEX_Vpmovusqd_xmmm64_k1z_xmm, C::EVEX_Vpmovusqd_xmmm128_k1z_ymm, C::EVEX_Vpmovusqd_ymmm256_k1z_zmm], half),
    );

    // Tests into an opmask register: 66 is TEST, F3 is TESTN.
    m[0x26] = p66f3(
        bw_pair(
            [C::EVEX_Vptestmb_kr_k1_xmm_xmmm128, C::EVEX_Vptestmb_kr_k1_ymm_ymmm256, C::EVEX_Vptestmb_kr_k1_zmm_zmmm512],
            [C::EVEX_Vptestmw_kr_k1_xmm_xmmm128, C::EVEX_Vptestmw_kr_k1_ymm_ymmm256, C::EVEX_Vptestmw_kr_k1_zmm_zmmm512],
            &[KG, HX, WX],
            KDST,
        ),
        bw_pair(
            [C::EVEX_Vptestnmb_kr_k1_xmm_xmmm128, C::EVEX_Vptestnmb_kr_k1_ymm_ymmm256, C::EVEX_Vptestnmb_kr_k1_zmm_zmmm512],
            [C::EVEX_Vptestnmw_kr_k1_xmm_xmmm128, C::EVEX_Vptestnmw_kr_k1_ymm_ymmm256, C::EVEX_Vptestnmw_kr_k1_zmm_zmmm512],
            &[KG, HX, WX],
            KDST,
        ),
    );
    m[0x27] = p66f3(
        dq(
            [C::EVEX_Vptestmd_kr_k1_xmm_xmmm128b32, C::EVEX_Vptestmd_kr_k1_ymm_ymmm256b32, C::EVEX_Vptestmd_kr_k1_zmm_zmmm512b32],
            [C::EVEX_Vptestmq_kr_k1_xmm_xmmm128b64, C::EVEX_Vptestmq_kr_k1_ymm_ymmm256b64, C::EVEX_Vptestmq_kr_k1_zmm_zmmm512b64],
            &[KG, HX, WX],
            KDST_BR,
        ),
        dq(
            [C::EVEX_Vptestnmd_kr_k1_xmm_xmmm128b32, C::EVEX_Vptestnmd_kr_k1_ymm_ymmm256b32, C::EVEX_Vptestnmd_kr_k1_zmm_zmmm512b32],
            [C::EVEX_Vptestnmq_kr_k1_xmm_xmmm128b64, C::EVEX_Vptestnmq_kr_k1_ymm_ymmm256b64, C::EVEX_Vptestnmq_kr_k1_zmm_zmmm512b64],
            &[KG, HX, WX],
            KDST_BR,
        ),
    );

    // Opmask to vector (F3 28, 38) and vector to opmask (F3 29, 39).
    m[0x28] = p66f3(
        w1(evex3(
            [C::EVEX_Vpmuldq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmuldq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmuldq_zmm_k1z_zmm_zmmm512b64],
            &[VX, HX, WX],
            BR,
            FV64,
        )),
        bw_pair(
            [C::EVEX_Vpmovm2b_xmm_kr, C::EVEX_Vpmovm2b_ymm_kr, C::EVEX_Vpmovm2b_zmm_kr],
            [C::EVEX_Vpmovm2w_xmm_kr, C::EVEX_Vpmovm2w_ymm_kr, C::EVEX_Vpmovm2w_zmm_kr],
            &[VX, KR],
            NOMASK,
        ),
    );
    m[0x29] = p66f3(
        w1(evex3(
            [C::EVEX_Vpcmpeqq_kr_k1_xmm_xmmm128b64, C::EVEX_Vpcmpeqq_kr_k1_ymm_ymmm256b64, C::EVEX_Vpcmpeqq_kr_k1_zmm_zmmm512b64],
            &[KG, HX, WX],
            KDST_BR,
            FV64,
        )),
        bw_pair(
            [C::EVEX_Vpmovb2m_kr_xmm, C::EVEX_Vpmovb2m_kr_ymm, C::EVEX_Vpmovb2m_kr_zmm],
            [C::EVEX_Vpmovw2m_kr_xmm, C::EVEX_Vpmovw2m_kr_ymm, C::EVEX_Vpmovw2m_kr_zmm],
            &[KG, UX],
            NOMASK,
        ),
    );
    m[0x2a] = p66f3(
        w0(evex3(
            [C::EVEX_Vmovntdqa_xmm_m128, C::EVEX_Vmovntdqa_ymm_m256, C::EVEX_Vmovntdqa_zmm_m512],
            &[VX, M],
            NOMASK,
            FVM,
        )),
        w1(evex3(
            [C::EVEX_Vpbroadcastmb2q_xmm_kr, C::EVEX_Vpbroadcastmb2q_ymm_kr, C::EVEX_Vpbroadcastmb2q_zmm_kr],
            &[VX, KR],
            NOMASK,
            FVM,
        )),
    );
    m[0x2c] = idq(
        [C::EVEX_Vscalefps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vscalefps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vscalefps_zmm_k1z_zmm_zmmm512b32_er],
        [C::EVEX_Vscalefpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vscalefpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vscalefpd_zmm_k1z_zmm_zmmm512b64_er],
        &[VX, HX, WX],
        BER,
    );
    m[0x2d] = sdq(C::EVEX_Vscalefss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vscalefsd_xmm_k1z_xmm_xmmm64_er, &[VX, HX, WX], ER);
    m[0x38] = p66f3(
        evex3(
            [C::EVEX_Vpminsb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpminsb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpminsb_zmm_k1z_zmm_zmmm512],
            &[VX, HX, WX],
            NONE,
            FVM,
        ),
        w(
            evex3([C::EVEX_Vpmovm2d_xmm_kr, C::EVEX_Vpmovm2d_ymm_kr, C::EVEX_Vpmovm2d_zmm_kr], &[VX, KR], NOMASK, FVM),
            evex3([C::EVEX_Vpmovm2q_xmm_kr, C::EVEX_Vpmovm2q_ymm_kr, C::EVEX_Vpmovm2q_zmm_kr], &[VX, KR], NOMASK, FVM),
        ),
    );
    m[0x39] = p66f3(
        dq(
            [C::EVEX_Vpminsd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpminsd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpminsd_zmm_k1z_zmm_zmmm512b32],
            [C::EVEX_Vpminsq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpminsq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpminsq_zmm_k1z_zmm_zmmm512b64],
            &[VX, HX, WX],
            BR,
        ),
        w(
            evex3([C::EVEX_Vpmovd2m_kr_xmm, C::EVEX_Vpmovd2m_kr_ymm, C::EVEX_Vpmovd2m_kr_zmm], &[KG, UX], NOMASK, FVM),
            evex3([C::EVEX_Vpmovq2m_kr_xmm, C::EVEX_Vpmovq2m_kr_ymm, C::EVEX_Vpmovq2m_kr_zmm], &[KG, UX], NOMASK, FVM),
        ),
    );
    m[0x3a] = p66f3(
        evex3(
            [C::EVEX_Vpminuw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpminuw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpminuw_zmm_k1z_zmm_zmmm512],
            &[VX, HX, WX],
            NONE,
            FVM,
        ),
        w0(evex3(
            [C::EVEX_Vpbroadcastmw2d_xmm_kr, C::EVEX_Vpbroadcastmw2d_ymm_kr, C::EVEX_Vpbroadcastmw2d_zmm_kr],
            &[VX, KR],
            NOMASK,
            FVM,
        )),
    );
    m[0x2b] = p66e(w0(evex3(
        [C::EVEX_Vpackusdw_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpackusdw_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpackusdw_zmm_k1z_zmm_zmmm512b32],
        &[VX, HX, WX],
        BR,
        FV32,
    )));
    m[0x37] = p66e(w1(evex3(
        [C::EVEX_Vpcmpgtq_kr_k1_xmm_xmmm128b64, C::EVEX_Vpcmpgtq_kr_k1_ymm_ymmm256b64, C::EVEX_Vpcmpgtq_kr_k1_zmm_zmmm512b64],
        &[KG, HX, WX],
        KDST_BR,
        FV64,
    )));

    let elems = [
        (0x3b,
         [C::EVEX_Vpminud_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpminud_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpminud_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpminuq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpminuq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpminuq_zmm_k1z_zmm_zmmm512b64]),
        (0x3d,
         [C::EVEX_Vpmaxsd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpmaxsd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpmaxsd_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpmaxsq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmaxsq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmaxsq_zmm_k1z_zmm_zmmm512b64]),
        (0x3f,
         [C::EVEX_Vpmaxud_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpmaxud_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpmaxud_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpmaxuq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmaxuq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmaxuq_zmm_k1z_zmm_zmmm512b64]),
        (0x40,
         [C::EVEX_Vpmulld_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpmulld_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpmulld_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpmullq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmullq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmullq_zmm_k1z_zmm_zmmm512b64]),
        (0x45,
         [C::EVEX_Vpsrlvd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpsrlvd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpsrlvd_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpsrlvq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpsrlvq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpsrlvq_zmm_k1z_zmm_zmmm512b64]),
        (0x46,
         [C::EVEX_Vpsravd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpsravd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpsravd_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpsravq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpsravq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpsravq_zmm_k1z_zmm_zmmm512b64]),
        (0x47,
         [C::EVEX_Vpsllvd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpsllvd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpsllvd_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpsllvq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpsllvq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpsllvq_zmm_k1z_zmm_zmmm512b64]),
        (0x64,
         [C::EVEX_Vpblendmd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpblendmd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpblendmd_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpblendmq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpblendmq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpblendmq_zmm_k1z_zmm_zmmm512b64]),
        (0x65,
         [C::EVEX_Vblendmps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vblendmps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vblendmps_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vblendmpd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vblendmpd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vblendmpd_zmm_k1z_zmm_zmmm512b64]),
        (0x76,
         [C::EVEX_Vpermi2d_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpermi2d_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermi2d_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpermi2q_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpermi2q_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermi2q_zmm_k1z_zmm_zmmm512b64]),
        (0x77,
         [C::EVEX_Vpermi2ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpermi2ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermi2ps_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpermi2pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpermi2pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermi2pd_zmm_k1z_zmm_zmmm512b64]),
        (0x7e,
         [C::EVEX_Vpermt2d_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpermt2d_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermt2d_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpermt2q_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpermt2q_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermt2q_zmm_k1z_zmm_zmmm512b64]),
        (0x7f,
         [C::EVEX_Vpermt2ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpermt2ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpermt2ps_zmm_k1z_zmm_zmmm512b32],
         [C::EVEX_Vpermt2pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpermt2pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpermt2pd_zmm_k1z_zmm_zmmm512b64]),
    ];
    for &(op, d, q) in elems.iter() {
        m[op] = idq(d, q, &[VX, HX, WX], BR);
    }
    let bw_pairs = [
        (0x66,
         [C::EVEX_Vpblendmb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpblendmb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpblendmb_zmm_k1z_zmm_zmmm512],
         [C::EVEX_Vpblendmw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpblendmw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpblendmw_zmm_k1z_zmm_zmmm512]),
        (0x75,
         [C::EVEX_Vpermi2b_xmm_k1z_xmm_xmmm128, C::EVEX_Vpermi2b_ymm_k1z_ymm_ymmm256, C::EVEX_Vpermi2b_zmm_k1z_zmm_zmmm512],
         [C::EVEX_Vpermi2w_xmm_k1z_xmm_xmmm128, C::EVEX_Vpermi2w_ymm_k1z_ymm_ymmm256, C::EVEX_Vpermi2w_zmm_k1z_zmm_zmmm512]),
        (0x7d,
         [C::EVEX_Vpermt2b_xmm_k1z_xmm_xmmm128, C::EVEX_Vpermt2b_ymm_k1z_ymm_ymmm256, C::EVEX_Vpermt2b_zmm_k1z_zmm_zmmm512],
         [C::EVEX_Vpermt2w_xmm_k1z_xmm_xmmm128, C::EVEX_Vpermt2w_ymm_k1z_ymm_ymmm256, C::EVEX_Vpermt2w_zmm_k1z_zmm_zmmm512]),
        (0x8d,
         [C::EVEX_Vpermb_xmm_k1z_xmm_xmmm128, C::EVEX_Vpermb_ymm_k1z_ymm_ymmm256, C::EVEX_Vpermb_zmm_k1z_zmm_zmmm512],
         [C::EVEX_Vpermw_xmm_k1z_xmm_xmmm128, C::EVEX_Vpermw_ymm_k1z_ymm_ymmm256, C::EVEX_Vpermw_zmm_k1z_zmm_zmmm512]),
    ];
    for &(op, b, wd) in bw_pairs.iter() {
        m[op] = p66e(bw_pair(b, wd, &[VX, HX, WX], NONE));
    }

    let unary = [
        (0x42,
         [C::EVEX_Vgetexpps_xmm_k1z_xmmm128b32, C::EVEX_Vgetexpps_ymm_k1z_ymmm256b32, C::EVEX_Vgetexpps_zmm_k1z_zmmm512b32_sae],
         [C::EVEX_Vgetexppd_xmm_k1z_xmmm128b64, C::EVEX_Vgetexppd_ymm_k1z_ymmm256b64, C::EVEX_Vgetexppd_zmm_k1z_zmmm512b64_sae],
         BSAE),
        (0x44,
         [C::EVEX_Vplzcntd_xmm_k1z_xmmm128b32, C::EVEX_Vplzcntd_ymm_k1z_ymmm256b32, C::EVEX_Vplzcntd_zmm_k1z_zmmm512b32],
         [C::EVEX_Vplzcntq_xmm_k1z_xmmm128b64, C::EVEX_Vplzcntq_ymm_k1z_ymmm256b64, C::EVEX_Vplzcntq_zmm_k1z_zmmm512b64],
         BR),
        (0x4c,
         [C::EVEX_Vrcp14ps_xmm_k1z_xmmm128b32, C::EVEX_Vrcp14ps_ymm_k1z_ymmm256b32, C::EVEX_Vrcp14ps_zmm_k1z_zmmm512b32],
         [C::EVEX_Vrcp14pd_xmm_k1z_xmmm128b64, C::EVEX_Vrcp14pd_ymm_k1z_ymmm256b64, C::EVEX_Vrcp14pd_zmm_k1z_zmmm512b64],
         BR),
        (0x4e,
         [C::EVEX_Vrsqrt14ps_xmm_k1z_xmmm128b32, C::EVEX_Vrsqrt14ps_ymm_k1z_ymmm256b32, C::EVEX_Vrsqrt14ps_zmm_k1z_zmmm512b32],
         [C::EVEX_Vrsqrt14pd_xmm_k1z_xmmm128b64, C::EVEX_Vrsqrt14pd_ymm_k1z_ymmm256b64, C::EVEX_Vrsqrt14pd_zmm_k1z_zmmm512b64],
         BR),
    ];
    for &(op, d, q, flags) in unary.iter() {
        m[op] = idq(d, q, &[VX, WX], flags);
    }
    let scalars = [
        (0x43, C::EVEX_Vgetexpss_xmm_k1z_xmm_xmmm32_sae, C::EVEX_Vgetexpsd_xmm_k1z_xmm_xmmm64_sae, SAE),
        (0x4d, C::EVEX_Vrcp14ss_xmm_k1z_xmm_xmmm32, C::EVEX_Vrcp14sd_xmm_k1z_xmm_xmmm64, NONE),
        (0x4f, C::EVEX_Vrsqrt14ss_xmm_k1z_xmm_xmmm32, C::EVEX_Vrsqrt14sd_xmm_k1z_xmm_xmmm64, NONE),
        (0xcb, C::EVEX_Vrcp28ss_xmm_k1z_xmm_xmmm32_sae, C::EVEX_Vrcp28sd_xmm_k1z_xmm_xmmm64_sae, SAE),
        (0xcd, C::EVEX_Vrsqrt28ss_xmm_k1z_xmm_xmmm32_sae, C::EVEX_Vrsqrt28sd_xmm_k1z_xmm_xmmm64_sae, SAE),
    ];
    for &(op, ss, sd, flags) in scalars.iter() {
        m[op] = sdq(ss, sd, &[VX, HX, WX], flags);
    }

    // AVX512ER, 512-bit only.
    let er = [
        (0xc8, C::EVEX_Vexp2ps_zmm_k1z_zmmm512b32_sae, C::EVEX_Vexp2pd_zmm_k1z_zmmm512b64_sae),
        (0xca, C::EVEX_Vrcp28ps_zmm_k1z_zmmm512b32_sae, C::EVEX_Vrcp28pd_zmm_k1z_zmmm512b64_sae),
        (0xcc, C::EVEX_Vrsqrt28ps_zmm_k1z_zmmm512b32_sae, C::EVEX_Vrsqrt28pd_zmm_k1z_zmmm512b64_sae),
    ];
    for &(op, ps, pd) in er.iter() {
        m[op] = p66e(w(ev2(ps, &[VX, WX], BSAE, FV32), ev2(pd, &[VX, WX], BSAE, FV64)));
    }

    m[0x83] = p66e(w1(evex3(
        [C::EVEX_Vpmultishiftqb_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmultishiftqb_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmultishiftqb_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
        FV64,
    )));
    m[0xb4] = p66e(w1(evex3(
        [C::EVEX_Vpmadd52luq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmadd52luq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmadd52luq_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
        FV64,
    )));
    m[0xb5] = p66e(w1(evex3(
        [C::EVEX_Vpmadd52huq_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vpmadd52huq_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vpmadd52huq_zmm_k1z_zmm_zmmm512b64],
        &[VX, HX, WX],
        BR,
        FV64,
    )));

    // Expand loads and compress stores move single elements.
    let single = |c: [C; 3], ops: &[Operand], tuple: TupleType| -> Node { evex3(c, ops, NONE, [tuple; 3]) };
    m[0x88] = p66e(w(
        single([C::EVEX_Vexpandps_xmm_k1z_xmmm128, C::EVEX_Vexpandps_ymm_k1z_ymmm256, C::EVEX_Vexpandps_zmm_k1z_zmmm512], &[VX, WX], N4),
        single([C::EVEX_Vexpandpd_xmm_k1z_xmmm128, C::EVEX_Vexpandpd_ymm_k1z_ymmm256, C::EVEX_Vexpandpd_zmm_k1z_zmmm512], &[VX, WX], N8),
    ));
    m[0x89] = p66e(w(
        single([C::EVEX_Vpexpandd_xmm_k1z_xmmm128, C::EVEX_Vpexpandd_ymm_k1z_ymmm256, C::EVEX_Vpexpandd_zmm_k1z_zmmm512], &[VX, WX], N4),
        single([C::EVEX_Vpexpandq_xmm_k1z_xmmm128, C::EVEX_Vpexpandq_ymm_k1z_ymmm256, C::EVEX_Vpexpandq_zmm_k1z_zmmm512], &[VX, WX], N8),
    ));
    m[0x8a] = p66e(w(
        single([C::EVEX_Vcompressps_xmmm128_k1z_xmm, C::EVEX_Vcompressps_ymmm256_k1z_ymm, C::EVEX_Vcompressps_zmmm512_k1z_zmm], &[WX, VX], N4),
        single([C::EVEX_Vcompresspd_xmmm128_k1z_xmm, C::EVEX_Vcompresspd_ymmm256_k1z_ymm, C::EVEX_Vcompresspd_zmmm512_k1z_zmm], &[WX, VX], N8),
    ));
    m[0x8b] = p66e(w(
        single([C::EVEX_Vpcompressd_xmmm128_k1z_xmm, C::EVEX_Vpcompressd_ymmm256_k1z_ymm, C::EVEX_Vpcompressd_zmmm512_k1z_zmm], &[WX, VX], N4),
        single([C::EVEX_Vpcompressq_xmmm128_k1z_xmm, C::EVEX_Vpcompressq_ymmm256_k1z_ymm, C::EVEX_Vpcompressq_zmmm512_k1z_zmm], &[WX, VX], N8),
    ));

    m[0xc4] = idq(
        [C::EVEX_Vpconflictd_xmm_k1z_xmmm128b32, C::EVEX_Vpconflictd_ymm_k1z_ymmm256b32, C::EVEX_Vpconflictd_zmm_k1z_zmmm512b32],
        [C::EVEX_Vpconflictq_xmm_k1z_xmmm128b64, C::EVEX_Vpconflictq_ymm_k1z_ymmm256b64, C::EVEX_Vpconflictq_zmm_k1z_zmmm512b64],
        &[VX, WX],
        BR,
    );

    let vnni = [
        (0x50, [C::EVEX_Vpdpbusd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpdpbusd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpdpbusd_zmm_k1z_zmm_zmmm512b32]),
        (0x51, [C::EVEX_Vpdpbusds_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpdpbusds_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpdpbusds_zmm_k1z_zmm_zmmm512b32]),
        (0x52, [C::EVEX_Vpdpwssd_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpdpwssd_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpdpwssd_zmm_k1z_zmm_zmmm512b32]),
        (0x53, [C::EVEX_Vpdpwssds_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vpdpwssds_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vpdpwssds_zmm_k1z_zmm_zmmm512b32]),
    ];
    // AVX512_4VNNIW and AVX512_4FMAPS with F2: four consecutive source registers.
    let four = |op: usize| -> Node {
        let form = |code: C, ops: &[Operand]| w0(scalar(code, ops, NONE, N16));
        match op {
            0x52 => form(C::EVEX_Vp4dpwssd_zmm_k1z_zmmp3_m128, &[VZ, HZ, M]),
            0x53 => form(C::EVEX_Vp4dpwssds_zmm_k1z_zmmp3_m128, &[VZ, HZ, M]),
            0x9a => form(C::EVEX_V4fmaddps_zmm_k1z_zmmp3_m128, &[VZ, HZ, M]),
            0x9b => form(C::EVEX_V4fmaddss_xmm_k1z_xmmp3_m128, &[VX, HX, M]),
            0xaa => form(C::EVEX_V4fnmaddps_zmm_k1z_zmmp3_m128, &[VZ, HZ, M]),
            0xab => form(C::EVEX_V4fnmaddss_xmm_k1z_xmmp3_m128, &[VX, HX, M]),
            _ => inv(),
        }
    };
    for &(op, c) in vnni.iter() {
        m[op] = mp(inv(), w0(evex3(c, &[VX, HX, WX], BR, FV32)), inv(), four(op));
    }

    m[0x58] = p66e(w0(evl(
        [
            Some(C::EVEX_Vpbroadcastd_xmm_k1z_xmmm32),
            Some(C::EVEX_Vpbroadcastd_ymm_k1z_xmmm32),
            Some(C::EVEX_Vpbroadcastd_zmm_k1z_xmmm32),
        ],
        [&[VX, WX], &[VY, WX], &[VZ, WX]],
        NONE,
        [N4, N4, N4],
    )));
    m[0x59] = p66e(w(
        evl(
            [
                Some(C::EVEX_Vbroadcasti32x2_xmm_k1z_xmmm64),
                Some(C::EVEX_Vbroadcasti32x2_ymm_k1z_xmmm64),
                Some(C::EVEX_Vbroadcasti32x2_zmm_k1z_xmmm64),
            ],
            [&[VX, WX], &[VY, WX], &[VZ, WX]],
            NONE,
            [N8, N8, N8],
        ),
        evl(
            [
                Some(C::EVEX_Vpbroadcastq_xmm_k1z_xmmm64),
                Some(C::EVEX_Vpbroadcastq_ymm_k1z_xmmm64),
                Some(C::EVEX_Vpbroadcastq_zmm_k1z_xmmm64),
            ],
            [&[VX, WX], &[VY, WX], &[VZ, WX]],
            NONE,
            [N8, N8, N8],
        ),
    ));
    m[0x78] = p66e(w0(evl(
        [
            Some(C::EVEX_Vpbroadcastb_xmm_k1z_xmmm8),
            Some(C::EVEX_Vpbroadcastb_ymm_k1z_xmmm8),
            Some(C::EVEX_Vpbroadcastb_zmm_k1z_xmmm8),
        ],
        [&[VX, WX], &[VY, WX], &[VZ, WX]],
        NONE,
        [N1, N1, N1],
    )));
    m[0x79] = p66e(w0(evl(
        [
            Some(C::EVEX_Vpbroadcastw_xmm_k1z_xmmm16),
            Some(C::EVEX_Vpbroadcastw_ymm_k1z_xmmm16),
            Some(C::EVEX_Vpbroadcastw_zmm_k1z_xmmm16),
        ],
        [&[VX, WX], &[VY, WX], &[VZ, WX]],
        NONE,
        [N2, N2, N2],
    )));
    // Broadcasts from a GPR.
    let from_gpr = |c: [C; 3], src: Operand| -> Node {
        evl(
            [Some(c[0]), Some(c[1]), Some(c[2])],
            [&[VX, src], &[VY, src], &[VZ, src]],
            NONE,
            [N1, N1, N1],
        )
    };
    m[0x7a] = p66e(w0(rm(
        from_gpr(
            [C::EVEX_Vpbroadcastb_xmm_k1z_r32, C::EVEX_Vpbroadcastb_ymm_k1z_r32, C::EVEX_Vpbroadcastb_zmm_k1z_r32],
            RD,
        ),
        inv(),
    )));
    m[0x7b] = p66e(w0(rm(
        from_gpr(
            [C::EVEX_Vpbroadcastw_xmm_k1z_r32, C::EVEX_Vpbroadcastw_ymm_k1z_r32, C::EVEX_Vpbroadcastw_zmm_k1z_r32],
            RD,
        ),
        inv(),
    )));
    let bcst_d = from_gpr(
        [C::EVEX_Vpbroadcastd_xmm_k1z_r32, C::EVEX_Vpbroadcastd_ymm_k1z_r32, C::EVEX_Vpbroadcastd_zmm_k1z_r32],
        RD,
    );
    let bcst_q = from_gpr(
        [C::EVEX_Vpbroadcastq_xmm_k1z_r64, C::EVEX_Vpbroadcastq_ymm_k1z_r64, C::EVEX_Vpbroadcastq_zmm_k1z_r64],
        RQ,
    );
    m[0x7c] = p66e(rm(gpr_w(bcst_d, bcst_q), inv()));

    // Gathers and scatters. The index register bank depends on the vector length.
    let vsib = |c: [C; 3], data: [Operand; 3], index: [Operand; 3], gather: bool, tuple: TupleType| -> Node {
        let ops: Vec<Vec<Operand>> = (0..3)
            .map(|l| if gather { vec![data[l], index[l]] } else { vec![index[l], data[l]] })
            .collect();
        let flags = if gather { GATHER } else { SCATTER };
        rm(
            inv(),
            evl(
                [Some(c[0]), Some(c[1]), Some(c[2])],
                [ops[0].as_slice(), ops[1].as_slice(), ops[2].as_slice()],
                flags,
                [tuple; 3],
            ),
        )
    };
    let full = [VX, VY, VZ];
    let narrow = [VX, VX, VY];
    let idx_same = [VSX, VSY, VSZ];
    let idx_narrow = [VSX, VSX, VSY];

    m[0x90] = p66e(w(
        vsib([C::EVEX_Vpgatherdd_xmm_k1_vm32x, C::EVEX_Vpgatherdd_ymm_k1_vm32y, C::EVEX_Vpgatherdd_zmm_k1_vm32z], full, idx_same, true, N4),
        vsib([C::EVEX_Vpgatherdq_xmm_k1_vm32x, C::EVEX_Vpgatherdq_ymm_k1_vm32x, C::EVEX_Vpgatherdq_zmm_k1_vm32y], full, idx_narrow, true, N8),
    ));
    m[0x91] = p66e(w(
        vsib([C::EVEX_Vpgatherqd_xmm_k1_vm64x, C::EVEX_Vpgatherqd_xmm_k1_vm64y, C::EVEX_Vpgatherqd_ymm_k1_vm64z], narrow, idx_same, true, N4),
        vsib([C::EVEX_Vpgatherqq_xmm_k1_vm64x, C::EVEX_Vpgatherqq_ymm_k1_vm64y, C::EVEX_Vpgatherqq_zmm_k1_vm64z], full, idx_same, true, N8),
    ));
    m[0x92] = p66e(w(
        vsib([C::EVEX_Vgatherdps_xmm_k1_vm32x, C::EVEX_Vgatherdps_ymm_k1_vm32y, C::EVEX_Vgatherdps_zmm_k1_vm32z], full, idx_same, true, N4),
        vsib([C::EVEX_Vgatherdpd_xmm_k1_vm32x, C::EVEX_Vgatherdpd_ymm_k1_vm32x, C::EVEX_Vgatherdpd_zmm_k1_vm32y], full, idx_narrow, true, N8),
    ));
    m[0x93] = p66e(w(
        vsib([C::EVEX_Vgatherqps_xmm_k1_vm64x, C::EVEX_Vgatherqps_xmm_k1_vm64y, C::EVEX_Vgatherqps_ymm_k1_vm64z], narrow, idx_same, true, N4),
        vsib([C::EVEX_Vgatherqpd_xmm_k1_vm64x, C::EVEX_Vgatherqpd_ymm_k1_vm64y, C::EVEX_Vgatherqpd_zmm_k1_vm64z], full, idx_same, true, N8),
    ));
    m[0xa0] = p66e(w(
        vsib([C::EVEX_Vpscatterdd_vm32x_k1_xmm, C::EVEX_Vpscatterdd_vm32y_k1_ymm, C::EVEX_Vpscatterdd_vm32z_k1_zmm], full, idx_same, false, N4),
        vsib([C::EVEX_Vpscatterdq_vm32x_k1_xmm, C::EVEX_Vpscatterdq_vm32x_k1_ymm, C::EVEX_Vpscatterdq_vm32y_k1_zmm], full, idx_narrow, false, N8),
    ));
    m[0xa1] = p66e(w(
        vsib([C::EVEX_Vpscatterqd_vm64x_k1_xmm, C::EVEX_Vpscatterqd_vm64y_k1_xmm, C::EVEX_Vpscatterqd_vm64z_k1_ymm], narrow, idx_same, false, N4),
        vsib([C::EVEX_Vpscatterqq_vm64x_k1_xmm, C::EVEX_Vpscatterqq_vm64y_k1_ymm, C::EVEX_Vpscatterqq_vm64z_k1_zmm], full, idx_same, false, N8),
    ));
    m[0xa2] = p66e(w(
        vsib([C::EVEX_Vscatterdps_vm32x_k1_xmm, C::EVEX_Vscatterdps_vm32y_k1_ymm, C::EVEX_Vscatterdps_vm32z_k1_zmm], full, idx_same, false, N4),
        vsib([C::EVEX_Vscatterdpd_vm32x_k1_xmm, C::EVEX_Vscatterdpd_vm32x_k1_ymm, C::EVEX_Vscatterdpd_vm32y_k1_zmm], full, idx_narrow, false, N8),
    ));
    m[0xa3] = p66e(w(
        vsib([C::EVEX_Vscatterqps_vm64x_k1_xmm, C::EVEX_Vscatterqps_vm64y_k1_xmm, C::EVEX_Vscatterqps_vm64z_k1_ymm], narrow, idx_same, false, N4),
        vsib([C::EVEX_Vscatterqpd_vm64x_k1_xmm, C::EVEX_Vscatterqpd_vm64y_k1_ymm, C::EVEX_Vscatterqpd_vm64z_k1_zmm], full, idx_same, false, N8),
    ));

    // Gather and scatter prefetches, 512-bit only. ModRM.reg picks the operation.
    let pf = |ps: C, pd: C, index: [Operand; 2]| -> Node {
        rm(
            inv(),
            p66e(w(
                evl([None, None, Some(ps)], [&[], &[], &[index[0]]], PREFETCH, [N4; 3]),
                evl([None, None, Some(pd)], [&[], &[], &[index[1]]], PREFETCH, [N8; 3]),
            )),
        )
    };
    let dword_index = [VSZ, VSY];
    let qword_index = [VSZ, VSZ];
    m[0xc6] = group(nodes![
        inv(),
        pf(C::EVEX_Vgatherpf0dps_vm32z_k1, C::EVEX_Vgatherpf0dpd_vm32y_k1, dword_index),
        pf(C::EVEX_Vgatherpf1dps_vm32z_k1, C::EVEX_Vgatherpf1dpd_vm32y_k1, dword_index),
        inv(),
        inv(),
        pf(C::EVEX_Vscatterpf0dps_vm32z_k1, C::EVEX_Vscatterpf0dpd_vm32y_k1, dword_index),
        pf(C::EVEX_Vscatterpf1dps_vm32z_k1, C::EVEX_Vscatterpf1dpd_vm32y_k1, dword_index),
        inv(),
    ]);
    m[0xc7] = group(nodes![
        inv(),
        pf(C::EVEX_Vgatherpf0qps_vm64z_k1, C::EVEX_Vgatherpf0qpd_vm64z_k1, qword_index),
        pf(C::EVEX_Vgatherpf1qps_vm64z_k1, C::EVEX_Vgatherpf1qpd_vm64z_k1, qword_index),
        inv(),
        inv(),
        pf(C::EVEX_Vscatterpf0qps_vm64z_k1, C::EVEX_Vscatterpf0qpd_vm64z_k1, qword_index),
        pf(C::EVEX_Vscatterpf1qps_vm64z_k1, C::EVEX_Vscatterpf1qpd_vm64z_k1, qword_index),
        inv(),
    ]);

    let fma = [
        (0x98,
         [C::EVEX_Vfmadd132ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmadd132ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmadd132ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmadd132pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmadd132pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmadd132pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0x9c,
         [C::EVEX_Vfnmadd132ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfnmadd132ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfnmadd132ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfnmadd132pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfnmadd132pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfnmadd132pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xa8,
         [C::EVEX_Vfmadd213ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmadd213ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmadd213ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmadd213pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmadd213pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmadd213pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xac,
         [C::EVEX_Vfnmadd213ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfnmadd213ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfnmadd213ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfnmadd213pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfnmadd213pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfnmadd213pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xb8,
         [C::EVEX_Vfmadd231ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmadd231ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmadd231ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmadd231pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmadd231pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmadd231pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xbc,
         [C::EVEX_Vfnmadd231ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfnmadd231ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfnmadd231ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfnmadd231pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfnmadd231pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfnmadd231pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0x96,
         [C::EVEX_Vfmaddsub132ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmaddsub132ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmaddsub132ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmaddsub132pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmaddsub132pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmaddsub132pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0x97,
         [C::EVEX_Vfmsubadd132ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmsubadd132ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmsubadd132ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmsubadd132pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmsubadd132pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmsubadd132pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0x9a,
         [C::EVEX_Vfmsub132ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmsub132ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmsub132ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmsub132pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmsub132pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmsub132pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0x9e,
         [C::EVEX_Vfnmsub132ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfnmsub132ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfnmsub132ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfnmsub132pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfnmsub132pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfnmsub132pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xa6,
         [C::EVEX_Vfmaddsub213ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmaddsub213ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmaddsub213ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmaddsub213pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmaddsub213pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmaddsub213pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xa7,
         [C::EVEX_Vfmsubadd213ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmsubadd213ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmsubadd213ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmsubadd213pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmsubadd213pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmsubadd213pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xaa,
         [C::EVEX_Vfmsub213ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmsub213ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmsub213ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmsub213pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmsub213pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmsub213pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xae,
         [C::EVEX_Vfnmsub213ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfnmsub213ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfnmsub213ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfnmsub213pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfnmsub213pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfnmsub213pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xb6,
         [C::EVEX_Vfmaddsub231ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmaddsub231ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmaddsub231ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmaddsub231pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmaddsub231pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmaddsub231pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xb7,
         [C::EVEX_Vfmsubadd231ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmsubadd231ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmsubadd231ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmsubadd231pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmsubadd231pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmsubadd231pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xba,
         [C::EVEX_Vfmsub231ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfmsub231ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfmsub231ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfmsub231pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfmsub231pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfmsub231pd_zmm_k1z_zmm_zmmm512b64_er]),
        (0xbe,
         [C::EVEX_Vfnmsub231ps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vfnmsub231ps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vfnmsub231ps_zmm_k1z_zmm_zmmm512b32_er],
         [C::EVEX_Vfnmsub231pd_xmm_k1z_xmm_xmmm128b64, C::EVEX_Vfnmsub231pd_ymm_k1z_ymm_ymmm256b64, C::EVEX_Vfnmsub231pd_zmm_k1z_zmm_zmmm512b64_er]),
    ];
    for &(op, ps, pd) in fma.iter() {
        m[op] = mp(inv(), dq(ps, pd, &[VX, HX, WX], BER), inv(), four(op));
    }
    let fma_scalar = [
        (0x99, C::EVEX_Vfmadd132ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfmadd132sd_xmm_k1z_xmm_xmmm64_er),
        (0xa9, C::EVEX_Vfmadd213ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfmadd213sd_xmm_k1z_xmm_xmmm64_er),
        (0xb9, C::EVEX_Vfmadd231ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfmadd231sd_xmm_k1z_xmm_xmmm64_er),
        (0x9b, C::EVEX_Vfmsub132ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfmsub132sd_xmm_k1z_xmm_xmmm64_er),
        (0x9d, C::EVEX_Vfnmadd132ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfnmadd132sd_xmm_k1z_xmm_xmmm64_er),
        (0x9f, C::EVEX_Vfnmsub132ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfnmsub132sd_xmm_k1z_xmm_xmmm64_er),
        (0xab, C::EVEX_Vfmsub213ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfmsub213sd_xmm_k1z_xmm_xmmm64_er),
        (0xad, C::EVEX_Vfnmadd213ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfnmadd213sd_xmm_k1z_xmm_xmmm64_er),
        (0xaf, C::EVEX_Vfnmsub213ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfnmsub213sd_xmm_k1z_xmm_xmmm64_er),
        (0xbb, C::EVEX_Vfmsub231ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfmsub231sd_xmm_k1z_xmm_xmmm64_er),
        (0xbd, C::EVEX_Vfnmadd231ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfnmadd231sd_xmm_k1z_xmm_xmmm64_er),
        (0xbf, C::EVEX_Vfnmsub231ss_xmm_k1z_xmm_xmmm32_er, C::EVEX_Vfnmsub231sd_xmm_k1z_xmm_xmmm64_er),
    ];
    for &(op, ss, sd) in fma_scalar.iter() {
        m[op] = mp(
            inv(),
            w(scalar(ss, &[VX, HX, WX], ER, N4), scalar(sd, &[VX, HX, WX], ER, N8)),
            inv(),
            four(op),
        );
    }

    let aes = [
        (0xdc, [C::EVEX_Vaesenc_xmm_xmm_xmmm128, C::EVEX_Vaesenc_ymm_ymm_ymmm256, C::EVEX_Vaesenc_zmm_zmm_zmmm512]),
        (0xdd, [C::EVEX_Vaesenclast_xmm_xmm_xmmm128, C::EVEX_Vaesenclast_ymm_ymm_ymmm256, C::EVEX_Vaesenclast_zmm_zmm_zmmm512]),
        (0xde, [C::EVEX_Vaesdec_xmm_xmm_xmmm128, C::EVEX_Vaesdec_ymm_ymm_ymmm256, C::EVEX_Vaesdec_zmm_zmm_zmmm512]),
        (0xdf, [C::EVEX_Vaesdeclast_xmm_xmm_xmmm128, C::EVEX_Vaesdeclast_ymm_ymm_ymmm256, C::EVEX_Vaesdeclast_zmm_zmm_zmmm512]),
    ];
    for &(op, c) in aes.iter() {
        m[op] = p66e(evex3(c, &[VX, HX, WX], NOMASK, FVM));
    }

    m
}

fn map0f3a() -> Vec<Node> {
    let mut m = blank();

    m[0x00] = p66e(w1(ev12(
        C::EVEX_Vpermq_ymm_k1z_ymmm256b64_imm8,
        C::EVEX_Vpermq_zmm_k1z_zmmm512b64_imm8,
        &[VX, WX, IB],
        BR,
        FV64,
    )));
    m[0x01] = p66e(w1(ev12(
        C::EVEX_Vpermpd_ymm_k1z_ymmm256b64_imm8,
        C::EVEX_Vpermpd_zmm_k1z_zmmm512b64_imm8,
        &[VX, WX, IB],
        BR,
        FV64,
    )));
    m[0x03] = idq(
        [C::EVEX_Valignd_xmm_k1z_xmm_xmmm128b32_imm8, C::EVEX_Valignd_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Valignd_zmm_k1z_zmm_zmmm512b32_imm8],
        [C::EVEX_Valignq_xmm_k1z_xmm_xmmm128b64_imm8, C::EVEX_Valignq_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Valignq_zmm_k1z_zmm_zmmm512b64_imm8],
        &[VX, HX, WX, IB],
        BR,
    );
    m[0x04] = p66e(w0(evex3(
        [C::EVEX_Vpermilps_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vpermilps_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vpermilps_zmm_k1z_zmmm512b32_imm8],
        &[VX, WX, IB],
        BR,
        FV32,
    )));
    m[0x05] = p66e(w1(evex3(
        [C::EVEX_Vpermilpd_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vpermilpd_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vpermilpd_zmm_k1z_zmmm512b64_imm8],
        &[VX, WX, IB],
        BR,
        FV64,
    )));
    m[0x08] = p66e(w0(evex3(
        [C::EVEX_Vrndscaleps_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vrndscaleps_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vrndscaleps_zmm_k1z_zmmm512b32_imm8_sae],
        &[VX, WX, IB],
        BSAE,
        FV32,
    )));
    m[0x09] = p66e(w1(evex3(
        [C::EVEX_Vrndscalepd_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vrndscalepd_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vrndscalepd_zmm_k1z_zmmm512b64_imm8_sae],
        &[VX, WX, IB],
        BSAE,
        FV64,
    )));
    m[0x0a] = p66e(w0(scalar(C::EVEX_Vrndscaless_xmm_k1z_xmm_xmmm32_imm8_sae, &[VX, HX, WX, IB], SAE, N4)));
    m[0x0b] = p66e(w1(scalar(C::EVEX_Vrndscalesd_xmm_k1z_xmm_xmmm64_imm8_sae, &[VX, HX, WX, IB], SAE, N8)));
    m[0x0f] = ibw(
        [C::EVEX_Vpalignr_xmm_k1z_xmm_xmmm128_imm8, C::EVEX_Vpalignr_ymm_k1z_ymm_ymmm256_imm8, C::EVEX_Vpalignr_zmm_k1z_zmm_zmmm512_imm8],
        &[VX, HX, WX, IB],
    );

    m[0x14] = p66e(l0(scalar(C::EVEX_Vpextrb_r32m8_xmm_imm8, &[ED, VX, IB], NOMASK, N1)));
    m[0x15] = p66e(l0(scalar(C::EVEX_Vpextrw_r32m16_xmm_imm8, &[ED, VX, IB], NOMASK, N2)));
    m[0x16] = p66e(l0(gpr_w(
        scalar(C::EVEX_Vpextrd_rm32_xmm_imm8, &[ED, VX, IB], NOMASK, N4),
        scalar(C::EVEX_Vpextrq_rm64_xmm_imm8, &[EQ, VX, IB], NOMASK, N8),
    )));
    m[0x17] = p66e(l0(scalar(C::EVEX_Vextractps_rm32_xmm_imm8, &[ED, VX, IB], NOMASK, N4)));
    m[0x20] = p66e(l0(scalar(C::EVEX_Vpinsrb_xmm_xmm_r32m8_imm8, &[VX, HX, ED, IB], NOMASK, N1)));
    m[0x21] = p66e(w0(l0(scalar(C::EVEX_Vinsertps_xmm_xmm_xmmm32_imm8, &[VX, HX, WX, IB], NOMASK, N4))));
    m[0x22] = p66e(l0(gpr_w(
        scalar(C::EVEX_Vpinsrd_xmm_xmm_rm32_imm8, &[VX, HX, ED, IB], NOMASK, N4),
        scalar(C::EVEX_Vpinsrq_xmm_xmm_rm64_imm8, &[VX, HX, EQ, IB], NOMASK, N8),
    )));

    // 128-bit and 256-bit lane inserts and extracts.
    let ins128 = |c: [C; 2]| -> Node {
        evl(
            [None, Some(c[0]), Some(c[1])],
            [&[], &[VY, HY, WX, IB], &[VZ, HZ, WX, IB]],
            NONE,
            [N16, N16, N16],
        )
    };
    let ext128 = |c: [C; 2]| -> Node {
        evl(
            [None, Some(c[0]), Some(c[1])],
            [&[], &[WX, VY, IB], &[WX, VZ, IB]],
            NONE,
            [N16, N16, N16],
        )
    };
    let ins256 = |c: C| -> Node {
        evl([None, None, Some(c)], [&[], &[], &[VZ, HZ, WY, IB]], NONE, [N32, N32, N32])
    };
    let ext256 = |c: C| -> Node {
        evl([None, None, Some(c)], [&[], &[], &[WY, VZ, IB]], NONE, [N32, N32, N32])
    };
    m[0x18] = p66e(w(
        ins128([C::EVEX_Vinsertf32x4_ymm_k1z_ymm_xmmm128_imm8, C::EVEX_Vinsertf32x4_zmm_k1z_zmm_xmmm128_imm8]),
        ins128([C::EVEX_Vinsertf64x2_ymm_k1z_ymm_xmmm128_imm8, C::EVEX_Vinsertf64x2_zmm_k1z_zmm_xmmm128_imm8]),
    ));
    m[0x19] = p66e(w(
        ext128([C::EVEX_Vextractf32x4_xmmm128_k1z_ymm_imm8, C::EVEX_Vextractf32x4_xmmm128_k1z_zmm_imm8]),
        ext128([C::EVEX_Vextractf64x2_xmmm128_k1z_ymm_imm8, C::EVEX_Vextractf64x2_xmmm128_k1z_zmm_imm8]),
    ));
    m[0x1a] = p66e(w(
        ins256(C::EVEX_Vinsertf32x8_zmm_k1z_zmm_ymmm256_imm8),
        ins256(C::EVEX_Vinsertf64x4_zmm_k1z_zmm_ymmm256_imm8),
    ));
    m[0x1b] = p66e(w(
        ext256(C::EVEX_Vextractf32x8_ymmm256_k1z_zmm_imm8),
        ext256(C::EVEX_Vextractf64x4_ymmm256_k1z_zmm_imm8),
    ));
    m[0x38] = p66e(w(
        ins128([C::EVEX_Vinserti32x4_ymm_k1z_ymm_xmmm128_imm8, C::EVEX_Vinserti32x4_zmm_k1z_zmm_xmmm128_imm8]),
        ins128([C::EVEX_Vinserti64x2_ymm_k1z_ymm_xmmm128_imm8, C::EVEX_Vinserti64x2_zmm_k1z_zmm_xmmm128_imm8]),
    ));
    m[0x39] = p66e(w(
        ext128([C::EVEX_Vextracti32x4_xmmm128_k1z_ymm_imm8, C::EVEX_Vextracti32x4_xmmm128_k1z_zmm_imm8]),
        ext128([C::EVEX_Vextracti64x2_xmmm128_k1z_ymm_imm8, C::EVEX_Vextracti64x2_xmmm128_k1z_zmm_imm8]),
    ));
    m[0x3a] = p66e(w(
        ins256(C::EVEX_Vinserti32x8_zmm_k1z_zmm_ymmm256_imm8),
        ins256(C::EVEX_Vinserti64x4_zmm_k1z_zmm_ymmm256_imm8),
    ));
    m[0x3b] = p66e(w(
        ext256(C::EVEX_Vextracti32x8_ymmm256_k1z_zmm_imm8),
        ext256(C::EVEX_Vextracti64x4_ymmm256_k1z_zmm_imm8),
    ));
    m[0x1d] = p66e(w0(evl(
        [
            Some(C::EVEX_Vcvtps2ph_xmmm64_k1z_xmm_imm8),
            Some(C::EVEX_Vcvtps2ph_xmmm128_k1z_ymm_imm8),
            Some(C::EVEX_Vcvtps2ph_ymmm256_k1z_zmm_imm8_sae),
        ],
        [&[WX, VX, IB], &[WX, VY, IB], &[WY, VZ, IB]],
        SAE,
        [N8, N16, N32],
    )));

    let kcmp_imm = [
        (0x1e,
         [C::EVEX_Vpcmpud_kr_k1_xmm_xmmm128b32_imm8, C::EVEX_Vpcmpud_kr_k1_ymm_ymmm256b32_imm8, C::EVEX_Vpcmpud_kr_k1_zmm_zmmm512b32_imm8],
         [C::EVEX_Vpcmpuq_kr_k1_xmm_xmmm128b64_imm8, C::EVEX_Vpcmpuq_kr_k1_ymm_ymmm256b64_imm8, C::EVEX_Vpcmpuq_kr_k1_zmm_zmmm512b64_imm8]),
        (0x1f,
         [C::EVEX_Vpcmpd_kr_k1_xmm_xmmm128b32_imm8, C::EVEX_Vpcmpd_kr_k1_ymm_ymmm256b32_imm8, C::EVEX_Vpcmpd_kr_k1_zmm_zmmm512b32_imm8],
         [C::EVEX_Vpcmpq_kr_k1_xmm_xmmm128b64_imm8, C::EVEX_Vpcmpq_kr_k1_ymm_ymmm256b64_imm8, C::EVEX_Vpcmpq_kr_k1_zmm_zmmm512b64_imm8]),
    ];
    for &(op, d, q) in kcmp_imm.iter() {
        m[op] = idq(d, q, &[KG, HX, WX, IB], KDST_BR);
    }
    let kcmp_bw = [
        (0x3e,
         [C::EVEX_Vpcmpub_kr_k1_xmm_xmmm128_imm8, C::EVEX_Vpcmpub_kr_k1_ymm_ymmm256_imm8, C::EVEX_Vpcmpub_kr_k1_zmm_zmmm512_imm8],
         [C::EVEX_Vpcmpuw_kr_k1_xmm_xmmm128_imm8, C::EVEX_Vpcmpuw_kr_k1_ymm_ymmm256_imm8, C::EVEX_Vpcmpuw_kr_k1_zmm_zmmm512_imm8]),
        (0x3f,
         [C::EVEX_Vpcmpb_kr_k1_xmm_xmmm128_imm8, C::EVEX_Vpcmpb_kr_k1_ymm_ymmm256_imm8, C::EVEX_Vpcmpb_kr_k1_zmm_zmmm512_imm8],
         [C::EVEX_Vpcmpw_kr_k1_xmm_xmmm128_imm8, C::EVEX_Vpcmpw_kr_k1_ymm_ymmm256_imm8, C::EVEX_Vpcmpw_kr_k1_zmm_zmmm512_imm8]),
    ];
    for &(op, b, wd) in kcmp_bw.iter() {
        let ops = [KG, HX, WX, IB];
        m[op] = p66e(w(evex3(b, &ops, KDST, FVM), evex3(wd, &ops, KDST, FVM)));
    }

    m[0x25] = idq(
        [C::EVEX_Vpternlogd_xmm_k1z_xmm_xmmm128b32_imm8, C::EVEX_Vpternlogd_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Vpternlogd_zmm_k1z_zmm_zmmm512b32_imm8],
        [C::EVEX_Vpternlogq_xmm_k1z_xmm_xmmm128b64_imm8, C::EVEX_Vpternlogq_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Vpternlogq_zmm_k1z_zmm_zmmm512b64_imm8],
        &[VX, HX, WX, IB],
        BR,
    );
    m[0x26] = idq(
        [C::EVEX_Vgetmantps_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vgetmantps_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vgetmantps_zmm_k1z_zmmm512b32_imm8_sae],
        [C::EVEX_Vgetmantpd_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vgetmantpd_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vgetmantpd_zmm_k1z_zmmm512b64_imm8_sae],
        &[VX, WX, IB],
        BSAE,
    );
    m[0x27] = p66e(w(
        scalar(C::EVEX_Vgetmantss_xmm_k1z_xmm_xmmm32_imm8_sae, &[VX, HX, WX, IB], SAE, N4),
        scalar(C::EVEX_Vgetmantsd_xmm_k1z_xmm_xmmm64_imm8_sae, &[VX, HX, WX, IB], SAE, N8),
    ));
    m[0x44] = p66e(evex3(
        [C::EVEX_Vpclmulqdq_xmm_xmm_xmmm128_imm8, C::EVEX_Vpclmulqdq_ymm_ymm_ymmm256_imm8, C::EVEX_Vpclmulqdq_zmm_zmm_zmmm512_imm8],
        &[VX, HX, WX, IB],
        NOMASK,
        FVM,
    ));
    m[0x23] = p66e(w(
        ev12(C::EVEX_Vshuff32x4_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Vshuff32x4_zmm_k1z_zmm_zmmm512b32_imm8, &[VX, HX, WX, IB], BR, FV32),
        ev12(C::EVEX_Vshuff64x2_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Vshuff64x2_zmm_k1z_zmm_zmmm512b64_imm8, &[VX, HX, WX, IB], BR, FV64),
    ));
    m[0x43] = p66e(w(
        ev12(C::EVEX_Vshufi32x4_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Vshufi32x4_zmm_k1z_zmm_zmmm512b32_imm8, &[VX, HX, WX, IB], BR, FV32),
        ev12(C::EVEX_Vshufi64x2_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Vshufi64x2_zmm_k1z_zmm_zmmm512b64_imm8, &[VX, HX, WX, IB], BR, FV64),
    ));
    m[0x42] = p66e(w0(evex3(
        [C::EVEX_Vdbpsadbw_xmm_k1z_xmm_xmmm128_imm8, C::EVEX_Vdbpsadbw_ymm_k1z_ymm_ymmm256_imm8, C::EVEX_Vdbpsadbw_zmm_k1z_zmm_zmmm512_imm8],
        &[VX, HX, WX, IB],
        NONE,
        FVM,
    )));
    m[0x50] = idq(
        [C::EVEX_Vrangeps_xmm_k1z_xmm_xmmm128b32_imm8, C::EVEX_Vrangeps_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Vrangeps_zmm_k1z_zmm_zmmm512b32_imm8_sae],
        [C::EVEX_Vrangepd_xmm_k1z_xmm_xmmm128b64_imm8, C::EVEX_Vrangepd_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Vrangepd_zmm_k1z_zmm_zmmm512b64_imm8_sae],
        &[VX, HX, WX, IB],
        BSAE,
    );
    m[0x56] = idq(
        [C::EVEX_Vreduceps_xmm_k1z_xmmm128b32_imm8, C::EVEX_Vreduceps_ymm_k1z_ymmm256b32_imm8, C::EVEX_Vreduceps_zmm_k1z_zmmm512b32_imm8_sae],
        [C::EVEX_Vreducepd_xmm_k1z_xmmm128b64_imm8, C::EVEX_Vreducepd_ymm_k1z_ymmm256b64_imm8, C::EVEX_Vreducepd_zmm_k1z_zmmm512b64_imm8_sae],
        &[VX, WX, IB],
        BSAE,
    );
    let scalar_imm = [
        (0x51, C::EVEX_Vrangess_xmm_k1z_xmm_xmmm32_imm8_sae, C::EVEX_Vrangesd_xmm_k1z_xmm_xmmm64_imm8_sae),
        (0x55, C::EVEX_Vfixupimmss_xmm_k1z_xmm_xmmm32_imm8_sae, C::EVEX_Vfixupimmsd_xmm_k1z_xmm_xmmm64_imm8_sae),
        (0x57, C::EVEX_Vreducess_xmm_k1z_xmm_xmmm32_imm8_sae, C::EVEX_Vreducesd_xmm_k1z_xmm_xmmm64_imm8_sae),
    ];
    for &(op, ss, sd) in scalar_imm.iter() {
        m[op] = sdq(ss, sd, &[VX, HX, WX, IB], SAE);
    }
    m[0x66] = idq(
        [C::EVEX_Vfpclassps_kr_k1_xmmm128b32_imm8, C::EVEX_Vfpclassps_kr_k1_ymmm256b32_imm8, C::EVEX_Vfpclassps_kr_k1_zmmm512b32_imm8],
        [C::EVEX_Vfpclasspd_kr_k1_xmmm128b64_imm8, C::EVEX_Vfpclasspd_kr_k1_ymmm256b64_imm8, C::EVEX_Vfpclasspd_kr_k1_zmmm512b64_imm8],
        &[KG, WX, IB],
        KDST_BR,
    );
    m[0x67] = sdq(C::EVEX_Vfpclassss_kr_k1_xmmm32_imm8, C::EVEX_Vfpclasssd_kr_k1_xmmm64_imm8, &[KG, WX, IB], KDST);
    m[0x54] = idq(
        [C::EVEX_Vfixupimmps_xmm_k1z_xmm_xmmm128b32_imm8, C::EVEX_Vfixupimmps_ymm_k1z_ymm_ymmm256b32_imm8, C::EVEX_Vfixupimmps_zmm_k1z_zmm_zmmm512b32_imm8_sae],
        [C::EVEX_Vfixupimmpd_xmm_k1z_xmm_xmmm128b64_imm8, C::EVEX_Vfixupimmpd_ymm_k1z_ymm_ymmm256b64_imm8, C::EVEX_Vfixupimmpd_zmm_k1z_zmm_zmmm512b64_imm8_sae],
        &[VX, HX, WX, IB],
        BSAE,
    );

    m
}

/// AVX512-FP16, packed forms without a prefix and scalar forms with F3.
fn map5() -> Vec<Node> {
    let mut m = blank();

    let half = |ph: [C; 3], sh: C, packed: TermFlags, scal: TermFlags| -> Node {
        let ops = [VX, HX, WX];
        mp(
            w0(evex3(ph, &ops, packed, FV16)),
            inv(),
            w0(scalar(sh, &ops, scal, N2)),
            inv(),
        )
    };

    m[0x10] = mp(
        inv(),
        inv(),
        w0(rm(
            scalar(C::EVEX_Vmovsh_xmm_k1z_xmm_xmm, &[VX, HX, UX], NONE, N2),
            scalar(C::EVEX_Vmovsh_xmm_k1z_m16, &[VX, M], NONE, N2),
        )),
        inv(),
    );
    m[0x11] = mp(
        inv(),
        inv(),
        w0(rm(
            scalar(C::EVEX_Vmovsh_xmm_k1z_xmm_xmm_5_11, &[UX, HX, VX], NONE, N2),
            scalar(C::EVEX_Vmovsh_m16_k1_xmm, &[M, VX], NONE, N2),
        )),
        inv(),
    );
    m[0x2e] = mp(w0(scalar(C::EVEX_Vucomish_xmm_xmmm16_sae, &[VX, WX], SAE | NOMASK, N2)), inv(), inv(), inv());
    m[0x2f] = mp(w0(scalar(C::EVEX_Vcomish_xmm_xmmm16_sae, &[VX, WX], SAE | NOMASK, N2)), inv(), inv(), inv());
    m[0x51] = mp(
        w0(evex3(
            [C::EVEX_Vsqrtph_xmm_k1z_xmmm128b16, C::EVEX_Vsqrtph_ymm_k1z_ymmm256b16, C::EVEX_Vsqrtph_zmm_k1z_zmmm512b16_er],
            &[VX, WX],
            BER,
            FV16,
        )),
        inv(),
        w0(scalar(C::EVEX_Vsqrtsh_xmm_k1z_xmm_xmmm16_er, &[VX, HX, WX], ER, N2)),
        inv(),
    );
    m[0x58] = half(
        [C::EVEX_Vaddph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vaddph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vaddph_zmm_k1z_zmm_zmmm512b16_er],
        C::EVEX_Vaddsh_xmm_k1z_xmm_xmmm16_er,
        BER,
        ER,
    );
    m[0x59] = half(
        [C::EVEX_Vmulph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vmulph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vmulph_zmm_k1z_zmm_zmmm512b16_er],
        C::EVEX_Vmulsh_xmm_k1z_xmm_xmmm16_er,
        BER,
        ER,
    );
    m[0x5c] = half(
        [C::EVEX_Vsubph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vsubph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vsubph_zmm_k1z_zmm_zmmm512b16_er],
        C::EVEX_Vsubsh_xmm_k1z_xmm_xmmm16_er,
        BER,
        ER,
    );
    m[0x5d] = half(
        [C::EVEX_Vminph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vminph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vminph_zmm_k1z_zmm_zmmm512b16_sae],
        C::EVEX_Vminsh_xmm_k1z_xmm_xmmm16_sae,
        BSAE,
        SAE,
    );
    m[0x5e] = half(
        [C::EVEX_Vdivph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vdivph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vdivph_zmm_k1z_zmm_zmmm512b16_er],
        C::EVEX_Vdivsh_xmm_k1z_xmm_xmmm16_er,
        BER,
        ER,
    );
    m[0x5f] = half(
        [C::EVEX_Vmaxph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vmaxph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vmaxph_zmm_k1z_zmm_zmmm512b16_sae],
        C::EVEX_Vmaxsh_xmm_k1z_xmm_xmmm16_sae,
        BSAE,
        SAE,
    );
    m[0x6e] = p66e(w0(l0(scalar(C::EVEX_Vmovw_xmm_r32m16, &[VX, ED], NOMASK, N2))));
    m[0x7e] = p66e(w0(l0(scalar(C::EVEX_Vmovw_r32m16_xmm, &[ED, VX], NOMASK, N2))));

    m
}

/// AVX512-FP16, 66 prefixed and W0 throughout.
fn map6() -> Vec<Node> {
    let mut m = blank();

    let packed = |c: [C; 3], ops: &[Operand], flags: TermFlags| -> Node { p66e(w0(evex3(c, ops, flags, FV16))) };
    let single = |c: C, flags: TermFlags| -> Node { p66e(w0(scalar(c, &[VX, HX, WX], flags, N2))) };

    m[0x2c] = packed(
        [C::EVEX_Vscalefph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vscalefph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vscalefph_zmm_k1z_zmm_zmmm512b16_er],
        &[VX, HX, WX],
        BER,
    );
    m[0x2d] = single(C::EVEX_Vscalefsh_xmm_k1z_xmm_xmmm16_er, ER);
    m[0x42] = packed(
        [C::EVEX_Vgetexpph_xmm_k1z_xmmm128b16, C::EVEX_Vgetexpph_ymm_k1z_ymmm256b16, C::EVEX_Vgetexpph_zmm_k1z_zmmm512b16_sae],
        &[VX, WX],
        BSAE,
    );
    m[0x43] = single(C::EVEX_Vgetexpsh_xmm_k1z_xmm_xmmm16_sae, SAE);
    m[0x4c] = packed(
        [C::EVEX_Vrcpph_xmm_k1z_xmmm128b16, C::EVEX_Vrcpph_ymm_k1z_ymmm256b16, C::EVEX_Vrcpph_zmm_k1z_zmmm512b16],
        &[VX, WX],
        BR,
    );
    m[0x4d] = single(C::EVEX_Vrcpsh_xmm_k1z_xmm_xmmm16, NONE);
    m[0x4e] = packed(
        [C::EVEX_Vrsqrtph_xmm_k1z_xmmm128b16, C::EVEX_Vrsqrtph_ymm_k1z_ymmm256b16, C::EVEX_Vrsqrtph_zmm_k1z_zmmm512b16],
        &[VX, WX],
        BR,
    );
    m[0x4f] = single(C::EVEX_Vrsqrtsh_xmm_k1z_xmm_xmmm16, NONE);

    let fma = [
        (0x98, [C::EVEX_Vfmadd132ph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vfmadd132ph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vfmadd132ph_zmm_k1z_zmm_zmmm512b16_er]),
        (0xa8, [C::EVEX_Vfmadd213ph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vfmadd213ph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vfmadd213ph_zmm_k1z_zmm_zmmm512b16_er]),
        (0xb8, [C::EVEX_Vfmadd231ph_xmm_k1z_xmm_xmmm128b16, C::EVEX_Vfmadd231ph_ymm_k1z_ymm_ymmm256b16, C::EVEX_Vfmadd231ph_zmm_k1z_zmm_zmmm512b16_er]),
    ];
    for &(op, c) in fma.iter() {
        m[op] = packed(c, &[VX, HX, WX], BER);
    }
    m[0x99] = single(C::EVEX_Vfmadd132sh_xmm_k1z_xmm_xmmm16_er, ER);
    m[0xa9] = single(C::EVEX_Vfmadd213sh_xmm_k1z_xmm_xmmm16_er, ER);
    m[0xb9] = single(C::EVEX_Vfmadd231sh_xmm_k1z_xmm_xmmm16_er, ER);

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_de::kinds::Family;
    use crate::table_de::TableDeserializer;

    #[test]
    fn evex_blob_reads_back() {
        let mut w = TableWriter::new();
        let roots = write(&mut w).unwrap();
        let records = TableDeserializer::new(Family::Evex, &w.finish())
            .read_all()
            .unwrap();
        assert_eq!(roots.len(), 5);
        for &id in &roots {
            assert_eq!(records.table(id).unwrap().len(), 256);
        }
    }

    #[test]
    fn sae_forms_take_the_512_bit_entry() {
        let n = evex3(
            [C::EVEX_Vminps_xmm_k1z_xmm_xmmm128b32, C::EVEX_Vminps_ymm_k1z_ymm_ymmm256b32, C::EVEX_Vminps_zmm_k1z_zmm_zmmm512b32_sae],
            &[VX, HX, WX],
            BSAE,
            FV32,
        );
        match n {
            Node::VectorLength { er, .. } => assert!(er),
            other => panic!("unexpected node {:?}", other),
        }
    }
}
