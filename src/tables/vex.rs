//! VEX encoded instructions.

use crate::code::Code as C;
use crate::error::TableError;
use crate::handlers::{Operand, RegWidth, Sizing, TermFlags, VecClass};
use crate::table_de::writer::{Node, TableWriter};

use super::ops::*;

const RQ: Operand = Operand::GprRm(RegWidth::Q64);
const VSX: Operand = Operand::Vsib(VecClass::Xmm);
const VSY: Operand = Operand::Vsib(VecClass::Ymm);

/// Writes the VEX maps. Roots: map 0, 0F, 0F38, 0F3A.
pub(super) fn write(w: &mut TableWriter) -> Result<Vec<u32>, TableError> {
    // mmmmm = 0 is reserved.
    let map0 = w.array(&blank())?;
    let map0f = w.array(&map0f())?;
    let map0f38 = w.array(&map0f38())?;
    let map0f3a = w.array(&map0f3a())?;

    Ok(vec![map0, map0f, map0f38, map0f3a])
}

/// 66 prefixed, 128 and 256-bit.
fn p66v(c128: C, c256: C, ops: &[Operand]) -> Node {
    mp(inv(), vex2l(c128, c256, ops), inv(), inv())
}

/// 66 prefixed, 128-bit only.
fn p66l0(h: impl Into<Node>) -> Node {
    mp(inv(), l0(h), inv(), inv())
}

/// 66 prefixed, 256-bit only.
fn p66l1(h: impl Into<Node>) -> Node {
    mp(inv(), vl(inv(), h, inv()), inv(), inv())
}

/// Packed single/double with vvvv, both lengths, and the scalar forms.
fn arith(ps: [C; 2], pd: [C; 2], ss: C, sd: C) -> Node {
    let ops = [VX, HX, WX];
    mp(
        vex2l(ps[0], ps[1], &ops),
        vex2l(pd[0], pd[1], &ops),
        fx(ss, &ops),
        fx(sd, &ops),
    )
}

/// Packed forms only.
fn packed(ps: [C; 2], pd: [C; 2], ops: &[Operand]) -> Node {
    mp(vex2l(ps[0], ps[1], ops), vex2l(pd[0], pd[1], ops), inv(), inv())
}

/// Opmask ops: NP W0/W1 and 66 W0/W1 select the word/quad/byte/dword forms.
fn kmask(l1: bool, ops: &[Operand], kw: C, kq: C, kb: C, kd: C) -> Node {
    let h = mp(
        w(fx(kw, ops), fx(kq, ops)),
        w(fx(kb, ops), fx(kd, ops)),
        inv(),
        inv(),
    );
    if l1 {
        vl(inv(), h, inv())
    } else {
        l0(h)
    }
}

/// W0 selects the single precision form, W1 the double precision form, both lengths.
fn fma(ps: [C; 2], pd: [C; 2]) -> Node {
    let ops = [VX, HX, WX];
    mp(inv(), w(vex2l(ps[0], ps[1], &ops), vex2l(pd[0], pd[1], &ops)), inv(), inv())
}

fn fma_scalar(ss: C, sd: C) -> Node {
    let ops = [VX, HX, WX];
    mp(inv(), w(fx(ss, &ops), fx(sd, &ops)), inv(), inv())
}

fn map0f() -> Vec<Node> {
    let mut m = blank();

    m[0x10] = mp(
        vex2l(C::VEX_Vmovups_xmm_xmmm128, C::VEX_Vmovups_ymm_ymmm256, &[VX, WX]),
        vex2l(C::VEX_Vmovupd_xmm_xmmm128, C::VEX_Vmovupd_ymm_ymmm256, &[VX, WX]),
        rm(fx(C::VEX_Vmovss_xmm_xmm_xmm, &[VX, HX, UX]), fx(C::VEX_Vmovss_xmm_m32, &[VX, M])),
        rm(fx(C::VEX_Vmovsd_xmm_xmm_xmm, &[VX, HX, UX]), fx(C::VEX_Vmovsd_xmm_m64, &[VX, M])),
    );
    m[0x11] = mp(
        vex2l(C::VEX_Vmovups_xmmm128_xmm, C::VEX_Vmovups_ymmm256_ymm, &[WX, VX]),
        vex2l(C::VEX_Vmovupd_xmmm128_xmm, C::VEX_Vmovupd_ymmm256_ymm, &[WX, VX]),
        rm(fx(C::VEX_Vmovss_xmm_xmm_xmm_0F11, &[UX, HX, VX]), fx(C::VEX_Vmovss_m32_xmm, &[M, VX])),
        rm(fx(C::VEX_Vmovsd_xmm_xmm_xmm_0F11, &[UX, HX, VX]), fx(C::VEX_Vmovsd_m64_xmm, &[M, VX])),
    );
    m[0x12] = mp(
        l0(rm(
            fx(C::VEX_Vmovhlps_xmm_xmm_xmm, &[VX, HX, UX]),
            fx(C::VEX_Vmovlps_xmm_xmm_m64, &[VX, HX, M]),
        )),
        l0(fx(C::VEX_Vmovlpd_xmm_xmm_m64, &[VX, HX, M])),
        vex2l(C::VEX_Vmovsldup_xmm_xmmm128, C::VEX_Vmovsldup_ymm_ymmm256, &[VX, WX]),
        vl(
            fx(C::VEX_Vmovddup_xmm_xmmm64, &[VX, WX]),
            fx(C::VEX_Vmovddup_ymm_ymmm256, &[VY, WY]),
            inv(),
        ),
    );
    m[0x13] = mp(
        l0(fx(C::VEX_Vmovlps_m64_xmm, &[M, VX])),
        l0(fx(C::VEX_Vmovlpd_m64_xmm, &[M, VX])),
        inv(),
        inv(),
    );
    m[0x14] = packed(
        [C::VEX_Vunpcklps_xmm_xmm_xmmm128, C::VEX_Vunpcklps_ymm_ymm_ymmm256],
        [C::VEX_Vunpcklpd_xmm_xmm_xmmm128, C::VEX_Vunpcklpd_ymm_ymm_ymmm256],
        &[VX, HX, WX],
    );
    m[0x15] = packed(
        [C::VEX_Vunpckhps_xmm_xmm_xmmm128, C::VEX_Vunpckhps_ymm_ymm_ymmm256],
        [C::VEX_Vunpckhpd_xmm_xmm_xmmm128, C::VEX_Vunpckhpd_ymm_ymm_ymmm256],
        &[VX, HX, WX],
    );
    m[0x16] = mp(
        l0(rm(
            fx(C::VEX_Vmovlhps_xmm_xmm_xmm, &[VX, HX, UX]),
            fx(C::VEX_Vmovhps_xmm_xmm_m64, &[VX, HX, M]),
        )),
        l0(fx(C::VEX_Vmovhpd_xmm_xmm_m64, &[VX, HX, M])),
        vex2l(C::VEX_Vmovshdup_xmm_xmmm128, C::VEX_Vmovshdup_ymm_ymmm256, &[VX, WX]),
        inv(),
    );
    m[0x17] = mp(
        l0(fx(C::VEX_Vmovhps_m64_xmm, &[M, VX])),
        l0(fx(C::VEX_Vmovhpd_m64_xmm, &[M, VX])),
        inv(),
        inv(),
    );
    m[0x28] = packed(
        [C::VEX_Vmovaps_xmm_xmmm128, C::VEX_Vmovaps_ymm_ymmm256],
        [C::VEX_Vmovapd_xmm_xmmm128, C::VEX_Vmovapd_ymm_ymmm256],
        &[VX, WX],
    );
    m[0x29] = packed(
        [C::VEX_Vmovaps_xmmm128_xmm, C::VEX_Vmovaps_ymmm256_ymm],
        [C::VEX_Vmovapd_xmmm128_xmm, C::VEX_Vmovapd_ymmm256_ymm],
        &[WX, VX],
    );
    m[0x2a] = mp(
        inv(),
        inv(),
        sz(Sizing::W, &[C::VEX_Vcvtsi2ss_xmm_xmm_rm32, C::VEX_Vcvtsi2ss_xmm_xmm_rm64], &[VX, HX, EV]),
        sz(Sizing::W, &[C::VEX_Vcvtsi2sd_xmm_xmm_rm32, C::VEX_Vcvtsi2sd_xmm_xmm_rm64], &[VX, HX, EV]),
    );
    m[0x2b] = packed(
        [C::VEX_Vmovntps_m128_xmm, C::VEX_Vmovntps_m256_ymm],
        [C::VEX_Vmovntpd_m128_xmm, C::VEX_Vmovntpd_m256_ymm],
        &[M, VX],
    );
    m[0x2c] = mp(
        inv(),
        inv(),
        sz(Sizing::W, &[C::VEX_Vcvttss2si_r32_xmmm32, C::VEX_Vcvttss2si_r64_xmmm32], &[GV, WX]),
        sz(Sizing::W, &[C::VEX_Vcvttsd2si_r32_xmmm64, C::VEX_Vcvttsd2si_r64_xmmm64], &[GV, WX]),
    );
    m[0x2d] = mp(
        inv(),
        inv(),
        sz(Sizing::W, &[C::VEX_Vcvtss2si_r32_xmmm32, C::VEX_Vcvtss2si_r64_xmmm32], &[GV, WX]),
        sz(Sizing::W, &[C::VEX_Vcvtsd2si_r32_xmmm64, C::VEX_Vcvtsd2si_r64_xmmm64], &[GV, WX]),
    );
    m[0x2e] = mp(
        fx(C::VEX_Vucomiss_xmm_xmmm32, &[VX, WX]),
        fx(C::VEX_Vucomisd_xmm_xmmm64, &[VX, WX]),
        inv(),
        inv(),
    );
    m[0x2f] = mp(
        fx(C::VEX_Vcomiss_xmm_xmmm32, &[VX, WX]),
        fx(C::VEX_Vcomisd_xmm_xmmm64, &[VX, WX]),
        inv(),
        inv(),
    );

    let kbin = [
        (0x41, [C::VEX_Kandw_kr_kr_kr, C::VEX_Kandq_kr_kr_kr, C::VEX_Kandb_kr_kr_kr, C::VEX_Kandd_kr_kr_kr]),
        (0x42, [C::VEX_Kandnw_kr_kr_kr, C::VEX_Kandnq_kr_kr_kr, C::VEX_Kandnb_kr_kr_kr, C::VEX_Kandnd_kr_kr_kr]),
        (0x45, [C::VEX_Korw_kr_kr_kr, C::VEX_Korq_kr_kr_kr, C::VEX_Korb_kr_kr_kr, C::VEX_Kord_kr_kr_kr]),
        (0x46, [C::VEX_Kxnorw_kr_kr_kr, C::VEX_Kxnorq_kr_kr_kr, C::VEX_Kxnorb_kr_kr_kr, C::VEX_Kxnord_kr_kr_kr]),
        (0x47, [C::VEX_Kxorw_kr_kr_kr, C::VEX_Kxorq_kr_kr_kr, C::VEX_Kxorb_kr_kr_kr, C::VEX_Kxord_kr_kr_kr]),
        (0x4a, [C::VEX_Kaddw_kr_kr_kr, C::VEX_Kaddq_kr_kr_kr, C::VEX_Kaddb_kr_kr_kr, C::VEX_Kaddd_kr_kr_kr]),
    ];
    for &(op, c) in kbin.iter() {
        m[op] = kmask(true, &[KG, KH, KR], c[0], c[1], c[2], c[3]);
    }
    m[0x44] = kmask(
        false,
        &[KG, KR],
        C::VEX_Knotw_kr_kr, C::VEX_Knotq_kr_kr, C::VEX_Knotb_kr_kr, C::VEX_Knotd_kr_kr,
    );
    m[0x4b] = vl(
        inv(),
        mp(
            w(fx(C::VEX_Kunpckwd_kr_kr_kr, &[KG, KH, KR]), fx(C::VEX_Kunpckdq_kr_kr_kr, &[KG, KH, KR])),
            w(fx(C::VEX_Kunpckbw_kr_kr_kr, &[KG, KH, KR]), inv()),
            inv(),
            inv(),
        ),
        inv(),
    );

    m[0x50] = mp(
        vl(
            sz(Sizing::W, &[C::VEX_Vmovmskps_r32_xmm, C::VEX_Vmovmskps_r64_xmm], &[GV, UX]),
            sz(Sizing::W, &[C::VEX_Vmovmskps_r32_ymm, C::VEX_Vmovmskps_r64_ymm], &[GV, UY]),
            inv(),
        ),
        vl(
            sz(Sizing::W, &[C::VEX_Vmovmskpd_r32_xmm, C::VEX_Vmovmskpd_r64_xmm], &[GV, UX]),
            sz(Sizing::W, &[C::VEX_Vmovmskpd_r32_ymm, C::VEX_Vmovmskpd_r64_ymm], &[GV, UY]),
            inv(),
        ),
        inv(),
        inv(),
    );
    m[0x51] = mp(
        vex2l(C::VEX_Vsqrtps_xmm_xmmm128, C::VEX_Vsqrtps_ymm_ymmm256, &[VX, WX]),
        vex2l(C::VEX_Vsqrtpd_xmm_xmmm128, C::VEX_Vsqrtpd_ymm_ymmm256, &[VX, WX]),
        fx(C::VEX_Vsqrtss_xmm_xmm_xmmm32, &[VX, HX, WX]),
        fx(C::VEX_Vsqrtsd_xmm_xmm_xmmm64, &[VX, HX, WX]),
    );
    m[0x52] = mp(
        vex2l(C::VEX_Vrsqrtps_xmm_xmmm128, C::VEX_Vrsqrtps_ymm_ymmm256, &[VX, WX]),
        inv(),
        fx(C::VEX_Vrsqrtss_xmm_xmm_xmmm32, &[VX, HX, WX]),
        inv(),
    );
    m[0x53] = mp(
        vex2l(C::VEX_Vrcpps_xmm_xmmm128, C::VEX_Vrcpps_ymm_ymmm256, &[VX, WX]),
        inv(),
        fx(C::VEX_Vrcpss_xmm_xmm_xmmm32, &[VX, HX, WX]),
        inv(),
    );
    m[0x54] = packed(
        [C::VEX_Vandps_xmm_xmm_xmmm128, C::VEX_Vandps_ymm_ymm_ymmm256],
        [C::VEX_Vandpd_xmm_xmm_xmmm128, C::VEX_Vandpd_ymm_ymm_ymmm256],
        &[VX, HX, WX],
    );
    m[0x55] = packed(
        [C::VEX_Vandnps_xmm_xmm_xmmm128, C::VEX_Vandnps_ymm_ymm_ymmm256],
        [C::VEX_Vandnpd_xmm_xmm_xmmm128, C::VEX_Vandnpd_ymm_ymm_ymmm256],
        &[VX, HX, WX],
    );
    m[0x56] = packed(
        [C::VEX_Vorps_xmm_xmm_xmmm128, C::VEX_Vorps_ymm_ymm_ymmm256],
        [C::VEX_Vorpd_xmm_xmm_xmmm128, C::VEX_Vorpd_ymm_ymm_ymmm256],
        &[VX, HX, WX],
    );
    m[0x57] = packed(
        [C::VEX_Vxorps_xmm_xmm_xmmm128, C::VEX_Vxorps_ymm_ymm_ymmm256],
        [C::VEX_Vxorpd_xmm_xmm_xmmm128, C::VEX_Vxorpd_ymm_ymm_ymmm256],
        &[VX, HX, WX],
    );
    m[0x58] = arith(
        [C::VEX_Vaddps_xmm_xmm_xmmm128, C::VEX_Vaddps_ymm_ymm_ymmm256],
        [C::VEX_Vaddpd_xmm_xmm_xmmm128, C::VEX_Vaddpd_ymm_ymm_ymmm256],
        C::VEX_Vaddss_xmm_xmm_xmmm32,
        C::VEX_Vaddsd_xmm_xmm_xmmm64,
    );
    m[0x59] = arith(
        [C::VEX_Vmulps_xmm_xmm_xmmm128, C::VEX_Vmulps_ymm_ymm_ymmm256],
        [C::VEX_Vmulpd_xmm_xmm_xmmm128, C::VEX_Vmulpd_ymm_ymm_ymmm256],
        C::VEX_Vmulss_xmm_xmm_xmmm32,
        C::VEX_Vmulsd_xmm_xmm_xmmm64,
    );
    m[0x5a] = mp(
        vl(
            fx(C::VEX_Vcvtps2pd_xmm_xmmm64, &[VX, WX]),
            fx(C::VEX_Vcvtps2pd_ymm_xmmm128, &[VY, WX]),
            inv(),
        ),
        vl(
            fx(C::VEX_Vcvtpd2ps_xmm_xmmm128, &[VX, WX]),
            fx(C::VEX_Vcvtpd2ps_xmm_ymmm256, &[VX, WY]),
            inv(),
        ),
        fx(C::VEX_Vcvtss2sd_xmm_xmm_xmmm32, &[VX, HX, WX]),
        fx(C::VEX_Vcvtsd2ss_xmm_xmm_xmmm64, &[VX, HX, WX]),
    );
    m[0x5b] = mp(
        vex2l(C::VEX_Vcvtdq2ps_xmm_xmmm128, C::VEX_Vcvtdq2ps_ymm_ymmm256, &[VX, WX]),
        vex2l(C::VEX_Vcvtps2dq_xmm_xmmm128, C::VEX_Vcvtps2dq_ymm_ymmm256, &[VX, WX]),
        vex2l(C::VEX_Vcvttps2dq_xmm_xmmm128, C::VEX_Vcvttps2dq_ymm_ymmm256, &[VX, WX]),
        inv(),
    );
    m[0x5c] = arith(
        [C::VEX_Vsubps_xmm_xmm_xmmm128, C::VEX_Vsubps_ymm_ymm_ymmm256],
        [C::VEX_Vsubpd_xmm_xmm_xmmm128, C::VEX_Vsubpd_ymm_ymm_ymmm256],
        C::VEX_Vsubss_xmm_xmm_xmmm32,
        C::VEX_Vsubsd_xmm_xmm_xmmm64,
    );
    m[0x5d] = arith(
        [C::VEX_Vminps_xmm_xmm_xmmm128, C::VEX_Vminps_ymm_ymm_ymmm256],
        [C::VEX_Vminpd_xmm_xmm_xmmm128, C::VEX_Vminpd_ymm_ymm_ymmm256],
        C::VEX_Vminss_xmm_xmm_xmmm32,
        C::VEX_Vminsd_xmm_xmm_xmmm64,
    );
    m[0x5e] = arith(
        [C::VEX_Vdivps_xmm_xmm_xmmm128, C::VEX_Vdivps_ymm_ymm_ymmm256],
        [C::VEX_Vdivpd_xmm_xmm_xmmm128, C::VEX_Vdivpd_ymm_ymm_ymmm256],
        C::VEX_Vdivss_xmm_xmm_xmmm32,
        C::VEX_Vdivsd_xmm_xmm_xmmm64,
    );
    m[0x5f] = arith(
        [C::VEX_Vmaxps_xmm_xmm_xmmm128, C::VEX_Vmaxps_ymm_ymm_ymmm256],
        [C::VEX_Vmaxpd_xmm_xmm_xmmm128, C::VEX_Vmaxpd_ymm_ymm_ymmm256],
        C::VEX_Vmaxss_xmm_xmm_xmmm32,
        C::VEX_Vmaxsd_xmm_xmm_xmmm64,
    );

    let int3 = [
        (0x60, C::VEX_Vpunpcklbw_xmm_xmm_xmmm128, C::VEX_Vpunpcklbw_ymm_ymm_ymmm256),
        (0x61, C::VEX_Vpunpcklwd_xmm_xmm_xmmm128, C::VEX_Vpunpcklwd_ymm_ymm_ymmm256),
        (0x62, C::VEX_Vpunpckldq_xmm_xmm_xmmm128, C::VEX_Vpunpckldq_ymm_ymm_ymmm256),
        (0x63, C::VEX_Vpacksswb_xmm_xmm_xmmm128, C::VEX_Vpacksswb_ymm_ymm_ymmm256),
        (0x64, C::VEX_Vpcmpgtb_xmm_xmm_xmmm128, C::VEX_Vpcmpgtb_ymm_ymm_ymmm256),
        (0x65, C::VEX_Vpcmpgtw_xmm_xmm_xmmm128, C::VEX_Vpcmpgtw_ymm_ymm_ymmm256),
        (0x66, C::VEX_Vpcmpgtd_xmm_xmm_xmmm128, C::VEX_Vpcmpgtd_ymm_ymm_ymmm256),
        (0x67, C::VEX_Vpackuswb_xmm_xmm_xmmm128, C::VEX_Vpackuswb_ymm_ymm_ymmm256),
        (0x68, C::VEX_Vpunpckhbw_xmm_xmm_xmmm128, C::VEX_Vpunpckhbw_ymm_ymm_ymmm256),
        (0x69, C::VEX_Vpunpckhwd_xmm_xmm_xmmm128, C::VEX_Vpunpckhwd_ymm_ymm_ymmm256),
        (0x6a, C::VEX_Vpunpckhdq_xmm_xmm_xmmm128, C::VEX_Vpunpckhdq_ymm_ymm_ymmm256),
        (0x6b, C::VEX_Vpackssdw_xmm_xmm_xmmm128, C::VEX_Vpackssdw_ymm_ymm_ymmm256),
        (0x6c, C::VEX_Vpunpcklqdq_xmm_xmm_xmmm128, C::VEX_Vpunpcklqdq_ymm_ymm_ymmm256),
        (0x6d, C::VEX_Vpunpckhqdq_xmm_xmm_xmmm128, C::VEX_Vpunpckhqdq_ymm_ymm_ymmm256),
        (0x74, C::VEX_Vpcmpeqb_xmm_xmm_xmmm128, C::VEX_Vpcmpeqb_ymm_ymm_ymmm256),
        (0x75, C::VEX_Vpcmpeqw_xmm_xmm_xmmm128, C::VEX_Vpcmpeqw_ymm_ymm_ymmm256),
        (0x76, C::VEX_Vpcmpeqd_xmm_xmm_xmmm128, C::VEX_Vpcmpeqd_ymm_ymm_ymmm256),
        (0xd1, C::VEX_Vpsrlw_xmm_xmm_xmmm128, C::VEX_Vpsrlw_ymm_ymm_xmmm128),
        (0xd2, C::VEX_Vpsrld_xmm_xmm_xmmm128, C::VEX_Vpsrld_ymm_ymm_xmmm128),
        (0xd3, C::VEX_Vpsrlq_xmm_xmm_xmmm128, C::VEX_Vpsrlq_ymm_ymm_xmmm128),
        (0xd4, C::VEX_Vpaddq_xmm_xmm_xmmm128, C::VEX_Vpaddq_ymm_ymm_ymmm256),
        (0xd5, C::VEX_Vpmullw_xmm_xmm_xmmm128, C::VEX_Vpmullw_ymm_ymm_ymmm256),
        (0xd8, C::VEX_Vpsubusb_xmm_xmm_xmmm128, C::VEX_Vpsubusb_ymm_ymm_ymmm256),
        (0xd9, C::VEX_Vpsubusw_xmm_xmm_xmmm128, C::VEX_Vpsubusw_ymm_ymm_ymmm256),
        (0xda, C::VEX_Vpminub_xmm_xmm_xmmm128, C::VEX_Vpminub_ymm_ymm_ymmm256),
        (0xdb, C::VEX_Vpand_xmm_xmm_xmmm128, C::VEX_Vpand_ymm_ymm_ymmm256),
        (0xdc, C::VEX_Vpaddusb_xmm_xmm_xmmm128, C::VEX_Vpaddusb_ymm_ymm_ymmm256),
        (0xdd, C::VEX_Vpaddusw_xmm_xmm_xmmm128, C::VEX_Vpaddusw_ymm_ymm_ymmm256),
        (0xde, C::VEX_Vpmaxub_xmm_xmm_xmmm128, C::VEX_Vpmaxub_ymm_ymm_ymmm256),
        (0xdf, C::VEX_Vpandn_xmm_xmm_xmmm128, C::VEX_Vpandn_ymm_ymm_ymmm256),
        (0xe0, C::VEX_Vpavgb_xmm_xmm_xmmm128, C::VEX_Vpavgb_ymm_ymm_ymmm256),
        (0xe1, C::VEX_Vpsraw_xmm_xmm_xmmm128, C::VEX_Vpsraw_ymm_ymm_xmmm128),
        (0xe2, C::VEX_Vpsrad_xmm_xmm_xmmm128, C::VEX_Vpsrad_ymm_ymm_xmmm128),
        (0xe3, C::VEX_Vpavgw_xmm_xmm_xmmm128, C::VEX_Vpavgw_ymm_ymm_ymmm256),
        (0xe4, C::VEX_Vpmulhuw_xmm_xmm_xmmm128, C::VEX_Vpmulhuw_ymm_ymm_ymmm256),
        (0xe5, C::VEX_Vpmulhw_xmm_xmm_xmmm128, C::VEX_Vpmulhw_ymm_ymm_ymmm256),
        (0xe8, C::VEX_Vpsubsb_xmm_xmm_xmmm128, C::VEX_Vpsubsb_ymm_ymm_ymmm256),
        (0xe9, C::VEX_Vpsubsw_xmm_xmm_xmmm128, C::VEX_Vpsubsw_ymm_ymm_ymmm256),
        (0xea, C::VEX_Vpminsw_xmm_xmm_xmmm128, C::VEX_Vpminsw_ymm_ymm_ymmm256),
        (0xeb, C::VEX_Vpor_xmm_xmm_xmmm128, C::VEX_Vpor_ymm_ymm_ymmm256),
        (0xec, C::VEX_Vpaddsb_xmm_xmm_xmmm128, C::VEX_Vpaddsb_ymm_ymm_ymmm256),
        (0xed, C::VEX_Vpaddsw_xmm_xmm_xmmm128, C::VEX_Vpaddsw_ymm_ymm_ymmm256),
        (0xee, C::VEX_Vpmaxsw_xmm_xmm_xmmm128, C::VEX_Vpmaxsw_ymm_ymm_ymmm256),
        (0xef, C::VEX_Vpxor_xmm_xmm_xmmm128, C::VEX_Vpxor_ymm_ymm_ymmm256),
        (0xf1, C::VEX_Vpsllw_xmm_xmm_xmmm128, C::VEX_Vpsllw_ymm_ymm_xmmm128),
        (0xf2, C::VEX_Vpslld_xmm_xmm_xmmm128, C::VEX_Vpslld_ymm_ymm_xmmm128),
        (0xf3, C::VEX_Vpsllq_xmm_xmm_xmmm128, C::VEX_Vpsllq_ymm_ymm_xmmm128),
        (0xf4, C::VEX_Vpmuludq_xmm_xmm_xmmm128, C::VEX_Vpmuludq_ymm_ymm_ymmm256),
        (0xf5, C::VEX_Vpmaddwd_xmm_xmm_xmmm128, C::VEX_Vpmaddwd_ymm_ymm_ymmm256),
        (0xf6, C::VEX_Vpsadbw_xmm_xmm_xmmm128, C::VEX_Vpsadbw_ymm_ymm_ymmm256),
        (0xf8, C::VEX_Vpsubb_xmm_xmm_xmmm128, C::VEX_Vpsubb_ymm_ymm_ymmm256),
        (0xf9, C::VEX_Vpsubw_xmm_xmm_xmmm128, C::VEX_Vpsubw_ymm_ymm_ymmm256),
        (0xfa, C::VEX_Vpsubd_xmm_xmm_xmmm128, C::VEX_Vpsubd_ymm_ymm_ymmm256),
        (0xfb, C::VEX_Vpsubq_xmm_xmm_xmmm128, C::VEX_Vpsubq_ymm_ymm_ymmm256),
        (0xfc, C::VEX_Vpaddb_xmm_xmm_xmmm128, C::VEX_Vpaddb_ymm_ymm_ymmm256),
        (0xfd, C::VEX_Vpaddw_xmm_xmm_xmmm128, C::VEX_Vpaddw_ymm_ymm_ymmm256),
        (0xfe, C::VEX_Vpaddd_xmm_xmm_xmmm128, C::VEX_Vpaddd_ymm_ymm_ymmm256),
    ];
    for &(op, c128, c256) in int3.iter() {
        // Shifts by an xmm count keep the count operand at 128 bits.
        let count = matches!(op, 0xd1..=0xd3 | 0xe1 | 0xe2 | 0xf1..=0xf3);
        m[op] = if count {
            mp(
                inv(),
                vl(fx(c128, &[VX, HX, WX]), fx(c256, &[VY, HY, WX]), inv()),
                inv(),
                inv(),
            )
        } else {
            p66v(c128, c256, &[VX, HX, WX])
        };
    }

    m[0x6e] = p66l0(sz(Sizing::W, &[C::VEX_Vmovd_xmm_rm32, C::VEX_Vmovq_xmm_rm64], &[VX, EV]));
    m[0x6f] = mp(
        inv(),
        vex2l(C::VEX_Vmovdqa_xmm_xmmm128, C::VEX_Vmovdqa_ymm_ymmm256, &[VX, WX]),
        vex2l(C::VEX_Vmovdqu_xmm_xmmm128, C::VEX_Vmovdqu_ymm_ymmm256, &[VX, WX]),
        inv(),
    );
    m[0x70] = mp(
        inv(),
        vex2l(C::VEX_Vpshufd_xmm_xmmm128_imm8, C::VEX_Vpshufd_ymm_ymmm256_imm8, &[VX, WX, IB]),
        vex2l(C::VEX_Vpshufhw_xmm_xmmm128_imm8, C::VEX_Vpshufhw_ymm_ymmm256_imm8, &[VX, WX, IB]),
        vex2l(C::VEX_Vpshuflw_xmm_xmmm128_imm8, C::VEX_Vpshuflw_ymm_ymmm256_imm8, &[VX, WX, IB]),
    );
    let shift_imm = |c128: C, c256: C| p66v(c128, c256, &[HX, UX, IB]);
    m[0x71] = group(nodes![
        inv(), inv(),
        shift_imm(C::VEX_Vpsrlw_xmm_xmm_imm8, C::VEX_Vpsrlw_ymm_ymm_imm8), inv(),
        shift_imm(C::VEX_Vpsraw_xmm_xmm_imm8, C::VEX_Vpsraw_ymm_ymm_imm8), inv(),
        shift_imm(C::VEX_Vpsllw_xmm_xmm_imm8, C::VEX_Vpsllw_ymm_ymm_imm8), inv(),
    ]);
    m[0x72] = group(nodes![
        inv(), inv(),
        shift_imm(C::VEX_Vpsrld_xmm_xmm_imm8, C::VEX_Vpsrld_ymm_ymm_imm8), inv(),
        shift_imm(C::VEX_Vpsrad_xmm_xmm_imm8, C::VEX_Vpsrad_ymm_ymm_imm8), inv(),
        shift_imm(C::VEX_Vpslld_xmm_xmm_imm8, C::VEX_Vpslld_ymm_ymm_imm8), inv(),
    ]);
    m[0x73] = group(nodes![
        inv(), inv(),
        shift_imm(C::VEX_Vpsrlq_xmm_xmm_imm8, C::VEX_Vpsrlq_ymm_ymm_imm8),
        shift_imm(C::VEX_Vpsrldq_xmm_xmm_imm8, C::VEX_Vpsrldq_ymm_ymm_imm8),
        inv(), inv(),
        shift_imm(C::VEX_Vpsllq_xmm_xmm_imm8, C::VEX_Vpsllq_ymm_ymm_imm8),
        shift_imm(C::VEX_Vpslldq_xmm_xmm_imm8, C::VEX_Vpslldq_ymm_ymm_imm8),
    ]);
    m[0x77] = mp_nomodrm(
        vl_nomodrm(fx(C::VEX_Vzeroupper, &[]), fx(C::VEX_Vzeroall, &[])),
        inv_nm(),
        inv_nm(),
        inv_nm(),
    );
    m[0x7c] = mp(
        inv(),
        vex2l(C::VEX_Vhaddpd_xmm_xmm_xmmm128, C::VEX_Vhaddpd_ymm_ymm_ymmm256, &[VX, HX, WX]),
        inv(),
        vex2l(C::VEX_Vhaddps_xmm_xmm_xmmm128, C::VEX_Vhaddps_ymm_ymm_ymmm256, &[VX, HX, WX]),
    );
    m[0x7d] = mp(
        inv(),
        vex2l(C::VEX_Vhsubpd_xmm_xmm_xmmm128, C::VEX_Vhsubpd_ymm_ymm_ymmm256, &[VX, HX, WX]),
        inv(),
        vex2l(C::VEX_Vhsubps_xmm_xmm_xmmm128, C::VEX_Vhsubps_ymm_ymm_ymmm256, &[VX, HX, WX]),
    );
    m[0x7e] = mp(
        inv(),
        l0(sz(Sizing::W, &[C::VEX_Vmovd_rm32_xmm, C::VEX_Vmovq_rm64_xmm], &[EV, VX])),
        l0(fx(C::VEX_Vmovq_xmm_xmmm64, &[VX, WX])),
        inv(),
    );
    m[0x7f] = mp(
        inv(),
        vex2l(C::VEX_Vmovdqa_xmmm128_xmm, C::VEX_Vmovdqa_ymmm256_ymm, &[WX, VX]),
        vex2l(C::VEX_Vmovdqu_xmmm128_xmm, C::VEX_Vmovdqu_ymmm256_ymm, &[WX, VX]),
        inv(),
    );

    m[0x90] = kmask(
        false,
        &[KG, KW],
        C::VEX_Kmovw_kr_km16, C::VEX_Kmovq_kr_km64, C::VEX_Kmovb_kr_km8, C::VEX_Kmovd_kr_km32,
    );
    m[0x91] = kmask(
        false,
        &[M, KG],
        C::VEX_Kmovw_m16_kr, C::VEX_Kmovq_m64_kr, C::VEX_Kmovb_m8_kr, C::VEX_Kmovd_m32_kr,
    );
    m[0x92] = l0(mp(
        rm(w(fx(C::VEX_Kmovw_kr_r32, &[KG, RD]), inv()), inv()),
        rm(w(fx(C::VEX_Kmovb_kr_r32, &[KG, RD]), inv()), inv()),
        inv(),
        rm(w(fx(C::VEX_Kmovd_kr_r32, &[KG, RD]), fx(C::VEX_Kmovq_kr_r64, &[KG, RQ])), inv()),
    ));
    m[0x93] = l0(mp(
        w(fx(C::VEX_Kmovw_r32_kr, &[GD, KR]), inv()),
        w(fx(C::VEX_Kmovb_r32_kr, &[GD, KR]), inv()),
        inv(),
        w(fx(C::VEX_Kmovd_r32_kr, &[GD, KR]), fx(C::VEX_Kmovq_r64_kr, &[GQ, KR])),
    ));
    m[0x98] = kmask(
        false,
        &[KG, KR],
        C::VEX_Kortestw_kr_kr, C::VEX_Kortestq_kr_kr, C::VEX_Kortestb_kr_kr, C::VEX_Kortestd_kr_kr,
    );
    m[0x99] = kmask(
        false,
        &[KG, KR],
        C::VEX_Ktestw_kr_kr, C::VEX_Ktestq_kr_kr, C::VEX_Ktestb_kr_kr, C::VEX_Ktestd_kr_kr,
    );

    m[0xae] = group(nodes![
        inv(),
        inv(),
        mp(l0(fx(C::VEX_Vldmxcsr_m32, &[M])), inv(), inv(), inv()),
        mp(l0(fx(C::VEX_Vstmxcsr_m32, &[M])), inv(), inv(), inv()),
        inv(),
        inv(),
        inv(),
        inv(),
    ]);
    m[0xc2] = mp(
        vex2l(C::VEX_Vcmpps_xmm_xmm_xmmm128_imm8, C::VEX_Vcmpps_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]),
        vex2l(C::VEX_Vcmppd_xmm_xmm_xmmm128_imm8, C::VEX_Vcmppd_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]),
        fx(C::VEX_Vcmpss_xmm_xmm_xmmm32_imm8, &[VX, HX, WX, IB]),
        fx(C::VEX_Vcmpsd_xmm_xmm_xmmm64_imm8, &[VX, HX, WX, IB]),
    );
    m[0xc4] = p66l0(fx(C::VEX_Vpinsrw_xmm_xmm_r32m16_imm8, &[VX, HX, ED, IB]));
    m[0xc5] = p66l0(sz(
        Sizing::W,
        &[C::VEX_Vpextrw_r32_xmm_imm8, C::VEX_Vpextrw_r64_xmm_imm8],
        &[GV, UX, IB],
    ));
    m[0xc6] = packed(
        [C::VEX_Vshufps_xmm_xmm_xmmm128_imm8, C::VEX_Vshufps_ymm_ymm_ymmm256_imm8],
        [C::VEX_Vshufpd_xmm_xmm_xmmm128_imm8, C::VEX_Vshufpd_ymm_ymm_ymmm256_imm8],
        &[VX, HX, WX, IB],
    );
    m[0xd0] = mp(
        inv(),
        vex2l(C::VEX_Vaddsubpd_xmm_xmm_xmmm128, C::VEX_Vaddsubpd_ymm_ymm_ymmm256, &[VX, HX, WX]),
        inv(),
        vex2l(C::VEX_Vaddsubps_xmm_xmm_xmmm128, C::VEX_Vaddsubps_ymm_ymm_ymmm256, &[VX, HX, WX]),
    );
    m[0xd6] = p66l0(fx(C::VEX_Vmovq_xmmm64_xmm, &[WX, VX]));
    m[0xd7] = mp(
        inv(),
        vl(
            sz(Sizing::W, &[C::VEX_Vpmovmskb_r32_xmm, C::VEX_Vpmovmskb_r64_xmm], &[GV, UX]),
            sz(Sizing::W, &[C::VEX_Vpmovmskb_r32_ymm, C::VEX_Vpmovmskb_r64_ymm], &[GV, UY]),
            inv(),
        ),
        inv(),
        inv(),
    );
    m[0xe6] = mp(
        inv(),
        vl(
            fx(C::VEX_Vcvttpd2dq_xmm_xmmm128, &[VX, WX]),
            fx(C::VEX_Vcvttpd2dq_xmm_ymmm256, &[VX, WY]),
            inv(),
        ),
        vl(
            fx(C::VEX_Vcvtdq2pd_xmm_xmmm64, &[VX, WX]),
            fx(C::VEX_Vcvtdq2pd_ymm_xmmm128, &[VY, WX]),
            inv(),
        ),
        vl(
            fx(C::VEX_Vcvtpd2dq_xmm_xmmm128, &[VX, WX]),
            fx(C::VEX_Vcvtpd2dq_xmm_ymmm256, &[VX, WY]),
            inv(),
        ),
    );
    m[0xe7] = p66v(C::VEX_Vmovntdq_m128_xmm, C::VEX_Vmovntdq_m256_ymm, &[M, VX]);
    m[0xf0] = mp(
        inv(),
        inv(),
        inv(),
        vex2l(C::VEX_Vlddqu_xmm_m128, C::VEX_Vlddqu_ymm_m256, &[VX, M]),
    );
    m[0xf7] = p66l0(fx(C::VEX_Vmaskmovdqu_rDI_xmm_xmm, &[Operand::StrDstSeg, VX, UX]));

    m
}

fn map0f38() -> Vec<Node> {
    let mut m = blank();

    let int3 = [
        (0x00, C::VEX_Vpshufb_xmm_xmm_xmmm128, C::VEX_Vpshufb_ymm_ymm_ymmm256),
        (0x01, C::VEX_Vphaddw_xmm_xmm_xmmm128, C::VEX_Vphaddw_ymm_ymm_ymmm256),
        (0x02, C::VEX_Vphaddd_xmm_xmm_xmmm128, C::VEX_Vphaddd_ymm_ymm_ymmm256),
        (0x03, C::VEX_Vphaddsw_xmm_xmm_xmmm128, C::VEX_Vphaddsw_ymm_ymm_ymmm256),
        (0x04, C::VEX_Vpmaddubsw_xmm_xmm_xmmm128, C::VEX_Vpmaddubsw_ymm_ymm_ymmm256),
        (0x05, C::VEX_Vphsubw_xmm_xmm_xmmm128, C::VEX_Vphsubw_ymm_ymm_ymmm256),
        (0x06, C::VEX_Vphsubd_xmm_xmm_xmmm128, C::VEX_Vphsubd_ymm_ymm_ymmm256),
        (0x07, C::VEX_Vphsubsw_xmm_xmm_xmmm128, C::VEX_Vphsubsw_ymm_ymm_ymmm256),
        (0x08, C::VEX_Vpsignb_xmm_xmm_xmmm128, C::VEX_Vpsignb_ymm_ymm_ymmm256),
        (0x09, C::VEX_Vpsignw_xmm_xmm_xmmm128, C::VEX_Vpsignw_ymm_ymm_ymmm256),
        (0x0a, C::VEX_Vpsignd_xmm_xmm_xmmm128, C::VEX_Vpsignd_ymm_ymm_ymmm256),
        (0x0b, C::VEX_Vpmulhrsw_xmm_xmm_xmmm128, C::VEX_Vpmulhrsw_ymm_ymm_ymmm256),
        (0x28, C::VEX_Vpmuldq_xmm_xmm_xmmm128, C::VEX_Vpmuldq_ymm_ymm_ymmm256),
        (0x29, C::VEX_Vpcmpeqq_xmm_xmm_xmmm128, C::VEX_Vpcmpeqq_ymm_ymm_ymmm256),
        (0x2b, C::VEX_Vpackusdw_xmm_xmm_xmmm128, C::VEX_Vpackusdw_ymm_ymm_ymmm256),
        (0x37, C::VEX_Vpcmpgtq_xmm_xmm_xmmm128, C::VEX_Vpcmpgtq_ymm_ymm_ymmm256),
        (0x38, C::VEX_Vpminsb_xmm_xmm_xmmm128, C::VEX_Vpminsb_ymm_ymm_ymmm256),
        (0x39, C::VEX_Vpminsd_xmm_xmm_xmmm128, C::VEX_Vpminsd_ymm_ymm_ymmm256),
        (0x3a, C::VEX_Vpminuw_xmm_xmm_xmmm128, C::VEX_Vpminuw_ymm_ymm_ymmm256),
        (0x3b, C::VEX_Vpminud_xmm_xmm_xmmm128, C::VEX_Vpminud_ymm_ymm_ymmm256),
        (0x3c, C::VEX_Vpmaxsb_xmm_xmm_xmmm128, C::VEX_Vpmaxsb_ymm_ymm_ymmm256),
        (0x3d, C::VEX_Vpmaxsd_xmm_xmm_xmmm128, C::VEX_Vpmaxsd_ymm_ymm_ymmm256),
        (0x3e, C::VEX_Vpmaxuw_xmm_xmm_xmmm128, C::VEX_Vpmaxuw_ymm_ymm_ymmm256),
        (0x3f, C::VEX_Vpmaxud_xmm_xmm_xmmm128, C::VEX_Vpmaxud_ymm_ymm_ymmm256),
        (0x40, C::VEX_Vpmulld_xmm_xmm_xmmm128, C::VEX_Vpmulld_ymm_ymm_ymmm256),
        (0xdc, C::VEX_Vaesenc_xmm_xmm_xmmm128, C::VEX_Vaesenc_ymm_ymm_ymmm256),
        (0xdd, C::VEX_Vaesenclast_xmm_xmm_xmmm128, C::VEX_Vaesenclast_ymm_ymm_ymmm256),
        (0xde, C::VEX_Vaesdec_xmm_xmm_xmmm128, C::VEX_Vaesdec_ymm_ymm_ymmm256),
        (0xdf, C::VEX_Vaesdeclast_xmm_xmm_xmmm128, C::VEX_Vaesdeclast_ymm_ymm_ymmm256),
    ];
    for &(op, c128, c256) in int3.iter() {
        m[op] = p66v(c128, c256, &[VX, HX, WX]);
    }

    m[0x0c] = mp(
        inv(),
        w(vex2l(C::VEX_Vpermilps_xmm_xmm_xmmm128, C::VEX_Vpermilps_ymm_ymm_ymmm256, &[VX, HX, WX]), inv()),
        inv(),
        inv(),
    );
    m[0x0d] = mp(
        inv(),
        w(vex2l(C::VEX_Vpermilpd_xmm_xmm_xmmm128, C::VEX_Vpermilpd_ymm_ymm_ymmm256, &[VX, HX, WX]), inv()),
        inv(),
        inv(),
    );
    m[0x0e] = p66v(C::VEX_Vtestps_xmm_xmmm128, C::VEX_Vtestps_ymm_ymmm256, &[VX, WX]);
    m[0x0f] = p66v(C::VEX_Vtestpd_xmm_xmmm128, C::VEX_Vtestpd_ymm_ymmm256, &[VX, WX]);
    m[0x13] = mp(
        inv(),
        w(
            vl(
                fx(C::VEX_Vcvtph2ps_xmm_xmmm64, &[VX, WX]),
                fx(C::VEX_Vcvtph2ps_ymm_xmmm128, &[VY, WX]),
                inv(),
            ),
            inv(),
        ),
        inv(),
        inv(),
    );
    m[0x16] = p66l1(w(fx(C::VEX_Vpermps_ymm_ymm_ymmm256, &[VY, HY, WY]), inv()));
    m[0x17] = p66v(C::VEX_Vptest_xmm_xmmm128, C::VEX_Vptest_ymm_ymmm256, &[VX, WX]);
    m[0x18] = mp(
        inv(),
        w(
            vl(
                fx(C::VEX_Vbroadcastss_xmm_xmmm32, &[VX, WX]),
                fx(C::VEX_Vbroadcastss_ymm_xmmm32, &[VY, WX]),
                inv(),
            ),
            inv(),
        ),
        inv(),
        inv(),
    );
    m[0x19] = p66l1(w(fx(C::VEX_Vbroadcastsd_ymm_xmmm64, &[VY, WX]), inv()));
    m[0x1a] = p66l1(w(fx(C::VEX_Vbroadcastf128_ymm_m128, &[VY, M]), inv()));
    m[0x1c] = p66v(C::VEX_Vpabsb_xmm_xmmm128, C::VEX_Vpabsb_ymm_ymmm256, &[VX, WX]);
    m[0x1d] = p66v(C::VEX_Vpabsw_xmm_xmmm128, C::VEX_Vpabsw_ymm_ymmm256, &[VX, WX]);
    m[0x1e] = p66v(C::VEX_Vpabsd_xmm_xmmm128, C::VEX_Vpabsd_ymm_ymmm256, &[VX, WX]);

    let extend = [
        (0x20, C::VEX_Vpmovsxbw_xmm_xmmm64, C::VEX_Vpmovsxbw_ymm_xmmm128),
        (0x21, C::VEX_Vpmovsxbd_xmm_xmmm32, C::VEX_Vpmovsxbd_ymm_xmmm64),
        (0x22, C::VEX_Vpmovsxbq_xmm_xmmm16, C::VEX_Vpmovsxbq_ymm_xmmm32),
        (0x23, C::VEX_Vpmovsxwd_xmm_xmmm64, C::VEX_Vpmovsxwd_ymm_xmmm128),
        (0x24, C::VEX_Vpmovsxwq_xmm_xmmm32, C::VEX_Vpmovsxwq_ymm_xmmm64),
        (0x25, C::VEX_Vpmovsxdq_xmm_xmmm64, C::VEX_Vpmovsxdq_ymm_xmmm128),
        (0x30, C::VEX_Vpmovzxbw_xmm_xmmm64, C::VEX_Vpmovzxbw_ymm_xmmm128),
        (0x31, C::VEX_Vpmovzxbd_xmm_xmmm32, C::VEX_Vpmovzxbd_ymm_xmmm64),
        (0x32, C::VEX_Vpmovzxbq_xmm_xmmm16, C::VEX_Vpmovzxbq_ymm_xmmm32),
        (0x33, C::VEX_Vpmovzxwd_xmm_xmmm64, C::VEX_Vpmovzxwd_ymm_xmmm128),
        (0x34, C::VEX_Vpmovzxwq_xmm_xmmm32, C::VEX_Vpmovzxwq_ymm_xmmm64),
        (0x35, C::VEX_Vpmovzxdq_xmm_xmmm64, C::VEX_Vpmovzxdq_ymm_xmmm128),
    ];
    for &(op, c128, c256) in extend.iter() {
        m[op] = mp(inv(), vl(fx(c128, &[VX, WX]), fx(c256, &[VY, WX]), inv()), inv(), inv());
    }

    m[0x2a] = p66v(C::VEX_Vmovntdqa_xmm_m128, C::VEX_Vmovntdqa_ymm_m256, &[VX, M]);
    m[0x2c] = mp(
        inv(),
        w(vex2l(C::VEX_Vmaskmovps_xmm_xmm_m128, C::VEX_Vmaskmovps_ymm_ymm_m256, &[VX, HX, M]), inv()),
        inv(),
        inv(),
    );
    m[0x2d] = mp(
        inv(),
        w(vex2l(C::VEX_Vmaskmovpd_xmm_xmm_m128, C::VEX_Vmaskmovpd_ymm_ymm_m256, &[VX, HX, M]), inv()),
        inv(),
        inv(),
    );
    m[0x2e] = mp(
        inv(),
        w(vex2l(C::VEX_Vmaskmovps_m128_xmm_xmm, C::VEX_Vmaskmovps_m256_ymm_ymm, &[M, HX, VX]), inv()),
        inv(),
        inv(),
    );
    m[0x2f] = mp(
        inv(),
        w(vex2l(C::VEX_Vmaskmovpd_m128_xmm_xmm, C::VEX_Vmaskmovpd_m256_ymm_ymm, &[M, HX, VX]), inv()),
        inv(),
        inv(),
    );
    m[0x36] = p66l1(w(fx(C::VEX_Vpermd_ymm_ymm_ymmm256, &[VY, HY, WY]), inv()));
    m[0x41] = p66l0(fx(C::VEX_Vphminposuw_xmm_xmmm128, &[VX, WX]));
    m[0x45] = mp(
        inv(),
        w(
            vex2l(C::VEX_Vpsrlvd_xmm_xmm_xmmm128, C::VEX_Vpsrlvd_ymm_ymm_ymmm256, &[VX, HX, WX]),
            vex2l(C::VEX_Vpsrlvq_xmm_xmm_xmmm128, C::VEX_Vpsrlvq_ymm_ymm_ymmm256, &[VX, HX, WX]),
        ),
        inv(),
        inv(),
    );
    m[0x46] = mp(
        inv(),
        w(vex2l(C::VEX_Vpsravd_xmm_xmm_xmmm128, C::VEX_Vpsravd_ymm_ymm_ymmm256, &[VX, HX, WX]), inv()),
        inv(),
        inv(),
    );
    m[0x47] = mp(
        inv(),
        w(
            vex2l(C::VEX_Vpsllvd_xmm_xmm_xmmm128, C::VEX_Vpsllvd_ymm_ymm_ymmm256, &[VX, HX, WX]),
            vex2l(C::VEX_Vpsllvq_xmm_xmm_xmmm128, C::VEX_Vpsllvq_ymm_ymm_ymmm256, &[VX, HX, WX]),
        ),
        inv(),
        inv(),
    );

    // AMX, 64-bit mode only.
    m[0x49] = only64(l0(w(
        mp(
            group8x64(
                nodes![fx(C::VEX_Ldtilecfg_m512, &[M]), inv(), inv(), inv(), inv(), inv(), inv(), inv()],
                vec![(0xc0, fx(C::VEX_Tilerelease, &[]).into())],
            ),
            group(nodes![fx(C::VEX_Sttilecfg_m512, &[M]), inv(), inv(), inv(), inv(), inv(), inv(), inv()]),
            inv(),
            rm(fx(C::VEX_Tilezero_tmm, &[TG]), inv()),
        ),
        inv(),
    )));
    m[0x4b] = only64(l0(w(
        mp(
            inv(),
            fx(C::VEX_Tileloaddt1_tmm_sibmem, &[TG, MSIB]),
            fx(C::VEX_Tilestored_sibmem_tmm, &[MSIB, TG]),
            fx(C::VEX_Tileloadd_tmm_sibmem, &[TG, MSIB]),
        ),
        inv(),
    )));
    m[0x5c] = only64(l0(w(
        mp(inv(), inv(), fx(C::VEX_Tdpbf16ps_tmm_tmm_tmm, &[TG, TR, TH]), inv()),
        inv(),
    )));
    m[0x5e] = only64(l0(w(
        mp(
            fx(C::VEX_Tdpbuud_tmm_tmm_tmm, &[TG, TR, TH]),
            fx(C::VEX_Tdpbusd_tmm_tmm_tmm, &[TG, TR, TH]),
            fx(C::VEX_Tdpbsud_tmm_tmm_tmm, &[TG, TR, TH]),
            fx(C::VEX_Tdpbssd_tmm_tmm_tmm, &[TG, TR, TH]),
        ),
        inv(),
    )));

    m[0x58] = mp(
        inv(),
        w(vl(fx(C::VEX_Vpbroadcastd_xmm_xmmm32, &[VX, WX]), fx(C::VEX_Vpbroadcastd_ymm_xmmm32, &[VY, WX]), inv()), inv()),
        inv(),
        inv(),
    );
    m[0x59] = mp(
        inv(),
        w(vl(fx(C::VEX_Vpbroadcastq_xmm_xmmm64, &[VX, WX]), fx(C::VEX_Vpbroadcastq_ymm_xmmm64, &[VY, WX]), inv()), inv()),
        inv(),
        inv(),
    );
    m[0x5a] = p66l1(w(fx(C::VEX_Vbroadcasti128_ymm_m128, &[VY, M]), inv()));
    m[0x78] = mp(
        inv(),
        w(vl(fx(C::VEX_Vpbroadcastb_xmm_xmmm8, &[VX, WX]), fx(C::VEX_Vpbroadcastb_ymm_xmmm8, &[VY, WX]), inv()), inv()),
        inv(),
        inv(),
    );
    m[0x79] = mp(
        inv(),
        w(vl(fx(C::VEX_Vpbroadcastw_xmm_xmmm16, &[VX, WX]), fx(C::VEX_Vpbroadcastw_ymm_xmmm16, &[VY, WX]), inv()), inv()),
        inv(),
        inv(),
    );
    m[0x8c] = mp(
        inv(),
        w(
            vex2l(C::VEX_Vpmaskmovd_xmm_xmm_m128, C::VEX_Vpmaskmovd_ymm_ymm_m256, &[VX, HX, M]),
            vex2l(C::VEX_Vpmaskmovq_xmm_xmm_m128, C::VEX_Vpmaskmovq_ymm_ymm_m256, &[VX, HX, M]),
        ),
        inv(),
        inv(),
    );
    m[0x8e] = mp(
        inv(),
        w(
            vex2l(C::VEX_Vpmaskmovd_m128_xmm_xmm, C::VEX_Vpmaskmovd_m256_ymm_ymm, &[M, HX, VX]),
            vex2l(C::VEX_Vpmaskmovq_m128_xmm_xmm, C::VEX_Vpmaskmovq_m256_ymm_ymm, &[M, HX, VX]),
        ),
        inv(),
        inv(),
    );

    // Gathers: dword indices with dword/qword elements, qword indices with dword/qword elements.
    let g = |code: C, ops: &[Operand]| -> Node { fx(code, ops).with_flags(TermFlags::GATHER).into() };
    let gather = |dd: [C; 2], dq: [C; 2], qd: [C; 2], qq: [C; 2]| -> [Node; 2] {
        [
            mp(
                inv(),
                w(
                    vl(g(dd[0], &[VX, VSX, HX]), g(dd[1], &[VY, VSY, HY]), inv()),
                    vl(g(dq[0], &[VX, VSX, HX]), g(dq[1], &[VY, VSX, HY]), inv()),
                ),
                inv(),
                inv(),
            ),
            mp(
                inv(),
                w(
                    vl(g(qd[0], &[VX, VSX, HX]), g(qd[1], &[VX, VSY, HX]), inv()),
                    vl(g(qq[0], &[VX, VSX, HX]), g(qq[1], &[VY, VSY, HY]), inv()),
                ),
                inv(),
                inv(),
            ),
        ]
    };
    let [g90, g91] = gather(
        [C::VEX_Vpgatherdd_xmm_vm32x_xmm, C::VEX_Vpgatherdd_ymm_vm32y_ymm],
        [C::VEX_Vpgatherdq_xmm_vm32x_xmm, C::VEX_Vpgatherdq_ymm_vm32x_ymm],
        [C::VEX_Vpgatherqd_xmm_vm64x_xmm, C::VEX_Vpgatherqd_xmm_vm64y_xmm],
        [C::VEX_Vpgatherqq_xmm_vm64x_xmm, C::VEX_Vpgatherqq_ymm_vm64y_ymm],
    );
    m[0x90] = g90;
    m[0x91] = g91;
    let [g92, g93] = gather(
        [C::VEX_Vgatherdps_xmm_vm32x_xmm, C::VEX_Vgatherdps_ymm_vm32y_ymm],
        [C::VEX_Vgatherdpd_xmm_vm32x_xmm, C::VEX_Vgatherdpd_ymm_vm32x_ymm],
        [C::VEX_Vgatherqps_xmm_vm64x_xmm, C::VEX_Vgatherqps_xmm_vm64y_xmm],
        [C::VEX_Vgatherqpd_xmm_vm64x_xmm, C::VEX_Vgatherqpd_ymm_vm64y_ymm],
    );
    m[0x92] = g92;
    m[0x93] = g93;

    let packed_fma = [
        (0x96, [C::VEX_Vfmaddsub132ps_xmm_xmm_xmmm128, C::VEX_Vfmaddsub132ps_ymm_ymm_ymmm256], [C::VEX_Vfmaddsub132pd_xmm_xmm_xmmm128, C::VEX_Vfmaddsub132pd_ymm_ymm_ymmm256]),
        (0x97, [C::VEX_Vfmsubadd132ps_xmm_xmm_xmmm128, C::VEX_Vfmsubadd132ps_ymm_ymm_ymmm256], [C::VEX_Vfmsubadd132pd_xmm_xmm_xmmm128, C::VEX_Vfmsubadd132pd_ymm_ymm_ymmm256]),
        (0x98, [C::VEX_Vfmadd132ps_xmm_xmm_xmmm128, C::VEX_Vfmadd132ps_ymm_ymm_ymmm256], [C::VEX_Vfmadd132pd_xmm_xmm_xmmm128, C::VEX_Vfmadd132pd_ymm_ymm_ymmm256]),
        (0x9a, [C::VEX_Vfmsub132ps_xmm_xmm_xmmm128, C::VEX_Vfmsub132ps_ymm_ymm_ymmm256], [C::VEX_Vfmsub132pd_xmm_xmm_xmmm128, C::VEX_Vfmsub132pd_ymm_ymm_ymmm256]),
        (0x9c, [C::VEX_Vfnmadd132ps_xmm_xmm_xmmm128, C::VEX_Vfnmadd132ps_ymm_ymm_ymmm256], [C::VEX_Vfnmadd132pd_xmm_xmm_xmmm128, C::VEX_Vfnmadd132pd_ymm_ymm_ymmm256]),
        (0x9e, [C::VEX_Vfnmsub132ps_xmm_xmm_xmmm128, C::VEX_Vfnmsub132ps_ymm_ymm_ymmm256], [C::VEX_Vfnmsub132pd_xmm_xmm_xmmm128, C::VEX_Vfnmsub132pd_ymm_ymm_ymmm256]),
        (0xa6, [C::VEX_Vfmaddsub213ps_xmm_xmm_xmmm128, C::VEX_Vfmaddsub213ps_ymm_ymm_ymmm256], [C::VEX_Vfmaddsub213pd_xmm_xmm_xmmm128, C::VEX_Vfmaddsub213pd_ymm_ymm_ymmm256]),
        (0xa7, [C::VEX_Vfmsubadd213ps_xmm_xmm_xmmm128, C::VEX_Vfmsubadd213ps_ymm_ymm_ymmm256], [C::VEX_Vfmsubadd213pd_xmm_xmm_xmmm128, C::VEX_Vfmsubadd213pd_ymm_ymm_ymmm256]),
        (0xa8, [C::VEX_Vfmadd213ps_xmm_xmm_xmmm128, C::VEX_Vfmadd213ps_ymm_ymm_ymmm256], [C::VEX_Vfmadd213pd_xmm_xmm_xmmm128, C::VEX_Vfmadd213pd_ymm_ymm_ymmm256]),
        (0xaa, [C::VEX_Vfmsub213ps_xmm_xmm_xmmm128, C::VEX_Vfmsub213ps_ymm_ymm_ymmm256], [C::VEX_Vfmsub213pd_xmm_xmm_xmmm128, C::VEX_Vfmsub213pd_ymm_ymm_ymmm256]),
        (0xac, [C::VEX_Vfnmadd213ps_xmm_xmm_xmmm128, C::VEX_Vfnmadd213ps_ymm_ymm_ymmm256], [C::VEX_Vfnmadd213pd_xmm_xmm_xmmm128, C::VEX_Vfnmadd213pd_ymm_ymm_ymmm256]),
        (0xae, [C::VEX_Vfnmsub213ps_xmm_xmm_xmmm128, C::VEX_Vfnmsub213ps_ymm_ymm_ymmm256], [C::VEX_Vfnmsub213pd_xmm_xmm_xmmm128, C::VEX_Vfnmsub213pd_ymm_ymm_ymmm256]),
        (0xb6, [C::VEX_Vfmaddsub231ps_xmm_xmm_xmmm128, C::VEX_Vfmaddsub231ps_ymm_ymm_ymmm256], [C::VEX_Vfmaddsub231pd_xmm_xmm_xmmm128, C::VEX_Vfmaddsub231pd_ymm_ymm_ymmm256]),
        (0xb7, [C::VEX_Vfmsubadd231ps_xmm_xmm_xmmm128, C::VEX_Vfmsubadd231ps_ymm_ymm_ymmm256], [C::VEX_Vfmsubadd231pd_xmm_xmm_xmmm128, C::VEX_Vfmsubadd231pd_ymm_ymm_ymmm256]),
        (0xb8, [C::VEX_Vfmadd231ps_xmm_xmm_xmmm128, C::VEX_Vfmadd231ps_ymm_ymm_ymmm256], [C::VEX_Vfmadd231pd_xmm_xmm_xmmm128, C::VEX_Vfmadd231pd_ymm_ymm_ymmm256]),
        (0xba, [C::VEX_Vfmsub231ps_xmm_xmm_xmmm128, C::VEX_Vfmsub231ps_ymm_ymm_ymmm256], [C::VEX_Vfmsub231pd_xmm_xmm_xmmm128, C::VEX_Vfmsub231pd_ymm_ymm_ymmm256]),
        (0xbc, [C::VEX_Vfnmadd231ps_xmm_xmm_xmmm128, C::VEX_Vfnmadd231ps_ymm_ymm_ymmm256], [C::VEX_Vfnmadd231pd_xmm_xmm_xmmm128, C::VEX_Vfnmadd231pd_ymm_ymm_ymmm256]),
        (0xbe, [C::VEX_Vfnmsub231ps_xmm_xmm_xmmm128, C::VEX_Vfnmsub231ps_ymm_ymm_ymmm256], [C::VEX_Vfnmsub231pd_xmm_xmm_xmmm128, C::VEX_Vfnmsub231pd_ymm_ymm_ymmm256]),
    ];
    for &(op, ps, pd) in packed_fma.iter() {
        m[op] = fma(ps, pd);
    }
    let scalar_fma = [
        (0x99, C::VEX_Vfmadd132ss_xmm_xmm_xmmm32, C::VEX_Vfmadd132sd_xmm_xmm_xmmm64),
        (0x9b, C::VEX_Vfmsub132ss_xmm_xmm_xmmm32, C::VEX_Vfmsub132sd_xmm_xmm_xmmm64),
        (0x9d, C::VEX_Vfnmadd132ss_xmm_xmm_xmmm32, C::VEX_Vfnmadd132sd_xmm_xmm_xmmm64),
        (0x9f, C::VEX_Vfnmsub132ss_xmm_xmm_xmmm32, C::VEX_Vfnmsub132sd_xmm_xmm_xmmm64),
        (0xa9, C::VEX_Vfmadd213ss_xmm_xmm_xmmm32, C::VEX_Vfmadd213sd_xmm_xmm_xmmm64),
        (0xab, C::VEX_Vfmsub213ss_xmm_xmm_xmmm32, C::VEX_Vfmsub213sd_xmm_xmm_xmmm64),
        (0xad, C::VEX_Vfnmadd213ss_xmm_xmm_xmmm32, C::VEX_Vfnmadd213sd_xmm_xmm_xmmm64),
        (0xaf, C::VEX_Vfnmsub213ss_xmm_xmm_xmmm32, C::VEX_Vfnmsub213sd_xmm_xmm_xmmm64),
        (0xb9, C::VEX_Vfmadd231ss_xmm_xmm_xmmm32, C::VEX_Vfmadd231sd_xmm_xmm_xmmm64),
        (0xbb, C::VEX_Vfmsub231ss_xmm_xmm_xmmm32, C::VEX_Vfmsub231sd_xmm_xmm_xmmm64),
        (0xbd, C::VEX_Vfnmadd231ss_xmm_xmm_xmmm32, C::VEX_Vfnmadd231sd_xmm_xmm_xmmm64),
        (0xbf, C::VEX_Vfnmsub231ss_xmm_xmm_xmmm32, C::VEX_Vfnmsub231sd_xmm_xmm_xmmm64),
    ];
    for &(op, ss, sd) in scalar_fma.iter() {
        m[op] = fma_scalar(ss, sd);
    }

    m[0xdb] = p66l0(fx(C::VEX_Vaesimc_xmm_xmmm128, &[VX, WX]));

    // BMI1/BMI2, 32 or 64-bit by W.
    let bmi = |codes: [C; 2], ops: &[Operand]| -> Node { l0(sz(Sizing::W, &codes, ops)) };
    m[0xf2] = mp(bmi([C::VEX_Andn_r32_r32_rm32, C::VEX_Andn_r64_r64_rm64], &[GV, BV, EV]), inv(), inv(), inv());
    m[0xf3] = mp(
        group(nodes![
            inv(),
            bmi([C::VEX_Blsr_r32_rm32, C::VEX_Blsr_r64_rm64], &[BV, EV]),
            bmi([C::VEX_Blsmsk_r32_rm32, C::VEX_Blsmsk_r64_rm64], &[BV, EV]),
            bmi([C::VEX_Blsi_r32_rm32, C::VEX_Blsi_r64_rm64], &[BV, EV]),
            inv(),
            inv(),
            inv(),
            inv(),
        ]),
        inv(),
        inv(),
        inv(),
    );
    m[0xf5] = mp(
        bmi([C::VEX_Bzhi_r32_rm32_r32, C::VEX_Bzhi_r64_rm64_r64], &[GV, EV, BV]),
        inv(),
        bmi([C::VEX_Pext_r32_r32_rm32, C::VEX_Pext_r64_r64_rm64], &[GV, BV, EV]),
        bmi([C::VEX_Pdep_r32_r32_rm32, C::VEX_Pdep_r64_r64_rm64], &[GV, BV, EV]),
    );
    m[0xf6] = mp(
        inv(),
        inv(),
        inv(),
        bmi([C::VEX_Mulx_r32_r32_rm32, C::VEX_Mulx_r64_r64_rm64], &[GV, BV, EV]),
    );
    m[0xf7] = mp(
        bmi([C::VEX_Bextr_r32_rm32_r32, C::VEX_Bextr_r64_rm64_r64], &[GV, EV, BV]),
        bmi([C::VEX_Shlx_r32_rm32_r32, C::VEX_Shlx_r64_rm64_r64], &[GV, EV, BV]),
        bmi([C::VEX_Sarx_r32_rm32_r32, C::VEX_Sarx_r64_rm64_r64], &[GV, EV, BV]),
        bmi([C::VEX_Shrx_r32_rm32_r32, C::VEX_Shrx_r64_rm64_r64], &[GV, EV, BV]),
    );

    m
}

fn map0f3a() -> Vec<Node> {
    let mut m = blank();

    m[0x00] = p66l1(w(inv(), fx(C::VEX_Vpermq_ymm_ymmm256_imm8, &[VY, WY, IB])));
    m[0x01] = p66l1(w(inv(), fx(C::VEX_Vpermpd_ymm_ymmm256_imm8, &[VY, WY, IB])));
    m[0x02] = mp(
        inv(),
        w(vex2l(C::VEX_Vpblendd_xmm_xmm_xmmm128_imm8, C::VEX_Vpblendd_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]), inv()),
        inv(),
        inv(),
    );
    m[0x04] = mp(
        inv(),
        w(vex2l(C::VEX_Vpermilps_xmm_xmmm128_imm8, C::VEX_Vpermilps_ymm_ymmm256_imm8, &[VX, WX, IB]), inv()),
        inv(),
        inv(),
    );
    m[0x05] = mp(
        inv(),
        w(vex2l(C::VEX_Vpermilpd_xmm_xmmm128_imm8, C::VEX_Vpermilpd_ymm_ymmm256_imm8, &[VX, WX, IB]), inv()),
        inv(),
        inv(),
    );
    m[0x06] = p66l1(w(fx(C::VEX_Vperm2f128_ymm_ymm_ymmm256_imm8, &[VY, HY, WY, IB]), inv()));

    m[0x08] = p66v(C::VEX_Vroundps_xmm_xmmm128_imm8, C::VEX_Vroundps_ymm_ymmm256_imm8, &[VX, WX, IB]);
    m[0x09] = p66v(C::VEX_Vroundpd_xmm_xmmm128_imm8, C::VEX_Vroundpd_ymm_ymmm256_imm8, &[VX, WX, IB]);
    m[0x0a] = mp(inv(), fx(C::VEX_Vroundss_xmm_xmm_xmmm32_imm8, &[VX, HX, WX, IB]), inv(), inv());
    m[0x0b] = mp(inv(), fx(C::VEX_Vroundsd_xmm_xmm_xmmm64_imm8, &[VX, HX, WX, IB]), inv(), inv());
    m[0x0c] = p66v(C::VEX_Vblendps_xmm_xmm_xmmm128_imm8, C::VEX_Vblendps_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);
    m[0x0d] = p66v(C::VEX_Vblendpd_xmm_xmm_xmmm128_imm8, C::VEX_Vblendpd_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);
    m[0x0e] = p66v(C::VEX_Vpblendw_xmm_xmm_xmmm128_imm8, C::VEX_Vpblendw_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);
    m[0x0f] = p66v(C::VEX_Vpalignr_xmm_xmm_xmmm128_imm8, C::VEX_Vpalignr_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);

    m[0x14] = p66l0(fx(C::VEX_Vpextrb_r32m8_xmm_imm8, &[ED, VX, IB]));
    m[0x15] = p66l0(fx(C::VEX_Vpextrw_r32m16_xmm_imm8, &[ED, VX, IB]));
    m[0x16] = p66l0(sz(Sizing::W, &[C::VEX_Vpextrd_rm32_xmm_imm8, C::VEX_Vpextrq_rm64_xmm_imm8], &[EV, VX, IB]));
    m[0x17] = p66l0(fx(C::VEX_Vextractps_rm32_xmm_imm8, &[ED, VX, IB]));
    m[0x18] = p66l1(w(fx(C::VEX_Vinsertf128_ymm_ymm_xmmm128_imm8, &[VY, HY, WX, IB]), inv()));
    m[0x19] = p66l1(w(fx(C::VEX_Vextractf128_xmmm128_ymm_imm8, &[WX, VY, IB]), inv()));
    m[0x1d] = mp(
        inv(),
        w(
            vl(
                fx(C::VEX_Vcvtps2ph_xmmm64_xmm_imm8, &[WX, VX, IB]),
                fx(C::VEX_Vcvtps2ph_xmmm128_ymm_imm8, &[WX, VY, IB]),
                inv(),
            ),
            inv(),
        ),
        inv(),
        inv(),
    );
    m[0x20] = p66l0(fx(C::VEX_Vpinsrb_xmm_xmm_r32m8_imm8, &[VX, HX, ED, IB]));
    m[0x21] = p66l0(fx(C::VEX_Vinsertps_xmm_xmm_xmmm32_imm8, &[VX, HX, WX, IB]));
    m[0x22] = p66l0(sz(Sizing::W, &[C::VEX_Vpinsrd_xmm_xmm_rm32_imm8, C::VEX_Vpinsrq_xmm_xmm_rm64_imm8], &[VX, HX, EV, IB]));

    m[0x30] = mp(
        inv(),
        l0(w(fx(C::VEX_Kshiftrb_kr_kr_imm8, &[KG, KR, IB]), fx(C::VEX_Kshiftrw_kr_kr_imm8, &[KG, KR, IB]))),
        inv(),
        inv(),
    );
    m[0x31] = mp(
        inv(),
        l0(w(fx(C::VEX_Kshiftrd_kr_kr_imm8, &[KG, KR, IB]), fx(C::VEX_Kshiftrq_kr_kr_imm8, &[KG, KR, IB]))),
        inv(),
        inv(),
    );
    m[0x32] = mp(
        inv(),
        l0(w(fx(C::VEX_Kshiftlb_kr_kr_imm8, &[KG, KR, IB]), fx(C::VEX_Kshiftlw_kr_kr_imm8, &[KG, KR, IB]))),
        inv(),
        inv(),
    );
    m[0x33] = mp(
        inv(),
        l0(w(fx(C::VEX_Kshiftld_kr_kr_imm8, &[KG, KR, IB]), fx(C::VEX_Kshiftlq_kr_kr_imm8, &[KG, KR, IB]))),
        inv(),
        inv(),
    );

    m[0x38] = p66l1(w(fx(C::VEX_Vinserti128_ymm_ymm_xmmm128_imm8, &[VY, HY, WX, IB]), inv()));
    m[0x39] = p66l1(w(fx(C::VEX_Vextracti128_xmmm128_ymm_imm8, &[WX, VY, IB]), inv()));
    m[0x40] = p66v(C::VEX_Vdpps_xmm_xmm_xmmm128_imm8, C::VEX_Vdpps_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);
    m[0x41] = p66l0(fx(C::VEX_Vdppd_xmm_xmm_xmmm128_imm8, &[VX, HX, WX, IB]));
    m[0x42] = p66v(C::VEX_Vmpsadbw_xmm_xmm_xmmm128_imm8, C::VEX_Vmpsadbw_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);
    m[0x44] = p66v(C::VEX_Vpclmulqdq_xmm_xmm_xmmm128_imm8, C::VEX_Vpclmulqdq_ymm_ymm_ymmm256_imm8, &[VX, HX, WX, IB]);
    m[0x46] = p66l1(w(fx(C::VEX_Vperm2i128_ymm_ymm_ymmm256_imm8, &[VY, HY, WY, IB]), inv()));

    let blendv = |c128: C, c256: C| -> Node {
        mp(inv(), w(vex2l(c128, c256, &[VX, HX, WX, LX]), inv()), inv(), inv())
    };
    m[0x4a] = blendv(C::VEX_Vblendvps_xmm_xmm_xmmm128_xmm, C::VEX_Vblendvps_ymm_ymm_ymmm256_ymm);
    m[0x4b] = blendv(C::VEX_Vblendvpd_xmm_xmm_xmmm128_xmm, C::VEX_Vblendvpd_ymm_ymm_ymmm256_ymm);
    m[0x4c] = blendv(C::VEX_Vpblendvb_xmm_xmm_xmmm128_xmm, C::VEX_Vpblendvb_ymm_ymm_ymmm256_ymm);

    m[0x60] = p66l0(fx(C::VEX_Vpcmpestrm_xmm_xmmm128_imm8, &[VX, WX, IB]));
    m[0x61] = p66l0(fx(C::VEX_Vpcmpestri_xmm_xmmm128_imm8, &[VX, WX, IB]));
    m[0x62] = p66l0(fx(C::VEX_Vpcmpistrm_xmm_xmmm128_imm8, &[VX, WX, IB]));
    m[0x63] = p66l0(fx(C::VEX_Vpcmpistri_xmm_xmmm128_imm8, &[VX, WX, IB]));

    // FMA4: W1 swaps the is4 register and the r/m operand.
    let fma4 = |w0: [C; 2], w1: [C; 2]| -> Node {
        mp(
            inv(),
            w(
                vex2l(w0[0], w0[1], &[VX, HX, WX, LX]),
                vex2l(w1[0], w1[1], &[VX, HX, LX, WX]),
            ),
            inv(),
            inv(),
        )
    };
    let packed4 = [
        (
            0x5c,
            [C::VEX_Vfmaddsubps_xmm_xmm_xmmm128_xmm, C::VEX_Vfmaddsubps_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmaddsubps_xmm_xmm_xmm_xmmm128, C::VEX_Vfmaddsubps_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x5d,
            [C::VEX_Vfmaddsubpd_xmm_xmm_xmmm128_xmm, C::VEX_Vfmaddsubpd_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmaddsubpd_xmm_xmm_xmm_xmmm128, C::VEX_Vfmaddsubpd_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x5e,
            [C::VEX_Vfmsubaddps_xmm_xmm_xmmm128_xmm, C::VEX_Vfmsubaddps_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmsubaddps_xmm_xmm_xmm_xmmm128, C::VEX_Vfmsubaddps_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x5f,
            [C::VEX_Vfmsubaddpd_xmm_xmm_xmmm128_xmm, C::VEX_Vfmsubaddpd_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmsubaddpd_xmm_xmm_xmm_xmmm128, C::VEX_Vfmsubaddpd_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x68,
            [C::VEX_Vfmaddps_xmm_xmm_xmmm128_xmm, C::VEX_Vfmaddps_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmaddps_xmm_xmm_xmm_xmmm128, C::VEX_Vfmaddps_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x69,
            [C::VEX_Vfmaddpd_xmm_xmm_xmmm128_xmm, C::VEX_Vfmaddpd_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmaddpd_xmm_xmm_xmm_xmmm128, C::VEX_Vfmaddpd_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x6c,
            [C::VEX_Vfmsubps_xmm_xmm_xmmm128_xmm, C::VEX_Vfmsubps_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmsubps_xmm_xmm_xmm_xmmm128, C::VEX_Vfmsubps_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x6d,
            [C::VEX_Vfmsubpd_xmm_xmm_xmmm128_xmm, C::VEX_Vfmsubpd_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfmsubpd_xmm_xmm_xmm_xmmm128, C::VEX_Vfmsubpd_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x78,
            [C::VEX_Vfnmaddps_xmm_xmm_xmmm128_xmm, C::VEX_Vfnmaddps_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfnmaddps_xmm_xmm_xmm_xmmm128, C::VEX_Vfnmaddps_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x79,
            [C::VEX_Vfnmaddpd_xmm_xmm_xmmm128_xmm, C::VEX_Vfnmaddpd_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfnmaddpd_xmm_xmm_xmm_xmmm128, C::VEX_Vfnmaddpd_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x7c,
            [C::VEX_Vfnmsubps_xmm_xmm_xmmm128_xmm, C::VEX_Vfnmsubps_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfnmsubps_xmm_xmm_xmm_xmmm128, C::VEX_Vfnmsubps_ymm_ymm_ymm_ymmm256],
        ),
        (
            0x7d,
            [C::VEX_Vfnmsubpd_xmm_xmm_xmmm128_xmm, C::VEX_Vfnmsubpd_ymm_ymm_ymmm256_ymm],
            [C::VEX_Vfnmsubpd_xmm_xmm_xmm_xmmm128, C::VEX_Vfnmsubpd_ymm_ymm_ymm_ymmm256],
        ),
    ];
    for &(op, w0, w1) in packed4.iter() {
        m[op] = fma4(w0, w1);
    }
    let fma4_scalar = |w0: C, w1: C| -> Node {
        mp(
            inv(),
            w(fx(w0, &[VX, HX, WX, LX]), fx(w1, &[VX, HX, LX, WX])),
            inv(),
            inv(),
        )
    };
    let scalar4 = [
        (0x6a, C::VEX_Vfmaddss_xmm_xmm_xmmm32_xmm, C::VEX_Vfmaddss_xmm_xmm_xmm_xmmm32),
        (0x6b, C::VEX_Vfmaddsd_xmm_xmm_xmmm64_xmm, C::VEX_Vfmaddsd_xmm_xmm_xmm_xmmm64),
        (0x6e, C::VEX_Vfmsubss_xmm_xmm_xmmm32_xmm, C::VEX_Vfmsubss_xmm_xmm_xmm_xmmm32),
        (0x6f, C::VEX_Vfmsubsd_xmm_xmm_xmmm64_xmm, C::VEX_Vfmsubsd_xmm_xmm_xmm_xmmm64),
        (0x7a, C::VEX_Vfnmaddss_xmm_xmm_xmmm32_xmm, C::VEX_Vfnmaddss_xmm_xmm_xmm_xmmm32),
        (0x7b, C::VEX_Vfnmaddsd_xmm_xmm_xmmm64_xmm, C::VEX_Vfnmaddsd_xmm_xmm_xmm_xmmm64),
        (0x7e, C::VEX_Vfnmsubss_xmm_xmm_xmmm32_xmm, C::VEX_Vfnmsubss_xmm_xmm_xmm_xmmm32),
        (0x7f, C::VEX_Vfnmsubsd_xmm_xmm_xmmm64_xmm, C::VEX_Vfnmsubsd_xmm_xmm_xmm_xmmm64),
    ];
    for &(op, w0, w1) in scalar4.iter() {
        m[op] = fma4_scalar(w0, w1);
    }

    m[0xdf] = p66l0(fx(C::VEX_Vaeskeygenassist_xmm_xmmm128_imm8, &[VX, WX, IB]));
    m[0xf0] = mp(
        inv(),
        inv(),
        inv(),
        l0(sz(Sizing::W, &[C::VEX_Rorx_r32_rm32_imm8, C::VEX_Rorx_r64_rm64_imm8], &[GV, EV, IB])),
    );

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_de::kinds::Family;
    use crate::table_de::TableDeserializer;

    #[test]
    fn vex_blob_reads_back() {
        let mut w = TableWriter::new();
        let roots = write(&mut w).unwrap();
        let blob = w.finish();
        let records = TableDeserializer::new(Family::Vex, &blob).read_all().unwrap();
        assert_eq!(roots.len(), 4);
        for &id in &roots {
            assert_eq!(records.table(id).unwrap().len(), 256);
        }
    }
}
