//! MVEX encoded instructions (Knights Corner). The vector length is always 512 bits.

use crate::code::Code as C;
use crate::error::TableError;
use crate::handlers::{MvexInfo, Operand, TermFlags, VecClass};
use crate::table_de::writer::{Node, TableWriter};

use super::ops::*;

const VSZ: Operand = Operand::Vsib(VecClass::Zmm);

// Up-conversions of a 32-bit float load: 101b is reserved.
const F32_LOAD: u8 = 1 << 5;
// Up-conversions of a 32-bit integer load: 011b is reserved.
const I32_LOAD: u8 = 1 << 3;
// Down-conversions of a 32-bit float store: broadcasts are meaningless.
const F32_STORE: u8 = 0b0000_0110;
const I32_STORE: u8 = 0b0000_1110;
// 64-bit elements only have the identity and the two broadcasts.
const E64_LOAD: u8 = 0b1111_1000;
const E64_STORE: u8 = 0b1111_1110;
// Gathers and scatters can't broadcast.
const F32_GATHER: u8 = F32_LOAD | 0b0000_0110;
const ONLY_IDENTITY: u8 = 0b1111_1110;

const GATHER: TermFlags = TermFlags::REQUIRE_OPMASK.union(TermFlags::GATHER);

/// Writes the MVEX maps. Roots: 0F, 0F38, 0F3A.
pub(super) fn write(w: &mut TableWriter) -> Result<Vec<u32>, TableError> {
    let map0f = w.array(&map0f())?;
    let map0f38 = w.array(&map0f38())?;
    let map0f3a = w.array(&map0f3a())?;

    Ok(vec![map0f, map0f38, map0f3a])
}

fn mv(code: C, ops: &[Operand], info: MvexInfo) -> Node {
    fx(code, ops).with_mvex(info).into()
}

fn mv_flags(code: C, ops: &[Operand], info: MvexInfo, flags: TermFlags) -> Node {
    fx(code, ops).with_mvex(info).with_flags(flags).into()
}

/// Register forms with EH set take rounding control from sss.
fn rounding(info: MvexInfo) -> MvexInfo {
    MvexInfo {
        sae: true,
        rounding: true,
        ..info
    }
}

fn sae(info: MvexInfo) -> MvexInfo {
    MvexInfo { sae: true, ..info }
}

fn np(h: impl Into<Node>) -> Node {
    mp(h, inv(), inv(), inv())
}

fn pfx66(h: impl Into<Node>) -> Node {
    mp(inv(), h, inv(), inv())
}

fn w0(h: impl Into<Node>) -> Node {
    w(h, inv())
}

fn map0f() -> Vec<Node> {
    let mut m = blank();

    m[0x28] = mp(
        w0(mv(C::MVEX_Vmovaps_zmm_k1_zmmmt, &[VZ, WZ], mvex32(F32_LOAD, 0))),
        w(inv(), mv(C::MVEX_Vmovapd_zmm_k1_zmmmt, &[VZ, WZ], mvex64(E64_LOAD, 0))),
        inv(),
        inv(),
    );
    let no_eh = |info: MvexInfo| MvexInfo {
        eviction_hint: false,
        ..info
    };
    m[0x29] = mp(
        w0(rm(inv(), mv(C::MVEX_Vmovaps_mt_k1_zmm, &[M, VZ], mvex32(F32_STORE, 0)))),
        w(inv(), rm(inv(), mv(C::MVEX_Vmovapd_mt_k1_zmm, &[M, VZ], mvex64(E64_STORE, 0)))),
        w0(rm(
            inv(),
            eh(
                mv(C::MVEX_Vmovnraps_m_k1_zmm, &[M, VZ], no_eh(mvex32(ONLY_IDENTITY, 0))),
                mv(C::MVEX_Vmovnrngoaps_m_k1_zmm, &[M, VZ], no_eh(mvex32(ONLY_IDENTITY, 0))),
            ),
        )),
        w(
            inv(),
            rm(
                inv(),
                eh(
                    mv(C::MVEX_Vmovnrapd_m_k1_zmm, &[M, VZ], no_eh(mvex64(ONLY_IDENTITY, 0))),
                    mv(C::MVEX_Vmovnrngoapd_m_k1_zmm, &[M, VZ], no_eh(mvex64(ONLY_IDENTITY, 0))),
                ),
            ),
        ),
    );

    let arith = [
        (0x58, C::MVEX_Vaddps_zmm_k1_zmm_zmmmt, C::MVEX_Vaddpd_zmm_k1_zmm_zmmmt),
        (0x59, C::MVEX_Vmulps_zmm_k1_zmm_zmmmt, C::MVEX_Vmulpd_zmm_k1_zmm_zmmmt),
        (0x5c, C::MVEX_Vsubps_zmm_k1_zmm_zmmmt, C::MVEX_Vsubpd_zmm_k1_zmm_zmmmt),
    ];
    for &(op, ps, pd) in arith.iter() {
        m[op] = mp(
            w0(mv(ps, &[VZ, HZ, WZ], rounding(mvex32(F32_LOAD, 0)))),
            w(inv(), mv(pd, &[VZ, HZ, WZ], rounding(mvex64(E64_LOAD, 0)))),
            inv(),
            inv(),
        );
    }
    m[0xc2] = mp(
        w0(mv_flags(
            C::MVEX_Vcmpps_kr_k1_zmm_zmmmt_imm8,
            &[KG, HZ, WZ, IB],
            sae(mvex32(F32_LOAD, 0)),
            TermFlags::NO_ZEROING,
        )),
        w(
            inv(),
            mv_flags(
                C::MVEX_Vcmppd_kr_k1_zmm_zmmmt_imm8,
                &[KG, HZ, WZ, IB],
                sae(mvex64(E64_LOAD, 0)),
                TermFlags::NO_ZEROING,
            ),
        ),
        inv(),
        inv(),
    );

    let dword = [
        (0xeb, C::MVEX_Vpord_zmm_k1_zmm_zmmmt, C::MVEX_Vporq_zmm_k1_zmm_zmmmt),
        (0xef, C::MVEX_Vpxord_zmm_k1_zmm_zmmmt, C::MVEX_Vpxorq_zmm_k1_zmm_zmmmt),
        (0xdb, C::MVEX_Vpandd_zmm_k1_zmm_zmmmt, C::MVEX_Vpandq_zmm_k1_zmm_zmmmt),
    ];
    for &(op, d, q) in dword.iter() {
        m[op] = pfx66(w(
            mv(d, &[VZ, HZ, WZ], mvex32(I32_LOAD, 0)),
            mv(q, &[VZ, HZ, WZ], mvex64(E64_LOAD, 0)),
        ));
    }
    m[0xfa] = pfx66(w0(mv(C::MVEX_Vpsubd_zmm_k1_zmm_zmmmt, &[VZ, HZ, WZ], mvex32(I32_LOAD, 0))));
    m[0xfe] = pfx66(w0(mv(C::MVEX_Vpaddd_zmm_k1_zmm_zmmmt, &[VZ, HZ, WZ], mvex32(I32_LOAD, 0))));

    m
}

fn map0f38() -> Vec<Node> {
    let mut m = blank();

    m[0x36] = pfx66(w0(mv(C::MVEX_Vpermd_zmm_k1_zmm_zmmmt, &[VZ, HZ, WZ], mvex32(ONLY_IDENTITY, ONLY_IDENTITY))));
    m[0x40] = pfx66(w0(mv(C::MVEX_Vpmulld_zmm_k1_zmm_zmmmt, &[VZ, HZ, WZ], mvex32(I32_LOAD, 0))));

    let fma = [
        (0x98, C::MVEX_Vfmadd132ps_zmm_k1_zmm_zmmmt, C::MVEX_Vfmadd132pd_zmm_k1_zmm_zmmmt),
        (0xa8, C::MVEX_Vfmadd213ps_zmm_k1_zmm_zmmmt, C::MVEX_Vfmadd213pd_zmm_k1_zmm_zmmmt),
        (0xb8, C::MVEX_Vfmadd231ps_zmm_k1_zmm_zmmmt, C::MVEX_Vfmadd231pd_zmm_k1_zmm_zmmmt),
    ];
    for &(op, ps, pd) in fma.iter() {
        m[op] = pfx66(w(
            mv(ps, &[VZ, HZ, WZ], rounding(mvex32(F32_LOAD, 0))),
            mv(pd, &[VZ, HZ, WZ], rounding(mvex64(E64_LOAD, 0))),
        ));
    }

    m[0x90] = pfx66(w0(rm(
        inv(),
        mv_flags(C::MVEX_Vpgatherdd_zmm_k1_mvt, &[VZ, VSZ], mvex32(I32_LOAD | 0b110, 0), GATHER),
    )));
    m[0x92] = pfx66(w0(rm(
        inv(),
        mv_flags(C::MVEX_Vgatherdps_zmm_k1_mvt, &[VZ, VSZ], mvex32(F32_GATHER, 0), GATHER),
    )));
    m[0xa0] = pfx66(w0(rm(
        inv(),
        mv_flags(C::MVEX_Vpscatterdd_mvt_k1_zmm, &[VSZ, VZ], mvex32(I32_STORE, 0), TermFlags::REQUIRE_OPMASK),
    )));
    m[0xa2] = pfx66(w0(rm(
        inv(),
        mv_flags(C::MVEX_Vscatterdps_mvt_k1_zmm, &[VSZ, VZ], mvex32(F32_STORE, 0), TermFlags::REQUIRE_OPMASK),
    )));

    m[0xd0] = np(w0(rm(
        inv(),
        mv(C::MVEX_Vloadunpackld_zmm_k1_mt, &[VZ, M], mvex32(I32_LOAD | 0b110, 0)),
    )));
    m[0xd4] = np(w0(rm(
        inv(),
        mv(C::MVEX_Vloadunpackhd_zmm_k1_mt, &[VZ, M], mvex32(I32_LOAD | 0b110, 0)),
    )));

    m
}

fn map0f3a() -> Vec<Node> {
    let mut m = blank();

    m[0x03] = pfx66(w0(mv(
        C::MVEX_Valignd_zmm_k1_zmm_zmmmt_imm8,
        &[VZ, HZ, WZ, IB],
        mvex32(ONLY_IDENTITY, ONLY_IDENTITY),
    )));
    m[0x07] = pfx66(w0(mv(
        C::MVEX_Vpermf32x4_zmm_k1_zmmmt_imm8,
        &[VZ, WZ, IB],
        mvex32(ONLY_IDENTITY, ONLY_IDENTITY),
    )));

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_de::kinds::Family;
    use crate::table_de::TableDeserializer;

    #[test]
    fn mvex_blob_reads_back() {
        let mut w = TableWriter::new();
        let roots = write(&mut w).unwrap();
        let records = TableDeserializer::new(Family::Mvex, &w.finish())
            .read_all()
            .unwrap();
        assert_eq!(roots.len(), 3);
        for &id in &roots {
            assert_eq!(records.table(id).unwrap().len(), 256);
        }
    }

    #[test]
    fn non_temporal_stores_ignore_eviction_hint() {
        match &map0f()[0x29] {
            Node::MandatoryPrefix { handlers, .. } => assert_ne!(handlers[2], Node::Invalid),
            other => panic!("unexpected node {:?}", other),
        }
    }
}
