//! AMD XOP encoded instructions.

use crate::code::Code as C;
use crate::error::TableError;
use crate::handlers::{Operand, Sizing};
use crate::table_de::writer::{Node, TableWriter};

use super::ops::*;

/// Writes the XOP maps. Roots: map 8, 9, 10.
pub(super) fn write(w: &mut TableWriter) -> Result<Vec<u32>, TableError> {
    let map8 = w.array(&without_pp(map8()))?;
    let map9 = w.array(&without_pp(map9()))?;
    let map10 = w.array(&without_pp(map10()))?;

    Ok(vec![map8, map9, map10])
}

/// Every XOP instruction requires pp = 00.
fn without_pp(map: Vec<Node>) -> Vec<Node> {
    map.into_iter()
        .map(|h| match h {
            Node::Invalid => h,
            h => mp(h, inv(), inv(), inv()),
        })
        .collect()
}

/// 128-bit only, W0.
fn x128(code: C, ops: &[Operand]) -> Node {
    l0(w(fx(code, ops), inv()))
}

/// W0 takes the register/memory operand second, W1 swaps it with the vvvv operand.
fn swap_w(w0: C, w1: C) -> Node {
    l0(w(fx(w0, &[VX, WX, HX]), fx(w1, &[VX, HX, WX])))
}

fn map8() -> Vec<Node> {
    let mut m = blank();

    let macc = [
        (0x85, C::XOP_Vpmacssww_xmm_xmm_xmmm128_xmm),
        (0x86, C::XOP_Vpmacsswd_xmm_xmm_xmmm128_xmm),
        (0x87, C::XOP_Vpmacssdql_xmm_xmm_xmmm128_xmm),
        (0x8e, C::XOP_Vpmacssdd_xmm_xmm_xmmm128_xmm),
        (0x8f, C::XOP_Vpmacssdqh_xmm_xmm_xmmm128_xmm),
        (0x95, C::XOP_Vpmacsww_xmm_xmm_xmmm128_xmm),
        (0x96, C::XOP_Vpmacswd_xmm_xmm_xmmm128_xmm),
        (0x97, C::XOP_Vpmacsdql_xmm_xmm_xmmm128_xmm),
        (0x9e, C::XOP_Vpmacsdd_xmm_xmm_xmmm128_xmm),
        (0x9f, C::XOP_Vpmacsdqh_xmm_xmm_xmmm128_xmm),
        (0xa6, C::XOP_Vpmadcsswd_xmm_xmm_xmmm128_xmm),
        (0xb6, C::XOP_Vpmadcswd_xmm_xmm_xmmm128_xmm),
    ];
    for &(op, code) in macc.iter() {
        m[op] = x128(code, &[VX, HX, WX, LX]);
    }

    m[0xa2] = w(
        vex2l(C::XOP_Vpcmov_xmm_xmm_xmmm128_xmm, C::XOP_Vpcmov_ymm_ymm_ymmm256_ymm, &[VX, HX, WX, LX]),
        vex2l(C::XOP_Vpcmov_xmm_xmm_xmm_xmmm128, C::XOP_Vpcmov_ymm_ymm_ymm_ymmm256, &[VX, HX, LX, WX]),
    );
    m[0xa3] = l0(w(
        fx(C::XOP_Vpperm_xmm_xmm_xmmm128_xmm, &[VX, HX, WX, LX]),
        fx(C::XOP_Vpperm_xmm_xmm_xmm_xmmm128, &[VX, HX, LX, WX]),
    ));

    let rot = [
        (0xc0, C::XOP_Vprotb_xmm_xmmm128_imm8),
        (0xc1, C::XOP_Vprotw_xmm_xmmm128_imm8),
        (0xc2, C::XOP_Vprotd_xmm_xmmm128_imm8),
        (0xc3, C::XOP_Vprotq_xmm_xmmm128_imm8),
    ];
    for &(op, code) in rot.iter() {
        m[op] = x128(code, &[VX, WX, IB]);
    }

    let cmp = [
        (0xcc, C::XOP_Vpcomb_xmm_xmm_xmmm128_imm8),
        (0xcd, C::XOP_Vpcomw_xmm_xmm_xmmm128_imm8),
        (0xce, C::XOP_Vpcomd_xmm_xmm_xmmm128_imm8),
        (0xcf, C::XOP_Vpcomq_xmm_xmm_xmmm128_imm8),
        (0xec, C::XOP_Vpcomub_xmm_xmm_xmmm128_imm8),
        (0xed, C::XOP_Vpcomuw_xmm_xmm_xmmm128_imm8),
        (0xee, C::XOP_Vpcomud_xmm_xmm_xmmm128_imm8),
        (0xef, C::XOP_Vpcomuq_xmm_xmm_xmmm128_imm8),
    ];
    for &(op, code) in cmp.iter() {
        m[op] = x128(code, &[VX, HX, WX, IB]);
    }

    m
}

fn map9() -> Vec<Node> {
    let mut m = blank();

    // TBM
    let tbm = |codes: [C; 2]| -> Node { l0(sz(Sizing::W, &codes, &[BV, EV])) };
    m[0x01] = group(nodes![
        inv(),
        tbm([C::XOP_Blcfill_r32_rm32, C::XOP_Blcfill_r64_rm64]),
        tbm([C::XOP_Blsfill_r32_rm32, C::XOP_Blsfill_r64_rm64]),
        tbm([C::XOP_Blcs_r32_rm32, C::XOP_Blcs_r64_rm64]),
        tbm([C::XOP_Tzmsk_r32_rm32, C::XOP_Tzmsk_r64_rm64]),
        tbm([C::XOP_Blcic_r32_rm32, C::XOP_Blcic_r64_rm64]),
        tbm([C::XOP_Blsic_r32_rm32, C::XOP_Blsic_r64_rm64]),
        tbm([C::XOP_T1mskc_r32_rm32, C::XOP_T1mskc_r64_rm64]),
    ]);
    m[0x02] = group(nodes![
        inv(),
        tbm([C::XOP_Blcmsk_r32_rm32, C::XOP_Blcmsk_r64_rm64]),
        inv(),
        inv(),
        inv(),
        inv(),
        tbm([C::XOP_Blci_r32_rm32, C::XOP_Blci_r64_rm64]),
        inv(),
    ]);
    // LWP
    m[0x12] = rm(
        group(nodes![
            l0(sz(Sizing::W, &[C::XOP_Llwpcb_r32, C::XOP_Llwpcb_r64], &[RV])),
            l0(sz(Sizing::W, &[C::XOP_Slwpcb_r32, C::XOP_Slwpcb_r64], &[RV])),
            inv(),
            inv(),
            inv(),
            inv(),
            inv(),
            inv(),
        ]),
        inv(),
    );

    let frcz = [
        (0x80, C::XOP_Vfrczps_xmm_xmmm128, C::XOP_Vfrczps_ymm_ymmm256),
        (0x81, C::XOP_Vfrczpd_xmm_xmmm128, C::XOP_Vfrczpd_ymm_ymmm256),
    ];
    for &(op, c128, c256) in frcz.iter() {
        m[op] = w(vex2l(c128, c256, &[VX, WX]), inv());
    }
    m[0x82] = x128(C::XOP_Vfrczss_xmm_xmmm32, &[VX, WX]);
    m[0x83] = x128(C::XOP_Vfrczsd_xmm_xmmm64, &[VX, WX]);

    let shifts = [
        (0x90, C::XOP_Vprotb_xmm_xmmm128_xmm, C::XOP_Vprotb_xmm_xmm_xmmm128),
        (0x91, C::XOP_Vprotw_xmm_xmmm128_xmm, C::XOP_Vprotw_xmm_xmm_xmmm128),
        (0x92, C::XOP_Vprotd_xmm_xmmm128_xmm, C::XOP_Vprotd_xmm_xmm_xmmm128),
        (0x93, C::XOP_Vprotq_xmm_xmmm128_xmm, C::XOP_Vprotq_xmm_xmm_xmmm128),
        (0x94, C::XOP_Vpshlb_xmm_xmmm128_xmm, C::XOP_Vpshlb_xmm_xmm_xmmm128),
        (0x95, C::XOP_Vpshlw_xmm_xmmm128_xmm, C::XOP_Vpshlw_xmm_xmm_xmmm128),
        (0x96, C::XOP_Vpshld_xmm_xmmm128_xmm, C::XOP_Vpshld_xmm_xmm_xmmm128),
        (0x97, C::XOP_Vpshlq_xmm_xmmm128_xmm, C::XOP_Vpshlq_xmm_xmm_xmmm128),
        (0x98, C::XOP_Vpshab_xmm_xmmm128_xmm, C::XOP_Vpshab_xmm_xmm_xmmm128),
        (0x99, C::XOP_Vpshaw_xmm_xmmm128_xmm, C::XOP_Vpshaw_xmm_xmm_xmmm128),
        (0x9a, C::XOP_Vpshad_xmm_xmmm128_xmm, C::XOP_Vpshad_xmm_xmm_xmmm128),
        (0x9b, C::XOP_Vpshaq_xmm_xmmm128_xmm, C::XOP_Vpshaq_xmm_xmm_xmmm128),
    ];
    for &(op, w0, w1) in shifts.iter() {
        m[op] = swap_w(w0, w1);
    }

    let horizontal = [
        (0xc1, C::XOP_Vphaddbw_xmm_xmmm128),
        (0xc2, C::XOP_Vphaddbd_xmm_xmmm128),
        (0xc3, C::XOP_Vphaddbq_xmm_xmmm128),
        (0xc6, C::XOP_Vphaddwd_xmm_xmmm128),
        (0xc7, C::XOP_Vphaddwq_xmm_xmmm128),
        (0xcb, C::XOP_Vphadddq_xmm_xmmm128),
        (0xd1, C::XOP_Vphaddubw_xmm_xmmm128),
        (0xd2, C::XOP_Vphaddubd_xmm_xmmm128),
        (0xd3, C::XOP_Vphaddubq_xmm_xmmm128),
        (0xd6, C::XOP_Vphadduwd_xmm_xmmm128),
        (0xd7, C::XOP_Vphadduwq_xmm_xmmm128),
        (0xdb, C::XOP_Vphaddudq_xmm_xmmm128),
        (0xe1, C::XOP_Vphsubbw_xmm_xmmm128),
        (0xe2, C::XOP_Vphsubwd_xmm_xmmm128),
        (0xe3, C::XOP_Vphsubdq_xmm_xmmm128),
    ];
    for &(op, code) in horizontal.iter() {
        m[op] = x128(code, &[VX, WX]);
    }

    m
}

fn map10() -> Vec<Node> {
    let mut m = blank();

    m[0x10] = l0(sz(Sizing::W, &[C::XOP_Bextr_r32_rm32_imm32, C::XOP_Bextr_r64_rm64_imm32], &[GV, EV, ID]));
    m[0x12] = group(nodes![
        l0(sz(Sizing::W, &[C::XOP_Lwpins_r32_rm32_imm32, C::XOP_Lwpins_r64_rm32_imm32], &[BV, ED, ID])),
        l0(sz(Sizing::W, &[C::XOP_Lwpval_r32_rm32_imm32, C::XOP_Lwpval_r64_rm32_imm32], &[BV, ED, ID])),
        inv(),
        inv(),
        inv(),
        inv(),
        inv(),
        inv(),
    ]);

    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table_de::kinds::Family;
    use crate::table_de::TableDeserializer;

    #[test]
    fn xop_blob_reads_back() {
        let mut w = TableWriter::new();
        let roots = write(&mut w).unwrap();
        let records = TableDeserializer::new(Family::Xop, &w.finish())
            .read_all()
            .unwrap();
        assert_eq!(roots.len(), 3);
        assert_eq!(records.table(roots[2]).unwrap().len(), 256);
    }

    #[test]
    fn entries_select_on_pp() {
        let map = without_pp(map8());
        assert_eq!(map[0x00], Node::Invalid);
        match &map[0xa2] {
            Node::MandatoryPrefix { handlers, .. } => {
                assert_ne!(handlers[0], Node::Invalid);
                assert!(handlers[1..].iter().all(|h| *h == Node::Invalid));
            }
            other => panic!("unexpected node {:?}", other),
        }
    }
}
