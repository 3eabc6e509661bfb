//! The opcode tables of every encoding family.
//!
//! Each family is described with `Node`s, serialized into a blob by `TableWriter` and read back
//! by `TableDeserializer`. Only the deserialized handler trees are kept.

use std::sync::{Arc, OnceLock};
use std::time::Instant;

use tracing::{debug, trace};

use crate::error::TableError;
use crate::handlers::HandlerRef;
use crate::table_de::kinds::Family;
use crate::table_de::writer::TableWriter;
use crate::table_de::{Records, TableDeserializer};

#[macro_use]
mod ops;

mod evex;
mod legacy;
mod mvex;
mod vex;
mod xop;

/// A 256 entry opcode map.
pub(crate) type Map = Arc<[HandlerRef]>;

#[derive(Debug)]
pub(crate) struct LegacyTables {
    /// The 0F, 0F38 and 0F3A maps hang off its escape entries.
    pub map0: Map,
}

#[derive(Debug)]
pub(crate) struct VexTables {
    pub map0: Map,
    pub map0f: Map,
    pub map0f38: Map,
    pub map0f3a: Map,
}

#[derive(Debug)]
pub(crate) struct XopTables {
    pub map8: Map,
    pub map9: Map,
    pub map10: Map,
}

#[derive(Debug)]
pub(crate) struct EvexTables {
    pub map0f: Map,
    pub map0f38: Map,
    pub map0f3a: Map,
    pub map5: Map,
    pub map6: Map,
}

#[derive(Debug)]
pub(crate) struct MvexTables {
    pub map0f: Map,
    pub map0f38: Map,
    pub map0f3a: Map,
}

/// Handler tables for all encodings. Immutable once built and shared by any number of
/// decoders.
#[derive(Debug)]
pub struct DecoderTables {
    pub(crate) legacy: LegacyTables,
    pub(crate) vex: VexTables,
    pub(crate) xop: XopTables,
    pub(crate) evex: EvexTables,
    pub(crate) mvex: MvexTables,
}

static SHARED: OnceLock<Result<Arc<DecoderTables>, TableError>> = OnceLock::new();

impl DecoderTables {
    /// The process wide tables, built on first use.
    pub fn shared() -> Result<Arc<DecoderTables>, TableError> {
        SHARED
            .get_or_init(|| DecoderTables::build().map(Arc::new))
            .clone()
    }

    /// Builds a fresh set of tables.
    pub fn build() -> Result<DecoderTables, TableError> {
        let start = Instant::now();

        let legacy = {
            let (records, roots) = load(Family::Legacy, legacy::write)?;
            LegacyTables {
                map0: root(&records, &roots, 0, "legacy map 0")?,
            }
        };
        let vex = {
            let (records, roots) = load(Family::Vex, vex::write)?;
            VexTables {
                map0: root(&records, &roots, 0, "VEX map 0")?,
                map0f: root(&records, &roots, 1, "VEX map 0F")?,
                map0f38: root(&records, &roots, 2, "VEX map 0F38")?,
                map0f3a: root(&records, &roots, 3, "VEX map 0F3A")?,
            }
        };
        let xop = {
            let (records, roots) = load(Family::Xop, xop::write)?;
            XopTables {
                map8: root(&records, &roots, 0, "XOP map 8")?,
                map9: root(&records, &roots, 1, "XOP map 9")?,
                map10: root(&records, &roots, 2, "XOP map 10")?,
            }
        };
        let evex = {
            let (records, roots) = load(Family::Evex, evex::write)?;
            EvexTables {
                map0f: root(&records, &roots, 0, "EVEX map 0F")?,
                map0f38: root(&records, &roots, 1, "EVEX map 0F38")?,
                map0f3a: root(&records, &roots, 2, "EVEX map 0F3A")?,
                map5: root(&records, &roots, 3, "EVEX map 5")?,
                map6: root(&records, &roots, 4, "EVEX map 6")?,
            }
        };
        let mvex = {
            let (records, roots) = load(Family::Mvex, mvex::write)?;
            MvexTables {
                map0f: root(&records, &roots, 0, "MVEX map 0F")?,
                map0f38: root(&records, &roots, 1, "MVEX map 0F38")?,
                map0f3a: root(&records, &roots, 2, "MVEX map 0F3A")?,
            }
        };

        debug!(elapsed = ?start.elapsed(), "decoder tables built");

        Ok(DecoderTables {
            legacy,
            vex,
            xop,
            evex,
            mvex,
        })
    }
}

/// Writes a family's blob and reads it back. `write` returns the ids of the root maps.
fn load<F>(family: Family, write: F) -> Result<(Records, Vec<u32>), TableError>
where
    F: FnOnce(&mut TableWriter) -> Result<Vec<u32>, TableError>,
{
    let mut w = TableWriter::new();
    let roots = write(&mut w)?;
    trace!(family = family.name(), bytes = w.len(), "table blob written");

    let blob = w.finish();
    let records = TableDeserializer::new(family, &blob).read_all()?;
    Ok((records, roots))
}

fn root(
    records: &Records,
    roots: &[u32],
    index: usize,
    name: &'static str,
) -> Result<Map, TableError> {
    let id = roots
        .get(index)
        .cloned()
        .ok_or(TableError::MissingTables(name))?;
    records.table(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_families_build() {
        let t = DecoderTables::build().unwrap();
        assert_eq!(t.legacy.map0.len(), 256);
        assert_eq!(t.vex.map0.len(), 256);
        assert_eq!(t.vex.map0f38.len(), 256);
        assert_eq!(t.xop.map10.len(), 256);
        assert_eq!(t.evex.map6.len(), 256);
        assert_eq!(t.mvex.map0f3a.len(), 256);
    }

    #[test]
    fn shared_tables_are_reused() {
        let a = DecoderTables::shared().unwrap();
        let b = DecoderTables::shared().unwrap();
        assert!(Arc::ptr_eq(&a, &b));
    }
}
