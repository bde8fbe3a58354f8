//! Per-theory symbol cache
//!
//! F/R tables are computed once per process and shared read-only. The cache
//! is keyed by [`AnyonType`]; recomputation is idempotent, so a race between
//! two threads at most duplicates work before one entry wins.

use crate::error::Result;
use crate::fmatrix::FMatrixData;
use crate::rmatrix::RMatrixData;
use dashmap::DashMap;
use std::sync::{Arc, OnceLock};
use topoq_core::AnyonType;

/// The cached symbol tables of one theory
#[derive(Clone, Debug)]
pub struct SymbolTables {
    pub f: FMatrixData,
    pub r: RMatrixData,
}

static CACHE: OnceLock<DashMap<AnyonType, Arc<SymbolTables>>> = OnceLock::new();

/// The symbol tables of a theory, computed on first use
///
/// # Example
/// ```
/// use topoq_core::AnyonType;
/// use topoq_symbols::symbols;
///
/// let tables = symbols(AnyonType::Ising).unwrap();
/// assert_eq!(tables.f.len(), 6);
/// ```
pub fn symbols(anyon_type: AnyonType) -> Result<Arc<SymbolTables>> {
    let cache = CACHE.get_or_init(DashMap::new);
    if let Some(entry) = cache.get(&anyon_type) {
        return Ok(Arc::clone(&entry));
    }
    let tables = Arc::new(SymbolTables {
        f: FMatrixData::compute(anyon_type)?,
        r: RMatrixData::compute(anyon_type)?,
    });
    let entry = cache.entry(anyon_type).or_insert(tables);
    Ok(Arc::clone(&entry))
}
