//! # Unit Extractor
//!
//! Derives the set of units a block touches and partitions each unit's
//! transactions into its primary and its ordered secondaries.

use std::collections::BTreeMap;

use shared_types::{UnitId, UnitTransaction};

use super::errors::{InputError, ProofError};

/// One unit's transactions within a block.
///
/// `secondaries` keeps block order; it is the leaf order of the unit's
/// secondary tree.
#[derive(Debug)]
pub struct UnitTransactions<'a, T> {
    pub primary: Option<&'a T>,
    pub secondaries: Vec<&'a T>,
}

impl<'a, T> UnitTransactions<'a, T> {
    fn new() -> Self {
        Self {
            primary: None,
            secondaries: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondaries.is_empty()
    }
}

// Manual impl: the derive would require `T: Clone`.
impl<'a, T> Clone for UnitTransactions<'a, T> {
    fn clone(&self) -> Self {
        Self {
            primary: self.primary,
            secondaries: self.secondaries.clone(),
        }
    }
}

/// Sorted, de-duplicated unit ids touched by `txs`.
///
/// Independent of the order of `txs`.
pub fn extract_identifiers<T: UnitTransaction>(txs: &[T]) -> Vec<UnitId> {
    let mut ids: Vec<UnitId> = txs.iter().map(|tx| tx.unit_id()).collect();
    ids.sort_unstable();
    ids.dedup();
    ids
}

/// Transactions of `txs` that touch `unit_id`.
///
/// Fails with `DuplicatePrimary` if the unit has more than one primary.
pub fn extract_transactions<'a, T: UnitTransaction>(
    txs: &'a [T],
    unit_id: &UnitId,
) -> Result<UnitTransactions<'a, T>, ProofError> {
    let mut unit = UnitTransactions::new();
    for tx in txs.iter().filter(|tx| tx.unit_id() == *unit_id) {
        push(&mut unit, tx, unit_id)?;
    }
    Ok(unit)
}

/// Partition every transaction by unit in one pass. Keys iterate ascending.
pub fn group_by_unit<T: UnitTransaction>(
    txs: &[T],
) -> Result<BTreeMap<UnitId, UnitTransactions<'_, T>>, ProofError> {
    let mut groups: BTreeMap<UnitId, UnitTransactions<'_, T>> = BTreeMap::new();
    for tx in txs {
        let unit_id = tx.unit_id();
        let unit = groups.entry(unit_id).or_insert_with(UnitTransactions::new);
        push(unit, tx, &unit_id)?;
    }
    Ok(groups)
}

fn push<'a, T: UnitTransaction>(
    unit: &mut UnitTransactions<'a, T>,
    tx: &'a T,
    unit_id: &UnitId,
) -> Result<(), ProofError> {
    if !tx.is_primary() {
        unit.secondaries.push(tx);
        return Ok(());
    }
    if unit.primary.is_some() {
        tracing::warn!(unit = %unit_id, "block carries more than one primary for unit");
        return Err(InputError::DuplicatePrimary { unit_id: *unit_id }.into());
    }
    unit.primary = Some(tx);
    Ok(())
}
