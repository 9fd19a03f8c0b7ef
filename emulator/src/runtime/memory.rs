use std::collections::BTreeMap;

use tracing::trace;

use super::snapshot::Snapshot;
use crate::constants::{Address, Word};

/// Sparse memory of the computer
///
/// Only the cells that were written are stored. Every other address reads as
/// zero.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Memory {
    cells: BTreeMap<Address, Word>,
}

impl Memory {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the cell at an address, zero if it was never written
    #[must_use]
    pub fn get(&self, address: Address) -> Word {
        self.cells.get(&address).copied().unwrap_or(0)
    }

    /// Write a cell
    pub fn set(&mut self, address: Address, value: Word) {
        trace!(address, value, "Writing memory");
        self.cells.insert(address, value);
    }

    /// Number of cells that were written
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Iterate over the written cells, by ascending address
    pub fn iter(&self) -> impl Iterator<Item = (Address, Word)> + '_ {
        self.cells.iter().map(|(&address, &value)| (address, value))
    }

    /// View every cell between `start` and `end`, both included
    #[must_use]
    pub fn snapshot(&self, start: Address, end: Address) -> Snapshot<'_> {
        Snapshot::new(self, start, end)
    }
}

impl FromIterator<(Address, Word)> for Memory {
    fn from_iter<T: IntoIterator<Item = (Address, Word)>>(iter: T) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}
