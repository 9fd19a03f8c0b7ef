use parse_display::Display;
use serde::ser::{Serialize, SerializeStruct, Serializer};

use super::memory::Memory;
use crate::constants::{Address, Word};

/// A memory cell, as seen in a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, serde::Serialize)]
#[display("{address}: {value}")]
pub struct Cell {
    pub address: Address,
    pub value: Word,
}

/// Read-only view over a contiguous range of memory
///
/// It yields exactly one cell for each address of the range, including the
/// ones that were never written. Cells are read on demand, so the range can
/// span the whole address space.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    memory: &'a Memory,
    start: Address,
    end: Address,
}

impl<'a> Snapshot<'a> {
    /// View the memory from `start` to `end` included. The snapshot is empty
    /// if `start > end`.
    #[must_use]
    pub const fn new(memory: &'a Memory, start: Address, end: Address) -> Self {
        Self { memory, start, end }
    }

    #[must_use]
    pub const fn start(&self) -> Address {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Address {
        self.end
    }

    /// Number of cells in the snapshot. A full-range snapshot holds 2^64
    /// cells, which does not fit in a `u64`.
    #[must_use]
    pub fn len(&self) -> u128 {
        if self.is_empty() {
            0
        } else {
            u128::from(self.end - self.start) + 1
        }
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Iterate over the cells, by ascending address
    pub fn cells(&self) -> impl DoubleEndedIterator<Item = Cell> + 'a {
        let memory = self.memory;
        (self.start..=self.end).map(move |address| Cell {
            address,
            value: memory.get(address),
        })
    }

    /// Iterate over `(address, value)` pairs
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (Address, Word)> + 'a {
        self.cells().map(|cell| (cell.address, cell.value))
    }
}

impl std::fmt::Display for Snapshot<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for cell in self.cells() {
            writeln!(f, "{cell}")?;
        }
        Ok(())
    }
}

/// Streams the cells of a snapshot as a sequence
struct Cells<'s, 'a>(&'s Snapshot<'a>);

impl Serialize for Cells<'_, '_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.cells())
    }
}

impl Serialize for Snapshot<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Snapshot", 3)?;
        state.serialize_field("start", &self.start)?;
        state.serialize_field("end", &self.end)?;
        state.serialize_field("cells", &Cells(self))?;
        state.end()
    }
}
