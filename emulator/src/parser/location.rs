use std::ops::Range;

use nom::Offset;
use parse_display::Display;

#[derive(Clone, Debug, PartialEq, Display)]
#[display("{inner}", bound(T))]
pub struct Located<T> {
    pub inner: T,
    pub location: Location,
}

pub(crate) trait Locatable: Sized {
    fn with_location<L: Into<Location>>(self, location: L) -> Located<Self> {
        Located {
            inner: self,
            location: location.into(),
        }
    }
}

impl<T> Locatable for T {}

/// A span in the source, in bytes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Location {
    pub offset: usize,
    pub length: usize,
}

impl Location {
    #[must_use]
    pub const fn new(offset: usize, length: usize) -> Self {
        Self { offset, length }
    }

    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.offset..self.offset + self.length
    }
}

impl From<(usize, usize)> for Location {
    fn from((offset, length): (usize, usize)) -> Self {
        Location { offset, length }
    }
}

/// Locate a slice of the input in the full input
impl From<(&str, &str)> for Location {
    fn from((full, part): (&str, &str)) -> Self {
        Location {
            offset: full.offset(part),
            length: part.len(),
        }
    }
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.offset, self.offset + self.length)
    }
}
