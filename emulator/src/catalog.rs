//! Instruction catalog
//!
//! Every instruction is encoded as a single little-endian word. The opcode
//! sits in the five lowest bits, and each operand field occupies its own
//! contiguous bit range after it. The layouts are not positional: `BIR` stores
//! its `D` operand before its `C` operand.
//!
//! | Mnemonic | Opcode | Fields (offset, width)      | Size |
//! |----------|--------|-----------------------------|------|
//! | `LD`     | 1      | B(5,19), C(24,32)           | 7    |
//! | `RD`     | 2      | B(5,19), C(24,19)           | 6    |
//! | `WR`     | 3      | B(5,10), C(15,19), D(34,19) | 7    |
//! | `BIR`    | 4      | B(5,19), D(24,19), C(43,19) | 8    |

use parse_display::{Display, FromStr};

use crate::constants::{Opcode, Word, FIRST_FIELD_OFFSET, OPCODE_WIDTH};

#[derive(Display, FromStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[display(style = "UPPERCASE")]
pub enum Mnemonic {
    /// Load an immediate value in memory
    Ld,

    /// Copy a memory cell to another
    Rd,

    /// Indexed store
    Wr,

    /// Bitwise rotation to the right
    Bir,
}

impl Mnemonic {
    /// Get the encoding format of this instruction
    #[must_use]
    pub fn format(self) -> &'static Format {
        match self {
            Self::Ld => &CATALOG[0],
            Self::Rd => &CATALOG[1],
            Self::Wr => &CATALOG[2],
            Self::Bir => &CATALOG[3],
        }
    }

    #[must_use]
    pub fn opcode(self) -> Opcode {
        self.format().opcode
    }

    /// Parse a mnemonic, ignoring its case
    #[must_use]
    pub fn from_str_ignore_case(mnemonic: &str) -> Option<Self> {
        mnemonic.to_ascii_uppercase().parse().ok()
    }
}

/// Name of an operand field. They are named after their position in the
/// textual syntax: `B` is the first operand, `C` the second and `D` the third.
#[derive(Display, FromStr, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    B,
    C,
    D,
}

impl Field {
    /// Position of the field in the operand list
    #[must_use]
    pub const fn position(self) -> usize {
        match self {
            Self::B => 0,
            Self::C => 1,
            Self::D => 2,
        }
    }
}

/// Where a field lives in the encoded word
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldLayout {
    pub field: Field,
    pub offset: u32,
    pub width: u32,
}

impl FieldLayout {
    const fn new(field: Field, offset: u32, width: u32) -> Self {
        Self {
            field,
            offset,
            width,
        }
    }

    /// Mask of the field, right-aligned
    #[must_use]
    pub const fn mask(&self) -> Word {
        (1 << self.width) - 1
    }

    /// Largest value the field can hold
    #[must_use]
    pub const fn max(&self) -> Word {
        self.mask()
    }

    /// Check if a value fits in the field without truncation
    #[must_use]
    pub const fn fits(&self, value: Word) -> bool {
        value <= self.max()
    }

    /// First bit after the field
    #[must_use]
    pub const fn end(&self) -> u32 {
        self.offset + self.width
    }
}

/// Encoding format of an instruction
#[derive(Debug, PartialEq, Eq)]
pub struct Format {
    pub mnemonic: Mnemonic,
    pub opcode: Opcode,
    pub fields: &'static [FieldLayout],

    /// Size of the encoded instruction, in bytes
    pub size: usize,
}

impl Format {
    /// Lookup the format for an opcode
    #[must_use]
    pub fn from_opcode(opcode: Opcode) -> Option<&'static Self> {
        CATALOG.iter().find(|format| format.opcode == opcode)
    }

    /// Lookup the layout of a field
    #[must_use]
    pub fn field(&self, field: Field) -> Option<&'static FieldLayout> {
        let fields: &'static [FieldLayout] = self.fields;
        fields.iter().find(|layout| layout.field == field)
    }

    /// Fields in operand order (B, C, D), regardless of their place in the
    /// encoded word
    pub fn operands(&self) -> impl Iterator<Item = &'static FieldLayout> + '_ {
        [Field::B, Field::C, Field::D]
            .into_iter()
            .filter_map(|field| self.field(field))
    }
}

/// Mask of the opcode bits
pub(crate) const OPCODE_MASK: u8 = (1 << OPCODE_WIDTH) - 1;

/// The complete instruction set
pub static CATALOG: [Format; 4] = [
    Format {
        mnemonic: Mnemonic::Ld,
        opcode: 1,
        fields: &[
            FieldLayout::new(Field::B, FIRST_FIELD_OFFSET, 19),
            FieldLayout::new(Field::C, 24, 32),
        ],
        size: 7,
    },
    Format {
        mnemonic: Mnemonic::Rd,
        opcode: 2,
        fields: &[
            FieldLayout::new(Field::B, FIRST_FIELD_OFFSET, 19),
            FieldLayout::new(Field::C, 24, 19),
        ],
        size: 6,
    },
    Format {
        mnemonic: Mnemonic::Wr,
        opcode: 3,
        fields: &[
            FieldLayout::new(Field::B, FIRST_FIELD_OFFSET, 10),
            FieldLayout::new(Field::C, 15, 19),
            FieldLayout::new(Field::D, 34, 19),
        ],
        size: 7,
    },
    Format {
        mnemonic: Mnemonic::Bir,
        opcode: 4,
        fields: &[
            FieldLayout::new(Field::B, FIRST_FIELD_OFFSET, 19),
            FieldLayout::new(Field::D, 24, 19),
            FieldLayout::new(Field::C, 43, 19),
        ],
        size: 8,
    },
];
