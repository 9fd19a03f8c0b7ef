use parse_display::Display;

use crate::catalog::{Field, Format, Mnemonic};
use crate::codec::EncodeError;
use crate::constants::Word;

/// A decoded instruction
///
/// Operands are named after their position: `b` is the first one, `c` the
/// second and `d` the third.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum Instruction {
    /// Store the immediate `c` at address `b`
    #[display("LD  {b}, {c}")]
    Ld { b: Word, c: Word },

    /// Copy the cell at address `b` to address `c`
    #[display("RD  {b}, {c}")]
    Rd { b: Word, c: Word },

    /// Store the cell at address `c` to the address held in `d`, offset by `b`
    #[display("WR  {b}, {c}, {d}")]
    Wr { b: Word, c: Word, d: Word },

    /// Rotate the cell at address `c` to the right by the amount held in `b`,
    /// and store it at address `d`
    #[display("BIR {b}, {c}, {d}")]
    Bir { b: Word, c: Word, d: Word },
}

impl Instruction {
    #[must_use]
    pub const fn mnemonic(&self) -> Mnemonic {
        match self {
            Self::Ld { .. } => Mnemonic::Ld,
            Self::Rd { .. } => Mnemonic::Rd,
            Self::Wr { .. } => Mnemonic::Wr,
            Self::Bir { .. } => Mnemonic::Bir,
        }
    }

    #[must_use]
    pub fn format(&self) -> &'static Format {
        self.mnemonic().format()
    }

    /// Size of the encoded instruction, in bytes
    #[must_use]
    pub fn size(&self) -> usize {
        self.format().size
    }

    /// Get the value of a field, if this instruction has it
    #[must_use]
    pub const fn field(&self, field: Field) -> Option<Word> {
        match (*self, field) {
            (
                Self::Ld { b, .. } | Self::Rd { b, .. } | Self::Wr { b, .. } | Self::Bir { b, .. },
                Field::B,
            ) => Some(b),
            (
                Self::Ld { c, .. } | Self::Rd { c, .. } | Self::Wr { c, .. } | Self::Bir { c, .. },
                Field::C,
            ) => Some(c),
            (Self::Wr { d, .. } | Self::Bir { d, .. }, Field::D) => Some(d),
            (Self::Ld { .. } | Self::Rd { .. }, Field::D) => None,
        }
    }

    /// Build an instruction, getting each field value from a callback
    pub(crate) fn from_fields<F>(mnemonic: Mnemonic, mut get: F) -> Self
    where
        F: FnMut(Field) -> Word,
    {
        match mnemonic {
            Mnemonic::Ld => Self::Ld {
                b: get(Field::B),
                c: get(Field::C),
            },
            Mnemonic::Rd => Self::Rd {
                b: get(Field::B),
                c: get(Field::C),
            },
            Mnemonic::Wr => Self::Wr {
                b: get(Field::B),
                c: get(Field::C),
                d: get(Field::D),
            },
            Mnemonic::Bir => Self::Bir {
                b: get(Field::B),
                c: get(Field::C),
                d: get(Field::D),
            },
        }
    }

    /// Build an instruction from a mnemonic and a list of positional operands.
    ///
    /// The mnemonic is case-insensitive. Missing operands are set to zero.
    ///
    /// # Errors
    ///
    /// This fails if the mnemonic is unknown, if there are more operands than
    /// the instruction has fields, or if an operand does not fit in its field.
    pub fn from_operands(mnemonic: &str, operands: &[i128]) -> Result<Self, EncodeError> {
        let kind = Mnemonic::from_str_ignore_case(mnemonic).ok_or_else(|| {
            EncodeError::UnknownMnemonic {
                mnemonic: mnemonic.to_owned(),
            }
        })?;

        let format = kind.format();
        if operands.len() > format.fields.len() {
            return Err(EncodeError::TooManyOperands {
                mnemonic: kind,
                expected: format.fields.len(),
                got: operands.len(),
            });
        }

        let mut values: [Word; 3] = [0; 3];
        for layout in format.operands() {
            let position = layout.field.position();
            let raw = operands.get(position).copied().unwrap_or_default();
            let value = Word::try_from(raw)
                .ok()
                .filter(|value| layout.fits(*value))
                .ok_or(EncodeError::FieldOutOfRange {
                    field: layout.field,
                    mnemonic: kind,
                    value: raw,
                    max: layout.max(),
                })?;
            values[position] = value;
        }

        Ok(Self::from_fields(kind, |field| values[field.position()]))
    }
}
