use std::{fmt, io};

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A bit was set below the bits already written. The bitmap is unchanged.
    #[error("bitmap: can't set bit {pos}, {bits} bits are already written")]
    OutOfOrderSet { pos: u64, bits: u64 },

    /// A bit was set past `Bitmap::MAX_POS`. The bitmap is unchanged.
    #[error("bitmap: can't set bit {pos}, it is beyond the last addressable word")]
    PositionOutOfRange { pos: u64 },

    /// Malformed or truncated input while decoding.
    #[error("bitmap: can't read {field}: {source}")]
    Decode {
        field: Field,
        #[source]
        source: io::Error,
    },

    /// The output rejected or only partially accepted a write.
    #[error("bitmap: can't write {field}: {source}")]
    Write {
        field: Field,
        #[source]
        source: io::Error,
    },
}

impl Error {
    pub(crate) fn decode(field: Field) -> impl FnOnce(io::Error) -> Error {
        move |source| Error::Decode { field, source }
    }

    pub(crate) fn write(field: Field) -> impl FnOnce(io::Error) -> Error {
        move |source| Error::Write { field, source }
    }
}

/// Part of the wire format an I/O error belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    BitCount,
    WordCount,
    /// Zero-based index into the word array.
    Word(usize),
    ActiveRlw,
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Field::BitCount => write!(f, "uncompressed bit number"),
            Field::WordCount => write!(f, "compressed word number"),
            Field::Word(i) => write!(f, "word {}", i),
            Field::ActiveRlw => write!(f, "position of current RLW"),
        }
    }
}
