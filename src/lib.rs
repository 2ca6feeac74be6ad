//! Append-only EWAH (Enhanced Word-Aligned Hybrid) compressed bitmap.
//!
//! Bits are set in ascending order and stored as a sequence of 64-bit words:
//! running length words (RLW) that collapse runs of identical chunks, each
//! followed by the literal words it announces. The serialized form is the one
//! used by git's bitmap index.
//!
//! ```rust
//! use byteorder::NetworkEndian;
//! use ewah::Bitmap;
//!
//! let mut bitmap = Bitmap::new();
//! bitmap.set(3).unwrap();
//! bitmap.set(1000).unwrap();
//! assert!(bitmap.get(1000));
//! assert!(!bitmap.get(999));
//!
//! let mut buf = Vec::new();
//! let n = bitmap.write::<NetworkEndian, _>(&mut buf).unwrap();
//! assert_eq!(n as usize, buf.len());
//!
//! let copy = Bitmap::from_bytes::<NetworkEndian>(&buf).unwrap();
//! assert_eq!(bitmap, copy);
//! ```

#[macro_use]
extern crate log;
#[cfg(test)]
#[macro_use]
extern crate quickcheck;

mod error;
mod io;

pub mod ewah;

pub use error::{Error, Field, Result};
pub use ewah::{Bitmap, Block, Blocks, Rlw};
pub use io::{read_from, ReadFrom, WriteTo};
