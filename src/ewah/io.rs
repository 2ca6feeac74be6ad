use std::{cmp, io};

use byteorder::ByteOrder;

use crate::error::{Error, Field, Result};
use crate::io::{read_from, ReadFrom, WriteTo};
use super::{Bitmap, CHUNK_BITS};

// https://github.com/git/git/blob/master/Documentation/technical/bitmap-format.txt
//
// +-----------+------------+-----------------+------------------+
// | bits: u32 | words: u32 | words: [u64; N] | active RLW: u32  |
// +-----------+------------+-----------------+------------------+

// Trailer of a bitmap without any word.
const NO_ACTIVE_RLW: u32 = u32::MAX;

// Upper bound of words allocated ahead of reading them.
const PREALLOC_WORDS: usize = 1 << 12;

fn invalid_data(msg: String) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidData, msg)
}

impl Bitmap {
    /// Read a bitmap from `r`, in the byte order `B`.
    pub fn from_reader<B: ByteOrder, R: io::Read>(r: &mut R) -> Result<Self> {
        read_from::<B, R, Bitmap>(r)
    }

    /// Read a bitmap from the head of `bytes`, in the byte order `B`.
    pub fn from_bytes<B: ByteOrder>(mut bytes: &[u8]) -> Result<Self> {
        Self::from_reader::<B, _>(&mut bytes)
    }

    /// Write the bitmap to `w` in the byte order `B` and return the number of bytes written.
    pub fn write<B: ByteOrder, W: io::Write>(&self, w: &mut W) -> Result<u64> {
        self.write_to::<B>(w)
    }

    // Check that the blocks span the whole word sequence, that the last one
    // starts at the active RLW, and that they cover exactly `size()` bits.
    fn validate(&self) -> Result<()> {
        let active = match self.active {
            Some(i) => i,
            None if self.bits == 0 => return Ok(()),
            None => {
                return Err(Error::Decode {
                    field: Field::BitCount,
                    source: invalid_data(format!("{} bits but no words", self.bits)),
                })
            }
        };

        let mut blocks = self.blocks();
        let mut chunks = 0u64;
        let mut last = None;
        for block in blocks.by_ref() {
            chunks = chunks.saturating_add(block.rlw.chunks());
            last = Some(block.index);
        }

        if !blocks.remainder().is_empty() {
            let at = self.words.len() - blocks.remainder().len();
            return Err(Error::Decode {
                field: Field::ActiveRlw,
                source: invalid_data(format!(
                    "RLW at {} announces more literals than there are words",
                    at
                )),
            });
        }
        if last != Some(active) {
            return Err(Error::Decode {
                field: Field::ActiveRlw,
                source: invalid_data(format!("current RLW is at {:?}, not {}", last, active)),
            });
        }
        if chunks.checked_mul(CHUNK_BITS) != Some(self.size()) {
            return Err(Error::Decode {
                field: Field::BitCount,
                source: invalid_data(format!(
                    "{} bits but the words cover {} chunks",
                    self.bits, chunks
                )),
            });
        }
        Ok(())
    }
}

impl<W: io::Write> WriteTo<W> for Bitmap {
    type Error = Error;

    fn write_to<B: ByteOrder>(&self, w: &mut W) -> Result<u64> {
        let bits = u32::try_from(self.bits).map_err(|_| Error::Write {
            field: Field::BitCount,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} bits do not fit in 32 bits", self.bits),
            ),
        })?;
        let len = u32::try_from(self.words.len()).map_err(|_| Error::Write {
            field: Field::WordCount,
            source: io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("{} words do not fit in 32 bits", self.words.len()),
            ),
        })?;
        // the active RLW precedes the last word, so it fits too
        let active = self.active.map_or(NO_ACTIVE_RLW, |i| i as u32);

        let mut n = bits
            .write_to::<B>(w)
            .map_err(Error::write(Field::BitCount))?;
        n += len.write_to::<B>(w).map_err(Error::write(Field::WordCount))?;
        for (i, word) in self.words.iter().enumerate() {
            n += word.write_to::<B>(w).map_err(Error::write(Field::Word(i)))?;
        }
        n += active
            .write_to::<B>(w)
            .map_err(Error::write(Field::ActiveRlw))?;

        debug!("wrote {} bits in {} words ({} bytes)", bits, len, n);
        Ok(n)
    }
}

impl<R: io::Read> ReadFrom<R> for Bitmap {
    type Error = Error;

    fn read_from<B: ByteOrder>(&mut self, r: &mut R) -> Result<()> {
        self.reset();

        let bits = read_from::<B, R, u32>(r).map_err(Error::decode(Field::BitCount))?;
        let len = read_from::<B, R, u32>(r).map_err(Error::decode(Field::WordCount))? as usize;

        let mut words = Vec::with_capacity(cmp::min(len, PREALLOC_WORDS));
        for i in 0..len {
            words.push(read_from::<B, R, u64>(r).map_err(Error::decode(Field::Word(i)))?);
        }

        let active = read_from::<B, R, u32>(r).map_err(Error::decode(Field::ActiveRlw))?;

        let decoded = Bitmap {
            bits: u64::from(bits),
            active: if words.is_empty() {
                None
            } else {
                Some(active as usize)
            },
            words,
        };
        decoded.validate()?;

        debug!("read {} bits in {} words", bits, len);
        *self = decoded;
        Ok(())
    }
}
