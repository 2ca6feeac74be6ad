mod block;
mod io;
mod rlw;

use std::cmp;

use crate::error::{Error, Result};

pub use self::block::{Block, Blocks};
pub use self::rlw::Rlw;

const CHUNK_BITS: u64 = 64;
const ALL_ONES: u64 = !0;

/// Word with only the bit at `offset` set, counting from the most significant bit.
#[inline]
fn literal_bit(offset: u64) -> u64 {
    1 << (CHUNK_BITS - 1 - offset)
}

/// EWAH compressed bitmap.
///
/// Bits can only be set in ascending order; unset bits read as `false`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Bitmap {
    // number of bits written so far
    bits: u64,
    // RLWs, each followed by its literal words
    words: Vec<u64>,
    // index of the RLW extended by `set`
    active: Option<usize>,
}

impl Bitmap {
    /// Highest position `set` accepts, so that `size()` stays representable.
    pub const MAX_POS: u64 = u64::MAX - CHUNK_BITS;

    /// Return new empty Bitmap.
    pub fn new() -> Self {
        Bitmap::default()
    }

    /// Set the bit at `pos` to 1.
    ///
    /// Positions must not go backwards: setting a bit below `self.bits()`
    /// fails with `Error::OutOfOrderSet` and leaves the bitmap as it was.
    /// Positions above `Bitmap::MAX_POS` fail with `Error::PositionOutOfRange`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ewah::{Bitmap, Error};
    ///
    /// let mut bitmap = Bitmap::new();
    /// assert!(bitmap.set(64).is_ok());
    /// assert!(bitmap.set(70).is_ok());
    /// assert!(matches!(bitmap.set(64), Err(Error::OutOfOrderSet { pos: 64, bits: 71 })));
    /// assert!(bitmap.get(64));
    /// ```
    pub fn set(&mut self, pos: u64) -> Result<()> {
        if pos > Self::MAX_POS {
            return Err(Error::PositionOutOfRange { pos });
        }
        if pos < self.bits {
            return Err(Error::OutOfOrderSet {
                pos,
                bits: self.bits,
            });
        }

        let active = match self.active {
            Some(i) => i,
            None => {
                self.words.push(Rlw::default().word());
                self.active = Some(0);
                0
            }
        };

        let size = self.size();
        let bit = literal_bit(pos % CHUNK_BITS);
        if pos < size {
            self.set_in_last_chunk(active, bit);
        } else {
            self.push_literal(active, (pos - size) / CHUNK_BITS, bit);
        }

        self.bits = pos + 1;
        Ok(())
    }

    // The chunk holding `bit` is already allocated, it is the trailing one.
    fn set_in_last_chunk(&mut self, active: usize, bit: u64) {
        let last = self.words.len() - 1;

        if last == active {
            // The partial chunk is the tail of a run. Nothing to do for a run
            // of ones, a run of zeros hands its last chunk over to a literal.
            let mut rlw = Rlw::from(self.words[active]);
            if !rlw.bit() {
                rlw.set_run(rlw.run().saturating_sub(1));
                rlw.set_literals(1);
                self.words[active] = rlw.word();
                self.words.push(bit);
            }
            return;
        }

        self.words[last] |= bit;
        if self.words[last] != ALL_ONES {
            return;
        }

        let mut rlw = Rlw::from(self.words[active]);
        if rlw.bit() && rlw.literals() == 1 && rlw.run() < Rlw::MAX_RUN {
            // the full literal is the only one of a run of ones: extend the run
            rlw.set_run(rlw.run() + 1);
            rlw.set_literals(0);
            self.words[active] = rlw.word();
            self.words.truncate(last);
        } else {
            rlw.set_literals(rlw.literals() - 1);
            self.words[active] = rlw.word();
            self.words[last] = Rlw::new(true, 1, 0).word();
            self.active = Some(last);
            trace!("open RLW at {} for a full literal", last);
        }
    }

    // Append `gap` chunks of zeros followed by the literal `word`.
    fn push_literal(&mut self, active: usize, gap: u64, word: u64) {
        let mut rlw = Rlw::from(self.words[active]);

        if gap == 0 && rlw.literals() < Rlw::MAX_LITERALS {
            rlw.set_literals(rlw.literals() + 1);
            self.words[active] = rlw.word();
        } else if gap > 0 && !rlw.bit() && rlw.literals() == 0 {
            // the gap continues the zero run of the active RLW
            let room = u64::from(Rlw::MAX_RUN - rlw.run());
            let fill = cmp::min(gap, room);
            rlw.set_run(rlw.run() + fill as u32);
            if fill == gap {
                rlw.set_literals(1);
                self.words[active] = rlw.word();
            } else {
                self.words[active] = rlw.word();
                self.open_zero_run(gap - fill);
            }
        } else {
            self.open_zero_run(gap);
        }

        self.words.push(word);
    }

    // Append RLWs covering `gap` chunks of zeros, the last one announcing a
    // single literal, and make it the active RLW.
    fn open_zero_run(&mut self, mut gap: u64) {
        let max = u64::from(Rlw::MAX_RUN);
        while gap > max {
            self.words.push(Rlw::new(false, Rlw::MAX_RUN, 0).word());
            gap -= max;
        }
        let index = self.words.len();
        self.words.push(Rlw::new(false, gap as u32, 1).word());
        self.active = Some(index);
        trace!("open RLW at {} after {} zero chunks", index, gap);
    }

    /// Return the bit at `pos`. Bits at or beyond `self.bits()` are `false`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ewah::Bitmap;
    ///
    /// let mut bitmap = Bitmap::new();
    /// bitmap.set(1 << 20).unwrap();
    /// assert!(!bitmap.get(0));
    /// assert!(bitmap.get(1 << 20));
    /// assert!(!bitmap.get(u64::MAX));
    /// ```
    pub fn get(&self, pos: u64) -> bool {
        if pos >= self.bits {
            return false;
        }

        let mut acc = 0;
        for block in self.blocks() {
            let bits = block.bits();
            if pos < acc + bits {
                return block.get(pos - acc).unwrap_or(false);
            }
            acc += bits;
        }
        false
    }

    /// Positions of the bits set to 1, in ascending order.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use ewah::Bitmap;
    ///
    /// let mut bitmap = Bitmap::new();
    /// for &pos in &[3, 64, 1000] {
    ///     bitmap.set(pos).unwrap();
    /// }
    /// assert_eq!(bitmap.ones().collect::<Vec<_>>(), vec![3, 64, 1000]);
    /// ```
    pub fn ones<'a>(&'a self) -> impl Iterator<Item = u64> + 'a {
        let bits = self.bits;
        self.blocks()
            .scan(0, |acc, block| {
                let start = *acc;
                *acc += block.bits();
                Some((start, block))
            })
            .flat_map(|(start, block)| block.ones(start))
            .take_while(move |&pos| pos < bits)
    }

    /// Blocks of the encoded word sequence.
    pub fn blocks(&self) -> Blocks<'_> {
        Blocks::new(&self.words)
    }

    /// Number of bits written, one past the last bit set.
    pub fn bits(&self) -> u64 {
        self.bits
    }

    /// Number of bits allocated, `self.bits()` rounded up to a whole word.
    pub fn size(&self) -> u64 {
        let chunks = self.bits / CHUNK_BITS + u64::from(self.bits % CHUNK_BITS != 0);
        chunks * CHUNK_BITS
    }

    /// Number of bytes taken by the compressed words.
    pub fn bytes(&self) -> usize {
        self.words.len() * std::mem::size_of::<u64>()
    }

    pub fn words(&self) -> &[u64] {
        &self.words
    }

    /// Index of the RLW that is still extended by `set`.
    pub fn active_rlw(&self) -> Option<usize> {
        self.active
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Clear contents and go back to the empty state.
    pub fn reset(&mut self) {
        self.bits = 0;
        self.words.clear();
        self.active = None;
    }
}
