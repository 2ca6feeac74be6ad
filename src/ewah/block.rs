use super::{literal_bit, Rlw, CHUNK_BITS};

/// One RLW together with the literal words it announces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block<'a> {
    /// Index of the RLW in the word sequence.
    pub index: usize,
    pub rlw: Rlw,
    pub literals: &'a [u64],
}

impl<'a> Block<'a> {
    /// Number of words this block occupies.
    pub fn len(&self) -> usize {
        1 + self.literals.len()
    }

    /// Number of uncompressed bits this block covers.
    pub fn bits(&self) -> u64 {
        self.rlw.chunks() * CHUNK_BITS
    }

    /// Bit at `pos`, relative to the first bit of the block.
    pub(crate) fn get(&self, pos: u64) -> Option<bool> {
        let run_bits = u64::from(self.rlw.run()) * CHUNK_BITS;
        if pos < run_bits {
            return Some(self.rlw.bit());
        }
        let pos = pos - run_bits;
        let word = self.literals.get((pos / CHUNK_BITS) as usize)?;
        Some(word & literal_bit(pos % CHUNK_BITS) != 0)
    }

    /// Positions of set bits, offset by `start`.
    pub(crate) fn ones(self, start: u64) -> impl Iterator<Item = u64> + 'a {
        let run_end = start + u64::from(self.rlw.run()) * CHUNK_BITS;
        let run = if self.rlw.bit() { start..run_end } else { run_end..run_end };
        let literals = self.literals.iter().enumerate().flat_map(move |(i, &word)| {
            let base = run_end + i as u64 * CHUNK_BITS;
            (0..CHUNK_BITS)
                .filter(move |&offset| word & literal_bit(offset) != 0)
                .map(move |offset| base + offset)
        });
        run.chain(literals)
    }
}

/// Iterator over the blocks of a word sequence.
///
/// Stops early at a block whose literal count runs past the end of the words.
#[derive(Clone, Debug)]
pub struct Blocks<'a> {
    words: &'a [u64],
    index: usize,
}

impl<'a> Blocks<'a> {
    pub(crate) fn new(words: &'a [u64]) -> Self {
        Blocks { words, index: 0 }
    }

    /// Words not consumed by the blocks yielded so far.
    pub fn remainder(&self) -> &'a [u64] {
        self.words
    }
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        let (&head, rest) = self.words.split_first()?;
        let rlw = Rlw::from(head);
        let n = rlw.literals() as usize;
        if n > rest.len() {
            return None;
        }
        let (literals, rest) = rest.split_at(n);
        let block = Block {
            index: self.index,
            rlw,
            literals,
        };
        self.words = rest;
        self.index += block.len();
        Some(block)
    }
}
