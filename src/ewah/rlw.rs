use std::fmt;

// 1000000000000000000000000000000000000000000000000000000000000000
const BIT_MASK: u64 = 1 << 63;
// 0111111111111111111111111111111110000000000000000000000000000000
const RUN_MASK: u64 = !0u64 >> 32 << 31;
// 0000000000000000000000000000000001111111111111111111111111111111
const LITERALS_MASK: u64 = !0u64 >> 33;

const RUN_SHIFT: u32 = 31;

/// Running Length Word.
///
/// A control word made of three fields, most significant bit first:
///
/// - the repeated bit (1 bit),
/// - the number of 64-bit chunks filled with the repeated bit (32 bits),
/// - the number of literal words that follow this word (31 bits).
///
/// Field values are range-checked rather than truncated: `new` and
/// `set_literals` panic on a literal count above `MAX_LITERALS`, so callers
/// holding untrusted counts should go through `checked_new` instead.
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rlw(u64);

impl Rlw {
    /// Largest encodable run length.
    pub const MAX_RUN: u32 = u32::MAX;

    /// Largest encodable literal count.
    pub const MAX_LITERALS: u32 = u32::MAX >> 1;

    /// # Panics
    ///
    /// Panics if `literals` does not fit in 31 bits.
    pub fn new(bit: bool, run: u32, literals: u32) -> Self {
        match Self::checked_new(bit, run, literals) {
            Some(rlw) => rlw,
            None => panic!("literal count overflow: {}", literals),
        }
    }

    /// Return `None` if `literals` does not fit in 31 bits.
    pub fn checked_new(bit: bool, run: u32, literals: u32) -> Option<Self> {
        if literals > Self::MAX_LITERALS {
            return None;
        }
        Some(Rlw((bit as u64) << 63 | u64::from(run) << RUN_SHIFT | u64::from(literals)))
    }

    #[inline]
    pub fn bit(self) -> bool {
        self.0 & BIT_MASK != 0
    }

    #[inline]
    pub fn run(self) -> u32 {
        ((self.0 & RUN_MASK) >> RUN_SHIFT) as u32
    }

    #[inline]
    pub fn literals(self) -> u32 {
        (self.0 & LITERALS_MASK) as u32
    }

    /// Number of uncompressed 64-bit chunks this word covers, including its literals.
    #[inline]
    pub fn chunks(self) -> u64 {
        u64::from(self.run()) + u64::from(self.literals())
    }

    #[inline]
    pub fn set_run(&mut self, run: u32) {
        self.0 = (self.0 & !RUN_MASK) | u64::from(run) << RUN_SHIFT;
    }

    /// # Panics
    ///
    /// Panics if `literals` does not fit in 31 bits.
    #[inline]
    pub fn set_literals(&mut self, literals: u32) {
        assert!(literals <= Self::MAX_LITERALS, "literal count overflow: {}", literals);
        self.0 = (self.0 & !LITERALS_MASK) | u64::from(literals);
    }

    pub fn word(self) -> u64 {
        self.0
    }
}

impl From<u64> for Rlw {
    fn from(word: u64) -> Self {
        Rlw(word)
    }
}

impl From<Rlw> for u64 {
    fn from(rlw: Rlw) -> Self {
        rlw.0
    }
}

impl fmt::Debug for Rlw {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Rlw({}, {}, {})", self.bit() as u8, self.run(), self.literals())
    }
}
