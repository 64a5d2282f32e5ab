//! Fixed-capacity I/O vectors and the latch register.
//!
//! Every index is bounded by [`MAX_IO`]. Reads past the bound yield `false`
//! and writes past it are dropped, so callers never have to validate an index
//! before handing it to the engine.

/// Number of input, output, and latch slots.
pub const MAX_IO: usize = 8;

/// A fixed-size vector of boolean I/O values.
///
/// Slot `i` maps to bit `i` of the packed `u8` form used by [`IoBits::from_bits`]
/// and [`IoBits::bits`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct IoBits([bool; MAX_IO]);

impl IoBits {
    /// All slots false.
    #[must_use]
    pub const fn new() -> Self {
        Self([false; MAX_IO])
    }

    /// Unpack a bit pattern: bit `i` becomes slot `i`.
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        let mut slots = [false; MAX_IO];
        let mut i = 0;
        while i < MAX_IO {
            slots[i] = bits & (1 << i) != 0;
            i += 1;
        }
        Self(slots)
    }

    /// Build from a slice; elements past [`MAX_IO`] are ignored.
    #[must_use]
    pub fn from_slice(values: &[bool]) -> Self {
        let mut bits = Self::new();
        for (i, &v) in values.iter().take(MAX_IO).enumerate() {
            bits.0[i] = v;
        }
        bits
    }

    /// Packed bit pattern.
    #[must_use]
    pub fn bits(&self) -> u8 {
        self.0
            .iter()
            .enumerate()
            .fold(0u8, |acc, (i, &v)| if v { acc | (1 << i) } else { acc })
    }

    /// Value of slot `index`, or `false` when out of range.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Set slot `index`. Out-of-range writes are ignored.
    #[inline]
    pub fn set(&mut self, index: usize, value: bool) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = value;
        }
    }

    /// Builder form of [`IoBits::set`].
    #[must_use]
    pub fn with(mut self, index: usize, value: bool) -> Self {
        self.set(index, value);
        self
    }

    /// Exact equality over the first `n` slots (`n` is clamped to [`MAX_IO`]).
    #[must_use]
    pub fn matches_prefix(&self, other: &Self, n: usize) -> bool {
        let n = n.min(MAX_IO);
        self.0[..n] == other.0[..n]
    }

    /// Borrow the slots.
    #[inline]
    #[must_use]
    pub fn as_array(&self) -> &[bool; MAX_IO] {
        &self.0
    }

    /// Iterate over all slots in index order.
    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.0.iter().copied()
    }
}

impl From<[bool; MAX_IO]> for IoBits {
    fn from(slots: [bool; MAX_IO]) -> Self {
        Self(slots)
    }
}

impl From<u8> for IoBits {
    fn from(bits: u8) -> Self {
        Self::from_bits(bits)
    }
}

/// Persistent latch bits, one per output index.
///
/// A set latch forces its output true once all rungs have been evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatchState([bool; MAX_IO]);

impl LatchState {
    #[must_use]
    pub const fn new() -> Self {
        Self([false; MAX_IO])
    }

    /// Set latch `index`. Out-of-range is a no-op.
    #[inline]
    pub fn set(&mut self, index: usize) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = true;
        }
    }

    /// Clear latch `index`. Out-of-range is a no-op.
    #[inline]
    pub fn clear(&mut self, index: usize) {
        if let Some(slot) = self.0.get_mut(index) {
            *slot = false;
        }
    }

    #[inline]
    #[must_use]
    pub fn is_set(&self, index: usize) -> bool {
        self.0.get(index).copied().unwrap_or(false)
    }

    /// Clear every latch.
    pub fn reset(&mut self) {
        self.0 = [false; MAX_IO];
    }

    /// True when no latch is set.
    #[must_use]
    pub fn is_clear(&self) -> bool {
        !self.0.iter().any(|&v| v)
    }

    /// Indices of the latches currently set, ascending.
    pub fn iter_set(&self) -> impl Iterator<Item = usize> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, &v)| v.then_some(i))
    }

    /// Force every latched output true.
    pub fn apply_to(&self, outputs: &mut IoBits) {
        for index in self.iter_set() {
            outputs.set(index, true);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_roundtrip_slot_order() {
        let bits = IoBits::from_bits(0b0000_0101);
        assert!(bits.get(0));
        assert!(!bits.get(1));
        assert!(bits.get(2));
        assert_eq!(bits.bits(), 0b0000_0101);
    }

    #[test]
    fn out_of_range_reads_false_and_writes_drop() {
        let mut bits = IoBits::from_bits(0xFF);
        assert!(!bits.get(MAX_IO));
        assert!(!bits.get(usize::MAX));
        bits.set(MAX_IO, false);
        bits.set(200, true);
        assert_eq!(bits.bits(), 0xFF);
    }

    #[test]
    fn from_slice_truncates() {
        let values = [true; 12];
        let bits = IoBits::from_slice(&values);
        assert_eq!(bits.bits(), 0xFF);
        assert_eq!(IoBits::from_slice(&[false, true]).bits(), 0b10);
    }

    #[test]
    fn matches_prefix_ignores_tail() {
        let a = IoBits::from_bits(0b0000_0011);
        let b = IoBits::from_bits(0b1000_0011);
        assert!(a.matches_prefix(&b, 2));
        assert!(a.matches_prefix(&b, 7));
        assert!(!a.matches_prefix(&b, 8));
        assert!(!a.matches_prefix(&b, 100));
        assert!(a.matches_prefix(&b, 0));
    }

    #[test]
    fn latch_set_clear_and_apply() {
        let mut latches = LatchState::new();
        assert!(latches.is_clear());
        latches.set(1);
        latches.set(5);
        latches.set(MAX_IO + 3);
        assert_eq!(latches.iter_set().collect::<Vec<_>>(), vec![1, 5]);

        latches.clear(5);
        latches.clear(99);
        let mut outputs = IoBits::new();
        latches.apply_to(&mut outputs);
        assert_eq!(outputs.bits(), 0b10);

        latches.reset();
        assert!(latches.is_clear());
    }
}
