//! This module contains utility functionality needed for this crate. Most
//! prominently, it contains the definition of the [DigitSet] used for storing
//! the remaining candidate digits of unresolved cells.

use rand::Rng;

/// The largest grid size for which a [DigitSet] can store candidates. This is
/// the reason grids are limited to 64 digits (8x8 boxes): all candidates of a
/// cell fit into a single machine word, which makes copying a grid during the
/// search as cheap as a `memcpy`.
pub const MAX_DIGITS: usize = 64;

/// A set of digits in the range `[1, size]`, implemented as a bitmask. Digit
/// `d` is stored in bit `d - 1`. Since [MAX_DIGITS] bounds the grid size, the
/// entire set fits into one `u64` and the type is `Copy`.
///
/// Sets are used to track the remaining candidates of unresolved Sudoku
/// cells, so `size` is the grid size and a full set represents a cell about
/// which nothing is known yet.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub struct DigitSet {
    size: usize,
    bits: u64
}

impl DigitSet {

    /// Creates a new, empty `DigitSet` for digits in the range `[1, size]`.
    /// `size` must be at most [MAX_DIGITS].
    pub fn empty(size: usize) -> DigitSet {
        debug_assert!(size <= MAX_DIGITS);

        DigitSet {
            size,
            bits: 0
        }
    }

    /// Creates a new `DigitSet` that contains every digit in the range
    /// `[1, size]`. `size` must be at most [MAX_DIGITS].
    pub fn full(size: usize) -> DigitSet {
        debug_assert!(size <= MAX_DIGITS);
        let bits = if size == MAX_DIGITS {
            u64::MAX
        }
        else {
            (1u64 << size) - 1
        };

        DigitSet {
            size,
            bits
        }
    }

    /// Gets the size of the grid whose digits this set can contain, i.e. the
    /// highest digit that can be inserted.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Indicates whether this set contains the given digit. Digits outside
    /// the range `[1, size]` are never contained.
    pub fn contains(&self, digit: usize) -> bool {
        if digit == 0 || digit > self.size {
            return false;
        }

        self.bits & (1u64 << (digit - 1)) != 0
    }

    /// Inserts the given digit into this set, such that [DigitSet::contains]
    /// returns `true` for it afterwards. The digit must be in the range
    /// `[1, size]`.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// not present before) and `false` otherwise.
    pub fn insert(&mut self, digit: usize) -> bool {
        debug_assert!(digit >= 1 && digit <= self.size);
        let mask = 1u64 << (digit - 1);
        let changed = self.bits & mask == 0;
        self.bits |= mask;
        changed
    }

    /// Removes the given digit from this set, such that [DigitSet::contains]
    /// returns `false` for it afterwards. The digit must be in the range
    /// `[1, size]`.
    ///
    /// This method returns `true` if the set has changed (i.e. the digit was
    /// present before) and `false` otherwise.
    pub fn remove(&mut self, digit: usize) -> bool {
        debug_assert!(digit >= 1 && digit <= self.size);
        let mask = 1u64 << (digit - 1);
        let changed = self.bits & mask != 0;
        self.bits &= !mask;
        changed
    }

    /// Returns the number of digits contained in this set.
    pub fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    /// Indicates whether this set is empty, i.e. contains no digits. For a
    /// candidate set, this means the associated cell has no legal digit left
    /// and the grid is unsolvable.
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// If this set contains exactly one digit, returns that digit, otherwise
    /// `None`. Used by the solver to detect cells that are forced without
    /// branching.
    pub fn only(&self) -> Option<usize> {
        if self.len() == 1 {
            Some(self.bits.trailing_zeros() as usize + 1)
        }
        else {
            None
        }
    }

    /// Returns an iterator over the digits contained in this set in ascending
    /// order.
    pub fn iter(&self) -> DigitSetIter {
        DigitSetIter {
            bits: self.bits
        }
    }
}

/// An iterator over the digits of a [DigitSet] in ascending order.
pub struct DigitSetIter {
    bits: u64
}

impl Iterator for DigitSetIter {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        if self.bits == 0 {
            None
        }
        else {
            let digit = self.bits.trailing_zeros() as usize + 1;
            self.bits &= self.bits - 1;
            Some(digit)
        }
    }
}

impl<'a> IntoIterator for &'a DigitSet {
    type Item = usize;
    type IntoIter = DigitSetIter;

    fn into_iter(self) -> DigitSetIter {
        self.iter()
    }
}

/// Creates a new [DigitSet] that contains the specified digits. First, the
/// grid size must be specified. Then, after a semicolon, a comma-separated
/// list of the contained digits must be provided. For empty sets,
/// [DigitSet::empty] can be used.
///
/// An example usage of this macro looks as follows:
///
/// ```
/// use sudoku_forge::digits;
/// use sudoku_forge::util::DigitSet;
///
/// let set = digits!(9; 2, 4);
/// assert_eq!(9, set.size());
/// assert!(set.contains(2));
/// assert!(!set.contains(3));
/// ```
#[macro_export]
macro_rules! digits {
    ($size:expr; $($ds:expr),+) => {
        {
            let mut set = DigitSet::empty($size);
            $(set.insert($ds);)+
            set
        }
    };
}

/// Returns the elements yielded by the given iterator in uniformly random
/// order as a vector.
pub(crate) fn shuffle<T>(rng: &mut impl Rng, values: impl Iterator<Item = T>)
        -> Vec<T> {
    let mut vec: Vec<T> = values.collect();
    let len = vec.len();

    for i in 0..len.saturating_sub(1) {
        let j = rng.gen_range(i..len);
        vec.swap(i, j);
    }

    vec
}

#[cfg(test)]
mod tests {

    use super::*;

    #[test]
    fn empty_set_contains_nothing() {
        let set = DigitSet::empty(9);
        assert!(set.is_empty());
        assert!(!set.contains(1));
        assert!(!set.contains(5));
        assert!(!set.contains(9));
        assert_eq!(0, set.len());
    }

    #[test]
    fn full_set_contains_everything() {
        let set = DigitSet::full(9);
        assert!(!set.is_empty());
        assert!(set.contains(1));
        assert!(set.contains(5));
        assert!(set.contains(9));
        assert!(!set.contains(0));
        assert!(!set.contains(10));
        assert_eq!(9, set.len());
    }

    #[test]
    fn full_set_of_maximum_size() {
        let set = DigitSet::full(MAX_DIGITS);
        assert_eq!(MAX_DIGITS, set.len());
        assert!(set.contains(1));
        assert!(set.contains(MAX_DIGITS));
    }

    #[test]
    fn manipulation() {
        let mut set = DigitSet::empty(9);
        assert!(set.insert(2));
        assert!(set.insert(4));
        assert!(!set.insert(2));

        assert!(set.contains(2));
        assert!(set.contains(4));
        assert!(!set.contains(3));
        assert_eq!(2, set.len());

        assert!(set.remove(2));
        assert!(!set.remove(2));

        assert!(!set.contains(2));
        assert!(set.contains(4));
        assert_eq!(1, set.len());
    }

    #[test]
    fn only_detects_singletons() {
        let mut set = DigitSet::empty(4);
        assert_eq!(None, set.only());

        set.insert(3);
        assert_eq!(Some(3), set.only());

        set.insert(1);
        assert_eq!(None, set.only());
    }

    #[test]
    fn iteration_is_ascending() {
        let set = digits!(16; 1, 3, 9, 16);
        let collected: Vec<usize> = set.iter().collect();
        assert_eq!(vec![1, 3, 9, 16], collected);
    }

    #[test]
    fn digits_macro_has_specified_size() {
        let set = digits!(4; 2);
        assert_eq!(4, set.size());
        assert_eq!(1, set.len());
        assert!(set.contains(2));
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut rng = rand::thread_rng();
        let mut result = shuffle(&mut rng, 1..=9);
        result.sort_unstable();
        assert_eq!((1..=9).collect::<Vec<usize>>(), result);
    }

    #[test]
    fn shuffle_of_empty_iterator_is_empty() {
        let mut rng = rand::thread_rng();
        let result = shuffle(&mut rng, std::iter::empty::<usize>());
        assert!(result.is_empty());
    }

    #[test]
    fn shuffling_uniformly_distributed() {
        // 18000 experiments, 6 options (3!), so if uniformly distributed:
        // p = 1/6, my = 3000, sigma = sqrt(18000 * 1/6 * 5/6) = 50
        // with a probability of the amount being in the range [2600, 3400]
        // is more than 99,9999999999999 %.

        let mut counts = [0; 6];
        let mut rng = rand::thread_rng();

        for _ in 0..18000 {
            let result = shuffle(&mut rng, 1..=3);

            if result == vec![1, 2, 3] {
                counts[0] += 1;
            }
            else if result == vec![1, 3, 2] {
                counts[1] += 1;
            }
            else if result == vec![2, 1, 3] {
                counts[2] += 1;
            }
            else if result == vec![2, 3, 1] {
                counts[3] += 1;
            }
            else if result == vec![3, 1, 2] {
                counts[4] += 1;
            }
            else if result == vec![3, 2, 1] {
                counts[5] += 1;
            }
        }

        for count in counts.iter() {
            assert!(*count >= 2600 && *count <= 3400,
                "Count is not in range [2600, 3400].");
        }
    }
}
