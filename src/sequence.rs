//! Bit-slot index stepping.
//!
//! Successive slots are reached with `next = current + key * popcount(current)`, which
//! scatters the touched pixels irregularly while staying fully reproducible from the entry
//! index and the key. Encode and decode walk the exact same path.
//!
//! The walk carries no step limit of its own: a decode ends on an end-of-text match or on
//! the packer's bounds check. With `key == 0`, or with an entry of `0`, the walk never
//! leaves its first slot; choosing a useful entry and key is up to the caller.

/// Returns the slot that follows `current` for the given `key`.
///
/// Ones are counted over the full 64-bit pattern of `current` so the sequence does not
/// depend on the platform's pointer width. Arithmetic wraps on overflow.
#[must_use]
pub fn next_index(current: i64, key: i64) -> i64 {
    let ones = i64::from((current as u64).count_ones());
    current.wrapping_add(key.wrapping_mul(ones))
}

/// An endless iterator over bit-slot indices starting at an entry index.
///
/// # Examples
///
/// ```
/// use stegwalk_lib::sequence::IndexWalk;
///
/// let path: Vec<i64> = IndexWalk::new(1, 1).take(6).collect();
/// assert_eq!(path, [1, 2, 3, 5, 7, 10]);
/// ```
#[derive(Debug, Clone)]
pub struct IndexWalk {
    entry: i64,
    key: i64,
    current: i64,
}

impl IndexWalk {
    #[must_use]
    pub fn new(entry: i64, key: i64) -> Self {
        Self {
            entry,
            key,
            current: entry,
        }
    }

    /// Rewinds the walk to its entry index.
    pub fn restart(&mut self) {
        self.current = self.entry;
    }
}

impl Iterator for IndexWalk {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        let next = next_index(self.current, self.key);
        Some(std::mem::replace(&mut self.current, next))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (usize::MAX, None)
    }
}
