//! Seeded 64-bit signatures of bit-vector prefixes, with support for
//! incremental prefix hashing.
#![cfg(target_pointer_width = "64")]

use crate::bit_vector::{BitVector, WORD_LEN};

const MULT: u64 = 0xc6a4_a793_5bd1_e995;
const SHIFT: u32 = 47;

#[inline(always)]
const fn shuffle(mut k: u64) -> u64 {
    k = k.wrapping_mul(MULT);
    k ^= k >> SHIFT;
    k.wrapping_mul(MULT)
}

#[inline(always)]
const fn step(h: u64, w: u64) -> u64 {
    (h ^ shuffle(w)).wrapping_mul(MULT)
}

/// Folds the masked tail word and the prefix length into the running state,
/// so that prefixes of different lengths hash differently even when the
/// underlying words agree.
#[inline(always)]
const fn finish(h: u64, tail: u64, prefix_len: usize) -> u64 {
    let mut h = step(h, tail ^ prefix_len as u64);
    h ^= h >> SHIFT;
    h = h.wrapping_mul(MULT);
    h ^ (h >> SHIFT)
}

#[inline(always)]
fn tail_word(v: &BitVector, prefix_len: usize) -> u64 {
    let rem = prefix_len % WORD_LEN;
    if rem != 0 {
        v.words()[prefix_len / WORD_LEN] & ((1 << rem) - 1)
    } else {
        0
    }
}

/// Computes the signature of the whole vector `v` under `seed`.
///
/// # Arguments
///
///  - `v`: Bit vector hashed.
///  - `seed`: Hash seed.
///
/// # Examples
///
/// ```
/// use zfast::hashes;
/// use zfast::BitVector;
///
/// let v = BitVector::from_bits([true, false, true]);
/// assert_eq!(hashes::murmur(&v, 42), hashes::murmur(&v, 42));
/// assert_ne!(hashes::murmur(&v, 42), hashes::murmur(&v, 43));
/// ```
pub fn murmur(v: &BitVector, seed: u64) -> u64 {
    murmur_prefix(v, v.len(), seed)
}

/// Computes the signature of `v[0..prefix_len]` under `seed` in a single pass.
///
/// # Arguments
///
///  - `v`: Bit vector hashed.
///  - `prefix_len`: Length of the hashed prefix, no greater than `v.len()`.
///  - `seed`: Hash seed.
pub fn murmur_prefix(v: &BitVector, prefix_len: usize, seed: u64) -> u64 {
    debug_assert!(prefix_len <= v.len());
    let mut h = seed;
    for &w in &v.words()[..prefix_len / WORD_LEN] {
        h = step(h, w);
    }
    finish(h, tail_word(v, prefix_len), prefix_len)
}

/// Preprocesses `v` so that the signature of any of its prefixes can be
/// computed in constant time through [`MurmurState::prefix_hash`].
///
/// # Arguments
///
///  - `v`: Bit vector preprocessed.
///  - `seed`: Hash seed.
///
/// # Examples
///
/// ```
/// use zfast::hashes;
/// use zfast::BitVector;
///
/// let v = BitVector::from_bit(true, 1000);
/// let state = hashes::preprocess_murmur(&v, 42);
/// for prefix_len in [0, 63, 64, 500, 1000] {
///     assert_eq!(
///         state.prefix_hash(&v, prefix_len),
///         hashes::murmur_prefix(&v, prefix_len, 42),
///     );
/// }
/// ```
pub fn preprocess_murmur(v: &BitVector, seed: u64) -> MurmurState {
    let mut state = Vec::with_capacity(v.num_words() + 1);
    let mut h = seed;
    state.push(h);
    for &w in v.words() {
        h = step(h, w);
        state.push(h);
    }
    MurmurState { state }
}

/// Per-word running states of the hash of a bit vector, created by
/// [`preprocess_murmur`].
pub struct MurmurState {
    state: Vec<u64>,
}

impl MurmurState {
    /// Computes the signature of `v[0..prefix_len]` in constant time.
    ///
    /// The result equals [`murmur_prefix`] of the same prefix under the seed
    /// given at preprocessing time. `v` must be the preprocessed vector.
    ///
    /// # Arguments
    ///
    ///  - `v`: Bit vector given at preprocessing time.
    ///  - `prefix_len`: Length of the hashed prefix, no greater than `v.len()`.
    #[inline(always)]
    pub fn prefix_hash(&self, v: &BitVector, prefix_len: usize) -> u64 {
        debug_assert!(prefix_len <= v.len());
        finish(
            self.state[prefix_len / WORD_LEN],
            tail_word(v, prefix_len),
            prefix_len,
        )
    }
}
