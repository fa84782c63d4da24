//! # zfast: succinct predecessor/successor structures for bit strings
//!
//! This crate provides a dynamic [z-fast trie](ZFastTrie), a dictionary over
//! a set of distinct, prefix-free bit strings that answers membership,
//! predecessor, and successor queries on a string of length ℓ in ℓ/w +
//! O(log max(ℓ, ℓ⁻, ℓ⁺)) time with high probability, where w is the machine
//! word size and ℓ⁻, ℓ⁺ are the lengths of the answers. The trie is built on
//! a [plain bit vector](BitVector), [seeded prefix signatures](hashes), and a
//! signature-indexed dictionary of prefix handles.
//!
//! The crate also provides a [solver](Modulo2System) for systems of linear
//! equations on the field with two elements, supporting both full Gaussian
//! elimination and a lazy variant exploiting sparsity, as used by hashing
//! constructions related to the trie.
//!
//! # Examples
//!
//! ```
//! use zfast::transform::PrefixFreeIso;
//! use zfast::ZFastTrie;
//!
//! let mut trie = ZFastTrie::new(PrefixFreeIso);
//! for word in ["few", "every", "some", "any"] {
//!     trie.add(word);
//! }
//!
//! assert!(trie.contains("some"));
//! assert!(!trie.contains("none"));
//! ```
//!
//! # Limitations
//!
//! The implementation assumes a 64-bit target.

pub mod bit_vector;
pub mod broadword;
pub mod hashes;
pub mod modulo2_system;
pub mod serial;
pub mod transform;
pub mod zfast_trie;

pub use bit_vector::BitVector;
pub use modulo2_system::{Modulo2Equation, Modulo2System};
pub use serial::Serializable;
pub use zfast_trie::ZFastTrie;
