#![warn(missing_docs)]
#![doc = include_str!("../README.md")]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

/// A HashMap implementation using separate chaining.
///
/// This module provides a `HashMap` that wraps the `HashTable` and provides
/// a standard key-value map interface with configurable hashers.
pub mod hash_map;

pub mod hash_table;

pub use hash_map::Entry;
pub use hash_map::HashMap;
pub use hash_map::KeyNotFound;
pub use hash_table::HashTable;

cfg_if::cfg_if! {
    if #[cfg(all(feature = "foldhash", feature = "std"))] {
        /// The default hasher builder used by [`HashMap`], randomly seeded
        /// once per process.
        pub type DefaultHashBuilder = foldhash::fast::RandomState;
    } else if #[cfg(feature = "foldhash")] {
        /// The default hasher builder used by [`HashMap`]. Without `std`
        /// there is no entropy source, so the seed is fixed.
        pub type DefaultHashBuilder = foldhash::fast::FixedState;
    } else if #[cfg(feature = "std")] {
        /// The default hasher builder used by [`HashMap`].
        pub type DefaultHashBuilder = std::collections::hash_map::RandomState;
    } else {
        /// Placeholder hasher builder. With neither the `foldhash` nor the
        /// `std` feature enabled there is no default hasher; construct maps
        /// with [`HashMap::with_hasher`] instead.
        pub enum DefaultHashBuilder {}
    }
}
