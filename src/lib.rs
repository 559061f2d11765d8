//! Three maps with one contract.
//!
//! [`Map`] describes what a map is; [`OrderedTreeMap`], [`ChainedHashMap`]
//! and [`LinkedScanMap`] are three very different ways of being one. They
//! agree on everything except the order their keys come out in:
//!
//! - [`OrderedTreeMap`] is an unbalanced binary search tree. Keys iterate in
//!   ascending order.
//! - [`ChainedHashMap`] is an array of chains which doubles whenever it gets
//!   too full. Keys iterate bucket by bucket.
//! - [`LinkedScanMap`] is one long chain, newest first. Slow, obviously
//!   correct, and the one the others get checked against.
//!
//! ```
//! use mysterious_maps::{ChainedHashMap, LinkedScanMap, Map, OrderedTreeMap};
//!
//! let mut maps: Vec<Box<dyn Map<&str, u32>>> = vec![
//!     Box::new(OrderedTreeMap::new()),
//!     Box::new(ChainedHashMap::new()),
//!     Box::new(LinkedScanMap::new()),
//! ];
//!
//! for map in maps.iter_mut() {
//!     map.put("Put", 1);
//!     map.put("large", 2);
//!     map.put("things", 3);
//!     assert_eq!(Some(2), map.remove(&"large"));
//!     assert_eq!(2, map.len());
//! }
//! ```

mod chained_hash_map;
mod error;
mod hashing;
mod linked_list;
mod linked_scan_map;
mod map;
mod tree_map;

pub use chained_hash_map::{ChainedHashMap, HashMapOptions, DEFAULT_CAPACITY, DEFAULT_LOAD_FACTOR};
pub use error::{MapError, Result};
pub use hashing::{bucket_index, spread, BuildIdentityHasher, IdentityHasher};
pub use linked_scan_map::LinkedScanMap;
pub use map::{Keys, Map};
pub use tree_map::OrderedTreeMap;

/// Iterator types, one module per backing.
pub mod iter {
    pub mod tree_map {
        pub use crate::tree_map::{Iter, Keys};
    }

    pub mod chained_hash_map {
        pub use crate::chained_hash_map::{Iter, Keys};
    }

    pub mod linked_scan_map {
        pub use crate::linked_scan_map::{Iter, Keys};
    }
}
