#![allow(dead_code)]

use std::hash::Hash;

use mysterious_maps::{ChainedHashMap, LinkedScanMap, Map, OrderedTreeMap};
use tracing_subscriber::EnvFilter;

/// Which backing a test should run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backing {
    Tree,
    Hash,
    Linked,
}

impl Backing {
    pub const ALL: [Backing; 3] = [Backing::Tree, Backing::Hash, Backing::Linked];

    pub fn build<K, V>(self) -> Box<dyn Map<K, V>>
    where
        K: Ord + Hash + 'static,
        V: 'static,
    {
        match self {
            Backing::Tree => Box::new(OrderedTreeMap::new()),
            Backing::Hash => Box::new(ChainedHashMap::new()),
            Backing::Linked => Box::new(LinkedScanMap::new()),
        }
    }
}

/// Routes `tracing` output through the test harness. `RUST_LOG=debug` shows
/// resizes.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
