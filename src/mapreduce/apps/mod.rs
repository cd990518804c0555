//! Sample user functions a worker can run by name.

use crate::mapreduce::util::{MapFn, ReduceFn};

pub mod indexer;
pub mod wc;

pub const APP_NAMES: &[&str] = &["wc", "indexer"];

pub fn get_app(name: &str) -> Option<(MapFn, ReduceFn)> {
    match name {
        "wc" => Some((wc::map, wc::reduce)),
        "indexer" => Some((indexer::map, indexer::reduce)),
        _ => None,
    }
}
