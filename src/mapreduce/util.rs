use serde::{Deserialize, Serialize};

/// One emitted pair. Duplicate keys are expected; every emission counts.
///
/// Serialized as `{"Key": .., "Value": ..}` so result files stay readable by
/// mergers written against the original record layout.
#[derive(Debug, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase", deny_unknown_fields)]
pub struct KeyValue {
    pub key: String,
    pub value: String,
}

impl KeyValue {
    pub fn new(key: String, value: String) -> Self {
        KeyValue { key, value }
    }
}

/// `map(source_name, contents)`
pub type MapFn = fn(&str, &str) -> Vec<KeyValue>;
/// `reduce(key, values)`
pub type ReduceFn = fn(&str, Vec<&str>) -> String;

const FNV32_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV32_PRIME: u32 = 0x0100_0193;

/// 32-bit FNV-1a over the raw key bytes.
///
/// This is the only hash used for partitioning. It must not depend on the
/// process, platform or run, so the std `DefaultHasher` is not an option.
pub fn ihash(key: &str) -> u32 {
    key.bytes().fold(FNV32_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV32_PRIME)
    })
}

/// Reduce bucket a key is shuffled into. `n_reduce` must be non-zero.
pub fn bucket_for(key: &str, n_reduce: usize) -> usize {
    // u32 -> usize is lossless on every supported target
    ihash(key) as usize % n_reduce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ihash_matches_reference_vectors() {
        // published FNV-1a 32 test vectors
        assert_eq!(ihash(""), 0x811c9dc5);
        assert_eq!(ihash("a"), 0xe40c292c);
        assert_eq!(ihash("foobar"), 0xbf9cf968);
    }

    #[test]
    fn bucket_is_stable_and_in_range() {
        for key in ["", "a", "b", "hello", "ünïcödé", "with space"] {
            for n in 1..=7 {
                let b = bucket_for(key, n);
                assert!(b < n);
                assert_eq!(b, bucket_for(key, n));
            }
        }
        assert_eq!(bucket_for("anything", 1), 0);
    }

    #[test]
    fn serializes_with_original_field_names() {
        let kv = KeyValue::new("k".to_string(), "v".to_string());
        assert_eq!(
            serde_json::to_string(&kv).unwrap(),
            r#"{"Key":"k","Value":"v"}"#
        );
    }
}
