//! Record stream format shared by intermediate and result files: one JSON
//! object per line, no header and no count. A reader decodes until EOF.

use std::io::{Read, Write};

use serde::de::Error as _;
use serde_json::Value;

use crate::mapreduce::util::KeyValue;

pub struct Encoder<W: Write> {
    out: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(out: W) -> Self {
        Encoder { out }
    }

    pub fn encode(&mut self, kv: &KeyValue) -> serde_json::Result<()> {
        serde_json::to_writer(&mut self.out, kv)?;
        self.out.write_all(b"\n").map_err(serde_json::Error::io)
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

/// Lazily decodes every record in `input`. An empty stream yields nothing;
/// a truncated or malformed record yields an error.
///
/// Only the object form the encoder writes is accepted. The derived
/// deserializer would also take `["key", "value"]`, so each value is checked
/// for shape before conversion.
pub fn decode<R: Read>(input: R) -> impl Iterator<Item = serde_json::Result<KeyValue>> {
    serde_json::Deserializer::from_reader(input)
        .into_iter::<Value>()
        .map(|value| -> serde_json::Result<KeyValue> {
            match value? {
                record @ Value::Object(_) => serde_json::from_value(record),
                other => Err(serde_json::Error::custom(format!(
                    "expected a record object, found `{}`",
                    other
                ))),
            }
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kv(k: &str, v: &str) -> KeyValue {
        KeyValue::new(k.to_string(), v.to_string())
    }

    fn encode_all(kvs: &[KeyValue]) -> Vec<u8> {
        let mut enc = Encoder::new(Vec::new());
        for kv in kvs {
            enc.encode(kv).unwrap();
        }
        enc.into_inner()
    }

    #[test]
    fn preserves_order_and_awkward_content() {
        let kvs = vec![
            kv("b", "1"),
            kv("a", "line\nbreak"),
            kv("", "empty key"),
            kv("quote\"d", "{\"not\": \"json\"}"),
            kv("b", "1"),
        ];
        let bytes = encode_all(&kvs);
        assert_eq!(bytes.iter().filter(|&&b| b == b'\n').count(), kvs.len());

        let decoded: Vec<_> = decode(bytes.as_slice()).collect::<Result<_, _>>().unwrap();
        assert_eq!(decoded, kvs);
    }

    #[test]
    fn empty_stream_has_no_records() {
        assert_eq!(decode(&b""[..]).count(), 0);
    }

    #[test]
    fn truncated_record_is_an_error() {
        let mut bytes = encode_all(&[kv("a", "1"), kv("b", "2")]);
        bytes.truncate(bytes.len() - 5);

        let mut records = decode(bytes.as_slice());
        assert_eq!(records.next().unwrap().unwrap(), kv("a", "1"));
        assert!(records.next().unwrap().is_err());
    }

    #[test]
    fn wrong_shape_is_an_error() {
        for bytes in [
            &br#"{"Key":"a"}"#[..],
            br#"["a","1"]"#,
            br#"{"Key":"a","Value":"1","Extra":0}"#,
            br#""a""#,
        ] {
            let first = decode(bytes).next().unwrap();
            assert!(first.is_err(), "{}", String::from_utf8_lossy(bytes));
        }
    }

    #[test]
    fn array_record_after_good_ones_is_an_error() {
        let mut bytes = encode_all(&[kv("a", "1")]);
        bytes.extend_from_slice(b"[\"b\",\"2\"]\n");

        let mut records = decode(bytes.as_slice());
        assert_eq!(records.next().unwrap().unwrap(), kv("a", "1"));
        let err = records.next().unwrap().unwrap_err();
        assert!(!err.is_io());
        assert!(err.to_string().contains("record object"), "{err}");
    }
}
