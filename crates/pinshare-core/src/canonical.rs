//! Canonical CBOR encoding for audit records.
//!
//! This module implements RFC 8949 Core Deterministic Encoding:
//! - Map keys sorted by encoded byte comparison
//! - Integers use smallest valid encoding
//! - Definite lengths only
//! - No floats (timestamps are i64 milliseconds)
//!
//! The canonical encoding matters because record hashes are computed over
//! it: the same record must produce identical bytes (and thus an identical
//! hash) everywhere.

use ciborium::value::Value;

use crate::audit::AuditRecord;

/// Record field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const ACTOR: u64 = 0;
    pub const SEQ: u64 = 1;
    pub const TIMESTAMP: u64 = 2;
    pub const EVENT_CODE: u64 = 3;
    pub const SUBJECT: u64 = 4;
    pub const PREV: u64 = 5;
}

/// Encode an audit record to canonical CBOR bytes.
pub fn canonical_record_bytes(record: &AuditRecord) -> Vec<u8> {
    let value = record_to_cbor_value(record);
    let mut buf = Vec::new();
    encode_value_to(&mut buf, &value);
    buf
}

/// Convert a record to a CBOR Value (map with integer keys).
fn record_to_cbor_value(record: &AuditRecord) -> Value {
    // Build map entries in key order (already sorted 0-5).
    let mut entries = Vec::with_capacity(6);

    // 0: actor
    entries.push((
        Value::Integer(keys::ACTOR.into()),
        Value::Text(record.actor.as_str().to_string()),
    ));

    // 1: seq
    entries.push((
        Value::Integer(keys::SEQ.into()),
        Value::Integer(record.seq.into()),
    ));

    // 2: timestamp
    entries.push((
        Value::Integer(keys::TIMESTAMP.into()),
        Value::Integer(record.timestamp.into()),
    ));

    // 3: event code
    entries.push((
        Value::Integer(keys::EVENT_CODE.into()),
        Value::Integer(record.event.code().into()),
    ));

    // 4: subject
    entries.push((
        Value::Integer(keys::SUBJECT.into()),
        Value::Text(record.event.subject().to_string()),
    ));

    // 5: prev (null or bytes)
    let prev_value = match &record.prev {
        Some(hash) => Value::Bytes(hash.0.to_vec()),
        None => Value::Null,
    };
    entries.push((Value::Integer(keys::PREV.into()), prev_value));

    Value::Map(entries)
}

/// Recursively encode a CBOR value.
fn encode_value_to(buf: &mut Vec<u8>, value: &Value) {
    match value {
        Value::Integer(i) => {
            encode_integer(buf, *i);
        }
        Value::Bytes(b) => {
            encode_bytes(buf, b);
        }
        Value::Text(s) => {
            encode_text(buf, s);
        }
        Value::Map(entries) => {
            encode_map_canonical(buf, entries);
        }
        Value::Null => {
            buf.push(0xf6);
        }
        _ => {
            panic!("unsupported CBOR value type in canonical encoding");
        }
    }
}

/// Encode a CBOR integer (major types 0 and 1).
fn encode_integer(buf: &mut Vec<u8>, i: ciborium::value::Integer) {
    let n: i128 = i.into();

    if n >= 0 {
        // Major type 0: unsigned integer
        encode_uint(buf, 0, n as u64);
    } else {
        // Major type 1: negative integer
        // CBOR encodes -1 as 0, -2 as 1, etc.
        let abs = (-1 - n) as u64;
        encode_uint(buf, 1, abs);
    }
}

/// Encode an unsigned integer with the given major type.
fn encode_uint(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffffffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_uint(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_uint(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

/// Encode a map canonically (major type 5).
///
/// Keys are sorted by their encoded byte comparison.
fn encode_map_canonical(buf: &mut Vec<u8>, entries: &[(Value, Value)]) {
    // Encode all keys first to sort by encoded bytes
    let mut key_value_pairs: Vec<(Vec<u8>, &Value)> = entries
        .iter()
        .map(|(k, v)| {
            let mut key_buf = Vec::new();
            encode_value_to(&mut key_buf, k);
            (key_buf, v)
        })
        .collect();

    // Sort by encoded key bytes (lexicographic)
    key_value_pairs.sort_by(|a, b| a.0.cmp(&b.0));

    // Write map header
    encode_uint(buf, 5, key_value_pairs.len() as u64);

    // Write sorted key-value pairs
    for (key_bytes, value) in key_value_pairs {
        buf.extend_from_slice(&key_bytes);
        encode_value_to(buf, value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::{AuditEvent, AuditHash};
    use crate::types::{ContentRef, Identity};

    fn sample_record(seq: u64, prev: Option<AuditHash>) -> AuditRecord {
        AuditRecord {
            actor: Identity::new("0xowner").unwrap(),
            seq,
            timestamp: 1_700_000_000_000,
            event: AuditEvent::ContentAdded {
                content: ContentRef::new("QmYwAPJzv5CZsnA").unwrap(),
            },
            prev,
        }
    }

    #[test]
    fn test_canonical_encoding_deterministic() {
        let record = sample_record(1, None);

        let bytes1 = canonical_record_bytes(&record);
        let bytes2 = canonical_record_bytes(&record);
        assert_eq!(bytes1, bytes2);
    }

    #[test]
    fn test_distinct_records_encode_differently() {
        let a = sample_record(1, None);
        let b = sample_record(2, Some(AuditHash::from_bytes([0xaa; 32])));

        assert_ne!(canonical_record_bytes(&a), canonical_record_bytes(&b));
    }

    #[test]
    fn test_prev_null_vs_bytes() {
        let without = sample_record(1, None);
        let with = sample_record(1, Some(AuditHash::from_bytes([0u8; 32])));

        // The zero hash still encodes as bytes, not null.
        assert_ne!(
            canonical_record_bytes(&without),
            canonical_record_bytes(&with)
        );
    }

    #[test]
    fn test_integer_encoding() {
        // Test smallest encoding for various integer sizes
        let mut buf = Vec::new();

        // 0-23: single byte
        encode_uint(&mut buf, 0, 0);
        assert_eq!(buf, vec![0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 23);
        assert_eq!(buf, vec![0x17]);

        // 24-255: two bytes
        buf.clear();
        encode_uint(&mut buf, 0, 24);
        assert_eq!(buf, vec![0x18, 24]);

        buf.clear();
        encode_uint(&mut buf, 0, 255);
        assert_eq!(buf, vec![0x18, 255]);

        // 256-65535: three bytes
        buf.clear();
        encode_uint(&mut buf, 0, 256);
        assert_eq!(buf, vec![0x19, 0x01, 0x00]);

        buf.clear();
        encode_uint(&mut buf, 0, 65535);
        assert_eq!(buf, vec![0x19, 0xff, 0xff]);
    }

    #[test]
    fn test_map_key_ordering() {
        // Ensure integer keys are sorted correctly
        let mut buf = Vec::new();
        let entries = vec![
            (Value::Integer(5.into()), Value::Integer(50.into())),
            (Value::Integer(0.into()), Value::Integer(0.into())),
            (Value::Integer(3.into()), Value::Integer(30.into())),
        ];
        encode_map_canonical(&mut buf, &entries);

        // Map header (3 entries)
        assert_eq!(buf[0], 0xa3);
        // Keys should be in order: 0, 3, 5
        assert_eq!(buf[1], 0x00); // key 0
        assert_eq!(buf[2], 0x00); // value 0
        assert_eq!(buf[3], 0x03); // key 3
        assert_eq!(buf[4], 0x18); // value 30 (>23)
        assert_eq!(buf[5], 30);
        assert_eq!(buf[6], 0x05); // key 5
        assert_eq!(buf[7], 0x18); // value 50 (>23)
        assert_eq!(buf[8], 50);
    }

    #[test]
    fn test_record_map_has_six_fields() {
        let bytes = canonical_record_bytes(&sample_record(1, None));
        // 0xa6: map of 6 entries
        assert_eq!(bytes[0], 0xa6);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_encoding_deterministic_for_any_record(
                actor in "0x[0-9a-f]{1,40}",
                seq in 1u64..=100_000u64,
                timestamp in 0i64..=1_700_000_000_000i64,
                subject in "[A-Za-z0-9]{1,32}",
            ) {
                let record = AuditRecord {
                    actor: Identity::new(actor).unwrap(),
                    seq,
                    timestamp,
                    event: AuditEvent::ContentAdded {
                        content: ContentRef::new(subject).unwrap(),
                    },
                    prev: None,
                };

                prop_assert_eq!(
                    canonical_record_bytes(&record),
                    canonical_record_bytes(&record)
                );
                prop_assert_eq!(record.compute_hash(), record.compute_hash());
            }

            #[test]
            fn test_seq_is_committed(
                actor in "0x[0-9a-f]{1,40}",
                seq in 1u64..=100_000u64,
            ) {
                let record = AuditRecord {
                    actor: Identity::new(actor).unwrap(),
                    seq,
                    timestamp: 0,
                    event: AuditEvent::ContentAdded {
                        content: ContentRef::new("cid").unwrap(),
                    },
                    prev: None,
                };
                let mut bumped = record.clone();
                bumped.seq += 1;

                prop_assert_ne!(record.compute_hash(), bumped.compute_hash());
            }
        }
    }
}
