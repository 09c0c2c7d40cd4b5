//! Binary draft snapshots of a [`Session`]'s unsaved edits.
//!
//! Lets an embedding shell checkpoint in-progress rule and formula edits
//! (for example before the window closes) and restore them later. The
//! format is a 32-byte fixed header followed by a bincode-encoded payload.
//!
//! ## Wire Format
//!
//! ```text
//! Offset  Size  Field
//! 0       4     Magic bytes: b"CADR"
//! 4       2     Format version (u16, little-endian)
//! 6       2     Engine version (u16, little-endian)
//! 8       4     Flags (u32, reserved)
//! 12      4     Payload length in bytes (u32, little-endian)
//! 16      16    BLAKE3 hash of the payload (truncated to 16 bytes)
//! 32..    var   Bincode-encoded payload
//! ```
//!
//! ## Versioning
//!
//! The format version in the header must match exactly; otherwise
//! deserialization fails immediately with
//! [`DeserializeError::IncompatibleVersion`]. The engine version is
//! informational only.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Condition, MatchType, Rule, RuleId, RuleSet};
use crate::Session;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const MAGIC: &[u8; 4] = b"CADR";
const FORMAT_VERSION: u16 = 1;
const ENGINE_VERSION: u16 = 1;
const HEADER_SIZE: usize = 32;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can occur when serializing a draft to bytes.
#[derive(Debug, Error)]
pub enum SerializeError {
    #[error("failed to encode draft: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("I/O error during serialization: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors that can occur when deserializing a draft from bytes.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("not a colauto draft: invalid magic bytes")]
    BadMagic,

    #[error("incompatible format version: blob is v{blob}, engine supports v{supported}")]
    IncompatibleVersion { blob: u16, supported: u16 },

    #[error("integrity check failed: BLAKE3 checksum mismatch")]
    ChecksumMismatch,

    #[error("payload length mismatch: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: u32, actual: usize },

    #[error("failed to decode payload: {0}")]
    Decode(#[from] bincode::error::DecodeError),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("I/O error during deserialization: {0}")]
    Io(#[from] std::io::Error),
}

// ---------------------------------------------------------------------------
// Serialized type hierarchy
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
struct SerializedDraft {
    metadata: DraftMetadata,
    rules: Vec<SerializedRule>,
    else_replacement: String,
    formula: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct DraftMetadata {
    rule_count: usize,
    next_id: u64,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedRule {
    id: u64,
    match_type: SerializedMatchType,
    replacement: String,
    conditions: Vec<SerializedCondition>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
enum SerializedMatchType {
    All,
    Any,
}

#[derive(Debug, Serialize, Deserialize)]
struct SerializedCondition {
    field: String,
    operator: String,
    value: String,
}

// ---------------------------------------------------------------------------
// MatchType conversion
// ---------------------------------------------------------------------------

fn serialize_match_type(match_type: MatchType) -> SerializedMatchType {
    match match_type {
        MatchType::All => SerializedMatchType::All,
        MatchType::Any => SerializedMatchType::Any,
    }
}

fn deserialize_match_type(match_type: SerializedMatchType) -> MatchType {
    match match_type {
        SerializedMatchType::All => MatchType::All,
        SerializedMatchType::Any => MatchType::Any,
    }
}

// ---------------------------------------------------------------------------
// Session -> SerializedDraft
// ---------------------------------------------------------------------------

fn session_to_serialized(session: &Session) -> SerializedDraft {
    let rules: Vec<SerializedRule> = session
        .rules
        .rules()
        .iter()
        .map(|r| SerializedRule {
            id: r.id.0,
            match_type: serialize_match_type(r.match_type),
            replacement: r.replacement.clone(),
            conditions: r
                .conditions
                .iter()
                .map(|c| SerializedCondition {
                    field: c.field.clone(),
                    operator: c.operator.clone(),
                    value: c.value.clone(),
                })
                .collect(),
        })
        .collect();

    SerializedDraft {
        metadata: DraftMetadata {
            rule_count: rules.len(),
            next_id: session.rules.next_id,
        },
        rules,
        else_replacement: session.rules.else_replacement().to_owned(),
        formula: session.formula.clone(),
    }
}

// ---------------------------------------------------------------------------
// SerializedDraft -> (RuleSet, formula)
// ---------------------------------------------------------------------------

fn serialized_to_parts(ser: SerializedDraft) -> Result<(RuleSet, String), DeserializeError> {
    validate(&ser)?;

    let next_id = ser.metadata.next_id;
    let rules: Vec<Rule> = ser
        .rules
        .into_iter()
        .map(|sr| Rule {
            id: RuleId(sr.id),
            match_type: deserialize_match_type(sr.match_type),
            replacement: sr.replacement,
            conditions: sr
                .conditions
                .into_iter()
                .map(|sc| Condition {
                    field: sc.field,
                    operator: sc.operator,
                    value: sc.value,
                })
                .collect(),
        })
        .collect();

    let ruleset = RuleSet::from_parts(rules, ser.else_replacement, next_id);
    Ok((ruleset, ser.formula))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(ser: &SerializedDraft) -> Result<(), DeserializeError> {
    if ser.metadata.rule_count != ser.rules.len() {
        return Err(DeserializeError::Validation(format!(
            "metadata says {} rules but payload has {}",
            ser.metadata.rule_count,
            ser.rules.len()
        )));
    }

    if ser.rules.is_empty() {
        return Err(DeserializeError::Validation(
            "draft contains no rules; the editor always keeps at least one".to_owned(),
        ));
    }

    for (i, rule) in ser.rules.iter().enumerate() {
        if rule.conditions.is_empty() {
            return Err(DeserializeError::Validation(format!(
                "rule {} has no conditions",
                rule.id
            )));
        }
        if rule.id >= ser.metadata.next_id {
            return Err(DeserializeError::Validation(format!(
                "rule id {} is not below the id counter {}",
                rule.id, ser.metadata.next_id
            )));
        }
        if ser.rules[..i].iter().any(|prior| prior.id == rule.id) {
            return Err(DeserializeError::Validation(format!(
                "duplicate rule id {}",
                rule.id
            )));
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Header I/O
// ---------------------------------------------------------------------------

fn write_header(buf: &mut Vec<u8>, payload: &[u8]) {
    let hash = blake3::hash(payload);
    let hash_bytes = hash.as_bytes();

    buf.extend_from_slice(MAGIC);
    buf.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    buf.extend_from_slice(&ENGINE_VERSION.to_le_bytes());
    buf.extend_from_slice(&0u32.to_le_bytes()); // flags (reserved)
    #[allow(clippy::cast_possible_truncation)] // payload will never exceed 4 GiB
    let payload_len = payload.len() as u32;
    buf.extend_from_slice(&payload_len.to_le_bytes());
    buf.extend_from_slice(&hash_bytes[..16]);
}

#[allow(clippy::cast_possible_truncation)] // HEADER_SIZE is 32, always fits in u32
fn read_header(bytes: &[u8]) -> Result<(u16, u32, [u8; 16]), DeserializeError> {
    if bytes.len() < HEADER_SIZE {
        return Err(DeserializeError::LengthMismatch {
            expected: HEADER_SIZE as u32,
            actual: bytes.len(),
        });
    }

    if &bytes[0..4] != MAGIC {
        return Err(DeserializeError::BadMagic);
    }

    let format_version = u16::from_le_bytes([bytes[4], bytes[5]]);
    // bytes[6..8] is engine_version (informational, not used for checks)
    // bytes[8..12] is flags (reserved)
    let payload_len = u32::from_le_bytes([bytes[12], bytes[13], bytes[14], bytes[15]]);

    let mut hash = [0u8; 16];
    hash.copy_from_slice(&bytes[16..32]);

    Ok((format_version, payload_len, hash))
}

// ---------------------------------------------------------------------------
// Public encode/decode
// ---------------------------------------------------------------------------

pub(crate) fn encode(session: &Session) -> Result<Vec<u8>, SerializeError> {
    let serialized = session_to_serialized(session);
    let payload = bincode::serde::encode_to_vec(&serialized, bincode::config::standard())?;

    let mut buf = Vec::with_capacity(HEADER_SIZE + payload.len());
    write_header(&mut buf, &payload);
    buf.extend_from_slice(&payload);
    Ok(buf)
}

pub(crate) fn decode(bytes: &[u8]) -> Result<(RuleSet, String), DeserializeError> {
    let (format_version, payload_len, stored_hash) = read_header(bytes)?;

    if format_version != FORMAT_VERSION {
        return Err(DeserializeError::IncompatibleVersion {
            blob: format_version,
            supported: FORMAT_VERSION,
        });
    }

    let payload_start = HEADER_SIZE;
    let payload_end = payload_start + payload_len as usize;
    if bytes.len() < payload_end {
        return Err(DeserializeError::LengthMismatch {
            expected: payload_len,
            actual: bytes.len() - HEADER_SIZE,
        });
    }
    let payload = &bytes[payload_start..payload_end];

    // Integrity check
    let computed_hash = blake3::hash(payload);
    if computed_hash.as_bytes()[..16] != stored_hash {
        return Err(DeserializeError::ChecksumMismatch);
    }

    let (serialized, _): (SerializedDraft, usize) =
        bincode::serde::decode_from_slice(payload, bincode::config::standard())?;

    serialized_to_parts(serialized)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(rules: Vec<SerializedRule>, next_id: u64) -> SerializedDraft {
        SerializedDraft {
            metadata: DraftMetadata {
                rule_count: rules.len(),
                next_id,
            },
            rules,
            else_replacement: String::new(),
            formula: String::new(),
        }
    }

    fn blank_rule(id: u64) -> SerializedRule {
        SerializedRule {
            id,
            match_type: SerializedMatchType::All,
            replacement: String::new(),
            conditions: vec![SerializedCondition {
                field: String::new(),
                operator: String::new(),
                value: String::new(),
            }],
        }
    }

    #[test]
    fn match_type_round_trip() {
        for mt in [MatchType::All, MatchType::Any] {
            assert_eq!(deserialize_match_type(serialize_match_type(mt)), mt);
        }
    }

    #[test]
    fn validate_accepts_well_formed_draft() {
        assert!(validate(&draft(vec![blank_rule(1), blank_rule(2)], 3)).is_ok());
    }

    #[test]
    fn validate_rejects_count_mismatch() {
        let mut d = draft(vec![blank_rule(1)], 2);
        d.metadata.rule_count = 5;
        assert!(matches!(
            validate(&d),
            Err(DeserializeError::Validation(msg)) if msg.contains("5 rules")
        ));
    }

    #[test]
    fn validate_rejects_empty_draft() {
        assert!(matches!(
            validate(&draft(Vec::new(), 1)),
            Err(DeserializeError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_duplicate_ids() {
        assert!(matches!(
            validate(&draft(vec![blank_rule(1), blank_rule(1)], 2)),
            Err(DeserializeError::Validation(msg)) if msg.contains("duplicate")
        ));
    }

    #[test]
    fn validate_rejects_id_at_or_above_counter() {
        assert!(matches!(
            validate(&draft(vec![blank_rule(7)], 7)),
            Err(DeserializeError::Validation(msg)) if msg.contains("id counter")
        ));
    }

    #[test]
    fn validate_rejects_conditionless_rule() {
        let mut rule = blank_rule(1);
        rule.conditions.clear();
        assert!(matches!(
            validate(&draft(vec![rule], 2)),
            Err(DeserializeError::Validation(msg)) if msg.contains("no conditions")
        ));
    }

    #[test]
    fn header_round_trip() {
        let payload = b"payload bytes";
        let mut buf = Vec::new();
        write_header(&mut buf, payload);
        assert_eq!(buf.len(), HEADER_SIZE);

        let (version, len, hash) = read_header(&buf).unwrap();
        assert_eq!(version, FORMAT_VERSION);
        assert_eq!(len as usize, payload.len());
        assert_eq!(hash, blake3::hash(payload).as_bytes()[..16]);
    }

    #[test]
    fn read_header_rejects_short_input() {
        assert!(matches!(
            read_header(&[0u8; 8]),
            Err(DeserializeError::LengthMismatch { .. })
        ));
    }

    #[test]
    fn read_header_rejects_foreign_magic() {
        let mut buf = Vec::new();
        write_header(&mut buf, b"x");
        buf[0] = b'Z';
        assert!(matches!(read_header(&buf), Err(DeserializeError::BadMagic)));
    }
}
