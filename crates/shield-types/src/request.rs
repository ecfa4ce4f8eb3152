use std::collections::BTreeMap;

use serde::ser::Error as _;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::{json, Value};

use crate::CONTRACT_VERSION;

/// Opaque, untrusted request payload.
///
/// The orchestrator never interprets a payload; it only carries it into
/// bridges and into audit material. Integers keep their exact value:
/// `Unsigned` holds those above `i64::MAX`. `Float` values that are not
/// finite and raw `Bytes` have no canonical text encoding, so serializing a
/// payload that contains them fails.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(from = "Value")]
pub enum Payload {
    Null,
    Bool(bool),
    Integer(i64),
    Unsigned(u64),
    Float(f64),
    Text(String),
    List(Vec<Payload>),
    Map(BTreeMap<String, Payload>),
    Bytes(Vec<u8>),
}

impl Payload {
    /// An empty map, the default payload.
    pub fn empty() -> Self {
        Payload::Map(BTreeMap::new())
    }

    /// Field lookup on a map payload.
    pub fn get(&self, key: &str) -> Option<&Payload> {
        match self {
            Payload::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Entries of a map payload, in key order.
    pub fn entries(&self) -> impl Iterator<Item = (&String, &Payload)> {
        let map = match self {
            Payload::Map(map) => Some(map),
            _ => None,
        };
        map.into_iter().flat_map(|m| m.iter())
    }

    /// Numeric view: integers, floats and numeric strings.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Payload::Integer(i) => Some(*i as f64),
            Payload::Unsigned(u) => Some(*u as f64),
            Payload::Float(f) => Some(*f),
            Payload::Text(s) => s.trim().parse().ok(),
            Payload::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            _ => None,
        }
    }

    /// Truthiness: null, false, zero and empty containers are false.
    pub fn is_truthy(&self) -> bool {
        match self {
            Payload::Null => false,
            Payload::Bool(b) => *b,
            Payload::Integer(i) => *i != 0,
            Payload::Unsigned(u) => *u != 0,
            Payload::Float(f) => *f != 0.0,
            Payload::Text(s) => !s.is_empty(),
            Payload::List(items) => !items.is_empty(),
            Payload::Map(map) => !map.is_empty(),
            Payload::Bytes(bytes) => !bytes.is_empty(),
        }
    }
}

impl Default for Payload {
    fn default() -> Self {
        Payload::empty()
    }
}

impl Serialize for Payload {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Payload::Null => serializer.serialize_unit(),
            Payload::Bool(b) => serializer.serialize_bool(*b),
            Payload::Integer(i) => serializer.serialize_i64(*i),
            Payload::Unsigned(u) => serializer.serialize_u64(*u),
            Payload::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Payload::Float(f) => Err(S::Error::custom(format!(
                "non-finite float {} has no canonical encoding",
                f
            ))),
            Payload::Text(s) => serializer.serialize_str(s),
            Payload::List(items) => serializer.collect_seq(items),
            Payload::Map(map) => serializer.collect_map(map),
            Payload::Bytes(bytes) => Err(S::Error::custom(format!(
                "raw bytes ({} bytes) have no canonical encoding",
                bytes.len()
            ))),
        }
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Payload::Null,
            Value::Bool(b) => Payload::Bool(b),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Payload::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Payload::Unsigned(u)
                } else {
                    Payload::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            Value::String(s) => Payload::Text(s),
            Value::Array(items) => Payload::List(items.into_iter().map(Payload::from).collect()),
            Value::Object(map) => {
                Payload::Map(map.into_iter().map(|(k, v)| (k, Payload::from(v))).collect())
            }
        }
    }
}

impl From<&str> for Payload {
    fn from(s: &str) -> Self {
        Payload::Text(s.to_string())
    }
}

impl From<i64> for Payload {
    fn from(i: i64) -> Self {
        Payload::Integer(i)
    }
}

impl From<u64> for Payload {
    fn from(u: u64) -> Self {
        Payload::Unsigned(u)
    }
}

impl From<f64> for Payload {
    fn from(f: f64) -> Self {
        Payload::Float(f)
    }
}

impl From<bool> for Payload {
    fn from(b: bool) -> Self {
        Payload::Bool(b)
    }
}

impl<K: Into<String>> FromIterator<(K, Payload)> for Payload {
    fn from_iter<I: IntoIterator<Item = (K, Payload)>>(iter: I) -> Self {
        Payload::Map(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// A request to gate one action.
///
/// Constructed by the caller and consumed by a single evaluation. Bridges
/// only ever receive a shared reference.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Request {
    pub contract_version: i64,
    #[serde(alias = "wallet_id")]
    pub subject_id: String,
    pub action: String,
    pub nonce: String,
    pub ttl_seconds: i64,
    #[serde(default)]
    pub payload: Payload,
}

impl Request {
    /// A request at the current contract version with an empty payload.
    pub fn new(
        subject_id: impl Into<String>,
        action: impl Into<String>,
        nonce: impl Into<String>,
        ttl_seconds: i64,
    ) -> Self {
        Self {
            contract_version: CONTRACT_VERSION,
            subject_id: subject_id.into(),
            action: action.into(),
            nonce: nonce.into(),
            ttl_seconds,
            payload: Payload::empty(),
        }
    }

    pub fn with_contract_version(mut self, version: i64) -> Self {
        self.contract_version = version;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Audit representation with the given payload value in place of the
    /// request's own payload.
    ///
    /// The fail-closed path passes `Value::Null` so that an unserializable
    /// payload is never touched twice.
    pub fn audit_value(&self, payload: Value) -> Value {
        json!({
            "contract_version": self.contract_version,
            "subject_id": self.subject_id,
            "action": self.action,
            "nonce": self.nonce,
            "ttl_seconds": self.ttl_seconds,
            "payload": payload,
        })
    }
}
