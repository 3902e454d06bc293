//! Payload normalization for the relay operation
//!
//! The host hands the plugin one of three payload shapes: raw bytes, a
//! string, or a JSON-serializable value. Bytes and strings are relayed
//! untouched; everything else is published as compact JSON.

use crate::error::RelayError;
use bytes::Bytes;
use serde::Serialize;

/// A payload accepted by the relay operation
#[derive(Debug, Clone, PartialEq)]
pub enum RelayPayload {
    /// Raw bytes, published unmodified
    Bytes(Bytes),
    /// UTF-8 text, published as its bytes unmodified
    Text(String),
    /// Arbitrary JSON value, published as compact serde_json encoding
    Json(serde_json::Value),
}

impl RelayPayload {
    /// Build a JSON payload from any serializable value
    pub fn json<T: Serialize>(value: &T) -> Result<Self, RelayError> {
        let value = serde_json::to_value(value).map_err(RelayError::SerializationFailed)?;
        Ok(Self::Json(value))
    }

    /// Normalize the payload to the bytes that go on the wire
    pub fn into_bytes(self) -> Result<Bytes, RelayError> {
        match self {
            Self::Bytes(bytes) => Ok(bytes),
            Self::Text(text) => Ok(Bytes::from(text)),
            Self::Json(value) => {
                let encoded =
                    serde_json::to_vec(&value).map_err(RelayError::SerializationFailed)?;
                Ok(Bytes::from(encoded))
            }
        }
    }
}

impl From<Bytes> for RelayPayload {
    fn from(bytes: Bytes) -> Self {
        Self::Bytes(bytes)
    }
}

impl From<Vec<u8>> for RelayPayload {
    fn from(bytes: Vec<u8>) -> Self {
        Self::Bytes(Bytes::from(bytes))
    }
}

impl From<&[u8]> for RelayPayload {
    fn from(bytes: &[u8]) -> Self {
        Self::Bytes(Bytes::copy_from_slice(bytes))
    }
}

impl From<String> for RelayPayload {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl From<&str> for RelayPayload {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<serde_json::Value> for RelayPayload {
    fn from(value: serde_json::Value) -> Self {
        Self::Json(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bytes_pass_through_unmodified() {
        let raw = vec![0x00, 0xff, 0x10, 0x80];
        let payload = RelayPayload::from(raw.clone());
        assert_eq!(payload.into_bytes().unwrap(), Bytes::from(raw));
    }

    #[test]
    fn text_passes_through_as_utf8() {
        let payload = RelayPayload::from("test message");
        assert_eq!(
            payload.into_bytes().unwrap(),
            Bytes::from_static(b"test message"),
        );
    }

    #[test]
    fn json_value_encodes_compact() {
        let payload = RelayPayload::from(serde_json::json!({ "message": "test" }));
        assert_eq!(
            payload.into_bytes().unwrap(),
            Bytes::from_static(br#"{"message":"test"}"#),
        );
    }

    #[test]
    fn serializable_struct_becomes_json() {
        #[derive(Serialize)]
        struct Evaluation {
            id: u64,
            status: &'static str,
        }

        let payload = RelayPayload::json(&Evaluation {
            id: 42,
            status: "ok",
        })
        .unwrap();
        let bytes = payload.into_bytes().unwrap();
        let decoded: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(decoded["id"], 42);
        assert_eq!(decoded["status"], "ok");
    }

    #[test]
    fn empty_payloads_are_valid() {
        assert_eq!(
            RelayPayload::from(Vec::new()).into_bytes().unwrap(),
            Bytes::new()
        );
        assert_eq!(
            RelayPayload::from(String::new()).into_bytes().unwrap(),
            Bytes::new()
        );
    }
}
