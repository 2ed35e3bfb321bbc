use serde::de::DeserializeOwned;
use serde::Serialize;

/// Wire frames are JSON text: `{"event": <name>, "data": <payload>}`.

pub fn encode<T: Serialize>(value: &T) -> Option<String> {
    serde_json::to_string(value).ok()
}

pub fn decode<T: DeserializeOwned>(raw: &str) -> Option<T> {
    serde_json::from_str(raw).ok()
}
