use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Events relayed between clients, carried as JSON in text frames.
///
/// `mouse down` comes with a 2-element coordinate, `mouse up` has no
/// payload beyond the event name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum WireEvent {
    #[serde(rename = "mouse down")]
    MouseDown { pos: [i64; 2] },
    #[serde(rename = "mouse up")]
    MouseUp,
}

impl WireEvent {
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn encode(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mouse_down() {
        let event = WireEvent::decode(br#"{"event":"mouse down","pos":[10,20]}"#).unwrap();
        assert_eq!(event, WireEvent::MouseDown { pos: [10, 20] });
    }

    #[test]
    fn decodes_mouse_up() {
        let event = WireEvent::decode(br#"{"event":"mouse up"}"#).unwrap();
        assert_eq!(event, WireEvent::MouseUp);
    }

    #[test]
    fn encodes_event_name_and_payload() {
        let bytes = WireEvent::MouseDown { pos: [10, 20] }.encode().unwrap();
        assert_eq!(bytes, br#"{"event":"mouse down","pos":[10,20]}"#);
        let bytes = WireEvent::MouseUp.encode().unwrap();
        assert_eq!(bytes, br#"{"event":"mouse up"}"#);
    }

    #[test]
    fn rejects_missing_pos() {
        assert!(WireEvent::decode(br#"{"event":"mouse down"}"#).is_err());
    }

    #[test]
    fn rejects_wrong_arity() {
        assert!(WireEvent::decode(br#"{"event":"mouse down","pos":[10]}"#).is_err());
        assert!(WireEvent::decode(br#"{"event":"mouse down","pos":[1,2,3]}"#).is_err());
    }

    #[test]
    fn rejects_unknown_event() {
        assert!(WireEvent::decode(br#"{"event":"mouse move","pos":[1,2]}"#).is_err());
    }

    #[test]
    fn rejects_invalid_json() {
        assert!(WireEvent::decode(b"not json").is_err());
    }
}
