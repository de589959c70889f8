use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Protocol tag for frames exchanged over a pad socket
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MessageType {
    Init,
    ContentUpdate,
    Heartbeat,
}

/// Wire message for the pad protocol.
///
/// `content` is present for INIT and CONTENT_UPDATE and absent for
/// HEARTBEAT. Unknown extra fields sent by clients are not modeled here;
/// they survive the relay because updates are re-broadcast verbatim.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct PadMessage {
    #[serde(rename = "type")]
    pub message_type: MessageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default)]
    pub timestamp: i64,
}

impl PadMessage {
    /// Build the INIT frame sent to a connection right after it joins
    pub fn init(content: String) -> Self {
        Self {
            message_type: MessageType::Init,
            content: Some(content),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_serializes_with_screaming_tag() {
        let raw = serde_json::to_string(&PadMessage::init("hello".to_string())).unwrap();
        assert!(raw.contains(r#""type":"INIT""#));
        assert!(raw.contains(r#""content":"hello""#));
        assert!(raw.contains(r#""timestamp":"#));
    }

    #[test]
    fn content_update_decodes() {
        let msg: PadMessage =
            serde_json::from_str(r#"{"type":"CONTENT_UPDATE","content":"hi","timestamp":123}"#)
                .unwrap();
        assert_eq!(msg.message_type, MessageType::ContentUpdate);
        assert_eq!(msg.content.as_deref(), Some("hi"));
        assert_eq!(msg.timestamp, 123);
    }

    #[test]
    fn heartbeat_without_content_decodes() {
        let msg: PadMessage =
            serde_json::from_str(r#"{"type":"HEARTBEAT","timestamp":1}"#).unwrap();
        assert_eq!(msg.message_type, MessageType::Heartbeat);
        assert!(msg.content.is_none());
    }

    #[test]
    fn null_content_decodes_as_none() {
        let msg: PadMessage =
            serde_json::from_str(r#"{"type":"CONTENT_UPDATE","content":null,"timestamp":1}"#)
                .unwrap();
        assert!(msg.content.is_none());
    }

    #[test]
    fn extra_client_fields_are_tolerated() {
        let msg: PadMessage = serde_json::from_str(
            r#"{"type":"CONTENT_UPDATE","content":"x","timestamp":1,"origin":"web-client"}"#,
        )
        .unwrap();
        assert_eq!(msg.content.as_deref(), Some("x"));
    }

    #[test]
    fn unknown_type_is_rejected() {
        let result: Result<PadMessage, _> =
            serde_json::from_str(r#"{"type":"DELETE","timestamp":1}"#);
        assert!(result.is_err());
    }

    #[test]
    fn missing_timestamp_defaults_to_zero() {
        let msg: PadMessage = serde_json::from_str(r#"{"type":"HEARTBEAT"}"#).unwrap();
        assert_eq!(msg.timestamp, 0);
    }
}
