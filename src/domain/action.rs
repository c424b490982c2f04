//! Actions accepted by the todo store and their JSON form.
//!
//! On the wire an action is a `type` tag plus an optional `payload`:
//!
//! ```json
//! {"type": "add", "payload": {"todo": {"description": "buy milk", "done": false}}}
//! {"type": "done", "payload": {"id": 0}}
//! {"type": "delete", "payload": {"id": 0}}
//! ```
//!
//! Anything else decodes to [`Action::Unknown`], which the reducer ignores:
//! another `type` string, a non-string `type`, no `type` at all, or a
//! document that is not an object.

use super::models::TodoItem;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A tagged request to transition the list.
///
/// `id` fields are positions in the current list, not [`crate::domain::TodoId`]s.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", content = "payload", rename_all = "lowercase")]
pub enum Action {
    /// Append `todo` to the end of the list.
    Add { todo: TodoItem },
    /// Mark the item at position `id` as done.
    Done { id: usize },
    /// Remove the item at position `id`.
    Delete { id: usize },
    /// Anything the store does not recognize.
    Unknown,
}

impl Action {
    pub fn add(description: impl Into<String>) -> Self {
        Action::Add {
            todo: TodoItem::new(description),
        }
    }

    pub fn done(id: usize) -> Self {
        Action::Done { id }
    }

    pub fn delete(id: usize) -> Self {
        Action::Delete { id }
    }

    /// The wire tag of this action.
    pub fn kind(&self) -> &'static str {
        match self {
            Action::Add { .. } => "add",
            Action::Done { .. } => "done",
            Action::Delete { .. } => "delete",
            Action::Unknown => "unknown",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Add { todo } => write!(f, "add({:?})", todo.description),
            Action::Done { id } => write!(f, "done({})", id),
            Action::Delete { id } => write!(f, "delete({})", id),
            Action::Unknown => write!(f, "unknown"),
        }
    }
}

#[derive(Deserialize)]
struct AddPayload {
    todo: TodoItem,
}

#[derive(Deserialize)]
struct PositionPayload {
    id: usize,
}

fn payload<T, E>(kind: &str, payload: Option<serde_json::Value>) -> Result<T, E>
where
    T: de::DeserializeOwned,
    E: de::Error,
{
    let value = payload
        .ok_or_else(|| E::custom(format!("`{}` action is missing its payload", kind)))?;
    serde_json::from_value(value)
        .map_err(|e| E::custom(format!("invalid `{}` payload: {}", kind, e)))
}

impl<'de> Deserialize<'de> for Action {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let mut raw = serde_json::Value::deserialize(deserializer)?;
        let kind = raw.get("type").and_then(serde_json::Value::as_str).map(str::to_owned);
        let body = raw.get_mut("payload").map(serde_json::Value::take);
        match kind.as_deref() {
            Some(kind @ "add") => {
                let AddPayload { todo } = payload::<_, D::Error>(kind, body)?;
                Ok(Action::Add { todo })
            }
            Some(kind @ "done") => {
                let PositionPayload { id } = payload::<_, D::Error>(kind, body)?;
                Ok(Action::Done { id })
            }
            Some(kind @ "delete") => {
                let PositionPayload { id } = payload::<_, D::Error>(kind, body)?;
                Ok(Action::Delete { id })
            }
            _ => Ok(Action::Unknown),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode(json: &str) -> Result<Action, serde_json::Error> {
        serde_json::from_str(json)
    }

    #[test]
    fn test_decode_add() {
        let json = r#"{"type":"add","payload":{"todo":{"description":"buy milk","done":false}}}"#;
        assert_eq!(decode(json).unwrap(), Action::add("buy milk"));
    }

    #[test]
    fn test_decode_done_and_delete() {
        let done = decode(r#"{"type":"done","payload":{"id":2}}"#).unwrap();
        assert_eq!(done, Action::done(2));
        let delete = decode(r#"{"type":"delete","payload":{"id":0}}"#).unwrap();
        assert_eq!(delete, Action::delete(0));
    }

    #[test]
    fn test_decode_unrecognized_type() {
        let rename = decode(r#"{"type":"rename","payload":{"id":1,"to":"x"}}"#).unwrap();
        assert_eq!(rename, Action::Unknown);
        assert_eq!(decode(r#"{"type":"noop"}"#).unwrap(), Action::Unknown);
    }

    #[test]
    fn test_decode_any_untyped_shape_is_unknown() {
        let shapes = [
            r#"{}"#,
            r#"{"payload":{"id":0}}"#,
            r#"{"type":null}"#,
            r#"{"type":5,"payload":{"id":0}}"#,
            r#"{"type":["add"]}"#,
            r#"[1, 2]"#,
            r#""add""#,
            r#"null"#,
        ];
        for json in shapes {
            assert_eq!(decode(json).unwrap(), Action::Unknown, "decoding {json}");
        }
    }

    #[test]
    fn test_decode_script_with_untyped_entry() {
        let json = r#"[
            {"type":"add","payload":{"todo":{"description":"A","done":false}}},
            {"payload":{"id":0}}
        ]"#;
        let actions: Vec<Action> = serde_json::from_str(json).unwrap();
        assert_eq!(actions, vec![Action::add("A"), Action::Unknown]);
    }

    #[test]
    fn test_decode_rejects_negative_position() {
        let err = decode(r#"{"type":"delete","payload":{"id":-1}}"#).unwrap_err();
        assert!(err.to_string().contains("invalid `delete` payload"));
    }

    #[test]
    fn test_decode_rejects_missing_payload() {
        let err = decode(r#"{"type":"add"}"#).unwrap_err();
        assert!(err.to_string().contains("missing its payload"));
    }

    #[test]
    fn test_encode_matches_wire_shape() {
        let json = serde_json::to_value(Action::done(1)).unwrap();
        assert_eq!(json, serde_json::json!({"type": "done", "payload": {"id": 1}}));

        let json = serde_json::to_value(Action::add("a")).unwrap();
        let expected = serde_json::json!({
            "type": "add",
            "payload": {"todo": {"description": "a", "done": false}}
        });
        assert_eq!(json, expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(Action::add("tea").to_string(), "add(\"tea\")");
        assert_eq!(Action::delete(3).to_string(), "delete(3)");
        assert_eq!(Action::Unknown.kind(), "unknown");
    }
}
