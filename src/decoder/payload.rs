use serde_json::Value;

use crate::decoder::DecodeError;

/// Extract the volunteer id from a card payload.
///
/// Cards carry a JSON object such as `{"id": "V123", "name": "Dara"}`. The id
/// may be a non-empty string or an integer; anything else is rejected.
pub fn parse_volunteer_payload(raw: &str) -> Result<String, DecodeError> {
    let value: Value = serde_json::from_str(raw.trim()).map_err(DecodeError::NotJson)?;

    match value.get("id") {
        Some(Value::String(id)) if !id.trim().is_empty() => Ok(id.trim().to_string()),
        Some(Value::Number(n)) if n.is_i64() || n.is_u64() => Ok(n.to_string()),
        _ => Err(DecodeError::MissingId),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_id() {
        assert_eq!(
            parse_volunteer_payload(r#"{"id":"V123","name":"Dara"}"#).unwrap(),
            "V123"
        );
    }

    #[test]
    fn integer_id() {
        assert_eq!(parse_volunteer_payload(r#"{"id":42}"#).unwrap(), "42");
    }

    #[test]
    fn non_json_is_rejected() {
        assert!(matches!(
            parse_volunteer_payload("V123"),
            Err(DecodeError::NotJson(_))
        ));
    }

    #[test]
    fn missing_or_empty_id_is_rejected() {
        for raw in [r#"{"name":"Dara"}"#, r#"{"id":""}"#, r#"{"id":null}"#, r#"{"id":1.5}"#, "[1,2]"] {
            assert!(
                matches!(parse_volunteer_payload(raw), Err(DecodeError::MissingId)),
                "payload {raw} should be rejected"
            );
        }
    }
}
