//! Shared payload field accessors for agent handlers.
//!
//! Handlers receive opaque JSON maps; these helpers turn missing or
//! mistyped fields into the right [`AgentError`] variant instead of a
//! panic.

use serde_json::Value;

use agentix_domain::Jurisdiction;

use super::AgentError;

/// A required string field
pub fn require_str<'a>(payload: &'a Value, field: &str) -> Result<&'a str, AgentError> {
    match payload.get(field) {
        Some(Value::String(s)) => Ok(s),
        Some(_) => Err(AgentError::InvalidPayload(format!(
            "field '{field}' must be a string"
        ))),
        None => Err(AgentError::MissingField(field.to_string())),
    }
}

/// A required finite, non-negative number field
pub fn require_amount(payload: &Value, field: &str) -> Result<f64, AgentError> {
    let n = match payload.get(field) {
        Some(v) => v.as_f64().ok_or_else(|| {
            AgentError::InvalidPayload(format!("field '{field}' must be a number"))
        })?,
        None => return Err(AgentError::MissingField(field.to_string())),
    };
    if !n.is_finite() || n < 0.0 {
        return Err(AgentError::InvalidPayload(format!(
            "field '{field}' must be a non-negative amount"
        )));
    }
    Ok(n)
}

/// An optional string field
pub fn optional_str<'a>(payload: &'a Value, field: &str) -> Option<&'a str> {
    payload.get(field).and_then(Value::as_str)
}

/// An optional integer field. Values outside the `u32` range are
/// treated as absent rather than wrapped.
pub fn optional_u32(payload: &Value, field: &str) -> Option<u32> {
    payload
        .get(field)
        .and_then(Value::as_u64)
        .and_then(|n| u32::try_from(n).ok())
}

/// The `jurisdiction` field, defaulting to the given fallback when absent
pub fn jurisdiction_or(
    payload: &Value,
    fallback: Jurisdiction,
) -> Result<Jurisdiction, AgentError> {
    match optional_str(payload, "jurisdiction") {
        Some(s) => s
            .parse()
            .map_err(|_| AgentError::UnsupportedJurisdiction(s.to_string())),
        None => Ok(fallback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_require_str() {
        let payload = json!({"name": "Aisha"});
        assert_eq!(require_str(&payload, "name").unwrap(), "Aisha");
        assert!(matches!(
            require_str(&payload, "email"),
            Err(AgentError::MissingField(_))
        ));
        assert!(matches!(
            require_str(&json!({"name": 5}), "name"),
            Err(AgentError::InvalidPayload(_))
        ));
    }

    #[test]
    fn test_require_amount_rejects_negatives() {
        assert!(matches!(
            require_amount(&json!({"salary": -1.0}), "salary"),
            Err(AgentError::InvalidPayload(_))
        ));
        assert_eq!(require_amount(&json!({"salary": 4000}), "salary").unwrap(), 4000.0);
    }

    #[test]
    fn test_optional_u32_ignores_out_of_range_values() {
        assert_eq!(optional_u32(&json!({"age": 45}), "age"), Some(45));
        assert_eq!(optional_u32(&json!({"age": u64::MAX}), "age"), None);
        assert_eq!(optional_u32(&json!({}), "age"), None);
    }

    #[test]
    fn test_jurisdiction_defaults() {
        let j = jurisdiction_or(&json!({}), Jurisdiction::My).unwrap();
        assert_eq!(j, Jurisdiction::My);
        let j = jurisdiction_or(&json!({"jurisdiction": "SG"}), Jurisdiction::My).unwrap();
        assert_eq!(j, Jurisdiction::Sg);
        assert!(jurisdiction_or(&json!({"jurisdiction": "XX"}), Jurisdiction::My).is_err());
    }
}
