//! Validation of the `PUT /api/counter` body. Runs before any store access.

use crate::error::AppError;
use crate::model::{SetCounterRequest, MAX_COUNTER_VALUE};
use serde_json::Value;

/// Accepts `{"value": n}` where `n` is integral and within `0..=MAX_COUNTER_VALUE`.
/// `10.0` counts as integral; strings, fractions and negatives do not.
pub fn validate_set_request(body: &Value) -> Result<SetCounterRequest, AppError> {
    let obj = body
        .as_object()
        .ok_or_else(|| AppError::Validation("body must be a JSON object".into()))?;
    let raw = obj
        .get("value")
        .ok_or_else(|| AppError::Validation("value is required".into()))?;
    let n = integral(raw).ok_or_else(|| AppError::Validation("value must be an integer".into()))?;
    if n < 0 {
        return Err(AppError::Validation("value must be at least 0".into()));
    }
    if n > i64::from(MAX_COUNTER_VALUE) {
        return Err(AppError::Validation(format!(
            "value must be at most {}",
            MAX_COUNTER_VALUE
        )));
    }
    Ok(SetCounterRequest { value: n as i32 })
}

fn integral(v: &Value) -> Option<i64> {
    let Value::Number(n) = v else {
        return None;
    };
    if let Some(i) = n.as_i64() {
        return Some(i);
    }
    if n.as_u64().is_some() {
        return Some(i64::MAX);
    }
    let f = n.as_f64()?;
    if f.is_finite() && f.fract() == 0.0 {
        // Saturating cast; anything this large fails the range check anyway.
        Some(f as i64)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn message(body: Value) -> String {
        match validate_set_request(&body) {
            Err(AppError::Validation(m)) => m,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_non_negative_integers() {
        assert_eq!(validate_set_request(&json!({"value": 0})).unwrap().value, 0);
        assert_eq!(validate_set_request(&json!({"value": 10})).unwrap().value, 10);
        assert_eq!(validate_set_request(&json!({"value": 10.0})).unwrap().value, 10);
        assert_eq!(
            validate_set_request(&json!({"value": MAX_COUNTER_VALUE})).unwrap().value,
            MAX_COUNTER_VALUE
        );
    }

    #[test]
    fn rejects_negative() {
        assert_eq!(message(json!({"value": -5})), "value must be at least 0");
    }

    #[test]
    fn rejects_non_integers() {
        assert_eq!(message(json!({"value": 1.5})), "value must be an integer");
        assert_eq!(message(json!({"value": "3"})), "value must be an integer");
        assert_eq!(message(json!({"value": null})), "value must be an integer");
    }

    #[test]
    fn rejects_values_past_column_range() {
        assert!(message(json!({"value": 2_147_483_648i64})).starts_with("value must be at most"));
        assert!(message(json!({"value": u64::MAX})).starts_with("value must be at most"));
        assert!(message(json!({"value": 1e300})).starts_with("value must be at most"));
    }

    #[test]
    fn rejects_wrong_shape() {
        assert_eq!(message(json!([1])), "body must be a JSON object");
        assert_eq!(message(json!({"count": 1})), "value is required");
    }
}
