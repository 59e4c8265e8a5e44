//! Request validation errors.
//!
//! Every way a request can fail to match what a handler declared (a path
//! parameter that does not parse, a body that is not the expected JSON, a
//! model constraint that does not hold) becomes a [`RequestValidationError`],
//! rendered as `422` with one entry per problem:
//!
//! ```json
//! {"detail": [{"loc": ["body", "name"], "msg": "String should have at least 3 characters", "type": "string_too_short"}]}
//! ```

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value, json};
use thiserror::Error;

use crate::exception::{Exception, json_response};
use crate::response::Response;
use crate::status::Status;

/// One validation problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorDetail {
    /// Where the problem is: `["path", "product_id"]`, `["body", "name"]`.
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub kind: String,
}

impl ErrorDetail {
    pub fn new(loc: &[&str], msg: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            loc: loc.iter().map(|s| (*s).to_owned()).collect(),
            msg: msg.into(),
            kind: kind.into(),
        }
    }
}

/// The request did not match the handler's declared inputs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("request validation failed with {} error(s)", .errors.len())]
pub struct RequestValidationError {
    pub errors: Vec<ErrorDetail>,
}

impl RequestValidationError {
    pub fn new(errors: Vec<ErrorDetail>) -> Self {
        Self { errors }
    }

    pub fn single(detail: ErrorDetail) -> Self {
        Self::new(vec![detail])
    }

    /// A required body was not sent at all.
    pub fn missing_body() -> Self {
        Self::single(ErrorDetail::new(&["body"], "Field required", "missing"))
    }

    /// A path parameter that does not parse as `T`.
    pub fn path_param<T>(name: &str) -> Self {
        let (expected, kind) = describe_type::<T>();
        Self::single(ErrorDetail::new(
            &["path", name],
            format!("Input should be a valid {expected}"),
            kind,
        ))
    }

    /// A body that does not deserialise into the declared model.
    pub fn from_json(err: &serde_json::Error) -> Self {
        use serde_json::error::Category;

        let msg = err.to_string();
        if let Some(field) = missing_field(&msg) {
            return Self::single(ErrorDetail::new(&["body", field], "Field required", "missing"));
        }
        let detail = match err.classify() {
            Category::Syntax | Category::Eof => {
                ErrorDetail::new(&["body"], "JSON decode error", "json_invalid")
            }
            Category::Data | Category::Io => ErrorDetail::new(&["body"], msg, "value_error"),
        };
        Self::single(detail)
    }

    /// A body that does not deserialise into `T`.
    ///
    /// Every missing required field gets its own entry, in the order `T`
    /// declares them; other failures are reported as by [`from_json`].
    ///
    /// [`from_json`]: Self::from_json
    pub fn from_body<T: DeserializeOwned>(body: &[u8], err: &serde_json::Error) -> Self {
        let Some(first) = missing_field(&err.to_string()).map(str::to_owned) else {
            return Self::from_json(err);
        };
        let fields = match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(object)) => missing_fields::<T>(object, first),
            _ => vec![first],
        };
        Self::new(
            fields
                .iter()
                .map(|field| ErrorDetail::new(&["body", field], "Field required", "missing"))
                .collect(),
        )
    }

    /// Declarative model constraints that did not hold, sorted by field.
    pub fn from_validator(errors: &validator::ValidationErrors) -> Self {
        let mut details = Vec::new();
        for (field, kinds) in errors.field_errors() {
            let field = field.to_string();
            for error in kinds.iter() {
                details.push(describe_violation(&field, error));
            }
        }
        details.sort_by(|a, b| a.loc.cmp(&b.loc));
        Self::new(details)
    }
}

impl Exception for RequestValidationError {
    fn to_response(&self) -> Response {
        json_response(Status::UnprocessableContent, &json!({ "detail": self.errors }))
    }
}

// serde_json reports "missing field `name` at line 1 column 2".
fn missing_field(msg: &str) -> Option<&str> {
    let rest = msg.strip_prefix("missing field `")?;
    let end = rest.find('`')?;
    Some(&rest[..end])
}

// serde stops at the first missing field. Present fields have already
// decoded by then, so filling the reported field with a placeholder of the
// right shape and decoding again surfaces the next one.
fn missing_fields<T: DeserializeOwned>(mut object: Map<String, Value>, first: String) -> Vec<String> {
    let mut missing = vec![first];
    'fields: while let Some(field) = missing.last().cloned() {
        for placeholder in [json!(""), json!(0), json!(false), json!([]), json!({}), Value::Null] {
            object.insert(field.clone(), placeholder);
            match serde_json::from_value::<T>(Value::Object(object.clone())) {
                Ok(_) => break 'fields,
                Err(e) => match missing_field(&e.to_string()) {
                    Some(next) if !missing.iter().any(|m| m == next) => {
                        missing.push(next.to_owned());
                        continue 'fields;
                    }
                    _ => {}
                },
            }
        }
        break;
    }
    missing
}

fn describe_type<T>() -> (&'static str, &'static str) {
    match std::any::type_name::<T>() {
        "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
        | "u128" | "usize" => ("integer, unable to parse string as an integer", "int_parsing"),
        "f32" | "f64" => ("number, unable to parse string as a number", "float_parsing"),
        "bool" => ("boolean, unable to interpret input", "bool_parsing"),
        _ => ("value", "value_error"),
    }
}

fn describe_violation(field: &str, error: &validator::ValidationError) -> ErrorDetail {
    let param = |key: &str| error.params.get(key);
    let loc = ["body", field];

    match &*error.code {
        "length" => {
            let len = param("value").and_then(Value::as_str).map(|s| s.chars().count() as u64);
            let min = param("min").and_then(Value::as_u64);
            let max = param("max").and_then(Value::as_u64);
            match (len, min, max) {
                (Some(len), Some(min), _) if len < min => ErrorDetail::new(
                    &loc,
                    format!("String should have at least {min} characters"),
                    "string_too_short",
                ),
                (Some(_), _, Some(max)) => ErrorDetail::new(
                    &loc,
                    format!("String should have at most {max} characters"),
                    "string_too_long",
                ),
                (_, Some(min), Some(max)) => ErrorDetail::new(
                    &loc,
                    format!("String should have between {min} and {max} characters"),
                    "string_length",
                ),
                _ => ErrorDetail::new(&loc, "String has an invalid length", "string_length"),
            }
        }
        "range" => match param("min").and_then(Value::as_f64) {
            Some(min) => ErrorDetail::new(
                &loc,
                format!("Input should be greater than or equal to {min}"),
                "greater_than_equal",
            ),
            None => ErrorDetail::new(&loc, "Input is out of range", "range"),
        },
        code => {
            let msg = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("Value error, {code}"));
            ErrorDetail::new(&loc, msg, "value_error")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use validator::Validate;

    #[derive(Debug, Deserialize, Validate)]
    struct Item {
        #[validate(length(min = 3, max = 5))]
        name: String,
        #[validate(range(min = 0.0))]
        price: f64,
    }

    #[test]
    fn missing_field_points_at_the_field() {
        let err = serde_json::from_str::<Item>("{}").unwrap_err();
        let v = RequestValidationError::from_json(&err);
        assert_eq!(v.errors, vec![ErrorDetail::new(&["body", "name"], "Field required", "missing")]);
    }

    #[test]
    fn every_missing_field_is_reported_in_declaration_order() {
        let err = serde_json::from_str::<Item>("{}").unwrap_err();
        let v = RequestValidationError::from_body::<Item>(b"{}", &err);
        let locs: Vec<_> = v.errors.iter().map(|e| e.loc.join(".")).collect();
        assert_eq!(locs, ["body.name", "body.price"]);
        assert!(v.errors.iter().all(|e| e.kind == "missing"));
    }

    #[test]
    fn present_fields_are_not_reported_missing() {
        let body = br#"{"price": 2.5}"#;
        let err = serde_json::from_slice::<Item>(body).unwrap_err();
        let v = RequestValidationError::from_body::<Item>(body, &err);
        assert_eq!(v.errors, vec![ErrorDetail::new(&["body", "name"], "Field required", "missing")]);
    }

    #[test]
    fn syntax_error_is_json_invalid() {
        let err = serde_json::from_str::<Item>("{").unwrap_err();
        let v = RequestValidationError::from_json(&err);
        assert_eq!(v.errors[0].kind, "json_invalid");
    }

    #[test]
    fn constraint_violations_are_sorted_by_field() {
        let item = Item { name: "toolong".into(), price: -1.0 };
        let errs = item.validate().unwrap_err();
        let v = RequestValidationError::from_validator(&errs);

        assert_eq!(v.errors.len(), 2);
        assert_eq!(v.errors[0].loc, vec!["body", "name"]);
        assert_eq!(v.errors[0].kind, "string_too_long");
        assert_eq!(v.errors[1].loc, vec!["body", "price"]);
        assert_eq!(v.errors[1].msg, "Input should be greater than or equal to 0");
    }

    #[test]
    fn short_string_is_too_short() {
        let item = Item { name: "ab".into(), price: 1.0 };
        let v = RequestValidationError::from_validator(&item.validate().unwrap_err());
        assert_eq!(v.errors[0].kind, "string_too_short");
        assert_eq!(v.errors[0].msg, "String should have at least 3 characters");
    }

    #[test]
    fn integer_path_param_message() {
        let v = RequestValidationError::path_param::<u64>("product_id");
        assert_eq!(v.errors[0].loc, vec!["path", "product_id"]);
        assert_eq!(v.errors[0].kind, "int_parsing");
    }

    #[test]
    fn renders_422_with_detail_list() {
        let res = RequestValidationError::missing_body().to_response();
        assert_eq!(res.status_code(), 422);
        let body: Value = serde_json::from_slice(res.body()).unwrap();
        assert_eq!(body, json!({"detail": [{"loc": ["body"], "msg": "Field required", "type": "missing"}]}));
    }
}
