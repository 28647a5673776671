//! Shape checks for status API responses.
//!
//! Responses are handled as raw [`serde_json::Value`] so that a wrong type and
//! a missing key are reported as distinct errors, in the order below.

use serde_json::Value;
use tracing::debug;

use crate::error::{json_type_name, PollError};

/// Key holding the item list.
pub const HOMEWORKS: &str = "homeworks";

/// Key holding the server's cursor for the next request.
pub const CURRENT_DATE: &str = "current_date";

/// Check a decoded response and return its items, newest first.
///
/// 1. The response must be an object.
/// 2. Both `homeworks` and `current_date` must be present.
/// 3. `homeworks` must be an array.
///
/// An empty array is not an error: it means nothing changed since the cursor.
pub fn validate(response: &Value) -> Result<&[Value], PollError> {
    let map = response.as_object().ok_or(PollError::TypeMismatch {
        field: "response",
        expected: "object",
        found: json_type_name(response),
    })?;

    let homeworks = map.get(HOMEWORKS).ok_or(PollError::MissingField(HOMEWORKS))?;
    if !map.contains_key(CURRENT_DATE) {
        return Err(PollError::MissingField(CURRENT_DATE));
    }

    let items = homeworks.as_array().ok_or(PollError::TypeMismatch {
        field: HOMEWORKS,
        expected: "array",
        found: json_type_name(homeworks),
    })?;

    if items.is_empty() {
        debug!("Homework list is empty, status unchanged");
    }

    Ok(items.as_slice())
}

/// The server-provided cursor, if it is an integer.
pub fn current_date(response: &Value) -> Option<i64> {
    response.get(CURRENT_DATE).and_then(Value::as_i64)
}

/// One tracked homework.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Homework {
    /// Value of `homework_name`; never empty.
    pub name: String,
    /// Raw status code, classified later.
    pub status: String,
}

impl Homework {
    /// Extract a homework from one element of the `homeworks` array.
    pub fn from_value(item: &Value) -> Result<Self, PollError> {
        let map = item.as_object().ok_or(PollError::TypeMismatch {
            field: "homework",
            expected: "object",
            found: json_type_name(item),
        })?;

        let name = string_field(map, "homework_name")?;
        if name.is_empty() {
            return Err(PollError::MissingField("homework_name"));
        }
        let status = string_field(map, "status")?;

        Ok(Homework {
            name: name.to_string(),
            status: status.to_string(),
        })
    }
}

fn string_field<'a>(
    map: &'a serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<&'a str, PollError> {
    let value = map.get(field).ok_or(PollError::MissingField(field))?;
    value.as_str().ok_or(PollError::TypeMismatch {
        field,
        expected: "string",
        found: json_type_name(value),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejects_non_object() {
        for response in [json!([]), json!("homeworks"), json!(null), json!(42)] {
            assert!(matches!(
                validate(&response),
                Err(PollError::TypeMismatch {
                    field: "response",
                    ..
                })
            ));
        }
    }

    #[test]
    fn test_rejects_missing_keys() {
        let no_homeworks = json!({ "current_date": 1 });
        assert!(matches!(
            validate(&no_homeworks),
            Err(PollError::MissingField("homeworks"))
        ));

        let no_date = json!({ "homeworks": [] });
        assert!(matches!(
            validate(&no_date),
            Err(PollError::MissingField("current_date"))
        ));
    }

    #[test]
    fn test_rejects_non_list_homeworks() {
        let response = json!({ "homeworks": { "homework_name": "x" }, "current_date": 1 });
        match validate(&response) {
            Err(PollError::TypeMismatch {
                field,
                expected,
                found,
            }) => {
                assert_eq!(field, "homeworks");
                assert_eq!(expected, "array");
                assert_eq!(found, "object");
            }
            other => panic!("expected TypeMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_accepts_empty_list() {
        let response = json!({ "homeworks": [], "current_date": 1700000000 });
        assert!(validate(&response).unwrap().is_empty());
    }

    #[test]
    fn test_preserves_order() {
        let response = json!({
            "homeworks": [
                { "homework_name": "newest", "status": "approved" },
                { "homework_name": "older", "status": "rejected" }
            ],
            "current_date": 1
        });
        let items = validate(&response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(Homework::from_value(&items[0]).unwrap().name, "newest");
    }

    #[test]
    fn test_current_date() {
        assert_eq!(current_date(&json!({ "current_date": 1700000000 })), Some(1700000000));
        assert_eq!(current_date(&json!({ "current_date": "soon" })), None);
        assert_eq!(current_date(&json!({})), None);
    }

    #[test]
    fn test_homework_from_value() {
        let item = json!({ "homework_name": "hw1.zip", "status": "reviewing", "id": 7 });
        assert_eq!(
            Homework::from_value(&item).unwrap(),
            Homework {
                name: "hw1.zip".to_string(),
                status: "reviewing".to_string(),
            }
        );
    }

    #[test]
    fn test_homework_requires_name() {
        let missing = json!({ "status": "approved" });
        assert!(matches!(
            Homework::from_value(&missing),
            Err(PollError::MissingField("homework_name"))
        ));

        let empty = json!({ "homework_name": "", "status": "approved" });
        assert!(matches!(
            Homework::from_value(&empty),
            Err(PollError::MissingField("homework_name"))
        ));
    }

    #[test]
    fn test_homework_requires_string_status() {
        let missing = json!({ "homework_name": "x" });
        assert!(matches!(
            Homework::from_value(&missing),
            Err(PollError::MissingField("status"))
        ));

        let numeric = json!({ "homework_name": "x", "status": 3 });
        assert!(matches!(
            Homework::from_value(&numeric),
            Err(PollError::TypeMismatch { field: "status", .. })
        ));
    }
}
