#![forbid(unsafe_code)]

//! Prop and param schemas.
//!
//! A small, closed schema language: enough to describe every component a
//! catalog declares (enum strings, bounded numbers, booleans, arrays, nested
//! objects, nullable wrappers) without pulling in a general-purpose schema
//! engine. Validation reports field-level violations with slash-delimited
//! paths; it never panics and never stops at the first problem.

use genui_core::FieldViolation;
use serde_json::Value;

/// Violation code: required field absent.
pub const CODE_MISSING: &str = "missing";
/// Violation code: value has the wrong JSON type.
pub const CODE_TYPE_MISMATCH: &str = "type_mismatch";
/// Violation code: string not in the declared enum set.
pub const CODE_NOT_IN_ENUM: &str = "not_in_enum";
/// Violation code: number outside the declared range.
pub const CODE_OUT_OF_RANGE: &str = "out_of_range";
/// Violation code: number declared integer has a fraction.
pub const CODE_NOT_INTEGER: &str = "not_integer";
/// Violation code: field not declared by the schema (strict mode).
pub const CODE_UNKNOWN_FIELD: &str = "unknown_field";

/// How object validation treats undeclared fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValidationMode {
    /// Undeclared fields are violations (default).
    #[default]
    Strict,
    /// Undeclared fields are tolerated and passed through.
    Lenient,
}

/// One declared field of an object schema.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    name: String,
    schema: Schema,
    required: bool,
}

impl Field {
    /// A field that must be present.
    #[must_use]
    pub fn required(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            required: true,
        }
    }

    /// A field that may be absent (absent and `null` are both accepted).
    #[must_use]
    pub fn optional(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema: schema.nullable(),
            required: false,
        }
    }

    /// The field name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A prop/param schema.
///
/// # Example
///
/// ```
/// use genui_catalog::schema::{Field, Schema, ValidationMode};
/// use serde_json::json;
///
/// let card = Schema::object([
///     Field::optional("title", Schema::string()),
///     Field::optional("padding", Schema::one_of(["sm", "md", "lg"])),
/// ]);
/// let violations = card.validate(&json!({"title": "Revenue"}), ValidationMode::Strict);
/// assert!(violations.is_empty());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Schema {
    /// Accepts any JSON value.
    Any,
    /// JSON boolean.
    Bool,
    /// JSON string, optionally restricted to a closed set.
    String {
        /// Permitted values; `None` accepts any string.
        one_of: Option<Vec<String>>,
    },
    /// JSON number with optional bounds.
    Number {
        /// Inclusive lower bound.
        min: Option<f64>,
        /// Inclusive upper bound.
        max: Option<f64>,
        /// Reject fractional values.
        integer: bool,
    },
    /// JSON array with a uniform item schema.
    Array(Box<Schema>),
    /// JSON object with declared fields.
    Object(Vec<Field>),
    /// Accepts `null` in addition to the inner schema.
    Nullable(Box<Schema>),
}

impl Schema {
    /// Any JSON value.
    #[must_use]
    pub fn any() -> Self {
        Self::Any
    }

    /// A boolean.
    #[must_use]
    pub fn boolean() -> Self {
        Self::Bool
    }

    /// Any string.
    #[must_use]
    pub fn string() -> Self {
        Self::String { one_of: None }
    }

    /// A string drawn from a closed set.
    #[must_use]
    pub fn one_of<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::String {
            one_of: Some(values.into_iter().map(Into::into).collect()),
        }
    }

    /// Any number.
    #[must_use]
    pub fn number() -> Self {
        Self::Number {
            min: None,
            max: None,
            integer: false,
        }
    }

    /// A whole number.
    #[must_use]
    pub fn integer() -> Self {
        Self::Number {
            min: None,
            max: None,
            integer: true,
        }
    }

    /// A number within an inclusive range.
    #[must_use]
    pub fn number_between(min: f64, max: f64) -> Self {
        Self::Number {
            min: Some(min),
            max: Some(max),
            integer: false,
        }
    }

    /// A whole number within an inclusive range.
    #[must_use]
    pub fn integer_between(min: f64, max: f64) -> Self {
        Self::Number {
            min: Some(min),
            max: Some(max),
            integer: true,
        }
    }

    /// An array of `item`.
    #[must_use]
    pub fn array(item: Schema) -> Self {
        Self::Array(Box::new(item))
    }

    /// An object with the given fields.
    #[must_use]
    pub fn object<I>(fields: I) -> Self
    where
        I: IntoIterator<Item = Field>,
    {
        Self::Object(fields.into_iter().collect())
    }

    /// Accept `null` in addition to this schema. Idempotent.
    #[must_use]
    pub fn nullable(self) -> Self {
        match self {
            s @ Self::Nullable(_) => s,
            s => Self::Nullable(Box::new(s)),
        }
    }

    /// Validate `value`, returning every violation found.
    #[must_use]
    pub fn validate(&self, value: &Value, mode: ValidationMode) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        self.check(value, "", mode, &mut violations);
        violations
    }

    fn check(&self, value: &Value, path: &str, mode: ValidationMode, out: &mut Vec<FieldViolation>) {
        match self {
            Self::Any => {}
            Self::Nullable(inner) => {
                if !value.is_null() {
                    inner.check(value, path, mode, out);
                }
            }
            Self::Bool => {
                if !value.is_boolean() {
                    out.push(mismatch(path, "boolean", value));
                }
            }
            Self::String { one_of } => match value.as_str() {
                Some(s) => {
                    if let Some(allowed) = one_of
                        && !allowed.iter().any(|a| a == s)
                    {
                        out.push(FieldViolation::new(
                            at(path),
                            CODE_NOT_IN_ENUM,
                            format!("{s:?} is not one of {allowed:?}"),
                        ));
                    }
                }
                None => out.push(mismatch(path, "string", value)),
            },
            Self::Number { min, max, integer } => match value.as_f64() {
                Some(n) => {
                    if *integer && value.as_i64().is_none() && value.as_u64().is_none() {
                        out.push(FieldViolation::new(
                            at(path),
                            CODE_NOT_INTEGER,
                            format!("{n} is not a whole number"),
                        ));
                    }
                    if min.is_some_and(|lo| n < lo) || max.is_some_and(|hi| n > hi) {
                        out.push(FieldViolation::new(
                            at(path),
                            CODE_OUT_OF_RANGE,
                            format!("{n} outside [{min:?}, {max:?}]"),
                        ));
                    }
                }
                None => out.push(mismatch(path, "number", value)),
            },
            Self::Array(item) => match value.as_array() {
                Some(items) => {
                    for (i, v) in items.iter().enumerate() {
                        item.check(v, &format!("{path}/{i}"), mode, out);
                    }
                }
                None => out.push(mismatch(path, "array", value)),
            },
            Self::Object(fields) => match value.as_object() {
                Some(map) => {
                    for field in fields {
                        let child_path = format!("{path}/{}", field.name);
                        match map.get(&field.name) {
                            Some(v) => field.schema.check(v, &child_path, mode, out),
                            None if field.required => out.push(FieldViolation::new(
                                child_path,
                                CODE_MISSING,
                                "required field absent",
                            )),
                            None => {}
                        }
                    }
                    if mode == ValidationMode::Strict {
                        for key in map.keys() {
                            if !fields.iter().any(|f| f.name == *key) {
                                out.push(FieldViolation::new(
                                    format!("{path}/{key}"),
                                    CODE_UNKNOWN_FIELD,
                                    "field not declared by the schema",
                                ));
                            }
                        }
                    }
                }
                None => out.push(mismatch(path, "object", value)),
            },
        }
    }
}

fn at(path: &str) -> String {
    if path.is_empty() {
        "/".to_string()
    } else {
        path.to_string()
    }
}

fn mismatch(path: &str, expected: &str, got: &Value) -> FieldViolation {
    FieldViolation::new(
        at(path),
        CODE_TYPE_MISMATCH,
        format!("expected {expected}, got {}", json_type(got)),
    )
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn metric_schema() -> Schema {
        Schema::object([
            Field::required("label", Schema::string()),
            Field::required("valuePath", Schema::string()),
            Field::optional("format", Schema::one_of(["number", "currency", "percent"])),
            Field::optional("trend", Schema::one_of(["up", "down", "neutral"])),
        ])
    }

    #[test]
    fn valid_props_pass() {
        let props = json!({"label": "Revenue", "valuePath": "/analytics/revenue", "format": "currency"});
        assert!(metric_schema().validate(&props, ValidationMode::Strict).is_empty());
    }

    #[test]
    fn missing_required_field_is_reported_with_path() {
        let violations = metric_schema().validate(&json!({"label": "Revenue"}), ValidationMode::Strict);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/valuePath");
        assert_eq!(violations[0].code, CODE_MISSING);
    }

    #[test]
    fn optional_fields_accept_null_and_absence() {
        let schema = metric_schema();
        let with_null = json!({"label": "a", "valuePath": "/x", "trend": null});
        assert!(schema.validate(&with_null, ValidationMode::Strict).is_empty());
    }

    #[test]
    fn enum_violations_name_the_value() {
        let violations = metric_schema().validate(
            &json!({"label": "a", "valuePath": "/x", "trend": "sideways"}),
            ValidationMode::Strict,
        );
        assert_eq!(violations[0].code, CODE_NOT_IN_ENUM);
        assert_eq!(violations[0].path, "/trend");
    }

    #[test]
    fn strict_mode_rejects_undeclared_fields() {
        let props = json!({"label": "a", "valuePath": "/x", "surprise": 1});
        let strict = metric_schema().validate(&props, ValidationMode::Strict);
        assert_eq!(strict.len(), 1);
        assert_eq!(strict[0].code, CODE_UNKNOWN_FIELD);
        let lenient = metric_schema().validate(&props, ValidationMode::Lenient);
        assert!(lenient.is_empty());
    }

    #[test]
    fn arrays_report_per_item_paths() {
        let schema = Schema::object([Field::required(
            "columns",
            Schema::array(Schema::object([Field::required("key", Schema::string())])),
        )]);
        let violations = schema.validate(
            &json!({"columns": [{"key": "ok"}, {"label": "missing key"}]}),
            ValidationMode::Lenient,
        );
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].path, "/columns/1/key");
    }

    #[test]
    fn bounded_integers_enforced() {
        let schema = Schema::object([Field::optional("columns", Schema::integer_between(1.0, 4.0))]);
        assert!(schema.validate(&json!({"columns": 3}), ValidationMode::Strict).is_empty());
        let high = schema.validate(&json!({"columns": 9}), ValidationMode::Strict);
        assert_eq!(high[0].code, CODE_OUT_OF_RANGE);
        let frac = schema.validate(&json!({"columns": 2.5}), ValidationMode::Strict);
        assert_eq!(frac[0].code, CODE_NOT_INTEGER);
    }
}
