//! Field lookup over upstream records whose keys drift between datasets and releases.

use serde_json::{Map, Number, Value};

/// One upstream row, keyed by the dataset's own (often Hebrew) column names.
pub type ExternalRecord = Map<String, Value>;

/// Acceptable spellings of one logical field, most preferred first.
pub type FieldVariants = &'static [&'static str];

/// Returns the value of the first variant that is present and not blank.
///
/// Blank means null, an empty or whitespace-only string, or an empty array/object.
/// Numbers and booleans are never blank, so a claim amount of `0` is a real value.
pub fn normalize<'a>(record: &'a ExternalRecord, variants: &[&str]) -> Option<&'a Value> {
	variants.iter().filter_map(|key| record.get(*key)).find(|value| !is_blank(value))
}

/// [`normalize`] rendered as a trimmed string. Numbers and booleans are stringified.
pub fn field_string(record: &ExternalRecord, variants: &[&str]) -> Option<String> {
	normalize(record, variants).and_then(value_to_string)
}

/// Monetary field as `f64`, `0.0` when absent or unparsable.
pub fn field_amount(record: &ExternalRecord, variants: &[&str]) -> f64 {
	normalize(record, variants).and_then(value_to_amount).unwrap_or(0.0)
}

pub fn value_to_string(value: &Value) -> Option<String> {
	match value {
		Value::String(raw) => {
			let trimmed = raw.trim();

			(!trimmed.is_empty()).then(|| trimmed.to_string())
		},
		Value::Number(number) => Some(number_to_string(number)),
		Value::Bool(flag) => Some(flag.to_string()),
		_ => None,
	}
}

/// Whole-valued floats render without a fraction so `12345.0` and `"12345"` compare equal.
fn number_to_string(number: &Number) -> String {
	match number.as_f64() {
		Some(float)
			if number.is_f64() && float.is_finite() && float.fract() == 0.0 && float.abs() < 9.0e15 =>
			format!("{}", float as i64),
		_ => number.to_string(),
	}
}

fn value_to_amount(value: &Value) -> Option<f64> {
	let amount = match value {
		Value::Number(number) => number.as_f64()?,
		Value::String(raw) => {
			let cleaned: String =
				raw.chars().filter(|c| !matches!(c, ',' | '₪' | ' ' | '\u{a0}')).collect();

			cleaned.parse::<f64>().ok()?
		},
		_ => return None,
	};

	amount.is_finite().then_some(amount)
}

fn is_blank(value: &Value) -> bool {
	match value {
		Value::Null => true,
		Value::String(raw) => raw.trim().is_empty(),
		Value::Array(items) => items.is_empty(),
		Value::Object(map) => map.is_empty(),
		Value::Bool(_) | Value::Number(_) => false,
	}
}
