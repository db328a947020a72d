use serde_json::Value;
use time::{
	Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
	macros::format_description,
};

/// Parses the date spellings seen across the datasets. Naive values are taken as UTC.
pub fn parse_date(raw: &str) -> Option<OffsetDateTime> {
	let raw = raw.trim();

	if raw.is_empty() {
		return None;
	}
	if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
		return Some(parsed);
	}
	if let Ok(parsed) =
		PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day]T[hour]:[minute]:[second]"))
	{
		return Some(parsed.assume_utc());
	}
	if let Ok(parsed) = PrimitiveDateTime::parse(
		raw,
		format_description!("[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond]"),
	) {
		return Some(parsed.assume_utc());
	}
	if let Ok(parsed) =
		PrimitiveDateTime::parse(raw, format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
	{
		return Some(parsed.assume_utc());
	}

	[
		Date::parse(raw, format_description!("[year]-[month]-[day]")),
		Date::parse(raw, format_description!("[day]/[month]/[year]")),
		Date::parse(raw, format_description!("[day].[month].[year]")),
	]
	.into_iter()
	.find_map(Result::ok)
	.map(|date| date.midnight().assume_utc())
}

/// RFC 3339 rendering of a date value, `None` when it cannot be parsed.
pub fn normalize_date(value: Option<&Value>) -> Option<String> {
	let raw = value?.as_str()?;

	parse_date(raw)?.format(&Rfc3339).ok()
}
