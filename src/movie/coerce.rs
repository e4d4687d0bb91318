//! Conversion of loosely typed JSON request fields into movie fields.

use serde_json::Value;

#[derive(Debug, PartialEq, thiserror::Error)]
pub enum CoerceError {
    #[error("cannot use {0} as a year")]
    Year(String),
}

/// Any value makes a title. Strings are taken verbatim; everything else is
/// rendered the way legacy clients saw it stored (`None`, `True`, `['a', 1]`).
pub fn coerce_title(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => literal(other),
    }
}

fn literal(value: &Value) -> String {
    match value {
        Value::Null => "None".to_string(),
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => quoted(s),
        Value::Array(items) => {
            let items: Vec<String> = items.iter().map(literal).collect();
            format!("[{}]", items.join(", "))
        }
        Value::Object(fields) => {
            let fields: Vec<String> = fields
                .iter()
                .map(|(k, v)| format!("{}: {}", quoted(k), literal(v)))
                .collect();
            format!("{{{}}}", fields.join(", "))
        }
    }
}

/// Single quotes unless the text holds a single quote and no double quote.
fn quoted(s: &str) -> String {
    let quote = if s.contains('\'') && !s.contains('"') { '"' } else { '\'' };
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c => out.push(c),
        }
    }
    out.push(quote);
    out
}

/// Integers, integral strings, booleans, and finite floats (truncated).
pub fn coerce_year(value: &Value) -> Result<i64, CoerceError> {
    let year = match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite() && *f > i64::MIN as f64 && *f < i64::MAX as f64)
                .map(|f| f.trunc() as i64)
        }),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        Value::Bool(b) => Some(i64::from(*b)),
        _ => None,
    };

    year.ok_or_else(|| CoerceError::Year(value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_title() {
        assert_eq!(coerce_title(&json!("Heat")), "Heat");
        assert_eq!(coerce_title(&json!("")), "");
        assert_eq!(coerce_title(&json!("it's")), "it's");
        assert_eq!(coerce_title(&json!(1917)), "1917");
        assert_eq!(coerce_title(&json!(2.5)), "2.5");
        assert_eq!(coerce_title(&json!(true)), "True");
        assert_eq!(coerce_title(&json!(false)), "False");
        assert_eq!(coerce_title(&json!(null)), "None");
    }

    #[test]
    fn test_title_from_containers() {
        assert_eq!(coerce_title(&json!(["a"])), "['a']");
        assert_eq!(coerce_title(&json!([1, null, true])), "[1, None, True]");
        assert_eq!(coerce_title(&json!([])), "[]");
        assert_eq!(coerce_title(&json!({"a": 1})), "{'a': 1}");
        assert_eq!(coerce_title(&json!({})), "{}");
        assert_eq!(coerce_title(&json!(["it's"])), "[\"it's\"]");
        assert_eq!(coerce_title(&json!(["a'b\""])), "['a\\'b\"']");
        assert_eq!(coerce_title(&json!(["x\ny"])), "['x\\ny']");
    }

    #[test]
    fn test_year() {
        assert_eq!(coerce_year(&json!(2018)).unwrap(), 2018);
        assert_eq!(coerce_year(&json!(-44)).unwrap(), -44);
        assert_eq!(coerce_year(&json!("2018")).unwrap(), 2018);
        assert_eq!(coerce_year(&json!(" +1999 ")).unwrap(), 1999);
        assert_eq!(coerce_year(&json!(2018.9)).unwrap(), 2018);
        assert_eq!(coerce_year(&json!(false)).unwrap(), 0);
    }

    #[test]
    fn test_year_rejects() {
        assert_eq!(
            coerce_year(&json!("not-a-number")),
            Err(CoerceError::Year("\"not-a-number\"".to_string()))
        );
        assert!(coerce_year(&json!("2018.5")).is_err());
        assert!(coerce_year(&json!(null)).is_err());
        assert!(coerce_year(&json!([2018])).is_err());
        assert!(coerce_year(&json!(u64::MAX)).is_err());
        assert!(coerce_year(&json!(1e300)).is_err());
    }
}
