use serde_json::Value;

/// Positional access into nested JSON arrays. Every accessor returns `None` when an index is out
/// of range, an intermediate value is not an array or the value has an unexpected type.
pub trait Positional {
    /// Follows `path` through nested arrays. `null` values are treated as absent.
    fn at_path(&self, path: &[usize]) -> Option<&Value>;

    /// The string at `path`.
    fn str_at(&self, path: &[usize]) -> Option<&str> {
        self.at_path(path)?.as_str()
    }

    /// The number at `path`. Numeric strings are accepted since Google sends some numbers
    /// (timestamps in particular) as strings.
    fn number_at(&self, path: &[usize]) -> Option<f64> {
        match self.at_path(path)? {
            Value::Number(number) => number.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
    }

    /// Whether the value at `path` is truthy. Absent values are falsy.
    fn truthy_at(&self, path: &[usize]) -> bool {
        self.at_path(path).is_some_and(is_truthy)
    }
}

impl Positional for Value {
    fn at_path(&self, path: &[usize]) -> Option<&Value> {
        path
            .iter()
            .try_fold(self, |value, index| value.as_array()?.get(*index))
            .filter(|value| !value.is_null())
    }
}

/// Truthiness as the payload uses it: `false`, `0`, `""` and `null` are falsy.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn follows_paths() {
        let value = json!([null, [null, [null, -122.08, 37.42], "1700000000000"]]);

        assert_eq!(value.number_at(&[1, 1, 1]), Some(-122.08));
        assert_eq!(value.number_at(&[1, 2]), Some(1_700_000_000_000.0));
        assert_eq!(value.str_at(&[1, 2]), Some("1700000000000"));
    }

    #[test]
    fn returns_none_on_mismatch() {
        let value = json!([{"a": 1}, "string", [1]]);

        assert!(value.at_path(&[0, 0]).is_none());
        assert!(value.at_path(&[1, 0]).is_none());
        assert!(value.at_path(&[2, 5]).is_none());
        assert!(value.at_path(&[9]).is_none());
        assert!(value.str_at(&[2, 0]).is_none());
        assert!(value.number_at(&[1]).is_none());
        assert!(json!("scalar").at_path(&[0]).is_none());
    }

    #[test]
    fn treats_null_as_absent() {
        let value = json!([null]);

        assert!(value.at_path(&[0]).is_none());
        assert!(!value.truthy_at(&[0]));
    }

    #[test]
    fn evaluates_truthiness() {
        let value = json!([true, false, 1, 0, "", "x", [], null]);

        assert!(value.truthy_at(&[0]));
        assert!(!value.truthy_at(&[1]));
        assert!(value.truthy_at(&[2]));
        assert!(!value.truthy_at(&[3]));
        assert!(!value.truthy_at(&[4]));
        assert!(value.truthy_at(&[5]));
        assert!(value.truthy_at(&[6]));
        assert!(!value.truthy_at(&[7]));
        assert!(!value.truthy_at(&[8]));
    }
}
