use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset};

use super::{Map, Value};

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<f32> for Value {
    fn from(n: f32) -> Self {
        Value::Number(f64::from(n))
    }
}

macro_rules! from_integer {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value {
                #[allow(clippy::cast_precision_loss, clippy::cast_lossless)]
                fn from(n: $ty) -> Self {
                    Value::Number(n as f64)
                }
            }
        )*
    };
}

from_integer!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

impl From<OffsetDateTime> for Value {
    fn from(dt: OffsetDateTime) -> Self {
        Value::Date(dt)
    }
}

impl From<Map> for Value {
    fn from(map: Map) -> Self {
        Value::Object(map)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(items: Vec<T>) -> Self {
        Value::Array(items.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

impl From<serde_json::Value> for Value {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => n.as_f64().map_or(Value::Null, Value::Number),
            serde_json::Value::String(s) => Value::String(s),
            serde_json::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(map) => Value::Object(
                map.into_iter()
                    .map(|(key, value)| (key, Value::from(value)))
                    .collect(),
            ),
        }
    }
}

impl From<toml::Value> for Value {
    fn from(value: toml::Value) -> Self {
        match value {
            toml::Value::String(s) => Value::String(s),
            toml::Value::Integer(i) => Value::from(i),
            toml::Value::Float(f) => Value::Number(f),
            toml::Value::Boolean(b) => Value::Bool(b),
            toml::Value::Datetime(dt) => {
                toml_datetime(&dt).map_or_else(|| Value::String(dt.to_string()), Value::Date)
            }
            toml::Value::Array(items) => {
                Value::Array(items.into_iter().map(Value::from).collect())
            }
            toml::Value::Table(table) => Value::from(table),
        }
    }
}

impl From<toml::Table> for Value {
    fn from(table: toml::Table) -> Self {
        Value::Object(
            table
                .into_iter()
                .map(|(key, value)| (key, Value::from(value)))
                .collect(),
        )
    }
}

/// Converts a TOML datetime that carries a calendar date.
///
/// A missing time is midnight and a missing offset is UTC. Time-only values
/// have no date to anchor them and yield `None`.
fn toml_datetime(dt: &toml::value::Datetime) -> Option<OffsetDateTime> {
    let date = dt.date?;
    let month = Month::try_from(date.month).ok()?;
    let date = Date::from_calendar_date(i32::from(date.year), month, date.day).ok()?;

    let time = match dt.time {
        Some(t) => Time::from_hms_nano(t.hour, t.minute, t.second, t.nanosecond).ok()?,
        None => Time::MIDNIGHT,
    };

    let offset = match dt.offset {
        Some(toml::value::Offset::Custom { minutes }) => {
            UtcOffset::from_whole_seconds(i32::from(minutes) * 60).ok()?
        }
        Some(toml::value::Offset::Z) | None => UtcOffset::UTC,
    };

    Some(PrimitiveDateTime::new(date, time).assume_offset(offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_from_json_nested() {
        let value = Value::from(json!({"server": {"port": 8080, "hosts": ["a", "b"]}}));
        let server = value.as_object().unwrap()["server"].as_object().unwrap();
        assert_eq!(server["port"], Value::Number(8080.0));
        assert_eq!(
            server["hosts"],
            Value::Array(vec![Value::from("a"), Value::from("b")])
        );
    }

    #[test]
    fn test_from_toml_datetime_with_offset() {
        let table: toml::Table = toml::from_str("at = 1979-05-27T07:32:00-07:00").unwrap();
        let value = Value::from(table);
        let Value::Date(dt) = value.as_object().unwrap()["at"] else {
            panic!("expected a date");
        };
        assert_eq!(dt.unix_timestamp(), 296_663_520);
    }

    #[test]
    fn test_from_toml_local_date_is_utc_midnight() {
        let table: toml::Table = toml::from_str("on = 1970-01-02").unwrap();
        let value = Value::from(table);
        let Value::Date(dt) = value.as_object().unwrap()["on"] else {
            panic!("expected a date");
        };
        assert_eq!(dt.unix_timestamp(), 86_400);
    }

    #[test]
    fn test_from_toml_local_time_is_string() {
        let table: toml::Table = toml::from_str("at = 07:32:00").unwrap();
        let value = Value::from(table);
        assert_eq!(value.as_object().unwrap()["at"], Value::from("07:32:00"));
    }

    #[test]
    fn test_from_option() {
        assert_eq!(Value::from(None::<i32>), Value::Null);
        assert_eq!(Value::from(Some("x")), Value::from("x"));
    }
}
