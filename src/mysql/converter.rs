// ABOUTME: MySQL value to CSV field conversion with lossless text encoding
// ABOUTME: Handles all MySQL data types including dates, times, and binary data

use mysql_async::Value;

/// Convert a MySQL value to a CSV field
///
/// Produces the text a row cell should carry in the output file:
/// - NULL → empty field
/// - Integers and floats → decimal text
/// - Byte values → UTF-8 string, or base64 when not valid UTF-8
/// - DATE/DATETIME → `YYYY-MM-DD` / `YYYY-MM-DD HH:MM:SS[.ffffff]`
/// - TIME → `[-]HH:MM:SS[.ffffff]` with days folded into hours, as MySQL
///   renders durations
///
/// Text-protocol result sets deliver most cells as `Value::Bytes` already in
/// MySQL's own text format; the remaining arms keep binary-protocol rows
/// lossless as well.
///
/// # Examples
///
/// ```
/// # use mysql_async::Value;
/// # use mysql_csv_export::mysql::converter::value_to_field;
/// assert_eq!(value_to_field(&Value::Int(42)), "42");
/// assert_eq!(value_to_field(&Value::NULL), "");
/// ```
pub fn value_to_field(value: &Value) -> String {
    match value {
        Value::NULL => String::new(),

        Value::Int(i) => i.to_string(),
        Value::UInt(u) => u.to_string(),
        Value::Float(f) => f.to_string(),
        Value::Double(d) => d.to_string(),

        Value::Bytes(b) => match std::str::from_utf8(b) {
            Ok(s) => s.to_string(),
            // Not valid UTF-8, encode as base64
            Err(_) => base64::Engine::encode(&base64::engine::general_purpose::STANDARD, b),
        },

        Value::Date(year, month, day, hour, minute, second, micro) => {
            // DATE and DATETIME share this variant with no way to tell them
            // apart, so a DATETIME at exact midnight collapses to a bare
            // date here. Text-protocol results are unaffected: those cells
            // arrive as Bytes carrying the server's own rendering.
            if *hour == 0 && *minute == 0 && *second == 0 && *micro == 0 {
                format!("{:04}-{:02}-{:02}", year, month, day)
            } else if *micro == 0 {
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                    year, month, day, hour, minute, second
                )
            } else {
                format!(
                    "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.{:06}",
                    year, month, day, hour, minute, second, micro
                )
            }
        }

        Value::Time(is_negative, days, hours, minutes, seconds, micros) => {
            let sign = if *is_negative { "-" } else { "" };
            let total_hours = u64::from(*days) * 24 + u64::from(*hours);
            if *micros == 0 {
                format!("{}{:02}:{:02}:{:02}", sign, total_hours, minutes, seconds)
            } else {
                format!(
                    "{}{:02}:{:02}:{:02}.{:06}",
                    sign, total_hours, minutes, seconds, micros
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_is_empty_field() {
        assert_eq!(value_to_field(&Value::NULL), "");
    }

    #[test]
    fn test_integers() {
        assert_eq!(value_to_field(&Value::Int(-7)), "-7");
        assert_eq!(value_to_field(&Value::UInt(42)), "42");
    }

    #[test]
    fn test_doubles() {
        assert_eq!(value_to_field(&Value::Double(123.456)), "123.456");
        assert_eq!(value_to_field(&Value::Double(f64::NAN)), "NaN");
    }

    #[test]
    fn test_utf8_bytes() {
        let value = Value::Bytes(b"Hello World".to_vec());
        assert_eq!(value_to_field(&value), "Hello World");
    }

    #[test]
    fn test_binary_bytes_become_base64() {
        let value = Value::Bytes(vec![0xFF, 0xFE, 0xFD]);
        assert_eq!(value_to_field(&value), "//79");
    }

    #[test]
    fn test_date_without_time() {
        let value = Value::Date(2024, 1, 15, 0, 0, 0, 0);
        assert_eq!(value_to_field(&value), "2024-01-15");
    }

    #[test]
    fn test_midnight_datetime_collapses_to_bare_date() {
        // The variant carries no DATE/DATETIME distinction, so midnight
        // with no fraction renders as a date only
        let value = Value::Date(2024, 1, 15, 0, 0, 0, 0);
        assert_eq!(value_to_field(&value), "2024-01-15");

        // One microsecond past midnight keeps the time component
        let value = Value::Date(2024, 1, 15, 0, 0, 0, 1);
        assert_eq!(value_to_field(&value), "2024-01-15 00:00:00.000001");
    }

    #[test]
    fn test_datetime() {
        let value = Value::Date(2024, 1, 15, 10, 30, 45, 0);
        assert_eq!(value_to_field(&value), "2024-01-15 10:30:45");
    }

    #[test]
    fn test_datetime_with_microseconds() {
        let value = Value::Date(2024, 1, 15, 10, 30, 45, 123456);
        assert_eq!(value_to_field(&value), "2024-01-15 10:30:45.123456");
    }

    #[test]
    fn test_time_folds_days_into_hours() {
        let value = Value::Time(false, 1, 10, 30, 45, 0);
        assert_eq!(value_to_field(&value), "34:30:45");
    }

    #[test]
    fn test_negative_time() {
        let value = Value::Time(true, 0, 2, 5, 0, 0);
        assert_eq!(value_to_field(&value), "-02:05:00");
    }
}
