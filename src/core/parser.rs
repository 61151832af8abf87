use crate::domain::model::{min_timestamp, Order};
use chrono::{NaiveDate, NaiveDateTime};

pub const FIELD_DELIMITER: u8 = b',';
const MIN_FIELDS: usize = 4;

/// Parses one source line. `None` means the line has fewer than four fields
/// and should be skipped.
pub fn parse_line(line: &str) -> Option<Order> {
    let fields: Vec<&str> = line.split(FIELD_DELIMITER as char).collect();
    parse_fields(&fields)
}

/// Builds an order from already split fields; extra fields are ignored.
pub fn parse_fields(fields: &[&str]) -> Option<Order> {
    if fields.len() < MIN_FIELDS {
        return None;
    }

    Some(Order {
        order_number: fields[0].to_string(),
        weight: parse_weight(fields[1]),
        district: fields[2].to_string(),
        delivery_date_time: parse_timestamp(fields[3]),
    })
}

/// `.`-decimal number; `0.0` when unparsable.
///
/// Non-finite values are accepted only as `Infinity`/`NaN` or from an
/// overflowing numeral, never from the short `inf` spellings.
pub fn parse_weight(raw: &str) -> f64 {
    let raw = raw.trim();
    let Ok(value) = raw.parse::<f64>() else {
        return 0.0;
    };
    if value.is_finite() {
        return value;
    }

    let unsigned = raw.strip_prefix(['+', '-']).unwrap_or(raw);
    let numeral = unsigned
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit() || c == '.');
    if numeral || unsigned == "Infinity" || unsigned == "NaN" {
        value
    } else {
        0.0
    }
}

// Byte layout of `yyyy-MM-dd HH:mm:ss`: `d` is a digit, anything else is literal.
const TIMESTAMP_SHAPE: &[u8; 19] = b"dddd-dd-dd dd:dd:dd";

/// Strict `yyyy-MM-dd HH:mm:ss`; the minimum timestamp when unparsable.
pub fn parse_timestamp(raw: &str) -> NaiveDateTime {
    parse_exact_timestamp(raw).unwrap_or_else(min_timestamp)
}

fn parse_exact_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let bytes = raw.as_bytes();
    if bytes.len() != TIMESTAMP_SHAPE.len() {
        return None;
    }
    let well_formed = bytes
        .iter()
        .zip(TIMESTAMP_SHAPE)
        .all(|(byte, shape)| match shape {
            b'd' => byte.is_ascii_digit(),
            literal => byte == literal,
        });
    if !well_formed {
        return None;
    }

    let number = |range: std::ops::Range<usize>| raw[range].parse::<u32>().ok();
    let year = i32::try_from(number(0..4)?).ok()?;
    NaiveDate::from_ymd_opt(year, number(5..7)?, number(8..10)?)?.and_hms_opt(
        number(11..13)?,
        number(14..16)?,
        number(17..19)?,
    )
}
