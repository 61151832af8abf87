use chrono::{NaiveDate, NaiveDateTime, TimeDelta};

/// Wire format of delivery timestamps, both in the source and the output file.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Timestamp substituted for an unparsable delivery time: `0001-01-01 00:00:00`.
pub fn min_timestamp() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1, 1, 1)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .unwrap_or(NaiveDateTime::MIN)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub order_number: String,
    /// Kilograms.
    pub weight: f64,
    pub district: String,
    pub delivery_date_time: NaiveDateTime,
}

impl Order {
    pub fn new(
        order_number: impl Into<String>,
        weight: f64,
        district: impl Into<String>,
        delivery_date_time: NaiveDateTime,
    ) -> Self {
        Self {
            order_number: order_number.into(),
            weight,
            district: district.into(),
            delivery_date_time,
        }
    }

    pub fn in_district(&self, district: &str) -> bool {
        districts_match(&self.district, district)
    }
}

/// Case-insensitive district comparison, one uppercased char at a time.
pub fn districts_match(left: &str, right: &str) -> bool {
    left == right
        || left
            .chars()
            .map(simple_uppercase)
            .eq(right.chars().map(simple_uppercase))
}

// Multi-char mappings (`ß` to `SS`) leave the char unchanged.
fn simple_uppercase(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}

/// District plus an inclusive delivery time range; every part is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RangeQuery {
    pub district: Option<String>,
    pub start: Option<NaiveDateTime>,
    pub end: Option<NaiveDateTime>,
}

impl RangeQuery {
    /// An empty district string counts as absent.
    pub fn new(
        district: Option<String>,
        start: Option<NaiveDateTime>,
        end: Option<NaiveDateTime>,
    ) -> Self {
        Self {
            district: district.filter(|d| !d.is_empty()),
            start,
            end,
        }
    }

    pub fn is_unfiltered(&self) -> bool {
        self.district.as_deref().is_none_or(str::is_empty)
            && self.start.is_none()
            && self.end.is_none()
    }

    pub fn matches(&self, order: &Order) -> bool {
        let district_ok = match self.district.as_deref() {
            Some(district) if !district.is_empty() => order.in_district(district),
            _ => true,
        };
        let start_ok = self
            .start
            .is_none_or(|start| order.delivery_date_time >= start);
        let end_ok = self.end.is_none_or(|end| order.delivery_date_time <= end);

        district_ok && start_ok && end_ok
    }
}

/// Orders of one district within `duration` of that district's first order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodQuery {
    pub district: String,
    pub duration: TimeDelta,
}

impl PeriodQuery {
    pub fn new(district: impl Into<String>, duration: TimeDelta) -> Self {
        Self {
            district: district.into(),
            duration,
        }
    }

    /// Whole minutes of the duration; seconds and below are dropped.
    pub fn whole_minutes(&self) -> TimeDelta {
        TimeDelta::try_minutes(self.duration.num_minutes()).unwrap_or(self.duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(raw: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(raw, TIMESTAMP_FORMAT).unwrap()
    }

    #[test]
    fn test_districts_match_ignores_case() {
        assert!(districts_match("DistrictA", "districta"));
        assert!(districts_match("Центральный", "ЦЕНТРАЛЬНЫЙ"));
        assert!(!districts_match("DistrictA", "DistrictB"));
    }

    #[test]
    fn test_districts_match_uses_per_char_uppercase() {
        // Kelvin sign and dotted capital I uppercase to themselves.
        assert!(!districts_match("\u{212A}", "k"));
        assert!(!districts_match("\u{0130}", "i"));
        assert!(!districts_match("Straße", "STRASSE"));
        assert!(districts_match("Straße", "STRAßE"));
    }

    #[test]
    fn test_range_query_treats_empty_district_as_absent() {
        let query = RangeQuery::new(Some(String::new()), None, None);
        assert!(query.is_unfiltered());
        assert_eq!(query.district, None);
    }

    #[test]
    fn test_range_query_bounds_are_inclusive() {
        let order = Order::new("Order1", 1.0, "DistrictA", at("2023-10-10 15:30:00"));
        let query = RangeQuery::new(
            Some("districta".to_string()),
            Some(at("2023-10-10 15:30:00")),
            Some(at("2023-10-10 15:30:00")),
        );
        assert!(query.matches(&order));

        let later = RangeQuery::new(None, Some(at("2023-10-10 15:30:01")), None);
        assert!(!later.matches(&order));
    }

    #[test]
    fn test_period_query_drops_sub_minute_precision() {
        let query = PeriodQuery::new("DistrictA", TimeDelta::seconds(90 * 60 + 59));
        assert_eq!(query.whole_minutes(), TimeDelta::minutes(90));
        assert_eq!(min_timestamp(), at("0001-01-01 00:00:00"));
    }
}
