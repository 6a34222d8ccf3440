//! Timestamps for trip stops.
//!
//! Sources hand us times in different shapes: the bus feed uses "HH:MM"
//! strings relative to the trip date, the train API uses ISO 8601
//! date-times, and walks are computed from a departure plus a duration.
//! `TransitTime` is the common, date-aware representation.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use std::fmt;

/// Error returned when parsing an invalid time string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid time: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A date-aware time at which a trip calls somewhere.
///
/// Ordering follows the full date-time, so a call at 00:10 on the day
/// after sorts after a call at 23:50.
///
/// # Examples
///
/// ```
/// use journey_gen::domain::TransitTime;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let time = TransitTime::parse_hhmm("09:05", date).unwrap();
/// assert_eq!(time.to_string(), "09:05");
/// assert_eq!(time.short_string(), "0905");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitTime(NaiveDateTime);

impl TransitTime {
    /// Create a time from date and time-of-day components.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self(date.and_time(time))
    }

    /// Parse "HH:MM" on the given date.
    ///
    /// ```
    /// use journey_gen::domain::TransitTime;
    /// use chrono::NaiveDate;
    ///
    /// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    /// assert!(TransitTime::parse_hhmm("23:59", date).is_ok());
    /// assert!(TransitTime::parse_hhmm("2359", date).is_err());
    /// assert!(TransitTime::parse_hhmm("24:00", date).is_err());
    /// ```
    pub fn parse_hhmm(s: &str, date: NaiveDate) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 5 {
            return Err(TimeError::new("expected HH:MM format"));
        }
        if bytes[2] != b':' {
            return Err(TimeError::new("expected colon at position 2"));
        }

        let hour =
            parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::new("invalid hour digits"))?;
        let minute = parse_two_digits(&bytes[3..5])
            .ok_or_else(|| TimeError::new("invalid minute digits"))?;

        let time = NaiveTime::from_hms_opt(hour, minute, 0)
            .ok_or_else(|| TimeError::new("hour or minute out of range"))?;

        Ok(Self::new(date, time))
    }

    /// Parse an ISO 8601 date-time, with or without a UTC offset.
    ///
    /// An offset, when present, is dropped: the wall-clock time at the stop
    /// is what gets displayed.
    pub fn parse_iso(s: &str) -> Result<Self, TimeError> {
        if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
            return Ok(Self(dt.naive_local()));
        }
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M"))
            .map(Self)
            .map_err(|_| TimeError::new("expected ISO 8601 date-time"))
    }

    /// Returns the date component.
    pub fn date(&self) -> NaiveDate {
        self.0.date()
    }

    /// Returns the time-of-day component.
    pub fn time(&self) -> NaiveTime {
        self.0.time()
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn to_datetime(&self) -> NaiveDateTime {
        self.0
    }

    /// Add a duration, advancing the date across midnight.
    pub fn checked_add(&self, duration: Duration) -> Option<Self> {
        self.0.checked_add_signed(duration).map(Self)
    }

    /// Returns the duration between two times (negative if `other` is later).
    pub fn signed_duration_since(&self, other: Self) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Compact "HHmm" form used on journey cards.
    pub fn short_string(&self) -> String {
        format!("{:02}{:02}", self.hour(), self.minute())
    }
}

impl From<NaiveDateTime> for TransitTime {
    fn from(value: NaiveDateTime) -> Self {
        Self(value)
    }
}

impl fmt::Display for TransitTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

/// Format a duration as hours and minutes, e.g. "1h5m" or "45m".
///
/// Seconds are truncated; negative durations format as "0m".
///
/// ```
/// use journey_gen::domain::duration_string;
/// use chrono::Duration;
///
/// assert_eq!(duration_string(Duration::minutes(65)), "1h5m");
/// assert_eq!(duration_string(Duration::minutes(45)), "45m");
/// ```
pub fn duration_string(duration: Duration) -> String {
    let total_minutes = duration.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;
    if hours > 0 {
        format!("{hours}h{minutes}m")
    } else {
        format!("{minutes}m")
    }
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    if bytes.len() != 2 {
        return None;
    }
    let d1 = (bytes[0] as char).to_digit(10)?;
    let d2 = (bytes[1] as char).to_digit(10)?;
    Some(d1 * 10 + d2)
}

/// If a time appears more than this many hours before the previous one in
/// a sequence, it is taken to be on the next day.
const ROLLOVER_THRESHOLD_HOURS: i64 = 6;

/// Parse a chronological sequence of "HH:MM" strings, detecting midnight.
///
/// `None` entries are preserved and do not affect rollover detection.
///
/// ```
/// use journey_gen::domain::parse_time_sequence;
/// use chrono::NaiveDate;
///
/// let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
/// let parsed = parse_time_sequence(&[Some("23:40"), None, Some("00:05")], date).unwrap();
/// assert_eq!(parsed[0].unwrap().date(), date);
/// assert!(parsed[1].is_none());
/// assert_eq!(parsed[2].unwrap().date(), date.succ_opt().unwrap());
/// ```
pub fn parse_time_sequence(
    times: &[Option<&str>],
    base_date: NaiveDate,
) -> Result<Vec<Option<TransitTime>>, TimeError> {
    let mut result = Vec::with_capacity(times.len());
    let mut current_date = base_date;
    let mut prev_time: Option<NaiveTime> = None;

    for time_opt in times {
        let Some(time_str) = time_opt else {
            result.push(None);
            continue;
        };

        let time = TransitTime::parse_hhmm(time_str, base_date)?.time();

        if let Some(prev) = prev_time {
            let diff_minutes = minutes_of_day(time) - minutes_of_day(prev);
            if diff_minutes < -(ROLLOVER_THRESHOLD_HOURS * 60) {
                current_date = current_date
                    .succ_opt()
                    .ok_or_else(|| TimeError::new("date overflow"))?;
            }
        }

        result.push(Some(TransitTime::new(current_date, time)));
        prev_time = Some(time);
    }

    Ok(result)
}

fn minutes_of_day(time: NaiveTime) -> i64 {
    time.hour() as i64 * 60 + time.minute() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 15).unwrap()
    }

    #[test]
    fn parse_valid_hhmm() {
        let t = TransitTime::parse_hhmm("00:00", date()).unwrap();
        assert_eq!((t.hour(), t.minute()), (0, 0));

        let t = TransitTime::parse_hhmm("14:30", date()).unwrap();
        assert_eq!((t.hour(), t.minute()), (14, 30));
        assert_eq!(t.date(), date());
    }

    #[test]
    fn parse_invalid_hhmm() {
        assert!(TransitTime::parse_hhmm("1430", date()).is_err());
        assert!(TransitTime::parse_hhmm("14-30", date()).is_err());
        assert!(TransitTime::parse_hhmm("ab:cd", date()).is_err());
        assert!(TransitTime::parse_hhmm("14:60", date()).is_err());
        assert!(TransitTime::parse_hhmm("24:00", date()).is_err());
        assert!(TransitTime::parse_hhmm("", date()).is_err());
    }

    #[test]
    fn parse_iso_variants() {
        let t = TransitTime::parse_iso("2024-03-15T10:25:00").unwrap();
        assert_eq!(t.to_string(), "10:25");
        assert_eq!(t.date(), date());

        let t = TransitTime::parse_iso("2024-03-15T10:25:00+00:00").unwrap();
        assert_eq!(t.to_string(), "10:25");

        // Offset is dropped, wall-clock time kept
        let t = TransitTime::parse_iso("2024-07-01T08:15:00+01:00").unwrap();
        assert_eq!(t.to_string(), "08:15");

        let t = TransitTime::parse_iso("2024-03-15T10:25").unwrap();
        assert_eq!(t.short_string(), "1025");

        assert!(TransitTime::parse_iso("10:25").is_err());
        assert!(TransitTime::parse_iso("").is_err());
    }

    #[test]
    fn formatting() {
        let t = TransitTime::parse_hhmm("07:04", date()).unwrap();
        assert_eq!(t.to_string(), "07:04");
        assert_eq!(t.short_string(), "0704");
    }

    #[test]
    fn ordering_across_midnight() {
        let late = TransitTime::parse_hhmm("23:50", date()).unwrap();
        let early_next = TransitTime::parse_hhmm("00:10", date().succ_opt().unwrap()).unwrap();
        assert!(late < early_next);
        assert_eq!(early_next.signed_duration_since(late), Duration::minutes(20));
    }

    #[test]
    fn checked_add_crosses_midnight() {
        let t = TransitTime::parse_hhmm("23:30", date()).unwrap();
        let later = t.checked_add(Duration::hours(1)).unwrap();
        assert_eq!(later.to_string(), "00:30");
        assert_eq!(later.date(), date().succ_opt().unwrap());
    }

    #[test]
    fn duration_strings() {
        assert_eq!(duration_string(Duration::minutes(0)), "0m");
        assert_eq!(duration_string(Duration::minutes(59)), "59m");
        assert_eq!(duration_string(Duration::minutes(60)), "1h0m");
        assert_eq!(duration_string(Duration::minutes(125)), "2h5m");
        assert_eq!(duration_string(Duration::seconds(119)), "1m");
        assert_eq!(duration_string(Duration::minutes(-5)), "0m");
    }

    #[test]
    fn sequence_same_day() {
        let parsed =
            parse_time_sequence(&[Some("10:00"), Some("10:30"), Some("11:00")], date()).unwrap();
        assert!(parsed.iter().all(|t| t.unwrap().date() == date()));
    }

    #[test]
    fn sequence_rolls_over_once() {
        let parsed = parse_time_sequence(
            &[Some("22:00"), Some("23:55"), Some("00:20"), Some("01:00")],
            date(),
        )
        .unwrap();
        let next = date().succ_opt().unwrap();
        assert_eq!(parsed[1].unwrap().date(), date());
        assert_eq!(parsed[2].unwrap().date(), next);
        assert_eq!(parsed[3].unwrap().date(), next);
    }

    #[test]
    fn sequence_small_backwards_step_is_not_rollover() {
        // A late-running record slightly out of order stays on the same day
        let parsed = parse_time_sequence(&[Some("10:30"), Some("10:25")], date()).unwrap();
        assert_eq!(parsed[1].unwrap().date(), date());
    }

    #[test]
    fn sequence_propagates_parse_errors() {
        assert!(parse_time_sequence(&[Some("10:00"), Some("bad")], date()).is_err());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Any valid HH:MM parses and displays back identically
        #[test]
        fn hhmm_roundtrip(h in 0u32..24, m in 0u32..60) {
            let s = format!("{h:02}:{m:02}");
            let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let t = TransitTime::parse_hhmm(&s, date).unwrap();
            prop_assert_eq!(t.to_string(), s);
            prop_assert_eq!(t.short_string(), format!("{h:02}{m:02}"));
        }

        /// Parsed sequences are never decreasing by more than the threshold
        #[test]
        fn sequence_is_nearly_monotonic(mins in proptest::collection::vec(0u32..1440, 1..12)) {
            let strings: Vec<String> = mins
                .iter()
                .map(|m| format!("{:02}:{:02}", m / 60, m % 60))
                .collect();
            let refs: Vec<Option<&str>> = strings.iter().map(|s| Some(s.as_str())).collect();
            let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
            let parsed = parse_time_sequence(&refs, date).unwrap();

            for pair in parsed.windows(2) {
                let (a, b) = (pair[0].unwrap(), pair[1].unwrap());
                prop_assert!(
                    b.signed_duration_since(a) >= -Duration::hours(ROLLOVER_THRESHOLD_HOURS)
                );
            }
        }
    }
}
