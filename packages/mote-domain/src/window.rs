use time::{Duration, OffsetDateTime, Time, UtcOffset, macros::format_description};

use crate::{Error, Result};

/// Inclusive range of last-modified instants eligible for selection.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TimeWindow {
	pub start: OffsetDateTime,
	pub end: OffsetDateTime,
}
impl TimeWindow {
	pub fn contains(&self, instant: OffsetDateTime) -> bool {
		self.start <= instant && instant <= self.end
	}

	pub fn is_single_day(&self) -> bool {
		self.start.date() == self.end.date()
	}
}

/// Compute the inclusion window ending on `now`'s day.
///
/// `days = 1` covers today only; each additional day extends the start
/// boundary one full calendar day back. The start time-of-day clamps only
/// the earliest day and the end time-of-day only the final day; interior
/// days are contained whole by the contiguous range.
pub fn compute(
	days: u32,
	start_time: Time,
	end_time: Time,
	now: OffsetDateTime,
) -> Result<TimeWindow> {
	if start_time > end_time {
		return Err(Error::InvalidWindowConfig { start: start_time, end: end_time });
	}

	let days = days.max(1);
	let start_date = now
		.date()
		.checked_sub(Duration::days(i64::from(days - 1)))
		.ok_or(Error::WindowOutOfRange { days })?;
	let start = start_date.with_time(start_time).assume_offset(now.offset());
	let end = now.date().with_time(end_time).assume_offset(now.offset());

	Ok(TimeWindow { start, end })
}

/// Compute the window straight from the configured string form.
pub fn compute_from(cfg: &mote_config::Window, now: OffsetDateTime) -> Result<TimeWindow> {
	let start_time = parse_time_of_day(&cfg.start_time)?;
	let end_time = parse_time_of_day(&cfg.end_time)?;

	compute(cfg.days, start_time, end_time, now)
}

pub fn parse_time_of_day(raw: &str) -> Result<Time> {
	let format = format_description!("[hour]:[minute]");

	Time::parse(raw, format).map_err(|_| Error::InvalidTimeOfDay { raw: raw.to_string() })
}

pub fn parse_utc_offset(raw: &str) -> Result<UtcOffset> {
	let format = format_description!("[offset_hour sign:mandatory]:[offset_minute]");

	UtcOffset::parse(raw, format).map_err(|_| Error::InvalidUtcOffset { raw: raw.to_string() })
}

#[cfg(test)]
mod tests {
	use time::macros::{datetime, time};

	use super::*;

	const NOW: OffsetDateTime = datetime!(2025-03-10 12:30 +9);

	#[test]
	fn single_day_window_spans_today() {
		let window = compute(1, time!(0:00), time!(23:59), NOW).expect("Expected a window.");

		assert_eq!(window.start, datetime!(2025-03-10 0:00 +9));
		assert_eq!(window.end, datetime!(2025-03-10 23:59 +9));
		assert!(window.is_single_day());
	}

	#[test]
	fn two_day_window_starts_yesterday_at_start_time() {
		let window = compute(2, time!(6:00), time!(22:00), NOW).expect("Expected a window.");

		assert_eq!(window.start, datetime!(2025-03-09 6:00 +9));
		assert_eq!(window.end, datetime!(2025-03-10 22:00 +9));
		// The earliest day is not clipped by the end time-of-day.
		assert!(window.contains(datetime!(2025-03-09 23:30 +9)));
		assert!(!window.is_single_day());
	}

	#[test]
	fn bounds_are_inclusive_and_tight_to_the_second() {
		let window = compute(1, time!(0:00), time!(23:59), NOW).expect("Expected a window.");

		assert!(window.contains(window.start));
		assert!(window.contains(window.end));
		assert!(!window.contains(window.start - Duration::seconds(1)));
		assert!(!window.contains(window.end + Duration::seconds(1)));
	}

	#[test]
	fn inverted_times_are_rejected() {
		let err = compute(1, time!(18:00), time!(9:00), NOW)
			.expect_err("Expected an inverted window error.");

		assert!(matches!(err, Error::InvalidWindowConfig { .. }));
	}

	#[test]
	fn window_honors_the_offset_of_now() {
		let utc_now = datetime!(2025-03-10 3:30 UTC);
		let window = compute(1, time!(0:00), time!(23:59), utc_now).expect("Expected a window.");

		assert_eq!(window.start.offset(), utc_now.offset());
		assert_eq!(window.start, datetime!(2025-03-10 0:00 UTC));
	}

	#[test]
	fn parses_time_of_day_and_rejects_garbage() {
		assert_eq!(parse_time_of_day("06:30").expect("Expected a time."), time!(6:30));
		assert!(matches!(
			parse_time_of_day("25:00"),
			Err(Error::InvalidTimeOfDay { .. })
		));
		assert!(matches!(parse_time_of_day("noon"), Err(Error::InvalidTimeOfDay { .. })));
	}

	#[test]
	fn parses_utc_offset_and_rejects_garbage() {
		assert_eq!(
			parse_utc_offset("+09:00").expect("Expected an offset."),
			UtcOffset::from_hms(9, 0, 0).expect("Expected a valid offset.")
		);
		assert!(matches!(parse_utc_offset("0900"), Err(Error::InvalidUtcOffset { .. })));
	}

	#[test]
	fn compute_from_uses_configured_strings() {
		let cfg = mote_config::Window {
			days: 2,
			start_time: "00:00".to_string(),
			end_time: "23:59".to_string(),
			utc_offset: None,
		};
		let window = compute_from(&cfg, NOW).expect("Expected a window.");

		assert_eq!(window.start, datetime!(2025-03-09 0:00 +9));
		assert_eq!(window.end, datetime!(2025-03-10 23:59 +9));
	}
}
