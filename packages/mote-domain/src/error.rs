pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Window start time {start} is after end time {end}.")]
	InvalidWindowConfig { start: time::Time, end: time::Time },
	#[error("Window of {days} days reaches before the supported calendar range.")]
	WindowOutOfRange { days: u32 },
	#[error("Time of day {raw:?} is not a valid HH:MM value.")]
	InvalidTimeOfDay { raw: String },
	#[error("UTC offset {raw:?} is not a valid +HH:MM value.")]
	InvalidUtcOffset { raw: String },
}
