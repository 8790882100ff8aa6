//! Idempotency key helpers.

// crates.io
use time::{format_description::BorrowedFormatItem, macros::format_description};
// self
use crate::_prelude::*;

const TIMESTAMP_FORMAT: &[BorrowedFormatItem<'static>] =
	format_description!("[year][month][day][hour][minute][second]");

/// Builds `prefix_element..._YYYYMMDDHHMMSS` using the current UTC time.
///
/// The key is advisory: the remote system may use it to deduplicate retried requests, the
/// client never tracks it.
pub fn generate_idempotency_key<I, S>(prefix: &str, elements: I) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	idempotency_key_at(prefix, elements, OffsetDateTime::now_utc())
}

/// Same as [`generate_idempotency_key`] with an explicit instant.
pub fn idempotency_key_at<I, S>(prefix: &str, elements: I, instant: OffsetDateTime) -> String
where
	I: IntoIterator<Item = S>,
	S: AsRef<str>,
{
	let mut key = String::from(prefix);

	for element in elements {
		key.push('_');
		key.push_str(element.as_ref());
	}

	key.push('_');
	// The static description only uses calendar/clock components, which always format.
	if let Ok(stamp) = instant.to_offset(time::UtcOffset::UTC).format(TIMESTAMP_FORMAT) {
		key.push_str(&stamp);
	}

	key
}
