use chrono::{DateTime, Utc};

pub type ServerTime = DateTime<Utc>;

/// Floors a millisecond timestamp to a whole millisecond. `None` if the value is not finite or
/// does not fit in an `i64`.
pub fn floor_millis(timestamp: f64) -> Option<i64> {
    let millis = timestamp.floor();

    if !millis.is_finite() || millis < i64::MIN as f64 || millis >= i64::MAX as f64 {
        return None;
    }

    Some(millis as i64)
}

/// Converts milliseconds since the Unix epoch into a [`ServerTime`].
pub fn timestamp_millis_to_server_time(millis: i64) -> Option<ServerTime> {
    DateTime::from_timestamp_millis(millis)
}

pub fn get_server_time_now() -> ServerTime {
    Utc::now()
}
