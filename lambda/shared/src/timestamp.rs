use chrono::{DateTime, Utc};

/// `DD-MM-YYYY HH:mm:ss`, the format of `createdDate` and `modifiedDate`.
pub const TIMESTAMP_FORMAT: &str = "%d-%m-%Y %H:%M:%S";

pub fn format_timestamp(at: DateTime<Utc>) -> String {
    at.format(TIMESTAMP_FORMAT).to_string()
}

pub fn now() -> String {
    format_timestamp(Utc::now())
}
