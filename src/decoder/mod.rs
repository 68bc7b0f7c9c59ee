//! Decoding of responses from the location sharing endpoint.
//!
//! The body is a JSON array preceded by a prefix ending in a single quote (`)]}'`). The array
//! has no field names, values are identified by their position only.

mod accessor;
mod field;

pub use accessor::Positional;
pub use field::Field;

use crate::error::{DataFormatError, Error};
use crate::person::Person;
use crate::time::{floor_millis, timestamp_millis_to_server_time};
use serde_json::Value;

/// Value found at [`AUTH_STATUS_PATH`] when Google does not accept the session.
pub const SESSION_INVALID_MARKER: &str = "GgA=";

/// Path to the list of shared person entries.
const PEOPLE_PATH: &[usize] = &[0];
/// Path to the authentication status.
const AUTH_STATUS_PATH: &[usize] = &[6];

/// Extracts the JSON payload following the first single quote of `body`.
pub fn parse_envelope(body: &str) -> Result<Value, DataFormatError> {
    let Some((_prefix, json)) = body.split_once('\'') else {
        return Err(DataFormatError::MissingEnvelope {
            body: body.into(),
        });
    };

    serde_json::from_str::<Value>(json)
        .map_err(|source| DataFormatError::Json {
            source,
            body: body.into(),
        })
}

/// Decodes a response body into the people sharing their location.
///
/// Fails with [`Error::SessionInvalid`] if the payload carries the [`SESSION_INVALID_MARKER`],
/// whatever else it contains.
pub fn decode_response(body: &str) -> Result<Vec<Person>, Error> {
    let data = parse_envelope(body)?;

    if data.str_at(AUTH_STATUS_PATH) == Some(SESSION_INVALID_MARKER) {
        log::warn!("Response contains the session invalid marker");
        return Err(Error::SessionInvalid);
    }

    Ok(decode_people(&data))
}

/// Decodes the shared person entries of a payload. Malformed entries are dropped.
pub fn decode_people(data: &Value) -> Vec<Person> {
    let Some(entries) = data.at_path(PEOPLE_PATH).and_then(Value::as_array) else {
        return Vec::new();
    };

    entries
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let person = decode_person(entry);

            if person.is_none() {
                log::debug!("Dropped malformed shared person entry at index {index}");
            }

            person
        })
        .collect()
}

/// Decodes a single shared person entry. `None` if the entry is not an array.
pub fn decode_person(entry: &Value) -> Option<Person> {
    if !entry.is_array() {
        return None;
    }

    let string = |field: Field| entry.str_at(field.path()).map(String::from);
    let number = |field: Field| entry.number_at(field.path()).filter(|n| n.is_finite());
    let full_name = string(Field::FullName);
    let timestamp = number(Field::Timestamp);

    Some(Person {
        id: string(Field::Id).or_else(|| full_name.clone()),
        picture_url: string(Field::PictureUrl),
        nickname: string(Field::Nickname),
        latitude: number(Field::Latitude),
        longitude: number(Field::Longitude),
        accuracy: number(Field::Accuracy),
        address: string(Field::Address),
        country_code: string(Field::CountryCode),
        charging: entry.truthy_at(Field::Charging.path()),
        battery_level: number(Field::BatteryLevel),
        datetime: timestamp
            .and_then(floor_millis)
            .and_then(timestamp_millis_to_server_time),
        full_name,
        timestamp,
    })
}
