//! People sharing their location with the account.

use crate::time::ServerTime;
use std::fmt;
use serde::{Deserialize, Serialize};

/// A person sharing their location. Any field may be missing from Google's response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Google's identifier for the person. Falls back to `full_name` when absent.
    pub id: Option<String>,
    /// URL of the person's profile picture.
    pub picture_url: Option<String>,
    pub full_name: Option<String>,
    pub nickname: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    /// When the location was reported, in milliseconds since the Unix epoch, as sent.
    pub timestamp: Option<f64>,
    /// Accuracy of the location in meters.
    pub accuracy: Option<f64>,
    /// The reverse-geocoded address of the location.
    pub address: Option<String>,
    pub country_code: Option<String>,
    /// Whether the person's device is charging.
    pub charging: bool,
    /// Battery percentage of the person's device.
    pub battery_level: Option<f64>,
    /// `timestamp` floored to whole milliseconds as a date. `None` when there is no timestamp.
    pub datetime: Option<ServerTime>,
}

/// A latitude/longitude pair.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Person {
    /// The person's coordinates. `None` if either is missing.
    pub fn coordinates(&self) -> Option<Coordinates> {
        Some(Coordinates {
            latitude: self.latitude?,
            longitude: self.longitude?,
        })
    }
}

impl fmt::Display for Person {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fn or_empty<T: ToString>(value: &Option<T>) -> String {
            value.as_ref().map(T::to_string).unwrap_or_default()
        }

        writeln!(f, "Full name        :{}", or_empty(&self.full_name))?;
        writeln!(f, "Nickname         :{}", or_empty(&self.nickname))?;
        writeln!(f, "Current location :{}", or_empty(&self.address))?;
        writeln!(f, "Latitude         :{}", or_empty(&self.latitude))?;
        writeln!(f, "Longitude        :{}", or_empty(&self.longitude))?;
        writeln!(f, "Datetime         :{}", or_empty(&self.datetime.map(|datetime| datetime.to_rfc3339())))?;
        writeln!(f, "Charging         :{}", self.charging)?;
        writeln!(f, "Battery %        :{}", or_empty(&self.battery_level))?;
        write!(f, "Accuracy         :{}", or_empty(&self.accuracy))
    }
}

fn normalize(value: &str) -> String {
    value.trim().to_lowercase()
}

fn find_by<'a, F>(people: &'a [Person], query: &str, field: F) -> Option<&'a Person>
where
    F: Fn(&Person) -> Option<&str>,
{
    let query = normalize(query);

    people
        .iter()
        .find(|person| field(person).is_some_and(|value| normalize(value) == query))
}

/// Finds a person by nickname, ignoring case.
pub fn person_by_nickname<'a>(people: &'a [Person], nickname: &str) -> Option<&'a Person> {
    find_by(people, nickname, |person| person.nickname.as_deref())
}

/// Finds a person by full name, ignoring case.
pub fn person_by_full_name<'a>(people: &'a [Person], full_name: &str) -> Option<&'a Person> {
    find_by(people, full_name, |person| person.full_name.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn person(full_name: &str, nickname: &str) -> Person {
        Person {
            id: Some(full_name.into()),
            picture_url: None,
            full_name: Some(full_name.into()),
            nickname: Some(nickname.into()),
            latitude: Some(37.42),
            longitude: Some(-122.08),
            timestamp: None,
            accuracy: None,
            address: None,
            country_code: None,
            charging: false,
            battery_level: Some(50.0),
            datetime: None,
        }
    }

    #[test]
    fn finds_people_ignoring_case() {
        let people = vec![person("Jane Doe", "jane"), person("John Smith", "Johnny")];

        assert_eq!(person_by_nickname(&people, "JOHNNY").unwrap().full_name.as_deref(), Some("John Smith"));
        assert_eq!(person_by_full_name(&people, " jane doe ").unwrap().nickname.as_deref(), Some("jane"));
        assert!(person_by_nickname(&people, "johnn").is_none());
        assert!(person_by_full_name(&[], "Jane Doe").is_none());
    }

    #[test]
    fn gets_coordinates() {
        let mut jane = person("Jane Doe", "jane");

        assert_eq!(jane.coordinates(), Some(Coordinates { latitude: 37.42, longitude: -122.08 }));

        jane.longitude = None;

        assert!(jane.coordinates().is_none());
    }

    #[test]
    fn displays_summary() {
        let summary = person("Jane Doe", "jane").to_string();

        assert!(summary.starts_with("Full name        :Jane Doe\n"));
        assert!(summary.contains("Battery %        :50\n"));
        assert!(summary.ends_with("Accuracy         :"));
    }
}
