use crate::person::Person;
use std::time::{Duration, Instant};

/// Holds the last decoded response for a limited time.
#[derive(Debug)]
pub(crate) struct ResponseCache {
    /// How long a response stays fresh. `None` disables caching.
    duration: Option<Duration>,
    entry: Option<(Instant, Vec<Person>)>,
}

impl ResponseCache {
    pub fn new(duration: Option<Duration>) -> Self {
        Self {
            duration,
            entry: None,
        }
    }

    /// Gets the cached people if they are still fresh.
    pub fn get(&self) -> Option<Vec<Person>> {
        let duration = self.duration?;
        let (stored_at, people) = self.entry.as_ref()?;

        if stored_at.elapsed() < duration {
            Some(people.clone())
        } else {
            None
        }
    }

    pub fn store(&mut self, people: &[Person]) {
        if self.duration.is_some() {
            self.entry = Some((Instant::now(), people.to_vec()));
        }
    }

    pub fn clear(&mut self) {
        self.entry = None;
    }
}
