#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CalendarEvents, EventType, EventsStore, HolidayTypes};

/// One row of a shipped event table, before any category filtering.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct EventRecord {
    pub title: String,
    pub month: u32,
    pub day: u32,
    #[cfg_attr(feature = "serde", serde(default))]
    pub holiday: bool,
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub kind: EventType,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct EventSource {
    pub persian: Vec<EventRecord>,
    pub islamic: Vec<EventRecord>,
    pub gregorian: Vec<EventRecord>,
}

impl EventSource {
    /// Builds the per-day stores holding only the events `types` enables.
    #[must_use]
    pub fn load(&self, types: &HolidayTypes) -> CalendarEvents {
        CalendarEvents {
            persian: EventsStore::from_events(types.select_persian(&self.persian)),
            islamic: EventsStore::from_events(types.select_islamic(&self.islamic)),
            gregorian: EventsStore::from_events(types.select_gregorian(&self.gregorian)),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.persian.len() + self.islamic.len() + self.gregorian.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(feature = "serde")]
pub fn parse_source<S: AsRef<str>>(s: S) -> serde_json::Result<EventSource> {
    serde_json::from_str(s.as_ref())
}
