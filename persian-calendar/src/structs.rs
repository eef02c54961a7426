#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single calendar entry pairing a date, a display title and a holiday flag.
///
/// The date is whatever value the caller hands in. It is stored as-is and
/// handed back by reference; nothing here looks inside it.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Event<D> {
    date: D,
    title: String,
    holiday: bool,
}

impl<D> Event<D> {
    pub fn new<S: Into<String>>(date: D, title: S, holiday: bool) -> Self {
        Event {
            date,
            title: title.into(),
            holiday,
        }
    }

    #[must_use]
    pub fn date(&self) -> &D {
        &self.date
    }

    pub fn set_date(&mut self, date: D) {
        self.date = date;
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn set_title<S: Into<String>>(&mut self, title: S) {
        self.title = title.into();
    }

    #[must_use]
    pub fn is_holiday(&self) -> bool {
        self.holiday
    }

    pub fn set_holiday(&mut self, holiday: bool) {
        self.holiday = holiday;
    }
}
