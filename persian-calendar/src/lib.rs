mod date;
mod holidays;
mod source;
mod store;
mod structs;

pub use date::{CivilDate, IslamicDate, MonthDay, PersianDate};
pub use holidays::{CalendarKind, EventType, HolidayTypes, UnknownCalendar};
pub use source::{EventRecord, EventSource};
pub use store::{AnyEvent, CalendarEvents, EventsStore};
pub use structs::Event;

#[cfg(feature = "serde")]
pub use source::parse_source;
