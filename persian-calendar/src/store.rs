use std::collections::BTreeMap;

#[cfg(feature = "serde")]
use serde::Serialize;

use crate::{CalendarKind, CivilDate, Event, IslamicDate, MonthDay, PersianDate};

/// Events of one calendar filed by month and day.
#[derive(Debug, Clone)]
pub struct EventsStore<D> {
    days: BTreeMap<(u32, u32), Vec<Event<D>>>,
    // (day, index within that day) in the order events were added
    order: Vec<((u32, u32), usize)>,
}

impl<D> Default for EventsStore<D> {
    fn default() -> Self {
        EventsStore {
            days: BTreeMap::new(),
            order: Vec::new(),
        }
    }
}

impl<D: MonthDay> EventsStore<D> {
    pub fn from_events<I: IntoIterator<Item = Event<D>>>(events: I) -> Self {
        let mut store = EventsStore::default();

        for event in events {
            let key = (event.date().month(), event.date().day());
            let day = store.days.entry(key).or_insert_with(Vec::new);
            store.order.push((key, day.len()));
            day.push(event);
        }

        store
    }
}

impl<D> EventsStore<D> {
    #[must_use]
    pub fn get(&self, month: u32, day: u32) -> &[Event<D>] {
        self.days
            .get(&(month, day))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn holidays(&self, month: u32, day: u32) -> impl Iterator<Item = &Event<D>> {
        self.get(month, day).iter().filter(|event| event.is_holiday())
    }

    #[must_use]
    pub fn is_holiday(&self, month: u32, day: u32) -> bool {
        self.holidays(month, day).next().is_some()
    }

    /// Every event, in the order the store was built from.
    pub fn iter(&self) -> impl Iterator<Item = &Event<D>> {
        self.order
            .iter()
            .filter_map(|(key, index)| self.days.get(key)?.get(*index))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

/// Stores for all three calendars built from one source and one set of
/// enabled categories.
#[derive(Debug, Clone, Default)]
pub struct CalendarEvents {
    pub persian: EventsStore<PersianDate>,
    pub islamic: EventsStore<IslamicDate>,
    pub gregorian: EventsStore<CivilDate>,
}

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(Serialize))]
#[cfg_attr(feature = "serde", serde(tag = "calendar", content = "event", rename_all = "lowercase"))]
pub enum AnyEvent<'a> {
    Persian(&'a Event<PersianDate>),
    Islamic(&'a Event<IslamicDate>),
    Gregorian(&'a Event<CivilDate>),
}

impl AnyEvent<'_> {
    #[must_use]
    pub fn calendar(&self) -> CalendarKind {
        match self {
            AnyEvent::Persian(_) => CalendarKind::Persian,
            AnyEvent::Islamic(_) => CalendarKind::Islamic,
            AnyEvent::Gregorian(_) => CalendarKind::Gregorian,
        }
    }

    #[must_use]
    pub fn title(&self) -> &str {
        match self {
            AnyEvent::Persian(event) => event.title(),
            AnyEvent::Islamic(event) => event.title(),
            AnyEvent::Gregorian(event) => event.title(),
        }
    }

    #[must_use]
    pub fn is_holiday(&self) -> bool {
        match self {
            AnyEvent::Persian(event) => event.is_holiday(),
            AnyEvent::Islamic(event) => event.is_holiday(),
            AnyEvent::Gregorian(event) => event.is_holiday(),
        }
    }
}

impl CalendarEvents {
    /// Every enabled event: Persian first, then Islamic, then Gregorian,
    /// each in its table order.
    pub fn all(&self) -> impl Iterator<Item = AnyEvent<'_>> {
        self.persian
            .iter()
            .map(AnyEvent::Persian)
            .chain(self.islamic.iter().map(AnyEvent::Islamic))
            .chain(self.gregorian.iter().map(AnyEvent::Gregorian))
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

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> EventsStore<PersianDate> {
        EventsStore::from_events([
            Event::new(PersianDate::yearly(1, 1), "Nowruz", true),
            Event::new(PersianDate::yearly(12, 29), "Oil nationalisation", true),
            Event::new(PersianDate::yearly(1, 1), "Spring", false),
            Event::new(PersianDate::yearly(1, 2), "Nowruz", true),
        ])
    }

    #[test]
    fn groups_by_day_in_insertion_order() {
        let store = store();
        let titles: Vec<_> = store.get(1, 1).iter().map(Event::title).collect();

        assert_eq!(titles, ["Nowruz", "Spring"]);
        assert_eq!(store.len(), 4);
    }

    #[test]
    fn missing_day_is_empty() {
        assert!(store().get(5, 5).is_empty());
        assert!(!store().is_holiday(5, 5));
    }

    #[test]
    fn holidays_skips_ordinary_events() {
        let store = store();
        let holidays: Vec<_> = store.holidays(1, 1).map(Event::title).collect();

        assert_eq!(holidays, ["Nowruz"]);
        assert!(store.is_holiday(12, 29));
    }

    #[test]
    fn iter_keeps_table_order() {
        let store = store();
        let titles: Vec<_> = store.iter().map(Event::title).collect();

        assert_eq!(titles, ["Nowruz", "Oil nationalisation", "Spring", "Nowruz"]);
    }

    #[test]
    fn all_chains_calendars() {
        let events = CalendarEvents {
            persian: store(),
            islamic: EventsStore::from_events([Event::new(
                IslamicDate::yearly(9, 1),
                "Ramadan",
                false,
            )]),
            gregorian: EventsStore::default(),
        };

        assert_eq!(events.len(), 5);

        let titles: Vec<_> = events.all().map(|event| event.title().to_string()).collect();
        assert_eq!(
            titles,
            ["Nowruz", "Oil nationalisation", "Spring", "Nowruz", "Ramadan"]
        );

        let last = events.all().last().unwrap();
        assert_eq!(last.calendar(), CalendarKind::Islamic);
        assert_eq!(last.title(), "Ramadan");
        assert!(!last.is_holiday());
    }

    #[test]
    fn empty_bundle() {
        let events = CalendarEvents::default();
        assert!(events.is_empty());
        assert_eq!(events.all().count(), 0);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn any_event_is_tagged_by_calendar() {
        let event = Event::new(CivilDate::yearly(4, 7), "World Health Day", false);
        let json = serde_json::to_value(AnyEvent::Gregorian(&event)).unwrap();

        assert_eq!(json["calendar"], "gregorian");
        assert_eq!(json["event"]["title"], "World Health Day");
    }
}
