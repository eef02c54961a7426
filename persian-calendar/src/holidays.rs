use std::fmt;
use std::str::FromStr;

use log::debug;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{CivilDate, Event, EventRecord, IslamicDate, PersianDate};

const PERSIAN_MONTHS: [&str; 12] = [
    "فروردین",
    "اردیبهشت",
    "خرداد",
    "تیر",
    "مرداد",
    "شهریور",
    "مهر",
    "آبان",
    "آذر",
    "دی",
    "بهمن",
    "اسفند",
];

const ISLAMIC_MONTHS: [&str; 12] = [
    "محرم",
    "صفر",
    "ربیع‌الاول",
    "ربیع‌الثانی",
    "جمادی‌الاولی",
    "جمادی‌الثانیه",
    "رجب",
    "شعبان",
    "رمضان",
    "شوال",
    "ذی‌القعده",
    "ذی‌الحجه",
];

const GREGORIAN_MONTHS: [&str; 12] = [
    "ژانویه",
    "فوریه",
    "مارس",
    "آوریل",
    "مه",
    "ژوئن",
    "ژوئیه",
    "اوت",
    "سپتامبر",
    "اکتبر",
    "نوامبر",
    "دسامبر",
];

const IRAN_LABEL: &str = "ایران، ";
const AFGHANISTAN_LABEL: &str = "افغانستان، ";

/// Which calendar an event table belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CalendarKind {
    Persian,
    Islamic,
    Gregorian,
}

impl CalendarKind {
    fn month_names(self) -> &'static [&'static str; 12] {
        match self {
            CalendarKind::Persian => &PERSIAN_MONTHS,
            CalendarKind::Islamic => &ISLAMIC_MONTHS,
            CalendarKind::Gregorian => &GREGORIAN_MONTHS,
        }
    }

    fn month_name(self, month: u32) -> Option<&'static str> {
        let index = usize::try_from(month.checked_sub(1)?).ok()?;
        self.month_names().get(index).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownCalendar(pub String);

impl fmt::Display for UnknownCalendar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown calendar `{}`", self.0)
    }
}

impl std::error::Error for UnknownCalendar {}

impl FromStr for CalendarKind {
    type Err = UnknownCalendar;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "persian" => Ok(CalendarKind::Persian),
            "islamic" => Ok(CalendarKind::Islamic),
            "gregorian" => Ok(CalendarKind::Gregorian),
            other => Err(UnknownCalendar(other.to_string())),
        }
    }
}

/// Origin of an event in the shipped tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum EventType {
    Iran,
    AncientIran,
    Afghanistan,
    International,
}

/// The event categories a user has switched on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HolidayTypes {
    iran_holidays: bool,
    iran_ancient: bool,
    iran_others: bool,
    afghanistan_holidays: bool,
    afghanistan_others: bool,
    international: bool,
}

impl Default for HolidayTypes {
    fn default() -> Self {
        HolidayTypes {
            iran_holidays: true,
            ..HolidayTypes::none()
        }
    }
}

impl HolidayTypes {
    #[must_use]
    pub fn none() -> Self {
        HolidayTypes {
            iran_holidays: false,
            iran_ancient: false,
            iran_others: false,
            afghanistan_holidays: false,
            afghanistan_others: false,
            international: false,
        }
    }

    pub fn from_keys<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut types = HolidayTypes::none();

        for key in keys {
            match key.as_ref() {
                "iran_holidays" => types.iran_holidays = true,
                "iran_ancient" => types.iran_ancient = true,
                // "iran_islamic" is the older name of the same category
                "iran_others" | "iran_islamic" => types.iran_others = true,
                "afghanistan_holidays" => types.afghanistan_holidays = true,
                "afghanistan_others" => types.afghanistan_others = true,
                "international" => types.international = true,
                unknown => debug!("Ignoring unknown holiday type `{unknown}`"),
            }
        }

        types
    }

    /// Parses a comma separated list of category keys.
    pub fn parse<S: AsRef<str>>(s: S) -> Self {
        Self::from_keys(
            s.as_ref()
                .split(',')
                .map(str::trim)
                .filter(|key| !key.is_empty()),
        )
    }

    /// Canonical comma separated form, suitable as a lookup key.
    #[must_use]
    pub fn key(&self) -> String {
        self.enabled().collect::<Vec<_>>().join(",")
    }

    pub fn contains<S: AsRef<str>>(&self, key: S) -> bool {
        self.enabled().any(|enabled| enabled == key.as_ref())
    }

    fn enabled(&self) -> impl Iterator<Item = &'static str> {
        [
            (self.iran_holidays, "iran_holidays"),
            (self.iran_ancient, "iran_ancient"),
            (self.iran_others, "iran_others"),
            (self.afghanistan_holidays, "afghanistan_holidays"),
            (self.afghanistan_others, "afghanistan_others"),
            (self.international, "international"),
        ]
        .into_iter()
        .filter_map(|(on, key)| on.then_some(key))
    }

    pub fn select_persian(&self, records: &[EventRecord]) -> Vec<Event<PersianDate>> {
        self.select_hijri(records, CalendarKind::Persian, PersianDate::yearly)
    }

    pub fn select_islamic(&self, records: &[EventRecord]) -> Vec<Event<IslamicDate>> {
        self.select_hijri(records, CalendarKind::Islamic, IslamicDate::yearly)
    }

    pub fn select_gregorian(&self, records: &[EventRecord]) -> Vec<Event<CivilDate>> {
        records
            .iter()
            .filter(|record| match record.kind {
                EventType::Iran => self.iran_others || self.international,
                EventType::Afghanistan => self.afghanistan_others,
                EventType::AncientIran | EventType::International => self.international,
            })
            .filter_map(|record| {
                let Some(month_name) = CalendarKind::Gregorian.month_name(record.month) else {
                    debug!("Skipping `{}`: month {} out of range", record.title, record.month);
                    return None;
                };

                let title = format!("{} ({} {})", record.title, record.day, month_name);
                Some(Event::new(
                    CivilDate::yearly(record.month, record.day),
                    title,
                    false,
                ))
            })
            .collect()
    }

    // Shared by the Persian and Islamic tables, which follow the same rules
    // except that ancient Iranian events only exist in the Persian one.
    fn select_hijri<D>(
        &self,
        records: &[EventRecord],
        calendar: CalendarKind,
        date: fn(u32, u32) -> D,
    ) -> Vec<Event<D>> {
        records
            .iter()
            .filter_map(|record| {
                let (keep, holiday) = match record.kind {
                    EventType::Iran => (
                        (record.holiday && self.iran_holidays) || self.iran_others,
                        record.holiday && self.iran_holidays,
                    ),
                    EventType::Afghanistan => (
                        (record.holiday && self.afghanistan_holidays) || self.afghanistan_others,
                        record.holiday && self.afghanistan_holidays,
                    ),
                    EventType::AncientIran => (
                        calendar == CalendarKind::Persian && self.iran_ancient,
                        record.holiday,
                    ),
                    EventType::International => (false, record.holiday),
                };

                if !keep {
                    return None;
                }

                let Some(month_name) = calendar.month_name(record.month) else {
                    debug!("Skipping `{}`: month {} out of range", record.title, record.month);
                    return None;
                };

                let country = if holiday && self.iran_holidays && self.afghanistan_holidays {
                    match record.kind {
                        EventType::Iran => IRAN_LABEL,
                        EventType::Afghanistan => AFGHANISTAN_LABEL,
                        _ => "",
                    }
                } else {
                    ""
                };

                let title = format!(
                    "{} ({}{} {})",
                    record.title, country, record.day, month_name
                );

                Some(Event::new(date(record.month, record.day), title, holiday))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, month: u32, day: u32, holiday: bool, kind: EventType) -> EventRecord {
        EventRecord {
            title: title.to_string(),
            month,
            day,
            holiday,
            kind,
        }
    }

    fn persian_table() -> Vec<EventRecord> {
        vec![
            record("Nowruz", 1, 1, true, EventType::Iran),
            record("Tir festival", 4, 13, false, EventType::AncientIran),
            record("Teachers' day", 2, 12, false, EventType::Iran),
            record("Afghan Nowruz", 1, 1, true, EventType::Afghanistan),
            record("Afghan remembrance", 6, 9, false, EventType::Afghanistan),
        ]
    }

    #[test]
    fn default_enables_iran_holidays_only() {
        let types = HolidayTypes::default();
        assert_eq!(types.key(), "iran_holidays");
        assert!(types.contains("iran_holidays"));
        assert!(!types.contains("international"));
    }

    #[test]
    fn parse_ignores_unknown_and_blank_keys() {
        let types = HolidayTypes::parse(" iran_others, ,moon_landing,international ");
        assert_eq!(types.key(), "iran_others,international");
    }

    #[test]
    fn empty_list_enables_nothing() {
        assert_eq!(HolidayTypes::parse(""), HolidayTypes::none());
    }

    #[test]
    fn legacy_islamic_key_maps_to_others() {
        assert_eq!(
            HolidayTypes::parse("iran_islamic"),
            HolidayTypes::parse("iran_others")
        );
    }

    #[test]
    fn key_is_order_independent() {
        assert_eq!(
            HolidayTypes::parse("international,iran_ancient").key(),
            HolidayTypes::parse("iran_ancient,international").key()
        );
    }

    #[test]
    fn iran_holidays_keeps_only_iranian_holidays() {
        let events = HolidayTypes::default().select_persian(&persian_table());

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Nowruz (1 فروردین)");
        assert!(events[0].is_holiday());
        assert_eq!(events[0].date(), &PersianDate::yearly(1, 1));
    }

    #[test]
    fn others_without_holidays_clears_the_flag() {
        let events = HolidayTypes::parse("iran_others").select_persian(&persian_table());
        let titles: Vec<_> = events.iter().map(|event| event.title()).collect();

        assert_eq!(titles, ["Nowruz (1 فروردین)", "Teachers' day (12 اردیبهشت)"]);
        assert!(events.iter().all(|event| !event.is_holiday()));
    }

    #[test]
    fn ancient_events_need_their_own_category() {
        let table = persian_table();
        assert!(HolidayTypes::parse("iran_others")
            .select_persian(&table)
            .iter()
            .all(|event| !event.title().starts_with("Tir")));

        let events = HolidayTypes::parse("iran_ancient").select_persian(&table);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Tir festival (13 تیر)");
    }

    #[test]
    fn both_countries_label_holidays() {
        let events = HolidayTypes::parse("iran_holidays,afghanistan_holidays")
            .select_persian(&persian_table());
        let titles: Vec<_> = events.iter().map(|event| event.title()).collect();

        assert_eq!(
            titles,
            ["Nowruz (ایران، 1 فروردین)", "Afghan Nowruz (افغانستان، 1 فروردین)"]
        );
        assert!(events.iter().all(|event| event.is_holiday()));
    }

    #[test]
    fn afghanistan_others_without_holidays() {
        let events = HolidayTypes::parse("afghanistan_others").select_persian(&persian_table());

        assert_eq!(events.len(), 2);
        assert!(events.iter().all(|event| !event.is_holiday()));
        assert_eq!(events[1].title(), "Afghan remembrance (9 شهریور)");
    }

    #[test]
    fn islamic_table_never_yields_ancient_events() {
        let table = vec![
            record("Eid al-Fitr", 10, 1, true, EventType::Iran),
            record("Ancient", 1, 1, false, EventType::AncientIran),
        ];
        let events = HolidayTypes::parse("iran_holidays,iran_ancient").select_islamic(&table);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title(), "Eid al-Fitr (1 شوال)");
        assert_eq!(events[0].date(), &IslamicDate::yearly(10, 1));
    }

    #[test]
    fn gregorian_events_are_never_holidays() {
        let table = vec![
            record("New year", 1, 1, true, EventType::International),
            record("Iranian day", 5, 1, false, EventType::Iran),
            record("Afghan day", 8, 19, true, EventType::Afghanistan),
        ];

        let events = HolidayTypes::parse("international").select_gregorian(&table);
        let titles: Vec<_> = events.iter().map(|event| event.title()).collect();
        assert_eq!(titles, ["New year (1 ژانویه)", "Iranian day (1 مه)"]);
        assert!(events.iter().all(|event| !event.is_holiday()));

        let events = HolidayTypes::parse("afghanistan_others").select_gregorian(&table);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].date(), &CivilDate::yearly(8, 19));
    }

    #[test]
    fn out_of_range_month_is_skipped() {
        let table = vec![record("Broken", 13, 1, true, EventType::Iran)];
        assert!(HolidayTypes::default().select_persian(&table).is_empty());
    }

    #[test]
    fn calendar_kind_from_str() {
        assert_eq!("islamic".parse::<CalendarKind>(), Ok(CalendarKind::Islamic));
        assert_eq!(
            "julian".parse::<CalendarKind>(),
            Err(UnknownCalendar("julian".to_string()))
        );
    }
}
