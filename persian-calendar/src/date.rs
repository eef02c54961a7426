use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Month and day of a date, used to file events by day of year.
pub trait MonthDay {
    fn month(&self) -> u32;
    fn day(&self) -> u32;
}

macro_rules! calendar_date {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name {
            year: Option<i32>,
            month: u32,
            day: u32,
        }

        impl $name {
            #[must_use]
            pub fn new(year: i32, month: u32, day: u32) -> Self {
                $name {
                    year: Some(year),
                    month,
                    day,
                }
            }

            /// A date that falls on the same month and day every year.
            #[must_use]
            pub fn yearly(month: u32, day: u32) -> Self {
                $name {
                    year: None,
                    month,
                    day,
                }
            }

            #[must_use]
            pub fn year(&self) -> Option<i32> {
                self.year
            }

            #[must_use]
            pub fn month(&self) -> u32 {
                self.month
            }

            #[must_use]
            pub fn day(&self) -> u32 {
                self.day
            }

            #[must_use]
            pub fn is_yearly(&self) -> bool {
                self.year.is_none()
            }
        }

        impl MonthDay for $name {
            fn month(&self) -> u32 {
                self.month
            }

            fn day(&self) -> u32 {
                self.day
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                match self.year {
                    Some(year) => write!(f, "{:04}/{:02}/{:02}", year, self.month, self.day),
                    None => write!(f, "{:02}/{:02}", self.month, self.day),
                }
            }
        }
    };
}

calendar_date!(
    /// Date in the Solar Hijri calendar.
    PersianDate
);

calendar_date!(
    /// Date in the lunar Hijri calendar.
    IslamicDate
);

calendar_date!(
    /// Date in the Gregorian calendar.
    CivilDate
);
