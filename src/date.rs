//! Calendar-independant civil date, and normalization of caller input into it.
//!
//! Every calculation in this crate works on whole days. Instants supplied by
//! the caller are first moved into the reference timezone and truncated to
//! their local date (see [`DateInput`]).

use std::fmt;
use std::ops::{Add, Sub};

use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, NaiveDateTime, TimeZone};
use serde::{Serialize, Serializer};

use crate::error::{Error, Result};

/// A calendar-independant date.
///
/// Supported range begins from January 1, 4713 BC, proleptic Julian calendar.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Date {
    jdn: u32,
}

impl Date {
    /// Creates a `Date` with a Julian day number (JDN).
    pub const fn from_jdn(jdn: u32) -> Self {
        Self { jdn }
    }
    /// Returns the Julian day number (JDN) of the date.
    pub fn jdn(&self) -> u32 {
        self.jdn
    }

    /// Creates a `Date` with a Gregorian calendar date.
    ///
    /// `year` should be an astronomical year number, i.e. 1 BC is `0`, 2
    /// BC is `-1`, etc. `day` may be `0` or exceed the month length; the
    /// result then rolls over into the neighbouring month.
    ///
    /// Returns `None` if the result date is out of supported range.
    ///
    /// # Example
    ///
    /// ```
    /// use kyusei::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!(2451545, date.jdn());
    /// ```
    pub fn from_gregorian(year: i32, month: i32, day: i32) -> Option<Self> {
        let (y, m, d) = (i64::from(year), i64::from(month), i64::from(day));
        let jdn = (1461 * (y + 4800 + (m - 14) / 12)) / 4
            + (367 * (m - 2 - 12 * ((m - 14) / 12))) / 12
            - (3 * ((y + 4900 + (m - 14) / 12) / 100)) / 4
            + d
            - 32075;
        u32::try_from(jdn).map(Self::from_jdn).ok()
    }
    /// Represents the date in Gregorian calendar.
    ///
    /// Returns in `(year, month, day)` format.
    ///
    /// # Example
    ///
    /// ```
    /// use kyusei::Date;
    ///
    /// let date = Date::from_jdn(2451545);
    /// assert_eq!((2000, 1, 1), date.gregorian());
    /// ```
    pub fn gregorian(&self) -> (i32, i32, i32) {
        let jdn = i64::from(self.jdn);
        let f = jdn + 1401 + (((4 * jdn + 274277) / 146097) * 3) / 4 - 38;
        let e = 4 * f + 3;
        let g = (e % 1461) / 4;
        let h = 5 * g + 2;
        let day = (h % 153) / 5 + 1;
        let month = (h / 153 + 2) % 12 + 1;
        let year = e / 1461 - 4716 + (12 + 2 - month) / 12;
        (year as i32, month as i32, day as i32)
    }
    /// Formats the date in ISO 8601 format.
    ///
    /// # Example
    ///
    /// ```
    /// use kyusei::Date;
    ///
    /// let date = Date::from_gregorian(2000, 1, 1).unwrap();
    /// assert_eq!("2000-01-01", date.iso_gregorian());
    /// ```
    pub fn iso_gregorian(&self) -> String {
        let (y, m, d) = self.gregorian();
        format!("{:04}-{:02}-{:02}", y, m, d)
    }

    /// Returns the Chinese sexagenary day number of the date, numbered from 1
    /// (甲子) to 60 (癸亥).
    ///
    /// # Example
    ///
    /// ```
    /// use kyusei::Date;
    ///
    /// let date = Date::from_gregorian(1984, 1, 31).unwrap();
    /// assert_eq!(1, date.sexagenary()); // 甲子
    /// ```
    pub fn sexagenary(&self) -> i32 {
        ((self.jdn + 49) % 60 + 1) as i32
    }

    /// Converts a `chrono` calendar date.
    pub fn from_naive(date: NaiveDate) -> Result<Self> {
        Self::from_gregorian(date.year(), date.month() as i32, date.day() as i32)
            .ok_or_else(|| Error::InvalidDateInput(date.to_string()))
    }
    /// Converts into a `chrono` calendar date, `None` outside chrono's range.
    pub fn to_naive(&self) -> Option<NaiveDate> {
        let (y, m, d) = self.gregorian();
        NaiveDate::from_ymd_opt(y, m as u32, d as u32)
    }
}

impl Add<i32> for Date {
    type Output = Date;
    fn add(self, rhs: i32) -> Self::Output {
        Date::from_jdn(if rhs >= 0 {
            self.jdn + rhs as u32
        } else {
            self.jdn - rhs.wrapping_neg() as u32
        })
    }
}
impl Sub<i32> for Date {
    type Output = Date;
    fn sub(self, rhs: i32) -> Self::Output {
        self + rhs.wrapping_neg()
    }
}
impl Sub<Date> for Date {
    type Output = i32;
    fn sub(self, rhs: Date) -> Self::Output {
        self.jdn as i32 - rhs.jdn as i32
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.iso_gregorian())
    }
}

impl Serialize for Date {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.iso_gregorian())
    }
}

/// Milliseconds since the Unix epoch, as produced by most clocks.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct EpochMillis(pub i64);

/// Anything that names a civil date once placed in a reference timezone.
///
/// Inputs that carry no zone of their own (plain dates, naive date-times)
/// are taken to be already local to `zone`.
///
/// `zone` is a fixed offset. Daylight saving time is not modelled: the
/// default Asia/Taipei zone observed DST in 1945–1961, 1974–1975 and 1979,
/// and instants from those summers that fall within an hour of local
/// midnight resolve to the standard-time date.
///
/// # Example
///
/// ```
/// use chrono::FixedOffset;
/// use kyusei::{Date, DateInput, EpochMillis};
///
/// let taipei = FixedOffset::east_opt(8 * 3600).unwrap();
/// let a = "2025-06-24".civil_date(&taipei).unwrap();
/// let b = "2025-06-23T16:00:00Z".civil_date(&taipei).unwrap();
/// let c = EpochMillis(1_750_694_400_000).civil_date(&taipei).unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a, c);
/// assert_eq!(Date::from_gregorian(2025, 6, 24), Some(a));
/// ```
pub trait DateInput {
    fn civil_date(&self, zone: &FixedOffset) -> Result<Date>;
}

const NAIVE_DATE_TIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

impl DateInput for str {
    fn civil_date(&self, zone: &FixedOffset) -> Result<Date> {
        let s = self.trim();
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            return Date::from_naive(date);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.civil_date(zone);
        }
        NAIVE_DATE_TIME_FORMATS
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .ok_or_else(|| Error::InvalidDateInput(s.to_owned()))
            .and_then(|dt| Date::from_naive(dt.date()))
    }
}

impl DateInput for String {
    fn civil_date(&self, zone: &FixedOffset) -> Result<Date> {
        self.as_str().civil_date(zone)
    }
}

impl<T: DateInput + ?Sized> DateInput for &T {
    fn civil_date(&self, zone: &FixedOffset) -> Result<Date> {
        (**self).civil_date(zone)
    }
}

impl DateInput for Date {
    fn civil_date(&self, _zone: &FixedOffset) -> Result<Date> {
        Ok(*self)
    }
}

impl DateInput for NaiveDate {
    fn civil_date(&self, _zone: &FixedOffset) -> Result<Date> {
        Date::from_naive(*self)
    }
}

impl<Tz: TimeZone> DateInput for DateTime<Tz> {
    fn civil_date(&self, zone: &FixedOffset) -> Result<Date> {
        Date::from_naive(self.with_timezone(zone).date_naive())
    }
}

impl DateInput for EpochMillis {
    fn civil_date(&self, zone: &FixedOffset) -> Result<Date> {
        DateTime::from_timestamp_millis(self.0)
            .ok_or_else(|| Error::InvalidDateInput(format!("{} ms since epoch", self.0)))?
            .civil_date(zone)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn taipei() -> FixedOffset {
        FixedOffset::east_opt(480 * 60).unwrap()
    }

    #[test]
    fn it_works() {
        let date = Date::from_jdn(2440588);
        assert_eq!(2440588, date.jdn());
    }

    #[test]
    fn from_gregorian() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(2440588, date.jdn());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(2459466, date.jdn());
        let date = Date::from_gregorian(2025, 1, 0).unwrap();
        assert_eq!("2024-12-31", date.iso_gregorian());
    }

    #[test]
    fn to_gregorian() {
        let date = Date::from_jdn(2440588);
        assert_eq!((1970, 1, 1), date.gregorian());
        let date = Date::from_jdn(2459466);
        assert_eq!((2021, 9, 8), date.gregorian());
        let date = Date::from_jdn(2451545);
        assert_eq!((2000, 1, 1), date.gregorian());
    }

    #[test]
    fn to_sexagenary() {
        let date = Date::from_gregorian(1970, 1, 1).unwrap();
        assert_eq!(18, date.sexagenary());
        let date = Date::from_gregorian(2021, 9, 8).unwrap();
        assert_eq!(56, date.sexagenary());
    }

    #[test]
    fn arithmetic() {
        let date = Date::from_gregorian(2024, 2, 28).unwrap();
        assert_eq!("2024-03-01", (date + 2).iso_gregorian());
        assert_eq!("2024-02-26", (date - 2).iso_gregorian());
        assert_eq!("2024-02-26", (date + -2).iso_gregorian());
        assert_eq!(-2, (date - 2) - date);
    }

    #[test]
    fn iso_format() {
        assert_eq!(
            "2021-09-08",
            Date::from_gregorian(2021, 9, 8).unwrap().iso_gregorian()
        );
        assert_eq!("2021-09-08", Date::from_gregorian(2021, 9, 8).unwrap().to_string());
    }

    #[test]
    fn parse_inputs() {
        let tz = taipei();
        let std = Date::from_gregorian(2025, 2, 26).unwrap();
        for input in [
            "2025-02-26",
            " 2025-02-26 ",
            "2025-02-26T23:59:59",
            "2025-02-26 08:30",
            "2025-02-26T00:00:00+08:00",
            "2025-02-25T16:00:00Z",
            "2025-02-26T15:59:59.999Z",
        ] {
            assert_eq!(Ok(std), input.civil_date(&tz), "{input}");
        }
        assert_eq!(
            Ok(Date::from_gregorian(2025, 2, 27).unwrap()),
            "2025-02-26T16:00:00Z".civil_date(&tz)
        );
    }

    #[test]
    fn invalid_inputs() {
        let tz = taipei();
        for input in ["invalid-date", "", "2025-02-30", "2025-13-01"] {
            assert!(
                matches!(input.civil_date(&tz), Err(Error::InvalidDateInput(_))),
                "{input}"
            );
        }
        assert!(EpochMillis(i64::MAX).civil_date(&tz).is_err());
    }

    #[test]
    fn fixed_offset_ignores_historical_dst() {
        let tz = taipei();
        // 00:30 on 1979-07-02 by the DST clock, still 07-01 at +08:00
        assert_eq!(
            "1979-07-01",
            "1979-07-01T15:30:00Z".civil_date(&tz).unwrap().iso_gregorian()
        );
        let millis = chrono::Utc
            .with_ymd_and_hms(1979, 7, 1, 15, 30, 0)
            .unwrap()
            .timestamp_millis();
        assert_eq!(
            "1979-07-01",
            EpochMillis(millis).civil_date(&tz).unwrap().iso_gregorian()
        );
    }

    #[test]
    fn zoned_inputs() {
        let tz = taipei();
        let utc = chrono::Utc.with_ymd_and_hms(2025, 6, 23, 16, 0, 0).unwrap();
        assert_eq!("2025-06-24", utc.civil_date(&tz).unwrap().iso_gregorian());
        assert_eq!(
            "2025-06-24",
            EpochMillis(utc.timestamp_millis())
                .civil_date(&tz)
                .unwrap()
                .iso_gregorian()
        );
        let naive = NaiveDate::from_ymd_opt(2025, 6, 24).unwrap();
        assert_eq!(Date::from_naive(naive), naive.civil_date(&tz));
        assert_eq!(Some(naive), Date::from_naive(naive).unwrap().to_naive());
    }
}
