//! Deals with the two time scales the solar calculations need: TT, in which
//! the solar theory is evaluated, and UT, from which civil dates are read.
//!
//! Only conversions necessary for other computations in this crate are
//! included. ΔT (TT − UT) is estimated from polynomial fits, which is well
//! within a minute for the years this crate is used for.

use crate::date::Date;

/// [Terrestrial time](https://en.wikipedia.org/wiki/Terrestrial_Time),
/// represented in Julian date (JD).
///
/// Solar positions are computed in this time scale, and should be converted
/// to UT when calculating dates.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Tt(pub f64);

impl Tt {
    /// Julian centuries since J2000.0.
    pub fn centuries(&self) -> f64 {
        (self.0 - 2451545.0) / 36525.0
    }
    /// Shifts the instant by a (possibly fractional) number of days.
    pub fn add_days(self, days: f64) -> Self {
        Tt(self.0 + days)
    }
}

impl From<Ut> for Tt {
    fn from(ut: Ut) -> Tt {
        Tt(ut.0 + delta_t(decimal_year(ut.0)) / 86400.0)
    }
}

/// [Universal time](https://en.wikipedia.org/wiki/Universal_Time), the
/// civil time used for determining the actual date at a given time point,
/// represented in Julian date (JD).
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Ut(pub f64);

impl Ut {
    /// Converts a TT instant into UT.
    ///
    /// # Example
    ///
    /// ```
    /// use kyusei::time_scales::{Tt, Ut};
    /// let ut = Ut::convert(Tt(2451545.0));
    /// assert!(((2451545.0 - ut.0) * 86400.0 - 63.86).abs() < 0.1);
    /// ```
    pub fn convert(tt: Tt) -> Self {
        Ut(tt.0 - delta_t(decimal_year(tt.0)) / 86400.0)
    }
    /// The instant `hour` hours after 00:00 UTC on `date`.
    pub fn at(date: Date, hour: f64) -> Self {
        Ut(date.jdn() as f64 - 0.5 + hour / 24.0)
    }
    /// Returns the date at the time point in timezone ahead (east) of UTC by
    /// `tz_offset_minutes` minutes.
    ///
    /// For Taipei time (UTC+8), `tz_offset_minutes` should be +480.
    ///
    /// # Example
    ///
    /// ```
    /// use kyusei::time_scales::Ut;
    /// let ut = Ut(2451543.25); // 1999-12-30T18:00Z
    /// assert_eq!((1999, 12, 30), ut.date_in_timezone(0).gregorian());
    /// assert_eq!((1999, 12, 31), ut.date_in_timezone(480).gregorian());
    /// ```
    pub fn date_in_timezone(&self, tz_offset_minutes: i32) -> Date {
        let jdn = (self.0 + tz_offset_minutes as f64 / 1440.0).round() as u32;
        Date::from_jdn(jdn)
    }
}

fn decimal_year(jd: f64) -> f64 {
    (jd - 2451544.5) / 365.2425 + 2000.0
}

/// Estimates ΔT = TT − UT in seconds for a decimal year.
///
/// Piecewise polynomials by Espenak & Meeus; outside 1900..2150 the long-term
/// parabola of Morrison & Stephenson.
pub fn delta_t(year: f64) -> f64 {
    let y = year;
    match y {
        y if (1900.0..1920.0).contains(&y) => {
            let t = y - 1900.0;
            -2.79 + 1.494119 * t - 0.0598939 * t.powi(2) + 0.0061966 * t.powi(3)
                - 0.000197 * t.powi(4)
        }
        y if (1920.0..1941.0).contains(&y) => {
            let t = y - 1920.0;
            21.20 + 0.84493 * t - 0.076100 * t.powi(2) + 0.0020936 * t.powi(3)
        }
        y if (1941.0..1961.0).contains(&y) => {
            let t = y - 1950.0;
            29.07 + 0.407 * t - t.powi(2) / 233.0 + t.powi(3) / 2547.0
        }
        y if (1961.0..1986.0).contains(&y) => {
            let t = y - 1975.0;
            45.45 + 1.067 * t - t.powi(2) / 260.0 - t.powi(3) / 718.0
        }
        y if (1986.0..2005.0).contains(&y) => {
            let t = y - 2000.0;
            63.86 + 0.3345 * t - 0.060374 * t.powi(2)
                + 0.0017275 * t.powi(3)
                + 0.000651814 * t.powi(4)
                + 0.00002373599 * t.powi(5)
        }
        y if (2005.0..2050.0).contains(&y) => {
            let t = y - 2000.0;
            62.92 + 0.32217 * t + 0.005589 * t.powi(2)
        }
        y if (2050.0..2150.0).contains(&y) => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u * u - 0.5628 * (2150.0 - y)
        }
        _ => {
            let u = (y - 1820.0) / 100.0;
            -20.0 + 32.0 * u * u
        }
    }
}
