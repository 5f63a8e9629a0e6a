//! Nine-Star-Ki (九星気学) charts for a civil date.
//!
//! For every date this crate computes the year, month and day central stars,
//! expands each into its nine-palace ring, and compares the three rings
//! position by position under the Five Elements. The day star is anchored
//! to the Jia-Zi days nearest the solstices, which are located with a
//! built-in low-accuracy solar theory or any other [`Ephemeris`].
//!
//! # Examples
//!
//! Basic usage with [`NineStarKi`]:
//!
//! ```
//! use kyusei::{Config, NineStarKi};
//!
//! let ki = NineStarKi::new(Config::default()).unwrap();
//! let chart = ki.chart("2025-02-26").unwrap();
//!
//! assert_eq!(2, chart.stars.year.get());
//! assert_eq!("九紫火星", chart.day.name);
//! assert_eq!("六八四三七五九一二", chart.rings.year.to_string());
//! ```
//!
//! Inputs may be anything implementing [`DateInput`]; they are first moved
//! into the configured reference timezone (Asia/Taipei by default):
//!
//! ```
//! use kyusei::{Config, EpochMillis, NineStarKi};
//!
//! let ki = NineStarKi::new(Config::default()).unwrap();
//! let a = ki.daily_nine_star("2025-06-24").unwrap();
//! let b = ki.daily_nine_star(EpochMillis(1_750_694_400_000)).unwrap();
//! assert_eq!(a, b);
//! ```

pub mod circular;
pub mod config;
pub mod date;
pub mod error;
pub mod ninestar;
pub mod time_scales;

pub use config::{Config, ConfigError};
pub use date::{Date, DateInput, EpochMillis};
pub use error::{Error, Result};
pub use ninestar::ephemeris::{Ephemeris, SunModel};
pub use ninestar::ring::{Direction, Ring};
pub use ninestar::stars::{DayStar, HalfYear, Star};
pub use ninestar::wuxing::{Comparison, Element};
pub use ninestar::{Chart, NineStarKi, Stars};
