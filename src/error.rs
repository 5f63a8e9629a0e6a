//! Error types shared by the whole crate.

use thiserror::Error;

use crate::ninestar::solar::Season;

/// Errors raised while computing a chart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// A cyclic lookup was attempted on a zero-length sequence.
    #[error("sequence cannot be empty")]
    EmptyCollection,

    /// The rotation target does not occur in the sequence.
    #[error("element '{0}' not found in sequence")]
    ElementNotFound(String),

    /// No Jia-Zi day within the search radius. Radii below 30 days leave
    /// gaps, and the default of 14 hits them for many years; radii of at
    /// least 30 days never fail.
    #[error("no Jia-Zi day found within ±{radius} days of {target}")]
    AnchorSearchExhausted { target: String, radius: u32 },

    /// The date input could not be parsed or lies outside the supported range.
    #[error("invalid date input: {0}")]
    InvalidDateInput(String),

    /// The ephemeris season table has none of the expected field names.
    #[error("season table for {year} has no {season} solstice field (probed {probed:?})")]
    EphemerisFieldMissing {
        year: i32,
        season: Season,
        probed: &'static [&'static str],
    },

    /// A ring must hold exactly nine symbols.
    #[error("ring must contain 9 elements, got {0}")]
    InvalidRingLength(usize),

    /// Solar terms are numbered `0..24`.
    #[error("solar term order {0} not in 0..24")]
    InvalidSolarTerm(u32),
}

/// Shorthand for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
