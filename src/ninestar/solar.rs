//! 二至日與節氣日
//!
//! 所有時刻皆換算為參考時區的民用日期，時區以東經分鐘數 `tz_offset_minutes` 給出。

use std::fmt;

use serde::Serialize;
use tracing::{debug, warn};

use super::ephemeris::{Ephemeris, SearchDirection};
use super::fmt as ninestar_fmt;
use crate::date::Date;
use crate::error::{Error, Result};
use crate::time_scales::{Tt, Ut};

/// 冬至或夏至
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Season {
    /// 冬至，十二月
    Winter,
    /// 夏至，六月
    Summer,
}

/// 冬至欄名白名單，依序探查。
pub const WINTER_SOLSTICE_FIELDS: &[&str] = &["DecSol", "dec_solstice", "DecSolstice", "decSolstice"];
/// 夏至欄名白名單，依序探查。
pub const SUMMER_SOLSTICE_FIELDS: &[&str] = &["JunSol", "jun_solstice", "JunSolstice", "junSolstice"];

impl Season {
    pub fn fields(self) -> &'static [&'static str] {
        match self {
            Self::Winter => WINTER_SOLSTICE_FIELDS,
            Self::Summer => SUMMER_SOLSTICE_FIELDS,
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Winter => "winter",
            Self::Summer => "summer",
        })
    }
}

/// 取得公元 `year` 年冬至（十二月）或夏至（六月）所在日期。
///
/// 若曆表的分至表中白名單欄名皆缺，回報 [`Error::EphemerisFieldMissing`]。
pub fn solstice_date<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    year: i32,
    season: Season,
    tz_offset_minutes: i32,
) -> Result<Date> {
    let seasons = ephemeris.seasons(year);
    let probed = season.fields();
    let tt = probed
        .iter()
        .find_map(|name| seasons.get(name))
        .ok_or(Error::EphemerisFieldMissing {
            year,
            season,
            probed,
        })?;
    let date = Ut::convert(tt).date_in_timezone(tz_offset_minutes);
    debug!(year, %season, %date, "solstice located");
    Ok(date)
}

/// 各節氣平均日期（月、日）再提前 [`SEED_MARGIN_DAYS`] 日，序號同 [`fmt::solar_term`](ninestar_fmt::solar_term)。
///
/// 冬至取本年十二月；日為 0 表示上月末日。
const TERM_SEEDS: [(i32, i32); 24] = [
    (12, 16),
    (1, 0),
    (1, 13),
    (1, 29),
    (2, 14),
    (3, 0),
    (3, 15),
    (4, 0),
    (4, 15),
    (5, 0),
    (5, 15),
    (5, 31),
    (6, 16),
    (7, 1),
    (7, 17),
    (8, 2),
    (8, 18),
    (9, 3),
    (9, 18),
    (10, 3),
    (10, 18),
    (11, 3),
    (11, 18),
    (12, 3),
];

pub const SEED_MARGIN_DAYS: i32 = 5;

/// 節氣日期的求法
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Resolution {
    /// 按黃經差較短一側搜得
    Precise,
    /// 首選方向落空，反方向搜得
    Reciprocal,
    /// 兩向皆落空，取起點近似日期
    Approximate,
}

/// 節氣信息
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct SolarTerm {
    /// 序號，`0..24`，0 為冬至
    pub order: u32,
    pub name: &'static str,
    /// 太陽視黃經，度
    pub longitude: u32,
    pub date: Date,
    pub resolution: Resolution,
}

/// 節氣 `order` 的目標黃經：冬至 270°，此後每節氣增 15°。
pub fn term_longitude(order: u32) -> u32 {
    (order * 15 + 270) % 360
}

/// 求公元 `year` 年第 `order` 個節氣（0 為該年十二月冬至）所在日期。
///
/// 起點取平均日期正午（UTC），按太陽黃經與目標之差決定搜尋方向，差值在 180° 內則向未來搜，否則向過去搜。
/// 若搜不到則反向再搜一次；仍無結果則退回起點日期。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::ephemeris::SunModel;
/// use kyusei::ninestar::solar::{solar_term, Resolution};
///
/// let term = solar_term(&SunModel::default(), 2025, 3, 480).unwrap();
/// assert_eq!("立春", term.name);
/// assert_eq!("2025-02-03", term.date.iso_gregorian());
/// assert_eq!(Resolution::Precise, term.resolution);
/// ```
pub fn solar_term<E: Ephemeris + ?Sized>(
    ephemeris: &E,
    year: i32,
    order: u32,
    tz_offset_minutes: i32,
) -> Result<SolarTerm> {
    let &(m, d) = TERM_SEEDS
        .get(order as usize)
        .ok_or(Error::InvalidSolarTerm(order))?;
    let approx = Date::from_gregorian(year, m, d + SEED_MARGIN_DAYS)
        .ok_or_else(|| Error::InvalidDateInput(format!("year {year}")))?;
    let seed_ut = Ut::at(approx, 12.0);
    let seed = Tt::from(seed_ut);

    let longitude = term_longitude(order);
    let target = f64::from(longitude);
    let lon0 = ephemeris.sun_longitude(seed);
    let direction = if (target - lon0 + 360.0).rem_euclid(360.0) < 180.0 {
        SearchDirection::Forward
    } else {
        SearchDirection::Backward
    };

    let name = ninestar_fmt::solar_term(order);
    let (hit, resolution) = match ephemeris.search_sun_longitude(target, seed, direction) {
        Some(tt) => (Some(tt), Resolution::Precise),
        None => {
            warn!(year, term = name, ?direction, "sun longitude search failed, retrying reversed");
            match ephemeris.search_sun_longitude(target, seed, direction.reversed()) {
                Some(tt) => (Some(tt), Resolution::Reciprocal),
                None => {
                    warn!(year, term = name, "sun longitude search failed both ways, using approximate date");
                    (None, Resolution::Approximate)
                }
            }
        }
    };
    let date = match hit {
        Some(tt) => Ut::convert(tt).date_in_timezone(tz_offset_minutes),
        None => seed_ut.date_in_timezone(tz_offset_minutes),
    };
    debug!(year, term = name, %date, ?resolution, "solar term located");

    Ok(SolarTerm {
        order,
        name,
        longitude,
        date,
        resolution,
    })
}
