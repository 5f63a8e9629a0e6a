//! Nine-Star-Ki (九星気学)
//!
//! Note: 為方便處理諸多術語，本模塊文檔用中文。
//!
//! 由日期推算年、月、日三個中宮星，展開為三張九宮盤，再逐宫比較三盤的五行。
//! 入口為 [`NineStarKi`]，其中的日星需要冬至、夏至時刻，由 [`ephemeris`] 提供。

use chrono::FixedOffset;
use serde::Serialize;
use tracing::debug;

use crate::config::{Config, ConfigError};
use crate::date::{Date, DateInput};
use crate::error::Result;

pub mod ephemeris;
pub mod fmt;
pub mod jiazi;
pub mod ring;
pub mod solar;
pub mod stars;
pub mod wuxing;

use ephemeris::{Ephemeris, SunModel};
use ring::{Ring, ring_for};
use solar::{Season, SolarTerm};
use stars::{DayStar, Star};
use wuxing::Comparison;

/// 年、月、日三個中宮星
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Stars {
    pub year: Star,
    pub month: Star,
    pub day: Star,
}

/// 年盤、月盤、日盤
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct Rings {
    pub year: Ring,
    pub month: Ring,
    pub day: Ring,
}

/// 一日的完整命盤
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct Chart {
    pub date: Date,
    /// 參考時區名
    pub zone: String,
    pub stars: Stars,
    pub day: DayStar,
    pub rings: Rings,
    /// 各宫位日、月、年三星五行的比較，順序同 [`ring::Direction::ALL`]
    pub comparison: [Comparison; 9],
}

/// 九星推算器。
///
/// 持有配置及曆表，本身無可變狀態；所有輸入先按配置的參考時區化為民用日期。
///
/// # 用例
///
/// ```
/// use kyusei::{Config, NineStarKi};
///
/// let ki = NineStarKi::new(Config::default()).unwrap();
/// let day = ki.daily_nine_star("2025-02-26").unwrap();
/// assert_eq!("九紫火星", day.name);
/// assert_eq!("2024-12-26", day.reference_jia_zi.iso_gregorian());
///
/// let chart = ki.chart("2025-02-26").unwrap();
/// assert_eq!(2, chart.stars.year.get());
/// ```
#[derive(Debug, Clone)]
pub struct NineStarKi<E = SunModel> {
    config: Config,
    zone: FixedOffset,
    ephemeris: E,
}

impl NineStarKi<SunModel> {
    /// 以自帶的低精度太陽理論為曆表。
    pub fn new(config: Config) -> std::result::Result<Self, ConfigError> {
        let ephemeris = SunModel::new(config.search.clone());
        Self::with_ephemeris(config, ephemeris)
    }
}

impl<E: Ephemeris> NineStarKi<E> {
    /// 以外部曆表構造。配置須先通過校驗。
    pub fn with_ephemeris(config: Config, ephemeris: E) -> std::result::Result<Self, ConfigError> {
        config.validate()?;
        let zone = config
            .timezone
            .offset()
            .ok_or_else(|| ConfigError::InvalidValue {
                field: "timezone.offset_minutes".to_owned(),
                reason: format!("{} is out of range", config.timezone.offset_minutes),
            })?;
        Ok(Self {
            config,
            zone,
            ephemeris,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
    pub fn zone(&self) -> FixedOffset {
        self.zone
    }
    pub fn ephemeris(&self) -> &E {
        &self.ephemeris
    }

    fn tz_offset_minutes(&self) -> i32 {
        self.config.timezone.offset_minutes
    }

    /// 化為參考時區的民用日期。
    pub fn civil_date(&self, input: impl DateInput) -> Result<Date> {
        input.civil_date(&self.zone)
    }

    /// 年中宮星，見 [`stars::year_star`]。
    pub fn year_star(&self, input: impl DateInput) -> Result<Star> {
        Ok(stars::year_star(self.civil_date(input)?))
    }

    /// 月中宮星，見 [`stars::month_star`]。
    pub fn month_star(&self, input: impl DateInput) -> Result<Star> {
        Ok(stars::month_star(self.civil_date(input)?))
    }

    /// 公元 `year` 年冬至或夏至所在日期。
    pub fn solstice_date(&self, year: i32, season: Season) -> Result<Date> {
        solar::solstice_date(&self.ephemeris, year, season, self.tz_offset_minutes())
    }

    /// 距公元 `year` 年冬至或夏至最近的甲子日。
    pub fn solstice_anchor(&self, year: i32, season: Season) -> Result<Date> {
        let solstice = self.solstice_date(year, season)?;
        let anchor = jiazi::nearest_jia_zi(solstice, self.config.jiazi.radius_days)?;
        debug!(year, %season, %solstice, %anchor, "solstice anchor selected");
        Ok(anchor)
    }

    /// 日中宮星。
    ///
    /// 冬至甲子日：一至六月取上年冬至，其餘取本年冬至；夏至甲子日取本年夏至。
    /// 二者之間為陽遁，否則為陰遁，見 [`stars::day_star_from_anchors`]。
    pub fn daily_nine_star(&self, input: impl DateInput) -> Result<DayStar> {
        let date = self.civil_date(input)?;
        let winter = self.solstice_anchor(stars::winter_solstice_year(date), Season::Winter)?;
        let summer = self.solstice_anchor(date.gregorian().0, Season::Summer)?;
        let day = stars::day_star_from_anchors(date, winter, summer);
        debug!(
            %date,
            star = day.star.get(),
            half_year = %day.half_year,
            reference = %day.reference_jia_zi,
            delta = day.delta,
            "day star computed"
        );
        Ok(day)
    }

    /// 年、月、日三星。
    pub fn stars(&self, input: impl DateInput) -> Result<Stars> {
        let date = self.civil_date(input)?;
        Ok(Stars {
            year: stars::year_star(date),
            month: stars::month_star(date),
            day: self.daily_nine_star(date)?.star,
        })
    }

    /// 完整命盤：三星、三盤及逐宫比較。
    pub fn chart(&self, input: impl DateInput) -> Result<Chart> {
        let date = self.civil_date(input)?;
        let day = self.daily_nine_star(date)?;
        let stars = Stars {
            year: stars::year_star(date),
            month: stars::month_star(date),
            day: day.star,
        };
        let rings = Rings {
            year: ring_for(stars.year),
            month: ring_for(stars.month),
            day: ring_for(stars.day),
        };
        let comparison = wuxing::compare_rings(&rings.day, &rings.month, &rings.year);
        Ok(Chart {
            date,
            zone: self.config.timezone.name.clone(),
            stars,
            day,
            rings,
            comparison,
        })
    }

    /// 公元 `year` 年第 `order` 個節氣，見 [`solar::solar_term`]。
    pub fn solar_term(&self, year: i32, order: u32) -> Result<SolarTerm> {
        solar::solar_term(&self.ephemeris, year, order, self.tz_offset_minutes())
    }

    pub fn solar_term_date(&self, year: i32, order: u32) -> Result<Date> {
        Ok(self.solar_term(year, order)?.date)
    }

    /// 立春所在日期。
    ///
    /// # 用例
    ///
    /// ```
    /// use kyusei::{Config, NineStarKi};
    ///
    /// let ki = NineStarKi::new(Config::default()).unwrap();
    /// assert_eq!("2024-02-04", ki.risshun_date(2024).unwrap().iso_gregorian());
    /// ```
    pub fn risshun_date(&self, year: i32) -> Result<Date> {
        self.solar_term_date(year, 3)
    }

    /// 公元 `year` 年的十二個「節」（小寒、立春……大雪），即真正的月界。
    pub fn month_boundaries(&self, year: i32) -> Result<Vec<SolarTerm>> {
        (1..24)
            .step_by(2)
            .map(|order| self.solar_term(year, order))
            .collect()
    }
}
