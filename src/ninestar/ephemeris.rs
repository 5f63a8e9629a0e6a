//! 太陽位置與分至時刻
//!
//! 九星計算只需兩項天文能力：求太陽視黃經，及自某時刻起沿某方向搜尋太陽到達某黃經的時刻。
//! 二者由 [`Ephemeris`] 抽象，本程序自帶低精度太陽理論實現 [`SunModel`]（誤差約 0.01°，
//! 即一刻鐘左右），亦可換用外部曆表。

use std::collections::BTreeMap;

use crate::config::SearchConfig;
use crate::date::Date;
use crate::time_scales::{Tt, Ut};

/// 搜尋方向
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum SearchDirection {
    Forward,
    Backward,
}

impl SearchDirection {
    /// 反方向
    pub fn reversed(self) -> Self {
        match self {
            Self::Forward => Self::Backward,
            Self::Backward => Self::Forward,
        }
    }
    fn sign(self) -> f64 {
        match self {
            Self::Forward => 1.0,
            Self::Backward => -1.0,
        }
    }
}

/// 天文曆表能力。
///
/// 實現者只須保證無副作用；搜尋失敗以 `None` 表示，由調用方決定退路。
pub trait Ephemeris {
    /// 太陽地心視黃經，單位為度，範圍 `[0, 360)`。
    fn sun_longitude(&self, tt: Tt) -> f64;
    /// 自 `start` 起沿 `direction` 搜尋太陽視黃經到達 `target_deg` 的時刻。
    fn search_sun_longitude(
        &self,
        target_deg: f64,
        start: Tt,
        direction: SearchDirection,
    ) -> Option<Tt>;
    /// 取得公元 `year` 年的二分二至時刻表。
    fn seasons(&self, year: i32) -> Seasons;
}

impl<E: Ephemeris + ?Sized> Ephemeris for &E {
    fn sun_longitude(&self, tt: Tt) -> f64 {
        (**self).sun_longitude(tt)
    }
    fn search_sun_longitude(
        &self,
        target_deg: f64,
        start: Tt,
        direction: SearchDirection,
    ) -> Option<Tt> {
        (**self).search_sun_longitude(target_deg, start, direction)
    }
    fn seasons(&self, year: i32) -> Seasons {
        (**self).seasons(year)
    }
}

/// 二分二至時刻表，以欄名索引。
///
/// 不同曆表對同一時刻的欄名各異，取用方須按白名單逐一探查，見
/// [`solstice_date`](super::solar::solstice_date)。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Seasons {
    fields: BTreeMap<String, Tt>,
}

impl Seasons {
    pub fn new() -> Self {
        Self::default()
    }
    /// 加入一欄。
    pub fn with(mut self, name: impl Into<String>, tt: Tt) -> Self {
        self.fields.insert(name.into(), tt);
        self
    }
    pub fn get(&self, name: &str) -> Option<Tt> {
        self.fields.get(name).copied()
    }
    /// 全部欄名，依字典序。
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }
}

/// [`SunModel`] 所填的欄名及其黃經、搜尋起點（月、日，UT 零時）。
const SEASON_FIELDS: [(&str, f64, i32, i32); 4] = [
    ("mar_equinox", 0.0, 3, 15),
    ("jun_solstice", 90.0, 6, 15),
    ("sep_equinox", 180.0, 9, 17),
    ("dec_solstice", 270.0, 12, 16),
];

/// 低精度太陽理論：平黃經、平近點角、中心差，並以月球升交點經度修正章動及光行差。
///
/// 搜尋先按 `step_days` 粗掃，遇真正的過零點後二分求精。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SunModel {
    search: SearchConfig,
}

impl SunModel {
    pub fn new(search: SearchConfig) -> Self {
        Self { search }
    }

    fn offset_from(&self, target_deg: f64, tt: Tt) -> f64 {
        normalize_to_pm180(self.sun_longitude(tt) - target_deg)
    }

    /// 在 `[t_a, t_b]` 內二分求過零點，`f_a` 為 `t_a` 處的值。
    fn bisect(&self, target_deg: f64, mut t_a: f64, mut f_a: f64, mut t_b: f64) -> Tt {
        for _ in 0..self.search.max_iterations {
            if t_b - t_a < self.search.convergence_days {
                break;
            }
            let t_mid = 0.5 * (t_a + t_b);
            let f_mid = self.offset_from(target_deg, Tt(t_mid));
            if f_a * f_mid <= 0.0 {
                t_b = t_mid;
            } else {
                t_a = t_mid;
                f_a = f_mid;
            }
        }
        Tt(0.5 * (t_a + t_b))
    }
}

impl Ephemeris for SunModel {
    fn sun_longitude(&self, tt: Tt) -> f64 {
        let t = tt.centuries();
        let l0 = 280.46646 + 36000.76983 * t + 0.0003032 * t * t;
        let m = (357.52911 + 35999.05029 * t - 0.0001537 * t * t).to_radians();
        let c = (1.914602 - 0.004817 * t - 0.000014 * t * t) * m.sin()
            + (0.019993 - 0.000101 * t) * (2.0 * m).sin()
            + 0.000289 * (3.0 * m).sin();
        let omega = (125.04 - 1934.136 * t).to_radians();
        (l0 + c - 0.00569 - 0.00478 * omega.sin()).rem_euclid(360.0)
    }

    fn search_sun_longitude(
        &self,
        target_deg: f64,
        start: Tt,
        direction: SearchDirection,
    ) -> Option<Tt> {
        let step = direction.sign() * self.search.step_days;
        let max_steps = (self.search.max_scan_days / self.search.step_days).ceil() as usize;

        let mut t_prev = start.0;
        let mut f_prev = self.offset_from(target_deg, start);
        if f_prev == 0.0 {
            return Some(start);
        }
        for _ in 0..max_steps {
            let t_curr = t_prev + step;
            let f_curr = self.offset_from(target_deg, Tt(t_curr));
            if f_curr == 0.0 {
                return Some(Tt(t_curr));
            }
            if is_genuine_crossing(f_prev, f_curr) {
                let (t_a, f_a, t_b) = if t_prev < t_curr {
                    (t_prev, f_prev, t_curr)
                } else {
                    (t_curr, f_curr, t_prev)
                };
                return Some(self.bisect(target_deg, t_a, f_a, t_b));
            }
            t_prev = t_curr;
            f_prev = f_curr;
        }
        None
    }

    fn seasons(&self, year: i32) -> Seasons {
        SEASON_FIELDS
            .iter()
            .filter_map(|&(name, lon, m, d)| {
                let seed = Date::from_gregorian(year, m, d)?;
                let tt = self.search_sun_longitude(
                    lon,
                    Ut::at(seed, 0.0).into(),
                    SearchDirection::Forward,
                )?;
                Some((name, tt))
            })
            .fold(Seasons::new(), |seasons, (name, tt)| seasons.with(name, tt))
    }
}

/// 角度化至 (-180, +180]。
pub(crate) fn normalize_to_pm180(deg: f64) -> f64 {
    let mut d = deg % 360.0;
    if d > 180.0 {
        d -= 360.0;
    } else if d <= -180.0 {
        d += 360.0;
    }
    d
}

/// 前後兩樣本異號且差不足 270° 方為真穿越；自 +180 附近跳至 -180 附近者乃對側折返，不算。
fn is_genuine_crossing(f_a: f64, f_b: f64) -> bool {
    f_a * f_b < 0.0 && (f_a - f_b).abs() < 270.0
}
