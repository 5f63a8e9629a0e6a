//! 九星數與年、月、日中宮星
//!
//! 年星、月星以固定曆元按模九推算；日星以冬至、夏至附近的甲子日為起點，
//! 陽遁順行、陰遁逆行。

use std::fmt;

use serde::Serialize;

use super::fmt as ninestar_fmt;
use crate::date::Date;

/// 以 1 至 9 表示的模九：餘數 0 記為 9。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::stars::mod9;
///
/// assert_eq!(9, mod9(0));
/// assert_eq!(8, mod9(-1));
/// assert_eq!(2, mod9(11));
/// ```
pub fn mod9(n: i64) -> u8 {
    match n.rem_euclid(9) as u8 {
        0 => 9,
        r => r,
    }
}

/// 九星之一，值恆在 `1..=9` 間。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(transparent)]
pub struct Star(u8);

impl Star {
    /// 一白至九紫
    pub const ALL: [Star; 9] = [
        Star(1),
        Star(2),
        Star(3),
        Star(4),
        Star(5),
        Star(6),
        Star(7),
        Star(8),
        Star(9),
    ];

    /// `num` 不在 `1..=9` 間則返回 `None`。
    pub fn new(num: u8) -> Option<Self> {
        (1..=9).contains(&num).then_some(Self(num))
    }
    /// 按 [`mod9`] 折入 `1..=9`。
    pub fn wrap(n: i64) -> Self {
        Self(mod9(n))
    }
    pub fn get(self) -> u8 {
        self.0
    }
    /// 如「九紫火星」。
    pub fn name(self) -> &'static str {
        ninestar_fmt::star_name(self.0)
    }
    /// 漢數字，如「九」。
    pub fn numeral(self) -> char {
        ninestar_fmt::NUM_CHINESE[self.0 as usize]
    }
    pub fn from_numeral(c: char) -> Option<Self> {
        ninestar_fmt::numeral_value(c).map(Self)
    }
}

impl fmt::Display for Star {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// 年星：以 2 月 4 日為歲首（近似立春），`11 - 年 mod 9`。
///
/// # 用例
///
/// ```
/// use kyusei::Date;
/// use kyusei::ninestar::stars::year_star;
///
/// let date = Date::from_gregorian(2025, 2, 4).unwrap();
/// assert_eq!("二黒土星", year_star(date).name());
/// assert_eq!(3, year_star(date - 1).get());
/// ```
pub fn year_star(date: Date) -> Star {
    let (y, m, d) = date.gregorian();
    let base = if (m, d) >= (2, 4) { y } else { y - 1 };
    Star::wrap(11 - i64::from(base).rem_euclid(9))
}

/// 月星曆元 2023-02-04，是月八白。
pub const MONTH_EPOCH: Date = Date::from_jdn(2459980);
const MONTH_EPOCH_STAR: i64 = 8;
/// 平均月長，日
pub const MEAN_MONTH_DAYS: f64 = 30.436875;

/// 月星：自 [`MONTH_EPOCH`] 起按平均月長計已過整月數，每月退一。
///
/// 此為近似，月界與真正的節不盡相合，見 [`NineStarKi::month_boundaries`](super::NineStarKi::month_boundaries)。
pub fn month_star(date: Date) -> Star {
    let elapsed = (f64::from(date - MONTH_EPOCH) / MEAN_MONTH_DAYS).floor() as i64;
    Star::wrap(MONTH_EPOCH_STAR - elapsed)
}

/// 陽遁或陰遁
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HalfYear {
    /// 冬至後甲子起，日星順行
    Yang,
    /// 夏至後甲子起，日星逆行
    Yin,
}

impl fmt::Display for HalfYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Yang => "yang",
            Self::Yin => "yin",
        })
    }
}

/// 日星及其推算依據
#[derive(Debug, Clone, Eq, PartialEq, Serialize)]
pub struct DayStar {
    pub date: Date,
    pub star: Star,
    pub name: &'static str,
    pub half_year: HalfYear,
    /// 起算的甲子日
    pub reference_jia_zi: Date,
    /// `date` 距起算甲子日的日數
    pub delta: i32,
}

/// 日星所用冬至的年份：一至六月取上年冬至，七月起取本年。
pub fn winter_solstice_year(date: Date) -> i32 {
    let (y, m, _) = date.gregorian();
    if m < 7 { y - 1 } else { y }
}

/// 由冬至、夏至甲子日推算 `date` 的日星。
///
/// `winter <= date < summer` 為陽遁，自 `winter` 起順數；否則為陰遁，自 `summer` 起逆數。
/// 七月以後所給的冬至甲子日在 `date` 之後，恆為陰遁。
///
/// # 用例
///
/// ```
/// use kyusei::Date;
/// use kyusei::ninestar::stars::{day_star_from_anchors, HalfYear};
///
/// let winter = Date::from_gregorian(2024, 12, 26).unwrap();
/// let summer = Date::from_gregorian(2025, 6, 24).unwrap();
/// let day = day_star_from_anchors(Date::from_gregorian(2025, 2, 26).unwrap(), winter, summer);
/// assert_eq!((HalfYear::Yang, 62, 9), (day.half_year, day.delta, day.star.get()));
/// ```
pub fn day_star_from_anchors(date: Date, winter: Date, summer: Date) -> DayStar {
    let half_year = if winter <= date && date < summer {
        HalfYear::Yang
    } else {
        HalfYear::Yin
    };
    let reference_jia_zi = match half_year {
        HalfYear::Yang => winter,
        HalfYear::Yin => summer,
    };
    let delta = date - reference_jia_zi;
    let m = i64::from(delta).rem_euclid(9);
    let star = match half_year {
        HalfYear::Yang => Star::wrap(1 + m),
        HalfYear::Yin => Star::wrap(9 - m),
    };
    DayStar {
        date,
        star,
        name: star.name(),
        half_year,
        reference_jia_zi,
        delta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ymd(y: i32, m: i32, d: i32) -> Date {
        Date::from_gregorian(y, m, d).unwrap()
    }

    #[test]
    fn mod9_never_zero() {
        for n in -100..100 {
            let r = mod9(n);
            assert!((1..=9).contains(&r), "{n}");
            assert_eq!(0, (i64::from(r) - n).rem_euclid(9), "{n}");
        }
    }

    #[test]
    fn star_values() {
        assert_eq!(None, Star::new(0));
        assert_eq!(None, Star::new(10));
        for (i, star) in Star::ALL.into_iter().enumerate() {
            assert_eq!(i as u8 + 1, star.get());
            assert_eq!(Some(star), Star::new(star.get()));
            assert_eq!(Some(star), Star::from_numeral(star.numeral()));
            assert_eq!(star, Star::wrap(i64::from(star.get()) + 9 * 7));
        }
        assert_eq!("五黄土星", Star::wrap(5).to_string());
        assert_eq!("5", serde_json::to_string(&Star::wrap(5)).unwrap());
    }

    #[rstest]
    #[case::risshun_2025(ymd(2025, 2, 4), 2)]
    #[case::eve_of_2025(ymd(2025, 2, 3), 3)]
    #[case::new_year_2025(ymd(2025, 1, 1), 3)]
    #[case::late_2025(ymd(2025, 12, 31), 2)]
    #[case::mid_2024(ymd(2024, 6, 1), 3)]
    #[case::mid_2023(ymd(2023, 6, 1), 4)]
    #[case::mid_2026(ymd(2026, 6, 1), 1)]
    #[case::mid_2027(ymd(2027, 6, 1), 9)]
    #[case::mid_2000(ymd(2000, 6, 1), 9)]
    fn year_stars(#[case] date: Date, #[case] std: u8) {
        assert_eq!(std, year_star(date).get());
    }

    #[test]
    fn year_star_descends() {
        for year in 1950..2050 {
            let this = year_star(ymd(year, 3, 1)).get();
            let next = year_star(ymd(year + 1, 3, 1)).get();
            assert_eq!(mod9(i64::from(this) - 1), next, "{year}");
        }
    }

    #[test]
    fn month_stars() {
        assert_eq!((2023, 2, 4), MONTH_EPOCH.gregorian());
        for (std, date) in [
            (8, ymd(2023, 2, 4)),
            (8, ymd(2023, 3, 6)),
            (7, ymd(2023, 3, 10)),
            (9, ymd(2023, 2, 3)),
            (1, ymd(2023, 1, 1)),
            (6, ymd(2023, 4, 10)),
            (5, ymd(2024, 2, 10)),
        ] {
            assert_eq!(std, month_star(date).get(), "{date}");
        }
    }

    #[test]
    fn winter_year() {
        for (std, date) in [
            (2024, ymd(2025, 1, 1)),
            (2024, ymd(2025, 6, 30)),
            (2025, ymd(2025, 7, 1)),
            (2025, ymd(2025, 12, 31)),
        ] {
            assert_eq!(std, winter_solstice_year(date), "{date}");
        }
    }

    #[test]
    fn day_stars() {
        let winter = ymd(2024, 12, 26);
        let summer = ymd(2025, 6, 24);
        for (date, half_year, delta, std) in [
            (ymd(2024, 12, 26), HalfYear::Yang, 0, 1),
            (ymd(2025, 1, 1), HalfYear::Yang, 6, 7),
            (ymd(2025, 2, 26), HalfYear::Yang, 62, 9),
            (ymd(2025, 6, 23), HalfYear::Yang, 179, 9),
            (ymd(2025, 6, 24), HalfYear::Yin, 0, 9),
            (ymd(2025, 7, 15), HalfYear::Yin, 21, 6),
            (ymd(2024, 12, 25), HalfYear::Yin, -181, 1),
        ] {
            let day = day_star_from_anchors(date, winter, summer);
            assert_eq!(half_year, day.half_year, "{date}");
            assert_eq!(delta, day.delta, "{date}");
            assert_eq!(std, day.star.get(), "{date}");
            assert_eq!(day.star.name(), day.name);
            let reference = if half_year == HalfYear::Yang { winter } else { summer };
            assert_eq!(reference, day.reference_jia_zi);
        }
    }

    #[test]
    fn day_star_json() {
        let day = day_star_from_anchors(ymd(2025, 2, 26), ymd(2024, 12, 26), ymd(2025, 6, 24));
        assert_eq!(
            r#"{"date":"2025-02-26","star":9,"name":"九紫火星","half_year":"yang","reference_jia_zi":"2024-12-26","delta":62}"#,
            serde_json::to_string(&day).unwrap()
        );
    }
}
