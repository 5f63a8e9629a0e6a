//! 甲子日
//!
//! 以 1984 年 1 月 31 日（甲子）為基準，與之相差 60 日倍數者皆為甲子日。

use tracing::trace;

use crate::date::Date;
use crate::error::{Error, Result};

/// 基準甲子日，1984-01-31。
pub const BASE_JIA_ZI: Date = Date::from_jdn(2445731);

/// 甲子週期
pub const CYCLE_DAYS: i32 = 60;

/// `date` 與基準甲子日相差的日數，早於基準則為負。
pub fn days_from_base(date: Date) -> i32 {
    date - BASE_JIA_ZI
}

/// 判斷 `date` 是否為甲子日。
///
/// # 用例
///
/// ```
/// use kyusei::Date;
/// use kyusei::ninestar::jiazi;
///
/// assert!(jiazi::is_jia_zi(Date::from_gregorian(2024, 12, 26).unwrap()));
/// assert!(!jiazi::is_jia_zi(Date::from_gregorian(2024, 12, 21).unwrap()));
/// ```
pub fn is_jia_zi(date: Date) -> bool {
    days_from_base(date).rem_euclid(CYCLE_DAYS) == 0
}

/// 求距 `target` 最近的甲子日，最多向兩側各找 `radius_days` 日。
///
/// 自相差 0 日起逐日外擴，同一距離先查之前、再查之後。
///
/// # 用例
///
/// ```
/// use kyusei::Date;
/// use kyusei::ninestar::jiazi;
///
/// let winter = Date::from_gregorian(2024, 12, 21).unwrap();
/// assert_eq!("2024-12-26", jiazi::nearest_jia_zi(winter, 14).unwrap().iso_gregorian());
/// ```
pub fn nearest_jia_zi(target: Date, radius_days: u32) -> Result<Date> {
    for offset in 0..=radius_days as i32 {
        for candidate in [target - offset, target + offset] {
            trace!(%target, %candidate, offset, "probing jia-zi candidate");
            if is_jia_zi(candidate) {
                return Ok(candidate);
            }
        }
    }
    Err(Error::AnchorSearchExhausted {
        target: target.iso_gregorian(),
        radius: radius_days,
    })
}
