//! 文本形式：漢數字、九星名、節氣名、方位名

/// 漢數字，第 `1..=9` 項分別為「一」到「九」。第 0 項為「〇」，不用於九星。
pub const NUM_CHINESE: [char; 10] = ['〇', '一', '二', '三', '四', '五', '六', '七', '八', '九'];

/// 漢數字轉為 `1..=9`，非九星數字則返回 `None`。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::fmt;
///
/// assert_eq!(Some(7), fmt::numeral_value('七'));
/// assert_eq!(None, fmt::numeral_value('十'));
/// ```
pub fn numeral_value(c: char) -> Option<u8> {
    NUM_CHINESE[1..]
        .iter()
        .position(|&n| n == c)
        .map(|i| i as u8 + 1)
}

/// 九星名。`1..=9` 分別為一白水星到九紫火星。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::fmt;
///
/// assert_eq!("九紫火星", fmt::star_name(9));
/// ```
///
/// # Panics
///
/// 若序號不在 `1..=9` 間則 panic。
pub fn star_name(num: u8) -> &'static str {
    const NAMES: [&str; 9] = [
        "一白水星", "二黒土星", "三碧木星", "四緑木星", "五黄土星", "六白金星", "七赤金星",
        "八白土星", "九紫火星",
    ];
    match num {
        1..=9 => NAMES[num as usize - 1],
        _ => panic!("star {} not in 1..=9", num),
    }
}

/// 節氣序號轉為名稱。`0..24` 分別為冬至到大雪，序號每增一，太陽黃經增 15°。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::fmt;
///
/// assert_eq!("冬至", fmt::solar_term(0));
/// assert_eq!("立春", fmt::solar_term(3));
/// assert_eq!("夏至", fmt::solar_term(12));
/// ```
pub fn solar_term(order: u32) -> &'static str {
    const NAMES: [&str; 24] = [
        "冬至", "小寒", "大寒", "立春", "雨水", "驚蟄", "春分", "清明", "穀雨", "立夏", "小滿",
        "芒種", "夏至", "小暑", "大暑", "立秋", "處暑", "白露", "秋分", "寒露", "霜降", "立冬",
        "小雪", "大雪",
    ];
    NAMES[order.rem_euclid(24) as usize]
}
