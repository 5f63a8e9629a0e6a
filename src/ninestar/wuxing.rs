//! 五行生剋與三盤比較
//!
//! 一白屬水，二五八屬土，三四屬木，六七屬金，九紫屬火。

use std::fmt;

use serde::{Serialize, Serializer};

use super::ring::Ring;
use super::stars::Star;

/// 五行
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Element {
    Wood,
    Fire,
    Earth,
    Metal,
    Water,
}

impl Element {
    pub const ALL: [Element; 5] = [Self::Wood, Self::Fire, Self::Earth, Self::Metal, Self::Water];

    /// 星所屬之行
    ///
    /// # 用例
    ///
    /// ```
    /// use kyusei::ninestar::stars::Star;
    /// use kyusei::ninestar::wuxing::Element;
    ///
    /// assert_eq!(Element::Fire, Element::of(Star::wrap(9)));
    /// ```
    pub fn of(star: Star) -> Self {
        match star.get() {
            1 => Self::Water,
            3 | 4 => Self::Wood,
            6 | 7 => Self::Metal,
            9 => Self::Fire,
            _ => Self::Earth,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        Some(match c {
            '木' => Self::Wood,
            '火' => Self::Fire,
            '土' => Self::Earth,
            '金' => Self::Metal,
            '水' => Self::Water,
            _ => return None,
        })
    }

    pub fn as_char(self) -> char {
        match self {
            Self::Wood => '木',
            Self::Fire => '火',
            Self::Earth => '土',
            Self::Metal => '金',
            Self::Water => '水',
        }
    }

    /// 所生之行
    pub fn generates(self) -> Self {
        match self {
            Self::Wood => Self::Fire,
            Self::Fire => Self::Earth,
            Self::Earth => Self::Metal,
            Self::Metal => Self::Water,
            Self::Water => Self::Wood,
        }
    }

    /// 所剋之行
    pub fn restrains(self) -> Self {
        match self {
            Self::Wood => Self::Earth,
            Self::Fire => Self::Metal,
            Self::Earth => Self::Water,
            Self::Metal => Self::Wood,
            Self::Water => Self::Fire,
        }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

impl Serialize for Element {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_char(self.as_char())
    }
}

/// 甲對乙的關係
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Relation {
    /// 甲生乙
    Generates,
    /// 甲剋乙
    Restrains,
    /// 乙生甲
    GeneratedBy,
    /// 乙剋甲
    RestrainedBy,
    Same,
}

/// 求 `a` 對 `b` 的生剋關係。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::wuxing::{relation, Element::*, Relation};
///
/// assert_eq!(Relation::Generates, relation(Wood, Fire));
/// assert_eq!(Relation::RestrainedBy, relation(Wood, Metal));
/// ```
pub fn relation(a: Element, b: Element) -> Relation {
    if a == b {
        Relation::Same
    } else if a.generates() == b {
        Relation::Generates
    } else if a.restrains() == b {
        Relation::Restrains
    } else if b.generates() == a {
        Relation::GeneratedBy
    } else {
        Relation::RestrainedBy
    }
}

/// 以字符給出的兩行之關係；無法識別者一律視作相剋。
pub fn relation_of_symbols(a: char, b: char) -> Relation {
    if a == b {
        return Relation::Same;
    }
    match (Element::from_char(a), Element::from_char(b)) {
        (Some(a), Some(b)) => relation(a, b),
        _ => Relation::Restrains,
    }
}

/// 同一宫位上日、月、年三星五行的比較結果
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Comparison {
    /// 三者同行，記作「(木)」
    AllSame(Element),
    /// 兩同一異而相生，記被生之行
    Generated(Element),
    /// 兩同一異而相剋，記作「X」
    Conflict,
    /// 兩同一異而同行；比較的前提下不會出現
    TwoSame,
    /// 三者各異，記作「O」
    AllDistinct,
}

impl fmt::Display for Comparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AllSame(e) => write!(f, "({e})"),
            Self::Generated(e) => write!(f, "{e}"),
            Self::Conflict => f.write_str("X"),
            Self::TwoSame => f.write_str("有两个一样"),
            Self::AllDistinct => f.write_str("O"),
        }
    }
}

impl Serialize for Comparison {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// 比較一宫之內日、月、年三行。
///
/// 兩同一異時，依日月、日年、月年的次序取出相同的一對，再看同行對異行的關係：
/// 同行生異行記異行，異行生同行記同行，相剋記「X」。
pub fn classify(day: Element, month: Element, year: Element) -> Comparison {
    if day == month && month == year {
        return Comparison::AllSame(day);
    }
    let (same, different) = if day == month {
        (day, year)
    } else if day == year {
        (day, month)
    } else if month == year {
        (month, day)
    } else {
        return Comparison::AllDistinct;
    };
    match relation(same, different) {
        Relation::Generates => Comparison::Generated(different),
        Relation::GeneratedBy => Comparison::Generated(same),
        Relation::Restrains | Relation::RestrainedBy => Comparison::Conflict,
        Relation::Same => Comparison::TwoSame,
    }
}

/// 逐宫比較日盤、月盤、年盤。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::ring::ring_for;
/// use kyusei::ninestar::stars::Star;
/// use kyusei::ninestar::wuxing::compare_rings;
///
/// let ring = ring_for(Star::wrap(3));
/// let labels = compare_rings(&ring, &ring, &ring).map(|c| c.to_string());
/// assert_eq!(["(金)", "(火)", "(土)"], labels[..3]);
/// ```
pub fn compare_rings(day: &Ring, month: &Ring, year: &Ring) -> [Comparison; 9] {
    let (day, month, year) = (day.stars(), month.stars(), year.stars());
    std::array::from_fn(|i| {
        classify(
            Element::of(day[i]),
            Element::of(month[i]),
            Element::of(year[i]),
        )
    })
}
