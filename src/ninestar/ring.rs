//! 九宮飛星盤
//!
//! 盤面按方位依次為南、西南、西、西北、北、东北、东、东南，末位為中宫。

use std::fmt;

use serde::{Serialize, Serializer};

use super::fmt::{NUM_CHINESE, numeral_value};
use super::stars::Star;
use crate::circular;
use crate::error::{Error, Result};

/// 方位，順序即盤面位置。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
    Center,
}

impl Direction {
    pub const ALL: [Direction; 9] = [
        Self::South,
        Self::SouthWest,
        Self::West,
        Self::NorthWest,
        Self::North,
        Self::NorthEast,
        Self::East,
        Self::SouthEast,
        Self::Center,
    ];

    /// 在盤面中的位置，`0..9`
    pub fn index(self) -> usize {
        self as usize
    }

    /// 方位名
    ///
    /// # 用例
    ///
    /// ```
    /// use kyusei::ninestar::ring::Direction;
    ///
    /// assert_eq!("西南", Direction::SouthWest.label());
    /// assert_eq!("中宫", Direction::Center.label());
    /// ```
    pub fn label(self) -> &'static str {
        match self {
            Self::South => "南",
            Self::SouthWest => "西南",
            Self::West => "西",
            Self::NorthWest => "西北",
            Self::North => "北",
            Self::NorthEast => "东北",
            Self::East => "东",
            Self::SouthEast => "东南",
            Self::Center => "中宫",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// 五黄入中時的盤面（洛書）。
pub const LO_SHU: [u8; 9] = [9, 2, 7, 6, 1, 8, 3, 4, 5];

/// 一張九宮盤，九個位置各有一星，互不相同。
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub struct Ring([Star; 9]);

impl Ring {
    /// 由九星直接組盤，須為一至九的排列。
    pub fn from_stars(stars: [Star; 9]) -> Option<Self> {
        let ring = Self(stars);
        ring.is_permutation().then_some(ring)
    }
    /// 由漢數字組盤，須恰為九個且為一至九的排列。
    pub fn from_numerals(symbols: &[char]) -> Option<Self> {
        let stars: Vec<Star> = symbols
            .iter()
            .map(|&c| Star::from_numeral(c))
            .collect::<Option<_>>()?;
        Self::from_stars(stars.try_into().ok()?)
    }

    pub fn center(&self) -> Star {
        self.get(Direction::Center)
    }
    pub fn get(&self, direction: Direction) -> Star {
        self.0[direction.index()]
    }
    pub fn stars(&self) -> &[Star; 9] {
        &self.0
    }
    pub fn numerals(&self) -> [char; 9] {
        self.0.map(Star::numeral)
    }
    /// 按盤面順序列出方位及其星。
    pub fn iter(&self) -> impl Iterator<Item = (Direction, Star)> + '_ {
        Direction::ALL.into_iter().zip(self.0.iter().copied())
    }
    pub fn is_permutation(&self) -> bool {
        let mut seen = [false; 9];
        for star in self.0 {
            let slot = &mut seen[star.get() as usize - 1];
            if *slot {
                return false;
            }
            *slot = true;
        }
        true
    }

    /// 整盤飛移：每星 `n` 變為 `((n - shift - 1) mod 9) + 1`。
    pub fn shifted(&self, shift: i64) -> Self {
        Self(self.0.map(|star| {
            let n = i64::from(star.get()) - shift - 1;
            Star::wrap(n.rem_euclid(9) + 1)
        }))
    }

    /// 循環移動盤面順序，使 `star` 居末位。
    ///
    /// # 用例
    ///
    /// ```
    /// use kyusei::ninestar::ring::ring_for;
    /// use kyusei::ninestar::stars::Star;
    ///
    /// let ring = ring_for(Star::wrap(5));
    /// let order: String = ring
    ///     .rotated_to_last(Star::wrap(2))
    ///     .unwrap()
    ///     .into_iter()
    ///     .map(Star::numeral)
    ///     .collect();
    /// assert_eq!("七六一八三四五九二", order);
    /// ```
    pub fn rotated_to_last(&self, star: Star) -> Result<Vec<Star>> {
        circular::rotate_to_last(&self.0, &star)
    }
}

impl fmt::Display for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for star in self.0 {
            write!(f, "{}", star.numeral())?;
        }
        Ok(())
    }
}

impl Serialize for Ring {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.numerals())
    }
}

/// 以 `center` 入中宫，自洛書順飛得全盤。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::ring::{ring_for, Direction};
/// use kyusei::ninestar::stars::Star;
///
/// let ring = ring_for(Star::wrap(1));
/// assert_eq!("五七三二六四八九一", ring.to_string());
/// assert_eq!(5, ring.get(Direction::South).get());
/// ```
pub fn ring_for(center: Star) -> Ring {
    let delta = (i64::from(center.get()) - 5 + 9) % 9;
    Ring(LO_SHU.map(|n| Star::wrap(i64::from(n) + delta)))
}

/// 對漢數字盤面按 `n' = ((n - shift - 1) mod 9) + 1` 逐位換算，非數字原樣保留。
///
/// 盤面須恰有九位，否則回報 [`Error::InvalidRingLength`]。
///
/// # 用例
///
/// ```
/// use kyusei::ninestar::ring::calculate_new_ring;
///
/// let base: Vec<char> = "九二七六一八三四五".chars().collect();
/// let ring = calculate_new_ring(&base, 4).unwrap();
/// assert_eq!("五七三二六四八九一", ring.into_iter().collect::<String>());
/// ```
pub fn calculate_new_ring(base: &[char], shift: i64) -> Result<Vec<char>> {
    if base.len() != 9 {
        return Err(Error::InvalidRingLength(base.len()));
    }
    Ok(base
        .iter()
        .map(|&c| match numeral_value(c) {
            Some(n) => {
                let n = (i64::from(n) - shift - 1).rem_euclid(9) + 1;
                NUM_CHINESE[n as usize]
            }
            None => c,
        })
        .collect())
}
