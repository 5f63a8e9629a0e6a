//! Cyclic indexing and rotation over slices.
//!
//! An empty slice is an error for [`circular_get`] but simply yields an empty
//! result from [`rotate`]; callers relying on either behaviour keep working.

use std::fmt::Debug;

use crate::error::{Error, Result};

/// Returns the element at `index`, treating `seq` as cyclic. Negative
/// indices count from the end.
///
/// # Example
///
/// ```
/// use kyusei::circular::circular_get;
///
/// let seq = [1, 2, 3];
/// assert_eq!(Ok(&3), circular_get(&seq, -1));
/// assert_eq!(Ok(&2), circular_get(&seq, 4));
/// ```
pub fn circular_get<T>(seq: &[T], index: isize) -> Result<&T> {
    if seq.is_empty() {
        return Err(Error::EmptyCollection);
    }
    Ok(&seq[wrap(index, seq.len())])
}

/// Returns a rotated copy of `seq`: element `i` of the result is
/// `seq[(i - shift) mod len]`, so a positive `shift` moves elements rightwards.
///
/// # Example
///
/// ```
/// use kyusei::circular::rotate;
///
/// assert_eq!(vec![3, 1, 2], rotate(&[1, 2, 3], 1));
/// assert_eq!(vec![2, 3, 1], rotate(&[1, 2, 3], -1));
/// ```
pub fn rotate<T: Clone>(seq: &[T], shift: isize) -> Vec<T> {
    let len = seq.len();
    (0..len)
        .map(|i| seq[wrap(i as isize - shift, len)].clone())
        .collect()
}

/// Rotates `seq` so that the first occurrence of `target` ends up last.
///
/// # Example
///
/// ```
/// use kyusei::circular::rotate_to_last;
///
/// let seq = ['九', '二', '七', '六', '一', '八', '三', '四', '五'];
/// assert_eq!(
///     Ok(vec!['七', '六', '一', '八', '三', '四', '五', '九', '二']),
///     rotate_to_last(&seq, &'二'),
/// );
/// ```
pub fn rotate_to_last<T: Clone + PartialEq + Debug>(seq: &[T], target: &T) -> Result<Vec<T>> {
    let idx = seq
        .iter()
        .position(|v| v == target)
        .ok_or_else(|| Error::ElementNotFound(format!("{target:?}")))?;
    let shift = (seq.len() - 1) as isize - idx as isize;
    Ok(rotate(seq, shift))
}

fn wrap(index: isize, len: usize) -> usize {
    index.rem_euclid(len as isize) as usize
}
