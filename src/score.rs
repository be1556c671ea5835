/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

/// A numerical representation of the evaluation of a position, in tenths of a pawn.
///
/// Working in tenths keeps the positional bonuses (0.3 and 0.1 of a pawn) exact.
/// A positive score favors White, a negative score favors Black.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Score(pub i32);

impl Score {
    /// Score of an even position.
    pub const DRAW: Self = Self(0);

    /// Number of internal units in one pawn.
    pub const UNITS_PER_PAWN: i32 = 10;

    /// Creates a [`Score`] worth `pawns` whole pawns.
    ///
    /// # Example
    /// ```
    /// # use chesstree::Score;
    /// assert_eq!(Score::from_pawns(39), Score(390));
    /// ```
    #[inline(always)]
    pub const fn from_pawns(pawns: i32) -> Self {
        Self(pawns * Self::UNITS_PER_PAWN)
    }

    /// Returns the absolute value of this [`Score`].
    #[inline(always)]
    pub const fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// "Normalizes" a score so that it can be printed as a float, in pawns.
    ///
    /// # Example
    /// ```
    /// # use chesstree::Score;
    /// assert_eq!(Score(13).normalize(), 1.3);
    /// ```
    #[inline(always)]
    pub fn normalize(&self) -> f32 {
        self.0 as f32 / Self::UNITS_PER_PAWN as f32
    }
}

macro_rules! impl_binary_op {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: Self) -> Self::Output {
                Self(self.0.$fn(rhs.0))
            }
        }

        impl std::ops::$trait<i32> for Score {
            type Output = Self;

            #[inline(always)]
            fn $fn(self, rhs: i32) -> Self::Output {
                Self(self.0.$fn(rhs))
            }
        }
    };
}

macro_rules! impl_binary_op_assign {
    ($trait:tt, $fn:ident) => {
        impl std::ops::$trait for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: Self) {
                self.0.$fn(rhs.0);
            }
        }

        impl std::ops::$trait<i32> for Score {
            #[inline(always)]
            fn $fn(&mut self, rhs: i32) {
                self.0.$fn(rhs);
            }
        }
    };
}

impl_binary_op!(Add, add);
impl_binary_op!(Sub, sub);
impl_binary_op!(Mul, mul);

impl_binary_op_assign!(AddAssign, add_assign);
impl_binary_op_assign!(SubAssign, sub_assign);

impl std::ops::Neg for Score {
    type Output = Self;

    #[inline(always)]
    fn neg(self) -> Self::Output {
        Self(self.0.neg())
    }
}

impl std::iter::Sum for Score {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::DRAW, |acc, score| acc + score)
    }
}

impl PartialEq<i32> for Score {
    fn eq(&self, other: &i32) -> bool {
        self.0.eq(other)
    }
}

impl PartialOrd<i32> for Score {
    fn partial_cmp(&self, other: &i32) -> Option<std::cmp::Ordering> {
        self.0.partial_cmp(other)
    }
}

impl fmt::Display for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}", self.normalize())
    }
}

impl fmt::Debug for Score {
    #[inline(always)]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_in_pawns() {
        assert_eq!(Score(3).to_string(), "0.3");
        assert_eq!(Score(-14).to_string(), "-1.4");
        assert_eq!(Score::from_pawns(2).to_string(), "2.0");
    }

    #[test]
    fn test_arithmetic() {
        let mut score = Score::from_pawns(1) + Score(3) - 1;
        assert_eq!(score, 12);
        score -= Score(12);
        assert_eq!(score, Score::DRAW);
        assert_eq!(-Score(5), Score(-5));
        assert_eq!([Score(1), Score(2)].into_iter().sum::<Score>(), Score(3));
    }
}
