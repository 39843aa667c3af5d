//! Middlegame/endgame score pair used throughout evaluation.

use std::fmt;
use std::ops::{Add, AddAssign, Mul, Sub, SubAssign};

use crate::eval::phase::MAX_PHASE;

/// A middlegame and an endgame value, blended by game phase at the end of
/// evaluation.
#[derive(Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    pub mg: i32,
    pub eg: i32,
}

impl Score {
    /// Zero score (mg=0, eg=0).
    pub const ZERO: Score = Score { mg: 0, eg: 0 };

    /// Construct a `Score` from separate middlegame and endgame values.
    #[inline]
    pub const fn new(mg: i32, eg: i32) -> Score {
        Score { mg, eg }
    }

    /// Blend the two values by `phase` (`MAX_PHASE` = pure middlegame,
    /// 0 = pure endgame).
    #[inline]
    pub fn taper(self, phase: i32) -> i32 {
        let phase = phase.clamp(0, MAX_PHASE);
        (self.mg * phase + self.eg * (MAX_PHASE - phase)) / MAX_PHASE
    }
}

/// Shorthand constructor for a [`Score`].
#[allow(non_snake_case)]
#[inline]
pub const fn S(mg: i32, eg: i32) -> Score {
    Score::new(mg, eg)
}

impl Add for Score {
    type Output = Score;

    #[inline]
    fn add(self, rhs: Score) -> Score {
        S(self.mg + rhs.mg, self.eg + rhs.eg)
    }
}

impl AddAssign for Score {
    #[inline]
    fn add_assign(&mut self, rhs: Score) {
        *self = *self + rhs;
    }
}

impl Sub for Score {
    type Output = Score;

    #[inline]
    fn sub(self, rhs: Score) -> Score {
        S(self.mg - rhs.mg, self.eg - rhs.eg)
    }
}

impl SubAssign for Score {
    #[inline]
    fn sub_assign(&mut self, rhs: Score) {
        *self = *self - rhs;
    }
}

impl Mul<i32> for Score {
    type Output = Score;

    #[inline]
    fn mul(self, rhs: i32) -> Score {
        S(self.mg * rhs, self.eg * rhs)
    }
}

impl fmt::Debug for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S({}, {})", self.mg, self.eg)
    }
}
