use std::ops::Neg;

/// Heuristic value
pub type HV = i32;

/// Magnitude of a decided game. Decided results are offset by the number of
/// plies from the search root so that nearer wins are preferred.
pub const WINNER: HV = 1_000_000;

/// Heuristic scores are clamped to this magnitude, so that any decided result
/// dominates every heuristic score.
pub const HEURISTIC_LIMIT: HV = 100_000;

/// A game state evaluation: either a heuristic score or the distance to a
/// decided result. Ordered from worst to best for the evaluating player.
#[derive(Default, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Eval {
    pub _repr: HV,
}

impl Eval {
    /// Strictly below every value returned by a search.
    pub const MIN: Eval = Eval::from_repr(-WINNER - 1);
    /// Strictly above every value returned by a search.
    pub const MAX: Eval = Eval::from_repr(WINNER + 1);
    pub const ZERO: Eval = Eval::from_repr(0);

    #[inline]
    const fn from_repr(eval: HV) -> Self {
        Self { _repr: eval }
    }

    #[inline]
    pub fn from_heuristic(eval: HV) -> Self {
        Self::from_repr(eval.clamp(-HEURISTIC_LIMIT, HEURISTIC_LIMIT))
    }

    #[inline]
    pub fn get_eval(self) -> HV {
        self._repr
    }

    /// Win reached `ply` plies away from the search root.
    #[inline]
    pub fn win(ply: u8) -> Self {
        Self::from_repr(WINNER - ply as HV)
    }

    /// Loss reached `ply` plies away from the search root.
    #[inline]
    pub fn lose(ply: u8) -> Self {
        Self::from_repr(-WINNER + ply as HV)
    }

    #[inline]
    pub fn is_decisive(self) -> bool {
        self._repr.abs() > HEURISTIC_LIMIT
    }

    /// Next smaller value. Used to open the search window just below a known
    /// value so that equal results are reported exactly.
    #[inline]
    pub fn minus_one(self) -> Self {
        Self::from_repr(self._repr - 1).max(Self::MIN)
    }
}

impl Neg for Eval {
    type Output = Self;

    #[inline]
    fn neg(self) -> Eval {
        Eval::from_repr(-self._repr)
    }
}

impl std::fmt::Debug for Eval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let v = self._repr;
        if v >= WINNER + 1 || v <= -WINNER - 1 {
            write!(f, "Ev({})", if v > 0 { "+inf" } else { "-inf" })
        } else if self.is_decisive() && v > 0 {
            write!(f, "Ev(win in {})", WINNER - v)
        } else if self.is_decisive() {
            write!(f, "Ev(loss in {})", WINNER + v)
        } else {
            write!(f, "Ev({v:+})")
        }
    }
}
