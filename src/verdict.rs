//! Comparison verdicts.
//!
//! Given the two parsed prices of a pair, decide which side is cheaper, how
//! much it saves per month and per year, and which badge each side gets.
//!
//! A verdict is only [`BadgeKind::BestValue`]/[`BadgeKind::TopPerformance`]
//! when both prices are known and differ. Equal prices, or any unknown
//! price, give a [`BadgeKind::Tie`] with a zero delta, and the renderer shows
//! no savings claim for it.

use crate::price::{Price, same_amount};

/// Which side of a pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Side {
    A,
    B,
}

impl Side {
    pub fn other(self) -> Side {
        match self {
            Side::A => Side::B,
            Side::B => Side::A,
        }
    }

    /// Pick the value belonging to this side.
    pub fn pick<T>(self, a: T, b: T) -> T {
        match self {
            Side::A => a,
            Side::B => b,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeKind {
    BestValue,
    TopPerformance,
    Tie,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Verdict {
    /// For a tie this is `A` by convention.
    pub cheaper: Side,
    pub pricier: Side,
    /// Monthly difference, `>= 0`.
    pub price_delta: f64,
    /// `price_delta × 12`.
    pub annual_savings: f64,
    /// `Tie`, or `BestValue` when a cheaper side exists.
    pub badge: BadgeKind,
}

impl Verdict {
    pub fn is_tie(&self) -> bool {
        self.badge == BadgeKind::Tie
    }

    /// Badge shown next to one side.
    pub fn badge_for(&self, side: Side) -> BadgeKind {
        if self.is_tie() {
            BadgeKind::Tie
        } else if side == self.cheaper {
            BadgeKind::BestValue
        } else {
            BadgeKind::TopPerformance
        }
    }

    /// The recommended side, `None` for a tie.
    pub fn winner(&self) -> Option<Side> {
        (!self.is_tie()).then_some(self.cheaper)
    }
}

/// Compute the verdict for prices `a` and `b`.
pub fn compute_verdict(a: Price, b: Price) -> Verdict {
    let tie = Verdict {
        cheaper: Side::A,
        pricier: Side::B,
        price_delta: 0.0,
        annual_savings: 0.0,
        badge: BadgeKind::Tie,
    };

    let (Price::Amount(pa), Price::Amount(pb)) = (a, b) else {
        return tie;
    };
    if same_amount(pa, pb) {
        return tie;
    }

    let cheaper = if pa < pb { Side::A } else { Side::B };
    let delta = (pa - pb).abs();
    Verdict {
        cheaper,
        pricier: cheaper.other(),
        price_delta: delta,
        annual_savings: delta * 12.0,
        badge: BadgeKind::BestValue,
    }
}
