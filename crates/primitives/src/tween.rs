//! Two-sided values and interpolation parameters.
//!
//! A transition always has a `prev` and a `next` snapshot. [`Tween`] holds a
//! value that may be missing on either side (a line that only exists in one
//! snapshot), [`FullTween`] holds a value present on both.

use serde::Serialize;

/// One of the two snapshots of a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Side {
	Prev,
	Next,
}

impl Side {
	pub const BOTH: [Side; 2] = [Side::Prev, Side::Next];

	/// The opposite snapshot.
	pub fn other(self) -> Side {
		match self {
			Side::Prev => Side::Next,
			Side::Next => Side::Prev,
		}
	}
}

/// A value that may be absent on either side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct Tween<T> {
	pub prev: Option<T>,
	pub next: Option<T>,
}

impl<T> Tween<T> {
	pub fn new(prev: Option<T>, next: Option<T>) -> Self {
		Self { prev, next }
	}

	pub fn get(&self, side: Side) -> Option<&T> {
		match side {
			Side::Prev => self.prev.as_ref(),
			Side::Next => self.next.as_ref(),
		}
	}

	/// Applies `f` to each present value.
	pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Tween<U> {
		Tween {
			prev: self.prev.map(&mut f),
			next: self.next.map(f),
		}
	}

	/// Fills missing sides with `default`.
	pub fn with_default(self, default: T) -> FullTween<T>
	where
		T: Clone,
	{
		FullTween {
			prev: self.prev.unwrap_or_else(|| default.clone()),
			next: self.next.unwrap_or(default),
		}
	}
}

impl<T: Copy> Tween<T> {
	/// Copies out the value on `side`.
	pub fn at(&self, side: Side) -> Option<T> {
		self.get(side).copied()
	}
}

/// A value present on both sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub struct FullTween<T> {
	pub prev: T,
	pub next: T,
}

impl<T> FullTween<T> {
	pub fn new(prev: T, next: T) -> Self {
		Self { prev, next }
	}

	/// Builds both sides from the same function.
	pub fn from_fn(mut f: impl FnMut(Side) -> T) -> Self {
		Self {
			prev: f(Side::Prev),
			next: f(Side::Next),
		}
	}

	pub fn get(&self, side: Side) -> &T {
		match side {
			Side::Prev => &self.prev,
			Side::Next => &self.next,
		}
	}

	pub fn get_mut(&mut self, side: Side) -> &mut T {
		match side {
			Side::Prev => &mut self.prev,
			Side::Next => &mut self.next,
		}
	}

	pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> FullTween<U> {
		FullTween {
			prev: f(self.prev),
			next: f(self.next),
		}
	}
}

impl<T: Clone> FullTween<T> {
	/// The same value on both sides.
	pub fn both(value: T) -> Self {
		Self {
			prev: value.clone(),
			next: value,
		}
	}
}

/// How a scalar moves as progress goes from 0 to 1.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum TweenParams {
	/// Constant for the whole transition.
	Fixed { value: f64 },
	/// Linear move from `extremes[0]` to `extremes[1]` while progress runs
	/// through `interval`; held at the nearest extreme outside it.
	Interval { extremes: [f64; 2], interval: [f64; 2] },
}

impl TweenParams {
	pub fn fixed(value: f64) -> Self {
		TweenParams::Fixed { value }
	}

	/// A moving tween, collapsed to [`TweenParams::Fixed`] when both extremes match.
	pub fn between(from: f64, to: f64, interval: [f64; 2]) -> Self {
		if from == to {
			TweenParams::Fixed { value: from }
		} else {
			TweenParams::Interval {
				extremes: [from, to],
				interval,
			}
		}
	}
}

/// Evaluates `params` at `progress`.
pub fn tween(params: &TweenParams, progress: f64) -> f64 {
	match *params {
		TweenParams::Fixed { value } => value,
		TweenParams::Interval {
			extremes: [from, to],
			interval: [start, end],
		} => {
			if progress <= start {
				from
			} else if progress >= end {
				to
			} else {
				let t = (progress - start) / (end - start);
				from + (to - from) * t
			}
		}
	}
}
