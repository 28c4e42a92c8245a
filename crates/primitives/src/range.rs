use serde::Serialize;

/// An inclusive range of 1-based line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineRange {
	/// First line (inclusive).
	pub start: usize,
	/// Last line (inclusive).
	pub end: usize,
}

/// An inclusive range of 1-based columns within a single line.
///
/// Columns count grapheme clusters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ColumnRange {
	/// First column (inclusive).
	pub start: usize,
	/// Last column (inclusive).
	pub end: usize,
}

macro_rules! inclusive_range {
	($ty:ident) => {
		impl $ty {
			/// Creates a range, swapping the bounds if they are reversed.
			pub fn new(start: usize, end: usize) -> Self {
				Self {
					start: start.min(end),
					end: start.max(end),
				}
			}

			/// Creates a range covering a single position.
			pub fn single(pos: usize) -> Self {
				Self::new(pos, pos)
			}

			/// Number of positions covered.
			#[inline]
			pub fn len(&self) -> usize {
				self.end + 1 - self.start
			}

			/// Always false: inclusive ranges cover at least one position.
			#[inline]
			pub fn is_empty(&self) -> bool {
				false
			}

			/// Returns true if `pos` lies within the range.
			#[inline]
			pub fn contains(&self, pos: usize) -> bool {
				pos >= self.start && pos <= self.end
			}

			/// Returns true if the two ranges share at least one position.
			pub fn overlaps(&self, other: &Self) -> bool {
				self.start <= other.end && other.start <= self.end
			}

			/// Returns the range with its end clamped to `max`, or `None` when
			/// the range starts past `max`.
			pub fn clamp_end(&self, max: usize) -> Option<Self> {
				(self.start <= max).then(|| Self {
					start: self.start,
					end: self.end.min(max),
				})
			}

			/// Zero-based half-open bounds `[start - 1, end)`.
			#[inline]
			pub fn offsets(&self) -> std::ops::Range<usize> {
				self.start.saturating_sub(1)..self.end
			}
		}
	};
}

inclusive_range!(LineRange);
inclusive_range!(ColumnRange);
