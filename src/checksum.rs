/*!
# Arcstk: Checksums

The ARCSv1/v2 data model ([`Checksum`], [`ChecksumSet`], [`Checksums`]) and
the core recurrence ([`AlgoState`]) that produces them.
*/

use crate::Error;
use std::fmt;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Checksum Type Tag.
///
/// Replaces the source library's `Update<T1, T2...>` variadic template
/// specialization with a runtime tag; the inner loop branches on this once
/// per call (outside the per-sample loop), not once per sample.
pub enum ChecksumType {
	/// # ARCSv1 Only.
	V1Only,

	/// # ARCSv2 Only.
	V2Only,

	/// # Both ARCSv1 and ARCSv2.
	Both,
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # A Single 32-Bit Checksum.
///
/// A value of `0` is considered empty, matching the source library's
/// `EmptyChecksum` convention.
pub struct Checksum(pub u32);

impl fmt::Display for Checksum {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{:08x}", self.0)
	}
}

impl From<u32> for Checksum {
	fn from(src: u32) -> Self { Self(src) }
}

impl From<Checksum> for u32 {
	fn from(src: Checksum) -> Self { src.0 }
}

impl Checksum {
	/// # Empty Checksum.
	pub const EMPTY: Self = Self(0);

	#[must_use]
	/// # Is Empty?
	pub const fn empty(self) -> bool { self.0 == 0 }
}



#[derive(Debug, Clone, Copy, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # A Track's ARCSv1 + ARCSv2 Checksums.
///
/// At most one value per [`ChecksumType`] — represented directly as two
/// `Option` fields rather than a map, since the type tag is a closed
/// two-variant set.
pub struct ChecksumSet {
	/// # ARCSv1.
	v1: Option<Checksum>,

	/// # ARCSv2.
	v2: Option<Checksum>,

	/// # Track Length (Frames).
	length: u32,
}

impl ChecksumSet {
	#[must_use]
	/// # New.
	pub const fn new(length: u32) -> Self { Self { v1: None, v2: None, length } }

	#[must_use]
	/// # Length (Frames).
	pub const fn length(&self) -> u32 { self.length }

	#[must_use]
	/// # ARCSv1.
	pub const fn v1(&self) -> Option<Checksum> { self.v1 }

	#[must_use]
	/// # ARCSv2.
	pub const fn v2(&self) -> Option<Checksum> { self.v2 }

	#[must_use]
	/// # Get By Type.
	pub const fn get(&self, kind: ChecksumType) -> Option<Checksum> {
		match kind {
			ChecksumType::V1Only => self.v1,
			ChecksumType::V2Only | ChecksumType::Both => self.v2,
		}
	}

	/// # Set ARCSv1.
	pub fn set_v1(&mut self, v: Checksum) { self.v1 = Some(v); }

	/// # Set ARCSv2.
	pub fn set_v2(&mut self, v: Checksum) { self.v2 = Some(v); }

	/// # Merge.
	///
	/// Combine `other` into `self`, keeping any value `self` doesn't already
	/// have.
	///
	/// ## Errors
	///
	/// Returns [`Error::DomainError`] if both sets have non-zero, differing
	/// lengths.
	pub fn merge(&mut self, other: &Self) -> Result<(), Error> {
		if self.length != 0 && other.length != 0 && self.length != other.length {
			return Err(Error::DomainError("lengths differ"));
		}

		if self.length == 0 { self.length = other.length; }
		if self.v1.is_none() { self.v1 = other.v1; }
		if self.v2.is_none() { self.v2 = other.v2; }

		Ok(())
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # Ordered Per-Track Checksums.
pub struct Checksums(Vec<ChecksumSet>);

impl Checksums {
	#[must_use]
	/// # With Capacity.
	pub fn with_capacity(n: usize) -> Self { Self(Vec::with_capacity(n)) }

	#[must_use]
	/// # Track Count.
	pub fn len(&self) -> usize { self.0.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.0.is_empty() }

	#[must_use]
	/// # Get (0-Based).
	pub fn get(&self, track: usize) -> Option<&ChecksumSet> { self.0.get(track) }

	/// # Push.
	pub(crate) fn push(&mut self, set: ChecksumSet) { self.0.push(set); }

	#[must_use]
	/// # Iterate.
	pub fn iter(&self) -> std::slice::Iter<'_, ChecksumSet> { self.0.iter() }
}

impl<'a> IntoIterator for &'a Checksums {
	type Item = &'a ChecksumSet;
	type IntoIter = std::slice::Iter<'a, ChecksumSet>;
	fn into_iter(self) -> Self::IntoIter { self.0.iter() }
}



#[derive(Debug, Clone, Copy)]
/// # Per-Track Algorithm State.
///
/// The ARCSv1/v2 core recurrence. Maintains a running 1-based multiplier and
/// two 32-bit subtotals; purely sequential — sample order is significant.
pub struct AlgoState {
	/// # Which Checksum(s) To Produce.
	kind: ChecksumType,

	/// # Running Multiplier (1-Based).
	multiplier: u64,

	/// # ARCSv1 Subtotal.
	subtotal_v1: u32,

	/// # ARCSv2 (High-Half) Subtotal.
	subtotal_v2: u32,
}

impl AlgoState {
	#[must_use]
	/// # New.
	///
	/// `front_skip_active` is `true` only for the first active partition of
	/// track 1 when the front pre-gap guard applies to it; it seeds the
	/// multiplier at `2940` per the source's skip handling instead of `1`.
	pub const fn new(kind: ChecksumType, front_skip_active: bool) -> Self {
		Self {
			kind,
			multiplier: if front_skip_active { 2940 } else { 1 },
			subtotal_v1: 0,
			subtotal_v2: 0,
		}
	}

	/// # Update.
	///
	/// Fold `samples` into the running subtotals, in order.
	pub fn update<I>(&mut self, samples: I)
	where I: IntoIterator<Item = u32> {
		match self.kind {
			ChecksumType::V1Only => {
				for s in samples {
					let update = self.multiplier.wrapping_mul(u64::from(s));
					self.subtotal_v1 = self.subtotal_v1.wrapping_add(update as u32);
					self.multiplier += 1;
				}
			},
			ChecksumType::V2Only => {
				for s in samples {
					let update = self.multiplier.wrapping_mul(u64::from(s));
					let lo = update as u32;
					let hi = (update >> 32) as u32;
					self.subtotal_v2 = self.subtotal_v2.wrapping_add(lo).wrapping_add(hi);
					self.multiplier += 1;
				}
			},
			ChecksumType::Both => {
				for s in samples {
					let update = self.multiplier.wrapping_mul(u64::from(s));
					self.subtotal_v1 = self.subtotal_v1.wrapping_add(update as u32);
					self.subtotal_v2 = self.subtotal_v2.wrapping_add((update >> 32) as u32);
					self.multiplier += 1;
				}
			},
		}
	}

	#[must_use]
	/// # Finalize.
	///
	/// Snapshot the current subtotals into a [`ChecksumSet`] of the given
	/// track `length` (frames), without resetting this state.
	pub fn finalize(&self, length: u32) -> ChecksumSet {
		let mut set = ChecksumSet::new(length);
		match self.kind {
			ChecksumType::V1Only => set.set_v1(Checksum(self.subtotal_v1)),
			ChecksumType::V2Only => set.set_v2(Checksum(self.subtotal_v2)),
			ChecksumType::Both => {
				set.set_v1(Checksum(self.subtotal_v1));
				set.set_v2(Checksum(self.subtotal_v1.wrapping_add(self.subtotal_v2)));
			},
		}
		set
	}

	/// # Reset.
	///
	/// Clear the subtotals for the next track. The multiplier is preserved
	/// when `keep_multiplier` is set (single-track contexts keep counting
	/// continuously); otherwise it restarts at `1` (multi-track contexts,
	/// where each track's ARCS is independent).
	pub fn reset(&mut self, keep_multiplier: bool) {
		self.subtotal_v1 = 0;
		self.subtotal_v2 = 0;
		if !keep_multiplier { self.multiplier = 1; }
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_empty_checksum() {
		assert!(Checksum::EMPTY.empty());
		assert!(Checksum(0).empty());
		assert!(!Checksum(1).empty());
	}

	#[test]
	fn t_merge_ok() {
		let mut a = ChecksumSet::new(5192);
		a.set_v1(Checksum(1));
		let mut b = ChecksumSet::new(5192);
		b.set_v2(Checksum(2));

		a.merge(&b).unwrap();
		assert_eq!(a.v1(), Some(Checksum(1)));
		assert_eq!(a.v2(), Some(Checksum(2)));
	}

	#[test]
	fn t_merge_conflict() {
		let mut a = ChecksumSet::new(100);
		let b = ChecksumSet::new(200);
		assert_eq!(a.merge(&b), Err(Error::DomainError("lengths differ")));
	}

	#[test]
	fn t_simple_recurrence() {
		// multiplier 1,2,3 over samples 10,20,30:
		// update = 10, 40, 90 -> v1 subtotal = 140; v2 subtotal (high halves) = 0
		let mut algo = AlgoState::new(ChecksumType::Both, false);
		algo.update([10u32, 20, 30]);
		let set = algo.finalize(10);
		assert_eq!(set.v1(), Some(Checksum(140)));
		assert_eq!(set.v2(), Some(Checksum(140)));
	}

	#[test]
	fn t_chunking_is_associative() {
		let samples: Vec<u32> = (1..=1000u32).map(|n| n.wrapping_mul(2654435761)).collect();

		let mut whole = AlgoState::new(ChecksumType::Both, false);
		whole.update(samples.iter().copied());

		let mut chunked = AlgoState::new(ChecksumType::Both, false);
		for chunk in samples.chunks(37) {
			chunked.update(chunk.iter().copied());
		}

		assert_eq!(whole.finalize(0), chunked.finalize(0));
	}
}
