/*!
# Arcstk: Verification Matcher

Scores a local [`Checksums`] computation against a remote [`ARResponse`].
Collapses the source library's `Matcher` base class plus `AlbumMatcher` /
`TracksetMatcher` subclasses (each overriding `do_best_match`,
`do_best_difference`, `do_matches_v2`) into a single [`Matcher`] enum whose
two variants carry their own captured state and share one `score` method,
per the flat-bitmap [`Match`] layout from `examples/original_source/include/match.hpp`.
*/

use crate::{
	ARId,
	ARResponse,
	Checksums,
	Error,
	log,
};



#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # Match Bitmap.
///
/// For a response with `B` blocks of `T` tracks each, holds `B * (2T + 1)`
/// flags, laid out per block as
/// `[id_flag, v1_t0, v2_t0, v1_t1, v2_t1, ..., v1_t(T-1), v2_t(T-1)]`.
pub struct Match {
	/// # Track Count (Per Block).
	track_count: usize,

	/// # Flat Flags.
	flags: Vec<bool>,
}

impl Match {
	/// # Row Width (Flags Per Block).
	const fn row_width(track_count: usize) -> usize { 2 * track_count + 1 }

	#[must_use]
	/// # New.
	fn new(block_count: usize, track_count: usize) -> Self {
		Self {
			track_count,
			flags: vec![false; block_count * Self::row_width(track_count)],
		}
	}

	/// # Flat Index of a Block's ID Flag.
	///
	/// ## Errors
	///
	/// Returns [`Error::OutOfRange`] if `block` is out of range.
	fn id_index(&self, block: usize) -> Result<usize, Error> {
		if block * Self::row_width(self.track_count) >= self.flags.len() {
			return Err(Error::OutOfRange("block index"));
		}
		Ok(block * Self::row_width(self.track_count))
	}

	/// # Flat Index of a Track's Flag.
	///
	/// ## Errors
	///
	/// Returns [`Error::OutOfRange`] if `block` or `track` is out of range.
	fn track_index(&self, block: usize, track: usize, is_v2: bool) -> Result<usize, Error> {
		if self.track_count <= track { return Err(Error::OutOfRange("track index")); }
		let id_idx = self.id_index(block)?;
		Ok(id_idx + 1 + 2 * track + usize::from(is_v2))
	}

	/// # Verify ID.
	///
	/// Sets the ID flag for `block`; returns its flat index.
	///
	/// ## Errors
	///
	/// Returns [`Error::OutOfRange`] if `block` is out of range.
	pub fn verify_id(&mut self, block: usize) -> Result<usize, Error> {
		let idx = self.id_index(block)?;
		self.flags[idx] = true;
		Ok(idx)
	}

	#[must_use]
	/// # Read ID Flag.
	pub fn id(&self, block: usize) -> bool {
		self.id_index(block).is_ok_and(|idx| self.flags[idx])
	}

	/// # Verify Track.
	///
	/// ## Errors
	///
	/// Returns [`Error::OutOfRange`] if `block` or `track` is out of range.
	pub fn verify_track(&mut self, block: usize, track: usize, is_v2: bool) -> Result<usize, Error> {
		let idx = self.track_index(block, track, is_v2)?;
		self.flags[idx] = true;
		Ok(idx)
	}

	#[must_use]
	/// # Read Track Flag.
	pub fn track(&self, block: usize, track: usize, is_v2: bool) -> bool {
		self.track_index(block, track, is_v2).is_ok_and(|idx| self.flags[idx])
	}

	#[must_use]
	/// # Difference.
	///
	/// `track_count - (tracks matched in block for this version) + (0 if id
	/// matches else 1)`.
	pub fn difference(&self, block: usize, is_v2: bool) -> i64 {
		let matched = (0..self.track_count)
			.filter(|&t| self.track(block, t, is_v2))
			.count();
		let id_penalty = i64::from(!self.id(block));
		(self.track_count - matched) as i64 + id_penalty
	}

	#[must_use]
	/// # Block Count.
	pub fn block_count(&self) -> usize {
		if self.track_count == 0 { 0 } else { self.flags.len() / Self::row_width(self.track_count) }
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Verification Matcher.
pub enum Matcher {
	/// # Album Semantics.
	///
	/// Requires local and remote track order (and count) to agree.
	Album {
		/// # Local ARId, Compared Against Each Block's.
		local_id: ARId,

		/// # Local Checksums.
		checksums: Checksums,
	},

	/// # Trackset Semantics.
	///
	/// Tolerant of unknown/incorrect track order: a remote slot matches if
	/// *any* local checksum equals it.
	Trackset {
		/// # Local ARId, If Known (Otherwise the ID Flag Never Contributes).
		local_id: Option<ARId>,

		/// # Local Checksums.
		checksums: Checksums,
	},
}

impl Matcher {
	#[must_use]
	/// # New Album Matcher.
	pub fn album(local_id: ARId, checksums: Checksums) -> Self {
		Self::Album { local_id, checksums }
	}

	#[must_use]
	/// # New Trackset Matcher.
	pub fn trackset(local_id: Option<ARId>, checksums: Checksums) -> Self {
		Self::Trackset { local_id, checksums }
	}

	/// # Score a Response.
	///
	/// ## Errors
	///
	/// Returns [`Error::InvalidAudio`] ([`Matcher::Album`] only) if a
	/// block's track count does not match the local checksum count.
	pub fn score(&self, response: &ARResponse) -> Result<Match, Error> {
		match self {
			Self::Album { local_id, checksums } => score_album(*local_id, checksums, response),
			Self::Trackset { local_id, checksums } => Ok(score_trackset(*local_id, checksums, response)),
		}
	}

	#[must_use]
	/// # Matches?
	///
	/// True iff any `(block, version)` pair has a difference of `0`.
	pub fn matches(&self, m: &Match) -> bool {
		(0..m.block_count()).any(|b| m.difference(b, false) == 0 || m.difference(b, true) == 0)
	}

	#[must_use]
	/// # Best Match.
	///
	/// The block index with the lowest difference. Ties favor the lower
	/// block index, then ARCSv2 over ARCSv1.
	pub fn best_match(&self, m: &Match) -> Option<usize> {
		best(m).map(|(block, _, _)| block)
	}

	#[must_use]
	/// # Best Difference.
	pub fn best_difference(&self, m: &Match) -> Option<i64> {
		best(m).map(|(_, _, diff)| diff)
	}

	#[must_use]
	/// # Best Match Is ARCSv2?
	pub fn matches_v2(&self, m: &Match) -> bool {
		best(m).is_some_and(|(_, is_v2, _)| is_v2)
	}
}

/// # Find the Best-Scoring `(block, is_v2, difference)`.
fn best(m: &Match) -> Option<(usize, bool, i64)> {
	let mut out: Option<(usize, bool, i64)> = None;
	for block in 0..m.block_count() {
		for &is_v2 in &[true, false] {
			let diff = m.difference(block, is_v2);
			let better = match out {
				None => true,
				Some((_, _, best_diff)) => diff < best_diff,
			};
			if better { out = Some((block, is_v2, diff)); }
		}
	}
	out
}

/// # Score Under Album Semantics.
fn score_album(local_id: ARId, checksums: &Checksums, response: &ARResponse) -> Result<Match, Error> {
	let track_count = checksums.len();
	let mut m = Match::new(response.blocks().len(), track_count);

	for (b, block) in response.blocks().iter().enumerate() {
		if block.track_count as usize != track_count {
			return Err(Error::InvalidAudio("response block track count does not match local track count"));
		}

		if !local_id.is_empty()
			&& block.disc_id_1 == local_id.disc_id_1()
			&& block.disc_id_2 == local_id.disc_id_2()
			&& block.cddb_id == local_id.cddb_id()
		{
			m.verify_id(b)?;
		}

		for (t, triplet) in block.triplets.iter().enumerate() {
			let Some(set) = checksums.get(t) else { continue };
			if set.v1().is_some_and(|c| u32::from(c) == triplet.arcs) { m.verify_track(b, t, false)?; }
			if set.v2().is_some_and(|c| u32::from(c) == triplet.arcs) { m.verify_track(b, t, true)?; }
		}
	}

	log::log!(log::Level::Debug, "matcher: scored {} blocks (album)", response.blocks().len());
	Ok(m)
}

/// # Score Under Trackset Semantics.
fn score_trackset(local_id: Option<ARId>, checksums: &Checksums, response: &ARResponse) -> Match {
	let track_count = checksums.len();
	let mut m = Match::new(response.blocks().len(), track_count);

	for (b, block) in response.blocks().iter().enumerate() {
		if let Some(local_id) = local_id {
			if block.disc_id_1 == local_id.disc_id_1()
				&& block.disc_id_2 == local_id.disc_id_2()
				&& block.cddb_id == local_id.cddb_id()
			{
				let _ = m.verify_id(b);
			}
		}
		else {
			// No local id to compare — the flag never contributes, so set
			// it unconditionally (difference's `!id(b)` penalty becomes a
			// constant zero across all blocks).
			let _ = m.verify_id(b);
		}

		for (t, triplet) in block.triplets.iter().enumerate().take(track_count) {
			let any_v1 = checksums.iter().any(|set| set.v1().is_some_and(|c| u32::from(c) == triplet.arcs));
			let any_v2 = checksums.iter().any(|set| set.v2().is_some_and(|c| u32::from(c) == triplet.arcs));
			if any_v1 { let _ = m.verify_track(b, t, false); }
			if any_v2 { let _ = m.verify_track(b, t, true); }
		}
	}

	log::log!(log::Level::Debug, "matcher: scored {} blocks (trackset)", response.blocks().len());
	m
}



#[cfg(test)]
mod tests {
	use super::*;
	use crate::{Checksum, ChecksumSet};

	fn checksums_of(v1s: &[u32]) -> Checksums {
		let mut out = Checksums::with_capacity(v1s.len());
		for &v in v1s {
			let mut set = ChecksumSet::new(100);
			set.set_v1(Checksum(v));
			set.set_v2(Checksum(v.wrapping_add(1)));
			out.push(set);
		}
		out
	}

	fn response_of(id: (u32, u32, u32), arcs: &[u32]) -> ARResponse {
		ARResponse::parse(&{
			let mut bin = vec![arcs.len() as u8];
			bin.extend_from_slice(&id.0.to_le_bytes());
			bin.extend_from_slice(&id.1.to_le_bytes());
			bin.extend_from_slice(&id.2.to_le_bytes());
			for &a in arcs {
				bin.push(50);
				bin.extend_from_slice(&a.to_le_bytes());
				bin.extend_from_slice(&0u32.to_le_bytes());
			}
			bin
		}).unwrap()
	}

	#[test]
	fn t_album_exact_match() {
		let checksums = checksums_of(&[10, 20, 30]);
		let response = response_of((1, 2, 3), &[10, 20, 30]);
		let matcher = Matcher::album(ARId::empty(), checksums);
		let m = matcher.score(&response).unwrap();
		assert!(matcher.matches(&m));
		assert_eq!(matcher.best_difference(&m), Some(0));
	}

	#[test]
	fn t_album_partial_mismatch() {
		let checksums = checksums_of(&[10, 20, 30]);
		let response = response_of((1, 2, 3), &[10, 99, 30]);
		let matcher = Matcher::album(ARId::empty(), checksums);
		let m = matcher.score(&response).unwrap();
		assert!(!matcher.matches(&m));
		assert_eq!(matcher.best_difference(&m), Some(1));
	}

	#[test]
	fn t_trackset_tolerates_reordering() {
		let checksums = checksums_of(&[10, 20, 30]);
		let response = response_of((1, 2, 3), &[30, 10, 20]);
		let matcher = Matcher::trackset(None, checksums);
		let m = matcher.score(&response).unwrap();
		assert!(matcher.matches(&m));
	}

	#[test]
	fn t_album_track_count_mismatch_errors() {
		let checksums = checksums_of(&[10, 20]);
		let response = response_of((1, 2, 3), &[10, 20, 30]);
		let matcher = Matcher::album(ARId::empty(), checksums);
		assert!(matcher.score(&response).is_err());
	}

	#[test]
	fn t_match_out_of_range() {
		let m = Match::new(1, 2);
		assert!(matches!(m.track(5, 0, false), false));
		let mut m2 = Match::new(1, 2);
		assert!(m2.verify_track(0, 9, false).is_err());
	}
}
