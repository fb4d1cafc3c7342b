/*!
# Arcstk: Partitioner

Splits a sample buffer into per-track sub-ranges so the checksum algorithm
never has to check track bounds inside its hot loop. This collapses the
source library's `Partitioner` / `MultitrackPartitioner` / `SingletrackPartitioner`
inheritance hierarchy into a single enum dispatched on directly — a closed
set of two variants has no need for virtual dispatch.
*/

use crate::ToCData;



/// # Samples Skipped at the Front of Track 1.
///
/// `5 * SAMPLES_PER_FRAME - 1` — the AccurateRip pre-gap guard.
pub(crate) const NUM_SKIP_FRONT: u32 = 5 * 588 - 1;

/// # Samples Skipped at the Back of the Last Track.
///
/// `5 * SAMPLES_PER_FRAME` — the AccurateRip post-gap guard.
pub(crate) const NUM_SKIP_BACK: u32 = 5 * 588;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Partitioning Mode.
pub enum PartitioningMode {
	/// # One Partition Per Track, Skip Rules Applied.
	Multitrack,

	/// # One Partition For the Whole Buffer.
	Singletrack,
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # A Contiguous Slice of a Sample Buffer Belonging to One Track.
pub struct Partition {
	/// # Local Offset of the First Sample (Inclusive).
	begin_offset: u32,

	/// # Local Offset of the Last Sample + 1.
	end_offset: u32,

	/// # Global Index of the First Sample.
	first_sample_idx: u32,

	/// # Global Index of the Last Sample.
	last_sample_idx: u32,

	/// # Starts Its Track?
	starts_track: bool,

	/// # Ends Its Track?
	ends_track: bool,

	/// # Track Number (1-Based).
	track: u32,
}

impl Partition {
	#[must_use]
	/// # Local Begin Offset.
	pub const fn begin_offset(&self) -> u32 { self.begin_offset }

	#[must_use]
	/// # Local End Offset (Exclusive).
	pub const fn end_offset(&self) -> u32 { self.end_offset }

	#[must_use]
	/// # Global First Sample Index.
	pub const fn first_sample_idx(&self) -> u32 { self.first_sample_idx }

	#[must_use]
	/// # Global Last Sample Index.
	pub const fn last_sample_idx(&self) -> u32 { self.last_sample_idx }

	#[must_use]
	/// # Starts Track?
	pub const fn starts_track(&self) -> bool { self.starts_track }

	#[must_use]
	/// # Ends Track?
	pub const fn ends_track(&self) -> bool { self.ends_track }

	#[must_use]
	/// # Track Number (1-Based).
	pub const fn track(&self) -> u32 { self.track }

	#[must_use]
	/// # Size (Number of Samples).
	pub const fn size(&self) -> u32 { self.end_offset - self.begin_offset }
}



/// # Track Boundaries, In Samples.
///
/// `bounds[0]` is the first sample of track 1, ..., `bounds[n]` is the
/// leadout (one past the last sample of track `n`).
fn track_bounds_samples(toc: &ToCData) -> Vec<u32> {
	let mut out: Vec<u32> = toc.offsets().iter()
		.map(|&f| f * crate::SAMPLES_PER_FRAME)
		.collect();
	out.push(toc.leadout() * crate::SAMPLES_PER_FRAME);
	out
}

/// # Create Partitioning.
///
/// Given a buffer at global sample offset `offset` containing
/// `number_of_samples` samples, produce the partitions over it per `mode`.
///
/// `toc` is only consulted for [`PartitioningMode::Multitrack`]; pass `None`
/// for [`PartitioningMode::Singletrack`].
///
/// ## Panics
///
/// Panics if `mode` is [`PartitioningMode::Multitrack`] and `toc` is `None`.
pub(crate) fn create_partitioning(
	offset: u32,
	number_of_samples: u32,
	toc: Option<&ToCData>,
	mode: PartitioningMode,
) -> Vec<Partition> {
	if number_of_samples == 0 { return Vec::new(); }

	let block_last = offset + number_of_samples - 1;

	match mode {
		PartitioningMode::Singletrack => vec![Partition {
			begin_offset: 0,
			end_offset: number_of_samples,
			first_sample_idx: offset,
			last_sample_idx: block_last,
			starts_track: offset == 0,
			ends_track: false,
			track: 1,
		}],
		PartitioningMode::Multitrack => {
			let toc = toc.expect("multitrack partitioning requires a table of contents");
			let bounds = track_bounds_samples(toc);
			let track_count = toc.track_count() as u32;
			let mut out = Vec::new();

			for t in 1..=track_count {
				let mut track_first = bounds[(t - 1) as usize];
				let mut track_last = bounds[t as usize] - 1;

				if t == 1 { track_first += NUM_SKIP_FRONT; }
				if t == track_count { track_last = track_last.saturating_sub(NUM_SKIP_BACK); }

				if track_last < track_first { continue; }
				if track_last < offset || block_last < track_first { continue; }

				let first = track_first.max(offset);
				let last = track_last.min(block_last);

				out.push(Partition {
					begin_offset: first - offset,
					end_offset: last - offset + 1,
					first_sample_idx: first,
					last_sample_idx: last,
					starts_track: first == track_first,
					ends_track: last == track_last,
					track: t,
				});
			}

			out
		},
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	fn toc() -> ToCData {
		ToCData::construct(253038, vec![33, 5225, 7390]).unwrap()
	}

	#[test]
	fn t_singletrack_whole_buffer() {
		let parts = create_partitioning(0, 1000, None, PartitioningMode::Singletrack);
		assert_eq!(parts.len(), 1);
		assert_eq!(parts[0].size(), 1000);
	}

	#[test]
	fn t_multitrack_skips_front_and_back() {
		let t = toc();
		let bounds = track_bounds_samples(&t);
		let total = bounds[bounds.len() - 1];
		let parts = create_partitioning(0, total, Some(&t), PartitioningMode::Multitrack);

		assert_eq!(parts.len(), 3);
		assert_eq!(parts[0].track(), 1);
		assert!(parts[0].starts_track());
		assert_eq!(parts[0].first_sample_idx(), bounds[0] + NUM_SKIP_FRONT);

		let last = parts.last().unwrap();
		assert_eq!(last.track(), 3);
		assert!(last.ends_track());
		assert_eq!(last.last_sample_idx(), bounds[3] - 1 - NUM_SKIP_BACK);
	}

	#[test]
	fn t_multitrack_partial_buffer() {
		let t = toc();
		let bounds = track_bounds_samples(&t);
		// A buffer entirely inside track 2.
		let start = bounds[1] + 10;
		let parts = create_partitioning(start, 100, Some(&t), PartitioningMode::Multitrack);
		assert_eq!(parts.len(), 1);
		assert_eq!(parts[0].track(), 2);
		assert!(!parts[0].starts_track());
		assert!(!parts[0].ends_track());
	}

	#[test]
	fn t_associative_chunking() {
		let t = toc();
		let bounds = track_bounds_samples(&t);
		let total = bounds[bounds.len() - 1];

		let whole = create_partitioning(0, total, Some(&t), PartitioningMode::Multitrack);
		let mut chunked = Vec::new();
		let mut off = 0;
		while off < total {
			let n = 777.min(total - off);
			chunked.extend(create_partitioning(off, n, Some(&t), PartitioningMode::Multitrack));
			off += n;
		}

		let whole_samples: u32 = whole.iter().map(Partition::size).sum();
		let chunked_samples: u32 = chunked.iter().map(Partition::size).sum();
		assert_eq!(whole_samples, chunked_samples);
	}
}
