/*!
# Arcstk: Calculation Driver

Drives [`AlgoState`] across a stream of sample buffers, consulting the
partitioner at each call to split input on track boundaries and snapshot
finished tracks. Collapses the source library's `Calculation` + `CalcContext`
(`Singletrack`/`Multitrack`) pairing into one struct holding a
[`CalculationContext`] enum.
*/

use crate::{
	AlgoState,
	AudioSize,
	ChecksumSet,
	ChecksumType,
	Checksums,
	Error,
	RawSample,
	SampleSequence,
	ToCData,
	log,
	partition::{create_partitioning, PartitioningMode},
};



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Calculation Context.
///
/// Whether the calculation tracks per-track boundaries (needs a
/// [`ToCData`]) or treats the whole stream as one undivided run.
pub enum CalculationContext {
	/// # One Result Per Track.
	Multitrack(ToCData),

	/// # One Undivided Result.
	Singletrack,
}

impl CalculationContext {
	/// # Track Count.
	fn track_count(&self) -> usize {
		match self {
			Self::Multitrack(toc) => toc.track_count(),
			Self::Singletrack => 1,
		}
	}

	/// # Expected Sample Total, If Knowable From the Context Alone.
	fn toc_samples(&self) -> Option<u64> {
		match self {
			Self::Multitrack(toc) => Some(u64::from(toc.leadout()) * u64::from(crate::SAMPLES_PER_FRAME)),
			Self::Singletrack => None,
		}
	}
}



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
/// # Driver State.
enum State {
	/// # Accepting Input, No Samples Seen Yet.
	Ready,

	/// # Accepting Input, Some Samples Seen.
	Processing,

	/// # All Expected Samples Seen.
	Complete,
}



#[derive(Debug, Clone)]
/// # Streaming ARCS Calculation.
///
/// ## Examples
///
/// ```
/// use arcstk::{Calculation, CalculationContext, ChecksumType, SampleSequence};
///
/// let mut calc = Calculation::new(CalculationContext::Singletrack, ChecksumType::Both);
/// let buf: [i16; 8] = [1, 2, 3, 4, 5, 6, 7, 8];
/// let seq = SampleSequence::wrap_interleaved(&buf, true);
/// calc.update(&seq).unwrap();
/// assert_eq!(calc.samples_processed(), 4);
/// ```
pub struct Calculation {
	/// # Context.
	context: CalculationContext,

	/// # Which Checksum(s) To Produce.
	kind: ChecksumType,

	/// # Declared Total Size, If Set Explicitly.
	audiosize: Option<AudioSize>,

	/// # Running State For the Track Currently Being Accumulated.
	algo: AlgoState,

	/// # 1-Based Track Currently Being Accumulated.
	current_track: u32,

	/// # Finalized Per-Track Results (Index 0 = Track 1).
	results: Vec<ChecksumSet>,

	/// # Driver State.
	state: State,

	/// # Total Samples Folded In So Far.
	samples_processed: u64,
}

impl Calculation {
	#[must_use]
	/// # New.
	pub fn new(context: CalculationContext, kind: ChecksumType) -> Self {
		let track_count = context.track_count();
		let results = (0..track_count).map(|_| ChecksumSet::new(0)).collect();

		Self {
			context,
			kind,
			audiosize: None,
			algo: AlgoState::new(kind, false),
			current_track: 1,
			results,
			state: State::Ready,
			samples_processed: 0,
		}
	}

	#[must_use]
	/// # Samples Processed So Far.
	pub const fn samples_processed(&self) -> u64 { self.samples_processed }

	#[must_use]
	/// # Current Track (1-Based).
	///
	/// The track currently being accumulated. For [`CalculationContext::Singletrack`]
	/// this is always `1`; for [`CalculationContext::Multitrack`] it advances each
	/// time [`Calculation::update`] crosses into a new track.
	pub const fn current_track(&self) -> u32 { self.current_track }

	/// # Expected Total Samples, If Known.
	///
	/// Prefers an explicitly-set [`AudioSize`]; falls back to the leadout of
	/// a [`CalculationContext::Multitrack`] context.
	fn expected_samples(&self) -> Option<u64> {
		self.audiosize.map(|s| u64::from(s.samples())).or_else(|| self.context.toc_samples())
	}

	/// # Set Audio Size.
	///
	/// Declares the total stream length up front (or corrects an estimate
	/// derived from the table of contents). Must be called before the final
	/// [`Calculation::update`] if the context alone cannot determine when
	/// the stream ends.
	///
	/// ## Errors
	///
	/// Returns [`Error::InvalidAudio`] if `size` implies fewer samples than
	/// have already been processed.
	pub fn update_audiosize(&mut self, size: AudioSize) -> Result<(), Error> {
		if u64::from(size.samples()) < self.samples_processed {
			return Err(Error::InvalidAudio("declared size is smaller than samples already processed"));
		}
		log::log!(log::Level::Debug, "calculation: audio size set to {size}");
		self.audiosize = Some(size);
		Ok(())
	}

	#[must_use]
	/// # Complete?
	///
	/// True iff the total expected sample count is known and has been
	/// reached.
	pub fn complete(&self) -> bool { matches!(self.state, State::Complete) }

	#[must_use]
	/// # Result.
	///
	/// A snapshot of the checksums accumulated for each track so far.
	/// Tracks not yet finalized read as length-`0`, checksum-less sets.
	pub fn result(&self) -> Checksums {
		let mut out = Checksums::with_capacity(self.results.len());
		for set in &self.results { out.push(*set); }
		out
	}

	/// # Update.
	///
	/// Fold a buffer of packed stereo samples into the running calculation,
	/// splitting on track boundaries per the active context.
	///
	/// ## Errors
	///
	/// Returns [`Error::InvalidAudio`] if more samples are pushed than the
	/// declared or derived total, or if called after [`Calculation::complete`].
	pub fn update<T: RawSample>(&mut self, seq: &SampleSequence<'_, T>) -> Result<(), Error> {
		if self.complete() {
			return Err(Error::InvalidAudio("calculation already complete"));
		}

		let n = seq.size();
		if n == 0 { return Ok(()); }
		let n = u32::try_from(n).map_err(|_| Error::InvalidAudio("buffer too large"))?;

		if let Some(expected) = self.expected_samples() {
			if expected < self.samples_processed + u64::from(n) {
				return Err(Error::InvalidAudio("more samples pushed than expected"));
			}
		}

		let offset = u32::try_from(self.samples_processed)
			.map_err(|_| Error::InvalidAudio("stream exceeds the physical sample maximum"))?;

		let (mode, toc) = match &self.context {
			CalculationContext::Multitrack(toc) => (PartitioningMode::Multitrack, Some(toc)),
			CalculationContext::Singletrack => (PartitioningMode::Singletrack, None),
		};
		let partitions = create_partitioning(offset, n, toc, mode);

		for part in &partitions {
			if part.starts_track() && matches!(self.context, CalculationContext::Multitrack(_)) {
				self.current_track = part.track();
				self.algo = AlgoState::new(self.kind, part.track() == 1);
			}

			let begin = part.begin_offset() as usize;
			let end = part.end_offset() as usize;
			self.algo.update((begin..end).map(|i| seq.at(i)));

			if part.ends_track() {
				self.save_track(part);
			}
		}

		self.samples_processed += u64::from(n);
		self.state = State::Processing;

		if self.expected_samples() == Some(self.samples_processed) {
			self.state = State::Complete;
			log::log!(log::Level::Info, "calculation: complete after {} samples", self.samples_processed);
		}

		Ok(())
	}

	/// # Save a Finished Track.
	fn save_track(&mut self, part: &crate::partition::Partition) {
		let track_idx = (part.track() - 1) as usize;
		let length_frames = part.size() / crate::SAMPLES_PER_FRAME
			+ u32::from(part.size() % crate::SAMPLES_PER_FRAME != 0);
		let set = self.algo.finalize(length_frames);
		if let Some(slot) = self.results.get_mut(track_idx) { *slot = set; }

		match self.context {
			CalculationContext::Multitrack(_) => self.algo.reset(false),
			CalculationContext::Singletrack => self.algo.reset(true),
		}

		log::log!(log::Level::Debug, "calculation: finalized track {}", part.track());
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{SampleSequence, Unit};

	fn small_toc() -> ToCData {
		// Two tracks; track 1 short enough to need only the skip handling,
		// track 2 a bit longer.
		ToCData::construct(1000, vec![0, 500]).unwrap()
	}

	#[test]
	fn t_singletrack_accumulates() {
		let mut calc = Calculation::new(CalculationContext::Singletrack, ChecksumType::Both);
		let buf: Vec<i16> = (0..2000i16).collect();
		let seq = SampleSequence::wrap_interleaved(&buf, true);
		calc.update(&seq).unwrap();
		assert_eq!(calc.samples_processed(), 500);
		assert!(!calc.complete());
	}

	#[test]
	fn t_multitrack_splits_and_completes() {
		let toc = small_toc();
		let total_samples = toc.leadout() * crate::SAMPLES_PER_FRAME;
		let mut calc = Calculation::new(CalculationContext::Multitrack(toc), ChecksumType::V1Only);

		let buf: Vec<u32> = (0..total_samples).map(|i| i.wrapping_mul(7) + 1).collect();
		let seq = SampleSequence::wrap_interleaved(&buf, true);
		calc.update(&seq).unwrap();

		assert!(calc.complete());
		assert_eq!(calc.current_track(), 2);
		let results = calc.result();
		assert_eq!(results.len(), 2);
		assert!(results.get(0).unwrap().v1().is_some());
		assert!(results.get(1).unwrap().v1().is_some());
	}

	#[test]
	fn t_current_track_advances_mid_stream() {
		let toc = small_toc();
		let mut calc = Calculation::new(CalculationContext::Multitrack(toc), ChecksumType::Both);
		assert_eq!(calc.current_track(), 1);

		// Feed only track 1's samples (frames 0..500, well short of the
		// second track's offset).
		let buf: Vec<u32> = vec![0; 499 * crate::SAMPLES_PER_FRAME as usize];
		let seq = SampleSequence::wrap_interleaved(&buf, true);
		calc.update(&seq).unwrap();
		assert_eq!(calc.current_track(), 1);

		// Cross into track 2.
		let buf2: Vec<u32> = vec![0; 2 * crate::SAMPLES_PER_FRAME as usize];
		let seq2 = SampleSequence::wrap_interleaved(&buf2, true);
		calc.update(&seq2).unwrap();
		assert_eq!(calc.current_track(), 2);
	}

	#[test]
	fn t_chunked_matches_whole() {
		let toc = small_toc();
		let total_samples = toc.leadout() * crate::SAMPLES_PER_FRAME;
		let buf: Vec<u32> = (0..total_samples).map(|i| i.wrapping_mul(7) + 1).collect();

		let mut whole = Calculation::new(CalculationContext::Multitrack(toc.clone()), ChecksumType::Both);
		let seq = SampleSequence::wrap_interleaved(&buf, true);
		whole.update(&seq).unwrap();

		let mut chunked = Calculation::new(CalculationContext::Multitrack(toc), ChecksumType::Both);
		for chunk in buf.chunks(97) {
			let seq = SampleSequence::wrap_interleaved(chunk, true);
			chunked.update(&seq).unwrap();
		}

		assert_eq!(whole.result(), chunked.result());
	}

	#[test]
	fn t_rejects_overflow() {
		let mut calc = Calculation::new(CalculationContext::Singletrack, ChecksumType::Both);
		calc.update_audiosize(AudioSize::new(1, Unit::Samples).unwrap()).unwrap();
		let buf: Vec<i16> = vec![1, 2, 3, 4];
		let seq = SampleSequence::wrap_interleaved(&buf, true);
		assert!(calc.update(&seq).is_err());
	}
}
