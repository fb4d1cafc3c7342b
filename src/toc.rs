/*!
# Arcstk: Table of Contents
*/

use crate::{
	AudioSize,
	Error,
	MAX_BLOCK_ADDRESS,
	MAX_TRACKCOUNT,
	Unit,
};



/// # Minimum Track Spacing (Frames).
///
/// Adjacent track offsets must differ by at least four seconds (300 frames).
const MIN_TRACK_SPACING: u32 = 300;



#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # Table of Contents (Raw Data).
///
/// An ordered sequence of [`AudioSize`] values: index `0` is the leadout,
/// indices `1..n` are the ascending track offsets (in frames).
///
/// ## Examples
///
/// ```
/// use arcstk::ToCData;
///
/// let toc = ToCData::construct(253038, vec![33, 5225, 7390]).unwrap();
/// assert_eq!(toc.track_count(), 3);
/// assert_eq!(toc.leadout(), 253038);
/// ```
pub struct ToCData {
	/// # Leadout + Offsets (Frames), Index 0 = Leadout.
	frames: Vec<u32>,
}

impl ToCData {
	/// # Construct.
	///
	/// Store `leadout` at index `0`, followed by `offsets` in the order
	/// given. Does not validate; call [`ToCData::validate`] (or
	/// [`crate::make_arid`], which validates internally) before relying on
	/// the invariants in the data model.
	pub fn construct(leadout: u32, offsets: Vec<u32>) -> Result<Self, Error> {
		let mut frames = Vec::with_capacity(offsets.len() + 1);
		frames.push(leadout);
		frames.extend(offsets);
		let out = Self { frames };
		out.validate()?;
		Ok(out)
	}

	/// # Validate.
	///
	/// Checks every invariant from the data model:
	/// - Track count is `1..=99`.
	/// - Offsets are strictly ascending.
	/// - Adjacent offsets differ by at least 300 frames.
	/// - The leadout exceeds the last offset by at least 300 frames.
	/// - The leadout does not exceed [`MAX_BLOCK_ADDRESS`].
	///
	/// ## Errors
	///
	/// Returns [`Error::InvalidMetadata`] naming the violated rule.
	pub fn validate(&self) -> Result<(), Error> {
		let offsets = self.offsets();
		let n = offsets.len();

		if n == 0 { return Err(Error::InvalidMetadata("at least one track is required")); }
		if MAX_TRACKCOUNT < n { return Err(Error::InvalidMetadata("track count exceeds 99")); }

		for pair in offsets.windows(2) {
			if pair[1] <= pair[0] {
				return Err(Error::InvalidMetadata("offsets are not strictly ascending"));
			}
			if pair[1] - pair[0] < MIN_TRACK_SPACING {
				return Err(Error::InvalidMetadata("adjacent offsets are closer than 300 frames"));
			}
		}

		let leadout = self.leadout();
		let last = offsets[n - 1];
		if leadout < last || leadout - last < MIN_TRACK_SPACING {
			return Err(Error::InvalidMetadata("leadout does not exceed the last offset by 300 frames"));
		}
		if MAX_BLOCK_ADDRESS < leadout {
			return Err(Error::InvalidMetadata("leadout exceeds the maximum block address"));
		}

		Ok(())
	}

	#[must_use]
	/// # Is Complete?
	///
	/// True iff the leadout is non-zero and at least one track is present.
	pub fn is_complete(&self) -> bool { self.leadout() > 0 && 1 <= self.track_count() }

	#[must_use]
	/// # Leadout (Frames).
	pub fn leadout(&self) -> u32 { self.frames[0] }

	#[must_use]
	/// # Leadout as [`AudioSize`].
	pub fn leadout_size(&self) -> AudioSize {
		AudioSize::new(i64::from(self.leadout()), Unit::Frames).unwrap_or(AudioSize::ZERO)
	}

	#[must_use]
	/// # Track Offsets (Frames).
	pub fn offsets(&self) -> &[u32] { &self.frames[1..] }

	#[must_use]
	/// # Track Count.
	pub fn track_count(&self) -> usize { self.frames.len().saturating_sub(1) }

	#[must_use]
	/// # Offset of Track (1-based).
	pub fn offset(&self, track: usize) -> Option<u32> {
		if track == 0 { None } else { self.offsets().get(track - 1).copied() }
	}
}



#[derive(Debug, Clone, Eq, PartialEq)]
/// # Table of Contents.
///
/// A [`ToCData`] plus an optional per-track filename vector, used to
/// determine whether the rip originates from one file-per-track or a single
/// contiguous image.
pub struct ToC {
	/// # Raw Offsets + Leadout.
	data: ToCData,

	/// # Per-Track Filenames (If Known).
	filenames: Option<Vec<String>>,
}

impl ToC {
	/// # New.
	///
	/// ## Errors
	///
	/// Returns [`Error::InvalidMetadata`] if `filenames` is `Some` but its
	/// length does not match the track count, or if `data` fails
	/// [`ToCData::validate`].
	pub fn new(data: ToCData, filenames: Option<Vec<String>>) -> Result<Self, Error> {
		data.validate()?;
		if let Some(names) = &filenames {
			if names.len() != data.track_count() {
				return Err(Error::InvalidMetadata("filename count does not match track count"));
			}
		}
		Ok(Self { data, filenames })
	}

	#[must_use]
	/// # Raw Data.
	pub const fn data(&self) -> &ToCData { &self.data }

	#[must_use]
	/// # Filenames.
	pub fn filenames(&self) -> Option<&[String]> { self.filenames.as_deref() }

	#[must_use]
	/// # Is Single File?
	///
	/// True iff filenames are absent, or all present filenames are equal.
	pub fn is_single_file(&self) -> bool {
		match &self.filenames {
			None => true,
			Some(names) => names.windows(2).all(|pair| pair[0] == pair[1]),
		}
	}
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_construct() {
		let toc = ToCData::construct(253038, vec![33, 5225, 7390]).unwrap();
		assert_eq!(toc.track_count(), 3);
		assert_eq!(toc.leadout(), 253038);
		assert!(toc.is_complete());
	}

	#[test]
	fn t_bad_spacing() {
		assert!(ToCData::construct(1000, vec![33, 100]).is_err());
	}

	#[test]
	fn t_bad_order() {
		assert!(ToCData::construct(1000, vec![500, 100]).is_err());
	}

	#[test]
	fn t_bad_leadout() {
		assert!(ToCData::construct(400, vec![33, 400]).is_err());
	}

	#[test]
	fn t_single_file() {
		let data = ToCData::construct(253038, vec![33, 5225]).unwrap();
		let toc = ToC::new(data.clone(), None).unwrap();
		assert!(toc.is_single_file());

		let toc2 = ToC::new(
			data.clone(),
			Some(vec!["a.wav".to_owned(), "a.wav".to_owned()]),
		).unwrap();
		assert!(toc2.is_single_file());

		let toc3 = ToC::new(
			data,
			Some(vec!["a.wav".to_owned(), "b.wav".to_owned()]),
		).unwrap();
		assert!(!toc3.is_single_file());
	}
}
