/*!
# Arcstk: Audio Size
*/

use crate::Error;
use std::fmt;



/// # Samples Per CDDA Frame.
///
/// One CDDA frame is 1/75th of a second: 588 stereo samples.
pub const SAMPLES_PER_FRAME: u32 = 588;

/// # Bytes Per Packed Stereo Sample.
pub const BYTES_PER_SAMPLE: u32 = 4;

/// # Bytes Per CDDA Frame.
const BYTES_PER_FRAME: u32 = SAMPLES_PER_FRAME * BYTES_PER_SAMPLE;

/// # Maximum Track Count.
pub const MAX_TRACKCOUNT: usize = 99;

/// # Maximum CDDA Frame Address.
///
/// Physical discs cannot exceed roughly 449,999 frames (~1.05GB of raw PCM).
pub const MAX_BLOCK_ADDRESS: u32 = 449_999;

/// # Maximum Byte Size.
const MAX_BYTES: u32 = MAX_BLOCK_ADDRESS * BYTES_PER_FRAME;



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Size Unit.
///
/// The unit a raw value passed to [`AudioSize::new`] is expressed in.
pub enum Unit {
	/// # CDDA Frames (1/75s, 588 samples).
	Frames,

	/// # Packed Stereo Samples (4 bytes each).
	Samples,

	/// # Raw Bytes.
	Bytes,
}



#[derive(Debug, Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
/// # Audio Size.
///
/// Holds a non-negative size — internally as a byte count — with lossless
/// conversion to and from frames, samples, or bytes. Ordering is by byte
/// count.
///
/// ## Examples
///
/// ```
/// use arcstk::{AudioSize, Unit};
///
/// let size = AudioSize::new(19, Unit::Frames).unwrap();
/// assert_eq!(size.frames(), 19);
/// assert_eq!(size.samples(), 19 * 588);
/// assert_eq!(size.bytes(), 19 * 588 * 4);
/// ```
pub struct AudioSize(u32);

impl fmt::Display for AudioSize {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} bytes", self.0)
	}
}

impl AudioSize {
	/// # Zero.
	pub const ZERO: Self = Self(0);

	/// # New.
	///
	/// Construct an [`AudioSize`] from a raw value expressed in the given
	/// [`Unit`].
	///
	/// ## Errors
	///
	/// Returns [`Error::NegativeValue`] if `value` is negative, or
	/// [`Error::ExceedsMaximum`] if the equivalent byte count exceeds the
	/// CDDA physical maximum.
	pub fn new(value: i64, unit: Unit) -> Result<Self, Error> {
		if value < 0 { return Err(Error::NegativeValue); }

		let bytes = match unit {
			Unit::Bytes => value,
			Unit::Samples => value.checked_mul(i64::from(BYTES_PER_SAMPLE))
				.ok_or(Error::ExceedsMaximum)?,
			Unit::Frames => value.checked_mul(i64::from(BYTES_PER_FRAME))
				.ok_or(Error::ExceedsMaximum)?,
		};

		let bytes = u32::try_from(bytes).map_err(|_| Error::ExceedsMaximum)?;
		if bytes > MAX_BYTES { return Err(Error::ExceedsMaximum); }

		Ok(Self(bytes))
	}

	#[must_use]
	/// # From Frames (Infallible, Clamped).
	///
	/// Used internally wherever a caller-validated frame count (e.g. already
	/// checked against [`MAX_BLOCK_ADDRESS`]) needs to become an
	/// [`AudioSize`] without threading a `Result` through.
	pub(crate) const fn from_frames_unchecked(frames: u32) -> Self {
		Self(frames * BYTES_PER_FRAME)
	}

	#[must_use]
	/// # Frames.
	pub const fn frames(self) -> u32 { self.0 / BYTES_PER_FRAME }

	#[must_use]
	/// # Samples.
	pub const fn samples(self) -> u32 { self.0 / BYTES_PER_SAMPLE }

	#[must_use]
	/// # Bytes.
	pub const fn bytes(self) -> u32 { self.0 }
}



#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn t_roundtrip() {
		let size = AudioSize::new(19, Unit::Frames).unwrap();
		assert_eq!(size.frames(), 19);
		assert_eq!(size.samples(), 19 * SAMPLES_PER_FRAME);
		assert_eq!(size.bytes(), 19 * SAMPLES_PER_FRAME * BYTES_PER_SAMPLE);
	}

	#[test]
	fn t_negative() {
		assert_eq!(AudioSize::new(-1, Unit::Frames), Err(Error::NegativeValue));
	}

	#[test]
	fn t_too_large() {
		assert_eq!(
			AudioSize::new(i64::from(MAX_BLOCK_ADDRESS) + 1, Unit::Frames),
			Err(Error::ExceedsMaximum),
		);
		assert!(AudioSize::new(i64::from(MAX_BLOCK_ADDRESS), Unit::Frames).is_ok());
	}

	#[test]
	fn t_ordering() {
		let a = AudioSize::new(1, Unit::Frames).unwrap();
		let b = AudioSize::new(2, Unit::Frames).unwrap();
		assert!(a < b);
	}
}
