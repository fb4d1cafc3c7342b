/*!
# Arcstk: Errors
*/

use std::{
	error::Error as StdError,
	fmt,
};



#[derive(Debug, Clone, Copy, Eq, Hash, PartialEq)]
/// # Error Type.
pub enum Error {
	/// # Negative Value.
	///
	/// An [`AudioSize`](crate::AudioSize) cannot be constructed from a value
	/// that would be negative once converted to bytes.
	NegativeValue,

	/// # Exceeds Maximum.
	///
	/// An [`AudioSize`](crate::AudioSize) cannot exceed the CDDA physical
	/// limit of roughly 449,999 frames.
	ExceedsMaximum,

	/// # Invalid Metadata.
	///
	/// The table of contents violates one of the ordering, spacing, or
	/// count invariants required to derive an [`ARId`](crate::ARId).
	InvalidMetadata(&'static str),

	/// # Invalid Audio.
	///
	/// Samples were pushed into a [`Calculation`](crate::Calculation) beyond
	/// its declared total, or no [`AudioSize`](crate::AudioSize) was ever
	/// set.
	InvalidAudio(&'static str),

	/// # Stream Read.
	///
	/// The AccurateRip response byte stream ended or failed partway through
	/// a block.
	StreamRead {
		/// # Global Byte Position (1-based).
		byte_position: u32,

		/// # Block Number (1-based).
		block_number: u32,

		/// # Byte Position Within Block (1-based).
		block_byte_position: u32,
	},

	/// # Out Of Range.
	///
	/// A requested block, track, or checksum-type index exceeds the
	/// allocated bounds.
	OutOfRange(&'static str),

	/// # Domain Error.
	///
	/// Two [`ChecksumSet`](crate::ChecksumSet) instances could not be merged
	/// because their non-zero lengths disagree.
	DomainError(&'static str),

	/// # I/O Error.
	///
	/// The underlying reader failed for a reason other than a clean
	/// end-of-file mid-record.
	Io,
}

impl fmt::Display for Error {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::NegativeValue => f.write_str("Audio size cannot be negative."),
			Self::ExceedsMaximum => f.write_str("Audio size exceeds the CDDA physical maximum."),
			Self::InvalidMetadata(why) => write!(f, "Invalid table of contents: {why}."),
			Self::InvalidAudio(why) => write!(f, "Invalid audio input: {why}."),
			Self::StreamRead { byte_position, block_number, block_byte_position } => write!(
				f,
				"Stream ended unexpectedly at byte {byte_position} (block {block_number}, byte {block_byte_position} of block).",
			),
			Self::OutOfRange(what) => write!(f, "{what} is out of range."),
			Self::DomainError(why) => write!(f, "Cannot merge checksum sets: {why}."),
			Self::Io => f.write_str("I/O error while reading AccurateRip response."),
		}
	}
}

impl StdError for Error {}

impl From<std::io::Error> for Error {
	fn from(_src: std::io::Error) -> Self { Self::Io }
}
