/*!
# Arcstk: AccurateRip Identifier
*/

use crate::{
	Error,
	ToCData,
};
use std::fmt;



#[derive(Debug, Clone, Copy, Default, Eq, Hash, PartialEq)]
/// # AccurateRip Identifier.
///
/// The 4-tuple `(track_count, disc_id_1, disc_id_2, cddb_id)` that addresses
/// a disc pressing's reference checksum block.
///
/// ## Examples
///
/// ```
/// use arcstk::{ARId, ToCData};
///
/// let toc = ToCData::construct(253038, vec![
///     33, 5225, 7390, 23380, 35608, 49820, 69508, 87733,
///     106333, 139495, 157863, 198495, 213368, 225320, 234103,
/// ]).unwrap();
/// let id = arcstk::make_arid(&toc).unwrap();
/// assert_eq!(id.disc_id_1(), 0x001b_9178);
/// assert_eq!(id.disc_id_2(), 0x014b_e24e);
/// assert_eq!(id.cddb_id(), 0xb40d_2d0f);
/// ```
pub struct ARId {
	/// # Track Count.
	track_count: u8,

	/// # Disc ID 1.
	disc_id_1: u32,

	/// # Disc ID 2.
	disc_id_2: u32,

	/// # CDDB ID.
	cddb_id: u32,
}

impl fmt::Display for ARId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		<str as fmt::Display>::fmt(
			std::str::from_utf8(&self.hyphenated()).map_err(|_| fmt::Error)?,
			f,
		)
	}
}

impl ARId {
	#[must_use]
	/// # Empty ARId.
	///
	/// All fields are `0`.
	pub const fn empty() -> Self {
		Self { track_count: 0, disc_id_1: 0, disc_id_2: 0, cddb_id: 0 }
	}

	#[must_use]
	/// # Is Empty?
	pub const fn is_empty(&self) -> bool {
		self.track_count == 0 && self.disc_id_1 == 0 && self.disc_id_2 == 0 && self.cddb_id == 0
	}

	#[must_use]
	/// # Track Count.
	pub const fn track_count(&self) -> u8 { self.track_count }

	#[must_use]
	/// # Disc ID 1.
	pub const fn disc_id_1(&self) -> u32 { self.disc_id_1 }

	#[must_use]
	/// # Disc ID 2.
	pub const fn disc_id_2(&self) -> u32 { self.disc_id_2 }

	#[must_use]
	/// # CDDB ID.
	pub const fn cddb_id(&self) -> u32 { self.cddb_id }

	/// # Hyphenated Form.
	///
	/// `<NNN>-<id1>-<id2>-<cddb>`, as raw ASCII bytes. Built the way the
	/// source crate's own [`Toc`](crate::ToC) `Display` impl assembles its
	/// CDTOC string: push each field's bytes into a fixed buffer rather than
	/// allocate per-field.
	fn hyphenated(&self) -> [u8; 30] {
		let mut out = [0u8; 30];

		out[..3].copy_from_slice(dactyl::NiceU8::from(self.track_count).as_bytes3());
		out[3] = b'-';
		faster_hex::hex_encode_fallback(&self.disc_id_1.to_be_bytes(), &mut out[4..12]);
		out[12] = b'-';
		faster_hex::hex_encode_fallback(&self.disc_id_2.to_be_bytes(), &mut out[13..21]);
		out[21] = b'-';
		faster_hex::hex_encode_fallback(&self.cddb_id.to_be_bytes(), &mut out[22..30]);

		out
	}

	/// # Decode From Hyphenated Form.
	///
	/// Parses the `<NNN>-<id1>-<id2>-<cddb>` string this type's `Display`
	/// impl produces, used by the `serde` string impl.
	///
	/// ## Errors
	///
	/// Returns [`Error::InvalidMetadata`] if `src` is not exactly that shape.
	#[cfg_attr(not(feature = "serde"), allow(dead_code, reason = "only used by the serde string impl"))]
	pub(crate) fn decode(src: &str) -> Result<Self, Error> {
		let parts: Vec<&str> = src.split('-').collect();
		let [track_count, disc_id_1, disc_id_2, cddb_id] = parts[..] else {
			return Err(Error::InvalidMetadata("malformed AccurateRip identifier"));
		};

		let bad = || Error::InvalidMetadata("malformed AccurateRip identifier");
		Ok(Self {
			track_count: track_count.parse().map_err(|_| bad())?,
			disc_id_1: u32::from_str_radix(disc_id_1, 16).map_err(|_| bad())?,
			disc_id_2: u32::from_str_radix(disc_id_2, 16).map_err(|_| bad())?,
			cddb_id: u32::from_str_radix(cddb_id, 16).map_err(|_| bad())?,
		})
	}

	#[must_use]
	/// # Canonical Filename.
	///
	/// `dBAR-<NNN>-<id1>-<id2>-<cddb>.bin`
	pub fn filename(&self) -> String {
		format!("dBAR-{}.bin", self)
	}

	#[must_use]
	/// # Canonical URL.
	///
	/// `http://www.accuraterip.com/accuraterip/<a>/<b>/<c>/<filename>`
	/// where `a, b, c` are the last three hex digits of `disc_id_1`,
	/// reversed (i.e. digit 7, then 6, then 5 of its 8-digit hex form).
	pub fn url(&self) -> String {
		let hyph = self.hyphenated();
		// `<NNN>-` occupies the first 4 bytes; the 8 hex digits of disc_id_1
		// follow immediately.
		let id1 = &hyph[4..12];
		format!(
			"http://www.accuraterip.com/accuraterip/{}/{}/{}/{}",
			id1[7] as char, id1[6] as char, id1[5] as char,
			self.filename(),
		)
	}
}



#[must_use]
/// # Empty ARId.
///
/// Equivalent to [`ARId::empty`], provided as a free function to mirror
/// [`make_arid`].
pub const fn make_empty_arid() -> ARId { ARId::empty() }

/// # Make ARId.
///
/// Validate `toc` and derive its [`ARId`] per the AccurateRip formula:
///
/// ```text
/// disc_id_1 = (sum of offsets) + leadout
/// disc_id_2 = (sum of offset[i] * i, 1-based) + leadout * (n + 1)
/// cddb_id   = (digit-sum term << 24) | (seconds << 8) | track_count
/// ```
///
/// All sums are accumulated in `u64` and truncated (wrapped) to `u32` at the
/// end, matching the reference implementation's overflow behavior.
///
/// ## Errors
///
/// Returns [`Error::InvalidMetadata`] if `toc` fails [`ToCData::validate`].
pub fn make_arid(toc: &ToCData) -> Result<ARId, Error> {
	toc.validate()?;

	let offsets = toc.offsets();
	let leadout = u64::from(toc.leadout());
	let n = offsets.len();

	let mut sum1: u64 = 0;
	let mut sum2: u64 = 0;
	let mut digit_sum: u64 = 0;

	for (idx, &o) in offsets.iter().enumerate() {
		let o = u64::from(o);
		let i = (idx + 1) as u64;
		sum1 += o;
		sum2 += o * i;
		digit_sum += digit_sum_of(o / 75 + 2);
	}

	let disc_id_1 = (sum1 + leadout) as u32;
	let disc_id_2 = (sum2 + leadout * (n as u64 + 1)) as u32;

	let seconds = (leadout - u64::from(offsets[0])) / 75;
	let cddb_id = ((digit_sum << 24) | (seconds << 8) | n as u64) as u32;

	Ok(ARId {
		track_count: n as u8,
		disc_id_1,
		disc_id_2,
		cddb_id,
	})
}

/// # Sum of Decimal Digits.
fn digit_sum_of(mut v: u64) -> u64 {
	let mut out = 0;
	if v == 0 { return 0; }
	while v > 0 {
		out += v % 10;
		v /= 10;
	}
	out
}
