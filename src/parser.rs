/*!
# Arcstk: Response Parser

A push-parser for the AccurateRip binary response format: a concatenation of
fixed-layout blocks with no outer framing. Grounded on the source library's
`ARStreamParser`/`ARParseHandler` push-parser shape, expressed here as a
[`ParseHandler`] trait with default no-op methods, and on
[`cdtoc::accuraterip::AccurateRip::parse_checksums`](../index.html)'s
little-endian field decode idiom — though that method's whole-buffer,
`chunks_exact`-based approach is replaced with an explicit byte cursor here,
since exact truncation byte-offsets mid-record can't be recovered from
`chunks_exact`.

The `_reader` entry points ([`ARResponse::parse_reader`],
[`parse_with_handler_reader`]) take any `std::io::Read` — a file or a pipe —
so a caller never has to buffer the response itself first; a genuine I/O
failure surfaces as [`crate::Error::Io`].
*/

use crate::Error;



/// # Header Size (Bytes).
const HEADER_LEN: usize = 13;

/// # Triplet Size (Bytes).
const TRIPLET_LEN: usize = 9;



#[derive(Debug, Clone, Copy, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # One Track's Reference Checksum Entry.
pub struct ARTriplet {
	/// # Confidence.
	pub confidence: u8,

	/// # ARCS.
	pub arcs: u32,

	/// # Frame-450 ARCS (Legacy Drive Offset Detection).
	pub frame450_arcs: u32,
}



#[derive(Debug, Clone, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # One Parsed Block.
pub struct ARBlock {
	/// # Track Count.
	pub track_count: u8,

	/// # Disc ID 1.
	pub disc_id_1: u32,

	/// # Disc ID 2.
	pub disc_id_2: u32,

	/// # CDDB ID.
	pub cddb_id: u32,

	/// # Per-Track Triplets, In Order.
	pub triplets: Vec<ARTriplet>,
}



/// # Parse Event Handler.
///
/// Implement this to observe parse events as they happen, e.g. to stream
/// results somewhere instead of buffering a whole [`ARResponse`]. All
/// methods default to no-ops; [`ARResponse::parse`] uses the built-in
/// [`CollectingHandler`] when the caller has no reason to implement this
/// directly.
#[allow(unused_variables, reason = "default method bodies are no-ops")]
pub trait ParseHandler {
	/// # Parsing Started.
	fn start_input(&mut self) {}

	/// # Parsing Finished.
	fn end_input(&mut self) {}

	/// # Block Started.
	fn start_block(&mut self) {}

	/// # Block Finished.
	fn end_block(&mut self) {}

	/// # Block Identifier Read.
	///
	/// Called once, immediately after [`ParseHandler::start_block`].
	fn id(&mut self, track_count: u8, disc_id_1: u32, disc_id_2: u32, cddb_id: u32) {}

	/// # Track Triplet Read.
	///
	/// `*_valid` reflects whether the corresponding field was read in full
	/// before EOF or an I/O error interrupted the block; values are `0`
	/// where their validity flag is `false`.
	fn triplet(
		&mut self,
		arcs: u32,
		confidence: u8,
		frame450_arcs: u32,
		arcs_valid: bool,
		conf_valid: bool,
		f450_valid: bool,
	) {}
}



/// # Built-In Handler.
///
/// Appends each fully-read block to a `Vec<ARBlock>`; used internally by
/// [`ARResponse::parse`].
#[derive(Debug, Default)]
struct CollectingHandler {
	/// # Completed Blocks.
	blocks: Vec<ARBlock>,

	/// # Block Currently Being Assembled.
	current: Option<ARBlock>,
}

impl ParseHandler for CollectingHandler {
	fn start_block(&mut self) { self.current = None; }

	fn id(&mut self, track_count: u8, disc_id_1: u32, disc_id_2: u32, cddb_id: u32) {
		self.current = Some(ARBlock {
			track_count,
			disc_id_1,
			disc_id_2,
			cddb_id,
			triplets: Vec::with_capacity(track_count as usize),
		});
	}

	fn triplet(
		&mut self,
		arcs: u32,
		confidence: u8,
		frame450_arcs: u32,
		arcs_valid: bool,
		conf_valid: bool,
		f450_valid: bool,
	) {
		if arcs_valid && conf_valid && f450_valid {
			if let Some(block) = &mut self.current {
				block.triplets.push(ARTriplet { confidence, arcs, frame450_arcs });
			}
		}
	}

	fn end_block(&mut self) {
		if let Some(block) = self.current.take() { self.blocks.push(block); }
	}
}



#[derive(Debug, Clone, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
/// # A Fully-Parsed AccurateRip Response.
pub struct ARResponse {
	/// # Blocks, One Per Disc Pressing AccurateRip Has On File.
	blocks: Vec<ARBlock>,
}

impl ARResponse {
	#[must_use]
	/// # Blocks.
	pub fn blocks(&self) -> &[ARBlock] { &self.blocks }

	#[must_use]
	/// # Block Count.
	pub fn len(&self) -> usize { self.blocks.len() }

	#[must_use]
	/// # Is Empty?
	pub fn is_empty(&self) -> bool { self.blocks.is_empty() }

	/// # Parse.
	///
	/// Parse a complete AccurateRip response buffer into blocks, using the
	/// built-in [`CollectingHandler`].
	///
	/// ## Errors
	///
	/// Returns [`Error::StreamRead`] if `bin` ends partway through a block.
	pub fn parse(bin: &[u8]) -> Result<Self, Error> {
		let mut handler = CollectingHandler::default();
		parse_with_handler(bin, &mut handler, None::<fn(&Error)>)?;
		Ok(Self { blocks: handler.blocks })
	}

	/// # Parse From a Reader.
	///
	/// Reads `reader` to exhaustion, then parses the result exactly as
	/// [`ARResponse::parse`] would. Lets a caller hand over a file or pipe
	/// directly instead of buffering the response itself first.
	///
	/// ## Errors
	///
	/// Returns [`Error::Io`] if `reader` fails, or [`Error::StreamRead`] if
	/// the byte stream ends partway through a block.
	pub fn parse_reader<R: std::io::Read>(reader: &mut R) -> Result<Self, Error> {
		let mut bin = Vec::new();
		reader.read_to_end(&mut bin)?;
		Self::parse(&bin)
	}
}



/// # Parse, Driving a Caller-Supplied Handler.
///
/// `on_error`, if given, is invoked with the error before it is returned
/// (mirroring the source library's optional `ErrorHandler`, which observes a
/// failure but cannot recover from it — AccurateRip binary data carries no
/// framing that would permit resynchronization after a truncated record).
///
/// ## Errors
///
/// Returns [`Error::StreamRead`] with exact 1-based `byte_position`,
/// `block_number`, and `block_byte_position` if `bin` ends mid-record.
pub fn parse_with_handler<H, F>(
	bin: &[u8],
	handler: &mut H,
	on_error: Option<F>,
) -> Result<(), Error>
where
	H: ParseHandler,
	F: Fn(&Error),
{
	handler.start_input();

	let mut pos: usize = 0;
	let mut block_number: u32 = 0;

	let fail = |byte_position: usize, block_number: u32, block_byte_position: usize| -> Error {
		Error::StreamRead {
			byte_position: byte_position as u32,
			block_number,
			block_byte_position: block_byte_position as u32,
		}
	};

	while pos < bin.len() {
		block_number += 1;
		let block_start = pos;
		handler.start_block();

		if bin.len() < pos + HEADER_LEN {
			let err = fail(bin.len(), block_number, bin.len() - block_start);
			if let Some(f) = &on_error { f(&err); }
			return Err(err);
		}

		let track_count = bin[pos];
		let disc_id_1 = u32::from_le_bytes(bin[pos + 1..pos + 5].try_into().unwrap());
		let disc_id_2 = u32::from_le_bytes(bin[pos + 5..pos + 9].try_into().unwrap());
		let cddb_id = u32::from_le_bytes(bin[pos + 9..pos + 13].try_into().unwrap());
		handler.id(track_count, disc_id_1, disc_id_2, cddb_id);
		pos += HEADER_LEN;

		for _ in 0..track_count {
			if bin.len() < pos + TRIPLET_LEN {
				let confidence = bin.get(pos).copied();
				let conf_valid = confidence.is_some();
				let confidence = confidence.unwrap_or(0);

				let arcs_end = pos + 1 + 4;
				let arcs_valid = bin.len() >= arcs_end;
				let arcs = if arcs_valid {
					u32::from_le_bytes(bin[pos + 1..arcs_end].try_into().unwrap())
				} else { 0 };

				handler.triplet(arcs, confidence, 0, arcs_valid, conf_valid, false);

				let err = fail(bin.len(), block_number, bin.len() - block_start);
				if let Some(f) = &on_error { f(&err); }
				return Err(err);
			}

			let confidence = bin[pos];
			let arcs = u32::from_le_bytes(bin[pos + 1..pos + 5].try_into().unwrap());
			let frame450_arcs = u32::from_le_bytes(bin[pos + 5..pos + 9].try_into().unwrap());
			handler.triplet(arcs, confidence, frame450_arcs, true, true, true);
			pos += TRIPLET_LEN;
		}

		handler.end_block();
	}

	handler.end_input();
	Ok(())
}



/// # Parse a Reader, Driving a Caller-Supplied Handler.
///
/// Reads `reader` to exhaustion, then drives `handler` exactly as
/// [`parse_with_handler`] would over the resulting bytes.
///
/// ## Errors
///
/// Returns [`Error::Io`] if `reader` fails, or [`Error::StreamRead`] with
/// exact 1-based position info if the byte stream ends mid-record.
pub fn parse_with_handler_reader<H, F, R>(
	reader: &mut R,
	handler: &mut H,
	on_error: Option<F>,
) -> Result<(), Error>
where
	H: ParseHandler,
	F: Fn(&Error),
	R: std::io::Read,
{
	let mut bin = Vec::new();
	reader.read_to_end(&mut bin)?;
	parse_with_handler(&bin, handler, on_error)
}



#[cfg(test)]
mod tests {
	use super::*;

	fn sample_block(track_count: u8, id: (u32, u32, u32), triplets: &[(u8, u32, u32)]) -> Vec<u8> {
		let mut out = vec![track_count];
		out.extend_from_slice(&id.0.to_le_bytes());
		out.extend_from_slice(&id.1.to_le_bytes());
		out.extend_from_slice(&id.2.to_le_bytes());
		for &(conf, arcs, f450) in triplets {
			out.push(conf);
			out.extend_from_slice(&arcs.to_le_bytes());
			out.extend_from_slice(&f450.to_le_bytes());
		}
		out
	}

	#[test]
	fn t_parse_single_block() {
		let bin = sample_block(2, (0x1111_1111, 0x2222_2222, 0x3333_3333), &[
			(5, 0xAAAA_AAAA, 0xBBBB_BBBB),
			(6, 0xCCCC_CCCC, 0xDDDD_DDDD),
		]);
		let resp = ARResponse::parse(&bin).unwrap();
		assert_eq!(resp.len(), 1);
		let block = &resp.blocks()[0];
		assert_eq!(block.track_count, 2);
		assert_eq!(block.disc_id_1, 0x1111_1111);
		assert_eq!(block.triplets[0].arcs, 0xAAAA_AAAA);
		assert_eq!(block.triplets[1].confidence, 6);
	}

	#[test]
	fn t_parse_multiple_blocks() {
		let mut bin = sample_block(1, (1, 2, 3), &[(9, 0xFF, 0xEE)]);
		bin.extend(sample_block(1, (4, 5, 6), &[(1, 0x11, 0x22)]));
		let resp = ARResponse::parse(&bin).unwrap();
		assert_eq!(resp.len(), 2);
		assert_eq!(resp.blocks()[1].disc_id_1, 4);
	}

	#[test]
	fn t_truncated_header_reports_exact_position() {
		// 15-track first block (full), second block truncated after 1 byte
		// of its header.
		let mut bin = sample_block(15, (1, 2, 3), &vec![(1, 1, 1); 15]);
		let first_block_len = bin.len();
		bin.push(2); // one stray byte: second block's track_count only.

		let err = ARResponse::parse(&bin).unwrap_err();
		match err {
			Error::StreamRead { byte_position, block_number, block_byte_position } => {
				assert_eq!(byte_position as usize, first_block_len + 1);
				assert_eq!(block_number, 2);
				assert_eq!(block_byte_position, 1);
			},
			other => panic!("wrong error variant: {other:?}"),
		}
	}

	#[test]
	fn t_truncated_triplet_reports_exact_position() {
		let mut bin = sample_block(2, (1, 2, 3), &[(1, 1, 1)]);
		bin.push(9); // confidence byte of the second triplet, then nothing.

		let err = ARResponse::parse(&bin).unwrap_err();
		match err {
			Error::StreamRead { block_number, .. } => assert_eq!(block_number, 1),
			other => panic!("wrong error variant: {other:?}"),
		}
	}

	#[test]
	fn t_empty_input_is_ok() {
		let resp = ARResponse::parse(&[]).unwrap();
		assert!(resp.is_empty());
	}

	#[test]
	fn t_parse_reader_matches_parse() {
		let mut bin = sample_block(1, (1, 2, 3), &[(9, 0xFF, 0xEE)]);
		bin.extend(sample_block(1, (4, 5, 6), &[(1, 0x11, 0x22)]));

		let from_bytes = ARResponse::parse(&bin).unwrap();
		let from_reader = ARResponse::parse_reader(&mut bin.as_slice()).unwrap();
		assert_eq!(from_bytes, from_reader);
	}

	#[test]
	fn t_parse_reader_reports_truncation() {
		let mut bin = sample_block(15, (1, 2, 3), &vec![(1, 1, 1); 15]);
		bin.push(2);

		let err = ARResponse::parse_reader(&mut bin.as_slice()).unwrap_err();
		match err {
			Error::StreamRead { block_number, .. } => assert_eq!(block_number, 2),
			other => panic!("wrong error variant: {other:?}"),
		}
	}

	/// # A Reader That Always Fails.
	struct FailingReader;

	impl std::io::Read for FailingReader {
		fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
			Err(std::io::Error::other("synthetic read failure"))
		}
	}

	#[test]
	fn t_parse_reader_surfaces_io_errors() {
		let err = ARResponse::parse_reader(&mut FailingReader).unwrap_err();
		assert_eq!(err, Error::Io);
	}
}
