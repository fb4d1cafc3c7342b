/*!
# Arcstk

[![docs.rs](https://img.shields.io/docsrs/arcstk.svg?style=flat-square&label=docs.rs)](https://docs.rs/arcstk/)
[![changelog](https://img.shields.io/crates/v/arcstk.svg?style=flat-square&label=changelog&color=9b59b6)](https://github.com/Blobfolio/arcstk/blob/master/CHANGELOG.md)<br>
[![crates.io](https://img.shields.io/crates/v/arcstk.svg?style=flat-square&label=crates.io)](https://crates.io/crates/arcstk)
[![ci](https://img.shields.io/github/actions/workflow/status/Blobfolio/arcstk/ci.yaml?label=ci&style=flat-square)](https://github.com/Blobfolio/arcstk/actions)
[![deps.rs](https://deps.rs/crate/arcstk/latest/status.svg?style=flat-square&label=deps.rs)](https://deps.rs/crate/arcstk/)<br>
[![license](https://img.shields.io/badge/license-wtfpl-ff1493?style=flat-square)](https://en.wikipedia.org/wiki/WTFPL)
[![contributions welcome](https://img.shields.io/badge/PRs-welcome-brightgreen.svg?style=flat-square&label=contributions)](https://github.com/Blobfolio/arcstk/issues)



Arcstk is a Rust library for computing and verifying [AccurateRip](http://accuraterip.com/) checksums for ripped CDDA audio.

It covers three things:
- Streaming ARCSv1/v2 checksum calculation from raw PCM samples ([`Calculation`]).
- Parsing of AccurateRip's binary disc-response format ([`ARResponse`]).
- Matching a local calculation against a parsed response, either in strict
  track order ([`Matcher::album`]) or tolerant of reordering
  ([`Matcher::trackset`]).

Audio decoding, cuesheet parsing, and HTTP transport are all out of scope;
bring your own PCM samples (via [`SampleSequence`]) and your own downloaded
response bytes.

## Examples

```
use arcstk::{
    ARId, Calculation, CalculationContext, ChecksumType, SampleSequence, ToCData,
};

let toc = ToCData::construct(253038, vec![33, 5225, 7390]).unwrap();
let id = arcstk::make_arid(&toc).unwrap();
assert_eq!(id.track_count(), 3);

let mut calc = Calculation::new(CalculationContext::Multitrack(toc), ChecksumType::Both);
let samples: Vec<i16> = vec![0; 8];
let seq = SampleSequence::wrap_interleaved(&samples, true);
calc.update(&seq).unwrap();
assert!(!calc.complete());
```
*/

#![deny(
	clippy::allow_attributes_without_reason,
	clippy::correctness,
	unreachable_pub,
	unsafe_code,
)]

#![warn(
	clippy::complexity,
	clippy::nursery,
	clippy::pedantic,
	clippy::perf,
	clippy::style,

	clippy::allow_attributes,
	clippy::clone_on_ref_ptr,
	clippy::create_dir,
	clippy::filetype_is_file,
	clippy::format_push_string,
	clippy::get_unwrap,
	clippy::impl_trait_in_params,
	clippy::lossy_float_literal,
	clippy::missing_assert_message,
	clippy::missing_docs_in_private_items,
	clippy::needless_raw_strings,
	clippy::panic_in_result_fn,
	clippy::pub_without_shorthand,
	clippy::rest_pat_in_fully_bound_structs,
	clippy::semicolon_inside_block,
	clippy::str_to_string,
	clippy::string_to_string,
	clippy::todo,
	clippy::undocumented_unsafe_blocks,
	clippy::unneeded_field_pattern,
	clippy::unseparated_literal_suffix,
	clippy::unwrap_in_result,

	macro_use_extern_crate,
	missing_copy_implementations,
	missing_docs,
	non_ascii_idents,
	trivial_casts,
	trivial_numeric_casts,
	unused_crate_dependencies,
	unused_extern_crates,
	unused_import_braces,
)]

#![cfg_attr(docsrs, feature(doc_cfg))]



mod calculation;
mod checksum;
mod error;
mod identifier;
pub mod log;
mod matcher;
mod parser;
mod partition;
mod sequence;
mod size;
mod toc;

#[cfg(feature = "serde")] mod serde;

pub use calculation::{Calculation, CalculationContext};
pub use checksum::{AlgoState, Checksum, ChecksumSet, ChecksumType, Checksums};
pub use error::Error;
pub use identifier::{ARId, make_arid, make_empty_arid};
pub use matcher::{Match, Matcher};
pub use parser::{
	ARBlock,
	ARResponse,
	ARTriplet,
	ParseHandler,
	parse_with_handler,
	parse_with_handler_reader,
};
pub use partition::{Partition, PartitioningMode};
pub use sequence::{RawSample, SampleSequence, SampleSequenceIter};
pub use size::{
	AudioSize,
	BYTES_PER_SAMPLE,
	MAX_BLOCK_ADDRESS,
	MAX_TRACKCOUNT,
	SAMPLES_PER_FRAME,
	Unit,
};
pub use toc::{ToC, ToCData};
