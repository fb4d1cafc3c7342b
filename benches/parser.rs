/*!
# Benchmark: Response Parsing
*/

use arcstk::ARResponse;
use brunch::{
	Bench,
	benches,
};



/// # Build a Synthetic Multi-Block Response.
fn sample_response(blocks: usize, tracks: u8) -> Vec<u8> {
	let mut out = Vec::new();
	for b in 0..blocks {
		out.push(tracks);
		out.extend_from_slice(&(b as u32).to_le_bytes());
		out.extend_from_slice(&(b as u32 + 1).to_le_bytes());
		out.extend_from_slice(&(b as u32 + 2).to_le_bytes());
		for t in 0..tracks {
			out.push(t);
			out.extend_from_slice(&(t as u32).to_le_bytes());
			out.extend_from_slice(&(t as u32).to_le_bytes());
		}
	}
	out
}

fn main() {
	let small = sample_response(1, 15);
	let large = sample_response(50, 20);

	benches!(
		inline:

		Bench::new("ARResponse::parse (1 block, 15 tracks)").run(|| ARResponse::parse(&small)),

		Bench::spacer(),

		Bench::new("ARResponse::parse (50 blocks, 20 tracks)").run(|| ARResponse::parse(&large)),
	);
}
