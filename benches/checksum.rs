/*!
# Benchmark: Checksum Calculation
*/

use arcstk::{
	Calculation,
	CalculationContext,
	ChecksumType,
	SampleSequence,
	ToCData,
};
use brunch::{
	Bench,
	benches,
};



fn main() {
	let toc = ToCData::construct(253038, vec![33, 5225, 7390]).unwrap();
	let samples: Vec<i32> = vec![0x1234_5678; toc.leadout() as usize * 588];

	benches!(
		inline:

		Bench::new("Calculation::update (multitrack, whole disc)").run_seeded(
			samples.clone(),
			|buf| {
				let mut calc = Calculation::new(
					CalculationContext::Multitrack(toc.clone()),
					ChecksumType::Both,
				);
				let seq = SampleSequence::wrap_interleaved(&buf, true);
				calc.update(&seq).unwrap();
				calc
			},
		),

		Bench::spacer(),

		Bench::new("Calculation::update (singletrack)").run_seeded(
			samples.clone(),
			|buf| {
				let mut calc = Calculation::new(CalculationContext::Singletrack, ChecksumType::V2Only);
				let seq = SampleSequence::wrap_interleaved(&buf, true);
				calc.update(&seq).unwrap();
				calc
			},
		),
	);
}
