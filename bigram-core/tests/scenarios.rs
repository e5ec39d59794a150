//! End-to-end scenarios over the public API of `bigram-core`.

mod common;

use std::fs;

use bigram_core::io::{list_files, read_corpus};
use bigram_core::model::walk::sample_name;
use bigram_core::{BigramError, BigramModel, Generator, SamplingOptions, Symbol};
use common::SequenceRng;
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

const TOP: u64 = 0;
const BOTTOM: u64 = u64::MAX;

fn c(c: char) -> Symbol {
	Symbol::Char(c)
}

#[test]
fn ana_has_a_full_path_to_end() {
	let model = BigramModel::build(["ana"]).unwrap();

	assert_eq!(model.probability(Symbol::Start, c('a')), Some(1.0));

	let path = [Symbol::Start, c('a'), c('n'), c('a'), Symbol::End];
	for pair in path.windows(2) {
		let p = model.probability(pair[0], pair[1]);
		assert!(p.is_some_and(|p| p > 0.0), "missing transition {} -> {}", pair[0], pair[1]);
	}
}

#[test]
fn ava_ava_mia_branches_after_a() {
	let model = BigramModel::build(["ava", "ava", "mia"]).unwrap();

	let row = model.distribution(c('a')).unwrap();
	assert!(row.len() >= 2);
	assert_eq!(row.probability(Symbol::End), Some(3.0 / 5.0));
	assert_eq!(row.probability(c('v')), Some(2.0 / 5.0));
	assert_eq!(row.most_likely(), Some(Symbol::End));
}

#[test]
fn scripted_draws_reproduce_each_training_name() {
	let model = BigramModel::build(["ava", "ava", "mia"]).unwrap();

	// START: a (2/3) before m (1/3); a: END (3/5) before v (2/5)
	let mut ava = SequenceRng::new(&[TOP, BOTTOM, TOP, TOP]);
	assert_eq!(sample_name(&model, &mut ava, 64), "ava");

	let mut mia = SequenceRng::new(&[BOTTOM, TOP, TOP, TOP]);
	assert_eq!(sample_name(&model, &mut mia, 64), "mia");
}

#[test]
fn most_likely_branch_is_deterministic() {
	let model = BigramModel::build(["ava", "ava", "mia"]).unwrap();

	let first = sample_name(&model, &mut SequenceRng::zero(), 64);
	let second = sample_name(&model, &mut SequenceRng::zero(), 64);
	assert_eq!(first, second);
	// START -> a, then a -> END outweighs a -> v
	assert_eq!(first, "a");
}

#[test]
fn most_likely_branch_reproduces_a_dominant_name() {
	let model = BigramModel::build(["mia", "mia", "ava"]).unwrap();
	assert_eq!(sample_name(&model, &mut SequenceRng::zero(), 64), "mia");
}

#[test]
fn same_seed_same_names() {
	let model = BigramModel::build(["ava", "mia", "noah", "liam", "emma", "olivia"]).unwrap();

	let run = |seed: u64| -> Vec<String> {
		let mut rng = StdRng::seed_from_u64(seed);
		(0..20).map(|_| sample_name(&model, &mut rng, 64)).collect()
	};

	assert_eq!(run(99), run(99));
}

#[test]
fn empty_table_never_panics() {
	let model = BigramModel::default();
	let generator = Generator::default();

	assert_eq!(sample_name(&model, &mut SequenceRng::zero(), 64), "");
	assert_eq!(generator.generate(&SamplingOptions::new().with_nb_try(3).unwrap()), "");
}

#[test]
fn corpus_file_round_trip() {
	let dir = std::env::temp_dir().join(format!("bigram-core-scenarios-{}", std::process::id()));
	fs::create_dir_all(&dir).unwrap();
	fs::write(dir.join("girls.txt"), "Ava Mia\nEmma\n").unwrap();
	fs::write(dir.join("empty.txt"), "\n\n").unwrap();
	fs::write(dir.join("notes.md"), "ignored").unwrap();

	assert_eq!(list_files(&dir, "txt").unwrap(), vec!["empty.txt", "girls.txt"]);
	assert_eq!(read_corpus(dir.join("girls.txt")).unwrap(), vec!["Ava", "Mia", "Emma"]);

	let generator = Generator::new(dir.join("girls.txt")).unwrap();
	assert_eq!(generator.name(), "girls");
	assert!(generator.contains("emma"));

	let err = Generator::new(dir.join("empty.txt")).unwrap_err();
	assert!(matches!(err, BigramError::InvalidInput(_)));

	let err = Generator::new(dir.join("missing.txt")).unwrap_err();
	assert!(matches!(err, BigramError::Io(_)));

	fs::remove_dir_all(&dir).unwrap();
}
