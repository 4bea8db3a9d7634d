use std::collections::HashSet;
use std::fs;

use rand::SeedableRng;
use rand::rngs::StdRng;

use rs_ramble_core::RambleError;
use rs_ramble_core::corpus::{CLASSIC_WORKS, Corpus, DirectoryArchive};
use rs_ramble_core::model::combined::Weights;
use rs_ramble_core::model::generator::Generator;
use rs_ramble_core::model::sampler::SamplerConfig;
use rs_ramble_core::tokenize::RuleTagger;

fn corpus(text: &str) -> Corpus {
	Corpus::from_text(text, &RuleTagger::new())
}

#[test]
fn sentences_start_capitalised_and_end_with_a_period() {
	let text = corpus("The cat sat. The dog ran.");
	let generator =
		Generator::from_corpora(&text, &text, Weights::default(), 1, RuleTagger::new(), SamplerConfig::default()).unwrap();
	let vocabulary: HashSet<&str> = ["The", "cat", "sat", "dog", "ran", "."].into_iter().collect();
	let mut rng = StdRng::seed_from_u64(2024);

	for _ in 0..100 {
		let sentence = generator.generate(&mut rng).unwrap();
		let first = sentence.split(' ').next().unwrap();
		assert!(first.chars().next().unwrap().is_uppercase(), "{sentence}");
		assert!(vocabulary.contains(first), "{sentence}");
		assert!(sentence.ends_with('.'), "{sentence}");
		assert!(sentence.split(' ').all(|w| vocabulary.contains(w)), "{sentence}");
	}
}

#[test]
fn zero_weights_raise_no_sentence() {
	let text = corpus("The cat sat. The dog ran.");
	let generator = Generator::from_corpora(
		&text,
		&text,
		Weights::new(0.0, 0.0).unwrap(),
		1,
		RuleTagger::new(),
		SamplerConfig::default(),
	)
	.unwrap();

	match generator.generate(&mut StdRng::seed_from_u64(1)) {
		Err(RambleError::NoSentence { .. }) => {}
		other => panic!("expected NoSentence, got {other:?}"),
	}
}

#[test]
fn zero_classic_weight_samples_only_the_primary_corpus() {
	let primary = corpus("The cat sat on the mat. The dog sat on the rug.");
	let classic = corpus("Thou art a villain. Hence, begone.");
	let generator = Generator::from_corpora(
		&primary,
		&classic,
		Weights::new(1.0, 0.0).unwrap(),
		1,
		RuleTagger::new(),
		SamplerConfig::default(),
	)
	.unwrap();
	let primary_words: HashSet<&str> = ["The", "cat", "sat", "on", "the", "mat", "dog", "rug", "."].into_iter().collect();
	let mut rng = StdRng::seed_from_u64(8);

	for _ in 0..50 {
		let sentence = generator.generate(&mut rng).unwrap();
		assert!(sentence.split(' ').all(|w| primary_words.contains(w)), "{sentence}");
	}
}

#[test]
fn full_pipeline_from_files() {
	let dir = tempfile::tempdir().unwrap();
	let primary = dir.path().join("tns.txt");
	fs::write(
		&primary,
		"Software is eating the world. [applause] The network state is a new country. \
		 The founder builds the network. Crypto -- again -- is the future of the state.",
	)
	.unwrap();

	let gutenberg = dir.path().join("gutenberg");
	fs::create_dir(&gutenberg).unwrap();
	let plays = [
		"[The Tragedie of Hamlet by William Shakespeare 1599] Chapter 1 Who is there? Stand and unfold your self.",
		"[The Tragedie of Macbeth] When shall we three meet again? The battle is lost and won.",
		"[The Tragedie of Julius Caesar] Hence, home you idle creatures. The state is a stage.",
	];
	for (name, text) in CLASSIC_WORKS.iter().zip(plays) {
		fs::write(gutenberg.join(name), text).unwrap();
	}

	let archive = DirectoryArchive::new(&gutenberg);
	let generator =
		Generator::from_sources(&primary, &archive, Weights::default(), 2, RuleTagger::new(), SamplerConfig::default())
			.unwrap();
	let sentence = generator.generate(&mut StdRng::seed_from_u64(77)).unwrap();

	assert!(!sentence.is_empty());
	assert!(!sentence.contains('['));
	assert!(!sentence.chars().any(|c| c.is_ascii_digit()));
}

#[test]
fn loading_errors_are_not_sampling_failures() {
	let dir = tempfile::tempdir().unwrap();
	let archive = DirectoryArchive::new(dir.path());

	let missing_primary = Generator::from_sources(
		dir.path().join("absent.txt"),
		&archive,
		Weights::default(),
		3,
		RuleTagger::new(),
		SamplerConfig::default(),
	);
	assert!(matches!(missing_primary, Err(RambleError::Io { .. })));

	let primary = dir.path().join("tns.txt");
	fs::write(&primary, "The cat sat.").unwrap();
	let missing_work =
		Generator::from_sources(&primary, &archive, Weights::default(), 3, RuleTagger::new(), SamplerConfig::default());
	assert!(matches!(missing_work, Err(RambleError::MissingWork { .. })));
}
