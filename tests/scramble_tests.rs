//! Word scramble integration tests.

use proptest::prelude::*;

use valentine_engine::core::{GameRng, ScrambleConfig};
use valentine_engine::scramble::{CheckOutcome, WordScramble};

fn sorted(words: &[String]) -> Vec<String> {
    let mut words = words.to_vec();
    words.sort();
    words
}

/// "WILL YOU BE MY VALENTINE" never starts in order, whatever the seed.
#[test]
fn test_scramble_never_presents_answer() {
    for seed in 0..500 {
        let scramble =
            WordScramble::from_config(&ScrambleConfig::default(), &mut GameRng::new(seed)).unwrap();
        assert_ne!(scramble.words(), scramble.target(), "seed {seed}");
        assert_eq!(sorted(scramble.words()), sorted(scramble.target()));
    }
}

/// The hint shows up after the configured number of misses.
#[test]
fn test_hint_after_misses() {
    let config = ScrambleConfig::default().with_hint_after(2);
    let mut scramble = WordScramble::from_config(&config, &mut GameRng::new(9)).unwrap();

    for expected in [false, false, true] {
        assert_eq!(scramble.check_answer(), CheckOutcome::Incorrect);
        assert_eq!(scramble.hint_visible(), expected);
    }

    let answer = scramble.target().to_vec();
    assert!(scramble.reorder(answer));
    assert_eq!(scramble.check_answer(), CheckOutcome::Correct);
    assert!(!scramble.hint_visible());
}

#[test]
fn test_reorder_rejects_foreign_words() {
    let mut scramble =
        WordScramble::from_config(&ScrambleConfig::default(), &mut GameRng::new(4)).unwrap();
    let before = scramble.words().to_vec();

    let mut foreign = before.clone();
    foreign[0] = "MAYBE".to_string();
    assert!(!scramble.reorder(foreign));
    assert!(!scramble.reorder(before[1..].to_vec()));
    assert_eq!(scramble.words(), before.as_slice());
}

proptest! {
    #[test]
    fn moves_keep_the_same_words(
        seed in any::<u64>(),
        moves in prop::collection::vec((0usize..7, 0usize..7), 0..30),
    ) {
        let mut scramble =
            WordScramble::from_config(&ScrambleConfig::default(), &mut GameRng::new(seed)).unwrap();
        let expected = sorted(scramble.target());

        for (from, to) in moves {
            let len = scramble.words().len();
            let before = scramble.words().to_vec();
            let moved = scramble.move_word(from, to);
            prop_assert_eq!(moved, from < len && to < len);
            if !moved {
                prop_assert_eq!(scramble.words(), before.as_slice());
            }
            prop_assert_eq!(sorted(scramble.words()), expected.clone());
        }
    }
}
