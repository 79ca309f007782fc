//! Randomized checks of the continuation signal merge.

use belfry_resolve::tower::ProcessResult;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

const ALL: [ProcessResult; 3] = [
    ProcessResult::NotFound,
    ProcessResult::Found,
    ProcessResult::Stop,
];

fn random_result(rng: &mut StdRng) -> ProcessResult {
    ALL[rng.gen_range(0..ALL.len())]
}

fn random_sequence(rng: &mut StdRng) -> Vec<ProcessResult> {
    let len = rng.gen_range(0..12);
    (0..len).map(|_| random_result(rng)).collect()
}

fn fold(results: &[ProcessResult]) -> ProcessResult {
    results
        .iter()
        .fold(ProcessResult::NotFound, |acc, &r| acc + r)
}

#[test]
fn merge_is_commutative_and_associative() {
    let mut rng = StdRng::seed_from_u64(0x5eed);
    for _ in 0..1000 {
        let (a, b, c) = (
            random_result(&mut rng),
            random_result(&mut rng),
            random_result(&mut rng),
        );
        assert_eq!(a + b, b + a);
        assert_eq!((a + b) + c, a + (b + c));
    }
}

#[test]
fn fold_is_independent_of_order() {
    let mut rng = StdRng::seed_from_u64(42);
    for _ in 0..500 {
        let sequence = random_sequence(&mut rng);
        let mut reversed = sequence.clone();
        reversed.reverse();
        let mut sorted = sequence.clone();
        sorted.sort();
        assert_eq!(fold(&sequence), fold(&reversed));
        assert_eq!(fold(&sequence), fold(&sorted));
    }
}

#[test]
fn fold_matches_the_three_rules() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..500 {
        let sequence = random_sequence(&mut rng);
        let expected = if sequence.contains(&ProcessResult::Stop) {
            ProcessResult::Stop
        } else if sequence.contains(&ProcessResult::Found) {
            ProcessResult::Found
        } else {
            ProcessResult::NotFound
        };
        assert_eq!(fold(&sequence), expected, "{sequence:?}");
    }
}

#[test]
fn identity_and_absorbing_elements() {
    for x in ALL {
        assert_eq!(ProcessResult::NotFound + x, x);
        assert_eq!(ProcessResult::Stop + x, ProcessResult::Stop);
    }
}
