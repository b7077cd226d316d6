use crate::mt_rand::{initialize_state, reload, Flavour, A, PAIR_DISTANCE};
use crate::uninitialize::{uninitialize, uninitialize_step};

/// Recover every seed consistent with two untempered state words, `first` at
/// `offset` and `second` at `offset + PAIR_DISTANCE`, of the first reloaded
/// state.
///
/// Reloading is done in place, so by the time `second` is written its `m`
/// operand is the already-reloaded `first`:
///
/// ```text
/// second = first ^ (((s227 & 0x80000000) | (s228 & 0x7fffffff)) >> 1) ^ (gate * A)
/// ```
///
/// where `s227` and `s228` are the initial state words at `offset + 227` and
/// `offset + 228`. XOR-ing the two observations leaves only the twist term,
/// which gives bits 1-30 of `s228` and bit 31 of `s227`. The remaining two
/// bits of `s228` are guessed; `s227` follows from `s228` by one initializer
/// step back, which filters the guesses. Each survivor is walked back to a
/// seed and checked by replaying the generator up to `first`.
///
/// The caller guarantees `offset + PAIR_DISTANCE + 1 < N`.
pub fn unreload_step(first: u32, second: u32, offset: usize, flavour: Flavour) -> Vec<u32> {
    let position = offset + PAIR_DISTANCE + 1;

    let mut x = first ^ second;
    // The twist mask is the only thing that can set the top bit.
    let gate = x >> 31;
    if gate == 1 {
        x ^= A;
    }
    let s227_31 = (x >> 30) & 1;
    x &= !(1 << 30);
    let s228_1_30 = x << 1;

    let mut seeds = Vec::new();
    for s228_0 in 0..2u32 {
        if flavour == Flavour::Modern && s228_0 != gate {
            continue;
        }
        for s228_31 in 0..2u32 {
            let s228 = s228_1_30 | (s228_31 << 31) | s228_0;

            let s227 = uninitialize_step(s228, position as u32);
            if flavour == Flavour::Legacy && s227 & 1 != gate {
                continue;
            }
            if s227 >> 31 != s227_31 {
                continue;
            }

            let seed = uninitialize(s228, position);
            if replays_to(seed, offset, first, flavour) {
                seeds.push(seed);
            }
        }
    }
    seeds
}

fn replays_to(seed: u32, offset: usize, expected: u32, flavour: Flavour) -> bool {
    let mut state = initialize_state(seed);
    reload(&mut state, flavour);
    state[offset] == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::mt_rand::N;

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    fn reloaded_state(seed: u32, flavour: Flavour) -> [u32; N] {
        let mut state = initialize_state(seed);
        reload(&mut state, flavour);
        state
    }

    #[rstest]
    #[case(Flavour::Legacy, 0)]
    #[case(Flavour::Legacy, 395)]
    #[case(Flavour::Modern, 0)]
    #[case(Flavour::Modern, 395)]
    fn unreload_step_recovers_seed_from_exact_state_words(
        #[case] flavour: Flavour,
        #[case] offset: usize,
    ) {
        let mut rng = StdRng::from_seed([101; 32]);
        for _ in 0..50 {
            let seed: u32 = rng.gen();
            let state = reloaded_state(seed, flavour);

            let seeds = unreload_step(
                state[offset],
                state[offset + PAIR_DISTANCE],
                offset,
                flavour,
            );

            assert!(seeds.contains(&seed));
        }
    }

    #[test]
    fn unreload_step_rejects_unrelated_state_words() {
        let mut rng = StdRng::from_seed([3; 32]);
        let mut n_matches = 0;
        for _ in 0..100 {
            let seeds = unreload_step(rng.gen(), rng.gen(), 42, Flavour::Modern);
            n_matches += seeds.len();
        }

        assert_eq!(n_matches, 0);
    }

    #[test]
    fn unreload_step_only_accepts_seeds_that_replay() {
        let seed = 0xc0ffee;
        let offset = 17;
        let state = reloaded_state(seed, Flavour::Legacy);

        let seeds = unreload_step(
            state[offset],
            state[offset + PAIR_DISTANCE],
            offset,
            Flavour::Legacy,
        );

        for candidate in seeds {
            assert_eq!(
                reloaded_state(candidate, Flavour::Legacy)[offset],
                state[offset]
            );
        }
    }
}
