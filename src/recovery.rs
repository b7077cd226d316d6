use crate::mt_rand::{Flavour, N, PAIR_DISTANCE};
use crate::untemper::untemper;
use crate::unreload::unreload_step;

use rayon::prelude::*;

/// Largest number of draws that may precede the first observed output. The
/// initial state word at `offset + PAIR_DISTANCE + 1` must still be inside the
/// array.
pub const MAX_OFFSET: usize = N - PAIR_DISTANCE - 2;

const MT_RAND_MAX: u32 = 0x7fffffff;

/// Recover the seed of PHP's `mt_rand()` from two of its outputs.
///
/// `first` is the output after `offset` draws since seeding, `second` the
/// output `PAIR_DISTANCE` draws after `first`. Both are values as returned by
/// `mt_rand()`, so their lowest bit was dropped; all four combinations are
/// tried.
///
/// Returns the seeds that reproduce `first`, in discovery order. An error is
/// returned for out-of-range inputs or if no seed could be found.
pub fn recover_seed(
    first: u32,
    second: u32,
    offset: usize,
    flavour: Flavour,
) -> Result<Vec<u32>, String> {
    if offset > MAX_OFFSET {
        return Err(format!(
            "offset {offset} is too large: at most {MAX_OFFSET} draws may precede the first output"
        ));
    }
    for value in [first, second] {
        if value > MT_RAND_MAX {
            return Err(format!(
                "{value} is not an mt_rand() output: values are at most {MT_RAND_MAX}"
            ));
        }
    }

    let seeds = (0..4u32)
        .into_par_iter()
        .map(|low_bits| {
            let first_state = untemper((first << 1) | (low_bits & 1));
            let second_state = untemper((second << 1) | (low_bits >> 1));
            unreload_step(first_state, second_state, offset, flavour)
        })
        .collect::<Vec<Vec<u32>>>()
        .concat();

    if seeds.is_empty() {
        return Err("no seed reproduces the observed outputs".to_string());
    }
    Ok(seeds)
}
