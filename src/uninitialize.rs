use crate::mt_rand::F_INV;

/// Recover `state[i - 1]` from `state[i]`.
///
/// The initializer computes `state[i] = F * (s ^ (s >> 30)) + i`. Multiplying
/// by the modular inverse of `F` undoes the multiplication, and `s ^ (s >> 30)`
/// only touches the bottom two bits from the top two, which are left intact,
/// so applying it again restores `s`.
pub fn uninitialize_step(value: u32, i: u32) -> u32 {
    let mixed = F_INV.wrapping_mul(value.wrapping_sub(i));
    mixed ^ (mixed >> 30)
}

/// Walk an initial state word at `position` all the way back to the seed.
pub fn uninitialize(value: u32, position: usize) -> u32 {
    (1..=position as u32)
        .rev()
        .fold(value, uninitialize_step)
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::mt_rand::{initialize_state, N};

    use rand::{rngs::StdRng, Rng, SeedableRng};
    use rstest::rstest;

    #[rstest]
    #[case(0)]
    #[case(1)]
    #[case(5489)]
    #[case(u32::MAX)]
    fn uninitialize_step_inverts_each_initializer_step(#[case] seed: u32) {
        let state = initialize_state(seed);

        for i in 1..N {
            assert_eq!(uninitialize_step(state[i], i as u32), state[i - 1]);
        }
    }

    #[test]
    fn uninitialize_recovers_seed_from_any_position() {
        let mut rng = StdRng::from_seed([101; 32]);
        for _ in 0..200 {
            let seed: u32 = rng.gen();
            let position = rng.gen_range(1..N);
            let state = initialize_state(seed);

            assert_eq!(uninitialize(state[position], position), seed);
        }
    }

    #[test]
    fn uninitialize_at_position_zero_is_identity() {
        assert_eq!(uninitialize(12345, 0), 12345);
    }
}
