mod mt_rand;
mod recovery;
mod uninitialize;
mod unreload;
mod untemper;

pub use mt_rand::{
    initialize_state, observe_pair, reload, temper, Flavour, MtRand, State, M, N, PAIR_DISTANCE,
};
pub use recovery::{recover_seed, MAX_OFFSET};
pub use uninitialize::{uninitialize, uninitialize_step};
pub use unreload::unreload_step;
pub use untemper::{invert_left_shift_and_xor, invert_right_shift_xor, untemper};
