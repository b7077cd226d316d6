//! PHP's mt_rand() pseudo-random number generator.
//!
//! This is MT19937 with PHP's seeding behaviour: seeding runs the state
//! initializer and immediately reloads ("twists") the state before the first
//! draw. PHP has shipped two variants of the twist, selected by `Flavour`.

use rand::RngCore;

pub const N: usize = 624;
pub const M: usize = 397;
/// Two outputs this many draws apart are tied together by a single twist.
pub const PAIR_DISTANCE: usize = N - M;

const W: u32 = 32;
const UMASK: u32 = 0xffffffff << (W - 1);
const LMASK: u32 = 0xffffffff >> 1;
pub(crate) const A: u32 = 0x9908b0df;
pub(crate) const U: u32 = 11;
pub(crate) const S: u32 = 7;
pub(crate) const T: u32 = 15;
pub(crate) const L: u32 = 18;
pub(crate) const B: u32 = 0x9d2c5680;
pub(crate) const C: u32 = 0xefc60000;
pub(crate) const F: u32 = 1812433253;
// F * F_INV == 1 (mod 2^32)
pub(crate) const F_INV: u32 = 2520285293;

pub type State = [u32; N];

/// Which twist PHP applies when reloading the state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Flavour {
    /// PHP 5 up to 7.0: the twist mask is gated on the low bit of `u`.
    Legacy,
    /// PHP 7.1+, matching the reference MT19937: gated on the low bit of `v`.
    Modern,
}

impl Flavour {
    pub(crate) fn twist_gate(self, u: u32, v: u32) -> u32 {
        match self {
            Flavour::Legacy => u & 1,
            Flavour::Modern => v & 1,
        }
    }
}

impl TryFrom<u32> for Flavour {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Flavour::Legacy),
            1 => Ok(Flavour::Modern),
            _ => Err(format!(
                "unknown flavour '{value}': expected 0 (legacy) or 1 (modern)"
            )),
        }
    }
}

pub struct MtRand {
    state: State,
    state_idx: usize,
    flavour: Flavour,
}

impl MtRand {
    pub fn new(seed: u32, flavour: Flavour) -> Self {
        let mut state = initialize_state(seed);
        reload(&mut state, flavour);
        Self {
            state,
            state_idx: 0,
            flavour,
        }
    }

    pub fn flavour(&self) -> Flavour {
        self.flavour
    }

    /// Return the next full 32-bit tempered output.
    pub fn generate(&mut self) -> u32 {
        if self.state_idx == N {
            reload(&mut self.state, self.flavour);
            self.state_idx = 0;
        }
        let x = self.state[self.state_idx];
        self.state_idx += 1;
        temper(x)
    }

    /// Return the next value as PHP's `mt_rand()` exposes it: the top 31 bits.
    pub fn mt_rand(&mut self) -> u32 {
        self.generate() >> 1
    }
}

impl RngCore for MtRand {
    fn next_u32(&mut self) -> u32 {
        self.generate()
    }

    fn next_u64(&mut self) -> u64 {
        let lo = u64::from(self.generate());
        let hi = u64::from(self.generate());
        (hi << 32) | lo
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(4) {
            let bytes = self.generate().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

/// Expand a seed into the initial state array.
pub fn initialize_state(seed: u32) -> State {
    let mut state = [0; N];
    let mut prev = seed;
    state[0] = seed;
    for (i, state_element) in state.iter_mut().enumerate().skip(1) {
        prev = F
            .wrapping_mul(prev ^ (prev >> (W - 2)))
            .wrapping_add(i as u32);
        *state_element = prev;
    }
    state
}

/// Refresh the whole state array from itself.
///
/// The update is in place and in index order, so once `i >= N - M` the `m`
/// operand has already been refreshed, and the last position mixes in the
/// refreshed `state[0]`. This is PHP's ordering and recovery depends on it.
pub fn reload(state: &mut State, flavour: Flavour) {
    for i in 0..N {
        state[i] = twist(state[(i + M) % N], state[i], state[(i + 1) % N], flavour);
    }
}

fn twist(m: u32, u: u32, v: u32, flavour: Flavour) -> u32 {
    let mixed = (u & UMASK) | (v & LMASK);
    let mut x = m ^ (mixed >> 1);
    if flavour.twist_gate(u, v) == 1 {
        x ^= A;
    }
    x
}

pub fn temper(x: u32) -> u32 {
    let mut y: u32 = x ^ (x >> U);
    y ^= (y << S) & B;
    y ^= (y << T) & C;
    y ^ (y >> L)
}

/// Seed a generator, skip `offset` draws and return the `mt_rand()` values at
/// `offset` and `offset + PAIR_DISTANCE`.
pub fn observe_pair(seed: u32, offset: usize, flavour: Flavour) -> (u32, u32) {
    let mut rng = MtRand::new(seed, flavour);
    for _ in 0..offset {
        rng.mt_rand();
    }
    let first = rng.mt_rand();
    for _ in 0..PAIR_DISTANCE - 1 {
        rng.mt_rand();
    }
    (first, rng.mt_rand())
}
