use crate::mt_rand::{B, C, L, S, T, U};

/// Recover the state word that `temper` turned into `value`.
pub fn untemper(value: u32) -> u32 {
    let mut v = invert_right_shift_xor(value, L);
    v = invert_left_shift_and_xor(v, T, C);
    v = invert_left_shift_and_xor(v, S, B);
    invert_right_shift_xor(v, U)
}

// Here we're reversing the operation:
//      x = y ^ (y >> k)
// Expanding y = x ^ (y >> k) repeatedly gives
//      y = x ^ (x >> k) ^ (x >> 2k) ^ (x >> 3k) ^ ...
// and every term shifted by 32 or more vanishes. Applying the shift-XOR with
// doubling shifts builds that series in log2(32 / k) steps: for k = 18 a
// single step is enough, for k = 11 we need two (11 and 22).
pub fn invert_right_shift_xor(x: u32, shift: u32) -> u32 {
    let mut y = x;
    let mut s = shift;
    while s < 32 {
        y ^= y >> s;
        s *= 2;
    }
    y
}

// Here we're reversing the operation:
//     x = y ^ ((y << shift) & mask)
// The shifted term is zero in the lowest `shift` bits, so those bits of y
// equal those of x. Each following block of `shift` bits of y depends only on
// the block below it, which we've already recovered, so we rebuild y one
// block at a time, from the bottom up.
pub fn invert_left_shift_and_xor(x: u32, shift: u32, mask: u32) -> u32 {
    let block_mask = (1u32 << shift) - 1;
    let mut y = x;
    for offset in (shift..32).step_by(shift as usize) {
        let known = (y >> (offset - shift)) & block_mask;
        let mask_bits = (mask >> offset) & block_mask;
        y ^= (known & mask_bits) << offset;
    }
    y
}
