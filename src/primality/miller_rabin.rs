// src/primality/miller_rabin.rs

use crate::integer_math::mul_mod::mul_mod_wide;
use log::trace;

/// Hashed witness table for the deterministic 32-bit strong-probable-prime
/// test (Forisek & Jancina, "Fast Primality Testing for Integers That Fit
/// into a Machine Word"). The table and the hash below form one fixed
/// mathematical artifact, proven sufficient for the whole 32-bit range, and
/// must be reproduced verbatim for the determinism guarantee to hold.
const FJ_WITNESSES: [u16; 256] = [
    15591, 2018, 166, 7429, 8064, 16045, 10503, 4399, 1949, 1295, 2776, 3620, 560, 3128, 5212,
    2657, 2300, 2021, 4652, 1471, 9336, 4018, 2398, 20462, 10277, 8028, 2213, 6219, 620, 3763,
    4852, 5012, 3185, 1333, 6227, 5298, 1074, 2391, 5113, 7061, 803, 1269, 3875, 422, 751, 580,
    4729, 10239, 746, 2951, 556, 2206, 3778, 481, 1522, 3476, 481, 2487, 3266, 5633, 488, 3373,
    6441, 3344, 17, 15105, 1490, 4154, 2036, 1882, 1813, 467, 3307, 14042, 6371, 658, 1005, 903,
    737, 1887, 7447, 1888, 2848, 1784, 7559, 3400, 951, 13969, 4304, 177, 41, 19875, 3110, 13221,
    8726, 571, 7043, 6943, 1199, 352, 6435, 165, 1169, 3315, 978, 233, 3003, 2562, 2994, 10587,
    10030, 2377, 1902, 5354, 4447, 1555, 263, 27027, 2283, 305, 669, 1912, 601, 6186, 429, 1930,
    14873, 1784, 1661, 524, 3577, 236, 2360, 6146, 2850, 55637, 1753, 4178, 8466, 222, 2579,
    2743, 2031, 2226, 2276, 374, 2132, 813, 23788, 1610, 4422, 5159, 1725, 3597, 3366, 14336,
    579, 165, 1375, 10018, 12616, 9816, 1371, 536, 1867, 10864, 857, 2206, 5788, 434, 8085,
    17618, 727, 3639, 1595, 4944, 2129, 2029, 8195, 8344, 6232, 9183, 8126, 1870, 3296, 7455,
    8947, 25017, 541, 19115, 368, 566, 5674, 411, 522, 1027, 8215, 2050, 6544, 10049, 614, 774,
    2333, 3007, 35201, 4706, 1152, 1785, 1028, 1540, 3743, 493, 4474, 2521, 26845, 8354, 864,
    18915, 5465, 2447, 42, 4511, 1660, 166, 1249, 6259, 2553, 304, 272, 7286, 73, 6554, 899,
    2816, 5197, 13330, 7054, 2818, 3199, 811, 922, 350, 7514, 4452, 3449, 2663, 4708, 418, 1621,
    1171, 3471, 88, 11345, 412, 1559, 194,
];

/// Seven bases sufficient for a deterministic strong-probable-prime answer
/// over the entire unsigned 64-bit range (Sinclair's set).
const WITNESSES_64: [u64; 7] = [2, 325, 9375, 28178, 450775, 9780504, 1795265022];

/// The companion hash for [`FJ_WITNESSES`]; selects the single witness to
/// test a 32-bit candidate against. Fixed artifact - do not simplify.
fn fj_hash(n: u32) -> usize {
    let mut h = n;
    h = ((h >> 16) ^ h).wrapping_mul(0x45d9f3b);
    h = ((h >> 16) ^ h).wrapping_mul(0x45d9f3b);
    h = (h >> 16) ^ h;
    (h & 255) as usize
}

/// Deterministic primality test for 32-bit integers: trial division by
/// 2, 3, 5, 7, then a single Miller-Rabin round against the hashed witness.
/// Survivors of the trial division below 121 = 11^2 are prime outright.
pub fn is_prime_u32(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    for p in [2u32, 3, 5, 7] {
        if n % p == 0 {
            return n == p;
        }
    }
    if n < 121 {
        return true;
    }
    let witness = FJ_WITNESSES[fj_hash(n)] as u64;
    trace!("32-bit candidate {} hashed to witness {}", n, witness);
    strong_probable_prime(n as u64, witness)
}

/// Deterministic primality test for 64-bit integers: trial division by
/// 2, 3, 5, 7, then Miller-Rabin rounds against the seven fixed bases. A
/// candidate surviving all rounds is definitively prime.
pub fn is_prime_u64(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    for p in [2u64, 3, 5, 7] {
        if n % p == 0 {
            return n == p;
        }
    }
    if n < 121 {
        return true;
    }
    for &base in &WITNESSES_64 {
        if base % n == 0 {
            continue; // witness collapses to zero, round is vacuous
        }
        if !strong_probable_prime(n, base) {
            trace!("{} is composite, witnessed by base {}", n, base);
            return false;
        }
    }
    true
}

/// Magnitude dispatch: the hashed single-round test for values that fit in
/// 32 bits, the seven-base test above that.
pub fn is_prime(n: u64) -> bool {
    if n <= u32::MAX as u64 {
        is_prime_u32(n as u32)
    } else {
        is_prime_u64(n)
    }
}

/// One strong-probable-prime round for odd `n > 2`.
///
/// Writes `n - 1 = d * 2^s` with `d` odd and computes `x = base^d mod n`.
/// The round passes when `x` is 1, or when some `x` in the first `s`
/// squarings equals `n - 1`; anything else witnesses compositeness.
fn strong_probable_prime(n: u64, base: u64) -> bool {
    debug_assert!(n > 2 && n & 1 == 1);
    let mut d = n - 1;
    let mut s = 0u32;
    while d & 1 == 0 {
        d >>= 1;
        s += 1;
    }
    let mut x = pow_mod_wide(base % n, d, n);
    if x == 1 || x == n - 1 {
        return true;
    }
    for _ in 1..s {
        x = mul_mod_wide(x, x, n);
        if x == n - 1 {
            return true;
        }
    }
    false
}

// Widening exponentiation so the full u64 range is covered; the generic
// reducer paths cap out at 2^63.
fn pow_mod_wide(base: u64, mut exponent: u64, n: u64) -> u64 {
    let mut result = 1u64;
    let mut base = base % n;
    while exponent > 0 {
        if exponent & 1 == 1 {
            result = mul_mod_wide(result, base, n);
        }
        base = mul_mod_wide(base, base, n);
        exponent >>= 1;
    }
    result
}
