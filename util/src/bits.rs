//! Parallel bit extract/deposit.
//!
//! With `target_feature = "bmi2"` on x86-64 (e.g. `-C target-cpu=native` on
//! Haswell or newer) these compile to single `pext`/`pdep` instructions,
//! otherwise to a loop over the set bits of the mask. Both produce the same
//! values.

/// Gathers the bits of `src` at the positions set in `mask` into the low
/// bits of the result, keeping their order.
#[inline(always)]
pub fn pext(src: u64, mask: u64) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: the bmi2 target feature is enabled at compile time
        unsafe { std::arch::x86_64::_pext_u64(src, mask) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        pext_portable(src, mask)
    }
}

/// Inverse of [`pext`]: spreads the low bits of `src` over the positions set
/// in `mask`.
#[inline(always)]
pub fn pdep(src: u64, mask: u64) -> u64 {
    #[cfg(all(target_arch = "x86_64", target_feature = "bmi2"))]
    {
        // SAFETY: the bmi2 target feature is enabled at compile time
        unsafe { std::arch::x86_64::_pdep_u64(src, mask) }
    }
    #[cfg(not(all(target_arch = "x86_64", target_feature = "bmi2")))]
    {
        pdep_portable(src, mask)
    }
}

pub const fn pext_portable(src: u64, mut mask: u64) -> u64 {
    let mut result = 0;
    let mut bit = 1;
    while mask != 0 {
        if src & mask & mask.wrapping_neg() != 0 {
            result |= bit;
        }
        mask &= mask - 1;
        bit <<= 1;
    }
    result
}

pub const fn pdep_portable(src: u64, mut mask: u64) -> u64 {
    let mut result = 0;
    let mut bit = 1;
    while mask != 0 {
        if src & bit != 0 {
            result |= mask & mask.wrapping_neg();
        }
        mask &= mask - 1;
        bit <<= 1;
    }
    result
}
