//! Prime capacity sizing used by both tables

/// Returns true if `n` is a prime number.
///
/// Trial division by odd factors up to the square root. `1` is not prime.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let mut factor: usize = 3;
    // factor <= n / factor is factor^2 <= n without the overflow
    while factor <= n / factor {
        if n % factor == 0 {
            return false;
        }
        factor += 2;
    }
    true
}

/// Rounds `capacity` up to an odd number, then up to the nearest prime.
///
/// Never lowers the value. Even inputs are bumped first, so `next_prime(2)` is `3`
/// and `next_prime(0)` is `3` as well.
#[must_use]
pub fn next_prime(capacity: usize) -> usize {
    let mut candidate = if capacity % 2 == 0 { capacity.saturating_add(1) } else { capacity };
    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }
    candidate
}

/// Capacity used by a resize: a prime request is taken as is, anything else goes
/// through [`next_prime`].
#[must_use]
pub fn prime_capacity(requested: usize) -> usize {
    if is_prime(requested) { requested } else { next_prime(requested) }
}
