//! Shor's Algorithm - Integer Factorisation
//!
//! A hybrid driver, not a pure quantum simulation: classical trial
//! division handles primes and small factors, and the quantum
//! order-finding step is simulated classically. All arithmetic is u64
//! with 64-bit modular products, which keeps a^{r/2} mod N exact for
//! every N the simulator's register sizes admit.
//!
//! ## Algorithm (per composite)
//! 1. Pick the smallest a ≥ 2 with gcd(a, N) = 1
//! 2. Find the order r of a modulo N
//! 3. If r is even and a^{r/2} ≢ −1 (mod N), then
//!    gcd(a^{r/2} ± 1, N) splits N

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trial-division primality test
pub fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }
    let mut divisor = 3;
    while divisor * divisor <= n {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Greatest common divisor by Euclidean reduction
pub fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = b;
        b = a % b;
        a = t;
    }
    a
}

/// Modular exponentiation: base^exp mod modulus
pub fn mod_pow(mut base: u64, mut exp: u64, modulus: u64) -> u64 {
    if modulus == 1 {
        return 0;
    }
    let mut result = 1u64;
    base %= modulus;
    while exp > 0 {
        if exp % 2 == 1 {
            result = result * base % modulus;
        }
        exp /= 2;
        base = base * base % modulus;
    }
    result
}

/// Smallest r ≥ 1 with a^r ≡ 1 (mod n), or 0 when no period ≤ n exists
pub fn find_period(a: u64, n: u64) -> u64 {
    let mut value = 1u64;
    for r in 1..=n {
        value = value * a % n;
        if value == 1 {
            return r;
        }
    }
    0
}

/// Smallest prime factor of n not exceeding 100, else 1
pub fn find_small_factor(n: u64) -> u64 {
    if n % 2 == 0 {
        return 2;
    }
    let mut divisor = 3;
    while divisor * divisor <= n && divisor <= 100 {
        if n % divisor == 0 {
            return divisor;
        }
        divisor += 2;
    }
    1
}

/// One Shor split attempt on a composite.
///
/// Returns a non-trivial factor of `n`, or 1 when the attempt fails
/// (prime input, no coprime base, odd or missing period, or the
/// unlucky a^{r/2} ≡ −1 case). On success the returned factor is the
/// larger of gcd(a^{r/2} ∓ 1, n) that lies strictly between 1 and n.
pub fn shor_find_factor(n: u64) -> u64 {
    if is_prime(n) {
        return 1;
    }

    let mut base = 2;
    while base < n && gcd(base, n) != 1 {
        base += 1;
    }
    if base >= n {
        return 1;
    }

    let period = find_period(base, n);
    debug!(n, base, period, "order finding");
    if period == 0 || period % 2 != 0 {
        return 1;
    }

    let half_power = mod_pow(base, period / 2, n);
    if half_power == n - 1 {
        debug!(n, base, "unlucky case: a^(r/2) ≡ -1 (mod n)");
        return 1;
    }

    let candidates = [gcd(half_power - 1, n), gcd(half_power + 1, n)];
    candidates
        .into_iter()
        .filter(|&f| f > 1 && f < n)
        .max()
        .unwrap_or(1)
}

/// Complete prime factorisation of one integer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Factorisation {
    /// The factored integer
    pub n: u64,
    /// Prime factors in ascending order (with multiplicity)
    pub factors: Vec<u64>,
    /// False when an unsplittable composite was emitted as-is
    pub complete: bool,
}

impl Factorisation {
    /// Product-of-factors check
    pub fn verify(&self) -> bool {
        self.factors.iter().product::<u64>() == self.n
    }
}

/// Factor n completely by working through a list of pending divisors:
/// primes are emitted, small factors split classically, everything else
/// goes through [`shor_find_factor`]. A composite that no method splits
/// is emitted as-is and flags the result as incomplete.
pub fn complete_factorisation(n: u64) -> Factorisation {
    let mut factors = Vec::new();
    let mut complete = true;

    let mut pending = vec![n];
    while let Some(current) = pending.pop() {
        if current < 2 {
            continue;
        }

        if is_prime(current) {
            factors.push(current);
            continue;
        }

        let small = find_small_factor(current);
        if small > 1 {
            debug!(current, factor = small, "small factor split");
            pending.push(small);
            pending.push(current / small);
            continue;
        }

        let quantum = shor_find_factor(current);
        if quantum > 1 && quantum < current {
            debug!(current, factor = quantum, "shor split");
            pending.push(quantum);
            pending.push(current / quantum);
        } else {
            debug!(current, "unsplittable composite emitted as-is");
            factors.push(current);
            complete = false;
        }
    }

    factors.sort_unstable();
    Factorisation { n, factors, complete }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(97));
        assert!(!is_prime(91)); // 7 × 13
        assert!(is_prime(7919));
    }

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(48, 18), 6);
        assert_eq!(gcd(15, 21), 3);
        assert_eq!(gcd(17, 13), 1);
        assert_eq!(gcd(0, 5), 5);
    }

    #[test]
    fn test_mod_pow() {
        assert_eq!(mod_pow(2, 10, 1000), 24);
        assert_eq!(mod_pow(7, 2, 15), 4);
        assert_eq!(mod_pow(3, 5, 7), 5);
        assert_eq!(mod_pow(5, 0, 7), 1);
        // products near 2^15 squared stay exact in u64
        assert_eq!(mod_pow(32767, 2, 32768), 1);
    }

    #[test]
    fn test_find_period() {
        assert_eq!(find_period(2, 15), 4); // 2^4 = 16 ≡ 1
        assert_eq!(find_period(2, 77), 30);
        assert_eq!(find_period(4, 7), 3);
    }

    #[test]
    fn test_find_small_factor() {
        assert_eq!(find_small_factor(60), 2);
        assert_eq!(find_small_factor(77), 7);
        assert_eq!(find_small_factor(10403), 1); // 101 × 103, both above the cutoff
        assert_eq!(find_small_factor(13), 1);
    }

    #[test]
    fn test_shor_find_factor() {
        // 77: base 2, period 30, 2^15 ≡ 43, gcd(42,77)=7, gcd(44,77)=11
        assert_eq!(shor_find_factor(77), 11);
        // 15: base 2, period 4, 2^2 = 4, gcd(3,15)=3, gcd(5,15)=5
        assert_eq!(shor_find_factor(15), 5);
        // primes fail with 1
        assert_eq!(shor_find_factor(13), 1);
    }

    #[test]
    fn test_complete_factorisation_77() {
        let result = complete_factorisation(77);
        assert_eq!(result.factors, vec![7, 11]);
        assert!(result.complete);
        assert!(result.verify());
    }

    #[test]
    fn test_complete_factorisation_60() {
        let result = complete_factorisation(60);
        assert_eq!(result.factors, vec![2, 2, 3, 5]);
        assert!(result.verify());
    }

    #[test]
    fn test_complete_factorisation_prime() {
        let result = complete_factorisation(97);
        assert_eq!(result.factors, vec![97]);
        assert!(result.complete);
    }

    #[test]
    fn test_complete_factorisation_large_semiprime() {
        // both factors above the small-factor cutoff, so the split goes
        // through the simulated order finding
        let result = complete_factorisation(10403);
        assert_eq!(result.factors, vec![101, 103]);
        assert!(result.complete);
        assert!(result.verify());
    }

    #[test]
    fn test_complete_factorisation_trivial() {
        assert!(complete_factorisation(1).factors.is_empty());
        assert_eq!(complete_factorisation(2).factors, vec![2]);
    }
}
