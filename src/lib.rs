//! (k, n) threshold secret sharing over a large prime field.
//!
//! A secret is split into n shares such that any k of them reconstruct it,
//! while k-1 or fewer reveal nothing about it. Shares travel as opaque text
//! tokens (see [`share`]). Based on Adi Shamir's paper "How to Share a
//! Secret" (Communications of the ACM, 1979), with one deliberate variation:
//! the term for coefficient j at point x is `(aⱼ·x)^j`, not `aⱼ·x^j`. Tokens
//! produced here are therefore only recoverable by implementations using the
//! same rule.
//!
//! # Known limitations
//!
//! * The secret is carried as the big-endian integer of its bytes, so leading
//!   zero bytes are lost on recovery.
//! * Shares carry no integrity protection. A tampered or mismatched share is
//!   accepted and silently produces a wrong secret.
//! * Recovery depends on the caller-declared n. Passing an n other than the
//!   one used when splitting can change the result without any error.
use std::collections::HashSet;

use num_bigint::{BigUint, RandBigInt};
use num_traits::identities::{One, Zero};
use rand::{CryptoRng, Rng};
use tracing::{debug, trace};

#[cfg(test)]
extern crate quickcheck;
#[cfg(test)]
#[macro_use]
extern crate quickcheck_macros;

pub mod constants;
pub mod error;
pub mod share;
mod validate;

pub use constants::default_modulus;
pub use error::{Result, SssError};
pub use share::{decode_share, encode_share, Share};

/// A configured (k, n) sharing scheme over a fixed prime field
#[derive(Clone, Debug)]
pub struct Scheme {
    /// Prime modulus defining the finite field ℤ/pℤ
    prime_modulus: BigUint,
    /// Minimum number of shares needed to reconstruct (k)
    threshold: usize,
    /// Total number of shares to generate (n)
    total_shares: usize,
}

impl Scheme {
    /// Creates a new scheme with the specified parameters.
    ///
    /// # Arguments
    /// * `threshold` - Minimum number of shares needed to reconstruct the secret (k)
    /// * `total_shares` - Total number of shares to generate (n)
    /// * `prime_modulus` - Prime number defining the finite field. Must be larger
    ///                     than both the secret and total_shares. Primality is
    ///                     not checked.
    ///
    /// # Returns
    /// * `Ok(Scheme)` - If parameters are valid
    /// * `Err(SssError::InvalidArgument)` - If k is 0, k > n, the modulus is
    ///   below 2, or n is not smaller than the modulus
    ///
    /// # Example
    /// ```
    /// use num_bigint::BigUint;
    /// use prime_shamir::Scheme;
    ///
    /// let prime = BigUint::from(257u32);
    /// let scheme = Scheme::new(3, 5, prime).unwrap();
    /// ```
    pub fn new(threshold: usize, total_shares: usize, prime_modulus: BigUint) -> Result<Self> {
        validate::check_parameters(threshold, total_shares, &prime_modulus)?;

        Ok(Scheme {
            prime_modulus,
            threshold,
            total_shares,
        })
    }

    /// Creates a new scheme over the built-in 2048-bit prime.
    pub fn with_default_modulus(threshold: usize, total_shares: usize) -> Result<Self> {
        Self::new(threshold, total_shares, default_modulus().clone())
    }

    pub fn threshold(&self) -> usize {
        self.threshold
    }

    pub fn total_shares(&self) -> usize {
        self.total_shares
    }

    pub fn prime_modulus(&self) -> &BigUint {
        &self.prime_modulus
    }

    /// Splits a secret into n shares where k shares are required to reconstruct.
    ///
    /// Random coefficients are drawn from the thread-local CSPRNG.
    ///
    /// # Example
    /// ```
    /// # use num_bigint::BigUint;
    /// # use prime_shamir::Scheme;
    /// # let scheme = Scheme::new(3, 5, BigUint::from(257u32)).unwrap();
    /// let shares = scheme.split_secret(&[123]).unwrap();
    /// assert_eq!(shares.len(), 5);
    /// ```
    pub fn split_secret(&self, secret: &[u8]) -> Result<Vec<Share>> {
        self.split_secret_with_rng(secret, &mut rand::thread_rng())
    }

    /// Splits a secret using the given randomness source for the coefficients.
    ///
    /// # Returns
    /// A vector of n shares with indexes 1..=n, in order. Nothing is returned
    /// if the secret is empty or not smaller than the modulus.
    pub fn split_secret_with_rng<R>(&self, secret: &[u8], rng: &mut R) -> Result<Vec<Share>>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        validate::check_secret(secret, &self.prime_modulus)?;
        debug!(
            threshold = self.threshold,
            total_shares = self.total_shares,
            modulus_bits = self.prime_modulus.bits(),
            "splitting secret"
        );

        let coefficients = self.create_polynomial(&BigUint::from_bytes_be(secret), rng);

        // n was checked to fit the u32 index space
        Ok((1..=self.total_shares as u32)
            .map(|x| Share::new(x, self.evaluate_polynomial(&coefficients, x)))
            .collect())
    }

    /// Splits a secret straight into transport tokens.
    pub fn split_to_tokens(&self, secret: &[u8]) -> Result<Vec<String>> {
        Ok(self
            .split_secret(secret)?
            .iter()
            .map(Share::to_token)
            .collect())
    }

    /// Reconstructs a secret from k or more shares using Lagrange interpolation.
    ///
    /// Every supplied share takes part in the interpolation.
    ///
    /// # Returns
    /// * `Ok(Vec<u8>)` - The big-endian bytes of the reconstructed secret
    /// * `Err(SssError::NotEnoughShares)` - If fewer than k shares provided
    /// * `Err(SssError::InvalidArgument)` - If no shares or duplicate indices are given
    /// * `Err(SssError::NonInvertibleDivisor)` - If a Lagrange divider shares a
    ///   factor with the modulus (only possible for non-prime moduli)
    ///
    /// # Example
    /// ```
    /// # use num_bigint::BigUint;
    /// # use prime_shamir::Scheme;
    /// # let scheme = Scheme::new(3, 5, BigUint::from(257u32)).unwrap();
    /// # let shares = scheme.split_secret(&[123]).unwrap();
    /// let reconstructed = scheme.reconstruct_secret(&shares[0..3]).unwrap();
    /// assert_eq!(reconstructed, vec![123]);
    /// ```
    pub fn reconstruct_secret(&self, shares: &[Share]) -> Result<Vec<u8>> {
        validate::check_share_count(shares.len(), self.threshold)?;
        validate::check_distinct_indexes(shares)?;
        debug!(
            threshold = self.threshold,
            total_shares = self.total_shares,
            share_count = shares.len(),
            "reconstructing secret"
        );

        let indexes: HashSet<u32> = shares.iter().map(|share| share.index).collect();
        let mut secret = BigUint::zero();

        for share in shares {
            let weight = self.lagrange_weight(share.index, &indexes)?;
            secret += weight * &share.value;
        }

        Ok((secret % &self.prime_modulus).to_bytes_be())
    }

    /// Decodes transport tokens and reconstructs the secret from them.
    ///
    /// The share count is checked before any token is decoded, and a single
    /// malformed token fails the whole call.
    pub fn recover_from_tokens<S: AsRef<str>>(&self, tokens: &[S]) -> Result<Vec<u8>> {
        validate::check_share_count(tokens.len(), self.threshold)?;

        let shares = tokens
            .iter()
            .map(|token| Share::from_token(token.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        self.reconstruct_secret(&shares)
    }

    /// Creates the polynomial coefficients [a₀, a₁, ..., aₖ₋₁] where:
    /// - a₀ is the secret
    /// - all other coefficients are random COEFFICIENT_BITS-bit integers
    pub(crate) fn create_polynomial<R>(&self, secret: &BigUint, rng: &mut R) -> Vec<BigUint>
    where
        R: Rng + CryptoRng + ?Sized,
    {
        let mut coefficients = Vec::with_capacity(self.threshold);

        // a₀ = secret
        coefficients.push(secret.clone());

        for _ in 1..self.threshold {
            coefficients.push(rng.gen_biguint(constants::COEFFICIENT_BITS));
        }

        coefficients
    }

    /// Evaluates the polynomial at point x as `a₀ + Σⱼ (aⱼ·x)^j mod p`.
    ///
    /// Each term is reduced as it is computed, which yields the same value as
    /// reducing the unreduced sum once at the end.
    pub(crate) fn evaluate_polynomial(&self, coefficients: &[BigUint], x: u32) -> BigUint {
        let p = &self.prime_modulus;
        let x_big = BigUint::from(x);
        let mut result = BigUint::zero();

        for (j, coeff) in coefficients.iter().enumerate() {
            if j == 0 {
                result += coeff;
            } else {
                let base = (coeff * &x_big) % p;
                result += base.modpow(&BigUint::from(j), p);
            }
        }

        result % p
    }

    /// Calculates the Lagrange weight at x = 0 for the share with index `x_i`:
    /// ∏ (0 - xⱼ) / (xᵢ - xⱼ) mod p, over the supplied indexes xⱼ ≠ xᵢ that
    /// lie in the declared range 1..=n.
    fn lagrange_weight(&self, x_i: u32, indexes: &HashSet<u32>) -> Result<BigUint> {
        let p = &self.prime_modulus;
        let zero = BigUint::zero();
        let x_i_big = BigUint::from(x_i);
        let mut dividend = BigUint::one();
        let mut divider = BigUint::one();

        for &x_j in indexes {
            if x_j == x_i || (x_j as usize) > self.total_shares {
                continue;
            }
            let x_j = BigUint::from(x_j);
            dividend = (dividend * self.mod_sub(&zero, &x_j)) % p;
            divider = (divider * self.mod_sub(&x_i_big, &x_j)) % p;
        }

        let inverse = divider.modinv(p).ok_or_else(|| {
            debug!(index = x_i, "lagrange divider is not invertible");
            SssError::NonInvertibleDivisor { index: x_i }
        })?;
        trace!(index = x_i, "computed lagrange weight");

        Ok((inverse * dividend) % p)
    }

    /// Helper function: Perform modular subtraction (a - b) mod p
    fn mod_sub(&self, a: &BigUint, b: &BigUint) -> BigUint {
        let p = &self.prime_modulus;
        let a = a % p;
        let b = b % p;
        if a >= b {
            a - b
        } else {
            p - b + a
        }
    }
}

/// Splits `secret` into n share tokens, any k of which recover it, using the
/// built-in 2048-bit prime modulus.
pub fn split_secret(threshold: usize, total_shares: usize, secret: &[u8]) -> Result<Vec<String>> {
    Scheme::with_default_modulus(threshold, total_shares)?.split_to_tokens(secret)
}

/// Splits `secret` into n share tokens over a caller-supplied modulus.
pub fn split_secret_with_modulus(
    threshold: usize,
    total_shares: usize,
    secret: &[u8],
    modulus: &BigUint,
) -> Result<Vec<String>> {
    Scheme::new(threshold, total_shares, modulus.clone())?.split_to_tokens(secret)
}

/// Recovers a secret from share tokens produced with the built-in modulus.
pub fn recover_secret<S: AsRef<str>>(
    shares: &[S],
    threshold: usize,
    total_shares: usize,
) -> Result<Vec<u8>> {
    Scheme::with_default_modulus(threshold, total_shares)?.recover_from_tokens(shares)
}

/// Recovers a secret from share tokens produced with a caller-supplied modulus.
pub fn recover_secret_with_modulus<S: AsRef<str>>(
    shares: &[S],
    threshold: usize,
    total_shares: usize,
    modulus: &BigUint,
) -> Result<Vec<u8>> {
    Scheme::new(threshold, total_shares, modulus.clone())?.recover_from_tokens(shares)
}

/// Text form of [`split_secret`], splitting the UTF-8 bytes of `secret`.
pub fn split_secret_str(threshold: usize, total_shares: usize, secret: &str) -> Result<Vec<String>> {
    split_secret(threshold, total_shares, secret.as_bytes())
}

/// Text form of [`recover_secret`]. Fails with [`SssError::Decode`] if the
/// recovered bytes are not valid UTF-8, which is what a wrong share set
/// usually produces.
pub fn recover_secret_string<S: AsRef<str>>(
    shares: &[S],
    threshold: usize,
    total_shares: usize,
) -> Result<String> {
    let bytes = recover_secret(shares, threshold, total_shares)?;
    String::from_utf8(bytes)
        .map_err(|_| SssError::Decode("recovered secret is not valid UTF-8".to_string()))
}
