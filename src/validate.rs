//! Precondition checks run before any polynomial work starts.

use std::collections::HashSet;

use num_bigint::BigUint;

use crate::error::{Result, SssError};
use crate::share::Share;

/// Checks the (k, n, modulus) triple shared by splitting and recovery.
pub(crate) fn check_parameters(threshold: usize, total_shares: usize, modulus: &BigUint) -> Result<()> {
    if threshold == 0 {
        return Err(SssError::invalid("k", "must be at least 1"));
    }
    if *modulus < BigUint::from(2u32) {
        return Err(SssError::invalid("modulus", "must be at least 2"));
    }
    if threshold > total_shares {
        return Err(SssError::invalid("k", "is greater than 'n'"));
    }
    if u32::try_from(total_shares).is_err() {
        return Err(SssError::invalid("n", "exceeds the largest share index"));
    }
    // share indexes 1..=n must all be distinct non-zero field elements
    if BigUint::from(total_shares) >= *modulus {
        return Err(SssError::invalid(
            "n",
            "is not smaller than the modular arithmetic value",
        ));
    }
    Ok(())
}

/// Checks that a secret is present and encodes to a field element.
pub(crate) fn check_secret(secret: &[u8], modulus: &BigUint) -> Result<()> {
    if secret.is_empty() {
        return Err(SssError::invalid("secret", "is empty"));
    }
    if BigUint::from_bytes_be(secret) >= *modulus {
        return Err(SssError::invalid(
            "secret",
            "is not smaller than the modular arithmetic value",
        ));
    }
    Ok(())
}

/// Checks that a recovery set is non-empty and meets the threshold.
pub(crate) fn check_share_count(share_count: usize, threshold: usize) -> Result<()> {
    if share_count == 0 {
        return Err(SssError::invalid("shares", "list of shares is empty"));
    }
    if share_count < threshold {
        return Err(SssError::NotEnoughShares {
            threshold,
            share_count,
        });
    }
    Ok(())
}

/// Checks that no two shares in a recovery set claim the same index.
pub(crate) fn check_distinct_indexes(shares: &[Share]) -> Result<()> {
    let mut seen_indices = HashSet::with_capacity(shares.len());
    for share in shares {
        if !seen_indices.insert(share.index) {
            return Err(SssError::invalid("shares", "contains duplicate share indices"));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reason(err: SssError) -> (&'static str, &'static str) {
        match err {
            SssError::InvalidArgument { param, reason } => (param, reason),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_parameter_checks() {
        let p = BigUint::from(13u32);

        assert!(check_parameters(4, 7, &p).is_ok());
        assert!(check_parameters(7, 7, &p).is_ok());
        assert!(check_parameters(1, 1, &p).is_ok());

        assert_eq!(reason(check_parameters(0, 7, &p).unwrap_err()).0, "k");
        assert_eq!(
            reason(check_parameters(7, 3, &p).unwrap_err()),
            ("k", "is greater than 'n'")
        );
        assert_eq!(reason(check_parameters(2, 13, &p).unwrap_err()).0, "n");
        assert_eq!(reason(check_parameters(7, 11, &BigUint::from(9u32)).unwrap_err()).0, "n");
        assert_eq!(
            reason(check_parameters(1, 1, &BigUint::from(1u32)).unwrap_err()).0,
            "modulus"
        );
    }

    #[test]
    fn test_secret_checks() {
        let p = BigUint::from(257u32);

        assert!(check_secret(&[0xff], &p).is_ok());
        assert!(check_secret(&[0x01, 0x00], &p).is_ok());
        assert_eq!(reason(check_secret(&[], &p).unwrap_err()), ("secret", "is empty"));
        assert_eq!(reason(check_secret(&[0x01, 0x01], &p).unwrap_err()).0, "secret");
        assert_eq!(reason(check_secret(b"too long", &p).unwrap_err()).0, "secret");
    }

    #[test]
    fn test_share_count_checks() {
        assert!(check_share_count(4, 4).is_ok());
        assert!(check_share_count(7, 4).is_ok());
        assert_eq!(reason(check_share_count(0, 4).unwrap_err()).0, "shares");
        assert_eq!(
            check_share_count(3, 4),
            Err(SssError::NotEnoughShares {
                threshold: 4,
                share_count: 3,
            })
        );
    }

    #[test]
    fn test_duplicate_indexes() {
        let a = Share::new(1, BigUint::from(5u32));
        let b = Share::new(2, BigUint::from(5u32));
        assert!(check_distinct_indexes(&[a.clone(), b.clone()]).is_ok());
        assert!(check_distinct_indexes(&[a.clone(), b, a]).is_err());
    }
}
