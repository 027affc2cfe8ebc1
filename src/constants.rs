//! Fixed parameters shared by every split and recovery.

use num_bigint::BigUint;
use once_cell::sync::Lazy;

/// Decimal form of the default 2048-bit prime modulus.
///
/// Shares produced with the default modulus can only be recovered by an
/// implementation that embeds exactly this value.
pub const DEFAULT_MODULUS_DECIMAL: &str = concat!(
    "245720559113293755351195329167945826602678374596592470256185658746207",
    "6450558553320739630756792622700016489100210696283442112993369852358438794210",
    "4725595477908987684399239360823987907288814644076636729115759502201423105020",
    "7932506181846246412022036691429171433289611620607872875219107116333146211638",
    "1934071777672745096436913527406807723738263220232673820727823976623324591034",
    "9394598137789713667545493714631405838160707543767218593545924046939011685628",
    "7989171050623026300422792791016749179137024864798594872366781326823199925203",
    "67579969470926954118385802662261031656730172306207265443030407659763136845379307792516182551",
);

/// Bit length of the random polynomial coefficients a₁..aₖ₋₁.
pub const COEFFICIENT_BITS: u64 = 1536;

static DEFAULT_MODULUS: Lazy<BigUint> = Lazy::new(|| {
    // The literal above is all ASCII digits, parsing cannot fail.
    BigUint::parse_bytes(DEFAULT_MODULUS_DECIMAL.as_bytes(), 10).unwrap_or_default()
});

/// The default prime modulus defining the finite field ℤ/pℤ.
pub fn default_modulus() -> &'static BigUint {
    &DEFAULT_MODULUS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_modulus_size() {
        let p = default_modulus();
        assert_eq!(p.bits(), 2048);
        // odd, as any large prime must be
        assert!(p.bit(0));
    }

    #[test]
    fn test_default_modulus_round_trips_decimal() {
        assert_eq!(default_modulus().to_str_radix(10), DEFAULT_MODULUS_DECIMAL);
    }

    #[test]
    fn test_coefficients_fit_below_default_modulus() {
        assert!(COEFFICIENT_BITS < default_modulus().bits());
    }
}
