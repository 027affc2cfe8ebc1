//! Shares and their textual token form.
//!
//! A token is the standard base64 encoding of the ASCII string
//! `"<index>:<decimal value>"`.

use std::fmt;
use std::str::FromStr;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use num_bigint::BigUint;
use tracing::debug;

use crate::error::{Result, SssError};

#[cfg(test)]
use quickcheck::{Arbitrary, Gen};

/// A single share of a split secret, representing a point on the polynomial
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Share {
    /// The x-coordinate of the polynomial point (share index, starting at 1)
    pub index: u32,
    /// The y-coordinate of the polynomial point (share value)
    pub value: BigUint,
}

impl Share {
    pub fn new(index: u32, value: BigUint) -> Self {
        Share { index, value }
    }

    /// Encodes this share as an opaque transport token.
    pub fn to_token(&self) -> String {
        STANDARD.encode(self.to_string())
    }

    /// Decodes a transport token back into a share.
    ///
    /// Fails with [`SssError::Decode`] if the token is not valid base64, is
    /// not UTF-8, or does not hold an `index:value` pair of integers.
    pub fn from_token(token: &str) -> Result<Self> {
        let raw = STANDARD.decode(token).map_err(|err| {
            debug!(%err, "share token is not valid base64");
            SssError::Decode(format!("invalid base64 encoding: {err}"))
        })?;
        let text = String::from_utf8(raw)
            .map_err(|_| SssError::Decode("share token is not valid UTF-8".to_string()))?;
        text.parse()
    }
}

impl fmt::Display for Share {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.index, self.value)
    }
}

impl FromStr for Share {
    type Err = SssError;

    fn from_str(s: &str) -> Result<Self> {
        let (index, value) = s.split_once(':').ok_or_else(|| {
            debug!("share has no ':' separator");
            SssError::Decode("missing ':' between index and value".to_string())
        })?;

        let index: u32 = index
            .parse()
            .map_err(|err| SssError::Decode(format!("invalid share index {index:?}: {err}")))?;
        if index == 0 {
            return Err(SssError::Decode("share index must be at least 1".to_string()));
        }

        // BigUint::from_str accepts '_' separators, token values are plain digits only
        if value.is_empty() || !value.bytes().all(|b| b.is_ascii_digit()) {
            return Err(SssError::Decode(format!("invalid share value {value:?}")));
        }
        let value = BigUint::parse_bytes(value.as_bytes(), 10)
            .ok_or_else(|| SssError::Decode(format!("invalid share value {value:?}")))?;

        Ok(Share { index, value })
    }
}

/// Encodes an `(index, value)` evaluation point as a share token.
pub fn encode_share(index: u32, value: &BigUint) -> String {
    Share::new(index, value.clone()).to_token()
}

/// Decodes a share token into its `(index, value)` evaluation point.
pub fn decode_share(token: &str) -> Result<(u32, BigUint)> {
    let share = Share::from_token(token)?;
    Ok((share.index, share.value))
}

#[cfg(test)]
impl Arbitrary for Share {
    fn arbitrary(g: &mut Gen) -> Self {
        Share {
            index: u32::arbitrary(g).saturating_add(1),
            value: BigUint::from_bytes_be(&Vec::<u8>::arbitrary(g)),
        }
    }
}
