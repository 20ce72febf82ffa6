use std::fmt;

use alloy::primitives::U256;
use tokenkit_error::TokenkitError;
use tokenkit_ethereum::units::{format_units, parse_units};

/// Largest decimals value a U256 quantity can be scaled by
const MAX_DECIMALS: u8 = 77;

/// A token quantity together with the decimals it is denominated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenAmount {
    /// Quantity in the token's smallest unit
    pub raw: U256,
    /// Decimals of the token
    pub decimals: u8,
}

impl TokenAmount {
    /// Wraps a raw on-chain quantity.
    pub const fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Scales decimal text such as `"1000"` or `"2.5"` by `decimals`.
    pub fn parse(text: &str, decimals: u8) -> tokenkit_error::Result<Self> {
        let raw = parse_units(text, decimals)?;
        Ok(Self { raw, decimals })
    }

    /// Checks that `text` is a well-formed unsigned decimal number, before the token's
    /// decimals are known. Scaling can still fail later if `text` carries
    /// more fractional digits than the token supports.
    pub fn check_text(text: &str) -> tokenkit_error::Result<()> {
        let text = text.trim();
        let fraction_len = text.split_once('.').map(|(_, f)| f.len()).unwrap_or(0);
        let decimals = u8::try_from(fraction_len)
            .ok()
            .filter(|d| *d <= MAX_DECIMALS)
            .ok_or_else(|| TokenkitError::InvalidAmount {
                value: text.to_string(),
                reason: "too many fractional digits".to_string(),
            })?;
        parse_units(text, decimals).map(|_| ()).map_err(Into::into)
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.raw.is_zero()
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_units(self.raw, self.decimals))
    }
}
