use crate::units;
use crate::Error;
use alloy::primitives::U256;
use std::fmt;
use std::ops;

/// Number of decimals of the native currency
pub const ETHER_DECIMALS: u8 = 18;

/// An amount of the native currency, held as an exact number of wei.
#[derive(Default, PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub struct EthereumAmount {
    /// The number of wei (U256) in the amount
    pub wei: U256,
}

impl ops::Add<Self> for EthereumAmount {
    type Output = Result<Self, Error>;

    fn add(self, rhs: Self) -> Result<Self, Error> {
        Ok(Self {
            wei: self.wei.checked_add(rhs.wei).ok_or(Error::Overflow(format!(
                "Overflow in U256 when adding {} to {}",
                self.wei, rhs.wei
            )))?,
        })
    }
}

impl ops::Sub for EthereumAmount {
    type Output = Result<Self, Error>;

    fn sub(self, rhs: Self) -> Result<Self, Error> {
        Ok(Self {
            wei: self.wei.checked_sub(rhs.wei).ok_or(Error::Overflow(format!(
                "Underflow in U256 when subtracting {} from {}",
                rhs.wei, self.wei
            )))?,
        })
    }
}

impl EthereumAmount {
    /// Creates a new zero EthereumAmount
    pub const fn zero() -> Self {
        Self { wei: U256::ZERO }
    }

    /// Creates a new EthereumAmount from the wei amount (U256)
    pub const fn from_wei(wei: U256) -> Self {
        Self { wei }
    }

    /// Parses a decimal ETH string such as `"0.01"` exactly, without going through floats.
    pub fn parse_ether(text: &str) -> Result<Self, Error> {
        units::parse_units(text, ETHER_DECIMALS).map(Self::from_wei)
    }

    /// Returns the number of wei in the amount
    pub fn wei(&self) -> U256 {
        self.wei
    }

    /// Decimal ETH text, e.g. `"10000.0"` or `"0.05"`
    pub fn ether(&self) -> String {
        units::format_units(self.wei, ETHER_DECIMALS)
    }

    /// Returns true if the amount is zero
    pub fn is_zero(&self) -> bool {
        self.wei.is_zero()
    }
}

impl From<U256> for EthereumAmount {
    fn from(wei: U256) -> Self {
        Self::from_wei(wei)
    }
}

impl fmt::Display for EthereumAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ETH", self.ether())
    }
}
