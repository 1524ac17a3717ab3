// SizeUnit
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::{
    anyhow,
    Result,
};
use std::str::FromStr;

/// `SizeUnit` represents the unit suffix of a size given on the command
/// line, eg. the `MB` in `10MB`.
///
/// All units are multiples of 1024, whether or not they carry the `i`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SizeUnit {
    /// Plain bytes.
    Bytes,
    /// 1024 bytes.
    Kilo,
    /// 1024^2 bytes.
    Mega,
    /// 1024^3 bytes.
    Giga,
    /// 1024^4 bytes.
    Tera,
    /// 1024^5 bytes.
    Peta,
    /// 1024^6 bytes.
    Exa,
}

impl SizeUnit {
    /// Returns the number of bytes in one of this unit.
    pub fn multiplier(&self) -> u64 {
        let exponent = match self {
            Self::Bytes => 0,
            Self::Kilo  => 1,
            Self::Mega  => 2,
            Self::Giga  => 3,
            Self::Tera  => 4,
            Self::Peta  => 5,
            Self::Exa   => 6,
        };

        1024u64.pow(exponent)
    }
}

/// This converts from the unit suffixes we accept on the command line to our
/// enum type.
impl FromStr for SizeUnit {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "" | "B"             => Ok(Self::Bytes),
            "K" | "KB" | "KIB"   => Ok(Self::Kilo),
            "M" | "MB" | "MIB"   => Ok(Self::Mega),
            "G" | "GB" | "GIB"   => Ok(Self::Giga),
            "T" | "TB" | "TIB"   => Ok(Self::Tera),
            "P" | "PB" | "PIB"   => Ok(Self::Peta),
            "E" | "EB" | "EIB"   => Ok(Self::Exa),
            _                    => Err("no match"),
        }
    }
}

/// Parse a human readable size such as `10MB`, `1.5 G` or `512` into a
/// number of bytes.
pub fn parse_size(s: &str) -> Result<u64> {
    let s = s.trim();

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(s.len());

    let (number, unit) = s.split_at(split);

    if number.is_empty() {
        return Err(anyhow!("'{}' does not start with a number", s));
    }

    let unit = SizeUnit::from_str(unit.trim())
        .map_err(|_| anyhow!("'{}' has an unknown size unit", s))?;

    let multiplier = unit.multiplier();

    // Whole numbers are handled exactly, only fractions go through f64.
    let bytes = if number.contains('.') {
        let value: f64 = number.parse()
            .map_err(|_| anyhow!("'{}' is not a valid number", number))?;

        let bytes = value * multiplier as f64;

        if bytes >= u64::MAX as f64 {
            return Err(anyhow!("'{}' is too large", s));
        }

        bytes as u64
    }
    else {
        let value: u64 = number.parse()
            .map_err(|_| anyhow!("'{}' is not a valid number", number))?;

        value.checked_mul(multiplier)
            .ok_or_else(|| anyhow!("'{}' is too large", s))?
    };

    Ok(bytes)
}
