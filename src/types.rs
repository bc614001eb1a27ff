use anyhow::{bail, Context, Result};
use rust_decimal::Decimal;
use std::fmt;
use std::str::FromStr;

/// 3D vector of exact decimals.
///
/// SDE coordinates are astronomical-scale values published as decimal text;
/// they are kept exact end-to-end rather than routed through floating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecVector3 {
    pub x: Decimal,
    pub y: Decimal,
    pub z: Decimal,
}

impl DecVector3 {
    pub fn new(x: Decimal, y: Decimal, z: Decimal) -> Self {
        Self { x, y, z }
    }

    /// Compact storage form: the three components joined by commas.
    /// Round-trips exactly through [`DecVector3::from_delimited`].
    pub fn to_delimited(&self) -> String {
        format!("{},{},{}", self.x, self.y, self.z)
    }

    pub fn from_delimited(s: &str) -> Result<Self> {
        let parts: Vec<&str> = s.split(',').collect();
        if parts.len() != 3 {
            bail!("Expected 3 comma-separated components, got {}: {:?}", parts.len(), s);
        }
        Ok(Self {
            x: parse_decimal(parts[0])?,
            y: parse_decimal(parts[1])?,
            z: parse_decimal(parts[2])?,
        })
    }
}

impl fmt::Display for DecVector3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Parse a decimal scalar, accepting both plain and scientific notation
/// (the SDE publishes coordinates in either form depending on magnitude).
pub fn parse_decimal(s: &str) -> Result<Decimal> {
    let s = s.trim();
    if let Ok(d) = Decimal::from_str(s) {
        return Ok(d);
    }
    Decimal::from_scientific(s).with_context(|| format!("Invalid decimal value: {:?}", s))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delimited_round_trip() {
        let v = DecVector3::new(
            parse_decimal("-9061264629235370000").unwrap(),
            parse_decimal("1.5").unwrap(),
            parse_decimal("0.000000001").unwrap(),
        );
        let s = v.to_delimited();
        assert_eq!(DecVector3::from_delimited(&s).unwrap(), v);
    }

    #[test]
    fn test_from_delimited_rejects_wrong_arity() {
        assert!(DecVector3::from_delimited("1,2").is_err());
        assert!(DecVector3::from_delimited("1,2,3,4").is_err());
    }

    #[test]
    fn test_parse_decimal_scientific() {
        assert_eq!(
            parse_decimal("1.5e3").unwrap(),
            Decimal::from_str("1500").unwrap()
        );
    }

    #[test]
    fn test_parse_decimal_invalid() {
        assert!(parse_decimal("not a number").is_err());
    }
}
