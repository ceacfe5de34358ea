//! Integer ids as emitted by the SysAP
//!
//! Name ids and function ids are written as hexadecimal strings in the
//! project description (`nameId="004A"`, `functionId="12"`).

use thiserror::Error;

/// Error type for invalid SysAP ids
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum SysapIdError {
    #[error("id cannot be empty")]
    Empty,

    #[error("'{0}' is not a hexadecimal id")]
    InvalidHex(String),
}

/// Parse a hexadecimal SysAP id, tolerating surrounding whitespace and a `0x` prefix
pub fn parse_sysap_id(s: &str) -> Result<u32, SysapIdError> {
    let trimmed = s.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(SysapIdError::Empty);
    }

    u32::from_str_radix(digits, 16).map_err(|_| SysapIdError::InvalidHex(s.to_string()))
}

/// Format an id the way the SysAP writes it (four upper-case hex digits)
pub fn format_sysap_id(id: u32) -> String {
    format!("{:04X}", id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_ids() {
        assert_eq!(parse_sysap_id("0001"), Ok(1));
        assert_eq!(parse_sysap_id("004A"), Ok(0x4a));
        assert_eq!(parse_sysap_id("4a"), Ok(0x4a));
        assert_eq!(parse_sysap_id(" 12 "), Ok(0x12));
        assert_eq!(parse_sysap_id("0x2A"), Ok(42));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert_eq!(parse_sysap_id(""), Err(SysapIdError::Empty));
        assert_eq!(parse_sysap_id("0x"), Err(SysapIdError::Empty));
        assert_eq!(
            parse_sysap_id("light"),
            Err(SysapIdError::InvalidHex("light".to_string()))
        );
    }

    #[test]
    fn test_format_matches_sysap() {
        assert_eq!(format_sysap_id(0x4a), "004A");
        assert_eq!(parse_sysap_id(&format_sysap_id(0x1234)), Ok(0x1234));
    }
}
