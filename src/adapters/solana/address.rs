//! Solana address validation
//!
//! A mint address is valid when, after trimming, it decodes as a base58
//! 32-byte public key.

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,
    #[error("Invalid Solana address: {0}")]
    Invalid(String),
}

/// Parse a token mint address
pub fn validate_address(address: &str) -> Result<Pubkey, AddressError> {
    let trimmed = address.trim();
    if trimmed.is_empty() {
        return Err(AddressError::Empty);
    }
    Pubkey::from_str(trimmed).map_err(|_| AddressError::Invalid(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WSOL: &str = "So11111111111111111111111111111111111111112";

    fn is_valid(address: &str) -> bool {
        validate_address(address).is_ok()
    }

    #[test]
    fn test_valid_addresses() {
        assert_eq!(validate_address(WSOL).unwrap().to_string(), WSOL);
        assert!(is_valid("EPjFWdd5AufqSSqeM2qN1xzybapC8G4wEGGkZwyTDt1v"));
        assert!(is_valid("11111111111111111111111111111111"));
    }

    #[test]
    fn test_surrounding_whitespace_is_trimmed() {
        let key = validate_address(&format!("  {}\n", WSOL)).unwrap();
        assert_eq!(key.to_string(), WSOL);
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(validate_address(""), Err(AddressError::Empty));
        assert_eq!(validate_address("   "), Err(AddressError::Empty));
    }

    #[test]
    fn test_invalid_addresses() {
        // Not base58 (contains 0, O, I, l)
        assert!(!is_valid("0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl0OIl"));
        // Too short
        assert!(!is_valid("abc"));
        // Valid base58 but decodes to more than 32 bytes
        assert!(!is_valid(
            "So11111111111111111111111111111111111111112So11111111111111111111111111111111111111112"
        ));
        assert!(!is_valid("not-a-real-address"));
    }
}
