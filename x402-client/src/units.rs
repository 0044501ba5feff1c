//! Lamport/SOL conversions and address helpers

use solana_sdk::pubkey::Pubkey;
use std::str::FromStr;

/// Lamports in one SOL
pub const LAMPORTS_PER_SOL: u64 = 1_000_000_000;

/// Convert SOL to lamports, rounding down
///
/// Negative and non-finite inputs saturate to zero.
pub fn sol_to_lamports(sol: f64) -> u64 {
    (sol * LAMPORTS_PER_SOL as f64).floor() as u64
}

/// Convert lamports to SOL
pub fn lamports_to_sol(lamports: u64) -> f64 {
    lamports as f64 / LAMPORTS_PER_SOL as f64
}

/// Render a lamport amount as SOL with nine decimals
pub fn format_sol(lamports: u64) -> String {
    format!("{:.9}", lamports_to_sol(lamports))
}

/// Shorten an address to `start` leading and `end` trailing characters
pub fn truncate_address(address: &str, start: usize, end: usize) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= start + end {
        return address.to_string();
    }
    let head: String = chars[..start].iter().collect();
    let tail: String = chars[chars.len() - end..].iter().collect();
    format!("{}...{}", head, tail)
}

/// Whether `address` is a base58 encoded 32-byte public key
pub fn is_valid_address(address: &str) -> bool {
    Pubkey::from_str(address).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sol_to_lamports() {
        assert_eq!(sol_to_lamports(1.0), 1_000_000_000);
        assert_eq!(sol_to_lamports(0.5), 500_000_000);
        assert_eq!(sol_to_lamports(2.25), 2_250_000_000);
        assert_eq!(sol_to_lamports(0.000_000_000_5), 0);
        assert_eq!(sol_to_lamports(-1.0), 0);
        assert_eq!(sol_to_lamports(f64::NAN), 0);
    }

    #[test]
    fn test_lamports_round_trip_floors() {
        for sol in [0.1, 0.25, 1.5, 2.0, 123.456_789_123] {
            let lamports = sol_to_lamports(sol);
            let back = lamports_to_sol(lamports);
            assert!((sol - back).abs() < 2e-9);
        }
    }

    #[test]
    fn test_format_sol() {
        assert_eq!(format_sol(1_000_005_000), "1.000005000");
        assert_eq!(format_sol(0), "0.000000000");
    }

    #[test]
    fn test_truncate_address() {
        assert_eq!(
            truncate_address("So11111111111111111111111111111111111111112", 4, 4),
            "So11...1112"
        );
        assert_eq!(truncate_address("abcdefgh", 4, 4), "abcdefgh");
        assert_eq!(truncate_address("abc", 4, 4), "abc");
        assert_eq!(truncate_address("abcdefghij", 2, 3), "ab...hij");
    }

    #[test]
    fn test_is_valid_address() {
        assert!(is_valid_address("11111111111111111111111111111111"));
        assert!(is_valid_address("So11111111111111111111111111111111111111112"));
        assert!(!is_valid_address("not-an-address"));
        assert!(!is_valid_address(""));
        assert!(!is_valid_address("0OIl"));
    }
}
