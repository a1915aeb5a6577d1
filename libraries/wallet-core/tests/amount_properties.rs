//! Property-based tests for amounts
//!
//! Uses proptest to verify invariants across many random inputs.

use proptest::prelude::*;
use rust_decimal::Decimal;
use wallet_core::Amount;

proptest! {
    /// Property: minor units survive conversion through Decimal
    #[test]
    fn minor_units_are_preserved(minor in 0i64..1_000_000_000_000) {
        let amount = Amount::from_minor_units(minor).unwrap();
        let rebuilt = Amount::new(amount.value()).unwrap();
        prop_assert_eq!(rebuilt.to_minor_units(), minor);
    }

    /// Property: negative values never construct an amount
    #[test]
    fn negative_values_rejected(minor in i64::MIN..0) {
        prop_assert!(Amount::new(Decimal::new(minor, 2)).is_err());
        prop_assert!(Amount::from_minor_units(minor).is_err());
    }

    /// Property: a third decimal digit is always rejected
    #[test]
    fn sub_cent_values_rejected(whole in 0i64..1_000_000, digit in 1i64..10) {
        let value = Decimal::new(whole * 1000 + digit, 3);
        prop_assert!(Amount::new(value).is_err());
    }

    /// Property: ordering of amounts follows ordering of minor units
    #[test]
    fn ordering_follows_minor_units(a in 0i64..1_000_000_000, b in 0i64..1_000_000_000) {
        let x = Amount::from_minor_units(a).unwrap();
        let y = Amount::from_minor_units(b).unwrap();
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }
}
