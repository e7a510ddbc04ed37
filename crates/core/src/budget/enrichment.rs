//! Budget enrichment arithmetic.
//!
//! The engine fetches the spent sum; these functions only combine it with
//! the stored budget.

use rust_decimal::Decimal;

use super::types::{Budget, EnrichedBudget};

/// Enriches `budget` with the amount spent in its period.
///
/// `balance = amount - spent`, which is negative when overspent.
#[must_use]
pub fn enrich_with_spent(budget: Budget, spent: Decimal) -> EnrichedBudget {
    let balance = budget.amount - spent;
    EnrichedBudget {
        budget,
        spent_amount: spent,
        balance,
    }
}

/// Enriches `budget` as if nothing had been spent.
///
/// Used by batch listings when the spent sum for one budget could not be
/// computed.
#[must_use]
pub fn enrich_without_spent(budget: Budget) -> EnrichedBudget {
    enrich_with_spent(budget, Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgerly_shared::types::{BudgetId, CategoryId, UserId};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn budget(amount: Decimal) -> Budget {
        Budget {
            id: BudgetId::new(),
            user_id: UserId::new(),
            category_id: CategoryId::new(),
            month: 5,
            year: 2025,
            amount,
        }
    }

    #[test]
    fn test_enrich_remaining_balance() {
        let enriched = enrich_with_spent(budget(dec!(800.00)), dec!(550.50));

        assert_eq!(enriched.spent_amount, dec!(550.50));
        assert_eq!(enriched.balance, dec!(249.50));
        assert!(!enriched.is_overspent());
    }

    #[test]
    fn test_overspend_is_negative_balance() {
        let enriched = enrich_with_spent(budget(dec!(100)), dec!(130.25));

        assert_eq!(enriched.balance, dec!(-30.25));
        assert!(enriched.is_overspent());
    }

    #[test]
    fn test_no_float_drift() {
        let spent = dec!(0.1) + dec!(0.2);
        let enriched = enrich_with_spent(budget(dec!(0.3)), spent);

        assert_eq!(enriched.balance, Decimal::ZERO);
    }

    #[test]
    fn test_without_spent_keeps_full_amount() {
        let enriched = enrich_without_spent(budget(dec!(75)));

        assert_eq!(enriched.spent_amount, Decimal::ZERO);
        assert_eq!(enriched.balance, dec!(75));
    }

    #[test]
    fn test_serialized_shape_flattens_budget() {
        let enriched = enrich_with_spent(budget(dec!(10)), dec!(4));
        let json = serde_json::to_value(&enriched).unwrap();

        assert_eq!(json["amount"], "10");
        assert_eq!(json["spent_amount"], "4");
        assert_eq!(json["balance"], "6");
        assert_eq!(json["month"], 5);
    }

    proptest! {
        /// *For any* amount and spent sum, spent + balance == amount.
        #[test]
        fn prop_spent_plus_balance_equals_amount(
            amount in 0i64..100_000_000,
            spent in 0i64..100_000_000,
        ) {
            let amount = Decimal::new(amount, 2);
            let spent = Decimal::new(spent, 2);
            let enriched = enrich_with_spent(budget(amount), spent);

            prop_assert_eq!(enriched.spent_amount + enriched.balance, amount);
        }
    }
}
