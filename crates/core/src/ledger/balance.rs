//! Account balance derivation.
//!
//! A balance is a pure function of the account's initial balance and every
//! transaction that names the account as source or destination:
//!
//! - `transfer` with destination == account → money arriving
//! - `income` with source == account → money arriving
//! - `expense` or `transfer` with source == account → money leaving
//!
//! Both sides of a transfer are read from the same row, so a transfer moves
//! money between two accounts without changing their combined balance.

use ledgerly_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::types::{Account, Transaction, TransactionType};

/// How a transaction affects one particular account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BalanceEffect {
    /// Amount added to the account.
    pub inflow: Decimal,
    /// Amount removed from the account.
    pub outflow: Decimal,
}

impl BalanceEffect {
    /// Classifies `transaction` against `account_id`.
    ///
    /// Rows that do not touch the account, and `income` rows whose
    /// destination happens to be the account, have no effect.
    #[must_use]
    pub fn of(transaction: &Transaction, account_id: AccountId) -> Self {
        let is_source = transaction.account_id == account_id;
        let is_destination = transaction.destination_account_id == Some(account_id);

        let inflow = match transaction.transaction_type {
            TransactionType::Transfer if is_destination => transaction.amount,
            TransactionType::Income if is_source => transaction.amount,
            _ => Decimal::ZERO,
        };

        let outflow = match transaction.transaction_type {
            TransactionType::Expense | TransactionType::Transfer if is_source => transaction.amount,
            _ => Decimal::ZERO,
        };

        Self { inflow, outflow }
    }

    /// Net change on the account.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

/// Inflow and outflow totals for one account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceBreakdown {
    /// Sum of all money arriving.
    pub inflow: Decimal,
    /// Sum of all money leaving.
    pub outflow: Decimal,
}

impl BalanceBreakdown {
    /// Accumulates the effect of every transaction on `account_id`.
    #[must_use]
    pub fn collect<'a, I>(account_id: AccountId, transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        transactions
            .into_iter()
            .map(|tx| BalanceEffect::of(tx, account_id))
            .fold(Self::default(), |acc, effect| Self {
                inflow: acc.inflow + effect.inflow,
                outflow: acc.outflow + effect.outflow,
            })
    }

    /// Net change over the whole log.
    #[must_use]
    pub fn net(&self) -> Decimal {
        self.inflow - self.outflow
    }
}

/// Computes the current balance of `account`.
///
/// `transactions` should be every transaction where the account is source or
/// destination; unrelated rows are ignored.
#[must_use]
pub fn compute_balance(account: &Account, transactions: &[Transaction]) -> Decimal {
    account.initial_balance + BalanceBreakdown::collect(account.id, transactions).net()
}

/// An account together with its derived balance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountWithBalance {
    /// The account record.
    #[serde(flatten)]
    pub account: Account,
    /// Balance derived from the transaction log.
    pub balance: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::types::AccountType;
    use chrono::NaiveDate;
    use ledgerly_shared::types::{TransactionId, UserId};
    use proptest::prelude::*;
    use rust_decimal_macros::dec;

    fn account(initial_balance: Decimal) -> Account {
        Account {
            id: AccountId::new(),
            user_id: UserId::new(),
            name: "Checking".to_string(),
            account_type: AccountType::Checking,
            initial_balance,
            credit_limit: None,
            closing_day: None,
            due_day: None,
        }
    }

    fn tx(
        transaction_type: TransactionType,
        amount: Decimal,
        source: AccountId,
        destination: Option<AccountId>,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            user_id: UserId::new(),
            description: "test".to_string(),
            amount,
            date: NaiveDate::from_ymd_opt(2025, 3, 14).unwrap(),
            transaction_type,
            account_id: source,
            destination_account_id: destination,
            category_id: None,
        }
    }

    // ========================================================================
    // Unit tests for specific examples
    // ========================================================================

    #[test]
    fn test_no_transactions_yields_initial_balance() {
        let acct = account(dec!(1250.75));
        assert_eq!(compute_balance(&acct, &[]), dec!(1250.75));
    }

    #[test]
    fn test_income_and_expense() {
        let acct = account(dec!(100));
        let txs = vec![
            tx(TransactionType::Income, dec!(2500.00), acct.id, None),
            tx(TransactionType::Expense, dec!(89.90), acct.id, None),
            tx(TransactionType::Expense, dec!(10.10), acct.id, None),
        ];

        assert_eq!(compute_balance(&acct, &txs), dec!(2500.00));
    }

    #[test]
    fn test_transfer_debits_source_and_credits_destination() {
        let checking = account(dec!(1000));
        let savings = account(dec!(0));
        let txs = vec![tx(
            TransactionType::Transfer,
            dec!(300),
            checking.id,
            Some(savings.id),
        )];

        assert_eq!(compute_balance(&checking, &txs), dec!(700));
        assert_eq!(compute_balance(&savings, &txs), dec!(300));
    }

    #[test]
    fn test_income_with_destination_only_credits_source() {
        let acct = account(dec!(0));
        let other = account(dec!(0));
        let txs = vec![tx(TransactionType::Income, dec!(50), other.id, Some(acct.id))];

        assert_eq!(compute_balance(&acct, &txs), dec!(0));
        assert_eq!(compute_balance(&other, &txs), dec!(50));
    }

    #[test]
    fn test_unrelated_transactions_ignored() {
        let acct = account(dec!(42));
        let txs = vec![tx(
            TransactionType::Expense,
            dec!(99),
            AccountId::new(),
            None,
        )];

        assert_eq!(compute_balance(&acct, &txs), dec!(42));
    }

    #[test]
    fn test_decimal_sums_are_exact() {
        let acct = account(dec!(0));
        let txs = vec![
            tx(TransactionType::Income, dec!(0.1), acct.id, None),
            tx(TransactionType::Income, dec!(0.2), acct.id, None),
        ];

        assert_eq!(compute_balance(&acct, &txs), dec!(0.3));
    }

    #[test]
    fn test_breakdown_totals() {
        let acct = account(dec!(0));
        let txs = vec![
            tx(TransactionType::Income, dec!(10), acct.id, None),
            tx(TransactionType::Transfer, dec!(4), AccountId::new(), Some(acct.id)),
            tx(TransactionType::Expense, dec!(3), acct.id, None),
        ];

        let breakdown = BalanceBreakdown::collect(acct.id, &txs);
        assert_eq!(breakdown.inflow, dec!(14));
        assert_eq!(breakdown.outflow, dec!(3));
        assert_eq!(breakdown.net(), dec!(11));
    }

    // ========================================================================
    // Property: Conservation and round-trip
    // ========================================================================

    /// Strategy for positive amounts (0.01 to 10,000.00).
    fn amount_strategy() -> impl Strategy<Value = Decimal> {
        (1i64..1_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
    }

    fn type_strategy() -> impl Strategy<Value = TransactionType> {
        prop_oneof![
            Just(TransactionType::Income),
            Just(TransactionType::Expense),
            Just(TransactionType::Transfer),
        ]
    }

    /// (type, amount, source is A) triples over a two-account ledger.
    fn ledger_strategy() -> impl Strategy<Value = Vec<(TransactionType, Decimal, bool)>> {
        prop::collection::vec((type_strategy(), amount_strategy(), any::<bool>()), 0..30)
    }

    fn build_ledger(
        a: AccountId,
        b: AccountId,
        rows: &[(TransactionType, Decimal, bool)],
    ) -> Vec<Transaction> {
        rows.iter()
            .map(|(transaction_type, amount, from_a)| {
                let (source, other) = if *from_a { (a, b) } else { (b, a) };
                let destination = (*transaction_type == TransactionType::Transfer).then_some(other);
                tx(*transaction_type, *amount, source, destination)
            })
            .collect()
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// *For any* two-account ledger, the combined balance equals the
        /// combined initial balance plus incomes minus expenses. Transfers
        /// between the two contribute nothing.
        #[test]
        fn prop_transfers_conserve_combined_balance(
            rows in ledger_strategy(),
            init_a in amount_strategy(),
            init_b in amount_strategy(),
        ) {
            let a = account(init_a);
            let b = account(init_b);
            let txs = build_ledger(a.id, b.id, &rows);

            let incomes: Decimal = txs.iter()
                .filter(|t| t.transaction_type == TransactionType::Income)
                .map(|t| t.amount)
                .sum();
            let expenses: Decimal = txs.iter()
                .filter(|t| t.transaction_type == TransactionType::Expense)
                .map(|t| t.amount)
                .sum();

            let combined = compute_balance(&a, &txs) + compute_balance(&b, &txs);
            prop_assert_eq!(combined, init_a + init_b + incomes - expenses);
        }

        /// *For any* ledger, appending one transfer between A and B leaves
        /// the combined balance unchanged.
        #[test]
        fn prop_single_transfer_is_zero_sum(
            rows in ledger_strategy(),
            amount in amount_strategy(),
        ) {
            let a = account(dec!(0));
            let b = account(dec!(0));
            let mut txs = build_ledger(a.id, b.id, &rows);
            let before = compute_balance(&a, &txs) + compute_balance(&b, &txs);

            txs.push(tx(TransactionType::Transfer, amount, a.id, Some(b.id)));
            let after = compute_balance(&a, &txs) + compute_balance(&b, &txs);

            prop_assert_eq!(before, after);
        }

        /// *For any* ledger, creating then deleting a transaction leaves the
        /// balance unchanged.
        #[test]
        fn prop_create_then_delete_is_identity(
            rows in ledger_strategy(),
            extra_type in type_strategy(),
            amount in amount_strategy(),
        ) {
            let a = account(dec!(500));
            let b = account(dec!(0));
            let mut txs = build_ledger(a.id, b.id, &rows);
            let before = compute_balance(&a, &txs);

            let destination = (extra_type == TransactionType::Transfer).then_some(b.id);
            let extra = tx(extra_type, amount, a.id, destination);
            let extra_id = extra.id;
            txs.push(extra);
            txs.retain(|t| t.id != extra_id);

            prop_assert_eq!(compute_balance(&a, &txs), before);
        }

        /// *For any* ledger, the balance does not depend on row order.
        #[test]
        fn prop_balance_is_order_independent(rows in ledger_strategy()) {
            let a = account(dec!(0));
            let b = account(dec!(0));
            let txs = build_ledger(a.id, b.id, &rows);
            let mut reversed = txs.clone();
            reversed.reverse();

            prop_assert_eq!(compute_balance(&a, &txs), compute_balance(&a, &reversed));
        }
    }
}
