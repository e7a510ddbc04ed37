//! Statement assembly for credit card accounts.

use chrono::NaiveDate;
use ledgerly_shared::types::AccountId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::cycle::{StatementPeriod, due_date, statement_period};
use super::error::StatementError;
use crate::ledger::{Account, Transaction, TransactionType};

/// Closing and due day of a credit card account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BillingConfig {
    /// Day of month the statement closes.
    pub closing_day: u32,
    /// Day of month payment is due.
    pub due_day: u32,
}

impl BillingConfig {
    /// Extracts the billing configuration from `account`.
    ///
    /// Checks only the account record, so callers can reject an account
    /// before querying its transactions.
    ///
    /// # Errors
    ///
    /// - `InvalidAccountType` if the account is not a credit card
    /// - `MissingBillingConfig` if closing or due day is absent
    pub fn from_account(account: &Account) -> Result<Self, StatementError> {
        if !account.account_type.has_billing_cycle() {
            return Err(StatementError::InvalidAccountType {
                account_id: account.id,
                actual: account.account_type,
            });
        }

        match (account.closing_day, account.due_day) {
            (Some(closing_day), Some(due_day)) => Ok(Self {
                closing_day,
                due_day,
            }),
            _ => Err(StatementError::MissingBillingConfig(account.id)),
        }
    }

    /// Computes the period and due date for the statement of `(year, month)`.
    ///
    /// # Errors
    ///
    /// Returns `StatementError::Billing` for out-of-range calendar input.
    pub fn cycle(
        &self,
        year: i32,
        month: u32,
    ) -> Result<(StatementPeriod, NaiveDate), StatementError> {
        let period = statement_period(self.closing_day, year, month)?;
        let due = due_date(self.due_day, year, month)?;
        Ok((period, due))
    }
}

/// A credit card statement for one billing cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementReport {
    /// The card.
    pub account_id: AccountId,
    /// Card name, for display.
    pub account_name: String,
    /// Sum of expenses in the period.
    pub total: Decimal,
    /// Payment due date.
    pub due_date: NaiveDate,
    /// Inclusive cycle bounds.
    pub period: StatementPeriod,
    /// Every transaction on the card in the period, ordered by date.
    pub transactions: Vec<Transaction>,
}

/// Sums the `expense` transactions. Income and transfers are excluded.
#[must_use]
pub fn statement_total(transactions: &[Transaction]) -> Decimal {
    transactions
        .iter()
        .filter(|tx| tx.transaction_type == TransactionType::Expense)
        .map(|tx| tx.amount)
        .sum()
}

/// Builds the statement of `account` for `(year, month)` from the
/// transactions already fetched for its period.
///
/// Rows dated outside the period or not touching the account are dropped.
///
/// # Errors
///
/// Same as [`BillingConfig::from_account`] and [`BillingConfig::cycle`].
pub fn assemble_statement(
    account: &Account,
    year: i32,
    month: u32,
    transactions: Vec<Transaction>,
) -> Result<StatementReport, StatementError> {
    let (period, due_date) = BillingConfig::from_account(account)?.cycle(year, month)?;

    let mut transactions: Vec<Transaction> = transactions
        .into_iter()
        .filter(|tx| tx.touches(account.id) && period.contains(tx.date))
        .collect();
    transactions.sort_by_key(|tx| tx.date);

    Ok(StatementReport {
        account_id: account.id,
        account_name: account.name.clone(),
        total: statement_total(&transactions),
        due_date,
        period,
        transactions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::billing::BillingError;
    use crate::ledger::AccountType;
    use ledgerly_shared::types::{TransactionId, UserId};
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn card(closing_day: Option<u32>, due_day: Option<u32>) -> Account {
        Account {
            id: AccountId::new(),
            user_id: UserId::new(),
            name: "Visa".to_string(),
            account_type: AccountType::CreditCard,
            initial_balance: Decimal::ZERO,
            credit_limit: Some(dec!(5000)),
            closing_day,
            due_day,
        }
    }

    fn tx(
        account: &Account,
        transaction_type: TransactionType,
        amount: Decimal,
        day: NaiveDate,
    ) -> Transaction {
        Transaction {
            id: TransactionId::new(),
            user_id: account.user_id,
            description: "card".to_string(),
            amount,
            date: day,
            transaction_type,
            account_id: account.id,
            destination_account_id: None,
            category_id: None,
        }
    }

    #[test]
    fn test_total_counts_expenses_only() {
        let acct = card(Some(10), Some(20));
        let txs = vec![
            tx(&acct, TransactionType::Expense, dec!(120.40), date(2025, 3, 1)),
            tx(&acct, TransactionType::Expense, dec!(9.60), date(2025, 3, 2)),
            tx(&acct, TransactionType::Income, dec!(50), date(2025, 3, 3)),
        ];

        assert_eq!(statement_total(&txs), dec!(130.00));
    }

    #[test]
    fn test_assemble_statement() {
        let acct = card(Some(10), Some(20));
        let txs = vec![
            tx(&acct, TransactionType::Expense, dec!(30), date(2025, 3, 10)),
            tx(&acct, TransactionType::Expense, dec!(20), date(2025, 2, 10)),
            tx(&acct, TransactionType::Income, dec!(5), date(2025, 2, 15)),
            // Outside the cycle.
            tx(&acct, TransactionType::Expense, dec!(999), date(2025, 3, 11)),
        ];

        let report = assemble_statement(&acct, 2025, 3, txs).unwrap();

        assert_eq!(report.account_name, "Visa");
        assert_eq!(report.total, dec!(50));
        assert_eq!(report.due_date, date(2025, 3, 20));
        assert_eq!(report.period.start, date(2025, 2, 10));
        assert_eq!(report.period.end, date(2025, 3, 10));
        let dates: Vec<NaiveDate> = report.transactions.iter().map(|t| t.date).collect();
        assert_eq!(dates, vec![date(2025, 2, 10), date(2025, 2, 15), date(2025, 3, 10)]);
    }

    #[test]
    fn test_empty_cycle_totals_zero() {
        let acct = card(Some(31), Some(31));
        let report = assemble_statement(&acct, 2025, 4, Vec::new()).unwrap();

        assert_eq!(report.total, Decimal::ZERO);
        assert_eq!(report.due_date, date(2025, 4, 30));
        assert!(report.transactions.is_empty());
    }

    #[test]
    fn test_non_credit_account_rejected() {
        let mut acct = card(None, None);
        acct.account_type = AccountType::Checking;

        assert_eq!(
            BillingConfig::from_account(&acct),
            Err(StatementError::InvalidAccountType {
                account_id: acct.id,
                actual: AccountType::Checking,
            })
        );
    }

    #[test]
    fn test_missing_billing_days_rejected() {
        let acct = card(Some(10), None);

        assert_eq!(
            BillingConfig::from_account(&acct),
            Err(StatementError::MissingBillingConfig(acct.id))
        );
    }

    #[test]
    fn test_out_of_range_month_rejected() {
        let acct = card(Some(10), Some(20));

        assert_eq!(
            assemble_statement(&acct, 2025, 13, Vec::new()),
            Err(StatementError::Billing(BillingError::InvalidMonth(13)))
        );
    }
}
