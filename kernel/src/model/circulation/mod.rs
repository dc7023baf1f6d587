use chrono::{DateTime, Duration, Utc};
use rust_decimal_macros::dec;

use super::{
    id::{BookId, TransactionId, UserId},
    money::Money,
};

pub mod event;

/// 貸出期間
pub const LOAN_PERIOD_DAYS: i64 = 14;
/// 貸出 1 回ごとに記録する定額の利用料
pub const BORROWING_FEE: Money = Money::new(dec!(5.00));
/// 延滞 1 日あたりの延滞料
pub const FINE_PER_LATE_DAY: Money = Money::new(dec!(2.00));

/// 貸出記録。`returned_at` が None の間は貸出中として扱う。
#[derive(Debug, Clone)]
pub struct Transaction {
    pub id: TransactionId,
    pub user_id: UserId,
    pub book_id: BookId,
    // 貸出時点の書名
    pub book_title: String,
    pub checked_out_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub fine: Money,
}

impl Transaction {
    pub fn is_open(&self) -> bool {
        self.returned_at.is_none()
    }
}

pub fn due_date_for(checked_out_at: DateTime<Utc>) -> DateTime<Utc> {
    checked_out_at + Duration::days(LOAN_PERIOD_DAYS)
}

/// 返却日時が返却期限を過ぎた日数（端数切り捨て）。期限内なら 0。
pub fn days_late(due_at: DateTime<Utc>, returned_at: DateTime<Utc>) -> i64 {
    if returned_at <= due_at {
        return 0;
    }
    (returned_at - due_at).num_days()
}

pub fn fine_for(due_at: DateTime<Utc>, returned_at: DateTime<Utc>) -> Money {
    FINE_PER_LATE_DAY * days_late(due_at, returned_at)
}

/// 返却処理の結果。延滞料は表示のためだけに返し、支払いには計上しない。
#[derive(Debug, Clone)]
pub struct ReturnReceipt {
    pub transaction_id: TransactionId,
    pub book_id: BookId,
    pub returned_at: DateTime<Utc>,
    pub fine: Money,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use rstest::rstest;

    use super::*;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 10, 0, 0).unwrap()
    }

    #[test]
    fn due_date_is_fourteen_days_after_checkout() {
        assert_eq!(
            due_date_for(t0()),
            Utc.with_ymd_and_hms(2024, 3, 15, 10, 0, 0).unwrap()
        );
    }

    #[rstest]
    #[case(Duration::days(-3), 0)]
    #[case(Duration::zero(), 0)]
    #[case(Duration::hours(23), 0)]
    #[case(Duration::days(1), 1)]
    #[case(Duration::days(2) + Duration::hours(20), 2)]
    #[case(Duration::days(10), 10)]
    fn late_days_are_whole_days_past_due(#[case] offset: Duration, #[case] expected: i64) {
        let due = due_date_for(t0());
        assert_eq!(days_late(due, due + offset), expected);
        assert_eq!(fine_for(due, due + offset), FINE_PER_LATE_DAY * expected);
    }

    #[test]
    fn return_two_days_after_due_costs_four() {
        let due = due_date_for(t0());
        let fine = fine_for(due, t0() + Duration::days(16));
        assert_eq!(fine, Money::from_units(4));
        assert_eq!(fine.to_string(), "4.00");
    }

    #[test]
    fn early_return_has_no_fine() {
        let due = due_date_for(t0());
        assert_eq!(fine_for(due, t0() + Duration::days(1)), Money::ZERO);
    }
}
