use chrono::{DateTime, Utc};
use kernel::model::{
    circulation::Transaction,
    id::{BookId, TransactionId, UserId},
    money::Money,
};

#[derive(sqlx::FromRow)]
pub struct TransactionRow {
    pub transaction_id: TransactionId,
    pub user_id: UserId,
    pub book_id: BookId,
    pub book_title: String,
    pub checked_out_at: DateTime<Utc>,
    pub due_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub fine_cents: i64,
}

impl From<TransactionRow> for Transaction {
    fn from(value: TransactionRow) -> Self {
        let TransactionRow {
            transaction_id,
            user_id,
            book_id,
            book_title,
            checked_out_at,
            due_at,
            returned_at,
            fine_cents,
        } = value;
        Transaction {
            id: transaction_id,
            user_id,
            book_id,
            book_title,
            checked_out_at,
            due_at,
            returned_at,
            fine: Money::from_cents(fine_cents),
        }
    }
}
