use chrono::{DateTime, Utc};
use garde::Validate;
use kernel::model::{
    circulation::{ReturnReceipt, Transaction},
    id::{BookId, TransactionId},
};
use serde::{Deserialize, Serialize};

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct BorrowBookRequest {
    #[garde(length(min = 1))]
    pub book_title: String,
    #[garde(length(min = 1))]
    pub payment_method: String,
}

#[derive(Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ReturnBookRequest {
    #[garde(length(min = 1))]
    pub book_title: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BorrowedResponse {
    pub transaction_id: TransactionId,
    pub due_date: DateTime<Utc>,
}

impl From<Transaction> for BorrowedResponse {
    fn from(value: Transaction) -> Self {
        Self {
            transaction_id: value.id,
            due_date: value.due_at,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnedResponse {
    pub transaction_id: TransactionId,
    pub returned_at: DateTime<Utc>,
    // 小数点以下 2 桁の文字列
    pub fine_amount: String,
}

impl From<ReturnReceipt> for ReturnedResponse {
    fn from(value: ReturnReceipt) -> Self {
        Self {
            transaction_id: value.transaction_id,
            returned_at: value.returned_at,
            fine_amount: value.fine.to_string(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: TransactionId,
    pub book_id: BookId,
    pub book_title: String,
    pub checkout_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub fine_amount: String,
}

impl From<Transaction> for TransactionResponse {
    fn from(value: Transaction) -> Self {
        let Transaction {
            id,
            book_id,
            book_title,
            checked_out_at,
            due_at,
            returned_at,
            fine,
            ..
        } = value;
        Self {
            id,
            book_id,
            book_title,
            checkout_date: checked_out_at,
            due_date: due_at,
            return_date: returned_at,
            fine_amount: fine.to_string(),
        }
    }
}

#[derive(Serialize)]
pub struct TransactionsResponse {
    pub items: Vec<TransactionResponse>,
}

impl From<Vec<Transaction>> for TransactionsResponse {
    fn from(value: Vec<Transaction>) -> Self {
        Self {
            items: value.into_iter().map(TransactionResponse::from).collect(),
        }
    }
}
