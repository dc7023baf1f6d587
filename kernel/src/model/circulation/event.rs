use chrono::{DateTime, Utc};
use derive_new::new;

use crate::model::id::UserId;

// 貸出操作。書名で指定された蔵書を解決してから記録する
#[derive(new, Debug)]
pub struct BorrowBook {
    pub user_id: UserId,
    pub book_title: String,
    pub payment_method: String,
    pub borrowed_at: DateTime<Utc>,
}

// 返却操作
#[derive(new, Debug)]
pub struct ReturnBook {
    pub user_id: UserId,
    pub book_title: String,
    pub returned_at: DateTime<Utc>,
}
