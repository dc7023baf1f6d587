use async_trait::async_trait;
use shared::error::AppResult;

use crate::model::{
    circulation::{
        event::{BorrowBook, ReturnBook},
        ReturnReceipt, Transaction,
    },
    id::UserId,
};

#[mockall::automock]
#[async_trait]
pub trait CirculationRepository: Send + Sync {
    // 貸出操作。貸出記録・蔵書の状態・利用料の支払いをまとめて記録する
    async fn borrow(&self, event: BorrowBook) -> AppResult<Transaction>;
    // 返却操作
    async fn return_book(&self, event: ReturnBook) -> AppResult<ReturnReceipt>;
    // ユーザー ID に紐づく未返却の貸出記録を取得する
    async fn find_open_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Transaction>>;
    // ユーザーの貸出履歴（返却済みも含む）
    async fn find_history_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Transaction>>;
}
