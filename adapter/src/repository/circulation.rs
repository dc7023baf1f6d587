use async_trait::async_trait;
use derive_new::new;
use kernel::{
    model::{
        book::BookStatus,
        circulation::{
            due_date_for,
            event::{BorrowBook, ReturnBook},
            fine_for, ReturnReceipt, Transaction, BORROWING_FEE,
        },
        id::{TransactionId, UserId},
        money::Money,
        payment::event::ChargePayment,
    },
    repository::circulation::CirculationRepository,
};
use shared::error::{AppError, AppResult};

use super::{
    book::{find_book_status_by_title, update_book_status},
    map_reference_error,
    payment::record_payment,
};
use crate::database::{model::circulation::TransactionRow, ConnectionPool};

#[derive(new)]
pub struct CirculationRepositoryImpl {
    db: ConnectionPool,
}

#[async_trait]
impl CirculationRepository for CirculationRepositoryImpl {
    async fn borrow(&self, event: BorrowBook) -> AppResult<Transaction> {
        let BorrowBook {
            user_id,
            book_title,
            payment_method,
            borrowed_at,
        } = event;

        // 貸出記録の追加・蔵書の状態更新・支払いの記録は、
        // すべて反映されるか、何も反映されないかのどちらかでなければならない
        let mut tx = self.db.begin().await?;

        let book = find_book_status_by_title(&mut tx, &book_title)
            .await?
            .ok_or_else(|| {
                AppError::EntityNotFound(format!("蔵書「{book_title}」が見つかりません。"))
            })?;

        // 同じユーザーが返却前に同じ蔵書を借りようとしている場合は、
        // 貸出不可よりも二重貸出として扱う
        let already_held = sqlx::query_scalar::<_, bool>(
            r#"
                SELECT EXISTS(
                    SELECT 1 FROM transactions
                    WHERE user_id = ? AND book_id = ? AND returned_at IS NULL
                )
            "#,
        )
        .bind(user_id)
        .bind(book.book_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if already_held {
            return Err(AppError::DuplicateBorrow(format!(
                "蔵書「{book_title}」はすでに借りています。"
            )));
        }

        if book.status()? != BookStatus::Available {
            return Err(AppError::BookUnavailable(format!(
                "蔵書「{book_title}」は現在貸出できません。"
            )));
        }

        let transaction = Transaction {
            id: TransactionId::new(),
            user_id,
            book_id: book.book_id,
            book_title,
            checked_out_at: borrowed_at,
            due_at: due_date_for(borrowed_at),
            returned_at: None,
            fine: Money::ZERO,
        };

        sqlx::query(
            r#"
                INSERT INTO transactions
                (transaction_id, user_id, book_id, book_title, checked_out_at, due_at, returned_at, fine_cents)
                VALUES (?, ?, ?, ?, ?, ?, NULL, 0)
            "#,
        )
        .bind(transaction.id)
        .bind(transaction.user_id)
        .bind(transaction.book_id)
        .bind(&transaction.book_title)
        .bind(transaction.checked_out_at)
        .bind(transaction.due_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            // 別のセッションが先に同じ蔵書を貸し出した
            let taken = e
                .as_database_error()
                .is_some_and(|db_err| db_err.is_unique_violation());
            if taken {
                AppError::BookUnavailable(format!(
                    "蔵書「{}」は現在貸出できません。",
                    transaction.book_title
                ))
            } else {
                map_reference_error(e, "ユーザー")
            }
        })?;

        update_book_status(&mut tx, transaction.book_id, BookStatus::Borrowed).await?;

        record_payment(
            &mut tx,
            ChargePayment::new(user_id, BORROWING_FEE, payment_method, borrowed_at),
        )
        .await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            transaction_id = %transaction.id,
            %user_id,
            book_id = %transaction.book_id,
            due_at = %transaction.due_at,
            "book borrowed"
        );
        Ok(transaction)
    }

    async fn return_book(&self, event: ReturnBook) -> AppResult<ReturnReceipt> {
        let ReturnBook {
            user_id,
            book_title,
            returned_at,
        } = event;

        let mut tx = self.db.begin().await?;

        let open = sqlx::query_as::<_, TransactionRow>(
            r#"
                SELECT
                    transaction_id, user_id, book_id, book_title,
                    checked_out_at, due_at, returned_at, fine_cents
                FROM transactions
                WHERE user_id = ? AND book_title = ? AND returned_at IS NULL
                ORDER BY checked_out_at ASC, rowid ASC
                LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(&book_title)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?
        .map(Transaction::from)
        .ok_or_else(|| {
            AppError::EntityNotFound(format!("返却対象の蔵書「{book_title}」が見つかりません。"))
        })?;

        let fine = fine_for(open.due_at, returned_at);

        let res = sqlx::query(
            r#"
                UPDATE transactions
                SET returned_at = ?, fine_cents = ?
                WHERE transaction_id = ? AND returned_at IS NULL
            "#,
        )
        .bind(returned_at)
        .bind(fine.cents())
        .bind(open.id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::SpecificOperationError)?;

        if res.rows_affected() < 1 {
            return Err(AppError::NoRowAffectedError(
                "No returning record has been updated".into(),
            ));
        }

        // 書名ではなく、貸出記録が指している蔵書 ID で状態を戻す
        update_book_status(&mut tx, open.book_id, BookStatus::Available).await?;

        tx.commit().await.map_err(AppError::TransactionError)?;

        tracing::info!(
            transaction_id = %open.id,
            %user_id,
            book_id = %open.book_id,
            %fine,
            "book returned"
        );
        Ok(ReturnReceipt {
            transaction_id: open.id,
            book_id: open.book_id,
            returned_at,
            fine,
        })
    }

    async fn find_open_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
                SELECT
                    transaction_id, user_id, book_id, book_title,
                    checked_out_at, due_at, returned_at, fine_cents
                FROM transactions
                WHERE user_id = ? AND returned_at IS NULL
                ORDER BY checked_out_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }

    async fn find_history_by_user_id(&self, user_id: UserId) -> AppResult<Vec<Transaction>> {
        let rows = sqlx::query_as::<_, TransactionRow>(
            r#"
                SELECT
                    transaction_id, user_id, book_id, book_title,
                    checked_out_at, due_at, returned_at, fine_cents
                FROM transactions
                WHERE user_id = ?
                ORDER BY checked_out_at DESC, rowid DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(self.db.inner_ref())
        .await
        .map_err(AppError::SpecificOperationError)?;

        Ok(rows.into_iter().map(Transaction::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use kernel::{
        model::{book::event::CreateBook, id::BookId, role::Role, user::event::CreateUser},
        repository::{book::BookRepository, payment::PaymentRepository, user::UserRepository},
    };

    use std::sync::Arc;

    use super::*;
    use crate::{
        database::test_support::{file_pool, memory_pool},
        repository::{
            book::BookRepositoryImpl, payment::PaymentRepositoryImpl, user::UserRepositoryImpl,
        },
    };

    struct Fixture {
        pool: ConnectionPool,
        repo: CirculationRepositoryImpl,
        books: BookRepositoryImpl,
        reader: UserId,
        other_reader: UserId,
        book_id: BookId,
    }

    async fn setup() -> anyhow::Result<Fixture> {
        let pool = memory_pool().await;
        let users = UserRepositoryImpl::new(pool.clone());
        let reader = users
            .create(CreateUser::new("reader".into(), "reader@example.com".into(), Role::Member))
            .await?
            .id;
        let other_reader = users
            .create(CreateUser::new("other".into(), "other@example.com".into(), Role::Member))
            .await?
            .id;
        let books = BookRepositoryImpl::new(pool.clone());
        let book_id = books
            .create(CreateBook::new(
                "Moby Dick".into(),
                None,
                "Adventure".into(),
                "A whale".into(),
            ))
            .await?;
        Ok(Fixture {
            repo: CirculationRepositoryImpl::new(pool.clone()),
            pool,
            books,
            reader,
            other_reader,
            book_id,
        })
    }

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 4, 1, 12, 0, 0).unwrap()
    }

    fn borrow_event(user_id: UserId, at: DateTime<Utc>) -> BorrowBook {
        BorrowBook::new(user_id, "Moby Dick".into(), "Credit Card".into(), at)
    }

    // 状態が Borrowed の蔵書と、未返却の貸出記録を持つ蔵書が一致しない件数
    async fn status_mismatches(pool: &ConnectionPool) -> i64 {
        sqlx::query_scalar::<_, i64>(
            r#"
                SELECT COUNT(*) FROM books AS b
                WHERE (b.status = 'Borrowed') != EXISTS(
                    SELECT 1 FROM transactions AS t
                    WHERE t.book_id = b.book_id AND t.returned_at IS NULL
                )
            "#,
        )
        .fetch_one(pool.inner_ref())
        .await
        .unwrap()
    }

    async fn count(pool: &ConnectionPool, table: &str) -> i64 {
        sqlx::query_scalar::<_, i64>(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool.inner_ref())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_borrow_then_return_late() -> anyhow::Result<()> {
        let fx = setup().await?;

        let borrowed = fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        assert_eq!(borrowed.book_id, fx.book_id);
        assert_eq!(borrowed.due_at, t0() + Duration::days(14));
        assert_eq!(borrowed.fine, Money::ZERO);
        assert!(borrowed.is_open());

        let book = fx.books.find_by_id(fx.book_id).await?.unwrap();
        assert_eq!(book.status, BookStatus::Borrowed);
        assert_eq!(status_mismatches(&fx.pool).await, 0);

        let returned_at = t0() + Duration::days(16);
        let receipt = fx
            .repo
            .return_book(ReturnBook::new(fx.reader, "Moby Dick".into(), returned_at))
            .await?;
        assert_eq!(receipt.transaction_id, borrowed.id);
        assert_eq!(receipt.fine, Money::from_units(4));
        assert_eq!(receipt.fine.to_string(), "4.00");

        let book = fx.books.find_by_id(fx.book_id).await?.unwrap();
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(status_mismatches(&fx.pool).await, 0);

        let history = fx.repo.find_history_by_user_id(fx.reader).await?;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].returned_at, Some(returned_at));
        assert_eq!(history[0].fine, Money::from_units(4));
        assert!(fx.repo.find_open_by_user_id(fx.reader).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_return_before_due_has_no_fine() -> anyhow::Result<()> {
        let fx = setup().await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        let receipt = fx
            .repo
            .return_book(ReturnBook::new(
                fx.reader,
                "Moby Dick".into(),
                t0() + Duration::days(14),
            ))
            .await?;
        assert_eq!(receipt.fine, Money::ZERO);
        assert_eq!(receipt.fine.to_string(), "0.00");
        Ok(())
    }

    #[tokio::test]
    async fn test_borrow_records_flat_payment() -> anyhow::Result<()> {
        let fx = setup().await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;

        let payments = PaymentRepositoryImpl::new(fx.pool.clone())
            .find_by_user_id(fx.reader)
            .await?;
        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, BORROWING_FEE);
        assert_eq!(payments[0].amount.to_string(), "5.00");
        assert_eq!(payments[0].method, "Credit Card");
        assert_eq!(payments[0].status, "Completed");

        // 延滞料は支払いとして記録しない
        fx.repo
            .return_book(ReturnBook::new(
                fx.reader,
                "Moby Dick".into(),
                t0() + Duration::days(30),
            ))
            .await?;
        assert_eq!(count(&fx.pool, "payments").await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_borrow_unknown_title_is_not_found() -> anyhow::Result<()> {
        let fx = setup().await?;

        let res = fx
            .repo
            .borrow(BorrowBook::new(fx.reader, "Nowhere".into(), "Cash".into(), t0()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        assert_eq!(count(&fx.pool, "transactions").await, 0);
        assert_eq!(count(&fx.pool, "payments").await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_borrow_unavailable_book_changes_nothing() -> anyhow::Result<()> {
        let fx = setup().await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        let res = fx
            .repo
            .borrow(borrow_event(fx.other_reader, t0() + Duration::days(1)))
            .await;
        assert!(matches!(res, Err(AppError::BookUnavailable(_))));

        assert_eq!(count(&fx.pool, "transactions").await, 1);
        assert_eq!(count(&fx.pool, "payments").await, 1);
        assert!(fx.repo.find_open_by_user_id(fx.other_reader).await?.is_empty());
        assert_eq!(status_mismatches(&fx.pool).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_borrow_twice_is_duplicate() -> anyhow::Result<()> {
        let fx = setup().await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        let res = fx
            .repo
            .borrow(borrow_event(fx.reader, t0() + Duration::hours(1)))
            .await;
        assert!(matches!(res, Err(AppError::DuplicateBorrow(_))));
        assert_eq!(count(&fx.pool, "transactions").await, 1);
        Ok(())
    }

    #[tokio::test]
    async fn test_borrow_again_after_return() -> anyhow::Result<()> {
        let fx = setup().await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        fx.repo
            .return_book(ReturnBook::new(
                fx.reader,
                "Moby Dick".into(),
                t0() + Duration::days(2),
            ))
            .await?;
        let again = fx
            .repo
            .borrow(borrow_event(fx.reader, t0() + Duration::days(3)))
            .await?;

        let open = fx.repo.find_open_by_user_id(fx.reader).await?;
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].id, again.id);
        assert_eq!(fx.repo.find_history_by_user_id(fx.reader).await?.len(), 2);
        assert_eq!(status_mismatches(&fx.pool).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_return_without_open_transaction_is_not_found() -> anyhow::Result<()> {
        let fx = setup().await?;

        let res = fx
            .repo
            .return_book(ReturnBook::new(fx.reader, "Moby Dick".into(), t0()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        // 他人が借りている蔵書は返却できない
        fx.repo.borrow(borrow_event(fx.other_reader, t0())).await?;
        let res = fx
            .repo
            .return_book(ReturnBook::new(fx.reader, "Moby Dick".into(), t0()))
            .await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));
        let book = fx.books.find_by_id(fx.book_id).await?.unwrap();
        assert_eq!(book.status, BookStatus::Borrowed);
        Ok(())
    }

    #[tokio::test]
    async fn test_borrow_by_unknown_user_rolls_back() -> anyhow::Result<()> {
        let fx = setup().await?;

        let res = fx.repo.borrow(borrow_event(UserId::new(), t0())).await;
        assert!(matches!(res, Err(AppError::EntityNotFound(_))));

        let book = fx.books.find_by_id(fx.book_id).await?.unwrap();
        assert_eq!(book.status, BookStatus::Available);
        assert_eq!(count(&fx.pool, "transactions").await, 0);
        assert_eq!(count(&fx.pool, "payments").await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_open_transactions_are_newest_first() -> anyhow::Result<()> {
        let fx = setup().await?;
        fx.books
            .create(CreateBook::new("Walden".into(), None, "Essay".into(), String::new()))
            .await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        fx.repo
            .borrow(BorrowBook::new(
                fx.reader,
                "Walden".into(),
                "Cash".into(),
                t0() + Duration::days(1),
            ))
            .await?;

        let titles: Vec<String> = fx
            .repo
            .find_open_by_user_id(fx.reader)
            .await?
            .into_iter()
            .map(|t| t.book_title)
            .collect();
        assert_eq!(titles, vec!["Walden", "Moby Dick"]);
        assert_eq!(status_mismatches(&fx.pool).await, 0);
        Ok(())
    }

    async fn register_readers(pool: &ConnectionPool, n: usize) -> anyhow::Result<Vec<UserId>> {
        let users = UserRepositoryImpl::new(pool.clone());
        let mut ids = Vec::with_capacity(n);
        for i in 0..n {
            let user = users
                .create(CreateUser::new(
                    format!("reader{i}"),
                    format!("reader{i}@example.com"),
                    Role::Member,
                ))
                .await?;
            ids.push(user.id);
        }
        Ok(ids)
    }

    #[tokio::test]
    async fn test_concurrent_borrows_of_same_book() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let pool = file_pool(&dir.path().join("library.db"), 5).await;
        let readers = register_readers(&pool, 8).await?;
        BookRepositoryImpl::new(pool.clone())
            .create(CreateBook::new("Hot".into(), None, "Thriller".into(), String::new()))
            .await?;

        let repo = Arc::new(CirculationRepositoryImpl::new(pool.clone()));
        let handles: Vec<_> = readers
            .into_iter()
            .map(|user_id| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.borrow(BorrowBook::new(user_id, "Hot".into(), "Cash".into(), t0()))
                        .await
                })
            })
            .collect();

        let (mut ok, mut unavailable) = (0, 0);
        for handle in handles {
            match handle.await? {
                Ok(_) => ok += 1,
                Err(AppError::BookUnavailable(_)) => unavailable += 1,
                Err(e) => panic!("unexpected error: {e:?}"),
            }
        }
        assert_eq!((ok, unavailable), (1, 7));
        assert_eq!(count(&pool, "transactions").await, 1);
        assert_eq!(count(&pool, "payments").await, 1);
        assert_eq!(status_mismatches(&pool).await, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_concurrent_borrows_of_different_books() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let pool = file_pool(&dir.path().join("library.db"), 5).await;
        let readers = register_readers(&pool, 4).await?;
        let books = BookRepositoryImpl::new(pool.clone());
        for i in 0..readers.len() {
            books
                .create(CreateBook::new(format!("Vol.{i}"), None, "Series".into(), String::new()))
                .await?;
        }

        let repo = Arc::new(CirculationRepositoryImpl::new(pool.clone()));
        let handles: Vec<_> = readers
            .into_iter()
            .enumerate()
            .map(|(i, user_id)| {
                let repo = Arc::clone(&repo);
                tokio::spawn(async move {
                    repo.borrow(BorrowBook::new(user_id, format!("Vol.{i}"), "Cash".into(), t0()))
                        .await
                })
            })
            .collect();

        for handle in handles {
            handle.await??;
        }
        assert_eq!(count(&pool, "transactions").await, 4);
        assert_eq!(status_mismatches(&pool).await, 0);
        Ok(())
    }

    // 状態列と貸出記録が食い違っていても、未返却の貸出は一意インデックスで 1 件に抑える
    #[tokio::test]
    async fn test_open_transaction_index_rejects_second_borrow() -> anyhow::Result<()> {
        let fx = setup().await?;

        fx.repo.borrow(borrow_event(fx.reader, t0())).await?;
        sqlx::query("UPDATE books SET status = 'Available' WHERE book_id = ?")
            .bind(fx.book_id)
            .execute(fx.pool.inner_ref())
            .await?;

        let res = fx
            .repo
            .borrow(borrow_event(fx.other_reader, t0() + Duration::days(1)))
            .await;
        assert!(matches!(res, Err(AppError::BookUnavailable(_))));
        assert_eq!(count(&fx.pool, "transactions").await, 1);
        assert_eq!(count(&fx.pool, "payments").await, 1);
        Ok(())
    }
}
