use std::sync::Arc;

use adapter::{
    database::ConnectionPool,
    repository::{
        author::AuthorRepositoryImpl, book::BookRepositoryImpl,
        circulation::CirculationRepositoryImpl, feedback::FeedbackRepositoryImpl,
        health::HealthCheckRepositoryImpl, membership::MembershipRepositoryImpl,
        payment::PaymentRepositoryImpl, user::UserRepositoryImpl,
    },
};
use kernel::repository::{
    author::AuthorRepository, book::BookRepository, circulation::CirculationRepository,
    feedback::FeedbackRepository, health::HealthCheckRepository,
    membership::MembershipRepository, payment::PaymentRepository, user::UserRepository,
};

// 各リポジトリの実装を 1 つの接続プールから組み立てて保持する
#[derive(Clone)]
pub struct AppRegistryImpl {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    user_repository: Arc<dyn UserRepository>,
    author_repository: Arc<dyn AuthorRepository>,
    book_repository: Arc<dyn BookRepository>,
    circulation_repository: Arc<dyn CirculationRepository>,
    membership_repository: Arc<dyn MembershipRepository>,
    payment_repository: Arc<dyn PaymentRepository>,
    feedback_repository: Arc<dyn FeedbackRepository>,
}

impl AppRegistryImpl {
    pub fn new(pool: ConnectionPool) -> Self {
        Self {
            health_check_repository: Arc::new(HealthCheckRepositoryImpl::new(pool.clone())),
            user_repository: Arc::new(UserRepositoryImpl::new(pool.clone())),
            author_repository: Arc::new(AuthorRepositoryImpl::new(pool.clone())),
            book_repository: Arc::new(BookRepositoryImpl::new(pool.clone())),
            circulation_repository: Arc::new(CirculationRepositoryImpl::new(pool.clone())),
            membership_repository: Arc::new(MembershipRepositoryImpl::new(pool.clone())),
            payment_repository: Arc::new(PaymentRepositoryImpl::new(pool.clone())),
            feedback_repository: Arc::new(FeedbackRepositoryImpl::new(pool)),
        }
    }
}

#[mockall::automock]
pub trait AppRegistryExt {
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository>;
    fn user_repository(&self) -> Arc<dyn UserRepository>;
    fn author_repository(&self) -> Arc<dyn AuthorRepository>;
    fn book_repository(&self) -> Arc<dyn BookRepository>;
    fn circulation_repository(&self) -> Arc<dyn CirculationRepository>;
    fn membership_repository(&self) -> Arc<dyn MembershipRepository>;
    fn payment_repository(&self) -> Arc<dyn PaymentRepository>;
    fn feedback_repository(&self) -> Arc<dyn FeedbackRepository>;
}

impl AppRegistryExt for AppRegistryImpl {
    fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    fn user_repository(&self) -> Arc<dyn UserRepository> {
        self.user_repository.clone()
    }

    fn author_repository(&self) -> Arc<dyn AuthorRepository> {
        self.author_repository.clone()
    }

    fn book_repository(&self) -> Arc<dyn BookRepository> {
        self.book_repository.clone()
    }

    fn circulation_repository(&self) -> Arc<dyn CirculationRepository> {
        self.circulation_repository.clone()
    }

    fn membership_repository(&self) -> Arc<dyn MembershipRepository> {
        self.membership_repository.clone()
    }

    fn payment_repository(&self) -> Arc<dyn PaymentRepository> {
        self.payment_repository.clone()
    }

    fn feedback_repository(&self) -> Arc<dyn FeedbackRepository> {
        self.feedback_repository.clone()
    }
}

pub type AppRegistry = Arc<dyn AppRegistryExt + Send + Sync + 'static>;
