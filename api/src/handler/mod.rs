pub mod author;
pub mod book;
pub mod circulation;
pub mod feedback;
pub mod health;
pub mod membership;
pub mod payment;
pub mod user;
