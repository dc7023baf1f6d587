pub mod author;
pub mod book;
pub mod circulation;
pub mod feedback;
pub mod id;
pub mod membership;
pub mod money;
pub mod payment;
pub mod role;
pub mod user;
