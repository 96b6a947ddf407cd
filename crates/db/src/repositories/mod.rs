pub mod notification_repo;
pub mod order_repo;
pub mod user_repo;

pub use notification_repo::NotificationRepo;
pub use order_repo::OrderRepo;
pub use user_repo::UserRepo;
