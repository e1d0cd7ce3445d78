pub mod events;
pub mod health;
pub mod notifications;
pub mod orders;
pub mod packers;
pub mod upload;
