pub mod connection;
pub mod scheduler;
pub mod session;
pub mod hub;
pub mod handler;
