pub mod audit;
pub mod auth;
pub mod crud;
pub mod projects;
pub mod public;
pub mod stats;
pub mod users;
pub mod wins;
