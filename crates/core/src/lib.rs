//! Domain logic shared by the database and API crates.
//!
//! Nothing in here touches the network or the database: slug generation,
//! pagination math, audit constants, CSV row parsing and the response cache
//! abstraction are all pure or in-process.

pub mod audit;
pub mod cache;
pub mod csv_import;
pub mod dates;
pub mod error;
pub mod pagination;
pub mod roles;
pub mod slug;
pub mod types;
pub mod validation;
