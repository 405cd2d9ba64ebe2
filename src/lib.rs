pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod query;

pub use config::Config;
pub use db::{init_db, Repository};
pub use domain::{Card, CardId, TimeMs, User, UserCard, UserCardId, UserId, UserWithCards};
pub use error::{AppError, StoreError};
pub use query::{CardLoading, CardsByPhrase, UsersWithPhrase};
