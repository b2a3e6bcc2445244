pub mod sqlite;

pub use sqlite::SqliteRateStore;
