mod connection;
mod store;

pub use connection::{check_health, create_pool};
pub use store::{PgStore, Store};
