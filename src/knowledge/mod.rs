pub mod formatting;
pub mod key;
pub mod store;
pub mod types;
