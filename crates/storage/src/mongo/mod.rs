// Private module - not exposed in public API
mod builder;
mod client;
mod convert;

pub use builder::MongoIndexStoreBuilder;
pub use client::MongoIndexStore;
