pub mod analyzers;
pub mod fetch;
pub mod filter;
pub mod loader;
pub mod output;
pub mod records;
pub mod viz;
