pub mod enums;
pub mod structs;

// Re-export the core types to provide a clean public API.
pub use enums::AlertKind;
pub use structs::{Alert, Kline, MarketDescriptor};
