//! Host-side abstractions shared by every quote source

pub mod clock;
pub mod config;
pub mod log;
pub mod metadata;
pub mod price;
pub mod registry;

// Re-export main types for cleaner imports
pub use clock::{Clock, FixedClock, SystemClock};
pub use metadata::{MetaValue, Metadata};
pub use price::{PriceSource, Quote};
pub use registry::SourceRegistry;
