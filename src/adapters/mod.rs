// Adapters layer: concrete implementations for external systems (file system, Google APIs).

pub mod google;
pub mod storage;
pub mod writers;
