pub mod logger;
pub mod signal;
pub mod timer;
