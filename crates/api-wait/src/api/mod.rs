// Public API types module
//
// Caller-facing option types with builder-style setters.

pub mod wait_options;

pub use wait_options::WaitForApiOptions;
