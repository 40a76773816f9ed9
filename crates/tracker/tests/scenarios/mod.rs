//! Tracker scenarios

mod debounce;
mod suppression;
mod untitled;
