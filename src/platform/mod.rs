//! Platform abstraction layer
//!
//! Handles host differences for:
//! - Input (keyboard, touch and gamepad reduce to one held-controls snapshot)
//! - Storage (a byte-oriented key-value store)
//! - Time (fixed-step frame scheduling)

pub mod input;
pub mod storage;
pub mod time;

pub use input::{InputSource, ScriptedInput};
pub use storage::{FileStore, KeyValueStore, MemoryStore, StoreError};
pub use time::FrameClock;
