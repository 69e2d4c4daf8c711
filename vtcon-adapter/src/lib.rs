//! Vtcon Adapter
//!
//! The dispatch layer between a VT sequence parser and a console screen
//! buffer. The parser hands over already-parsed commands with numeric
//! parameters; the dispatcher turns each one into get/set calls against the
//! buffer through the [`ConsoleApi`] capability interface, with all the
//! coordinate translation, clamping, and overflow checking that entails.
//!
//! The buffer itself lives behind [`ConsoleApi`]; [`SoftConsole`] is an
//! in-memory implementation for headless use and testing.

pub mod adapter;
pub mod conapi;
pub mod error;
mod graphics;
pub mod soft;

pub use adapter::{EraseKind, VtAdapter};
pub use conapi::{ApiError, ApiResult, BufferInfo, ConsoleApi, CursorInfo};
pub use error::{DispatchError, DispatchResult};
pub use soft::{ColorSlot, ConsoleModes, SoftConsole};
