//! Scrolling strip-chart traces
//!
//! ```text
//!   index:   0   1   2  ...  318  319
//!   push:   drop <------ shift ----- new
//! ```
//!
//! Buffers hold display rows, not values. The caller supplies a
//! [`TraceSink`] when it wants the erase/draw segments that keep the
//! on-screen trace in sync with the buffer.

mod buffer;
mod trace;

pub use buffer::{ScopeBuffer, ScopeOp, ScopeRange, Segment, TraceSink, SCOPE_WIDTH};
pub use trace::Trace;
