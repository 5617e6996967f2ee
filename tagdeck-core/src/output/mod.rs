//! Audio output path: the sink abstraction and the interrupting gate.

pub mod gate;
pub mod sink;

pub use gate::{GateMode, OutputGate};
pub use sink::{AudioSink, BufferSink, NullSink};
