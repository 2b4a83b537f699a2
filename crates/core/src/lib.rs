//! Core library for the Sort Visualiser pipeline.
//!
//! The crate animates array-sorting algorithms as a synchronised pair of raw
//! video and audio streams. Sorting algorithms run against an instrumented
//! array whose primitives fire render events; a throttle decides which
//! events become frames, and the pipeline draws the bar chart, synthesises
//! the matching tone and appends both to the output channels. Each module
//! owns a distinct subsystem and the drawing surface and byte sinks are
//! injected capabilities, so everything is testable headless.

pub mod array;
pub mod audio;
pub mod clock;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod record;
pub mod render;
pub mod session;
pub mod sorts;

pub use array::{Counters, InstrumentedArray, RenderHook, Touched};
pub use audio::ToneSynth;
pub use clock::RenderThrottle;
pub use config::{AppConfig, AudioConfig, StreamFormat, VideoConfig};
pub use error::{Result, SortVizError};
pub use pipeline::RenderPipeline;
pub use record::{InMemorySink, MediaSink, StreamSink};
pub use render::{Color, FrameCanvas, NullCanvas};
pub use session::{default_program, Session, Stage};
pub use sorts::{Algorithm, RadixBase};
