//! iced widgets for reviewing transcribed drum hits
//!
//! ## Architecture (iced 0.14 patterns)
//!
//! - **Scene**: every frame is first built as plain draw primitives
//!   ([`timeline::build_scene`]) and then replayed by the canvas program
//! - **View functions**: take state references, return `Element<TimelineMessage>`
//! - **Canvas Program**: custom rendering plus event-to-message translation
//! - **TimelineWidget**: owns dataset, layout, transport and the frame loop;
//!   hosts forward messages with `.map(...)`

pub mod theme;
pub mod timeline;

pub use timeline::{TimelineMessage, TimelineWidget};
