//! Drum-hit timeline widget
//!
//! ## Usage
//!
//! ```ignore
//! let mut timeline = TimelineWidget::new(dataset, layout, transport, display);
//! timeline.mount();
//!
//! // update:       Message::Timeline(msg) => self.timeline.update(msg)
//! // view:         self.timeline.view().map(Message::Timeline)
//! // subscription: self.timeline.subscription().map(Message::Timeline)
//! ```

mod canvas;
mod input;
mod message;
mod render_loop;
mod scene;
mod view;
mod widget;

pub use canvas::TimelineCanvas;
pub use input::{
    slider_from_volume, volume_from_slider, InputAction, InputController, PointerState,
    NUDGE_SECONDS,
};
pub use message::TimelineMessage;
pub use render_loop::RenderLoop;
pub use scene::{
    build_scene, format_clock, highlight_alpha, hover_label, marker_radius, Layer, Primitive,
    Scene, SceneInput, TextAlign, ALPHA_RANGE, BASE_ALPHA, MIN_RADIUS, RADIUS_RANGE,
};
pub use view::{control_bar, timeline_canvas};
pub use widget::TimelineWidget;
