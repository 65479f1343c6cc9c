//! Frame scheduling for the timeline
//!
//! While running, the loop subscribes to display refresh notifications; each
//! delivered frame syncs the transport and the canvas repaints from scratch.
//! Stopping drops the subscription and makes any frame already in flight a
//! no-op.

use iced::Subscription;

use super::message::TimelineMessage;

#[derive(Debug, Default)]
pub struct RenderLoop {
    running: bool,
    frames_rendered: u64,
}

impl RenderLoop {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        if !self.running {
            log::debug!("RenderLoop: started");
            self.running = true;
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            log::debug!(
                "RenderLoop: stopped after {} frames",
                self.frames_rendered
            );
            self.running = false;
        }
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Accept a frame tick; returns `false` if the loop is stopped
    pub fn begin_frame(&mut self) -> bool {
        if !self.running {
            log::trace!("RenderLoop: ignoring frame after stop");
            return false;
        }
        self.frames_rendered += 1;
        true
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frames_rendered
    }

    pub fn subscription(&self) -> Subscription<TimelineMessage> {
        if self.running {
            iced::window::frames().map(TimelineMessage::Frame)
        } else {
            Subscription::none()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stop_cancels_frames() {
        let mut render_loop = RenderLoop::new();

        assert!(!render_loop.begin_frame());

        render_loop.start();
        assert!(render_loop.begin_frame());
        assert!(render_loop.begin_frame());

        render_loop.stop();
        assert!(!render_loop.is_running());
        assert!(!render_loop.begin_frame());
        assert_eq!(render_loop.frames_rendered(), 2);
    }

    #[test]
    fn test_start_is_idempotent() {
        let mut render_loop = RenderLoop::new();
        render_loop.start();
        render_loop.start();
        assert!(render_loop.is_running());
        render_loop.stop();
        render_loop.stop();
        assert!(!render_loop.is_running());
    }
}
