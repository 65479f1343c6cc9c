//! drumroll-viewer - review a drum transcription against its audio
//!
//! Loads one audio segment and the hits transcribed from it, then shows
//! the timeline with synchronized playback.
//!
//! Set RUST_LOG=debug for verbose output.

mod app;
mod args;
mod config;
mod session;
mod source;

use std::path::PathBuf;

use iced::Size;

use app::{DrumrollApp, Message};
use args::{parse_args, Command, USAGE};
use drumroll_widgets::TimelineWidget;
use source::JsonFileSource;

/// Window chrome around the widget: container padding on both sides
const WINDOW_PADDING: f32 = 24.0;

fn main() -> iced::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    let args = match parse_args(std::env::args().skip(1)) {
        Ok(Command::View(args)) => args,
        Ok(Command::ListDevices) => {
            for name in drumroll_core::audio::output_device_names() {
                println!("{}", name);
            }
            return Ok(());
        }
        Ok(Command::Help) => {
            println!("{}", USAGE);
            return Ok(());
        }
        Err(e) => {
            eprintln!("Error: {:#}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    let config_path: PathBuf = args.config.clone().unwrap_or_else(config::default_config_path);
    let config = config::load_viewer_config(&config_path);
    log::info!(
        "drumroll-viewer starting: {} + {} (segment {:.1}s from {:.1}s)",
        args.audio.display(),
        args.transcription.display(),
        args.segment_length(),
        args.window.start
    );

    let source = JsonFileSource::new(&args.transcription);
    let session = session::load_session(&args, &config, &source);

    let lane_count = session
        .as_ref()
        .map(|s| s.layout.lane_count())
        .unwrap_or(drumroll_core::types::NUM_DRUM_CLASSES);
    let window_height =
        TimelineWidget::required_height(&config.display, lane_count) + WINDOW_PADDING;

    // Wrap the session in a cell so the boot closure can be Fn (required by iced)
    let session_cell = std::cell::RefCell::new(Some(session));

    iced::application(
        move || {
            let session = session_cell
                .borrow_mut()
                .take()
                .unwrap_or_else(|| Err(anyhow::anyhow!("Session was already opened")));
            (DrumrollApp::new(session), iced::Task::none())
        },
        update,
        view,
    )
    .subscription(DrumrollApp::subscription)
    .theme(DrumrollApp::theme)
    .title(DrumrollApp::title)
    .window_size(Size::new(config.window_width, window_height))
    .run()
}

fn update(app: &mut DrumrollApp, message: Message) -> iced::Task<Message> {
    app.update(message)
}

fn view(app: &DrumrollApp) -> iced::Element<'_, Message> {
    app.view()
}
