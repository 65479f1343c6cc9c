//! Command line arguments

use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use drumroll_core::audio::{SegmentWindow, DEFAULT_SEGMENT_SECONDS};

pub const USAGE: &str = "\
Usage: drumroll-viewer <audio.wav> <transcription.json> [options]

Options:
  --start <seconds>    Offset of the transcribed segment in the audio file (default 0)
  --length <seconds>   Segment length (default 30)
  --full               Load the audio file to the end
  --config <path>      Config file (default ~/.config/drumroll/config.yaml)
  --silent             Don't open an audio device
  --list-devices       Print output device names and exit";

#[derive(Debug, Clone, PartialEq)]
pub struct Args {
    pub audio: PathBuf,
    pub transcription: PathBuf,
    pub window: SegmentWindow,
    pub config: Option<PathBuf>,
    pub silent: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    View(Args),
    ListDevices,
    Help,
}

fn seconds(flag: &str, value: Option<String>) -> Result<f64> {
    let value = value.ok_or_else(|| anyhow!("{} needs a value", flag))?;
    let seconds: f64 = value
        .parse()
        .with_context(|| format!("{} expects seconds, got {:?}", flag, value))?;
    if !seconds.is_finite() || seconds < 0.0 {
        bail!("{} must be a non-negative number of seconds", flag);
    }
    Ok(seconds)
}

/// Parse arguments, program name excluded
pub fn parse_args<I>(args: I) -> Result<Command>
where
    I: IntoIterator<Item = String>,
{
    let mut positional = Vec::new();
    let mut window = SegmentWindow::default();
    let mut config = None;
    let mut silent = false;

    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => return Ok(Command::Help),
            "--list-devices" => return Ok(Command::ListDevices),
            "--start" => window.start = seconds("--start", args.next())?,
            "--length" => window.length = Some(seconds("--length", args.next())?),
            "--full" => window.length = None,
            "--silent" => silent = true,
            "--config" => {
                let path = args.next().ok_or_else(|| anyhow!("--config needs a path"))?;
                config = Some(PathBuf::from(path));
            }
            flag if flag.starts_with("--") => bail!("Unknown option {}", flag),
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let mut positional = positional.into_iter();
    let (Some(audio), Some(transcription), None) =
        (positional.next(), positional.next(), positional.next())
    else {
        bail!("Expected an audio file and a transcription file");
    };

    Ok(Command::View(Args {
        audio,
        transcription,
        window,
        config,
        silent,
    }))
}

impl Args {
    pub fn segment_length(&self) -> f64 {
        self.window.length.unwrap_or(DEFAULT_SEGMENT_SECONDS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Command> {
        parse_args(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn test_defaults() {
        let Command::View(args) = parse(&["song.wav", "hits.json"]).unwrap() else {
            panic!("expected view command");
        };
        assert_eq!(args.audio, PathBuf::from("song.wav"));
        assert_eq!(args.transcription, PathBuf::from("hits.json"));
        assert_eq!(args.window, SegmentWindow::default());
        assert_eq!(args.window.length, Some(30.0));
        assert!(!args.silent);
    }

    #[test]
    fn test_options() {
        let Command::View(args) = parse(&[
            "--start", "12.5", "song.wav", "--full", "hits.json", "--silent", "--config",
            "alt.yaml",
        ])
        .unwrap() else {
            panic!("expected view command");
        };
        assert_eq!(args.window.start, 12.5);
        assert_eq!(args.window.length, None);
        assert!(args.silent);
        assert_eq!(args.config, Some(PathBuf::from("alt.yaml")));
    }

    #[test]
    fn test_errors() {
        assert!(parse(&["song.wav"]).is_err());
        assert!(parse(&["a.wav", "b.json", "c"]).is_err());
        assert!(parse(&["a.wav", "b.json", "--start"]).is_err());
        assert!(parse(&["a.wav", "b.json", "--length", "-3"]).is_err());
        assert!(parse(&["a.wav", "b.json", "--bogus"]).is_err());
    }

    #[test]
    fn test_commands() {
        assert_eq!(parse(&["--list-devices"]).unwrap(), Command::ListDevices);
        assert_eq!(parse(&["a.wav", "--help"]).unwrap(), Command::Help);
    }
}
