//! Console commands read from stdin.

use std::str::FromStr;

use anyhow::{anyhow, bail, Result};
use radio_core::{RadioManager, RemoteControlEvent};

pub const HELP: &str = "\
commands:
  play | pause | stop          playback control
  toggle | toggle-stop         toggle play/pause, play/stop
  change <url>                 switch to another stream
  url <url>                    set the endpoint (restarts if playing)
  remote <event>               deliver a remote-control event
  parser <name|none>           bind a registered metadata parser
  pause-stops <on|off>         treat pause as stop
  status                       print the current status
  help                         show this text
  quit                         exit";

/// A parsed console command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Play,
    Pause,
    Stop,
    TogglePlayPause,
    TogglePlayStop,
    ChangeStream(String),
    SetEndpoint(String),
    Remote(RemoteControlEvent),
    Parser(Option<String>),
    PauseStopsPlaying(bool),
    Status,
    Help,
    Quit,
}

fn parse_switch(value: &str) -> Result<bool> {
    match value {
        "on" | "true" | "yes" | "1" => Ok(true),
        "off" | "false" | "no" | "0" => Ok(false),
        other => bail!("expected on/off, got '{}'", other),
    }
}

impl FromStr for Command {
    type Err = anyhow::Error;

    fn from_str(line: &str) -> Result<Self> {
        let mut parts = line.split_whitespace();
        let name = parts
            .next()
            .ok_or_else(|| anyhow!("empty command"))?
            .to_ascii_lowercase();
        let arg = parts.next();

        let require = |what: &str| {
            arg.map(ToString::to_string)
                .ok_or_else(|| anyhow!("{} requires {}", name, what))
        };

        let command = match name.as_str() {
            "play" => Self::Play,
            "pause" => Self::Pause,
            "stop" => Self::Stop,
            "toggle" => Self::TogglePlayPause,
            "toggle-stop" => Self::TogglePlayStop,
            "change" => Self::ChangeStream(require("a url")?),
            "url" => Self::SetEndpoint(require("a url")?),
            "remote" => Self::Remote(require("an event name")?.parse()?),
            "parser" => match require("a parser name")?.as_str() {
                "none" => Self::Parser(None),
                name => Self::Parser(Some(name.to_string())),
            },
            "pause-stops" => Self::PauseStopsPlaying(parse_switch(&require("on or off")?)?),
            "status" => Self::Status,
            "help" | "?" => Self::Help,
            "quit" | "exit" | "q" => Self::Quit,
            other => bail!("unknown command '{}' (try 'help')", other),
        };
        Ok(command)
    }
}

/// Outcome of running one command.
#[derive(Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Runs `command` against `manager`. Parser names resolve through `parsers`.
pub fn execute(
    command: Command,
    manager: &RadioManager,
    parsers: &radio_core::ParserRegistry,
) -> Result<Flow> {
    match command {
        Command::Play => manager.play(),
        Command::Pause => manager.pause(),
        Command::Stop => manager.stop(),
        Command::TogglePlayPause => manager.toggle_play_pause(),
        Command::TogglePlayStop => manager.toggle_play_stop(),
        Command::ChangeStream(url) => manager.change_stream(url),
        Command::SetEndpoint(url) => manager.set_stream_endpoint(url),
        Command::Remote(event) => manager.process_remote_control_event(event),
        Command::Parser(None) => manager.clear_metadata_parser(),
        Command::Parser(Some(name)) => manager.set_metadata_parser(parsers.resolve(&name)?),
        Command::PauseStopsPlaying(value) => manager.set_pause_stops_playing(value),
        Command::Status => println!(
            "status={} endpoint={} parser={} pause_stops_playing={}",
            manager.status(),
            manager.stream_endpoint().as_deref().unwrap_or("-"),
            manager.metadata_parser().map_or("-", |p| p.name()),
            manager.pause_stops_playing()
        ),
        Command::Help => println!("{}", HELP),
        Command::Quit => return Ok(Flow::Exit),
    }
    Ok(Flow::Continue)
}
