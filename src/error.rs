// src/error.rs
use std::fmt;

use thiserror::Error;

/// Failures while reading one document or one diagram.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("failed to read {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed pdf2xml: {0}")]
    Xml(String),

    #[error("element {index}: attribute `{attr}` missing or not an integer")]
    Attribute { index: usize, attr: &'static str },

    #[error("failed to load diagram {src}")]
    Image {
        src: String,
        #[source]
        source: image::ImageError,
    },

    #[error("diagram {src} is {width}x{height}, expected {expected_w}x{expected_h}")]
    DiagramSize {
        src: String,
        width: u32,
        height: u32,
        expected_w: u32,
        expected_h: u32,
    },

    #[error("no caption found below diagram at ({left}, {top})")]
    MissingCaption { left: i32, top: i32 },

    #[error("caption has no `team: player` field")]
    MissingTeam,

    #[error("score box has no `{0}` row")]
    MissingMarker(&'static str),

    #[error("score box has {found} fields, expected {expected}")]
    ScoreBoxShape { found: usize, expected: usize },

    #[error("score box value `{0}` is not a score")]
    ScoreValue(String),

    #[error("clock value `{0}` is not MM:SS")]
    Clock(String),

    #[error("first shot colour is ambiguous: {red} red / {yellow} yellow parked")]
    FirstShotColor { red: usize, yellow: usize },

    #[error("team `{0}` is not bound to a colour")]
    UnknownTeam(String),

    #[error("team/colour mapping incomplete: {0}")]
    TeamMapping(String),

    #[error("game has no pages")]
    EmptyGame,

    #[error("worker stopped before finishing this game")]
    Abandoned,
}

/// (event, game, end, shot) coordinates of a failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Location {
    pub event: Option<String>,
    pub game: Option<String>,
    pub end: Option<u32>,
    pub shot: Option<u32>,
}

impl Location {
    pub fn game(event: impl Into<String>, game: impl Into<String>) -> Self {
        Self { event: Some(event.into()), game: Some(game.into()), end: None, shot: None }
    }

    pub fn at_end(&self, end: u32) -> Self {
        Self { end: Some(end), shot: None, ..self.clone() }
    }

    pub fn at_shot(&self, end: u32, shot: u32) -> Self {
        Self { end: Some(end), shot: Some(shot), ..self.clone() }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if let Some(e) = &self.event { parts.push(format!("event {e}")); }
        if let Some(g) = &self.game { parts.push(format!("game {g}")); }
        if let Some(n) = self.end { parts.push(format!("end {n}")); }
        if let Some(n) = self.shot { parts.push(format!("shot {n}")); }
        if parts.is_empty() {
            f.write_str("<unknown>")
        } else {
            f.write_str(&parts.join(", "))
        }
    }
}

/// A failure that aborts one game. The batch moves on to the next game.
#[derive(Error, Debug)]
#[error("{location}: {source}")]
pub struct GameError {
    pub location: Location,
    #[source]
    pub source: ParseError,
}

impl GameError {
    pub fn new(location: Location, source: ParseError) -> Self {
        Self { location, source }
    }

    /// Fill in the event/game coordinates known only to the caller.
    pub fn within(mut self, event: &str, game: &str) -> Self {
        self.location.event = Some(s!(event));
        self.location.game = Some(s!(game));
        self
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
