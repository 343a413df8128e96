// src/model.rs
//
// Records recovered from one game. Pixel-space stones (StoneRecord) never leave
// the stone pipeline; everything else is what the sink receives.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoneColor {
    Red,
    Yellow,
}

impl StoneColor {
    pub fn other(self) -> Self {
        match self {
            StoneColor::Red => StoneColor::Yellow,
            StoneColor::Yellow => StoneColor::Red,
        }
    }
    pub fn as_str(self) -> &'static str {
        match self {
            StoneColor::Red => "red",
            StoneColor::Yellow => "yellow",
        }
    }
}

impl fmt::Display for StoneColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which end of the sheet the end is played toward, as seen on the diagram.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Turn {
    Clockwise,
    Counterclockwise,
}

impl Turn {
    pub fn as_str(self) -> &'static str {
        match self {
            Turn::Clockwise => "clockwise",
            Turn::Counterclockwise => "counterclockwise",
        }
    }
}

/// One closed blob on a diagram, pixel space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StoneRecord {
    pub color: StoneColor,
    pub x: f64,
    pub y: f64,
    pub blob_size: f64,
}

/// An in-play stone, button-centred: +x to the skip's right, +y toward the skip.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct NormalizedStone {
    pub color: StoneColor,
    pub x: f64,
    pub y: f64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShotMetadata {
    pub team: String,
    pub player_name: String,
    pub shot_type: Option<String>,
    pub turn: Option<Turn>,
    pub percent_score: Option<u32>,
    /// Highest page element index consulted; resume point for the next shot
    #[serde(skip)]
    pub cursor: usize,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ShotRecord {
    pub number: u32,
    pub color: StoneColor,
    pub meta: ShotMetadata,
    pub stones: Vec<NormalizedStone>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndSummary {
    pub number: u32,
    pub direction: Direction,
    pub hammer_color: Option<StoneColor>,
    pub score_red: Option<u32>,
    pub score_yellow: Option<u32>,
    pub time_left_red: Option<u32>,
    pub time_left_yellow: Option<u32>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EndRecord {
    pub summary: EndSummary,
    pub shots: Vec<ShotRecord>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameHeader {
    pub name: Option<String>,
    pub sheet: Option<String>,
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub team_red: String,
    pub team_yellow: String,
    pub final_score_red: Option<u32>,
    pub final_score_yellow: Option<u32>,
}

/// Something worth a human look that did not stop the game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub end: u32,
    pub shot: Option<u32>,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ParsedGame {
    pub header: GameHeader,
    pub ends: Vec<EndRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Where a game file sits in the data tree.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameInfo {
    pub event: String,
    pub game_type: String,
    pub session: String,
    pub file: PathBuf,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSummary {
    pub name: String,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}
