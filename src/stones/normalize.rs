// src/stones/normalize.rs
use crate::config::consts::{
    BOTTOM_BAND_Y, DIAGRAM_HEIGHT, DIAGRAM_WIDTH, FIRST_SHOT_PARKED, PIN_DOWN, PIN_UP, TOP_BAND_Y,
};
use crate::config::options::ExtractOptions;
use crate::error::ParseError;
use crate::model::{Direction, NormalizedStone, StoneColor, StoneRecord};

/// Rotate a stone 180° about the canvas centre (pixel coordinates).
pub fn mirror(stone: StoneRecord) -> StoneRecord {
    StoneRecord {
        x: (DIAGRAM_WIDTH - 1) as f64 - stone.x,
        y: (DIAGRAM_HEIGHT - 1) as f64 - stone.y,
        ..stone
    }
}

/// Pixel-space stones → in-play stones in the skip's frame.
///
/// "Up" diagrams are mirrored into the "down" layout first. The mirrored pin
/// lands one pixel off the "down" pin because the canvas has even sides.
/// Unthrown stones and stones parked in the storage band are dropped, then
/// coordinates are taken relative to the pin with +y toward the thrower.
pub fn normalize(stones: &[StoneRecord], direction: Direction, opts: &ExtractOptions) -> Vec<NormalizedStone> {
    let (pin_x, pin_y) = match direction {
        Direction::Up => PIN_UP,
        Direction::Down => PIN_DOWN,
    };

    stones
        .iter()
        .map(|s| match direction {
            Direction::Up => mirror(*s),
            Direction::Down => *s,
        })
        .filter(|s| s.blob_size > opts.thrown_min_area)
        .filter(|s| s.y < opts.storage_band_y)
        .map(|s| NormalizedStone { color: s.color, x: s.x - pin_x, y: pin_y - s.y })
        .collect()
}

/// Unthrown stones wait at the far end from the house. More of them in the
/// top band means play goes down; a tie reads as up.
pub fn infer_direction(stones: &[StoneRecord]) -> Direction {
    let top = stones.iter().filter(|s| s.y < TOP_BAND_Y).count();
    let bottom = stones.iter().filter(|s| s.y > BOTTOM_BAND_Y).count();
    if top > bottom { Direction::Down } else { Direction::Up }
}

/// Colour of the team that threw shot 1: the one with exactly seven stones
/// still parked. Anything else is reported, never guessed.
pub fn first_shot_color(stones: &[StoneRecord], opts: &ExtractOptions) -> Result<StoneColor, ParseError> {
    let parked = |c: StoneColor| {
        stones
            .iter()
            .filter(|s| s.color == c && s.blob_size < opts.thrown_min_area)
            .count()
    };
    let (red, yellow) = (parked(StoneColor::Red), parked(StoneColor::Yellow));
    match (red == FIRST_SHOT_PARKED, yellow == FIRST_SHOT_PARKED) {
        (true, false) => Ok(StoneColor::Red),
        (false, true) => Ok(StoneColor::Yellow),
        _ => Err(ParseError::FirstShotColor { red, yellow }),
    }
}
