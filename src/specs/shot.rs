// src/specs/shot.rs
use crate::config::consts::{CAPTION_DEPTH, CAPTION_LEFT_MARGIN, CAPTION_MAX_FIELDS, FOUR_POINT_FACTOR};
use crate::document::{Element, Page};
use crate::error::ParseError;
use crate::model::{ShotMetadata, Turn};

/// Caption box printed under a diagram:
///
/// ```text
///   CAN: Koe            <- "team: player", always has the colon
///   Draw   ↻   100%     <- type, turn, score (absent on no-statistics shots)
/// ```
///
/// Scanning starts at `cursor` and stops at the first text outside the band
/// once something inside it was seen. The returned `cursor` is the highest
/// element index that was matched.
pub fn shot_metadata(page: &Page, image: &Element, cursor: usize) -> Result<ShotMetadata, ParseError> {
    let left_bound = image.left - CAPTION_LEFT_MARGIN;
    let right_bound = image.left + image.width;
    let top_bound = image.top + image.height;
    let bottom_bound = top_bound + CAPTION_DEPTH;

    let mut matched: Vec<(usize, &Element)> = Vec::new();
    for (i, e) in page.texts_from(cursor) {
        let inside = between!(left_bound, e.left, right_bound) && between!(top_bound, e.top, bottom_bound);
        if inside {
            matched.push((i, e));
        } else if !matched.is_empty() {
            break;
        }
    }

    let Some(max_ix) = matched.iter().map(|(i, _)| *i).max() else {
        return Err(ParseError::MissingCaption { left: image.left, top: image.top });
    };

    let with_stats = matched.len() >= CAPTION_MAX_FIELDS;

    // Trailing remarks ("picked up debris") sit lowest in the box.
    if matched.len() > CAPTION_MAX_FIELDS {
        if let Some(pos) = lowest(&matched) {
            matched.remove(pos);
        }
    }
    matched.sort_by_key(|(_, e)| e.left);

    let mut meta = ShotMetadata { cursor: max_ix, ..Default::default() };
    let mut has_team = false;
    let mut bottom_row: Vec<&str> = Vec::with_capacity(3);
    for (_, e) in &matched {
        if let Some((team, player)) = e.text.split_once(':') {
            meta.team = s!(team.trim());
            meta.player_name = s!(player.trim());
            has_team = true;
        } else if with_stats {
            bottom_row.push(e.text.as_str());
        }
    }
    if !has_team {
        return Err(ParseError::MissingTeam);
    }

    let mut row = bottom_row.into_iter();
    meta.shot_type = row.next().map(String::from);
    meta.turn = row.next().and_then(parse_turn);
    meta.percent_score = row.next().and_then(parse_percent);

    Ok(meta)
}

/// Arrow glyphs plus the spelled-out forms. The older "In"/"Out" labels
/// assume a right-handed thrower.
pub fn parse_turn(raw: &str) -> Option<Turn> {
    let t = raw.trim();
    match t {
        "\u{21BB}" => return Some(Turn::Clockwise),
        "\u{21BA}" => return Some(Turn::Counterclockwise),
        _ => {}
    }
    match t.to_ascii_lowercase().as_str() {
        "clockwise" | "cw" | "in" => Some(Turn::Clockwise),
        "counterclockwise" | "counter-clockwise" | "ccw" | "out" => Some(Turn::Counterclockwise),
        other => {
            logd!("Shot: unrecognised turn `{}`", other);
            None
        }
    }
}

/// "75%" → 75. Four-point scores 1..=4 are scaled to percent.
pub fn parse_percent(raw: &str) -> Option<u32> {
    let digits = raw.trim().trim_matches('%');
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let n: u32 = digits.parse().ok()?;
    Some(if (1..=4).contains(&n) { n * FOUR_POINT_FACTOR } else { n })
}

/* ---------------- helpers ---------------- */

fn lowest(matched: &[(usize, &Element)]) -> Option<usize> {
    matched
        .iter()
        .enumerate()
        .max_by_key(|(_, (_, e))| e.top)
        .map(|(pos, _)| pos)
}
