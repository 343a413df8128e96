// src/catalog.rs
//
// Data tree layout, as produced by the downloader:
//
//   <root>/<event>/<game type>/<…~session>/<game>.xml (+ diagram PNGs)
//
// Every level is visited in sorted order so ids come out the same on every run.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use chrono::NaiveDate;

use crate::config::consts::GAME_DATE_FORMAT;
use crate::model::{EventSummary, GameInfo};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Event {
    pub name: String,
    pub games: Vec<GameInfo>,
}

/// All events under `root`, or only `only` when given.
pub fn discover(root: &Path, only: Option<&str>) -> io::Result<Vec<Event>> {
    let names: Vec<String> = match only {
        Some(name) => {
            if !root.join(name).is_dir() {
                return Err(io::Error::new(
                    io::ErrorKind::NotFound,
                    format!("event directory {} not found", root.join(name).display()),
                ));
            }
            vec![s!(name)]
        }
        None => sorted_dirs(root)?
            .iter()
            .filter_map(|p| file_name(p))
            .collect(),
    };

    let mut events = Vec::with_capacity(names.len());
    for name in names {
        let games = event_games(&root.join(&name), &name)?;
        logd!("Catalog: {} → {} game file(s)", name, games.len());
        events.push(Event { name, games });
    }
    Ok(events)
}

/// Directory names "Men's_Teams" / "Women's_Teams" → "Men" / "Women".
pub fn game_type(dir_name: &str) -> &'static str {
    match dir_name {
        "Men's_Teams" => "Men",
        "Women's_Teams" => "Women",
        _ => "Unknown",
    }
}

/// Session directories look like "2018~Round_Robin~Session_4"; the session is
/// whatever follows the last '~' (the whole name if there is none).
pub fn session_of(dir_name: &str) -> &str {
    dir_name.rsplit_once('~').map_or(dir_name, |(_, s)| s)
}

/// "Sat 10 Feb 2018" as printed in the game header.
pub fn parse_game_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), GAME_DATE_FORMAT).ok()
}

/// Event bounds are the earliest and latest game dates, kept in printed form.
/// Unparseable dates are ignored.
pub fn event_summary<'a>(name: &str, dates: impl IntoIterator<Item = &'a str>) -> EventSummary {
    let mut first: Option<(NaiveDate, &str)> = None;
    let mut last: Option<(NaiveDate, &str)> = None;
    for raw in dates {
        let Some(d) = parse_game_date(raw) else {
            logd!("Catalog: unparseable game date `{}`", raw);
            continue;
        };
        if first.map_or(true, |(f, _)| d < f) {
            first = Some((d, raw));
        }
        if last.map_or(true, |(l, _)| d > l) {
            last = Some((d, raw));
        }
    }
    EventSummary {
        name: s!(name),
        start_date: first.map(|(_, r)| s!(r)),
        end_date: last.map(|(_, r)| s!(r)),
    }
}

/* ---------------- helpers ---------------- */

fn event_games(event_dir: &Path, event: &str) -> io::Result<Vec<GameInfo>> {
    let mut games = Vec::new();
    for type_dir in sorted_dirs(event_dir)? {
        let gt = file_name(&type_dir).unwrap_or_default();
        for session_dir in sorted_dirs(&type_dir)? {
            let session_name = file_name(&session_dir).unwrap_or_default();
            for file in sorted_files(&session_dir, "xml")? {
                games.push(GameInfo {
                    event: s!(event),
                    game_type: s!(game_type(&gt)),
                    session: s!(session_of(&session_name)),
                    file,
                });
            }
        }
    }
    Ok(games)
}

fn sorted_dirs(dir: &Path) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn sorted_files(dir: &Path, ext: &str) -> io::Result<Vec<PathBuf>> {
    let mut out = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(ext));
        if path.is_file() && matches {
            out.push(path);
        }
    }
    out.sort();
    Ok(out)
}

fn file_name(p: &Path) -> Option<String> {
    p.file_name().and_then(|s| s.to_str()).map(String::from)
}
