// src/assemble.rs
//
// One game = one document; page N is end N. Walks diagrams in order, pairs
// each with its caption and carries the cross-shot state in `GameContext`.

use std::collections::HashMap;
use std::path::Path;

use crate::config::options::ExtractOptions;
use crate::document::{self, Page};
use crate::error::{GameError, Location, ParseError};
use crate::model::{
    Diagnostic, Direction, EndRecord, EndSummary, GameHeader, ParsedGame, ShotRecord, StoneColor,
};
use crate::specs::{self, ScoreBox};
use crate::stones::{self, DirImageSource, ImageSource};

/// Per-game accumulator. Never shared between games.
#[derive(Debug)]
struct GameContext {
    /// Resume point into the current page's elements.
    cursor: usize,
    /// team → colour, bound by the first two shots of end 1.
    teams: HashMap<String, StoneColor>,
    frozen: bool,
    direction: Direction,
    /// Colour that threw shot 1 of the current end.
    first: Option<StoneColor>,
    hammer: Option<StoneColor>,
    diagnostics: Vec<Diagnostic>,
}

impl GameContext {
    fn new() -> Self {
        Self {
            cursor: 0,
            teams: HashMap::new(),
            frozen: false,
            direction: Direction::Up,
            first: None,
            hammer: None,
            diagnostics: Vec::new(),
        }
    }

    fn begin_end(&mut self) {
        self.cursor = 0;
        self.first = None;
        self.hammer = None;
    }

    fn note(&mut self, end: u32, shot: Option<u32>, message: String) {
        logw!("end {}{}: {}", end, shot.map(|s| format!(", shot {s}")).unwrap_or_default(), message);
        self.diagnostics.push(Diagnostic { end, shot, message });
    }

    fn color_of(&self, team: &str) -> Result<StoneColor, ParseError> {
        self.teams
            .get(team)
            .copied()
            .ok_or_else(|| ParseError::UnknownTeam(s!(team)))
    }

    /// Shots 1 and 2 of end 1 carry the only evidence of which team throws
    /// which colour.
    fn bind(&mut self, team: &str, color: StoneColor) -> Result<StoneColor, ParseError> {
        match self.teams.get(team) {
            Some(&c) if c == color => Ok(c),
            Some(&c) => Err(ParseError::TeamMapping(format!(
                "`{team}` threw both {c} and {color}"
            ))),
            None => {
                self.teams.insert(s!(team), color);
                Ok(color)
            }
        }
    }

    fn team_with(&self, color: StoneColor) -> Option<String> {
        self.teams
            .iter()
            .find(|(_, c)| **c == color)
            .map(|(t, _)| t.clone())
    }
}

/// Parse every end of one game. Page N is end N; pages without diagrams
/// are skipped but keep their number.
///
/// The returned error carries end/shot coordinates; event and game are added
/// by the caller (`GameError::within`).
pub fn parse_game(
    pages: &[Page],
    images: &dyn ImageSource,
    opts: &ExtractOptions,
) -> Result<ParsedGame, GameError> {
    let Some(first_page) = pages.first() else {
        return Err(GameError::new(Location::default(), ParseError::EmptyGame));
    };

    let mut ctx = GameContext::new();
    let mut ends: Vec<EndRecord> = Vec::with_capacity(pages.len());

    for (i, page) in pages.iter().enumerate() {
        let number = i as u32 + 1;
        let end = parse_end(page, number, images, opts, &mut ctx)?;
        if number == 1 && !ctx.frozen {
            let why = match end {
                None => "end 1 has no diagrams",
                Some(_) => "end 1 has fewer than two shots",
            };
            return Err(GameError::new(
                Location::default().at_end(1),
                ParseError::TeamMapping(s!(why)),
            ));
        }
        match end {
            Some(end) => ends.push(end),
            None => logd!("Page {}: no diagrams, skipped", page.number),
        }
    }

    let dt = specs::date_and_time(first_page);
    let ns = specs::name_and_sheet(first_page);
    // Only the final page's box is the final score.
    let last = ends
        .last()
        .map(|e| &e.summary)
        .filter(|e| e.number as usize == pages.len());
    let header = GameHeader {
        name: ns.name,
        sheet: ns.sheet,
        date: dt.date,
        start_time: dt.time,
        team_red: ctx.team_with(StoneColor::Red).unwrap_or_default(),
        team_yellow: ctx.team_with(StoneColor::Yellow).unwrap_or_default(),
        final_score_red: last.and_then(|s| s.score_red),
        final_score_yellow: last.and_then(|s| s.score_yellow),
    };

    logd!(
        "Game {:?}: {} end(s), {} diagnostic(s)",
        header.name.as_deref().unwrap_or("?"),
        ends.len(),
        ctx.diagnostics.len()
    );
    Ok(ParsedGame { header, ends, diagnostics: ctx.diagnostics })
}

/// Load `xml_path` and parse it with diagrams resolved beside it.
pub fn parse_game_file(xml_path: &Path, opts: &ExtractOptions) -> Result<ParsedGame, GameError> {
    let doc = document::load(xml_path).map_err(|e| GameError::new(Location::default(), e))?;
    let images = DirImageSource::beside(xml_path);
    parse_game(&doc.pages, &images, opts)
}

/* ---------------- helpers ---------------- */

fn parse_end(
    page: &Page,
    number: u32,
    images: &dyn ImageSource,
    opts: &ExtractOptions,
    ctx: &mut GameContext,
) -> Result<Option<EndRecord>, GameError> {
    let diagrams = specs::shot_images(page);
    if diagrams.is_empty() {
        return Ok(None);
    }
    ctx.begin_end();

    let mut shots = Vec::with_capacity(diagrams.len());
    for (k, (index, el)) in diagrams.into_iter().enumerate() {
        let shot = k as u32 + 1;
        let at = |e: ParseError| GameError::new(Location::default().at_shot(number, shot), e);

        let src = el
            .src
            .as_deref()
            .ok_or(ParseError::Attribute { index, attr: "src" })
            .map_err(at)?;
        let raster = images.load(src).map_err(at)?;
        let ex = stones::extract_stones(&raster, &opts.palette, src).map_err(at)?;
        for &i in &ex.ambiguous {
            let s = ex.stones[i];
            ctx.note(number, Some(shot), format!(
                "{} blob at ({:.1}, {:.1}) overlaps the other colour",
                s.color, s.x, s.y
            ));
        }

        if shot == 1 {
            ctx.direction = stones::infer_direction(&ex.stones);
            match stones::first_shot_color(&ex.stones, opts) {
                Ok(c) => {
                    ctx.first = Some(c);
                    ctx.hammer = Some(c.other());
                }
                // Without end 1 the teams can never be told apart.
                Err(e) if number == 1 => return Err(at(e)),
                Err(e) => ctx.note(number, Some(shot), format!("hammer unknown: {e}")),
            }
        }

        let meta = specs::shot_metadata(page, el, ctx.cursor).map_err(at)?;
        ctx.cursor = meta.cursor;

        let color = if ctx.frozen || number > 1 {
            ctx.color_of(&meta.team).map_err(at)?
        } else {
            // end 1, shots 1 and 2
            let Some(first) = ctx.first else {
                return Err(at(ParseError::TeamMapping(s!("first shot colour unknown"))));
            };
            let color = if shot == 1 { first } else { first.other() };
            let color = ctx.bind(&meta.team, color).map_err(at)?;
            if shot == 2 {
                ctx.frozen = true;
                logd!("Teams: {:?}", ctx.teams);
            }
            color
        };

        let placed = stones::normalize(&ex.stones, ctx.direction, opts);
        shots.push(ShotRecord { number: shot, color, meta, stones: placed });
    }

    let score = specs::score_and_time(page, ctx.cursor)
        .map_err(|e| GameError::new(Location::default().at_end(number), e))?;
    let mut summary = EndSummary {
        number,
        direction: ctx.direction,
        hammer_color: ctx.hammer,
        score_red: None,
        score_yellow: None,
        time_left_red: None,
        time_left_yellow: None,
    };
    match score {
        Some(sb) => fill_score(&mut summary, &sb, ctx)
            .map_err(|e| GameError::new(Location::default().at_end(number), e))?,
        None => ctx.note(number, None, s!("no score box")),
    }

    Ok(Some(EndRecord { summary, shots }))
}

fn fill_score(summary: &mut EndSummary, sb: &ScoreBox, ctx: &GameContext) -> Result<(), ParseError> {
    for (i, team) in sb.teams.iter().enumerate() {
        let (score, left) = (Some(sb.scores[i]), Some(sb.time_left[i]));
        match ctx.color_of(team)? {
            StoneColor::Red => {
                summary.score_red = score;
                summary.time_left_red = left;
            }
            StoneColor::Yellow => {
                summary.score_yellow = score;
                summary.time_left_yellow = left;
            }
        }
    }
    Ok(())
}
