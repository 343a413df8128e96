// src/store.rs
//
// In-memory relational tables fed by the runner. Ids are 1-based and assigned
// in commit order; child rows carry their parent's id.

use crate::model::{Direction, EventSummary, GameInfo, ParsedGame, StoneColor};

#[derive(Clone, Debug, Default)]
pub struct Dataset {
    pub headers: Option<Vec<String>>,
    pub rows: Vec<Vec<String>>,
}

impl Dataset {
    fn with_headers(cols: &[&str]) -> Self {
        Self { headers: Some(cols.iter().map(|c| s!(*c)).collect()), rows: Vec::new() }
    }

    /// Append a row whose first cell is the new id.
    fn push(&mut self, mut cells: Vec<String>) -> u64 {
        let id = self.rows.len() as u64 + 1;
        cells.insert(0, id.to_string());
        self.rows.push(cells);
        id
    }
}

pub const EVENT_COLUMNS: &[&str] = &["id", "name", "start_date", "end_date"];
pub const GAME_COLUMNS: &[&str] = &[
    "id", "event_id", "session", "name", "sheet", "type", "start_date", "start_time",
    "team_red", "team_yellow", "final_score_red", "final_score_yellow",
];
pub const END_COLUMNS: &[&str] = &[
    "id", "game_id", "number", "direction", "color_hammer",
    "score_red", "score_yellow", "time_left_red", "time_left_yellow",
];
pub const SHOT_COLUMNS: &[&str] = &[
    "id", "end_id", "number", "color", "team", "player_name", "type", "turn", "percent_score",
];
pub const STONE_COLUMNS: &[&str] = &["id", "shot_id", "color", "x", "y"];

/// Receives parsed records. Implementations own id assignment.
pub trait Sink {
    /// Open an event; its date bounds arrive with `end_event`.
    fn begin_event(&mut self, name: &str) -> u64;

    /// Store one game with all its ends, shots and stones. Returns the game id.
    fn add_game(&mut self, event_id: u64, info: &GameInfo, game: &ParsedGame) -> u64;

    fn end_event(&mut self, _event_id: u64, _summary: &EventSummary) {}
}

pub struct TableSink {
    pub events: Dataset,
    pub games: Dataset,
    pub ends: Dataset,
    pub shots: Dataset,
    pub stone_positions: Dataset,
}

impl Default for TableSink {
    fn default() -> Self {
        Self {
            events: Dataset::with_headers(EVENT_COLUMNS),
            games: Dataset::with_headers(GAME_COLUMNS),
            ends: Dataset::with_headers(END_COLUMNS),
            shots: Dataset::with_headers(SHOT_COLUMNS),
            stone_positions: Dataset::with_headers(STONE_COLUMNS),
        }
    }
}

impl TableSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// (table name, data) in parent-to-child order.
    pub fn tables(&self) -> [(&'static str, &Dataset); 5] {
        [
            ("events", &self.events),
            ("games", &self.games),
            ("ends", &self.ends),
            ("shots", &self.shots),
            ("stone_positions", &self.stone_positions),
        ]
    }
}

impl Sink for TableSink {
    fn begin_event(&mut self, name: &str) -> u64 {
        self.events.push(vec![s!(name), s!(), s!()])
    }

    fn add_game(&mut self, event_id: u64, info: &GameInfo, game: &ParsedGame) -> u64 {
        let h = &game.header;
        let game_id = self.games.push(vec![
            event_id.to_string(),
            info.session.clone(),
            opt(&h.name),
            opt(&h.sheet),
            info.game_type.clone(),
            opt(&h.date),
            opt(&h.start_time),
            h.team_red.clone(),
            h.team_yellow.clone(),
            num(h.final_score_red),
            num(h.final_score_yellow),
        ]);

        for end in &game.ends {
            let e = &end.summary;
            let end_id = self.ends.push(vec![
                game_id.to_string(),
                e.number.to_string(),
                s!(direction_flag(e.direction)),
                e.hammer_color.map(StoneColor::as_str).map(String::from).unwrap_or_default(),
                num(e.score_red),
                num(e.score_yellow),
                num(e.time_left_red),
                num(e.time_left_yellow),
            ]);

            for shot in &end.shots {
                let m = &shot.meta;
                let shot_id = self.shots.push(vec![
                    end_id.to_string(),
                    shot.number.to_string(),
                    s!(shot.color.as_str()),
                    m.team.clone(),
                    m.player_name.clone(),
                    opt(&m.shot_type),
                    m.turn.map(|t| s!(t.as_str())).unwrap_or_default(),
                    num(m.percent_score),
                ]);

                for st in &shot.stones {
                    self.stone_positions.push(vec![
                        shot_id.to_string(),
                        s!(st.color.as_str()),
                        st.x.to_string(),
                        st.y.to_string(),
                    ]);
                }
            }
        }
        game_id
    }

    fn end_event(&mut self, event_id: u64, summary: &EventSummary) {
        let Some(row) = self.events.rows.get_mut(event_id as usize - 1) else {
            return;
        };
        row[2] = opt(&summary.start_date);
        row[3] = opt(&summary.end_date);
    }
}

/* ---------------- helpers ---------------- */

/// Stored as 1 = up, 0 = down.
fn direction_flag(d: Direction) -> &'static str {
    match d {
        Direction::Up => "1",
        Direction::Down => "0",
    }
}

fn opt(v: &Option<String>) -> String {
    v.clone().unwrap_or_default()
}

fn num(v: Option<u32>) -> String {
    v.map(|n| n.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::*;
    use std::path::PathBuf;

    fn sample_game() -> ParsedGame {
        let meta = |team: &str, player: &str| ShotMetadata {
            team: s!(team),
            player_name: s!(player),
            shot_type: Some(s!("Draw")),
            turn: Some(Turn::Clockwise),
            percent_score: Some(75),
            cursor: 0,
        };
        ParsedGame {
            header: GameHeader {
                name: Some(s!("Men - Round Robin")),
                sheet: Some(s!("B")),
                date: Some(s!("Sat 10 Feb 2018")),
                start_time: Some(s!("14:05")),
                team_red: s!("CAN"),
                team_yellow: s!("SWE"),
                final_score_red: Some(1),
                final_score_yellow: Some(0),
            },
            ends: vec![EndRecord {
                summary: EndSummary {
                    number: 1,
                    direction: Direction::Down,
                    hammer_color: Some(StoneColor::Yellow),
                    score_red: Some(1),
                    score_yellow: Some(0),
                    time_left_red: Some(595),
                    time_left_yellow: Some(600),
                },
                shots: vec![
                    ShotRecord {
                        number: 1,
                        color: StoneColor::Red,
                        meta: meta("CAN", "Koe"),
                        stones: vec![NormalizedStone { color: StoneColor::Red, x: 0.0, y: 19.5 }],
                    },
                    ShotRecord {
                        number: 2,
                        color: StoneColor::Yellow,
                        meta: ShotMetadata { turn: None, percent_score: None, ..meta("SWE", "Edin") },
                        stones: vec![],
                    },
                ],
            }],
            diagnostics: vec![],
        }
    }

    fn sample_info() -> GameInfo {
        GameInfo {
            event: s!("WMCC2018"),
            game_type: s!("Men"),
            session: s!("Session_4"),
            file: PathBuf::from("g1.xml"),
        }
    }

    #[test]
    fn ids_and_foreign_keys() {
        let mut sink = TableSink::new();
        let ev = sink.begin_event("WMCC2018");
        let g1 = sink.add_game(ev, &sample_info(), &sample_game());
        let g2 = sink.add_game(ev, &sample_info(), &sample_game());
        sink.end_event(ev, &EventSummary {
            name: s!("WMCC2018"),
            start_date: Some(s!("Sat 10 Feb 2018")),
            end_date: Some(s!("Sun 11 Feb 2018")),
        });

        assert_eq!((ev, g1, g2), (1, 1, 2));
        assert_eq!(sink.events.rows[0], ["1", "WMCC2018", "Sat 10 Feb 2018", "Sun 11 Feb 2018"]);
        assert_eq!(sink.games.rows[1][..3], [s!("2"), s!("1"), s!("Session_4")]);
        assert_eq!(sink.ends.rows.len(), 2);
        assert_eq!(sink.ends.rows[1][1], "2");
        assert_eq!(sink.ends.rows[0][3..5], [s!("0"), s!("yellow")]);
        assert_eq!(sink.shots.rows.len(), 4);
        assert_eq!(sink.shots.rows[3][1], "2");
        assert_eq!(sink.shots.rows[1][7..], [s!(""), s!("")]);
        assert_eq!(sink.stone_positions.rows[1], ["2", "3", "red", "0", "19.5"]);
    }

    #[test]
    fn headers_match_rows() {
        let mut sink = TableSink::new();
        let ev = sink.begin_event("E");
        sink.add_game(ev, &sample_info(), &sample_game());
        for (name, t) in sink.tables() {
            let width = t.headers.as_ref().map(Vec::len).unwrap_or(0);
            assert!(t.rows.iter().all(|r| r.len() == width), "{name}");
        }
    }
}
