// src/specs/score.rs
use crate::config::consts::{
    LOSS_SCORE, MARK_TIME_LEFT, MARK_TOTAL_SCORE, SCORE_BOX_FIELDS, SCORE_BOX_PAD, WIN_SCORE,
};
use crate::document::{Element, Page};
use crate::error::ParseError;

/// Bottom-right box of an end page, keyed by the printed team labels:
///
/// ```text
///               CAN     SWE
/// Total Score     1       0
/// Time left   09:55   10:00
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScoreBox {
    pub teams: [String; 2],
    pub scores: [u32; 2],
    /// Seconds of thinking time left.
    pub time_left: [u32; 2],
}

impl ScoreBox {
    /// (score, time_left) of `team`, if it is one of the two labels.
    pub fn for_team(&self, team: &str) -> Option<(u32, u32)> {
        self.teams
            .iter()
            .position(|t| t == team)
            .map(|i| (self.scores[i], self.time_left[i]))
    }
}

/// `None` when the page has no "Total Score" row (some reports omit the box).
pub fn score_and_time(page: &Page, cursor: usize) -> Result<Option<ScoreBox>, ParseError> {
    let mut score_at: Option<(i32, i32)> = None;
    let mut time_top: Option<i32> = None;
    for (_, e) in page.texts_from(cursor) {
        if e.text.contains(MARK_TOTAL_SCORE) {
            score_at = Some((e.top, e.left));
        } else if e.text.contains(MARK_TIME_LEFT) {
            time_top = Some(e.top);
        }
    }

    let Some((score_top, score_left)) = score_at else {
        logd!("Score: no '{}' on page {}", MARK_TOTAL_SCORE, page.number);
        return Ok(None);
    };
    let time_top = time_top.ok_or(ParseError::MissingMarker(MARK_TIME_LEFT))?;

    let upper = score_top - SCORE_BOX_PAD;
    let lower = time_top + SCORE_BOX_PAD;
    let left = score_left + 1;

    let mut cells: Vec<&Element> = page
        .texts_from(cursor)
        .map(|(_, e)| e)
        .filter(|e| e.left > left && between!(upper, e.top, lower))
        .collect();
    cells.sort_by_key(|e| (e.top, e.left));

    if cells.len() < SCORE_BOX_FIELDS {
        return Err(ParseError::ScoreBoxShape { found: cells.len(), expected: SCORE_BOX_FIELDS });
    }

    Ok(Some(ScoreBox {
        teams: [s!(cells[0].text.as_str()), s!(cells[1].text.as_str())],
        scores: [parse_score(&cells[2].text)?, parse_score(&cells[3].text)?],
        time_left: [clock_seconds(&cells[4].text)?, clock_seconds(&cells[5].text)?],
    }))
}

/// Numeric score, or "W"/"L" for games only recorded as a win or a loss.
pub fn parse_score(raw: &str) -> Result<u32, ParseError> {
    match raw.trim() {
        "W" => Ok(WIN_SCORE),
        "L" => Ok(LOSS_SCORE),
        t => t.parse().map_err(|_| ParseError::ScoreValue(s!(raw))),
    }
}

/// "MM:SS" → seconds.
pub fn clock_seconds(raw: &str) -> Result<u32, ParseError> {
    let bad = || ParseError::Clock(s!(raw));
    let (mm, ss) = raw.trim().split_once(':').ok_or_else(bad)?;
    let mm: u32 = mm.trim().parse().map_err(|_| bad())?;
    let ss: u32 = ss.trim().parse().map_err(|_| bad())?;
    mm.checked_mul(60).and_then(|m| m.checked_add(ss)).ok_or_else(bad)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn box_page(score_a: &str, score_b: &str) -> Page {
        Page::new(2, vec![
            Element::text(58, 385, 70, 11, "CAN: Kevin Koe"),
            Element::text(610, 1080, 30, 11, "CAN"),
            Element::text(660, 1080, 30, 11, "SWE"),
            Element::text(520, 1100, 60, 11, "Total Score"),
            Element::text(612, 1100, 10, 11, score_a),
            Element::text(662, 1100, 10, 11, score_b),
            Element::text(520, 1115, 60, 11, "Time left"),
            Element::text(608, 1115, 30, 11, "09:55"),
            Element::text(658, 1115, 30, 11, "10:00"),
            Element::text(20, 1200, 200, 11, "Printed by the scoring system"),
        ])
    }

    #[test]
    fn reads_box_by_rows() {
        let sb = score_and_time(&box_page("1", "0"), 0).unwrap().unwrap();
        assert_eq!(sb.teams, [s!("CAN"), s!("SWE")]);
        assert_eq!(sb.scores, [1, 0]);
        assert_eq!(sb.time_left, [595, 600]);
        assert_eq!(sb.for_team("SWE"), Some((0, 600)));
        assert_eq!(sb.for_team("NOR"), None);
    }

    #[test]
    fn win_loss_scoring() {
        let sb = score_and_time(&box_page("W", "L"), 0).unwrap().unwrap();
        assert_eq!(sb.scores, [999, 0]);
        assert_eq!(parse_score("5").unwrap(), 5);
        assert_eq!(parse_score("3").unwrap(), 3);
    }

    #[test]
    fn missing_box_is_none() {
        let page = Page::new(1, vec![Element::text(58, 385, 70, 11, "CAN: Kevin Koe")]);
        assert_eq!(score_and_time(&page, 0).unwrap(), None);
    }

    #[test]
    fn malformed_box_is_an_error() {
        assert!(matches!(
            score_and_time(&box_page("x", "0"), 0),
            Err(ParseError::ScoreValue(_))
        ));

        let mut page = box_page("1", "0");
        page.elements.retain(|e| e.text != "10:00");
        assert!(matches!(
            score_and_time(&page, 0),
            Err(ParseError::ScoreBoxShape { found: 5, expected: 6 })
        ));
    }

    #[test]
    fn clock_values() {
        assert_eq!(clock_seconds("07:45").unwrap(), 465);
        assert_eq!(clock_seconds("00:09").unwrap(), 9);
        assert!(clock_seconds("7.45").is_err());
    }

    #[test]
    fn oversized_clock_is_an_error() {
        assert!(matches!(clock_seconds("99999999:00"), Err(ParseError::Clock(_))));
        assert!(matches!(clock_seconds("71582788:16"), Err(ParseError::Clock(_))));
    }
}
