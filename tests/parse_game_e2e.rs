// tests/parse_game_e2e.rs
mod common;

use curling_scrape::assemble::parse_game_file;
use curling_scrape::config::options::ExtractOptions;
use curling_scrape::model::{Direction, StoneColor, Turn};
use curling_scrape::{document, parse_game, stones::DirImageSource, ParseError};

#[test]
fn two_page_game_from_disk() {
    let dir = common::tmp_dir("e2e_two_page");
    let xml = common::write_sample_game(&dir, "game1", "Sat 10 Feb 2018");

    let game = parse_game_file(&xml, &ExtractOptions::default()).unwrap();
    let h = &game.header;
    assert_eq!(h.team_red, "CAN");
    assert_eq!(h.team_yellow, "SWE");
    assert_eq!((h.final_score_red, h.final_score_yellow), (Some(2), Some(1)));
    assert_eq!(h.name.as_deref(), Some("Men - Round Robin"));
    assert_eq!(h.sheet.as_deref(), Some("B"));
    assert_eq!(h.date.as_deref(), Some("Sat 10 Feb 2018"));
    assert_eq!(h.start_time.as_deref(), Some("14:05"));

    assert_eq!(game.ends.len(), 2);
    let e1 = &game.ends[0].summary;
    assert_eq!(e1.hammer_color, Some(StoneColor::Yellow));
    assert_eq!(e1.direction, Direction::Down);
    assert_eq!((e1.score_red, e1.score_yellow), (Some(1), Some(0)));
    assert_eq!((e1.time_left_red, e1.time_left_yellow), (Some(595), Some(600)));

    let e2 = &game.ends[1].summary;
    assert_eq!(e2.hammer_color, Some(StoneColor::Red));
    assert_eq!((e2.time_left_red, e2.time_left_yellow), (Some(490), Some(465)));

    let s1 = &game.ends[0].shots[0];
    assert_eq!(s1.color, StoneColor::Red);
    assert_eq!(s1.meta.player_name, "Kevin Koe");
    assert_eq!(s1.meta.turn, Some(Turn::Clockwise));
    assert_eq!(s1.meta.percent_score, Some(75));
    assert_eq!(s1.stones.len(), 1);
    assert_eq!((s1.stones[0].x, s1.stones[0].y), (0.0, 19.0));

    // every stone in play, none parked
    for end in &game.ends {
        for shot in &end.shots {
            assert_eq!(shot.stones.len(), shot.number as usize);
        }
    }
    assert!(game.diagnostics.is_empty());
}

#[test]
fn missing_diagram_reports_location() {
    let dir = common::tmp_dir("e2e_missing_png");
    let xml = common::write_sample_game(&dir, "game2", "Sun 11 Feb 2018");
    std::fs::remove_file(dir.join("game2-2_2.png")).unwrap();

    let doc = document::load(&xml).unwrap();
    let err = parse_game(&doc.pages, &DirImageSource::beside(&xml), &ExtractOptions::default())
        .unwrap_err()
        .within("WMCC2018", "Session_1/game2");

    assert!(matches!(err.source, ParseError::Image { .. }));
    assert_eq!(err.location.end, Some(2));
    assert_eq!(err.location.shot, Some(2));
    assert!(err.to_string().starts_with("event WMCC2018, game Session_1/game2, end 2, shot 2:"));
}
