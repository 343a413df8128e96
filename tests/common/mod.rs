// tests/common/mod.rs
#![allow(dead_code)]
use std::fs;
use std::path::{Path, PathBuf};

use image::{Rgb, RgbImage};

pub const RED: Rgb<u8> = Rgb([255, 0, 0]);
pub const YELLOW: Rgb<u8> = Rgb([255, 255, 0]);
const SHEET: Rgb<u8> = Rgb([235, 240, 250]);

pub fn tmp_dir(name: &str) -> PathBuf {
    let mut p = std::env::temp_dir();
    p.push(format!("curling_scrape_{}_{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&p);
    fs::create_dir_all(&p).unwrap();
    p
}

fn disc(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: Rgb<u8>) {
    for y in (cy - r)..=(cy + r) {
        for x in (cx - r)..=(cx + r) {
            if (x - cx).pow(2) + (y - cy).pow(2) <= r * r {
                img.put_pixel(x as u32, y as u32, color);
            }
        }
    }
}

/// 300×600 diagram: parked racks along the top edge (play goes down) plus
/// thrown stones `(x, y, is_red)`.
pub fn diagram(red_parked: usize, yellow_parked: usize, thrown: &[(i32, i32, bool)]) -> RgbImage {
    let mut img = RgbImage::from_pixel(300, 600, SHEET);
    for i in 0..red_parked {
        disc(&mut img, 10 + 12 * i as i32, 8, 3, RED);
    }
    for i in 0..yellow_parked {
        disc(&mut img, 160 + 12 * i as i32, 8, 3, YELLOW);
    }
    for &(x, y, red) in thrown {
        disc(&mut img, x, y, 8, if red { RED } else { YELLOW });
    }
    img
}

fn text(left: i32, top: i32, body: &str) -> String {
    format!(r#"<text top="{top}" left="{left}" width="80" height="11" font="1">{body}</text>"#)
}

fn image(left: i32, src: &str) -> String {
    format!(r#"<image top="150" left="{left}" width="116" height="232" src="{src}"/>"#)
}

fn score_box(a: u32, b: u32, time_a: &str, time_b: &str) -> Vec<String> {
    vec![
        text(610, 1080, "CAN"),
        text(660, 1080, "SWE"),
        text(520, 1100, "<b>Total Score</b>"),
        text(612, 1100, &a.to_string()),
        text(662, 1100, &b.to_string()),
        text(520, 1115, "Time left"),
        text(608, 1115, time_a),
        text(658, 1115, time_b),
    ]
}

/// One shot column: diagram plus "team: player" and the statistics row.
fn shot(k: usize, src: &str, who: &str) -> Vec<String> {
    let left = 60 + 140 * k as i32;
    vec![
        image(left, src),
        text(left, 385, who),
        text(left, 397, "Draw"),
        text(left + 40, 396, "&#8635;"),
        text(left + 80, 397, "3"),
    ]
}

/// CAN (red) throws first, SWE (yellow) has the hammer. End 1 ends 1–0,
/// end 2 ends 2–1. Writes `<stem>.xml` and its PNGs into `dir`.
pub fn write_sample_game(dir: &Path, stem: &str, date: &str) -> PathBuf {
    let png = |e: u32, s: u32| format!("{stem}-{e}_{s}.png");

    diagram(7, 8, &[(149, 420, true)]).save(dir.join(png(1, 1))).unwrap();
    diagram(7, 7, &[(149, 420, true), (100, 430, false)]).save(dir.join(png(1, 2))).unwrap();
    diagram(8, 7, &[(150, 300, false)]).save(dir.join(png(2, 1))).unwrap();
    diagram(7, 7, &[(150, 300, false), (120, 440, true)]).save(dir.join(png(2, 2))).unwrap();

    let mut p1 = vec![
        text(339, 58, "<b>Men - Round Robin - Sheet B</b>"),
        text(700, 40, date),
        text(700, 55, "Start Time 14:05"),
    ];
    p1.extend(shot(0, &png(1, 1), "CAN: Kevin Koe"));
    p1.extend(shot(1, &png(1, 2), "SWE: Niklas Edin"));
    p1.extend(score_box(1, 0, "09:55", "10:00"));

    let mut p2 = vec![text(339, 58, "<b>Men - Round Robin - Sheet B</b>")];
    p2.extend(shot(0, &png(2, 1), "SWE: Niklas Edin"));
    p2.extend(shot(1, &png(2, 2), "CAN: Kevin Koe"));
    p2.extend(score_box(2, 1, "08:10", "07:45"));

    let page = |n: u32, els: &[String]| {
        format!(
            "<page number=\"{n}\" position=\"absolute\" top=\"0\" left=\"0\" height=\"1263\" width=\"892\">\n\t<fontspec id=\"1\" size=\"9\" family=\"Times\" color=\"#000000\"/>\n{}\n</page>",
            els.join("\n")
        )
    };
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<!DOCTYPE pdf2xml SYSTEM \"pdf2xml.dtd\">\n<pdf2xml producer=\"poppler\" version=\"0.62.0\">\n{}\n{}\n</pdf2xml>\n",
        page(1, &p1),
        page(2, &p2)
    );

    let path = dir.join(format!("{stem}.xml"));
    fs::write(&path, xml).unwrap();
    path
}

/// `<root>/<event>/Men's_Teams/<prefix>~<session>/`
pub fn session_dir(root: &Path, event: &str, session: &str) -> PathBuf {
    let d = root.join(event).join("Men's_Teams").join(format!("{event}~{session}"));
    fs::create_dir_all(&d).unwrap();
    d
}
