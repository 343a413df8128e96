// src/stones/extract.rs
use image::{GrayImage, Luma, RgbImage};
use imageproc::contours::{find_contours, Contour};
use imageproc::point::Point;

use crate::config::consts::{DIAGRAM_HEIGHT, DIAGRAM_WIDTH};
use crate::config::options::Palette;
use crate::error::ParseError;
use crate::model::{StoneColor, StoneRecord};

const ON: Luma<u8> = Luma([255]);

/// Result of segmenting one diagram.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Extraction {
    /// Red stones first, then yellow; each colour in contour order.
    pub stones: Vec<StoneRecord>,
    /// Indices into `stones` whose bounding box holds both red and yellow
    /// pixels. Kept, but worth a manual look.
    pub ambiguous: Vec<usize>,
}

/// Area and first moments of a closed polygon (Green's theorem).
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Moments {
    pub m00: f64,
    pub m10: f64,
    pub m01: f64,
}

impl Moments {
    pub fn centroid(&self) -> (f64, f64) {
        let d = self.m00.max(1.0);
        (self.m10 / d, self.m01 / d)
    }
}

pub fn extract_stones(img: &RgbImage, palette: &Palette, src: &str) -> Result<Extraction, ParseError> {
    let (w, h) = img.dimensions();
    if (w, h) != (DIAGRAM_WIDTH, DIAGRAM_HEIGHT) {
        return Err(ParseError::DiagramSize {
            src: s!(src),
            width: w,
            height: h,
            expected_w: DIAGRAM_WIDTH,
            expected_h: DIAGRAM_HEIGHT,
        });
    }

    let (red, yellow) = masks(img, palette);
    let mut out = Extraction::default();

    for (color, mask) in [(StoneColor::Red, &red), (StoneColor::Yellow, &yellow)] {
        let contours = find_contours::<i32>(mask);
        for (ix, c) in contours.iter().enumerate() {
            // Hollow rings are earlier positions of moved stones.
            if c.parent.is_some() || has_child(&contours, ix) {
                continue;
            }
            let m = polygon_moments(&c.points);
            let (x, y) = m.centroid();
            if mixed_colors(&c.points, &red, &yellow) {
                out.ambiguous.push(out.stones.len());
            }
            out.stones.push(StoneRecord { color, x, y, blob_size: m.m00 });
        }
    }

    logd!(
        "Stones: {} → {} blob(s), {} ambiguous",
        src,
        out.stones.len(),
        out.ambiguous.len()
    );
    Ok(out)
}

/// (red, yellow) binary masks. Yellow also takes the X-mark accent colours so
/// played yellow stones trace as one filled disc.
pub fn masks(img: &RgbImage, palette: &Palette) -> (GrayImage, GrayImage) {
    let (w, h) = img.dimensions();
    let mut red = GrayImage::new(w, h);
    let mut yellow = GrayImage::new(w, h);
    for (x, y, px) in img.enumerate_pixels() {
        let rgb = px.0;
        if palette.red.contains(rgb) {
            red.put_pixel(x, y, ON);
        }
        if palette.yellow.contains(rgb)
            || palette.blue_accent.contains(rgb)
            || palette.greyish_yellow.contains(rgb)
        {
            yellow.put_pixel(x, y, ON);
        }
    }
    (red, yellow)
}

pub fn polygon_moments(points: &[Point<i32>]) -> Moments {
    let n = points.len();
    if n == 0 {
        return Moments::default();
    }
    let mut m = Moments::default();
    for i in 0..n {
        let (xi, yi) = (points[i].x as f64, points[i].y as f64);
        let j = (i + 1) % n;
        let (xj, yj) = (points[j].x as f64, points[j].y as f64);
        let a = xi * yj - xj * yi;
        m.m00 += a;
        m.m10 += a * (xi + xj);
        m.m01 += a * (yi + yj);
    }
    m.m00 /= 2.0;
    m.m10 /= 6.0;
    m.m01 /= 6.0;
    // orientation-independent
    if m.m00 < 0.0 {
        m.m00 = -m.m00;
        m.m10 = -m.m10;
        m.m01 = -m.m01;
    }
    m
}

/* ---------------- helpers ---------------- */

fn has_child(contours: &[Contour<i32>], ix: usize) -> bool {
    contours.iter().any(|c| c.parent == Some(ix))
}

fn mixed_colors(points: &[Point<i32>], red: &GrayImage, yellow: &GrayImage) -> bool {
    let Some((x0, y0, x1, y1)) = bbox(points) else {
        return false;
    };
    let mut seen_red = false;
    let mut seen_yellow = false;
    for y in y0..=y1 {
        for x in x0..=x1 {
            seen_red |= red.get_pixel(x, y)[0] != 0;
            seen_yellow |= yellow.get_pixel(x, y)[0] != 0;
            if seen_red && seen_yellow {
                return true;
            }
        }
    }
    false
}

fn bbox(points: &[Point<i32>]) -> Option<(u32, u32, u32, u32)> {
    let x0 = points.iter().map(|p| p.x).min()?;
    let x1 = points.iter().map(|p| p.x).max()?;
    let y0 = points.iter().map(|p| p.y).min()?;
    let y1 = points.iter().map(|p| p.y).max()?;
    Some((x0.max(0) as u32, y0.max(0) as u32, x1.max(0) as u32, y1.max(0) as u32))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::Rgb;

    pub(crate) const RED: Rgb<u8> = Rgb([255, 0, 0]);
    pub(crate) const YELLOW: Rgb<u8> = Rgb([255, 220, 0]);
    pub(crate) const BLUE: Rgb<u8> = Rgb([0, 30, 255]);
    const SHEET: Rgb<u8> = Rgb([240, 240, 255]);

    pub(crate) fn blank() -> RgbImage {
        RgbImage::from_pixel(DIAGRAM_WIDTH, DIAGRAM_HEIGHT, SHEET)
    }

    pub(crate) fn disc(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: Rgb<u8>) {
        for y in (cy - r)..=(cy + r) {
            for x in (cx - r)..=(cx + r) {
                if (x - cx) * (x - cx) + (y - cy) * (y - cy) <= r * r {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    fn ring(img: &mut RgbImage, cx: i32, cy: i32, r: i32, color: Rgb<u8>) {
        for y in (cy - r)..=(cy + r) {
            for x in (cx - r)..=(cx + r) {
                let d = (x - cx) * (x - cx) + (y - cy) * (y - cy);
                if d <= r * r && d >= (r - 2) * (r - 2) {
                    img.put_pixel(x as u32, y as u32, color);
                }
            }
        }
    }

    #[test]
    fn square_moments() {
        let pts = [Point::new(0, 0), Point::new(10, 0), Point::new(10, 10), Point::new(0, 10)];
        let m = polygon_moments(&pts);
        assert_eq!(m.m00, 100.0);
        assert_eq!(m.centroid(), (5.0, 5.0));

        // reversed winding gives the same result
        let rev: Vec<_> = pts.iter().rev().copied().collect();
        assert_eq!(polygon_moments(&rev), m);
    }

    #[test]
    fn degenerate_contour_does_not_divide_by_zero() {
        let m = polygon_moments(&[Point::new(7, 3)]);
        assert_eq!(m.m00, 0.0);
        assert_eq!(m.centroid(), (0.0, 0.0));
    }

    #[test]
    fn finds_thrown_and_parked_stones() {
        let mut img = blank();
        disc(&mut img, 100, 400, 8, RED);
        disc(&mut img, 200, 300, 8, YELLOW);
        // played yellow carries a blue X
        img.put_pixel(200, 300, BLUE);
        disc(&mut img, 20, 10, 3, RED);

        let ex = extract_stones(&img, &Palette::default(), "t.png").unwrap();
        let reds: Vec<_> = ex.stones.iter().filter(|s| s.color == StoneColor::Red).collect();
        let yellows: Vec<_> = ex.stones.iter().filter(|s| s.color == StoneColor::Yellow).collect();
        assert_eq!(reds.len(), 2);
        assert_eq!(yellows.len(), 1);
        assert_eq!(ex.stones[0].color, StoneColor::Red);

        let big = reds.iter().find(|s| s.blob_size > 100.0).unwrap();
        assert!((big.x - 100.0).abs() < 1.0 && (big.y - 400.0).abs() < 1.0);
        let small = reds.iter().find(|s| s.blob_size < 100.0).unwrap();
        assert!((small.x - 20.0).abs() < 1.0 && (small.y - 10.0).abs() < 1.0);

        assert!((yellows[0].x - 200.0).abs() < 1.0);
        assert!(ex.ambiguous.is_empty());
    }

    #[test]
    fn hollow_rings_are_skipped() {
        let mut img = blank();
        ring(&mut img, 150, 200, 8, RED);
        disc(&mut img, 60, 60, 8, RED);
        let ex = extract_stones(&img, &Palette::default(), "t.png").unwrap();
        assert_eq!(ex.stones.len(), 1);
        assert!((ex.stones[0].x - 60.0).abs() < 1.0);
    }

    #[test]
    fn touching_colours_are_flagged() {
        let mut img = blank();
        disc(&mut img, 100, 100, 8, RED);
        disc(&mut img, 115, 100, 8, YELLOW);
        let ex = extract_stones(&img, &Palette::default(), "t.png").unwrap();
        assert_eq!(ex.stones.len(), 2);
        assert!(!ex.ambiguous.is_empty());
    }

    #[test]
    fn wrong_size_is_rejected() {
        let img = RgbImage::new(116, 232);
        let err = extract_stones(&img, &Palette::default(), "small.png").unwrap_err();
        assert!(matches!(err, ParseError::DiagramSize { width: 116, height: 232, .. }));
    }
}
