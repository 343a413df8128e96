// src/config/consts.rs
//
// Layout and geometry tunables. All pixel/unit values were calibrated against
// pdftohtml output of the shot-by-shot summaries; change them here only.

// Sheet diagram raster (pixels)
pub const DIAGRAM_WIDTH: u32 = 300;
pub const DIAGRAM_HEIGHT: u32 = 600;

// Button centre ("pin") in the "down" frame and in a mirrored "up" frame.
// The canvas has no centre pixel, so the two differ by one in each axis.
pub const PIN_DOWN: (f64, f64) = (149.0, 439.0);
pub const PIN_UP: (f64, f64) = (150.0, 440.0);

// Blob area separating parked/unthrown stones (~30) from thrown ones (~150-230)
pub const THROWN_MIN_AREA: f64 = 100.0;

// Out-of-play stones are lined up in the bottom storage band (40 px deep)
pub const STORAGE_BAND_Y: f64 = 580.0;

// Direction-of-play: parked stones sit in one of these edge bands
pub const TOP_BAND_Y: f64 = 20.0;
pub const BOTTOM_BAND_Y: f64 = 579.0;

// A full rack minus the stone that was just delivered
pub const FIRST_SHOT_PARKED: usize = 7;

// Diagram images inside the page (page units)
pub const SHOT_IMAGE_WIDTH: i32 = 116;
pub const SHOT_IMAGE_HEIGHT: i32 = 232;

// Shot caption box below each diagram
pub const CAPTION_LEFT_MARGIN: i32 = 5;
pub const CAPTION_DEPTH: i32 = 30;
pub const CAPTION_MAX_FIELDS: usize = 4;

// Start time / date are left-aligned and stacked within this distance
pub const DATE_TIME_MAX_GAP: i32 = 30;

// Score box rows are padded by this much above "Total Score" / below "Time left"
pub const SCORE_BOX_PAD: i32 = 30;
pub const SCORE_BOX_FIELDS: usize = 6;

// Win/loss-only scoring
pub const WIN_SCORE: u32 = 999;
pub const LOSS_SCORE: u32 = 0;

// Four-point shot scale -> percent
pub const FOUR_POINT_FACTOR: u32 = 25;

// Page markers
pub const MARK_START_TIME: &str = "Start Time";
pub const MARK_SHEET: &str = "Sheet";
pub const MARK_TOTAL_SCORE: &str = "Total Score";
pub const MARK_TIME_LEFT: &str = "Time left";

// Game date as printed, e.g. "Sat 10 Feb 2018"
pub const GAME_DATE_FORMAT: &str = "%a %d %b %Y";

// Export
pub const DEFAULT_OUT_DIR: &str = "out";

// Concurrency
pub const WORKERS: usize = 4;
