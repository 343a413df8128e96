//! # Page layout "specs"
//!
//! Each spec here knows **where one piece of ground truth lives on a
//! shot-by-shot summary page** and how to read it from the positioned
//! elements of `document::Page`. Pages carry no semantic tags: every field is
//! found by proximity and alignment to a printed marker or to a diagram image.
//!
//! ## What lives here
//! - `images` – the ordered list of 116×232 sheet diagrams (one per shot).
//! - `header` – game date/start time and game name/sheet (first page only).
//! - `shot` – the caption box under each diagram: team, player, shot type,
//!   turn and score.
//! - `score` – the end's "Total Score" / "Time left" box.
//!
//! ## What does **not** live here
//! - Anything about pixels inside the diagrams (`stones`).
//! - Cross-shot state such as the team↔colour mapping (`assemble`).
//!
//! ## Conventions & invariants
//! - Specs are pure functions of a page (plus a resume cursor where the scan
//!   can start late). They never log above debug level.
//! - "Not found" is `None`; contents that are present but unreadable are a
//!   `ParseError`.
//! - All offsets come from `config::consts`.
pub mod images;
pub mod header;
pub mod shot;
pub mod score;

pub use images::shot_images;
pub use header::{date_and_time, name_and_sheet, DateTime, NameSheet};
pub use shot::shot_metadata;
pub use score::{score_and_time, ScoreBox};
