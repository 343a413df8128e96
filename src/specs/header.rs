// src/specs/header.rs
use crate::config::consts::{DATE_TIME_MAX_GAP, MARK_SHEET, MARK_START_TIME};
use crate::core::sanitize::trim_dashes;
use crate::document::Page;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DateTime {
    pub date: Option<String>,
    pub time: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameSheet {
    pub name: Option<String>,
    pub sheet: Option<String>,
}

/// "Start Time 14:00" gives the time (last token) and an anchor; the date is
/// printed with the same left edge just above it.
pub fn date_and_time(page: &Page) -> DateTime {
    let Some((anchor_ix, anchor)) = page
        .texts_from(0)
        .find(|(_, e)| e.text.contains(MARK_START_TIME))
    else {
        logd!("Header: no '{}' marker on page {}", MARK_START_TIME, page.number);
        return DateTime::default();
    };

    let time = anchor.text.split_whitespace().last().map(String::from);

    let date = page
        .texts_from(0)
        .filter(|(i, _)| *i != anchor_ix)
        .find(|(_, e)| e.left == anchor.left && (anchor.top - e.top).abs() < DATE_TIME_MAX_GAP)
        .map(|(_, e)| e.text.clone());

    DateTime { date, time }
}

/// First text carrying "Sheet": "<name> - Sheet <id>".
pub fn name_and_sheet(page: &Page) -> NameSheet {
    for (_, e) in page.texts_from(0) {
        if !e.text.contains(MARK_SHEET) {
            continue;
        }
        let parts: Vec<&str> = e.text.split(MARK_SHEET).collect();
        let name = trim_dashes(parts[0]);
        let sheet = parts[parts.len() - 1].trim();
        return NameSheet {
            name: Some(s!(name)),
            sheet: Some(s!(sheet)),
        };
    }
    NameSheet::default()
}
