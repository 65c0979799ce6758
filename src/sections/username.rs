//! Username scan: summary count, then found and not-found platform tables.

use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::layout::LayoutCursor;
use crate::model::{PlatformCheck, UsernameResult};
use crate::style::Rgb;
use crate::table::{render_table, TableSpec};

use super::{body_line, capitalize, heading, table_heading, SECTION_TITLE_SIZE, TABLE_GAP};

const URL_COLUMN_WIDTH: f32 = 80.0;
const SUBSECTION_TITLE_SIZE: f32 = 12.0;

/// Renders the username sections below the cursor.
///
/// Every checked platform lands in exactly one of the two tables, in the order
/// the backend reported it.
pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    result: &UsernameResult,
) -> Result<(), ReportError> {
    heading(canvas, cursor, "Summary", SECTION_TITLE_SIZE);
    cursor.advance(10.0);
    body_line(
        canvas,
        cursor,
        format!("Total Platforms Found: {}", result.total_found),
    );
    cursor.advance(10.0);

    table_heading(
        canvas,
        cursor,
        "Social Media Profiles",
        SECTION_TITLE_SIZE,
        5.0,
    );

    let (found, missing): (Vec<&PlatformCheck>, Vec<&PlatformCheck>) =
        result.social_media.iter().partition(|check| check.found);

    if !found.is_empty() {
        let table = TableSpec::new(["Platform", "Status", "URL"])
            .with_rows(found.iter().map(|check| {
                vec![
                    capitalize(&check.platform),
                    "Found".to_string(),
                    check.url.clone(),
                ]
            }))
            .with_column_width(2, URL_COLUMN_WIDTH);
        let end = render_table(canvas, cursor.y(), &table)?;
        cursor.move_to(end + TABLE_GAP);
    }

    if !missing.is_empty() {
        table_heading(
            canvas,
            cursor,
            "Platforms Not Found",
            SUBSECTION_TITLE_SIZE,
            5.0,
        );

        let table = TableSpec::new(["Platform", "Status"])
            .with_rows(
                missing
                    .iter()
                    .map(|check| vec![capitalize(&check.platform), "Not Found".to_string()]),
            )
            .with_header_fill(Rgb::RED);
        let end = render_table(canvas, cursor.y(), &table)?;
        cursor.move_to(end + TABLE_GAP);
    }

    Ok(())
}
