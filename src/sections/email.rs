//! Email scan: address breakdown, WHOIS details, associated accounts and the
//! backend's closing note.

use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::fonts;
use crate::layout::LayoutCursor;
use crate::model::{DomainInformation, EmailResult};
use crate::style::{Rgb, TextStyle};
use crate::table::{render_table, TableSpec};

use super::{
    body_line, capitalize, heading, table_heading, MARGIN_X, SECTION_TITLE_SIZE, TABLE_GAP,
    WRAP_WIDTH,
};

const FIELD_STEP: f32 = 7.0;
const URL_COLUMN_WIDTH: f32 = 100.0;
const NOT_AVAILABLE: &str = "N/A";

fn remark_style() -> TextStyle {
    TextStyle::new(10.0).italic().colored(Rgb::GREY)
}

/// Renders the email sections below the cursor.
pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    result: &EmailResult,
) -> Result<(), ReportError> {
    heading(canvas, cursor, "Email Information", SECTION_TITLE_SIZE);
    cursor.advance(10.0);
    body_line(canvas, cursor, format!("Email: {}", result.email));
    cursor.advance(FIELD_STEP);
    body_line(canvas, cursor, format!("Username: {}", result.username));
    cursor.advance(FIELD_STEP);
    body_line(canvas, cursor, format!("Domain: {}", result.domain));
    cursor.advance(FIELD_STEP);
    body_line(canvas, cursor, format!("Provider: {}", result.provider));
    cursor.advance(15.0);

    if let Some(info) = &result.domain_information {
        render_domain(canvas, cursor, info);
    }

    let mut table_end = None;
    if !result.social_media_accounts.is_empty() {
        table_heading(
            canvas,
            cursor,
            "Associated Social Media Accounts",
            SECTION_TITLE_SIZE,
            5.0,
        );

        let found: Vec<Vec<String>> = result
            .social_media_accounts
            .iter()
            .filter(|account| account.found)
            .map(|account| vec![capitalize(&account.platform), account.url.clone()])
            .collect();
        if !found.is_empty() {
            let table = TableSpec::new(["Platform", "URL"])
                .with_rows(found)
                .with_column_width(1, URL_COLUMN_WIDTH);
            table_end = Some(render_table(canvas, cursor.y(), &table)?);
        }
    }

    match (&result.note, table_end) {
        (Some(note), _) => {
            let start = table_end.map_or(cursor.y() + 10.0, |end| end + TABLE_GAP);
            cursor.move_to(start);
            write_paragraph(canvas, cursor, note, &remark_style());
        }
        (None, Some(end)) => {
            cursor.move_to(end + TABLE_GAP);
        }
        (None, None) => {}
    }

    Ok(())
}

/// WHOIS block.  A failed lookup shows only its error and note.
fn render_domain(canvas: &mut Canvas, cursor: &mut LayoutCursor, info: &DomainInformation) {
    if let Some(error) = &info.error {
        let style = remark_style();
        write_paragraph(canvas, cursor, error, &style);
        if let Some(note) = &info.note {
            write_paragraph(canvas, cursor, note, &style);
        }
        cursor.advance(8.0);
        return;
    }

    heading(canvas, cursor, "Domain Information", SECTION_TITLE_SIZE);
    cursor.advance(10.0);

    // Registrar keeps N/A so a missing registrar is visible; the rest drop it.
    let fields = [
        ("Domain Name", info.domain_name.as_deref(), false),
        ("Registrar", info.registrar.as_deref(), false),
        ("Organization", info.organization.as_deref(), true),
        ("Creation Date", info.creation_date.as_deref(), true),
        ("Expiration Date", info.expiration_date.as_deref(), true),
        ("Status", info.status.as_deref(), true),
    ];
    for (label, value, hide_unavailable) in fields {
        let Some(value) = value.filter(|value| !value.is_empty()) else {
            continue;
        };
        if hide_unavailable && value == NOT_AVAILABLE {
            continue;
        }
        body_line(canvas, cursor, format!("{label}: {value}"));
        cursor.advance(FIELD_STEP);
    }

    let body = TextStyle::new(super::BODY_SIZE);
    for (label, values) in [
        ("Name Servers", &info.name_servers),
        ("Contact Emails", &info.emails),
    ] {
        if !values.is_empty() {
            let line = format!("{label}: {}", values.join(", "));
            write_paragraph(canvas, cursor, &line, &body);
        }
    }

    cursor.advance(8.0);
}

/// Wraps `text` to the content width, moving to a new page first when the
/// whole block would not fit, and leaves the cursor one field step below it.
fn write_paragraph(canvas: &mut Canvas, cursor: &mut LayoutCursor, text: &str, style: &TextStyle) {
    let lines = canvas.measure_wrap(text, WRAP_WIDTH, style);
    let pitch = fonts::line_height(style);
    let height = pitch * lines.len() as f32;
    let y = cursor.reserve(canvas, height);
    canvas.write_lines(&lines, MARGIN_X, y, style);
    cursor.advance(height - pitch + FIELD_STEP);
}
