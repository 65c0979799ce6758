//! Name scan: personal details, variations tried, profile tables and the
//! recommended manual searches.

use crate::canvas::Canvas;
use crate::error::ReportError;
use crate::layout::LayoutCursor;
use crate::model::{GroupedProfiles, NameResult, Profile};
use crate::style::TextStyle;
use crate::table::{render_table, TableSpec};

use super::{
    body_line, capitalize, heading, table_heading, MARGIN_X, SECTION_TITLE_SIZE, TABLE_GAP,
    WRAP_WIDTH,
};

const FIELD_STEP: f32 = 7.0;
const VARIATION_LINE_STEP: f32 = 5.0;
const URL_COLUMN_WIDTH: f32 = 70.0;

/// Renders the name sections below the cursor.
pub fn render(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    result: &NameResult,
) -> Result<(), ReportError> {
    heading(canvas, cursor, "Personal Information", SECTION_TITLE_SIZE);
    cursor.advance(10.0);
    body_line(canvas, cursor, format!("Full Name: {}", result.full_name));
    cursor.advance(FIELD_STEP);
    body_line(canvas, cursor, format!("First Name: {}", result.first_name));
    cursor.advance(FIELD_STEP);
    body_line(canvas, cursor, format!("Last Name: {}", result.last_name));
    cursor.advance(15.0);

    if !result.username_variations.is_empty() {
        heading(
            canvas,
            cursor,
            "Username Variations Checked",
            SECTION_TITLE_SIZE,
        );
        cursor.advance(10.0);

        let style = TextStyle::new(10.0);
        let lines = canvas.measure_wrap(
            &result.username_variations.join(", "),
            WRAP_WIDTH,
            &style,
        );
        canvas.write_lines(&lines, MARGIN_X, cursor.y(), &style);
        cursor.advance(lines.len() as f32 * VARIATION_LINE_STEP + 10.0);
    }

    heading(canvas, cursor, "Summary", SECTION_TITLE_SIZE);
    cursor.advance(10.0);
    body_line(
        canvas,
        cursor,
        format!("Total Profiles Found: {}", result.total_profiles_found),
    );
    cursor.advance(FIELD_STEP);
    body_line(
        canvas,
        cursor,
        format!("Social Profiles: {}", result.social_profiles.len()),
    );
    cursor.advance(FIELD_STEP);
    body_line(
        canvas,
        cursor,
        format!(
            "Professional Profiles: {}",
            result.professional_profiles.len()
        ),
    );
    if let Some(groups) = &result.grouped_profiles {
        cursor.advance(FIELD_STEP);
        body_line(canvas, cursor, confidence_line(groups));
    }
    cursor.advance(15.0);

    profile_table(
        canvas,
        cursor,
        "Professional Profiles",
        &result.professional_profiles,
    )?;
    profile_table(
        canvas,
        cursor,
        "Social Media Profiles",
        &result.social_profiles,
    )?;

    if !result.search_queries.is_empty() {
        cursor.reserve(canvas, 0.0);
        heading(
            canvas,
            cursor,
            "Recommended Search Queries",
            SECTION_TITLE_SIZE,
        );
        cursor.advance(5.0);

        let table = TableSpec::new(["Type", "Description"]).with_rows(
            result
                .search_queries
                .iter()
                .map(|query| vec![query.kind.clone(), query.description.clone()]),
        );
        let end = render_table(canvas, cursor.y(), &table)?;
        cursor.move_to(end + TABLE_GAP);
    }

    Ok(())
}

fn confidence_line(groups: &GroupedProfiles) -> String {
    format!(
        "Confidence: {} high / {} medium / {} low",
        groups.high_confidence.len(),
        groups.medium_confidence.len(),
        groups.low_confidence.len()
    )
}

fn profile_table(
    canvas: &mut Canvas,
    cursor: &mut LayoutCursor,
    title: &str,
    profiles: &[Profile],
) -> Result<(), ReportError> {
    if profiles.is_empty() {
        return Ok(());
    }

    table_heading(canvas, cursor, title, SECTION_TITLE_SIZE, 5.0);

    let table = TableSpec::new(["Platform", "Username", "URL"])
        .with_rows(profiles.iter().map(|profile| {
            vec![
                capitalize(&profile.platform),
                profile.username.clone(),
                profile.url.clone(),
            ]
        }))
        .with_column_width(2, URL_COLUMN_WIDTH);
    let end = render_table(canvas, cursor.y(), &table)?;
    cursor.move_to(end + TABLE_GAP);
    Ok(())
}
