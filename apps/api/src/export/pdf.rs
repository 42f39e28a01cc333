use anyhow::Result;
use printpdf::{BuiltinFont, IndirectFontRef, Mm, PdfDocument, PdfLayerReference};

use crate::applications::models::ApplicationRecord;

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const ROW_STEP: f32 = 8.0;
const BOTTOM_MARGIN: f32 = 20.0;

/// Renders a user's records as a one-table PDF report (A4 portrait),
/// paginating when a page fills up.
pub fn render_pdf(records: &[ApplicationRecord]) -> Result<Vec<u8>> {
    let (doc, first_page, first_layer) = PdfDocument::new(
        "Job Applications Report",
        Mm(PAGE_WIDTH),
        Mm(PAGE_HEIGHT),
        "Layer 1",
    );

    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| anyhow::anyhow!("PDF font error: {e}"))?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(|e| anyhow::anyhow!("PDF font error: {e}"))?;

    let mut layer = doc.get_page(first_page).get_layer(first_layer);

    layer.use_text("Job Applications Report", 20.0, Mm(60.0), Mm(278.0), &bold);

    let mut y = 262.0;
    draw_row(&layer, &bold, y, "No.", "Company", "Job Title", "Status", "Applied");
    y -= ROW_STEP;

    for (i, record) in records.iter().enumerate() {
        if y < BOTTOM_MARGIN {
            let (page, page_layer) = doc.add_page(Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Layer 1");
            layer = doc.get_page(page).get_layer(page_layer);
            y = PAGE_HEIGHT - BOTTOM_MARGIN;
        }
        draw_row(
            &layer,
            &font,
            y,
            &(i + 1).to_string(),
            &record.company,
            &record.job_title,
            record.status_label(),
            &record.applied_at.to_string(),
        );
        y -= ROW_STEP;
    }

    doc.save_to_bytes()
        .map_err(|e| anyhow::anyhow!("PDF save error: {e}"))
}

fn draw_row(
    layer: &PdfLayerReference,
    font: &IndirectFontRef,
    y: f32,
    no: &str,
    company: &str,
    job_title: &str,
    status: &str,
    applied: &str,
) {
    layer.use_text(no, 11.0, Mm(15.0), Mm(y), font);
    layer.use_text(company, 11.0, Mm(30.0), Mm(y), font);
    layer.use_text(job_title, 11.0, Mm(85.0), Mm(y), font);
    layer.use_text(status, 11.0, Mm(140.0), Mm(y), font);
    layer.use_text(applied, 11.0, Mm(170.0), Mm(y), font);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applications::models::ApplicationStatus;
    use chrono::{NaiveDate, TimeZone, Utc};
    use uuid::Uuid;

    fn record(i: usize) -> ApplicationRecord {
        ApplicationRecord {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            company: format!("Company {i}"),
            job_title: "Engineer".to_string(),
            job_link: None,
            location: None,
            status: Some(ApplicationStatus::Applied),
            applied_at: NaiveDate::from_ymd_opt(2024, 3, 5).unwrap(),
            follow_up_reminder: None,
            follow_up_done: false,
            tags: vec![],
            created_at: Utc.with_ymd_and_hms(2024, 3, 5, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn test_pdf_output_has_pdf_magic() {
        let bytes = render_pdf(&[record(1)]).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_pdf_renders_many_records_across_pages() {
        let records: Vec<_> = (1..=80).map(record).collect();
        let bytes = render_pdf(&records).unwrap();
        assert!(bytes.len() > 1000);
    }
}
