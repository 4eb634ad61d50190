use std::path::Path;

use genpdf::elements::{Break, FrameCellDecorator, Paragraph, TableLayout};
use genpdf::fonts::{FontData, FontFamily};
use genpdf::style::{Style, StyledString};
use genpdf::Document;

use super::data::ReportData;
use super::definition::ReportDefinition;
use super::RequestContext;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_RENDER;
use crate::i18n::Message;

const FONT_SIZE_PT: u8 = 9;
const TITLE_SIZE_PT: u8 = 14;
const MARGIN_MM: i32 = 10;

fn render_error(cause: impl ToString) -> ServiceError {
    ServiceError::Reporting(Message::with_args(ERROR_RENDER, [cause.to_string()]))
}

/// Arial when its TTFs are in `fonts_dir`, LiberationSans otherwise.
fn load_font(fonts_dir: &Path) -> Result<FontFamily<FontData>, genpdf::error::Error> {
    if let Ok(family) = genpdf::fonts::from_files(fonts_dir, "Arial", None) {
        return Ok(family);
    }
    genpdf::fonts::from_files(fonts_dir, "LiberationSans", None)
}

/// A document with font, margins and the bold title already in place.
pub fn configure_document(fonts_dir: &Path, title: &str) -> Result<Document, ServiceError> {
    let font_family = load_font(fonts_dir).map_err(render_error)?;
    let mut doc = Document::new(font_family);
    doc.set_title(title);
    doc.set_font_size(FONT_SIZE_PT);
    doc.set_line_spacing(1.0f64);

    let mut decorator = genpdf::SimplePageDecorator::new();
    decorator.set_margins(MARGIN_MM);
    doc.set_page_decorator(decorator);

    doc.push(Paragraph::new(StyledString::new(
        title.to_string(),
        Style::new().bold().with_font_size(TITLE_SIZE_PT),
    )));
    doc.push(Break::new(1));
    Ok(doc)
}

/// Bold label followed by a plain value on one line.
pub fn push_field(doc: &mut Document, label: &str, value: &str) {
    let mut p = Paragraph::new("");
    p.push(StyledString::new(format!("{}: ", label), Style::new().bold()));
    p.push(StyledString::new(value.to_string(), Style::new()));
    doc.push(p);
}

pub fn push_section(doc: &mut Document, heading: &str) {
    doc.push(Break::new(1));
    doc.push(Paragraph::new(StyledString::new(
        heading.to_string(),
        Style::new().bold(),
    )));
}

/// Framed table, one equal-width column per heading.
pub fn push_table(
    doc: &mut Document,
    headings: &[String],
    rows: &[Vec<String>],
) -> Result<(), ServiceError> {
    if headings.is_empty() {
        doc.push(Paragraph::new("(no columns)"));
        return Ok(());
    }

    let mut table = TableLayout::new(vec![1; headings.len()]);
    table.set_cell_decorator(FrameCellDecorator::new(true, true, false));

    let mut header = table.row();
    for heading in headings {
        header.push_element(Paragraph::new(StyledString::new(
            heading.clone(),
            Style::new().bold(),
        )));
    }
    header.push().map_err(render_error)?;

    for cells in rows {
        let mut row = table.row();
        for cell in cells {
            row.push_element(Paragraph::new(cell.clone()));
        }
        row.push().map_err(render_error)?;
    }

    doc.push(table);
    Ok(())
}

pub fn push_footer(doc: &mut Document, context: &RequestContext) {
    doc.push(Break::new(1));
    doc.push(Paragraph::new(StyledString::new(
        context.footer(),
        Style::new().italic(),
    )));
}

pub fn render(doc: Document) -> Result<Vec<u8>, ServiceError> {
    let mut bytes = Vec::new();
    doc.render(&mut bytes).map_err(render_error)?;
    Ok(bytes)
}

pub fn render_report(
    fonts_dir: &Path,
    definition: &ReportDefinition,
    data: &ReportData,
    context: &RequestContext,
) -> Result<Vec<u8>, ServiceError> {
    let mut doc = configure_document(fonts_dir, &definition.title)?;
    push_table(&mut doc, &data.headings, &data.rows)?;
    push_footer(&mut doc, context);
    render(doc)
}
