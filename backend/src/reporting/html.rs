use super::data::ReportData;
use super::definition::ReportDefinition;
use super::{ExportParameters, RequestContext};

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn empty_cell(export: &ExportParameters, context: &RequestContext) -> String {
    if export.images_to_align {
        format!(
            "<td><img alt=\"\" src=\"{}/static/px.png\" width=\"1\" height=\"1\"></td>",
            escape(&context.base_url)
        )
    } else {
        "<td>&nbsp;</td>".to_string()
    }
}

/// Single self-contained HTML page with the report table.
pub fn render_report(
    definition: &ReportDefinition,
    data: &ReportData,
    export: &ExportParameters,
    context: &RequestContext,
) -> Vec<u8> {
    let title = escape(&definition.title);
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str(&format!("<title>{}</title>\n", title));
    if !export.images_to_align {
        html.push_str(concat!(
            "<style>table{border-collapse:collapse}",
            "th,td{border:1px solid #999;padding:2px 6px}</style>\n",
        ));
    }
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("<h1>{}</h1>\n<table>\n<tr>", title));
    for heading in &data.headings {
        html.push_str(&format!("<th>{}</th>", escape(heading)));
    }
    html.push_str("</tr>\n");
    for row in &data.rows {
        html.push_str("<tr>");
        for cell in row {
            if cell.is_empty() {
                html.push_str(&empty_cell(export, context));
            } else {
                html.push_str(&format!("<td>{}</td>", escape(cell)));
            }
        }
        html.push_str("</tr>\n");
    }
    html.push_str("</table>\n");
    html.push_str(&format!("<p>{}</p>\n</body>\n</html>\n", escape(&context.footer())));
    html.into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::definition::test_support::STOCK_DEFINITION;
    use chrono::{TimeZone, Utc};

    fn context() -> RequestContext {
        RequestContext {
            base_url: "http://reports.local".to_string(),
            requested_by: Some("administrator".to_string()),
            requested_at: Utc.with_ymd_and_hms(2017, 5, 2, 10, 15, 0).unwrap(),
        }
    }

    fn data() -> ReportData {
        ReportData {
            headings: vec!["Code".to_string(), "Name".to_string()],
            rows: vec![
                vec!["C100".to_string(), String::new()],
                vec!["<C200>".to_string(), "A & B".to_string()],
            ],
        }
    }

    #[test]
    fn escapes_cells_and_uses_css_alignment_by_default() {
        let definition = ReportDefinition::decode(STOCK_DEFINITION.as_bytes()).unwrap();
        let export = ExportParameters::default();
        let html =
            String::from_utf8(render_report(&definition, &data(), &export, &context())).unwrap();

        assert!(html.contains("border-collapse"));
        assert!(html.contains("<td>&lt;C200&gt;</td><td>A &amp; B</td>"));
        assert!(html.contains("<td>C100</td><td>&nbsp;</td>"));
        assert!(!html.contains("<img"));
        assert!(html.contains("Generated 2017-05-02 10:15 UTC by administrator"));
    }

    #[test]
    fn spacer_images_only_when_requested() {
        let definition = ReportDefinition::decode(STOCK_DEFINITION.as_bytes()).unwrap();
        let export = ExportParameters { images_to_align: true };
        let html =
            String::from_utf8(render_report(&definition, &data(), &export, &context())).unwrap();

        assert!(html.contains("src=\"http://reports.local/static/px.png\""));
        assert!(!html.contains("border-collapse"));
    }
}
