use super::data::ReportData;
use crate::error::ServiceError;
use crate::i18n::keys::ERROR_RENDER;
use crate::i18n::Message;

fn render_error(cause: impl ToString) -> ServiceError {
    ServiceError::Reporting(Message::with_args(ERROR_RENDER, [cause.to_string()]))
}

/// Headings row followed by one record per result row.
pub fn render_report(data: &ReportData) -> Result<Vec<u8>, ServiceError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&data.headings).map_err(render_error)?;
    for row in &data.rows {
        writer.write_record(row).map_err(render_error)?;
    }
    writer.into_inner().map_err(render_error)
}
