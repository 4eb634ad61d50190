//! # Report Rendering
//!
//! Turns a stored template into a renderable view and renders it.
//!
//! ## Workflow
//!
//! 1.  **View creation**: [`ReportsViewService::get_report_view`] creates a uniquely named
//!     temporary file, decodes the template payload into a [`ReportDefinition`] (checking
//!     its format tag and version), writes the validated definition to the file, fixes the
//!     export parameters and binds the data source and the caller's request context.
//!
//! 2.  **Rendering**: [`ReportView::render`] reloads the definition from its file, coerces
//!     the request parameters the definition declares, runs its query against the
//!     read-only data source and hands the rows to the engine for the requested format.
//!
//! 3.  **Cleanup**: the temporary file belongs to the view and is removed when the view is
//!     dropped, whichever way the request ends.

pub mod data;
pub mod definition;
pub mod delimited;
pub mod html;
pub mod params;
pub mod pdf;

use std::collections::HashMap;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use actix_web::HttpRequest;
use chrono::{DateTime, Utc};
use log::debug;
use tempfile::{Builder, NamedTempFile};

use crate::db::templates::StoredTemplate;
use crate::db::DataSource;
use crate::error::ServiceError;
use crate::i18n::keys::{
    ERROR_DEFINITION_UNRESOLVABLE, ERROR_FILE_CREATION, ERROR_FORMAT_UNSUPPORTED,
    ERROR_REPORTING_IO,
};
use crate::i18n::Message;
use definition::{DefinitionError, ReportDefinition};

/// Exporter switches applied to every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExportParameters {
    /// Align HTML table cells with spacer images instead of CSS.
    pub images_to_align: bool,
}

impl Default for ExportParameters {
    fn default() -> Self {
        ExportParameters {
            images_to_align: false,
        }
    }
}

/// Who asked for a report and where the service was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub base_url: String,
    pub requested_by: Option<String>,
    pub requested_at: DateTime<Utc>,
}

impl RequestContext {
    /// Base URL as the client reached the service, stamped now.
    pub fn for_request(req: &HttpRequest, requested_by: &str) -> Self {
        let connection = req.connection_info();
        RequestContext {
            base_url: format!("{}://{}", connection.scheme(), connection.host()),
            requested_by: Some(requested_by.to_string()),
            requested_at: Utc::now(),
        }
    }

    pub fn footer(&self) -> String {
        match &self.requested_by {
            Some(user) => format!(
                "Generated {} by {}",
                self.requested_at.format("%Y-%m-%d %H:%M UTC"),
                user
            ),
            None => format!("Generated {}", self.requested_at.format("%Y-%m-%d %H:%M UTC")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Pdf,
    Html,
    Csv,
}

impl OutputFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "application/pdf",
            OutputFormat::Html => "text/html; charset=utf-8",
            OutputFormat::Csv => "text/csv; charset=utf-8",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Pdf => "pdf",
            OutputFormat::Html => "html",
            OutputFormat::Csv => "csv",
        }
    }
}

impl FromStr for OutputFormat {
    type Err = ServiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pdf" => Ok(OutputFormat::Pdf),
            "html" => Ok(OutputFormat::Html),
            "csv" => Ok(OutputFormat::Csv),
            _ => Err(ServiceError::Validation(Message::with_args(
                ERROR_FORMAT_UNSUPPORTED,
                [s],
            ))),
        }
    }
}

fn definition_error(err: DefinitionError) -> ServiceError {
    match err {
        DefinitionError::Unresolvable { format, version } => ServiceError::Reporting(
            Message::with_args(ERROR_DEFINITION_UNRESOLVABLE, [format!("{} v{}", format, version)]),
        ),
        other => ServiceError::Reporting(Message::with_args(ERROR_REPORTING_IO, [other])),
    }
}

#[derive(Clone, Debug)]
pub struct ReportsViewService {
    data_source: DataSource,
    fonts_dir: PathBuf,
    temp_dir: Option<PathBuf>,
}

impl ReportsViewService {
    pub fn new(data_source: DataSource, fonts_dir: impl Into<PathBuf>) -> Self {
        ReportsViewService {
            data_source,
            fonts_dir: fonts_dir.into(),
            temp_dir: None,
        }
    }

    pub fn fonts_dir(&self) -> &Path {
        &self.fonts_dir
    }

    /// Places view files in `dir` instead of the system temporary directory.
    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = Some(dir.into());
        self
    }

    pub fn get_report_view(
        &self,
        template: &StoredTemplate,
        context: RequestContext,
    ) -> Result<ReportView, ServiceError> {
        let name = &template.meta.name;
        let file_creation_error = |_: std::io::Error| {
            ServiceError::Reporting(Message::with_args(ERROR_FILE_CREATION, [name]))
        };

        let prefix = format!("{}_temp", name);
        let mut builder = Builder::new();
        builder.prefix(&prefix).suffix(".report");
        let mut file = match &self.temp_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(file_creation_error)?;

        let definition = ReportDefinition::decode(&template.data).map_err(definition_error)?;
        let encoded = definition.encode().map_err(definition_error)?;
        file.write_all(&encoded)
            .and_then(|_| file.flush())
            .map_err(|e| definition_error(e.into()))?;
        debug!("report view for '{}' at {}", name, file.path().display());

        Ok(ReportView {
            name: name.clone(),
            file,
            export: ExportParameters::default(),
            data_source: self.data_source.clone(),
            context,
            fonts_dir: self.fonts_dir.clone(),
        })
    }
}

/// A configured, ready-to-render report.
#[derive(Debug)]
pub struct ReportView {
    name: String,
    file: NamedTempFile,
    export: ExportParameters,
    data_source: DataSource,
    context: RequestContext,
    fonts_dir: PathBuf,
}

impl ReportView {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition_path(&self) -> &Path {
        self.file.path()
    }

    pub fn export_parameters(&self) -> ExportParameters {
        self.export
    }

    pub fn data_source(&self) -> &DataSource {
        &self.data_source
    }

    pub fn context(&self) -> &RequestContext {
        &self.context
    }

    pub fn render(
        &self,
        format: OutputFormat,
        raw_params: &HashMap<String, String>,
    ) -> Result<Vec<u8>, ServiceError> {
        let definition = ReportDefinition::load(self.definition_path()).map_err(definition_error)?;
        let data = data::fetch(self.data_source(), &definition, raw_params)?;
        debug!("report '{}' produced {} rows", self.name(), data.rows.len());

        match format {
            OutputFormat::Pdf => {
                pdf::render_report(&self.fonts_dir, &definition, &data, self.context())
            }
            OutputFormat::Html => Ok(html::render_report(
                &definition,
                &data,
                &self.export_parameters(),
                self.context(),
            )),
            OutputFormat::Csv => delimited::render_report(&data),
        }
    }
}
