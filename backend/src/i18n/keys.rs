pub const ERROR_TEMPLATE_PARAMETER_INVALID: &str = "reports.error.template.parameter.invalid";
pub const ERROR_TEMPLATE_NAME_INVALID: &str = "reports.error.template.name.invalid";
pub const ERROR_TEMPLATE_FILE_MISSING: &str = "reports.error.template.file.missing";
pub const ERROR_TEMPLATE_FILE_EXTENSION: &str = "reports.error.template.file.extension";
pub const ERROR_TEMPLATE_FILE_TOO_LARGE: &str = "reports.error.template.file.tooLarge";
pub const ERROR_TEMPLATE_DEFINITION_INVALID: &str = "reports.error.template.definition.invalid";
pub const ERROR_FORMAT_UNSUPPORTED: &str = "reports.error.format.unsupported";

pub const ERROR_TEMPLATE_NOT_FOUND: &str = "reports.error.template.notFound";
pub const ERROR_SETTING_NOT_FOUND: &str = "settings.error.notFound";
pub const ERROR_REQUISITION_NOT_FOUND: &str = "requisition.error.notFound";

pub const ERROR_TOKEN_MISSING: &str = "auth.error.token.missing";
pub const ERROR_TOKEN_INVALID: &str = "auth.error.token.invalid";
pub const ERROR_USER_NOT_FOUND: &str = "auth.error.user.notFound";
pub const ERROR_RIGHT_NOT_FOUND: &str = "auth.error.right.notFound";
pub const ERROR_PERMISSION: &str = "auth.error.permission";

pub const ERROR_FILE_CREATION: &str = "reports.error.file.creation";
pub const ERROR_REPORTING_IO: &str = "reports.error.io";
pub const ERROR_DEFINITION_UNRESOLVABLE: &str = "reports.error.definition.unresolvable";
pub const ERROR_DATASOURCE: &str = "reports.error.datasource";
pub const ERROR_RENDER: &str = "reports.error.render";

pub const ERROR_REFERENCEDATA_REQUEST: &str = "referencedata.error.request";
pub const ERROR_DATABASE: &str = "database.error";

pub const STATUS_CHANGE_USER_SYSTEM: &str = "requisition.statusChange.user.system";
