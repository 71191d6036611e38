/// Element ids the host page is expected to provide.
pub const FILE_INPUT_ID: &str = "importFile";
pub const EXPORT_BUTTON_ID: &str = "exportGeojson";
