pub const WINDOW_TITLE: &str = "Network Tool";
pub const WINDOW_WIDTH: f32 = 960.0;
pub const WINDOW_HEIGHT: f32 = 720.0;
pub const URL_INPUT_WIDTH: f32 = 520.0;

pub const URL_HINT: &str = "Enter URL";
pub const FETCH_LABEL: &str = "Fetch";
pub const EMPTY_LIST: &str = "(no items)";
