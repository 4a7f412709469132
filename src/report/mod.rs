//! Rendering of finished runs. Formatting lives here only; the engine
//! produces data.
mod json;
mod text;


pub use json::{render_json, report_json};
pub use text::render_text;

fn format_x100(value: u64) -> String {
    format!("{}.{:02}", value / 100, value % 100)
}
