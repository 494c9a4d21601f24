mod chart;
mod document;
mod summary;
pub mod views;

pub use chart::render_bar_chart;
pub use document::{format_currency, render_markdown, DocumentOptions};
pub use summary::MomentumReport;
