//! Incident fixtures and presentation helpers: mock data, Indonesian dates, style tokens.

mod format;
mod mock;
mod styles;

pub use format::format_date_id;
pub use mock::{generate_mock_incidents, generate_mock_incidents_from, GENERATED_COUNT};
pub use styles::{severity_styles, status_color, SeverityStyles};
