//! MCP tools over the NewRelic REST API.

pub mod alerts;
pub mod applications;
pub mod servers;

pub use alerts::AlertPoliciesTool;
pub use applications::{ApplicationMetricsTool, GetApplicationTool, ListApplicationsTool};
pub use servers::ListServersTool;

use std::fmt::Display;

pub(crate) fn or_na<T: Display>(value: &Option<T>) -> String {
    value
        .as_ref()
        .map(|v| v.to_string())
        .unwrap_or_else(|| "N/A".to_string())
}

pub(crate) fn reporting_mark(reporting: bool) -> &'static str {
    if reporting {
        "✓"
    } else {
        "✗"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn or_na_formats_present_and_absent() {
        assert_eq!(or_na(&Some(12.5)), "12.5");
        assert_eq!(or_na::<f64>(&None), "N/A");
    }

    #[test]
    fn reporting_marks() {
        assert_eq!(reporting_mark(true), "✓");
        assert_eq!(reporting_mark(false), "✗");
    }
}
