//! Table and JSON rendering for command output.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::error::{AppError, AppResult};

/// Renders rows as a table, or a short notice when there are none.
pub fn render_table<T, I>(rows: I) -> String
where
    T: Tabled,
    I: IntoIterator<Item = T>,
{
    let rows: Vec<T> = rows.into_iter().collect();
    if rows.is_empty() {
        return "(nothing to show)".to_string();
    }
    Table::new(rows).with(Style::modern()).to_string()
}

pub fn render_json<T: Serialize + ?Sized>(value: &T) -> AppResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| AppError::internal(e.to_string()))
}

/// Prints `value` as JSON with `--json`, otherwise the text from `text`.
pub fn emit<T, F>(json: bool, value: &T, text: F) -> AppResult<()>
where
    T: Serialize + ?Sized,
    F: FnOnce(&T) -> String,
{
    let out = if json { render_json(value)? } else { text(value) };
    println!("{out}");
    Ok(())
}

pub fn opt_text<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_else(|| "-".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Tabled)]
    struct Row {
        #[tabled(rename = "Barcode")]
        barcode: &'static str,
    }

    #[test]
    fn test_render_table() {
        let out = render_table(vec![Row { barcode: "JWL12345678" }]);
        assert!(out.contains("Barcode"));
        assert!(out.contains("JWL12345678"));
        assert_eq!(render_table(Vec::<Row>::new()), "(nothing to show)");
    }

    #[test]
    fn test_opt_text() {
        assert_eq!(opt_text(Some("22K")), "22K");
        assert_eq!(opt_text(None::<String>), "-");
    }
}
