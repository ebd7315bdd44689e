//! Export the built dashboard view to JSON.
//!
//! The export carries everything the terminal report shows (datasets, colors,
//! monthly buckets, table cells, header dates) so other front-ends can render
//! it without re-running the pipeline.

use std::fs::File;
use std::path::Path;

use serde::Serialize;

use crate::app::pipeline::DashboardView;
use crate::error::AppError;

const TOOL_NAME: &str = "fdash";

#[derive(Serialize)]
struct ViewFile<'a> {
    tool: &'static str,
    #[serde(flatten)]
    view: &'a DashboardView,
}

/// Write the view as pretty-printed JSON.
pub fn write_view_json(path: &Path, view: &DashboardView) -> Result<(), AppError> {
    let file = File::create(path)
        .map_err(|e| AppError::new(2, format!("Failed to create view JSON '{}': {e}", path.display())))?;

    let out = ViewFile {
        tool: TOOL_NAME,
        view,
    };
    serde_json::to_writer_pretty(file, &out)
        .map_err(|e| AppError::new(2, format!("Failed to write view JSON: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::{Value, json};

    use super::*;
    use crate::app::pipeline::run_dashboard_with_model;
    use crate::domain::DashboardConfig;
    use crate::io::ingest::DashboardDataModel;
    use crate::routes::RouteKeyTable;

    #[test]
    fn writes_view_with_family_charts() {
        let doc = json!({
            "chart_data": {
                "MBCI": [{ "date": "2024-04-01", "MBCI_Value": 1500 }]
            },
            "table_data": {
                "MBCI": {
                    "headers": ["항로", "Current Index"],
                    "rows": [{ "route": "MBCI_MBCI", "current_index": 1500 }]
                }
            }
        });
        let run = run_dashboard_with_model(
            &DashboardConfig::default(),
            DashboardDataModel::load(&doc),
            RouteKeyTable::builtin(),
        );

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("view.json");
        write_view_json(&path, &run.view).unwrap();

        let written: Value = serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["tool"], "fdash");
        assert_eq!(written["has_chart_data"], true);

        let mbci = written["families"]
            .as_array()
            .unwrap()
            .iter()
            .find(|f| f["family"] == "MBCI")
            .unwrap();
        assert_eq!(mbci["chart"]["kind"], "line");
        assert_eq!(mbci["chart"]["datasets"][0]["points"][0]["x"], "2024-04-01");
        assert_eq!(mbci["header_dates"]["currentIndexDate"], "04-01-2024");
    }

    #[test]
    fn unwritable_path_is_reported() {
        let run = run_dashboard_with_model(
            &DashboardConfig::default(),
            DashboardDataModel::load(&json!({})),
            RouteKeyTable::builtin(),
        );
        let err = write_view_json(Path::new("/nonexistent/dir/view.json"), &run.view).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
