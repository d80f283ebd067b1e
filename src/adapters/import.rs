use crate::core::{ImportAreaItem, ImportAreaRequest};
use crate::utils::error::{AreaClientError, Result};
use serde::Deserialize;
use std::io::Read;
use std::path::Path;

/// 匯入檔可以是項目陣列，也可以是完整的 `{data, clearData}` 文件
#[derive(Deserialize)]
#[serde(untagged)]
enum ImportDocument {
    Items(Vec<ImportAreaItem>),
    Request(ImportAreaRequest),
}

/// 依副檔名讀取 `.json` 或 `.csv` 匯入檔
pub fn read_import_file<P: AsRef<Path>>(path: P, clear_data: bool) -> Result<ImportAreaRequest> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase);

    let request = match extension.as_deref() {
        Some("json") => parse_import_json(&std::fs::read_to_string(path)?, clear_data)?,
        Some("csv") => parse_import_csv(std::fs::File::open(path)?, clear_data)?,
        other => {
            return Err(AreaClientError::ImportError {
                message: format!(
                    "Unsupported import file extension: {}",
                    other.unwrap_or("<none>")
                ),
            })
        }
    };

    tracing::info!(
        "📂 Loaded {} areas from {}",
        request.data.len(),
        path.display()
    );
    Ok(request)
}

pub fn parse_import_json(content: &str, clear_data: bool) -> Result<ImportAreaRequest> {
    let request = match serde_json::from_str::<ImportDocument>(content)? {
        ImportDocument::Items(data) => ImportAreaRequest { data, clear_data },
        ImportDocument::Request(mut request) => {
            request.clear_data |= clear_data;
            request
        }
    };
    ensure_not_empty(request)
}

/// CSV 需有 `n,i,p,y` 標頭；`p`、`y` 可留空
pub fn parse_import_csv<R: Read>(reader: R, clear_data: bool) -> Result<ImportAreaRequest> {
    let mut csv_reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);

    let mut data = Vec::new();
    for record in csv_reader.deserialize::<CsvRow>() {
        let row = record?;
        data.push(ImportAreaItem {
            n: row.n,
            i: row.i,
            p: row.p.unwrap_or(0),
            y: row.y.unwrap_or_default(),
        });
    }

    ensure_not_empty(ImportAreaRequest { data, clear_data })
}

#[derive(Deserialize)]
struct CsvRow {
    n: String,
    i: i64,
    p: Option<i64>,
    y: Option<String>,
}

fn ensure_not_empty(request: ImportAreaRequest) -> Result<ImportAreaRequest> {
    if request.data.is_empty() {
        return Err(AreaClientError::ImportError {
            message: "Import file contains no areas".to_string(),
        });
    }
    Ok(request)
}
