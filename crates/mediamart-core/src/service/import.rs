//! Spreadsheet import parsing
//!
//! Turns uploaded `.xlsx` bytes into loosely-typed rows and maps each row
//! onto a creation payload. Column names come in two fixed vocabularies for
//! the same semantic field (the localized headers used by the inventory
//! spreadsheets and their English aliases); the first non-missing value
//! wins.

use std::collections::HashMap;
use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};

use mediamart_api::model::ConstructionPayload;
use mediamart_common::MediamartError;

const ID_COLUMNS: &[&str] = &["ID", "id"];
const ADDRESS_COLUMNS: &[&str] = &["Наименование конструкции (адрес)", "title", "address"];
const CITY_COLUMNS: &[&str] = &["Локация (Категория)", "category", "city"];
const CATEGORY_COLUMNS: &[&str] = &["Локация (Категория)", "category"];
const FORMAT_COLUMNS: &[&str] = &["Формат", "format"];
const SIZE_COLUMNS: &[&str] = &["Размер", "size"];
const CLASSIFICATION_COLUMNS: &[&str] = &["Класс", "classification"];
const LIGHTING_COLUMNS: &[&str] = &["Освещение", "lighting"];
const MRP_COLUMNS: &[&str] = &["Кол-во МРП", "mrp"];
const PRINT_REQUIREMENT_COLUMNS: &[&str] = &["Требования к печати", "printRequirement"];
const WAREHOUSE_COLUMNS: &[&str] = &["Склад", "warehouse"];
const SIDE_COLUMNS: &[&str] = &["Сторона", "side"];
const ORIENTATION_COLUMNS: &[&str] = &["Направление", "orientation"];
const DYNAMIC_COLUMNS: &[&str] = &["Динамика", "dynamic"];
const PROVIDER_COLUMNS: &[&str] = &["Владелец конструкции", "provider"];
const NUMBER_COLUMNS: &[&str] = &["Номер конструкции", "number"];
const COORDINATES_COLUMNS: &[&str] = &["Координаты", "coordinates"];

/// Parse the first worksheet of an `.xlsx` file into header-keyed rows.
pub fn parse_xlsx(data: &[u8]) -> anyhow::Result<Vec<HashMap<String, String>>> {
    let mut workbook = Xlsx::new(Cursor::new(data))
        .map_err(|e| MediamartError::IllegalArgument(format!("unreadable spreadsheet: {}", e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| MediamartError::IllegalArgument("spreadsheet has no sheets".to_string()))?
        .map_err(|e| MediamartError::IllegalArgument(format!("unreadable sheet: {}", e)))?;

    let mut rows = range.rows();
    let headers: Vec<Option<String>> = match rows.next() {
        Some(header_row) => header_row.iter().map(cell_to_string).collect(),
        None => return Ok(vec![]),
    };

    let mut records = Vec::new();
    for row in rows {
        let mut record = HashMap::new();
        for (header, cell) in headers.iter().zip(row.iter()) {
            if let (Some(header), Some(value)) = (header, cell_to_string(cell)) {
                record.insert(header.clone(), value);
            }
        }
        if !record.is_empty() {
            records.push(record);
        }
    }

    Ok(records)
}

/// Map one row onto a creation payload using the bilingual column
/// vocabulary. A format cell that does not name a known format fails the
/// row.
pub fn map_row(row: &HashMap<String, String>) -> Result<ConstructionPayload, MediamartError> {
    let format = resolve(row, FORMAT_COLUMNS)
        .map(|s| s.parse())
        .transpose()?;

    let (lat, lng) = match parse_coordinates(resolve(row, COORDINATES_COLUMNS).as_deref()) {
        Some((lat, lng)) => (Some(lat), Some(lng)),
        None => (None, None),
    };

    Ok(ConstructionPayload {
        external_id: resolve(row, ID_COLUMNS),
        address: resolve(row, ADDRESS_COLUMNS),
        city: resolve(row, CITY_COLUMNS),
        format,
        price: None,
        status: None,
        lat,
        lng,
        size: resolve(row, SIZE_COLUMNS),
        classification: resolve(row, CLASSIFICATION_COLUMNS),
        lighting: resolve(row, LIGHTING_COLUMNS),
        category: resolve(row, CATEGORY_COLUMNS),
        mrp: resolve(row, MRP_COLUMNS),
        print_requirement: resolve(row, PRINT_REQUIREMENT_COLUMNS),
        warehouse: resolve(row, WAREHOUSE_COLUMNS),
        side: resolve(row, SIDE_COLUMNS),
        orientation: resolve(row, ORIENTATION_COLUMNS),
        dynamic: resolve(row, DYNAMIC_COLUMNS),
        provider: resolve(row, PROVIDER_COLUMNS),
        number: resolve(row, NUMBER_COLUMNS),
    })
}

/// First non-missing, non-empty value among the candidate column names.
fn resolve(row: &HashMap<String, String>, columns: &[&str]) -> Option<String> {
    columns
        .iter()
        .find_map(|name| row.get(*name))
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// Parse a `"lat,lng"` cell. Both sides must be finite floats or neither
/// coordinate is stored; the literal `nan` placeholder is rejected (and so
/// is a parsed NaN, which `f64::from_str` would otherwise accept).
pub fn parse_coordinates(raw: Option<&str>) -> Option<(f64, f64)> {
    let raw = raw?.trim();
    if raw.is_empty() || raw.eq_ignore_ascii_case("nan") {
        return None;
    }

    let (lat_str, lng_str) = raw.split_once(',')?;
    let lat: f64 = lat_str.trim().parse().ok()?;
    let lng: f64 = lng_str.trim().parse().ok()?;

    if !lat.is_finite() || !lng.is_finite() {
        return None;
    }

    Some((lat, lng))
}

/// Stringify a cell. Floats with integral values print without a trailing
/// `.0` so numeric identifier columns round-trip as strings.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => {
            if f.fract() == 0.0 && f.abs() < 1e15 {
                Some(format!("{}", *f as i64))
            } else {
                Some(f.to_string())
            }
        }
        Data::Int(i) => Some(i.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.as_f64().to_string()),
        Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Error(_) => None,
    }
}
