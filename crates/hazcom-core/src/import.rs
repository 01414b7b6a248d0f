use std::io::Cursor;

use calamine::{Data, Reader, Xlsx};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::HazcomError;
use crate::model::{AddedMethod, Chemical, HazardProfile};

/// Something about a spreadsheet row that was not imported as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportNote {
    /// 1-based spreadsheet row.
    pub row: usize,
    pub reason: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedInventory {
    pub chemicals: Vec<Chemical>,
    pub notes: Vec<ImportNote>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    ProductName,
    Manufacturer,
    Location,
    ContainerType,
    Containers,
    Cas,
    SdsUrl,
}

fn column_for_header(header: &str) -> Option<Column> {
    match header.trim().to_lowercase().as_str() {
        "product name" | "product" | "chemical" | "name" => Some(Column::ProductName),
        "manufacturer" | "supplier" => Some(Column::Manufacturer),
        "location" | "storage location" => Some(Column::Location),
        "container type" | "container" => Some(Column::ContainerType),
        "containers" | "container count" | "quantity" | "qty" => Some(Column::Containers),
        "cas" | "cas number" | "cas numbers" | "cas #" => Some(Column::Cas),
        "sds url" | "sds link" | "sds" => Some(Column::SdsUrl),
        _ => None,
    }
}

/// Import a chemical inventory from the first worksheet of an xlsx file.
///
/// The first row is the header. Rows are read until the first row with an
/// empty product name.
pub fn import_inventory_xlsx(
    bytes: &[u8],
    added_by: &str,
    now: DateTime<Utc>,
) -> Result<ImportedInventory, HazcomError> {
    let cursor = Cursor::new(bytes);
    let mut workbook: Xlsx<_> = calamine::open_workbook_from_rs(cursor)
        .map_err(|e| HazcomError::Import(format!("failed to open xlsx: {e}")))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| HazcomError::Import("workbook has no worksheets".into()))?;
    let sheet = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| HazcomError::Import(format!("sheet '{sheet_name}' unreadable: {e}")))?;

    let rows: Vec<Vec<Data>> = sheet.rows().map(|r| r.to_vec()).collect();
    import_rows(&rows, added_by, now)
}

/// Import already-decoded spreadsheet rows (header first).
pub fn import_rows(
    rows: &[Vec<Data>],
    added_by: &str,
    now: DateTime<Utc>,
) -> Result<ImportedInventory, HazcomError> {
    let header = rows
        .first()
        .ok_or_else(|| HazcomError::Import("spreadsheet is empty".into()))?;
    let columns: Vec<Option<Column>> = header
        .iter()
        .map(|cell| cell_as_string(cell).and_then(|h| column_for_header(&h)))
        .collect();
    if !columns.contains(&Some(Column::ProductName)) {
        return Err(HazcomError::Import(
            "header row has no 'Product Name' column".into(),
        ));
    }

    let mut chemicals = Vec::new();
    let mut notes = Vec::new();

    for (idx, row) in rows.iter().enumerate().skip(1) {
        let row_number = idx + 1;
        let cell = |wanted: Column| {
            columns
                .iter()
                .position(|c| *c == Some(wanted))
                .and_then(|i| row.get(i))
        };

        let name = match cell(Column::ProductName).and_then(cell_as_string) {
            Some(n) => n,
            None => break,
        };

        let mut profile = HazardProfile {
            product_name: name,
            ..Default::default()
        };
        if let Some(m) = cell(Column::Manufacturer).and_then(cell_as_string) {
            profile.manufacturer = m;
        }
        if let Some(cas) = cell(Column::Cas).and_then(cell_as_string) {
            profile.cas_numbers = cas
                .split([',', ';'])
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect();
        }

        let location = cell(Column::Location)
            .and_then(cell_as_string)
            .unwrap_or_default();
        let mut chemical =
            Chemical::new_from_profile(profile, AddedMethod::Import, added_by, &location, now);

        if let Some(kind) = cell(Column::ContainerType).and_then(cell_as_string) {
            chemical.container_type = kind;
        }
        match cell(Column::Containers) {
            None | Some(Data::Empty) => {}
            Some(value) => match cell_as_count(value) {
                Some(count) => chemical.container_count = count,
                None => notes.push(ImportNote {
                    row: row_number,
                    reason: format!("container count '{value}' is not a whole number; using 1"),
                }),
            },
        }
        if let Some(url) = cell(Column::SdsUrl).and_then(cell_as_string) {
            chemical.sds_url = Some(url);
        }

        chemicals.push(chemical);
    }

    if chemicals.is_empty() {
        return Err(HazcomError::Import("no chemicals found in spreadsheet".into()));
    }

    log::debug!(
        "imported {} chemicals ({} notes)",
        chemicals.len(),
        notes.len()
    );
    Ok(ImportedInventory { chemicals, notes })
}

fn cell_as_string(cell: &Data) -> Option<String> {
    match cell {
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        Data::Float(f) => Some(f.to_string()),
        Data::Int(i) => Some(i.to_string()),
        Data::Empty => None,
        _ => Some(format!("{cell}")),
    }
}

fn cell_as_count(cell: &Data) -> Option<u32> {
    match cell {
        Data::Int(i) => u32::try_from(*i).ok().filter(|n| *n > 0),
        Data::Float(f) if f.fract() == 0.0 && *f >= 1.0 && *f <= u32::MAX as f64 => {
            Some(*f as u32)
        }
        Data::String(s) => s.trim().parse::<u32>().ok().filter(|n| *n > 0),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::SdsStatus;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 1, 20, 9, 0, 0).unwrap()
    }

    fn s(v: &str) -> Data {
        Data::String(v.to_string())
    }

    #[test]
    fn test_import_rows() {
        let rows = vec![
            vec![s("Product Name"), s("Manufacturer"), s("Location"), s("Qty"), s("CAS")],
            vec![s("Acetone"), s("Klean-Strip"), s("Flammables cabinet"), Data::Float(3.0), s("67-64-1")],
            vec![s("WD-40"), Data::Empty, s("Bay 1"), s("two"), s("64742-47-8; 124-38-9")],
            vec![Data::Empty, s("ignored")],
            vec![s("After the gap"), Data::Empty, Data::Empty, Data::Empty, Data::Empty],
        ];
        let imported = import_rows(&rows, "Dana", now()).unwrap();
        assert_eq!(imported.chemicals.len(), 2);

        let acetone = &imported.chemicals[0];
        assert_eq!(acetone.name(), "Acetone");
        assert_eq!(acetone.profile.manufacturer, "Klean-Strip");
        assert_eq!(acetone.container_count, 3);
        assert_eq!(acetone.added_method, AddedMethod::Import);
        assert_eq!(acetone.added_by, "Dana");
        assert_eq!(acetone.sds_status, SdsStatus::Missing);

        let wd40 = &imported.chemicals[1];
        assert_eq!(wd40.container_count, 1);
        assert_eq!(wd40.profile.cas_numbers, vec!["64742-47-8", "124-38-9"]);
        assert_eq!(imported.notes.len(), 1);
        assert_eq!(imported.notes[0].row, 3);
    }

    #[test]
    fn test_header_without_product_column() {
        let rows = vec![vec![s("Location"), s("Qty")], vec![s("Bay"), Data::Int(1)]];
        assert!(import_rows(&rows, "Dana", now()).is_err());
    }

    #[test]
    fn test_empty_table() {
        let rows = vec![vec![s("Product")]];
        assert!(import_rows(&rows, "Dana", now()).is_err());
        assert!(import_rows(&[], "Dana", now()).is_err());
    }

    #[test]
    fn test_counts() {
        assert_eq!(cell_as_count(&Data::Int(4)), Some(4));
        assert_eq!(cell_as_count(&Data::Int(0)), None);
        assert_eq!(cell_as_count(&Data::Float(2.5)), None);
        assert_eq!(cell_as_count(&s(" 12 ")), Some(12));
    }

    #[test]
    fn test_not_an_xlsx() {
        assert!(import_inventory_xlsx(b"plain text", "Dana", now()).is_err());
    }
}
