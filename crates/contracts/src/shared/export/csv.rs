use super::Exportable;
use crate::shared::error::ListError;

/// UTF-8 BOM, чтобы Excel корректно показывал кириллицу
pub const BOM: char = '\u{FEFF}';

pub const DELIMITER: u8 = b';';

/// Выгрузить записи в CSV (разделитель `;`, с BOM)
pub fn to_csv<T: Exportable>(data: &[T]) -> Result<String, ListError> {
    let headers: Vec<String> = T::headers().into_iter().map(str::to_string).collect();
    let rows: Vec<Vec<String>> = data.iter().map(Exportable::to_csv_row).collect();
    write_table(&headers, &rows)
}

/// Записать произвольную таблицу в CSV
pub fn write_table(headers: &[String], rows: &[Vec<String>]) -> Result<String, ListError> {
    let mut writer = ::csv::WriterBuilder::new()
        .delimiter(DELIMITER)
        .flexible(true)
        .from_writer(Vec::new());

    writer
        .write_record(headers)
        .map_err(|e| ListError::persistence(format!("CSV: {}", e)))?;
    for row in rows {
        writer
            .write_record(row)
            .map_err(|e| ListError::persistence(format!("CSV: {}", e)))?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ListError::persistence(format!("CSV: {}", e)))?;
    let body = String::from_utf8(bytes)
        .map_err(|e| ListError::persistence(format!("CSV: {}", e)))?;

    let mut content = String::with_capacity(body.len() + 3);
    content.push(BOM);
    content.push_str(&body);
    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Row {
        name: &'static str,
        qty: u32,
    }

    impl Exportable for Row {
        fn headers() -> Vec<&'static str> {
            vec!["Наименование", "Количество"]
        }

        fn to_csv_row(&self) -> Vec<String> {
            vec![self.name.to_string(), self.qty.to_string()]
        }
    }

    #[test]
    fn test_csv_has_bom_and_semicolons() {
        let csv = to_csv(&[Row { name: "Болт", qty: 3 }]).unwrap();
        assert!(csv.starts_with(BOM));
        let lines: Vec<&str> = csv.trim_start_matches(BOM).lines().collect();
        assert_eq!(lines, vec!["Наименование;Количество", "Болт;3"]);
    }

    #[test]
    fn test_csv_quotes_delimiters() {
        let csv = to_csv(&[Row { name: "Болт; М6 \"оцинк\"", qty: 1 }]).unwrap();
        assert!(csv.contains("\"Болт; М6 \"\"оцинк\"\"\";1"));
    }

    #[test]
    fn test_empty_data_has_headers_only() {
        let csv = to_csv::<Row>(&[]).unwrap();
        assert_eq!(csv.trim_start_matches(BOM).lines().count(), 1);
    }
}
