use super::aggregate::SparePart;
use crate::domain::common::{DefaultDataset, RecordMeta};

/// Начальные остатки склада запчастей
pub fn default_records() -> Vec<SparePart> {
    let rows = [
        ("sp-001", "BRG-6204", "Подшипник 6204-2RS", "Подшипники", "A-01", 24, 10, 180.0, "SKF Россия"),
        ("sp-002", "BLT-A42", "Ремень клиновой A-42", "Приводы", "A-03", 4, 6, 420.0, "Gates"),
        ("sp-003", "FLT-OIL-90", "Фильтр масляный", "Фильтры", "B-02", 0, 5, 650.0, "Mann-Filter"),
        ("sp-004", "SEAL-35-52", "Манжета 35x52x7", "Уплотнения", "B-05", 40, 15, 95.0, "Corteco"),
        ("sp-005", "FUSE-16A", "Предохранитель 16А", "Электрика", "C-01", 12, 12, 35.0, "ABB"),
        ("sp-006", "HOSE-HD-12", "Рукав высокого давления 12 мм", "Гидравлика", "C-04", 7, 3, 2100.0, "Parker"),
    ];

    rows.into_iter()
        .map(|(id, code, name, category, location, quantity, min_quantity, price, supplier)| {
            let mut part = SparePart::new(code, name, category, quantity, min_quantity, price);
            part.meta = RecordMeta::with_id(id);
            part.location = location.to_string();
            part.supplier = supplier.to_string();
            part
        })
        .collect()
}

impl DefaultDataset for SparePart {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
