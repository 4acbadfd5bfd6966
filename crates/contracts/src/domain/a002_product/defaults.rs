use super::aggregate::{Product, ProductStatus};
use crate::domain::common::{DefaultDataset, RecordMeta};

/// Начальный ассортимент витрины
pub fn default_records() -> Vec<Product> {
    let rows = [
        ("pr-001", "Шелковый платок", "SCF-101", "Аксессуары", 4200.0, 12, ProductStatus::Active, "Натуральный шелк, ручная подшивка"),
        ("pr-002", "Льняное платье миди", "DRS-220", "Одежда", 8900.0, 4, ProductStatus::Active, "Лен, свободный крой"),
        ("pr-003", "Кожаная сумка-тоут", "BAG-310", "Сумки", 15600.0, 0, ProductStatus::Active, "Итальянская кожа"),
        ("pr-004", "Кашемировый кардиган", "KNT-045", "Одежда", 12800.0, 7, ProductStatus::Active, ""),
        ("pr-005", "Серьги с жемчугом", "JWL-012", "Украшения", 6400.0, 2, ProductStatus::Draft, "Пресноводный жемчуг"),
        ("pr-006", "Соломенная шляпа", "HAT-007", "Аксессуары", 3100.0, 15, ProductStatus::Archived, "Летняя коллекция"),
    ];

    rows.into_iter()
        .map(|(id, name, sku, category, price, stock, status, description)| {
            let mut product = Product::new(name, sku, category, price, stock);
            product.meta = RecordMeta::with_id(id);
            product.status = status;
            product.description = description.to_string();
            product
        })
        .collect()
}

impl DefaultDataset for Product {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
