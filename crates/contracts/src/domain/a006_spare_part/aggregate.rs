use serde::{Deserialize, Serialize};

use crate::domain::common::{RecordMeta, RecordRoot};
use crate::shared::export::Exportable;
use crate::shared::list::{Choice, FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

/// Состояние остатка запчасти относительно минимального запаса
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockStatus {
    OutOfStock,
    Low,
    Ok,
}

impl StockStatus {
    /// Нет остатка -> `OutOfStock`, остаток не выше минимума -> `Low`
    pub fn of(quantity: u32, min_quantity: u32) -> Self {
        if quantity == 0 {
            StockStatus::OutOfStock
        } else if quantity <= min_quantity {
            StockStatus::Low
        } else {
            StockStatus::Ok
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "out_of_stock",
            StockStatus::Low => "low",
            StockStatus::Ok => "ok",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockStatus::OutOfStock => "Нет на складе",
            StockStatus::Low => "Ниже минимума",
            StockStatus::Ok => "Достаточно",
        }
    }

    pub fn all() -> Vec<StockStatus> {
        vec![StockStatus::Ok, StockStatus::Low, StockStatus::OutOfStock]
    }
}

impl Choice for StockStatus {
    fn code(&self) -> &'static str {
        StockStatus::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

/// Складская позиция запчасти
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SparePart {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(alias = "stock_code", alias = "code", alias = "partNumber")]
    pub stock_code: String,

    #[serde(alias = "description")]
    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default, alias = "bin")]
    pub location: String,

    #[serde(default, alias = "qty", alias = "stock")]
    pub quantity: u32,

    #[serde(default, alias = "min_quantity", alias = "min_stock", alias = "minStock")]
    pub min_quantity: u32,

    #[serde(default, alias = "unit_price", alias = "price")]
    pub unit_price: f64,

    #[serde(default, alias = "vendor")]
    pub supplier: String,
}

impl SparePart {
    pub fn new(
        stock_code: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        quantity: u32,
        min_quantity: u32,
        unit_price: f64,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            stock_code: stock_code.into(),
            name: name.into(),
            category: category.into(),
            location: String::new(),
            quantity,
            min_quantity,
            unit_price,
            supplier: String::new(),
        }
    }

    pub fn stock_status(&self) -> StockStatus {
        StockStatus::of(self.quantity, self.min_quantity)
    }

    pub fn total_value(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Количество до восстановления минимального запаса
    pub fn reorder_quantity(&self) -> u32 {
        self.min_quantity.saturating_sub(self.quantity)
    }
}

impl RecordRoot for SparePart {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a006"
    }

    fn collection_name() -> &'static str {
        "spare_part"
    }

    fn element_name() -> &'static str {
        "Запчасть"
    }

    fn list_name() -> &'static str {
        "Склад запчастей"
    }
}

impl ListRecord for SparePart {
    type Patch = SparePartPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "stockCode" => FieldValue::text(&self.stock_code),
            "name" => FieldValue::text(&self.name),
            "category" => FieldValue::text(&self.category),
            "location" => FieldValue::text(&self.location),
            "quantity" => i64::from(self.quantity).into(),
            "minQuantity" => i64::from(self.min_quantity).into(),
            "unitPrice" => self.unit_price.into(),
            "totalValue" => self.total_value().into(),
            "stockStatus" => FieldValue::choice(&self.stock_status()),
            "supplier" => FieldValue::text(&self.supplier),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["stockCode", "name", "supplier", "location"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["category", "location", "stockStatus"]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_string(
            "stockCode",
            &self.stock_code,
            ValidationRules::required().with_max_length(50),
            "Код позиции",
        );
        errors.check_string("name", &self.name, ValidationRules::required(), "Наименование");
        errors.check_number(
            "unitPrice",
            self.unit_price,
            ValidationRules::non_negative(),
            "Цена за единицу",
        );
        errors.into_result()
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SparePartPatch {
    #[serde(alias = "stock_code", alias = "code", alias = "partNumber")]
    pub stock_code: Option<String>,
    #[serde(alias = "description")]
    pub name: Option<String>,
    pub category: Option<String>,
    #[serde(alias = "bin")]
    pub location: Option<String>,
    #[serde(alias = "qty", alias = "stock")]
    pub quantity: Option<u32>,
    #[serde(alias = "min_quantity", alias = "min_stock", alias = "minStock")]
    pub min_quantity: Option<u32>,
    #[serde(alias = "unit_price", alias = "price")]
    pub unit_price: Option<f64>,
    #[serde(alias = "vendor")]
    pub supplier: Option<String>,
}

impl SparePartPatch {
    /// Патч корректировки остатка
    pub fn quantity(quantity: u32) -> Self {
        Self {
            quantity: Some(quantity),
            ..Self::default()
        }
    }
}

impl RecordPatch<SparePart> for SparePartPatch {
    fn apply_to(self, record: &mut SparePart) {
        if let Some(v) = self.stock_code {
            record.stock_code = v;
        }
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.category {
            record.category = v;
        }
        if let Some(v) = self.location {
            record.location = v;
        }
        if let Some(v) = self.quantity {
            record.quantity = v;
        }
        if let Some(v) = self.min_quantity {
            record.min_quantity = v;
        }
        if let Some(v) = self.unit_price {
            record.unit_price = v;
        }
        if let Some(v) = self.supplier {
            record.supplier = v;
        }
    }
}

impl Exportable for SparePart {
    fn headers() -> Vec<&'static str> {
        vec![
            "Код",
            "Наименование",
            "Категория",
            "Место хранения",
            "Количество",
            "Минимум",
            "Цена",
            "Сумма",
            "Поставщик",
            "Состояние",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.stock_code.clone(),
            self.name.clone(),
            self.category.clone(),
            self.location.clone(),
            self.quantity.to_string(),
            self.min_quantity.to_string(),
            format!("{:.2}", self.unit_price),
            format!("{:.2}", self.total_value()),
            self.supplier.clone(),
            self.stock_status().display_name().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_spellings_normalize() {
        let snake = r#"{"id": 1, "stock_code": "BR-100", "name": "Подшипник",
            "quantity": 3, "min_stock": 5, "unit_price": 120.5}"#;
        let camel = r#"{"id": "1", "stockCode": "BR-100", "name": "Подшипник",
            "quantity": 3, "minQuantity": 5, "unitPrice": 120.5}"#;
        let a: SparePart = serde_json::from_str(snake).unwrap();
        let b: SparePart = serde_json::from_str(camel).unwrap();
        assert_eq!(a.stock_code, b.stock_code);
        assert_eq!(a.min_quantity, 5);
        assert_eq!(a.min_quantity, b.min_quantity);
        assert_eq!(a.unit_price, b.unit_price);
        assert_eq!(a.meta.id, b.meta.id);
    }

    #[test]
    fn test_missing_stock_code_is_rejected() {
        let json = r#"{"id": 1, "name": "Подшипник"}"#;
        assert!(serde_json::from_str::<SparePart>(json).is_err());
    }

    #[test]
    fn test_stock_status() {
        assert_eq!(StockStatus::of(0, 5), StockStatus::OutOfStock);
        assert_eq!(StockStatus::of(5, 5), StockStatus::Low);
        assert_eq!(StockStatus::of(6, 5), StockStatus::Ok);
        assert_eq!(StockStatus::of(1, 0), StockStatus::Ok);

        let part = SparePart::new("F-1", "Фильтр", "Фильтры", 2, 6, 10.0);
        assert_eq!(part.reorder_quantity(), 4);
        assert_eq!(part.field("stockStatus").filter_key(), "low");
    }
}
