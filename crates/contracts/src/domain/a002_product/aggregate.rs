use serde::{Deserialize, Serialize};

use crate::domain::common::{RecordMeta, RecordRoot};
use crate::shared::export::Exportable;
use crate::shared::list::{Choice, FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

/// Остаток, начиная с которого товар считается заканчивающимся
pub const LOW_STOCK_THRESHOLD: u32 = 5;

// ============================================================================
// Enums
// ============================================================================

/// Статус публикации товара в витрине
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProductStatus {
    #[default]
    #[serde(alias = "Active", alias = "published")]
    Active,
    #[serde(alias = "Draft")]
    Draft,
    #[serde(alias = "Archived")]
    Archived,
}

impl ProductStatus {
    pub fn code(&self) -> &'static str {
        match self {
            ProductStatus::Active => "active",
            ProductStatus::Draft => "draft",
            ProductStatus::Archived => "archived",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            ProductStatus::Active => "В продаже",
            ProductStatus::Draft => "Черновик",
            ProductStatus::Archived => "В архиве",
        }
    }

    pub fn all() -> Vec<ProductStatus> {
        vec![
            ProductStatus::Active,
            ProductStatus::Draft,
            ProductStatus::Archived,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

impl Choice for ProductStatus {
    fn code(&self) -> &'static str {
        ProductStatus::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

/// Уровень остатка (вычисляется из количества)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    OutOfStock,
    LowStock,
    InStock,
}

impl StockLevel {
    pub fn of(stock: u32) -> Self {
        match stock {
            0 => StockLevel::OutOfStock,
            s if s <= LOW_STOCK_THRESHOLD => StockLevel::LowStock,
            _ => StockLevel::InStock,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "out_of_stock",
            StockLevel::LowStock => "low_stock",
            StockLevel::InStock => "in_stock",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            StockLevel::OutOfStock => "Нет в наличии",
            StockLevel::LowStock => "Заканчивается",
            StockLevel::InStock => "В наличии",
        }
    }

    pub fn all() -> Vec<StockLevel> {
        vec![
            StockLevel::InStock,
            StockLevel::LowStock,
            StockLevel::OutOfStock,
        ]
    }
}

impl Choice for StockLevel {
    fn code(&self) -> &'static str {
        StockLevel::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

// ============================================================================
// Record
// ============================================================================

/// Товар витрины
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(alias = "title")]
    pub name: String,

    #[serde(default, alias = "article", alias = "SKU")]
    pub sku: String,

    #[serde(default)]
    pub category: String,

    pub price: f64,

    #[serde(default, alias = "quantity", alias = "inventory")]
    pub stock: u32,

    #[serde(default)]
    pub status: ProductStatus,

    #[serde(default)]
    pub description: String,
}

impl Product {
    pub fn new(
        name: impl Into<String>,
        sku: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        stock: u32,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            name: name.into(),
            sku: sku.into(),
            category: category.into(),
            price,
            stock,
            status: ProductStatus::Active,
            description: String::new(),
        }
    }

    pub fn stock_level(&self) -> StockLevel {
        StockLevel::of(self.stock)
    }

    /// Стоимость остатка
    pub fn inventory_value(&self) -> f64 {
        self.price * self.stock as f64
    }
}

impl RecordRoot for Product {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a002"
    }

    fn collection_name() -> &'static str {
        "product"
    }

    fn element_name() -> &'static str {
        "Товар"
    }

    fn list_name() -> &'static str {
        "Товары бутика"
    }
}

impl ListRecord for Product {
    type Patch = ProductPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "name" => FieldValue::text(&self.name),
            "sku" => FieldValue::text(&self.sku),
            "category" => FieldValue::text(&self.category),
            "price" => self.price.into(),
            "stock" => i64::from(self.stock).into(),
            "stockLevel" => FieldValue::choice(&self.stock_level()),
            "status" => FieldValue::choice(&self.status),
            "description" => FieldValue::text(&self.description),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "sku", "category", "description"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["category", "status", "stockLevel"]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_string(
            "name",
            &self.name,
            ValidationRules::required().with_max_length(200),
            "Название",
        );
        errors.check_string("sku", &self.sku, ValidationRules::required(), "Артикул");
        errors.check_number("price", self.price, ValidationRules::non_negative(), "Цена");
        errors.into_result()
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductPatch {
    #[serde(alias = "title")]
    pub name: Option<String>,
    #[serde(alias = "article", alias = "SKU")]
    pub sku: Option<String>,
    pub category: Option<String>,
    pub price: Option<f64>,
    #[serde(alias = "quantity", alias = "inventory")]
    pub stock: Option<u32>,
    pub status: Option<ProductStatus>,
    pub description: Option<String>,
}

impl RecordPatch<Product> for ProductPatch {
    fn apply_to(self, record: &mut Product) {
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.sku {
            record.sku = v;
        }
        if let Some(v) = self.category {
            record.category = v;
        }
        if let Some(v) = self.price {
            record.price = v;
        }
        if let Some(v) = self.stock {
            record.stock = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.description {
            record.description = v;
        }
    }
}

impl Exportable for Product {
    fn headers() -> Vec<&'static str> {
        vec![
            "Артикул",
            "Название",
            "Категория",
            "Цена",
            "Остаток",
            "Наличие",
            "Статус",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.sku.clone(),
            self.name.clone(),
            self.category.clone(),
            format!("{:.2}", self.price),
            self.stock.to_string(),
            self.stock_level().display_name().to_string(),
            self.status.display_name().to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stock_level() {
        assert_eq!(StockLevel::of(0), StockLevel::OutOfStock);
        assert_eq!(StockLevel::of(1), StockLevel::LowStock);
        assert_eq!(StockLevel::of(LOW_STOCK_THRESHOLD), StockLevel::LowStock);
        assert_eq!(StockLevel::of(LOW_STOCK_THRESHOLD + 1), StockLevel::InStock);
    }

    #[test]
    fn test_stock_level_is_filterable() {
        let product = Product::new("Шарф", "SC-01", "Аксессуары", 1900.0, 2);
        assert_eq!(product.field("stockLevel").filter_key(), "low_stock");
    }

    #[test]
    fn test_missing_price_is_rejected() {
        let json = r#"{"id": "p1", "name": "Шарф", "sku": "SC-01"}"#;
        assert!(serde_json::from_str::<Product>(json).is_err());
    }

    #[test]
    fn test_quantity_alias() {
        let json = r#"{"id": 5, "title": "Шарф", "article": "SC-01", "price": 1900, "quantity": 7}"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.stock, 7);
        assert_eq!(product.sku, "SC-01");
        assert_eq!(product.status, ProductStatus::Active);
    }
}
