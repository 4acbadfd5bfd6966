use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{format_optional_date, RecordMeta, RecordRoot};
use crate::shared::export::Exportable;
use crate::shared::list::{Choice, FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

// ============================================================================
// Status
// ============================================================================

/// Состояние единицы оборудования
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum EquipmentStatus {
    #[default]
    #[serde(alias = "Available")]
    Available,
    #[serde(alias = "InUse", alias = "in-use", alias = "inUse")]
    InUse,
    #[serde(alias = "Maintenance")]
    Maintenance,
    #[serde(alias = "OutOfService", alias = "out-of-service", alias = "outOfService")]
    OutOfService,
}

impl EquipmentStatus {
    pub fn code(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "available",
            EquipmentStatus::InUse => "in_use",
            EquipmentStatus::Maintenance => "maintenance",
            EquipmentStatus::OutOfService => "out_of_service",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EquipmentStatus::Available => "Доступно",
            EquipmentStatus::InUse => "Используется",
            EquipmentStatus::Maintenance => "На обслуживании",
            EquipmentStatus::OutOfService => "Списано",
        }
    }

    pub fn all() -> Vec<EquipmentStatus> {
        vec![
            EquipmentStatus::Available,
            EquipmentStatus::InUse,
            EquipmentStatus::Maintenance,
            EquipmentStatus::OutOfService,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

impl Choice for EquipmentStatus {
    fn code(&self) -> &'static str {
        EquipmentStatus::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

// ============================================================================
// Record
// ============================================================================

/// Единица оборудования
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equipment {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(alias = "title")]
    pub name: String,

    #[serde(default)]
    pub category: String,

    #[serde(default)]
    pub location: String,

    #[serde(default)]
    pub status: EquipmentStatus,

    #[serde(default, alias = "serial_number", alias = "serial")]
    pub serial_number: String,

    #[serde(default, alias = "purchase_date")]
    pub purchase_date: Option<NaiveDate>,

    #[serde(default, alias = "price", alias = "cost")]
    pub value: f64,

    #[serde(default, alias = "assignedTo", alias = "assigned_to")]
    pub responsible: String,
}

impl Equipment {
    pub fn new(
        name: impl Into<String>,
        category: impl Into<String>,
        location: impl Into<String>,
        status: EquipmentStatus,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            name: name.into(),
            category: category.into(),
            location: location.into(),
            status,
            serial_number: String::new(),
            purchase_date: None,
            value: 0.0,
            responsible: String::new(),
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == EquipmentStatus::Available
    }
}

impl RecordRoot for Equipment {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a001"
    }

    fn collection_name() -> &'static str {
        "equipment"
    }

    fn element_name() -> &'static str {
        "Оборудование"
    }

    fn list_name() -> &'static str {
        "Учет оборудования"
    }
}

impl ListRecord for Equipment {
    type Patch = EquipmentPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "name" => FieldValue::text(&self.name),
            "category" => FieldValue::text(&self.category),
            "location" => FieldValue::text(&self.location),
            "status" => FieldValue::choice(&self.status),
            "serialNumber" => FieldValue::text(&self.serial_number),
            "purchaseDate" => self.purchase_date.into(),
            "value" => self.value.into(),
            "responsible" => FieldValue::text(&self.responsible),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["name", "serialNumber", "location", "responsible", "category"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["category", "location", "status"]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_string(
            "name",
            &self.name,
            ValidationRules::required().with_max_length(150),
            "Наименование",
        );
        errors.check_string(
            "category",
            &self.category,
            ValidationRules::required(),
            "Категория",
        );
        errors.check_string(
            "location",
            &self.location,
            ValidationRules::required(),
            "Местоположение",
        );
        errors.check_number(
            "value",
            self.value,
            ValidationRules::non_negative(),
            "Стоимость",
        );
        errors.into_result()
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EquipmentPatch {
    #[serde(alias = "title")]
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub status: Option<EquipmentStatus>,
    #[serde(alias = "serial_number", alias = "serial")]
    pub serial_number: Option<String>,
    #[serde(alias = "purchase_date")]
    pub purchase_date: Option<NaiveDate>,
    #[serde(alias = "price", alias = "cost")]
    pub value: Option<f64>,
    #[serde(alias = "assignedTo", alias = "assigned_to")]
    pub responsible: Option<String>,
}

impl EquipmentPatch {
    pub fn status(status: EquipmentStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl RecordPatch<Equipment> for EquipmentPatch {
    fn apply_to(self, record: &mut Equipment) {
        if let Some(v) = self.name {
            record.name = v;
        }
        if let Some(v) = self.category {
            record.category = v;
        }
        if let Some(v) = self.location {
            record.location = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.serial_number {
            record.serial_number = v;
        }
        if let Some(v) = self.purchase_date {
            record.purchase_date = Some(v);
        }
        if let Some(v) = self.value {
            record.value = v;
        }
        if let Some(v) = self.responsible {
            record.responsible = v;
        }
    }
}

impl Exportable for Equipment {
    fn headers() -> Vec<&'static str> {
        vec![
            "Наименование",
            "Категория",
            "Местоположение",
            "Статус",
            "Серийный номер",
            "Дата покупки",
            "Стоимость",
            "Ответственный",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.name.clone(),
            self.category.clone(),
            self.location.clone(),
            self.status.display_name().to_string(),
            self.serial_number.clone(),
            format_optional_date(self.purchase_date),
            format!("{:.2}", self.value),
            self.responsible.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_aliases() {
        let json = r#"{"_id": "e1", "title": "Дрель", "category": "Инструмент",
            "location": "Цех 1", "status": "in-use", "serial": "SN-1"}"#;
        let equipment: Equipment = serde_json::from_str(json).unwrap();
        assert_eq!(equipment.meta.id.as_str(), "e1");
        assert_eq!(equipment.name, "Дрель");
        assert_eq!(equipment.status, EquipmentStatus::InUse);
        assert_eq!(equipment.serial_number, "SN-1");
        assert_eq!(equipment.purchase_date, None);
    }

    #[test]
    fn test_filter_key_of_status() {
        let equipment = Equipment::new("Кран", "Подъемное", "Склад", EquipmentStatus::OutOfService);
        assert_eq!(equipment.field("status").filter_key(), "out_of_service");
        assert_eq!(equipment.field("unknown"), FieldValue::Empty);
    }

    #[test]
    fn test_negative_value_rejected() {
        let mut equipment = Equipment::new("Кран", "Подъемное", "Склад", EquipmentStatus::Available);
        equipment.value = -1.0;
        let errors = equipment.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.get("value").is_some());
    }
}
