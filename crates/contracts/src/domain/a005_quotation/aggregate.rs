use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{format_date, RecordMeta, RecordRoot};
use crate::shared::export::Exportable;
use crate::shared::list::{Choice, FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

// ============================================================================
// Status
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum QuotationStatus {
    #[default]
    #[serde(alias = "Draft")]
    Draft,
    #[serde(alias = "Sent")]
    Sent,
    #[serde(alias = "Accepted")]
    Accepted,
    #[serde(alias = "Rejected", alias = "declined")]
    Rejected,
    #[serde(alias = "Expired")]
    Expired,
}

impl QuotationStatus {
    pub fn code(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "draft",
            QuotationStatus::Sent => "sent",
            QuotationStatus::Accepted => "accepted",
            QuotationStatus::Rejected => "rejected",
            QuotationStatus::Expired => "expired",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            QuotationStatus::Draft => "Черновик",
            QuotationStatus::Sent => "Отправлено",
            QuotationStatus::Accepted => "Принято",
            QuotationStatus::Rejected => "Отклонено",
            QuotationStatus::Expired => "Истек срок",
        }
    }

    pub fn all() -> Vec<QuotationStatus> {
        vec![
            QuotationStatus::Draft,
            QuotationStatus::Sent,
            QuotationStatus::Accepted,
            QuotationStatus::Rejected,
            QuotationStatus::Expired,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }
}

impl Choice for QuotationStatus {
    fn code(&self) -> &'static str {
        QuotationStatus::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

// ============================================================================
// Lines
// ============================================================================

/// Строка коммерческого предложения
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLine {
    #[serde(alias = "item", alias = "name")]
    pub description: String,
    #[serde(default = "default_quantity", alias = "qty")]
    pub quantity: f64,
    #[serde(default, alias = "unit_price", alias = "price", alias = "rate")]
    pub unit_price: f64,
}

fn default_quantity() -> f64 {
    1.0
}

impl QuotationLine {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn amount(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

// ============================================================================
// Record
// ============================================================================

/// Коммерческое предложение клиенту
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(default, alias = "quoteNumber", alias = "quote_number")]
    pub number: String,

    #[serde(alias = "clientName", alias = "client_name", alias = "customer")]
    pub client: String,

    #[serde(default, alias = "client_email", alias = "email")]
    pub client_email: String,

    #[serde(alias = "issue_date", alias = "date")]
    pub issue_date: NaiveDate,

    #[serde(alias = "valid_until", alias = "expiryDate")]
    pub valid_until: NaiveDate,

    #[serde(default)]
    pub status: QuotationStatus,

    #[serde(default, alias = "items")]
    pub lines: Vec<QuotationLine>,

    /// Ставка налога в процентах
    #[serde(default, alias = "tax_rate", alias = "tax")]
    pub tax_rate: f64,

    #[serde(default)]
    pub notes: String,
}

impl Quotation {
    pub fn new(
        number: impl Into<String>,
        client: impl Into<String>,
        issue_date: NaiveDate,
        valid_until: NaiveDate,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            number: number.into(),
            client: client.into(),
            client_email: String::new(),
            issue_date,
            valid_until,
            status: QuotationStatus::Draft,
            lines: Vec::new(),
            tax_rate: 0.0,
            notes: String::new(),
        }
    }

    pub fn with_line(mut self, line: QuotationLine) -> Self {
        self.lines.push(line);
        self
    }

    pub fn subtotal(&self) -> f64 {
        self.lines.iter().map(QuotationLine::amount).sum()
    }

    pub fn tax(&self) -> f64 {
        self.subtotal() * self.tax_rate / 100.0
    }

    pub fn total(&self) -> f64 {
        self.subtotal() + self.tax()
    }
}

impl RecordRoot for Quotation {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a005"
    }

    fn collection_name() -> &'static str {
        "quotation"
    }

    fn element_name() -> &'static str {
        "Коммерческое предложение"
    }

    fn list_name() -> &'static str {
        "Коммерческие предложения"
    }
}

impl ListRecord for Quotation {
    type Patch = QuotationPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "number" => FieldValue::text(&self.number),
            "client" => FieldValue::text(&self.client),
            "clientEmail" => FieldValue::text(&self.client_email),
            "issueDate" => self.issue_date.into(),
            "validUntil" => self.valid_until.into(),
            "status" => FieldValue::choice(&self.status),
            "subtotal" => self.subtotal().into(),
            "total" => self.total().into(),
            "notes" => FieldValue::text(&self.notes),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["number", "client", "clientEmail", "notes"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["status", "client"]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_string(
            "client",
            &self.client,
            ValidationRules::required().with_max_length(200),
            "Клиент",
        );
        if !self.client_email.trim().is_empty() && !self.client_email.contains('@') {
            errors.add("clientEmail", "Некорректный адрес электронной почты");
        }
        if self.valid_until < self.issue_date {
            errors.add("validUntil", "Срок действия раньше даты выставления");
        }
        errors.check_number(
            "taxRate",
            self.tax_rate,
            ValidationRules::range(0.0, 100.0),
            "Ставка налога",
        );
        if self.lines.is_empty() {
            errors.add("lines", "Добавьте хотя бы одну позицию");
        }
        for (index, line) in self.lines.iter().enumerate() {
            let row = index + 1;
            if line.description.trim().is_empty() {
                errors.add("lines", format!("Строка {}: не заполнено описание", row));
            } else if line.quantity.is_nan() || line.quantity <= 0.0 {
                errors.add("lines", format!("Строка {}: количество должно быть больше 0", row));
            } else if line.unit_price.is_nan() || line.unit_price < 0.0 {
                errors.add("lines", format!("Строка {}: цена не может быть отрицательной", row));
            }
        }
        errors.into_result()
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct QuotationPatch {
    #[serde(alias = "quoteNumber", alias = "quote_number")]
    pub number: Option<String>,
    #[serde(alias = "clientName", alias = "client_name", alias = "customer")]
    pub client: Option<String>,
    #[serde(alias = "client_email", alias = "email")]
    pub client_email: Option<String>,
    #[serde(alias = "issue_date", alias = "date")]
    pub issue_date: Option<NaiveDate>,
    #[serde(alias = "valid_until", alias = "expiryDate")]
    pub valid_until: Option<NaiveDate>,
    pub status: Option<QuotationStatus>,
    /// Список позиций заменяется целиком
    #[serde(alias = "items")]
    pub lines: Option<Vec<QuotationLine>>,
    #[serde(alias = "tax_rate", alias = "tax")]
    pub tax_rate: Option<f64>,
    pub notes: Option<String>,
}

impl QuotationPatch {
    pub fn status(status: QuotationStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl RecordPatch<Quotation> for QuotationPatch {
    fn apply_to(self, record: &mut Quotation) {
        if let Some(v) = self.number {
            record.number = v;
        }
        if let Some(v) = self.client {
            record.client = v;
        }
        if let Some(v) = self.client_email {
            record.client_email = v;
        }
        if let Some(v) = self.issue_date {
            record.issue_date = v;
        }
        if let Some(v) = self.valid_until {
            record.valid_until = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.lines {
            record.lines = v;
        }
        if let Some(v) = self.tax_rate {
            record.tax_rate = v;
        }
        if let Some(v) = self.notes {
            record.notes = v;
        }
    }
}

impl Exportable for Quotation {
    fn headers() -> Vec<&'static str> {
        vec![
            "Номер",
            "Клиент",
            "Email",
            "Дата",
            "Действует до",
            "Статус",
            "Позиций",
            "Сумма без налога",
            "Налог",
            "Итого",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.number.clone(),
            self.client.clone(),
            self.client_email.clone(),
            format_date(self.issue_date),
            format_date(self.valid_until),
            self.status.display_name().to_string(),
            self.lines.len().to_string(),
            format!("{:.2}", self.subtotal()),
            format!("{:.2}", self.tax()),
            format!("{:.2}", self.total()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ymd;

    fn sample() -> Quotation {
        let mut quote = Quotation::new("КП-1", "ООО Вектор", ymd(2024, 3, 1), ymd(2024, 3, 31))
            .with_line(QuotationLine::new("Монтаж", 2.0, 1500.0))
            .with_line(QuotationLine::new("Материалы", 1.0, 1000.0));
        quote.tax_rate = 20.0;
        quote
    }

    #[test]
    fn test_totals() {
        let quote = sample();
        assert_eq!(quote.subtotal(), 4000.0);
        assert_eq!(quote.tax(), 800.0);
        assert_eq!(quote.total(), 4800.0);
        assert!(quote.validate().is_ok());
    }

    #[test]
    fn test_validation() {
        let mut quote = sample();
        quote.client_email = "vector.ru".into();
        quote.valid_until = ymd(2024, 2, 1);
        quote.lines[1].quantity = 0.0;
        let errors = quote.validate().unwrap_err();
        assert!(errors.get("clientEmail").is_some());
        assert!(errors.get("validUntil").is_some());
        assert_eq!(errors.get("lines"), Some("Строка 2: количество должно быть больше 0"));
    }

    #[test]
    fn test_items_alias() {
        let json = r#"{"id": 9, "customer": "ИП Орлов", "date": "2024-01-10",
            "validUntil": "2024-02-10", "items": [{"name": "Услуга", "qty": 3, "price": 100}],
            "tax": 10}"#;
        let quote: Quotation = serde_json::from_str(json).unwrap();
        assert_eq!(quote.client, "ИП Орлов");
        assert_eq!(quote.lines.len(), 1);
        assert_eq!(quote.total(), 330.0);
    }
}
