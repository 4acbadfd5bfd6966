use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{format_date, RecordMeta, RecordRoot};
use crate::enums::RequestStatus;
use crate::shared::export::Exportable;
use crate::shared::list::{FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

/// Коэффициент оплаты сверхурочных часов
pub const OVERTIME_MULTIPLIER: f64 = 1.5;

/// Максимум часов в одной записи
pub const MAX_HOURS: f64 = 24.0;

/// Запись о сверхурочной работе
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OvertimeEntry {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(alias = "employeeName", alias = "employee_name")]
    pub employee: String,

    #[serde(default)]
    pub department: String,

    pub date: NaiveDate,

    pub hours: f64,

    #[serde(default, alias = "hourly_rate", alias = "rate")]
    pub hourly_rate: f64,

    #[serde(default)]
    pub status: RequestStatus,

    #[serde(default, alias = "description")]
    pub reason: String,
}

impl OvertimeEntry {
    pub fn new(
        employee: impl Into<String>,
        department: impl Into<String>,
        date: NaiveDate,
        hours: f64,
        hourly_rate: f64,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            employee: employee.into(),
            department: department.into(),
            date,
            hours,
            hourly_rate,
            status: RequestStatus::Pending,
            reason: String::new(),
        }
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    /// Сумма к оплате с учетом коэффициента
    pub fn amount(&self) -> f64 {
        self.hours * self.hourly_rate * OVERTIME_MULTIPLIER
    }
}

impl RecordRoot for OvertimeEntry {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a004"
    }

    fn collection_name() -> &'static str {
        "overtime"
    }

    fn element_name() -> &'static str {
        "Сверхурочные"
    }

    fn list_name() -> &'static str {
        "Сверхурочная работа"
    }
}

impl ListRecord for OvertimeEntry {
    type Patch = OvertimeEntryPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "employee" => FieldValue::text(&self.employee),
            "department" => FieldValue::text(&self.department),
            "date" => self.date.into(),
            "hours" => self.hours.into(),
            "hourlyRate" => self.hourly_rate.into(),
            "amount" => self.amount().into(),
            "status" => self.status.into(),
            "reason" => FieldValue::text(&self.reason),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["employee", "department", "reason"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["department", "status"]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_string(
            "employee",
            &self.employee,
            ValidationRules::required().with_max_length(100),
            "Сотрудник",
        );
        errors.check_string(
            "department",
            &self.department,
            ValidationRules::required(),
            "Отдел",
        );
        if self.hours.is_finite() && self.hours <= 0.0 {
            errors.add("hours", "Количество часов должно быть больше 0");
        }
        errors.check_number(
            "hours",
            self.hours,
            ValidationRules::range(0.0, MAX_HOURS),
            "Количество часов",
        );
        errors.check_number(
            "hourlyRate",
            self.hourly_rate,
            ValidationRules::non_negative(),
            "Ставка",
        );
        errors.into_result()
    }
}

/// Частичное обновление записи о сверхурочных
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OvertimeEntryPatch {
    #[serde(alias = "employeeName", alias = "employee_name")]
    pub employee: Option<String>,
    pub department: Option<String>,
    pub date: Option<NaiveDate>,
    pub hours: Option<f64>,
    #[serde(alias = "hourly_rate", alias = "rate")]
    pub hourly_rate: Option<f64>,
    pub status: Option<RequestStatus>,
    #[serde(alias = "description")]
    pub reason: Option<String>,
}

impl OvertimeEntryPatch {
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl RecordPatch<OvertimeEntry> for OvertimeEntryPatch {
    fn apply_to(self, record: &mut OvertimeEntry) {
        if let Some(v) = self.employee {
            record.employee = v;
        }
        if let Some(v) = self.department {
            record.department = v;
        }
        if let Some(v) = self.date {
            record.date = v;
        }
        if let Some(v) = self.hours {
            record.hours = v;
        }
        if let Some(v) = self.hourly_rate {
            record.hourly_rate = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.reason {
            record.reason = v;
        }
    }
}

impl Exportable for OvertimeEntry {
    fn headers() -> Vec<&'static str> {
        vec![
            "Сотрудник",
            "Отдел",
            "Дата",
            "Часы",
            "Ставка",
            "Сумма",
            "Статус",
            "Причина",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.employee.clone(),
            self.department.clone(),
            format_date(self.date),
            format!("{:.1}", self.hours),
            format!("{:.2}", self.hourly_rate),
            format!("{:.2}", self.amount()),
            self.status.display_name().to_string(),
            self.reason.clone(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ymd;

    #[test]
    fn test_hours_bounds() {
        let base = OvertimeEntry::new("Иванов", "ИТ", ymd(2024, 3, 1), 2.0, 500.0);
        assert!(base.validate().is_ok());

        let mut zero = base.clone();
        zero.hours = 0.0;
        assert!(zero.validate().unwrap_err().get("hours").is_some());

        let mut too_many = base.clone();
        too_many.hours = 25.0;
        assert!(too_many.validate().unwrap_err().get("hours").is_some());

        let mut full_day = base;
        full_day.hours = 24.0;
        assert!(full_day.validate().is_ok());
    }

    #[test]
    fn test_amount() {
        let entry = OvertimeEntry::new("Иванов", "ИТ", ymd(2024, 3, 1), 4.0, 100.0);
        assert_eq!(entry.amount(), 600.0);
    }

    #[test]
    fn test_rate_alias() {
        let json = r#"{"id": 3, "employee": "Сидоров", "department": "Склад",
            "date": "2024-02-10", "hours": 3.5, "rate": 400}"#;
        let entry: OvertimeEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.hourly_rate, 400.0);
        assert_eq!(entry.status, RequestStatus::Pending);
    }
}
