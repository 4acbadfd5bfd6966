use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{
    days_inclusive, format_date, RecordMeta, RecordRoot,
};
use crate::enums::RequestStatus;
use crate::shared::export::Exportable;
use crate::shared::list::{Choice, FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

// ============================================================================
// Enums
// ============================================================================

/// Вид отпуска
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LeaveType {
    #[default]
    #[serde(alias = "Annual", alias = "vacation")]
    Annual,
    #[serde(alias = "Sick")]
    Sick,
    #[serde(alias = "Personal")]
    Personal,
    #[serde(alias = "Unpaid")]
    Unpaid,
}

impl LeaveType {
    pub fn code(&self) -> &'static str {
        match self {
            LeaveType::Annual => "annual",
            LeaveType::Sick => "sick",
            LeaveType::Personal => "personal",
            LeaveType::Unpaid => "unpaid",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            LeaveType::Annual => "Ежегодный",
            LeaveType::Sick => "Больничный",
            LeaveType::Personal => "Личные обстоятельства",
            LeaveType::Unpaid => "Без сохранения оплаты",
        }
    }

    pub fn all() -> Vec<LeaveType> {
        vec![
            LeaveType::Annual,
            LeaveType::Sick,
            LeaveType::Personal,
            LeaveType::Unpaid,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|t| t.code() == code)
    }
}

impl Choice for LeaveType {
    fn code(&self) -> &'static str {
        LeaveType::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

// ============================================================================
// Record
// ============================================================================

/// Заявка на отпуск
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaveRequest {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(alias = "employeeName", alias = "employee_name")]
    pub employee: String,

    #[serde(default)]
    pub department: String,

    #[serde(default, alias = "leave_type", alias = "type")]
    pub leave_type: LeaveType,

    #[serde(alias = "start_date")]
    pub start_date: NaiveDate,

    #[serde(alias = "end_date")]
    pub end_date: NaiveDate,

    #[serde(default)]
    pub status: RequestStatus,

    #[serde(default)]
    pub reason: String,
}

impl LeaveRequest {
    pub fn new(
        employee: impl Into<String>,
        department: impl Into<String>,
        leave_type: LeaveType,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Self {
        Self {
            meta: RecordMeta::new(),
            employee: employee.into(),
            department: department.into(),
            leave_type,
            start_date,
            end_date,
            status: RequestStatus::Pending,
            reason: String::new(),
        }
    }

    pub fn with_status(mut self, status: RequestStatus) -> Self {
        self.status = status;
        self
    }

    /// Количество дней отпуска (включая обе даты)
    pub fn days(&self) -> i64 {
        days_inclusive(self.start_date, self.end_date)
    }
}

impl RecordRoot for LeaveRequest {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a003"
    }

    fn collection_name() -> &'static str {
        "leave_request"
    }

    fn element_name() -> &'static str {
        "Заявка на отпуск"
    }

    fn list_name() -> &'static str {
        "Заявки на отпуск"
    }
}

impl ListRecord for LeaveRequest {
    type Patch = LeaveRequestPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "employee" => FieldValue::text(&self.employee),
            "department" => FieldValue::text(&self.department),
            "leaveType" => FieldValue::choice(&self.leave_type),
            "startDate" => self.start_date.into(),
            "endDate" => self.end_date.into(),
            "days" => self.days().into(),
            "status" => self.status.into(),
            "reason" => FieldValue::text(&self.reason),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["employee", "department", "reason"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["department", "leaveType", "status"]
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
        if self.end_date < self.start_date {
            errors.add("endDate", "Дата окончания раньше даты начала");
        }
        errors.check_string(
            "reason",
            &self.reason,
            ValidationRules::none().with_max_length(500),
            "Причина",
        );
        errors.into_result()
    }
}

// ============================================================================
// Patch
// ============================================================================

/// Частичное обновление заявки
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeaveRequestPatch {
    #[serde(alias = "employeeName", alias = "employee_name")]
    pub employee: Option<String>,
    pub department: Option<String>,
    #[serde(alias = "leave_type", alias = "type")]
    pub leave_type: Option<LeaveType>,
    #[serde(alias = "start_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(alias = "end_date")]
    pub end_date: Option<NaiveDate>,
    pub status: Option<RequestStatus>,
    pub reason: Option<String>,
}

impl LeaveRequestPatch {
    /// Патч, меняющий только статус (одобрение/отклонение)
    pub fn status(status: RequestStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

impl RecordPatch<LeaveRequest> for LeaveRequestPatch {
    fn apply_to(self, record: &mut LeaveRequest) {
        if let Some(v) = self.employee {
            record.employee = v;
        }
        if let Some(v) = self.department {
            record.department = v;
        }
        if let Some(v) = self.leave_type {
            record.leave_type = v;
        }
        if let Some(v) = self.start_date {
            record.start_date = v;
        }
        if let Some(v) = self.end_date {
            record.end_date = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.reason {
            record.reason = v;
        }
    }
}

// ============================================================================
// Export
// ============================================================================

impl Exportable for LeaveRequest {
    fn headers() -> Vec<&'static str> {
        vec![
            "Сотрудник",
            "Отдел",
            "Вид отпуска",
            "Начало",
            "Окончание",
            "Дней",
            "Статус",
            "Причина",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.employee.clone(),
            self.department.clone(),
            self.leave_type.display_name().to_string(),
            format_date(self.start_date),
            format_date(self.end_date),
            self.days().to_string(),
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
    fn test_deserialize_normalizes_keys() {
        let json = r#"{
            "id": 17,
            "employee_name": "Иванов И.",
            "department": "ИТ",
            "type": "Sick",
            "start_date": "2024-05-02",
            "endDate": "2024-05-04",
            "status": "Approved"
        }"#;
        let request: LeaveRequest = serde_json::from_str(json).unwrap();
        assert_eq!(request.meta.id.as_str(), "17");
        assert_eq!(request.employee, "Иванов И.");
        assert_eq!(request.leave_type, LeaveType::Sick);
        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.reason, "");
        assert_eq!(request.days(), 3);
    }

    #[test]
    fn test_missing_required_field_is_rejected() {
        let json = r#"{"id": "x", "department": "ИТ", "startDate": "2024-05-02"}"#;
        assert!(serde_json::from_str::<LeaveRequest>(json).is_err());
    }

    #[test]
    fn test_validate_reports_fields() {
        let request = LeaveRequest::new("", "ИТ", LeaveType::Annual, ymd(2024, 5, 10), ymd(2024, 5, 1));
        let errors = request.validate().unwrap_err();
        assert!(errors.get("employee").is_some());
        assert!(errors.get("endDate").is_some());
        assert!(errors.get("department").is_none());
    }

    #[test]
    fn test_patch_applies_only_given_fields() {
        let mut request =
            LeaveRequest::new("Петров П.", "Склад", LeaveType::Annual, ymd(2024, 7, 1), ymd(2024, 7, 14));
        LeaveRequestPatch::status(RequestStatus::Approved).apply_to(&mut request);
        assert_eq!(request.status, RequestStatus::Approved);
        assert_eq!(request.employee, "Петров П.");
        assert_eq!(request.days(), 14);
    }
}
