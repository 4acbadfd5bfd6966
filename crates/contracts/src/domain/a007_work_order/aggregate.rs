use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::common::{format_optional_date, RecordMeta, RecordRoot};
use crate::shared::export::Exportable;
use crate::shared::list::{Choice, FieldValue, ListRecord, RecordPatch};
use crate::shared::validation::{ValidationErrors, ValidationRules};

// ============================================================================
// Enums
// ============================================================================

/// Приоритет заказ-наряда (порядок объявления = порядок сортировки)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    #[serde(alias = "Low")]
    Low,
    #[default]
    #[serde(alias = "Medium", alias = "normal")]
    Medium,
    #[serde(alias = "High")]
    High,
    #[serde(alias = "Critical", alias = "urgent")]
    Critical,
}

impl Priority {
    pub fn code(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
            Priority::Critical => "critical",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Priority::Low => "Низкий",
            Priority::Medium => "Средний",
            Priority::High => "Высокий",
            Priority::Critical => "Критический",
        }
    }

    pub fn all() -> Vec<Priority> {
        vec![
            Priority::Low,
            Priority::Medium,
            Priority::High,
            Priority::Critical,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|p| p.code() == code)
    }
}

impl Choice for Priority {
    fn code(&self) -> &'static str {
        Priority::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WorkOrderStatus {
    #[default]
    #[serde(alias = "Open", alias = "new")]
    Open,
    #[serde(alias = "InProgress", alias = "in-progress", alias = "inProgress")]
    InProgress,
    #[serde(alias = "Completed", alias = "done")]
    Completed,
    #[serde(alias = "Cancelled", alias = "canceled")]
    Cancelled,
}

impl WorkOrderStatus {
    pub fn code(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "open",
            WorkOrderStatus::InProgress => "in_progress",
            WorkOrderStatus::Completed => "completed",
            WorkOrderStatus::Cancelled => "cancelled",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "Открыт",
            WorkOrderStatus::InProgress => "В работе",
            WorkOrderStatus::Completed => "Выполнен",
            WorkOrderStatus::Cancelled => "Отменен",
        }
    }

    pub fn all() -> Vec<WorkOrderStatus> {
        vec![
            WorkOrderStatus::Open,
            WorkOrderStatus::InProgress,
            WorkOrderStatus::Completed,
            WorkOrderStatus::Cancelled,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    /// Наряд еще требует работы
    pub fn is_active(&self) -> bool {
        matches!(self, WorkOrderStatus::Open | WorkOrderStatus::InProgress)
    }
}

impl Choice for WorkOrderStatus {
    fn code(&self) -> &'static str {
        WorkOrderStatus::code(self)
    }

    fn rank(&self) -> u8 {
        *self as u8
    }
}

// ============================================================================
// Record
// ============================================================================

/// Заказ-наряд на обслуживание
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    #[serde(flatten)]
    pub meta: RecordMeta,

    #[serde(default, alias = "orderNumber", alias = "order_number")]
    pub number: String,

    pub title: String,

    #[serde(default, alias = "asset", alias = "machine")]
    pub equipment: String,

    #[serde(default)]
    pub priority: Priority,

    #[serde(default)]
    pub status: WorkOrderStatus,

    #[serde(default, alias = "assignedTo", alias = "assigned_to", alias = "technician")]
    pub assignee: String,

    #[serde(default, alias = "due_date")]
    pub due_date: Option<NaiveDate>,

    #[serde(default, alias = "completed_at", alias = "completedDate")]
    pub completed_at: Option<NaiveDate>,

    #[serde(default)]
    pub description: String,

    #[serde(default, alias = "estimated_hours")]
    pub estimated_hours: f64,
}

impl WorkOrder {
    pub fn new(number: impl Into<String>, title: impl Into<String>, priority: Priority) -> Self {
        Self {
            meta: RecordMeta::new(),
            number: number.into(),
            title: title.into(),
            equipment: String::new(),
            priority,
            status: WorkOrderStatus::Open,
            assignee: String::new(),
            due_date: None,
            completed_at: None,
            description: String::new(),
            estimated_hours: 0.0,
        }
    }

    /// Срок прошел, а наряд не закрыт
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        self.status.is_active() && self.due_date.map(|due| due < today).unwrap_or(false)
    }
}

impl RecordRoot for WorkOrder {
    fn meta(&self) -> &RecordMeta {
        &self.meta
    }

    fn meta_mut(&mut self) -> &mut RecordMeta {
        &mut self.meta
    }

    fn aggregate_index() -> &'static str {
        "a007"
    }

    fn collection_name() -> &'static str {
        "work_order"
    }

    fn element_name() -> &'static str {
        "Заказ-наряд"
    }

    fn list_name() -> &'static str {
        "Заказ-наряды на обслуживание"
    }
}

impl ListRecord for WorkOrder {
    type Patch = WorkOrderPatch;

    fn field(&self, key: &str) -> FieldValue {
        match key {
            "id" => FieldValue::text(self.meta.id.as_str()),
            "number" => FieldValue::text(&self.number),
            "title" => FieldValue::text(&self.title),
            "equipment" => FieldValue::text(&self.equipment),
            "priority" => FieldValue::choice(&self.priority),
            "status" => FieldValue::choice(&self.status),
            "assignee" => FieldValue::text(&self.assignee),
            "dueDate" => self.due_date.into(),
            "completedAt" => self.completed_at.into(),
            "description" => FieldValue::text(&self.description),
            "estimatedHours" => self.estimated_hours.into(),
            _ => FieldValue::Empty,
        }
    }

    fn search_fields() -> &'static [&'static str] {
        &["number", "title", "equipment", "assignee", "description"]
    }

    fn filter_keys() -> &'static [&'static str] {
        &["status", "priority", "assignee"]
    }

    fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::new();
        errors.check_string(
            "title",
            &self.title,
            ValidationRules::required().with_max_length(200),
            "Заголовок",
        );
        errors.check_string(
            "equipment",
            &self.equipment,
            ValidationRules::required(),
            "Оборудование",
        );
        errors.check_number(
            "estimatedHours",
            self.estimated_hours,
            ValidationRules::non_negative(),
            "Оценка трудозатрат",
        );
        if self.status == WorkOrderStatus::Completed && self.completed_at.is_none() {
            errors.add("completedAt", "Укажите дату выполнения");
        }
        errors.into_result()
    }
}

// ============================================================================
// Patch
// ============================================================================

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct WorkOrderPatch {
    #[serde(alias = "orderNumber", alias = "order_number")]
    pub number: Option<String>,
    pub title: Option<String>,
    #[serde(alias = "asset", alias = "machine")]
    pub equipment: Option<String>,
    pub priority: Option<Priority>,
    pub status: Option<WorkOrderStatus>,
    #[serde(alias = "assignedTo", alias = "assigned_to", alias = "technician")]
    pub assignee: Option<String>,
    #[serde(alias = "due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(alias = "completed_at", alias = "completedDate")]
    pub completed_at: Option<NaiveDate>,
    pub description: Option<String>,
    #[serde(alias = "estimated_hours")]
    pub estimated_hours: Option<f64>,
}

impl WorkOrderPatch {
    /// Закрыть наряд указанной датой
    pub fn complete(on: NaiveDate) -> Self {
        Self {
            status: Some(WorkOrderStatus::Completed),
            completed_at: Some(on),
            ..Self::default()
        }
    }
}

impl RecordPatch<WorkOrder> for WorkOrderPatch {
    fn apply_to(self, record: &mut WorkOrder) {
        if let Some(v) = self.number {
            record.number = v;
        }
        if let Some(v) = self.title {
            record.title = v;
        }
        if let Some(v) = self.equipment {
            record.equipment = v;
        }
        if let Some(v) = self.priority {
            record.priority = v;
        }
        if let Some(v) = self.status {
            record.status = v;
        }
        if let Some(v) = self.assignee {
            record.assignee = v;
        }
        if let Some(v) = self.due_date {
            record.due_date = Some(v);
        }
        if let Some(v) = self.completed_at {
            record.completed_at = Some(v);
        }
        if let Some(v) = self.description {
            record.description = v;
        }
        if let Some(v) = self.estimated_hours {
            record.estimated_hours = v;
        }
    }
}

impl Exportable for WorkOrder {
    fn headers() -> Vec<&'static str> {
        vec![
            "Номер",
            "Заголовок",
            "Оборудование",
            "Приоритет",
            "Статус",
            "Исполнитель",
            "Срок",
            "Выполнен",
            "Часы (оценка)",
        ]
    }

    fn to_csv_row(&self) -> Vec<String> {
        vec![
            self.number.clone(),
            self.title.clone(),
            self.equipment.clone(),
            self.priority.display_name().to_string(),
            self.status.display_name().to_string(),
            self.assignee.clone(),
            format_optional_date(self.due_date),
            format_optional_date(self.completed_at),
            format!("{:.1}", self.estimated_hours),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::common::ymd;
    use crate::shared::list::{sort, SortState};
    use std::cmp::Ordering;

    #[test]
    fn test_priority_sorts_by_rank() {
        let mut low = WorkOrder::new("WO-1", "Смазка", Priority::Low);
        low.meta = RecordMeta::with_id("a");
        let mut critical = WorkOrder::new("WO-2", "Авария", Priority::Critical);
        critical.meta = RecordMeta::with_id("b");
        let by_priority = SortState::ascending("priority");
        assert_eq!(sort::compare(&low, &critical, &by_priority), Ordering::Less);
    }

    #[test]
    fn test_overdue() {
        let today = ymd(2024, 6, 10);
        let mut order = WorkOrder::new("WO-3", "Замена фильтра", Priority::High);
        assert!(!order.is_overdue(today));

        order.due_date = Some(ymd(2024, 6, 9));
        assert!(order.is_overdue(today));

        order.due_date = Some(today);
        assert!(!order.is_overdue(today));

        order.due_date = Some(ymd(2024, 6, 1));
        order.status = WorkOrderStatus::Completed;
        assert!(!order.is_overdue(today));
    }

    #[test]
    fn test_completed_requires_date() {
        let mut order = WorkOrder::new("WO-4", "Проверка", Priority::Medium);
        order.equipment = "Пресс".into();
        order.status = WorkOrderStatus::Completed;
        assert!(order.validate().unwrap_err().get("completedAt").is_some());

        WorkOrderPatch::complete(ymd(2024, 6, 1)).apply_to(&mut order);
        assert!(order.validate().is_ok());
    }
}
