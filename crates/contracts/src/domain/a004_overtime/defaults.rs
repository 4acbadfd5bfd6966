use super::aggregate::OvertimeEntry;
use crate::domain::common::{ymd, DefaultDataset, RecordMeta};
use crate::enums::RequestStatus;

/// Начальный набор записей о сверхурочных
pub fn default_records() -> Vec<OvertimeEntry> {
    let rows = [
        ("ot-001", "Игорь Кузнецов", "ИТ", (2024, 3, 4), 3.0, 850.0, RequestStatus::Approved, "Релиз"),
        ("ot-002", "Елена Морозова", "ИТ", (2024, 3, 5), 2.5, 900.0, RequestStatus::Pending, "Миграция базы"),
        ("ot-003", "Олег Васильев", "Склад", (2024, 3, 6), 4.0, 450.0, RequestStatus::Approved, "Инвентаризация"),
        ("ot-004", "Дмитрий Волков", "Производство", (2024, 3, 9), 6.0, 600.0, RequestStatus::Rejected, "Сменный график"),
        ("ot-005", "Мария Попова", "Продажи", (2024, 3, 11), 1.5, 700.0, RequestStatus::Pending, "Встреча с клиентом"),
        ("ot-006", "Анна Смирнова", "Бухгалтерия", (2024, 3, 29), 5.0, 750.0, RequestStatus::Approved, "Закрытие квартала"),
    ];

    rows.into_iter()
        .map(|(id, employee, department, date, hours, rate, status, reason)| {
            let mut entry =
                OvertimeEntry::new(employee, department, ymd(date.0, date.1, date.2), hours, rate)
                    .with_status(status);
            entry.meta = RecordMeta::with_id(id);
            entry.reason = reason.to_string();
            entry
        })
        .collect()
}

impl DefaultDataset for OvertimeEntry {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
