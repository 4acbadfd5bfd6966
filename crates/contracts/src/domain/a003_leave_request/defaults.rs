use super::aggregate::{LeaveRequest, LeaveType};
use crate::domain::common::{ymd, DefaultDataset, RecordMeta};
use crate::enums::RequestStatus;

/// Начальный набор заявок для пустого хранилища
pub fn default_records() -> Vec<LeaveRequest> {
    let rows = [
        ("lr-001", "Анна Смирнова", "Бухгалтерия", LeaveType::Annual, (2024, 6, 3), (2024, 6, 16), RequestStatus::Approved, "Плановый отпуск"),
        ("lr-002", "Игорь Кузнецов", "ИТ", LeaveType::Sick, (2024, 5, 13), (2024, 5, 17), RequestStatus::Approved, "Больничный лист"),
        ("lr-003", "Мария Попова", "Продажи", LeaveType::Personal, (2024, 7, 8), (2024, 7, 9), RequestStatus::Pending, "Семейные обстоятельства"),
        ("lr-004", "Олег Васильев", "Склад", LeaveType::Unpaid, (2024, 8, 1), (2024, 8, 10), RequestStatus::Rejected, "Переезд"),
        ("lr-005", "Елена Морозова", "ИТ", LeaveType::Annual, (2024, 9, 2), (2024, 9, 13), RequestStatus::Pending, ""),
        ("lr-006", "Дмитрий Волков", "Производство", LeaveType::Annual, (2024, 7, 15), (2024, 7, 28), RequestStatus::Approved, "Отпуск по графику"),
        ("lr-007", "Наталья Лебедева", "Бухгалтерия", LeaveType::Sick, (2024, 4, 22), (2024, 4, 24), RequestStatus::Approved, ""),
        ("lr-008", "Сергей Новиков", "Продажи", LeaveType::Personal, (2024, 10, 7), (2024, 10, 7), RequestStatus::Pending, "Свадьба"),
    ];

    rows.into_iter()
        .map(|(id, employee, department, leave_type, start, end, status, reason)| {
            let mut request = LeaveRequest::new(
                employee,
                department,
                leave_type,
                ymd(start.0, start.1, start.2),
                ymd(end.0, end.1, end.2),
            )
            .with_status(status);
            request.meta = RecordMeta::with_id(id);
            request.reason = reason.to_string();
            request
        })
        .collect()
}

impl DefaultDataset for LeaveRequest {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
