use super::aggregate::{Priority, WorkOrder, WorkOrderStatus};
use crate::domain::common::{ymd, DefaultDataset, RecordMeta};

/// Начальный набор заказ-нарядов
pub fn default_records() -> Vec<WorkOrder> {
    let rows = [
        ("wo-001", "ЗН-0001", "Замена подшипника конвейера", "Конвейер К-2", Priority::High, WorkOrderStatus::InProgress, "Волков Д.", (2024, 6, 14), None, 4.0),
        ("wo-002", "ЗН-0002", "Плановое ТО погрузчика", "Погрузчик Toyota 8FBE15", Priority::Medium, WorkOrderStatus::Open, "Васильев О.", (2024, 6, 20), None, 6.0),
        ("wo-003", "ЗН-0003", "Утечка масла гидростанции", "Пресс П-160", Priority::Critical, WorkOrderStatus::Completed, "Волков Д.", (2024, 6, 3), Some((2024, 6, 2)), 3.5),
        ("wo-004", "ЗН-0004", "Калибровка датчиков", "Линия розлива", Priority::Low, WorkOrderStatus::Open, "Новиков С.", (2024, 7, 1), None, 2.0),
        ("wo-005", "ЗН-0005", "Замена ремня привода", "Компрессор Fubag", Priority::Medium, WorkOrderStatus::Cancelled, "", (2024, 5, 28), None, 1.5),
        ("wo-006", "ЗН-0006", "Ревизия электрощита", "Щит ЩР-3", Priority::High, WorkOrderStatus::Completed, "Новиков С.", (2024, 6, 10), Some((2024, 6, 11)), 5.0),
    ];

    rows.into_iter()
        .map(|(id, number, title, equipment, priority, status, assignee, due, completed, hours)| {
            let mut order = WorkOrder::new(number, title, priority);
            order.meta = RecordMeta::with_id(id);
            order.equipment = equipment.to_string();
            order.status = status;
            order.assignee = assignee.to_string();
            order.due_date = Some(ymd(due.0, due.1, due.2));
            order.completed_at = completed.map(|(y, m, d)| ymd(y, m, d));
            order.estimated_hours = hours;
            order
        })
        .collect()
}

impl DefaultDataset for WorkOrder {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
