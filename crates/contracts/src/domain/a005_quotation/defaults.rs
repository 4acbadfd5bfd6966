use super::aggregate::{Quotation, QuotationLine, QuotationStatus};
use crate::domain::common::{ymd, DefaultDataset, RecordMeta};

/// Начальный набор коммерческих предложений
pub fn default_records() -> Vec<Quotation> {
    let mut vector = Quotation::new("КП-2024-001", "ООО Вектор", ymd(2024, 5, 6), ymd(2024, 6, 5))
        .with_line(QuotationLine::new("Монтаж системы вентиляции", 1.0, 185000.0))
        .with_line(QuotationLine::new("Воздуховоды, п.м.", 42.0, 1250.0));
    vector.meta = RecordMeta::with_id("qt-001");
    vector.client_email = "zakupki@vector.ru".into();
    vector.status = QuotationStatus::Sent;
    vector.tax_rate = 20.0;

    let mut orion = Quotation::new("КП-2024-002", "АО Орион", ymd(2024, 4, 15), ymd(2024, 5, 15))
        .with_line(QuotationLine::new("Сервисное обслуживание, мес.", 12.0, 24000.0));
    orion.meta = RecordMeta::with_id("qt-002");
    orion.client_email = "office@orion.ru".into();
    orion.status = QuotationStatus::Accepted;
    orion.tax_rate = 20.0;
    orion.notes = "Оплата ежемесячно".into();

    let mut orlov = Quotation::new("КП-2024-003", "ИП Орлов", ymd(2024, 3, 1), ymd(2024, 3, 31))
        .with_line(QuotationLine::new("Диагностика оборудования", 1.0, 15000.0))
        .with_line(QuotationLine::new("Выезд специалиста", 2.0, 3500.0));
    orlov.meta = RecordMeta::with_id("qt-003");
    orlov.status = QuotationStatus::Rejected;

    let mut sever = Quotation::new("КП-2024-004", "ООО Север", ymd(2024, 6, 3), ymd(2024, 7, 3))
        .with_line(QuotationLine::new("Поставка фильтров", 50.0, 650.0));
    sever.meta = RecordMeta::with_id("qt-004");
    sever.tax_rate = 20.0;

    let mut delta = Quotation::new("КП-2024-005", "ООО Дельта", ymd(2024, 1, 10), ymd(2024, 2, 10))
        .with_line(QuotationLine::new("Модернизация линии", 1.0, 420000.0));
    delta.meta = RecordMeta::with_id("qt-005");
    delta.client_email = "tech@delta.ru".into();
    delta.status = QuotationStatus::Expired;
    delta.tax_rate = 20.0;

    vec![vector, orion, orlov, sever, delta]
}

impl DefaultDataset for Quotation {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
