use super::aggregate::{Equipment, EquipmentStatus};
use crate::domain::common::{ymd, DefaultDataset, RecordMeta};

/// Начальный набор оборудования
pub fn default_records() -> Vec<Equipment> {
    let rows = [
        ("eq-001", "Перфоратор Bosch GBH 2-26", "Инструмент", "Цех 1", EquipmentStatus::Available, "BSH-22614", (2022, 3, 15), 18500.0, ""),
        ("eq-002", "Сварочный аппарат Ресанта", "Сварка", "Цех 2", EquipmentStatus::InUse, "RS-190-0071", (2021, 11, 2), 12400.0, "Волков Д."),
        ("eq-003", "Погрузчик Toyota 8FBE15", "Техника", "Склад", EquipmentStatus::Maintenance, "TY-8FBE-5512", (2019, 6, 20), 1450000.0, "Васильев О."),
        ("eq-004", "Ноутбук Lenovo ThinkPad", "ИТ", "Офис", EquipmentStatus::InUse, "LNV-T14-3381", (2023, 1, 10), 96000.0, "Кузнецов И."),
        ("eq-005", "Проектор Epson EB-X49", "ИТ", "Переговорная", EquipmentStatus::Available, "EPS-X49-0912", (2020, 9, 1), 42000.0, ""),
        ("eq-006", "Компрессор Fubag", "Техника", "Цех 1", EquipmentStatus::OutOfService, "FBG-5500-17", (2016, 4, 12), 31000.0, ""),
        ("eq-007", "Лазерный нивелир ADA", "Инструмент", "Цех 2", EquipmentStatus::Available, "ADA-CUBE-440", (2023, 5, 30), 8700.0, ""),
    ];

    rows.into_iter()
        .map(|(id, name, category, location, status, serial, purchased, value, responsible)| {
            let mut equipment = Equipment::new(name, category, location, status);
            equipment.meta = RecordMeta::with_id(id);
            equipment.serial_number = serial.to_string();
            equipment.purchase_date = Some(ymd(purchased.0, purchased.1, purchased.2));
            equipment.value = value;
            equipment.responsible = responsible.to_string();
            equipment
        })
        .collect()
}

impl DefaultDataset for Equipment {
    fn default_records() -> Vec<Self> {
        default_records()
    }
}
