use crate::domain::a001_equipment::ui::list::EquipmentList;
use crate::domain::a002_product::ui::list::ProductList;
use crate::domain::a003_leave_request::ui::list::LeaveRequestList;
use crate::domain::a004_overtime::ui::list::OvertimeList;
use crate::domain::a005_quotation::ui::list::QuotationList;
use crate::domain::a006_spare_part::ui::list::SparePartList;
use crate::domain::a007_work_order::ui::list::WorkOrderList;
use crate::shared::data_source::DataSource;
use crate::shared::storage::BrowserStorage;
use leptos::prelude::*;

/// Разделы приложения
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Section {
    #[default]
    Equipment,
    Products,
    LeaveRequests,
    Overtime,
    Quotations,
    SpareParts,
    WorkOrders,
}

impl Section {
    pub fn code(&self) -> &'static str {
        match self {
            Section::Equipment => "a001_equipment",
            Section::Products => "a002_product",
            Section::LeaveRequests => "a003_leave_request",
            Section::Overtime => "a004_overtime",
            Section::Quotations => "a005_quotation",
            Section::SpareParts => "a006_spare_part",
            Section::WorkOrders => "a007_work_order",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Section::Equipment => "Оборудование",
            Section::Products => "Товары",
            Section::LeaveRequests => "Отпуска",
            Section::Overtime => "Сверхурочные",
            Section::Quotations => "Коммерческие предложения",
            Section::SpareParts => "Запчасти",
            Section::WorkOrders => "Заказ-наряды",
        }
    }

    pub fn all() -> Vec<Section> {
        vec![
            Section::Equipment,
            Section::Products,
            Section::LeaveRequests,
            Section::Overtime,
            Section::Quotations,
            Section::SpareParts,
            Section::WorkOrders,
        ]
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::all().into_iter().find(|s| s.code() == code)
    }

    fn view(self) -> AnyView {
        match self {
            Section::Equipment => view! { <EquipmentList /> }.into_any(),
            Section::Products => view! { <ProductList /> }.into_any(),
            Section::LeaveRequests => view! { <LeaveRequestList /> }.into_any(),
            Section::Overtime => view! { <OvertimeList /> }.into_any(),
            Section::Quotations => view! { <QuotationList /> }.into_any(),
            Section::SpareParts => view! { <SparePartList /> }.into_any(),
            Section::WorkOrders => view! { <WorkOrderList /> }.into_any(),
        }
    }
}

#[component]
pub fn App() -> impl IntoView {
    // Источник данных общий для всех страниц
    let source = RwSignal::new(DataSource::restore_from_browser());
    provide_context(source);

    let section = RwSignal::new(Section::default());

    let on_source_change = move |ev: web_sys::Event| {
        if let Some(next) = DataSource::from_code(&event_target_value(&ev)) {
            log::info!("data source: {}", next.code());
            next.save(&BrowserStorage);
            source.set(next);
        }
    };

    view! {
        <div class="app">
            <nav class="app__nav">
                {Section::all()
                    .into_iter()
                    .map(|s| {
                        view! {
                            <button
                                class=move || {
                                    if section.get() == s {
                                        "app__nav-item app__nav-item--active"
                                    } else {
                                        "app__nav-item"
                                    }
                                }
                                on:click=move |_| section.set(s)
                            >
                                {s.display_name()}
                            </button>
                        }
                    })
                    .collect_view()}
                <label class="app__source">
                    "Данные: "
                    <select class="form__select" on:change=on_source_change>
                        {DataSource::all()
                            .into_iter()
                            .map(|d| {
                                view! {
                                    <option value=d.code() selected=move || source.get() == d>
                                        {d.display_name()}
                                    </option>
                                }
                            })
                            .collect_view()}
                    </select>
                </label>
            </nav>
            <main class="app__content">
                // Смена раздела или источника заново монтирует страницу
                {move || {
                    source.track();
                    section.get().view()
                }}
            </main>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_codes_roundtrip() {
        for section in Section::all() {
            assert_eq!(Section::from_code(section.code()), Some(section));
        }
        assert_eq!(Section::all().len(), 7);
    }
}
