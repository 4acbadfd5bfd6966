use leptos::prelude::*;

/// Оттенок карточки
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StatTone {
    #[default]
    Neutral,
    Good,
    Warning,
    Bad,
}

impl StatTone {
    pub fn class(&self) -> &'static str {
        match self {
            StatTone::Neutral => "stat-card",
            StatTone::Good => "stat-card stat-card--success",
            StatTone::Warning => "stat-card stat-card--warning",
            StatTone::Bad => "stat-card stat-card--error",
        }
    }
}

/// Показатель сводки: подпись и уже отформатированное значение
#[component]
pub fn StatCard(
    label: String,
    #[prop(into)]
    value: Signal<String>,
    #[prop(into, optional)]
    tone: Signal<StatTone>,
) -> impl IntoView {
    view! {
        <div class=move || tone.get().class()>
            <div class="stat-card__content">
                <div class="stat-card__label">{label}</div>
                <div class="stat-card__value">{move || value.get()}</div>
            </div>
        </div>
    }
}
