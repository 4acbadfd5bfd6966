use contracts::shared::list::ALL;
use leptos::prelude::*;

/// Выпадающий фильтр по одному полю; первый пункт снимает ограничение
///
/// `options` - пары (код, подпись).
#[component]
pub fn FilterSelect(
    label: &'static str,
    options: Vec<(String, String)>,
    #[prop(into)]
    value: Signal<String>,
    on_change: Callback<String>,
) -> impl IntoView {
    view! {
        <label class="filter-select">
            <span class="filter-select__label">{label}</span>
            <select
                class="filter-select__control"
                prop:value=move || value.get()
                on:change=move |ev| on_change.run(event_target_value(&ev))
            >
                <option value=ALL>"Все"</option>
                {options
                    .into_iter()
                    .map(|(code, caption)| {
                        let selected_code = code.clone();
                        view! {
                            <option value=code selected=move || value.get() == selected_code>
                                {caption}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </label>
    }
}
