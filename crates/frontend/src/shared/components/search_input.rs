use crate::shared::icons::icon;
use gloo_timers::callback::Timeout;
use leptos::prelude::*;

const DEBOUNCE_MS: u32 = 300;

/// Строка поиска с задержкой и кнопкой очистки
#[component]
pub fn SearchInput(
    /// Текущее значение поиска в сессии
    #[prop(into)]
    value: Signal<String>,
    #[prop(into)]
    on_change: Callback<String>,
    #[prop(optional, into)]
    placeholder: String,
) -> impl IntoView {
    let placeholder = if placeholder.is_empty() {
        "Поиск...".to_string()
    } else {
        placeholder
    };

    let (input_value, set_input_value) = signal(value.get_untracked());
    // Новый таймер заменяет старый, сброшенный таймер не срабатывает
    let pending = StoredValue::new_local(None::<Timeout>);

    let handle_input = move |text: String| {
        set_input_value.set(text.clone());
        let timeout = Timeout::new(DEBOUNCE_MS, move || on_change.run(text));
        pending.set_value(Some(timeout));
    };

    let clear = move |_| {
        pending.set_value(None);
        set_input_value.set(String::new());
        on_change.run(String::new());
    };

    view! {
        <div class="search-input">
            <input
                type="text"
                class=move || {
                    if value.get().is_empty() { "search-input__field" } else { "search-input__field search-input__field--active" }
                }
                placeholder=placeholder
                prop:value=move || input_value.get()
                on:input=move |ev| handle_input(event_target_value(&ev))
            />
            <Show when=move || !input_value.get().is_empty()>
                <button class="search-input__clear" on:click=clear title="Очистить">
                    {icon("x")}
                </button>
            </Show>
        </div>
    }
}
