use crate::shared::icons::icon;
use contracts::shared::list::PAGE_SIZE_OPTIONS;
use leptos::prelude::*;

/// Навигация по страницам списка (номера страниц с 1)
#[component]
pub fn PaginationControls(
    /// Текущая страница (1..=total_pages)
    #[prop(into)]
    current_page: Signal<usize>,

    #[prop(into)]
    total_pages: Signal<usize>,

    /// Количество записей после фильтра и поиска
    #[prop(into)]
    total_count: Signal<usize>,

    #[prop(into)]
    page_size: Signal<usize>,

    on_page_change: Callback<usize>,

    on_page_size_change: Callback<usize>,
) -> impl IntoView {
    let at_first = move || current_page.get() <= 1;
    let at_last = move || current_page.get() >= total_pages.get();

    view! {
        <div class="pagination-controls">
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(1)
                disabled=at_first
                title="Первая страница"
            >
                {icon("chevrons-left")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(current_page.get().saturating_sub(1).max(1))
                disabled=at_first
                title="Предыдущая страница"
            >
                {icon("chevron-left")}
            </button>
            <span class="pagination-info">
                {move || format!("{} / {} ({})", current_page.get(), total_pages.get(), total_count.get())}
            </span>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run((current_page.get() + 1).min(total_pages.get()))
                disabled=at_last
                title="Следующая страница"
            >
                {icon("chevron-right")}
            </button>
            <button
                class="pagination-btn"
                on:click=move |_| on_page_change.run(total_pages.get())
                disabled=at_last
                title="Последняя страница"
            >
                {icon("chevrons-right")}
            </button>
            <select
                class="page-size-select"
                on:change=move |ev| {
                    if let Ok(size) = event_target_value(&ev).parse::<usize>() {
                        on_page_size_change.run(size);
                    }
                }
                prop:value=move || page_size.get().to_string()
            >
                {PAGE_SIZE_OPTIONS
                    .iter()
                    .map(|&size| {
                        view! {
                            <option value=size.to_string() selected=move || page_size.get() == size>
                                {size.to_string()}
                            </option>
                        }
                    })
                    .collect_view()}
            </select>
        </div>
    }
}
