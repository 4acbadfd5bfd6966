use leptos::prelude::*;

fn svg(paths: AnyView) -> AnyView {
    view! {
        <svg width="16" height="16" viewBox="0 0 24 24" fill="none" stroke="currentColor" stroke-width="2" stroke-linecap="round" stroke-linejoin="round" aria-hidden="true">
            {paths}
        </svg>
    }
    .into_any()
}

pub fn icon(name: &str) -> AnyView {
    match name {
        "plus" => svg(view! {
            <path d="M12 5v14"/>
            <path d="M5 12h14"/>
        }.into_any()),
        "refresh" => svg(view! {
            <path d="M21 12a9 9 0 1 1-3-6.7L21 8"/>
            <path d="M21 3v5h-5"/>
        }.into_any()),
        "delete" => svg(view! {
            <path d="M3 6h18"/>
            <path d="M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6"/>
            <path d="M8 6V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2"/>
        }.into_any()),
        "edit" => svg(view! {
            <path d="M12 20h9"/>
            <path d="M16.5 3.5a2.1 2.1 0 0 1 3 3L7 19l-4 1 1-4Z"/>
        }.into_any()),
        "x" => svg(view! {
            <path d="M18 6 6 18"/>
            <path d="m6 6 12 12"/>
        }.into_any()),
        "download" => svg(view! {
            <path d="M21 15v4a2 2 0 0 1-2 2H5a2 2 0 0 1-2-2v-4"/>
            <path d="m7 10 5 5 5-5"/>
            <path d="M12 15V3"/>
        }.into_any()),
        "chevron-left" => svg(view! { <path d="m15 18-6-6 6-6"/> }.into_any()),
        "chevron-right" => svg(view! { <path d="m9 18 6-6-6-6"/> }.into_any()),
        "chevrons-left" => svg(view! {
            <path d="m11 17-5-5 5-5"/>
            <path d="m18 17-5-5 5-5"/>
        }.into_any()),
        "chevrons-right" => svg(view! {
            <path d="m6 17 5-5-5-5"/>
            <path d="m13 17 5-5-5-5"/>
        }.into_any()),
        "check" => svg(view! { <path d="M20 6 9 17l-5-5"/> }.into_any()),
        "alert" => svg(view! {
            <circle cx="12" cy="12" r="10"/>
            <path d="M12 8v4"/>
            <path d="M12 16h.01"/>
        }.into_any()),
        _ => view! { <span></span> }.into_any(),
    }
}
