use crate::shared::icons::icon;
use contracts::shared::list::{Notification, NotificationKind};
use leptos::prelude::*;

/// Закрываемое уведомление об успехе или ошибке операции
#[component]
pub fn NotificationBar(
    #[prop(into)]
    notification: Signal<Option<Notification>>,
    on_dismiss: Callback<()>,
) -> impl IntoView {
    move || {
        notification.get().map(|n| {
            let (class, icon_name) = match n.kind {
                NotificationKind::Success => ("notification notification--success", "check"),
                NotificationKind::Error => ("notification notification--error", "alert"),
            };
            view! {
                <div class=class role="status">
                    {icon(icon_name)}
                    <span class="notification__message">{n.message}</span>
                    <button class="notification__close" on:click=move |_| on_dismiss.run(()) title="Закрыть">
                        {icon("x")}
                    </button>
                </div>
            }
        })
    }
}
