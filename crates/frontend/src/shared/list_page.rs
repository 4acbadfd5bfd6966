//! Универсальная страница-список
//!
//! Одна реализация для всех коллекций: карточки сводки, поиск, фильтры,
//! сортировка по заголовкам, страницы, удаление, выгрузка, формы создания и правки.
//! Страница домена передает только описание колонок, показателей и полей.

use contracts::domain::common::{DefaultDataset, RecordId};
use contracts::shared::error::ListError;
use contracts::shared::export::{
    to_csv, write_table, Block, DocumentModel, DocumentTemplate, Exportable,
};
use contracts::shared::list::{matching, ListRecord, ListSession, Summarize, SummaryContext};
use leptos::prelude::*;
use leptos::task::spawn_local;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::rc::Rc;

use super::components::{
    FilterSelect, NotificationBar, PaginationControls, SearchInput, StatCard, StatTone,
};
use super::data_source::DataSource;
use super::export::{download_bytes, download_text, render_docx, render_pdf, CSV_MIME, DOCX_MIME, PDF_MIME};
use super::form::{build_patch, build_record, record_to_form, FieldKind, FormField, FORM_ERROR_KEY};
use super::icons::icon;
use super::list_utils::{distinct_values, sort_indicator};
use super::session::{create_record, load, remove_record, update_record};
use super::storage::RecordRepository;

/// Запись, для которой строится страница-список
pub trait PageRecord: Summarize + Exportable + DefaultDataset {}

impl<T: Summarize + Exportable + DefaultDataset> PageRecord for T {}

// ============================================================================
// Описание страницы
// ============================================================================

/// Колонка таблицы; `key` - поле записи для сортировки
pub struct Column<T> {
    pub key: &'static str,
    pub title: &'static str,
    pub sortable: bool,
    pub render: fn(&T) -> String,
}

impl<T> Column<T> {
    pub const fn new(key: &'static str, title: &'static str, render: fn(&T) -> String) -> Self {
        Self {
            key,
            title,
            sortable: true,
            render,
        }
    }

    pub const fn unsortable(mut self) -> Self {
        self.sortable = false;
        self
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Column<T> {}

fn neutral_tone<S>(_: &S) -> StatTone {
    StatTone::Neutral
}

/// Карточка сводки
pub struct Stat<S> {
    pub label: &'static str,
    pub value: fn(&S) -> String,
    pub tone: fn(&S) -> StatTone,
}

impl<S> Stat<S> {
    pub const fn new(label: &'static str, value: fn(&S) -> String) -> Self {
        Self {
            label,
            value,
            tone: neutral_tone::<S>,
        }
    }

    pub const fn with_tone(mut self, tone: fn(&S) -> StatTone) -> Self {
        self.tone = tone;
        self
    }
}

impl<S> Clone for Stat<S> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<S> Copy for Stat<S> {}

#[derive(Clone, Copy)]
pub enum FacetOptions {
    /// Перечисление (код, подпись)
    Fixed(fn() -> Vec<(String, String)>),
    /// Различные значения поля в загруженных записях
    FromRecords,
}

/// Фильтр по одному полю
#[derive(Clone, Copy)]
pub struct Facet {
    pub key: &'static str,
    pub label: &'static str,
    pub options: FacetOptions,
}

impl Facet {
    pub const fn fixed(key: &'static str, label: &'static str, options: fn() -> Vec<(String, String)>) -> Self {
        Self {
            key,
            label,
            options: FacetOptions::Fixed(options),
        }
    }

    pub const fn from_records(key: &'static str, label: &'static str) -> Self {
        Self {
            key,
            label,
            options: FacetOptions::FromRecords,
        }
    }
}

/// Действие над строкой через частичное обновление (например, "Одобрить")
pub struct RowAction<T: ListRecord> {
    pub label: &'static str,
    pub visible: fn(&T) -> bool,
    pub patch: fn(&T) -> T::Patch,
}

impl<T: ListRecord> Clone for RowAction<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ListRecord> Copy for RowAction<T> {}

pub struct ListPageConfig<T: PageRecord> {
    pub columns: Vec<Column<T>>,
    pub stats: Vec<Stat<T::Snapshot>>,
    pub facets: Vec<Facet>,
    pub form: Vec<FormField>,
    /// Перестроить JSON формы перед разбором записи
    pub prepare: Option<fn(&mut Map<String, Value>)>,
    /// Разложить JSON записи по полям формы правки
    pub spread: Option<fn(&mut Map<String, Value>)>,
    pub row_actions: Vec<RowAction<T>>,
    /// Документ по одной записи (PDF/Word в строке таблицы)
    pub document: Option<fn(&T, DocumentTemplate) -> DocumentModel>,
}

impl<T: PageRecord> ListPageConfig<T> {
    pub fn new(columns: Vec<Column<T>>) -> Self {
        Self {
            columns,
            stats: Vec::new(),
            facets: Vec::new(),
            form: Vec::new(),
            prepare: None,
            spread: None,
            row_actions: Vec::new(),
            document: None,
        }
    }

    pub fn stats(mut self, stats: Vec<Stat<T::Snapshot>>) -> Self {
        self.stats = stats;
        self
    }

    pub fn facets(mut self, facets: Vec<Facet>) -> Self {
        self.facets = facets;
        self
    }

    pub fn form(mut self, form: Vec<FormField>) -> Self {
        self.form = form;
        self
    }

    pub fn prepare(mut self, prepare: fn(&mut Map<String, Value>)) -> Self {
        self.prepare = Some(prepare);
        self
    }

    pub fn spread(mut self, spread: fn(&mut Map<String, Value>)) -> Self {
        self.spread = Some(spread);
        self
    }

    pub fn row_actions(mut self, actions: Vec<RowAction<T>>) -> Self {
        self.row_actions = actions;
        self
    }

    pub fn document(mut self, document: fn(&T, DocumentTemplate) -> DocumentModel) -> Self {
        self.document = Some(document);
        self
    }
}

// ============================================================================
// Выгрузка
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ExportFormat {
    Csv,
    Pdf,
    Docx,
}

fn export_document(model: &DocumentModel, filename: &str, format: ExportFormat) -> Result<(), ListError> {
    let result = match format {
        // В CSV попадает первая таблица документа
        ExportFormat::Csv => {
            let (headers, rows) = model
                .blocks
                .iter()
                .find_map(|block| match block {
                    Block::Table(table) => Some((table.headers.as_slice(), table.rows.as_slice())),
                    _ => None,
                })
                .unwrap_or((&[], &[]));
            let content = write_table(headers, rows)?;
            download_text(&content, &format!("{}.csv", filename), CSV_MIME)
        }
        ExportFormat::Pdf => download_bytes(&render_pdf(model)?, &format!("{}.pdf", filename), PDF_MIME),
        ExportFormat::Docx => download_bytes(&render_docx(model)?, &format!("{}.docx", filename), DOCX_MIME),
    };
    result.map_err(ListError::persistence)
}

/// Выгрузить видимые после фильтра и поиска записи (в текущем порядке, все страницы)
fn export_records<T: PageRecord>(session: &ListSession<T>, format: ExportFormat) -> Result<(), ListError> {
    let records = matching(session.records(), session.query());
    let filename = T::full_name();
    match format {
        ExportFormat::Csv => {
            let content = to_csv(&records)?;
            download_text(&content, &format!("{}.csv", filename), CSV_MIME).map_err(ListError::persistence)
        }
        _ => {
            let model = DocumentModel::from_records(T::list_name(), DocumentTemplate::default(), &records);
            export_document(&model, &filename, format)
        }
    }
}

fn confirm(message: &str) -> bool {
    web_sys::window()
        .and_then(|w| w.confirm_with_message(message).ok())
        .unwrap_or(false)
}

/// Открытая форма: новая запись или правка существующей
#[derive(Debug, Clone, PartialEq)]
enum FormMode {
    Create,
    Edit(RecordId),
}

fn empty_form(fields: &[FormField]) -> HashMap<String, String> {
    fields
        .iter()
        .map(|f| (f.key.to_string(), f.initial_value()))
        .collect()
}

// ============================================================================
// Страница
// ============================================================================

/// Страница-список коллекции `T`
pub fn list_page<T: PageRecord>(config: ListPageConfig<T>) -> impl IntoView {
    let source = use_context::<RwSignal<DataSource>>()
        .map(|s| s.get_untracked())
        .unwrap_or_default();
    let repository: Rc<dyn RecordRepository<T>> = source.repository::<T>();
    let repository = StoredValue::new_local(repository);

    let session = RwSignal::new(ListSession::<T>::init(Vec::new(), SummaryContext::current()));
    let config = StoredValue::new(config);

    let reload = move || {
        let repo = repository.get_value();
        spawn_local(async move {
            if let Err(e) = load(&session, repo.as_ref()).await {
                log::warn!("{}: load failed: {}", T::collection_name(), e);
            }
        });
    };
    reload();

    let run_export = move |format: ExportFormat| {
        let result = session.with_untracked(|s| export_records(s, format));
        if let Err(e) = result {
            session.update(|s| s.notify_error(&e));
        }
    };

    // ------------------------------------------------------------------
    // Форма создания и правки
    // ------------------------------------------------------------------
    let form_mode = RwSignal::new(None::<FormMode>);
    let form_values = RwSignal::new(config.with_value(|c| empty_form(&c.form)));
    let saving = RwSignal::new(false);

    let close_form = move || {
        form_mode.set(None);
        session.update(|s| s.clear_field_errors());
    };

    let open_create = move || {
        if form_mode.get_untracked() == Some(FormMode::Create) {
            close_form();
            return;
        }
        form_values.set(config.with_value(|c| empty_form(&c.form)));
        form_mode.set(Some(FormMode::Create));
        session.update(|s| s.clear_field_errors());
    };

    let open_edit = move |record: &T| {
        form_values.set(config.with_value(|c| record_to_form(&c.form, record, c.spread)));
        form_mode.set(Some(FormMode::Edit(record.id().clone())));
        session.update(|s| s.clear_field_errors());
    };

    let submit = move || {
        let Some(mode) = form_mode.get_untracked() else {
            return;
        };
        let repo = repository.get_value();
        match mode {
            FormMode::Create => {
                let built = config.with_value(|c| {
                    form_values.with_untracked(|values| build_record::<T>(&c.form, values, c.prepare))
                });
                let record = match built {
                    Ok(record) => record,
                    Err(errors) => {
                        session.update(|s| s.notify_error(&ListError::Validation(errors)));
                        return;
                    }
                };
                saving.set(true);
                spawn_local(async move {
                    if create_record(&session, repo.as_ref(), record).await.is_ok() {
                        form_values.set(config.with_value(|c| empty_form(&c.form)));
                        form_mode.set(None);
                    }
                    saving.set(false);
                });
            }
            FormMode::Edit(id) => {
                let built = config.with_value(|c| {
                    form_values.with_untracked(|values| build_patch::<T>(&c.form, values, c.prepare))
                });
                let patch = match built {
                    Ok(patch) => patch,
                    Err(errors) => {
                        session.update(|s| s.notify_error(&ListError::Validation(errors)));
                        return;
                    }
                };
                saving.set(true);
                spawn_local(async move {
                    let saved = update_record(&session, repo.as_ref(), &id, patch).await.is_ok();
                    // Форму могли закрыть или открыть для другой записи, пока шел запрос
                    if saved && form_mode.try_get_untracked().flatten() == Some(FormMode::Edit(id)) {
                        form_mode.set(None);
                    }
                    saving.set(false);
                });
            }
        }
    };

    // Ошибки действий в строке не относятся к полям открытой формы
    let settle_row = move |result: Result<(), ListError>| {
        if let Err(e) = result {
            log::debug!("{}: row action failed: {}", T::collection_name(), e);
            if e.field_errors().is_some() {
                session.update(|s| s.clear_field_errors());
            }
        }
    };

    let field_error = move |key: &'static str| {
        move || {
            session.with(|s| s.field_errors().get(key).map(str::to_string)).map(|message| {
                view! { <div class="form__error">{message}</div> }
            })
        }
    };

    let form_view = move || {
        let fields = config.with_value(|c| c.form.clone());
        let inputs = fields
            .into_iter()
            .map(|field| {
                let key = field.key;
                let value = move || form_values.with(|v| v.get(key).cloned().unwrap_or_default());
                let set_value = move |text: String| {
                    form_values.update(|v| {
                        v.insert(key.to_string(), text);
                    })
                };
                let control = match field.kind {
                    FieldKind::Text => view! {
                        <input type="text" class="form__input" prop:value=value
                            on:input=move |ev| set_value(event_target_value(&ev)) />
                    }
                    .into_any(),
                    FieldKind::TextArea => view! {
                        <textarea class="form__input" rows="3" prop:value=value
                            on:input=move |ev| set_value(event_target_value(&ev))></textarea>
                    }
                    .into_any(),
                    FieldKind::Number => view! {
                        <input type="number" step="any" class="form__input" prop:value=value
                            on:input=move |ev| set_value(event_target_value(&ev)) />
                    }
                    .into_any(),
                    FieldKind::Date { .. } => view! {
                        <input type="date" class="form__input" prop:value=value
                            on:input=move |ev| set_value(event_target_value(&ev)) />
                    }
                    .into_any(),
                    FieldKind::Select(options) => view! {
                        <select class="form__input" prop:value=value
                            on:change=move |ev| set_value(event_target_value(&ev))>
                            {options()
                                .into_iter()
                                .map(|(code, caption)| view! { <option value=code>{caption}</option> })
                                .collect_view()}
                        </select>
                    }
                    .into_any(),
                };
                view! {
                    <label class="form__field">
                        <span class="form__label">{field.label}</span>
                        {control}
                        {field_error(key)}
                    </label>
                }
            })
            .collect_view();

        view! {
            <div class="form card">
                <h3 class="form__title">
                    {move || match form_mode.get() {
                        Some(FormMode::Edit(_)) => format!("Изменение: {}", T::element_name()),
                        _ => format!("Новая запись: {}", T::element_name()),
                    }}
                </h3>
                {field_error(FORM_ERROR_KEY)}
                <div class="form__grid">{inputs}</div>
                <div class="form__actions">
                    <button
                        class="button button--primary"
                        disabled=move || saving.get()
                        on:click=move |_| submit()
                    >
                        {icon("check")}
                        {move || if saving.get() { "Сохранение..." } else { "Сохранить" }}
                    </button>
                    <button
                        class="button button--secondary"
                        on:click=move |_| close_form()
                    >
                        "Отмена"
                    </button>
                </div>
            </div>
        }
    };

    // ------------------------------------------------------------------
    // Сводка и фильтры
    // ------------------------------------------------------------------
    let stats_view = move || {
        config
            .with_value(|c| c.stats.clone())
            .into_iter()
            .map(|stat| {
                let value = Signal::derive(move || session.with(|s| (stat.value)(s.summary())));
                let tone = Signal::derive(move || session.with(|s| (stat.tone)(s.summary())));
                view! { <StatCard label=stat.label.to_string() value=value tone=tone /> }
            })
            .collect_view()
    };

    let facets_view = move || {
        config
            .with_value(|c| c.facets.clone())
            .into_iter()
            .map(|facet| {
                let key = facet.key;
                let value = Signal::derive(move || session.with(|s| s.query().filter.get(key).to_string()));
                let on_change = Callback::new(move |code: String| session.update(|s| s.set_filter(key, &code)));
                let options = Memo::new(move |_| match facet.options {
                    FacetOptions::Fixed(options) => options(),
                    FacetOptions::FromRecords => session.with(|s| distinct_values(s.records(), key)),
                });
                move || {
                    view! {
                        <FilterSelect
                            label=facet.label
                            options=options.get()
                            value=value
                            on_change=on_change
                        />
                    }
                }
            })
            .collect_view()
    };

    // ------------------------------------------------------------------
    // Таблица
    // ------------------------------------------------------------------
    let header_view = move || {
        config
            .with_value(|c| c.columns.clone())
            .into_iter()
            .map(|column| {
                let key = column.key;
                if column.sortable {
                    view! {
                        <th
                            class="table__header-cell table__header-cell--sortable"
                            on:click=move |_| session.update(|s| s.toggle_sort(key))
                        >
                            {column.title}
                            {move || session.with(|s| sort_indicator(s.query().sort.as_ref(), key))}
                        </th>
                    }
                    .into_any()
                } else {
                    view! { <th class="table__header-cell">{column.title}</th> }.into_any()
                }
            })
            .collect_view()
    };

    let has_form = config.with_value(|c| !c.form.is_empty());

    let row_view = move |record: T| {
        let (columns, actions, document) =
            config.with_value(|c| (c.columns.clone(), c.row_actions.clone(), c.document));
        let id = record.id().clone();

        let cells = columns
            .iter()
            .map(|column| view! { <td class="table__cell">{(column.render)(&record)}</td> })
            .collect_view();

        let action_buttons = actions
            .into_iter()
            .filter(|action| (action.visible)(&record))
            .map(|action| {
                let id = id.clone();
                let current = record.clone();
                view! {
                    <button
                        class="button button--small"
                        on:click=move |_| {
                            let patch = (action.patch)(&current);
                            let id = id.clone();
                            let repo = repository.get_value();
                            spawn_local(async move {
                                let result = update_record(&session, repo.as_ref(), &id, patch).await;
                                settle_row(result.map(|_| ()));
                            });
                        }
                    >
                        {action.label}
                    </button>
                }
            })
            .collect_view();

        let document_buttons = document.map(|build| {
            let pdf_record = record.clone();
            let docx_record = record.clone();
            let filename = format!("{}_{}", T::collection_name(), id);
            let docx_filename = filename.clone();
            view! {
                <button
                    class="button button--small"
                    title="PDF"
                    on:click=move |_| {
                        let model = build(&pdf_record, DocumentTemplate::default());
                        if let Err(e) = export_document(&model, &filename, ExportFormat::Pdf) {
                            session.update(|s| s.notify_error(&e));
                        }
                    }
                >
                    "PDF"
                </button>
                <button
                    class="button button--small"
                    title="Word"
                    on:click=move |_| {
                        let model = build(&docx_record, DocumentTemplate::default());
                        if let Err(e) = export_document(&model, &docx_filename, ExportFormat::Docx) {
                            session.update(|s| s.notify_error(&e));
                        }
                    }
                >
                    "DOCX"
                </button>
            }
        });

        let edit_button = has_form.then(|| {
            let current = record.clone();
            view! {
                <button
                    class="button button--small"
                    title="Изменить"
                    on:click=move |_| open_edit(&current)
                >
                    {icon("edit")}
                </button>
            }
        });

        let delete_id = id.clone();
        view! {
            <tr class="table__row">
                {cells}
                <td class="table__cell table__cell--actions">
                    {action_buttons}
                    {document_buttons}
                    {edit_button}
                    <button
                        class="button button--small button--danger"
                        title="Удалить"
                        on:click=move |_| {
                            if !confirm("Удалить запись?") {
                                return;
                            }
                            let id = delete_id.clone();
                            let repo = repository.get_value();
                            spawn_local(async move {
                                let result = remove_record(&session, repo.as_ref(), &id).await;
                                let editing = form_mode.try_get_untracked().flatten();
                                if result.is_ok() && editing == Some(FormMode::Edit(id)) {
                                    form_mode.set(None);
                                }
                                settle_row(result);
                            });
                        }
                    >
                        {icon("delete")}
                    </button>
                </td>
            </tr>
        }
    };

    let body_view = move || {
        let items = session.with(|s| s.projection().items.clone());
        if items.is_empty() {
            let columns = config.with_value(|c| c.columns.len()) + 1;
            return view! {
                <tr>
                    <td class="table__cell table__cell--empty" colspan=columns.to_string()>
                        "Нет записей"
                    </td>
                </tr>
            }
            .into_any();
        }
        items.into_iter().map(|record| row_view(record)).collect_view().into_any()
    };

    view! {
        <div class="page">
            <div class="header">
                <h2 class="header__title">{T::list_name()}</h2>
                <div class="header__actions">
                    <Show when=move || has_form>
                        <button class="button button--primary" on:click=move |_| open_create()>
                            {icon("plus")}
                            "Добавить"
                        </button>
                    </Show>
                    <button class="button button--secondary" on:click=move |_| reload() title="Обновить">
                        {icon("refresh")}
                    </button>
                    <button class="button button--secondary" on:click=move |_| run_export(ExportFormat::Csv)>
                        {icon("download")}
                        "CSV"
                    </button>
                    <button class="button button--secondary" on:click=move |_| run_export(ExportFormat::Pdf)>
                        {icon("download")}
                        "PDF"
                    </button>
                    <button class="button button--secondary" on:click=move |_| run_export(ExportFormat::Docx)>
                        {icon("download")}
                        "Word"
                    </button>
                </div>
            </div>

            <NotificationBar
                notification=Signal::derive(move || session.with(|s| s.notification().cloned()))
                on_dismiss=Callback::new(move |_| session.update(|s| s.dismiss_notification()))
            />

            <div class="stats">{stats_view}</div>

            <Show when=move || form_mode.with(Option::is_some)>
                {form_view}
            </Show>

            <div class="toolbar">
                <SearchInput
                    value=Signal::derive(move || session.with(|s| s.query().search.clone()))
                    on_change=Callback::new(move |text: String| session.update(|s| s.set_search(&text)))
                />
                {facets_view}
                <button
                    class="button button--secondary"
                    on:click=move |_| session.update(|s| {
                        s.clear_filters();
                        s.set_search("");
                    })
                >
                    "Сбросить"
                </button>
                <Show when=move || session.with(|s| s.is_loading())>
                    <span class="toolbar__loading">"Загрузка..."</span>
                </Show>
            </div>

            <div class="table">
                <table class="table__data">
                    <thead>
                        <tr>
                            {header_view}
                            <th class="table__header-cell">"Действия"</th>
                        </tr>
                    </thead>
                    <tbody>{body_view}</tbody>
                </table>
            </div>

            <PaginationControls
                current_page=Signal::derive(move || session.with(|s| s.projection().page_number))
                total_pages=Signal::derive(move || session.with(|s| s.projection().total_pages))
                total_count=Signal::derive(move || session.with(|s| s.projection().total_matching))
                page_size=Signal::derive(move || session.with(|s| s.projection().page_size))
                on_page_change=Callback::new(move |page: usize| session.update(|s| s.set_page(page)))
                on_page_size_change=Callback::new(move |size: usize| session.update(|s| s.set_page_size(size)))
            />
        </div>
    }
}
