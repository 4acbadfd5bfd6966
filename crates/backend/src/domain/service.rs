//! Операции над коллекцией записей в БД
//!
//! Одна реализация обслуживает все коллекции: записи хранятся JSON-телом
//! в таблице `records`, а фильтр, поиск, сортировка и сводка считаются
//! тем же движком списков, что и на клиенте.

use contracts::domain::common::{RecordId, RecordRoot};
use contracts::shared::export::to_csv;
use contracts::shared::list::{matching, project, ListQuery, Projection, RecordStore, SummaryContext};
use sea_orm::DatabaseConnection;

use super::collection::Collection;
use crate::shared::data::record_storage::{self, Model};
use crate::shared::error::ApiError;

fn decode<T: Collection>(row: &Model) -> anyhow::Result<T> {
    let record = serde_json::from_str(&row.body).map_err(|e| {
        anyhow::anyhow!(
            "Corrupted record body: collection={}, id={}: {}",
            row.collection,
            row.id,
            e
        )
    })?;
    Ok(record)
}

fn encode<T: Collection>(record: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string(record)?)
}

/// Все активные записи в порядке вставки; нечитаемые строки пропускаются
pub async fn list_all<T: Collection>(conn: &DatabaseConnection) -> Result<Vec<T>, ApiError> {
    let rows = record_storage::list_active(conn, T::collection_name()).await?;
    let records = rows
        .iter()
        .filter_map(|row| match decode::<T>(row) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!("{}", e);
                None
            }
        })
        .collect();
    Ok(records)
}

async fn find_active<T: Collection>(
    conn: &DatabaseConnection,
    id: &str,
) -> Result<(Model, T), ApiError> {
    match record_storage::find(conn, T::collection_name(), id).await? {
        Some(row) if !row.is_deleted => {
            let record = decode::<T>(&row)?;
            Ok((row, record))
        }
        _ => Err(ApiError::NotFound(id.to_string())),
    }
}

pub async fn get_by_id<T: Collection>(conn: &DatabaseConnection, id: &str) -> Result<T, ApiError> {
    let (_, record) = find_active::<T>(conn, id).await?;
    Ok(record)
}

/// Создать запись; пустой идентификатор заменяется новым UUID
pub async fn create<T: Collection>(conn: &DatabaseConnection, mut record: T) -> Result<T, ApiError> {
    record.validate()?;
    if record.id().is_empty() {
        record.meta_mut().id = RecordId::new_v4();
    }
    let id = record.id().to_string();

    if let Some(existing) = record_storage::find(conn, T::collection_name(), &id).await? {
        if !existing.is_deleted {
            return Err(ApiError::Conflict(id));
        }
    }

    record.meta_mut().touch();
    record.meta_mut().version = 0;
    record_storage::insert(conn, T::collection_name(), &id, encode(&record)?).await?;
    tracing::info!("Created {} {}", T::collection_name(), id);
    Ok(record)
}

/// Полная замена (PUT): дата создания и версия берутся из сохраненной записи
pub async fn replace<T: Collection>(
    conn: &DatabaseConnection,
    id: &str,
    mut record: T,
) -> Result<T, ApiError> {
    let (row, existing) = find_active::<T>(conn, id).await?;
    record.validate()?;

    let meta = record.meta_mut();
    meta.id = existing.id().clone();
    meta.created_at = existing.meta().created_at;
    meta.version = existing.meta().version + 1;
    meta.touch();

    record_storage::update_body(conn, row, encode(&record)?).await?;
    tracing::info!("Replaced {} {}", T::collection_name(), id);
    Ok(record)
}

/// Частичное обновление (PATCH) по правилам хранилища списка
pub async fn patch<T: Collection>(
    conn: &DatabaseConnection,
    id: &str,
    patch: T::Patch,
) -> Result<T, ApiError> {
    let (row, existing) = find_active::<T>(conn, id).await?;
    let record_id = existing.id().clone();

    let mut store = RecordStore::with_records(vec![existing]);
    let updated = store.update(&record_id, patch)?;
    updated.validate()?;

    record_storage::update_body(conn, row, encode(&updated)?).await?;
    tracing::info!("Patched {} {}", T::collection_name(), id);
    Ok(updated)
}

/// Мягкое удаление; повторное удаление дает `NotFound`
pub async fn delete<T: Collection>(conn: &DatabaseConnection, id: &str) -> Result<(), ApiError> {
    if record_storage::soft_delete(conn, T::collection_name(), id).await? {
        tracing::info!("Deleted {} {}", T::collection_name(), id);
        Ok(())
    } else {
        Err(ApiError::NotFound(id.to_string()))
    }
}

/// Страница списка с учетом фильтров, поиска и сортировки
pub async fn list_page<T: Collection>(
    conn: &DatabaseConnection,
    query: &ListQuery,
) -> Result<Projection<T>, ApiError> {
    let records = list_all::<T>(conn).await?;
    Ok(project(&records, query))
}

/// Сводка по всем записям коллекции (фильтры не учитываются)
pub async fn summary<T: Collection>(
    conn: &DatabaseConnection,
    context: &SummaryContext,
) -> Result<T::Snapshot, ApiError> {
    let records = list_all::<T>(conn).await?;
    Ok(T::summarize(&records, context))
}

/// CSV всех записей, подходящих под фильтры и поиск, в порядке сортировки
pub async fn export_csv<T: Collection>(
    conn: &DatabaseConnection,
    query: &ListQuery,
) -> Result<String, ApiError> {
    let records = list_all::<T>(conn).await?;
    Ok(to_csv(&matching(&records, query))?)
}

/// Добавить записи начального набора, которых еще нет в коллекции
pub async fn insert_test_data<T: Collection>(conn: &DatabaseConnection) -> Result<usize, ApiError> {
    let mut inserted = 0;
    for record in T::default_records() {
        let id = record.id().to_string();
        let exists = record_storage::find(conn, T::collection_name(), &id)
            .await?
            .map(|row| !row.is_deleted)
            .unwrap_or(false);
        if exists {
            continue;
        }
        record_storage::insert(conn, T::collection_name(), &id, encode(&record)?).await?;
        inserted += 1;
    }
    tracing::info!("Seeded {} record(s) into {}", inserted, T::collection_name());
    Ok(inserted)
}

/// Заполнить коллекцию начальным набором, если она пуста
pub async fn seed_if_empty<T: Collection>(conn: &DatabaseConnection) -> anyhow::Result<usize> {
    if record_storage::count_active(conn, T::collection_name()).await? > 0 {
        return Ok(0);
    }
    insert_test_data::<T>(conn)
        .await
        .map_err(|e| anyhow::anyhow!("Seeding {} failed: {}", T::collection_name(), e))
}
