use anyhow::Result;
use chrono::Utc;
use sea_orm::entity::prelude::*;
use sea_orm::{ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};

/// Запись любой коллекции: тело хранится JSON-строкой
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "records")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub collection: String,
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Порядок вставки внутри коллекции
    pub position: i64,
    pub body: String,
    pub is_deleted: bool,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Активные записи коллекции в порядке вставки
pub async fn list_active(conn: &DatabaseConnection, collection: &str) -> Result<Vec<Model>> {
    let rows = Entity::find()
        .filter(Column::Collection.eq(collection))
        .filter(Column::IsDeleted.eq(false))
        .order_by_asc(Column::Position)
        .all(conn)
        .await?;
    Ok(rows)
}

/// Строка по ключу, включая помеченные на удаление
pub async fn find(conn: &DatabaseConnection, collection: &str, id: &str) -> Result<Option<Model>> {
    let row = Entity::find_by_id((collection.to_string(), id.to_string()))
        .one(conn)
        .await?;
    Ok(row)
}

pub async fn count_active(conn: &DatabaseConnection, collection: &str) -> Result<u64> {
    let count = Entity::find()
        .filter(Column::Collection.eq(collection))
        .filter(Column::IsDeleted.eq(false))
        .count(conn)
        .await?;
    Ok(count)
}

async fn next_position(conn: &DatabaseConnection, collection: &str) -> Result<i64> {
    let last = Entity::find()
        .filter(Column::Collection.eq(collection))
        .order_by_desc(Column::Position)
        .one(conn)
        .await?;
    Ok(last.map(|m| m.position + 1).unwrap_or(0))
}

/// Добавить запись в конец коллекции
///
/// Строка с тем же ключом, помеченная на удаление, восстанавливается с новым телом.
pub async fn insert(conn: &DatabaseConnection, collection: &str, id: &str, body: String) -> Result<()> {
    let now = Utc::now().to_rfc3339();
    let position = next_position(conn, collection).await?;

    if let Some(existing) = find(conn, collection, id).await? {
        let mut active: ActiveModel = existing.into();
        active.body = Set(body);
        active.position = Set(position);
        active.is_deleted = Set(false);
        active.created_at = Set(now.clone());
        active.updated_at = Set(now);
        active.update(conn).await?;
        return Ok(());
    }

    let active = ActiveModel {
        collection: Set(collection.to_string()),
        id: Set(id.to_string()),
        position: Set(position),
        body: Set(body),
        is_deleted: Set(false),
        created_at: Set(now.clone()),
        updated_at: Set(now),
    };
    active.insert(conn).await?;
    tracing::debug!("Inserted record: collection={}, id={}", collection, id);
    Ok(())
}

/// Заменить тело записи, позиция не меняется
pub async fn update_body(conn: &DatabaseConnection, existing: Model, body: String) -> Result<()> {
    let mut active: ActiveModel = existing.into();
    active.body = Set(body);
    active.updated_at = Set(Utc::now().to_rfc3339());
    active.update(conn).await?;
    Ok(())
}

/// Пометить запись удаленной; `false`, если активной записи нет
pub async fn soft_delete(conn: &DatabaseConnection, collection: &str, id: &str) -> Result<bool> {
    let existing = match find(conn, collection, id).await? {
        Some(m) if !m.is_deleted => m,
        _ => return Ok(false),
    };
    let mut active: ActiveModel = existing.into();
    active.is_deleted = Set(true);
    active.updated_at = Set(Utc::now().to_rfc3339());
    active.update(conn).await?;
    tracing::debug!("Soft-deleted record: collection={}, id={}", collection, id);
    Ok(true)
}
