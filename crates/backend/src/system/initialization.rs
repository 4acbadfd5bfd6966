use anyhow::Result;
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a002_product::Product;
use contracts::domain::a003_leave_request::LeaveRequest;
use contracts::domain::a004_overtime::OvertimeEntry;
use contracts::domain::a005_quotation::Quotation;
use contracts::domain::a006_spare_part::SparePart;
use contracts::domain::a007_work_order::WorkOrder;
use sea_orm::DatabaseConnection;

use crate::domain::collection::Collection;
use crate::domain::service;
use crate::shared::config::Config;

async fn seed<T: Collection>(conn: &DatabaseConnection) -> Result<usize> {
    let inserted = service::seed_if_empty::<T>(conn).await?;
    if inserted > 0 {
        tracing::info!("Collection '{}' was empty, seeded {} record(s)", T::collection_name(), inserted);
    }
    Ok(inserted)
}

/// Заполнить пустые коллекции начальными наборами (если включено в [seed])
pub async fn seed_empty_collections(conn: &DatabaseConnection, config: &Config) -> Result<usize> {
    if !config.seed.on_empty {
        tracing::info!("Seeding disabled by configuration");
        return Ok(0);
    }

    let total = seed::<Equipment>(conn).await?
        + seed::<Product>(conn).await?
        + seed::<LeaveRequest>(conn).await?
        + seed::<OvertimeEntry>(conn).await?
        + seed::<Quotation>(conn).await?
        + seed::<SparePart>(conn).await?
        + seed::<WorkOrder>(conn).await?;
    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::config::parse_config;
    use crate::shared::data::db::connect_in_memory;
    use contracts::domain::common::DefaultDataset;

    #[tokio::test]
    async fn test_seed_respects_config() {
        let conn = connect_in_memory().await.unwrap();
        let disabled = parse_config("[database]\npath = \"a.db\"\n[seed]\non_empty = false\n").unwrap();
        assert_eq!(seed_empty_collections(&conn, &disabled).await.unwrap(), 0);

        let enabled = parse_config("[database]\npath = \"a.db\"\n").unwrap();
        let first = seed_empty_collections(&conn, &enabled).await.unwrap();
        assert!(first >= WorkOrder::default_records().len());
        assert_eq!(seed_empty_collections(&conn, &enabled).await.unwrap(), 0);
    }
}
