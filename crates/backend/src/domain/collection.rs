use contracts::domain::common::DefaultDataset;
use contracts::shared::export::Exportable;
use contracts::shared::list::Summarize;

/// Коллекция, которую обслуживает REST API
///
/// Имя маршрута берется из `RecordRoot::collection_name`.
pub trait Collection: Summarize + Exportable + DefaultDataset {}

impl<T: Summarize + Exportable + DefaultDataset> Collection for T {}
