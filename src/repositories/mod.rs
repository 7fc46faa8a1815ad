use sea_orm::DatabaseConnection;
use std::sync::Arc;

pub mod production_repository;
pub mod storage_repository;

pub use production_repository::{ProductionRepository, ReportFilter, ReportFilterMode};
pub use storage_repository::{SortComposition, StorageRepository, StorageRow, StorageSearch};

/// Zero-based index of a 1-based `page` when its first row lies within
/// `total`. `None` for pages past the end, including offsets that overflow.
pub(crate) fn page_index(page: u64, page_size: u64, total: u64) -> Option<u64> {
    let index = page.saturating_sub(1);
    index
        .checked_mul(page_size)
        .filter(|offset| *offset < total)
        .map(|_| index)
}

pub trait Repository {
    fn get_db(&self) -> &DatabaseConnection;
}

#[derive(Debug, Clone)]
pub struct BaseRepository {
    db: Arc<DatabaseConnection>,
}

impl BaseRepository {
    pub fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }
}

impl Repository for BaseRepository {
    fn get_db(&self) -> &DatabaseConnection {
        &self.db
    }
}

#[cfg(test)]
mod tests {
    use super::page_index;

    #[test]
    fn page_index_stops_at_the_last_row() {
        assert_eq!(page_index(1, 20, 41), Some(0));
        assert_eq!(page_index(3, 20, 41), Some(2));
        assert_eq!(page_index(4, 20, 41), None);
        assert_eq!(page_index(1, 20, 0), None);
    }

    #[test]
    fn page_index_overflow_is_past_the_end() {
        assert_eq!(page_index(i64::MAX as u64, 20, 6), None);
        assert_eq!(page_index(u64::MAX, 2, u64::MAX), None);
    }
}
