pub mod production;
pub mod storages;
pub mod work_orders;

/// One page of results together with what the paging metadata needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
    /// 1-based
    pub page: u64,
    pub page_size: u64,
}
