//! Database entities.
//!
//! Master data (products, warehouses, employees), stock bookkeeping (stocks and
//! the per-warehouse storage rows) and the production aggregate
//! (report → detail → defect).

pub mod defect_detail;
pub mod employee;
pub mod product;
pub mod production_detail;
pub mod production_management;
pub mod stock;
pub mod storage;
pub mod warehouse;
pub mod work_order;
