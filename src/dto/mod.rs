pub mod production;
pub mod storage;
pub mod work_order;
