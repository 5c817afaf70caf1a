pub mod config;
pub mod logging;

pub mod check;
pub mod import;
pub mod listing;
pub mod naming;
pub mod notify;
pub mod page;
pub mod storage;
pub mod sync;
pub mod table;
pub mod utm;
pub mod verify;
