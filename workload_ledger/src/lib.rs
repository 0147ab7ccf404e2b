pub mod document;
pub mod ledger;
pub mod model;
pub mod slot_time;
