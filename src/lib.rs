pub mod db;

pub mod expenses;
pub mod ledger;
pub mod prices;
pub mod pumps;
pub mod staff;
pub mod summary;

pub mod constants;
pub mod errors;
pub mod schema;

pub use ledger::*;
pub use summary::*;
