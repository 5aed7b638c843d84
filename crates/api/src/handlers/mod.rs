pub mod assets;
pub mod history;
pub mod meta;
pub mod reports;
pub mod transactions;
