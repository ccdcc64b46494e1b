pub mod draw;
pub mod edit;
pub mod junction;
pub mod opening;
pub mod query;
