pub mod actions;
pub mod ai;
pub mod ai_types;
pub mod history;
