pub mod context;
pub mod diagnose;
pub mod history;
pub mod page;
pub mod render;
