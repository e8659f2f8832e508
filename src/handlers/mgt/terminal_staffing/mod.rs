// handlers/mgt/terminal_staffing/mod.rs - Terminal staffing management handlers

pub mod delete; // ANY /api/mgt/terminal_staffing/delete

pub use delete::delete as staffing_delete;
