pub mod admin_controller;
pub mod file_controller;
pub mod health_controller;
