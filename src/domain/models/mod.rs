pub mod file;
pub mod uploaded_file;
