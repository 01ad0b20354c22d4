pub mod file_dto;
pub mod uploaded_file_row;
