pub mod uploaded_file_dto;
