pub mod uploaded_file_repository;
