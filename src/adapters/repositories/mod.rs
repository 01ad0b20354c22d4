mod pg_uploaded_file_repository;

pub use pg_uploaded_file_repository::PgUploadedFileRepository;
