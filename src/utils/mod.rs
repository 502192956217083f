pub mod csv_export;
pub mod error;
pub mod jwt;
pub mod password;
pub mod swagger_doc;
pub mod tabular;
