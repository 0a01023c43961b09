pub mod api;
pub mod init;
pub mod invalid_req;
pub mod runtime;
pub mod upstream;
