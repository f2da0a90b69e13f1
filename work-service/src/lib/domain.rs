pub mod access;
pub mod authentication;
pub mod pagination;
pub mod user;
pub mod work;
