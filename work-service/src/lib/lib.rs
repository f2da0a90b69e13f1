pub mod config;
pub mod domain;
pub mod inbound;
pub mod outbound;

pub use domain::access;
pub use domain::authentication;
pub use domain::user;
pub use domain::work;
pub use outbound::repositories;
