pub mod memory;
pub mod user;
pub mod work;

pub use memory::InMemoryStore;
pub use user::PostgresUserRepository;
pub use work::PostgresWorkRepository;
