pub mod memory;
pub mod postgres;

pub use memory::InMemorySuperuserRepository;
pub use postgres::PostgresSuperuserRepository;
