pub mod lookup;
pub mod memory;
pub mod postgres;

pub use lookup::{IdentityLookup, LookupError, LookupResult};
pub use memory::InMemoryIdentityLookup;
pub use postgres::PgIdentityLookup;
