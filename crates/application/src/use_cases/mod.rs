pub mod dns;

pub use dns::{RebindNameResolver, REBIND_TTL};
