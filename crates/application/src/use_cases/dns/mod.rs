mod rebind_name_resolver;

pub use rebind_name_resolver::{RebindNameResolver, REBIND_TTL};
