mod client_state_table;
mod zone_store;

pub use client_state_table::ClientStateTable;
pub use zone_store::ZoneStore;
