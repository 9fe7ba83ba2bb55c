//! Rebind DNS Infrastructure Layer
pub mod dns;
