pub mod expiring_store;
