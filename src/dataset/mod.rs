pub mod load;
pub mod store;
