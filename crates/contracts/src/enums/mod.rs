pub mod store_name;
