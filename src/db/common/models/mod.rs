pub mod swap_models;
