pub mod activities;
pub mod data;
pub mod errors;
pub mod events;
pub mod machines;
pub mod models;
