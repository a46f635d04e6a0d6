// src/handlers.rs

pub mod quotes;
