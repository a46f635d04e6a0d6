// src/models.rs

pub mod quote;
