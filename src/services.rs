// src/services.rs

pub mod assets;
pub mod document_service;
pub mod quote_service;
