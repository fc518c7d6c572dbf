pub mod access;
pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod repository;
pub mod service;
