//! StockGuard: warehouse inventory tracking with low-stock alerts.
//!
//! Requests flow through [`service::InventoryService`], which validates with
//! [`validation::ProductValidator`], persists through a
//! [`repository::ProductRepository`], and derives alert state with [`alerts`].

pub mod alerts;
pub mod config;
pub mod database;
pub mod dtos;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repository;
pub mod routes;
pub mod service;
pub mod state;
pub mod telemetry;
pub mod validation;
