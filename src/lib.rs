//! Registro de vehículos
//!
//! API HTTP para vehículos, conductores y el registro de entradas y salidas
//! de cada vehículo con su kilometraje.

pub mod config;
pub mod controllers;
pub mod database;
pub mod dto;
pub mod middleware;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod state;
pub mod utils;
