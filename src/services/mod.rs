//! Services module
//!
//! Este módulo contiene la lógica de negocio que compone el motor puro de
//! scheduling con la capa de persistencia.

pub mod scheduling_service;

pub use scheduling_service::*;
