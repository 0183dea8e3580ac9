//! Application layer - Use cases over the domain
//!
//! - Ports: interfaces to external systems (the text generator)
//! - Services: the quest gateway and the game session (view router)
//! - DTOs: screens and request bodies exchanged with the browser

pub mod dto;
pub mod ports;
pub mod services;
