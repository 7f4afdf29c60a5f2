pub mod capability;
pub mod commands;
pub mod controller;
pub mod controller_registry;
pub mod events;
pub mod platform;
pub mod power;
pub mod settings;
pub mod trigger;
