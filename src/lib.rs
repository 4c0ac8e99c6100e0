// Library exports for the Battlesnake bot
// The server binary and the integration tests share the core move logic through here

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod grid;
pub mod pathfinding;
pub mod safety;
pub mod types;
