// Library exports for the decision engine
// The judge binary, the HTTP server and the replay tool all share this core

#[macro_use]
extern crate rocket;

pub mod bot;
pub mod config;
pub mod debug_logger;
pub mod handler;
pub mod protocol;
pub mod replay;
pub mod safety;
pub mod space;
pub mod targeting;
pub mod types;
pub mod view;

#[cfg(test)]
mod test_support;
