pub mod app;
pub mod cli;
pub mod config;
pub mod country;
pub mod interactive;
pub mod loader;
pub mod output;
pub mod pipeline;
pub mod view;

#[cfg(test)]
mod tests;
