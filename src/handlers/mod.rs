//! HTTP handlers

pub mod health;
pub mod submit;
pub mod map;

#[cfg(test)]
mod tests;
