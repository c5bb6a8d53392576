pub mod api;
pub mod config;
pub mod constants;
pub mod dates;
pub mod error;
pub mod goals;
pub mod roulette_engine;
pub mod shared_roulette;
pub mod tickets;

#[cfg(test)]
mod test_support;
