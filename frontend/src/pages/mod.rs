pub mod dashboard;
pub mod roulette;
