pub mod rng;
pub mod spatial;
pub mod time;
