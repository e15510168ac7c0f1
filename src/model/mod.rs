pub mod bands;
pub mod interpretation;
pub mod record;
pub mod scores;
pub mod thresholds;
