pub mod eco_score;
pub mod upload;
