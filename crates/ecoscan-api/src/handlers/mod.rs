pub mod eco_score;
pub mod folder_status;
pub mod health;
pub mod image_upload;
