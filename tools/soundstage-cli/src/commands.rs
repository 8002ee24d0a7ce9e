pub mod captions;
pub mod link;
pub mod play;
pub mod scenes;
