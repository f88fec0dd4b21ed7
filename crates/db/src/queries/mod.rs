pub mod channels;
pub mod videos;
