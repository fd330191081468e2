pub mod feedback;
pub mod post;
