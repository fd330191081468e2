pub mod feedback_dtos;
pub mod post_dtos;
// short aliases: `crate::dtos::post`, `crate::dtos::feedback`
pub use feedback_dtos as feedback;
pub use post_dtos as post;
