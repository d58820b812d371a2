pub mod actions;

pub mod blobs;

pub mod course_management;

pub mod questions;

pub mod submissions;

pub mod uploads;

pub use actions::configure_action_routes;
pub use blobs::configure_blob_routes;
pub use course_management::configure_course_management_routes;
pub use questions::configure_question_routes;
pub use submissions::configure_submission_routes;
pub use uploads::configure_upload_routes;
