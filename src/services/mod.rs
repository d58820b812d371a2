pub mod courses;
pub mod feedback;
pub mod questions;
pub mod submissions;
pub mod uploads;

#[cfg(test)]
pub(crate) mod testing;

pub use courses::CourseService;
pub use feedback::FeedbackService;
pub use questions::QuestionService;
pub use submissions::SubmissionService;
pub use uploads::UploadService;
