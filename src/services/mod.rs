pub mod batches;
pub mod courses;
pub mod fees;
pub mod progression;
pub mod students;

pub use batches::BatchService;
pub use courses::CourseService;
pub use fees::FeeService;
pub use progression::ProgressionService;
pub use students::StudentService;
