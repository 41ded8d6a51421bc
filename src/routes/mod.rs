pub mod batches;

pub mod courses;

pub mod fees;

pub mod progression;

pub mod students;

pub use batches::configure_batch_routes;
pub use courses::configure_course_routes;
pub use fees::configure_fee_routes;
pub use progression::configure_progression_routes;
pub use students::configure_student_routes;
