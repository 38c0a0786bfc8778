//! Database repository layer

pub mod attempt_repo;
pub mod exam_repo;
pub mod user_repo;

pub use attempt_repo::AttemptRepository;
pub use exam_repo::ExamRepository;
pub use user_repo::UserRepository;
