pub mod assignments;
pub mod auth;
pub mod classes;
pub mod enrollments;
pub mod files;
pub mod materials;
pub mod submissions;
pub mod system;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use classes::ClassService;
pub use enrollments::EnrollmentService;
pub use files::FileService;
pub use materials::MaterialService;
pub use submissions::SubmissionService;
pub use system::SystemService;
