pub mod auth;

pub mod students;

pub mod assignments;

pub mod admin;

pub mod videos;

pub mod books;

pub mod chat;

pub mod uploads;

pub mod system;

pub use admin::configure_admin_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use books::configure_book_routes;
pub use chat::configure_chat_routes;
pub use students::configure_student_routes;
pub use system::configure_system_routes;
pub use uploads::configure_upload_routes;
pub use videos::configure_video_routes;
