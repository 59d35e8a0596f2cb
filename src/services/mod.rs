pub mod admin;
pub mod assignments;
pub mod auth;
pub mod books;
pub mod chat;
pub mod students;
pub mod uploads;
pub mod videos;

pub use admin::AdminService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use books::BookService;
pub use chat::ChatService;
pub use students::StudentService;
pub use uploads::UploadService;
pub use videos::VideoService;
