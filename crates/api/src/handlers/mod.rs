pub mod assignment;
pub mod comments;
pub mod dashboard;
pub mod emails;
pub mod navigation;
pub mod submission;
pub mod tickets;
pub mod track;
pub mod users;
