pub mod comment;
pub mod faq;
pub mod feedback;
pub mod post;
pub mod report;
pub mod user;
pub mod vote;
