pub mod console;
pub mod courses;
