pub mod coords;
pub mod fare;
pub mod route;
