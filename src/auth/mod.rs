pub mod csrf;
pub mod gate;
pub mod middleware;
pub mod password;
pub mod session;
