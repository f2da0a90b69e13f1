pub mod register;
pub mod token;
