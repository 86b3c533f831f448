pub mod models;

pub use models::user::User;

#[cfg(test)]
mod tests;
