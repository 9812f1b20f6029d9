pub mod health;
pub mod permissions;
pub mod security;

#[cfg(test)]
mod tests;
