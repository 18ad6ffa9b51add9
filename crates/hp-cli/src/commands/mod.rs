pub mod dispatch;
pub mod extract;
pub mod generate;
pub mod inspect;
pub mod integrate;
pub mod operations;
pub mod schema;

#[cfg(test)]
pub(crate) mod fixtures;
