pub mod config;
pub mod errors;
pub mod graph;
pub mod logger;
pub mod mapping;
pub mod pipeline;
pub mod source;

#[cfg(test)]
mod test_utilities;

#[cfg(test)]
mod tests;
