#[cfg(test)]
pub mod profile_api_tests;
