#[cfg(feature = "deepseek")]
pub mod deepseek;

#[cfg(feature = "google")]
pub mod google;
