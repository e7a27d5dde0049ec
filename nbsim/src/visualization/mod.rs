pub mod sink;
#[cfg(feature = "viewer")]
pub mod viewer2d;
