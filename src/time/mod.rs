pub mod systick;

pub use systick::Systick;
