pub mod bit_buffer2;
pub mod buffer2;
pub mod file_format;
pub mod log_setup;
pub mod serde_format;

pub use bit_buffer2::BitBuffer2;
pub use buffer2::Buffer2;
pub use file_format::{FileExtensionError, FileFormat};
pub use serde_format::{deserialize, serialize, SerdeFormatError, SerdeFormatResult};
