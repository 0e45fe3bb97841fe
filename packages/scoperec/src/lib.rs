pub mod error;
pub mod export;
pub mod framer;
pub mod reassemble;
pub mod record_file;
pub mod types;

pub use error::{RecordError, Result};
pub use framer::{CaptureMode, RecordFramer};
pub use reassemble::reassemble;
pub use types::{DecodedRow, Frame, RecordTable};
