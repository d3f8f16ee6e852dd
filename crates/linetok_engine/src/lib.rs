//! Linetok engine: line tokenization, device inventory and run driver.
mod devices;
mod driver;
mod error;
mod persist;
mod token;

pub use devices::{DeviceInventory, FixedInventory, NvmlInventory};
pub use driver::{LineDriver, RunSummary};
pub use error::{DeviceError, DriverError};
pub use persist::{write_marker, MARKER_CONTENT};
pub use token::{Tokenizer, TokenizerKind, TreebankTokenizer, WhitespaceTokenizer};
