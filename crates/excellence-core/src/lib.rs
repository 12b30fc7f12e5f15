pub mod cell;
pub mod environment;
pub mod error;
pub mod format;
pub mod host;
pub mod range;
pub mod record;
pub mod template;
pub mod value;
pub mod writer;

pub use cell::CellValue;
pub use environment::{Detection, Environment, EnvironmentConfig};
pub use error::{CellError, HostError, InsertError, WriteError};
pub use format::{Color, HeaderStyle};
pub use host::{write_records, MemorySheet, RangeHost, WriteReport};
pub use range::{column_index, column_label, resolve_anchor, Anchor, Region};
pub use record::{records_from_json, Record};
pub use template::{generate_template, read_upload, UploadKind, UploadPayload};
pub use value::{sanitize_value, RawValue};
pub use writer::{build_write_instruction, build_write_instruction_at, WriteInstruction};
