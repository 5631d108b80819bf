mod assemble;
mod byte_size;
mod options;
mod translator;
mod value;

pub use assemble::{assemble, AssembledCommand, Field, FieldRole, OptionSet};
pub use byte_size::{ByteSize, ParseByteSizeError};
pub use options::DownloadOptions;
pub use translator::{IncludeFn, Rendered, TranslateFn, Translator, TranslatorBuilder};
pub use value::{ArgValue, KeyValueMap, ValueKind};
