// Drag-and-drop conversion of plain text files into .docx downloads. Document generation
// and saving are delegated to the page's `docx` and `saveAs` scripts.

mod document;
mod error;
mod flow;
mod queue;

pub use document::DocumentStyle;
pub use error::ConvertError;
pub use flow::FileConverter;
pub use queue::{docx_file_name, format_file_size, AddOutcome, FileQueue, QueuedFile};
