// Small queue of files waiting for conversion, plus the naming and size helpers the
// file list needs.

use super::error::ConvertError;

const PLAIN_TEXT_SUFFIX: &str = ".txt";
const DOCX_SUFFIX: &str = ".docx";

pub trait QueuedFile {
    fn file_name(&self) -> String;
    fn byte_size(&self) -> f64;
}

impl QueuedFile for web_sys::File {
    fn file_name(&self) -> String {
        self.name()
    }

    fn byte_size(&self) -> f64 {
        self.size()
    }
}

#[derive(Debug, Default, PartialEq)]
pub struct AddOutcome {
    pub added: usize,
    pub rejected: Vec<ConvertError>,
    // The batch would have exceeded the limit and the queue was emptied
    pub overflowed: bool,
}

impl AddOutcome {
    pub fn problems(&self, limit: usize) -> Vec<ConvertError> {
        let mut problems = self.rejected.clone();
        if self.overflowed {
            problems.push(ConvertError::TooManyFiles { limit });
        }
        problems
    }
}

pub struct FileQueue<F> {
    files: Vec<F>,
}

impl<F> Default for FileQueue<F> {
    fn default() -> Self {
        FileQueue { files: Vec::new() }
    }
}

impl<F: QueuedFile> FileQueue<F> {
    pub const MAX_FILES: usize = 5;

    pub fn new() -> Self {
        Self::default()
    }

    /// Queues every `.txt` file of `batch`. Other files are reported back and skipped. If the
    /// accepted files would push the queue past `MAX_FILES`, the whole queue is cleared instead.
    pub fn add<I: IntoIterator<Item = F>>(&mut self, batch: I) -> AddOutcome {
        let mut accepted = Vec::new();
        let mut rejected = Vec::new();
        for file in batch {
            let name = file.file_name();
            if is_plain_text(&name) {
                accepted.push(file);
            } else {
                rejected.push(ConvertError::NotPlainText { name });
            }
        }

        if self.files.len() + accepted.len() > Self::MAX_FILES {
            self.files.clear();
            return AddOutcome {
                added: 0,
                rejected,
                overflowed: true,
            };
        }

        let added = accepted.len();
        self.files.extend(accepted);
        AddOutcome {
            added,
            rejected,
            overflowed: false,
        }
    }

    pub fn clear(&mut self) {
        self.files.clear();
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, F> {
        self.files.iter()
    }
}

fn strip_suffix_ignore_case<'a>(name: &'a str, suffix: &str) -> Option<&'a str> {
    let split = name.len().checked_sub(suffix.len())?;
    let tail = name.get(split..)?;
    if tail.eq_ignore_ascii_case(suffix) {
        name.get(..split)
    } else {
        None
    }
}

fn is_plain_text(name: &str) -> bool {
    strip_suffix_ignore_case(name, PLAIN_TEXT_SUFFIX).is_some()
}

pub fn docx_file_name(name: &str) -> String {
    let stem = strip_suffix_ignore_case(name, PLAIN_TEXT_SUFFIX).unwrap_or(name);
    format!("{}{}", stem, DOCX_SUFFIX)
}

// Human readable size for the file list: "0 Bytes", "512 Bytes", "1.5 KB", "2.25 MB"
pub fn format_file_size(bytes: f64) -> String {
    const UNITS: [&str; 3] = ["Bytes", "KB", "MB"];
    if !(bytes > 0.0) {
        return format!("0 {}", UNITS[0]);
    }

    let mut scaled = bytes;
    let mut unit = 0;
    while scaled >= 1024.0 && unit < UNITS.len() - 1 {
        scaled /= 1024.0;
        unit += 1;
    }

    let mut text = format!("{:.2}", scaled);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    format!("{} {}", text, UNITS[unit])
}
