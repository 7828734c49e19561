use thiserror::Error;
use wasm_bindgen::JsValue;

// Display text doubles as the alert shown to the user
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("Only .txt files are supported: {name}")]
    NotPlainText { name: String },

    #[error("At most {limit} files can be queued; the list has been cleared")]
    TooManyFiles { limit: usize },

    #[error("Add a .txt file before converting")]
    EmptyQueue,

    #[error("Could not read {name}: {reason}")]
    Read { name: String, reason: String },

    #[error("Could not convert {name}: {reason}")]
    Generate { name: String, reason: String },

    #[error("Page is missing an element: {0}")]
    Dom(String),
}

impl From<ConvertError> for JsValue {
    fn from(err: ConvertError) -> JsValue {
        JsValue::from_str(&err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_file() {
        let err = ConvertError::NotPlainText {
            name: "photo.png".to_owned(),
        };
        assert_eq!(err.to_string(), "Only .txt files are supported: photo.png");

        let err = ConvertError::Generate {
            name: "notes.txt".to_owned(),
            reason: "packer failed".to_owned(),
        };
        assert_eq!(err.to_string(), "Could not convert notes.txt: packer failed");
    }

    #[test]
    fn overflow_message_carries_the_limit() {
        let err = ConvertError::TooManyFiles { limit: 5 };
        assert!(err.to_string().starts_with("At most 5 files"));
    }
}
