// Bindings to the `docx` and FileSaver scripts loaded by the page, and the single
// paragraph document built from a text file.

use js_sys::{Array, Object, Promise, Reflect};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::Blob;

#[wasm_bindgen(js_namespace = docx)]
extern "C" {
    type Document;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &Object) -> Result<Document, JsValue>;
}

#[wasm_bindgen(js_namespace = docx)]
extern "C" {
    type Paragraph;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &Object) -> Result<Paragraph, JsValue>;
}

#[wasm_bindgen(js_namespace = docx)]
extern "C" {
    type TextRun;

    #[wasm_bindgen(constructor, catch)]
    fn new(options: &Object) -> Result<TextRun, JsValue>;
}

#[wasm_bindgen(js_namespace = docx)]
extern "C" {
    type Packer;

    #[wasm_bindgen(static_method_of = Packer, js_name = toBlob, catch)]
    fn to_blob(document: &Document) -> Result<Promise, JsValue>;
}

// FileSaver.js
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = saveAs, catch)]
    fn save_as(blob: &Blob, file_name: &str) -> Result<(), JsValue>;
}

#[derive(Debug, Clone, PartialEq)]
pub struct DocumentStyle {
    pub font: String,
    // Half-points, as the docx format counts them
    pub size: u32,
}

impl Default for DocumentStyle {
    fn default() -> Self {
        DocumentStyle {
            font: "微软雅黑".to_owned(),
            size: 24,
        }
    }
}

impl DocumentStyle {
    pub fn points(&self) -> f64 {
        self.size as f64 / 2.0
    }

    // Wraps the whole text in one run of one paragraph and packs it into a .docx blob
    pub(crate) async fn render(&self, text: &str) -> Result<Blob, JsValue> {
        let run = TextRun::new(&options(&[
            ("text", JsValue::from_str(text)),
            ("font", JsValue::from_str(&self.font)),
            ("size", JsValue::from(self.size)),
        ])?)?;
        let paragraph = Paragraph::new(&options(&[("children", Array::of1(&run).into())])?)?;
        let section = options(&[("children", Array::of1(&paragraph).into())])?;
        let document = Document::new(&options(&[("sections", Array::of1(&section).into())])?)?;

        let packed = JsFuture::from(Packer::to_blob(&document)?).await?;
        packed.dyn_into::<Blob>().map_err(|_| JsValue::from_str("docx packer did not return a Blob"))
    }
}

pub(crate) fn save(blob: &Blob, file_name: &str) -> Result<(), JsValue> {
    save_as(blob, file_name)
}

fn options(entries: &[(&str, JsValue)]) -> Result<Object, JsValue> {
    let object = Object::new();
    for (key, value) in entries {
        Reflect::set(&object, &JsValue::from_str(key), value)?;
    }
    Ok(object)
}
