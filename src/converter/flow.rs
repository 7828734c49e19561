// DOM side of the converter: the drop zone, the hidden file picker, the queued file list
// and the convert button. Every queued file converts on its own future, so one failure
// never stops the others.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys::{Document, DragEvent, Element, Event, EventTarget, File, FileList, HtmlElement, HtmlInputElement, Window};

use super::document::{self, DocumentStyle};
use super::error::ConvertError;
use super::queue::{docx_file_name, format_file_size, FileQueue, QueuedFile};

const DROP_ZONE_ID: &str = "dropZone";
const FILE_COUNT_ID: &str = "fileCount";
const FILE_LIST_ID: &str = "fileList";
const CONVERT_BUTTON_ID: &str = "convertBtn";
const STATUS_ID: &str = "conversionStatus";

const BORDER_IDLE: &str = "#6C63FF";
const BORDER_HOVER: &str = "#4A47FF";

type Queue = Rc<RefCell<FileQueue<File>>>;

struct Page {
    window: Window,
    document: Document,
    drop_zone: HtmlElement,
    picker: HtmlInputElement,
    count: Element,
    list: Element,
    convert_button: Element,
    status: Element,
}

impl Page {
    fn find() -> Result<Page, JsValue> {
        let window = web_sys::window().ok_or("no global window")?;
        let document = window.document().ok_or("window has no document")?;
        let by_id = |id: &str| {
            document
                .get_element_by_id(id)
                .ok_or_else(|| ConvertError::Dom(format!("#{}", id)))
        };

        let drop_zone = by_id(DROP_ZONE_ID)?.dyn_into::<HtmlElement>()?;
        let count = by_id(FILE_COUNT_ID)?;
        let list = by_id(FILE_LIST_ID)?;
        let convert_button = by_id(CONVERT_BUTTON_ID)?;
        let status = by_id(STATUS_ID)?;

        let picker = document
            .create_element("input")?
            .dyn_into::<HtmlInputElement>()?;
        picker.set_type("file");
        picker.set_multiple(true);
        picker.set_accept(".txt");
        picker.style().set_property("display", "none")?;

        Ok(Page {
            window,
            document,
            drop_zone,
            picker,
            count,
            list,
            convert_button,
            status,
        })
    }

    // Last step of setup, so a failed setup never leaves an orphaned picker behind
    fn mount_picker(&self) -> Result<(), JsValue> {
        let body = self.document.body().ok_or("document has no body")?;
        body.append_child(&self.picker)?;
        Ok(())
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.window.alert_with_message(message) {
            log::warn!("alert failed: {:?}", err);
        }
    }

    fn set_border(&self, color: &str) {
        if let Err(err) = self.drop_zone.style().set_property("border-color", color) {
            log::warn!("could not restyle drop zone: {:?}", err);
        }
    }

    fn show_queue(&self, queue: &FileQueue<File>) -> Result<(), JsValue> {
        self.count.set_text_content(Some(&queue.len().to_string()));
        self.list.set_inner_html("");
        for file in queue.iter() {
            let item = self.document.create_element("div")?;
            item.set_class_name("file-list-item");
            let name = self.document.create_element("span")?;
            name.set_class_name("file-name");
            name.set_text_content(Some(&file.file_name()));
            let size = self.document.create_element("span")?;
            size.set_class_name("file-size");
            size.set_text_content(Some(&format_file_size(file.byte_size())));
            item.append_child(&name)?;
            item.append_child(&size)?;
            self.list.append_child(&item)?;
        }
        Ok(())
    }

    fn report(&self, line: &str) -> Result<(), JsValue> {
        let entry = self.document.create_element("div")?;
        entry.set_text_content(Some(line));
        self.status.append_child(&entry)?;
        self.status.set_scroll_top(self.status.scroll_height());
        Ok(())
    }
}

// An event listener that unregisters itself when dropped
struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn new<H>(target: &EventTarget, event: &'static str, handler: H) -> Result<Listener, JsValue>
    where
        H: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        Ok(Listener {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref());
    }
}

#[wasm_bindgen]
pub struct FileConverter {
    page: Rc<Page>,
    queue: Queue,
    _listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl FileConverter {
    // Binds to the converter markup already on the page
    #[wasm_bindgen(constructor)]
    pub fn new() -> Result<FileConverter, JsValue> {
        let page = Rc::new(Page::find()?);
        let queue: Queue = Rc::new(RefCell::new(FileQueue::new()));
        let style = DocumentStyle::default();
        let mut listeners = Vec::new();

        listeners.push({
            let page = page.clone();
            Listener::new(&page.drop_zone.clone(), "dragover", move |event| {
                event.prevent_default();
                page.set_border(BORDER_HOVER);
            })?
        });
        listeners.push({
            let page = page.clone();
            Listener::new(&page.drop_zone.clone(), "dragleave", move |_| {
                page.set_border(BORDER_IDLE);
            })?
        });
        listeners.push({
            let page = page.clone();
            let queue = queue.clone();
            Listener::new(&page.drop_zone.clone(), "drop", move |event| {
                event.prevent_default();
                page.set_border(BORDER_IDLE);
                let files = event
                    .dyn_ref::<DragEvent>()
                    .and_then(|drag| drag.data_transfer())
                    .and_then(|transfer| transfer.files());
                if let Some(files) = files {
                    enqueue(&page, &queue, file_list(&files));
                }
            })?
        });
        listeners.push({
            let page = page.clone();
            Listener::new(&page.drop_zone.clone(), "click", move |_| page.picker.click())?
        });
        listeners.push({
            let page = page.clone();
            let queue = queue.clone();
            Listener::new(&page.picker.clone(), "change", move |_| {
                if let Some(files) = page.picker.files() {
                    enqueue(&page, &queue, file_list(&files));
                }
                // Lets the same file be picked again
                page.picker.set_value("");
            })?
        });
        listeners.push({
            let page = page.clone();
            let queue = queue.clone();
            Listener::new(&page.convert_button.clone(), "click", move |_| {
                convert_all(&page, &queue, &style);
            })?
        });

        page.mount_picker()?;
        log::info!("file converter attached to #{}", DROP_ZONE_ID);
        Ok(FileConverter {
            page,
            queue,
            _listeners: listeners,
        })
    }

    // Same as dropping the files on the drop zone; entries that are not Files are skipped
    pub fn add_files(&self, files: &js_sys::Array) {
        let batch = files.iter().filter_map(|value| value.dyn_into::<File>().ok());
        enqueue(&self.page, &self.queue, batch);
    }

    pub fn queued_count(&self) -> usize {
        self.queue.borrow().len()
    }

    pub fn clear(&self) -> Result<(), JsValue> {
        self.queue.borrow_mut().clear();
        self.page.show_queue(&self.queue.borrow())
    }
}

impl Drop for FileConverter {
    fn drop(&mut self) {
        self.page.picker.remove();
    }
}

fn file_list(files: &FileList) -> Vec<File> {
    (0..files.length()).filter_map(|i| files.get(i)).collect()
}

fn enqueue<I: IntoIterator<Item = File>>(page: &Page, queue: &Queue, batch: I) {
    let outcome = queue.borrow_mut().add(batch);
    log::debug!(
        "queued {} file(s), rejected {}, overflow reset: {}",
        outcome.added,
        outcome.rejected.len(),
        outcome.overflowed
    );
    for problem in outcome.problems(FileQueue::<File>::MAX_FILES) {
        page.alert(&problem.to_string());
    }
    if let Err(err) = page.show_queue(&queue.borrow()) {
        log::warn!("could not refresh file list: {:?}", err);
    }
}

fn convert_all(page: &Rc<Page>, queue: &Queue, style: &DocumentStyle) {
    let files: Vec<File> = queue.borrow().iter().cloned().collect();
    if files.is_empty() {
        page.alert(&ConvertError::EmptyQueue.to_string());
        return;
    }

    log::info!("converting {} file(s)", files.len());
    for file in files {
        let page = page.clone();
        let style = style.clone();
        spawn_local(async move {
            if let Err(err) = convert_one(&page, &file, &style).await {
                log::error!("{}", err);
                page.alert(&err.to_string());
            }
        });
    }
    page.alert("Downloads start one by one; save each .docx next to its original .txt file");
}

async fn convert_one(page: &Page, file: &File, style: &DocumentStyle) -> Result<(), ConvertError> {
    let name = file.name();
    let text = JsFuture::from(file.text())
        .await
        .map_err(|err| ConvertError::Read {
            name: name.clone(),
            reason: describe(&err),
        })?
        .as_string()
        .ok_or_else(|| ConvertError::Read {
            name: name.clone(),
            reason: "contents are not text".to_owned(),
        })?;

    let generate_failed = |err: JsValue| ConvertError::Generate {
        name: name.clone(),
        reason: describe(&err),
    };
    let blob = style.render(&text).await.map_err(generate_failed)?;
    document::save(&blob, &docx_file_name(&name)).map_err(generate_failed)?;

    page.report(&format!("{} converted; save it next to the original file", name))
        .map_err(|err| ConvertError::Dom(describe(&err)))
}

fn describe(err: &JsValue) -> String {
    err.as_string()
        .or_else(|| err.dyn_ref::<js_sys::Error>().map(|e| String::from(e.message())))
        .unwrap_or_else(|| format!("{:?}", err))
}
