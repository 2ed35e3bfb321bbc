use std::cell::RefCell;
use std::rc::Rc;

use gloo::events::EventListener;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlInputElement, KeyboardEvent};

use rokkakuban_core::ChatEntry;

use crate::client::GameClient;

/// Chat panel: an append-only message log plus the input row. Entries are
/// rendered as they arrive; the panel keeps no history of its own.
pub(crate) struct ChatView {
    document: Document,
    container: Element,
    input: HtmlInputElement,
    username: String,
    listeners: RefCell<Vec<EventListener>>,
}

impl ChatView {
    pub(crate) fn new(
        document: Document,
        container: Element,
        input: HtmlInputElement,
        username: String,
    ) -> Rc<Self> {
        Rc::new(Self {
            document,
            container,
            input,
            username,
            listeners: RefCell::new(Vec::new()),
        })
    }

    pub(crate) fn install(self: &Rc<Self>, client: Rc<GameClient>, send_button: &Element) {
        let mut listeners = Vec::new();
        {
            let view = self.clone();
            let client = client.clone();
            listeners.push(EventListener::new(send_button, "click", move |_event| {
                view.submit(&client);
            }));
        }
        {
            let view = self.clone();
            listeners.push(EventListener::new(&self.input, "keydown", move |event| {
                let Some(key_event) = event.dyn_ref::<KeyboardEvent>() else {
                    return;
                };
                if key_event.key() == "Enter" {
                    key_event.prevent_default();
                    view.submit(&client);
                }
            }));
        }
        *self.listeners.borrow_mut() = listeners;
    }

    /// Ships the input line as a chat request and clears the field. The
    /// entry itself only appears once the server echoes it back.
    fn submit(&self, client: &GameClient) {
        if client.send_chat(&self.input.value()) {
            self.input.set_value("");
        }
    }

    pub(crate) fn display(&self, entry: &ChatEntry) {
        let Ok(row) = self.document.create_element("div") else {
            return;
        };
        let own = entry.username == self.username;
        row.set_class_name(if own {
            "chat-message own-message"
        } else {
            "chat-message"
        });

        if !own {
            if let Ok(name) = self.document.create_element("div") {
                name.set_class_name("message-username");
                name.set_text_content(Some(&entry.username));
                let _ = row.append_child(&name);
            }
        }
        if let Ok(content) = self.document.create_element("div") {
            content.set_class_name("message-content");
            content.set_text_content(Some(&entry.message));
            let _ = row.append_child(&content);
        }
        if let Ok(time) = self.document.create_element("div") {
            time.set_class_name("message-time");
            time.set_text_content(Some(&entry.timestamp));
            let _ = row.append_child(&time);
        }

        let _ = self.container.append_child(&row);
        self.container.set_scroll_top(self.container.scroll_height());
    }
}
