use std::rc::Rc;

use web_sys::{Document, Element};

/// Room roster. Rendered wholesale from each `update_users` event; there is
/// no incremental join/leave handling.
pub(crate) struct RosterView {
    document: Document,
    list: Element,
    username: String,
}

impl RosterView {
    pub(crate) fn new(document: Document, list: Element, username: String) -> Rc<Self> {
        Rc::new(Self {
            document,
            list,
            username,
        })
    }

    pub(crate) fn render(&self, users: &[String]) {
        self.list.set_inner_html("");
        for user in users {
            let Ok(entry) = self.document.create_element("li") else {
                continue;
            };
            let own = *user == self.username;
            entry.set_class_name(if own { "user-entry active" } else { "user-entry" });
            if own {
                entry.set_text_content(Some(&format!("{user} (You)")));
            } else {
                entry.set_text_content(Some(user));
            }
            let _ = self.list.append_child(&entry);
        }
    }
}
