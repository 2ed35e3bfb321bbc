use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo::events::EventListener;
use gloo::timers::callback::Timeout;
use wasm_bindgen::JsCast;
use web_sys::HtmlInputElement;

use rokkakuban_core::ServerMsg;

use crate::board_view::BoardView;
use crate::chat_view::ChatView;
use crate::client::{GameClient, ViewHooks};
use crate::config;
use crate::diag;
use crate::input::{self, InputController};
use crate::roster_view::RosterView;
use crate::socket::SocketAdapter;

const RETRY_MAX: u32 = 5;
const RETRY_BASE_MS: u32 = 500;

/// Everything that must stay alive for the lifetime of the page: the socket
/// with its callbacks, the DOM listeners, and the reconnect timer.
struct App {
    socket: RefCell<SocketAdapter>,
    client: Rc<GameClient>,
    ws_url: String,
    retry_attempts: Cell<u32>,
    retry_timer: RefCell<Option<Timeout>>,
    _listeners: Vec<EventListener>,
}

impl App {
    fn connect(self: &Rc<Self>) {
        let client = self.client.clone();
        let on_server_msg: Rc<dyn Fn(ServerMsg)> = Rc::new(move |msg| client.handle(msg));
        let on_fail: Rc<dyn Fn()> = {
            let app = self.clone();
            Rc::new(move || app.schedule_retry())
        };
        let on_open: Rc<dyn Fn()> = {
            let app = self.clone();
            Rc::new(move || app.retry_attempts.set(0))
        };
        self.socket
            .borrow_mut()
            .connect(&self.ws_url, on_server_msg, on_fail, Some(on_open));
    }

    /// Bounded backoff. After the last attempt the page stays up with the
    /// last known board; a reload starts the cycle over.
    fn schedule_retry(self: &Rc<Self>) {
        let attempt = self.retry_attempts.get();
        if attempt >= RETRY_MAX {
            diag::warn("giving up on reconnecting");
            return;
        }
        self.retry_attempts.set(attempt + 1);
        let delay = RETRY_BASE_MS << attempt;
        let app = self.clone();
        let timer = Timeout::new(delay, move || {
            app.retry_timer.borrow_mut().take();
            app.connect();
        });
        *self.retry_timer.borrow_mut() = Some(timer);
    }
}

pub(crate) fn run() {
    let Some(window) = web_sys::window() else {
        return;
    };
    let Some(document) = window.document() else {
        return;
    };
    let Some(page) = config::load_page_config() else {
        diag::warn("missing room or username, not starting");
        return;
    };

    let (Some(board_root), Some(users_list), Some(chat_log), Some(chat_input), Some(send_btn)) = (
        document.get_element_by_id("game-board"),
        document.get_element_by_id("users-list"),
        document.get_element_by_id("chat-messages"),
        document.get_element_by_id("chat-input"),
        document.get_element_by_id("send-message-btn"),
    ) else {
        diag::warn("page is missing required elements, not starting");
        return;
    };
    let Ok(chat_input) = chat_input.dyn_into::<HtmlInputElement>() else {
        diag::warn("chat input is not an input element, not starting");
        return;
    };

    let client = GameClient::new();
    let board = BoardView::new(document.clone(), board_root);
    let roster = RosterView::new(document.clone(), users_list, page.username.clone());
    let chat = ChatView::new(
        document.clone(),
        chat_log,
        chat_input,
        page.username.clone(),
    );
    let controls = InputController::new(client.clone(), board.clone());
    controls.install(&document);
    chat.install(client.clone(), &send_btn);

    client.set_hooks(ViewHooks {
        on_board_reset: {
            let board = board.clone();
            Rc::new(move |grid, state| board.reset(grid, state))
        },
        on_token_added: {
            let board = board.clone();
            Rc::new(move |grid, id, token| board.spawn_token(grid, id, token))
        },
        on_token_moved: {
            let board = board.clone();
            Rc::new(move |grid, id, token| board.place_token(grid, id, token.address, true))
        },
        on_token_removed: {
            let board = board.clone();
            Rc::new(move |id| board.remove_token(id))
        },
        on_roster: {
            let roster = roster.clone();
            Rc::new(move |users| roster.render(users))
        },
        on_chat: {
            let chat = chat.clone();
            Rc::new(move |entry| chat.display(entry))
        },
    });

    let socket = SocketAdapter::new();
    {
        let socket = socket.clone();
        client.set_sender(Rc::new(move |msg| socket.send(&msg)));
    }

    let mut listeners = Vec::new();
    if let Some(add_btn) = document.get_element_by_id("add-token-btn") {
        let controls = controls.clone();
        listeners.push(EventListener::new(&add_btn, "click", move |_event| {
            controls.arm_token_placement(input::random_kind());
        }));
    }
    if let Some(clear_btn) = document.get_element_by_id("clear-board-btn") {
        let client = client.clone();
        let window = window.clone();
        listeners.push(EventListener::new(&clear_btn, "click", move |_event| {
            let confirmed = window
                .confirm_with_message("Clear all tokens from the board?")
                .unwrap_or(false);
            if confirmed {
                client.request_clear();
            }
        }));
    }

    // First paint before any snapshot arrives.
    client.refresh_views();

    let ws_base = page
        .ws_base
        .clone()
        .or_else(config::default_ws_base)
        .unwrap_or_else(|| "ws://localhost/ws".to_string());
    let ws_url = config::build_room_ws_url(&ws_base, &page.room_id, &page.username);

    let app = Rc::new(App {
        socket: RefCell::new(socket),
        client,
        ws_url,
        retry_attempts: Cell::new(0),
        retry_timer: RefCell::new(None),
        _listeners: listeners,
    });
    app.connect();

    // The app lives as long as the page does.
    std::mem::forget(app);
}
