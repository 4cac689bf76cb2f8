//! Browser front-end.
//!
//! Attaches to the widget markup by element id, translates clicks and key
//! presses into messages, and renders view models into the DOM. The app
//! lives in a thread-local; every callback goes through [`dispatch`].

use std::cell::RefCell;
use std::time::Duration;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use crate::app::FlipperApp;
use crate::config::{AppConfig, LogLevel};
use crate::copy_feedback::CopyOutcome;
use crate::error::{ClipboardError, FrontendError};
use crate::message::{CopyMessage, Effect, EngineMessage, Message};
use crate::view::{RenderSink, ViewModel};

/// Element ids the widget markup must provide.
mod ids {
    pub const FLIP: &str = "flipBtn";
    pub const SWATCH: &str = "swatch";
    pub const HEX: &str = "hexVal";
    pub const RGB: &str = "rgbVal";
    pub const HSL: &str = "hslVal";
    pub const COPY: &str = "copyBtn";
    pub const HISTORY: &str = "history";
    pub const LOCK: &str = "lockBtn";
    pub const SHADE: &str = "randomizeShade";
}

/// Extra wait on top of the feedback delay; browser timers and
/// `performance.now()` do not tick in lockstep.
const REVERT_SLACK: Duration = Duration::from_millis(10);

struct Widget {
    app: FlipperApp,
    dom: DomRenderer,
}

thread_local! {
    static WIDGET: RefCell<Option<Widget>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let loaded = AppConfig::load_from_local_storage();
    let level = match &loaded {
        Ok(Some(config)) => config.preferences.log_level,
        _ => LogLevel::default(),
    };
    if let Err(e) = console_log::init_with_level(level.to_level()) {
        web_sys::console::log_1(&format!("Logger already initialized: {}", e).into());
    }
    let config = AppConfig::resolve_loaded(loaded, "localStorage");

    if let Err(e) = mount(&config) {
        log::error!("Color flipper failed to start: {}", e);
    }
}

fn js_err(e: JsValue) -> FrontendError {
    FrontendError::Environment(format!("{:?}", e))
}

fn element(document: &Document, id: &'static str) -> Result<Element, FrontendError> {
    document
        .get_element_by_id(id)
        .ok_or(FrontendError::MissingElement(id))
}

fn html_element(document: &Document, id: &'static str) -> Result<HtmlElement, FrontendError> {
    element(document, id)?
        .dyn_into::<HtmlElement>()
        .map_err(|_| FrontendError::MissingElement(id))
}

fn mount(config: &AppConfig) -> Result<(), FrontendError> {
    let window = web_sys::window()
        .ok_or_else(|| FrontendError::Environment("no window".to_string()))?;
    let document = window
        .document()
        .ok_or_else(|| FrontendError::Environment("no document".to_string()))?;

    let dom = DomRenderer::new(&document)?;
    let app = FlipperApp::new(config);

    WIDGET.with(|widget| {
        let mut slot = widget.borrow_mut();
        let widget = slot.insert(Widget { app, dom });
        widget.app.present(&mut widget.dom);
    });

    let buttons = [
        (ids::FLIP, Message::Engine(EngineMessage::Generate)),
        (ids::LOCK, Message::Engine(EngineMessage::ToggleLock)),
        (ids::SHADE, Message::Engine(EngineMessage::AdjustShade)),
        (ids::COPY, Message::Copy(CopyMessage::Requested)),
    ];
    for (id, message) in buttons {
        on_click(&element(&document, id)?, message)?;
    }
    on_history_click(&element(&document, ids::HISTORY)?)?;
    on_key_down(&document)?;

    log::info!("🎨 Color flipper mounted");
    Ok(())
}

fn on_click(target: &Element, message: Message) -> Result<(), FrontendError> {
    let handler = Closure::<dyn FnMut(Event)>::new(move |_event: Event| {
        dispatch(message.clone());
    });
    target
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(js_err)?;
    handler.forget(); // Leak the closure to keep it alive
    Ok(())
}

/// One delegated listener for all swatches, so re-rendering the strip
/// does not create new closures.
fn on_history_click(container: &Element) -> Result<(), FrontendError> {
    let handler = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
        let index = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .and_then(|target| target.closest(".hist-item").ok().flatten())
            .and_then(|item| item.get_attribute("data-index"))
            .and_then(|index| index.parse::<usize>().ok());

        if let Some(index) = index {
            dispatch(Message::Engine(EngineMessage::ApplyHistory(index)));
        }
    });
    container
        .add_event_listener_with_callback("click", handler.as_ref().unchecked_ref())
        .map_err(js_err)?;
    handler.forget();
    Ok(())
}

fn on_key_down(document: &Document) -> Result<(), FrontendError> {
    let handler = Closure::<dyn FnMut(KeyboardEvent)>::new(move |event: KeyboardEvent| {
        if event.repeat() || event.ctrl_key() || event.meta_key() || event.alt_key() {
            return;
        }
        // buttons already turn Space/Enter into clicks
        let on_button = event
            .target()
            .and_then(|target| target.dyn_into::<Element>().ok())
            .is_some_and(|target| target.tag_name().eq_ignore_ascii_case("button"));
        if on_button {
            return;
        }

        let mut chars = event.key().chars();
        let (Some(key), None) = (chars.next(), chars.next()) else {
            return;
        };

        let message = WIDGET.with(|widget| {
            widget
                .borrow()
                .as_ref()
                .and_then(|widget| widget.app.keybindings().message_for_key(key))
        });
        if let Some(message) = message {
            event.prevent_default();
            dispatch(message);
        }
    });
    document
        .add_event_listener_with_callback("keydown", handler.as_ref().unchecked_ref())
        .map_err(js_err)?;
    handler.forget();
    Ok(())
}

/// Update the app, render if needed, then start any async effects.
fn dispatch(message: Message) {
    let effects = WIDGET.with(|widget| {
        let mut slot = widget.borrow_mut();
        let Some(widget) = slot.as_mut() else {
            log::warn!("Message {:?} before mount", message);
            return Vec::new();
        };

        let effects = widget.app.update(message);
        if effects.contains(&Effect::Render) {
            widget.app.present(&mut widget.dom);
        }
        effects
    });

    // the widget is no longer borrowed here, so callbacks may re-enter dispatch
    for effect in effects {
        match effect {
            Effect::Render => {}
            Effect::WriteClipboard(hex) => {
                wasm_bindgen_futures::spawn_local(async move {
                    let outcome = match write_clipboard(&hex).await {
                        Ok(()) => CopyOutcome::Copied,
                        Err(e) => {
                            log::warn!("📋 {}", e);
                            CopyOutcome::Failed
                        }
                    };
                    dispatch(Message::Copy(CopyMessage::Finished(outcome)));
                });
            }
            Effect::ScheduleRevert(delay) => schedule_revert(delay),
        }
    }
}

async fn write_clipboard(text: &str) -> Result<(), ClipboardError> {
    let window = web_sys::window()
        .ok_or_else(|| ClipboardError::Unavailable("no window".to_string()))?;
    let promise = window.navigator().clipboard().write_text(text);
    wasm_bindgen_futures::JsFuture::from(promise)
        .await
        .map(|_| ())
        .map_err(|e| ClipboardError::WriteFailed(format!("{:?}", e)))
}

fn schedule_revert(delay: Duration) {
    let Some(window) = web_sys::window() else {
        return;
    };
    let total = (delay + REVERT_SLACK).as_millis();
    let millis = i32::try_from(total).unwrap_or(i32::MAX);
    let callback = Closure::once_into_js(|| dispatch(Message::Copy(CopyMessage::Expired)));

    if let Err(e) = window
        .set_timeout_with_callback_and_timeout_and_arguments_0(callback.unchecked_ref(), millis)
    {
        log::warn!("Failed to schedule copy label revert: {:?}", e);
    }
}

/// Renders view models into the widget's DOM elements.
struct DomRenderer {
    document: Document,
    body: HtmlElement,
    swatch: HtmlElement,
    hex_val: Element,
    rgb_val: Element,
    hsl_val: Element,
    copy_btn: Element,
    lock_btn: HtmlElement,
    history: Element,
}

impl DomRenderer {
    fn new(document: &Document) -> Result<Self, FrontendError> {
        Ok(Self {
            document: document.clone(),
            body: document
                .body()
                .ok_or_else(|| FrontendError::Environment("no body".to_string()))?,
            swatch: html_element(document, ids::SWATCH)?,
            hex_val: element(document, ids::HEX)?,
            rgb_val: element(document, ids::RGB)?,
            hsl_val: element(document, ids::HSL)?,
            copy_btn: element(document, ids::COPY)?,
            lock_btn: html_element(document, ids::LOCK)?,
            history: element(document, ids::HISTORY)?,
        })
    }

    fn draw(&self, view: &ViewModel) -> Result<(), JsValue> {
        let body_style = self.body.style();
        body_style.set_property("background", &view.hex)?;
        body_style.set_property("color", view.text_tone.css_color())?;

        self.swatch.style().set_property("background", &view.hex)?;
        self.swatch.set_text_content(Some(&view.hex));
        self.hex_val.set_text_content(Some(&view.hex_label));
        self.rgb_val.set_text_content(Some(&view.rgb_label));
        self.hsl_val.set_text_content(Some(&view.hsl_label));
        self.copy_btn.set_text_content(Some(view.copy_label));

        self.lock_btn
            .set_attribute("aria-pressed", if view.locked { "true" } else { "false" })?;
        self.lock_btn.set_text_content(Some(view.lock_label));
        self.lock_btn
            .style()
            .set_property("opacity", view.lock_opacity)?;

        self.history.set_inner_html("");
        for swatch in &view.history {
            let item = self
                .document
                .create_element("div")?
                .dyn_into::<HtmlElement>()?;
            item.set_class_name("hist-item");
            item.style().set_property("background", &swatch.hex)?;
            item.set_title(&swatch.hex);
            item.set_attribute("role", "button")?;
            item.set_attribute("aria-label", &swatch.aria_label)?;
            item.set_attribute("data-index", &swatch.index.to_string())?;
            self.history.append_child(&item)?;
        }

        Ok(())
    }
}

impl RenderSink for DomRenderer {
    fn render(&mut self, view: &ViewModel) {
        if let Err(e) = self.draw(view) {
            log::warn!("Failed to render {}: {:?}", view.hex, e);
        }
    }
}
