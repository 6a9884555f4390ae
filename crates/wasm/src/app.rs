//! Binds the document to a [`Page`]: scans the markup into a layout, forwards
//! DOM events as [`UiEvent`]s and applies the returned [`Effect`]s.

use std::cell::RefCell;
use std::rc::Rc;

use tracing::{error, info};
use villani_entropy::{EntropyParams, EntropyPlotter};
use villani_page::{
    ControlId, Effect, Grading, MathRegion, MathRenderOptions, Page, PageLayout, TabSwitch,
    TopicDecl, UiEvent,
};
use villani_transport::{TransportParams, TransportVisualizer};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    Element, ErrorEvent, HtmlInputElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition,
};

use crate::canvas::WebCanvas;
use crate::dom;
use crate::math::MathRenderer;
use crate::scheduler::RafScheduler;
use crate::storage::LocalStorage;

pub const TRANSPORT_CANVAS_ID: &str = "transportCanvas";
pub const ENTROPY_CANVAS_ID: &str = "entropyPlot";

struct QuizView {
    options: Vec<Element>,
    feedback: Option<Element>,
}

/// Element handles captured once at startup, indexed like the page layout.
struct View {
    tab_buttons: Vec<Element>,
    tab_contents: Vec<Element>,
    topic_headers: Vec<Element>,
    topic_contents: Vec<Option<Element>>,
    quizzes: Vec<QuizView>,
    math: MathRenderer,
}

impl View {
    fn scan() -> Self {
        let topic_headers = dom::query_all(".topic-header");
        let topic_contents = topic_headers
            .iter()
            .map(Element::next_element_sibling)
            .collect();
        let quizzes = dom::query_all(".quiz-box")
            .iter()
            .map(|quiz| QuizView {
                options: dom::query_all_in(quiz, ".quiz-option"),
                feedback: quiz.query_selector(".quiz-feedback").ok().flatten(),
            })
            .collect();
        Self {
            tab_buttons: dom::query_all(".tab-btn"),
            tab_contents: dom::query_all(".tab-content"),
            topic_headers,
            topic_contents,
            quizzes,
            math: MathRenderer::new(&MathRenderOptions::default()),
        }
    }

    fn layout(&self) -> PageLayout {
        let tabs = self
            .tab_buttons
            .iter()
            .filter_map(|b| b.get_attribute("data-tab"))
            .collect();
        let active_tab = self
            .tab_buttons
            .iter()
            .find(|b| b.class_list().contains("active"))
            .and_then(|b| b.get_attribute("data-tab"));
        let topics = self
            .topic_headers
            .iter()
            .map(|header| TopicDecl {
                id: header.get_attribute("data-topic").unwrap_or_default(),
                tab: header
                    .closest(".tab-content")
                    .ok()
                    .flatten()
                    .and_then(|content| content.id().strip_suffix("-tab").map(str::to_owned)),
            })
            .collect();
        let quizzes = self
            .quizzes
            .iter()
            .map(|quiz| {
                quiz.options
                    .iter()
                    .map(|opt| opt.get_attribute("data-correct").as_deref() == Some("true"))
                    .collect()
            })
            .collect();
        PageLayout {
            tabs,
            active_tab,
            topics,
            quizzes,
        }
    }

    fn apply(&self, effect: &Effect) {
        match effect {
            Effect::ActivateTab(switch) => self.activate_tab(switch),
            Effect::SetTopicExpanded { topic, expanded } => {
                if let Some(header) = self.topic_headers.get(*topic) {
                    dom::set_class(header, "expanded", *expanded);
                }
                if let Some(Some(content)) = self.topic_contents.get(*topic) {
                    dom::set_class(content, "expanded", *expanded);
                }
            }
            Effect::ShowQuizResult { quiz, grading } => {
                if let Some(view) = self.quizzes.get(*quiz) {
                    show_quiz_result(view, grading);
                }
            }
            Effect::RenderMath(region) => {
                if let Some(el) = self.region_element(region) {
                    self.math.render(&el);
                }
            }
        }
    }

    fn activate_tab(&self, switch: &TabSwitch) {
        for button in &self.tab_buttons {
            let on = button.get_attribute("data-tab").as_deref() == Some(switch.tab.as_str());
            dom::set_class(button, "active", on);
        }
        for content in &self.tab_contents {
            dom::set_class(content, "active", false);
        }
        if let Some(content) = dom::element_by_id::<Element>(&switch.content_id) {
            dom::set_class(&content, "active", true);
        }
    }

    fn region_element(&self, region: &MathRegion) -> Option<Element> {
        match region {
            MathRegion::Document => dom::document()?.body().map(Element::from),
            MathRegion::TabContent(id) => dom::element_by_id(id),
            MathRegion::Topic(topic) => self.topic_contents.get(*topic)?.clone(),
        }
    }

    fn topic_index_of(&self, el: &Element) -> Option<usize> {
        self.topic_contents
            .iter()
            .position(|content| content.as_ref() == Some(el))
    }
}

fn show_quiz_result(view: &QuizView, grading: &Grading) {
    for (option, mark) in view.options.iter().zip(&grading.marks) {
        dom::set_style(option, "pointer-events", "none");
        if let Some(class) = mark.class_name() {
            dom::set_class(option, class, true);
        }
    }
    if let Some(feedback) = &view.feedback {
        feedback.set_text_content(Some(grading.verdict.message()));
        feedback.set_class_name(grading.verdict.feedback_class());
        dom::set_style(feedback, "display", "block");
    }
}

struct App {
    page: RefCell<Page<WebCanvas, RafScheduler>>,
    view: View,
}

impl App {
    fn dispatch(&self, event: UiEvent) {
        let result = self.page.borrow_mut().handle(event);
        match result {
            Ok(effects) => self.apply(&effects),
            Err(e) => error!(error = %e, "event handling failed"),
        }
    }

    fn apply(&self, effects: &[Effect]) {
        for effect in effects {
            self.view.apply(effect);
        }
    }
}

fn random_seed() -> u64 {
    // Saturating float-to-int cast; zero is remapped by the PRNG.
    (js_sys::Math::random() * u64::MAX as f64) as u64
}

/// Builds the page from the current document and wires every listener.
pub fn run() {
    let view = View::scan();
    let mut page = Page::new(view.layout(), Box::new(LocalStorage::new()));
    if let Some(canvas) = WebCanvas::by_id(TRANSPORT_CANVAS_ID) {
        let viz = TransportVisualizer::new(canvas, random_seed(), TransportParams::default());
        page = page.with_transport(viz, RafScheduler);
    }
    if let Some(canvas) = WebCanvas::by_id(ENTROPY_CANVAS_ID) {
        page = page.with_entropy(EntropyPlotter::new(canvas, EntropyParams::default()), RafScheduler);
    }
    info!(
        tabs = view.tab_buttons.len(),
        topics = view.topic_headers.len(),
        quizzes = view.quizzes.len(),
        "page initialized"
    );

    let startup = page.startup_effects();
    let app = Rc::new(App {
        page: RefCell::new(page),
        view,
    });
    app.apply(&startup);

    wire_tabs(&app);
    wire_topics(&app);
    wire_quizzes(&app);
    wire_controls(&app);
    wire_window(&app);
    wire_anchors();
    observe_topics(&app);
}

fn wire_tabs(app: &Rc<App>) {
    for button in &app.view.tab_buttons {
        let Some(tab) = button.get_attribute("data-tab") else {
            continue;
        };
        let app = Rc::clone(app);
        dom::listen(button, "click", move |_| {
            app.dispatch(UiEvent::SelectTab(tab.clone()));
        });
    }
}

fn wire_topics(app: &Rc<App>) {
    for (index, header) in app.view.topic_headers.iter().enumerate() {
        let app = Rc::clone(app);
        dom::listen(header, "click", move |_| {
            app.dispatch(UiEvent::ToggleTopic(index));
        });
    }
}

fn wire_quizzes(app: &Rc<App>) {
    for (quiz, view) in app.view.quizzes.iter().enumerate() {
        for (option, el) in view.options.iter().enumerate() {
            let app = Rc::clone(app);
            dom::listen(el, "click", move |_| {
                app.dispatch(UiEvent::ChooseQuizOption { quiz, option });
            });
        }
    }
}

fn wire_controls(app: &Rc<App>) {
    for control in ControlId::ALL {
        let Some(el) = dom::element_by_id::<Element>(control.dom_id()) else {
            continue;
        };
        let app = Rc::clone(app);
        if control == ControlId::CollisionRate {
            dom::listen(&el, "input", move |event| {
                let Some(input) = event
                    .target()
                    .and_then(|t| t.dyn_into::<HtmlInputElement>().ok())
                else {
                    return;
                };
                app.dispatch(UiEvent::Input {
                    control,
                    value: input.value(),
                });
            });
        } else {
            dom::listen(&el, "click", move |_| app.dispatch(UiEvent::Click(control)));
        }
    }
}

fn wire_window(app: &Rc<App>) {
    let Some(window) = dom::window() else {
        return;
    };
    let print_app = Rc::clone(app);
    dom::listen(&window, "beforeprint", move |_| {
        print_app.dispatch(UiEvent::BeforePrint);
    });
    dom::listen(&window, "error", |event| {
        let message = event
            .dyn_ref::<ErrorEvent>()
            .map(ErrorEvent::message)
            .unwrap_or_default();
        error!(%message, "uncaught application error");
    });
}

/// In-page links scroll smoothly to their target.
fn wire_anchors() {
    for anchor in dom::query_all("a[href^=\"#\"]") {
        let Some(href) = anchor.get_attribute("href") else {
            continue;
        };
        dom::listen(&anchor, "click", move |event| {
            event.prevent_default();
            let Some(target) = dom::document().and_then(|d| d.query_selector(&href).ok().flatten())
            else {
                return;
            };
            let opts = ScrollIntoViewOptions::new();
            opts.set_behavior(ScrollBehavior::Smooth);
            opts.set_block(ScrollLogicalPosition::Start);
            target.scroll_into_view_with_scroll_into_view_options(&opts);
        });
    }
}

/// Re-renders math in topic contents as they scroll into view.
fn observe_topics(app: &Rc<App>) {
    let observer_app = Rc::clone(app);
    let callback = Closure::wrap(Box::new(move |entries: js_sys::Array| {
        for entry in entries.iter() {
            let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                continue;
            };
            if !entry.is_intersecting() {
                continue;
            }
            if let Some(topic) = observer_app.view.topic_index_of(&entry.target()) {
                observer_app.dispatch(UiEvent::TopicVisible(topic));
            }
        }
    }) as Box<dyn FnMut(js_sys::Array)>);

    let init = IntersectionObserverInit::new();
    init.set_root_margin("50px");
    let observer =
        match IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init) {
            Ok(observer) => observer,
            Err(e) => {
                info!(error = ?e, "IntersectionObserver unavailable");
                return;
            }
        };
    callback.forget();
    for content in app.view.topic_contents.iter().flatten() {
        observer.observe(content);
    }
}
