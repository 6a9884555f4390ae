//! The page controller: owns every component and turns [`UiEvent`]s into
//! state changes plus [`Effect`]s for the view to apply.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use villani_core::{Animation, FrameLoop, Scheduler, Surface, VizError};
use villani_entropy::EntropyPlotter;
use villani_transport::TransportVisualizer;

use crate::error::PageError;
use crate::events::{ControlId, UiEvent};
use crate::math::MathRegion;
use crate::progress::{KeyValueStore, ProgressStore};
use crate::quiz::{Grading, Quiz};
use crate::tabs::{TabSet, TabSwitch};
use crate::topics::{TopicDecl, TopicSections};

/// Static description of the page's tabs, topics and quizzes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageLayout {
    pub tabs: Vec<String>,
    pub active_tab: Option<String>,
    pub topics: Vec<TopicDecl>,
    /// Per quiz, one flag per option marking the correct answers.
    pub quizzes: Vec<Vec<bool>>,
}

impl PageLayout {
    pub fn from_json(json: &str) -> Result<Self, PageError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// A view update produced by handling an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    ActivateTab(TabSwitch),
    SetTopicExpanded { topic: usize, expanded: bool },
    ShowQuizResult { quiz: usize, grading: Grading },
    RenderMath(MathRegion),
}

/// Visualizers absent from the page (no canvas) make their controls no-ops.
pub struct Page<S, Sch> {
    transport: Option<FrameLoop<TransportVisualizer<S>, Sch>>,
    entropy: Option<FrameLoop<EntropyPlotter<S>, Sch>>,
    tabs: TabSet,
    topics: TopicSections,
    quizzes: Vec<Quiz>,
    progress: ProgressStore<Box<dyn KeyValueStore>>,
}

impl<S, Sch> Page<S, Sch>
where
    S: Surface + 'static,
    Sch: Scheduler + Clone + 'static,
{
    pub fn new(layout: PageLayout, store: Box<dyn KeyValueStore>) -> Self {
        let PageLayout {
            tabs,
            active_tab,
            topics,
            quizzes,
        } = layout;
        Self {
            transport: None,
            entropy: None,
            tabs: TabSet::new(tabs, active_tab.as_deref()),
            topics: TopicSections::new(topics),
            quizzes: quizzes.into_iter().map(Quiz::new).collect(),
            progress: ProgressStore::new(store),
        }
    }

    /// Attaches the transport visualizer and draws its initial state.
    pub fn with_transport(mut self, viz: TransportVisualizer<S>, scheduler: Sch) -> Self {
        let lp = FrameLoop::new(viz, scheduler);
        lp.with_animation_mut(|v| v.render());
        self.transport = Some(lp);
        self
    }

    /// Attaches the entropy plotter and draws its empty axes.
    pub fn with_entropy(mut self, plotter: EntropyPlotter<S>, scheduler: Sch) -> Self {
        let lp = FrameLoop::new(plotter, scheduler);
        lp.with_animation_mut(|p| p.render());
        self.entropy = Some(lp);
        self
    }

    pub fn transport(&self) -> Option<&FrameLoop<TransportVisualizer<S>, Sch>> {
        self.transport.as_ref()
    }

    pub fn entropy(&self) -> Option<&FrameLoop<EntropyPlotter<S>, Sch>> {
        self.entropy.as_ref()
    }

    pub fn tabs(&self) -> &TabSet {
        &self.tabs
    }

    pub fn topics(&self) -> &TopicSections {
        &self.topics
    }

    pub fn quiz(&self, index: usize) -> Option<&Quiz> {
        self.quizzes.get(index)
    }

    pub fn progress(&self) -> &ProgressStore<Box<dyn KeyValueStore>> {
        &self.progress
    }

    /// Effects to apply once the document is ready.
    pub fn startup_effects(&self) -> Vec<Effect> {
        vec![Effect::RenderMath(MathRegion::Document)]
    }

    pub fn handle(&mut self, event: UiEvent) -> Result<Vec<Effect>, PageError> {
        match event {
            UiEvent::Click(control) => {
                self.click(control);
                Ok(Vec::new())
            }
            UiEvent::Input { control, value } => {
                self.input(control, &value)?;
                Ok(Vec::new())
            }
            UiEvent::SelectTab(tab) => Ok(self.select_tab(&tab)),
            UiEvent::ToggleTopic(topic) => Ok(self.toggle_topic(topic)),
            UiEvent::ChooseQuizOption { quiz, option } => Ok(self.choose_quiz_option(quiz, option)),
            UiEvent::TopicVisible(topic) => Ok(self.topic_visible(topic)),
            UiEvent::BeforePrint => Ok(self.before_print()),
        }
    }

    pub fn click(&mut self, control: ControlId) {
        debug!(control = control.dom_id(), "click");
        match control {
            ControlId::AnimateTransport => {
                if let Some(lp) = &self.transport {
                    lp.start();
                }
            }
            ControlId::ResetTransport => {
                if let Some(lp) = &self.transport {
                    lp.reset();
                }
            }
            ControlId::StartEntropy => {
                if let Some(lp) = &self.entropy {
                    lp.start();
                }
            }
            ControlId::ResetEntropy => {
                if let Some(lp) = &self.entropy {
                    lp.reset();
                }
            }
            ControlId::CollisionRate => {}
        }
    }

    /// Applies a value change from an input control.
    ///
    /// Only the collision-rate slider takes input. A value that does not
    /// parse as a number is rejected with `VizError::InvalidInput`.
    pub fn input(&mut self, control: ControlId, value: &str) -> Result<(), PageError> {
        if control != ControlId::CollisionRate {
            return Ok(());
        }
        let Some(lp) = &self.entropy else {
            return Ok(());
        };
        let rate: f64 = value.trim().parse().map_err(|_| VizError::InvalidInput {
            control: control.dom_id().to_string(),
            reason: format!("not a number: {value:?}"),
        })?;
        lp.with_animation_mut(|p| p.set_rate(rate));
        debug!(rate, "collision rate changed");
        Ok(())
    }

    pub fn select_tab(&mut self, tab: &str) -> Vec<Effect> {
        match self.tabs.select(tab) {
            Some(switch) => {
                let region = MathRegion::TabContent(switch.content_id.clone());
                vec![Effect::ActivateTab(switch), Effect::RenderMath(region)]
            }
            None => {
                warn!(tab, "unknown tab");
                Vec::new()
            }
        }
    }

    /// Toggles a topic. Expanding records it as visited under its tab and
    /// re-renders its math.
    pub fn toggle_topic(&mut self, topic: usize) -> Vec<Effect> {
        let Some(expanded) = self.topics.toggle(topic) else {
            return Vec::new();
        };
        let mut effects = vec![Effect::SetTopicExpanded { topic, expanded }];
        if expanded {
            self.record_visit(topic);
            effects.push(Effect::RenderMath(MathRegion::Topic(topic)));
        }
        effects
    }

    pub fn choose_quiz_option(&mut self, quiz: usize, option: usize) -> Vec<Effect> {
        self.quizzes
            .get_mut(quiz)
            .and_then(|q| q.select(option))
            .map(|grading| vec![Effect::ShowQuizResult { quiz, grading }])
            .unwrap_or_default()
    }

    pub fn topic_visible(&mut self, topic: usize) -> Vec<Effect> {
        if topic < self.topics.len() {
            vec![Effect::RenderMath(MathRegion::Topic(topic))]
        } else {
            Vec::new()
        }
    }

    /// Expands every collapsed topic so the printout is complete.
    pub fn before_print(&mut self) -> Vec<Effect> {
        self.topics
            .expand_all()
            .into_iter()
            .map(|topic| Effect::SetTopicExpanded {
                topic,
                expanded: true,
            })
            .collect()
    }

    fn record_visit(&mut self, topic: usize) {
        let Some(decl) = self.topics.get(topic) else {
            return;
        };
        let Some(tab) = decl.tab.clone() else {
            return;
        };
        let id = decl.id.clone();
        if let Err(e) = self.progress.save_progress(&tab, &id) {
            warn!(error = %e, tab = %tab, topic = %id, "could not save progress");
        }
    }
}
