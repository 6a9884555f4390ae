//! Abstract input events, decoupled from any DOM.

/// The visualizer controls on the page, identified by their element ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlId {
    AnimateTransport,
    ResetTransport,
    StartEntropy,
    ResetEntropy,
    CollisionRate,
}

impl ControlId {
    pub const ALL: [ControlId; 5] = [
        Self::AnimateTransport,
        Self::ResetTransport,
        Self::StartEntropy,
        Self::ResetEntropy,
        Self::CollisionRate,
    ];

    pub fn dom_id(self) -> &'static str {
        match self {
            Self::AnimateTransport => "animateTransport",
            Self::ResetTransport => "resetTransport",
            Self::StartEntropy => "startEntropy",
            Self::ResetEntropy => "resetEntropy",
            Self::CollisionRate => "collisionRate",
        }
    }

    pub fn from_dom_id(id: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.dom_id() == id)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// A button was pressed.
    Click(ControlId),
    /// An input control reported a new value.
    Input { control: ControlId, value: String },
    SelectTab(String),
    /// Header of the topic at this index was clicked.
    ToggleTopic(usize),
    ChooseQuizOption { quiz: usize, option: usize },
    /// The topic content at this index scrolled into view.
    TopicVisible(usize),
    BeforePrint,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dom_ids_round_trip() {
        for control in ControlId::ALL {
            assert_eq!(ControlId::from_dom_id(control.dom_id()), Some(control));
        }
    }

    #[test]
    fn unknown_dom_id_is_none() {
        assert_eq!(ControlId::from_dom_id("animate"), None);
    }
}
