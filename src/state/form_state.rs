//! Create-sweepstake form state.

use super::phase::Phase;
use super::sweepstake::{AllocationMethod, CreateSweepstakeRequest, EventType, MarketInfo};
use crate::error::{Error, Result};

/// Minimum number of participants the backend accepts.
pub const MIN_PARTICIPANTS: usize = 2;

/// A focusable field of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    MarketId,
    Name,
    Method,
    IgnoreLongshots,
    Competition,
    Participant(usize),
}

impl FormField {
    /// Whether the field takes free text.
    pub fn is_text(&self) -> bool {
        !matches!(self, Self::Method | Self::IgnoreLongshots)
    }
}

/// Which list the market picker is showing.
#[derive(Debug, Clone, PartialEq)]
pub enum Picker {
    EventTypes {
        options: Phase<Vec<EventType>>,
        selected: usize,
    },
    Markets {
        event_type: EventType,
        options: Phase<Vec<MarketInfo>>,
        selected: usize,
    },
}

impl Picker {
    /// Number of options currently listed.
    pub fn len(&self) -> usize {
        match self {
            Self::EventTypes { options, .. } => options.loaded().map_or(0, Vec::len),
            Self::Markets { options, .. } => options.loaded().map_or(0, Vec::len),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn selected(&self) -> usize {
        match self {
            Self::EventTypes { selected, .. } | Self::Markets { selected, .. } => *selected,
        }
    }

    /// Move the highlighted option by `delta`, clamped to the list.
    pub fn scroll(&mut self, delta: i32) {
        let max = self.len().saturating_sub(1) as i32;
        let selected = match self {
            Self::EventTypes { selected, .. } | Self::Markets { selected, .. } => selected,
        };
        *selected = (*selected as i32 + delta).clamp(0, max) as usize;
    }
}

/// Create form contents and cursor.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateFormState {
    pub market_id: String,
    pub name: String,
    pub method: AllocationMethod,
    /// Leave out runners nobody will lay.
    pub ignore_longshots: bool,
    pub competition: String,
    pub participants: Vec<String>,
    pub focus: FormField,
    /// Market picker overlay, when open.
    pub picker: Option<Picker>,
    /// Whether a create request is in flight.
    pub submitting: bool,
}

impl Default for CreateFormState {
    fn default() -> Self {
        Self {
            market_id: String::new(),
            name: String::new(),
            method: AllocationMethod::default(),
            ignore_longshots: false,
            competition: String::new(),
            participants: vec![String::new()],
            focus: FormField::MarketId,
            picker: None,
            submitting: false,
        }
    }
}

impl CreateFormState {
    /// Fields in tab order.
    pub fn fields(&self) -> Vec<FormField> {
        let mut fields = vec![
            FormField::MarketId,
            FormField::Name,
            FormField::Method,
            FormField::IgnoreLongshots,
            FormField::Competition,
        ];
        fields.extend((0..self.participants.len()).map(FormField::Participant));
        fields
    }

    /// Focus the next field, wrapping.
    pub fn focus_next(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + 1) % fields.len()];
    }

    /// Focus the previous field, wrapping.
    pub fn focus_previous(&mut self) {
        let fields = self.fields();
        let index = fields.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = fields[(index + fields.len() - 1) % fields.len()];
    }

    /// The text buffer behind the focused field, if it is a text field.
    pub fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            FormField::MarketId => Some(&mut self.market_id),
            FormField::Name => Some(&mut self.name),
            FormField::Competition => Some(&mut self.competition),
            FormField::Participant(i) => self.participants.get_mut(i),
            FormField::Method | FormField::IgnoreLongshots => None,
        }
    }

    pub fn push_char(&mut self, c: char) {
        if let Some(text) = self.focused_text_mut() {
            text.push(c);
        }
    }

    pub fn pop_char(&mut self) {
        if let Some(text) = self.focused_text_mut() {
            text.pop();
        }
    }

    /// Change the focused choice field: cycle the method or flip the
    /// longshot switch.
    pub fn cycle_choice(&mut self, forward: bool) {
        match self.focus {
            FormField::Method => {
                self.method = if forward {
                    self.method.next()
                } else {
                    self.method.previous()
                };
            }
            FormField::IgnoreLongshots => self.ignore_longshots = !self.ignore_longshots,
            _ => {}
        }
    }

    /// Append an empty participant and focus it.
    pub fn add_participant(&mut self) {
        self.participants.push(String::new());
        self.focus = FormField::Participant(self.participants.len() - 1);
    }

    /// Remove the focused participant. The last remaining entry is cleared
    /// instead of removed.
    pub fn remove_focused_participant(&mut self) {
        let FormField::Participant(index) = self.focus else {
            return;
        };
        if self.participants.len() <= 1 {
            self.participants[0].clear();
            return;
        }
        self.participants.remove(index);
        let index = index.min(self.participants.len() - 1);
        self.focus = FormField::Participant(index);
    }

    /// Participant names with blank and whitespace-only entries dropped.
    pub fn participant_names(&self) -> Vec<String> {
        self.participants
            .iter()
            .map(|p| p.trim())
            .filter(|p| !p.is_empty())
            .map(str::to_string)
            .collect()
    }

    /// Fill market fields from a picked market.
    pub fn apply_market(&mut self, market: &MarketInfo) {
        self.market_id = market.market_id.clone();
        self.competition = market.competition_name.clone();
        if self.name.trim().is_empty() {
            self.name = market.competition_name.clone();
        }
    }

    /// Validate and build the request body.
    pub fn to_request(&self) -> Result<CreateSweepstakeRequest> {
        let market_id = self.market_id.trim();
        if market_id.is_empty() {
            return Err(Error::validation("market ID is required"));
        }
        let name = self.name.trim();
        if name.is_empty() {
            return Err(Error::validation("name is required"));
        }
        let participant_names = self.participant_names();
        if participant_names.len() < MIN_PARTICIPANTS {
            return Err(Error::validation(format!(
                "at least {MIN_PARTICIPANTS} participants are required"
            )));
        }
        let competition = Some(self.competition.trim())
            .filter(|c| !c.is_empty())
            .map(str::to_string);

        Ok(CreateSweepstakeRequest {
            market_id: market_id.to_string(),
            method: self.method,
            name: name.to_string(),
            participant_names,
            competition,
            ignore_longshots: self.ignore_longshots,
        })
    }

    /// Clear the form after a successful submit.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn filled_form() -> CreateFormState {
        CreateFormState {
            market_id: " 1.234 ".to_string(),
            name: "Office Open".to_string(),
            participants: vec![
                String::new(),
                "Alice".to_string(),
                "  ".to_string(),
                "Bob".to_string(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_blank_participants_filtered() {
        let request = filled_form().to_request().unwrap();
        assert_eq!(request.participant_names, vec!["Alice", "Bob"]);
        assert_eq!(request.market_id, "1.234");
        assert_eq!(request.method, AllocationMethod::Tiered);
        assert_eq!(request.competition, None);
        assert!(!request.ignore_longshots);
    }

    #[test]
    fn test_ignore_longshots_toggle() {
        let mut form = filled_form();
        form.cycle_choice(true);
        assert!(!form.ignore_longshots);

        form.focus = FormField::IgnoreLongshots;
        form.push_char('x');
        form.cycle_choice(false);
        assert!(form.ignore_longshots);
        assert!(form.to_request().unwrap().ignore_longshots);

        form.cycle_choice(true);
        assert!(!form.ignore_longshots);
    }

    #[test]
    fn test_validation() {
        let mut form = filled_form();
        form.participants = vec!["Alice".to_string(), " ".to_string()];
        assert!(matches!(form.to_request(), Err(Error::Validation(_))));

        let mut form = filled_form();
        form.name = "   ".to_string();
        assert!(matches!(form.to_request(), Err(Error::Validation(msg)) if msg.contains("name")));

        let mut form = filled_form();
        form.market_id.clear();
        assert!(matches!(form.to_request(), Err(Error::Validation(msg)) if msg.contains("market")));
    }

    #[test]
    fn test_focus_cycle_and_typing() {
        let mut form = CreateFormState::default();
        form.push_char('1');
        form.focus_next();
        form.push_char('N');
        form.focus_next();
        assert_eq!(form.focus, FormField::Method);
        form.push_char('x');
        form.cycle_choice(true);
        assert_eq!(form.method, AllocationMethod::Staggered);

        form.focus_next();
        assert_eq!(form.focus, FormField::IgnoreLongshots);
        form.focus_next();
        form.focus_next();
        assert_eq!(form.focus, FormField::Participant(0));
        form.focus_next();
        assert_eq!(form.focus, FormField::MarketId);
        form.focus_previous();
        assert_eq!(form.focus, FormField::Participant(0));

        assert_eq!(form.market_id, "1");
        assert_eq!(form.name, "N");
    }

    #[test]
    fn test_add_and_remove_participants() {
        let mut form = CreateFormState::default();
        form.add_participant();
        form.push_char('A');
        form.add_participant();
        form.push_char('B');
        assert_eq!(form.participants, vec!["", "A", "B"]);

        form.focus = FormField::Participant(1);
        form.remove_focused_participant();
        assert_eq!(form.participants, vec!["", "B"]);
        assert_eq!(form.focus, FormField::Participant(1));

        form.remove_focused_participant();
        form.remove_focused_participant();
        assert_eq!(form.participants, vec![""]);
    }

    #[test]
    fn test_apply_market_fills_fields() {
        let mut form = CreateFormState::default();
        form.apply_market(&MarketInfo {
            market_id: "1.555".to_string(),
            market_name: "Winner".to_string(),
            event_name: None,
            competition_name: "US Open".to_string(),
        });
        assert_eq!(form.market_id, "1.555");
        assert_eq!(form.competition, "US Open");
        assert_eq!(form.name, "US Open");

        let request = CreateFormState {
            participants: vec!["A".into(), "B".into()],
            ..form
        }
        .to_request()
        .unwrap();
        assert_eq!(request.competition.as_deref(), Some("US Open"));
    }

    #[test]
    fn test_picker_scroll_clamps() {
        let mut picker = Picker::EventTypes {
            options: Phase::Loaded(vec![
                EventType { id: "1".into(), name: "Soccer".into() },
                EventType { id: "3".into(), name: "Golf".into() },
            ]),
            selected: 0,
        };
        picker.scroll(5);
        assert_eq!(picker.selected(), 1);
        picker.scroll(-9);
        assert_eq!(picker.selected(), 0);
    }
}
