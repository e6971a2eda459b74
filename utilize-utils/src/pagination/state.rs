//! Pure pager state: current index plus the derived five-button row.

use std::sync::Arc;

use utilize_core::{UtilizeError, UtilizeResult};

const ID_PREFIX: &str = "pager";

/// A navigation button press.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavAction {
    First,
    Prev,
    Next,
    Last,
}

impl NavAction {
    pub const ALL: [Self; 4] = [Self::First, Self::Prev, Self::Next, Self::Last];

    fn segment(self) -> &'static str {
        match self {
            Self::First => "first",
            Self::Prev => "prev",
            Self::Next => "next",
            Self::Last => "last",
        }
    }

    /// Custom ID carried by the button for this action.
    pub fn custom_id(self) -> String {
        format!("{ID_PREFIX}:{}", self.segment())
    }

    /// Parse a button custom ID. The label button and foreign IDs yield `None`.
    pub fn from_custom_id(custom_id: &str) -> Option<Self> {
        let segment = custom_id.strip_prefix(ID_PREFIX)?.strip_prefix(':')?;
        Self::ALL
            .into_iter()
            .find(|action| action.segment() == segment)
    }
}

/// Custom ID of the non-interactive page label button.
pub fn label_custom_id() -> String {
    format!("{ID_PREFIX}:label")
}

/// Position of a button in the row.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavSlot {
    First,
    Prev,
    Label,
    Next,
    Last,
}

/// Render-ready description of one pager button.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct NavButton {
    pub slot: NavSlot,
    pub custom_id: String,
    pub label: String,
    pub enabled: bool,
}

/// The fixed `first, prev, label, next, last` row.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ButtonRow {
    pub buttons: [NavButton; 5],
}

impl ButtonRow {
    /// Derive the row for `index` out of `total` pages.
    pub fn for_page(index: usize, total: usize) -> Self {
        let can_go_back = index > 0;
        let can_go_forward = index + 1 < total;

        let nav = |slot, action: NavAction, label: &str, enabled| NavButton {
            slot,
            custom_id: action.custom_id(),
            label: label.to_owned(),
            enabled,
        };

        Self {
            buttons: [
                nav(NavSlot::First, NavAction::First, "⏪", can_go_back),
                nav(NavSlot::Prev, NavAction::Prev, "⬅", can_go_back),
                NavButton {
                    slot: NavSlot::Label,
                    custom_id: label_custom_id(),
                    label: format!("[{}/{}]", index + 1, total),
                    enabled: false,
                },
                nav(NavSlot::Next, NavAction::Next, "➡", can_go_forward),
                nav(NavSlot::Last, NavAction::Last, "⏩", can_go_forward),
            ],
        }
    }

    /// The same row with every button disabled.
    pub fn disabled(&self) -> Self {
        let mut row = self.clone();
        for button in &mut row.buttons {
            button.enabled = false;
        }
        row
    }

    pub fn get(&self, slot: NavSlot) -> &NavButton {
        let position = match slot {
            NavSlot::First => 0,
            NavSlot::Prev => 1,
            NavSlot::Label => 2,
            NavSlot::Next => 3,
            NavSlot::Last => 4,
        };
        &self.buttons[position]
    }

    pub fn label(&self) -> &str {
        &self.get(NavSlot::Label).label
    }
}

/// Current page of a non-empty, immutable page set.
///
/// The index is always a valid position in `pages`, and [`Self::buttons`]
/// is recomputed from it on every call.
#[derive(Debug)]
pub struct PagerState<T> {
    pages: Arc<[T]>,
    index: usize,
}

impl<T> Clone for PagerState<T> {
    fn clone(&self) -> Self {
        Self {
            pages: Arc::clone(&self.pages),
            index: self.index,
        }
    }
}

impl<T> PagerState<T> {
    /// Start on the first page. An empty page set is rejected.
    pub fn new(pages: impl Into<Arc<[T]>>) -> UtilizeResult<Self> {
        let pages = pages.into();
        if pages.is_empty() {
            return Err(UtilizeError::invalid("a pager needs at least one page"));
        }

        Ok(Self { pages, index: 0 })
    }

    /// Apply a button press and return the new index.
    pub fn apply(&mut self, action: NavAction) -> usize {
        let last = self.pages.len() - 1;
        self.index = match action {
            NavAction::First => 0,
            NavAction::Prev => self.index.saturating_sub(1),
            NavAction::Next => (self.index + 1).min(last),
            NavAction::Last => last,
        };
        self.index
    }

    pub fn current_index(&self) -> usize {
        self.index
    }

    pub fn current_page(&self) -> &T {
        &self.pages[self.index]
    }

    /// Number of pages; always at least one.
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn pages(&self) -> &Arc<[T]> {
        &self.pages
    }

    pub fn buttons(&self) -> ButtonRow {
        ButtonRow::for_page(self.index, self.pages.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enabled(row: &ButtonRow) -> [bool; 5] {
        row.buttons.each_ref().map(|button| button.enabled)
    }

    #[test]
    fn empty_page_set_is_rejected() {
        assert!(matches!(
            PagerState::<u8>::new(Vec::new()),
            Err(UtilizeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn fresh_pager_can_only_move_forward() {
        for total in 2..6 {
            let state = PagerState::new((0..total).collect::<Vec<_>>()).unwrap();
            let row = state.buttons();

            assert_eq!(enabled(&row), [false, false, false, true, true]);
            assert_eq!(row.label(), format!("[1/{total}]"));
        }
    }

    #[test]
    fn single_page_disables_everything() {
        let state = PagerState::new(vec!["only"]).unwrap();
        assert_eq!(enabled(&state.buttons()), [false; 5]);
        assert_eq!(state.buttons().label(), "[1/1]");
    }

    #[test]
    fn last_page_can_only_move_back() {
        let mut state = PagerState::new(vec![1, 2, 3]).unwrap();
        assert_eq!(state.apply(NavAction::Last), 2);

        assert_eq!(enabled(&state.buttons()), [true, true, false, false, false]);
        assert_eq!(state.current_page(), &3);
    }

    #[test]
    fn middle_page_enables_both_directions() {
        let mut state = PagerState::new(vec![1, 2, 3]).unwrap();
        state.apply(NavAction::Next);

        assert_eq!(enabled(&state.buttons()), [true, true, false, true, true]);
        assert_eq!(state.buttons().label(), "[2/3]");
    }

    #[test]
    fn transitions_clamp_and_keep_the_row_consistent() {
        let mut state = PagerState::new((0..4).collect::<Vec<_>>()).unwrap();
        let script = [
            NavAction::Prev,
            NavAction::First,
            NavAction::Next,
            NavAction::Next,
            NavAction::Next,
            NavAction::Next,
            NavAction::Last,
            NavAction::Prev,
            NavAction::First,
            NavAction::Prev,
        ];
        let expected = [0, 0, 1, 2, 3, 3, 3, 2, 0, 0];

        for (action, want) in script.into_iter().zip(expected) {
            let index = state.apply(action);
            let row = state.buttons();

            assert_eq!(index, want);
            assert!(index < state.page_count());
            assert_eq!(row.label(), format!("[{}/4]", index + 1));
            assert_eq!(row.get(NavSlot::Prev).enabled, index > 0);
            assert_eq!(row.get(NavSlot::Last).enabled, index < 3);
            assert!(!row.get(NavSlot::Label).enabled);
        }
    }

    #[test]
    fn custom_ids_round_trip_and_ignore_the_label() {
        for action in NavAction::ALL {
            assert_eq!(NavAction::from_custom_id(&action.custom_id()), Some(action));
        }
        assert_eq!(NavAction::from_custom_id(&label_custom_id()), None);
        assert_eq!(NavAction::from_custom_id("pager:next:extra"), None);
        assert_eq!(NavAction::from_custom_id("menu:next"), None);
    }

    #[test]
    fn disabled_row_keeps_labels() {
        let state = PagerState::new(vec![1, 2]).unwrap();
        let row = state.buttons().disabled();

        assert_eq!(enabled(&row), [false; 5]);
        assert_eq!(row.label(), "[1/2]");
    }
}
