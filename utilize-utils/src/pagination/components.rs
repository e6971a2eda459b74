//! Pager row component builders.

use twilight_model::channel::message::component::{ActionRow, Button, ButtonStyle, Component};

use super::state::{ButtonRow, NavButton, NavSlot};

/// Build the action row for a pager button row.
pub fn build_nav_components(row: &ButtonRow) -> Vec<Component> {
    vec![Component::ActionRow(ActionRow {
        id: None,
        components: row
            .buttons
            .iter()
            .map(|button| Component::Button(build_nav_button(button)))
            .collect(),
    })]
}

fn build_nav_button(button: &NavButton) -> Button {
    let style = match button.slot {
        NavSlot::Label => ButtonStyle::Secondary,
        _ => ButtonStyle::Primary,
    };

    Button {
        id: None,
        custom_id: Some(button.custom_id.clone()),
        disabled: !button.enabled,
        emoji: None,
        label: Some(button.label.clone()),
        style,
        url: None,
        sku_id: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pagination::state::PagerState;

    #[test]
    fn row_maps_to_five_buttons_in_order() {
        let state = PagerState::new(vec!["a", "b"]).unwrap();
        let components = build_nav_components(&state.buttons());

        let [Component::ActionRow(row)] = components.as_slice() else {
            panic!("expected a single action row");
        };

        let buttons: Vec<&Button> = row
            .components
            .iter()
            .filter_map(|component| match component {
                Component::Button(button) => Some(button),
                _ => None,
            })
            .collect();

        assert_eq!(buttons.len(), 5);
        assert_eq!(buttons[2].label.as_deref(), Some("[1/2]"));
        assert_eq!(buttons[2].style, ButtonStyle::Secondary);
        assert_eq!(
            buttons.iter().map(|b| b.disabled).collect::<Vec<_>>(),
            vec![true, true, true, false, false]
        );
        assert_eq!(buttons[3].custom_id.as_deref(), Some("pager:next"));
    }
}
