//! Message component helpers.

use twilight_model::channel::message::component::Component;

/// Return `components` with every button and select menu disabled.
///
/// Action rows are walked recursively; other component kinds are kept as-is.
pub fn disable_components(components: &[Component]) -> Vec<Component> {
    components.iter().cloned().map(disable_component).collect()
}

fn disable_component(component: Component) -> Component {
    match component {
        Component::ActionRow(mut row) => {
            row.components = disable_components(&row.components);
            Component::ActionRow(row)
        }
        Component::Button(mut button) => {
            button.disabled = true;
            Component::Button(button)
        }
        Component::SelectMenu(mut menu) => {
            menu.disabled = true;
            Component::SelectMenu(menu)
        }
        other => other,
    }
}
