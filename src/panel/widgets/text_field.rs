//! Single-line text field widget.
//!
//! Clicking a field focuses it and seeds an edit buffer from the displayed
//! text with select-all semantics (the first keystroke replaces the whole
//! buffer, matching a focused-and-selected native input). Keystrokes edit
//! the buffer and report [`TextFieldEdited`]; Enter blurs the field, and
//! blur finishes the edit with [`TextFieldBlurred`]; Escape reverts to the
//! pre-edit text without reporting anything. Clicking anywhere else also
//! blurs the focused field.

use bevy::ecs::entity::Entity;
use bevy::ecs::event::Event;
use bevy::ecs::observer::On;
use bevy::ecs::relationship::Relationship;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput};
use bevy::input_focus::{FocusedInput, InputFocus};
use bevy::picking::events::{Click, Pointer};
use bevy::prelude::*;

use crate::panel::config::PanelConfig;

/// A single-line editable text field.
#[derive(Component)]
pub struct TextField {
    /// Committed/displayed text.
    pub text: String,
    /// Whether in edit mode (focused).
    pub editing: bool,
    /// Edit buffer shown while editing.
    pub buffer: String,
    /// Select-all semantics: the next keystroke replaces the buffer.
    pub select_all: bool,
    /// Pre-edit text, restored on Escape.
    original: String,
}

impl TextField {
    pub fn new(text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            original: text.clone(),
            text,
            editing: false,
            buffer: String::new(),
            select_all: false,
        }
    }

    /// What the field currently displays.
    pub fn display(&self, placeholder: Option<&Placeholder>) -> String {
        if self.editing {
            // trailing bar as a cursor indicator
            format!("{}|", self.buffer)
        } else if self.text.is_empty()
            && let Some(placeholder) = placeholder
        {
            placeholder.0.clone()
        } else {
            self.text.clone()
        }
    }
}

/// Optional placeholder shown while the field is empty and unfocused.
#[derive(Component)]
pub struct Placeholder(pub String);

/// Marker for the field's text child.
#[derive(Component)]
pub struct FieldGlyphs;

/// Live keystroke in a focused field.
#[derive(Event, Clone, Debug)]
pub struct TextFieldEdited {
    pub source: Entity,
    pub text: String,
}

/// The field lost focus; `text` is the raw buffer for the finished edit.
#[derive(Event, Clone, Debug)]
pub struct TextFieldBlurred {
    pub source: Entity,
    pub text: String,
}

/// Builds a text field bundle. `overrides` attaches caller components (an
/// edit target, a placeholder, a marker) to the field entity.
pub fn text_field(
    text: impl Into<String>,
    width: Val,
    overrides: impl Bundle,
    config: &PanelConfig,
) -> impl Bundle {
    let field = TextField::new(text);
    let shown = field.text.clone();
    (
        Node {
            width,
            height: config.widget_height,
            flex_shrink: 0.0,
            padding: UiRect::horizontal(Val::Px(4.0)),
            align_items: AlignItems::Center,
            border: UiRect::all(Val::Px(1.0)),
            ..default()
        },
        BorderColor::all(config.border_color),
        BackgroundColor(config.field_bg_color),
        field,
        Interaction::default(),
        overrides,
        children![(
            Text::new(shown),
            TextFont {
                font_size: config.body_font_size,
                ..default()
            },
            TextColor(config.text_color),
            Pickable::IGNORE,
            FieldGlyphs,
        )],
    )
}

/// Finishes (or cancels) an edit and releases focus.
fn blur_field(
    entity: Entity,
    field: &mut TextField,
    commit: bool,
    input_focus: &mut ResMut<InputFocus>,
    commands: &mut Commands,
) {
    field.editing = false;
    if commit {
        field.text = field.buffer.clone();
        commands.trigger(TextFieldBlurred {
            source: entity,
            text: field.buffer.clone(),
        });
    } else {
        field.text = field.original.clone();
    }
    field.buffer.clear();
    if input_focus.get() == Some(entity) {
        input_focus.clear();
    }
}

// Observer: a click focuses the field under it and blurs any previously
// focused field, wherever the click lands.
pub(crate) fn text_field_on_click(
    mut click: On<Pointer<Click>>,
    mut q_field: Query<&mut TextField>,
    parents: Query<&ChildOf>,
    mut input_focus: ResMut<InputFocus>,
    mut commands: Commands,
) {
    // The click may land on the field's text child; walk up to the field.
    let mut current = click.entity;
    let clicked_field = loop {
        if q_field.contains(current) {
            break Some(current);
        }
        match parents.get(current) {
            Ok(child_of) => current = child_of.get(),
            Err(_) => break None,
        }
    };

    // Blur-on-click-elsewhere: finish the edit in any other focused field.
    if let Some(focused) = input_focus.get()
        && Some(focused) != clicked_field
        && let Ok(mut field) = q_field.get_mut(focused)
        && field.editing
    {
        blur_field(focused, &mut field, true, &mut input_focus, &mut commands);
    }

    let Some(entity) = clicked_field else {
        return;
    };
    click.propagate(false);

    let Ok(mut field) = q_field.get_mut(entity) else {
        return;
    };
    if field.editing {
        return;
    }

    field.editing = true;
    field.select_all = true;
    field.original = field.text.clone();
    field.buffer = field.text.clone();
    input_focus.set(entity);
}

// Observer: keyboard input for the focused field.
pub(crate) fn text_field_on_keyboard_input(
    trigger: On<FocusedInput<KeyboardInput>>,
    mut q_field: Query<&mut TextField>,
    mut input_focus: ResMut<InputFocus>,
    mut commands: Commands,
) {
    if trigger.input.state != ButtonState::Pressed {
        return;
    }

    let entity = trigger.focused_entity;
    let Ok(mut field) = q_field.get_mut(entity) else {
        return;
    };
    if !field.editing {
        return;
    }

    match &trigger.input.logical_key {
        Key::Enter => {
            blur_field(entity, &mut field, true, &mut input_focus, &mut commands);
        }
        Key::Escape => {
            blur_field(entity, &mut field, false, &mut input_focus, &mut commands);
        }
        Key::Backspace => {
            if field.select_all {
                field.buffer.clear();
                field.select_all = false;
            } else {
                field.buffer.pop();
            }
            let text = field.buffer.clone();
            commands.trigger(TextFieldEdited {
                source: entity,
                text,
            });
        }
        Key::Space => {
            if field.select_all {
                field.buffer.clear();
                field.select_all = false;
            }
            field.buffer.push(' ');
            let text = field.buffer.clone();
            commands.trigger(TextFieldEdited {
                source: entity,
                text,
            });
        }
        Key::Character(c) => {
            if field.select_all {
                field.buffer.clear();
                field.select_all = false;
            }
            field.buffer.push_str(c);
            let text = field.buffer.clone();
            commands.trigger(TextFieldEdited {
                source: entity,
                text,
            });
        }
        _ => {}
    }
}

// System: keep the text child in sync with the field state.
pub(crate) fn sync_field_display(
    q_field: Query<(&TextField, Option<&Placeholder>, &Children), Changed<TextField>>,
    mut q_text: Query<&mut Text, With<FieldGlyphs>>,
) {
    for (field, placeholder, children) in &q_field {
        for child in children.iter() {
            if let Ok(mut text) = q_text.get_mut(child) {
                text.0 = field.display(placeholder);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_shows_buffer_with_cursor_while_editing() {
        let mut field = TextField::new("5");
        assert_eq!(field.display(None), "5");
        field.editing = true;
        field.buffer = "12".into();
        assert_eq!(field.display(None), "12|");
    }

    #[test]
    fn placeholder_only_shows_when_empty_and_unfocused() {
        let placeholder = Placeholder("Filter...".into());
        let mut field = TextField::new("");
        assert_eq!(field.display(Some(&placeholder)), "Filter...");
        field.editing = true;
        assert_eq!(field.display(Some(&placeholder)), "|");
    }
}
