//! Parameter editor plumbing.
//!
//! Each parameter row owns a [`Draft`] of its parameter. Leaf widgets
//! (slider, text field, switch) carry a [`ParamTarget`] pointing back at
//! the row and report edits through their own events; the observers here
//! translate those into draft transitions:
//!
//! - live events ([`SliderDragged`], [`TextFieldEdited`]) only move the
//!   draft and never reach the owner;
//! - finishing events ([`SliderReleased`], [`TextFieldBlurred`],
//!   [`SwitchToggled`]) commit, producing a [`ParameterCommitted`] event
//!   that carries the pre-commit snapshot and the new value.
//!
//! Committed values are queued in [`PendingCommits`] and written back into
//! the owner's [`ParameterSet`] by an exclusive system, which bumps the set
//! revision so rows re-seed their drafts on the next sync.
//!
//! Numeric raw text is passed through the [`ParameterValidator`] exactly
//! once, at commit time; keystrokes are never validated.

use bevy::ecs::entity::Entity;
use bevy::ecs::event::Event;
use bevy::ecs::observer::On;
use bevy::prelude::*;

use crate::panel::config::PanelConfig;
use crate::panel::state::ParameterSet;
use crate::panel::validate::ParameterValidator;
use crate::parameter::draft::{Commit, Draft};
use crate::parameter::{ParamKind, ParamValue};

use super::slider::{ParamSlider, SliderDragged, SliderFill, SliderReleased, refresh_slider};
use super::text_field::{TextField, TextFieldBlurred, TextFieldEdited};
use super::toggle::{SwitchToggled, ToggleSwitch, refresh_switch};

/// A parameter editor row: owns the draft and remembers which
/// [`ParameterSet`] revision seeded it.
#[derive(Component)]
pub struct ParameterEditor {
    pub draft: Draft,
    pub seen_revision: u64,
}

/// Locates the editor row (and list element, for list kinds) that a leaf
/// widget edits.
#[derive(Component, Clone, Copy, Debug)]
pub struct ParamTarget {
    /// The editor row entity.
    pub row: Entity,
    /// The element index, for widgets editing one element of a list.
    pub index: Option<usize>,
}

/// A finished edit, carried to the owner. `commit.previous` is the draft
/// as it was before the new value was applied.
#[derive(Event, Clone, Debug)]
pub struct ParameterCommitted {
    /// The editor row that produced the commit.
    pub source: Entity,
    pub commit: Commit,
}

/// A row's draft changed (live edit or commit); widget visuals refresh
/// from it.
#[derive(Event, Clone, Debug)]
pub struct DraftChanged {
    pub row: Entity,
}

/// Commits queued for the write-back system.
#[derive(Resource, Default)]
pub struct PendingCommits {
    pub commits: Vec<ParameterCommitted>,
}

/// Display format for numeric field text.
pub(crate) fn format_number(value: f64) -> String {
    format!("{value:.2}")
}

// Observer: live slider motion moves the draft only.
pub(crate) fn editor_on_slider_dragged(
    trigger: On<SliderDragged>,
    targets: Query<&ParamTarget>,
    mut editors: Query<&mut ParameterEditor>,
    mut commands: Commands,
) {
    let Ok(target) = targets.get(trigger.source) else {
        return;
    };
    let Ok(mut editor) = editors.get_mut(target.row) else {
        return;
    };

    let applied = match (editor.draft.param().effective_kind(), target.index) {
        (ParamKind::Number, None) => {
            editor.draft.set_value(ParamValue::Number(trigger.value));
            true
        }
        (ParamKind::NumberList, Some(index)) => editor
            .draft
            .set_element(index, ParamValue::Number(trigger.value)),
        _ => false,
    };

    if applied {
        commands.trigger(DraftChanged { row: target.row });
    }
}

// Observer: releasing the slider finishes the edit.
pub(crate) fn editor_on_slider_released(
    trigger: On<SliderReleased>,
    targets: Query<&ParamTarget>,
    mut editors: Query<&mut ParameterEditor>,
    mut commands: Commands,
) {
    let Ok(target) = targets.get(trigger.source) else {
        return;
    };
    let Ok(mut editor) = editors.get_mut(target.row) else {
        return;
    };

    let commit = match (editor.draft.param().effective_kind(), target.index) {
        (ParamKind::Number, None) => Some(editor.draft.commit(ParamValue::Number(trigger.value))),
        (ParamKind::NumberList, Some(index)) => editor
            .draft
            .commit_element(index, ParamValue::Number(trigger.value)),
        _ => None,
    };

    if let Some(commit) = commit {
        commands.trigger(ParameterCommitted {
            source: target.row,
            commit,
        });
        commands.trigger(DraftChanged { row: target.row });
    }
}

// Observer: keystrokes reach the draft only where the draft can hold raw
// text. Numeric buffers stay in the widget until validated at blur.
pub(crate) fn editor_on_text_edited(
    trigger: On<TextFieldEdited>,
    targets: Query<&ParamTarget>,
    mut editors: Query<&mut ParameterEditor>,
    mut commands: Commands,
) {
    let Ok(target) = targets.get(trigger.source) else {
        return;
    };
    let Ok(mut editor) = editors.get_mut(target.row) else {
        return;
    };

    let applied = match (editor.draft.param().effective_kind(), target.index) {
        (ParamKind::Text, None) => {
            editor.draft.set_value(ParamValue::Text(trigger.text.clone()));
            true
        }
        (ParamKind::TextList, Some(index)) => editor
            .draft
            .set_element(index, ParamValue::Text(trigger.text.clone())),
        _ => false,
    };

    if applied {
        commands.trigger(DraftChanged { row: target.row });
    }
}

// Observer: blur finishes a text edit. Numeric text goes through the
// validator; the committed value is the validator's return, never the raw
// text. Plain text commits as-is.
pub(crate) fn editor_on_text_blurred(
    trigger: On<TextFieldBlurred>,
    targets: Query<&ParamTarget>,
    mut editors: Query<&mut ParameterEditor>,
    validator: Res<ParameterValidator>,
    mut commands: Commands,
) {
    let Ok(target) = targets.get(trigger.source) else {
        return;
    };
    let Ok(mut editor) = editors.get_mut(target.row) else {
        return;
    };

    let commit = match (editor.draft.param().effective_kind(), target.index) {
        (ParamKind::Number, None) => {
            let next = validator.validate(editor.draft.param(), &trigger.text);
            Some(editor.draft.commit(next))
        }
        (ParamKind::NumberList, Some(index)) => {
            // The validator sees the element through its scalar view,
            // which carries the per-element default.
            match editor.draft.param().element_view(index) {
                Some(view) => {
                    let next = validator.validate(&view, &trigger.text);
                    editor.draft.commit_element(index, next)
                }
                None => None,
            }
        }
        (ParamKind::Text, None) => {
            Some(editor.draft.commit(ParamValue::Text(trigger.text.clone())))
        }
        (ParamKind::TextList, Some(index)) => editor
            .draft
            .commit_element(index, ParamValue::Text(trigger.text.clone())),
        _ => None,
    };

    if let Some(commit) = commit {
        commands.trigger(ParameterCommitted {
            source: target.row,
            commit,
        });
        commands.trigger(DraftChanged { row: target.row });
    }
}

// Observer: a switch click commits the flipped value immediately; booleans
// have no live phase.
pub(crate) fn editor_on_switch_toggled(
    trigger: On<SwitchToggled>,
    targets: Query<&ParamTarget>,
    mut editors: Query<&mut ParameterEditor>,
    mut commands: Commands,
) {
    // Switches without a target (the projection toggle) are not ours.
    let Ok(target) = targets.get(trigger.source) else {
        return;
    };
    let Ok(mut editor) = editors.get_mut(target.row) else {
        return;
    };

    let commit = match (editor.draft.param().effective_kind(), target.index) {
        (ParamKind::Bool, None) => Some(editor.draft.commit(ParamValue::Bool(trigger.on))),
        (ParamKind::BoolList, Some(index)) => editor
            .draft
            .commit_element(index, ParamValue::Bool(trigger.on)),
        _ => None,
    };

    if let Some(commit) = commit {
        commands.trigger(ParameterCommitted {
            source: target.row,
            commit,
        });
        commands.trigger(DraftChanged { row: target.row });
    }
}

// Observer: push the draft's value back into the row's widget visuals.
// Fields that are mid-edit keep their buffer.
pub(crate) fn refresh_row_widgets(
    trigger: On<DraftChanged>,
    editors: Query<&ParameterEditor>,
    targets: Query<(Entity, &ParamTarget)>,
    mut q_slider: Query<(&mut ParamSlider, &Children)>,
    mut q_fill: Query<&mut Node, With<SliderFill>>,
    mut q_field: Query<&mut TextField>,
    mut q_switch: Query<
        (&mut ToggleSwitch, &mut Node, &mut BackgroundColor),
        Without<SliderFill>,
    >,
    config: Res<PanelConfig>,
) {
    let Ok(editor) = editors.get(trigger.row) else {
        return;
    };

    for (entity, target) in &targets {
        if target.row != trigger.row {
            continue;
        }
        let value = match target.index {
            None => Some(editor.draft.value().clone()),
            Some(index) => editor.draft.value().element(index),
        };
        let Some(value) = value else {
            continue;
        };

        match value {
            ParamValue::Number(v) => {
                if let Ok((mut slider, children)) = q_slider.get_mut(entity) {
                    refresh_slider(v, &mut slider, children, &mut q_fill);
                } else if let Ok(mut field) = q_field.get_mut(entity)
                    && !field.editing
                {
                    let shown = format_number(v);
                    if field.text != shown {
                        field.text = shown;
                    }
                }
            }
            ParamValue::Bool(v) => {
                if let Ok((mut switch, mut node, mut background)) = q_switch.get_mut(entity) {
                    refresh_switch(v, &mut switch, &mut node, &mut background, &config);
                }
            }
            ParamValue::Text(v) => {
                if let Ok(mut field) = q_field.get_mut(entity)
                    && !field.editing
                    && field.text != v
                {
                    field.text = v;
                }
            }
            // list values only reach widgets through their elements
            _ => {}
        }
    }
}

// Observer that queues commits for the write-back system.
pub(crate) fn queue_commit(trigger: On<ParameterCommitted>, mut pending: ResMut<PendingCommits>) {
    pending.commits.push(trigger.event().clone());
}

/// Exclusive system that writes queued commits back into the owner's
/// [`ParameterSet`]. Accepting a commit bumps the set revision, which
/// re-seeds the affected rows on the next sync.
pub fn apply_pending_commits(world: &mut World) {
    // Take pending commits to avoid borrow issues
    let commits = {
        let mut pending = world.resource_mut::<PendingCommits>();
        std::mem::take(&mut pending.commits)
    };

    for committed in commits {
        let name = committed.commit.previous.name.clone();
        let mut set = world.resource_mut::<ParameterSet>();
        if let Err(err) = set.set_value(&name, committed.commit.next.clone()) {
            warn!("dropping commit: {err}");
        }
    }
}
