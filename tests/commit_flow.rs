//! Commit round-trip through the widget plumbing and the owner write-back,
//! driven through a headless app.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use bevy::ecs::observer::On;
use bevy::prelude::*;

use feathers_param_panel::panel::widgets::{
    PanelWidgetsPlugin, ParamTarget, ParameterEditor, SliderDragged, SwitchToggled,
    TextFieldBlurred,
};
use feathers_param_panel::panel::{ParameterCommitted, ParameterSet, ParameterValidator};
use feathers_param_panel::{Draft, ParamValue, Parameter};

#[derive(Resource, Default)]
struct SeenCommits(Vec<ParameterCommitted>);

fn record_commits(trigger: On<ParameterCommitted>, mut seen: ResMut<SeenCommits>) {
    seen.0.push(trigger.event().clone());
}

/// A headless app with the widget plumbing, one editor row for `param`,
/// and one leaf widget entity targeting it.
fn app_with_row(param: Parameter, index: Option<usize>) -> (App, Entity, Entity) {
    let mut app = App::new();
    app.add_plugins(PanelWidgetsPlugin);
    app.init_resource::<SeenCommits>();
    app.add_observer(record_commits);
    app.insert_resource(ParameterSet::new(vec![param.clone()]));

    let row = app
        .world_mut()
        .spawn(ParameterEditor {
            draft: Draft::new(param),
            seen_revision: 1,
        })
        .id();
    let widget = app.world_mut().spawn(ParamTarget { row, index }).id();
    (app, row, widget)
}

#[test]
fn numeric_blur_validates_once_and_commits_the_validators_return() {
    let param = Parameter::number("width", "Width", 5.0, 0.0);
    let (mut app, _row, widget) = app_with_row(param, None);

    let calls = Arc::new(AtomicUsize::new(0));
    let seen_args = Arc::new(Mutex::new(Vec::new()));
    let calls_in = calls.clone();
    let args_in = seen_args.clone();
    app.insert_resource(ParameterValidator::new(move |param, raw| {
        calls_in.fetch_add(1, Ordering::SeqCst);
        args_in
            .lock()
            .unwrap()
            .push((param.value.clone(), raw.to_string()));
        ParamValue::Number(raw.trim().parse().unwrap_or(-1.0))
    }));

    app.world_mut().trigger(TextFieldBlurred {
        source: widget,
        text: "12".to_string(),
    });

    // Validator called exactly once, with the pre-commit draft and the raw text.
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(
        seen_args.lock().unwrap().as_slice(),
        &[(ParamValue::Number(5.0), "12".to_string())]
    );

    // The commit carries the pre-commit snapshot and the validated value.
    {
        let seen = app.world().resource::<SeenCommits>();
        assert_eq!(seen.0.len(), 1);
        assert_eq!(seen.0[0].commit.previous.value, ParamValue::Number(5.0));
        assert_eq!(seen.0[0].commit.next, ParamValue::Number(12.0));
    }

    // The write-back system hands the value to the owner and bumps the
    // revision.
    app.update();
    let set = app.world().resource::<ParameterSet>();
    assert_eq!(set.get("width").unwrap().value, ParamValue::Number(12.0));
    assert_eq!(set.revision(), 2);
}

#[test]
fn toggling_one_list_element_commits_the_whole_list() {
    let param = Parameter::bool_list("flags", "Flags", vec![true, false, true]);
    let (mut app, _row, widget) = app_with_row(param, Some(1));

    app.world_mut().trigger(SwitchToggled {
        source: widget,
        on: true,
    });

    {
        let seen = app.world().resource::<SeenCommits>();
        assert_eq!(seen.0.len(), 1);
        assert_eq!(
            seen.0[0].commit.previous.value,
            ParamValue::BoolList(vec![true, false, true])
        );
        assert_eq!(
            seen.0[0].commit.next,
            ParamValue::BoolList(vec![true, true, true])
        );
    }

    app.update();
    let set = app.world().resource::<ParameterSet>();
    assert_eq!(
        set.get("flags").unwrap().value,
        ParamValue::BoolList(vec![true, true, true])
    );
}

#[test]
fn live_slider_motion_never_reaches_the_owner() {
    let param = Parameter::number("width", "Width", 5.0, 10.0);
    let (mut app, row, widget) = app_with_row(param, None);

    app.world_mut().trigger(SliderDragged {
        source: widget,
        value: 9.0,
    });
    app.update();

    // The draft moved...
    let editor = app.world().get::<ParameterEditor>(row).unwrap();
    assert_eq!(editor.draft.value(), &ParamValue::Number(9.0));

    // ...but no commit fired and the owner saw nothing.
    assert!(app.world().resource::<SeenCommits>().0.is_empty());
    let set = app.world().resource::<ParameterSet>();
    assert_eq!(set.get("width").unwrap().value, ParamValue::Number(5.0));
    assert_eq!(set.revision(), 1);
}

#[test]
fn commits_for_unknown_parameters_are_dropped() {
    let param = Parameter::boolean("ghost", "Ghost", false);
    let (mut app, _row, widget) = app_with_row(param, None);
    // The owner's set does not contain "ghost".
    app.insert_resource(ParameterSet::new(vec![Parameter::number(
        "width", "Width", 5.0, 0.0,
    )]));

    app.world_mut().trigger(SwitchToggled {
        source: widget,
        on: true,
    });
    app.update();

    // The commit fired but the owner dropped it.
    assert_eq!(app.world().resource::<SeenCommits>().0.len(), 1);
    let set = app.world().resource::<ParameterSet>();
    assert_eq!(set.get("width").unwrap().value, ParamValue::Number(5.0));
    assert_eq!(set.revision(), 1);
}
