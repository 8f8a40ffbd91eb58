//! Configuration constants for the parameter panel UI.

use bevy::prelude::*;
use bevy::ui::Val;

/// Configuration for panel layout and styling.
#[derive(Resource, Clone)]
pub struct PanelConfig {
    // Layout
    /// Width of the label column on the left of each row.
    pub label_column_width: Val,
    /// Height of the title bar.
    pub title_bar_height: Val,
    /// Width of the numeric text field next to a slider.
    pub field_width: Val,
    /// Width of the unit suffix label.
    pub unit_label_width: Val,
    /// Height of editing widgets (fields, sliders, switches).
    pub widget_height: Val,

    // Spacing
    /// Padding inside panels.
    pub panel_padding: UiRect,
    /// Gap between parameter rows.
    pub row_gap: Val,
    /// Gap between widgets within a row.
    pub widget_gap: Val,

    // Typography
    /// Font size for the title bar.
    pub title_font_size: f32,
    /// Font size for labels and field text.
    pub body_font_size: f32,
    /// Font size for unit suffixes and tooltips.
    pub small_font_size: f32,

    // Colors
    /// Border color.
    pub border_color: Color,
    /// Primary text color (field contents).
    pub text_color: Color,
    /// Muted text color (labels, unit suffixes, placeholders).
    pub muted_text_color: Color,
    /// Field and slider track background.
    pub field_bg_color: Color,
    /// Accent color (slider fill, switch in the on position).
    pub accent_color: Color,
    /// Switch background in the off position.
    pub switch_off_color: Color,
    /// Switch thumb color.
    pub thumb_color: Color,
    /// Tooltip background.
    pub tooltip_bg_color: Color,

    /// Delay before a hover tooltip appears, in milliseconds.
    pub tooltip_delay_ms: u64,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            // Layout
            label_column_width: Val::Px(80.0),
            title_bar_height: Val::Px(36.0),
            field_width: Val::Px(56.0),
            unit_label_width: Val::Px(24.0),
            widget_height: Val::Px(22.0),

            // Spacing
            panel_padding: UiRect::all(Val::Px(8.0)),
            row_gap: Val::Px(6.0),
            widget_gap: Val::Px(8.0),

            // Typography
            title_font_size: 15.0,
            body_font_size: 12.0,
            small_font_size: 11.0,

            // Colors
            border_color: Color::srgba(0.3, 0.3, 0.3, 1.0),
            text_color: Color::srgba(0.92, 0.92, 0.92, 1.0),
            muted_text_color: Color::srgba(0.6, 0.6, 0.6, 1.0),
            field_bg_color: Color::srgba(0.16, 0.16, 0.16, 1.0),
            accent_color: Color::srgba(0.25, 0.5, 0.9, 1.0),
            switch_off_color: Color::srgba(0.28, 0.28, 0.28, 1.0),
            thumb_color: Color::srgba(0.85, 0.85, 0.85, 1.0),
            tooltip_bg_color: Color::srgba(0.1, 0.1, 0.12, 0.95),

            tooltip_delay_ms: 300,
        }
    }
}
