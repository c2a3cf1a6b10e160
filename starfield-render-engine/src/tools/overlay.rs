use bevy::prelude::*;

use crate::engine::scene::catalog::SceneCatalog;
use crate::tools::interaction::{
    GoHomeEvent, InputMode, InteractionSource, InteractionState, SetModeEvent,
};

// Components
#[derive(Component)]
pub struct InfoOverlayRoot;
#[derive(Component)]
pub struct InfoTitleText;
#[derive(Component)]
pub struct InfoDescriptionText;
#[derive(Component)]
pub struct GoHomeButton;
#[derive(Component)]
pub struct ModeToggleButton;
#[derive(Component)]
pub struct ModeToggleLabel;

fn mode_toggle_label(mode: InputMode) -> &'static str {
    match mode {
        InputMode::FreeLook => "Be Still",
        InputMode::Fixed => "Look Around",
    }
}

// Spawns the mode toggle in the top-left corner and the (initially hidden)
// info panel shown while a body is selected
pub fn spawn_overlay(mut commands: Commands, state: Res<InteractionState>) {
    commands
        .spawn((
            ModeToggleButton,
            Name::new("ModeToggleButton"),
            Button,
            BackgroundColor(Color::srgb(0.14, 0.16, 0.20)),
            BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(10.0),
                left: Val::Px(10.0),
                padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                display: Display::Flex,
                align_items: AlignItems::Center,
                justify_content: JustifyContent::Center,
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
        ))
        .with_children(|btn| {
            btn.spawn((
                ModeToggleLabel,
                Text::new(mode_toggle_label(state.mode())),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
        });

    commands
        .spawn((
            InfoOverlayRoot,
            Name::new("PlanetInfoOverlay"),
            BackgroundColor(Color::srgba(0.06, 0.07, 0.10, 0.85)),
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(16.0),
                bottom: Val::Px(16.0),
                width: Val::Px(320.0),
                padding: UiRect::all(Val::Px(16.0)),
                row_gap: Val::Px(8.0),
                display: Display::None,
                flex_direction: FlexDirection::Column,
                align_items: AlignItems::FlexStart,
                ..default()
            },
        ))
        .with_children(|panel| {
            panel.spawn((
                InfoTitleText,
                Text::new(""),
                TextFont {
                    font_size: 22.0,
                    ..default()
                },
                TextColor(Color::srgb(1.0, 1.0, 1.0)),
            ));
            panel.spawn((
                InfoDescriptionText,
                Text::new(""),
                TextFont {
                    font_size: 15.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.90)),
            ));
            panel
                .spawn((
                    GoHomeButton,
                    Name::new("GoHomeButton"),
                    Button,
                    BackgroundColor(Color::srgb(0.22, 0.24, 0.28)),
                    BorderColor(Color::srgba(0.0, 0.0, 0.0, 0.25)),
                    Node {
                        padding: UiRect::axes(Val::Px(12.0), Val::Px(6.0)),
                        display: Display::Flex,
                        align_items: AlignItems::Center,
                        justify_content: JustifyContent::Center,
                        border: UiRect::all(Val::Px(1.0)),
                        ..default()
                    },
                ))
                .with_children(|btn| {
                    btn.spawn((
                        Text::new("Go Back Home"),
                        TextFont {
                            font_size: 16.0,
                            ..default()
                        },
                        TextColor(Color::srgb(1.0, 1.0, 1.0)),
                    ));
                });
        });
}

// Shows/hides the info panel and fills in the selected body's record
pub fn reflect_selection_overlay(
    state: Res<InteractionState>,
    catalog: Res<SceneCatalog>,
    mut roots: Query<&mut Node, With<InfoOverlayRoot>>,
    mut titles: Query<&mut Text, (With<InfoTitleText>, Without<InfoDescriptionText>)>,
    mut descriptions: Query<&mut Text, (With<InfoDescriptionText>, Without<InfoTitleText>)>,
) {
    if !state.is_changed() {
        return;
    }

    let Ok(mut root) = roots.single_mut() else {
        return;
    };
    match state.selected_id() {
        Some(id) => {
            let info = catalog.describe(id);
            root.display = Display::Flex;
            if let Ok(mut title) = titles.single_mut() {
                *title = Text::new(info.title);
            }
            if let Ok(mut description) = descriptions.single_mut() {
                *description = Text::new(info.description);
            }
        }
        None => {
            root.display = Display::None;
        }
    }
}

pub fn reflect_mode_toggle_label(
    state: Res<InteractionState>,
    mut labels: Query<&mut Text, With<ModeToggleLabel>>,
) {
    if !state.is_changed() {
        return;
    }
    for mut label in &mut labels {
        let text = mode_toggle_label(state.mode());
        if label.0 != text {
            *label = Text::new(text);
        }
    }
}

pub fn handle_go_home_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<GoHomeButton>)>,
    mut go_home_events: EventWriter<GoHomeEvent>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            go_home_events.write(GoHomeEvent {
                source: InteractionSource::Ui,
            });
        }
    }
}

pub fn handle_mode_toggle_button(
    interactions: Query<&Interaction, (Changed<Interaction>, With<ModeToggleButton>)>,
    state: Res<InteractionState>,
    mut mode_events: EventWriter<SetModeEvent>,
) {
    for interaction in &interactions {
        if *interaction == Interaction::Pressed {
            mode_events.write(SetModeEvent {
                mode: state.mode().toggled(),
                source: InteractionSource::Ui,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_label_names_the_action_not_the_state() {
        assert_eq!(mode_toggle_label(InputMode::FreeLook), "Be Still");
        assert_eq!(mode_toggle_label(InputMode::Fixed), "Look Around");
    }
}
