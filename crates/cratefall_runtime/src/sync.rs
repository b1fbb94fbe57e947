//! Mirrors the simulation's render frame into Bevy sprites, camera and UI
//!
//! The simulation works in pixels with y pointing down; Bevy's 2D world has y
//! pointing up. Every rectangle goes through [`rect_translation`] on its way
//! out.

use crate::{GameSession, RuntimeAssets, RuntimeConfig};
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use cratefall_sim::{
    Aabb, Animation, Backdrop, CrateDraw, CrateHandle, Facing, OverlayColor, PlayerCharacter,
    RenderFrame, LINE_HEIGHT,
};
use std::collections::HashMap;

const TILE_Z: f32 = 0.0;
const CRATE_Z: f32 = 10.0;
const PLAYER_Z: f32 = 20.0;
const BACKDROP_Z: f32 = -100.0;
const OVERLAY_FONT_SIZE: f32 = 12.0;

/// Tile sprite of the level currently shown
#[derive(Component)]
pub struct TileSprite;

#[derive(Component)]
pub struct CrateSprite(pub CrateHandle);

#[derive(Component)]
pub struct PlayerSprite;

#[derive(Component)]
pub struct BackdropSprite;

/// One line of the debug overlay
#[derive(Component)]
pub struct OverlayText(pub usize);

/// Which level the tile sprites were built for
#[derive(Resource, Debug, Default)]
pub struct ShownLevel(pub Option<(usize, i64)>);

/// Center of a simulation rectangle in Bevy world space
pub fn rect_translation(rect: &Aabb, z: f32) -> Vec3 {
    let center = rect.center();
    Vec3::new(center.x, -center.y, z)
}

/// Camera position showing the view described by `frame`
pub fn camera_translation(frame: &RenderFrame) -> Vec3 {
    let view = Aabb::from_position_size(frame.camera.origin(), frame.camera.viewport);
    rect_translation(&view, 0.0)
}

pub fn overlay_color(color: OverlayColor) -> Color {
    let [r, g, b, a] = color.rgba();
    Color::srgba_u8(r, g, b, a)
}

fn player_color(character: PlayerCharacter, animation: Animation) -> Color {
    let base = match character {
        PlayerCharacter::First => [232, 106, 84],
        PlayerCharacter::Second => [84, 160, 232],
    };
    let alpha = match animation {
        Animation::Idle | Animation::Run => 255,
        Animation::Jump | Animation::Fall => 220,
    };
    Color::srgba_u8(base[0], base[1], base[2], alpha)
}

pub(crate) fn setup_view(
    mut commands: Commands,
    assets: Res<RuntimeAssets>,
    config: Res<RuntimeConfig>,
) {
    commands.spawn((
        Camera2d,
        Projection::Orthographic(OrthographicProjection::default_2d()),
    ));

    let viewport = &config.game.viewport;
    commands.spawn((
        BackdropSprite,
        Sprite {
            image: assets.sky.clone(),
            custom_size: Some(Vec2::new(viewport.width, viewport.height)),
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, BACKDROP_Z),
        Visibility::Hidden,
    ));

    commands.spawn((
        PlayerSprite,
        Sprite::from_color(Color::WHITE, Vec2::ONE),
        Transform::default(),
        Visibility::Hidden,
    ));

    for line in 0..4 {
        commands.spawn((
            OverlayText(line),
            Text::new(""),
            TextFont {
                font_size: OVERLAY_FONT_SIZE,
                ..default()
            },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(4.0),
                top: Val::Px(4.0),
                ..default()
            },
            Visibility::Hidden,
        ));
    }
}

/// Rebuild tile sprites whenever a different level is current
pub(crate) fn sync_tiles(
    mut commands: Commands,
    session: Res<GameSession>,
    assets: Res<RuntimeAssets>,
    mut shown: ResMut<ShownLevel>,
    tiles: Query<Entity, With<TileSprite>>,
) {
    let current = session
        .state
        .as_ref()
        .and_then(|state| state.level().map(|level| (state.level_index(), level.uid())));
    if current == shown.0 {
        return;
    }
    let frame = session.frame.as_ref();
    if current.is_some() && frame.is_none() {
        return;
    }
    for entity in &tiles {
        commands.entity(entity).despawn();
    }
    shown.0 = current;

    let Some(frame) = frame else {
        return;
    };
    // Layers step by whole units; draw order within a layer by fractions
    let total = frame.tiles.len().max(1) as f32;
    let mut layer_z = TILE_Z;
    let mut last_layer = None;
    for (index, tile) in frame.tiles.iter().enumerate() {
        if last_layer != Some(tile.layer) {
            layer_z += 1.0;
            last_layer = Some(tile.layer);
        }
        let z = layer_z + index as f32 / total;
        let src = tile.src;
        commands.spawn((
            TileSprite,
            Sprite {
                image: assets.tiles.clone(),
                rect: Some(Rect::new(src.left(), src.top(), src.right(), src.bottom())),
                flip_x: tile.flip_x,
                flip_y: tile.flip_y,
                custom_size: Some(tile.dst.size()),
                ..default()
            },
            Transform::from_translation(rect_translation(&tile.dst, z)),
        ));
    }
    info!("Spawned {} tile sprites", frame.tiles.len());
}

/// Keep one sprite per live crate
pub(crate) fn sync_crates(
    mut commands: Commands,
    session: Res<GameSession>,
    assets: Res<RuntimeAssets>,
    mut sprites: Query<(Entity, &CrateSprite, &mut Transform)>,
) {
    let mut wanted: HashMap<CrateHandle, &CrateDraw> = session
        .frame
        .as_ref()
        .map(|frame| frame.crates.iter().map(|c| (c.handle, c)).collect())
        .unwrap_or_default();

    for (entity, sprite, mut transform) in &mut sprites {
        match wanted.remove(&sprite.0) {
            Some(draw) => transform.translation = rect_translation(&draw.bounds, CRATE_Z),
            None => commands.entity(entity).despawn(),
        }
    }

    for (handle, draw) in wanted {
        let [x, y] = draw.atlas_src;
        let size = draw.bounds.size();
        commands.spawn((
            CrateSprite(handle),
            Sprite {
                image: assets.tiles.clone(),
                rect: Some(Rect::new(x, y, x + size.x, y + size.y)),
                custom_size: Some(size),
                ..default()
            },
            Transform::from_translation(rect_translation(&draw.bounds, CRATE_Z)),
        ));
    }
}

pub(crate) fn sync_player(
    session: Res<GameSession>,
    mut query: Query<(&mut Sprite, &mut Transform, &mut Visibility), With<PlayerSprite>>,
) {
    let Ok((mut sprite, mut transform, mut visibility)) = query.single_mut() else {
        return;
    };
    let Some(frame) = session.frame.as_ref() else {
        *visibility = Visibility::Hidden;
        return;
    };
    let player = &frame.player;
    sprite.custom_size = Some(player.bounds.size());
    sprite.color = player_color(player.character, player.animation);
    sprite.flip_x = player.facing == Facing::Left;
    transform.translation = rect_translation(&player.bounds, PLAYER_Z);
    *visibility = Visibility::Visible;
}

pub(crate) fn sync_camera(
    session: Res<GameSession>,
    windows: Query<&Window, With<PrimaryWindow>>,
    mut clear: ResMut<ClearColor>,
    mut cameras: Query<(&mut Transform, &mut Projection), With<Camera2d>>,
    mut backdrop: Query<
        (&mut Transform, &mut Visibility),
        (With<BackdropSprite>, Without<Camera2d>),
    >,
) {
    let Some(frame) = session.frame.as_ref() else {
        return;
    };
    let Ok((mut transform, mut projection)) = cameras.single_mut() else {
        return;
    };

    let translation = camera_translation(frame);
    transform.translation.x = translation.x;
    transform.translation.y = translation.y;
    transform.rotation = Quat::from_rotation_z(frame.camera.rotation);

    // Fit the logical viewport to the window
    if let (Ok(window), Projection::Orthographic(ortho)) = (windows.single(), &mut *projection) {
        let scale_x = frame.camera.viewport.x / window.width().max(1.0);
        let scale_y = frame.camera.viewport.y / window.height().max(1.0);
        ortho.scale = scale_x.max(scale_y) / frame.camera.zoom;
    }

    if let Ok((mut backdrop_transform, mut visibility)) = backdrop.single_mut() {
        backdrop_transform.translation = Vec3::new(translation.x, translation.y, BACKDROP_Z);
        *visibility = match frame.backdrop {
            Backdrop::Sky => Visibility::Visible,
            Backdrop::Solid(_) => Visibility::Hidden,
        };
    }
    if let Backdrop::Solid([r, g, b, a]) = frame.backdrop {
        clear.0 = Color::srgba_u8(r, g, b, a);
    }
}

pub(crate) fn sync_overlay(
    session: Res<GameSession>,
    mut lines: Query<(&OverlayText, &mut Text, &mut TextColor, &mut Node, &mut Visibility)>,
) {
    let overlay = session.frame.as_ref().and_then(|frame| frame.overlay.as_ref());
    for (slot, mut text, mut color, mut node, mut visibility) in &mut lines {
        match overlay.and_then(|overlay| overlay.lines.get(slot.0)) {
            Some(line) => {
                text.0.clone_from(&line.text);
                color.0 = overlay_color(line.color);
                node.left = Val::Px(4.0 + line.position.x);
                node.top = Val::Px(4.0 + line.position.y / LINE_HEIGHT * OVERLAY_FONT_SIZE);
                *visibility = Visibility::Visible;
            }
            None => *visibility = Visibility::Hidden,
        }
    }
}
