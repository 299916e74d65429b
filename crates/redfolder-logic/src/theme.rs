//! Visual theme per room type: display name, map colour and surface textures.
//!
//! Consumers (map widgets, 3D renderers) read this table instead of matching
//! on `RoomType` themselves. Surfaces a room type doesn't draw are `None`;
//! open-air rooms have no ceiling and the void has nothing at all.

use serde::Serialize;

use crate::grid::RoomType;

/// Texture asset shipped with the game client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Texture {
    FloorAsphalt,
    FloorWoodDark,
    WallConcretePanel,
    WallConcreteDark,
    WallBrutalistDark,
    CeilingConcreteDark,
    CeilingIndustrialDark,
}

impl Texture {
    /// Asset path relative to the client's web root.
    pub fn path(self) -> &'static str {
        match self {
            Texture::FloorAsphalt => "/textures/floor_asphalt.png",
            Texture::FloorWoodDark => "/textures/floor_wood_dark.png",
            Texture::WallConcretePanel => "/textures/wall_concrete_panel.png",
            Texture::WallConcreteDark => "/textures/wall_concrete_dark.png",
            Texture::WallBrutalistDark => "/textures/wall_brutalist_dark.png",
            Texture::CeilingConcreteDark => "/textures/ceiling_concrete_dark.png",
            Texture::CeilingIndustrialDark => "/textures/ceiling_industrial_dark.png",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RoomTheme {
    pub name: &'static str,
    /// `#rrggbb`
    pub color: &'static str,
    pub floor: Option<Texture>,
    pub wall: Option<Texture>,
    pub ceiling: Option<Texture>,
}

pub fn room_theme(room_type: RoomType) -> RoomTheme {
    use Texture::*;
    let (color, floor, wall, ceiling) = match room_type {
        RoomType::Start => ("#4ade80", Some(FloorAsphalt), Some(WallConcretePanel), None), // green
        RoomType::Staging => ("#6b7280", Some(FloorAsphalt), Some(WallConcretePanel), None), // gray
        RoomType::Normal => (
            "#374151", // dark gray
            Some(FloorWoodDark),
            Some(WallConcreteDark),
            Some(CeilingConcreteDark),
        ),
        RoomType::Objective => (
            "#f87171", // red
            Some(FloorWoodDark),
            Some(WallBrutalistDark),
            Some(CeilingIndustrialDark),
        ),
        RoomType::End => (
            "#6366f1", // indigo
            Some(FloorWoodDark),
            Some(WallConcreteDark),
            Some(CeilingConcreteDark),
        ),
        RoomType::Empty => ("#000000", None, None, None),
    };
    RoomTheme {
        name: room_type.default_name(),
        color,
        floor,
        wall,
        ceiling,
    }
}

/// Parse a `#rrggbb` colour into sRGB channels scaled to 0..1.
pub fn color_rgb(hex: &str) -> Option<[f32; 3]> {
    let digits = hex.strip_prefix('#')?;
    if digits.len() != 6 {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(digits.get(i..i + 2)?, 16)
            .ok()
            .map(|v| v as f32 / 255.0)
    };
    Some([channel(0)?, channel(2)?, channel(4)?])
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_TYPES: [RoomType; 6] = [
        RoomType::Start,
        RoomType::Staging,
        RoomType::Normal,
        RoomType::Objective,
        RoomType::End,
        RoomType::Empty,
    ];

    #[test]
    fn every_type_has_a_valid_colour() {
        for t in ALL_TYPES {
            let theme = room_theme(t);
            assert!(color_rgb(theme.color).is_some(), "{:?}", t);
            assert_eq!(theme.name, t.default_name());
        }
    }

    #[test]
    fn void_draws_nothing() {
        let theme = room_theme(RoomType::Empty);
        assert_eq!(theme.color, "#000000");
        assert!(theme.floor.is_none() && theme.wall.is_none() && theme.ceiling.is_none());
    }

    #[test]
    fn staging_is_open_air() {
        assert!(room_theme(RoomType::Start).ceiling.is_none());
        assert!(room_theme(RoomType::Staging).ceiling.is_none());
        assert!(room_theme(RoomType::Normal).ceiling.is_some());
    }

    #[test]
    fn objective_stands_out() {
        let theme = room_theme(RoomType::Objective);
        assert_eq!(theme.color, "#f87171");
        assert_eq!(
            theme.wall.map(Texture::path),
            Some("/textures/wall_brutalist_dark.png")
        );
    }

    #[test]
    fn colour_parsing() {
        assert_eq!(color_rgb("#ff0000"), Some([1.0, 0.0, 0.0]));
        assert_eq!(color_rgb("ff0000"), None);
        assert_eq!(color_rgb("#fff"), None);
        assert_eq!(color_rgb("#zz0000"), None);
    }
}
