//! Procedural world looks: a season and a place, drawn independently and
//! uniformly, with a palette derived from the pair through a fixed table.

use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Place {
    Countryside,
    City,
    Highway,
    Woods,
}

impl Place {
    pub const ALL: [Place; 4] = [Place::Countryside, Place::City, Place::Highway, Place::Woods];
}

/// 24-bit color, kept independent of any UI crate so the engine stays
/// presentation-free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorldTheme {
    pub season: Season,
    pub place: Place,
    /// Top and bottom stops of the sky gradient.
    pub sky: (Rgb, Rgb),
    pub ground: Rgb,
}

/// Sky depends on the season alone.
pub fn sky_gradient(season: Season) -> (Rgb, Rgb) {
    match season {
        Season::Winter => (Rgb(176, 196, 222), Rgb(230, 238, 245)),
        Season::Spring => (Rgb(135, 206, 250), Rgb(200, 235, 215)),
        Season::Summer => (Rgb(64, 156, 255), Rgb(160, 216, 255)),
        Season::Fall => (Rgb(205, 155, 100), Rgb(240, 210, 160)),
    }
}

/// Ground depends on both axes: the same place reads differently under snow
/// than in high summer.
pub fn ground_color(season: Season, place: Place) -> Rgb {
    match (season, place) {
        (Season::Winter, Place::Countryside) => Rgb(210, 214, 220),
        (Season::Winter, Place::City) => Rgb(150, 155, 165),
        (Season::Winter, Place::Highway) => Rgb(120, 125, 135),
        (Season::Winter, Place::Woods) => Rgb(180, 190, 200),
        (Season::Spring, Place::Countryside) => Rgb(110, 190, 90),
        (Season::Spring, Place::City) => Rgb(130, 140, 130),
        (Season::Spring, Place::Highway) => Rgb(105, 110, 105),
        (Season::Spring, Place::Woods) => Rgb(70, 150, 80),
        (Season::Summer, Place::Countryside) => Rgb(90, 170, 60),
        (Season::Summer, Place::City) => Rgb(140, 140, 135),
        (Season::Summer, Place::Highway) => Rgb(95, 95, 95),
        (Season::Summer, Place::Woods) => Rgb(45, 120, 55),
        (Season::Fall, Place::Countryside) => Rgb(180, 140, 80),
        (Season::Fall, Place::City) => Rgb(135, 125, 115),
        (Season::Fall, Place::Highway) => Rgb(100, 95, 90),
        (Season::Fall, Place::Woods) => Rgb(120, 85, 50),
    }
}

/// Uniform choice on each axis, deterministic palette given the choice.
pub fn generate_theme<R: Rng>(rng: &mut R) -> WorldTheme {
    let season = Season::ALL[rng.gen_range(0..Season::ALL.len())];
    let place = Place::ALL[rng.gen_range(0..Place::ALL.len())];
    WorldTheme { season, place, sky: sky_gradient(season), ground: ground_color(season, place) }
}
