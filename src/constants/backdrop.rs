pub const GROUND_HEIGHT: u16 = 3;

// Drifting particle speed: rows per second
pub const PARTICLE_SPEED: f32 = 4.0;
pub const PARTICLE_DENSITY: f32 = 0.04;

pub const WINTER_PARTICLES: [char; 3] = ['❄', '❅', '❆'];
pub const SPRING_PARTICLES: [char; 3] = ['❀', '✿', '·'];
pub const SUMMER_PARTICLES: [char; 3] = ['·', '˙', '•'];
pub const FALL_PARTICLES: [char; 3] = ['❧', '*', ','];

pub const COUNTRYSIDE_SILHOUETTE: &str = r#"
          __
     ____/  \____
    |   barn    |             x     x     x     x     x     x
 ~~ |  []  []   | ~~~   ~~ |--|--|--|--|--|--|--|--|--|--|--|--| ~~
"#;

pub const CITY_SILHOUETTE: &str = r#"
      _   ___       _      ____        _   _      ___       _
  _  | | |: :|  _  | | _  |:: ::|  _  | | | | _  |: :|  _  | |
 | |_| |_|: :|_| |_| || |_|:: ::|_| |_| |_| || |_|: :|_| |_| |_
"#;

pub const HIGHWAY_SILHOUETTE: &str = r#"
       ______                                      ______
      | EXIT |    -- --- --   -- --- --   -- ---  |  60  |
 _____|______|____________________________________|______|_____
"#;

pub const WOODS_SILHOUETTE: &str = r#"
    /\        /\      /\          /\        /\          /\
   /==\  /\  /==\    /==\   /\   /==\  /\  /==\   /\   /==\
    ||  /==\  ||      ||   /==\   ||  /==\  ||   /==\   ||
"#;
