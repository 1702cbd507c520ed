pub mod backdrop;

// Outer frame of the app, border included.
pub const WIDTH: u16 = 82;
pub const HEIGHT: u16 = 44;

pub const TITLE_TEXT: &str = r#"
 ___  ___ _____ ___  ___     ___  ___ ___   _   _  __
| _ \| __|_   _| _ \/ _ \   | _ )| _ \ __| /_\ | |/ /
|   /| _|  | | |   / (_) |  | _ \|   / _| / _ \| ' <
|_|_\|___| |_| |_|_\\___/   |___/|_|_\___/_/ \_\_|\_\
"#;
