pub const MODEL_PATH: &str = "models/scene.glb";

pub const BAKED_TEXTURE_PATH: &str = "textures/baked.jpg";
pub const OUTLINE_TEXTURE_PATH: &str = "textures/outline.png";
pub const BLOODSTAIN_TEXTURE_PATH: &str = "textures/bloodstain.png";
/// Loaded and tracked, but the blanket is drawn with a flat colour.
pub const BLANKET_TEXTURE_PATH: &str = "textures/burnthewitch.jpg";

pub const MUSIC_PATH: &str = "music/music.ogg";

/// Canvas selector used by the wasm build.
pub const CANVAS_SELECTOR: &str = "canvas.webgl";
