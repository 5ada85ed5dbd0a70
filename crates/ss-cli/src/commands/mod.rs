pub mod check;
pub mod map;
pub mod play;

use ss_core::StoryGraph;

/// Build the built-in story, turning validation failures into a message.
fn load_story() -> Result<StoryGraph, String> {
    ss_story::swimming_star().map_err(|e| e.to_string())
}
