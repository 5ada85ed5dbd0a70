//! Flags tracked by the Swimming Star story.

use ss_core::FlagSchema;

/// Learned "Spark of Solidarity".
pub const SOLIDARITY: &str = "skill_solidarity";
/// Learned "Resonant Lullaby".
pub const LULLABY: &str = "skill_lullaby";
/// Learned "Guiding Lanterns".
pub const LANTERNS: &str = "skill_lanterns";
/// Advice was already sought at the current beat.
pub const COUNSEL: &str = "counsel";
/// Allied worlds ready to help.
pub const ALLIES: &str = "allies";
/// Accumulated negative influence.
pub const INFLUENCE: &str = "influence";
/// How strongly the wise entity can manifest (0 = silent).
pub const PRESENCE: &str = "presence";
/// Trust between the star and the entity.
pub const TRUST: &str = "trust";
/// Times the star has rested.
pub const RESTS: &str = "rests";
/// The star's current form.
pub const FORM: &str = "form";

/// Every form the star passes through, in order.
pub const FORMS: [&str; 6] = ["star", "stardust", "droplet", "comet", "cell", "human"];

/// Most allies the star can gather.
pub const MAX_ALLIES: i32 = 10;

/// Highest entity presence.
pub const MAX_PRESENCE: i32 = 4;

pub(crate) fn schema() -> FlagSchema {
    FlagSchema::new()
        .with_switch(SOLIDARITY)
        .with_switch(LULLABY)
        .with_switch(LANTERNS)
        .with_switch(COUNSEL)
        .with_counter(ALLIES, 0, MAX_ALLIES, 0)
        .with_counter(INFLUENCE, 0, 10, 0)
        .with_counter(PRESENCE, 0, MAX_PRESENCE, 3)
        .with_counter(TRUST, -3, 10, 0)
        .with_counter(RESTS, 0, 999, 0)
        .with_variant(FORM, FORMS)
}
