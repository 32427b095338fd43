//! Riding: an actor standing on a log is carried along with it.

use crate::entity::{Actor, Platform};

/// First platform on the actor's row whose cells include the actor's column.
/// Overlapping logs are allowed; spawn order decides which one carries.
pub fn carrier<'a>(actor: &Actor, platforms: &'a [Platform]) -> Option<&'a Platform> {
    let col = actor.cell();
    platforms
        .iter()
        .find(|p| p.y == actor.y && p.covers(col))
}

/// Displace the actor by the velocity of the log it stands on.
/// Returns the moved actor and whether it is riding. Not riding in the float band means drowning.
pub fn bind(actor: Actor, platforms: &[Platform]) -> (Actor, bool) {
    match carrier(&actor, platforms) {
        Some(p) => {
            let moved = Actor {
                x: actor.x + p.velocity(),
                ..actor
            };
            debug_assert!(moved.x.is_finite());
            (moved, true)
        }
        None => (actor, false),
    }
}
