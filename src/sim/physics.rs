//! Player vertical kinematics
//!
//! Gravity only integrates while airborne. Landing clamps the player to the
//! ground line, zeroes velocity, and restores the jump budget exactly once.

use super::state::Player;
use crate::consts::*;

/// Advance the player by one tick of gravity and resolve landing
pub fn apply_gravity(player: &mut Player, max_jumps: u8) {
    if player.airborne {
        player.velocity_y += GRAVITY;
        player.pos.y += player.velocity_y;
    }

    let ground = WORLD_HEIGHT - player.size.y;
    if player.pos.y >= ground {
        player.pos.y = ground;
        player.velocity_y = 0.0;
        // Restore jumps only when coming down from a jump, never while
        // already standing
        if player.airborne {
            player.jumps_left = max_jumps;
            player.airborne = false;
        }
    }
}

/// Consume a jump if any remain.
///
/// Returns false and changes nothing when the budget is spent; a mid-air
/// second press with no double jump is silently ignored.
pub fn request_jump(player: &mut Player) -> bool {
    if player.jumps_left == 0 {
        return false;
    }
    player.velocity_y = JUMP_STRENGTH;
    player.airborne = true;
    player.jumps_left -= 1;
    true
}
