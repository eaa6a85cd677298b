//! Contact detection and impulse response for the drop field.
//!
//! The token is the only dynamic body; pegs and boundary walls are static,
//! so every contact resolves against infinite mass: positional correction
//! along the normal, restitution on the normal velocity, friction on the
//! tangential velocity.

use glam::Vec2;

use super::token::Token;

/// A single contact against a static body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Contact {
    /// Surface normal, pointing toward the token center
    pub normal: Vec2,
    /// Overlap depth along the normal
    pub penetration: f32,
}

/// Check the token circle against a static peg circle.
pub fn circle_contact(pos: Vec2, radius: f32, center: Vec2, center_radius: f32) -> Option<Contact> {
    let offset = pos - center;
    let reach = radius + center_radius;
    let dist_sq = offset.length_squared();
    if dist_sq >= reach * reach {
        return None;
    }
    let dist = dist_sq.sqrt();
    if dist <= f32::EPSILON {
        // Dead-center overlap: push straight up, back into the field
        return Some(Contact {
            normal: Vec2::new(0.0, -1.0),
            penetration: reach,
        });
    }
    Some(Contact {
        normal: offset / dist,
        penetration: reach - dist,
    })
}

/// Contacts against the enclosing boundary walls (left, right, top, floor).
///
/// The floor sits below the exit sensor line, so a falling token resolves
/// before ever resting on it; the walls only guarantee it cannot leave the
/// board.
pub fn boundary_contacts(pos: Vec2, radius: f32, width: f32, floor_y: f32) -> Vec<Contact> {
    let mut contacts = Vec::new();
    if pos.x - radius < 0.0 {
        contacts.push(Contact {
            normal: Vec2::new(1.0, 0.0),
            penetration: radius - pos.x,
        });
    }
    if pos.x + radius > width {
        contacts.push(Contact {
            normal: Vec2::new(-1.0, 0.0),
            penetration: pos.x + radius - width,
        });
    }
    if pos.y - radius < 0.0 {
        contacts.push(Contact {
            normal: Vec2::new(0.0, 1.0),
            penetration: radius - pos.y,
        });
    }
    if pos.y + radius > floor_y {
        contacts.push(Contact {
            normal: Vec2::new(0.0, -1.0),
            penetration: pos.y + radius - floor_y,
        });
    }
    contacts
}

/// Push the token out of the surface and apply the collision impulse.
///
/// `v_n' = -restitution * v_n`, `v_t' = (1 - friction) * v_t`. The impulse
/// only fires while the token moves into the surface, so resting contacts
/// are not re-excited.
pub fn resolve_contact(token: &mut Token, contact: &Contact) {
    token.pos += contact.normal * contact.penetration;
    let normal_speed = token.vel.dot(contact.normal);
    if normal_speed < 0.0 {
        let tangential = token.vel - contact.normal * normal_speed;
        token.vel = tangential * (1.0 - token.friction)
            - contact.normal * normal_speed * token.restitution;
    }
}
