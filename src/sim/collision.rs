//! Collision and damage rules
//!
//! Callers resolve overlaps in pool index order and stop at the first hit,
//! so two hazards touching the player on the same tick always resolve the same way.

use super::rect::Rect;

/// What touching a landed meteor means for the run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MeteorContact {
    /// Boss still has more than one HP: the player dies
    Lethal,
    /// Boss on its last HP and this meteor hasn't hurt it yet: boss dies
    FinalBlow,
    /// Boss on its last HP but this meteor already dealt its damage
    Spent,
}

pub fn meteor_contact(boss_hp: u32, has_dealt_damage: bool) -> MeteorContact {
    if boss_hp > 1 {
        MeteorContact::Lethal
    } else if has_dealt_damage {
        MeteorContact::Spent
    } else {
        MeteorContact::FinalBlow
    }
}

/// Whether a landed meteor's trailing edge has scrolled past `x`
#[inline]
pub fn has_passed(rect: &Rect, x: f32) -> bool {
    rect.right() < x
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meteor_contact_rule() {
        assert_eq!(meteor_contact(10, false), MeteorContact::Lethal);
        assert_eq!(meteor_contact(2, true), MeteorContact::Lethal);
        assert_eq!(meteor_contact(1, false), MeteorContact::FinalBlow);
        assert_eq!(meteor_contact(1, true), MeteorContact::Spent);
    }

    #[test]
    fn test_has_passed() {
        let rect = Rect::new(100.0, 0.0, 50.0, 50.0);
        assert!(!has_passed(&rect, 150.0));
        assert!(has_passed(&rect, 151.0));
    }
}
