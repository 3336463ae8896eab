//! Vanity role evaluation with the re-grant cooldown.

use std::sync::Mutex;
use std::time::Instant;

use log::debug;

use crate::vanity::MemberStatusView;
use crate::vanity::StatusRules;
use crate::vanity::VanityAction;
use crate::vanity::VanityCooldown;

pub struct VanityService {
    rules: StatusRules,
    cooldown: Mutex<VanityCooldown>,
}

impl VanityService {
    pub fn new(rules: StatusRules) -> Self {
        Self {
            rules,
            cooldown: Mutex::new(VanityCooldown::new()),
        }
    }

    /// Evaluates a member's presence snapshot and maintains the cooldown
    /// map: a revoke starts the suppression window, a grant clears it.
    pub fn evaluate_member(
        &self,
        user_id: u64,
        view: &MemberStatusView,
        allow_invite: bool,
    ) -> VanityAction {
        let now = Instant::now();
        let mut cooldown = self.cooldown.lock().expect("cooldown lock poisoned");

        let action = crate::vanity::evaluate(
            view,
            &self.rules,
            allow_invite,
            cooldown.is_active(user_id, now),
        );

        match action {
            VanityAction::Revoke => {
                debug!("Vanity revoke for {}, starting cooldown.", user_id);
                cooldown.suppress(user_id, now);
            }
            VanityAction::Grant => cooldown.clear(user_id),
            VanityAction::Keep => {}
        }

        action
    }
}
