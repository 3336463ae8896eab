use std::sync::Arc;

use crate::service::preference_service::PreferenceService;
use crate::service::time_relay_service::TimeRelayService;
use crate::service::vanity_service::VanityService;
use crate::store::PreferenceStore;
use crate::vanity::StatusRules;

pub mod error;
pub mod preference_service;
pub mod time_relay_service;
pub mod vanity_service;

pub struct Services {
    pub preferences: Arc<PreferenceService>,
    pub time_relay: Arc<TimeRelayService>,
    pub vanity: Arc<VanityService>,
}

impl Services {
    pub fn new(store: Arc<dyn PreferenceStore>, rules: StatusRules) -> Self {
        Self {
            preferences: Arc::new(PreferenceService::new(store.clone())),
            time_relay: Arc::new(TimeRelayService::new(store)),
            vanity: Arc::new(VanityService::new(rules)),
        }
    }
}
