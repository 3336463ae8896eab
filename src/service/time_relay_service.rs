//! The chat-time relay pipeline: matcher output to reply groups.
//!
//! Pure over the preference store; the bot layer resolves `for <someone>`
//! clauses to guild members beforehand and renders the returned groups into
//! embeds afterwards.

use std::sync::Arc;

use chrono::DateTime;
use chrono::Utc;

use crate::store::PreferenceStore;
use crate::timeparse::TimeMatch;
use crate::timezone::projection;
use crate::timezone::resolver::SubjectView;
use crate::timezone::resolver::resolve_timezone;

/// A user a reply group is attributed to: the message author, or the
/// resolved target of a `for <someone>` clause.
#[derive(Clone, Debug)]
pub struct RelaySubject {
    pub user_id: u64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub is_guild_member: bool,
}

/// One match paired with its resolved target, if the match named one.
/// Matches whose target could not be resolved to a member are dropped
/// before reaching the service.
pub struct RelayRequest {
    pub time: TimeMatch,
    pub target: Option<RelaySubject>,
}

/// One projected instant, ready for timestamp rendering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplyLine {
    /// Clock label as written, e.g. `08:15 PM`.
    pub label: String,
    /// Unix timestamp of the projected instant.
    pub unix: i64,
}

/// Projected times for one subject, labelled once per message.
#[derive(Clone, Debug)]
pub struct ReplyGroup {
    pub user_id: u64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub lines: Vec<ReplyLine>,
}

pub struct TimeRelayService {
    store: Arc<dyn PreferenceStore>,
}

impl TimeRelayService {
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self { store }
    }

    /// Resolves and projects a batch of matches from one message.
    ///
    /// Groups are keyed by subject in first-appearance order; a subject
    /// reappearing in later matches extends its existing group.
    /// Unresolvable matches contribute nothing, so the result may be empty.
    pub async fn build_reply_groups(
        &self,
        author: &RelaySubject,
        requests: &[RelayRequest],
        now: DateTime<Utc>,
    ) -> Vec<ReplyGroup> {
        let author_view = SubjectView {
            user_id: author.user_id,
            preference: self.store.get(author.user_id).await,
            is_guild_member: author.is_guild_member,
        };

        let mut groups: Vec<ReplyGroup> = Vec::new();

        for request in requests {
            let target_view = match &request.target {
                Some(target) => Some(SubjectView {
                    user_id: target.user_id,
                    preference: self.store.get(target.user_id).await,
                    is_guild_member: target.is_guild_member,
                }),
                None => None,
            };

            let Some(tz) = resolve_timezone(&author_view, target_view.as_ref()) else {
                continue;
            };

            let subject = request.target.as_ref().unwrap_or(author);
            let instants = projection::project(&request.time, now.with_timezone(&tz));
            if instants.is_empty() {
                continue;
            }

            let group = match groups.iter_mut().find(|g| g.user_id == subject.user_id) {
                Some(group) => group,
                None => {
                    groups.push(ReplyGroup {
                        user_id: subject.user_id,
                        name: subject.name.clone(),
                        avatar_url: subject.avatar_url.clone(),
                        lines: Vec::new(),
                    });
                    groups.last_mut().expect("group just pushed")
                }
            };

            for instant in instants {
                group.lines.push(ReplyLine {
                    label: projection::clock_label(&instant),
                    unix: instant.timestamp(),
                });
            }
        }

        groups
    }
}
